//! Traits (ports) implemented by the infrastructure layers

mod probe;
mod repositories;
mod storage;

pub use probe::{MediaProbe, NullProbe};
pub use repositories::{
    EventRepository, MediaRepository, OwnerRepository, ReactionRepository, RepoResult,
};
pub use storage::BlobStore;
