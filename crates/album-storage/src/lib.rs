//! # album-storage
//!
//! Blob storage layer implementing the `BlobStore` trait over a local
//! directory. Keys are opaque relative paths minted by the upload
//! coordinator; public URLs are resolved by joining a configured base URL.

mod fs;

pub use fs::FsBlobStore;
