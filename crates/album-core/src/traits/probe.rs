//! Media probe trait - best-effort video metadata extraction

use async_trait::async_trait;

use crate::entities::VideoMetadata;

/// Best-effort extraction of duration and pixel dimensions from video bytes
///
/// Probing never fails an upload: any error inside an implementation is
/// reported as `None` and the media item proceeds with null metadata.
#[async_trait]
pub trait MediaProbe: Send + Sync {
    /// Probe the given bytes; `extension` hints at the container format
    async fn probe(&self, bytes: &[u8], extension: &str) -> Option<VideoMetadata>;
}

/// Probe that never reports metadata
///
/// Useful where no decoder is available; uploads still succeed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProbe;

#[async_trait]
impl MediaProbe for NullProbe {
    async fn probe(&self, _bytes: &[u8], _extension: &str) -> Option<VideoMetadata> {
        None
    }
}
