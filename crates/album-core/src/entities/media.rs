//! Media item entity - a single uploaded photo or video

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Media item entity
///
/// `created_at` is the sole sort key among siblings; lists are newest-first
/// with `id` breaking ties deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: Snowflake,
    pub event_id: Snowflake,
    /// Opaque locator into blob storage
    pub storage_path: String,
    pub uploader_name: Option<String>,
    pub caption: Option<String>,
    /// MIME string as reported by the uploading client
    pub file_type: String,
    pub file_size: i64,
    pub is_video: bool,
    pub duration_secs: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub file_extension: String,
    pub created_at: DateTime<Utc>,
}

impl MediaItem {
    /// Create a new MediaItem
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Snowflake,
        event_id: Snowflake,
        storage_path: String,
        file_type: String,
        file_size: i64,
        file_extension: String,
    ) -> Self {
        let is_video = file_type.starts_with("video/");
        Self {
            id,
            event_id,
            storage_path,
            uploader_name: None,
            caption: None,
            file_type,
            file_size,
            is_video,
            duration_secs: None,
            width: None,
            height: None,
            file_extension,
            created_at: Utc::now(),
        }
    }

    /// Attach uploader name and caption shared across an upload batch
    pub fn with_attribution(
        mut self,
        uploader_name: Option<String>,
        caption: Option<String>,
    ) -> Self {
        self.uploader_name = uploader_name;
        self.caption = caption;
        self
    }

    /// Attach best-effort probed video metadata
    pub fn with_video_metadata(mut self, metadata: Option<VideoMetadata>) -> Self {
        if let Some(meta) = metadata {
            self.duration_secs = Some(meta.duration_secs);
            self.width = Some(meta.width);
            self.height = Some(meta.height);
        }
        self
    }

    /// Sort key for the newest-first ordering; ties break by id
    #[inline]
    pub fn sort_key(&self) -> (DateTime<Utc>, Snowflake) {
        (self.created_at, self.id)
    }
}

/// Probed dimensions and duration for a video upload
///
/// Advisory only; a media item is valid without it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoMetadata {
    /// Duration in whole seconds, rounded
    pub duration_secs: i32,
    pub width: i32,
    pub height: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(file_type: &str) -> MediaItem {
        MediaItem::new(
            Snowflake::new(1),
            Snowflake::new(10),
            "media/10/abc.jpg".to_string(),
            file_type.to_string(),
            2_097_152,
            "jpg".to_string(),
        )
    }

    #[test]
    fn test_photo_classification() {
        let photo = item("image/jpeg");
        assert!(!photo.is_video);
        assert_eq!(photo.file_size, 2_097_152);
    }

    #[test]
    fn test_video_classification_by_mime_prefix() {
        assert!(item("video/mp4").is_video);
        // Anything that is not video/* counts as a photo
        assert!(!item("application/octet-stream").is_video);
    }

    #[test]
    fn test_video_metadata_is_optional() {
        let video = item("video/mp4").with_video_metadata(None);
        assert!(video.duration_secs.is_none());
        assert!(video.width.is_none());

        let video = item("video/mp4").with_video_metadata(Some(VideoMetadata {
            duration_secs: 12,
            width: 1920,
            height: 1080,
        }));
        assert_eq!(video.duration_secs, Some(12));
        assert_eq!(video.width, Some(1920));
        assert_eq!(video.height, Some(1080));
    }

    #[test]
    fn test_sort_key_breaks_ties_by_id() {
        let a = item("image/jpeg");
        let mut b = item("image/jpeg");
        b.id = Snowflake::new(2);
        b.created_at = a.created_at;
        assert!(b.sort_key() > a.sort_key());
    }
}
