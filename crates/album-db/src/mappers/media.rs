//! Media entity <-> model mapper

use album_core::entities::MediaItem;
use album_core::value_objects::Snowflake;

use crate::models::MediaModel;

impl From<MediaModel> for MediaItem {
    fn from(model: MediaModel) -> Self {
        MediaItem {
            id: Snowflake::new(model.id),
            event_id: Snowflake::new(model.event_id),
            storage_path: model.storage_path,
            uploader_name: model.uploader_name,
            caption: model.caption,
            file_type: model.file_type,
            file_size: model.file_size,
            is_video: model.is_video,
            duration_secs: model.duration_secs,
            width: model.width,
            height: model.height,
            file_extension: model.file_extension,
            created_at: model.created_at,
        }
    }
}
