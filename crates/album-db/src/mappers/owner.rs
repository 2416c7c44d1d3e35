//! Owner entity <-> model mapper

use album_core::entities::Owner;
use album_core::value_objects::Snowflake;

use crate::models::OwnerModel;

impl From<OwnerModel> for Owner {
    fn from(model: OwnerModel) -> Self {
        Owner {
            id: Snowflake::new(model.id),
            email: model.email,
            display_name: model.display_name,
            created_at: model.created_at,
        }
    }
}
