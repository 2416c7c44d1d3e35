//! Reaction entity <-> model mapper
//!
//! Conversion is fallible: emoji kinds are a closed enum, so a row holding an
//! unknown name surfaces as a database error.

use album_core::entities::{Reaction, ReactionEmoji};
use album_core::error::DomainError;
use album_core::value_objects::Snowflake;

use crate::models::ReactionModel;

impl TryFrom<ReactionModel> for Reaction {
    type Error = DomainError;

    fn try_from(model: ReactionModel) -> Result<Self, Self::Error> {
        let emoji = ReactionEmoji::parse(&model.emoji)
            .ok_or_else(|| DomainError::DatabaseError(format!("corrupt emoji: {}", model.emoji)))?;

        Ok(Reaction {
            id: Snowflake::new(model.id),
            media_id: Snowflake::new(model.media_id),
            emoji,
            participant_id: model.participant_id,
            created_at: model.created_at,
        })
    }
}
