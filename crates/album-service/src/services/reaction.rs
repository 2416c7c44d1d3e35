//! Reaction toggle protocol
//!
//! `toggle` is determine-then-act: look up the (media, emoji, participant)
//! row, delete it if present, insert it if absent. The insert relies on the
//! storage layer's unique constraint, so the double-click race collapses to
//! a single row and the losing insert is reported as "already present",
//! never as a failure.

use album_core::entities::{Reaction, ReactionBadge, ReactionEmoji};
use album_core::value_objects::Snowflake;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{info, instrument};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Outcome of one toggle call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleState {
    /// A new reaction row was inserted
    Added,
    /// The existing reaction row was removed
    Removed,
    /// The insert lost a race; the row already exists, which is fine
    AlreadyPresent,
}

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Toggle a participant's reaction on a media item
    #[instrument(skip(self))]
    pub async fn toggle(
        &self,
        media_id: Snowflake,
        emoji: ReactionEmoji,
        participant_id: &str,
    ) -> ServiceResult<ToggleState> {
        let media = self
            .ctx
            .media_repo()
            .find_by_id(media_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Media", media_id.to_string()))?;

        let existing = self
            .ctx
            .reaction_repo()
            .find(media_id, emoji, participant_id)
            .await?;

        match existing {
            Some(reaction) => {
                let removed = self
                    .ctx
                    .reaction_repo()
                    .delete(media_id, emoji, participant_id)
                    .await?;

                if removed {
                    info!(
                        media_id = %media_id,
                        emoji = %emoji,
                        participant_id = %participant_id,
                        "Reaction removed"
                    );
                    self.ctx
                        .publisher()
                        .publish_reaction_remove(media.event_id, &reaction)
                        .await
                        .ok();
                }

                Ok(ToggleState::Removed)
            }
            None => {
                let reaction = Reaction::new(
                    self.ctx.generate_id(),
                    media_id,
                    emoji,
                    participant_id.to_string(),
                );

                let inserted = self.ctx.reaction_repo().create(&reaction).await?;

                if inserted {
                    info!(
                        media_id = %media_id,
                        emoji = %emoji,
                        participant_id = %participant_id,
                        "Reaction added"
                    );
                    self.ctx
                        .publisher()
                        .publish_reaction_add(media.event_id, &reaction)
                        .await
                        .ok();

                    Ok(ToggleState::Added)
                } else {
                    // A concurrent toggle won the insert; the participant is
                    // reacted either way
                    Ok(ToggleState::AlreadyPresent)
                }
            }
        }
    }

    /// Badge counts for a media item, with "me" derived from the caller's
    /// participant identity
    #[instrument(skip(self))]
    pub async fn media_badges(
        &self,
        media_id: Snowflake,
        participant_id: &str,
    ) -> ServiceResult<Vec<ReactionBadge>> {
        let counts: HashMap<ReactionEmoji, i64> = self
            .ctx
            .reaction_repo()
            .count_by_emoji(media_id)
            .await?
            .into_iter()
            .collect();

        let mut badges = Vec::new();
        for emoji in ReactionEmoji::ALL {
            let count = counts.get(&emoji).copied().unwrap_or(0);
            if count == 0 {
                continue;
            }

            let me = self
                .ctx
                .reaction_repo()
                .find(media_id, emoji, participant_id)
                .await?
                .is_some();

            badges.push(ReactionBadge::new(emoji, count, me));
        }

        Ok(badges)
    }

    /// All reactions under an event, for a full feed refetch
    #[instrument(skip(self))]
    pub async fn list_event_reactions(&self, event_id: Snowflake) -> ServiceResult<Vec<Reaction>> {
        self.ctx
            .event_repo()
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Event", event_id.to_string()))?;

        Ok(self.ctx.reaction_repo().find_by_event(event_id).await?)
    }
}
