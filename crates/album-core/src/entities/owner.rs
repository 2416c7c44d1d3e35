//! Owner entity - the authenticated participant who creates events

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Event owner account
///
/// Owners are the only authenticated identities in the system; guests act
/// under an ephemeral session identity instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub id: Snowflake,
    pub email: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

impl Owner {
    /// Create a new Owner
    pub fn new(id: Snowflake, email: String, display_name: String) -> Self {
        Self {
            id,
            email,
            display_name,
            created_at: Utc::now(),
        }
    }
}
