use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An achievement line on a profile: an emoji marker plus free text.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Achievement {
    pub id: Uuid,
    pub profile_id: Option<Uuid>,
    pub emoji: String,
    pub achievement: Option<String>,
}
