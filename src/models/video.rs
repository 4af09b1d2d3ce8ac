use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A highlight video link on a profile.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Video {
    pub id: Uuid,
    pub profile_id: Option<Uuid>,
    pub url: String,
}
