use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A dated performance entry on a profile.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Stat {
    pub id: Uuid,
    pub profile_id: Option<Uuid>,
    pub date: NaiveDate,
    pub event: String,
    pub performance: String,
    pub highlight: String,
}
