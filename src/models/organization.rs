use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An institution owning zero or more athlete profiles.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Organization {
    pub id: Uuid,
    /// Admin account owning this organization, if provisioned
    pub owner_user_id: Option<Uuid>,
    pub name: String,
    pub address: Option<String>,
    pub phone: String,
    pub email: String,
    pub logo_url: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// School specialization of an organization. One-to-one extension row keyed by
/// the organization id; composition, not inheritance.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct School {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub organization: Organization,
    pub principal_name: String,
    pub established_year: i32,
}
