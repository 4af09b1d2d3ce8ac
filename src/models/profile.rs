use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Base identity fields shared by every person-derived record.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
}

/// Athlete fields layered over [`Person`]. `organization_id` is nullable and
/// nulled out when the organization is deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Athlete {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub person: Person,
    /// Login account linked to this athlete, if any
    pub user_id: Option<Uuid>,
    pub age: i32,
    pub bio: String,
    pub sport: String,
    pub school_name: String,
    pub graduation_year: i32,
    pub coach_name: String,
    pub organization_id: Option<Uuid>,
}

/// The full athlete record exposed to end users: athlete data plus media and
/// social fields. Athlete and Profile are one merged entity stored in the
/// `profiles` table; the layering exists only as struct composition.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub id: Uuid,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub athlete: Athlete,
    pub profile_picture_url: Option<String>,
    pub banner_url: Option<String>,
    pub youtube: Option<String>,
    pub facebook: Option<String>,
    pub x: Option<String>,
    pub instagram: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    pub fn display_name(&self) -> String {
        format!(
            "{} {}",
            self.athlete.person.first_name, self.athlete.person.last_name
        )
    }
}
