use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Optional school specialization carried inside organization payloads.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SchoolInput {
    #[validate(length(min = 1, max = 100, message = "Principal name must be between 1 and 100 characters"))]
    pub principal_name: String,

    #[validate(range(min = 1800, max = 2100, message = "Established year out of range"))]
    pub established_year: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateOrganizationRequest {
    pub owner_user_id: Option<Uuid>,

    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    pub address: Option<String>,

    #[validate(length(max = 15, message = "Phone must be at most 15 characters"))]
    pub phone: String,

    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,

    pub logo_url: Option<String>,

    #[validate(length(max = 50))]
    pub state: Option<String>,

    #[validate(length(max = 50))]
    pub city: Option<String>,

    #[validate(nested)]
    pub school: Option<SchoolInput>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateOrganizationRequest {
    pub owner_user_id: Option<Uuid>,

    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: Option<String>,

    pub address: Option<String>,

    #[validate(length(max = 15, message = "Phone must be at most 15 characters"))]
    pub phone: Option<String>,

    #[validate(email(message = "Enter a valid email address"))]
    pub email: Option<String>,

    pub logo_url: Option<String>,

    #[validate(length(max = 50))]
    pub state: Option<String>,

    #[validate(length(max = 50))]
    pub city: Option<String>,

    #[validate(nested)]
    pub school: Option<SchoolInput>,
}
