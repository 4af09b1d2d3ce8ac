use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Payload for creating a profile. Only superusers and org admins get this
/// far; for org admins the `organization_id` is overwritten by policy with
/// their own organization before persistence.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateProfileRequest {
    #[validate(length(min = 1, max = 30, message = "First name must be between 1 and 30 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 30, message = "Last name must be between 1 and 30 characters"))]
    pub last_name: String,

    #[validate(length(max = 15, message = "Phone must be at most 15 characters"))]
    pub phone: String,

    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,

    pub user_id: Option<Uuid>,

    #[validate(range(min = 1, max = 120, message = "Age must be between 1 and 120"))]
    pub age: i32,

    #[serde(default)]
    pub bio: String,

    #[validate(length(min = 1, max = 250, message = "Sport must be between 1 and 250 characters"))]
    pub sport: String,

    #[validate(length(max = 50, message = "School name must be at most 50 characters"))]
    pub school_name: String,

    pub graduation_year: i32,

    #[validate(length(max = 100, message = "Coach name must be at most 100 characters"))]
    pub coach_name: String,

    pub organization_id: Option<Uuid>,

    pub profile_picture_url: Option<String>,
    pub banner_url: Option<String>,

    #[validate(length(max = 500))]
    pub youtube: Option<String>,
    #[validate(length(max = 500))]
    pub facebook: Option<String>,
    #[validate(length(max = 500))]
    pub x: Option<String>,
    #[validate(length(max = 500))]
    pub instagram: Option<String>,
}

/// Payload for updating a profile. Absent fields are left unchanged. For
/// athletes, submitting `organization_id`, `sport` or `user_id` at all is a
/// policy violation, rejected before validation of the rest.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 30, message = "First name must be between 1 and 30 characters"))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 30, message = "Last name must be between 1 and 30 characters"))]
    pub last_name: Option<String>,

    #[validate(length(max = 15, message = "Phone must be at most 15 characters"))]
    pub phone: Option<String>,

    #[validate(email(message = "Enter a valid email address"))]
    pub email: Option<String>,

    pub user_id: Option<Uuid>,

    #[validate(range(min = 1, max = 120, message = "Age must be between 1 and 120"))]
    pub age: Option<i32>,

    pub bio: Option<String>,

    #[validate(length(min = 1, max = 250, message = "Sport must be between 1 and 250 characters"))]
    pub sport: Option<String>,

    #[validate(length(max = 50, message = "School name must be at most 50 characters"))]
    pub school_name: Option<String>,

    pub graduation_year: Option<i32>,

    #[validate(length(max = 100, message = "Coach name must be at most 100 characters"))]
    pub coach_name: Option<String>,

    pub organization_id: Option<Uuid>,

    pub profile_picture_url: Option<String>,
    pub banner_url: Option<String>,

    #[validate(length(max = 500))]
    pub youtube: Option<String>,
    #[validate(length(max = 500))]
    pub facebook: Option<String>,
    #[validate(length(max = 500))]
    pub x: Option<String>,
    #[validate(length(max = 500))]
    pub instagram: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_requires_valid_email() {
        let req = CreateProfileRequest {
            first_name: "Jordan".to_string(),
            last_name: "Lee".to_string(),
            email: "not-an-email".to_string(),
            sport: "soccer".to_string(),
            age: 16,
            ..Default::default()
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn create_request_accepts_complete_payload() {
        let req = CreateProfileRequest {
            first_name: "Jordan".to_string(),
            last_name: "Lee".to_string(),
            phone: "555-0100".to_string(),
            email: "jordan@example.com".to_string(),
            age: 16,
            sport: "soccer".to_string(),
            school_name: "Northside High".to_string(),
            graduation_year: 2027,
            coach_name: "Sam Ruiz".to_string(),
            ..Default::default()
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn update_request_skips_absent_fields() {
        let req = UpdateProfileRequest::default();
        assert!(req.validate().is_ok());
    }
}
