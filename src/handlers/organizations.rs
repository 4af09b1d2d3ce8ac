use axum::{
    extract::{Path, Query},
    Extension, Json,
};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use super::ListParams;
use crate::database::repositories::OrganizationRepository;
use crate::database::Database;
use crate::dto::organization::{CreateOrganizationRequest, UpdateOrganizationRequest};
use crate::error::ApiError;
use crate::filter::FilterData;
use crate::middleware::response::ApiResponse;
use crate::models::Organization;
use crate::policy::{self, Actor};

/// Organization with its school extension attached when one exists.
#[derive(Debug, Serialize)]
pub struct OrganizationResponse {
    #[serde(flatten)]
    pub organization: Organization,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school: Option<SchoolBlock>,
}

#[derive(Debug, Serialize)]
pub struct SchoolBlock {
    pub principal_name: String,
    pub established_year: i32,
}

/// GET /api/organizations
pub async fn list_organizations(
    Extension(actor): Extension<Actor>,
    Query(params): Query<ListParams>,
) -> Result<ApiResponse<Vec<Organization>>, ApiError> {
    let Some(filter) = actor.organization_scope().into_filter(params.into_filter()) else {
        return Ok(ApiResponse::success(vec![]));
    };

    let pool = Database::pool().await?;
    let organizations = OrganizationRepository::new(pool).list(filter).await?;
    Ok(ApiResponse::success(organizations))
}

/// GET /api/organizations/:id
pub async fn get_organization(
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<OrganizationResponse>, ApiError> {
    let organization = find_scoped_organization(&actor, id).await?;

    let pool = Database::pool().await?;
    let school = OrganizationRepository::new(pool)
        .find_school(organization.id)
        .await?
        .map(|s| SchoolBlock {
            principal_name: s.principal_name,
            established_year: s.established_year,
        });

    Ok(ApiResponse::success(OrganizationResponse {
        organization,
        school,
    }))
}

/// POST /api/organizations - superuser only
pub async fn create_organization(
    Extension(actor): Extension<Actor>,
    Json(req): Json<CreateOrganizationRequest>,
) -> Result<ApiResponse<Organization>, ApiError> {
    if !actor.can_create_organization() {
        return Err(ApiError::forbidden("Not allowed to create organizations"));
    }
    req.validate()?;

    let pool = Database::pool().await?;
    let organization = OrganizationRepository::new(pool).create(&req).await?;
    Ok(ApiResponse::created(organization))
}

/// PUT /api/organizations/:id - org admins may only edit their own
pub async fn update_organization(
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(mut req): Json<UpdateOrganizationRequest>,
) -> Result<ApiResponse<Organization>, ApiError> {
    policy::authorize_organization_update(&actor, &mut req)?;
    req.validate()?;

    let existing = find_scoped_organization(&actor, id).await?;

    let pool = Database::pool().await?;
    let organization = OrganizationRepository::new(pool)
        .update(id, &existing, &req)
        .await?;
    Ok(ApiResponse::success(organization))
}

/// DELETE /api/organizations/:id - superuser only; member profiles are kept
/// and detached rather than deleted
pub async fn delete_organization(
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<()>, ApiError> {
    if !actor.can_delete_organization() {
        return Err(ApiError::forbidden("Not allowed to delete organizations"));
    }

    let pool = Database::pool().await?;
    OrganizationRepository::new(pool).delete(id).await?;
    Ok(ApiResponse::no_content())
}

async fn find_scoped_organization(actor: &Actor, id: Uuid) -> Result<Organization, ApiError> {
    let scope = actor.organization_scope().and(json!({ "id": id }));
    let Some(filter) = scope.into_filter(FilterData::default()) else {
        return Err(ApiError::not_found("Organization not found"));
    };

    let pool = Database::pool().await?;
    let organization = OrganizationRepository::new(pool).find_one(filter).await?;
    Ok(organization)
}
