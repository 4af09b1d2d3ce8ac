use axum::{
    extract::{Path, Query},
    Extension, Json,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use super::ListParams;
use crate::database::repositories::ProfileRepository;
use crate::database::Database;
use crate::dto::profile::{CreateProfileRequest, UpdateProfileRequest};
use crate::error::ApiError;
use crate::filter::FilterData;
use crate::middleware::response::ApiResponse;
use crate::models::Profile;
use crate::policy::{self, Actor};

/// GET /api/profiles - list profiles visible to the actor
pub async fn list_profiles(
    Extension(actor): Extension<Actor>,
    Query(params): Query<ListParams>,
) -> Result<ApiResponse<Vec<Profile>>, ApiError> {
    let Some(filter) = actor.profile_scope().into_filter(params.into_filter()) else {
        // Unrecognized role: empty set, not an error
        return Ok(ApiResponse::success(vec![]));
    };

    let pool = Database::pool().await?;
    let profiles = ProfileRepository::new(pool).list(filter).await?;
    Ok(ApiResponse::success(profiles))
}

/// GET /api/profiles/:id - out-of-scope ids surface as not found
pub async fn get_profile(
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Profile>, ApiError> {
    let profile = find_scoped_profile(&actor, id).await?;
    Ok(ApiResponse::success(profile))
}

/// POST /api/profiles - denied for athletes, org pinned for org admins
pub async fn create_profile(
    Extension(actor): Extension<Actor>,
    Json(mut req): Json<CreateProfileRequest>,
) -> Result<ApiResponse<Profile>, ApiError> {
    policy::authorize_profile_create(&actor, &mut req)?;
    req.validate()?;

    let pool = Database::pool().await?;
    let profile = ProfileRepository::new(pool).create(&req).await?;
    Ok(ApiResponse::created(profile))
}

/// PUT /api/profiles/:id - field locks and ownership enforcement apply
pub async fn update_profile(
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(mut req): Json<UpdateProfileRequest>,
) -> Result<ApiResponse<Profile>, ApiError> {
    policy::authorize_profile_update(&actor, &mut req)?;
    req.validate()?;

    let existing = find_scoped_profile(&actor, id).await?;

    let pool = Database::pool().await?;
    let profile = ProfileRepository::new(pool)
        .update(id, &existing, &req)
        .await?;
    Ok(ApiResponse::success(profile))
}

/// DELETE /api/profiles/:id - cascades to child records
pub async fn delete_profile(
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<()>, ApiError> {
    if !actor.can_delete_profile() {
        return Err(ApiError::forbidden("Not allowed to delete profiles"));
    }

    // Resolve under scope first so foreign profiles stay invisible
    let existing = find_scoped_profile(&actor, id).await?;

    let pool = Database::pool().await?;
    ProfileRepository::new(pool).delete(existing.id).await?;
    Ok(ApiResponse::no_content())
}

/// Fetch one profile within the actor's scope or report not-found.
pub(crate) async fn find_scoped_profile(actor: &Actor, id: Uuid) -> Result<Profile, ApiError> {
    let scope = actor.profile_scope().and(json!({ "id": id }));
    let Some(filter) = scope.into_filter(FilterData::default()) else {
        return Err(ApiError::not_found("Profile not found"));
    };

    let pool = Database::pool().await?;
    let profile = ProfileRepository::new(pool).find_one(filter).await?;
    Ok(profile)
}
