use axum::{extract::Path, Extension, Json};
use uuid::Uuid;
use validator::Validate;

use super::profiles::find_scoped_profile;
use crate::database::repositories::{AchievementRepository, StatRepository, VideoRepository};
use crate::database::Database;
use crate::dto::children::{SaveAchievementsRequest, SaveStatsRequest, SaveVideosRequest};
use crate::error::ApiError;
use crate::middleware::response::ApiResponse;
use crate::models::{Achievement, Stat, Video};
use crate::policy::{self, Actor};

/// GET /api/profiles/:id/achievements
pub async fn list_achievements(
    Extension(actor): Extension<Actor>,
    Path(profile_id): Path<Uuid>,
) -> Result<ApiResponse<Vec<Achievement>>, ApiError> {
    let parent = find_scoped_profile(&actor, profile_id).await?;

    let pool = Database::pool().await?;
    let rows = AchievementRepository::new(pool)
        .list_for_profile(parent.id)
        .await?;
    Ok(ApiResponse::success(rows))
}

/// PUT /api/profiles/:id/achievements - batch edit; each row's profile
/// reference is pinned by policy, never taken from the payload
pub async fn save_achievements(
    Extension(actor): Extension<Actor>,
    Path(profile_id): Path<Uuid>,
    Json(mut req): Json<SaveAchievementsRequest>,
) -> Result<ApiResponse<Vec<Achievement>>, ApiError> {
    let parent = find_scoped_profile(&actor, profile_id).await?;
    policy::enforce_child_ownership(&actor, parent.id, &mut req.items)?;
    req.validate()?;

    let owner = policy::resolve_child_owner(&actor, parent.id);
    let pool = Database::pool().await?;
    let saved = AchievementRepository::new(pool)
        .save_batch(owner, &req.items)
        .await?;
    Ok(ApiResponse::success(saved))
}

/// GET /api/profiles/:id/stats
pub async fn list_stats(
    Extension(actor): Extension<Actor>,
    Path(profile_id): Path<Uuid>,
) -> Result<ApiResponse<Vec<Stat>>, ApiError> {
    let parent = find_scoped_profile(&actor, profile_id).await?;

    let pool = Database::pool().await?;
    let rows = StatRepository::new(pool).list_for_profile(parent.id).await?;
    Ok(ApiResponse::success(rows))
}

/// PUT /api/profiles/:id/stats
pub async fn save_stats(
    Extension(actor): Extension<Actor>,
    Path(profile_id): Path<Uuid>,
    Json(mut req): Json<SaveStatsRequest>,
) -> Result<ApiResponse<Vec<Stat>>, ApiError> {
    let parent = find_scoped_profile(&actor, profile_id).await?;
    policy::enforce_child_ownership(&actor, parent.id, &mut req.items)?;
    req.validate()?;

    let owner = policy::resolve_child_owner(&actor, parent.id);
    let pool = Database::pool().await?;
    let saved = StatRepository::new(pool).save_batch(owner, &req.items).await?;
    Ok(ApiResponse::success(saved))
}

/// GET /api/profiles/:id/videos
pub async fn list_videos(
    Extension(actor): Extension<Actor>,
    Path(profile_id): Path<Uuid>,
) -> Result<ApiResponse<Vec<Video>>, ApiError> {
    let parent = find_scoped_profile(&actor, profile_id).await?;

    let pool = Database::pool().await?;
    let rows = VideoRepository::new(pool)
        .list_for_profile(parent.id)
        .await?;
    Ok(ApiResponse::success(rows))
}

/// PUT /api/profiles/:id/videos
pub async fn save_videos(
    Extension(actor): Extension<Actor>,
    Path(profile_id): Path<Uuid>,
    Json(mut req): Json<SaveVideosRequest>,
) -> Result<ApiResponse<Vec<Video>>, ApiError> {
    let parent = find_scoped_profile(&actor, profile_id).await?;
    policy::enforce_child_ownership(&actor, parent.id, &mut req.items)?;
    req.validate()?;

    let owner = policy::resolve_child_owner(&actor, parent.id);
    let pool = Database::pool().await?;
    let saved = VideoRepository::new(pool)
        .save_batch(owner, &req.items)
        .await?;
    Ok(ApiResponse::success(saved))
}
