use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::StoreError;
use crate::database::repository::Repository;
use crate::dto::profile::{CreateProfileRequest, UpdateProfileRequest};
use crate::filter::FilterData;
use crate::models::Profile;

pub struct ProfileRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProfileRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    fn reader(&self) -> Repository<Profile> {
        Repository::new("profiles", self.pool.clone())
    }

    /// List profiles under an already-scoped filter
    pub async fn list(&self, filter: FilterData) -> Result<Vec<Profile>, StoreError> {
        self.reader().select_any(filter).await
    }

    /// Fetch one profile under an already-scoped filter; missing and
    /// out-of-scope look the same to the caller.
    pub async fn find_one(&self, filter: FilterData) -> Result<Profile, StoreError> {
        self.reader().select_404(filter).await
    }

    /// Insert a new profile. Ownership fields have already been pinned by the
    /// policy layer.
    pub async fn create(&self, req: &CreateProfileRequest) -> Result<Profile, StoreError> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (
                first_name, last_name, phone, email,
                user_id, age, bio, sport, school_name, graduation_year,
                coach_name, organization_id,
                profile_picture_url, banner_url, youtube, facebook, x, instagram
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            RETURNING *
            "#,
        )
        .bind(&req.first_name)
        .bind(&req.last_name)
        .bind(&req.phone)
        .bind(&req.email)
        .bind(req.user_id)
        .bind(req.age)
        .bind(&req.bio)
        .bind(&req.sport)
        .bind(&req.school_name)
        .bind(req.graduation_year)
        .bind(&req.coach_name)
        .bind(req.organization_id)
        .bind(&req.profile_picture_url)
        .bind(&req.banner_url)
        .bind(&req.youtube)
        .bind(&req.facebook)
        .bind(&req.x)
        .bind(&req.instagram)
        .fetch_one(self.pool)
        .await?;

        Ok(profile)
    }

    /// Update an existing profile, keeping current values for absent fields.
    pub async fn update(
        &self,
        id: Uuid,
        existing: &Profile,
        req: &UpdateProfileRequest,
    ) -> Result<Profile, StoreError> {
        let athlete = &existing.athlete;
        let person = &athlete.person;

        let first_name = req.first_name.as_ref().unwrap_or(&person.first_name);
        let last_name = req.last_name.as_ref().unwrap_or(&person.last_name);
        let phone = req.phone.as_ref().unwrap_or(&person.phone);
        let email = req.email.as_ref().unwrap_or(&person.email);
        let user_id = req.user_id.or(athlete.user_id);
        let age = req.age.unwrap_or(athlete.age);
        let bio = req.bio.as_ref().unwrap_or(&athlete.bio);
        let sport = req.sport.as_ref().unwrap_or(&athlete.sport);
        let school_name = req.school_name.as_ref().unwrap_or(&athlete.school_name);
        let graduation_year = req.graduation_year.unwrap_or(athlete.graduation_year);
        let coach_name = req.coach_name.as_ref().unwrap_or(&athlete.coach_name);
        let organization_id = req.organization_id.or(athlete.organization_id);
        let profile_picture_url = req
            .profile_picture_url
            .as_ref()
            .or(existing.profile_picture_url.as_ref());
        let banner_url = req.banner_url.as_ref().or(existing.banner_url.as_ref());
        let youtube = req.youtube.as_ref().or(existing.youtube.as_ref());
        let facebook = req.facebook.as_ref().or(existing.facebook.as_ref());
        let x = req.x.as_ref().or(existing.x.as_ref());
        let instagram = req.instagram.as_ref().or(existing.instagram.as_ref());

        let profile = sqlx::query_as::<_, Profile>(
            r#"
            UPDATE profiles
            SET first_name = $2,
                last_name = $3,
                phone = $4,
                email = $5,
                user_id = $6,
                age = $7,
                bio = $8,
                sport = $9,
                school_name = $10,
                graduation_year = $11,
                coach_name = $12,
                organization_id = $13,
                profile_picture_url = $14,
                banner_url = $15,
                youtube = $16,
                facebook = $17,
                x = $18,
                instagram = $19
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(first_name)
        .bind(last_name)
        .bind(phone)
        .bind(email)
        .bind(user_id)
        .bind(age)
        .bind(bio)
        .bind(sport)
        .bind(school_name)
        .bind(graduation_year)
        .bind(coach_name)
        .bind(organization_id)
        .bind(profile_picture_url)
        .bind(banner_url)
        .bind(youtube)
        .bind(facebook)
        .bind(x)
        .bind(instagram)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| StoreError::NotFound("Profile not found".to_string()))?;

        Ok(profile)
    }

    /// Delete a profile; the schema cascades to its child records.
    pub async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("Profile not found".to_string()));
        }

        Ok(())
    }
}
