use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::database::manager::StoreError;
use crate::dto::children::{AchievementInput, StatInput, VideoInput};
use crate::models::{Achievement, Stat, Video};

// Update statements match on id AND the owning profile, so a submitted id
// belonging to some other profile surfaces as not-found instead of the row
// being captured onto the caller's profile.
const UPDATE_ACHIEVEMENT_SQL: &str = r#"
    UPDATE achievements
    SET emoji = $3, achievement = $4
    WHERE id = $1 AND profile_id = $2
    RETURNING *
"#;

const UPDATE_STAT_SQL: &str = r#"
    UPDATE stats
    SET date = $3, event = $4, performance = $5, highlight = $6
    WHERE id = $1 AND profile_id = $2
    RETURNING *
"#;

const UPDATE_VIDEO_SQL: &str = r#"
    UPDATE videos
    SET url = $3
    WHERE id = $1 AND profile_id = $2
    RETURNING *
"#;

/// Batch semantics shared by all three child editors: rows with an id are
/// updated, rows without are inserted, and rows of the owner profile missing
/// from the batch are removed. One transaction per batch. Every statement is
/// constrained to the owner profile resolved by policy.
pub struct AchievementRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AchievementRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_profile(&self, profile_id: Uuid) -> Result<Vec<Achievement>, StoreError> {
        let rows = sqlx::query_as::<_, Achievement>(
            "SELECT * FROM achievements WHERE profile_id = $1 ORDER BY id",
        )
        .bind(profile_id)
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn save_batch(
        &self,
        owner_profile_id: Uuid,
        items: &[AchievementInput],
    ) -> Result<Vec<Achievement>, StoreError> {
        let mut tx = self.pool.begin().await?;
        delete_missing(&mut tx, "achievements", owner_profile_id, items.iter().filter_map(|i| i.id)).await?;

        let mut saved = Vec::with_capacity(items.len());
        for item in items {
            let row = match item.id {
                Some(id) => sqlx::query_as::<_, Achievement>(UPDATE_ACHIEVEMENT_SQL)
                    .bind(id)
                    .bind(owner_profile_id)
                    .bind(&item.emoji)
                    .bind(&item.achievement)
                    .fetch_optional(&mut *tx)
                    .await?
                    .ok_or_else(|| StoreError::NotFound("Achievement not found".to_string()))?,
                None => sqlx::query_as::<_, Achievement>(
                    r#"
                    INSERT INTO achievements (profile_id, emoji, achievement)
                    VALUES ($1, $2, $3)
                    RETURNING *
                    "#,
                )
                .bind(owner_profile_id)
                .bind(&item.emoji)
                .bind(&item.achievement)
                .fetch_one(&mut *tx)
                .await?,
            };
            saved.push(row);
        }

        tx.commit().await?;
        Ok(saved)
    }
}

pub struct StatRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StatRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_profile(&self, profile_id: Uuid) -> Result<Vec<Stat>, StoreError> {
        let rows = sqlx::query_as::<_, Stat>(
            "SELECT * FROM stats WHERE profile_id = $1 ORDER BY date DESC, id",
        )
        .bind(profile_id)
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn save_batch(
        &self,
        owner_profile_id: Uuid,
        items: &[StatInput],
    ) -> Result<Vec<Stat>, StoreError> {
        let mut tx = self.pool.begin().await?;
        delete_missing(&mut tx, "stats", owner_profile_id, items.iter().filter_map(|i| i.id)).await?;

        let mut saved = Vec::with_capacity(items.len());
        for item in items {
            let row = match item.id {
                Some(id) => sqlx::query_as::<_, Stat>(UPDATE_STAT_SQL)
                    .bind(id)
                    .bind(owner_profile_id)
                    .bind(item.date)
                    .bind(&item.event)
                    .bind(&item.performance)
                    .bind(&item.highlight)
                    .fetch_optional(&mut *tx)
                    .await?
                    .ok_or_else(|| StoreError::NotFound("Stat not found".to_string()))?,
                None => sqlx::query_as::<_, Stat>(
                    r#"
                    INSERT INTO stats (profile_id, date, event, performance, highlight)
                    VALUES ($1, $2, $3, $4, $5)
                    RETURNING *
                    "#,
                )
                .bind(owner_profile_id)
                .bind(item.date)
                .bind(&item.event)
                .bind(&item.performance)
                .bind(&item.highlight)
                .fetch_one(&mut *tx)
                .await?,
            };
            saved.push(row);
        }

        tx.commit().await?;
        Ok(saved)
    }
}

pub struct VideoRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> VideoRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_profile(&self, profile_id: Uuid) -> Result<Vec<Video>, StoreError> {
        let rows =
            sqlx::query_as::<_, Video>("SELECT * FROM videos WHERE profile_id = $1 ORDER BY id")
                .bind(profile_id)
                .fetch_all(self.pool)
                .await?;
        Ok(rows)
    }

    pub async fn save_batch(
        &self,
        owner_profile_id: Uuid,
        items: &[VideoInput],
    ) -> Result<Vec<Video>, StoreError> {
        let mut tx = self.pool.begin().await?;
        delete_missing(&mut tx, "videos", owner_profile_id, items.iter().filter_map(|i| i.id)).await?;

        let mut saved = Vec::with_capacity(items.len());
        for item in items {
            let row = match item.id {
                Some(id) => sqlx::query_as::<_, Video>(UPDATE_VIDEO_SQL)
                    .bind(id)
                    .bind(owner_profile_id)
                    .bind(&item.url)
                    .fetch_optional(&mut *tx)
                    .await?
                    .ok_or_else(|| StoreError::NotFound("Video not found".to_string()))?,
                None => sqlx::query_as::<_, Video>(
                    r#"
                    INSERT INTO videos (profile_id, url)
                    VALUES ($1, $2)
                    RETURNING *
                    "#,
                )
                .bind(owner_profile_id)
                .bind(&item.url)
                .fetch_one(&mut *tx)
                .await?,
            };
            saved.push(row);
        }

        tx.commit().await?;
        Ok(saved)
    }
}

async fn delete_missing(
    tx: &mut Transaction<'_, Postgres>,
    table: &str,
    owner_profile_id: Uuid,
    kept_ids: impl Iterator<Item = Uuid>,
) -> Result<(), StoreError> {
    let kept: Vec<Uuid> = kept_ids.collect();
    // Table names here are fixed strings from this module, never user input
    let query = format!(
        "DELETE FROM \"{}\" WHERE profile_id = $1 AND NOT (id = ANY($2))",
        table
    );
    sqlx::query(&query)
        .bind(owner_profile_id)
        .bind(&kept)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_statements_require_the_owner_profile_to_match() {
        // A batch row carrying the id of another profile's record must not
        // match; the guard is the profile predicate in the WHERE clause.
        for sql in [UPDATE_ACHIEVEMENT_SQL, UPDATE_STAT_SQL, UPDATE_VIDEO_SQL] {
            assert!(
                sql.contains("WHERE id = $1 AND profile_id = $2"),
                "update statement missing owner predicate: {}",
                sql
            );
        }
    }
}
