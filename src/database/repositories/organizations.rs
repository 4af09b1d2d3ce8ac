use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::StoreError;
use crate::database::repository::Repository;
use crate::dto::organization::{CreateOrganizationRequest, UpdateOrganizationRequest};
use crate::filter::FilterData;
use crate::models::{Organization, School};

pub struct OrganizationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrganizationRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    fn reader(&self) -> Repository<Organization> {
        Repository::new("organizations", self.pool.clone())
    }

    pub async fn list(&self, filter: FilterData) -> Result<Vec<Organization>, StoreError> {
        self.reader().select_any(filter).await
    }

    pub async fn find_one(&self, filter: FilterData) -> Result<Organization, StoreError> {
        self.reader().select_404(filter).await
    }

    /// School extension row for an organization, if present.
    pub async fn find_school(&self, organization_id: Uuid) -> Result<Option<School>, StoreError> {
        let school = sqlx::query_as::<_, School>(
            r#"
            SELECT o.id, o.owner_user_id, o.name, o.address, o.phone, o.email,
                   o.logo_url, o.state, o.city, o.created_at,
                   s.principal_name, s.established_year
            FROM schools s
            JOIN organizations o ON o.id = s.organization_id
            WHERE s.organization_id = $1
            "#,
        )
        .bind(organization_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(school)
    }

    pub async fn create(
        &self,
        req: &CreateOrganizationRequest,
    ) -> Result<Organization, StoreError> {
        let mut tx = self.pool.begin().await?;

        let organization = sqlx::query_as::<_, Organization>(
            r#"
            INSERT INTO organizations (owner_user_id, name, address, phone, email, logo_url, state, city)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(req.owner_user_id)
        .bind(&req.name)
        .bind(&req.address)
        .bind(&req.phone)
        .bind(&req.email)
        .bind(&req.logo_url)
        .bind(&req.state)
        .bind(&req.city)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(school) = &req.school {
            sqlx::query(
                r#"
                INSERT INTO schools (organization_id, principal_name, established_year)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(organization.id)
            .bind(&school.principal_name)
            .bind(school.established_year)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(organization)
    }

    pub async fn update(
        &self,
        id: Uuid,
        existing: &Organization,
        req: &UpdateOrganizationRequest,
    ) -> Result<Organization, StoreError> {
        let owner_user_id = req.owner_user_id.or(existing.owner_user_id);
        let name = req.name.as_ref().unwrap_or(&existing.name);
        let address = req.address.as_ref().or(existing.address.as_ref());
        let phone = req.phone.as_ref().unwrap_or(&existing.phone);
        let email = req.email.as_ref().unwrap_or(&existing.email);
        let logo_url = req.logo_url.as_ref().or(existing.logo_url.as_ref());
        let state = req.state.as_ref().or(existing.state.as_ref());
        let city = req.city.as_ref().or(existing.city.as_ref());

        let mut tx = self.pool.begin().await?;

        let organization = sqlx::query_as::<_, Organization>(
            r#"
            UPDATE organizations
            SET owner_user_id = $2,
                name = $3,
                address = $4,
                phone = $5,
                email = $6,
                logo_url = $7,
                state = $8,
                city = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(owner_user_id)
        .bind(name)
        .bind(address)
        .bind(phone)
        .bind(email)
        .bind(logo_url)
        .bind(state)
        .bind(city)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| StoreError::NotFound("Organization not found".to_string()))?;

        if let Some(school) = &req.school {
            sqlx::query(
                r#"
                INSERT INTO schools (organization_id, principal_name, established_year)
                VALUES ($1, $2, $3)
                ON CONFLICT (organization_id)
                DO UPDATE SET principal_name = EXCLUDED.principal_name,
                              established_year = EXCLUDED.established_year
                "#,
            )
            .bind(id)
            .bind(&school.principal_name)
            .bind(school.established_year)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(organization)
    }

    /// Delete an organization; the schema nulls out `organization_id` on its
    /// profiles rather than deleting them.
    pub async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM organizations WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("Organization not found".to_string()));
        }

        Ok(())
    }
}
