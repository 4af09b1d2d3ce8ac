use sqlx::{self, postgres::PgRow, FromRow, PgPool};

use crate::database::manager::StoreError;
use crate::database::query_builder::QueryBuilder;
use crate::filter::FilterData;

/// Generic read access for one table. Typed repositories wrap this for their
/// list/get paths and add explicit SQL for writes.
pub struct Repository<T> {
    table_name: String,
    pool: PgPool,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Repository<T>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    pub fn new(table_name: impl Into<String>, pool: PgPool) -> Self {
        Self {
            table_name: table_name.into(),
            pool,
            _phantom: std::marker::PhantomData,
        }
    }

    pub async fn select_any(&self, filter_data: FilterData) -> Result<Vec<T>, StoreError> {
        QueryBuilder::<T>::new(&self.table_name)?
            .filter(filter_data)?
            .select_all(&self.pool)
            .await
    }

    pub async fn select_one(&self, filter_data: FilterData) -> Result<Option<T>, StoreError> {
        QueryBuilder::<T>::new(&self.table_name)?
            .filter(filter_data)?
            .select_optional(&self.pool)
            .await
    }

    pub async fn select_404(&self, filter_data: FilterData) -> Result<T, StoreError> {
        match self.select_one(filter_data).await? {
            Some(row) => Ok(row),
            None => Err(StoreError::NotFound("Record not found".to_string())),
        }
    }
}
