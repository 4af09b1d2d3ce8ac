use serde_json::Value;
use sqlx::{self, postgres::PgArguments, FromRow, PgPool};
use uuid::Uuid;

use crate::database::manager::StoreError;
use crate::filter::types::SqlResult;
use crate::filter::{Filter, FilterData};

/// Compiles a [`FilterData`] into SQL and executes it as a typed query.
pub struct QueryBuilder<T> {
    table_name: String,
    filter: Option<Filter>,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> QueryBuilder<T>
where
    T: for<'r> FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
{
    pub fn new(table_name: impl Into<String>) -> Result<Self, StoreError> {
        let name = table_name.into();
        // Reuse Filter table name validation
        Filter::new(&name).map_err(|e| StoreError::QueryError(e.to_string()))?;
        Ok(Self {
            table_name: name,
            filter: None,
            _phantom: std::marker::PhantomData,
        })
    }

    pub fn filter(mut self, filter_data: FilterData) -> Result<Self, StoreError> {
        let mut filter =
            Filter::new(&self.table_name).map_err(|e| StoreError::QueryError(e.to_string()))?;
        filter
            .assign(filter_data)
            .map_err(|e| StoreError::QueryError(e.to_string()))?;
        self.filter = Some(filter);
        Ok(self)
    }

    pub async fn select_all(self, pool: &PgPool) -> Result<Vec<T>, StoreError> {
        let sql_result = self.sql_result()?;
        let mut q = sqlx::query_as::<_, T>(&sql_result.query);
        for p in sql_result.params.iter() {
            q = bind_param_query_as(q, p);
        }
        let rows = q.fetch_all(pool).await?;
        Ok(rows)
    }

    pub async fn select_optional(self, pool: &PgPool) -> Result<Option<T>, StoreError> {
        let sql_result = self.sql_result()?;
        let mut q = sqlx::query_as::<_, T>(&sql_result.query);
        for p in sql_result.params.iter() {
            q = bind_param_query_as(q, p);
        }
        let row = q.fetch_optional(pool).await?;
        Ok(row)
    }

    fn sql_result(&self) -> Result<SqlResult, StoreError> {
        if let Some(filter) = &self.filter {
            filter
                .to_sql()
                .map_err(|e| StoreError::QueryError(e.to_string()))
        } else {
            Ok(SqlResult {
                query: format!("SELECT * FROM \"{}\"", self.table_name),
                params: vec![],
            })
        }
    }
}

// JSON params carry no Postgres type information, so strings that parse as
// UUIDs are bound as UUIDs (scope filters compare against uuid columns).
fn bind_param_query_as<'q, O>(
    q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>,
    v: &'q Value,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, sqlx::postgres::PgRow>,
{
    match v {
        Value::Null => {
            let none: Option<String> = None;
            q.bind(none)
        }
        Value::Bool(b) => q.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                q.bind(i)
            } else if let Some(f) = n.as_f64() {
                q.bind(f)
            } else {
                q.bind(n.to_string())
            }
        }
        Value::String(s) => match Uuid::parse_str(s) {
            Ok(uuid) => q.bind(uuid),
            Err(_) => q.bind(s),
        },
        Value::Array(_) | Value::Object(_) => q.bind(v.clone()),
    }
}
