pub mod children;
pub mod organizations;
pub mod profiles;

use serde::Deserialize;
use serde_json::Value;

use crate::filter::FilterData;

/// Common list-endpoint query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<i32>,
    pub offset: Option<i32>,
    /// Order spec, e.g. "last_name asc" or "created_at desc"
    pub order: Option<String>,
}

impl ListParams {
    pub fn into_filter(self) -> FilterData {
        FilterData {
            select: None,
            where_clause: None,
            order: self.order.map(Value::String),
            limit: self.limit,
            offset: self.offset,
        }
    }
}
