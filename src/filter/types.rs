use serde::{Deserialize, Serialize};

/// The caller-facing filter payload for list endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterData {
    pub select: Option<Vec<String>>,
    #[serde(rename = "where")]
    pub where_clause: Option<serde_json::Value>,
    pub order: Option<serde_json::Value>,
    pub limit: Option<i32>,
    pub offset: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FilterOrderInfo {
    pub column: String,
    pub sort: SortDirection,
}

/// A compiled query: SQL text plus positional parameters.
#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<serde_json::Value>,
}
