use serde_json::{json, Value};

use crate::filter::types::FilterData;

/// A read scope computed from the actor's role. `All` means no extra filter,
/// `Where` carries a filter fragment to AND into the query, and `Nothing`
/// means the query must not run at all (empty result, not an error).
#[derive(Debug, Clone, PartialEq)]
pub enum Scope {
    All,
    Where(Value),
    Nothing,
}

impl Scope {
    pub fn is_nothing(&self) -> bool {
        matches!(self, Scope::Nothing)
    }

    /// Narrow this scope with an additional condition (e.g. a record id).
    pub fn and(self, condition: Value) -> Scope {
        match self {
            Scope::All => Scope::Where(condition),
            Scope::Where(existing) => Scope::Where(json!({ "$and": [existing, condition] })),
            Scope::Nothing => Scope::Nothing,
        }
    }

    /// Merge the scope into caller-supplied filter data. Returns `None` when
    /// the scope yields nothing, in which case no query should be issued.
    pub fn into_filter(self, mut data: FilterData) -> Option<FilterData> {
        match self {
            Scope::All => Some(data),
            Scope::Where(scope_clause) => {
                data.where_clause = Some(match data.where_clause.take() {
                    Some(user_clause) => json!({ "$and": [scope_clause, user_clause] }),
                    None => scope_clause,
                });
                Some(data)
            }
            Scope::Nothing => None,
        }
    }
}
