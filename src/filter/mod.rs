//! JSON filter DSL compiled to parameterized SQL.
//!
//! List queries accept a [`FilterData`] (where / order / limit / offset); the
//! policy engine contributes scope fragments through the same structure, so a
//! scoped query is just the AND of the caller's filter and the actor's scope.

pub mod error;
pub mod filter;
pub mod filter_order;
pub mod filter_where;
pub mod types;

pub use filter::Filter;
pub use types::*;
