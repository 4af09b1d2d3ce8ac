pub mod manager;
pub mod query_builder;
pub mod repositories;
pub mod repository;

pub use manager::{Database, StoreError};
