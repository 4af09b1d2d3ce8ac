pub mod auth;
pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod policy;
pub mod validation;
