pub mod children;
pub mod organization;
pub mod profile;
