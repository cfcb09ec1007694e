pub mod domain;
pub mod forms;
pub mod models;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;

/// Role granted to catalog managers.
pub const SERVICE_MANAGER_ROLE: &str = "admin";
