//! DTOs that bridge services with the JSON API.

pub mod auth;
pub mod dashboard;
pub mod emails;
pub mod profiles;
pub mod resources;
