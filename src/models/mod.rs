//! Wire models exchanged with the backend services.

pub mod auth;
pub mod backend;
pub mod config;
pub mod moderation;
pub mod profile;
