//! Domain types exposed by the dashboard service layer.

pub mod activity;
pub mod auth;
pub mod dashboard;
pub mod moderation;
pub mod photo;
pub mod preference;
pub mod profile;
pub mod resource;
pub mod social;
pub mod staff;
pub mod types;
