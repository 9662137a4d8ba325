pub mod admin;
pub mod anonymous;
pub mod auth;
pub mod health_checks;
pub mod message;
pub mod models;

pub use health_checks::*;
