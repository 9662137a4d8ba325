pub mod anonymous_session;
pub mod message;
pub mod stats;
pub mod user;
pub mod user_session;
