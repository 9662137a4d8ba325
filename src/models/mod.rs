mod anonymous_session;
pub mod message;
pub mod user;
mod user_session;

pub use anonymous_session::*;
pub use message::*;
pub use user::*;
pub use user_session::*;
