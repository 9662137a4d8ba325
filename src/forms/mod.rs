pub mod anonymous;
pub mod message;
pub mod user;

pub use anonymous::SessionQuery;
pub use message::MessageForm;
pub use user::{LoginForm, RegisterForm};
