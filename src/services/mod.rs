pub mod auth;
pub mod chat;
pub mod dispatcher;
pub mod quota;

pub use auth::{AuthError, AuthService};
pub use chat::{ChatError, ChatService};
pub use dispatcher::{ModelDispatcher, Provider};
pub use quota::QuotaGuard;
