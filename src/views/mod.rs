mod anonymous;
mod message;
mod model;
mod stats;
mod user;

pub use anonymous::*;
pub use message::*;
pub use model::*;
pub use stats::*;
pub use user::*;
