mod add;
mod get;
mod session;

pub use add::*;
pub use get::*;
pub use session::*;
