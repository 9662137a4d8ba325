mod extractor;
mod manager;
mod manager_middleware;
mod method;

pub use extractor::*;
pub use manager::*;
pub use manager_middleware::*;

use crate::models;
use std::sync::Arc;

/// Who is making the request. Set once per request by [`Manager`].
#[derive(Debug, Clone)]
pub enum Principal {
    User(Arc<models::User>),
    Anonymous,
}
