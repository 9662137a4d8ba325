use crate::middleware::authentication::Principal;
use crate::models;
use actix_web::{dev::Payload, error::InternalError, FromRequest, HttpMessage, HttpRequest, HttpResponse};
use std::future::{ready, Ready};
use std::ops::Deref;
use std::sync::Arc;

fn unauthorized() -> actix_web::Error {
    InternalError::from_response("Unauthorized", HttpResponse::Unauthorized().finish()).into()
}

fn current_user(req: &HttpRequest) -> Option<Arc<models::User>> {
    match req.extensions().get::<Principal>() {
        Some(Principal::User(user)) => Some(user.clone()),
        _ => None,
    }
}

/// Logged-in user. Rejects with an empty 401 otherwise.
#[derive(Debug, Clone)]
pub struct Authenticated(pub Arc<models::User>);

impl FromRequest for Authenticated {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(current_user(req).map(Authenticated).ok_or_else(unauthorized))
    }
}

impl Deref for Authenticated {
    type Target = models::User;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Logged-in user with the admin flag.
#[derive(Debug, Clone)]
pub struct Admin(pub Arc<models::User>);

impl FromRequest for Admin {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let admin = current_user(req).filter(|user| user.is_admin).map(Admin);
        ready(admin.ok_or_else(unauthorized))
    }
}

impl Deref for Admin {
    type Target = models::User;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
