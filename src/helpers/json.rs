use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{Error, HttpResponse};
use serde::Serialize;

/// Error body shared by every endpoint. Successful responses carry the view itself.
#[derive(Debug, Serialize)]
pub struct JsonResponse {
    pub message: String,
}

impl JsonResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn to_response(self, status: StatusCode) -> HttpResponse {
        HttpResponse::build(status).json(self)
    }

    fn error(status: StatusCode, message: impl Into<String>) -> Error {
        let body = Self::new(message);
        let message = body.message.clone();
        InternalError::from_response(message, body.to_response(status)).into()
    }

    pub fn form_error(message: impl Into<String>) -> Error {
        Self::error(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal_server_error(message: impl Into<String>) -> Error {
        let message = message.into();
        let message = if message.trim().is_empty() {
            "Internal error".to_string()
        } else {
            message
        };
        Self::error(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn form_error_is_400_with_message() {
        let response = JsonResponse::form_error("Invalid session ID").error_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = to_bytes(response.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value, serde_json::json!({"message": "Invalid session ID"}));
    }

    #[test]
    fn blank_internal_error_gets_default_message() {
        let err = JsonResponse::internal_server_error("");
        assert_eq!(err.to_string(), "Internal error");
        assert_eq!(
            err.error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
