use std::fmt;

/// Errors that can occur while talking to an upstream provider
#[derive(Debug)]
pub enum ConnectorError {
    /// No API key configured for the provider
    NotConfigured(String),
    /// Transport-level failure
    HttpError(String),
    /// Provider unreachable or timed out
    ServiceUnavailable(String),
    /// Non-success status from the provider
    UpstreamStatus { status: u16, body: String },
    /// Rejected credentials (401/403)
    Unauthorized(String),
    /// Rate limited or exceeded quota (429)
    RateLimited(String),
    /// Body did not have the expected shape, or carried no text
    InvalidResponse(String),
    /// Internal error in connector
    Internal(String),
}

impl fmt::Display for ConnectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured(provider) => write!(f, "{} API key is not configured", provider),
            Self::HttpError(msg) => write!(f, "HTTP error: {}", msg),
            Self::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
            Self::UpstreamStatus { status, body } => write!(f, "HTTP {}: {}", status, body),
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            Self::RateLimited(msg) => write!(f, "Rate limited: {}", msg),
            Self::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
            Self::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ConnectorError {}

impl ConnectorError {
    /// Classifies a non-success upstream response.
    pub fn from_status(status: reqwest::StatusCode, body: String) -> Self {
        match status.as_u16() {
            401 | 403 => Self::Unauthorized(body),
            429 => Self::RateLimited(body),
            code => Self::UpstreamStatus { status: code, body },
        }
    }
}

impl From<reqwest::Error> for ConnectorError {
    fn from(err: reqwest::Error) -> Self {
        // request URLs may carry credentials
        let err = err.without_url();
        if err.is_timeout() {
            Self::ServiceUnavailable(format!("Request timeout: {}", err))
        } else if err.is_connect() {
            Self::ServiceUnavailable(format!("Connection failed: {}", err))
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        assert!(matches!(
            ConnectorError::from_status(reqwest::StatusCode::UNAUTHORIZED, String::new()),
            ConnectorError::Unauthorized(_)
        ));
        assert!(matches!(
            ConnectorError::from_status(reqwest::StatusCode::TOO_MANY_REQUESTS, String::new()),
            ConnectorError::RateLimited(_)
        ));
        assert!(matches!(
            ConnectorError::from_status(reqwest::StatusCode::BAD_GATEWAY, String::new()),
            ConnectorError::UpstreamStatus { status: 502, .. }
        ));
    }
}
