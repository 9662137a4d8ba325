use serde::Deserialize;

pub const MAX_SESSION_ID_LEN: usize = 128;

/// `?sessionId=` on the anonymous routes.
#[derive(Deserialize)]
pub struct SessionQuery {
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
}

impl SessionQuery {
    pub fn session_id(&self) -> Result<&str, String> {
        match self.session_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() && id.len() <= MAX_SESSION_ID_LEN => Ok(id),
            _ => Err("Invalid session ID".to_string()),
        }
    }
}

// the session id is the only credential an anonymous client has
impl std::fmt::Debug for SessionQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionQuery").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(value: Option<&str>) -> SessionQuery {
        SessionQuery {
            session_id: value.map(str::to_string),
        }
    }

    #[test]
    fn accepts_client_tokens() {
        assert_eq!(
            query(Some("0f8fad5b-d9cb-469f-a165-70867728950e")).session_id(),
            Ok("0f8fad5b-d9cb-469f-a165-70867728950e")
        );
    }

    #[test]
    fn rejects_missing_blank_and_oversized() {
        assert!(query(None).session_id().is_err());
        assert!(query(Some("")).session_id().is_err());
        assert!(query(Some("   ")).session_id().is_err());
        let long = "a".repeat(MAX_SESSION_ID_LEN + 1);
        assert!(query(Some(&long)).session_id().is_err());
    }

    #[test]
    fn debug_hides_session_id() {
        let shown = format!("{:?}", query(Some("secret-session-token")));
        assert!(!shown.contains("secret-session-token"));
    }
}
