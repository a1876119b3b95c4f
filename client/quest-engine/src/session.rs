/// Student session handed to the HTTP services at construction.
///
/// The token is issued by the authentication screens and treated as opaque
/// here. Passing it in explicitly (instead of reading ambient storage)
/// keeps the services testable without a storage backend.
#[derive(Debug, Clone)]
pub struct SessionContext {
    room_id: String,
    token: Option<String>,
}

impl SessionContext {
    pub fn new(room_id: impl Into<String>, token: Option<String>) -> Self {
        Self {
            room_id: room_id.into(),
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    /// `None` means the caller must fail fast without attempting any
    /// network call.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_token_counts_as_absent() {
        let session = SessionContext::new("room-1", Some("   ".to_string()));
        assert!(session.token().is_none());
    }

    #[test]
    fn token_is_exposed_verbatim() {
        let session = SessionContext::new("room-1", Some("jwt-abc".to_string()));
        assert_eq!(session.token(), Some("jwt-abc"));
    }
}
