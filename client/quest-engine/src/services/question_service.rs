use reqwest::Client;

use crate::errors::FetchError;
use crate::models::{ApiEnvelope, QuestionRecord};
use crate::session::SessionContext;

/// Fetches the room's question list from the teacher-facing service.
/// Called once, before the run starts.
pub struct QuestionService {
    http: Client,
    base_url: String,
    session: SessionContext,
}

impl QuestionService {
    pub fn new(http: Client, base_url: impl Into<String>, session: SessionContext) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            session,
        }
    }

    pub async fn fetch_questions(&self) -> Result<Vec<QuestionRecord>, FetchError> {
        let token = self.session.token().ok_or(FetchError::MissingToken)?;
        let url = format!(
            "{}/questions/all/room/{}",
            self.base_url.trim_end_matches('/'),
            self.session.room_id()
        );
        tracing::debug!(%url, "fetching room questions");

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(FetchError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ApiEnvelope<serde_json::Value>>()
                .await
                .ok()
                .and_then(|envelope| envelope.message)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            return Err(FetchError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: ApiEnvelope<Vec<QuestionRecord>> = response
            .json()
            .await
            .map_err(|e| FetchError::InvalidResponse(e.to_string()))?;

        if !envelope.success {
            return Err(FetchError::Server {
                status: status.as_u16(),
                message: envelope
                    .message
                    .unwrap_or_else(|| "request rejected".to_string()),
            });
        }

        let records = envelope.data.unwrap_or_default();
        tracing::info!(
            room_id = %self.session.room_id(),
            count = records.len(),
            "fetched room questions"
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_token_fails_before_any_network_call() {
        let session = SessionContext::new("room-1", None);
        let service = QuestionService::new(Client::new(), "http://unreachable.invalid", session);

        let err = service.fetch_questions().await.unwrap_err();
        assert!(matches!(err, FetchError::MissingToken));
    }
}
