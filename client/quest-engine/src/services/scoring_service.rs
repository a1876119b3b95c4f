use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::errors::ScoringError;
use crate::models::ApiEnvelope;
use crate::session::SessionContext;

/// Score and feedback the remote AI assigned to one submitted answer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoredAnswer {
    pub score: f64,
    #[serde(default)]
    pub feedback: String,
}

/// Port the mission engine scores answers through. One call per
/// submission, never retried; the engine absorbs every failure into its
/// zero-score fallback.
#[async_trait]
pub trait ScoreAnswers: Send + Sync {
    async fn score_answer(
        &self,
        question_id: &str,
        answer_texts: &[String],
    ) -> Result<ScoredAnswer, ScoringError>;
}

/// HTTP implementation against the AI feedback endpoint. Sends the
/// answers' display texts, not choice ids; the remote scorer is
/// text-based.
pub struct ScoringService {
    http: Client,
    base_url: String,
    session: SessionContext,
}

impl ScoringService {
    pub fn new(http: Client, base_url: impl Into<String>, session: SessionContext) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            session,
        }
    }
}

#[async_trait]
impl ScoreAnswers for ScoringService {
    async fn score_answer(
        &self,
        question_id: &str,
        answer_texts: &[String],
    ) -> Result<ScoredAnswer, ScoringError> {
        let token = self.session.token().ok_or(ScoringError::MissingToken)?;
        let url = format!("{}/responses/generate", self.base_url.trim_end_matches('/'));

        let body = serde_json::json!({
            "room_id": self.session.room_id(),
            "question_id": question_id,
            "response_student": answer_texts,
        });
        tracing::debug!(%url, question_id, answers = answer_texts.len(), "requesting AI score");

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(ScoringError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ApiEnvelope<serde_json::Value>>()
                .await
                .ok()
                .and_then(|envelope| envelope.message)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            return Err(ScoringError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: ApiEnvelope<ScoredAnswer> = response
            .json()
            .await
            .map_err(|e| ScoringError::InvalidResponse(e.to_string()))?;

        if !envelope.success {
            return Err(ScoringError::Server {
                status: status.as_u16(),
                message: envelope
                    .message
                    .unwrap_or_else(|| "scoring rejected".to_string()),
            });
        }

        envelope
            .data
            .ok_or_else(|| ScoringError::InvalidResponse("envelope without data".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_token_fails_before_any_network_call() {
        let session = SessionContext::new("room-1", None);
        let service = ScoringService::new(Client::new(), "http://unreachable.invalid", session);

        let err = service
            .score_answer("q-1", &["Amazonas".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, ScoringError::MissingToken));
    }

    #[test]
    fn scored_answer_deserializes_from_envelope() {
        let json = r#"{
            "success": true,
            "code": "OK",
            "message": "generated",
            "data": { "score": 150, "feedback": "¡Muy bien!" },
            "request_id": "req-7"
        }"#;

        let envelope: ApiEnvelope<ScoredAnswer> = serde_json::from_str(json).unwrap();
        let scored = envelope.data.unwrap();
        assert_eq!(scored.score, 150.0);
        assert_eq!(scored.feedback, "¡Muy bien!");
    }
}
