use serde::{Deserialize, Serialize};

pub mod mission;
pub mod run;
pub mod theme;

/// Envelope every Aula360 API response is wrapped in.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub request_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionType {
    #[serde(rename = "MULTIPLE_CHOICE_SINGLE")]
    SingleChoice,
    #[serde(rename = "MULTIPLE_CHOICE_MULTIPLE")]
    MultipleChoice,
    #[serde(rename = "OPEN_ENDED")]
    OpenEnded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// One question as stored by the teacher-facing service, before it is
/// dressed up into a [`mission::Mission`].
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionRecord {
    pub id: String,
    #[serde(default)]
    pub room_id: Option<String>,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub text: String,
    /// Score the teacher declared for the question. The AI scorer is
    /// authoritative at run time; this is informational.
    #[serde(default)]
    pub score: f64,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub config: QuestionConfig,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionConfig {
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub correct_option_index: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_record_deserializes_from_api_shape() {
        let json = r#"{
            "id": "q-1",
            "room_id": "room-9",
            "type": "MULTIPLE_CHOICE_SINGLE",
            "text": "¿Cuál es el río más largo del mundo?",
            "score": 200,
            "difficulty": "EASY",
            "config": { "options": ["Nilo", "Amazonas", "Misisipi"], "correct_option_index": 1 },
            "tags": ["geografía"]
        }"#;

        let record: QuestionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.question_type, QuestionType::SingleChoice);
        assert_eq!(record.config.options.len(), 3);
        assert_eq!(record.config.correct_option_index, Some(1));
    }

    #[test]
    fn question_record_tolerates_missing_config() {
        let json = r#"{
            "id": "q-2",
            "type": "OPEN_ENDED",
            "text": "¿Qué simboliza la Pachamama?",
            "difficulty": "HARD"
        }"#;

        let record: QuestionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.question_type, QuestionType::OpenEnded);
        assert!(record.config.options.is_empty());
        assert_eq!(record.config.correct_option_index, None);
    }

    #[test]
    fn envelope_keeps_server_message() {
        let json = r#"{
            "success": false,
            "code": "NOT_FOUND",
            "message": "Room not found",
            "data": null,
            "request_id": "req-1"
        }"#;

        let envelope: ApiEnvelope<Vec<QuestionRecord>> = serde_json::from_str(json).unwrap();
        assert!(!envelope.success);
        assert_eq!(envelope.message.as_deref(), Some("Room not found"));
        assert!(envelope.data.is_none());
    }
}
