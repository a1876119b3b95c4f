use serde::{Deserialize, Serialize};

use super::QuestionType;

/// Opaque reference to an image asset. The engine never inspects these;
/// they travel through to the presentation layer untouched.
pub type ImageRef = String;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    pub id: String,
    pub text: String,
    pub is_correct: bool,
}

/// One quiz question bound to its narrative dressing. Built once by the
/// mission adapter before the run starts and immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mission {
    pub id: String,
    /// 1-based position in the run.
    pub ordinal: u32,
    pub question_type: QuestionType,
    pub prompt_text: String,
    /// Empty for open-ended questions. A choice-type mission that somehow
    /// arrives without choices is treated as open-ended at submission time.
    pub choices: Vec<Choice>,
    pub narrative: NarrativeAssets,
}

impl Mission {
    /// Effective question type for submission purposes: a mission without
    /// choices degrades to free text instead of becoming unsubmittable.
    pub fn effective_type(&self) -> QuestionType {
        if self.choices.is_empty() {
            QuestionType::OpenEnded
        } else {
            self.question_type
        }
    }
}

/// Pass-through presentation data: imagery plus the optional interstitial
/// shown before this mission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeAssets {
    pub background_image: ImageRef,
    pub character_image: ImageRef,
    pub villain_image: ImageRef,
    #[serde(default)]
    pub feedback: Option<FeedbackCopy>,
    #[serde(default)]
    pub transition: Option<TransitionContent>,
}

/// Static feedback texts and imagery used when the AI feedback is empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackCopy {
    pub correct_image: ImageRef,
    pub incorrect_image: ImageRef,
    pub correct_description: String,
    pub incorrect_description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionContent {
    pub background_image: ImageRef,
    pub image: ImageRef,
    pub title: String,
    pub description: String,
}
