use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sub-states of one mission's answer cycle. Exactly one is active at a
/// time; `Completed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Answering,
    AwaitingScore,
    ReactionDelay,
    FeedbackVisible,
    Transitioning,
    Completed,
}

/// What the student handed in: selected choice ids for choice questions,
/// free text for open-ended ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerInput {
    Selection(Vec<String>),
    FreeText(String),
}

/// One resolved question. Append-only; never edited after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionOutcome {
    pub id: String,
    pub mission_id: String,
    pub response_time_ms: u64,
    pub score: f64,
    pub feedback_text: String,
    /// The display texts that were sent to the scorer.
    pub user_answer: Vec<String>,
    pub is_correct: bool,
    pub timestamp: DateTime<Utc>,
}

/// Answer accepted but not yet scored. Cleared once the score resolves.
#[derive(Debug, Clone)]
pub(crate) struct PendingSubmission {
    pub(crate) answer_texts: Vec<String>,
    pub(crate) locally_correct: bool,
    pub(crate) response_time_ms: u64,
}

/// The single mutable aggregate of a run. Owned and mutated exclusively by
/// the mission engine; everyone else reads through the accessors.
#[derive(Debug)]
pub struct RunState {
    pub(crate) current_index: usize,
    pub(crate) phase: Phase,
    pub(crate) cumulative_score: f64,
    pub(crate) correct_count: u32,
    pub(crate) incorrect_count: u32,
    pub(crate) outcomes: Vec<QuestionOutcome>,
    pub(crate) pending: Option<PendingSubmission>,
}

impl RunState {
    pub(crate) fn new() -> Self {
        Self {
            current_index: 0,
            phase: Phase::Answering,
            cumulative_score: 0.0,
            correct_count: 0,
            incorrect_count: 0,
            outcomes: Vec::new(),
            pending: None,
        }
    }

    /// `current_index == total missions` signals run completion.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn cumulative_score(&self) -> f64 {
        self.cumulative_score
    }

    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    pub fn incorrect_count(&self) -> u32 {
        self.incorrect_count
    }

    pub fn outcomes(&self) -> &[QuestionOutcome] {
        &self.outcomes
    }

    pub(crate) fn summary(&self, total_missions: usize) -> RunSummary {
        RunSummary {
            cumulative_score: self.cumulative_score,
            total_missions,
            correct_count: self.correct_count,
            incorrect_count: self.incorrect_count,
            outcomes: self.outcomes.clone(),
        }
    }
}

/// Final statistics reported once the run completes, and the shape that is
/// persisted for a reopened results screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub cumulative_score: f64,
    pub total_missions: usize,
    pub correct_count: u32,
    pub incorrect_count: u32,
    pub outcomes: Vec<QuestionOutcome>,
}
