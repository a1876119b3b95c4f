use std::sync::Arc;

use chrono::Utc;
use tokio::time::{Duration, Instant};
use uuid::Uuid;

use crate::errors::EngineError;
use crate::models::mission::{Choice, Mission, TransitionContent};
use crate::models::run::{
    AnswerInput, PendingSubmission, Phase, QuestionOutcome, RunState, RunSummary,
};
use crate::models::QuestionType;
use crate::services::scoring_service::ScoreAnswers;
use crate::services::summary_store::SummaryStore;

/// Fixed duration of the character-reaction overlay shown between score
/// resolution and the feedback screen.
pub const REACTION_DELAY: Duration = Duration::from_millis(2000);

/// What the caller should render after a continue press.
#[derive(Debug)]
pub enum Advance {
    /// Next mission entered directly; render its question.
    NextMission,
    /// Interstitial before the next mission; call `finish_transition`
    /// when it is done.
    Transition(TransitionContent),
    /// The run is over. Reported exactly once.
    Completed(RunSummary),
    /// The press arrived in a phase where it has no meaning.
    Ignored,
}

type CompletionCallback = Box<dyn FnOnce(&RunSummary) + Send>;

/// Internal transition events. Every state change goes through
/// [`MissionEngine::apply`] so the transition table lives in one place.
enum RunEvent {
    Submit {
        answer_texts: Vec<String>,
        locally_correct: bool,
        response_time_ms: u64,
    },
    ScoreResolved {
        score: f64,
        feedback: String,
        is_correct: bool,
    },
    ReactionElapsed,
    Continue,
    TransitionFinished,
}

/// Drives a student through the fixed mission list: question → AI scoring
/// → reaction overlay → feedback → (optional interstitial) → next
/// question, accumulating the run statistics along the way.
///
/// Strictly sequential: at most one scoring call is in flight, and the
/// record for mission N is appended before mission N+1 can be submitted.
pub struct MissionEngine {
    missions: Vec<Mission>,
    state: RunState,
    scorer: Arc<dyn ScoreAnswers>,
    store: Option<SummaryStore>,
    on_complete: Option<CompletionCallback>,
    answering_since: Instant,
}

impl std::fmt::Debug for MissionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MissionEngine")
            .field("missions", &self.missions.len())
            .field("phase", &self.state.phase)
            .finish_non_exhaustive()
    }
}

impl MissionEngine {
    /// Begins a run at mission 0 in the answering phase.
    pub fn start(missions: Vec<Mission>, scorer: Arc<dyn ScoreAnswers>) -> Result<Self, EngineError> {
        if missions.is_empty() {
            return Err(EngineError::NoMissions);
        }
        tracing::info!(missions = missions.len(), "starting mission run");
        Ok(Self {
            missions,
            state: RunState::new(),
            scorer,
            store: None,
            on_complete: None,
            answering_since: Instant::now(),
        })
    }

    /// Persist the final summary here on completion. Optional; failures
    /// are logged and never interrupt the run.
    pub fn set_summary_store(&mut self, store: SummaryStore) {
        self.store = Some(store);
    }

    /// Invoked exactly once, when the run reaches `Completed`.
    pub fn on_complete(&mut self, callback: impl FnOnce(&RunSummary) + Send + 'static) {
        self.on_complete = Some(Box::new(callback));
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn total_missions(&self) -> usize {
        self.missions.len()
    }

    /// `None` once the run has completed.
    pub fn current_mission(&self) -> Option<&Mission> {
        self.missions.get(self.state.current_index)
    }

    /// Submits the answer for the current mission and drives the cycle
    /// through `AwaitingScore → ReactionDelay → FeedbackVisible`.
    ///
    /// Blank free text or an empty selection is rejected without a
    /// transition. Outside the answering phase the call is a no-op, so a
    /// second submit for the same mission has no effect.
    pub async fn submit_answer(&mut self, answer: AnswerInput) -> Result<(), EngineError> {
        if self.state.phase != Phase::Answering {
            tracing::debug!(phase = ?self.state.phase, "submission ignored outside the answering phase");
            return Ok(());
        }

        let mission = &self.missions[self.state.current_index];
        let (answer_texts, locally_correct) = prepare_submission(mission, &answer)?;
        let mission_id = mission.id.clone();
        let ordinal = mission.ordinal;
        let response_time_ms = self.answering_since.elapsed().as_millis() as u64;

        self.apply(RunEvent::Submit {
            answer_texts: answer_texts.clone(),
            locally_correct,
            response_time_ms,
        });
        tracing::info!(mission = ordinal, response_time_ms, "answer submitted, awaiting AI score");

        // Exactly one scoring call per submission. Any failure becomes the
        // zero-score fallback; the run never gets stuck awaiting a score.
        let resolution = match self.scorer.score_answer(&mission_id, &answer_texts).await {
            Ok(scored) => RunEvent::ScoreResolved {
                is_correct: scored.score > 0.0,
                score: scored.score,
                feedback: scored.feedback,
            },
            Err(err) => {
                tracing::warn!(
                    mission = ordinal,
                    error = %err,
                    "scoring call failed, falling back to local grading"
                );
                RunEvent::ScoreResolved {
                    score: 0.0,
                    feedback: String::new(),
                    is_correct: locally_correct,
                }
            }
        };
        self.apply(resolution);

        // One-shot reaction overlay. Dropping the engine mid-delay cancels
        // the timer without mutating state.
        tokio::time::sleep(REACTION_DELAY).await;
        self.apply(RunEvent::ReactionElapsed);
        Ok(())
    }

    /// Drives `FeedbackVisible` onward: into the interstitial, straight to
    /// the next mission, or to completion on the last one.
    pub fn continue_run(&mut self) -> Advance {
        self.apply(RunEvent::Continue)
    }

    /// Signals the interstitial is done; enters the next mission.
    pub fn finish_transition(&mut self) {
        self.apply(RunEvent::TransitionFinished);
    }

    /// The transition table. Events that do not match the current phase
    /// are ignored.
    fn apply(&mut self, event: RunEvent) -> Advance {
        match (self.state.phase, event) {
            (
                Phase::Answering,
                RunEvent::Submit {
                    answer_texts,
                    locally_correct,
                    response_time_ms,
                },
            ) => {
                self.state.pending = Some(PendingSubmission {
                    answer_texts,
                    locally_correct,
                    response_time_ms,
                });
                self.state.phase = Phase::AwaitingScore;
                Advance::Ignored
            }

            (
                Phase::AwaitingScore,
                RunEvent::ScoreResolved {
                    score,
                    feedback,
                    is_correct,
                },
            ) => {
                let pending = self.state.pending.take();
                let mission = &self.missions[self.state.current_index];
                let outcome = QuestionOutcome {
                    id: Uuid::new_v4().to_string(),
                    mission_id: mission.id.clone(),
                    response_time_ms: pending.as_ref().map(|p| p.response_time_ms).unwrap_or(0),
                    score,
                    feedback_text: feedback,
                    user_answer: pending.map(|p| p.answer_texts).unwrap_or_default(),
                    is_correct,
                    timestamp: Utc::now(),
                };
                tracing::info!(mission = mission.ordinal, score, is_correct, "score resolved");

                // Score, counters and the record move together; no state
                // where one is updated and the others are not.
                self.state.cumulative_score += score;
                if is_correct {
                    self.state.correct_count += 1;
                } else {
                    self.state.incorrect_count += 1;
                }
                self.state.outcomes.push(outcome);
                self.state.phase = Phase::ReactionDelay;
                Advance::Ignored
            }

            (Phase::ReactionDelay, RunEvent::ReactionElapsed) => {
                self.state.phase = Phase::FeedbackVisible;
                Advance::Ignored
            }

            (Phase::FeedbackVisible, RunEvent::Continue) => {
                if self.state.current_index + 1 >= self.missions.len() {
                    return self.complete_run();
                }

                let next = &self.missions[self.state.current_index + 1];
                match next.narrative.transition.clone() {
                    Some(content) => {
                        tracing::info!(next = next.ordinal, "entering narrative transition");
                        self.state.phase = Phase::Transitioning;
                        Advance::Transition(content)
                    }
                    None => {
                        self.enter_next_mission();
                        Advance::NextMission
                    }
                }
            }

            (Phase::Transitioning, RunEvent::TransitionFinished) => {
                self.enter_next_mission();
                Advance::NextMission
            }

            (phase, _) => {
                tracing::debug!(?phase, "event ignored in current phase");
                Advance::Ignored
            }
        }
    }

    fn enter_next_mission(&mut self) {
        self.state.current_index += 1;
        self.state.phase = Phase::Answering;
        self.answering_since = Instant::now();
        tracing::info!(mission = self.state.current_index + 1, "entering next mission");
    }

    fn complete_run(&mut self) -> Advance {
        self.state.current_index = self.missions.len();
        self.state.phase = Phase::Completed;

        let summary = self.state.summary(self.missions.len());
        if let Some(callback) = self.on_complete.take() {
            callback(&summary);
        }
        if let Some(store) = &self.store {
            if let Err(err) = store.save(&summary) {
                tracing::error!(error = %err, "failed to persist run summary");
            }
        }
        tracing::info!(
            total = summary.total_missions,
            score = summary.cumulative_score,
            correct = summary.correct_count,
            "run completed"
        );
        Advance::Completed(summary)
    }
}

/// Resolves the submitted answer into the display texts sent to the
/// scorer, plus the locally computed correctness used when scoring fails.
fn prepare_submission(
    mission: &Mission,
    answer: &AnswerInput,
) -> Result<(Vec<String>, bool), EngineError> {
    match (mission.effective_type(), answer) {
        (QuestionType::OpenEnded, AnswerInput::FreeText(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Err(EngineError::EmptyAnswer);
            }
            // No local ground truth for free text; the fallback stays
            // optimistic.
            Ok((vec![trimmed.to_string()], true))
        }
        (QuestionType::OpenEnded, AnswerInput::Selection(_)) => Err(EngineError::EmptyAnswer),
        (_, AnswerInput::Selection(ids)) => {
            let selected: Vec<&Choice> = mission
                .choices
                .iter()
                .filter(|choice| ids.contains(&choice.id))
                .collect();
            if selected.is_empty() {
                return Err(EngineError::EmptyAnswer);
            }
            let locally_correct = selected.iter().any(|choice| choice.is_correct);
            let texts = selected.iter().map(|choice| choice.text.clone()).collect();
            Ok((texts, locally_correct))
        }
        (_, AnswerInput::FreeText(_)) => Err(EngineError::EmptyAnswer),
    }
}
