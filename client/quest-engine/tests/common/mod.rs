#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use aula360_quest::errors::ScoringError;
use aula360_quest::models::mission::{Choice, Mission, NarrativeAssets, TransitionContent};
use aula360_quest::models::QuestionType;
use aula360_quest::services::scoring_service::{ScoreAnswers, ScoredAnswer};

/// One scripted reply of the fake scoring service.
pub enum ScriptedResponse {
    Score(f64, &'static str),
    Fail,
}

/// Scripted stand-in for the AI scoring endpoint. Replies are consumed in
/// order; every call is recorded for assertions.
pub struct ScriptedScorer {
    script: Mutex<VecDeque<ScriptedResponse>>,
    pub calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl ScriptedScorer {
    pub fn new(script: Vec<ScriptedResponse>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ScoreAnswers for ScriptedScorer {
    async fn score_answer(
        &self,
        question_id: &str,
        answer_texts: &[String],
    ) -> Result<ScoredAnswer, ScoringError> {
        self.calls
            .lock()
            .unwrap()
            .push((question_id.to_string(), answer_texts.to_vec()));

        match self.script.lock().unwrap().pop_front() {
            Some(ScriptedResponse::Score(score, feedback)) => Ok(ScoredAnswer {
                score,
                feedback: feedback.to_string(),
            }),
            Some(ScriptedResponse::Fail) => Err(ScoringError::Server {
                status: 500,
                message: "scoring unavailable".to_string(),
            }),
            None => Ok(ScoredAnswer {
                score: 100.0,
                feedback: String::new(),
            }),
        }
    }
}

fn narrative(with_transition: bool) -> NarrativeAssets {
    NarrativeAssets {
        background_image: "fondoQuiz/FondoQuiz-Qhapaq.png".to_string(),
        character_image: "images/chaman.png".to_string(),
        villain_image: "PersonajesQuiz/Corporatus/CorporatusLevel-1.png".to_string(),
        feedback: None,
        transition: with_transition.then(|| TransitionContent {
            background_image: "fondoQuiz/FondoQuiz-Qhapaq.png".to_string(),
            image: "PersonajesQuiz/Corporatus/CorporatusLevel-1.png".to_string(),
            title: "Explorando la Naturaleza".to_string(),
            description: "Prepárate para la siguiente misión.".to_string(),
        }),
    }
}

/// Single-choice mission where option "A" is correct.
pub fn single_choice(
    id: &str,
    ordinal: u32,
    correct_text: &str,
    wrong_text: &str,
    with_transition: bool,
) -> Mission {
    Mission {
        id: id.to_string(),
        ordinal,
        question_type: QuestionType::SingleChoice,
        prompt_text: format!("Pregunta {ordinal}"),
        choices: vec![
            Choice {
                id: "A".to_string(),
                text: correct_text.to_string(),
                is_correct: true,
            },
            Choice {
                id: "B".to_string(),
                text: wrong_text.to_string(),
                is_correct: false,
            },
        ],
        narrative: narrative(with_transition),
    }
}

pub fn open_ended(id: &str, ordinal: u32, with_transition: bool) -> Mission {
    Mission {
        id: id.to_string(),
        ordinal,
        question_type: QuestionType::OpenEnded,
        prompt_text: format!("Pregunta abierta {ordinal}"),
        choices: Vec::new(),
        narrative: narrative(with_transition),
    }
}
