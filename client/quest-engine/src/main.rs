#![allow(dead_code)]

//! Terminal runner for the quiz core. Stands in for the mobile screens:
//! it only maps stdin/stdout to the engine's API and never holds game
//! state of its own.

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aula360_quest::errors::EngineError;
use aula360_quest::models::mission::Mission;
use aula360_quest::models::run::{AnswerInput, Phase};
use aula360_quest::models::theme::{Character, ThemeSelection, Villain};
use aula360_quest::models::QuestionType;
use aula360_quest::services::mission_adapter::build_missions;
use aula360_quest::services::mission_engine::{Advance, MissionEngine};
use aula360_quest::services::question_service::QuestionService;
use aula360_quest::services::scoring_service::ScoringService;
use aula360_quest::services::summary_store::SummaryStore;
use aula360_quest::services::build_http_client;
use aula360_quest::{Config, SessionContext};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aula360_quest=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Aula360 quest runner");

    let config = Config::load().expect("Failed to load configuration");

    let room_id = std::env::var("ROOM_ID").unwrap_or_else(|_| "demo-room".to_string());
    let token = std::env::var("STUDENT_TOKEN").ok();
    let session = SessionContext::new(room_id, token);

    let theme = ThemeSelection::new(
        std::env::var("CHARACTER")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(Character::Qhapaq),
        std::env::var("VILLAIN")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(Villain::Corporatus),
    );

    let http = build_http_client(config.scoring_timeout_seconds.map(Duration::from_secs))?;

    let questions = QuestionService::new(http.clone(), &config.questions_api_url, session.clone())
        .fetch_questions()
        .await?;
    let missions = build_missions(questions, &theme)?;

    let scorer = Arc::new(ScoringService::new(
        http,
        &config.scoring_api_url,
        session,
    ));

    let mut engine = MissionEngine::start(missions, scorer)?;
    let store = match &config.data_dir {
        Some(dir) => Some(SummaryStore::in_dir(dir)),
        None => SummaryStore::at_default_location(),
    };
    if let Some(store) = store {
        engine.set_summary_store(store);
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        match engine.phase() {
            Phase::Answering => {
                let mission = engine.current_mission().expect("answering implies a mission");
                print_question(mission);
                let line = match lines.next() {
                    Some(line) => line?,
                    None => break,
                };
                let answer = parse_answer(mission, &line);
                print!("Evaluando tu respuesta...");
                io::stdout().flush()?;
                match engine.submit_answer(answer).await {
                    Ok(()) => println!(),
                    Err(EngineError::EmptyAnswer) => {
                        println!("\nEscribe o selecciona una respuesta antes de enviar.")
                    }
                    Err(err) => return Err(err.into()),
                }
            }
            Phase::FeedbackVisible => {
                let outcome = engine
                    .state()
                    .outcomes()
                    .last()
                    .expect("feedback implies a resolved question");
                let title = if outcome.score >= 200.0 {
                    "¡Excelente!"
                } else if outcome.score >= 100.0 {
                    "¡Bien!"
                } else if outcome.score > 0.0 {
                    "¡Puedes mejorar!"
                } else if outcome.is_correct {
                    "¡Correcto!"
                } else {
                    "Incorrecto"
                };
                println!("{} (+{} pts)", title, outcome.score);

                // The AI feedback text wins; the themed copy covers the
                // fallback path where scoring failed and returned none.
                if !outcome.feedback_text.is_empty() {
                    println!("{}", outcome.feedback_text);
                } else if let Some(copy) = engine
                    .current_mission()
                    .and_then(|m| m.narrative.feedback.as_ref())
                {
                    if outcome.is_correct {
                        println!("{}", copy.correct_description);
                    } else {
                        println!("{}", copy.incorrect_description);
                    }
                }
                println!("[Enter para continuar]");
                lines.next();

                match engine.continue_run() {
                    Advance::Transition(content) => {
                        println!("=== {} ===", content.title);
                        println!("{}", content.description);
                        println!("[Enter para continuar]");
                        lines.next();
                        engine.finish_transition();
                    }
                    Advance::Completed(summary) => {
                        println!("Misiones completadas: {}", summary.total_missions);
                        println!(
                            "Puntaje: {} ({} correctas, {} incorrectas)",
                            summary.cumulative_score,
                            summary.correct_count,
                            summary.incorrect_count
                        );
                        break;
                    }
                    _ => {}
                }
            }
            Phase::Completed => break,
            // AwaitingScore/ReactionDelay/Transitioning resolve inside the
            // calls above; nothing to render here.
            _ => {}
        }
    }

    Ok(())
}

fn print_question(mission: &Mission) {
    println!();
    println!("--- Misión {} ---", mission.ordinal);
    println!("{}", mission.prompt_text);
    for choice in &mission.choices {
        println!("  {}) {}", choice.id, choice.text);
    }
    if mission.choices.is_empty() {
        println!("(respuesta abierta)");
    }
    print!("> ");
    let _ = io::stdout().flush();
}

/// Choice questions take comma-separated ids ("A" or "A,C"); open-ended
/// ones take the raw line.
fn parse_answer(mission: &Mission, line: &str) -> AnswerInput {
    match mission.effective_type() {
        QuestionType::OpenEnded => AnswerInput::FreeText(line.to_string()),
        _ => AnswerInput::Selection(
            line.split(',')
                .map(|part| part.trim().to_uppercase())
                .filter(|part| !part.is_empty())
                .collect(),
        ),
    }
}
