use thiserror::Error;

/// Failures while fetching a room's questions. All of them prevent a run
/// from starting; none of them are retried here.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no session token available")]
    MissingToken,
    #[error("question service returned HTTP {status}: {message}")]
    Server { status: u16, message: String },
    #[error("could not reach the question service")]
    Network(#[source] reqwest::Error),
    #[error("malformed question service response: {0}")]
    InvalidResponse(String),
}

/// Failures of a single AI scoring call. The engine absorbs every variant
/// into the zero-score fallback; the run always continues.
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("no session token available")]
    MissingToken,
    #[error("scoring service returned HTTP {status}: {message}")]
    Server { status: u16, message: String },
    #[error("could not reach the scoring service")]
    Network(#[source] reqwest::Error),
    #[error("malformed scoring service response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("no questions available for this room")]
    NoQuestionsAvailable,
}

/// The only errors the mission engine surfaces to its caller. Neither one
/// leaves the state machine mid-phase.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("cannot start a run without missions")]
    NoMissions,
    #[error("submitted answer is empty")]
    EmptyAnswer,
}
