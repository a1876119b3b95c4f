use std::time::Duration;

pub mod mission_adapter;
pub mod mission_engine;
pub mod question_service;
pub mod scoring_service;
pub mod summary_store;

/// One shared HTTP client per process, injected into the services.
pub fn build_http_client(timeout: Option<Duration>) -> reqwest::Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}
