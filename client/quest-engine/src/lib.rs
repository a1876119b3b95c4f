#![allow(dead_code)]

//! Client-side core of the Aula360 quiz game: question fetching, the
//! mission progression state machine, AI answer scoring and local result
//! persistence. Rendering, navigation and audio/video live elsewhere and
//! talk to this crate through snapshots and callbacks only.

pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod session;

pub use config::Config;
pub use session::SessionContext;
