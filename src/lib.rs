//! # BFHL TUI
//!
//! A terminal client for the BFHL endpoint: paste a JSON payload, submit it,
//! and pick which fields of the answer to show.
//!
//! ## Features
//! - Single-line JSON input with paste support
//! - One submission in flight at a time, cancellable
//! - Field filter over `numbers`, `alphabets` and `highest_lowercase_alphabet`
//! - YAML config file with environment overrides
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod messages;
pub mod app;
pub mod network;
pub mod view;
pub mod ui;

// Re-export commonly used types
pub use config::Config;
pub use errors::SubmitError;
pub use models::{Field, ResponsePayload, SelectedFields};
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor};
pub use network::NetworkActor;
pub use view::{render, PageView};
