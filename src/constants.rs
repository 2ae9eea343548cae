//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Endpoint that receives the submitted payload
pub const DEFAULT_ENDPOINT_URL: &str = "https://surya-back.praki.tech/bfhl";

/// Request timeout used when no override is configured
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Log file written next to the working directory by default
pub const DEFAULT_LOG_FILE: &str = "bfhl-tui.log";

/// Directory under $HOME holding the optional config file
pub const CONFIG_DIR_NAME: &str = ".bfhl";

/// Config file name inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// The only error text ever shown to the user
pub const USER_ERROR_MESSAGE: &str = "Invalid JSON input or API error";

/// Hint shown in the empty input box
pub const INPUT_PLACEHOLDER: &str = r#"{"data": ["A", "C", "z"]}"#;

/// Application name
pub const APP_NAME: &str = "BFHL TUI";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
