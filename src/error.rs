use std::io;
use std::process::ExitStatus;

use thiserror::Error;

/// Application-wide error type for the unused-images CLI.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("'{command}' exited with status {status}{}", stderr_suffix(.stderr))]
    CommandFailed { command: String, status: ExitStatus, stderr: String },

    #[error("'{command}' did not finish within {secs}s")]
    Timeout { command: String, secs: u64 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to launch editor: {0}")]
    Editor(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to write configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Invalid exclude pattern: {0}")]
    Glob(#[from] globset::Error),
}

impl AppError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        AppError::Config(msg.into())
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() { String::new() } else { format!(": {trimmed}") }
}
