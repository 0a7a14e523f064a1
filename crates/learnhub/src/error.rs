//! CLI error type, rendered by miette at the top level.

use miette::Diagnostic;
use thiserror::Error;

use learnhub_core::CoreError;

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("{0}")]
    #[diagnostic(code(learnhub::core))]
    Core(#[from] CoreError),

    #[error(transparent)]
    #[diagnostic(code(learnhub::config))]
    Config(#[from] learnhub_config::ConfigError),

    #[error("invalid {field}: {reason}")]
    #[diagnostic(code(learnhub::validation))]
    Validation { field: String, reason: String },

    #[error("{message}")]
    #[diagnostic(code(learnhub::usage), help("{help}"))]
    Usage { message: String, help: String },

    #[error("I/O error: {0}")]
    #[diagnostic(code(learnhub::io))]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
