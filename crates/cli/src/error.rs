//! Failures of a `heightfield` invocation and the process status each maps to.
//!
//! Clap exits with 2 on its own for malformed arguments. Everything after
//! parsing is a [`CliError`], whose status tells scripts whether the
//! generator, the user's input, or output encoding was at fault.

use heightfield_core::FieldError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// Rejected by the registry or a generator: unknown name, bad
    /// dimensions, or hyperparameters that fail `validate()`.
    #[error(transparent)]
    Generator(#[from] FieldError),

    /// Command-line input that parsed but makes no sense, such as
    /// malformed `--params` JSON or an unknown shuffle mode.
    #[error("invalid input: {0}")]
    Input(String),

    /// A result could not be written out as JSON.
    #[error("failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    pub const GENERATOR_STATUS: i32 = 10;
    pub const INPUT_STATUS: i32 = 12;
    pub const OUTPUT_STATUS: i32 = 13;

    /// Process exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Generator(_) => Self::GENERATOR_STATUS,
            CliError::Input(_) => Self::INPUT_STATUS,
            CliError::Output(_) => Self::OUTPUT_STATUS,
        }
    }
}
