//! Machine-readable output for the `--json` flag.

use serde::Serialize;
use thiserror::Error;
use ulawkit_dsp::AudioError;

/// Error codes for CLI-level failures.
///
/// Pipeline failures pass through the library's `ULAW_xxx` codes.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// File could not be written
    pub const FILE_WRITE: &str = "CLI_002";
    /// Config file could not be parsed
    pub const CONFIG_PARSE: &str = "CLI_003";
    /// Anything else
    pub const INTERNAL: &str = "CLI_004";
}

/// CLI-level failure with a stable code for the JSON report.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CliError {
    pub code: &'static str,
    pub message: String,
}

impl CliError {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (`CLI_xxx` or `ULAW_xxx`)
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl JsonError {
    /// Picks the most specific code available in an error chain.
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        let code = if let Some(audio) = err.downcast_ref::<AudioError>() {
            audio.code()
        } else if let Some(cli) = err.downcast_ref::<CliError>() {
            cli.code
        } else {
            error_codes::INTERNAL
        };

        Self {
            code: code.to_string(),
            message: format!("{:#}", err),
        }
    }
}

/// Top-level JSON document printed by every command.
#[derive(Debug, Serialize)]
pub struct CommandOutput<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<JsonError>,
}

impl<T: Serialize> CommandOutput<T> {
    pub fn success(result: T) -> Self {
        Self {
            success: true,
            result: Some(result),
            errors: Vec::new(),
        }
    }

    pub fn failure(err: &anyhow::Error) -> Self {
        Self {
            success: false,
            result: None,
            errors: vec![JsonError::from_anyhow(err)],
        }
    }
}

/// BLAKE3 hex digest of an output file.
pub fn digest(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}
