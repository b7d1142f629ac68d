/// Convenience result type used across the board engine.
pub type BoardResult<T> = Result<T, BoardError>;

/// Top-level error taxonomy used by engine APIs.
///
/// A render pass surfaces exactly one of these; nothing partial is ever published.
#[derive(thiserror::Error, Debug)]
pub enum BoardError {
    /// Invalid configuration or descriptor values.
    #[error("validation error: {0}")]
    Validation(String),

    /// Corrupt, unsupported, or unreadable sticker source.
    #[error("decode error: {0}")]
    Decode(String),

    /// The encoder rejected the frame stream or exited unsuccessfully.
    #[error("encode error: {reason}{}", exit_suffix(.exit_code))]
    Encode {
        /// Short description of what failed.
        reason: String,
        /// Exit code reported by the encoder process, when it ran to completion.
        exit_code: Option<i32>,
        /// Combined stdout/stderr captured from the encoder process.
        log: String,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BoardError {
    /// Build a [`BoardError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BoardError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`BoardError::Encode`] value without process diagnostics.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode {
            reason: msg.into(),
            exit_code: None,
            log: String::new(),
        }
    }

    /// Build a [`BoardError::Encode`] value carrying the process exit code and log.
    pub fn encode_exit(
        msg: impl Into<String>,
        exit_code: Option<i32>,
        log: impl Into<String>,
    ) -> Self {
        Self::Encode {
            reason: msg.into(),
            exit_code,
            log: log.into(),
        }
    }

    /// Captured encoder log, if this is an encode failure.
    pub fn encoder_log(&self) -> Option<&str> {
        match self {
            Self::Encode { log, .. } => Some(log.as_str()),
            _ => None,
        }
    }
}

fn exit_suffix(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!(" (exit code {c})"),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
