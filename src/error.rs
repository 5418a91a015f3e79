use std::fmt;

/// Errors raised by the audio engine.
///
/// Every variant describes bad input; a request boundary should map them to
/// a client error rather than an internal one.
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("Invalid argument `{name}` = {value}: {reason}")]
    InvalidArgument {
        name: &'static str,
        value: ArgValue,
        reason: &'static str,
    },

    #[error("Channel mismatch: expected {expected} channel(s), found {found}")]
    ChannelMismatch { expected: u16, found: u16 },

    #[error("Length mismatch: left has {left} samples, right has {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("Malformed WAV: {0}")]
    MalformedWav(&'static str),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl AudioError {
    pub(crate) fn invalid(
        name: &'static str,
        value: impl Into<ArgValue>,
        reason: &'static str,
    ) -> Self {
        AudioError::InvalidArgument {
            name,
            value: value.into(),
            reason,
        }
    }
}

/// The offending value carried by `AudioError::InvalidArgument`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArgValue {
    Float(f64),
    Int(u64),
}

impl From<f64> for ArgValue {
    fn from(v: f64) -> Self {
        ArgValue::Float(v)
    }
}

impl From<u32> for ArgValue {
    fn from(v: u32) -> Self {
        ArgValue::Int(v as u64)
    }
}

impl From<u16> for ArgValue {
    fn from(v: u16) -> Self {
        ArgValue::Int(v as u64)
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Float(v) => write!(f, "{v}"),
            ArgValue::Int(v) => write!(f, "{v}"),
        }
    }
}

pub type Result<T> = std::result::Result<T, AudioError>;
