/// Crate Error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The expression text does not describe a valid roll
    #[error("{reason} at position {position} (`{offending}`)")]
    Parse {
        offending: String,
        position: usize,
        reason: String,
    },
    /// A source was asked for an empty range
    #[error("invalid range, min `{min}` is greater than max `{max}`")]
    Range { min: u64, max: u64 },
    /// A scripted source ran out of values
    #[error("scripted source exhausted after {drawn} draws")]
    Exhausted { drawn: usize },
    /// A scripted value does not fit the requested range
    #[error("scripted value `{value}` is outside of range [{min}, {max}]")]
    Unscripted { value: u64, min: u64, max: u64 },
}

impl Error {
    pub(crate) fn parse(offending: &str, position: usize, reason: impl Into<String>) -> Self {
        Self::Parse {
            offending: offending.trim().to_owned(),
            position,
            reason: reason.into(),
        }
    }

    /// True for errors caused by the user's input rather than by the caller
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

/// Crate Result type
pub type Result<T> = std::result::Result<T, Error>;
