/// Crate Error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Roll(#[from] drunkdm_lib::Error),
    #[error("file `{0}` not found")]
    NotFound(String),
    #[error("`{0}` is not a path inside the vault")]
    InvalidId(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("unable to read settings: {0}")]
    SettingsDecode(#[from] ron::error::SpannedError),
    #[error("unable to write settings: {0}")]
    SettingsEncode(#[from] ron::Error),
}

/// Crate Result type
pub type Result<T> = std::result::Result<T, Error>;
