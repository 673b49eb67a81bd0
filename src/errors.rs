use cron_period_parser::CronPeriodError;
use thiserror::Error;

/// Errors that can occur while configuring or driving a period editor.
#[derive(Error, Debug)]
pub enum EditorError {
    /// The configured initial value is not a supported expression
    #[error("Invalid initial value `{initial}`: {source}")]
    InvalidInitial {
        initial: String,
        #[source]
        source: CronPeriodError,
    },

    /// An expression was rejected, or the current selection cannot be assembled
    #[error("Invalid cron value: {0}")]
    InvalidValue(#[from] CronPeriodError),

    /// A custom selection referred to a label that was never configured
    #[error("Unknown custom value `{0}`")]
    UnknownCustomValue(String),

    /// The options file could not be deserialized
    #[error("Error while reading editor options: {0}")]
    ConfigError(#[from] toml::de::Error),
}

/// A Result type alias for EditorError.
pub type Result<T> = core::result::Result<T, EditorError>;
