//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid configuration, lookups of unknown rig items, and rig document parsing.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown cloner '{name}'")]
    UnknownCloner { name: String },

    #[error("unknown effector '{name}'")]
    UnknownEffector { name: String },

    #[error("unknown field '{name}'")]
    UnknownField { name: String },

    #[error("rig parse error: {0}")]
    Parse(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidConfig(msg.into())
    }
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}

#[cfg(feature = "ron")]
impl From<ron::error::SpannedError> for Error {
    fn from(value: ron::error::SpannedError) -> Self {
        Error::Parse(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_string_uses_other_variant() {
        let err: Error = String::from("boom").into();
        assert!(matches!(err, Error::Other(_)));
    }

    #[test]
    fn invalid_config_message_is_prefixed() {
        let err = Error::invalid("count must be >= 1");
        assert_eq!(
            err.to_string(),
            "invalid configuration: count must be >= 1"
        );
    }

    #[test]
    fn unknown_items_name_the_missing_item() {
        let err = Error::UnknownEffector {
            name: "Random".into(),
        };
        assert_eq!(err.to_string(), "unknown effector 'Random'");
    }
}
