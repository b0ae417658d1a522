use std::path::PathBuf;

/// The failure signal raised by a failed assertion.
///
/// Its `Display` output is the payload: the message alone, or
/// `message: hint` when the assertion produced a hint.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{payload}")]
pub struct AssertionError {
    message: String,
    hint: Option<String>,
    payload: String,
}

impl AssertionError {
    pub fn new<M: Into<String>>(message: M, hint: Option<String>) -> Self {
        let message = message.into();
        let payload = match &hint {
            Some(hint) => format!("{message}: {hint}"),
            None => message.clone(),
        };
        Self {
            message,
            hint,
            payload,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// The full payload (same as `to_string()`).
    pub fn payload(&self) -> &str {
        &self.payload
    }
}

/// Errors raised while loading an [`AssertConfig`](crate::config::AssertConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result of an assertion.
pub type Result<T = ()> = std::result::Result<T, AssertionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_without_hint_is_the_message() {
        let err = AssertionError::new("it should be true", None);
        assert_eq!(err.to_string(), "it should be true");
        assert_eq!(err.hint(), None);
    }

    #[test]
    fn test_payload_with_hint() {
        let err = AssertionError::new("it should be equal", Some("'A' does not equal expected 'B'".into()));
        assert_eq!(err.payload(), "it should be equal: 'A' does not equal expected 'B'");
        assert_eq!(err.message(), "it should be equal");
    }
}
