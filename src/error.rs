use std::path::PathBuf;
use thiserror::Error;

/// Failure raised by a listener while handling an event.
///
/// The registry hands it back to the notifying caller untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListenerError {
    #[error("listener '{listener}' failed: {message}")]
    Failed { listener: String, message: String },
}

impl ListenerError {
    pub fn failed(listener: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            listener: listener.into(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config declares no event types")]
    EmptyVocabulary,

    #[error("Listener '{listener}' subscribes to undeclared event type '{event_type}'")]
    UnknownEventType { listener: String, event_type: String },

    #[error("Invalid email address '{0}'")]
    InvalidEmail(String),
}

impl ConfigError {
    pub fn unknown_event_type(listener: impl Into<String>, event_type: impl Into<String>) -> Self {
        Self::UnknownEventType {
            listener: listener.into(),
            event_type: event_type.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listener_error_display() {
        let err = ListenerError::failed("email", "smtp unreachable");
        assert_eq!(err.to_string(), "listener 'email' failed: smtp unreachable");
    }

    #[test]
    fn test_unknown_event_type_display() {
        let err = ConfigError::unknown_event_type("log:/tmp/a.log", "close");
        assert_eq!(
            err.to_string(),
            "Listener 'log:/tmp/a.log' subscribes to undeclared event type 'close'"
        );
    }
}
