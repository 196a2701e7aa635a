//! Error types for Planner

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlannerError>;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),

    #[error("Another request is already in progress")]
    Busy,
}

impl PlannerError {
    /// Returns true for errors that are handled locally as a blocking prompt
    /// and never reach the network or the device store.
    pub fn is_validation(&self) -> bool {
        matches!(self, PlannerError::Validation(_))
    }

    /// Returns true when the remote API reported that the resource is gone
    pub fn is_not_found(&self) -> bool {
        matches!(self, PlannerError::Remote(RemoteError::NotFound(_)))
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Local input rules. Each variant is the message of a blocking prompt.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Fill in the destination and pick both the start and end dates of the trip")]
    IncompleteTripDetails,

    #[error("The destination must have at least 4 characters")]
    DestinationTooShort,

    #[error("Invalid e-mail address")]
    InvalidEmail,

    #[error("This e-mail address is already on the guest list")]
    DuplicateEmail,

    #[error("Fill in your name and e-mail to confirm attendance")]
    IncompleteAttendance,

    #[error("Fill in the activity title, day and hour")]
    IncompleteActivity,

    #[error("The activity hour must be between 0 and 23")]
    InvalidHour,

    #[error("The activity day must fall within the trip dates")]
    ActivityOutsideTrip,

    #[error("Fill in the link title and URL")]
    IncompleteLink,

    #[error("Invalid link URL")]
    InvalidUrl,

    #[error("Invalid calendar date")]
    InvalidDate,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct PersistenceError(pub String);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_formatting_validation() {
        let error = PlannerError::Validation(ValidationError::DestinationTooShort);
        assert_eq!(
            error.to_string(),
            "Validation failed: The destination must have at least 4 characters"
        );
    }

    #[test]
    fn test_error_message_formatting_remote() {
        let error = PlannerError::Remote(RemoteError::Network("connection refused".to_string()));
        assert_eq!(error.to_string(), "Remote error: Network error: connection refused");
    }

    #[test]
    fn test_error_message_formatting_persistence() {
        let error: PlannerError = PersistenceError("disk full".to_string()).into();
        assert_eq!(error.to_string(), "Persistence error: disk full");
    }

    #[test]
    fn test_error_message_formatting_config() {
        let error = PlannerError::Config(ConfigError::MissingField("api.base_url".to_string()));
        assert_eq!(
            error.to_string(),
            "Configuration error: Missing required field: api.base_url"
        );
    }

    #[test]
    fn test_is_validation() {
        assert!(PlannerError::from(ValidationError::InvalidEmail).is_validation());
        assert!(!PlannerError::Busy.is_validation());
        assert!(!PlannerError::from(RemoteError::NotFound("trip".to_string())).is_validation());
    }

    #[test]
    fn test_is_not_found() {
        assert!(PlannerError::from(RemoteError::NotFound("abc123".to_string())).is_not_found());
        assert!(!PlannerError::from(RemoteError::Network("timeout".to_string())).is_not_found());
    }

    #[test]
    fn test_error_conversion_from_remote_error() {
        let error: PlannerError = RemoteError::Network("test".to_string()).into();

        match error {
            PlannerError::Remote(RemoteError::Network(msg)) => assert_eq!(msg, "test"),
            _ => panic!("Expected PlannerError::Remote"),
        }
    }

    #[test]
    fn test_config_error_read_error_formatting() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let config_error = ConfigError::ReadError(io_error);
        assert!(config_error.to_string().contains("Failed to read config file"));
    }
}
