use crate::status::Status;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JSendError {
    #[error("{0} is not a valid JSend status")]
    InvalidStatus(String),

    #[error("JSend JSON can not be decoded: {message}")]
    Decode { message: String },

    #[error("JSend objects require a status")]
    MissingStatus,

    #[error("JSend {status} objects require data")]
    MissingData { status: Status },

    #[error("JSend error objects require a message")]
    MissingMessage,

    #[error("JSend field `{field}` must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Failed to send JSend response: {0}")]
    Io(#[from] std::io::Error),
}

impl JSendError {
    /// True when the failure was caused by the caller's input rather than the
    /// output sink. Decoders of untrusted payloads map these to 4xx responses.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}

impl From<serde_json::Error> for JSendError {
    fn from(error: serde_json::Error) -> Self {
        Self::Decode {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, JSendError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_status_message_names_value() {
        let err = JSendError::InvalidStatus("bogus".to_string());
        assert_eq!(err.to_string(), "bogus is not a valid JSend status");
    }

    #[test]
    fn test_missing_data_message_names_status() {
        let err = JSendError::MissingData {
            status: Status::Fail,
        };
        assert_eq!(err.to_string(), "JSend fail objects require data");
    }

    #[test]
    fn test_io_is_not_client_error() {
        let err = JSendError::from(std::io::Error::new(std::io::ErrorKind::Other, "closed"));
        assert!(!err.is_client_error());
        assert!(JSendError::MissingStatus.is_client_error());
    }
}
