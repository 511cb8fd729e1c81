use super::Error;

/// Error when a batch request does not match its request shape.
#[derive(Debug)]
pub(super) struct InvalidRequest {
    message: Box<str>,
}

impl std::error::Error for InvalidRequest {}

impl core::fmt::Display for InvalidRequest {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid request: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid request error.
    ///
    /// Raised when binding requests to a generated statement: unknown fields,
    /// missing keys, or values that do not fit the field's type.
    pub fn invalid_request(message: impl Into<String>) -> Error {
        Error::new(super::ErrorKind::InvalidRequest(InvalidRequest {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid request error.
    pub fn is_invalid_request(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidRequest(_))
    }
}
