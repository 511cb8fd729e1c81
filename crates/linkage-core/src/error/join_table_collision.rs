use super::Error;

/// Error when two distinct table pairs derive the same join table name.
#[derive(Debug)]
pub(super) struct JoinTableCollision {
    name: Box<str>,
    message: Box<str>,
}

impl std::error::Error for JoinTableCollision {}

impl core::fmt::Display for JoinTableCollision {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "join table name collision `{}`: {}",
            self.name, self.message
        )
    }
}

impl Error {
    /// Creates a join table collision error for the derived `name`.
    pub fn join_table_collision(name: &str, message: impl Into<String>) -> Error {
        Error::new(super::ErrorKind::JoinTableCollision(JoinTableCollision {
            name: name.into(),
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a join table collision error.
    pub fn is_join_table_collision(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::JoinTableCollision(_))
    }
}
