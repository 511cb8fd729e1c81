use super::Error;

/// Error when a link requires a primary key that a table does not declare.
///
/// Foreign columns and join columns hold the referenced table's primary key,
/// and update statements match rows by it. When neither the key nor a
/// composite alternative (the table's foreign columns) exists, generation
/// for the table is aborted.
#[derive(Debug)]
pub(super) struct MissingPrimaryKey {
    table: Box<str>,
    field: Box<str>,
    reason: Box<str>,
}

impl std::error::Error for MissingPrimaryKey {}

impl core::fmt::Display for MissingPrimaryKey {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "missing primary key for `{}.{}`: {}",
            self.table, self.field, self.reason
        )
    }
}

impl Error {
    /// Creates a missing primary key error for `table.field`.
    pub fn missing_primary_key(table: &str, field: &str, reason: impl Into<String>) -> Error {
        Error::new(super::ErrorKind::MissingPrimaryKey(MissingPrimaryKey {
            table: table.into(),
            field: field.into(),
            reason: reason.into().into(),
        }))
    }

    /// Returns `true` if this error is a missing primary key error.
    pub fn is_missing_primary_key(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::MissingPrimaryKey(_))
    }
}
