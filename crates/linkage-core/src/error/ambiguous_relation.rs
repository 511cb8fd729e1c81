use super::Error;

/// Error when a field's link to another record type cannot be classified.
///
/// This occurs when:
/// - The target record has more than one field linking back
/// - The source record links to the target through more than one field while
///   the target also links back
/// - A paired relationship was classified but no matching field exists
#[derive(Debug)]
pub(super) struct AmbiguousRelation {
    table: Box<str>,
    field: Box<str>,
    reason: Box<str>,
}

impl std::error::Error for AmbiguousRelation {}

impl core::fmt::Display for AmbiguousRelation {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "ambiguous relation `{}.{}`: {}",
            self.table, self.field, self.reason
        )
    }
}

impl Error {
    /// Creates an ambiguous relation error for `table.field`.
    pub fn ambiguous_relation(table: &str, field: &str, reason: impl Into<String>) -> Error {
        Error::new(super::ErrorKind::AmbiguousRelation(AmbiguousRelation {
            table: table.into(),
            field: field.into(),
            reason: reason.into().into(),
        }))
    }

    /// Returns `true` if this error is an ambiguous relation error.
    pub fn is_ambiguous_relation(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::AmbiguousRelation(_))
    }
}
