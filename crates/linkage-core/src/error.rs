mod adhoc;
mod ambiguous_relation;
mod invalid_request;
mod invalid_schema;
mod join_table_collision;
mod missing_primary_key;

use adhoc::AdhocError;
use ambiguous_relation::AmbiguousRelation;
use invalid_request::InvalidRequest;
use invalid_schema::InvalidSchema;
use join_table_collision::JoinTableCollision;
use missing_primary_key::MissingPrimaryKey;

use std::{fmt, sync::Arc};

/// Returns early with an ad-hoc [`Error`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Builds an ad-hoc [`Error`] from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error raised while resolving a schema or generating statements.
///
/// Every error is a build-time configuration error: there is no runtime
/// error path, so each message names the table and field that caused it.
/// The `is_*` predicates look at the outermost error only.
#[derive(Clone)]
pub struct Error(Arc<ErrorInner>);

struct ErrorInner {
    kind: ErrorKind,

    /// The error this one adds context to
    cause: Option<Error>,
}

enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    AmbiguousRelation(AmbiguousRelation),
    MissingPrimaryKey(MissingPrimaryKey),
    JoinTableCollision(JoinTableCollision),
    InvalidSchema(InvalidSchema),
    InvalidRequest(InvalidRequest),

    /// An error used as context for another, kept whole so that its own
    /// causes still render.
    Context(Error),
}

/// Types that can be used as the context of an [`Error`].
pub trait IntoError {
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    fn into_error(self) -> Error {
        self
    }
}

impl Error {
    fn new(kind: ErrorKind) -> Error {
        Error(Arc::new(ErrorInner { kind, cause: None }))
    }

    /// Wraps this error in `consequent`. The result renders as
    /// `consequent: self`.
    pub fn context(self, consequent: impl IntoError) -> Error {
        let consequent = consequent.into_error();

        // An error without a cause can take this one directly; otherwise it
        // is nested whole.
        let kind = match Arc::try_unwrap(consequent.0) {
            Ok(ErrorInner { kind, cause: None }) => kind,
            Ok(inner) => ErrorKind::Context(Error(Arc::new(inner))),
            Err(shared) => ErrorKind::Context(Error(shared)),
        };

        Error(Arc::new(ErrorInner {
            kind,
            cause: Some(self),
        }))
    }

    fn kind(&self) -> &ErrorKind {
        match &self.0.kind {
            ErrorKind::Context(outer) => outer.kind(),
            kind => kind,
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match (&self.0.cause, self.kind()) {
            (Some(cause), _) => Some(cause),
            (None, ErrorKind::Anyhow(err)) => Some(err.as_ref()),
            (None, _) => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.kind {
            ErrorKind::Anyhow(err) => fmt::Display::fmt(err, f)?,
            ErrorKind::Adhoc(err) => fmt::Display::fmt(err, f)?,
            ErrorKind::AmbiguousRelation(err) => fmt::Display::fmt(err, f)?,
            ErrorKind::MissingPrimaryKey(err) => fmt::Display::fmt(err, f)?,
            ErrorKind::JoinTableCollision(err) => fmt::Display::fmt(err, f)?,
            ErrorKind::InvalidSchema(err) => fmt::Display::fmt(err, f)?,
            ErrorKind::InvalidRequest(err) => fmt::Display::fmt(err, f)?,
            ErrorKind::Context(err) => fmt::Display::fmt(err, f)?,
        }

        match &self.0.cause {
            Some(cause) => write!(f, ": {cause}"),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error({self})")
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::new(ErrorKind::Anyhow(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}
