use error_stack::Report;
use thiserror::Error;

/// Database related errors
#[derive(Debug, Error)]
pub enum Error {
    /// An error caused by an invalid MongoDB connection url.
    #[error("invalid connection url")]
    InvalidUrl,
    /// An error caused by a [`mongodb`] driver error.
    #[error("received a driver error: {0}")]
    Internal(mongodb::error::Error),
    /// The deployment did not acknowledge a ping within the
    /// configured timeout.
    #[error("unhealthy database connection")]
    Unhealthy,
}

/// Lazily typed [`std::result::Result`] but the error generic
/// is filled up with [a database error](Error).
pub type Result<T> = error_stack::Result<T, Error>;

/// Converts from a raw [mongodb] result into a [database compatible error](Error).
pub trait ErrorExt<T> {
    fn into_db_error(self) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, mongodb::error::Error> {
    fn into_db_error(self) -> Result<T> {
        self.map_err(|e| Report::new(Error::Internal(e)))
    }
}

/// This trait deals with `error_stack::Report<Error>` because it is
/// annoying to downcast the context by hand everywhere the health of
/// the connection has to be checked.
pub trait ErrorExt2 {
    fn is_unhealthy(&self) -> bool;
}

impl ErrorExt2 for error_stack::Report<Error> {
    fn is_unhealthy(&self) -> bool {
        self.downcast_ref::<Error>()
            .map(|v| matches!(v, Error::Unhealthy))
            .unwrap_or_default()
    }
}
