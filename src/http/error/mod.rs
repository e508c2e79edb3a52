use error_stack::Report;
use thiserror::Error;
use tracing_error::SpanTrace;

use crate::database;
use crate::util::validation::ValidateError;

mod impls;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything a request handler can fail with. Each kind maps to one
/// HTTP status; the mapping lives in the [`ResponseError`] impl.
///
/// [`ResponseError`]: actix_web::ResponseError
#[derive(Debug, Error)]
pub enum Error {
    /// The identifier string could not be parsed into an ObjectId.
    /// Raised before any store round trip.
    #[error("Invalid ID format")]
    InvalidId,
    /// A well-formed identifier with no matching record.
    #[error("User not found")]
    NotFound,
    /// The payload failed the structural check of
    /// [`validation::validate_user`](crate::util::validation::validate_user).
    #[error("{0}")]
    Validation(#[from] ValidateError),
    /// A store operation failed. The report and the span trace are
    /// logged when the response is rendered; the caller only sees a
    /// generic message.
    #[error("Internal server error")]
    Internal {
        report: Report<database::Error>,
        trace: SpanTrace,
    },
}
