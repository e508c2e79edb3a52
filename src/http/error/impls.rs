use actix_web::{body::BoxBody, http::StatusCode, HttpResponse};
use error_stack::Report;
use serde_json::json;
use tracing_error::SpanTrace;

use super::Error;
use crate::database;

impl actix_web::ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidId | Error::Validation(..) => StatusCode::BAD_REQUEST,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        if let Error::Internal { report, trace } = self {
            tracing::error!(report = ?report, "request failed on a store operation");
            tracing::error!("{trace}");
        }

        HttpResponse::build(self.status_code()).json(json!({
            "error": self.to_string(),
        }))
    }
}

impl From<Report<database::Error>> for Error {
    fn from(report: Report<database::Error>) -> Self {
        Error::Internal {
            report,
            trace: SpanTrace::capture(),
        }
    }
}
