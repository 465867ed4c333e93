use crate::error::UpdateServiceError;
use crate::provider::http_client::{Error, StatusCode};

/// Maps a failed HTTP exchange to the domain error reported to the caller.
pub(crate) fn classify_http_error(error: Error) -> UpdateServiceError {
    match error {
        Error::StatusCodeIsError(status @ (StatusCode(401) | StatusCode(403))) => {
            UpdateServiceError::AccessDenied { status }
        }
        Error::StatusCodeIsError(status @ StatusCode(404)) => {
            UpdateServiceError::CertificateNotFound { status }
        }
        Error::StatusCodeIsError(status) => UpdateServiceError::ConnectionFailure {
            message: Error::StatusCodeIsError(status).to_string(),
            status: Some(status),
        },
        error @ (Error::HttpError(_) | Error::Other(_) | Error::UrlEncode(_)) => {
            UpdateServiceError::ConnectionFailure {
                message: error.to_string(),
                status: None,
            }
        }
    }
}
