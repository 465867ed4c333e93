use thiserror::Error;
use time::Date;

use crate::provider::http_client::StatusCode;
use crate::util::date_of_birth::free_text::FreeTextError;

#[derive(Debug, Error)]
pub enum UpdateServiceError {
    #[error("Update service client is not configured: missing `{0}`")]
    Unconfigured(&'static str),
    #[error("Malformed data: {0}")]
    MalformedData(#[from] MalformedDataError),
    #[error("Access denied by the update service (HTTP {status})")]
    AccessDenied { status: StatusCode },
    #[error("Certificate not found (HTTP {status})")]
    CertificateNotFound { status: StatusCode },
    #[error("Connection failure: {message}")]
    ConnectionFailure {
        message: String,
        status: Option<StatusCode>,
    },
    #[error("Invalid response: {0}")]
    InvalidResponse(#[from] InvalidResponseError),
}

#[derive(Debug, Error)]
pub enum MalformedDataError {
    #[error("Unsupported type for date of birth")]
    UnsupportedInput,
    #[error("Invalid 8-digit numeric date of birth: `{0}`")]
    InvalidNumericDate(String),
    #[error("Unsupported numeric date of birth length: {0}")]
    UnsupportedNumericLength(usize),
    #[error("Date of birth cannot be in the future: {0}")]
    FutureDate(Date),
    #[error("Invalid date of birth string: `{input}`")]
    InvalidString {
        input: String,
        #[source]
        source: FreeTextError,
    },
}

#[derive(Debug, Error)]
pub enum InvalidResponseError {
    #[error("Response body is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
    #[error("Invalid XML: {0}")]
    Xml(String),
    #[error("Unexpected root element: `{0}`")]
    UnexpectedRoot(String),
    #[error("Missing or empty <{0}>")]
    MissingField(&'static str),
    #[error("Unknown statusCheckResultType: `{0}`")]
    UnknownResultType(String),
    #[error("Unknown status: `{0}`")]
    UnknownStatus(String),
    #[error("Invalid printDate (expected YYYY-MM-DD): `{0}`")]
    InvalidPrintDate(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    Unconfigured,
    MalformedData,
    AccessDenied,
    CertificateNotFound,
    ConnectionFailure,
    InvalidResponse,
}

impl ErrorCode {
    pub const fn msg(&self) -> &'static str {
        match self {
            ErrorCode::Unconfigured => "Client identity is not configured",
            ErrorCode::MalformedData => "Date of birth could not be resolved",
            ErrorCode::AccessDenied => "Access denied by the update service",
            ErrorCode::CertificateNotFound => "Certificate not found",
            ErrorCode::ConnectionFailure => "Update service could not be reached",
            ErrorCode::InvalidResponse => "Update service returned an invalid response",
        }
    }
}

impl UpdateServiceError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            UpdateServiceError::Unconfigured(_) => ErrorCode::Unconfigured,
            UpdateServiceError::MalformedData(_) => ErrorCode::MalformedData,
            UpdateServiceError::AccessDenied { .. } => ErrorCode::AccessDenied,
            UpdateServiceError::CertificateNotFound { .. } => ErrorCode::CertificateNotFound,
            UpdateServiceError::ConnectionFailure { .. } => ErrorCode::ConnectionFailure,
            UpdateServiceError::InvalidResponse(_) => ErrorCode::InvalidResponse,
        }
    }

    /// Status code of the HTTP response this error was derived from, if any.
    pub fn http_status(&self) -> Option<StatusCode> {
        match self {
            UpdateServiceError::AccessDenied { status }
            | UpdateServiceError::CertificateNotFound { status } => Some(*status),
            UpdateServiceError::ConnectionFailure { status, .. } => *status,
            UpdateServiceError::Unconfigured(_)
            | UpdateServiceError::MalformedData(_)
            | UpdateServiceError::InvalidResponse(_) => None,
        }
    }
}
