pub mod reqwest_client;


use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;

use itertools::Itertools;
use serde::Serialize;
use strum::Display;
use thiserror::Error;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait HttpClient: Send + Sync {
    fn get(&self, url: &str) -> RequestBuilder;

    async fn send(
        &self,
        url: &str,
        headers: Option<Headers>,
        method: Method,
    ) -> Result<Response, Error>;
}

pub type Headers = HashMap<String, String>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StatusCode(pub u16);

#[derive(Clone, Debug)]
pub struct Request {
    pub headers: Headers,
    pub method: Method,
    pub url: String,
}

#[derive(Debug)]
pub struct Response {
    pub body: Vec<u8>,
    pub headers: Headers,
    pub status: StatusCode,

    pub request: Request,
}

#[derive(Debug, Error)]
pub enum Error {
    /// No response was received at all.
    #[error("HTTP error: {0}")]
    HttpError(String),
    #[error("Other HTTP client error: {0}")]
    Other(String),
    #[error("HTTP status code is error: {0}")]
    StatusCodeIsError(StatusCode),
    #[error("Url encoding error: {0}")]
    UrlEncode(#[from] serde_urlencoded::ser::Error),
}

impl Error {
    pub fn log_error(self, location: &std::panic::Location, request: &Request) -> Self {
        let debug_message = format!("\n{} {} - {self}", request.method, request.url);
        tracing::error!(%debug_message, %location);

        self
    }
}

impl Response {
    /// Error statuses are not logged here; callers decide how severe they are.
    pub fn error_for_status(self) -> Result<Self, Error> {
        if self.status.is_client_error() || self.status.is_server_error() {
            Err(Error::StatusCodeIsError(self.status))
        } else {
            Ok(self)
        }
    }

    #[track_caller]
    fn log_success(self) -> Self {
        let debug_message = format!("\n{} {} - HTTP", self.request.method, self.request.url);

        let location = std::panic::Location::caller();
        tracing::debug!(%debug_message, %location);
        log_request_details(location, &self.request);

        let trace_response = format!(
            "\nResponse\nStatus: {}\nHeaders:\n{}\nBody:\n{}\n",
            self.status,
            format_headers(&self.headers),
            format_body(&self.body)
        );
        tracing::trace!(%trace_response, %location);

        self
    }
}

impl StatusCode {
    pub fn is_client_error(&self) -> bool {
        self.0 >= 400 && self.0 < 500
    }

    pub fn is_server_error(&self) -> bool {
        self.0 >= 500 && self.0 < 600
    }
}

impl Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Display)]
pub enum Method {
    #[strum(serialize = "GET")]
    Get,
}

pub struct RequestBuilder {
    client: Arc<dyn HttpClient>,
    headers: Headers,
    method: Method,
    url: String,
}

impl RequestBuilder {
    pub fn new(client: Arc<dyn HttpClient>, method: Method, url: &str) -> Self {
        Self {
            client,
            headers: Headers::default(),
            method,
            url: url.to_string(),
        }
    }

    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    /// Appends `value` as URL-encoded query parameters, keeping field order.
    #[track_caller]
    pub fn query<T: Serialize>(mut self, value: T) -> Result<Self, Error> {
        let location = std::panic::Location::caller();

        let encoded = serde_urlencoded::to_string(value)
            .map_err(|e| Error::UrlEncode(e).log_error(location, &self.as_request()))?;

        if !encoded.is_empty() {
            let separator = match self.url.contains('?') {
                true if self.url.ends_with('?') || self.url.ends_with('&') => "",
                true => "&",
                false => "?",
            };
            self.url = format!("{}{separator}{encoded}", self.url);
        }

        Ok(self)
    }

    pub async fn send(self) -> Result<Response, Error> {
        let location = std::panic::Location::caller();
        let as_request = self.as_request();

        let headers = if self.headers.is_empty() {
            None
        } else {
            Some(self.headers)
        };

        self.client
            .send(&self.url, headers, self.method)
            .await
            .map(|response| response.log_success())
            .map_err(|e| {
                let error = e.log_error(location, &as_request);
                log_request_details(location, &as_request);
                error
            })
    }

    fn as_request(&self) -> Request {
        Request {
            headers: self.headers.clone(),
            method: self.method,
            url: self.url.clone(),
        }
    }
}

fn format_headers(headers: &Headers) -> String {
    match headers.is_empty() {
        true => "<None>".to_string(),
        false => headers.iter().map(|(k, v)| format!("{k}: {v}")).join("\n"),
    }
}

fn format_body(body: &[u8]) -> String {
    match std::str::from_utf8(body) {
        Ok(string) => string.to_owned(),
        Err(_) => format!("{body:?}"),
    }
}

fn log_request_details(location: &std::panic::Location, request: &Request) {
    let trace_request = format!(
        "\nRequest\nHeaders:\n{}\n",
        format_headers(&request.headers)
    );

    tracing::trace!(%trace_request, %location);
}
