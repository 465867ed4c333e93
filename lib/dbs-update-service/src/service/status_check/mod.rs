//! Certificate status lookups against the DBS update service.
//!
//! One lookup is one `GET {base}/crsc/api/status/{certificateId}` request. The XML body of a
//! successful response is validated into a [`StatusCheckResult`]; error statuses and transport
//! failures are classified into [`UpdateServiceError`] variants. Nothing is cached or retried.

mod dto;
pub(crate) mod mapper;
pub mod parser;


use std::sync::Arc;

use url::Url;

use self::dto::StatusCheckQueryDTO;
use self::mapper::classify_http_error;
use self::parser::parse_status_check_result;
use crate::config::{DEFAULT_BASE_URL, UpdateServiceConfig};
use crate::error::{InvalidResponseError, UpdateServiceError};
use crate::model::status_check::StatusCheckResult;
use crate::provider::http_client::HttpClient;
use crate::provider::http_client::reqwest_client::ReqwestClient;
use crate::util::date_of_birth::{DateOfBirth, format_for_query, normalize};

const STATUS_PATH: [&str; 3] = ["crsc", "api", "status"];

pub struct UpdateService {
    http_client: Arc<dyn HttpClient>,
    base_url: Option<Url>,
    organisation_name: String,
    requester_forename: String,
    requester_surname: String,
}

impl UpdateService {
    pub fn new(http_client: Arc<dyn HttpClient>, config: UpdateServiceConfig) -> Self {
        Self {
            http_client,
            base_url: config.base_url,
            organisation_name: config.organisation_name,
            requester_forename: config.requester_forename,
            requester_surname: config.requester_surname,
        }
    }

    /// Builds a service backed by a `reqwest` client using the configured timeout.
    pub fn from_config(config: UpdateServiceConfig) -> Result<Self, UpdateServiceError> {
        let http_client =
            ReqwestClient::with_timeout(config.timeout).map_err(|e| {
                UpdateServiceError::ConnectionFailure {
                    message: e.to_string(),
                    status: None,
                }
            })?;

        Ok(Self::new(Arc::new(http_client), config))
    }

    pub async fn get_certificate_status(
        &self,
        certificate_id: &str,
        surname: &str,
        date_of_birth: impl Into<DateOfBirth>,
    ) -> Result<StatusCheckResult, UpdateServiceError> {
        self.validate_configuration()?;
        if certificate_id.trim().is_empty() {
            return Err(UpdateServiceError::Unconfigured("certificateId"));
        }
        if surname.trim().is_empty() {
            return Err(UpdateServiceError::Unconfigured("surname"));
        }

        let date_of_birth = normalize(date_of_birth)?;

        let url = self.status_url(certificate_id)?;
        let query = StatusCheckQueryDTO {
            has_agreed_terms_and_conditions: true,
            organisation_name: &self.organisation_name,
            employee_forename: &self.requester_forename,
            employee_surname: &self.requester_surname,
            surname,
            date_of_birth: format_for_query(date_of_birth),
        };

        tracing::debug!(%certificate_id, "Checking certificate status");

        let response = self
            .http_client
            .get(url.as_str())
            .header("Accept", "application/xml")
            .query(query)
            .map_err(classify_http_error)?
            .send()
            .await
            .map_err(classify_http_error)?
            .error_for_status()
            .map_err(|error| {
                let error = classify_http_error(error);
                tracing::warn!(%certificate_id, code = ?error.error_code(), "Status check rejected: {error}");
                error
            })?;

        let body = std::str::from_utf8(&response.body).map_err(InvalidResponseError::from)?;
        let result = parse_status_check_result(body)?;

        tracing::debug!(
            %certificate_id,
            result_type = %result.result_type,
            status = %result.status,
            "Certificate status received"
        );

        Ok(result)
    }

    fn validate_configuration(&self) -> Result<(), UpdateServiceError> {
        [
            ("organisationName", &self.organisation_name),
            ("requesterForename", &self.requester_forename),
            ("requesterSurname", &self.requester_surname),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map_or(Ok(()), |(field, _)| {
            Err(UpdateServiceError::Unconfigured(field))
        })
    }

    fn status_url(&self, certificate_id: &str) -> Result<Url, UpdateServiceError> {
        let mut url = match &self.base_url {
            Some(base_url) => base_url.clone(),
            None => Url::parse(DEFAULT_BASE_URL)
                .map_err(|_| UpdateServiceError::Unconfigured("baseUrl"))?,
        };
        url.path_segments_mut()
            .map_err(|_| UpdateServiceError::Unconfigured("baseUrl"))?
            .pop_if_empty()
            .extend(STATUS_PATH)
            .push(certificate_id);

        Ok(url)
    }
}
