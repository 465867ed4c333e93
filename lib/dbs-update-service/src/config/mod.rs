use std::path::Path;
use std::time::Duration;

use figment::Figment;
#[cfg(feature = "config_env")]
use figment::providers::Env;
#[cfg(feature = "config_json")]
use figment::providers::Json;
#[cfg(feature = "config_yaml")]
use figment::providers::Yaml;
use figment::providers::{Data, Format, Serialized};
use serde::{Deserialize, Serialize};
use serde_with::{DurationSeconds, serde_as};
use thiserror::Error;
use url::Url;


pub const DEFAULT_BASE_URL: &str = "https://secure.crbonline.gov.uk";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum ConfigParsingError {
    #[error("Config parsing error: `{0}`")]
    GeneralParsingError(String),
}

/// Identity presented to the update service plus transport settings.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceConfig {
    #[serde(default)]
    pub organisation_name: String,
    #[serde(default)]
    pub requester_forename: String,
    #[serde(default)]
    pub requester_surname: String,
    /// [`DEFAULT_BASE_URL`] when not set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<Url>,
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "default_timeout")]
    pub timeout: Duration,
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

impl UpdateServiceConfig {
    pub fn new(
        organisation_name: impl Into<String>,
        requester_forename: impl Into<String>,
        requester_surname: impl Into<String>,
    ) -> Self {
        Self {
            organisation_name: organisation_name.into(),
            requester_forename: requester_forename.into(),
            requester_surname: requester_surname.into(),
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(self, base_url: Url) -> Self {
        Self {
            base_url: Some(base_url),
            ..self
        }
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }
}

pub enum InputFormat {
    #[cfg(feature = "config_yaml")]
    Yaml(Data<Yaml>),
    #[cfg(feature = "config_json")]
    Json(Data<Json>),
}

impl InputFormat {
    #[cfg(feature = "config_yaml")]
    pub fn yaml_file(p: impl AsRef<Path>) -> InputFormat {
        InputFormat::Yaml(Yaml::file(p))
    }

    #[cfg(feature = "config_yaml")]
    pub fn yaml_str(s: impl AsRef<str>) -> InputFormat {
        InputFormat::Yaml(Yaml::string(s.as_ref()))
    }

    #[cfg(feature = "config_json")]
    pub fn json_file(p: impl AsRef<Path>) -> InputFormat {
        InputFormat::Json(Json::file(p))
    }

    #[cfg(feature = "config_json")]
    pub fn json_str(s: impl AsRef<str>) -> InputFormat {
        InputFormat::Json(Json::string(s.as_ref()))
    }
}

impl UpdateServiceConfig {
    pub fn from_files(files: &[impl AsRef<Path>]) -> Result<Self, ConfigParsingError> {
        let mut inputs: Vec<InputFormat> = Vec::with_capacity(files.len());

        for path in files {
            #[cfg(feature = "config_yaml")]
            if path
                .as_ref()
                .extension()
                .is_some_and(|ext| ext == "yml" || ext == "yaml")
            {
                inputs.push(InputFormat::yaml_file(path));
                continue;
            }

            #[cfg(feature = "config_json")]
            if path.as_ref().extension() == Some("json".as_ref()) {
                inputs.push(InputFormat::json_file(path));
                continue;
            }

            return Err(ConfigParsingError::GeneralParsingError(format!(
                "Unsupported file or missing file extension: {:?}",
                path.as_ref().to_str()
            )));
        }

        Self::parse(inputs)
    }

    #[cfg(feature = "config_yaml")]
    pub fn from_yaml(
        configs: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> Result<Self, ConfigParsingError> {
        let inputs = configs
            .into_iter()
            .map(|s| Yaml::string(s.as_ref()))
            .map(InputFormat::Yaml);

        Self::parse(inputs)
    }

    /// Merges `inputs` in order over the defaults; `DBS_`-prefixed environment
    /// variables take precedence when the `config_env` feature is enabled.
    pub fn parse(inputs: impl IntoIterator<Item = InputFormat>) -> Result<Self, ConfigParsingError> {
        let mut figment = Figment::from(Serialized::defaults(Self::new("", "", "")));

        for data in inputs {
            figment = match data {
                #[cfg(feature = "config_yaml")]
                InputFormat::Yaml(content) => figment.merge(content),
                #[cfg(feature = "config_json")]
                InputFormat::Json(content) => figment.merge(content),
            };
        }

        #[cfg(feature = "config_env")]
        {
            figment = figment.merge(Env::prefixed("DBS_").split("__").lowercase(false));
        }

        figment
            .extract::<Self>()
            .map_err(|e| ConfigParsingError::GeneralParsingError(e.to_string()))
    }
}
