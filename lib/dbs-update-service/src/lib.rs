//! Client for the DBS update service certificate status check.
//!
//! ```ignore
//! let config = UpdateServiceConfig::new("Acme Care Ltd", "Alice", "Smith");
//! let service = UpdateService::from_config(config)?;
//! let result = service
//!     .get_certificate_status("012345678901", "SMITH", "2000-01-01")
//!     .await?;
//! if result.is_clear() { /* ... */ }
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod service;
pub mod util;

pub use config::UpdateServiceConfig;
pub use error::{ErrorCode, InvalidResponseError, MalformedDataError, UpdateServiceError};
pub use model::status_check::{StatusCheckResult, StatusCheckResultType, StatusCode};
pub use service::status_check::UpdateService;
pub use util::date_of_birth::DateOfBirth;
