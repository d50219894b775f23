pub mod client;
pub mod endpoints;

use thiserror::Error;

/// Batch-level failures: the payload could not be obtained or decoded at
/// all. Field-level defects never reach this type; they degrade to
/// sentinel values inside the pipeline.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Network/transport failure talking to the backend
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body did not match any known payload shape
    #[error("Unexpected payload shape: {0}")]
    Payload(#[from] serde_json::Error),
}
