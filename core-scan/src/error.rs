use bridge_traits::BridgeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Root folder not found: {0}")]
    NotFound(String),

    #[error("Storage access denied: {0}")]
    Access(String),

    #[error("I/O failure during scan: {0}")]
    Io(String),

    #[error("A scan is already in progress (job {job_id})")]
    ScanInProgress { job_id: String },

    #[error("Scan job {job_id} not found")]
    JobNotFound { job_id: String },

    #[error("Scan cancelled")]
    Cancelled,

    #[error("Invalid scan job ID: {0}")]
    InvalidJobId(String),
}

impl From<BridgeError> for ScanError {
    fn from(e: BridgeError) -> Self {
        match e {
            BridgeError::NotFound(token) => ScanError::NotFound(token),
            BridgeError::AccessDenied(token) => ScanError::Access(token),
            other => ScanError::Io(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
