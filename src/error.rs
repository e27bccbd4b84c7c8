use thiserror::Error;

use crate::{
    certificate::CertificateError, notifications::gateway::NotificationError,
    settings::SettingsError,
};

/// Every way a run can fail. Only the top-level handler turns these into a
/// message and an exit code.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Configuration(#[from] SettingsError),

    #[error(transparent)]
    Certificate(#[from] CertificateError),

    #[error("Error: {0}")]
    Delivery(#[from] NotificationError),

    #[error("Failed to write response: {0}")]
    Output(#[from] std::io::Error),
}

impl AppError {
    /// Usage problems exit like clap's own usage errors.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Configuration(_) => 2,
            _ => 1,
        }
    }
}
