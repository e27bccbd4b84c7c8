pub mod apns;

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use super::entities::{Notification, PushResponse};

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("Failed to send notification: {0}")]
    SendFailure(String),

    #[error("Failed to initialize notification client: {0}")]
    InitializationFailed(String),
}

/// APNs host a client is bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Production,
    Development,
}

impl Environment {
    /// Only `development` selects the development host. Every other value,
    /// including typos, falls back to production.
    pub fn from_mode(mode: &str) -> Self {
        match mode {
            "development" => Environment::Development,
            "production" => Environment::Production,
            other => {
                warn!(mode = other, "unknown mode, sending to production");
                Environment::Production
            }
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    /// Sends one notification and returns whatever APNs answered, rejections
    /// included. Errors are reserved for failures to get an answer at all.
    async fn push(&self, notification: &Notification) -> Result<PushResponse, NotificationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_mode_selects_development() {
        assert_eq!(Environment::from_mode("development"), Environment::Development);
    }

    #[test]
    fn test_other_modes_select_production() {
        assert_eq!(Environment::from_mode("production"), Environment::Production);
        assert_eq!(Environment::from_mode("Development"), Environment::Production);
        assert_eq!(Environment::from_mode("sandbox"), Environment::Production);
        assert_eq!(Environment::from_mode(""), Environment::Production);
    }
}
