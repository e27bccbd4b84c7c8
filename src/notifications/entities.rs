use std::fmt;

use serde::Serialize;

/// Alert shown to the user, with exactly a title and a body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub title: String,
    pub body: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Aps {
    pub alert: Alert,
}

/// JSON body of an alert notification: `{"aps":{"alert":{"title":..,"body":..}}}`
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AlertPayload {
    pub aps: Aps,
}

impl AlertPayload {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            aps: Aps {
                alert: Alert {
                    title: title.into(),
                    body: body.into(),
                },
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    /// Hex encoded device token, forwarded to APNs unchecked
    pub device_token: String,
    /// Typically the bundle ID of the app
    pub topic: String,
    pub payload: AlertPayload,
}

/// Status and reason as reported by APNs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PushResponse {
    pub status: u16,
    pub reason: String,
}

impl fmt::Display for PushResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: '{}'", self.status, self.reason)
    }
}
