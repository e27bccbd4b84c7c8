use a2::{
    Client, ClientConfig, Endpoint, Error as A2Error, NotificationOptions, Response,
    request::payload::PayloadLike,
};
use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, instrument};

use super::{Environment, NotificationError, NotificationGateway};
use crate::{
    certificate::Identity,
    notifications::entities::{Aps, Notification, PushResponse},
};

const SUCCESS_REASON: &str = "Success";

/// Request handed to a2. Only `aps` is serialized, so the body sent to APNs
/// is exactly the alert payload.
#[derive(Debug, Serialize)]
struct AlertRequest<'a> {
    aps: &'a Aps,
    #[serde(skip)]
    device_token: &'a str,
    #[serde(skip)]
    options: NotificationOptions<'a>,
}

impl<'a> AlertRequest<'a> {
    fn new(notification: &'a Notification) -> Self {
        AlertRequest {
            aps: &notification.payload.aps,
            device_token: &notification.device_token,
            options: NotificationOptions {
                apns_topic: Some(&notification.topic),
                ..Default::default()
            },
        }
    }
}

impl PayloadLike for AlertRequest<'_> {
    fn get_device_token(&self) -> &str {
        self.device_token
    }

    fn get_options(&self) -> &NotificationOptions<'_> {
        &self.options
    }
}

/// APNS (Apple Push Notification Service) Gateway authenticating with a
/// client certificate
pub struct ApnsNotificationGateway {
    client: Client,
}

impl ApnsNotificationGateway {
    pub fn new(identity: &Identity, environment: Environment) -> Result<Self, NotificationError> {
        let config = ClientConfig::new(environment.into());
        let client = Client::certificate_parts(
            &identity.certificate_pem,
            &identity.private_key_pem,
            config,
        )
        .map_err(|err| NotificationError::InitializationFailed(err.to_string()))?;

        debug!(?environment, "created APNS client");
        Ok(ApnsNotificationGateway { client })
    }
}

#[async_trait]
impl NotificationGateway for ApnsNotificationGateway {
    #[instrument(skip_all, fields(topic = %notification.topic))]
    async fn push(&self, notification: &Notification) -> Result<PushResponse, NotificationError> {
        let payload = AlertRequest::new(notification);

        // a2 reports APNs rejections as errors, they still carry a status and reason
        let response = match self.client.send(payload).await {
            Ok(response) => response,
            Err(A2Error::ResponseError(response)) => response,
            Err(err) => return Err(err.into()),
        };

        debug!("APNS response: {:?}", response);
        Ok(response.into())
    }
}

impl From<Environment> for Endpoint {
    fn from(environment: Environment) -> Self {
        match environment {
            Environment::Production => Endpoint::Production,
            Environment::Development => Endpoint::Sandbox,
        }
    }
}

impl From<Response> for PushResponse {
    fn from(response: Response) -> Self {
        // a non-2xx answer whose body could not be parsed has no reason
        let reason = match response.error {
            Some(body) => format!("{:?}", body.reason),
            None if (200..300).contains(&response.code) => SUCCESS_REASON.to_string(),
            None => String::new(),
        };

        PushResponse {
            status: response.code,
            reason,
        }
    }
}

impl From<A2Error> for NotificationError {
    fn from(err: A2Error) -> Self {
        NotificationError::SendFailure(format!("APNS error: {}", err))
    }
}
