use tracing::{info, instrument};

use crate::notifications::entities::{AlertPayload, Notification, PushResponse};
use crate::notifications::gateway::{NotificationError, NotificationGateway};

pub struct NotificationService<G: NotificationGateway> {
    notification_gateway: G,
}

impl<G: NotificationGateway> NotificationService<G> {
    pub fn new(notification_gateway: G) -> Self {
        Self {
            notification_gateway,
        }
    }

    /// Sends one alert to one device. Nothing is retried.
    #[instrument(skip(self, payload))]
    pub async fn send_alert(
        &self,
        device_token: &str,
        topic: &str,
        payload: AlertPayload,
    ) -> Result<PushResponse, NotificationError> {
        let notification = Notification {
            device_token: device_token.to_string(),
            topic: topic.to_string(),
            payload,
        };

        let response = self.notification_gateway.push(&notification).await?;
        info!(status = response.status, reason = %response.reason, "notification sent");

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::gateway::MockNotificationGateway;

    #[tokio::test]
    async fn test_send_alert_success() {
        let mut mock_gateway = MockNotificationGateway::new();
        mock_gateway
            .expect_push()
            .once()
            .withf(|notification| {
                notification.device_token == "abcdef"
                    && notification.topic == "com.example.app"
                    && notification.payload == AlertPayload::new("Hello", "World")
            })
            .returning(|_| {
                Ok(PushResponse {
                    status: 200,
                    reason: "Success".to_string(),
                })
            });

        let service = NotificationService::new(mock_gateway);
        let response = service
            .send_alert("abcdef", "com.example.app", AlertPayload::new("Hello", "World"))
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.reason, "Success");
    }

    #[tokio::test]
    async fn test_send_alert_passes_rejection_through() {
        let mut mock_gateway = MockNotificationGateway::new();
        mock_gateway.expect_push().once().returning(|_| {
            Ok(PushResponse {
                status: 410,
                reason: "Unregistered".to_string(),
            })
        });

        let service = NotificationService::new(mock_gateway);
        let response = service
            .send_alert("abcdef", "com.example.app", AlertPayload::new("t", "b"))
            .await
            .unwrap();

        assert_eq!(response.to_string(), "410: 'Unregistered'");
    }

    #[tokio::test]
    async fn test_send_alert_gateway_error() {
        let mut mock_gateway = MockNotificationGateway::new();
        mock_gateway
            .expect_push()
            .once()
            .returning(|_| Err(NotificationError::SendFailure("Network error".to_string())));

        let service = NotificationService::new(mock_gateway);
        let result = service
            .send_alert("abcdef", "com.example.app", AlertPayload::new("t", "b"))
            .await;

        assert!(matches!(result, Err(NotificationError::SendFailure(_))));
    }
}
