// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Demonstration push notifications.
//!
//! Holds a single process-wide subscription in memory (not per user, not
//! persisted). Notifications are delivered as a plain JSON POST to the
//! subscription endpoint; payload encryption is not implemented.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use validator::Validate;

use crate::error::AppError;

/// Seconds the push service should keep an undelivered message.
const NOTIFICATION_TTL_SECS: u32 = 24 * 60 * 60;

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PushSubscriptionKeys {
    #[validate(length(min = 1, message = "p256dh key is required"))]
    pub p256dh: String,
    #[validate(length(min = 1, message = "auth key is required"))]
    pub auth: String,
}

/// Browser push subscription as produced by the Push API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PushSubscription {
    #[validate(url(message = "Endpoint must be a valid URL"))]
    pub endpoint: String,
    #[validate(nested)]
    pub keys: PushSubscriptionKeys,
}

#[derive(Debug, Serialize)]
struct NotificationPayload<'a> {
    title: &'a str,
    body: &'a str,
    icon: &'a str,
}

pub struct PushService {
    http: reqwest::Client,
    vapid_public_key: Option<String>,
    subscription: RwLock<Option<PushSubscription>>,
}

impl PushService {
    pub fn new(vapid_public_key: Option<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(HTTP_TIMEOUT).build()?;
        Ok(Self {
            http,
            vapid_public_key,
            subscription: RwLock::new(None),
        })
    }

    pub fn vapid_public_key(&self) -> Option<&str> {
        self.vapid_public_key.as_deref()
    }

    /// Replace the stored subscription.
    pub async fn subscribe(&self, subscription: PushSubscription) -> Result<(), AppError> {
        subscription.validate()?;
        tracing::info!(endpoint = %subscription.endpoint, "Push subscription stored");
        *self.subscription.write().await = Some(subscription);
        Ok(())
    }

    pub async fn unsubscribe(&self) {
        if self.subscription.write().await.take().is_some() {
            tracing::info!("Push subscription removed");
        }
    }

    pub async fn is_subscribed(&self) -> bool {
        self.subscription.read().await.is_some()
    }

    /// Send a test notification with `message` as its body.
    pub async fn send(&self, message: &str) -> Result<(), AppError> {
        let subscription = self
            .subscription
            .read()
            .await
            .clone()
            .ok_or_else(|| AppError::BadRequest("No subscription available".to_string()))?;

        let payload = NotificationPayload {
            title: "Test Notification",
            body: message,
            icon: "/icon.png",
        };

        let response = self
            .http
            .post(&subscription.endpoint)
            .header("TTL", NOTIFICATION_TTL_SECS.to_string())
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::PushDelivery(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::PushDelivery(format!("HTTP {}: {}", status, body)));
        }

        tracing::debug!(status = %status, "Push notification delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn subscription(endpoint: String) -> PushSubscription {
        PushSubscription {
            endpoint,
            keys: PushSubscriptionKeys {
                p256dh: "BNcRdreALRFXTkOOUHK1EtK2wtaz5Ry4YfYCA_0QTpQtUbVlUls0VJXg7A8u-Ts1XbjhazAkj7I99e8QcYP7DkM".to_string(),
                auth: "tBHItJI5svbpez7KI4CCXg".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_send_without_subscription_fails() {
        let service = PushService::new(None).unwrap();
        let err = service.send("hello").await.unwrap_err();
        match err {
            AppError::BadRequest(msg) => assert_eq!(msg, "No subscription available"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_send_posts_payload_with_ttl() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/push/abc")
            .match_header("ttl", NOTIFICATION_TTL_SECS.to_string().as_str())
            .match_body(Matcher::Json(serde_json::json!({
                "title": "Test Notification",
                "body": "Rest is over",
                "icon": "/icon.png",
            })))
            .with_status(201)
            .create_async()
            .await;

        let service = PushService::new(Some("pub".to_string())).unwrap();
        service
            .subscribe(subscription(format!("{}/push/abc", server.url())))
            .await
            .unwrap();
        assert!(service.is_subscribed().await);

        service.send("Rest is over").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_rejected_delivery_is_gateway_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/gone")
            .with_status(410)
            .with_body("subscription expired")
            .create_async()
            .await;

        let service = PushService::new(None).unwrap();
        service
            .subscribe(subscription(format!("{}/gone", server.url())))
            .await
            .unwrap();

        let err = service.send("hi").await.unwrap_err();
        assert!(matches!(err, AppError::PushDelivery(ref msg) if msg.contains("410")));
    }

    #[tokio::test]
    async fn test_unsubscribe_and_invalid_subscription() {
        let service = PushService::new(None).unwrap();
        let err = service
            .subscribe(subscription("not a url".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        service
            .subscribe(subscription("https://push.example.com/x".to_string()))
            .await
            .unwrap();
        service.unsubscribe().await;
        assert!(!service.is_subscribed().await);
    }
}
