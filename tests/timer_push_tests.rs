// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Rest timer routes and the push notification stub.

use axum::http::StatusCode;
use mockito::Matcher;
use serde_json::json;
use uuid::Uuid;

mod common;

#[tokio::test]
async fn test_timer_lifecycle() {
    let (app, state) = common::create_test_app().await;
    let token = common::create_test_jwt(Uuid::new_v4(), &state.config.jwt_signing_key);

    let (_, body) = common::send(&app, common::request("GET", "/api/timer", &token, None)).await;
    assert_eq!(body["data"]["state"], "idle");
    assert_eq!(body["data"]["time_remaining"], 0);

    // No body: default rest period
    let (status, body) =
        common::send(&app, common::request("POST", "/api/timer/start", &token, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["state"], "running");
    assert_eq!(body["data"]["time_remaining"], 90);
    assert_eq!(body["data"]["is_running"], true);

    let (_, body) =
        common::send(&app, common::request("POST", "/api/timer/pause", &token, None)).await;
    assert_eq!(body["data"]["state"], "paused");
    assert_eq!(body["data"]["is_running"], false);

    let (_, body) =
        common::send(&app, common::request("POST", "/api/timer/resume", &token, None)).await;
    assert_eq!(body["data"]["state"], "running");

    let (_, body) = common::send(
        &app,
        common::request("POST", "/api/timer/start", &token, Some(json!({ "seconds": 30 }))),
    )
    .await;
    assert_eq!(body["data"]["time_remaining"], 30);

    let (_, body) =
        common::send(&app, common::request("POST", "/api/timer/stop", &token, None)).await;
    assert_eq!(body["data"]["state"], "idle");
    assert_eq!(body["data"]["time_remaining"], 0);
}

#[tokio::test]
async fn test_send_without_subscription() {
    let (app, state) = common::create_test_app().await;
    let token = common::create_test_jwt(Uuid::new_v4(), &state.config.jwt_signing_key);

    let (status, body) = common::send(
        &app,
        common::request("POST", "/api/push/send", &token, Some(json!({ "message": "Hi" }))),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "No subscription available");
}

#[tokio::test]
async fn test_subscribe_send_unsubscribe() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/push/abc")
        .match_header("ttl", "86400")
        .match_body(Matcher::Json(json!({
            "title": "Test Notification",
            "body": "Time for leg day",
            "icon": "/icon.png"
        })))
        .with_status(201)
        .create_async()
        .await;

    let (app, state) = common::create_test_app().await;
    let token = common::create_test_jwt(Uuid::new_v4(), &state.config.jwt_signing_key);

    let (_, body) = common::send(
        &app,
        common::request("GET", "/api/push/vapid-public-key", &token, None),
    )
    .await;
    assert_eq!(body["data"]["public_key"], "test_vapid_public_key");

    let subscription = json!({
        "endpoint": format!("{}/push/abc", server.url()),
        "keys": { "p256dh": "BNcRdreALRFXTkOOUHK1EtK2wtaz5Ry4YfYCA_0QTpQtUbVlUls0VJXg7A8u-Ts1XbjhazAkj7I99e8QcYP7DkM", "auth": "tBHItJI5svbpez7KI4CCXg" }
    });
    let (status, _) = common::send(
        &app,
        common::request("POST", "/api/push/subscribe", &token, Some(subscription)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, settings) =
        common::send(&app, common::request("GET", "/protected/settings", &token, None)).await;
    assert_eq!(settings["push_subscribed"], true);

    let (status, body) = common::send(
        &app,
        common::request(
            "POST",
            "/api/push/send",
            &token,
            Some(json!({ "message": "Time for leg day" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    mock.assert_async().await;

    common::send(
        &app,
        common::request("POST", "/api/push/unsubscribe", &token, None),
    )
    .await;
    let (_, settings) =
        common::send(&app, common::request("GET", "/protected/settings", &token, None)).await;
    assert_eq!(settings["push_subscribed"], false);
}

#[tokio::test]
async fn test_subscription_with_bad_endpoint_is_rejected() {
    let (app, state) = common::create_test_app().await;
    let token = common::create_test_jwt(Uuid::new_v4(), &state.config.jwt_signing_key);

    let (status, body) = common::send(
        &app,
        common::request(
            "POST",
            "/api/push/subscribe",
            &token,
            Some(json!({ "endpoint": "not a url", "keys": { "p256dh": "k", "auth": "a" } })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"]["endpoint"][0], "Endpoint must be a valid URL");
}
