//! Integration tests for notification preferences, deliveries, and the
//! admin campaign/template endpoints.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, create_user, get_auth, send_json, token_for};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Test: preference defaults and upsert
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn preferences_default_then_update(pool: PgPool) {
    let user = create_user(&pool, "prefs", "user").await;
    let token = token_for(&user, "user");
    let app = common::build_test_app(pool);

    // No explicit rows yet; the channel catalogue is still returned.
    let response = get_auth(app.clone(), "/api/v1/notifications/preferences", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["preferences"].as_array().unwrap().is_empty());
    assert!(json["data"]["channels"]
        .as_array()
        .unwrap()
        .iter()
        .any(|c| c == "email"));

    // Disable SMS.
    let response = send_json(
        app.clone(),
        Method::PUT,
        "/api/v1/notifications/preferences",
        Some(&token),
        serde_json::json!({"channel": "sms", "enabled": false}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["channel"], "sms");
    assert_eq!(json["data"]["enabled"], false);

    // Unknown channels fail validation.
    let response = send_json(
        app,
        Method::PUT,
        "/api/v1/notifications/preferences",
        Some(&token),
        serde_json::json!({"channel": "pigeon", "enabled": true}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: delivery history starts empty
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn delivery_history_starts_empty(pool: PgPool) {
    let user = create_user(&pool, "quiet", "user").await;
    let token = token_for(&user, "user");
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/notifications/deliveries", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Test: campaign endpoints are admin-only
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn campaigns_require_admin(pool: PgPool) {
    let user = create_user(&pool, "plain", "user").await;
    let token = token_for(&user, "user");
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/admin/campaigns", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Test: campaign CRUD round trip as admin
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn campaign_crud_as_admin(pool: PgPool) {
    let admin = create_user(&pool, "boss", "admin").await;
    let token = token_for(&admin, "admin");
    let app = common::build_test_app(pool);

    // Create.
    let response = send_json(
        app.clone(),
        Method::POST,
        "/api/v1/admin/campaigns",
        Some(&token),
        serde_json::json!({
            "domain": "story",
            "event_type": "shared",
            "channels": ["email", "in_app"],
            "template_key": "story_shared",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let campaign_id = json["data"]["id"].as_i64().unwrap();
    assert_eq!(json["data"]["enabled"], true);

    // Unknown channels are rejected.
    let response = send_json(
        app.clone(),
        Method::POST,
        "/api/v1/admin/campaigns",
        Some(&token),
        serde_json::json!({
            "domain": "story",
            "event_type": "other",
            "channels": ["carrier_pigeon"],
            "template_key": "nope",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Disable via update.
    let response = send_json(
        app.clone(),
        Method::PUT,
        &format!("/api/v1/admin/campaigns/{campaign_id}"),
        Some(&token),
        serde_json::json!({"enabled": false}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["enabled"], false);

    // Delete.
    let response = send_json(
        app.clone(),
        Method::DELETE,
        &format!("/api/v1/admin/campaigns/{campaign_id}"),
        Some(&token),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app, &format!("/api/v1/admin/campaigns/{campaign_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: template creation echoes its placeholders
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn template_create_reports_placeholders(pool: PgPool) {
    let admin = create_user(&pool, "templater", "admin").await;
    let token = token_for(&admin, "admin");
    let app = common::build_test_app(pool);

    let response = send_json(
        app,
        Method::POST,
        "/api/v1/admin/templates",
        Some(&token),
        serde_json::json!({
            "template_key": "story_shared",
            "channel": "email",
            "subject": "{{actor_name}} shared a story",
            "body": "{{actor_name}} shared \"{{story_title}}\" with you.",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["template"]["locale"], "en");
    assert_eq!(
        json["data"]["placeholders"],
        serde_json::json!(["actor_name", "story_title"])
    );
}
