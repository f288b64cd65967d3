//! Integration tests for provider endpoints and unconfigured-vendor
//! behaviour (the test app carries no vendor credentials).

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, create_user, get_auth, send_json, token_for};
use sqlx::PgPool;
use storyweave_db::repositories::VideoJobRepo;

// ---------------------------------------------------------------------------
// Test: provider listing is empty without credentials
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn provider_listing_reflects_registry(pool: PgPool) {
    let user = create_user(&pool, "viewer", "user").await;
    let token = token_for(&user, "user");
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/providers/video", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Test: switching the active provider is admin-only
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn provider_switch_requires_admin(pool: PgPool) {
    let user = create_user(&pool, "pleb", "user").await;
    let admin = create_user(&pool, "root", "admin").await;
    let user_token = token_for(&user, "user");
    let admin_token = token_for(&admin, "admin");
    let app = common::build_test_app(pool);

    let response = send_json(
        app.clone(),
        Method::POST,
        "/api/v1/providers/video/active",
        Some(&user_token),
        serde_json::json!({"name": "kling"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Admin passes the role check but the name is unknown in an empty
    // registry.
    let response = send_json(
        app,
        Method::POST,
        "/api/v1/providers/video/active",
        Some(&admin_token),
        serde_json::json!({"name": "kling"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: render submission with no vendors fails the job row and returns 502
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn video_submission_without_vendors_fails_job_row(pool: PgPool) {
    let user = create_user(&pool, "director", "user").await;
    let token = token_for(&user, "user");
    let app = common::build_test_app(pool.clone());

    let response = send_json(
        app.clone(),
        Method::POST,
        "/api/v1/stories",
        Some(&token),
        serde_json::json!({"title": "Storm", "body": "The sea rose."}),
    )
    .await;
    let story_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = send_json(
        app.clone(),
        Method::POST,
        &format!("/api/v1/stories/{story_id}/videos"),
        Some(&token),
        serde_json::json!({"prompt": "a storm at sea"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "PROVIDER_ERROR");

    // The job row was inserted and then marked failed.
    let jobs = VideoJobRepo::list_for_story(&pool, story_id).await.unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].status, "failed");
    assert!(jobs[0].failure_reason.is_some());
}

// ---------------------------------------------------------------------------
// Test: analysis and narration report the missing vendor as 503
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn unconfigured_vendors_return_503(pool: PgPool) {
    let user = create_user(&pool, "narrator", "user").await;
    let token = token_for(&user, "user");
    let app = common::build_test_app(pool);

    let response = send_json(
        app.clone(),
        Method::POST,
        "/api/v1/stories",
        Some(&token),
        serde_json::json!({"title": "Quiet", "body": "No vendors today."}),
    )
    .await;
    let story_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = send_json(
        app.clone(),
        Method::POST,
        &format!("/api/v1/stories/{story_id}/analyze"),
        Some(&token),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json["code"], "PROVIDER_NOT_CONFIGURED");

    let response = send_json(
        app,
        Method::POST,
        &format!("/api/v1/stories/{story_id}/narrate"),
        Some(&token),
        serde_json::json!({"voice_id": "stock-1"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

// ---------------------------------------------------------------------------
// Test: the ESM prompt catalogue is served
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn esm_prompts_are_served(pool: PgPool) {
    let user = create_user(&pool, "recorder", "user").await;
    let token = token_for(&user, "user");
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/voice-profiles/esm-prompts", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    let prompts = json["data"]["prompts"].as_array().unwrap();
    assert!(prompts.len() >= 3);
    assert!(prompts.iter().any(|p| p["emotion"] == "whisper"));
    assert!(json["data"]["min_samples"].as_u64().unwrap() >= 3);
}
