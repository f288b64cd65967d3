//! Integration tests for registration, login, refresh, and logout.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, send_json};
use sqlx::PgPool;

fn register_body(username: &str) -> serde_json::Value {
    serde_json::json!({
        "username": username,
        "email": format!("{username}@example.com"),
        "password": "correct horse battery staple",
    })
}

// ---------------------------------------------------------------------------
// Test: register then login yields a usable token pair
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn register_and_login(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = send_json(
        app.clone(),
        Method::POST,
        "/api/v1/auth/register",
        None,
        register_body("ada"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["username"], "ada");

    let response = send_json(
        app.clone(),
        Method::POST,
        "/api/v1/auth/login",
        None,
        serde_json::json!({"username": "ada", "password": "correct horse battery staple"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let access = json["data"]["access_token"].as_str().unwrap();
    assert!(!access.is_empty());

    // The access token authenticates API calls.
    let response = common::get_auth(app, "/api/v1/stories", access).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Test: wrong password is rejected with 401
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn login_rejects_wrong_password(pool: PgPool) {
    let app = common::build_test_app(pool);

    send_json(
        app.clone(),
        Method::POST,
        "/api/v1/auth/register",
        None,
        register_body("finn"),
    )
    .await;

    let response = send_json(
        app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        serde_json::json!({"username": "finn", "password": "not the password"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

// ---------------------------------------------------------------------------
// Test: short passwords fail validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn register_rejects_short_password(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = send_json(
        app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        serde_json::json!({
            "username": "shorty",
            "email": "shorty@example.com",
            "password": "short",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: duplicate username maps to 409 via the uq_ constraint
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn register_duplicate_username_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool);

    let first = send_json(
        app.clone(),
        Method::POST,
        "/api/v1/auth/register",
        None,
        register_body("duplicate"),
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = send_json(
        app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        register_body("duplicate"),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Test: refresh rotates the token; the old one stops working
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn refresh_rotates_tokens(pool: PgPool) {
    let app = common::build_test_app(pool);

    send_json(
        app.clone(),
        Method::POST,
        "/api/v1/auth/register",
        None,
        register_body("rotator"),
    )
    .await;

    let login = send_json(
        app.clone(),
        Method::POST,
        "/api/v1/auth/login",
        None,
        serde_json::json!({"username": "rotator", "password": "correct horse battery staple"}),
    )
    .await;
    let json = body_json(login).await;
    let refresh_token = json["data"]["refresh_token"].as_str().unwrap().to_string();

    // First refresh succeeds.
    let refreshed = send_json(
        app.clone(),
        Method::POST,
        "/api/v1/auth/refresh",
        None,
        serde_json::json!({"refresh_token": refresh_token}),
    )
    .await;
    assert_eq!(refreshed.status(), StatusCode::OK);

    // The presented token was revoked by rotation; replay fails.
    let replay = send_json(
        app,
        Method::POST,
        "/api/v1/auth/refresh",
        None,
        serde_json::json!({"refresh_token": refresh_token}),
    )
    .await;
    assert_eq!(replay.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Test: logout revokes the refresh token
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn logout_revokes_session(pool: PgPool) {
    let app = common::build_test_app(pool);

    send_json(
        app.clone(),
        Method::POST,
        "/api/v1/auth/register",
        None,
        register_body("leaver"),
    )
    .await;

    let login = send_json(
        app.clone(),
        Method::POST,
        "/api/v1/auth/login",
        None,
        serde_json::json!({"username": "leaver", "password": "correct horse battery staple"}),
    )
    .await;
    let json = body_json(login).await;
    let refresh_token = json["data"]["refresh_token"].as_str().unwrap().to_string();

    let logout = send_json(
        app.clone(),
        Method::POST,
        "/api/v1/auth/logout",
        None,
        serde_json::json!({"refresh_token": refresh_token}),
    )
    .await;
    assert_eq!(logout.status(), StatusCode::NO_CONTENT);

    let refresh = send_json(
        app,
        Method::POST,
        "/api/v1/auth/refresh",
        None,
        serde_json::json!({"refresh_token": refresh_token}),
    )
    .await;
    assert_eq!(refresh.status(), StatusCode::UNAUTHORIZED);
}
