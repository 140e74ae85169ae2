use axum::http::StatusCode;
use gp_api::router;
use serde_json::json;

use crate::common::{TestClient, auth_cookie_header, test_state, test_token};

fn client_and_state() -> (TestClient, gp_api::ApiState) {
    let state = test_state();
    let app = router::router().with_state(state.clone());
    (TestClient::new(app), state)
}

#[tokio::test]
async fn test_health_check() {
    let (client, _) = client_and_state();

    let response = client.get("/health").await;
    response.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let (client, _) = client_and_state();

    let response = client.get("/does-not-exist").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_wrong_method_returns_405() {
    let (client, _) = client_and_state();

    let response = client.get("/auth/signup").await;
    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_invalid_grade_is_rejected() {
    let (client, _) = client_and_state();

    let response = client.get("/games/purple/1").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body = response.json();
    assert!(
        body["error"].as_str().unwrap().contains("Invalid grade"),
        "unexpected error: {body}"
    );
}

#[tokio::test]
async fn test_grade_catalog_listing() {
    let (client, _) = client_and_state();

    let response = client.get("/games/K").await;
    response.assert_status(StatusCode::OK);

    let body = response.json();
    let games = body["games"].as_array().expect("games array");
    assert_eq!(games.len(), 3);
    assert!(games.iter().all(|game| game["grade"] == "K"));
    assert!(games[0]["playUrl"].as_str().unwrap().starts_with("https://"));
}

#[tokio::test]
async fn test_rate_requires_auth() {
    let (client, _) = client_and_state();

    let response = client
        .post_json("/games/K/1/rate", json!({ "action": "like" }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let body = response.json();
    assert!(body["error"].is_string(), "Should have error message");
}

#[tokio::test]
async fn test_rate_rejects_tampered_cookie() {
    let (client, _) = client_and_state();

    // Not encrypted with the server's key, so the private jar drops it
    let response = client
        .post_json_with_auth(
            "/games/K/1/rate",
            json!({ "action": "like" }),
            "auth_token=forged-token",
        )
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_rate_rejects_unknown_action() {
    let (client, state) = client_and_state();
    let cookie = auth_cookie_header(&test_token("parent"), &state.cookie_key);

    let response = client
        .post_json_with_auth("/games/K/1/rate", json!({ "action": "adore" }), &cookie)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = client
        .post_json_with_auth("/games/K/1/rate", json!({}), &cookie)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_comment_requires_auth() {
    let (client, _) = client_and_state();

    let response = client
        .post_json("/games/K/1/comments", json!({ "comment": "fun!" }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_comment_rejects_empty_body() {
    let (client, state) = client_and_state();
    let cookie = auth_cookie_header(&test_token("parent"), &state.cookie_key);

    let response = client
        .post_json_with_auth("/games/K/1/comments", json!({ "comment": "   " }), &cookie)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_me_requires_auth() {
    let (client, _) = client_and_state();

    let response = client.get("/auth/me").await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let body = response.json();
    assert!(body["error"].is_string(), "Should have error message");
}

#[tokio::test]
async fn test_signup_rejects_invalid_email() {
    let (client, _) = client_and_state();

    let response = client
        .post_json(
            "/auth/signup",
            json!({
                "email": "not-an-email",
                "password": "password123",
                "accountType": "parent"
            }),
        )
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signup_rejects_weak_password() {
    let (client, _) = client_and_state();

    let response = client
        .post_json(
            "/auth/signup",
            json!({
                "email": "parent@example.com",
                "password": "short",
                "accountType": "parent"
            }),
        )
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signup_rejects_unknown_account_type() {
    let (client, _) = client_and_state();

    let response = client
        .post_json(
            "/auth/signup",
            json!({
                "email": "parent@example.com",
                "password": "password123",
                "accountType": "admin"
            }),
        )
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signup_rejects_missing_fields() {
    let (client, _) = client_and_state();

    let response = client.post_json("/auth/signup", json!({})).await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body = response.json();
    assert_eq!(body["error"], "Email is required");
}

#[tokio::test]
async fn test_update_password_requires_strong_password() {
    let (client, state) = client_and_state();
    let cookie = auth_cookie_header(&test_token("parent"), &state.cookie_key);

    let response = client
        .post_json_with_auth(
            "/auth/update-password",
            json!({ "password": "weak" }),
            &cookie,
        )
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signout_clears_session() {
    let (client, _) = client_and_state();

    let response = client.post_json("/auth/signout", json!({})).await;
    response.assert_status(StatusCode::OK);

    let body = response.json();
    assert_eq!(body["message"], "Successfully signed out");
}

#[tokio::test]
async fn test_track_game_requires_auth() {
    let (client, _) = client_and_state();

    let response = client
        .post_json("/students/track-game", json!({}))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_track_game_rejects_missing_fields() {
    let (client, state) = client_and_state();
    let cookie = auth_cookie_header(&test_token("parent"), &state.cookie_key);

    let response = client
        .post_json_with_auth("/students/track-game", json!({}), &cookie)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body = response.json();
    assert_eq!(body["error"], "Student ID is required");
}

#[tokio::test]
async fn test_track_game_rejects_end_before_start() {
    let (client, state) = client_and_state();
    let cookie = auth_cookie_header(&test_token("parent"), &state.cookie_key);

    let response = client
        .post_json_with_auth(
            "/students/track-game",
            json!({
                "studentId": "7b3e9f0a-3f64-4cba-b7a3-d7a0ac56ab91",
                "gameId": 1,
                "grade": "K",
                "gameTitle": "Counting Critters",
                "gameType": "math",
                "startTime": "2024-03-06T15:30:00Z",
                "endTime": "2024-03-06T15:20:00Z",
                "score": 80
            }),
            &cookie,
        )
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body = response.json();
    assert_eq!(body["error"], "End time must not precede start time");
}

#[tokio::test]
async fn test_students_require_auth() {
    let (client, _) = client_and_state();

    let response = client.get("/students").await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let response = client.get("/students/stats").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_student_requires_guardian_account() {
    let (client, state) = client_and_state();

    // A student session must not be able to create students
    let cookie = auth_cookie_header(&test_token("student"), &state.cookie_key);
    let response = client
        .post_json_with_auth("/students", json!({}), &cookie)
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}
