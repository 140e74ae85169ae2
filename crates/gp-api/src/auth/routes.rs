use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use axum_extra::extract::PrivateCookieJar;
use serde::Deserialize;

use gp_db::repositories::users;

use super::{jwt, middleware::AuthUser, validation};
use crate::{ApiState, error::ApiError, middleware::rate_limit};

pub fn routes() -> Router<ApiState> {
    use crate::make_rate_limit_layer;

    // Credential endpoints with strict rate limiting
    let credential_routes = Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/signin", post(signin))
        .layer(make_rate_limit_layer!(
            rate_limit::SENSITIVE_RATE_PER_SECOND,
            rate_limit::SENSITIVE_BURST_SIZE
        ));

    // Session endpoints with general rate limiting
    let session_routes = Router::new()
        .route("/auth/signout", post(signout))
        .route("/auth/update-password", post(update_password))
        .route("/auth/me", get(me))
        .layer(make_rate_limit_layer!(
            rate_limit::GENERAL_RATE_PER_SECOND,
            rate_limit::GENERAL_BURST_SIZE
        ));

    Router::new().merge(credential_routes).merge(session_routes)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignupRequest {
    email: Option<String>,
    password: Option<String>,
    account_type: Option<String>,
}

async fn signup(
    State(state): State<ApiState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let email = payload
        .email
        .ok_or_else(|| ApiError::Validation("Email is required".to_string()))?;
    let password = payload
        .password
        .ok_or_else(|| ApiError::Validation("Password is required".to_string()))?;
    let account_type = payload
        .account_type
        .ok_or_else(|| ApiError::Validation("Account type is required".to_string()))?;

    validation::validate_email(&email)?;
    validation::validate_password(&password)?;
    validation::validate_account_type(&account_type)?;

    if users::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(ApiError::Conflict("User already exists".to_string()));
    }

    let password_hash = bcrypt::hash(&password, state.bcrypt_cost)?;

    match users::create(&state.pool, &email, &password_hash, &account_type).await {
        Ok(user_id) => {
            tracing::info!(%user_id, %account_type, "account created");
            Ok((
                StatusCode::CREATED,
                Json(serde_json::json!({ "message": "User created!" })),
            ))
        }
        // Concurrent signup with the same email loses the race on the
        // unique index; report it like the pre-check would have.
        Err(sqlx::Error::Database(db_err)) if db_err.constraint() == Some("uq_users_email") => {
            Err(ApiError::Conflict("User already exists".to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SigninRequest {
    email: Option<String>,
    password: Option<String>,
    account_type: Option<String>,
}

async fn signin(
    State(state): State<ApiState>,
    jar: PrivateCookieJar,
    Json(payload): Json<SigninRequest>,
) -> Result<(PrivateCookieJar, Json<serde_json::Value>), ApiError> {
    let email = payload
        .email
        .ok_or_else(|| ApiError::Validation("Email is required".to_string()))?;
    let password = payload
        .password
        .ok_or_else(|| ApiError::Validation("Password is required".to_string()))?;
    let account_type = payload
        .account_type
        .ok_or_else(|| ApiError::Validation("Account type is required".to_string()))?;

    let user = users::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| ApiError::Auth("Invalid email or password".to_string()))?;

    if !bcrypt::verify(&password, &user.password_hash)? {
        return Err(ApiError::Auth("Invalid email or password".to_string()));
    }

    if user.account_type != account_type {
        return Err(ApiError::Auth(
            "Invalid account type for this user".to_string(),
        ));
    }

    users::touch_last_login(&state.pool, user.id).await?;

    let token = jwt::generate_jwt_token(
        user.id,
        user.email.clone(),
        user.account_type.clone(),
        &state.jwt_secret,
        state.jwt_expiry_hours,
    )?;
    let cookie = jwt::create_auth_cookie(token, &state.environment, state.jwt_expiry_hours);
    let jar = jar.add(cookie);

    Ok((
        jar,
        Json(serde_json::json!({
            "message": "Successfully signed in",
            "user": user,
        })),
    ))
}

async fn signout(jar: PrivateCookieJar) -> (PrivateCookieJar, Json<serde_json::Value>) {
    let jar = jar.remove(jwt::clear_auth_cookie());

    (
        jar,
        Json(serde_json::json!({ "message": "Successfully signed out" })),
    )
}

#[derive(Debug, Deserialize)]
struct UpdatePasswordRequest {
    password: Option<String>,
}

async fn update_password(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Json(payload): Json<UpdatePasswordRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let password = payload
        .password
        .ok_or_else(|| ApiError::Validation("Password is required".to_string()))?;
    validation::validate_password(&password)?;

    let password_hash = bcrypt::hash(&password, state.bcrypt_cost)?;
    let updated = users::update_password(&state.pool, auth_user.user_id, &password_hash).await?;

    if updated == 0 {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    Ok(Json(serde_json::json!({
        "message": "Password updated successfully"
    })))
}

async fn me(
    auth_user: AuthUser,
    State(state): State<ApiState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let user = users::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| ApiError::Auth("User not found".to_string()))?;

    Ok(Json(serde_json::json!({ "user": user })))
}
