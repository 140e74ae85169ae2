use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{config::Environment, error::ApiError};

/// Name of the session cookie holding the JWT.
pub const AUTH_COOKIE: &str = "auth_token";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id as string
    pub email: String,
    pub account_type: String,
    pub exp: usize,
    pub iat: usize,
}

/// Generate a JWT session token for an account
pub fn generate_jwt_token(
    user_id: Uuid,
    email: String,
    account_type: String,
    jwt_secret: &str,
    expiry_hours: i64,
) -> Result<String, ApiError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        email,
        account_type,
        iat: now.timestamp() as usize,
        exp: (now + chrono::Duration::hours(expiry_hours)).timestamp() as usize,
    };

    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )?;

    Ok(token)
}

/// Verify and decode a JWT session token
pub fn verify_jwt_token(token: &str, jwt_secret: &str) -> Result<Claims, ApiError> {
    let token_data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| ApiError::Auth("Invalid or expired token".to_string()))?;

    Ok(token_data.claims)
}

/// Create the session cookie carrying the JWT
///
/// Cookies are secure (HTTPS-only) by default in production.
/// In development mode, cookies can be used over HTTP.
pub fn create_auth_cookie(
    token: String,
    environment: &Environment,
    expiry_hours: i64,
) -> Cookie<'static> {
    let is_development = environment.is_development();

    Cookie::build((AUTH_COOKIE, token))
        .path("/")
        .max_age(time::Duration::hours(expiry_hours))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(!is_development)
        .build()
}

/// Cookie that clears the session on sign-out
pub fn clear_auth_cookie() -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, "")).path("/").build()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test_jwt_secret_minimum_32_characters_long";

    #[test]
    fn test_generate_and_verify_jwt_token() {
        let user_id = Uuid::new_v4();

        let token = generate_jwt_token(
            user_id,
            "parent@example.com".to_string(),
            "parent".to_string(),
            SECRET,
            24,
        )
        .expect("Failed to generate token");

        assert!(!token.is_empty());

        let claims = verify_jwt_token(&token, SECRET).expect("Failed to verify token");

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "parent@example.com");
        assert_eq!(claims.account_type, "parent");
        assert!(claims.exp > claims.iat);
        // Expiry tracks the configured hour count
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_verify_jwt_token_with_wrong_secret() {
        let token = generate_jwt_token(
            Uuid::new_v4(),
            "parent@example.com".to_string(),
            "parent".to_string(),
            SECRET,
            24,
        )
        .expect("Failed to generate token");

        let result = verify_jwt_token(&token, "wrong_jwt_secret_minimum_32_characters");
        match result {
            Err(ApiError::Auth(msg)) => assert!(msg.contains("Invalid or expired token")),
            _ => panic!("Expected Auth error"),
        }
    }

    #[test]
    fn test_verify_invalid_jwt_token() {
        let result = verify_jwt_token("invalid.jwt.token", SECRET);
        assert!(result.is_err());
    }

    #[test]
    fn test_auth_cookie_security_flags() {
        let dev_cookie = create_auth_cookie("t".to_string(), &Environment::Development, 24);
        assert_eq!(dev_cookie.name(), AUTH_COOKIE);
        assert!(dev_cookie.http_only().unwrap_or(false));
        assert!(!dev_cookie.secure().unwrap_or(true));

        let prod_cookie = create_auth_cookie("t".to_string(), &Environment::Production, 24);
        assert!(prod_cookie.secure().unwrap_or(false));
    }
}
