use std::env;

/// Deployment environment, switching log format and cookie security.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn from_env() -> Self {
        match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Self::Production,
            _ => Self::Development,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub jwt_secret: String,
    pub cookie_secret: String,
    pub allowed_origins: Vec<String>,
    pub env: Environment,
    pub jwt_expiry_hours: i64,
    pub bcrypt_cost: u32,
    pub max_db_connections: u32,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, env::VarError> {
        // TODO: proper message error for cookie_secret too short
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            jwt_secret: env::var("JWT_SECRET")?,
            cookie_secret: env::var("COOKIE_SECRET")?,
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:8080".to_string())
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
            env: Environment::from_env(),
            jwt_expiry_hours: parse_or(env::var("JWT_EXPIRY_HOURS").ok(), 24),
            bcrypt_cost: parse_or(env::var("BCRYPT_COST").ok(), bcrypt::DEFAULT_COST),
            max_db_connections: parse_or(env::var("MAX_DB_CONNECTIONS").ok(), 10),
        })
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}
