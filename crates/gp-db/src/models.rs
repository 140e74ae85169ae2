use chrono::{DateTime, Utc};
use gp_stats::GameStats;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

/// Account model - parents, institutions and students share one table,
/// discriminated by `account_type`
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique account identifier
    pub id: Uuid,
    /// Sign-in email, unique across all account types
    pub email: String,
    /// bcrypt hash, never serialized into responses
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// One of "parent", "institution", "student"
    pub account_type: String,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Game model - materialized from the static catalog on first access,
/// keyed by (grade, game_id)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    /// Surrogate key used by foreign keys
    pub id: i64,
    /// School-year label, part of the natural key (e.g. "K", "1st")
    pub grade: String,
    /// Catalog-assigned numeric id, part of the natural key
    pub game_id: i32,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    /// External embed link the frontend loads in an iframe
    pub play_url: String,
    pub likes: i32,
    pub dislikes: i32,
    pub total_plays: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single user's like/dislike vote on a game.
/// At most one row per (game_id, user_id).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GameRating {
    pub id: i64,
    pub game_id: i64,
    pub user_id: Uuid,
    /// "like" or "dislike"
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment on a game, joined with the author's email for display.
/// Append-only; never edited or deleted by users.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub game_id: i64,
    pub user_id: Uuid,
    pub author_email: String,
    pub grade: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Student model - owned by a parent/institution account, carrying the
/// cached `game_stats` aggregate
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: Uuid,
    /// Owning parent/institution account
    #[serde(skip_serializing)]
    pub parent_id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub age: i32,
    pub grade: String,
    /// Cached aggregate, folded forward on every tracked session
    pub game_stats: Json<GameStats>,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

/// One recorded instance of a student playing a game. Immutable after
/// insertion; high-volume table optimized for fast inserts.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GameSession {
    pub id: i64,
    pub student_id: Uuid,
    pub grade: String,
    pub game_id: i32,
    pub game_title: String,
    /// Skill category the game exercises (e.g. "math", "logic")
    pub game_type: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    /// Derived duration, rounded to whole minutes
    pub play_time_minutes: i32,
    pub score: f64,
    pub skills_gained: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert struct for `GameSession`
#[derive(Debug, Clone)]
pub struct NewGameSession<'a> {
    pub student_id: Uuid,
    pub grade: &'a str,
    pub game_id: i32,
    pub game_title: &'a str,
    pub game_type: &'a str,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub play_time_minutes: i32,
    pub score: f64,
    pub skills_gained: &'a [String],
}

/// Insert struct for `Game`, carrying catalog metadata plus the backfilled
/// play count
#[derive(Debug, Clone)]
pub struct NewGame<'a> {
    pub grade: &'a str,
    pub game_id: i32,
    pub title: &'a str,
    pub description: &'a str,
    pub thumbnail_url: &'a str,
    pub play_url: &'a str,
    pub total_plays: i64,
}
