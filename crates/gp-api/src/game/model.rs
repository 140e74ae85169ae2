use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gp_db::models::{Comment, Game};

/// Response for `GET /games/{grade}/{id}`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDetailResponse {
    pub game: Game,
    pub total_plays: i64,
    pub user_rating: Option<String>,
}

/// Response for `POST /games/{grade}/{id}/play`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayResponse {
    pub game: Game,
    pub total_plays: i64,
}

/// Response for `POST /games/{grade}/{id}/rate`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateResponse {
    pub likes: i32,
    pub dislikes: i32,
    pub user_rating: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateRequest {
    pub action: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameQuery {
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub comment: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CommentListResponse {
    pub comments: Vec<Comment>,
}
