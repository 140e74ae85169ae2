use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};

use gp_db::repositories::{comments, games, ratings, users};

use super::{
    model::{
        CommentListResponse, CommentRequest, GameDetailResponse, GameQuery, PlayResponse,
        RateRequest, RateResponse,
    },
    rating::{RatingAction, RatingValue, VoteWrite, plan_vote},
    service,
};
use crate::{
    ApiState, auth::AuthUser, catalog, error::ApiError, middleware::rate_limit, validation,
};

pub fn routes() -> Router<ApiState> {
    use crate::make_rate_limit_layer;

    // The play counter gets its own strict limiter so a looping client
    // cannot inflate totals.
    let play_routes = Router::new()
        .route("/games/{grade}/{id}/play", post(increment_play))
        .layer(make_rate_limit_layer!(
            rate_limit::PLAY_RATE_PER_SECOND,
            rate_limit::PLAY_BURST_SIZE
        ));

    Router::new()
        .route("/games/init", post(init_games))
        .route("/games/{grade}", get(list_grade_games))
        .route("/games/{grade}/{id}", get(get_game))
        .route("/games/{grade}/{id}/rate", post(rate_game))
        .route("/games/{grade}/{id}/rating", get(my_rating))
        .route(
            "/games/{grade}/{id}/comments",
            get(list_comments).post(post_comment),
        )
        .merge(play_routes)
}

/// Catalog slice for one grade. Served straight from the static catalog;
/// games are only materialized into the database when opened.
async fn list_grade_games(
    Path(grade): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    validation::validate_grade(&grade)?;

    Ok(Json(serde_json::json!({
        "games": catalog::for_grade(&grade)
    })))
}

async fn get_game(
    State(state): State<ApiState>,
    Path((grade, id)): Path<(String, i32)>,
    Query(query): Query<GameQuery>,
) -> Result<Json<GameDetailResponse>, ApiError> {
    validation::validate_grade(&grade)?;

    let mut conn = state.pool.acquire().await?;
    let game = service::ensure_game(&mut conn, &grade, id).await?;

    let user_rating = match query.user_id {
        Some(user_id) => ratings::find(&mut *conn, game.id, user_id)
            .await?
            .map(|rating| rating.value),
        None => None,
    };

    Ok(Json(GameDetailResponse {
        total_plays: game.total_plays,
        user_rating,
        game,
    }))
}

async fn increment_play(
    State(state): State<ApiState>,
    Path((grade, id)): Path<(String, i32)>,
) -> Result<Json<PlayResponse>, ApiError> {
    validation::validate_grade(&grade)?;

    let mut conn = state.pool.acquire().await?;
    let game = service::ensure_game(&mut conn, &grade, id).await?;

    let game = games::increment_plays(&mut *conn, game.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Game not found".to_string()))?;

    Ok(Json(PlayResponse {
        total_plays: game.total_plays,
        game,
    }))
}

async fn rate_game(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path((grade, id)): Path<(String, i32)>,
    Json(payload): Json<RateRequest>,
) -> Result<Json<RateResponse>, ApiError> {
    validation::validate_grade(&grade)?;
    let action = RatingAction::parse(payload.action.as_deref().unwrap_or_default())?;

    // The vote, the counter adjustment and the game materialization commit
    // or roll back together.
    let mut tx = state.pool.begin().await?;

    // The session cookie may outlive the account
    let user = users::find_by_id(&mut *tx, auth_user.user_id)
        .await?
        .ok_or_else(|| ApiError::Auth("User not found".to_string()))?;

    let game = service::ensure_game(&mut tx, &grade, id).await?;

    let existing = ratings::find(&mut *tx, game.id, user.id)
        .await?
        .and_then(|rating| RatingValue::parse(&rating.value));

    let plan = plan_vote(existing, action);

    match plan.write {
        VoteWrite::Upsert(value) => {
            ratings::upsert(&mut *tx, game.id, user.id, value.as_str()).await?;
        }
        VoteWrite::Delete => {
            ratings::delete(&mut *tx, game.id, user.id).await?;
        }
        VoteWrite::Keep => {}
    }

    let game = if plan.is_noop() {
        game
    } else {
        games::adjust_rating_counters(&mut *tx, game.id, plan.likes_delta, plan.dislikes_delta)
            .await?
            .ok_or_else(|| ApiError::NotFound("Game not found".to_string()))?
    };

    tx.commit().await?;

    Ok(Json(RateResponse {
        likes: game.likes,
        dislikes: game.dislikes,
        user_rating: plan.resulting_vote(existing).map(|v| v.as_str().to_string()),
    }))
}

/// The authenticated user's current vote on a game.
async fn my_rating(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path((grade, id)): Path<(String, i32)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    validation::validate_grade(&grade)?;

    let mut conn = state.pool.acquire().await?;
    let game = service::ensure_game(&mut conn, &grade, id).await?;

    let rating = ratings::find(&mut *conn, game.id, auth_user.user_id)
        .await?
        .map(|rating| rating.value);

    Ok(Json(serde_json::json!({ "rating": rating })))
}

async fn post_comment(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path((grade, id)): Path<(String, i32)>,
    Json(payload): Json<CommentRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    validation::validate_grade(&grade)?;
    let body = payload
        .comment
        .ok_or_else(|| ApiError::Validation("Comment is required".to_string()))?;
    validation::validate_comment(&body)?;

    let mut tx = state.pool.begin().await?;
    let game = service::ensure_game(&mut tx, &grade, id).await?;
    comments::insert(&mut *tx, game.id, auth_user.user_id, &grade, body.trim()).await?;
    tx.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "message": "Comment added!" })),
    ))
}

/// Comments for a game, newest first.
async fn list_comments(
    State(state): State<ApiState>,
    Path((grade, id)): Path<(String, i32)>,
) -> Result<Json<CommentListResponse>, ApiError> {
    validation::validate_grade(&grade)?;

    let mut conn = state.pool.acquire().await?;
    let game = service::ensure_game(&mut conn, &grade, id).await?;
    let comments = comments::list_for_game(&mut *conn, game.id).await?;

    Ok(Json(CommentListResponse { comments }))
}

/// Bulk-seed the whole catalog with zeroed counters.
async fn init_games(State(state): State<ApiState>) -> Result<Json<serde_json::Value>, ApiError> {
    let count = service::seed_catalog(&state.pool).await?;

    Ok(Json(serde_json::json!({
        "message": "Games initialized successfully",
        "count": count,
    })))
}
