use sqlx::{Executor, Postgres};

use crate::models::{GameSession, NewGameSession};

pub async fn insert<'e, E>(
    executor: E,
    session: &NewGameSession<'_>,
) -> Result<GameSession, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO game_sessions
                (student_id, grade, game_id, game_title, game_type,
                 started_at, ended_at, play_time_minutes, score, skills_gained)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, student_id, grade, game_id, game_title, game_type,
                      started_at, ended_at, play_time_minutes, score, skills_gained, created_at
        "#,
    )
    .bind(session.student_id)
    .bind(session.grade)
    .bind(session.game_id)
    .bind(session.game_title)
    .bind(session.game_type)
    .bind(session.started_at)
    .bind(session.ended_at)
    .bind(session.play_time_minutes)
    .bind(session.score)
    .bind(session.skills_gained)
    .fetch_one(executor)
    .await
}

/// Number of sessions recorded against a catalog key. Used to backfill
/// total_plays when a game is materialized after plays were already logged.
pub async fn count_for_game<'e, E>(
    executor: E,
    grade: &str,
    game_id: i32,
) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT COUNT(*) FROM game_sessions
            WHERE grade = $1 AND game_id = $2
        "#,
    )
    .bind(grade)
    .bind(game_id)
    .fetch_one(executor)
    .await
}
