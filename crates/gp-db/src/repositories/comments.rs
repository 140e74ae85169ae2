use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::Comment;

pub async fn insert<'e, E>(
    executor: E,
    game_id: i64,
    user_id: Uuid,
    grade: &str,
    body: &str,
) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            INSERT INTO comments (game_id, user_id, grade, body)
            VALUES ($1, $2, $3, $4)
            RETURNING id
        "#,
    )
    .bind(game_id)
    .bind(user_id)
    .bind(grade)
    .bind(body)
    .fetch_one(executor)
    .await
}

/// Comments for a game, newest first.
pub async fn list_for_game<'e, E>(executor: E, game_id: i64) -> Result<Vec<Comment>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT c.id, c.game_id, c.user_id, u.email AS author_email,
                   c.grade, c.body, c.created_at
            FROM comments c
            JOIN users u ON u.id = c.user_id
            WHERE c.game_id = $1
            ORDER BY c.created_at DESC
        "#,
    )
    .bind(game_id)
    .fetch_all(executor)
    .await
}
