use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::GameRating;

pub async fn find<'e, E>(
    executor: E,
    game_id: i64,
    user_id: Uuid,
) -> Result<Option<GameRating>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, game_id, user_id, value, created_at, updated_at
            FROM game_ratings
            WHERE game_id = $1 AND user_id = $2
        "#,
    )
    .bind(game_id)
    .bind(user_id)
    .fetch_optional(executor)
    .await
}

/// Insert a vote, or flip its value if the (game, user) pair already voted.
pub async fn upsert<'e, E>(
    executor: E,
    game_id: i64,
    user_id: Uuid,
    value: &str,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            INSERT INTO game_ratings (game_id, user_id, value)
            VALUES ($1, $2, $3)
            ON CONFLICT (game_id, user_id)
            DO UPDATE SET value = $3, updated_at = NOW()
        "#,
    )
    .bind(game_id)
    .bind(user_id)
    .bind(value)
    .execute(executor)
    .await?;

    Ok(())
}

pub async fn delete<'e, E>(executor: E, game_id: i64, user_id: Uuid) -> Result<u64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            DELETE FROM game_ratings
            WHERE game_id = $1 AND user_id = $2
        "#,
    )
    .bind(game_id)
    .bind(user_id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}
