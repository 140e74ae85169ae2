use sqlx::{Executor, Postgres};

use crate::models::{Game, NewGame};

pub async fn find_by_key<'e, E>(
    executor: E,
    grade: &str,
    game_id: i32,
) -> Result<Option<Game>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, grade, game_id, title, description, thumbnail_url, play_url,
                   likes, dislikes, total_plays, created_at, updated_at
            FROM games
            WHERE grade = $1 AND game_id = $2
        "#,
    )
    .bind(grade)
    .bind(game_id)
    .fetch_optional(executor)
    .await
}

/// Insert-if-absent on the natural (grade, game_id) key. Concurrent first
/// accesses race on the unique index instead of producing duplicates;
/// callers re-read after a conflict.
pub async fn insert_if_absent<'e, E>(executor: E, game: &NewGame<'_>) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            INSERT INTO games (grade, game_id, title, description, thumbnail_url, play_url, total_plays)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (grade, game_id) DO NOTHING
        "#,
    )
    .bind(game.grade)
    .bind(game.game_id)
    .bind(game.title)
    .bind(game.description)
    .bind(game.thumbnail_url)
    .bind(game.play_url)
    .bind(game.total_plays)
    .execute(executor)
    .await?;

    Ok(())
}

/// Atomic play-count increment, returning the updated row.
pub async fn increment_plays<'e, E>(executor: E, id: i64) -> Result<Option<Game>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE games
            SET total_plays = total_plays + 1, updated_at = NOW()
            WHERE id = $1
            RETURNING id, grade, game_id, title, description, thumbnail_url, play_url,
                      likes, dislikes, total_plays, created_at, updated_at
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

/// Atomic like/dislike counter adjustment, floored at zero.
pub async fn adjust_rating_counters<'e, E>(
    executor: E,
    id: i64,
    likes_delta: i32,
    dislikes_delta: i32,
) -> Result<Option<Game>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE games
            SET likes = GREATEST(likes + $2, 0),
                dislikes = GREATEST(dislikes + $3, 0),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, grade, game_id, title, description, thumbnail_url, play_url,
                      likes, dislikes, total_plays, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(likes_delta)
    .bind(dislikes_delta)
    .fetch_optional(executor)
    .await
}

pub async fn count_all<'e, E>(executor: E) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT COUNT(*) FROM games
        "#,
    )
    .fetch_one(executor)
    .await
}
