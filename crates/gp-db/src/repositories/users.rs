use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::User;

pub async fn find_by_email<'e, E>(executor: E, email: &str) -> Result<Option<User>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, email, password_hash, account_type, created_at, last_login_at
            FROM users
            WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(executor)
    .await
}

pub async fn find_by_id<'e, E>(executor: E, user_id: Uuid) -> Result<Option<User>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, email, password_hash, account_type, created_at, last_login_at
            FROM users
            WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(executor)
    .await
}

pub async fn create<'e, E>(
    executor: E,
    email: &str,
    password_hash: &str,
    account_type: &str,
) -> Result<Uuid, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            INSERT INTO users (email, password_hash, account_type)
            VALUES ($1, $2, $3)
            RETURNING id
        "#,
    )
    .bind(email)
    .bind(password_hash)
    .bind(account_type)
    .fetch_one(executor)
    .await
}

pub async fn update_password<'e, E>(
    executor: E,
    user_id: Uuid,
    password_hash: &str,
) -> Result<u64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            UPDATE users
            SET password_hash = $2
            WHERE id = $1
        "#,
    )
    .bind(user_id)
    .bind(password_hash)
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}

pub async fn touch_last_login<'e, E>(executor: E, user_id: Uuid) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            UPDATE users
            SET last_login_at = NOW()
            WHERE id = $1
        "#,
    )
    .bind(user_id)
    .execute(executor)
    .await?;

    Ok(())
}
