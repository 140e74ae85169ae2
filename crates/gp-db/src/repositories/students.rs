use gp_stats::GameStats;
use sqlx::{Executor, Postgres, types::Json};
use uuid::Uuid;

use crate::models::Student;

const STUDENT_COLUMNS: &str = "id, parent_id, name, email, password_hash, age, grade, \
                               game_stats, created_at, last_login_at";

pub async fn create<'e, E>(
    executor: E,
    parent_id: Uuid,
    name: &str,
    email: &str,
    password_hash: &str,
    age: i32,
    grade: &str,
) -> Result<Student, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(&format!(
        // language=PostgreSQL
        r#"
            INSERT INTO students (parent_id, name, email, password_hash, age, grade, game_stats)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {STUDENT_COLUMNS}
        "#
    ))
    .bind(parent_id)
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(age)
    .bind(grade)
    .bind(Json(GameStats::default()))
    .fetch_one(executor)
    .await
}

pub async fn find_by_id<'e, E>(
    executor: E,
    student_id: Uuid,
) -> Result<Option<Student>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(&format!(
        // language=PostgreSQL
        r#"
            SELECT {STUDENT_COLUMNS}
            FROM students
            WHERE id = $1
        "#
    ))
    .bind(student_id)
    .fetch_optional(executor)
    .await
}

pub async fn find_by_email<'e, E>(
    executor: E,
    email: &str,
) -> Result<Option<Student>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(&format!(
        // language=PostgreSQL
        r#"
            SELECT {STUDENT_COLUMNS}
            FROM students
            WHERE email = $1
        "#
    ))
    .bind(email)
    .fetch_optional(executor)
    .await
}

/// All students owned by a parent/institution account.
pub async fn list_by_parent<'e, E>(
    executor: E,
    parent_id: Uuid,
) -> Result<Vec<Student>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(&format!(
        // language=PostgreSQL
        r#"
            SELECT {STUDENT_COLUMNS}
            FROM students
            WHERE parent_id = $1
            ORDER BY created_at
        "#
    ))
    .bind(parent_id)
    .fetch_all(executor)
    .await
}

/// Load a student's cached aggregate with a row lock, so the session fold
/// is serialized against concurrent tracking requests for the same student.
pub async fn lock_stats<'e, E>(
    executor: E,
    student_id: Uuid,
) -> Result<Option<Json<GameStats>>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT game_stats
            FROM students
            WHERE id = $1
            FOR UPDATE
        "#,
    )
    .bind(student_id)
    .fetch_optional(executor)
    .await
}

pub async fn update_stats<'e, E>(
    executor: E,
    student_id: Uuid,
    stats: &GameStats,
) -> Result<u64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            UPDATE students
            SET game_stats = $2
            WHERE id = $1
        "#,
    )
    .bind(student_id)
    .bind(Json(stats))
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}
