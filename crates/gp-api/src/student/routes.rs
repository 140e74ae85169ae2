use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
};

use gp_db::{
    models::{NewGameSession, Student},
    repositories::{sessions, students},
};
use gp_stats::{aggregate_overall, play_time_minutes};

use super::model::{
    CreateStudentRequest, StatsQuery, StatsResponse, StudentStatsEntry, TrackGameRequest,
    TrackGameResponse,
};
use crate::{
    ApiState, auth::AuthUser, auth::validation as auth_validation, error::ApiError,
    middleware::rate_limit, validation,
};

pub fn routes() -> Router<ApiState> {
    use crate::make_rate_limit_layer;

    Router::new()
        .route("/students", post(create_student).get(list_students))
        .route("/students/stats", get(student_stats))
        .route("/students/track-game", post(track_game))
        .layer(make_rate_limit_layer!(
            rate_limit::GENERAL_RATE_PER_SECOND,
            rate_limit::GENERAL_BURST_SIZE
        ))
}

async fn create_student(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Json(payload): Json<CreateStudentRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    if !auth_user.is_guardian() {
        return Err(ApiError::Auth(
            "Only parent or institution accounts can create students".to_string(),
        ));
    }

    let name = payload
        .name
        .ok_or_else(|| ApiError::Validation("Name is required".to_string()))?;
    let email = payload
        .email
        .ok_or_else(|| ApiError::Validation("Email is required".to_string()))?;
    let password = payload
        .password
        .ok_or_else(|| ApiError::Validation("Password is required".to_string()))?;
    let age = payload
        .age
        .ok_or_else(|| ApiError::Validation("Age is required".to_string()))?;
    let grade = payload
        .grade
        .ok_or_else(|| ApiError::Validation("Grade is required".to_string()))?;

    if name.trim().is_empty() {
        return Err(ApiError::Validation("Name cannot be empty".to_string()));
    }
    if !(3..=18).contains(&age) {
        return Err(ApiError::Validation(
            "Age must be between 3 and 18".to_string(),
        ));
    }
    auth_validation::validate_email(&email)?;
    auth_validation::validate_password(&password)?;
    validation::validate_grade(&grade)?;

    if students::find_by_email(&state.pool, &email)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict("Email already exists".to_string()));
    }

    let password_hash = bcrypt::hash(&password, state.bcrypt_cost)?;

    let student = match students::create(
        &state.pool,
        auth_user.user_id,
        name.trim(),
        &email,
        &password_hash,
        age,
        &grade,
    )
    .await
    {
        Ok(student) => student,
        Err(sqlx::Error::Database(db_err)) if db_err.constraint() == Some("uq_students_email") => {
            return Err(ApiError::Conflict("Email already exists".to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(student_id = %student.id, parent_id = %auth_user.user_id, "student created");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "Student created successfully",
            "student": student,
        })),
    ))
}

/// The authenticated account's students, credentials stripped.
async fn list_students(
    auth_user: AuthUser,
    State(state): State<ApiState>,
) -> Result<Json<Vec<Student>>, ApiError> {
    let students = students::list_by_parent(&state.pool, auth_user.user_id).await?;
    Ok(Json(students))
}

/// Aggregated dashboard statistics.
///
/// Visibility is scoped to the authenticated account's own students; a
/// client-supplied student id is only honored when that student belongs
/// to the caller.
async fn student_stats(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<StatsResponse>, ApiError> {
    let students = match query.student_id {
        Some(student_id) => students::find_by_id(&state.pool, student_id)
            .await?
            .filter(|student| student.parent_id == auth_user.user_id)
            .map(|student| vec![student])
            .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?,
        None => students::list_by_parent(&state.pool, auth_user.user_id).await?,
    };

    let entries: Vec<StudentStatsEntry> =
        students.iter().map(StudentStatsEntry::from_student).collect();
    let all_stats: Vec<_> = entries.iter().map(|entry| entry.stats.clone()).collect();

    Ok(Json(StatsResponse {
        overall: aggregate_overall(&all_stats),
        students: entries,
    }))
}

async fn track_game(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Json(payload): Json<TrackGameRequest>,
) -> Result<Json<TrackGameResponse>, ApiError> {
    let student_id = payload
        .student_id
        .ok_or_else(|| ApiError::Validation("Student ID is required".to_string()))?;
    let game_id = payload
        .game_id
        .ok_or_else(|| ApiError::Validation("Game ID is required".to_string()))?;
    let grade = payload
        .grade
        .ok_or_else(|| ApiError::Validation("Grade is required".to_string()))?;
    let game_title = payload
        .game_title
        .ok_or_else(|| ApiError::Validation("Game title is required".to_string()))?;
    let started_at = payload
        .start_time
        .ok_or_else(|| ApiError::Validation("Start time is required".to_string()))?;
    let ended_at = payload
        .end_time
        .ok_or_else(|| ApiError::Validation("End time is required".to_string()))?;

    validation::validate_grade(&grade)?;
    if game_title.trim().is_empty() {
        return Err(ApiError::Validation(
            "Game title cannot be empty".to_string(),
        ));
    }

    let play_time = play_time_minutes(started_at, ended_at).ok_or_else(|| {
        ApiError::Validation("End time must not precede start time".to_string())
    })?;

    let game_type = payload.game_type.unwrap_or_else(|| "general".to_string());
    let score = payload.score.unwrap_or(0.0);
    let skills_gained = payload.skills_gained.unwrap_or_default();

    // Session insert and aggregate fold commit together; the row lock on
    // the student serializes concurrent tracking requests.
    let mut tx = state.pool.begin().await?;

    let student = students::find_by_id(&mut *tx, student_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?;

    if student.parent_id != auth_user.user_id && student.id != auth_user.user_id {
        return Err(ApiError::Auth(
            "Not authorized to track sessions for this student".to_string(),
        ));
    }

    let session = sessions::insert(
        &mut *tx,
        &NewGameSession {
            student_id,
            grade: &grade,
            game_id,
            game_title: &game_title,
            game_type: &game_type,
            started_at,
            ended_at,
            play_time_minutes: play_time as i32,
            score,
            skills_gained: &skills_gained,
        },
    )
    .await?;

    let mut stats = students::lock_stats(&mut *tx, student_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?
        .0;
    stats.record_session(&game_title, &game_type, play_time, score, started_at);
    students::update_stats(&mut *tx, student_id, &stats).await?;

    tx.commit().await?;

    Ok(Json(TrackGameResponse {
        message: "Game session tracked successfully".to_string(),
        session,
    }))
}
