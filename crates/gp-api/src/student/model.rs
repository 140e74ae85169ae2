use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gp_db::models::{GameSession, Student};
use gp_stats::{GameStats, OverallStats};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub age: Option<i32>,
    pub grade: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackGameRequest {
    pub student_id: Option<Uuid>,
    pub game_id: Option<i32>,
    pub grade: Option<String>,
    pub game_title: Option<String>,
    pub game_type: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub score: Option<f64>,
    pub skills_gained: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackGameResponse {
    pub message: String,
    pub session: GameSession,
}

/// One student in the dashboard stats payload: profile fields plus the
/// defaulted-and-merged aggregate, credentials and ownership stripped.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentStatsEntry {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub grade: String,
    pub stats: GameStats,
}

impl StudentStatsEntry {
    pub fn from_student(student: &Student) -> Self {
        let mut stats = student.game_stats.0.clone();
        stats.normalize();
        Self {
            id: student.id,
            name: student.name.clone(),
            age: student.age,
            grade: student.grade.clone(),
            stats,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub overall: OverallStats,
    pub students: Vec<StudentStatsEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsQuery {
    pub student_id: Option<Uuid>,
}
