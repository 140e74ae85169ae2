//! Student game-statistics aggregation for GradePlay
//!
//! This crate provides the cached per-student aggregate structure and the
//! pure folding/rollup logic used by the session tracker and the
//! parent/institution dashboard.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Number of buckets in the weekly progress array, one per weekday
/// (Sunday = 0).
pub const WEEKLY_BUCKETS: usize = 7;

/// Skill categories tracked for every student.
///
/// Stored aggregates may predate a category; reads treat missing keys as
/// zero, so extending this list is backward compatible.
pub const SKILL_CATEGORIES: &[&str] = &[
    "math",
    "logic",
    "memory",
    "problemSolving",
    "speed",
    "accuracy",
];

/// Cached per-student aggregate, stored on the student record and updated
/// incrementally every time a play session is recorded.
///
/// Every field carries a serde default so partially-written historical
/// records read as zero/empty instead of failing to deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStats {
    #[serde(default)]
    pub games_played: i64,
    /// Total play time in minutes.
    #[serde(default)]
    pub total_play_time: i64,
    #[serde(default)]
    pub achievements: Vec<String>,
    /// Minutes per skill category.
    #[serde(default = "zeroed_skills")]
    pub skills_distribution: BTreeMap<String, i64>,
    /// Minutes per game title.
    #[serde(default)]
    pub game_time_distribution: BTreeMap<String, i64>,
    /// Score accumulated per weekday of the current week (Sunday = 0).
    #[serde(default = "zeroed_week")]
    pub weekly_progress: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_played: Option<DateTime<Utc>>,
}

fn zeroed_skills() -> BTreeMap<String, i64> {
    SKILL_CATEGORIES
        .iter()
        .map(|skill| ((*skill).to_string(), 0))
        .collect()
}

fn zeroed_week() -> Vec<f64> {
    vec![0.0; WEEKLY_BUCKETS]
}

impl Default for GameStats {
    fn default() -> Self {
        Self {
            games_played: 0,
            total_play_time: 0,
            achievements: Vec::new(),
            skills_distribution: zeroed_skills(),
            game_time_distribution: BTreeMap::new(),
            weekly_progress: zeroed_week(),
            last_played: None,
        }
    }
}

impl GameStats {
    /// Backfill keys and buckets that older stored aggregates may lack.
    pub fn normalize(&mut self) {
        for skill in SKILL_CATEGORIES {
            self.skills_distribution
                .entry((*skill).to_string())
                .or_insert(0);
        }
        self.weekly_progress.resize(WEEKLY_BUCKETS, 0.0);
    }

    /// Fold one recorded play session into the aggregate.
    ///
    /// `game_type` is the skill category exercised by the game and
    /// `play_time` is the session duration in minutes. The weekly bucket is
    /// chosen from the session's start time.
    pub fn record_session(
        &mut self,
        game_title: &str,
        game_type: &str,
        play_time: i64,
        score: f64,
        started_at: DateTime<Utc>,
    ) {
        self.normalize();
        self.games_played += 1;
        self.total_play_time += play_time;
        *self
            .skills_distribution
            .entry(game_type.to_string())
            .or_insert(0) += play_time;
        *self
            .game_time_distribution
            .entry(game_title.to_string())
            .or_insert(0) += play_time;
        self.weekly_progress[week_bucket(started_at)] += score;
        self.last_played = Some(started_at);
    }
}

/// Weekly progress bucket for a timestamp: the number of whole days since
/// the start of its week, i.e. a day-of-week index with Sunday = 0.
pub fn week_bucket(at: DateTime<Utc>) -> usize {
    at.weekday().num_days_from_sunday() as usize
}

/// Session duration in whole minutes, rounded half-up.
///
/// Returns `None` when `ended_at` precedes `started_at`.
pub fn play_time_minutes(started_at: DateTime<Utc>, ended_at: DateTime<Utc>) -> Option<i64> {
    let elapsed = ended_at.signed_duration_since(started_at);
    if elapsed < chrono::Duration::zero() {
        return None;
    }
    Some((elapsed.num_seconds() as f64 / 60.0).round() as i64)
}

/// Dashboard rollup across one parent/institution's students.
///
/// Play time, achievement counts and per-game time are sums; skill and
/// weekly-progress distributions are per-student averages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    pub total_students: usize,
    pub total_play_time: i64,
    pub achievements: usize,
    pub skills_distribution: BTreeMap<String, f64>,
    pub game_time_distribution: BTreeMap<String, i64>,
    pub weekly_progress: Vec<f64>,
}

/// Roll up a set of per-student aggregates into the dashboard overview.
pub fn aggregate_overall(students: &[GameStats]) -> OverallStats {
    let mut skills: BTreeMap<String, f64> = SKILL_CATEGORIES
        .iter()
        .map(|skill| ((*skill).to_string(), 0.0))
        .collect();
    let mut game_time: BTreeMap<String, i64> = BTreeMap::new();
    let mut weekly = vec![0.0; WEEKLY_BUCKETS];
    let mut total_play_time = 0;
    let mut achievements = 0;

    for stats in students {
        total_play_time += stats.total_play_time;
        achievements += stats.achievements.len();
        for (skill, minutes) in &stats.skills_distribution {
            *skills.entry(skill.clone()).or_insert(0.0) += *minutes as f64;
        }
        for (title, minutes) in &stats.game_time_distribution {
            *game_time.entry(title.clone()).or_insert(0) += minutes;
        }
        for (bucket, score) in stats.weekly_progress.iter().take(WEEKLY_BUCKETS).enumerate() {
            weekly[bucket] += score;
        }
    }

    if !students.is_empty() {
        let count = students.len() as f64;
        for minutes in skills.values_mut() {
            *minutes /= count;
        }
        for score in &mut weekly {
            *score /= count;
        }
    }

    OverallStats {
        total_students: students.len(),
        total_play_time,
        achievements,
        skills_distribution: skills,
        game_time_distribution: game_time,
        weekly_progress: weekly,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_play_time_minutes_rounding() {
        let start = Utc.with_ymd_and_hms(2024, 3, 4, 10, 0, 0).unwrap();

        // Exactly ten minutes
        let end = start + chrono::Duration::milliseconds(600_000);
        assert_eq!(play_time_minutes(start, end), Some(10));

        // 90 seconds rounds up to 2
        let end = start + chrono::Duration::seconds(90);
        assert_eq!(play_time_minutes(start, end), Some(2));

        // 89 seconds rounds down to 1
        let end = start + chrono::Duration::seconds(89);
        assert_eq!(play_time_minutes(start, end), Some(1));

        assert_eq!(play_time_minutes(start, start), Some(0));
    }

    #[test]
    fn test_play_time_minutes_rejects_negative_duration() {
        let start = Utc.with_ymd_and_hms(2024, 3, 4, 10, 0, 0).unwrap();
        let end = start - chrono::Duration::seconds(1);
        assert_eq!(play_time_minutes(start, end), None);
    }

    #[test]
    fn test_week_bucket() {
        // 2024-03-03 was a Sunday
        let sunday = Utc.with_ymd_and_hms(2024, 3, 3, 12, 0, 0).unwrap();
        assert_eq!(week_bucket(sunday), 0);
        assert_eq!(week_bucket(sunday + chrono::Duration::days(1)), 1);
        assert_eq!(week_bucket(sunday + chrono::Duration::days(6)), 6);
    }

    #[test]
    fn test_record_session_updates_all_aggregates() {
        // 2024-03-06 was a Wednesday
        let started = Utc.with_ymd_and_hms(2024, 3, 6, 15, 30, 0).unwrap();
        let mut stats = GameStats::default();

        stats.record_session("Number Ninja", "math", 10, 85.0, started);

        assert_eq!(stats.games_played, 1);
        assert_eq!(stats.total_play_time, 10);
        assert_eq!(stats.skills_distribution["math"], 10);
        assert_eq!(stats.skills_distribution["logic"], 0);
        assert_eq!(stats.game_time_distribution["Number Ninja"], 10);
        assert_eq!(stats.weekly_progress[3], 85.0);
        assert_eq!(stats.last_played, Some(started));

        stats.record_session("Number Ninja", "math", 5, 40.0, started);
        assert_eq!(stats.games_played, 2);
        assert_eq!(stats.total_play_time, 15);
        assert_eq!(stats.skills_distribution["math"], 15);
        assert_eq!(stats.game_time_distribution["Number Ninja"], 15);
        assert_eq!(stats.weekly_progress[3], 125.0);
    }

    #[test]
    fn test_record_session_handles_unknown_skill_and_short_week() {
        let started = Utc.with_ymd_and_hms(2024, 3, 3, 8, 0, 0).unwrap();
        let mut stats = GameStats {
            weekly_progress: vec![1.0, 2.0],
            ..GameStats::default()
        };

        stats.record_session("Word Wizard", "vocabulary", 7, 10.0, started);

        assert_eq!(stats.skills_distribution["vocabulary"], 7);
        assert_eq!(stats.weekly_progress.len(), WEEKLY_BUCKETS);
        assert_eq!(stats.weekly_progress[0], 11.0);
    }

    #[test]
    fn test_stats_deserialize_with_missing_fields() {
        // Historical records may only carry a subset of the aggregate.
        let stats: GameStats = serde_json::from_str(r#"{"gamesPlayed": 3}"#).unwrap();
        assert_eq!(stats.games_played, 3);
        assert_eq!(stats.total_play_time, 0);
        assert!(stats.achievements.is_empty());
        assert_eq!(stats.skills_distribution.len(), SKILL_CATEGORIES.len());
        assert_eq!(stats.weekly_progress, vec![0.0; WEEKLY_BUCKETS]);
    }

    #[test]
    fn test_aggregate_overall_sums_and_averages() {
        let mut first = GameStats::default();
        first.total_play_time = 30;
        first.skills_distribution.insert("math".to_string(), 10);
        first.achievements.push("first-game".to_string());

        let mut second = GameStats::default();
        second.total_play_time = 10;

        let overall = aggregate_overall(&[first, second]);

        assert_eq!(overall.total_students, 2);
        // Play time and achievements are summed across students
        assert_eq!(overall.total_play_time, 40);
        assert_eq!(overall.achievements, 1);
        // Skill distributions are averaged per student
        assert_eq!(overall.skills_distribution["math"], 5.0);
        assert_eq!(overall.skills_distribution["logic"], 0.0);
    }

    #[test]
    fn test_aggregate_overall_weekly_and_game_time() {
        let mut first = GameStats::default();
        first.weekly_progress[2] = 20.0;
        first
            .game_time_distribution
            .insert("Shape Sorter".to_string(), 12);

        let mut second = GameStats::default();
        second.weekly_progress[2] = 10.0;
        second
            .game_time_distribution
            .insert("Shape Sorter".to_string(), 8);

        let overall = aggregate_overall(&[first, second]);

        assert_eq!(overall.weekly_progress[2], 15.0);
        assert_eq!(overall.weekly_progress[0], 0.0);
        // Per-game time is summed, not averaged
        assert_eq!(overall.game_time_distribution["Shape Sorter"], 20);
    }

    #[test]
    fn test_aggregate_overall_empty() {
        let overall = aggregate_overall(&[]);
        assert_eq!(overall.total_students, 0);
        assert_eq!(overall.total_play_time, 0);
        assert_eq!(overall.skills_distribution["math"], 0.0);
        assert_eq!(overall.weekly_progress, vec![0.0; WEEKLY_BUCKETS]);
    }
}
