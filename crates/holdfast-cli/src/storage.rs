//! SQLite-backed workout history.
//!
//! One row per completed session. Streak and consistency numbers are
//! derived from the distinct workout dates, so several sessions on one
//! day count once.

use std::collections::HashSet;
use std::path::PathBuf;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rusqlite::{params, Connection};
use serde::Serialize;

/// Returns the holdfast data directory, creating it if needed.
/// Set HOLDFAST_ENV=dev to keep development data separate.
pub fn data_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");
    let env = std::env::var("HOLDFAST_ENV").unwrap_or_else(|_| "production".to_string());
    let dir = if env == "dev" {
        base_dir.join("holdfast-dev")
    } else {
        base_dir.join("holdfast")
    };
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// One completed session.
#[derive(Debug, Clone, Serialize)]
pub struct WorkoutRecord {
    pub id: i64,
    pub exercise: String,
    pub level: String,
    pub bad_day: bool,
    pub holds_completed: u32,
    pub holds_planned: u32,
    pub duration_secs: u64,
    pub completed_at: DateTime<Utc>,
}

/// Aggregate history numbers for the stats command.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HistoryStats {
    pub total_sessions: u64,
    /// Consecutive active days ending today (or yesterday, if today has
    /// no workout yet).
    pub streak_days: u32,
    pub week_days_active: u32,
    pub month_days_active: u32,
    /// Distinct exercise ids completed today.
    pub today_exercises: Vec<String>,
}

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (and migrate) the database in the data directory.
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let path = data_dir()?.join("holdfast.db");
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// In-memory database for tests.
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, Box<dyn std::error::Error>> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS workouts (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                exercise        TEXT NOT NULL,
                level           TEXT NOT NULL,
                bad_day         INTEGER NOT NULL DEFAULT 0,
                holds_completed INTEGER NOT NULL,
                holds_planned   INTEGER NOT NULL,
                duration_secs   INTEGER NOT NULL,
                completed_at    TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_workouts_completed_at
                ON workouts(completed_at);
            CREATE INDEX IF NOT EXISTS idx_workouts_exercise
                ON workouts(exercise);",
        )
    }

    pub fn record_workout(
        &self,
        exercise: &str,
        level: &str,
        bad_day: bool,
        holds_completed: u32,
        holds_planned: u32,
        duration_secs: u64,
        completed_at: DateTime<Utc>,
    ) -> Result<i64, rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO workouts
                (exercise, level, bad_day, holds_completed, holds_planned, duration_secs, completed_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                exercise,
                level,
                bad_day,
                holds_completed,
                holds_planned,
                duration_secs,
                completed_at.to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Most recent sessions, newest first.
    pub fn recent(&self, limit: u32) -> Result<Vec<WorkoutRecord>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT id, exercise, level, bad_day, holds_completed, holds_planned,
                    duration_secs, completed_at
             FROM workouts
             ORDER BY completed_at DESC
             LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit], |row| {
            let raw: String = row.get(7)?;
            let completed_at = DateTime::parse_from_rfc3339(&raw)
                .map(|t| t.with_timezone(&Utc))
                .map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        7,
                        rusqlite::types::Type::Text,
                        Box::new(e),
                    )
                })?;
            Ok(WorkoutRecord {
                id: row.get(0)?,
                exercise: row.get(1)?,
                level: row.get(2)?,
                bad_day: row.get(3)?,
                holds_completed: row.get(4)?,
                holds_planned: row.get(5)?,
                duration_secs: row.get(6)?,
                completed_at,
            })
        })?;
        rows.collect()
    }

    /// Distinct UTC dates with at least one workout.
    fn workout_dates(&self) -> Result<HashSet<NaiveDate>, rusqlite::Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT substr(completed_at, 1, 10) FROM workouts")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut dates = HashSet::new();
        for raw in rows {
            if let Ok(date) = NaiveDate::parse_from_str(&raw?, "%Y-%m-%d") {
                dates.insert(date);
            }
        }
        Ok(dates)
    }

    /// Distinct exercise ids completed on one date.
    fn exercises_on(&self, day: NaiveDate) -> Result<Vec<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT exercise FROM workouts
             WHERE substr(completed_at, 1, 10) = ?1
             ORDER BY exercise",
        )?;
        let rows = stmt.query_map(params![day.format("%Y-%m-%d").to_string()], |row| {
            row.get(0)
        })?;
        rows.collect()
    }

    pub fn stats(&self, today: NaiveDate) -> Result<HistoryStats, Box<dyn std::error::Error>> {
        let dates = self.workout_dates()?;
        let total_sessions: u64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM workouts", [], |row| row.get(0))?;

        // Walk backwards from today. A quiet today doesn't end the run;
        // a gap anywhere earlier does.
        let mut streak_days = 0u32;
        for i in 0..365 {
            let day = today - Duration::days(i);
            if dates.contains(&day) {
                streak_days += 1;
            } else if i > 0 {
                break;
            }
        }

        let week_days_active = (0..7)
            .filter(|i| dates.contains(&(today - Duration::days(*i))))
            .count() as u32;
        let month_days_active = (0..28)
            .filter(|i| dates.contains(&(today - Duration::days(*i))))
            .count() as u32;

        Ok(HistoryStats {
            total_sessions,
            streak_days,
            week_days_active,
            month_days_active,
            today_exercises: self.exercises_on(today)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(day: NaiveDate) -> DateTime<Utc> {
        day.and_hms_opt(8, 0, 0).unwrap().and_utc()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn record_and_read_back() {
        let db = Database::open_memory().unwrap();
        let id = db
            .record_workout("curl-up", "standard", false, 9, 9, 150, at(day(2025, 3, 10)))
            .unwrap();
        assert!(id > 0);

        let recent = db.recent(10).unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].exercise, "curl-up");
        assert_eq!(recent[0].holds_completed, 9);
        assert_eq!(recent[0].duration_secs, 150);
        assert_eq!(recent[0].completed_at.date_naive(), day(2025, 3, 10));
    }

    #[test]
    fn recent_orders_newest_first_and_limits() {
        let db = Database::open_memory().unwrap();
        for d in 1..=5 {
            db.record_workout("curl-up", "standard", false, 9, 9, 100, at(day(2025, 3, d)))
                .unwrap();
        }
        let recent = db.recent(3).unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].completed_at.date_naive(), day(2025, 3, 5));
        assert_eq!(recent[2].completed_at.date_naive(), day(2025, 3, 3));
    }

    #[test]
    fn streak_counts_consecutive_days() {
        let db = Database::open_memory().unwrap();
        for d in [10, 9, 8, 5, 4] {
            db.record_workout("curl-up", "standard", false, 9, 9, 100, at(day(2025, 3, d)))
                .unwrap();
        }
        let stats = db.stats(day(2025, 3, 10)).unwrap();
        assert_eq!(stats.streak_days, 3);
        assert_eq!(stats.total_sessions, 5);
        // Active days inside the trailing windows: 10, 9, 8, 5, 4.
        assert_eq!(stats.week_days_active, 5);
        assert_eq!(stats.month_days_active, 5);
    }

    #[test]
    fn quiet_today_keeps_yesterdays_streak() {
        let db = Database::open_memory().unwrap();
        for d in [9, 8, 7] {
            db.record_workout("bird-dog", "beginner", false, 6, 6, 90, at(day(2025, 3, d)))
                .unwrap();
        }
        let stats = db.stats(day(2025, 3, 10)).unwrap();
        assert_eq!(stats.streak_days, 3);

        // But a day-sized hole further back ends it.
        let stats = db.stats(day(2025, 3, 11)).unwrap();
        assert_eq!(stats.streak_days, 0);
    }

    #[test]
    fn several_sessions_one_day_count_once_for_streak() {
        let db = Database::open_memory().unwrap();
        for _ in 0..3 {
            db.record_workout("side-plank", "standard", false, 18, 18, 200, at(day(2025, 3, 10)))
                .unwrap();
        }
        let stats = db.stats(day(2025, 3, 10)).unwrap();
        assert_eq!(stats.streak_days, 1);
        assert_eq!(stats.total_sessions, 3);
        assert_eq!(stats.today_exercises, vec!["side-plank".to_string()]);
    }

    #[test]
    fn today_checklist_is_distinct_and_sorted() {
        let db = Database::open_memory().unwrap();
        let today = day(2025, 3, 10);
        db.record_workout("side-plank", "standard", false, 18, 18, 200, at(today))
            .unwrap();
        db.record_workout("curl-up", "standard", false, 9, 9, 150, at(today))
            .unwrap();
        db.record_workout("curl-up", "standard", true, 3, 3, 40, at(today))
            .unwrap();
        db.record_workout("bird-dog", "standard", false, 18, 18, 250, at(day(2025, 3, 9)))
            .unwrap();

        let stats = db.stats(today).unwrap();
        assert_eq!(
            stats.today_exercises,
            vec!["curl-up".to_string(), "side-plank".to_string()]
        );
    }

    #[test]
    fn partial_session_retains_both_counts() {
        let db = Database::open_memory().unwrap();
        db.record_workout("curl-up", "standard", false, 7, 9, 120, at(day(2025, 3, 10)))
            .unwrap();
        let records = db.recent(1).unwrap();
        assert_eq!(records[0].holds_completed, 7);
        assert_eq!(records[0].holds_planned, 9);
    }
}
