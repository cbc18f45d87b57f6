use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::postgres::types::PgInterval;
use sqlx::FromRow;

use super::validation::{FieldErrors, PayloadReader};

const SECONDS_PER_DAY: i64 = 86_400;
const MICROS_PER_SECOND: i64 = 1_000_000;

/// A scheduled workout belonging to one member, as exposed over the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutSession {
    pub workout_id: i32,
    pub session: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub member_id: i32,
}

/// Row as read from `Workouts`, where `time` comes back as the duration
/// since midnight.
#[derive(Debug, Clone, FromRow)]
pub struct WorkoutSessionRow {
    pub workout_id: i32,
    pub session: String,
    pub date: NaiveDate,
    pub time: PgInterval,
    pub member_id: i32,
}

impl From<WorkoutSessionRow> for WorkoutSession {
    fn from(row: WorkoutSessionRow) -> Self {
        let total_seconds =
            i64::from(row.time.days) * SECONDS_PER_DAY + row.time.microseconds / MICROS_PER_SECOND;

        Self {
            workout_id: row.workout_id,
            session: row.session,
            date: row.date,
            time: time_of_day(total_seconds),
            member_id: row.member_id,
        }
    }
}

/// Convert a duration since midnight into an hour/minute/second time of day.
///
/// Durations outside a single day wrap around it.
pub fn time_of_day(total_seconds: i64) -> NaiveTime {
    let total_seconds = total_seconds.rem_euclid(SECONDS_PER_DAY);
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    NaiveTime::from_hms_opt(hours as u32, minutes as u32, seconds as u32).unwrap_or_default()
}

/// Validated body of a workout session create or update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutSessionInput {
    pub session: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub member_id: i32,
}

impl WorkoutSessionInput {
    pub const FIELDS: [&'static str; 4] = ["session", "date", "time", "member_id"];
}

pub fn validate_workout_session(payload: &Value) -> Result<WorkoutSessionInput, FieldErrors> {
    let mut reader = PayloadReader::new(payload)?;

    let session = reader.string("session");
    let date = reader.date("date");
    let time = reader.time("time");
    let member_id = reader.integer("member_id");
    reader.reject_unknown(&WorkoutSessionInput::FIELDS);
    reader.finish()?;

    match (session, date, time, member_id) {
        (Some(session), Some(date), Some(time), Some(member_id)) => Ok(WorkoutSessionInput {
            session,
            date,
            time,
            member_id,
        }),
        _ => Err(FieldErrors::schema("Incomplete workout session payload.")),
    }
}
