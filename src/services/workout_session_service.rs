use tracing::info;

use crate::database::Database;
use crate::errors::{ApiError, Result};
use crate::models::{WorkoutSession, WorkoutSessionInput, WorkoutSessionRow};

// `time - TIME '00:00:00'` hands the stored time back as an interval since midnight.
const SELECT_WORKOUTS: &str = r#"
    SELECT w.workout_id, w.session, w.date, w.time - TIME '00:00:00' AS time, w.member_id
    FROM Workouts w
"#;

#[derive(Clone)]
pub struct WorkoutSessionService {
    db: Database,
}

impl WorkoutSessionService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Insert a session. `member_id` is stored as given, without checking
    /// that the member exists.
    pub async fn create_session(&self, session_data: WorkoutSessionInput) -> Result<i32> {
        let mut conn = self.db.connect().await?;

        let workout_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO Workouts (session, date, time, member_id)
            VALUES ($1, $2, $3, $4)
            RETURNING workout_id
            "#,
        )
        .bind(&session_data.session)
        .bind(session_data.date)
        .bind(session_data.time)
        .bind(session_data.member_id)
        .fetch_one(&mut conn)
        .await?;

        info!(workout_id, member_id = session_data.member_id, "Created workout session");
        Ok(workout_id)
    }

    pub async fn list_sessions(&self) -> Result<Vec<WorkoutSession>> {
        let mut conn = self.db.connect().await?;

        let rows = sqlx::query_as::<_, WorkoutSessionRow>(&format!(
            "{} ORDER BY w.workout_id",
            SELECT_WORKOUTS
        ))
        .fetch_all(&mut conn)
        .await?;

        Ok(rows.into_iter().map(WorkoutSession::from).collect())
    }

    pub async fn get_sessions_by_member_id(&self, member_id: i32) -> Result<Vec<WorkoutSession>> {
        let mut conn = self.db.connect().await?;

        let rows = sqlx::query_as::<_, WorkoutSessionRow>(&format!(
            "{} WHERE w.member_id = $1 ORDER BY w.workout_id",
            SELECT_WORKOUTS
        ))
        .bind(member_id)
        .fetch_all(&mut conn)
        .await?;

        Ok(rows.into_iter().map(WorkoutSession::from).collect())
    }

    pub async fn get_session_by_id(&self, workout_id: i32) -> Result<WorkoutSession> {
        let mut conn = self.db.connect().await?;

        let row = sqlx::query_as::<_, WorkoutSessionRow>(&format!(
            "{} WHERE w.workout_id = $1",
            SELECT_WORKOUTS
        ))
        .bind(workout_id)
        .fetch_optional(&mut conn)
        .await?
        .ok_or(ApiError::WorkoutNotFound(workout_id))?;

        Ok(row.into())
    }

    /// Replace every field of the session, `member_id` included. Like
    /// creation, the member reference is not checked.
    pub async fn update_session(&self, workout_id: i32, session_data: WorkoutSessionInput) -> Result<()> {
        let mut conn = self.db.connect().await?;

        sqlx::query(
            r#"
            UPDATE Workouts
            SET session = $1,
                date = $2,
                time = $3,
                member_id = $4
            WHERE workout_id = $5
            "#,
        )
        .bind(&session_data.session)
        .bind(session_data.date)
        .bind(session_data.time)
        .bind(session_data.member_id)
        .bind(workout_id)
        .execute(&mut conn)
        .await?;

        Ok(())
    }

    pub async fn delete_session(&self, workout_id: i32) -> Result<()> {
        let mut conn = self.db.connect().await?;

        let existing = sqlx::query_scalar::<_, i32>("SELECT workout_id FROM Workouts WHERE workout_id = $1")
            .bind(workout_id)
            .fetch_optional(&mut conn)
            .await?;

        if existing.is_none() {
            return Err(ApiError::WorkoutNotFound(workout_id));
        }

        sqlx::query("DELETE FROM Workouts WHERE workout_id = $1")
            .bind(workout_id)
            .execute(&mut conn)
            .await?;

        info!(workout_id, "Deleted workout session");
        Ok(())
    }
}
