use sqlx::Connection;
use tracing::info;

use crate::database::Database;
use crate::errors::{ApiError, Result};
use crate::models::{Member, MemberInput};

#[derive(Clone)]
pub struct MemberService {
    db: Database,
}

impl MemberService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Insert a member and return the identifier the database assigned.
    pub async fn create_member(&self, member_data: MemberInput) -> Result<i32> {
        let mut conn = self.db.connect().await?;

        let member_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO Members (name, email, phone_number, credit_card)
            VALUES ($1, $2, $3, $4)
            RETURNING member_id
            "#,
        )
        .bind(&member_data.name)
        .bind(&member_data.email)
        .bind(&member_data.phone_number)
        .bind(&member_data.credit_card)
        .fetch_one(&mut conn)
        .await?;

        info!(member_id, "Created member");
        Ok(member_id)
    }

    pub async fn list_members(&self) -> Result<Vec<Member>> {
        let mut conn = self.db.connect().await?;

        let members = sqlx::query_as::<_, Member>(
            "SELECT member_id, name, email, phone_number, credit_card FROM Members ORDER BY member_id",
        )
        .fetch_all(&mut conn)
        .await?;

        Ok(members)
    }

    pub async fn get_member_by_id(&self, member_id: i32) -> Result<Member> {
        let mut conn = self.db.connect().await?;

        sqlx::query_as::<_, Member>(
            "SELECT member_id, name, email, phone_number, credit_card FROM Members WHERE member_id = $1",
        )
        .bind(member_id)
        .fetch_optional(&mut conn)
        .await?
        .ok_or(ApiError::MemberNotFound(member_id))
    }

    /// Replace every mutable field of the member. An unknown `member_id`
    /// matches no row and still succeeds.
    pub async fn update_member(&self, member_id: i32, member_data: MemberInput) -> Result<()> {
        let mut conn = self.db.connect().await?;

        sqlx::query(
            r#"
            UPDATE Members
            SET name = $1,
                email = $2,
                phone_number = $3,
                credit_card = $4
            WHERE member_id = $5
            "#,
        )
        .bind(&member_data.name)
        .bind(&member_data.email)
        .bind(&member_data.phone_number)
        .bind(&member_data.credit_card)
        .bind(member_id)
        .execute(&mut conn)
        .await?;

        Ok(())
    }

    /// Delete a member that has no workout sessions.
    ///
    /// The existence check, the session check and the delete share one
    /// transaction with the member row locked. Session inserts do not take
    /// that lock, so a session created concurrently can still be orphaned.
    pub async fn delete_member(&self, member_id: i32) -> Result<()> {
        let mut conn = self.db.connect().await?;
        let mut tx = conn.begin().await?;

        let existing = sqlx::query_scalar::<_, i32>(
            "SELECT member_id FROM Members WHERE member_id = $1 FOR UPDATE",
        )
        .bind(member_id)
        .fetch_optional(&mut *tx)
        .await?;

        if existing.is_none() {
            return Err(ApiError::MemberNotFound(member_id));
        }

        let sessions = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM Workouts WHERE member_id = $1")
            .bind(member_id)
            .fetch_one(&mut *tx)
            .await?;

        if sessions > 0 {
            return Err(ApiError::MemberHasSessions { member_id, sessions });
        }

        sqlx::query("DELETE FROM Members WHERE member_id = $1")
            .bind(member_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(member_id, "Deleted member");
        Ok(())
    }
}
