use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{ConnectOptions, Connection, Executor};
use std::str::FromStr;
use tracing::{debug, info};

use crate::config::DatabaseConfig;

const SCHEMA: &str = include_str!("../../sql/schema.sql");

/// Per-request gateway to the relational store.
///
/// Holds only the parsed connection options. Each service call opens a
/// fresh [`PgConnection`] through [`Database::connect`] and owns it for the
/// duration of the operation; dropping it closes the socket, so the
/// connection is released on success, validation failure and database
/// error alike.
#[derive(Clone)]
pub struct Database {
    options: PgConnectOptions,
}

impl Database {
    pub fn new(config: &DatabaseConfig) -> Result<Self> {
        let options = PgConnectOptions::from_str(&config.database_url)
            .context("DATABASE_URL is not a valid PostgreSQL connection string")?
            .disable_statement_logging();

        Ok(Self { options })
    }

    pub async fn connect(&self) -> Result<PgConnection, sqlx::Error> {
        debug!(
            host = self.options.get_host(),
            database = self.options.get_database().unwrap_or_default(),
            "Opening database connection"
        );
        PgConnection::connect_with(&self.options).await
    }

    /// Create the Members and Workouts tables if they do not exist yet.
    pub async fn init_schema(&self) -> Result<(), sqlx::Error> {
        let mut conn = self.connect().await?;
        conn.execute(SCHEMA).await?;
        conn.close().await?;

        info!("Database schema ready");
        Ok(())
    }
}
