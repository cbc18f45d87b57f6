use anyhow::{Context, Result};
use std::env;

/// Connection parameters for the fitness tracker database.
///
/// Resolved once at startup and handed to [`crate::database::Database`];
/// there is no pool, every operation opens its own connection.
#[derive(Clone)]
pub struct DatabaseConfig {
    pub database_url: String,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        if let Ok(database_url) = env::var("DATABASE_URL") {
            return Ok(Self::from_url(database_url));
        }

        let host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
        let port: u16 = env::var("DB_PORT")
            .unwrap_or_else(|_| "5432".to_string())
            .parse()
            .context("DB_PORT must be a valid port number")?;
        let name = env::var("DB_NAME").unwrap_or_else(|_| "fitness_tracker".to_string());
        let user = env::var("DB_USER").unwrap_or_else(|_| "postgres".to_string());
        let password = env::var("DB_PASSWORD").unwrap_or_else(|_| "password".to_string());

        Ok(Self::from_url(format!(
            "postgresql://{}:{}@{}:{}/{}",
            user, password, host, port, name
        )))
    }

    pub fn from_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }
}

// Keeps the password out of logs.
impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redacted = match self.database_url.rsplit_once('@') {
            Some((_, location)) => format!("postgresql://***@{}", location),
            None => self.database_url.clone(),
        };
        f.debug_struct("DatabaseConfig")
            .field("database_url", &redacted)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_output_hides_credentials() {
        let config = DatabaseConfig::from_url("postgresql://root:secret@db:5432/fitness_tracker");
        let rendered = format!("{:?}", config);

        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("db:5432/fitness_tracker"));
    }
}
