use fitness_center::api::routes::create_routes;
use fitness_center::config::{AppConfig, DatabaseConfig};
use fitness_center::database::Database;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_config = AppConfig::from_env()?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&app_config.log_level))
        .init();

    let database_config = DatabaseConfig::from_env()?;
    info!(?database_config, "Database configuration loaded");
    let database = Database::new(&database_config)?;

    if app_config.init_schema {
        database.init_schema().await?;
    }

    let app = create_routes(database);

    let address = app_config.server_address();
    let listener = TcpListener::bind(&address).await?;
    info!("Fitness center server starting on http://{}", address);
    info!("Health check available at http://{}/health", address);

    axum::serve(listener, app).await?;

    Ok(())
}
