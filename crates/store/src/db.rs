use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{info, warn};

use docdex_core::config::PostgresConfig;

/// Create a PostgreSQL connection pool and run migrations.
/// Returns None when POSTGRES_URL is not configured or the store is
/// unreachable; persistence is then skipped, never fatal.
pub async fn init_pg_pool(config: &PostgresConfig) -> Option<PgPool> {
    let Some(url) = config.url.as_deref() else {
        warn!("POSTGRES_URL not configured — database persistence disabled");
        return None;
    };

    match PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(url)
        .await
    {
        Ok(pool) => {
            info!("PostgreSQL connected");
            match sqlx::migrate!("../../migrations").run(&pool).await {
                Ok(_) => {
                    info!("Database migrations applied");
                    Some(pool)
                }
                Err(e) => {
                    warn!("Failed to run migrations: {} — persistence disabled", e);
                    None
                }
            }
        }
        Err(e) => {
            warn!("Failed to connect to PostgreSQL: {} — persistence disabled", e);
            None
        }
    }
}
