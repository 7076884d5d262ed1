use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgSslMode},
};
use std::{str::FromStr, sync::Arc};

pub mod business;
pub mod impersonation;
pub mod profile;
pub mod route_memory;

pub mod models {
    pub mod business;
    pub mod impersonation;
    pub mod profile;
}

pub mod dtos {
    pub mod business;
    pub mod impersonation;
}

/// Connects to the database named by `database_url`, creating it first if it
/// does not exist, and runs pending migrations.
pub async fn setup(
    database_url: &str,
    require_ssl: bool,
) -> Result<Arc<PgPool>, Box<dyn std::error::Error>> {
    ensure_database(database_url, require_ssl).await?;

    let mut options = PgConnectOptions::from_str(database_url)?;
    if require_ssl {
        options = options.ssl_mode(PgSslMode::Require);
    }
    let pool = PgPool::connect_with(options).await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(Arc::new(pool))
}

/// Creates the target database via the maintenance database when missing.
async fn ensure_database(
    database_url: &str,
    require_ssl: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let url = url::Url::parse(database_url)?;
    let db_name = url.path().trim_start_matches('/');

    let mut admin_url = url.clone();
    admin_url.set_path("/postgres");

    let mut admin_options = PgConnectOptions::from_str(admin_url.as_str())?;
    if require_ssl {
        admin_options = admin_options.ssl_mode(PgSslMode::Require);
    }

    let admin_pool = PgPool::connect_with(admin_options).await?;

    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(db_name)
            .fetch_one(&admin_pool)
            .await?;

    if !exists {
        sqlx::query(&format!("CREATE DATABASE \"{}\"", db_name))
            .execute(&admin_pool)
            .await?;
    }

    admin_pool.close().await;
    Ok(())
}
