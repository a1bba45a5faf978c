use anyhow::Result;
use rowguard::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tokio::runtime::Runtime;

use crate::config::Config;

pub(crate) fn create_runtime() -> Result<Runtime> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_io()
        .enable_time()
        .build()?;
    Ok(runtime)
}

pub async fn create_pool(config: &Config) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(config.create_if_missing);
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;
    tracing::debug!(url = %config.database_url, "connected");
    Ok(pool)
}

/// Run `f` against a pool built from the loaded configuration.
pub fn with_pool<F, Fut, T>(f: F) -> Result<T>
where
    F: FnOnce(SqlitePool) -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let config = crate::config::load_config()?;
    let runtime = create_runtime()?;
    runtime.block_on(async {
        let pool = create_pool(&config).await?;
        let result = f(pool.clone()).await;
        pool.close().await;
        result
    })
}

/// A fresh in-memory database with the form table, for command tests.
#[cfg(test)]
pub async fn memory_pool() -> SqlitePool {
    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        max_connections: 1,
        create_if_missing: false,
    };
    let pool = create_pool(&config).await.unwrap();
    crate::command::init_tables(&pool).await.unwrap();
    pool
}
