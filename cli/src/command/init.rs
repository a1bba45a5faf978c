use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rowguard::sqlite::SqlitePool;

use crate::schema::Form;
use crate::util::with_pool;

/// Create the form table if it doesn't exist.
#[derive(Parser, Debug)]
pub struct Init {}

pub async fn init_tables(pool: &SqlitePool) -> Result<()> {
    rowguard::schema::migrate::<Form, _>(pool).await?;
    Ok(())
}

impl Init {
    pub fn run(self) -> Result<()> {
        with_pool(|pool| async move { init_tables(&pool).await })?;
        eprintln!("{} Created table form", "SUCCESS".green());
        Ok(())
    }
}
