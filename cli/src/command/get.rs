use anyhow::{anyhow, Result};
use clap::Parser;
use rowguard::sqlite::SqlitePool;
use rowguard::Model;

use crate::schema::Form;
use crate::util::with_pool;

#[derive(Parser, Debug)]
pub struct Get {
    id: i64,
}

/// Fetch by id, turning a missing row into a readable error.
pub async fn fetch_form(id: i64, pool: &SqlitePool) -> Result<Form> {
    Form::fetch_one(id, pool).await.map_err(|e| match e {
        e if e.is_not_found() => anyhow!("no form with id {id}"),
        e => anyhow::Error::from(e),
    })
}

impl Get {
    pub fn run(self) -> Result<()> {
        let id = self.id;
        let form = with_pool(|pool| async move { fetch_form(id, &pool).await })?;
        println!("{form}");
        Ok(())
    }
}
