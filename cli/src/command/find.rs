use anyhow::{anyhow, Result};
use clap::Parser;
use rowguard::sqlite::SqlitePool;

use crate::schema::Form;
use crate::util::with_pool;

/// Look a form up by its unique name.
#[derive(Parser, Debug)]
pub struct Find {
    name: String,
}

pub async fn find_form(pool: &SqlitePool, name: &str) -> Result<Form> {
    Form::fetch_by_name(name, pool)
        .await?
        .ok_or_else(|| anyhow!("no form named {name:?}"))
}

impl Find {
    pub fn run(self) -> Result<()> {
        let name = self.name;
        let form = with_pool(|pool| async move { find_form(&pool, &name).await })?;
        println!("{form}");
        Ok(())
    }
}
