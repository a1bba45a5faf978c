use anyhow::{bail, Result};
use clap::Parser;
use colored::Colorize;
use rowguard::sqlite::SqlitePool;
use rowguard::{Error, Model};

use crate::command::fetch_form;
use crate::schema::Form;
use crate::util::with_pool;

#[derive(Parser, Debug)]
pub struct Rename {
    id: i64,
    name: String,
}

pub async fn rename_form(pool: &SqlitePool, id: i64, name: String) -> Result<Form> {
    let mut form = fetch_form(id, pool).await?;
    form.name = name;
    match form.update_all_fields(pool).await {
        Ok(form) => Ok(form),
        Err(Error::UniqueViolation(_)) => bail!("another form already has that name"),
        Err(e) => Err(e.into()),
    }
}

impl Rename {
    pub fn run(self) -> Result<()> {
        let Rename { id, name } = self;
        let form = with_pool(|pool| async move { rename_form(&pool, id, name).await })?;
        eprintln!("{} Renamed form {}", "SUCCESS".green(), form.id);
        println!("{form}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::add_form;
    use crate::util::memory_pool;

    #[tokio::test]
    async fn test_rename_form() {
        let pool = memory_pool().await;
        let first = add_form(&pool, Some("draft".to_string())).await.unwrap();
        add_form(&pool, Some("final".to_string())).await.unwrap();

        let renamed = rename_form(&pool, first.id, "memo".to_string()).await.unwrap();
        assert_eq!(renamed.name, "memo");
        assert_eq!(fetch_form(first.id, &pool).await.unwrap().name, "memo");

        let err = rename_form(&pool, first.id, "final".to_string()).await.unwrap_err();
        assert_eq!(err.to_string(), "another form already has that name");

        let err = rename_form(&pool, 42, "ghost".to_string()).await.unwrap_err();
        assert_eq!(err.to_string(), "no form with id 42");
    }
}
