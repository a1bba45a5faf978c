use anyhow::{bail, Result};
use clap::Parser;
use colored::Colorize;
use rowguard::model::Insertable;
use rowguard::sqlite::SqlitePool;
use rowguard::Error;

use crate::schema::{Form, InsertForm};
use crate::util::with_pool;

/// Insert a form. Without a name the database default is used.
#[derive(Parser, Debug)]
pub struct Add {
    name: Option<String>,
}

pub async fn add_form(pool: &SqlitePool, name: Option<String>) -> Result<Form> {
    match (InsertForm { name: name.clone() }).insert(pool).await {
        Ok(form) => Ok(form),
        Err(Error::UniqueViolation(_)) => {
            bail!("a form named {:?} already exists", name.as_deref().unwrap_or("<NAME>"))
        }
        Err(e) => Err(e.into()),
    }
}

impl Add {
    pub fn run(self) -> Result<()> {
        let name = self.name;
        let form = with_pool(|pool| async move { add_form(&pool, name).await })?;
        eprintln!("{} Added form {}", "SUCCESS".green(), form.id);
        println!("{form}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::memory_pool;

    #[tokio::test]
    async fn test_add_uses_default_name() {
        let pool = memory_pool().await;
        let form = add_form(&pool, None).await.unwrap();
        assert_eq!(form.id, 1);
        assert_eq!(form.name, "<NAME>");

        let err = add_form(&pool, None).await.unwrap_err();
        assert_eq!(err.to_string(), "a form named \"<NAME>\" already exists");
    }

    #[tokio::test]
    async fn test_add_named() {
        let pool = memory_pool().await;
        assert_eq!(add_form(&pool, Some("report".to_string())).await.unwrap().name, "report");
        let err = add_form(&pool, Some("report".to_string())).await.unwrap_err();
        assert_eq!(err.to_string(), "a form named \"report\" already exists");

        let err = add_form(&pool, Some("x".repeat(256))).await.unwrap_err();
        assert!(err.to_string().contains("name must be at most 255 characters"), "{err}");
    }
}
