use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rowguard::sqlite::SqlitePool;
use rowguard::Model;

use crate::command::fetch_form;
use crate::util::with_pool;

#[derive(Parser, Debug)]
pub struct Remove {
    id: i64,
}

pub async fn remove_form(pool: &SqlitePool, id: i64) -> Result<()> {
    let form = fetch_form(id, pool).await?;
    form.delete(pool).await?;
    Ok(())
}

impl Remove {
    pub fn run(self) -> Result<()> {
        let id = self.id;
        with_pool(|pool| async move { remove_form(&pool, id).await })?;
        eprintln!("{} Removed form {id}", "SUCCESS".green());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{add_form, list_forms};
    use crate::util::memory_pool;

    #[tokio::test]
    async fn test_remove_form() {
        let pool = memory_pool().await;
        let form = add_form(&pool, None).await.unwrap();
        remove_form(&pool, form.id).await.unwrap();
        assert!(list_forms(&pool, None, None).await.unwrap().is_empty());

        let err = remove_form(&pool, form.id).await.unwrap_err();
        assert_eq!(err.to_string(), format!("no form with id {}", form.id));

        // the id isn't handed out again
        assert_eq!(add_form(&pool, None).await.unwrap().id, 2);
    }
}
