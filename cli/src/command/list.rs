use anyhow::Result;
use clap::Parser;
use rowguard::sqlite::SqlitePool;
use rowguard::Model;

use crate::schema::Form;
use crate::util::with_pool;

#[derive(Parser, Debug)]
pub struct List {
    #[arg(long, short)]
    limit: Option<usize>,

    #[arg(long, short)]
    offset: Option<usize>,
}

pub async fn list_forms(pool: &SqlitePool, limit: Option<usize>, offset: Option<usize>) -> Result<Vec<Form>> {
    let mut query = Form::select().order_asc("id");
    if let Some(limit) = limit {
        query = query.limit(limit);
    }
    if let Some(offset) = offset {
        query = query.offset(offset);
    }
    Ok(query.fetch_all(pool).await?)
}

impl List {
    pub fn run(self) -> Result<()> {
        let List { limit, offset } = self;
        let forms = with_pool(|pool| async move { list_forms(&pool, limit, offset).await })?;
        for form in forms {
            println!("{form}");
        }
        Ok(())
    }
}
