use anyhow::Result;
use clap::Parser;
use rowguard::schema::create_table;

use crate::schema::Form;

/// Print the DDL for the form table.
#[derive(Parser, Debug)]
pub struct Schema {}

impl Schema {
    pub fn run(self) -> Result<()> {
        println!("{};", create_table::<Form>());
        Ok(())
    }
}
