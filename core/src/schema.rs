//! DDL for models, rendered from the column definitions `#[derive(Model)]` emits.
use crate::model::TableMeta;
use crate::Result;
use itertools::Itertools;
use sqlx::{Executor, Sqlite};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    Integer,
    Real,
    Boolean,
    Text,
    Blob,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub sql_type: SqlType,
    pub primary_key: bool,
    pub auto_increment: bool,
    pub nullable: bool,
    pub unique: bool,
    /// Maximum length in characters.
    pub size: Option<usize>,
    pub default: Option<&'static str>,
}

impl ColumnDef {
    pub const fn new(name: &'static str, sql_type: SqlType) -> Self {
        Self {
            name,
            sql_type,
            primary_key: false,
            auto_increment: false,
            nullable: false,
            unique: false,
            size: None,
            default: None,
        }
    }

    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub const fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub const fn size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    pub const fn default(mut self, value: &'static str) -> Self {
        self.default = Some(value);
        self
    }

    /// The column clause of a CREATE TABLE statement.
    pub fn to_sql(&self) -> String {
        let name = quote_ident(self.name);
        let mut sql = format!("{name} {}", self.type_name());
        if self.primary_key {
            sql.push_str(" PRIMARY KEY");
            if self.auto_increment {
                sql.push_str(" AUTOINCREMENT");
            }
        }
        if !self.nullable {
            sql.push_str(" NOT NULL");
        }
        if let Some(default) = self.default {
            sql.push_str(" DEFAULT ");
            match self.sql_type {
                SqlType::Text | SqlType::Blob => sql.push_str(&quote_literal(default)),
                _ => sql.push_str(default),
            }
        }
        if self.unique && !self.primary_key {
            sql.push_str(" UNIQUE");
        }
        if let (SqlType::Text, Some(size)) = (self.sql_type, self.size) {
            sql.push_str(&format!(" CHECK (length({name}) <= {size})"));
        }
        sql
    }

    fn type_name(&self) -> String {
        match (self.sql_type, self.size) {
            (SqlType::Integer, _) => "INTEGER".to_string(),
            (SqlType::Real, _) => "REAL".to_string(),
            (SqlType::Boolean, _) => "BOOLEAN".to_string(),
            (SqlType::Text, Some(size)) => format!("VARCHAR({size})"),
            (SqlType::Text, None) => "TEXT".to_string(),
            (SqlType::Blob, _) => "BLOB".to_string(),
        }
    }
}

pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

pub fn create_table_sql(table: &str, columns: &[ColumnDef]) -> String {
    let body = columns.iter().map(|c| format!("    {}", c.to_sql())).join(",\n");
    format!("CREATE TABLE IF NOT EXISTS {} (\n{body}\n)", quote_ident(table))
}

pub fn create_table<M: TableMeta>() -> String {
    create_table_sql(M::table_name(), M::column_defs())
}

/// Create the table for `M` if it doesn't exist yet.
pub async fn migrate<'c, M, E>(db: E) -> Result<()>
where
    M: TableMeta,
    E: Executor<'c, Database = Sqlite>,
{
    let sql = create_table::<M>();
    tracing::debug!(table = M::table_name(), %sql, "creating table");
    db.execute(sql.as_str()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORM: &[ColumnDef] = &[
        ColumnDef::new("id", SqlType::Integer).primary_key().auto_increment(),
        ColumnDef::new("name", SqlType::Text).size(255).default("<NAME>").unique(),
    ];

    #[test]
    fn test_form_ddl() {
        assert_eq!(
            create_table_sql("form", FORM),
            "CREATE TABLE IF NOT EXISTS \"form\" (\n    \
             \"id\" INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,\n    \
             \"name\" VARCHAR(255) NOT NULL DEFAULT '<NAME>' UNIQUE CHECK (length(\"name\") <= 255)\n)"
        );
    }

    #[test]
    fn test_column_clauses() {
        let c = ColumnDef::new("note", SqlType::Text).nullable();
        assert_eq!(c.to_sql(), "\"note\" TEXT");
        let c = ColumnDef::new("score", SqlType::Integer).default("5");
        assert_eq!(c.to_sql(), "\"score\" INTEGER NOT NULL DEFAULT 5");
        let c = ColumnDef::new("motto", SqlType::Text).default("it's");
        assert_eq!(c.to_sql(), "\"motto\" TEXT NOT NULL DEFAULT 'it''s'");
        let c = ColumnDef::new("code", SqlType::Text).primary_key().unique();
        assert_eq!(c.to_sql(), "\"code\" TEXT PRIMARY KEY NOT NULL");
    }

    #[test]
    fn test_quote_ident() {
        assert_eq!(quote_ident("type"), "\"type\"");
        assert_eq!(quote_ident("a\"b"), "\"a\"\"b\"");
    }
}
