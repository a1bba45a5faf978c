use crate::error::{Error, Result};
use crate::model::Model;
use crate::schema::quote_ident;
use crate::query_builder::count_placeholders;
use sqlx::sqlite::{Sqlite, SqliteArguments};
use sqlx::{Arguments, Executor};
use std::marker::PhantomData;

pub struct SelectQueryBuilder<'args, M> {
    columns: Vec<String>,
    wheres: Vec<String>,
    order_by: Vec<String>,
    limit: Option<usize>,
    offset: Option<usize>,
    arguments: SqliteArguments<'args>,
    argument_count: usize,
    bind_error: Option<String>,
    model: PhantomData<M>,
}

impl<'args, M: Model> SelectQueryBuilder<'args, M> {
    pub async fn fetch_all<'executor, E>(self, db: E) -> Result<Vec<M>>
    where
        E: Executor<'executor, Database = Sqlite>,
    {
        let (sql, args) = self.into_query_and_args()?;
        let rows = sqlx::query_as_with::<_, M, _>(&sql, args).fetch_all(db).await?;
        Ok(rows)
    }

    pub async fn fetch_one<'executor, E>(self, db: E) -> Result<M>
    where
        E: Executor<'executor, Database = Sqlite>,
    {
        let (sql, args) = self.into_query_and_args()?;
        let row = sqlx::query_as_with::<_, M, _>(&sql, args).fetch_one(db).await?;
        Ok(row)
    }

    pub async fn fetch_optional<'executor, E>(self, db: E) -> Result<Option<M>>
    where
        E: Executor<'executor, Database = Sqlite>,
    {
        let (sql, args) = self.into_query_and_args()?;
        let row = sqlx::query_as_with::<_, M, _>(&sql, args).fetch_optional(db).await?;
        Ok(row)
    }

    /// Add a WHERE clause to the query. Clauses are joined with AND.
    /// Do not use format! to add parameters. Instead, use `?` as the placeholder, and add
    /// parameters with [`bind`](Self::bind).
    ///
    /// # Arguments
    /// * `clause` - The clause to add. Examples: "id = ?", "name LIKE ?"
    pub fn where_(mut self, clause: &'static str) -> Self {
        self.wheres.push(clause.to_string());
        self
    }

    /// Convenience method to add a `WHERE` and bind a value in one call.
    pub fn where_bind<T>(self, clause: &'static str, value: T) -> Self
    where
        T: 'args + Send + sqlx::Type<Sqlite> + sqlx::Encode<'args, Sqlite>,
    {
        self.where_(clause).bind(value)
    }

    pub fn order_asc(mut self, column: &str) -> Self {
        self.order_by.push(format!("{column} ASC"));
        self
    }

    pub fn order_desc(mut self, column: &str) -> Self {
        self.order_by.push(format!("{column} DESC"));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Bind an argument to the query.
    pub fn bind<T>(mut self, value: T) -> Self
    where
        T: 'args + Send + sqlx::Type<Sqlite> + sqlx::Encode<'args, Sqlite>,
    {
        if let Err(e) = self.arguments.add(value) {
            self.bind_error.get_or_insert_with(|| e.to_string());
        }
        self.argument_count += 1;
        self
    }

    pub fn to_sql(&self) -> String {
        let mut sql = format!("SELECT {} FROM {}", self.columns.join(", "), quote_ident(M::table_name()));
        if !self.wheres.is_empty() {
            let clauses = self.wheres.iter().map(|w| format!("({w})")).collect::<Vec<_>>();
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        if !self.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order_by.join(", "));
        }
        match (self.limit, self.offset) {
            (Some(limit), Some(offset)) => sql.push_str(&format!(" LIMIT {limit} OFFSET {offset}")),
            (Some(limit), None) => sql.push_str(&format!(" LIMIT {limit}")),
            (None, Some(offset)) => sql.push_str(&format!(" LIMIT -1 OFFSET {offset}")),
            (None, None) => {}
        }
        sql
    }

    pub fn into_query_and_args(self) -> Result<(String, SqliteArguments<'args>)> {
        if let Some(e) = &self.bind_error {
            return Err(Error::RowguardError(format!("Failed to bind query argument: {e}")));
        }
        let sql = self.to_sql();
        let placeholder_count = count_placeholders(&sql);
        if placeholder_count != self.argument_count {
            return Err(Error::RowguardError(format!(
                "Failing to build query. {} placeholders were found in the query, but \
                {} arguments were provided.",
                placeholder_count, self.argument_count,
            )));
        }
        tracing::debug!(%sql, "select");
        Ok((sql, self.arguments))
    }
}

impl<'args, M: Model> Default for SelectQueryBuilder<'args, M> {
    fn default() -> Self {
        Self {
            columns: M::table_columns().iter().map(|c| quote_ident(c)).collect(),
            wheres: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
            arguments: SqliteArguments::default(),
            argument_count: 0,
            bind_error: None,
            model: PhantomData,
        }
    }
}
