/// A model is a struct that represents a row in a SQLite table.
/// Using the `#[derive(rowguard::Model)]` macro, it acquires the following traits:
///
///  - `rowguard::model::Model`, giving it direct database access, e.g. `insert`, `update_all_fields`, etc.
///  - `rowguard::model::TableMeta`, which provides table metadata (table name, column definitions)
///  - `sqlx::FromRow`, so rows decode straight into the struct
///
/// With `#[rowguard(insert = "InsertX")]` it also gets an insertion struct implementing `Insertable`.
use crate::query_builder::SelectQueryBuilder;
use crate::schema::{quote_ident, ColumnDef};
use crate::statement;
use crate::validate::ValidationErrors;
use crate::Result;
use futures::future::BoxFuture;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteRow};

pub trait TableMeta {
    fn table_name() -> &'static str;

    /// All table columns, in declaration order.
    fn table_columns() -> &'static [&'static str];

    fn primary_key() -> &'static str;

    fn column_defs() -> &'static [ColumnDef];
}

/// A struct that is `Insertable` has the same fields as the model, minus the columns the database
/// fills in. Concretely, if you have a Form struct:
/// #[derive(rowguard::Model)]
/// #[rowguard(insert = "InsertForm")]
/// struct Form {
///     #[rowguard(primary_key, auto_increment)]
///     id: i64,
///     #[rowguard(default_value = "<NAME>")]
///     name: String,
/// }
///
/// Then the `Insertable` struct looks like:
/// struct InsertForm {
///     name: Option<String>,
/// }
/// where `None` leaves the column to its database default.
pub trait Insertable
where
    Self: Sized + Send,
{
    type Model: Model;

    fn insert<'e, E>(self, db: E) -> BoxFuture<'e, Result<Self::Model>>
    where
        E: 'e + sqlx::Executor<'e, Database = Sqlite>;
}

/// The core trait.
pub trait Model
where
    Self: TableMeta + Sized + Send + Sync + Unpin + 'static,
    Self: for<'r> sqlx::FromRow<'r, SqliteRow>,
{
    type PrimaryKey: Send + 'static + sqlx::Type<Sqlite> + for<'q> sqlx::Encode<'q, Sqlite>;

    /// Check column constraints that can be verified without the database, like sizes.
    fn check_columns(&self) -> std::result::Result<(), ValidationErrors>;

    /// Insert every column, including the primary key.
    fn insert<'e, E>(self, db: E) -> BoxFuture<'e, Result<Self>>
    where
        E: 'e + sqlx::Executor<'e, Database = Sqlite>;

    /// `Model` objects can't track what fields are updated, so this method will update all fields.
    fn update_all_fields<'e, E>(self, db: E) -> BoxFuture<'e, Result<Self>>
    where
        E: 'e + sqlx::Executor<'e, Database = Sqlite>;

    fn delete<'e, E>(self, db: E) -> BoxFuture<'e, Result<()>>
    where
        E: 'e + sqlx::Executor<'e, Database = Sqlite>;

    /// Get by primary key.
    fn fetch_one<'e, E>(id: Self::PrimaryKey, db: E) -> BoxFuture<'e, Result<Self>>
    where
        E: 'e + sqlx::Executor<'e, Database = Sqlite>;

    /// Every row, ordered by primary key.
    fn fetch_all<'e, E>(db: E) -> BoxFuture<'e, Result<Vec<Self>>>
    where
        E: 'e + sqlx::Executor<'e, Database = Sqlite>,
    {
        Box::pin(async move {
            let sql = format!(
                "{} ORDER BY {}",
                statement::select(Self::table_name(), Self::table_columns()),
                quote_ident(Self::primary_key())
            );
            let rows = sqlx::query_as::<_, Self>(&sql).fetch_all(db).await?;
            Ok(rows)
        })
    }

    /// Create a `SelectQueryBuilder` to build a query.
    fn select<'args>() -> SelectQueryBuilder<'args, Self> {
        SelectQueryBuilder::default()
    }

    /// If query building isn't meeting your needs, use this method to query the table using raw SQL.
    fn query(query: &str) -> sqlx::query::QueryAs<'_, Sqlite, Self, SqliteArguments<'_>> {
        sqlx::query_as(query)
    }
}
