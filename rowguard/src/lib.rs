//! Derive-driven validation and SQLite mapping.
//!
//! ```ignore
//! #[derive(Validate, Deserialize)]
//! #[validate(rename_all = "PascalCase")]
//! struct Person {
//!     #[validate(required, one_of("male", "female"))]
//!     gender: String,
//! }
//!
//! #[derive(Model)]
//! #[rowguard(insert = "InsertForm")]
//! struct Form {
//!     #[rowguard(primary_key, auto_increment)]
//!     id: i64,
//!     #[rowguard(size = 255, default_value = "<NAME>", unique)]
//!     name: String,
//! }
//! ```
pub use rowguard_core::BoxFuture;
pub use rowguard_core::SelectQueryBuilder;
pub use rowguard_core::{Error, Result};
pub use rowguard_core::{config, json, model, query_builder, schema, validate};

pub use rowguard_core::model::{Insertable, Model, TableMeta};
pub use rowguard_core::validate::Validate;
pub use rowguard_macro::{Model, Validate};

pub use sqlx::sqlite;
pub use sqlx::Error as SqlxError;
pub use sqlx::{query, query_as, query_as_with, query_with};
pub use sqlx::{Acquire, Arguments, Connection, Executor, FromRow, Row};

#[doc(hidden)]
pub mod __private {
    pub use futures::TryStreamExt;
    pub use rowguard_core::statement;
}
