pub use self::error::{Error, Result};
pub use self::query_builder::SelectQueryBuilder;
pub use futures::future::BoxFuture;

mod error;
pub mod config;
pub mod json;
pub mod model;
pub mod query_builder;
pub mod schema;
#[doc(hidden)]
pub mod statement;
pub mod validate;
