//! Parses `#[validate(...)]` and `#[rowguard(...)]` attributes into plain metadata.
//!
//! Nothing here depends on `proc_macro`, so metadata can be built and inspected in ordinary tests.
pub use ext::*;
pub use ident::*;
pub use metadata::*;
pub use ttype::*;

mod ext;
mod ident;
mod metadata;
pub mod ttype;
