mod add;
mod check;
mod find;
mod get;
mod init;
mod list;
mod remove;
mod rename;
mod schema;

pub use add::*;
pub use check::*;
pub use find::*;
pub use get::*;
pub use init::*;
pub use list::*;
pub use remove::*;
pub use rename::*;
pub use schema::*;
