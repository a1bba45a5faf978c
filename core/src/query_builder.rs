pub mod placeholder;
mod select;

pub use placeholder::count_placeholders;
pub use select::SelectQueryBuilder;
