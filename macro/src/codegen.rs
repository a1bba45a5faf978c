pub mod from_row;
pub mod insert_model;
pub mod meta;
pub mod model;
pub mod validate;
