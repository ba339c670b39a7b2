pub mod reporter;
pub mod row;
