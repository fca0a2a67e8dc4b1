pub mod catalog;
pub mod name;

pub use catalog::{CatalogEntry, CatalogName};
pub use name::{ItemName, NameError};
