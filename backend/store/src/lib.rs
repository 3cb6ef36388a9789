//! Flat-file JSON stores.
//!
//! Both stores read their whole file into memory at startup and rewrite the
//! whole file on mutation (temp file + rename).

pub mod catalog;
pub mod file;
pub mod profiles;

pub use catalog::{ItemCatalog, ItemId, ItemRecord};
pub use profiles::ProfileStore;
