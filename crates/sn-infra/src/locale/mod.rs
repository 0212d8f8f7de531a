//! Localisation adapters

mod json_catalog;

pub use json_catalog::JsonCatalog;
