//! Geographic directory adapters

mod http_directory;

pub use http_directory::HttpGeoDirectory;
