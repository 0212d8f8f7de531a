pub mod fs;
pub mod geo;
pub mod locale;
pub mod prompt;
pub mod registry;
pub mod session;

pub use geo::HttpGeoDirectory;
pub use locale::JsonCatalog;
pub use prompt::FileCompletionPromptRepository;
pub use registry::HttpRegistrationGateway;
pub use session::{HttpAuthGateway, MemoryTokenStore};
