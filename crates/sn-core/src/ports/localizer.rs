//! Localizer port
//!
//! Every user-facing string resolves through this lookup; nothing in the
//! wizard hardcodes display text. Lookups are synchronous, catalogs are
//! loaded once at startup.

pub trait LocalizerPort: Send + Sync {
    /// Resolves `key` to a catalog entry, or returns `fallback` when the
    /// catalog has none.
    fn translate(&self, key: &str, fallback: &str) -> String;
}
