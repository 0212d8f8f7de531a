//! Geographic directory models.
//!
//! States and cities are fetched from an external directory service and
//! cached per wizard session. Each collection moves through an explicit
//! lifecycle so the surface can distinguish "still loading" from "the
//! directory is unreachable" from "loaded, possibly empty".

use serde::{Deserialize, Serialize};

/// A state or union territory offered in the state selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateOption {
    /// ISO-style short code, e.g. `"UP"`.
    pub code: String,
    /// Display name, e.g. `"Uttar Pradesh"`.
    pub name: String,
}

/// A city/district offered in the district selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityOption {
    /// Directory-assigned numeric identifier.
    pub id: i64,
    /// Display name, e.g. `"Lucknow"`.
    pub name: String,
}

/// Lifecycle of a remotely loaded option collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "options", rename_all = "snake_case")]
pub enum GeoResource<T> {
    /// The load failed or the directory is not configured.
    Unavailable,
    /// A load is in flight.
    Loading,
    /// Options are available (the list may legitimately be empty).
    Loaded(Vec<T>),
}

impl<T> GeoResource<T> {
    /// Returns the loaded options, or an empty slice in any other phase.
    pub fn options(&self) -> &[T] {
        match self {
            GeoResource::Loaded(options) => options,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, GeoResource::Loading)
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, GeoResource::Unavailable)
    }
}

/// Per-session cache of directory lookups, carried inside the wizard state.
///
/// `selected_state` records which state the current `cities` collection
/// belongs to. City results arriving for any other state are stale and must
/// be dropped rather than applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoCache {
    pub states: GeoResource<StateOption>,
    pub selected_state: Option<String>,
    pub cities: GeoResource<CityOption>,
}

impl Default for GeoCache {
    fn default() -> Self {
        Self {
            // A state load is kicked off as soon as the wizard opens.
            states: GeoResource::Loading,
            selected_state: None,
            // No state selected yet, so the city list is an empty, settled
            // collection rather than a pending one.
            cities: GeoResource::Loaded(Vec::new()),
        }
    }
}

impl GeoCache {
    /// True when `state_code` matches the state the session is currently on.
    ///
    /// Guards against applying city results that raced a newer selection.
    pub fn is_current_state(&self, state_code: &str) -> bool {
        self.selected_state.as_deref() == Some(state_code)
    }
}

/// Options that carry a display name and can be ordered by it.
pub trait NamedOption {
    fn display_name(&self) -> &str;
}

impl NamedOption for StateOption {
    fn display_name(&self) -> &str {
        &self.name
    }
}

impl NamedOption for CityOption {
    fn display_name(&self) -> &str {
        &self.name
    }
}

/// Sorts options alphabetically by display name, case-insensitively.
///
/// Directory adapters call this before handing results to the wizard so the
/// selectors always render in a stable order regardless of upstream order.
pub fn sort_by_name<T: NamedOption>(options: &mut [T]) {
    options.sort_by(|a, b| {
        a.display_name()
            .to_lowercase()
            .cmp(&b.display_name().to_lowercase())
    });
}
