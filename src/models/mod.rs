//! # Data Models
//!
//! This module contains the SeaORM entities of the booking schema and the
//! service information document.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

pub mod artist;
pub mod show;
pub mod venue;

pub use artist::Entity as Artist;
pub use show::Entity as Show;
pub use venue::Entity as Venue;

/// Basic service information response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    /// The name of the service
    pub service: String,
    /// The version of the service
    pub version: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            service: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Key stored in `name_search`. Folds case in Rust so matching does not
/// depend on the database's `LOWER()`, which only folds ASCII on SQLite.
pub fn search_key(name: &str) -> String {
    name.to_lowercase()
}

/// Encodes a genre list for the JSON `genres` column.
pub fn genres_to_json(genres: &[String]) -> JsonValue {
    JsonValue::Array(genres.iter().cloned().map(JsonValue::String).collect())
}

/// Decodes the JSON `genres` column, skipping anything that is not a string.
pub fn genres_from_json(value: &JsonValue) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
