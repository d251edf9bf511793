//! Common serde helpers for SurrealDB records and patch payloads

use serde::{Deserialize, Deserializer};
use surrealdb::sql::{Id, Thing};

/// Extract the bare record key from a SurrealDB `Thing`
///
/// `Thing::to_string()` renders `table:⟨key⟩` with escaping for keys that
/// contain hyphens (every UUID does); API ids are the raw key.
pub fn record_key(thing: &Thing) -> String {
    match &thing.id {
        Id::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Deserialize a patch field that distinguishes "absent" from "explicit null"
///
/// - field missing  → `None` (leave stored value untouched)
/// - field is null  → `Some(None)` (clear the stored value)
/// - field is value → `Some(Some(value))`
///
/// Use together with `#[serde(default)]` so absent fields default to `None`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
