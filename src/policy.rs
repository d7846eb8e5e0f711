// Copyright 2025 Cowboy AI, LLC.

//! Configuration for the deep sort engine

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Policy controlling which parts of a structure a deep sort touches.
///
/// Missing fields in a policy document take their default values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SortPolicy {
    /// Reorder mapping entries. When off, mappings keep insertion order and
    /// only their keys and values are sorted.
    pub reorder_entries: bool,
    /// Recursively sort mapping keys that are sequences or mappings.
    pub canonicalize_keys: bool,
    /// Apply the single-level sort of host collections. When off, host
    /// collections are left as they are.
    pub sort_host_collections: bool,
}

impl Default for SortPolicy {
    fn default() -> Self {
        Self {
            reorder_entries: true,
            canonicalize_keys: true,
            sort_host_collections: true,
        }
    }
}

impl SortPolicy {
    /// Parse a policy from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// JSON Schema describing a policy document.
    pub fn json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(SortPolicy)
    }

    /// Set whether mapping entries are reordered.
    pub fn with_reorder_entries(mut self, enabled: bool) -> Self {
        self.reorder_entries = enabled;
        self
    }

    /// Set whether container keys are recursively sorted.
    pub fn with_canonicalize_keys(mut self, enabled: bool) -> Self {
        self.canonicalize_keys = enabled;
        self
    }

    /// Set whether host collections are sorted.
    pub fn with_sort_host_collections(mut self, enabled: bool) -> Self {
        self.sort_host_collections = enabled;
        self
    }
}
