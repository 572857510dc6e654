//! Saved designs, persisted after every mutation.

use crate::storage::{KeyValueStore, PersistedValue};
use crate::types::{CustomizationSelections, MoodBoardItem};
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

pub const MOOD_BOARD_KEY: &str = "moodBoard";

#[derive(Debug, thiserror::Error)]
pub enum ImportFormatError {
    #[error("Invalid file format. Please import a valid mood board JSON file.")]
    NotJson(#[source] serde_json::Error),

    #[error("Invalid file format. The mood board file must contain a list of designs.")]
    NotAnArray,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImportOutcome {
    Added(usize),
    NothingNew,
}

impl ImportOutcome {
    pub fn message(&self) -> String {
        match self {
            ImportOutcome::Added(1) => "Imported 1 new design.".to_string(),
            ImportOutcome::Added(count) => format!("Imported {count} new designs."),
            ImportOutcome::NothingNew => "No new designs found to import.".to_string(),
        }
    }
}

pub struct MoodBoard {
    items: Vec<MoodBoardItem>,
    storage: PersistedValue<Vec<MoodBoardItem>>,
}

impl MoodBoard {
    /// Best-effort load. Anything unreadable yields an empty board.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let storage = PersistedValue::new(store, MOOD_BOARD_KEY);
        let items = match storage.load() {
            Ok(Some(items)) => items,
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!(error = %err, "failed to load mood board, starting empty");
                Vec::new()
            }
        };
        tracing::debug!(count = items.len(), "mood board loaded");
        Self { items, storage }
    }

    pub fn items(&self) -> &[MoodBoardItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Snapshot a design onto the front of the board. Returns the new item's id.
    pub fn save_design(
        &mut self,
        image_base64: &str,
        style_name: &str,
        customizations: &CustomizationSelections,
    ) -> String {
        let item = MoodBoardItem {
            id: uuid::Uuid::new_v4().to_string(),
            image_base64: image_base64.to_string(),
            style_name: style_name.to_string(),
            customizations: customizations.clone(),
        };
        let id = item.id.clone();
        self.items.insert(0, item);
        self.persist();
        id
    }

    /// Returns whether an item was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        let removed = self.items.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.items)
    }

    pub fn export_to(&self, path: &Path) -> std::io::Result<()> {
        let json = self.export_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    pub fn import_json(&mut self, raw: &str) -> Result<ImportOutcome, ImportFormatError> {
        let value = serde_json::from_str::<Value>(raw).map_err(ImportFormatError::NotJson)?;
        self.import_value(value)
    }

    /// Appends every well-formed candidate whose id is new. Malformed entries are dropped.
    pub fn import_value(&mut self, value: Value) -> Result<ImportOutcome, ImportFormatError> {
        let Value::Array(candidates) = value else {
            return Err(ImportFormatError::NotAnArray);
        };

        let mut seen: HashSet<String> = self.items.iter().map(|item| item.id.clone()).collect();
        let mut fresh = Vec::new();
        for candidate in candidates {
            let Some(item) = parse_candidate(&candidate) else {
                continue;
            };
            if seen.insert(item.id.clone()) {
                fresh.push(item);
            }
        }

        if fresh.is_empty() {
            return Ok(ImportOutcome::NothingNew);
        }

        let added = fresh.len();
        self.items.extend(fresh);
        self.persist();
        tracing::info!(added, "imported mood board items");
        Ok(ImportOutcome::Added(added))
    }

    fn persist(&self) {
        if let Err(err) = self.storage.save(&self.items) {
            tracing::error!(error = %err, "failed to save mood board");
        }
    }
}

/// Shape check only: `id` must be a non-empty string or a number, `imageBase64`
/// and `styleName` non-empty strings.
fn parse_candidate(candidate: &Value) -> Option<MoodBoardItem> {
    let required = |key: &str| {
        candidate
            .get(key)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    let customizations = candidate
        .get("customizations")
        .and_then(Value::as_object)
        .map(|map| {
            map.iter()
                .filter_map(|(category, option)| {
                    option.as_str().map(|option| (category.clone(), option.to_string()))
                })
                .collect()
        })
        .unwrap_or_default();

    // Exported boards from other tools may carry numeric ids.
    let id = match candidate.get("id")? {
        Value::Number(number) => number.to_string(),
        other => other.as_str().filter(|id| !id.is_empty())?.to_string(),
    };

    Some(MoodBoardItem {
        id,
        image_base64: required("imageBase64")?,
        style_name: required("styleName")?,
        customizations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_candidate_requires_fields() {
        let full = json!({"id": "1", "imageBase64": "AAAA", "styleName": "Coastal"});
        assert!(parse_candidate(&full).is_some());

        let missing = json!({"id": "1", "styleName": "Coastal"});
        assert!(parse_candidate(&missing).is_none());

        let blank = json!({"id": "", "imageBase64": "AAAA", "styleName": "Coastal"});
        assert!(parse_candidate(&blank).is_none());

        assert!(parse_candidate(&json!("just a string")).is_none());
    }

    #[test]
    fn test_parse_candidate_accepts_numeric_id() {
        let numeric = json!({"id": 7, "imageBase64": "AAAA", "styleName": "Coastal"});
        assert_eq!(parse_candidate(&numeric).map(|item| item.id), Some("7".to_string()));

        let boolean = json!({"id": true, "imageBase64": "AAAA", "styleName": "Coastal"});
        assert!(parse_candidate(&boolean).is_none());
    }

    #[test]
    fn test_parse_candidate_keeps_string_customizations() {
        let candidate = json!({
            "id": "1",
            "imageBase64": "AAAA",
            "styleName": "Coastal",
            "customizations": {"Flooring": "Walnut", "Lighting": 3}
        });
        let item = parse_candidate(&candidate).unwrap();
        assert_eq!(item.customizations.len(), 1);
        assert_eq!(item.customizations["Flooring"], "Walnut");
    }

    #[test]
    fn test_import_outcome_message() {
        assert_eq!(ImportOutcome::Added(1).message(), "Imported 1 new design.");
        assert_eq!(ImportOutcome::Added(4).message(), "Imported 4 new designs.");
        assert_eq!(
            ImportOutcome::NothingNew.message(),
            "No new designs found to import."
        );
    }
}
