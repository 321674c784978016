//! User-facing import/export of the full application state as one portable
//! JSON file. The snapshot carries the same four entities the persistence
//! gateway stores, but as a single pretty-printed object the user can back
//! up, edit, and re-import.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::ContentRecord;
use crate::errors::SnapshotError;
use crate::state::Prefs;

/// Export filename. Part of the external contract; import tooling on the
/// other side looks for exactly this name.
pub const EXPORT_FILE_NAME: &str = "aflambox_data.json";

/// The combined serialized form of the catalog plus all preference maps.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub content_items: Vec<ContentRecord>,
    pub watchlist: Vec<u32>,
    pub user_ratings: HashMap<u32, u8>,
    pub watch_progress: HashMap<u32, f32>,
}

impl Snapshot {
    pub fn from_state(catalog: &[ContentRecord], prefs: &Prefs) -> Self {
        let mut watchlist: Vec<u32> = prefs.watchlist.iter().copied().collect();
        watchlist.sort_unstable();
        Self {
            content_items: catalog.to_vec(),
            watchlist,
            user_ratings: prefs.ratings.clone(),
            watch_progress: prefs.progress.clone(),
        }
    }

    /// Split the snapshot back into the application-owned entities. Progress
    /// values are clamped on the way in; validation checks shape, not range.
    pub fn into_state(self) -> (Vec<ContentRecord>, Prefs) {
        let prefs = Prefs::from_parts(
            HashSet::from_iter(self.watchlist),
            self.user_ratings,
            self.watch_progress,
        );
        (self.content_items, prefs)
    }

    /// Pretty-printed JSON with all four fields always present.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn write_to(&self, path: &Path) -> Result<(), SnapshotError> {
        let json = self.to_json()?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Parse and validate a snapshot. All-or-nothing: any failure leaves the
    /// caller's state untouched because nothing is returned to apply.
    pub fn parse(raw: &str) -> Result<Snapshot, SnapshotError> {
        let value: serde_json::Value = serde_json::from_str(raw)?;

        // Minimal shape validation before the typed decode, so the error can
        // name the offending field.
        require(&value, "contentItems", Shape::Array)?;
        require(&value, "watchlist", Shape::Array)?;
        require(&value, "userRatings", Shape::Object)?;
        require(&value, "watchProgress", Shape::Object)?;

        Ok(serde_json::from_value(value)?)
    }

    pub fn read_from(path: &Path) -> Result<Snapshot, SnapshotError> {
        let raw = fs::read_to_string(path)?;
        Self::parse(&raw)
    }
}

enum Shape {
    Array,
    Object,
}

fn require(
    value: &serde_json::Value,
    field: &'static str,
    shape: Shape,
) -> Result<(), SnapshotError> {
    let Some(entry) = value.get(field) else {
        return Err(SnapshotError::Validation {
            field,
            problem: "is missing",
        });
    };
    let ok = match shape {
        Shape::Array => entry.is_array(),
        Shape::Object => entry.is_object(),
    };
    if !ok {
        let problem = match shape {
            Shape::Array => "must be an array",
            Shape::Object => "must be an object",
        };
        return Err(SnapshotError::Validation { field, problem });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_catalog;

    fn sample_state() -> (Vec<ContentRecord>, Prefs) {
        let catalog = default_catalog();
        let mut prefs = Prefs::new();
        prefs.toggle_watchlist(catalog[0].id);
        prefs.toggle_watchlist(catalog[3].id);
        prefs.set_rating(catalog[1].id, 5);
        prefs.set_progress(catalog[2].id, 33.0);
        (catalog, prefs)
    }

    #[test]
    fn export_always_emits_all_four_fields() {
        let empty = Snapshot::from_state(&default_catalog(), &Prefs::new());
        let json: serde_json::Value =
            serde_json::from_str(&empty.to_json().unwrap()).unwrap();
        for field in ["contentItems", "watchlist", "userRatings", "watchProgress"] {
            assert!(json.get(field).is_some(), "missing {}", field);
        }
    }

    #[test]
    fn export_then_import_reproduces_identical_state() {
        let (catalog, prefs) = sample_state();
        let json = Snapshot::from_state(&catalog, &prefs).to_json().unwrap();
        let (new_catalog, new_prefs) = Snapshot::parse(&json).unwrap().into_state();
        assert_eq!(new_catalog, catalog);
        assert_eq!(new_prefs, prefs);
    }

    #[test]
    fn missing_watch_progress_rejects_the_whole_snapshot() {
        let (catalog, prefs) = sample_state();
        let mut value: serde_json::Value = serde_json::from_str(
            &Snapshot::from_state(&catalog, &prefs).to_json().unwrap(),
        )
        .unwrap();
        value.as_object_mut().unwrap().remove("watchProgress");

        let err = Snapshot::parse(&value.to_string()).unwrap_err();
        match err {
            SnapshotError::Validation { field, .. } => assert_eq!(field, "watchProgress"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn wrong_shape_is_named_in_the_error() {
        let raw = r#"{"contentItems": {}, "watchlist": [], "userRatings": {}, "watchProgress": {}}"#;
        let err = Snapshot::parse(raw).unwrap_err();
        match err {
            SnapshotError::Validation { field, problem } => {
                assert_eq!(field, "contentItems");
                assert_eq!(problem, "must be an array");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn progress_outside_the_contract_is_clamped_on_import() {
        let raw = r#"{
            "contentItems": [],
            "watchlist": [],
            "userRatings": {},
            "watchProgress": {"1": 150.0, "2": -10.0, "3": 60.0}
        }"#;
        let (_, prefs) = Snapshot::parse(raw).unwrap().into_state();
        assert_eq!(prefs.progress(1), 100.0);
        assert_eq!(prefs.progress(2), 0.0);
        assert_eq!(prefs.progress(3), 60.0);
    }

    #[test]
    fn non_json_input_is_a_parse_error() {
        assert!(matches!(
            Snapshot::parse("definitely not json"),
            Err(SnapshotError::Parse(_))
        ));
    }
}
