use thiserror::Error;

/// Which persisted key a gateway failure belongs to. Each key fails
/// independently; one corrupt key never blocks the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKey {
    Watchlist,
    UserRatings,
    WatchProgress,
    ContentItems,
}

impl StoreKey {
    /// Wire/file name for the key, shared with the snapshot format.
    pub fn name(&self) -> &'static str {
        match self {
            StoreKey::Watchlist => "watchlist",
            StoreKey::UserRatings => "userRatings",
            StoreKey::WatchProgress => "watchProgress",
            StoreKey::ContentItems => "contentItems",
        }
    }

    pub fn all() -> &'static [StoreKey] {
        &[
            StoreKey::Watchlist,
            StoreKey::UserRatings,
            StoreKey::WatchProgress,
            StoreKey::ContentItems,
        ]
    }
}

impl std::fmt::Display for StoreKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Failures around snapshot import/export.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The file could not be read at all.
    #[error("Could not read the selected file: {0}")]
    Read(#[from] std::io::Error),

    /// The file is not JSON.
    #[error("The selected file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A required field is missing or has the wrong shape.
    #[error("Invalid snapshot format: field '{field}' {problem}")]
    Validation {
        field: &'static str,
        problem: &'static str,
    },
}

impl SnapshotError {
    /// Message shown in the settings screen. Validation and read failures
    /// get distinct phrasings per the UX contract.
    pub fn user_message(&self) -> String {
        match self {
            SnapshotError::Read(_) => {
                "Failed to read the file. Check the path and try again.".to_string()
            }
            SnapshotError::Parse(_) => {
                "Import failed: the file is not a valid aflambox_data.json export.".to_string()
            }
            SnapshotError::Validation { field, problem } => {
                format!("Import failed: '{}' {}. No data was changed.", field, problem)
            }
        }
    }
}

/// Failures talking to the generative-content service. Always converted to
/// a friendly fallback string before reaching the chat transcript; never
/// propagated into the state engine.
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("response was not in the expected shape: {0}")]
    BadResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_names_the_field() {
        let err = SnapshotError::Validation {
            field: "watchProgress",
            problem: "must be an object",
        };
        assert!(err.user_message().contains("watchProgress"));
    }

    #[test]
    fn store_keys_cover_all_four_persisted_entities() {
        let names: Vec<&str> = StoreKey::all().iter().map(|k| k.name()).collect();
        assert_eq!(
            names,
            vec!["watchlist", "userRatings", "watchProgress", "contentItems"]
        );
    }
}
