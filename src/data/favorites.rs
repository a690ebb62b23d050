//! Favorites store persisted to disk
//!
//! Keeps the user's starred countries across runs as a JSON file in an
//! XDG-compliant data directory (`~/.local/share/countryatlas/` on Linux).
//! Loading degrades gracefully: a missing or unreadable file yields an empty
//! set, and write failures never interrupt browsing.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// On-disk format for the favorites file
#[derive(Debug, Default, Serialize, Deserialize)]
struct FavoritesFile {
    /// Alpha-3 codes of starred countries, lowercase
    codes: BTreeSet<String>,
    /// When the file was last written
    updated_at: Option<DateTime<Utc>>,
}

/// The user's starred countries
///
/// Codes are normalized to lowercase so `"FRA"` and `"fra"` refer to the
/// same country. Every mutation is written back immediately. A store built
/// without a path keeps favorites in memory only.
#[derive(Debug, Clone)]
pub struct Favorites {
    codes: BTreeSet<String>,
    path: Option<PathBuf>,
}

impl Favorites {
    /// Loads favorites from the XDG data directory
    ///
    /// Falls back to an in-memory store when the data directory cannot be
    /// determined (e.g., no home directory).
    pub fn load() -> Self {
        match ProjectDirs::from("", "", "countryatlas") {
            Some(project_dirs) => {
                Self::with_path(project_dirs.data_dir().join("favorites.json"))
            }
            None => Self::in_memory(),
        }
    }

    /// Creates a store backed by a specific file, loading it if present
    pub fn with_path(path: PathBuf) -> Self {
        let codes = read_codes(&path).unwrap_or_default();
        Self {
            codes,
            path: Some(path),
        }
    }

    /// Creates a store that is never persisted
    pub fn in_memory() -> Self {
        Self {
            codes: BTreeSet::new(),
            path: None,
        }
    }

    /// Returns true if the country with the given code is starred
    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(&normalize(code))
    }

    /// Toggles the starred state for a code, returning the new state
    pub fn toggle(&mut self, code: &str) -> bool {
        let code = normalize(code);
        let starred = if self.codes.contains(&code) {
            self.codes.remove(&code);
            false
        } else {
            self.codes.insert(code);
            true
        };
        self.persist();
        starred
    }

    /// Returns the number of starred countries
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Returns true if no country is starred
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Writes the current set back to disk, ignoring failures
    fn persist(&self) {
        let Some(path) = self.path.as_ref() else {
            return;
        };
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        let file = FavoritesFile {
            codes: self.codes.clone(),
            updated_at: Some(Utc::now()),
        };
        if let Ok(json) = serde_json::to_string_pretty(&file) {
            let _ = fs::write(path, json);
        }
    }
}

/// Lowercases and trims a country code for use as a set member
fn normalize(code: &str) -> String {
    code.trim().to_lowercase()
}

/// Reads and parses the favorites file, if it exists
fn read_codes(path: &Path) -> Option<BTreeSet<String>> {
    let content = fs::read_to_string(path).ok()?;
    let file: FavoritesFile = serde_json::from_str(&content).ok()?;
    Some(file.codes)
}
