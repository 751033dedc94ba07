use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::PreferencesError;

pub const DEFAULT_PREFERENCES_PATH: &str = "linkshelf_client.toml";

/// Client-side settings that survive between sessions.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Preferences {
    #[serde(default)]
    pub dark_mode: bool,
}

impl Preferences {
    /// Reads preferences from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, PreferencesError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path).map_err(|source| PreferencesError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Writes preferences to `path`, keeping any unrelated keys already in the file.
    pub fn save(&self, path: &Path) -> Result<(), PreferencesError> {
        // 1. Read the existing file content; a missing file is an empty table.
        let existing_content = fs::read_to_string(path).unwrap_or_default();
        let mut existing_toml: toml::Value = toml::from_str(&existing_content)?;

        // 2. Merge our keys over it
        let new_toml = toml::Value::try_from(self)?;
        if let (Some(existing_table), Some(new_table)) =
            (existing_toml.as_table_mut(), new_toml.as_table())
        {
            for (key, value) in new_table {
                existing_table.insert(key.clone(), value.clone());
            }
        } else {
            existing_toml = new_toml;
        }

        // 3. Write it back
        let updated_content = toml::to_string_pretty(&existing_toml)?;
        fs::write(path, updated_content).map_err(|source| PreferencesError::Write {
            path: path.display().to_string(),
            source,
        })?;

        info!(path = ?path, "Saved client preferences.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Preferences::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(prefs, Preferences::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        Preferences { dark_mode: true }.save(&path).unwrap();
        assert!(Preferences::load(&path).unwrap().dark_mode);
    }

    #[test]
    fn test_save_keeps_unrelated_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        fs::write(&path, "server = \"http://localhost:3001\"\ndark_mode = false\n").unwrap();

        Preferences { dark_mode: true }.save(&path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let value: toml::Value = toml::from_str(&contents).unwrap();
        assert_eq!(value["server"].as_str(), Some("http://localhost:3001"));
        assert_eq!(value["dark_mode"].as_bool(), Some(true));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        fs::write(&path, "dark_mode = [").unwrap();
        assert!(matches!(Preferences::load(&path), Err(PreferencesError::Parse(_))));
    }
}
