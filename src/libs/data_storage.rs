use anyhow::Result;
use std::env::consts::OS;
use std::env::var;
use std::fs;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "tickoff";

/// Per-user application data directory holding the config file and,
/// unless configured otherwise, the database.
#[derive(Debug, Clone)]
pub struct DataStorage {
    base_path: PathBuf,
}

impl DataStorage {
    pub fn new() -> Self {
        let base_path = match OS {
            "windows" => var("LOCALAPPDATA").unwrap_or_else(|_| ".".into()),
            "macos" => var("HOME").unwrap_or_else(|_| ".".into()) + "/Library/Application Support",
            _ => var("HOME").unwrap_or_else(|_| ".".into()) + "/.local/share",
        };
        let base_path = Path::new(&base_path).join(APP_NAME);

        Self { base_path }
    }

    /// Uses `base_path` directly instead of the platform data directory.
    pub fn at(base_path: impl Into<PathBuf>) -> Self {
        Self { base_path: base_path.into() }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn get_path(&self, file_name: &str) -> Result<PathBuf> {
        if !self.base_path.exists() {
            fs::create_dir_all(&self.base_path)?;
        }
        Ok(self.base_path.join(file_name))
    }
}

impl Default for DataStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_location_ends_with_app_name() {
        assert!(DataStorage::new().base_path().ends_with(APP_NAME));
    }

    #[test]
    fn test_get_path_creates_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = DataStorage::at(temp_dir.path().join("nested").join(APP_NAME));

        let path = storage.get_path("config.json").unwrap();
        assert!(storage.base_path().is_dir());
        assert_eq!(path, storage.base_path().join("config.json"));
    }
}
