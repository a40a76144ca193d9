//! Persisted tool commands.
//!
//! The config file is a small TOML document holding the commands that launch
//! Mineways and Blender. It is read once per invocation and handed to
//! [`Tools`](crate::tools::Tools) by value.

use crate::error::{Error, Result};
use crate::tools::Tool;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG: &str = include_str!("../data/default-config.toml");

const APP_DIR: &str = "mcrender";
const FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub mineways_cmd: Option<String>,
    pub blender_cmd: Option<String>,
    pub world_error_markers: Option<Vec<String>>,
}

/// `<platform config dir>/mcrender/config.toml`.
pub fn config_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(FILE_NAME))
        .ok_or_else(|| Error::ConfigAccess {
            path: PathBuf::from(FILE_NAME),
            source: io::Error::new(
                io::ErrorKind::NotFound,
                "no configuration directory on this platform",
            ),
        })
}

/// Writes the default config file if none exists yet. Returns whether it was created.
pub fn ensure_config_exists(path: &Path) -> Result<bool> {
    if path.is_file() {
        return Ok(false);
    }

    let access_error = |source| Error::ConfigAccess {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(access_error)?;
    }
    fs::write(path, DEFAULT_CONFIG).map_err(access_error)?;

    log::info!("Created default config file {}", path.display());
    Ok(true)
}

impl Config {
    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| Error::ConfigFormat {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::ConfigAccess {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// Like [`Config::read`], but an absent or broken file just means nothing is configured.
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(config) => config,
            Err(Error::ConfigAccess { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                log::debug!("No config file at {}", path.display());
                Self::default()
            }
            Err(err) => {
                log::warn!("Ignoring config file: {err}");
                Self::default()
            }
        }
    }

    /// The configured command for `tool`, or `None` if the slot is missing or blank.
    pub fn load_command(&self, tool: Tool) -> Option<&str> {
        let value = match tool {
            Tool::Mineways => self.mineways_cmd.as_deref(),
            Tool::Blender => self.blender_cmd.as_deref(),
        };
        value.map(str::trim).filter(|cmd| !cmd.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_file_sets_both_commands() {
        let config = Config::parse(DEFAULT_CONFIG, Path::new("default")).unwrap();
        assert_eq!(config.load_command(Tool::Mineways), Some("mineways"));
        assert_eq!(config.load_command(Tool::Blender), Some("blender"));
        assert_eq!(config.world_error_markers, None);
    }

    #[test]
    fn blank_and_missing_slots_are_unset() {
        let config = Config::parse("mineways-cmd = \"  \"\n", Path::new("c")).unwrap();
        assert_eq!(config.load_command(Tool::Mineways), None);
        assert_eq!(config.load_command(Tool::Blender), None);
    }

    #[test]
    fn malformed_file_is_a_format_error() {
        let err = Config::parse("mineways-cmd = [", Path::new("c")).unwrap_err();
        assert!(matches!(err, Error::ConfigFormat { .. }));
    }

    #[test]
    fn ensure_creates_once_and_keeps_edits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(FILE_NAME);

        assert!(ensure_config_exists(&path).unwrap());
        fs::write(&path, "blender-cmd = \"/opt/blender/blender\"\n").unwrap();
        assert!(!ensure_config_exists(&path).unwrap());

        let config = Config::read(&path).unwrap();
        assert_eq!(config.load_command(Tool::Blender), Some("/opt/blender/blender"));
        assert_eq!(config.load_command(Tool::Mineways), None);
    }

    #[test]
    fn load_tolerates_missing_and_broken_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert_eq!(Config::load(&missing), Config::default());

        let broken = dir.path().join("broken.toml");
        fs::write(&broken, "not toml at all = = =").unwrap();
        assert_eq!(Config::load(&broken), Config::default());
    }

    #[cfg(unix)]
    #[test]
    fn unwritable_location_is_an_access_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "").unwrap();
        let err = ensure_config_exists(&blocker.join(FILE_NAME)).unwrap_err();
        assert!(matches!(err, Error::ConfigAccess { .. }));
    }
}
