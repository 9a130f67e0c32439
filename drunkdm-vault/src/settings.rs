use crate::error::Result;
use serde::Deserialize;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;
use tracing::info;
use tracing::warn;

const SETTINGS_DIR: &str = ".drunkdm";
const SETTINGS_FILE: &str = "settings.ron";
const DEFAULT_FILE: &str = "session";

/// Persisted plugin settings, stored in `<vault>/.drunkdm/settings.ron`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Note receiving the rolls, without the `.md` extension
    pub current_file: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            current_file: DEFAULT_FILE.to_owned(),
        }
    }
}

impl Settings {
    pub fn path(vault: &Path) -> PathBuf {
        vault.join(SETTINGS_DIR).join(SETTINGS_FILE)
    }

    pub fn from_ron(content: &str) -> Result<Self> {
        Ok(ron::de::from_str(content)?)
    }

    /// Load the settings of `vault`, missing or unreadable values fall back to the defaults
    pub fn load(vault: &Path) -> Result<Self> {
        let path = Self::path(vault);
        let settings = match fs::read_to_string(&path) {
            Ok(content) => Self::from_ron(&content).unwrap_or_else(|error| {
                warn!("Discarding settings `{:?}`: {}", path, error);
                Self::default()
            }),
            Err(error) if error.kind() == ErrorKind::NotFound => {
                debug!("No settings at `{:?}`, using defaults", path);
                Self::default()
            }
            Err(error) => return Err(error.into()),
        };
        info!("Settings loaded: {:?}", settings);
        Ok(settings)
    }

    pub fn save(&self, vault: &Path) -> Result<PathBuf> {
        let ser = ron::ser::to_string_pretty(self, Default::default())?;
        fs::create_dir_all(vault.join(SETTINGS_DIR))?;
        let path = Self::path(vault);
        fs::write(&path, ser.as_bytes())?;
        info!("Settings saved to `{:?}`: {:?}", path, self);
        Ok(path)
    }

    /// Vault relative path of the current note
    pub fn note_path(&self) -> String {
        format!("{}.md", self.current_file)
    }
}
