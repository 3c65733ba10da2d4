//! Page configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use unfurl_storage::{MemoryStore, SessionStore, SqliteStore};

use crate::error::CoreError;
use crate::Result;

/// Where accordion state is remembered between page loads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StoreConfig {
    #[default]
    Memory,
    Sqlite {
        path: PathBuf,
        /// Resume an existing browsing session instead of starting a new one
        #[serde(default)]
        session_id: Option<String>,
    },
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Viewport width, in em, from which tabs are active
    pub tabs_breakpoint_em: f64,
    /// Pixel size of one root em
    pub root_font_size_px: f64,
    pub double_click_window_ms: i64,
    /// Autofill polling cadence while a counted field has focus
    pub character_count_poll_ms: i64,
    /// Typing pause required before a poll refreshes the live region
    pub character_count_idle_ms: i64,
    pub session_store: StoreConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tabs_breakpoint_em: 40.0625,
            root_font_size_px: 16.0,
            double_click_window_ms: 1000,
            character_count_poll_ms: 1000,
            character_count_idle_ms: 500,
            session_store: StoreConfig::default(),
        }
    }
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "Loading configuration");
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.tabs_breakpoint_em.is_finite() && self.tabs_breakpoint_em > 0.0) {
            return Err(CoreError::Config(format!(
                "tabs_breakpoint_em must be positive, got {}",
                self.tabs_breakpoint_em
            )));
        }
        if !(self.root_font_size_px.is_finite() && self.root_font_size_px > 0.0) {
            return Err(CoreError::Config(format!(
                "root_font_size_px must be positive, got {}",
                self.root_font_size_px
            )));
        }
        for (name, value) in [
            ("double_click_window_ms", self.double_click_window_ms),
            ("character_count_poll_ms", self.character_count_poll_ms),
            ("character_count_idle_ms", self.character_count_idle_ms),
        ] {
            if value < 0 {
                return Err(CoreError::Config(format!("{name} must not be negative")));
            }
        }
        Ok(())
    }

    /// Open the configured store. `None` means persistence is switched off.
    pub fn open_store(&self) -> Result<Option<Arc<dyn SessionStore>>> {
        match &self.session_store {
            StoreConfig::Memory => Ok(Some(Arc::new(MemoryStore::new()))),
            StoreConfig::Sqlite { path, session_id } => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)?;
                }
                let store = match session_id {
                    Some(id) => SqliteStore::open(path, id)?,
                    None => SqliteStore::new_session(path)?,
                };
                tracing::info!(path = %path.display(), session_id = store.session_id(), "Opened session store");
                Ok(Some(Arc::new(store)))
            }
            StoreConfig::Disabled => Ok(None),
        }
    }
}
