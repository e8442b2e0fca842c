//! Configuration for a PhilosoApp session.

use std::path::PathBuf;
use std::time::Duration;

/// Name of the application, used in export metadata and file names.
pub const APP_NAME: &str = "PhilosoApp";

/// Key under which the session state is stored.
pub const STORAGE_KEY: &str = "philosoapp_state_v1";

/// Configuration for a session.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding the persisted state.
    pub data_dir: PathBuf,
    /// Storage key (file stem) of the persisted state.
    pub storage_key: String,
    /// RNG seed for reproducible content picks. `None` uses OS entropy.
    pub seed: Option<u64>,
    /// Number of cards drawn for a flashcard practice.
    pub flashcard_sample: usize,
    /// How long a toast stays visible.
    pub toast_duration: Duration,
    /// How long an achievement banner stays visible.
    pub achievement_duration: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".philosoapp"),
            storage_key: STORAGE_KEY.to_string(),
            seed: None,
            flashcard_sample: 6,
            toast_duration: Duration::from_millis(2200),
            achievement_duration: Duration::from_millis(2600),
        }
    }
}

impl AppConfig {
    /// Set the data directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the flashcard sample size (at least one card).
    pub fn with_flashcard_sample(mut self, size: usize) -> Self {
        self.flashcard_sample = size.max(1);
        self
    }

    /// Path of the persisted state file.
    pub fn state_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", self.storage_key))
    }
}

/// Conventional file name of an exported portfolio.
pub fn export_file_name() -> String {
    format!("{}_portfolio.json", APP_NAME.to_lowercase())
}
