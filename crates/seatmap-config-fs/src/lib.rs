// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Seat map configs on disk: one `<key>.json` per config under a base
//! directory, by default the per-user `SeatMap` config dir.

use directories::ProjectDirs;
use seatmap_app_core::config::{ConfigError, ConfigStore};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// [`ConfigStore`] over a directory of JSON files.
#[derive(Debug, Clone)]
pub struct FsConfigStore {
    base: PathBuf,
}

impl FsConfigStore {
    /// Store in the platform config dir (`~/.config/SeatMap` on Linux).
    pub fn new() -> Result<Self, ConfigError> {
        let proj = ProjectDirs::from("dev", "flyingrobots", "SeatMap")
            .ok_or_else(|| ConfigError::Other("could not resolve config dir".into()))?;
        Self::at(proj.config_dir())
    }

    /// Store in `dir`; the directory is created when absent.
    pub fn at(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let base = dir.as_ref().to_path_buf();
        fs::create_dir_all(&base)?;
        debug!(path = %base.display(), "config store ready");
        Ok(Self { base })
    }

    /// Directory the store writes into.
    pub fn base(&self) -> &Path {
        &self.base
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base.join(format!("{key}.json"))
    }
}

impl ConfigStore for FsConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        fs::read(self.path_for(key)).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => ConfigError::NotFound,
            _ => ConfigError::Io(err),
        })
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        // the base dir may have been removed since `at`
        fs::create_dir_all(&self.base)?;
        let path = self.path_for(key);
        fs::write(&path, data)?;
        debug!(path = %path.display(), bytes = data.len(), "config saved");
        Ok(())
    }
}
