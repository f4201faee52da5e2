// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Config port shared by seat map tools.

use crate::config::{ConfigService, ConfigStore};
use seatmap_core::SeatMapConfig;
use tracing::warn;

/// Store key the seat map config lives under.
pub const SEATMAP_CONFIG_KEY: &str = "seatmap";

/// Consumer-facing port for the seat map configuration.
pub trait ConfigPort {
    /// Load the config, falling back to defaults when missing or unreadable.
    fn load_seatmap_config(&self) -> SeatMapConfig;
    /// Persist the config (best-effort; failures are logged).
    fn save_seatmap_config(&self, config: &SeatMapConfig);
}

impl<S> ConfigPort for ConfigService<S>
where
    S: ConfigStore,
{
    fn load_seatmap_config(&self) -> SeatMapConfig {
        match self.load::<SeatMapConfig>(SEATMAP_CONFIG_KEY) {
            Ok(Some(config)) => config,
            Ok(None) => SeatMapConfig::default(),
            Err(err) => {
                warn!(?err, "unreadable seat map config; using defaults");
                SeatMapConfig::default()
            }
        }
    }

    fn save_seatmap_config(&self, config: &SeatMapConfig) {
        if let Err(err) = self.save(SEATMAP_CONFIG_KEY, config) {
            warn!(?err, "failed to save seat map config");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryConfigStore;

    #[test]
    fn falls_back_to_defaults() {
        let empty = ConfigService::new(MemoryConfigStore::new());
        assert_eq!(empty.load_seatmap_config(), SeatMapConfig::default());
        let broken = ConfigService::new(MemoryConfigStore::with_blob(SEATMAP_CONFIG_KEY, b"not json".to_vec()));
        assert_eq!(broken.load_seatmap_config(), SeatMapConfig::default());
    }

    #[test]
    fn saved_config_round_trips() {
        let svc = ConfigService::new(MemoryConfigStore::new());
        let mut cfg = SeatMapConfig::default();
        cfg.layout.depth_gap = 1.5;
        cfg.transition.rise = 0.3;
        svc.save_seatmap_config(&cfg);
        assert_eq!(svc.load_seatmap_config(), cfg);
    }
}
