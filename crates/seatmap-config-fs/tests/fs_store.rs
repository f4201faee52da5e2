// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used)]
//! Filesystem config store against a scratch directory.

use seatmap_app_core::config::{ConfigError, ConfigService, ConfigStore};
use seatmap_app_core::config_port::{ConfigPort, SEATMAP_CONFIG_KEY};
use seatmap_config_fs::FsConfigStore;
use seatmap_core::SeatMapConfig;

#[test]
fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsConfigStore::at(dir.path()).unwrap();
    assert!(matches!(store.load_raw("absent"), Err(ConfigError::NotFound)));
}

#[test]
fn at_creates_nested_directories() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    let store = FsConfigStore::at(&nested).unwrap();
    assert!(nested.is_dir());
    assert_eq!(store.base(), nested.as_path());
}

#[test]
fn seatmap_config_persists_as_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let svc = ConfigService::new(FsConfigStore::at(dir.path()).unwrap());
    let mut cfg = SeatMapConfig::default();
    cfg.framing.height = 14.0;
    svc.save_seatmap_config(&cfg);

    let path = dir.path().join(format!("{SEATMAP_CONFIG_KEY}.json"));
    let text = std::fs::read_to_string(path).unwrap();
    assert!(text.contains("\"height\": 14.0"));

    let reopened = ConfigService::new(FsConfigStore::at(dir.path()).unwrap());
    assert_eq!(reopened.load_seatmap_config(), cfg);
}

#[test]
fn corrupt_file_loads_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("seatmap.json"), b"{ nope").unwrap();
    let svc = ConfigService::new(FsConfigStore::at(dir.path()).unwrap());
    assert_eq!(svc.load_seatmap_config(), SeatMapConfig::default());
}

#[test]
fn save_recreates_a_removed_base_dir() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("cfg");
    let store = FsConfigStore::at(&base).unwrap();
    std::fs::remove_dir(&base).unwrap();
    store.save_raw("seatmap", b"{}").unwrap();
    assert_eq!(store.load_raw("seatmap").unwrap(), b"{}".to_vec());
}
