// src/config.rs

use crate::physics::operations::WrapMode;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

// --- Enums ---

/// How magnetic moments from VECTR are carried into the cell file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SpinMode {
  #[default]
  Nospin,
  /// Accepted, currently written exactly like `nospin`.
  Collinear,
  Noncollinear,
}

// --- Main Config Struct ---

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
  #[serde(default)]
  pub default_spin: SpinMode,

  #[serde(default)]
  pub wrap_mode: WrapMode,
}

impl Config {
  /// Loads config from standard OS location (e.g., ~/.config/vesta2cell/settings.json)
  pub fn load() -> (Self, String) {
    match Self::get_path() {
      Some(path) => Self::load_from(&path),
      None => (Self::default(), "No config directory. Using defaults.".to_string()),
    }
  }

  pub fn load_from(path: &Path) -> (Self, String) {
    if path.exists() {
      match File::open(path) {
        Ok(file) => {
          let reader = BufReader::new(file);
          match serde_json::from_reader(reader) {
            Ok(cfg) => (cfg, format!("Config loaded from {:?}", path)),
            Err(e) => (Self::default(), format!("Error parsing config: {}", e)),
          }
        }
        Err(e) => (Self::default(), format!("Error opening config: {}", e)),
      }
    } else {
      (
        Self::default(),
        "No config found. Using defaults.".to_string(),
      )
    }
  }

  /// Saves config to standard OS location
  pub fn save(&self) -> String {
    match Self::get_path() {
      Some(path) => self.save_to(&path),
      None => "No config directory available".to_string(),
    }
  }

  pub fn save_to(&self, path: &Path) -> String {
    if let Some(parent) = path.parent() {
      let _ = fs::create_dir_all(parent);
    }

    match File::create(path) {
      Ok(file) => {
        let writer = BufWriter::new(file);
        match serde_json::to_writer_pretty(writer, self) {
          Ok(_) => format!("Config saved to {:?}", path),
          Err(e) => format!("Failed to save config: {}", e),
        }
      }
      Err(e) => format!("Could not create config file: {}", e),
    }
  }

  pub fn get_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "vesta2cell", "vesta2cell").map(|proj| proj.config_dir().join("settings.json"))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let (cfg, msg) = Config::load_from(&dir.path().join("settings.json"));
    assert_eq!(cfg, Config::default());
    assert!(msg.contains("Using defaults"));
  }

  #[test]
  fn test_partial_file_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{ "wrap_mode": "modulo" }"#).unwrap();

    let (cfg, _) = Config::load_from(&path);
    assert_eq!(cfg.wrap_mode, WrapMode::Modulo);
    assert_eq!(cfg.default_spin, SpinMode::Nospin);
  }

  #[test]
  fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");
    let cfg = Config {
      default_spin: SpinMode::Noncollinear,
      wrap_mode: WrapMode::SinglePass,
    };

    let msg = cfg.save_to(&path);
    assert!(msg.starts_with("Config saved"));
    let (back, _) = Config::load_from(&path);
    assert_eq!(back, cfg);
  }

  #[test]
  fn test_garbage_file_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "not json").unwrap();

    let (cfg, msg) = Config::load_from(&path);
    assert_eq!(cfg, Config::default());
    assert!(msg.starts_with("Error parsing config"));
  }
}
