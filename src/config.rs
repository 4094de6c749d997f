use std::time::Duration;

use config::{ConfigError, Environment, File, FileFormat};
use derive_deref::{Deref, DerefMut};
use serde::Deserialize;
use tracing::info;

use crate::{
  components::clothes_list::{ListOptions, filter::PickerKind},
  utils::{PROJECT_NAME, get_config_dir},
};

const CONFIG: &str = include_str!("../.config/config.json5");

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct StoreConfig {
  pub base_url: String,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
  10
}

impl Default for StoreConfig {
  fn default() -> Self {
    StoreConfig { base_url: String::from("http://localhost:3000"), timeout_secs: default_timeout_secs() }
  }
}

impl StoreConfig {
  pub fn timeout(&self) -> Duration {
    Duration::from_secs(self.timeout_secs)
  }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct NotificationConfig {
  pub duration_ms: u64,
}

impl Default for NotificationConfig {
  fn default() -> Self {
    NotificationConfig { duration_ms: 3000 }
  }
}

impl NotificationConfig {
  pub fn duration(&self) -> Duration {
    Duration::from_millis(self.duration_ms)
  }
}

/// Categories offered by the picker filter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deref, DerefMut, Deserialize)]
pub struct PickerKinds(pub Vec<PickerKind>);

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub store: StoreConfig,
  #[serde(default)]
  pub list: ListOptions,
  #[serde(default)]
  pub picker_kinds: PickerKinds,
  #[serde(default)]
  pub notifications: NotificationConfig,
}

impl Config {
  /// Embedded defaults, then `config.*` from the config directory, then `WARDROBE_MANAGER__*` variables.
  pub fn new() -> Result<Self, ConfigError> {
    let default_config: Config = json5::from_str(CONFIG).map_err(|err| ConfigError::Message(err.to_string()))?;
    let config_dir = get_config_dir();
    let mut builder = config::Config::builder().add_source(File::from_str(CONFIG, FileFormat::Json5));

    let config_files = [
      ("config.json5", FileFormat::Json5),
      ("config.json", FileFormat::Json),
      ("config.yaml", FileFormat::Yaml),
      ("config.toml", FileFormat::Toml),
      ("config.ini", FileFormat::Ini),
    ];
    let mut found_config = false;
    for (file, format) in &config_files {
      let path = config_dir.join(file);
      if path.exists() {
        info!("Reading config from {}", path.display());
        found_config = true;
      }
      builder = builder.add_source(File::from(path).format(*format).required(false));
    }
    if !found_config {
      info!("No configuration file found in {}, using defaults", config_dir.display());
    }

    builder = builder.add_source(
      Environment::with_prefix(PROJECT_NAME.as_str()).prefix_separator("__").separator("__").try_parsing(true),
    );

    let mut cfg: Self = builder.build()?.try_deserialize()?;
    if cfg.picker_kinds.is_empty() {
      cfg.picker_kinds = default_config.picker_kinds;
    }
    Ok(cfg)
  }
}
