use arcus_core::RingColor;
use arcus_core::animation::{SPIN_PERIOD, VALUE_TRANSITION};
use arcus_core::state::{DEFAULT_INNER_RADIUS, DEFAULT_OUTER_RADIUS};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RingConfig {
    pub color: RingColor,
    pub inner_radius: f64,
    pub outer_radius: f64,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            color: RingColor::default(),
            inner_radius: DEFAULT_INNER_RADIUS,
            outer_radius: DEFAULT_OUTER_RADIUS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub value_ms: u64,
    pub spin_ms: u64,
}

impl AnimationConfig {
    pub fn value_transition(&self) -> Duration {
        Duration::from_millis(self.value_ms)
    }

    pub fn spin_period(&self) -> Duration {
        Duration::from_millis(self.spin_ms)
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            value_ms: VALUE_TRANSITION.as_millis() as u64,
            spin_ms: SPIN_PERIOD.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(default)]
pub struct ProgressConfig {
    pub value: i32,
    pub maximum: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub enabled: bool,
    pub step: i32,
    pub interval_ms: u64,
}

impl SimulationConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            step: 5,
            interval_ms: 400,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub ring: RingConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub progress: ProgressConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "arcus", "arcus").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(
            config::Environment::with_prefix("ARCUS")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> Result<Config, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let cfg = parse("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.ring.color, RingColor::new(110, 190, 235));
        assert_eq!(cfg.animation.value_transition(), Duration::from_millis(250));
        assert_eq!(cfg.animation.spin_period(), Duration::from_millis(1000));
    }

    #[test]
    fn test_partial_sections() {
        let cfg = parse(
            r##"
[ring]
color = "#ff8000"
inner_radius = 0.4

[progress]
maximum = 200

[simulation]
enabled = true
"##,
        )
        .unwrap();

        assert_eq!(cfg.ring.color, RingColor::new(255, 128, 0));
        assert_eq!(cfg.ring.inner_radius, 0.4);
        assert_eq!(cfg.ring.outer_radius, 1.0);
        assert_eq!(cfg.progress, ProgressConfig { value: 0, maximum: 200 });
        assert!(cfg.simulation.enabled);
        assert_eq!(cfg.simulation.step, 5);
    }

    #[test]
    fn test_bad_color_is_rejected() {
        assert!(parse("[ring]\ncolor = \"teal\"\n").is_err());
    }

    #[test]
    fn test_default_config_template_parses() {
        let cfg = parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(cfg.ring, RingConfig::default());
        assert_eq!(cfg.animation, AnimationConfig::default());
    }

    #[test]
    fn test_ring_config_from_json() {
        let ring: RingConfig =
            serde_json::from_str(r##"{"color": "#000", "outer_radius": 0.8}"##).unwrap();
        assert_eq!(ring.color, RingColor::new(0, 0, 0));
        assert_eq!(ring.outer_radius, 0.8);
        assert_eq!(ring.inner_radius, 0.6);
    }
}
