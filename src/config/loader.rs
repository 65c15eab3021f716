use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::Context;
use once_cell::sync::Lazy;
use parking_lot::RwLock;

use super::core::DoublesConfig;

/// File searched for in the current directory and its ancestors.
pub const CONFIG_FILE_NAME: &str = ".understudy.toml";

static ACTIVE: Lazy<RwLock<DoublesConfig>> = Lazy::new(|| RwLock::new(DoublesConfig::default()));

/// The process-wide configuration builders snapshot when they are created.
pub fn active_config() -> DoublesConfig {
    ACTIVE.read().clone()
}

/// Replace the process-wide configuration.
pub fn set_active_config(config: DoublesConfig) {
    log::debug!("Activating configuration: {:?}", config);
    *ACTIVE.write() = config;
}

fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse config from a TOML string
pub fn parse_config(contents: &str) -> anyhow::Result<DoublesConfig> {
    toml::from_str::<DoublesConfig>(contents).context("Failed to parse .understudy.toml")
}

/// Load configuration from a specific file.
pub fn load_config_from_path(path: &Path) -> anyhow::Result<DoublesConfig> {
    let contents = read_config_file(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    parse_config(&contents).with_context(|| format!("Invalid config in {}", path.display()))
}

fn try_load_config_from_path(config_path: &Path) -> Option<DoublesConfig> {
    if !config_path.is_file() {
        return None;
    }
    match load_config_from_path(config_path) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{:#}. Using defaults.", e);
            None
        }
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for `.understudy.toml`.
pub fn load_config_from(start: PathBuf) -> DoublesConfig {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            DoublesConfig::default()
        })
}

/// Search the current directory and its ancestors for `.understudy.toml`.
pub fn load_config() -> DoublesConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from(dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            DoublesConfig::default()
        }
    }
}
