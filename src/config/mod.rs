use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::address::{ResolverConfig, Ss58Prefix, DEFAULT_SS58_PREFIX};
use crate::domain::endpoints::{default_dev_nodes, DevNode, Endpoint};
use crate::domain::selection::{SelectionConfig, DEFAULT_DEBOUNCE};

pub const DEFAULT_MAX_COUNT: usize = 16;

/// Externally supplied endpoint (production, testing, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointConfig {
    pub name: Option<String>,
    pub rpc: Option<String>,
    pub section: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub unreachable: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_ss58_prefix")]
    pub ss58_prefix: u16,

    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    #[serde(default = "default_max_count")]
    pub max_count: usize,

    #[serde(default = "default_dev_nodes")]
    pub nodes: Vec<DevNode>,

    #[serde(default)]
    pub endpoints: Vec<EndpointConfig>,

    #[serde(default)]
    pub process_env: BTreeMap<String, String>,

    #[serde(default)]
    pub translations: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ss58_prefix: default_ss58_prefix(),
            debounce_ms: default_debounce_ms(),
            max_count: default_max_count(),
            nodes: default_dev_nodes(),
            endpoints: Vec::new(),
            process_env: BTreeMap::new(),
            translations: BTreeMap::new(),
        }
    }
}

impl Config {
    pub fn resolver_config(&self) -> ResolverConfig {
        let ss58_prefix = Ss58Prefix::new(self.ss58_prefix).unwrap_or_else(|err| {
            warn!(%err, "invalid ss58_prefix in config, using default");
            Ss58Prefix::default()
        });
        ResolverConfig { ss58_prefix }
    }

    pub fn selection_config(&self, max_count: Option<usize>) -> SelectionConfig {
        SelectionConfig {
            max_count: max_count.unwrap_or(self.max_count),
            debounce: Duration::from_millis(self.debounce_ms),
        }
    }

    /// Config endpoints grouped into sections, in first-seen section order.
    pub fn endpoint_sections(&self) -> Vec<Vec<Endpoint>> {
        let mut sections: Vec<(String, Vec<Endpoint>)> = Vec::new();

        for (idx, entry) in self.endpoints.iter().enumerate() {
            let Some(rpc) = entry.rpc.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
                debug!(idx, "skipping endpoint without rpc");
                continue;
            };
            let name = entry
                .name
                .clone()
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| rpc.to_string());
            let section = entry
                .section
                .clone()
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| "Configured".to_string());

            let endpoint = Endpoint {
                is_disabled: entry.disabled,
                is_unreachable: entry.unreachable,
                ..Endpoint::link(name, rpc)
            };
            match sections.iter_mut().find(|(title, _)| *title == section) {
                Some((_, items)) => items.push(endpoint),
                None => sections.push((section, vec![endpoint])),
            }
        }

        sections
            .into_iter()
            .map(|(title, items)| {
                let mut section = vec![Endpoint {
                    is_spaced: true,
                    ..Endpoint::header(title)
                }];
                section.extend(items);
                section
            })
            .collect()
    }
}

fn default_ss58_prefix() -> u16 {
    DEFAULT_SS58_PREFIX
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE.as_millis() as u64
}

fn default_max_count() -> usize {
    DEFAULT_MAX_COUNT
}

pub fn load() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };
    parse(&content)
}

pub fn parse(content: &str) -> Config {
    toml::from_str::<Config>(content).unwrap_or_else(|err| {
        warn!(%err, "invalid config, using defaults");
        Config::default()
    })
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("NODEDESK_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("nodedesk").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("nodedesk").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "nodedesk", "nodedesk")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

pub fn data_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").map(PathBuf::from) {
        return Some(xdg.join("nodedesk"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".local").join("share").join("nodedesk"));
    }
    directories::ProjectDirs::from("io", "nodedesk", "nodedesk")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

pub fn settings_db_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("settings.sqlite3"))
}
