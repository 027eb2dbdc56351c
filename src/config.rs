// Sat Oct 17 2026 - Alex

use crate::protocol::{ErrorPolicy, Timing};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Baud rate of the bootloader with the Motorola default 2 MHz bus clock.
pub const BAUD_2MHZ: u32 = 4800;
pub const BAUD_4MHZ: u32 = 9600;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unable to open configuration file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Configuration file contains invalid data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Contents of `config.json`. The two legacy keys keep their on-disk
/// spelling (`Port`, `Targetclock`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "Port")]
    pub port: String,
    #[serde(rename = "Targetclock", default = "default_clock")]
    pub target_clock: String,
    #[serde(rename = "AppletDir", default = "default_applet_dir")]
    pub applet_dir: PathBuf,
    #[serde(rename = "ErrorPolicy", default)]
    pub error_policy: ErrorPolicy,
    #[serde(rename = "StrictHex", default)]
    pub strict_hex: bool,
    #[serde(rename = "Timing", default)]
    pub timing: Timing,
}

fn default_clock() -> String {
    "2MHz".to_string()
}

fn default_applet_dir() -> PathBuf {
    PathBuf::from("srec")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: String::new(),
            target_clock: default_clock(),
            applet_dir: default_applet_dir(),
            error_policy: ErrorPolicy::default(),
            strict_hex: false,
            timing: Timing::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(content)?;
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    pub fn with_port(mut self, port: &str) -> Self {
        self.port = port.to_string();
        self
    }

    pub fn with_target_clock(mut self, clock: &str) -> Self {
        self.target_clock = clock.to_string();
        self
    }

    pub fn with_applet_dir(mut self, dir: PathBuf) -> Self {
        self.applet_dir = dir;
        self
    }

    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// 9600 baud when the target runs from a 4 MHz clock, 4800 otherwise.
    pub fn baud_rate(&self) -> u32 {
        if self.target_clock.contains("4MHz") {
            BAUD_4MHZ
        } else {
            BAUD_2MHZ
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.port.trim().is_empty() {
            return Err("Port must name a serial device".to_string());
        }
        self.timing.check()
    }
}
