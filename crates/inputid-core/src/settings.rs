// Inputid Settings Module
// User-configurable device root, virtual sysname and evdev handling

use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::handlers::VIRTUAL_SYSNAME;
use crate::rules::{RuleTable, DEV_PATH_ROOT};
use crate::tunable::{evdev_enabled, kernel_has_evdev_enabled, SystemTunables};

/// How to decide whether evdev already exposes legacy devices
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EvdevMode {
    /// Ask the kernel
    #[default]
    Auto,
    On,
    Off,
}

impl FromStr for EvdevMode {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(EvdevMode::Auto),
            "on" | "true" | "yes" | "1" => Ok(EvdevMode::On),
            "off" | "false" | "no" | "0" => Ok(EvdevMode::Off),
            _ => Err(SettingsError::InvalidValue(format!(
                "Cannot convert '{}' to an evdev mode",
                s
            ))),
        }
    }
}

/// Settings for inputid
///
/// Loaded from a TOML file (default: ~/.config/inputid/settings.toml):
///
/// ```toml
/// [devices]
/// root = "/dev"
/// virtual_sysname = "uinput"
///
/// [evdev]
/// support = "auto"
/// ```
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory the rule patterns are rooted at
    dev_root: PathBuf,

    /// System name for parents of event devices with no physical location
    virtual_sysname: String,

    evdev: EvdevMode,

    /// Path to the settings file (for reload)
    source_path: Option<PathBuf>,
}

/// Errors that can occur when loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid setting value: {0}")]
    InvalidValue(String),
}

/// TOML representation for deserializing settings
#[derive(Debug, Clone, serde::Deserialize, Default)]
struct SettingsToml {
    #[serde(default)]
    devices: Option<DeviceSettings>,

    #[serde(default)]
    evdev: Option<EvdevSettings>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
struct DeviceSettings {
    #[serde(default)]
    root: Option<PathBuf>,

    #[serde(default)]
    virtual_sysname: Option<String>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
struct EvdevSettings {
    #[serde(default)]
    support: Option<toml::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings {
    /// Create settings with default values
    pub fn new() -> Self {
        Self {
            dev_root: PathBuf::from(DEV_PATH_ROOT),
            virtual_sysname: VIRTUAL_SYSNAME.to_string(),
            evdev: EvdevMode::Auto,
            source_path: None,
        }
    }

    /// Load settings from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(&path)?;
        let mut settings = Self::from_toml(&content)?;
        settings.source_path = Some(path.as_ref().to_path_buf());
        Ok(settings)
    }

    /// Load settings from TOML string
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let toml_settings: SettingsToml =
            toml::from_str(content).map_err(|e| SettingsError::TomlParse(e.to_string()))?;

        let mut settings = Self::new();

        if let Some(devices) = toml_settings.devices {
            if let Some(root) = devices.root {
                settings.dev_root = root;
            }
            if let Some(sysname) = devices.virtual_sysname {
                if sysname.is_empty() {
                    return Err(SettingsError::InvalidValue(
                        "virtual_sysname must not be empty".to_string(),
                    ));
                }
                settings.virtual_sysname = sysname;
            }
        }

        if let Some(evdev) = toml_settings.evdev {
            if let Some(support) = evdev.support {
                settings.evdev = parse_evdev_mode(&support)?;
            }
        }

        Ok(settings)
    }

    /// Get the default settings path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("inputid").join("settings.toml"))
    }

    /// Load from default location (~/.config/inputid/settings.toml)
    pub fn load_default() -> Result<Self, SettingsError> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::from_file(path);
            }
        }
        // Return default settings if file doesn't exist
        Ok(Self::new())
    }

    /// Reload settings from the original file
    pub fn reload(&mut self) -> Result<(), SettingsError> {
        if let Some(ref path) = self.source_path {
            let new_settings = Self::from_file(path)?;
            *self = new_settings;
            Ok(())
        } else {
            Err(SettingsError::InvalidValue("No source path set".to_string()))
        }
    }

    pub fn dev_root(&self) -> &Path {
        &self.dev_root
    }

    pub fn virtual_sysname(&self) -> &str {
        &self.virtual_sysname
    }

    pub fn evdev_mode(&self) -> EvdevMode {
        self.evdev
    }

    pub fn set_evdev_mode(&mut self, mode: EvdevMode) {
        self.evdev = mode;
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Decide whether evdev is active, asking `tunables` in auto mode
    pub fn resolve_evdev(&self, tunables: &dyn SystemTunables) -> bool {
        match self.evdev {
            EvdevMode::Auto => evdev_enabled(tunables),
            EvdevMode::On => true,
            EvdevMode::Off => false,
        }
    }

    /// Decide whether evdev is active on the running kernel
    pub fn resolve_evdev_from_kernel(&self) -> bool {
        match self.evdev {
            EvdevMode::Auto => kernel_has_evdev_enabled(),
            EvdevMode::On => true,
            EvdevMode::Off => false,
        }
    }

    /// Build the rule table for these settings
    pub fn rule_table(&self, evdev_enabled: bool) -> RuleTable {
        RuleTable::with_root(&self.dev_root.to_string_lossy(), evdev_enabled)
    }
}

/// Parse a TOML value as an evdev mode
fn parse_evdev_mode(value: &toml::Value) -> Result<EvdevMode, SettingsError> {
    match value {
        toml::Value::Boolean(true) => Ok(EvdevMode::On),
        toml::Value::Boolean(false) => Ok(EvdevMode::Off),
        toml::Value::String(s) => s.parse(),
        _ => Err(SettingsError::InvalidValue(format!(
            "Cannot convert {:?} to an evdev mode",
            value
        ))),
    }
}

/// Create default settings content for a new installation
pub fn default_settings_content() -> &'static str {
    r#"# Inputid Settings
# Place this file at: ~/.config/inputid/settings.toml

[devices]
# Directory holding the device nodes
root = "/dev"
# System name of the parent of event devices without a physical location
virtual_sysname = "uinput"

[evdev]
# Whether legacy keyboard/mouse nodes are left to evdev:
# "auto" asks the kernel (kern.features.evdev_support), "on" or "off" force it
support = "auto"
"#
}
