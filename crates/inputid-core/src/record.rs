// Inputid Device Record
// udev-style device record carrying properties, sysattrs and an owned parent

use indexmap::IndexMap;
use strum_macros::{Display, IntoStaticStr};

use crate::rules::{sysname_for, RuleTable};

/// Action a device record was created for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum DeviceAction {
    None,
    Add,
    Remove,
}

/// A device as seen by udev consumers.
///
/// Properties and sysattrs keep insertion order. Inserting an existing key
/// replaces its value in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UdevDevice {
    syspath: String,
    sysname: String,
    devnode: Option<String>,
    subsystem: String,
    action: DeviceAction,
    properties: IndexMap<String, String>,
    sysattrs: IndexMap<String, String>,
    parent: Option<Box<UdevDevice>>,
}

impl UdevDevice {
    /// Create a bare record with no subsystem and no device node
    pub fn new_common(syspath: impl Into<String>, action: DeviceAction) -> Self {
        let syspath = syspath.into();
        Self {
            sysname: sysname_for(&syspath).to_string(),
            syspath,
            devnode: None,
            subsystem: String::new(),
            action,
            properties: IndexMap::new(),
            sysattrs: IndexMap::new(),
            parent: None,
        }
    }

    /// Create a record for a device node discovered on the device tree.
    ///
    /// The device node is the syspath itself and the subsystem comes from
    /// the first matching rule.
    pub fn from_syspath(rules: &RuleTable, syspath: impl Into<String>, action: DeviceAction) -> Self {
        let mut device = Self::new_common(syspath, action);
        device.devnode = Some(device.syspath.clone());
        device.subsystem = rules.subsystem_for(&device.syspath).to_string();
        device
    }

    pub fn syspath(&self) -> &str {
        &self.syspath
    }

    pub fn sysname(&self) -> &str {
        &self.sysname
    }

    pub fn devnode(&self) -> Option<&str> {
        self.devnode.as_deref()
    }

    pub fn subsystem(&self) -> &str {
        &self.subsystem
    }

    pub fn action(&self) -> DeviceAction {
        self.action
    }

    pub fn properties(&self) -> &IndexMap<String, String> {
        &self.properties
    }

    pub fn sysattrs(&self) -> &IndexMap<String, String> {
        &self.sysattrs
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn sysattr(&self, key: &str) -> Option<&str> {
        self.sysattrs.get(key).map(String::as_str)
    }

    pub fn insert_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn insert_sysattr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.sysattrs.insert(key.into(), value.into());
    }

    pub fn parent(&self) -> Option<&UdevDevice> {
        self.parent.as_deref()
    }

    /// Attach a parent, replacing any previous one
    pub fn set_parent(&mut self, parent: UdevDevice) {
        self.parent = Some(Box::new(parent));
    }
}
