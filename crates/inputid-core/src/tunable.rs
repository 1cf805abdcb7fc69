// Inputid System Tunables
// Boolean kernel tunables and the cached evdev-support check

use std::collections::HashMap;
use std::sync::OnceLock;

/// Kernel feature flag reporting that the evdev driver is compiled in
pub const EVDEV_SUPPORT_TUNABLE: &str = "kern.features.evdev_support";

/// Errors from tunable lookups
#[derive(Debug, thiserror::Error)]
pub enum TunableError {
    #[error("tunable {0} not found")]
    NotFound(String),

    #[error("IO error reading tunable: {0}")]
    Io(#[from] std::io::Error),
}

/// Source of boolean system tunables
pub trait SystemTunables {
    fn read_bool(&self, key: &str) -> Result<bool, TunableError>;
}

/// Tunables read through sysctl
#[derive(Debug, Default, Clone, Copy)]
pub struct SysctlTunables;

impl SystemTunables for SysctlTunables {
    fn read_bool(&self, key: &str) -> Result<bool, TunableError> {
        match crate::sysctl::read_int(key) {
            Ok(value) => Ok(value != 0),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(TunableError::NotFound(key.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Fixed set of tunables, for overrides and tests
#[derive(Debug, Default, Clone)]
pub struct FixedTunables {
    values: HashMap<String, bool>,
}

impl FixedTunables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: bool) -> Self {
        self.values.insert(key.to_string(), value);
        self
    }
}

impl SystemTunables for FixedTunables {
    fn read_bool(&self, key: &str) -> Result<bool, TunableError> {
        self.values
            .get(key)
            .copied()
            .ok_or_else(|| TunableError::NotFound(key.to_string()))
    }
}

/// Check whether the evdev driver is active. A failed lookup counts as
/// disabled.
pub fn evdev_enabled(tunables: &dyn SystemTunables) -> bool {
    match tunables.read_bool(EVDEV_SUPPORT_TUNABLE) {
        Ok(enabled) => {
            log::trace!("() EVDEV enabled: {}", enabled);
            enabled
        }
        Err(e) => {
            log::trace!("() EVDEV support unknown ({}), assuming disabled", e);
            false
        }
    }
}

/// Process-wide evdev check against the running kernel, read at most once
pub fn kernel_has_evdev_enabled() -> bool {
    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(|| evdev_enabled(&SysctlTunables))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_tunables() {
        let tunables = FixedTunables::new().with(EVDEV_SUPPORT_TUNABLE, true);
        assert!(tunables.read_bool(EVDEV_SUPPORT_TUNABLE).unwrap());
        assert!(matches!(
            tunables.read_bool("kern.missing"),
            Err(TunableError::NotFound(_))
        ));
    }

    #[test]
    fn test_evdev_enabled() {
        assert!(evdev_enabled(
            &FixedTunables::new().with(EVDEV_SUPPORT_TUNABLE, true)
        ));
        assert!(!evdev_enabled(
            &FixedTunables::new().with(EVDEV_SUPPORT_TUNABLE, false)
        ));
    }

    #[test]
    fn test_missing_tunable_means_disabled() {
        assert!(!evdev_enabled(&FixedTunables::new()));
    }

    #[test]
    fn test_kernel_check_is_stable() {
        assert_eq!(kernel_has_evdev_enabled(), kernel_has_evdev_enabled());
    }
}
