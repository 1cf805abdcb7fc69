// Inputid Input Layer - Capability Prober
// Reads name, identity and capability bitmasks from event device nodes

use std::path::Path;

use super::device::CapabilitySnapshot;

/// Errors that abort a capability probe
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Device {0} reports no name")]
    MissingName(String),

    #[error("Event device error: {0}")]
    Evdev(String),
}

/// Source of capability snapshots for event device nodes
pub trait CapabilitySource {
    /// Probe the device at `devnode`.
    ///
    /// Any handle opened for the probe must be closed before returning.
    fn read_capabilities(&self, devnode: &Path) -> Result<CapabilitySnapshot, ProbeError>;
}

#[cfg(feature = "system")]
pub use self::evdev_source::EvdevSource;

#[cfg(feature = "system")]
mod evdev_source {
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};

    use evdev::Device;
    use parking_lot::Mutex;

    use super::{CapabilitySource, ProbeError};
    use crate::codes::{ABS_CNT, KEY_CNT, REL_CNT};
    use crate::input::codeset::CodeSet;
    use crate::input::device::{CapabilitySnapshot, InputIdentity};

    /// Capability source backed by the evdev interface.
    ///
    /// Devices the caller already holds open can be tracked here so that
    /// probing them does not open the node a second time.
    #[derive(Default)]
    pub struct EvdevSource {
        tracked: Mutex<HashMap<PathBuf, Device>>,
    }

    impl EvdevSource {
        pub fn new() -> Self {
            Self::default()
        }

        /// Hand an open device over for reuse by later probes
        pub fn track(&self, devnode: impl Into<PathBuf>, device: Device) {
            self.tracked.lock().insert(devnode.into(), device);
        }

        /// Stop tracking a device and give it back
        pub fn untrack(&self, devnode: &Path) -> Option<Device> {
            self.tracked.lock().remove(devnode)
        }

        pub fn is_tracked(&self, devnode: &Path) -> bool {
            self.tracked.lock().contains_key(devnode)
        }

        fn snapshot(device: &Device, devnode: &Path) -> Result<CapabilitySnapshot, ProbeError> {
            let name = device
                .name()
                .ok_or_else(|| ProbeError::MissingName(devnode.display().to_string()))?;

            let input_id = device.input_id();
            let id = InputIdentity::new(
                input_id.bus_type().0,
                input_id.vendor(),
                input_id.product(),
                input_id.version(),
            );

            let mut snapshot = CapabilitySnapshot::new(name, id);
            snapshot.phys = device
                .physical_path()
                .filter(|phys| !phys.is_empty())
                .map(str::to_string);

            let mut keys = CodeSet::new(KEY_CNT);
            if let Some(supported) = device.supported_keys() {
                keys.extend(supported.iter().map(|key| key.code()));
            }
            let mut rel_axes = CodeSet::new(REL_CNT);
            if let Some(supported) = device.supported_relative_axes() {
                rel_axes.extend(supported.iter().map(|axis| axis.0));
            }
            let mut abs_axes = CodeSet::new(ABS_CNT);
            if let Some(supported) = device.supported_absolute_axes() {
                abs_axes.extend(supported.iter().map(|axis| axis.0));
            }

            snapshot.keys = keys;
            snapshot.rel_axes = rel_axes;
            snapshot.abs_axes = abs_axes;
            Ok(snapshot)
        }
    }

    impl CapabilitySource for EvdevSource {
        fn read_capabilities(&self, devnode: &Path) -> Result<CapabilitySnapshot, ProbeError> {
            if let Some(device) = self.tracked.lock().get(devnode) {
                return Self::snapshot(device, devnode);
            }

            // Dropped at the end of this scope on every path
            let device = Device::open(devnode)?;
            Self::snapshot(&device, devnode)
        }
    }

    impl std::fmt::Debug for EvdevSource {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("EvdevSource")
                .field("tracked", &self.tracked.lock().len())
                .finish()
        }
    }

}
