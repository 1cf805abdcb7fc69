// Inputid Input Layer
// Capability probing and device class detection for event devices

mod class;
pub mod codeset;
mod device;
pub mod probe;

pub use class::{classify, DeviceClass};
pub use codeset::CodeSet;
pub use device::{CapabilitySnapshot, InputFeatures, InputIdentity};
pub use probe::{CapabilitySource, ProbeError};

#[cfg(feature = "system")]
pub use probe::EvdevSource;
