// Inputid Core Library
// Input device classification and udev-style metadata for BSD device trees

pub mod codes;
pub mod handlers;
pub mod input;
pub mod parent;
pub mod properties;
pub mod record;
pub mod rules;
pub mod settings;
pub mod sysctl;
pub mod tree;
pub mod tunable;

pub use handlers::{Classifier, VIRTUAL_SYSNAME};
pub use input::{
    classify, CapabilitySnapshot, CapabilitySource, CodeSet, DeviceClass, InputFeatures,
    InputIdentity, ProbeError,
};
pub use parent::{make_parent, strip_name, ProductIdentity};
pub use properties::apply_class;
pub use record::{DeviceAction, UdevDevice};
pub use rules::{
    devpath_for, syspath_for, sysname_for, HandlerKind, RuleTable, SubsystemRule,
    UNKNOWN_SUBSYSTEM,
};
pub use settings::{EvdevMode, Settings, SettingsError};
pub use tree::{synthesize_parent_from_tree, KernelTree, MemoryTree, SysctlTree, TreeAttribute};
pub use tunable::{FixedTunables, SysctlTunables, SystemTunables, TunableError};

#[cfg(feature = "system")]
pub use input::EvdevSource;
