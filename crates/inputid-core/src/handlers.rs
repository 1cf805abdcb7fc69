// Inputid Classification Handlers
// Runs the handler selected by the rule table against a device record

use std::path::Path;

use crate::codes::BUS_VIRTUAL;
use crate::input::{classify, CapabilitySource, DeviceClass};
use crate::parent::{attach_parent, strip_name, ProductIdentity};
use crate::properties::apply_class;
use crate::record::{DeviceAction, UdevDevice};
use crate::rules::{HandlerKind, RuleTable};
use crate::tree::{synthesize_parent_from_tree, KernelTree};

/// System name used for event devices without a physical location
pub const VIRTUAL_SYSNAME: &str = "uinput";

/// Classifies devices and attaches their synthetic parents.
///
/// Each call works on one device only; no state is carried between devices.
#[derive(Debug)]
pub struct Classifier<C, T> {
    rules: RuleTable,
    capabilities: C,
    tree: T,
    virtual_sysname: String,
}

impl<C: CapabilitySource, T: KernelTree> Classifier<C, T> {
    pub fn new(rules: RuleTable, capabilities: C, tree: T) -> Self {
        Self {
            rules,
            capabilities,
            tree,
            virtual_sysname: VIRTUAL_SYSNAME.to_string(),
        }
    }

    /// Override the system name given to parents of virtual event devices
    pub fn with_virtual_sysname(mut self, sysname: impl Into<String>) -> Self {
        self.virtual_sysname = sysname.into();
        self
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn capabilities(&self) -> &C {
        &self.capabilities
    }

    pub fn tree(&self) -> &T {
        &self.tree
    }

    /// Create a record for `syspath` and classify it
    pub fn device_for(&self, syspath: &str, action: DeviceAction) -> UdevDevice {
        let mut device = UdevDevice::from_syspath(&self.rules, syspath, action);
        self.dispatch_classification(&mut device);
        device
    }

    /// Run the handler the rule table picks for this device.
    ///
    /// Returns the class that was applied, or `None` when no rule matched,
    /// the rule deferred to evdev, or probing failed. In those cases the
    /// device is left untouched.
    pub fn dispatch_classification(&self, device: &mut UdevDevice) -> Option<DeviceClass> {
        let handler = self.rules.handler_for(device.syspath())?;
        log::trace!("({}) handler {:?}", device.syspath(), handler);

        match handler {
            HandlerKind::Evdev => self.create_evdev(device),
            HandlerKind::Keyboard => Some(self.create_legacy(device, DeviceClass::Keyboard)),
            HandlerKind::Mouse => Some(self.create_legacy(device, DeviceClass::Mouse)),
            HandlerKind::Joystick => Some(self.create_legacy(device, DeviceClass::Joystick)),
            HandlerKind::Touchpad => Some(self.create_legacy(device, DeviceClass::Touchpad)),
            HandlerKind::Touchscreen => {
                Some(self.create_legacy(device, DeviceClass::Touchscreen))
            }
            HandlerKind::Kbdmux => Some(create_fixed(
                device,
                DeviceClass::Keyboard,
                "System keyboard multiplexor",
                ProductIdentity::new(BUS_VIRTUAL.into(), 1, 1, 0),
            )),
            HandlerKind::Sysmouse => Some(create_fixed(
                device,
                DeviceClass::Mouse,
                "System mouse",
                ProductIdentity::new(BUS_VIRTUAL.into(), 2, 1, 0),
            )),
        }
    }

    fn create_evdev(&self, device: &mut UdevDevice) -> Option<DeviceClass> {
        let devnode = device.devnode()?.to_string();

        let snapshot = match self.capabilities.read_capabilities(Path::new(&devnode)) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::error!("({}) could not query evdev: {}", devnode, e);
                return None;
            }
        };

        let class = classify(&snapshot.features());
        if class.is_none() {
            log::debug!("({}) no input capabilities, skipping", devnode);
            return None;
        }
        apply_class(device, class);

        let sysname = snapshot
            .phys
            .as_deref()
            .filter(|phys| !phys.is_empty())
            .unwrap_or(self.virtual_sysname.as_str());
        let product = snapshot.id.product_identity().to_string();
        attach_parent(device, sysname, strip_name(&snapshot.name), Some(&product), None);

        Some(class)
    }

    fn create_legacy(&self, device: &mut UdevDevice, class: DeviceClass) -> DeviceClass {
        apply_class(device, class);
        if !synthesize_parent_from_tree(device, &self.tree) {
            log::debug!("({}) no parent from kernel tree", device.syspath());
        }
        class
    }
}

/// Devices with a fixed, well-known identity
fn create_fixed(
    device: &mut UdevDevice,
    class: DeviceClass,
    name: &str,
    product: ProductIdentity,
) -> DeviceClass {
    apply_class(device, class);
    let sysname = device.sysname().to_string();
    attach_parent(device, &sysname, name, Some(&product.to_string()), None);
    class
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::*;
    use crate::input::{CapabilitySnapshot, InputIdentity, ProbeError};
    use crate::tree::MemoryTree;
    use std::cell::Cell;

    /// Returns a fixed snapshot (or failure) and counts probes
    struct StubSource {
        snapshot: Option<CapabilitySnapshot>,
        probes: Cell<usize>,
    }

    impl StubSource {
        fn new(snapshot: Option<CapabilitySnapshot>) -> Self {
            Self {
                snapshot,
                probes: Cell::new(0),
            }
        }
    }

    impl CapabilitySource for StubSource {
        fn read_capabilities(&self, devnode: &Path) -> Result<CapabilitySnapshot, ProbeError> {
            self.probes.set(self.probes.get() + 1);
            self.snapshot
                .clone()
                .ok_or_else(|| ProbeError::MissingName(devnode.display().to_string()))
        }
    }

    fn classifier(
        snapshot: Option<CapabilitySnapshot>,
        evdev_enabled: bool,
    ) -> Classifier<StubSource, MemoryTree> {
        Classifier::new(
            RuleTable::new(evdev_enabled),
            StubSource::new(snapshot),
            MemoryTree::new(),
        )
    }

    fn mouse_snapshot() -> CapabilitySnapshot {
        CapabilitySnapshot::new("Logitech USB Mouse, rev2", InputIdentity::new(3, 0x46d, 0xc077, 0x111))
            .with_phys("usb-0000:00:14.0-1/input0")
            .with_keys(&[BTN_LEFT, BTN_RIGHT, BTN_MIDDLE])
            .with_rel_axes(&[REL_X, REL_Y])
    }

    #[test]
    fn test_evdev_mouse() {
        let classifier = classifier(Some(mouse_snapshot()), false);
        let device = classifier.device_for("/dev/input/event4", DeviceAction::Add);

        assert_eq!(device.property("ID_INPUT"), Some("1"));
        assert_eq!(device.property("ID_INPUT_MOUSE"), Some("1"));

        let parent = device.parent().unwrap();
        assert_eq!(parent.syspath(), "usb-0000:00:14.0-1/input0");
        assert_eq!(parent.property("NAME"), Some("Logitech USB Mouse"));
        assert_eq!(parent.sysattr("name"), Some("Logitech USB Mouse"));
        assert_eq!(parent.property("PRODUCT"), Some("3/46d/c077/111"));
    }

    #[test]
    fn test_evdev_without_phys_uses_virtual_sysname() {
        let mut snapshot = mouse_snapshot();
        snapshot.phys = None;
        let classifier = classifier(Some(snapshot), false);
        let device = classifier.device_for("/dev/input/event4", DeviceAction::Add);
        assert_eq!(device.parent().unwrap().syspath(), VIRTUAL_SYSNAME);

        let mut snapshot = mouse_snapshot();
        snapshot.phys = None;
        let classifier = Classifier::new(
            RuleTable::new(false),
            StubSource::new(Some(snapshot)),
            MemoryTree::new(),
        )
        .with_virtual_sysname("virtual");
        let device = classifier.device_for("/dev/input/event4", DeviceAction::Add);
        assert_eq!(device.parent().unwrap().syspath(), "virtual");
    }

    #[test]
    fn test_evdev_probe_failure_leaves_device_untouched() {
        let classifier = classifier(None, false);
        let mut device = UdevDevice::from_syspath(classifier.rules(), "/dev/input/event1", DeviceAction::Add);
        let before = device.clone();

        assert_eq!(classifier.dispatch_classification(&mut device), None);
        assert_eq!(device, before);
        assert_eq!(classifier.capabilities().probes.get(), 1);
    }

    #[test]
    fn test_evdev_no_capabilities_leaves_device_untouched() {
        let empty = CapabilitySnapshot::new("Power Button", InputIdentity::default());
        let classifier = classifier(Some(empty), false);
        let device = classifier.device_for("/dev/input/event0", DeviceAction::Add);
        assert!(device.properties().is_empty());
        assert!(device.parent().is_none());
    }

    #[test]
    fn test_evdev_probed_even_when_evdev_enabled() {
        let classifier = classifier(Some(mouse_snapshot()), true);
        let device = classifier.device_for("/dev/input/event2", DeviceAction::Add);
        assert_eq!(device.property("ID_INPUT_MOUSE"), Some("1"));
    }

    #[test]
    fn test_sysmouse() {
        let classifier = classifier(None, false);
        let device = classifier.device_for("/dev/sysmouse", DeviceAction::Add);

        assert_eq!(device.property("ID_INPUT_MOUSE"), Some("1"));
        let parent = device.parent().unwrap();
        assert_eq!(parent.sysname(), "sysmouse");
        assert_eq!(parent.property("NAME"), Some("System mouse"));
        assert_eq!(parent.property("PRODUCT"), Some("6/2/1/0"));
        assert_eq!(classifier.capabilities().probes.get(), 0);
    }

    #[test]
    fn test_kbdmux() {
        let classifier = classifier(None, false);
        let device = classifier.device_for("/dev/kbdmux0", DeviceAction::Add);

        assert_eq!(device.property("ID_INPUT_KEYBOARD"), Some("1"));
        let parent = device.parent().unwrap();
        assert_eq!(parent.sysname(), "kbdmux0");
        assert_eq!(parent.property("NAME"), Some("System keyboard multiplexor"));
        assert_eq!(parent.property("PRODUCT"), Some("6/1/1/0"));
    }

    #[test]
    fn test_skipped_device_is_untouched() {
        let classifier = classifier(None, true);
        let device = classifier.device_for("/dev/sysmouse", DeviceAction::Add);
        assert_eq!(device.subsystem(), "unknown");
        assert!(device.properties().is_empty());
        assert!(device.parent().is_none());
    }

    #[test]
    fn test_legacy_device_without_tree_entry_keeps_class() {
        let classifier = classifier(None, false);
        let device = classifier.device_for("/dev/uep0", DeviceAction::Add);
        assert_eq!(device.property("ID_INPUT_TOUCHSCREEN"), Some("1"));
        assert!(device.parent().is_none());
    }

    #[test]
    fn test_unmatched_path() {
        let classifier = classifier(Some(mouse_snapshot()), false);
        let mut device = UdevDevice::from_syspath(classifier.rules(), "/dev/da0", DeviceAction::Add);
        assert_eq!(classifier.dispatch_classification(&mut device), None);
        assert!(device.properties().is_empty());
        assert_eq!(classifier.capabilities().probes.get(), 0);
    }
}
