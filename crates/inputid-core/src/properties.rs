// Inputid Property Setter
// Writes ID_INPUT* markers for a detected device class

use crate::input::DeviceClass;
use crate::record::UdevDevice;

/// Generic marker set on every classified input device
pub const ID_INPUT: &str = "ID_INPUT";

/// Mark `device` as an input device of the given class.
///
/// `ID_INPUT` is always set; `DeviceClass::None` sets nothing else.
pub fn apply_class(device: &mut UdevDevice, class: DeviceClass) {
    device.insert_property(ID_INPUT, "1");
    for key in class.properties() {
        device.insert_property(*key, "1");
    }
    log::debug!("({}) input class: {}", device.syspath(), class);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::DeviceAction;

    fn device() -> UdevDevice {
        UdevDevice::new_common("/dev/input/event0", DeviceAction::None)
    }

    fn keys(device: &UdevDevice) -> Vec<&str> {
        device.properties().keys().map(String::as_str).collect()
    }

    #[test]
    fn test_keyboard_properties() {
        let mut dev = device();
        apply_class(&mut dev, DeviceClass::Keyboard);
        assert_eq!(keys(&dev), vec!["ID_INPUT", "ID_INPUT_KEY", "ID_INPUT_KEYBOARD"]);
        assert!(dev.properties().values().all(|v| v == "1"));
    }

    #[test]
    fn test_touchpad_is_also_mouse() {
        let mut dev = device();
        apply_class(&mut dev, DeviceClass::Touchpad);
        assert_eq!(keys(&dev), vec!["ID_INPUT", "ID_INPUT_MOUSE", "ID_INPUT_TOUCHPAD"]);
    }

    #[test]
    fn test_single_marker_classes() {
        for (class, key) in [
            (DeviceClass::Mouse, "ID_INPUT_MOUSE"),
            (DeviceClass::Touchscreen, "ID_INPUT_TOUCHSCREEN"),
            (DeviceClass::Joystick, "ID_INPUT_JOYSTICK"),
            (DeviceClass::Tablet, "ID_INPUT_TABLET"),
        ] {
            let mut dev = device();
            apply_class(&mut dev, class);
            assert_eq!(keys(&dev), vec!["ID_INPUT", key]);
        }
    }

    #[test]
    fn test_none_sets_generic_marker_only() {
        let mut dev = device();
        apply_class(&mut dev, DeviceClass::None);
        assert_eq!(keys(&dev), vec!["ID_INPUT"]);
    }

    #[test]
    fn test_apply_twice_is_idempotent() {
        let mut dev = device();
        apply_class(&mut dev, DeviceClass::Joystick);
        let before = dev.clone();
        apply_class(&mut dev, DeviceClass::Joystick);
        assert_eq!(dev, before);
    }

    #[test]
    fn test_existing_properties_are_kept() {
        let mut dev = device();
        dev.insert_property("DEVNAME", "/dev/input/event0");
        apply_class(&mut dev, DeviceClass::Mouse);
        assert_eq!(dev.property("DEVNAME"), Some("/dev/input/event0"));
        assert_eq!(keys(&dev), vec!["DEVNAME", "ID_INPUT", "ID_INPUT_MOUSE"]);
    }
}
