// Inputid Input Layer - Device Class Detection
// Infers the semantic kind of an event device from its capability flags

use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use super::device::InputFeatures;

/// Semantic kind of an input device
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum DeviceClass {
    /// Nothing recognisable; no properties are attached
    None,
    Keyboard,
    Mouse,
    Touchpad,
    Touchscreen,
    Joystick,
    Tablet,
}

impl DeviceClass {
    /// Class-specific `ID_INPUT_*` properties, without the generic `ID_INPUT` marker
    pub fn properties(self) -> &'static [&'static str] {
        match self {
            DeviceClass::None => &[],
            DeviceClass::Keyboard => &["ID_INPUT_KEY", "ID_INPUT_KEYBOARD"],
            DeviceClass::Mouse => &["ID_INPUT_MOUSE"],
            DeviceClass::Touchpad => &["ID_INPUT_MOUSE", "ID_INPUT_TOUCHPAD"],
            DeviceClass::Touchscreen => &["ID_INPUT_TOUCHSCREEN"],
            DeviceClass::Joystick => &["ID_INPUT_JOYSTICK"],
            DeviceClass::Tablet => &["ID_INPUT_TABLET"],
        }
    }

    pub fn is_none(self) -> bool {
        self == DeviceClass::None
    }
}

/// Classify an event device.
///
/// Derived from the probe heuristics of the xf86-input-evdev driver.
/// Absolute-axis hardware is disambiguated first (joystick, tablet,
/// touchpad, touchscreen); everything else falls back to keyboard or mouse.
pub fn classify(features: &InputFeatures) -> DeviceClass {
    let mut has_buttons = features.has_buttons;

    if features.has_abs_axes {
        if features.has_mt && !has_buttons {
            if features.has_joystick_button {
                return DeviceClass::Joystick;
            }
            has_buttons = true;
        }

        if features.has_abs_xy {
            if features.has_pen {
                return DeviceClass::Tablet;
            }
            if features.has_pressure || features.has_touch {
                return if features.has_lmr || features.has_tool_finger {
                    DeviceClass::Touchpad
                } else {
                    DeviceClass::Touchscreen
                };
            }
            // some touchscreens use BTN_LEFT rather than BTN_TOUCH
            if !features.has_rel_xy && features.has_lmr {
                return DeviceClass::Touchscreen;
            }
        }
    }

    if features.has_keys {
        DeviceClass::Keyboard
    } else if features.has_rel_axes || features.has_abs_axes || has_buttons {
        DeviceClass::Mouse
    } else {
        DeviceClass::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::*;
    use crate::input::device::{CapabilitySnapshot, InputIdentity};
    use strum::IntoEnumIterator;

    fn snapshot() -> CapabilitySnapshot {
        CapabilitySnapshot::new("Test Device", InputIdentity::default())
    }

    fn classify_snapshot(snapshot: &CapabilitySnapshot) -> DeviceClass {
        classify(&snapshot.features())
    }

    #[test]
    fn test_keys_only_is_keyboard() {
        let features = InputFeatures {
            has_keys: true,
            ..Default::default()
        };
        assert_eq!(classify(&features), DeviceClass::Keyboard);
    }

    #[test]
    fn test_nothing_is_none() {
        assert_eq!(classify(&InputFeatures::default()), DeviceClass::None);
        assert_eq!(classify_snapshot(&snapshot()), DeviceClass::None);
    }

    #[test]
    fn test_relative_mouse() {
        let caps = snapshot()
            .with_keys(&[BTN_LEFT, BTN_RIGHT, BTN_MIDDLE])
            .with_rel_axes(&[REL_X, REL_Y]);
        assert_eq!(classify_snapshot(&caps), DeviceClass::Mouse);
    }

    #[test]
    fn test_buttons_only_is_mouse() {
        let caps = snapshot().with_keys(&[BTN_MISC]);
        assert_eq!(classify_snapshot(&caps), DeviceClass::Mouse);
    }

    #[test]
    fn test_pen_is_tablet_regardless_of_other_bits() {
        let caps = snapshot()
            .with_abs_axes(&[ABS_X, ABS_Y, ABS_PRESSURE])
            .with_keys(&[BTN_TOOL_PEN, BTN_TOUCH, BTN_LEFT, BTN_TOOL_FINGER, 30]);
        assert_eq!(classify_snapshot(&caps), DeviceClass::Tablet);
    }

    #[test]
    fn test_touch_without_buttons_is_touchscreen() {
        let caps = snapshot()
            .with_abs_axes(&[ABS_X, ABS_Y])
            .with_keys(&[BTN_TOUCH]);
        assert_eq!(classify_snapshot(&caps), DeviceClass::Touchscreen);
    }

    #[test]
    fn test_touch_with_buttons_is_touchpad() {
        let caps = snapshot()
            .with_abs_axes(&[ABS_X, ABS_Y])
            .with_keys(&[BTN_TOUCH, BTN_LEFT]);
        assert_eq!(classify_snapshot(&caps), DeviceClass::Touchpad);
    }

    #[test]
    fn test_pressure_with_tool_finger_is_touchpad() {
        let caps = snapshot()
            .with_abs_axes(&[ABS_X, ABS_Y, ABS_PRESSURE])
            .with_keys(&[BTN_TOOL_FINGER]);
        assert_eq!(classify_snapshot(&caps), DeviceClass::Touchpad);
    }

    #[test]
    fn test_legacy_touchscreen_with_left_button() {
        let caps = snapshot()
            .with_abs_axes(&[ABS_X, ABS_Y])
            .with_keys(&[BTN_LEFT]);
        assert_eq!(classify_snapshot(&caps), DeviceClass::Touchscreen);
    }

    #[test]
    fn test_absolute_pointer_with_relative_axes_is_mouse() {
        // Virtual machine tablets report both axis kinds
        let caps = snapshot()
            .with_abs_axes(&[ABS_X, ABS_Y])
            .with_rel_axes(&[REL_X, REL_Y])
            .with_keys(&[BTN_LEFT]);
        assert_eq!(classify_snapshot(&caps), DeviceClass::Mouse);
    }

    #[test]
    fn test_multitouch_with_joystick_button_is_joystick() {
        let features = InputFeatures {
            has_abs_axes: true,
            has_mt: true,
            has_joystick_button: true,
            has_abs_xy: true,
            has_touch: true,
            ..Default::default()
        };
        assert_eq!(classify(&features), DeviceClass::Joystick);
    }

    #[test]
    fn test_multitouch_without_joystick_button_falls_through() {
        let caps = snapshot()
            .with_abs_axes(&[ABS_X, ABS_Y, ABS_MT_SLOT])
            .with_keys(&[BTN_TOUCH]);
        assert_eq!(classify_snapshot(&caps), DeviceClass::Touchscreen);

        // Without X/Y the forced button flag makes it a mouse
        let caps = snapshot().with_abs_axes(&[ABS_MT_SLOT]);
        assert_eq!(classify_snapshot(&caps), DeviceClass::Mouse);
    }

    #[test]
    fn test_multitouch_with_buttons_ignores_joystick_button() {
        let caps = snapshot()
            .with_abs_axes(&[ABS_X, ABS_Y, ABS_MT_SLOT])
            .with_keys(&[BTN_JOYSTICK, BTN_LEFT, BTN_TOUCH]);
        assert_eq!(classify_snapshot(&caps), DeviceClass::Touchpad);
    }

    #[test]
    fn test_keyboard_with_absolute_axes_but_no_xy() {
        let caps = snapshot().with_abs_axes(&[ABS_PRESSURE]).with_keys(&[30]);
        assert_eq!(classify_snapshot(&caps), DeviceClass::Keyboard);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let caps = snapshot()
            .with_abs_axes(&[ABS_X, ABS_Y])
            .with_keys(&[BTN_TOUCH, BTN_LEFT]);
        let first = classify_snapshot(&caps);
        for _ in 0..8 {
            assert_eq!(classify_snapshot(&caps), first);
        }
    }

    #[test]
    fn test_class_names() {
        assert_eq!(DeviceClass::Touchscreen.to_string(), "touchscreen");
        assert_eq!("tablet".parse::<DeviceClass>(), Ok(DeviceClass::Tablet));
        let name: &'static str = DeviceClass::None.into();
        assert_eq!(name, "none");
    }

    #[test]
    fn test_only_none_has_no_properties() {
        for class in DeviceClass::iter() {
            assert_eq!(class.properties().is_empty(), class.is_none());
        }
    }
}
