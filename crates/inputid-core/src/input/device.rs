// Inputid Input Layer - Device Capabilities
// Capability snapshot read from an event device and the predicates derived from it

use super::codeset::CodeSet;
use crate::codes::*;
use crate::parent::ProductIdentity;

/// Bus/vendor/product/version quad reported by an event device
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputIdentity {
    pub bus_type: u16,
    pub vendor: u16,
    pub product: u16,
    pub version: u16,
}

impl InputIdentity {
    pub fn new(bus_type: u16, vendor: u16, product: u16, version: u16) -> Self {
        Self {
            bus_type,
            vendor,
            product,
            version,
        }
    }

    /// Identity formatted for the `PRODUCT` property
    pub fn product_identity(&self) -> ProductIdentity {
        ProductIdentity::new(
            self.bus_type.into(),
            self.vendor.into(),
            self.product.into(),
            self.version.into(),
        )
    }
}

/// Everything read from an event device in one probe.
///
/// Built fresh for every classification and never stored.
#[derive(Debug, Clone)]
pub struct CapabilitySnapshot {
    /// Free-text device name
    pub name: String,
    /// Physical location string, if the device reports one
    pub phys: Option<String>,
    pub id: InputIdentity,
    /// Supported key and button codes
    pub keys: CodeSet,
    /// Supported relative axes
    pub rel_axes: CodeSet,
    /// Supported absolute axes
    pub abs_axes: CodeSet,
}

impl CapabilitySnapshot {
    /// Create a snapshot with empty capability sets
    pub fn new(name: impl Into<String>, id: InputIdentity) -> Self {
        Self {
            name: name.into(),
            phys: None,
            id,
            keys: CodeSet::new(KEY_CNT),
            rel_axes: CodeSet::new(REL_CNT),
            abs_axes: CodeSet::new(ABS_CNT),
        }
    }

    pub fn with_phys(mut self, phys: impl Into<String>) -> Self {
        self.phys = Some(phys.into());
        self
    }

    pub fn with_keys(mut self, codes: &[u16]) -> Self {
        self.keys.extend(codes.iter().copied());
        self
    }

    pub fn with_rel_axes(mut self, codes: &[u16]) -> Self {
        self.rel_axes.extend(codes.iter().copied());
        self
    }

    pub fn with_abs_axes(mut self, codes: &[u16]) -> Self {
        self.abs_axes.extend(codes.iter().copied());
        self
    }

    /// Reduce the raw code sets to the flags the classifier looks at
    pub fn features(&self) -> InputFeatures {
        let keys = &self.keys;
        let abs = &self.abs_axes;
        let rel = &self.rel_axes;

        InputFeatures {
            has_keys: keys.any_in(0..BTN_MISC),
            has_buttons: keys.any_in(BTN_MISC..BTN_JOYSTICK),
            has_lmr: keys.any_in(BTN_LEFT..BTN_MIDDLE + 1),
            has_rel_axes: rel.any(),
            has_abs_axes: abs.any(),
            has_mt: abs.any_in(ABS_MT_SLOT..ABS_CNT),
            has_joystick_button: keys.contains(BTN_JOYSTICK),
            has_pen: keys.contains(BTN_TOOL_PEN)
                || keys.contains(BTN_STYLUS)
                || keys.contains(BTN_STYLUS2),
            has_touch: keys.contains(BTN_TOUCH),
            has_tool_finger: keys.contains(BTN_TOOL_FINGER),
            has_abs_xy: abs.contains(ABS_X) && abs.contains(ABS_Y),
            has_pressure: abs.contains(ABS_PRESSURE),
            has_rel_xy: rel.contains(REL_X) && rel.contains(REL_Y),
        }
    }
}

/// Boolean capability flags derived from a [`CapabilitySnapshot`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputFeatures {
    /// Any key code below the misc button range
    pub has_keys: bool,
    /// Any code in the misc button range, joystick buttons excluded
    pub has_buttons: bool,
    /// Left, right or middle mouse button
    pub has_lmr: bool,
    pub has_rel_axes: bool,
    pub has_abs_axes: bool,
    /// Any absolute axis at or above the multitouch slot
    pub has_mt: bool,
    pub has_joystick_button: bool,
    /// Pen tool or one of the stylus buttons
    pub has_pen: bool,
    pub has_touch: bool,
    pub has_tool_finger: bool,
    /// Both absolute X and Y axes
    pub has_abs_xy: bool,
    pub has_pressure: bool,
    /// Both relative X and Y axes
    pub has_rel_xy: bool,
}
