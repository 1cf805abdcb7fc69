// Inputid Kernel Device Tree
// Recovers name and vendor/product identity of legacy devices from newbus metadata

use std::collections::HashMap;

use strum_macros::{Display, EnumIter, IntoStaticStr};

use crate::codes::*;
use crate::parent::{attach_parent, strip_name, ProductIdentity};
use crate::record::UdevDevice;

/// Parent name of devices attached to the AT keyboard controller
pub const ATKBDC_PARENT: &str = "atkbdc0";

/// Per-device attribute exposed under `dev.<driver>.<unit>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
pub enum TreeAttribute {
    #[strum(serialize = "%desc")]
    Description,
    #[strum(serialize = "%pnpinfo")]
    PnpInfo,
    #[strum(serialize = "%parent")]
    Parent,
}

/// Read access to the kernel device tree
pub trait KernelTree {
    /// Value of one attribute of device `<driver><unit>`, if present
    fn attribute(&self, driver: &str, unit: &str, attr: TreeAttribute) -> Option<String>;
}

/// Kernel tree backed by `dev.*` sysctls
#[derive(Debug, Default, Clone, Copy)]
pub struct SysctlTree;

impl KernelTree for SysctlTree {
    fn attribute(&self, driver: &str, unit: &str, attr: TreeAttribute) -> Option<String> {
        let mib = format!("dev.{}.{}.{}", driver, unit, attr);
        match crate::sysctl::read_string(&mib) {
            Ok(value) => Some(value),
            Err(e) => {
                log::trace!("sysctl {}: {}", mib, e);
                None
            }
        }
    }
}

/// In-memory kernel tree
#[derive(Debug, Default, Clone)]
pub struct MemoryTree {
    attributes: HashMap<(String, String, TreeAttribute), String>,
}

impl MemoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one attribute of device `<driver><unit>`
    pub fn insert(&mut self, driver: &str, unit: &str, attr: TreeAttribute, value: &str) {
        self.attributes.insert(
            (driver.to_string(), unit.to_string(), attr),
            value.to_string(),
        );
    }

    /// Add description, PNP info and parent name of a device in one go
    pub fn with_device(
        mut self,
        driver: &str,
        unit: &str,
        desc: &str,
        pnpinfo: &str,
        parent: &str,
    ) -> Self {
        self.insert(driver, unit, TreeAttribute::Description, desc);
        self.insert(driver, unit, TreeAttribute::PnpInfo, pnpinfo);
        self.insert(driver, unit, TreeAttribute::Parent, parent);
        self
    }
}

impl KernelTree for MemoryTree {
    fn attribute(&self, driver: &str, unit: &str, attr: TreeAttribute) -> Option<String> {
        self.attributes
            .get(&(driver.to_string(), unit.to_string(), attr))
            .cloned()
    }
}

/// Split a sysname into driver name and unit number ("psm0" -> ("psm", "0")).
///
/// Returns `None` when there is no trailing unit number.
pub fn split_unit(sysname: &str) -> Option<(&str, &str)> {
    let driver = sysname.trim_end_matches(|c: char| c.is_ascii_digit());
    if driver.len() == sysname.len() {
        return None;
    }
    Some(sysname.split_at(driver.len()))
}

/// Value of `key` in a `key=value` PNP info blob.
///
/// Tokens are separated by whitespace or commas and keys only match at the
/// start of a token.
pub fn pnp_value<'a>(pnpinfo: &'a str, key: &str) -> Option<&'a str> {
    pnpinfo
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter_map(|token| token.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, value)| value)
}

/// Fields of a PNP info blob the identity lookup cares about
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PnpInfo<'a> {
    pub vendor: Option<&'a str>,
    pub product: Option<&'a str>,
    pub device: Option<&'a str>,
    /// ACPI hardware id; the literal `none` is dropped
    pub pnp_id: Option<&'a str>,
}

impl<'a> PnpInfo<'a> {
    pub fn parse(pnpinfo: &'a str) -> Self {
        Self {
            vendor: pnp_value(pnpinfo, "vendor"),
            product: pnp_value(pnpinfo, "product"),
            device: pnp_value(pnpinfo, "device"),
            pnp_id: pnp_value(pnpinfo, "_HID").filter(|id| *id != "none"),
        }
    }
}

/// Parse an integer the way `strtol(s, NULL, 0)` does.
///
/// Accepts an optional sign, `0x` hex, leading-zero octal and decimal; stops
/// at the first invalid digit. Unparsable input yields 0.
pub fn parse_c_integer(s: &str) -> u32 {
    let s = s.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits) = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        if hex.starts_with(|c: char| c.is_ascii_hexdigit()) {
            (16, hex)
        } else {
            // "0x" with no hex digits parses as the leading zero
            (8, "0")
        }
    } else if s.starts_with('0') {
        (8, s)
    } else {
        (10, s)
    };

    let value = digits
        .chars()
        .map_while(|c| c.to_digit(radix))
        .fold(0u64, |acc, d| {
            acc.saturating_mul(radix as u64).saturating_add(d as u64)
        });

    // strtol returns a long which the caller stores into a uint32_t
    let value = value.min(i64::MAX as u64) as i64;
    let value = if negative { value.wrapping_neg() } else { value };
    value as u32
}

/// Bus and vendor/product pair of a legacy device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyIdentity {
    pub bus: u16,
    pub vendor: u32,
    pub product: u32,
}

impl LegacyIdentity {
    /// Pick the identity source: USB ids, then PCI ids, then the AT keyboard
    /// controller defaults, then a virtual device.
    pub fn resolve(driver: &str, pnp: &PnpInfo<'_>, parent: Option<&str>) -> Self {
        if let (Some(vendor), Some(product)) = (pnp.vendor, pnp.product) {
            return Self {
                bus: BUS_USB,
                vendor: parse_c_integer(vendor),
                product: parse_c_integer(product),
            };
        }

        if let (Some(vendor), Some(device)) = (pnp.vendor, pnp.device) {
            return Self {
                bus: BUS_PCI,
                vendor: parse_c_integer(vendor),
                product: parse_c_integer(device),
            };
        }

        if parent == Some(ATKBDC_PARENT) {
            let (vendor, product) = match driver {
                "atkbd" => (PS2_KEYBOARD_VENDOR, PS2_KEYBOARD_PRODUCT),
                "psm" => (PS2_MOUSE_VENDOR, PS2_MOUSE_GENERIC_PRODUCT),
                _ => (0, 0),
            };
            return Self {
                bus: BUS_I8042,
                vendor,
                product,
            };
        }

        Self {
            bus: BUS_VIRTUAL,
            vendor: 0,
            product: 0,
        }
    }

    /// Product identity with the version field zeroed
    pub fn product_identity(&self) -> ProductIdentity {
        ProductIdentity::new(self.bus.into(), self.vendor, self.product, 0)
    }
}

/// Build and attach a parent for a legacy device from kernel tree metadata.
///
/// Returns whether a parent was attached. Nothing is attached when the
/// sysname has no unit number or the description or PNP info is missing.
pub fn synthesize_parent_from_tree(device: &mut UdevDevice, tree: &dyn KernelTree) -> bool {
    let sysname = device.sysname().to_string();
    let Some((driver, unit)) = split_unit(&sysname) else {
        return false;
    };

    let Some(desc) = tree.attribute(driver, unit, TreeAttribute::Description) else {
        log::debug!("({}) no description in kernel tree", sysname);
        return false;
    };
    let Some(pnpinfo) = tree.attribute(driver, unit, TreeAttribute::PnpInfo) else {
        log::debug!("({}) no pnpinfo in kernel tree", sysname);
        return false;
    };
    let parent_name = tree.attribute(driver, unit, TreeAttribute::Parent);

    let pnp = PnpInfo::parse(&pnpinfo);
    let identity = LegacyIdentity::resolve(driver, &pnp, parent_name.as_deref());
    let product = identity.product_identity().to_string();

    attach_parent(device, &sysname, strip_name(&desc), Some(&product), pnp.pnp_id);
    true
}
