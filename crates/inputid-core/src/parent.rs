// Inputid Parent Synthesis
// Builds the synthetic parent device that carries name and vendor/product identity

use std::fmt;

use crate::record::{DeviceAction, UdevDevice};

/// Bus/vendor/product/version identity as printed into the `PRODUCT` property.
///
/// Each field is written as lowercase hex without padding, e.g. `3/46d/c077/111`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductIdentity {
    pub bus: u32,
    pub vendor: u32,
    pub product: u32,
    pub version: u32,
}

impl ProductIdentity {
    pub fn new(bus: u32, vendor: u32, product: u32, version: u32) -> Self {
        Self {
            bus,
            vendor,
            product,
            version,
        }
    }
}

impl fmt::Display for ProductIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:x}/{:x}/{:x}/{:x}",
            self.bus, self.vendor, self.product, self.version
        )
    }
}

/// Cut a device description at its first comma.
///
/// Kernel descriptions append vendor details after a comma
/// ("Logitech USB Mouse, rev2" becomes "Logitech USB Mouse").
pub fn strip_name(name: &str) -> &str {
    name.split(',').next().unwrap_or(name)
}

/// Create the parent record that xorg-server and libinput read the device
/// name and vendor strings from.
///
/// Sets `NAME` and the `name` sysattr to `name`, and `PRODUCT` when a product
/// string is given. When a PNP id is supplied the `id` sysattr is written too;
/// it carries the product string, which is what existing consumers read.
pub fn make_parent(
    sysname: &str,
    name: &str,
    product: Option<&str>,
    pnp_id: Option<&str>,
) -> UdevDevice {
    let mut parent = UdevDevice::new_common(sysname, DeviceAction::None);

    parent.insert_property("NAME", name);
    parent.insert_sysattr("name", name);
    if let Some(product) = product {
        parent.insert_property("PRODUCT", product);
    }
    if pnp_id.is_some() {
        parent.insert_sysattr("id", product.unwrap_or_default());
    }

    parent
}

/// Build a parent with [`make_parent`] and attach it to `device`
pub fn attach_parent(
    device: &mut UdevDevice,
    sysname: &str,
    name: &str,
    product: Option<&str>,
    pnp_id: Option<&str>,
) {
    let parent = make_parent(sysname, name, product, pnp_id);
    log::debug!(
        "({}) parent {} name={:?} product={:?}",
        device.syspath(),
        sysname,
        name,
        product
    );
    device.set_parent(parent);
}
