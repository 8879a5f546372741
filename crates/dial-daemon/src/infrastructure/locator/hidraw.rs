//! `hidraw` node discovery via sysfs.
//!
//! Every `/sys/class/hidraw/hidrawN/device/uevent` file contains a line like
//!
//! ```text
//! HID_ID=0003:00001EE9:00001590
//! ```
//!
//! holding the bus type, vendor ID, and product ID in hexadecimal.  The dial
//! interface is matched by vendor and product; the matching entry name maps
//! directly to `/dev/hidrawN`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::trace;

/// Primary USB vendor ID of the dial controller.
pub const DIAL_VENDOR_ID: u32 = 0x1EE9;
/// Alternate vendor ID reported by some firmware revisions.
pub const DIAL_VENDOR_ID_ALT: u32 = 0x1E19;
/// USB product ID of the dial controller.
pub const DIAL_PRODUCT_ID: u32 = 0x1590;

const DEFAULT_SYSFS_ROOT: &str = "/sys/class/hidraw";
const DEFAULT_DEV_ROOT: &str = "/dev";

/// Parses the `HID_ID=bus:vendor:product` line of a uevent file.
///
/// Returns `(vendor, product)`, or `None` if the line is absent or malformed.
pub fn parse_hid_id(uevent: &str) -> Option<(u32, u32)> {
    let value = uevent
        .lines()
        .find_map(|line| line.trim().strip_prefix("HID_ID="))?;
    let mut fields = value.split(':');
    let _bus = fields.next()?;
    let vendor = u32::from_str_radix(fields.next()?, 16).ok()?;
    let product = u32::from_str_radix(fields.next()?, 16).ok()?;
    Some((vendor, product))
}

/// Returns `true` for the dial controller's vendor/product pair.
pub fn is_dial_controller(vendor: u32, product: u32) -> bool {
    product == DIAL_PRODUCT_ID && (vendor == DIAL_VENDOR_ID || vendor == DIAL_VENDOR_ID_ALT)
}

/// Finds the dial's `hidraw` node.
#[derive(Debug, Clone)]
pub struct HidrawLocator {
    sysfs_root: PathBuf,
    dev_root: PathBuf,
}

impl HidrawLocator {
    /// Creates a locator over explicit sysfs and `/dev` roots.
    pub fn new(sysfs_root: impl Into<PathBuf>, dev_root: impl Into<PathBuf>) -> Self {
        Self {
            sysfs_root: sysfs_root.into(),
            dev_root: dev_root.into(),
        }
    }

    /// Returns `/dev/hidrawN` for the first matching entry in sorted order.
    pub fn locate(&self) -> Option<PathBuf> {
        let mut entries: Vec<PathBuf> = fs::read_dir(&self.sysfs_root)
            .ok()?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .collect();
        entries.sort();

        entries.iter().find_map(|entry| {
            let name = entry.file_name()?;
            if self.matches(entry) {
                Some(self.dev_root.join(name))
            } else {
                None
            }
        })
    }

    fn matches(&self, entry: &Path) -> bool {
        let Ok(uevent) = fs::read_to_string(entry.join("device").join("uevent")) else {
            return false;
        };
        match parse_hid_id(&uevent) {
            Some((vendor, product)) => {
                trace!("{}: vendor {vendor:04X} product {product:04X}", entry.display());
                is_dial_controller(vendor, product)
            }
            None => false,
        }
    }
}

impl Default for HidrawLocator {
    fn default() -> Self {
        Self::new(DEFAULT_SYSFS_ROOT, DEFAULT_DEV_ROOT)
    }
}
