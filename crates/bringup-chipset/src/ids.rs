//! The fixed set of PCI functions this platform touches.

use core::fmt;

use bringup_bus::{locate_device, PciBdf, PciConfig, PciVendorDeviceId};

pub const PCI_VENDOR_ID_SIS: u16 = 0x1039;
pub const PCI_VENDOR_ID_AMD: u16 = 0x1022;

/// A device the bring-up sequence knows by ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownDevice {
    pub name: &'static str,
    pub id: PciVendorDeviceId,
}

impl KnownDevice {
    pub const fn new(name: &'static str, vendor_id: u16, device_id: u16) -> Self {
        Self {
            name,
            id: PciVendorDeviceId::new(vendor_id, device_id),
        }
    }

    /// Scans the bus for the first function carrying this ID.
    pub fn locate<C: PciConfig + ?Sized>(&self, cfg: &mut C) -> Option<DeviceHandle> {
        let bdf = locate_device(cfg, self.id)?;
        tracing::trace!(device = self.name, %bdf, "resolved");
        Some(DeviceHandle { device: *self, bdf })
    }
}

pub const SIS761_NB: KnownDevice = KnownDevice::new("SiS761", PCI_VENDOR_ID_SIS, 0x0761);
pub const SIS761_PCIE: KnownDevice = KnownDevice::new("SiS761 PCIe", PCI_VENDOR_ID_SIS, 0x0004);
pub const SIS_AGP: KnownDevice = KnownDevice::new("SiS AGP", PCI_VENDOR_ID_SIS, 0x0002);
pub const SIS966_LPC: KnownDevice = KnownDevice::new("SiS966 LPC", PCI_VENDOR_ID_SIS, 0x0966);
pub const SIS966_SATA: KnownDevice = KnownDevice::new("SiS1183 SATA", PCI_VENDOR_ID_SIS, 0x1183);
pub const K8_MISC: KnownDevice = KnownDevice::new("K8 misc control", PCI_VENDOR_ID_AMD, 0x1103);

/// A known device resolved to a concrete function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceHandle {
    pub device: KnownDevice,
    pub bdf: PciBdf,
}

impl DeviceHandle {
    pub fn name(&self) -> &'static str {
        self.device.name
    }

    pub fn id(&self) -> PciVendorDeviceId {
        self.device.id
    }
}

impl fmt::Display for DeviceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] at {}", self.device.name, self.device.id, self.bdf)
    }
}
