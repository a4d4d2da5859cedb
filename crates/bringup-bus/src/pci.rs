//! PCI configuration space access and fixed-ID device resolution.

use core::fmt;
use std::collections::BTreeMap;

/// Size of the conventional (non-extended) configuration space of one function.
pub const PCI_CONFIG_SPACE_SIZE: usize = 256;

/// PCI bus/device/function identifier.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct PciBdf {
    pub bus: u8,
    pub device: u8,
    pub function: u8,
}

impl PciBdf {
    /// Creates a new BDF.
    ///
    /// The caller is responsible for ensuring the values are within the PCI ranges:
    /// device < 32, function < 8.
    pub const fn new(bus: u8, device: u8, function: u8) -> Self {
        Self {
            bus,
            device,
            function,
        }
    }

    /// The `dev << 3 | fn` byte used by routing tables and config mechanism #1.
    pub const fn devfn(self) -> u8 {
        debug_assert!(self.device < 32);
        debug_assert!(self.function < 8);
        (self.device << 3) | self.function
    }
}

impl fmt::Display for PciBdf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}:{:02x}.{}", self.bus, self.device, self.function)
    }
}

/// Vendor/device ID pair as found at config offset 0.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct PciVendorDeviceId {
    pub vendor_id: u16,
    pub device_id: u16,
}

impl PciVendorDeviceId {
    pub const fn new(vendor_id: u16, device_id: u16) -> Self {
        Self {
            vendor_id,
            device_id,
        }
    }

    /// The dword read from config offset 0 of a function with this ID.
    pub const fn as_config_u32(self) -> u32 {
        (self.vendor_id as u32) | ((self.device_id as u32) << 16)
    }
}

impl fmt::Display for PciVendorDeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x}:{:04x}", self.vendor_id, self.device_id)
    }
}

/// PCI configuration space.
///
/// Functions that do not exist read as all-ones and ignore writes.
pub trait PciConfig {
    fn read(&mut self, bdf: PciBdf, offset: u16, size: u8) -> u32;
    fn write(&mut self, bdf: PciBdf, offset: u16, size: u8, value: u32);

    fn read_u8(&mut self, bdf: PciBdf, offset: u16) -> u8 {
        self.read(bdf, offset, 1) as u8
    }

    fn read_u16(&mut self, bdf: PciBdf, offset: u16) -> u16 {
        self.read(bdf, offset, 2) as u16
    }

    fn read_u32(&mut self, bdf: PciBdf, offset: u16) -> u32 {
        self.read(bdf, offset, 4)
    }

    fn write_u8(&mut self, bdf: PciBdf, offset: u16, value: u8) {
        self.write(bdf, offset, 1, u32::from(value));
    }

    fn write_u16(&mut self, bdf: PciBdf, offset: u16, value: u16) {
        self.write(bdf, offset, 2, u32::from(value));
    }

    fn write_u32(&mut self, bdf: PciBdf, offset: u16, value: u32) {
        self.write(bdf, offset, 4, value);
    }
}

impl<T: PciConfig + ?Sized> PciConfig for &mut T {
    fn read(&mut self, bdf: PciBdf, offset: u16, size: u8) -> u32 {
        (**self).read(bdf, offset, size)
    }

    fn write(&mut self, bdf: PciBdf, offset: u16, size: u8, value: u32) {
        (**self).write(bdf, offset, size, value)
    }
}

/// Finds the first function carrying `id`, scanning every bus/device/function in ascending
/// order.
///
/// There is no enumeration state in romstage, so this is a brute-force probe of config offset 0.
pub fn locate_device<C: PciConfig + ?Sized>(cfg: &mut C, id: PciVendorDeviceId) -> Option<PciBdf> {
    let want = id.as_config_u32();
    for bus in 0..=255u8 {
        for device in 0..32u8 {
            for function in 0..8u8 {
                let bdf = PciBdf::new(bus, device, function);
                if cfg.read_u32(bdf, 0x00) == want {
                    tracing::trace!(%id, %bdf, "located PCI function");
                    return Some(bdf);
                }
            }
        }
    }
    None
}

/// One config-space write observed by [`TestPciBus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PciConfigWrite {
    pub bdf: PciBdf,
    pub offset: u16,
    pub size: u8,
    pub value: u32,
}

/// In-memory configuration space for a fixed set of functions.
///
/// Every write is appended to a log so callers can check ordering across devices.
#[derive(Debug, Clone, Default)]
pub struct TestPciBus {
    functions: BTreeMap<PciBdf, [u8; PCI_CONFIG_SPACE_SIZE]>,
    writes: Vec<PciConfigWrite>,
}

impl TestPciBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a function whose config space is zero except for its vendor/device ID.
    ///
    /// # Panics
    ///
    /// Panics if `bdf` is already populated.
    pub fn add_function(&mut self, bdf: PciBdf, id: PciVendorDeviceId) {
        let mut space = [0u8; PCI_CONFIG_SPACE_SIZE];
        space[0..4].copy_from_slice(&id.as_config_u32().to_le_bytes());
        let prev = self.functions.insert(bdf, space);
        assert!(prev.is_none(), "duplicate PCI BDF {bdf}");
    }

    /// Reads a byte without logging or side effects. Absent functions read `0xFF`.
    pub fn peek_u8(&self, bdf: PciBdf, offset: u8) -> u8 {
        self.functions
            .get(&bdf)
            .map_or(0xFF, |space| space[usize::from(offset)])
    }

    pub fn peek_u16(&self, bdf: PciBdf, offset: u8) -> u16 {
        u16::from_le_bytes([self.peek_u8(bdf, offset), self.peek_u8(bdf, offset.wrapping_add(1))])
    }

    /// Sets a byte without logging it as a write.
    ///
    /// # Panics
    ///
    /// Panics if `bdf` is absent.
    pub fn poke_u8(&mut self, bdf: PciBdf, offset: u8, value: u8) {
        let space = self
            .functions
            .get_mut(&bdf)
            .unwrap_or_else(|| panic!("no PCI function at {bdf}"));
        space[usize::from(offset)] = value;
    }

    pub fn writes(&self) -> &[PciConfigWrite] {
        &self.writes
    }

    pub fn writes_to(&self, bdf: PciBdf) -> impl Iterator<Item = &PciConfigWrite> + '_ {
        self.writes.iter().filter(move |w| w.bdf == bdf)
    }
}

impl PciConfig for TestPciBus {
    fn read(&mut self, bdf: PciBdf, offset: u16, size: u8) -> u32 {
        let Some(space) = self.functions.get(&bdf) else {
            return 0xFFFF_FFFF;
        };
        let mut value = 0u32;
        for i in 0..usize::from(size) {
            let byte = space
                .get(usize::from(offset) + i)
                .copied()
                .unwrap_or(0xFF);
            value |= u32::from(byte) << (i * 8);
        }
        value
    }

    fn write(&mut self, bdf: PciBdf, offset: u16, size: u8, value: u32) {
        let Some(space) = self.functions.get_mut(&bdf) else {
            return;
        };
        for i in 0..usize::from(size) {
            if let Some(slot) = space.get_mut(usize::from(offset) + i) {
                *slot = (value >> (i * 8)) as u8;
            }
        }
        self.writes.push(PciConfigWrite {
            bdf,
            offset,
            size,
            value,
        });
    }
}
