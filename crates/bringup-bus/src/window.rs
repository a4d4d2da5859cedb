//! Byte-wide register windows over the three bus address spaces.
//!
//! Patch tables are written against a window, so the same table engine drives a PCI function's
//! configuration space and an I/O-decoded register block.

use crate::io::PortIo;
use crate::memory::MemoryBus;
use crate::pci::{PciBdf, PciConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusAddressSpace {
    PciConfig,
    Io,
    Mmio,
}

/// A block of byte registers addressed by an 8-bit offset.
pub trait RegisterWindow {
    fn space(&self) -> BusAddressSpace;
    fn read_u8(&mut self, offset: u8) -> u8;
    fn write_u8(&mut self, offset: u8, value: u8);
}

impl<W: RegisterWindow + ?Sized> RegisterWindow for &mut W {
    fn space(&self) -> BusAddressSpace {
        (**self).space()
    }

    fn read_u8(&mut self, offset: u8) -> u8 {
        (**self).read_u8(offset)
    }

    fn write_u8(&mut self, offset: u8, value: u8) {
        (**self).write_u8(offset, value)
    }
}

/// Configuration space of one PCI function.
pub struct PciFunction<'a, C: PciConfig + ?Sized> {
    cfg: &'a mut C,
    bdf: PciBdf,
}

impl<'a, C: PciConfig + ?Sized> PciFunction<'a, C> {
    pub fn new(cfg: &'a mut C, bdf: PciBdf) -> Self {
        Self { cfg, bdf }
    }

    pub fn bdf(&self) -> PciBdf {
        self.bdf
    }

    /// Single 16-bit config cycle.
    pub fn read_u16(&mut self, offset: u8) -> u16 {
        self.cfg.read_u16(self.bdf, u16::from(offset))
    }

    /// Single 16-bit config cycle.
    pub fn write_u16(&mut self, offset: u8, value: u16) {
        tracing::trace!(bdf = %self.bdf, offset, value, "pci write16");
        self.cfg.write_u16(self.bdf, u16::from(offset), value);
    }
}

impl<C: PciConfig + ?Sized> RegisterWindow for PciFunction<'_, C> {
    fn space(&self) -> BusAddressSpace {
        BusAddressSpace::PciConfig
    }

    fn read_u8(&mut self, offset: u8) -> u8 {
        self.cfg.read_u8(self.bdf, u16::from(offset))
    }

    fn write_u8(&mut self, offset: u8, value: u8) {
        tracing::trace!(bdf = %self.bdf, offset, value, "pci write8");
        self.cfg.write_u8(self.bdf, u16::from(offset), value);
    }
}

/// I/O-decoded register block at `base`.
pub struct IoWindow<'a, P: PortIo + ?Sized> {
    io: &'a mut P,
    base: u16,
}

impl<'a, P: PortIo + ?Sized> IoWindow<'a, P> {
    pub fn new(io: &'a mut P, base: u16) -> Self {
        Self { io, base }
    }

    pub fn base(&self) -> u16 {
        self.base
    }

    fn port(&self, offset: u8) -> u16 {
        self.base.wrapping_add(u16::from(offset))
    }
}

impl<P: PortIo + ?Sized> RegisterWindow for IoWindow<'_, P> {
    fn space(&self) -> BusAddressSpace {
        BusAddressSpace::Io
    }

    fn read_u8(&mut self, offset: u8) -> u8 {
        let port = self.port(offset);
        self.io.read_u8(port)
    }

    fn write_u8(&mut self, offset: u8, value: u8) {
        let port = self.port(offset);
        tracing::trace!(port, value, "io write8");
        self.io.write_u8(port, value);
    }
}

/// Memory-mapped register block at physical address `base`.
pub struct MmioWindow<'a, M: MemoryBus + ?Sized> {
    mem: &'a mut M,
    base: u64,
}

impl<'a, M: MemoryBus + ?Sized> MmioWindow<'a, M> {
    pub fn new(mem: &'a mut M, base: u64) -> Self {
        Self { mem, base }
    }

    pub fn base(&self) -> u64 {
        self.base
    }
}

impl<M: MemoryBus + ?Sized> RegisterWindow for MmioWindow<'_, M> {
    fn space(&self) -> BusAddressSpace {
        BusAddressSpace::Mmio
    }

    fn read_u8(&mut self, offset: u8) -> u8 {
        self.mem.read_u8(self.base + u64::from(offset))
    }

    fn write_u8(&mut self, offset: u8, value: u8) {
        tracing::trace!(addr = self.base + u64::from(offset), value, "mmio write8");
        self.mem.write_u8(self.base + u64::from(offset), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{IoPortBus, PortRam};
    use crate::memory::SparseMemory;
    use crate::pci::{PciVendorDeviceId, TestPciBus};

    #[test]
    fn io_window_offsets_from_base() {
        let ram = PortRam::new(0x800, 0x100);
        let mut bus = IoPortBus::new();
        ram.attach(&mut bus);

        let mut win = IoWindow::new(&mut bus, 0x800);
        assert_eq!(win.space(), BusAddressSpace::Io);
        win.write_u8(0x56, 0x40);
        assert_eq!(ram.peek(0x856), 0x40);
        assert_eq!(win.read_u8(0x56), 0x40);
    }

    #[test]
    fn pci_function_targets_its_bdf_only() {
        let mut pci = TestPciBus::new();
        let a = PciBdf::new(0, 0, 0);
        let b = PciBdf::new(0, 2, 0);
        pci.add_function(a, PciVendorDeviceId::new(0x1039, 0x0761));
        pci.add_function(b, PciVendorDeviceId::new(0x1039, 0x0966));

        let mut win = PciFunction::new(&mut pci, b);
        win.write_u8(0x40, 0x80);
        win.write_u16(0x74, 0x0800);
        assert_eq!(win.read_u16(0x74), 0x0800);

        assert_eq!(pci.peek_u8(b, 0x40), 0x80);
        assert_eq!(pci.peek_u8(a, 0x40), 0x00);
        assert_eq!(pci.writes_to(a).count(), 0);
    }

    #[test]
    fn mmio_window_reads_through_to_memory() {
        let mut mem = SparseMemory::new();
        mem.write_u8(0xFED1_0010, 0x5A);
        let mut win = MmioWindow::new(&mut mem, 0xFED1_0000);
        assert_eq!(win.space(), BusAddressSpace::Mmio);
        assert_eq!(win.read_u8(0x10), 0x5A);
        assert_eq!(win.read_u8(0x11), 0xFF);
    }
}
