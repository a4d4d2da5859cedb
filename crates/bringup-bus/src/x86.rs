//! Bare-metal backends for running on the target CPU at CPL0.
//!
//! Every constructor is `unsafe`: the caller asserts it owns the hardware the backend touches.

use crate::io::PortIo;
use crate::memory::MemoryBus;
use crate::msr::Msr;
use crate::pci::{PciBdf, PciConfig};

/// Port I/O through the `in`/`out` instructions.
#[derive(Debug)]
pub struct CpuPortIo {
    _private: (),
}

impl CpuPortIo {
    /// # Safety
    ///
    /// The caller must be running with I/O privilege and must not race other users of the
    /// ports it accesses.
    pub unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl PortIo for CpuPortIo {
    fn read(&mut self, port: u16, size: u8) -> u32 {
        // SAFETY: I/O privilege was asserted at construction.
        unsafe {
            match size {
                1 => u32::from(::x86::io::inb(port)),
                2 => u32::from(::x86::io::inw(port)),
                4 => ::x86::io::inl(port),
                _ => 0xFFFF_FFFF,
            }
        }
    }

    fn write(&mut self, port: u16, size: u8, value: u32) {
        // SAFETY: I/O privilege was asserted at construction.
        unsafe {
            match size {
                1 => ::x86::io::outb(port, value as u8),
                2 => ::x86::io::outw(port, value as u16),
                4 => ::x86::io::outl(port, value),
                _ => {}
            }
        }
    }
}

pub const PCI_CONFIG_ADDRESS: u16 = 0xCF8;
pub const PCI_CONFIG_DATA: u16 = 0xCFC;

/// Configuration mechanism #1 over an arbitrary port backend.
#[derive(Debug)]
pub struct PciConfigPorts<P: PortIo> {
    io: P,
}

impl<P: PortIo> PciConfigPorts<P> {
    pub fn new(io: P) -> Self {
        Self { io }
    }

    pub fn into_inner(self) -> P {
        self.io
    }

    fn select(&mut self, bdf: PciBdf, offset: u16) {
        let addr = 0x8000_0000
            | (u32::from(bdf.bus) << 16)
            | (u32::from(bdf.device & 0x1F) << 11)
            | (u32::from(bdf.function & 0x7) << 8)
            | u32::from(offset & 0xFC);
        self.io.write_u32(PCI_CONFIG_ADDRESS, addr);
    }
}

impl<P: PortIo> PciConfig for PciConfigPorts<P> {
    fn read(&mut self, bdf: PciBdf, offset: u16, size: u8) -> u32 {
        self.select(bdf, offset);
        let port = PCI_CONFIG_DATA + (offset & 0x3);
        self.io.read(port, size)
    }

    fn write(&mut self, bdf: PciBdf, offset: u16, size: u8, value: u32) {
        self.select(bdf, offset);
        let port = PCI_CONFIG_DATA + (offset & 0x3);
        self.io.write(port, size, value);
    }
}

/// Identity-mapped physical memory with volatile byte accesses.
#[derive(Debug)]
pub struct PhysMemory {
    _private: (),
}

impl PhysMemory {
    /// # Safety
    ///
    /// Physical addresses passed to this backend must be identity-mapped and safe to access
    /// with byte-wide volatile loads and stores.
    pub unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl MemoryBus for PhysMemory {
    fn read_u8(&mut self, addr: u64) -> u8 {
        // SAFETY: identity mapping was asserted at construction.
        unsafe { core::ptr::read_volatile(addr as usize as *const u8) }
    }

    fn write_u8(&mut self, addr: u64, value: u8) {
        // SAFETY: identity mapping was asserted at construction.
        unsafe { core::ptr::write_volatile(addr as usize as *mut u8, value) }
    }

    fn read_u16(&mut self, addr: u64) -> u16 {
        // SAFETY: identity mapping was asserted at construction.
        unsafe { core::ptr::read_volatile(addr as usize as *const u16) }
    }

    fn write_u16(&mut self, addr: u64, value: u16) {
        // SAFETY: identity mapping was asserted at construction.
        unsafe { core::ptr::write_volatile(addr as usize as *mut u16, value) }
    }
}

/// `rdmsr`.
#[derive(Debug)]
pub struct CpuMsr {
    _private: (),
}

impl CpuMsr {
    /// # Safety
    ///
    /// The caller must be running at CPL0, and every index read must exist on this CPU.
    pub unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl Msr for CpuMsr {
    fn read_msr(&mut self, index: u32) -> u64 {
        // SAFETY: CPL0 and valid indices were asserted at construction.
        unsafe { ::x86::msr::rdmsr(index) }
    }
}
