//! Bus transaction primitives used by early-boot chipset bring-up.
//!
//! Three address spaces are reachable from romstage code:
//! - PCI configuration space ([`PciConfig`], addressed by bus/device/function + offset),
//! - legacy I/O ports ([`PortIo`], 16-bit port numbers),
//! - memory-mapped registers ([`MemoryBus`], 64-bit physical addresses).
//!
//! None of the primitives return errors: the hardware is assumed present, and an absent device
//! is a configuration precondition checked by the caller through [`locate_device`].
//!
//! Every primitive has an in-memory test double ([`IoPortBus`], [`TestPciBus`], [`VecMemory`],
//! [`TestMsr`]) so the bring-up logic can run on a host without real hardware. The `x86`
//! module provides the real backends.

pub mod delay;
pub mod io;
pub mod memory;
pub mod msr;
pub mod pci;
pub mod window;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub mod x86;

pub use delay::{CountingDelay, Delay, NoDelay, PostPortDelay, POST_PORT};
pub use io::{IoPortBus, PortIo, PortIoDevice, PortRam};
pub use memory::{MemoryBus, SparseMemory, VecMemory};
pub use msr::{Msr, TestMsr};
pub use pci::{
    locate_device, PciBdf, PciConfig, PciConfigWrite, PciVendorDeviceId, TestPciBus,
    PCI_CONFIG_SPACE_SIZE,
};
pub use window::{BusAddressSpace, IoWindow, MmioWindow, PciFunction, RegisterWindow};
