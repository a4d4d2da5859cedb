#![allow(dead_code)]

use bringup_bus::{IoPortBus, PciBdf, PortRam, TestMsr, TestPciBus};
use bringup_chipset::ids::{
    KnownDevice, K8_MISC, SIS761_NB, SIS761_PCIE, SIS966_LPC, SIS966_SATA, SIS_AGP,
};
use bringup_chipset::sis966::regs::{ACPI_IO_BASE, MSR_TOP_MEM};

pub const NB: PciBdf = PciBdf::new(0, 0x00, 0);
pub const AGP: PciBdf = PciBdf::new(0, 0x01, 0);
pub const LPC: PciBdf = PciBdf::new(0, 0x02, 0);
pub const PCIE: PciBdf = PciBdf::new(0, 0x04, 0);
pub const SATA: PciBdf = PciBdf::new(0, 0x05, 0);
pub const K8: PciBdf = PciBdf::new(0, 0x18, 3);

/// 256 MiB of RAM below 4 GiB.
pub const TOP_MEM: u64 = 0x1000_0000;

pub const ALL: [(PciBdf, KnownDevice); 6] = [
    (NB, SIS761_NB),
    (AGP, SIS_AGP),
    (LPC, SIS966_LPC),
    (PCIE, SIS761_PCIE),
    (SATA, SIS966_SATA),
    (K8, K8_MISC),
];

pub struct Board {
    pub pci: TestPciBus,
    pub io: IoPortBus,
    pub acpi: PortRam,
    pub msr: TestMsr,
}

impl Board {
    pub fn new() -> Self {
        Self::without(&[])
    }

    /// A board with every known function populated except those in `absent`.
    pub fn without(absent: &[KnownDevice]) -> Self {
        let mut pci = TestPciBus::new();
        for (bdf, dev) in ALL {
            if !absent.contains(&dev) {
                pci.add_function(bdf, dev.id);
            }
        }
        let mut io = IoPortBus::new();
        let acpi = PortRam::new(ACPI_IO_BASE, 0x100);
        acpi.attach(&mut io);
        Self {
            pci,
            io,
            acpi,
            msr: TestMsr::new().with(MSR_TOP_MEM, TOP_MEM),
        }
    }
}
