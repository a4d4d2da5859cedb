//! SiS761 + SiS966 chipset bring-up.
//!
//! Runs in two stages around RAM init. Both stages resolve the PCI functions they need once,
//! up front, then issue a fixed sequence of patch tables and direct register writes. The order
//! is part of the contract: several steps only work, or only avoid glitching the chip, because
//! an earlier one has already happened.

pub mod regs;
mod stage1;
mod stage2;

pub use stage2::{init_aperture_size, init_share_memory, shared_memory_units};

use bringup_bus::{IoWindow, Msr, PciBdf, PciConfig, PciFunction, PortIo, RegisterWindow};

use crate::config::{ChipsetConfig, MissingDevicePolicy};
use crate::error::{ChipsetError, Result};
use crate::ids::{DeviceHandle, KnownDevice, SIS966_LPC};
use crate::patch::{apply_patch_table, PatchTable};
use regs::*;

/// What a stage did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageReport {
    /// Patch tables applied, with the number of entries each.
    pub tables: Vec<(&'static str, usize)>,
    /// Steps skipped because their device was absent.
    pub skipped: Vec<&'static str>,
}

impl StageReport {
    pub fn applied(&self, table: &str) -> Option<usize> {
        self.tables
            .iter()
            .find(|(name, _)| *name == table)
            .map(|&(_, n)| n)
    }
}

/// The chipset, reached through PCI configuration space, legacy I/O and MSRs.
pub struct Sis966<C, P, R> {
    pci: C,
    io: P,
    msr: R,
    cfg: ChipsetConfig,
}

impl<C: PciConfig, P: PortIo, R: Msr> Sis966<C, P, R> {
    pub fn new(pci: C, io: P, msr: R, cfg: ChipsetConfig) -> Self {
        Self { pci, io, msr, cfg }
    }

    pub fn config(&self) -> &ChipsetConfig {
        &self.cfg
    }

    pub fn io_mut(&mut self) -> &mut P {
        &mut self.io
    }

    /// Points the LPC bridge's ACPI decode at `ACPI_IO_BASE` and turns on the SMBus
    /// controller behind it.
    pub fn enable_smbus(&mut self) -> Result<()> {
        tracing::debug!("enable_smbus -------->");
        let lpc = SIS966_LPC.locate(&mut self.pci);
        let mut report = StageReport::default();
        let Some(lpc) = self.require(lpc, SIS966_LPC, "smbus enable", &mut report)? else {
            return Ok(());
        };

        let mut f = PciFunction::new(&mut self.pci, lpc);
        f.write_u16(LPC_ACPI_BASE, ACPI_IO_BASE);
        set_bits(&mut f, LPC_ACPI_SPACE_CTRL, LPC_ACPI_SPACE_ENABLE);
        set_bits(&mut f, LPC_SMBUS_CTRL, LPC_SMBUS_ENABLE);

        tracing::debug!("enable_smbus <--------");
        Ok(())
    }

    /// Applies the missing-device policy to one step's device.
    ///
    /// `Ok(None)` means skip the step; it has already been logged and recorded.
    fn require(
        &self,
        found: Option<DeviceHandle>,
        device: KnownDevice,
        step: &'static str,
        report: &mut StageReport,
    ) -> Result<Option<PciBdf>> {
        if let Some(handle) = found {
            return Ok(Some(handle.bdf));
        }
        match self.cfg.missing_device {
            MissingDevicePolicy::Skip => {
                tracing::warn!(
                    device = device.name,
                    id = %device.id,
                    step,
                    "device not found, skipping"
                );
                report.skipped.push(step);
                Ok(None)
            }
            MissingDevicePolicy::Abort => Err(ChipsetError::DeviceNotFound {
                name: device.name,
                id: device.id,
            }),
        }
    }

    fn patch_pci(&mut self, bdf: PciBdf, table: &PatchTable<'static>, report: &mut StageReport) {
        let applied = apply_patch_table(&mut PciFunction::new(&mut self.pci, bdf), table);
        report.tables.push((table.name, applied));
    }

    fn patch_acpi(&mut self, table: &PatchTable<'static>, report: &mut StageReport) {
        let applied = apply_patch_table(&mut IoWindow::new(&mut self.io, ACPI_IO_BASE), table);
        report.tables.push((table.name, applied));
    }

    fn acpi_set_bits(&mut self, offset: u8, bits: u8) {
        set_bits(&mut IoWindow::new(&mut self.io, ACPI_IO_BASE), offset, bits);
    }
}

fn set_bits<W: RegisterWindow + ?Sized>(window: &mut W, offset: u8, bits: u8) {
    let value = window.read_u8(offset) | bits;
    window.write_u8(offset, value);
}
