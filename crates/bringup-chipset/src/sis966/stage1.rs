use bringup_bus::{Msr, PciConfig, PciFunction, PortIo, RegisterWindow};

use super::regs::*;
use super::{Sis966, StageReport};
use crate::error::Result;
use crate::ids::{SIS761_NB, SIS761_PCIE, SIS966_LPC};
use crate::tables;

impl<C: PciConfig, P: PortIo, R: Msr> Sis966<C, P, R> {
    /// Early chipset init, before RAM is up.
    ///
    /// North bridge table, LPC table, first ACPI table, then the PCIe bridge table with the
    /// internal GUI temporarily disabled. The GUI enable bit is restored to whatever it was on
    /// entry.
    pub fn stage1(&mut self) -> Result<StageReport> {
        let mut report = StageReport::default();
        let nb = SIS761_NB.locate(&mut self.pci);
        let lpc = SIS966_LPC.locate(&mut self.pci);
        let pcie = SIS761_PCIE.locate(&mut self.pci);

        tracing::debug!("Init NB -------->");
        if let Some(nb) = self.require(nb, SIS761_NB, "nb table", &mut report)? {
            self.patch_pci(nb, &tables::NB, &mut report);
        }

        tracing::debug!("Init LPC -------->");
        if let Some(lpc) = self.require(lpc, SIS966_LPC, "lpc table", &mut report)? {
            self.patch_pci(lpc, &tables::LPC, &mut report);
        }

        tracing::debug!("Init ACPI -------->");
        self.patch_acpi(&tables::ACPI, &mut report);

        tracing::debug!("Init NB PCIe -------->");
        let nb = self.require(nb, SIS761_NB, "nb pcie table", &mut report)?;
        let pcie = match nb {
            Some(_) => self.require(pcie, SIS761_PCIE, "nb pcie table", &mut report)?,
            None => None,
        };
        if let (Some(nb), Some(pcie)) = (nb, pcie) {
            let gui = {
                let mut f = PciFunction::new(&mut self.pci, nb);
                let ctrl = f.read_u8(NB_GUI_CTRL);
                f.write_u8(NB_GUI_CTRL, ctrl & !NB_GUI_ENABLE);
                ctrl & NB_GUI_ENABLE
            };

            self.patch_pci(pcie, &tables::NB_PCIE, &mut report);

            let mut f = PciFunction::new(&mut self.pci, nb);
            let ctrl = f.read_u8(NB_GUI_CTRL);
            f.write_u8(NB_GUI_CTRL, ctrl | gui);
        }

        Ok(report)
    }
}
