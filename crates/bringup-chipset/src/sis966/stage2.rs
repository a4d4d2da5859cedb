use bringup_bus::{Msr, PciBdf, PciConfig, PciFunction, PortIo, RegisterWindow};

use super::regs::*;
use super::{Sis966, StageReport};
use crate::config::{ApertureSize, ShareMemorySize};
use crate::error::Result;
use crate::ids::{K8_MISC, SIS761_NB, SIS966_LPC, SIS966_SATA, SIS_AGP};
use crate::tables;

/// Programs the shared frame buffer size into bits 7:5 of the north bridge GUI control
/// register, keeping the low bits (including the GUI enable).
pub fn init_share_memory<C: PciConfig + ?Sized>(pci: &mut C, nb: PciBdf, size: ShareMemorySize) {
    let mut f = PciFunction::new(pci, nb);
    let ctrl = f.read_u8(NB_GUI_CTRL);
    f.write_u8(
        NB_GUI_CTRL,
        (ctrl & NB_SHARE_SIZE_KEEP_MASK) | (size.code() << NB_SHARE_SIZE_SHIFT),
    );
}

/// Programs the aperture size into the K8 GART control and the north bridge aperture register.
pub fn init_aperture_size<C: PciConfig + ?Sized>(
    pci: &mut C,
    k8: PciBdf,
    nb: PciBdf,
    size: ApertureSize,
) {
    PciFunction::new(&mut *pci, k8).write_u8(K8_APERTURE_CTRL, size.code() << 1);
    PciFunction::new(pci, nb).write_u16(NB_APERTURE, APERTURE_TABLE[usize::from(size.code())]);
}

/// Shared memory size, in 64 KiB units, encoded in a GUI control register value.
///
/// Code 0 means no shared memory.
pub const fn shared_memory_units(gui_ctrl: u8) -> u16 {
    let code = gui_ctrl >> NB_SHARE_SIZE_SHIFT;
    if code == 0 {
        0
    } else {
        (1u16 << (code - 1)) << 8
    }
}

impl<C: PciConfig, P: PortIo, R: Msr> Sis966<C, P, R> {
    /// Late chipset init, after RAM init.
    ///
    /// Re-enables the internal GUI, sets up the AGP bridge, shared memory and aperture, carves
    /// the frame buffer off the top of memory, runs the second ACPI table, then fixes the
    /// integrated peripheral enables and the SATA mode.
    pub fn stage2(&mut self) -> Result<StageReport> {
        let mut report = StageReport::default();
        let nb = SIS761_NB.locate(&mut self.pci);
        let agp = SIS_AGP.locate(&mut self.pci);
        let lpc = SIS966_LPC.locate(&mut self.pci);
        let k8 = K8_MISC.locate(&mut self.pci);
        let sata = SIS966_SATA.locate(&mut self.pci);

        tracing::debug!("Init NB AGP -------->");
        if let Some(nb) = self.require(nb, SIS761_NB, "gui enable", &mut report)? {
            let mut f = PciFunction::new(&mut self.pci, nb);
            let ctrl = f.read_u8(NB_GUI_CTRL);
            f.write_u8(NB_GUI_CTRL, ctrl | NB_GUI_ENABLE);
        }
        if let Some(agp) = self.require(agp, SIS_AGP, "agp table", &mut report)? {
            self.patch_pci(agp, &tables::AGP, &mut report);
        }

        let share = self.cfg.share_memory;
        let aperture = self.cfg.aperture;
        if let Some(nb) = self.require(nb, SIS761_NB, "share memory", &mut report)? {
            init_share_memory(&mut self.pci, nb, share);
        }
        if let Some(nb) = self.require(nb, SIS761_NB, "aperture size", &mut report)? {
            if let Some(k8) = self.require(k8, K8_MISC, "aperture size", &mut report)? {
                init_aperture_size(&mut self.pci, k8, nb, aperture);
            }
        }

        tracing::debug!("Init NorthBridge sis761 -------->");
        if let Some(nb) = self.require(nb, SIS761_NB, "top of memory", &mut report)? {
            let top_mem = self.msr.read_msr(MSR_TOP_MEM) as u32;
            tracing::debug!("Memory Top Bound {top_mem:#x}");

            let mut f = PciFunction::new(&mut self.pci, nb);
            let shared = shared_memory_units(f.read_u8(NB_GUI_CTRL));
            tracing::debug!("Integrated VGA Shared memory size={}M bytes", shared >> 4);
            f.write_u16(NB_TOP_MEM, ((top_mem >> 16) as u16).wrapping_sub(shared));
            f.write_u8(NB_ACPI_CTRL, NB_ACPI_CTRL_VALUE);
        }
        self.acpi_set_bits(ACPI_AUTO_RESET, ACPI_AUTO_RESET_ENABLE);

        tracing::debug!("Init ACPI -------->");
        self.patch_acpi(&tables::ACPI_2, &mut report);

        tracing::debug!("Init Misc -------->");
        if let Some(lpc) = self.require(lpc, SIS966_LPC, "peripheral enables", &mut report)? {
            let mut f = PciFunction::new(&mut self.pci, lpc);
            f.write_u8(LPC_DEVICE_ENABLE_1, LPC_DEVICE_ENABLE_1_VALUE.bits());
            f.write_u8(LPC_DEVICE_ENABLE_2, LPC_DEVICE_DISABLE_2_VALUE.bits());
            f.write_u8(LPC_AZALIA_CTRL, LpcAzaliaCtrl::empty().bits());
        }
        self.acpi_set_bits(ACPI_AUDIO_SELECT, ACPI_AUDIO_SELECT_HDA);
        let audio = self.io.read_u8(ACPI_IO_BASE + u16::from(ACPI_AUDIO_SELECT));
        tracing::debug!("Audio select {audio:#x}");

        if let Some(sata) = self.require(sata, SIS966_SATA, "sata mode", &mut report)? {
            if self.cfg.program_sata_defaults {
                self.patch_pci(sata, &tables::SATA, &mut report);
            }
            let mut f = PciFunction::new(&mut self.pci, sata);
            let mode = f.read_u8(SATA_MODE);
            f.write_u8(SATA_MODE, (mode & SATA_MODE_KEEP_MASK) | SATA_MODE_VALUE);
        }

        Ok(report)
    }
}
