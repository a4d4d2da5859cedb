//! Romstage sequencing around the chipset stages.
//!
//! Console, timestamps, S3 detection, RAM training and finalization belong to other parts of
//! the firmware; they are reached through [`RomstageHooks`], whose defaults do nothing.

use bringup_bus::{Delay, MemoryBus, Msr, PciConfig, PortIo};
use bringup_smbus::{BoardSmbus, HostSmbusConfig, IsaSmbusConfig, SmbusController};

use crate::config::ChipsetConfig;
use crate::error::Result;
use crate::sis966::Sis966;

/// Default MCHBAR base.
pub const MCHBAR_BASE: u64 = 0xFED1_0000;
/// Scratchpad register a previous boot leaves the reboot signature in.
pub const SSKPD: u64 = 0x5D14;
pub const REBOOT_SIGNATURE: u16 = 0xCAFE;
pub const RESET_CONTROL_PORT: u16 = 0xCF9;
/// Full reset through the reset control register.
pub const RESET_CONTROL_HARD_RESET: u8 = 0x06;

pub const POST_CODE_AFTER_S3_DETECT: u8 = 0x38;
pub const POST_CODE_BEFORE_RAMINIT: u8 = 0x39;
pub const POST_CODE_AFTER_RAMINIT: u8 = 0x3B;
pub const POST_CODE_AFTER_STAGE2: u8 = 0x3C;
pub const POST_CODE_BEFORE_FINALIZE: u8 = 0x3D;
pub const POST_CODE_ROMSTAGE_DONE: u8 = 0x3F;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    RomstageStart,
    AfterRaminit,
}

/// Collaborators the romstage calls out to.
pub trait RomstageHooks {
    fn console_init(&mut self) {}

    fn timestamp(&mut self, _stamp: Timestamp) {}

    fn post_code(&mut self, _code: u8) {}

    fn detect_s3_resume(&mut self) -> bool {
        false
    }

    /// Runs after stage 1 and S3 detection, before the SMBus is enabled.
    fn early_init(&mut self, _s3_resume: bool) {}

    /// Trains memory. The SMBus is enabled and can reach the DIMM SPD EEPROMs.
    fn raminit(&mut self, _smbus: &mut dyn SmbusController, _s3_resume: bool) -> Result<()> {
        Ok(())
    }

    fn finalize(&mut self, _s3_resume: bool) {}
}

/// Hooks that do nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHooks;

impl RomstageHooks for NoHooks {}

#[derive(Debug, Clone)]
pub struct RomstageConfig {
    pub mchbar: u64,
    pub chipset: ChipsetConfig,
    pub smbus_host: HostSmbusConfig,
    pub smbus_isa: IsaSmbusConfig,
}

impl Default for RomstageConfig {
    fn default() -> Self {
        Self {
            mchbar: MCHBAR_BASE,
            chipset: ChipsetConfig::default(),
            smbus_host: HostSmbusConfig::default(),
            smbus_isa: IsaSmbusConfig::default(),
        }
    }
}

/// How the romstage ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RomstageExit {
    Completed { s3_resume: bool },
    /// A hard reset was written to the reset control port. Real hardware never gets here; the
    /// caller should halt.
    ResetRequested,
}

/// Every bus the romstage drives.
pub struct Platform<C, P, M, R, D> {
    pub pci: C,
    pub io: P,
    pub mem: M,
    pub msr: R,
    pub delay: D,
}

/// Whether a previous boot asked for a hard reset on the next one.
pub fn reboot_requested<M: MemoryBus + ?Sized>(mem: &mut M, mchbar: u64) -> bool {
    mem.read_u16(mchbar + SSKPD) == REBOOT_SIGNATURE
}

/// Runs the romstage chipset sequence.
pub fn run<C, P, M, R, D, H>(
    platform: &mut Platform<C, P, M, R, D>,
    hooks: &mut H,
    cfg: &RomstageConfig,
) -> Result<RomstageExit>
where
    C: PciConfig,
    P: PortIo,
    M: MemoryBus,
    R: Msr,
    D: Delay,
    H: RomstageHooks + ?Sized,
{
    if reboot_requested(&mut platform.mem, cfg.mchbar) {
        tracing::info!("reboot signature found, resetting");
        platform
            .io
            .write_u8(RESET_CONTROL_PORT, RESET_CONTROL_HARD_RESET);
        return Ok(RomstageExit::ResetRequested);
    }

    hooks.timestamp(Timestamp::RomstageStart);
    hooks.console_init();

    let mut chipset = Sis966::new(
        &mut platform.pci,
        &mut platform.io,
        &mut platform.msr,
        cfg.chipset.clone(),
    );
    chipset.stage1()?;

    let s3_resume = hooks.detect_s3_resume();
    hooks.post_code(POST_CODE_AFTER_S3_DETECT);
    hooks.early_init(s3_resume);

    chipset.enable_smbus()?;
    hooks.post_code(POST_CODE_BEFORE_RAMINIT);
    {
        let mut smbus = BoardSmbus::new(
            chipset.io_mut(),
            &mut platform.delay,
            cfg.smbus_host.clone(),
            cfg.smbus_isa.clone(),
        );
        hooks.raminit(&mut smbus, s3_resume)?;
    }
    hooks.timestamp(Timestamp::AfterRaminit);
    hooks.post_code(POST_CODE_AFTER_RAMINIT);

    chipset.stage2()?;
    hooks.post_code(POST_CODE_AFTER_STAGE2);
    hooks.post_code(POST_CODE_BEFORE_FINALIZE);

    hooks.finalize(s3_resume);
    tracing::debug!("romstage complete");
    hooks.post_code(POST_CODE_ROMSTAGE_DONE);

    Ok(RomstageExit::Completed { s3_resume })
}
