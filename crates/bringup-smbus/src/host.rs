use bringup_bus::{Delay, PortIo};

use crate::regs::host::*;
use crate::regs::{address_byte, HostStatus, SMBUS_IO_BASE};
use crate::{Phase, Result, SmbusController, SmbusError};

#[derive(Debug, Clone)]
pub struct HostSmbusConfig {
    pub io_base: u16,
    /// Iterations of the completion poll, each one settle delay plus one `PRTCL` read.
    pub timeout_polls: u32,
}

impl Default for HostSmbusConfig {
    fn default() -> Self {
        Self {
            io_base: SMBUS_IO_BASE,
            timeout_polls: DEFAULT_TIMEOUT_POLLS,
        }
    }
}

/// Host-controller front-end: protocol number in `PRTCL`, completion signalled by `PRTCL`
/// leaving the busy value and `STAT` bit 7.
#[derive(Debug)]
pub struct HostSmbus<P, D> {
    io: P,
    delay: D,
    cfg: HostSmbusConfig,
    phase: Phase,
}

impl<P: PortIo, D: Delay> HostSmbus<P, D> {
    pub fn new(io: P, delay: D, cfg: HostSmbusConfig) -> Self {
        Self {
            io,
            delay,
            cfg,
            phase: Phase::Idle,
        }
    }

    pub fn config(&self) -> &HostSmbusConfig {
        &self.cfg
    }

    pub fn into_inner(self) -> (P, D) {
        (self.io, self.delay)
    }

    /// Clears latched `STAT` bits, writing each set bit back, until they read zero.
    pub fn wait_until_ready(&mut self) -> Result<()> {
        for _ in 0..self.cfg.timeout_polls {
            self.delay.settle(&mut self.io);
            let sticky = self.read_reg(STAT) & HostStatus::STICKY.bits();
            if sticky == 0 {
                return Ok(());
            }
            self.io.write_u8(self.cfg.io_base.wrapping_add(u16::from(STAT)), sticky);
        }
        tracing::trace!(io_base = self.cfg.io_base, "smbus status never cleared");
        Err(SmbusError::NotReady)
    }

    /// Receive byte: no register phase, the result lands in `CMD`.
    pub fn recv_byte(&mut self, device: u8) -> Result<u8> {
        self.phase = Phase::Idle;
        self.write_reg(XMITADD, address_byte(device, true));
        self.enter(Phase::Addressed);
        self.write_reg(PRTCL, PROTOCOL_RECV_BYTE);
        self.enter(Phase::Pending);

        self.wait_until_done()?;
        let status = self.read_reg(STAT);
        let byte = self.read_reg(CMD);
        self.finish(status)?;
        Ok(byte)
    }

    /// Send byte: `value` goes out as the command byte, without a data phase.
    pub fn send_byte(&mut self, device: u8, value: u8) -> Result<()> {
        self.phase = Phase::Idle;
        self.write_reg(DAT0, value);
        self.write_reg(CMD, value);
        self.write_reg(XMITADD, address_byte(device, false));
        self.enter(Phase::Addressed);
        self.write_reg(PRTCL, PROTOCOL_SEND_BYTE);
        self.enter(Phase::Pending);

        self.wait_until_done()?;
        let status = self.read_reg(STAT);
        self.finish(status)
    }

    fn wait_until_done(&mut self) -> Result<()> {
        for _ in 0..self.cfg.timeout_polls {
            self.delay.settle(&mut self.io);
            if self.read_reg(PRTCL) != PRTCL_BUSY {
                self.enter(Phase::Completed);
                return Ok(());
            }
        }
        self.enter(Phase::TimedOut);
        Err(SmbusError::Timeout)
    }

    fn finish(&mut self, status: u8) -> Result<()> {
        if HostStatus::from_bits_retain(status).contains(HostStatus::VALID) {
            self.enter(Phase::Done);
            Ok(())
        } else {
            self.enter(Phase::Failed);
            Err(SmbusError::Protocol { status })
        }
    }

    fn enter(&mut self, phase: Phase) {
        tracing::trace!(from = ?self.phase, to = ?phase, "smbus host");
        self.phase = phase;
    }

    fn read_reg(&mut self, offset: u8) -> u8 {
        self.io.read_u8(self.cfg.io_base.wrapping_add(u16::from(offset)))
    }

    fn write_reg(&mut self, offset: u8, value: u8) {
        self.io.write_u8(self.cfg.io_base.wrapping_add(u16::from(offset)), value);
        self.delay.settle(&mut self.io);
    }
}

impl<P: PortIo, D: Delay> SmbusController for HostSmbus<P, D> {
    fn read_byte(&mut self, device: u8, register: u8) -> Result<u8> {
        self.phase = Phase::Idle;
        self.write_reg(XMITADD, address_byte(device, true));
        self.write_reg(CMD, register);
        self.enter(Phase::Addressed);
        self.write_reg(PRTCL, PROTOCOL_READ_BYTE_DATA);
        self.enter(Phase::Pending);

        self.wait_until_done()?;
        let status = self.read_reg(STAT);
        self.finish(status)?;
        Ok(self.read_reg(DAT0))
    }

    fn write_byte(&mut self, device: u8, register: u8, value: u8) -> Result<()> {
        self.phase = Phase::Idle;
        self.write_reg(DAT0, value);
        self.write_reg(XMITADD, address_byte(device, false));
        self.write_reg(CMD, register);
        self.enter(Phase::Addressed);
        self.write_reg(PRTCL, PROTOCOL_WRITE_BYTE_DATA);
        self.enter(Phase::Pending);

        self.wait_until_done()?;
        let status = self.read_reg(STAT);
        self.finish(status)
    }

    fn last_phase(&self) -> Phase {
        self.phase
    }
}
