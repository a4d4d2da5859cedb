use bringup_bus::{Delay, PortIo};

use crate::regs::isa::*;
use crate::regs::{address_byte, SMBUS_IO_BASE};
use crate::{Phase, Result, SmbusController, SmbusError};

#[derive(Debug, Clone)]
pub struct IsaSmbusConfig {
    pub io_base: u16,
    /// Maximum number of `STS` reads while waiting for completion.
    pub poll_budget: u32,
    /// Empty loop turns after each busy read, on top of the settle delay.
    pub spin_per_poll: u32,
}

impl Default for IsaSmbusConfig {
    fn default() -> Self {
        Self {
            io_base: SMBUS_IO_BASE,
            poll_budget: DEFAULT_POLL_BUDGET,
            spin_per_poll: DEFAULT_SPIN_PER_POLL,
        }
    }
}

/// ISA-bridge-routed front-end: transactions are kicked through `HOST_CNT` and complete when
/// `STS` reads exactly the done value.
#[derive(Debug)]
pub struct IsaSmbus<P, D> {
    io: P,
    delay: D,
    cfg: IsaSmbusConfig,
    phase: Phase,
}

impl<P: PortIo, D: Delay> IsaSmbus<P, D> {
    pub fn new(io: P, delay: D, cfg: IsaSmbusConfig) -> Self {
        Self {
            io,
            delay,
            cfg,
            phase: Phase::Idle,
        }
    }

    pub fn config(&self) -> &IsaSmbusConfig {
        &self.cfg
    }

    pub fn into_inner(self) -> (P, D) {
        (self.io, self.delay)
    }

    fn start(&mut self, address: u8, register: u8, data: Option<u8>) -> Result<u8> {
        self.phase = Phase::Idle;
        self.write_reg(STS, STS_CLEAR_ALL);
        self.write_reg(HOST_CNT, HOST_CNT_KILL);
        self.write_reg(ADDR, address);
        self.write_reg(CMD, register);
        if let Some(value) = data {
            self.write_reg(BYTE, value);
        }
        self.enter(Phase::Addressed);
        self.write_reg(HOST_CNT, HOST_CNT_START_BYTE_DATA);
        self.enter(Phase::Pending);

        self.wait_until_done()?;

        let status = self.read_reg(STS);
        let byte = self.read_reg(BYTE);
        if status != STS_DONE {
            self.enter(Phase::Failed);
            return Err(SmbusError::Protocol { status });
        }
        self.enter(Phase::Done);
        Ok(byte)
    }

    /// Polls `STS` until it reads done. Once the budget is spent, a status that still has the
    /// busy bit set is a timeout and anything else is the error the controller ended with.
    fn wait_until_done(&mut self) -> Result<()> {
        let mut status = STS_BUSY;
        for _ in 0..self.cfg.poll_budget {
            status = self.read_reg(STS);
            if status == STS_DONE {
                self.enter(Phase::Completed);
                return Ok(());
            }
            self.delay.settle(&mut self.io);
            self.delay.spin(self.cfg.spin_per_poll);
        }
        if status & STS_BUSY != 0 {
            self.enter(Phase::TimedOut);
            return Err(SmbusError::Timeout);
        }
        self.enter(Phase::Failed);
        Err(SmbusError::Protocol { status })
    }

    fn enter(&mut self, phase: Phase) {
        tracing::trace!(from = ?self.phase, to = ?phase, "smbus isa");
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

impl<P: PortIo, D: Delay> SmbusController for IsaSmbus<P, D> {
    fn read_byte(&mut self, device: u8, register: u8) -> Result<u8> {
        let result = self.start(address_byte(device, true), register, None);
        match result {
            Ok(byte) => tracing::debug!(device, register, byte, "smbus read"),
            Err(err) => tracing::debug!(device, register, %err, "smbus read"),
        }
        result
    }

    fn write_byte(&mut self, device: u8, register: u8, value: u8) -> Result<()> {
        self.start(address_byte(device, false), register, Some(value))
            .map(|_| ())
    }

    fn last_phase(&self) -> Phase {
        self.phase
    }
}
