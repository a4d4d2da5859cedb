//! Polled SMBus byte-protocol engine for the SiS966 south bridge.
//!
//! The controller is reachable through two register front-ends that encode the same byte
//! transactions differently: [`HostSmbus`] drives the host-controller protocol registers and
//! [`IsaSmbus`] drives the ISA-bridge-routed window. Both block on a bounded poll; neither
//! retries.

pub mod error;
mod host;
mod isa;
pub mod regs;

pub use error::{Result, SmbusError, TransactionStatus};
pub use host::{HostSmbus, HostSmbusConfig};
pub use isa::{IsaSmbus, IsaSmbusConfig};

use bringup_bus::{Delay, PortIo};

/// Where the most recent transaction stopped.
///
/// `Idle → Addressed → Pending → Completed → Done | Failed`, or `Pending → TimedOut`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// Slave address (and register, where the protocol has one) written.
    Addressed,
    /// Protocol started; polling for completion.
    Pending,
    /// Controller stopped reporting busy; status not yet checked.
    Completed,
    TimedOut,
    Failed,
    Done,
}

/// Byte-granular SMBus access.
pub trait SmbusController {
    /// Reads `register` of the 7-bit slave `device`.
    fn read_byte(&mut self, device: u8, register: u8) -> Result<u8>;

    /// Writes `value` to `register` of the 7-bit slave `device`.
    fn write_byte(&mut self, device: u8, register: u8, value: u8) -> Result<()>;

    /// Phase reached by the most recent transaction.
    fn last_phase(&self) -> Phase;
}

impl<T: SmbusController + ?Sized> SmbusController for &mut T {
    fn read_byte(&mut self, device: u8, register: u8) -> Result<u8> {
        (**self).read_byte(device, register)
    }

    fn write_byte(&mut self, device: u8, register: u8, value: u8) -> Result<()> {
        (**self).write_byte(device, register, value)
    }

    fn last_phase(&self) -> Phase {
        (**self).last_phase()
    }
}

/// The SMBus as wired on SiS966 boards: byte reads go through the ISA window, byte writes
/// through the host-controller protocol registers. Both front-ends share one port backend.
#[derive(Debug)]
pub struct BoardSmbus<P, D> {
    io: P,
    delay: D,
    host: HostSmbusConfig,
    isa: IsaSmbusConfig,
    phase: Phase,
}

impl<P: PortIo, D: Delay> BoardSmbus<P, D> {
    pub fn new(io: P, delay: D, host: HostSmbusConfig, isa: IsaSmbusConfig) -> Self {
        Self {
            io,
            delay,
            host,
            isa,
            phase: Phase::Idle,
        }
    }

    pub fn into_inner(self) -> (P, D) {
        (self.io, self.delay)
    }
}

impl<P: PortIo, D: Delay> SmbusController for BoardSmbus<P, D> {
    fn read_byte(&mut self, device: u8, register: u8) -> Result<u8> {
        let mut isa = IsaSmbus::new(&mut self.io, &mut self.delay, self.isa.clone());
        let result = isa.read_byte(device, register);
        self.phase = isa.last_phase();
        result
    }

    fn write_byte(&mut self, device: u8, register: u8, value: u8) -> Result<()> {
        let mut host = HostSmbus::new(&mut self.io, &mut self.delay, self.host.clone());
        let result = host.write_byte(device, register, value);
        self.phase = host.last_phase();
        result
    }

    fn last_phase(&self) -> Phase {
        self.phase
    }
}
