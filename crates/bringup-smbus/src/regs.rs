//! Register offsets and bit definitions for the two controller front-ends.

use bitflags::bitflags;

/// Default I/O base of the SiS966 SMBus controller, programmed by the LPC bridge.
pub const SMBUS_IO_BASE: u16 = 0x8D0;

/// Host-controller register window.
pub mod host {
    pub const PRTCL: u8 = 0x00;
    pub const STAT: u8 = 0x01;
    pub const XMITADD: u8 = 0x02;
    pub const CMD: u8 = 0x03;
    pub const DAT0: u8 = 0x04;

    /// `PRTCL` reads back this value while a transaction is in flight.
    pub const PRTCL_BUSY: u8 = 0x02;

    pub const PROTOCOL_SEND_BYTE: u8 = 0x04;
    pub const PROTOCOL_RECV_BYTE: u8 = 0x05;
    pub const PROTOCOL_WRITE_BYTE_DATA: u8 = 0x06;
    pub const PROTOCOL_READ_BYTE_DATA: u8 = 0x07;

    /// Iterations of the completion and ready polls.
    pub const DEFAULT_TIMEOUT_POLLS: u32 = 100 * 1000 * 10;
}

/// ISA-bridge-routed register window.
pub mod isa {
    pub const STS: u8 = 0x00;
    pub const HOST_CNT: u8 = 0x03;
    pub const ADDR: u8 = 0x04;
    pub const CMD: u8 = 0x05;
    pub const BYTE: u8 = 0x08;

    /// Written to `STS` to clear every latched bit.
    pub const STS_CLEAR_ALL: u8 = 0xFF;
    /// `STS` value of a cleanly completed transaction.
    pub const STS_DONE: u8 = 0x08;
    /// Set while the controller is still working on a transaction. A floating bus reads it set.
    pub const STS_BUSY: u8 = 0x01;

    /// Aborts whatever the controller was doing.
    pub const HOST_CNT_KILL: u8 = 0x20;
    /// Start a byte-data transaction.
    pub const HOST_CNT_START_BYTE_DATA: u8 = 0x12;

    pub const DEFAULT_POLL_BUDGET: u32 = 0x1000;
    pub const DEFAULT_SPIN_PER_POLL: u32 = 0xFFFF;
}

bitflags! {
    /// Host-controller `STAT` register.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct HostStatus: u8 {
        const DONE = 1 << 0;
        const DEVICE_ERROR = 1 << 1;
        const COLLISION = 1 << 2;
        const ALARM = 1 << 3;
        const TIMEOUT = 1 << 4;
        /// Set by the controller when the last transaction was acknowledged.
        const VALID = 1 << 7;

        /// Latched bits that must read zero before a new transaction.
        const STICKY = Self::DONE.bits()
            | Self::DEVICE_ERROR.bits()
            | Self::COLLISION.bits()
            | Self::ALARM.bits()
            | Self::TIMEOUT.bits();
    }
}

/// Slave address byte: 7-bit device address shifted up, direction in bit 0 (1 = read).
pub const fn address_byte(device: u8, read: bool) -> u8 {
    ((device & 0x7F) << 1) | (read as u8)
}
