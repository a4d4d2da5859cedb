//! Settle delays between bus transactions.
//!
//! Romstage has no timer source it can trust, so the delay after a protocol-engine write is a
//! dummy write to the POST code port: the ISA bus cycle takes roughly a microsecond regardless
//! of CPU speed.

use crate::io::PortIo;

/// I/O port used for the dummy settle cycle.
pub const POST_PORT: u16 = 0x80;

/// Source of the fixed pauses the protocol engine needs between transactions.
pub trait Delay {
    /// One settle period. Issued after every register write and once per poll iteration.
    fn settle(&mut self, io: &mut dyn PortIo);

    /// Busy-spin for `iterations` empty loop turns.
    fn spin(&mut self, iterations: u32) {
        for _ in 0..iterations {
            core::hint::spin_loop();
        }
    }
}

/// Hardware settle delay: `outb(0x80, 0x80)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostPortDelay;

impl Delay for PostPortDelay {
    fn settle(&mut self, io: &mut dyn PortIo) {
        io.write_u8(POST_PORT, 0x80);
    }
}

/// No-op delay for host-side runs where timing does not matter.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDelay;

impl Delay for NoDelay {
    fn settle(&mut self, _io: &mut dyn PortIo) {}

    fn spin(&mut self, _iterations: u32) {}
}

/// Records how much delay was requested without spending any wall time.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CountingDelay {
    pub settles: u64,
    pub spin_iterations: u64,
}

impl Delay for CountingDelay {
    fn settle(&mut self, _io: &mut dyn PortIo) {
        self.settles += 1;
    }

    fn spin(&mut self, iterations: u32) {
        self.spin_iterations += u64::from(iterations);
    }
}

impl<D: Delay + ?Sized> Delay for &mut D {
    fn settle(&mut self, io: &mut dyn PortIo) {
        (**self).settle(io)
    }

    fn spin(&mut self, iterations: u32) {
        (**self).spin(iterations)
    }
}
