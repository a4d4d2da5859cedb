//! PCI interrupt routing table (`$PIR`).
//!
//! The table is a compile-time constant with its checksum byte already filled in. At boot it is
//! copied byte for byte into the legacy BIOS area for the OS to find; nothing is recomputed.

mod board;
pub mod error;

pub use board::{MEW_VM_IRQ_ROUTING, MEW_VM_SLOTS};
pub use error::{PirqError, Result};

use bringup_bus::MemoryBus;

pub const PIRQ_SIGNATURE: u32 = u32::from_le_bytes(*b"$PIR");
pub const PIRQ_VERSION: u16 = 0x0100;

pub const HEADER_LEN: usize = 32;
pub const SLOT_LEN: usize = 16;

/// Size in bytes of a table with `slots` entries, as stored in the header.
pub const fn table_size(slots: usize) -> u16 {
    (HEADER_LEN + SLOT_LEN * slots) as u16
}

/// One interrupt pin of a slot: the router link it is wired to and the IRQs that link may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IrqPin {
    pub link: u8,
    pub bitmap: u16,
}

impl IrqPin {
    pub const fn new(link: u8, bitmap: u16) -> Self {
        Self { link, bitmap }
    }
}

/// A device or slot and its INTA#..INTD# wiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IrqSlot {
    pub bus: u8,
    pub devfn: u8,
    pub pins: [IrqPin; 4],
    /// Physical slot number; 0 for onboard devices.
    pub slot: u8,
    pub reserved: u8,
}

impl IrqSlot {
    fn write_to(&self, out: &mut Vec<u8>) {
        out.push(self.bus);
        out.push(self.devfn);
        for pin in &self.pins {
            out.push(pin.link);
            out.extend_from_slice(&pin.bitmap.to_le_bytes());
        }
        out.push(self.slot);
        out.push(self.reserved);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PirqHeader {
    pub signature: u32,
    pub version: u16,
    /// Whole table, header included.
    pub table_size: u16,
    pub router_bus: u8,
    pub router_devfn: u8,
    /// IRQs devoted exclusively to PCI.
    pub exclusive_irqs: u16,
    pub router_vendor: u16,
    pub router_device: u16,
    pub miniport_data: u32,
    pub reserved: [u8; 11],
    pub checksum: u8,
}

impl PirqHeader {
    pub const fn slot_count(&self) -> usize {
        (self.table_size as usize).saturating_sub(HEADER_LEN) / SLOT_LEN
    }

    fn as_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[0..4].copy_from_slice(&self.signature.to_le_bytes());
        out[4..6].copy_from_slice(&self.version.to_le_bytes());
        out[6..8].copy_from_slice(&self.table_size.to_le_bytes());
        out[8] = self.router_bus;
        out[9] = self.router_devfn;
        out[10..12].copy_from_slice(&self.exclusive_irqs.to_le_bytes());
        out[12..14].copy_from_slice(&self.router_vendor.to_le_bytes());
        out[14..16].copy_from_slice(&self.router_device.to_le_bytes());
        out[16..20].copy_from_slice(&self.miniport_data.to_le_bytes());
        out[20..31].copy_from_slice(&self.reserved);
        out[31] = self.checksum;
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IrqRoutingTable<'a> {
    pub header: PirqHeader,
    pub slots: &'a [IrqSlot],
}

impl IrqRoutingTable<'_> {
    /// The little-endian wire image, checksum byte as stored.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_LEN + SLOT_LEN * self.slots.len());
        out.extend_from_slice(&self.header.as_bytes());
        for slot in self.slots {
            slot.write_to(&mut out);
        }
        out
    }

    /// Copies the table to physical address `addr` and returns the number of bytes written.
    pub fn copy_to<M: MemoryBus + ?Sized>(&self, mem: &mut M, addr: u64) -> usize {
        let bytes = self.to_bytes();
        mem.write_physical(addr, &bytes);
        tracing::info!(
            addr = format_args!("{addr:#x}"),
            len = bytes.len(),
            slots = self.slots.len(),
            "copied PIRQ routing table"
        );
        bytes.len()
    }
}

/// The byte that makes `bytes` sum to zero modulo 256.
///
/// Over a complete table, including its checksum byte, this is 0 when the table is valid.
pub fn checksum_of(bytes: &[u8]) -> u8 {
    let sum = bytes.iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
    0u8.wrapping_sub(sum)
}

/// Parses the 32-byte header at the start of `bytes`.
pub fn parse_header(bytes: &[u8]) -> Result<PirqHeader> {
    let Some(raw) = bytes.get(..HEADER_LEN) else {
        return Err(PirqError::Truncated {
            len: bytes.len(),
            needed: HEADER_LEN,
        });
    };
    let u16_at = |off: usize| u16::from_le_bytes([raw[off], raw[off + 1]]);
    let u32_at = |off: usize| {
        u32::from_le_bytes([raw[off], raw[off + 1], raw[off + 2], raw[off + 3]])
    };

    let signature = u32_at(0);
    if signature != PIRQ_SIGNATURE {
        return Err(PirqError::BadSignature(signature));
    }
    let table_size = u16_at(6);
    let size = usize::from(table_size);
    if size < HEADER_LEN || (size - HEADER_LEN) % SLOT_LEN != 0 {
        return Err(PirqError::BadTableSize(table_size));
    }

    let mut reserved = [0u8; 11];
    reserved.copy_from_slice(&raw[20..31]);
    Ok(PirqHeader {
        signature,
        version: u16_at(4),
        table_size,
        router_bus: raw[8],
        router_devfn: raw[9],
        exclusive_irqs: u16_at(10),
        router_vendor: u16_at(12),
        router_device: u16_at(14),
        miniport_data: u32_at(16),
        reserved,
        checksum: raw[31],
    })
}
