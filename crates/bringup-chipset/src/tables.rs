//! Register patch tables for the SiS761 north bridge and SiS966 south bridge.
//!
//! Every table ends with [`PatchEntry::END`].

use crate::patch::{PatchEntry, PatchTable, SentinelCheck};

const NB_ENTRIES: &[PatchEntry] = &[
    PatchEntry::new(0x04, 0x00, 0x07),
    PatchEntry::new(0x05, 0x00, 0x00),
    PatchEntry::new(0x0D, 0x00, 0x20),
    PatchEntry::new(0x2C, 0x00, 0x39),
    PatchEntry::new(0x2D, 0x00, 0x10),
    PatchEntry::new(0x2E, 0x00, 0x61),
    PatchEntry::new(0x2F, 0x00, 0x07),
    PatchEntry::new(0x34, 0x00, 0xA0),
    PatchEntry::new(0x40, 0x00, 0x36),
    PatchEntry::new(0x42, 0x00, 0xB9),
    PatchEntry::new(0x43, 0x00, 0x8B),
    PatchEntry::new(0x44, 0x00, 0x05),
    PatchEntry::new(0x45, 0x00, 0xFF),
    PatchEntry::new(0x46, 0x00, 0x90),
    PatchEntry::new(0x47, 0x00, 0xA0),
    PatchEntry::new(0x4E, 0x00, 0x00),
    PatchEntry::new(0x4F, 0x00, 0x02),
    PatchEntry::new(0x5B, 0x00, 0x44),
    PatchEntry::new(0x5D, 0x00, 0x00),
    PatchEntry::new(0x5E, 0x00, 0x25),
    PatchEntry::new(0x61, 0x00, 0xB0),
    PatchEntry::new(0x65, 0x00, 0xB0),
    PatchEntry::new(0x68, 0x00, 0x4C),
    PatchEntry::new(0x69, 0x00, 0xD0),
    PatchEntry::new(0x6B, 0x00, 0x07),
    PatchEntry::new(0x6C, 0x00, 0xDD),
    PatchEntry::new(0x6D, 0x00, 0xAD),
    PatchEntry::new(0x6E, 0x00, 0xE8),
    PatchEntry::new(0x6F, 0x00, 0x4D),
    PatchEntry::new(0x70, 0x00, 0x00),
    PatchEntry::new(0x71, 0x00, 0x80),
    PatchEntry::new(0x72, 0x00, 0x00),
    PatchEntry::new(0x73, 0x00, 0x00),
    PatchEntry::new(0x74, 0x00, 0x01),
    PatchEntry::new(0x75, 0x00, 0x10),
    PatchEntry::new(0x7E, 0x00, 0x29),
    PatchEntry::new(0x8B, 0x00, 0x10),
    PatchEntry::new(0x8D, 0x00, 0x03),
    PatchEntry::new(0xA1, 0x00, 0xD0),
    PatchEntry::new(0xA2, 0x00, 0x30),
    PatchEntry::new(0xA4, 0x00, 0x0B),
    PatchEntry::new(0xA9, 0x00, 0x02),
    PatchEntry::new(0xB0, 0x00, 0x30),
    PatchEntry::new(0xB4, 0x00, 0x30),
    PatchEntry::new(0x90, 0x00, 0x00),
    PatchEntry::new(0x91, 0x00, 0x00),
    PatchEntry::new(0x92, 0x00, 0x00),
    PatchEntry::new(0x93, 0x00, 0x00),
    PatchEntry::new(0x94, 0x00, 0x00),
    PatchEntry::new(0x95, 0x00, 0x00),
    PatchEntry::new(0x96, 0x00, 0x00),
    PatchEntry::new(0x97, 0x00, 0x00),
    PatchEntry::new(0x98, 0x00, 0x00),
    PatchEntry::new(0x99, 0x00, 0x00),
    PatchEntry::END,
];

const LPC_ENTRIES: &[PatchEntry] = &[
    PatchEntry::new(0x04, 0xF8, 0x07),
    PatchEntry::new(0x45, 0x00, 0x00),
    PatchEntry::new(0x46, 0x00, 0x3D),
    PatchEntry::new(0x47, 0x00, 0xDD),
    PatchEntry::new(0x48, 0x00, 0x12),
    PatchEntry::new(0x64, 0x00, 0xFF),
    PatchEntry::new(0x65, 0x00, 0xC1),
    PatchEntry::new(0x68, 0x00, 0x89),
    PatchEntry::new(0x69, 0x00, 0x80),
    PatchEntry::new(0x6B, 0x00, 0x00),
    PatchEntry::new(0x6C, 0xFF, 0x97),
    PatchEntry::new(0x6E, 0x00, 0x00),
    PatchEntry::new(0x6F, 0xFF, 0x14),
    PatchEntry::new(0x77, 0x00, 0x0E),
    PatchEntry::new(0x78, 0x00, 0x20),
    PatchEntry::new(0x7B, 0x00, 0x88),
    PatchEntry::new(0x7F, 0x00, 0x40),
    PatchEntry::new(0xC1, 0x00, 0xF0),
    PatchEntry::new(0xC2, 0x00, 0x01),
    PatchEntry::new(0xC3, 0x00, 0x00),
    PatchEntry::new(0xC9, 0x00, 0x80),
    PatchEntry::new(0xCF, 0x00, 0x45),
    PatchEntry::new(0xD0, 0x00, 0x02),
    PatchEntry::new(0xD4, 0x00, 0x44),
    PatchEntry::new(0xD5, 0x00, 0x62),
    PatchEntry::new(0xD6, 0x00, 0x32),
    PatchEntry::new(0xD8, 0x00, 0x45),
    PatchEntry::new(0xDA, 0x00, 0xDA),
    PatchEntry::new(0xDB, 0x00, 0x61),
    PatchEntry::new(0xDC, 0x00, 0xAA),
    PatchEntry::new(0xDD, 0x00, 0xAA),
    PatchEntry::new(0xDE, 0x00, 0xAA),
    PatchEntry::new(0xDF, 0x00, 0xAA),
    PatchEntry::END,
];

const ACPI_ENTRIES: &[PatchEntry] = &[
    PatchEntry::new(0x1B, 0xBF, 0x40),
    PatchEntry::new(0x84, 0x00, 0x0E),
    PatchEntry::new(0x85, 0x00, 0x29),
    PatchEntry::new(0x86, 0x00, 0xCB),
    PatchEntry::new(0x87, 0x00, 0x55),
    PatchEntry::new(0x6B, 0x00, 0x00),
    PatchEntry::new(0x6C, 0x68, 0x97),
    PatchEntry::new(0x6E, 0x00, 0x00),
    PatchEntry::new(0x6F, 0xFF, 0x14),
    PatchEntry::END,
];

const NB_PCIE_ENTRIES: &[PatchEntry] = &[
    PatchEntry::new(0x3D, 0x00, 0x00),
    PatchEntry::new(0x1C, 0xFE, 0x01),
    PatchEntry::new(0x1D, 0xFE, 0x01),
    PatchEntry::new(0x24, 0xFE, 0x01),
    PatchEntry::new(0x26, 0xFE, 0x01),
    PatchEntry::new(0x40, 0xFF, 0x10),
    PatchEntry::new(0x43, 0xFF, 0x78),
    PatchEntry::new(0x44, 0xFF, 0x02),
    PatchEntry::new(0x45, 0xFF, 0x10),
    PatchEntry::new(0x48, 0xFF, 0x52),
    PatchEntry::new(0x49, 0xFF, 0xE3),
    PatchEntry::new(0x5A, 0x00, 0x00),
    PatchEntry::new(0x4B, 0x00, 0x16),
    PatchEntry::new(0x4C, 0x00, 0x80),
    PatchEntry::new(0x4D, 0x00, 0x02),
    PatchEntry::new(0x4E, 0x00, 0x00),
    PatchEntry::new(0x5C, 0x00, 0x52),
    PatchEntry::new(0x5E, 0x00, 0x10),
    PatchEntry::new(0x34, 0x00, 0xD0),
    PatchEntry::new(0xD0, 0x00, 0x01),
    PatchEntry::new(0x4F, 0x00, 0x80),
    PatchEntry::new(0xA1, 0x00, 0xF4),
    PatchEntry::new(0xA2, 0x7F, 0x00),
    PatchEntry::new(0xBD, 0x00, 0xA0),
    PatchEntry::new(0xD1, 0xFF, 0x00),
    PatchEntry::new(0xD3, 0xFE, 0x01),
    PatchEntry::new(0xD4, 0x18, 0x20),
    PatchEntry::new(0xD5, 0xF0, 0x00),
    PatchEntry::new(0xDD, 0xFF, 0x00),
    PatchEntry::new(0xDE, 0xEC, 0x10),
    PatchEntry::new(0xDF, 0xFF, 0x00),
    PatchEntry::new(0xE0, 0xF7, 0x00),
    PatchEntry::new(0xE3, 0xEF, 0x10),
    PatchEntry::new(0xE4, 0x7F, 0x80),
    PatchEntry::new(0xE5, 0xFF, 0x00),
    PatchEntry::new(0xE6, 0x06, 0x00),
    PatchEntry::new(0xE7, 0xFF, 0x00),
    PatchEntry::new(0xF5, 0x00, 0x00),
    PatchEntry::new(0xF6, 0x3F, 0x00),
    PatchEntry::new(0xF7, 0xFF, 0x00),
    PatchEntry::new(0xFD, 0xFF, 0x00),
    PatchEntry::new(0x4F, 0x00, 0x00),
    PatchEntry::END,
];

const AGP_ENTRIES: &[PatchEntry] = &[
    PatchEntry::new(0xCF, 0xDF, 0x00),
    PatchEntry::new(0x06, 0xDF, 0x20),
    PatchEntry::new(0x1E, 0xDF, 0x20),
    PatchEntry::new(0x50, 0x00, 0x02),
    PatchEntry::new(0x51, 0x00, 0x00),
    PatchEntry::new(0x54, 0x00, 0x09),
    PatchEntry::new(0x55, 0x00, 0x00),
    PatchEntry::new(0x56, 0x00, 0x80),
    PatchEntry::new(0x58, 0x00, 0x08),
    PatchEntry::new(0x60, 0x00, 0xB1),
    PatchEntry::new(0x61, 0x00, 0x02),
    PatchEntry::new(0x62, 0x00, 0x60),
    PatchEntry::new(0x63, 0x00, 0x60),
    PatchEntry::new(0x64, 0x00, 0xAA),
    PatchEntry::new(0x65, 0x00, 0x18),
    PatchEntry::new(0x68, 0x00, 0x23),
    PatchEntry::new(0x69, 0x00, 0x23),
    PatchEntry::new(0x6A, 0x00, 0xC8),
    PatchEntry::new(0x6B, 0x00, 0x08),
    PatchEntry::new(0x6C, 0x00, 0x00),
    PatchEntry::new(0x6D, 0x00, 0x00),
    PatchEntry::new(0x6E, 0x00, 0x08),
    PatchEntry::new(0x6F, 0x00, 0x00),
    PatchEntry::new(0xBB, 0x00, 0x00),
    PatchEntry::new(0xB5, 0x00, 0x30),
    PatchEntry::new(0xB0, 0x00, 0xDB),
    PatchEntry::new(0xB6, 0x00, 0x73),
    PatchEntry::new(0xB7, 0x00, 0x50),
    PatchEntry::new(0xBA, 0xBF, 0x41),
    PatchEntry::new(0xB4, 0x3F, 0xC0),
    PatchEntry::new(0xBF, 0xF9, 0x06),
    PatchEntry::new(0xBA, 0x00, 0x61),
    PatchEntry::new(0xBD, 0x7F, 0x80),
    PatchEntry::END,
];

const ACPI_2_ENTRIES: &[PatchEntry] = &[
    PatchEntry::new(0x00, 0x00, 0xFF),
    PatchEntry::new(0x01, 0x00, 0xFF),
    PatchEntry::new(0x02, 0x00, 0x00),
    PatchEntry::new(0x03, 0x00, 0x00),
    PatchEntry::new(0x16, 0x00, 0x00),
    PatchEntry::new(0x20, 0x00, 0xFF),
    PatchEntry::new(0x21, 0x00, 0xFF),
    PatchEntry::new(0x22, 0x00, 0x00),
    PatchEntry::new(0x23, 0x00, 0x00),
    PatchEntry::new(0x24, 0x00, 0x55),
    PatchEntry::new(0x25, 0x00, 0x55),
    PatchEntry::new(0x26, 0x00, 0x55),
    PatchEntry::new(0x27, 0x00, 0x55),
    PatchEntry::new(0x2A, 0x00, 0x40),
    PatchEntry::new(0x2B, 0x00, 0x10),
    PatchEntry::new(0x2E, 0x00, 0xFF),
    PatchEntry::new(0x30, 0x00, 0xFF),
    PatchEntry::new(0x31, 0x00, 0xFF),
    PatchEntry::new(0x32, 0x00, 0x00),
    PatchEntry::new(0x33, 0x00, 0x00),
    PatchEntry::new(0x40, 0x00, 0xFF),
    PatchEntry::new(0x41, 0x00, 0xFF),
    PatchEntry::new(0x42, 0x00, 0x00),
    PatchEntry::new(0x43, 0x00, 0x00),
    PatchEntry::new(0x4A, 0x00, 0x00),
    PatchEntry::new(0x4E, 0x00, 0x0F),
    PatchEntry::new(0x5A, 0x00, 0x00),
    PatchEntry::new(0x5B, 0x00, 0x00),
    PatchEntry::new(0x62, 0x00, 0x00),
    PatchEntry::new(0x63, 0x00, 0x04),
    PatchEntry::new(0x68, 0x00, 0xFF),
    PatchEntry::new(0x76, 0x00, 0xA0),
    PatchEntry::new(0x77, 0x00, 0x22),
    PatchEntry::new(0x78, 0xDF, 0x20),
    PatchEntry::new(0x7A, 0x00, 0x10),
    PatchEntry::new(0x7C, 0x00, 0x45),
    PatchEntry::new(0x7D, 0x00, 0xB8),
    PatchEntry::new(0x7F, 0x00, 0x00),
    PatchEntry::new(0x80, 0x00, 0x1C),
    PatchEntry::new(0x82, 0x00, 0x01),
    PatchEntry::new(0x84, 0x00, 0x0E),
    PatchEntry::new(0x85, 0x00, 0x29),
    PatchEntry::new(0x86, 0x00, 0xCB),
    PatchEntry::new(0x87, 0x00, 0x55),
    PatchEntry::new(0x88, 0x00, 0x04),
    PatchEntry::new(0x96, 0x00, 0x80),
    PatchEntry::new(0x99, 0x00, 0x80),
    PatchEntry::new(0x9A, 0x00, 0x15),
    PatchEntry::new(0x9D, 0x00, 0x05),
    PatchEntry::new(0x9E, 0x00, 0x00),
    PatchEntry::new(0x9F, 0x00, 0x04),
    PatchEntry::new(0xB0, 0x00, 0x6D),
    PatchEntry::new(0xB1, 0x00, 0x8C),
    PatchEntry::new(0xB9, 0x00, 0xFF),
    PatchEntry::new(0xBA, 0x00, 0x3F),
    PatchEntry::END,
];

const SATA_ENTRIES: &[PatchEntry] = &[
    PatchEntry::new(0x04, 0x00, 0x05),
    PatchEntry::new(0x09, 0x00, 0x05),
    PatchEntry::new(0x2C, 0x00, 0x39),
    PatchEntry::new(0x2D, 0x00, 0x10),
    PatchEntry::new(0x2E, 0x00, 0x83),
    PatchEntry::new(0x2F, 0x00, 0x11),
    PatchEntry::new(0x90, 0x00, 0x40),
    PatchEntry::new(0x91, 0x00, 0x00),
    PatchEntry::new(0x50, 0x00, 0xA2),
    PatchEntry::new(0x52, 0x00, 0xA2),
    PatchEntry::new(0x55, 0x00, 0x96),
    PatchEntry::new(0x52, 0x00, 0xA2),
    PatchEntry::new(0x55, 0xF7, 0x00),
    PatchEntry::new(0x56, 0x00, 0xC0),
    PatchEntry::new(0x57, 0x00, 0x14),
    PatchEntry::new(0x67, 0x00, 0x28),
    PatchEntry::new(0x81, 0x00, 0xB3),
    PatchEntry::new(0x82, 0x00, 0x72),
    PatchEntry::new(0x83, 0x00, 0x40),
    PatchEntry::new(0x85, 0x00, 0xB3),
    PatchEntry::new(0x86, 0x00, 0x72),
    PatchEntry::new(0x87, 0x00, 0x40),
    PatchEntry::new(0x88, 0x00, 0xDE),
    PatchEntry::new(0x89, 0x00, 0xB3),
    PatchEntry::new(0x8A, 0x00, 0x72),
    PatchEntry::new(0x8B, 0x00, 0x40),
    PatchEntry::new(0x8C, 0x00, 0xDE),
    PatchEntry::new(0x8D, 0x00, 0xB3),
    PatchEntry::new(0x8E, 0x00, 0x92),
    PatchEntry::new(0x8F, 0x00, 0x40),
    PatchEntry::new(0x93, 0x00, 0x00),
    PatchEntry::new(0x94, 0x00, 0x80),
    PatchEntry::new(0x95, 0x00, 0x08),
    PatchEntry::new(0x96, 0x00, 0x80),
    PatchEntry::new(0x97, 0x00, 0x08),
    PatchEntry::new(0x9C, 0x00, 0x80),
    PatchEntry::new(0x9D, 0x00, 0x08),
    PatchEntry::new(0x9E, 0x00, 0x80),
    PatchEntry::new(0x9F, 0x00, 0x08),
    PatchEntry::new(0xA0, 0x00, 0x15),
    PatchEntry::new(0xA1, 0x00, 0x15),
    PatchEntry::new(0xA2, 0x00, 0x15),
    PatchEntry::new(0xA3, 0x00, 0x15),
    PatchEntry::END,
];

/// SiS761 host bridge. Offset 0x4C is left alone here; it carries the internal GUI enable
/// bit and the shared memory size, both owned by the stage sequencing.
pub static NB: PatchTable<'static> = PatchTable::new("sis761-nb", NB_ENTRIES);

/// SiS966 LPC bridge.
pub static LPC: PatchTable<'static> = PatchTable::new("sis966-lpc", LPC_ENTRIES);

/// ACPI I/O block, first pass.
pub static ACPI: PatchTable<'static> = PatchTable::new("acpi", ACPI_ENTRIES);

/// SiS761 PCIe bridge function. Applied with the internal GUI disabled.
pub static NB_PCIE: PatchTable<'static> = PatchTable::new("sis761-pcie", NB_PCIE_ENTRIES);

/// SiS761 AGP (integrated graphics) bridge. Offset 0xBA is written twice.
pub static AGP: PatchTable<'static> = PatchTable::new("sis761-agp", AGP_ENTRIES);

/// ACPI I/O block, second pass. Starts at offset 0x00, so the terminator is tested after
/// each entry.
pub static ACPI_2: PatchTable<'static> =
    PatchTable::new("acpi-2", ACPI_2_ENTRIES).with_check(SentinelCheck::AfterEach);

/// SiS1183 SATA controller power-on defaults.
pub static SATA: PatchTable<'static> = PatchTable::new("sis1183-sata", SATA_ENTRIES);

/// Every table, for tooling that wants to dump or audit them.
pub static ALL: [&PatchTable<'static>; 7] = [&NB, &LPC, &ACPI, &NB_PCIE, &AGP, &ACPI_2, &SATA];
