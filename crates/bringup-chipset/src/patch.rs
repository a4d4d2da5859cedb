//! Read-modify-write register patch tables.

use bringup_bus::RegisterWindow;

/// One read-modify-write: `reg = (reg & and_mask) | or_value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchEntry {
    pub offset: u8,
    pub and_mask: u8,
    pub or_value: u8,
}

impl PatchEntry {
    /// Terminator. Any entry with offset 0 ends a table.
    pub const END: PatchEntry = PatchEntry::new(0x00, 0x00, 0x00);

    pub const fn new(offset: u8, and_mask: u8, or_value: u8) -> Self {
        Self {
            offset,
            and_mask,
            or_value,
        }
    }

    pub const fn is_end(&self) -> bool {
        self.offset == 0
    }

    pub const fn patch(&self, current: u8) -> u8 {
        (current & self.and_mask) | self.or_value
    }
}

/// When the offset-0 terminator is tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentinelCheck {
    /// Test before every entry, so a table can never patch offset 0.
    BeforeEach,
    /// Apply the first entry unconditionally and test only the entries after it. Tables whose
    /// first row legitimately targets offset 0 use this.
    AfterEach,
}

#[derive(Debug, Clone, Copy)]
pub struct PatchTable<'a> {
    pub name: &'a str,
    pub entries: &'a [PatchEntry],
    pub check: SentinelCheck,
}

impl<'a> PatchTable<'a> {
    pub const fn new(name: &'a str, entries: &'a [PatchEntry]) -> Self {
        Self {
            name,
            entries,
            check: SentinelCheck::BeforeEach,
        }
    }

    pub const fn with_check(mut self, check: SentinelCheck) -> Self {
        self.check = check;
        self
    }

    /// The entries that will actually be applied, in order.
    pub fn active_entries(&self) -> &'a [PatchEntry] {
        let entries = self.entries;
        let end = entries
            .iter()
            .enumerate()
            .position(|(i, e)| e.is_end() && self.stops_at(i))
            .unwrap_or(entries.len());
        &entries[..end]
    }

    fn stops_at(&self, index: usize) -> bool {
        match self.check {
            SentinelCheck::BeforeEach => true,
            SentinelCheck::AfterEach => index > 0,
        }
    }
}

/// Applies `table` to `window` in order and returns the number of entries applied.
///
/// Entries are not commutative: two rows may touch the same offset and the later one sees the
/// earlier one's result. Nothing is rolled back if a later write misbehaves.
pub fn apply_patch_table<W: RegisterWindow + ?Sized>(
    window: &mut W,
    table: &PatchTable<'_>,
) -> usize {
    let entries = table.active_entries();
    for entry in entries {
        let current = window.read_u8(entry.offset);
        let value = entry.patch(current);
        tracing::trace!(
            table = table.name,
            offset = entry.offset,
            current,
            value,
            "patch"
        );
        window.write_u8(entry.offset, value);
    }
    tracing::debug!(
        table = table.name,
        space = ?window.space(),
        applied = entries.len(),
        "applied patch table"
    );
    entries.len()
}
