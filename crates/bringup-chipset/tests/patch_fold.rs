use bringup_bus::{BusAddressSpace, RegisterWindow};
use bringup_chipset::{apply_patch_table, PatchEntry, PatchTable, SentinelCheck};
use proptest::prelude::*;

#[derive(Clone)]
struct Regs {
    bytes: Vec<u8>,
    writes: usize,
}

impl RegisterWindow for Regs {
    fn space(&self) -> BusAddressSpace {
        BusAddressSpace::PciConfig
    }

    fn read_u8(&mut self, offset: u8) -> u8 {
        self.bytes[usize::from(offset)]
    }

    fn write_u8(&mut self, offset: u8, value: u8) {
        self.writes += 1;
        self.bytes[usize::from(offset)] = value;
    }
}

fn entry_strategy() -> impl Strategy<Value = PatchEntry> {
    (1u8..=255, any::<u8>(), any::<u8>())
        .prop_map(|(offset, and_mask, or_value)| PatchEntry::new(offset, and_mask, or_value))
}

fn fold(initial: &[u8], entries: &[PatchEntry]) -> Vec<u8> {
    entries.iter().fold(initial.to_vec(), |mut regs, e| {
        let i = usize::from(e.offset);
        regs[i] = (regs[i] & e.and_mask) | e.or_value;
        regs
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]
    #[test]
    fn applying_a_table_matches_a_left_fold(
        initial in prop::collection::vec(any::<u8>(), 256),
        entries in prop::collection::vec(entry_strategy(), 0..48),
    ) {
        let mut regs = Regs { bytes: initial.clone(), writes: 0 };
        let applied = apply_patch_table(&mut regs, &PatchTable::new("prop", &entries));

        prop_assert_eq!(applied, entries.len());
        prop_assert_eq!(regs.writes, entries.len());
        prop_assert_eq!(regs.bytes, fold(&initial, &entries));
    }

    #[test]
    fn terminator_cuts_the_table(
        initial in prop::collection::vec(any::<u8>(), 256),
        (entries, k) in prop::collection::vec(entry_strategy(), 1..32)
            .prop_flat_map(|v| { let len = v.len(); (Just(v), 0..=len) }),
    ) {
        let mut with_end = entries.clone();
        with_end.insert(k, PatchEntry::END);

        let mut regs = Regs { bytes: initial.clone(), writes: 0 };
        let applied = apply_patch_table(&mut regs, &PatchTable::new("prop", &with_end));

        prop_assert_eq!(applied, k);
        prop_assert_eq!(regs.bytes, fold(&initial, &entries[..k]));
    }

    #[test]
    fn after_each_check_always_applies_the_first_entry(
        initial in prop::collection::vec(any::<u8>(), 256),
        first in (any::<u8>(), any::<u8>()),
        rest in prop::collection::vec(entry_strategy(), 0..16),
    ) {
        let mut entries = vec![PatchEntry::new(0x00, first.0, first.1)];
        entries.extend_from_slice(&rest);
        entries.push(PatchEntry::END);

        let mut regs = Regs { bytes: initial.clone(), writes: 0 };
        let table = PatchTable::new("prop", &entries).with_check(SentinelCheck::AfterEach);
        let applied = apply_patch_table(&mut regs, &table);

        prop_assert_eq!(applied, rest.len() + 1);
        prop_assert_eq!(regs.bytes, fold(&initial, &entries[..rest.len() + 1]));
    }
}
