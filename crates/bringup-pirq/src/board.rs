use bringup_bus::PciBdf;

use crate::{table_size, IrqPin, IrqRoutingTable, IrqSlot, PirqHeader, PIRQ_SIGNATURE, PIRQ_VERSION};

/// IRQs every link may be routed to: 5, 7, 9, 10, 11, 12, 14, 15.
const IRQS: u16 = 0xDEA0;

const fn slot(device: u8, links: [u8; 4], slot: u8) -> IrqSlot {
    IrqSlot {
        bus: 0,
        devfn: PciBdf::new(0, device, 0).devfn(),
        pins: [
            IrqPin::new(links[0], IRQS),
            IrqPin::new(links[1], IRQS),
            IrqPin::new(links[2], IRQS),
            IrqPin::new(links[3], IRQS),
        ],
        slot,
        reserved: 0,
    }
}

pub const MEW_VM_SLOTS: [IrqSlot; 11] = [
    slot(0x08, [2, 3, 4, 1], 1),
    slot(0x09, [3, 4, 1, 2], 2),
    slot(0x0A, [4, 1, 2, 3], 3),
    slot(0x0B, [4, 1, 2, 3], 4),
    slot(0x0C, [1, 2, 3, 4], 5),
    slot(0x0D, [1, 2, 3, 4], 6),
    slot(0x11, [0, 0, 3, 4], 0),
    slot(0x0F, [1, 2, 3, 4], 0),
    slot(0x01, [1, 2, 3, 4], 0),
    slot(0x10, [1, 2, 3, 4], 0),
    slot(0x12, [1, 0, 0, 0], 0),
];

/// Routing for the MEW-VM board. The interrupt router sits at 00:11.0.
pub const MEW_VM_IRQ_ROUTING: IrqRoutingTable<'static> = IrqRoutingTable {
    header: PirqHeader {
        signature: PIRQ_SIGNATURE,
        version: PIRQ_VERSION,
        table_size: table_size(MEW_VM_SLOTS.len()),
        router_bus: 0x00,
        router_devfn: PciBdf::new(0, 0x11, 0).devfn(),
        exclusive_irqs: 0x0E20,
        router_vendor: 0x8086,
        router_device: 0x7120,
        miniport_data: 0,
        reserved: [0; 11],
        checksum: 0xA4,
    },
    slots: &MEW_VM_SLOTS,
};
