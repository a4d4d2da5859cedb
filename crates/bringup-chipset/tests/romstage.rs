mod common;

use bringup_bus::{
    CountingDelay, IoPortBus, MemoryBus, NoDelay, PortRam, SparseMemory, TestMsr, TestPciBus,
};
use bringup_chipset::romstage::{
    self, Timestamp, MCHBAR_BASE, REBOOT_SIGNATURE, RESET_CONTROL_HARD_RESET,
    RESET_CONTROL_PORT, SSKPD,
};
use bringup_chipset::sis966::regs::*;
use bringup_chipset::{ChipsetError, NoHooks, Platform, RomstageConfig, RomstageExit, RomstageHooks};
use bringup_smbus::{IsaSmbusConfig, SmbusController, SmbusError};
use common::{Board, LPC, NB};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    ConsoleInit,
    Timestamp(Timestamp),
    PostCode(u8),
    DetectS3,
    EarlyInit(bool),
    Raminit(bool),
    Finalize(bool),
}

#[derive(Default)]
struct Recorder {
    events: Vec<Event>,
    s3: bool,
    /// SPD byte the raminit hook reads, if any.
    spd_probe: Option<(u8, u8)>,
    spd_result: Option<Result<u8, SmbusError>>,
}

impl Recorder {
    fn post_codes(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::PostCode(code) => Some(*code),
                _ => None,
            })
            .collect()
    }
}

impl RomstageHooks for Recorder {
    fn console_init(&mut self) {
        self.events.push(Event::ConsoleInit);
    }

    fn timestamp(&mut self, stamp: Timestamp) {
        self.events.push(Event::Timestamp(stamp));
    }

    fn post_code(&mut self, code: u8) {
        self.events.push(Event::PostCode(code));
    }

    fn detect_s3_resume(&mut self) -> bool {
        self.events.push(Event::DetectS3);
        self.s3
    }

    fn early_init(&mut self, s3_resume: bool) {
        self.events.push(Event::EarlyInit(s3_resume));
    }

    fn raminit(
        &mut self,
        smbus: &mut dyn SmbusController,
        s3_resume: bool,
    ) -> bringup_chipset::Result<()> {
        self.events.push(Event::Raminit(s3_resume));
        if let Some((device, register)) = self.spd_probe {
            let result = smbus.read_byte(device, register);
            self.spd_result = Some(result);
            result?;
        }
        Ok(())
    }

    fn finalize(&mut self, s3_resume: bool) {
        self.events.push(Event::Finalize(s3_resume));
    }
}

type TestPlatform<D> = Platform<TestPciBus, IoPortBus, SparseMemory, TestMsr, D>;

fn platform<D>(board: Board, delay: D) -> (TestPlatform<D>, PortRam) {
    let Board { pci, io, acpi, msr } = board;
    (
        Platform {
            pci,
            io,
            mem: SparseMemory::new(),
            msr,
            delay,
        },
        acpi,
    )
}

#[test]
fn reboot_signature_short_circuits() {
    let (mut platform, _acpi) = platform(Board::new(), NoDelay);
    let reset = PortRam::new(RESET_CONTROL_PORT, 1);
    reset.attach(&mut platform.io);
    platform
        .mem
        .write_u16(MCHBAR_BASE + SSKPD, REBOOT_SIGNATURE);

    let mut hooks = Recorder::default();
    let exit = romstage::run(&mut platform, &mut hooks, &RomstageConfig::default()).unwrap();

    assert_eq!(exit, RomstageExit::ResetRequested);
    assert_eq!(reset.peek(RESET_CONTROL_PORT), RESET_CONTROL_HARD_RESET);
    assert!(platform.pci.writes().is_empty());
    assert!(hooks.events.is_empty());
}

#[test]
fn other_scratchpad_values_boot_normally() {
    let (mut platform, _acpi) = platform(Board::new(), NoDelay);
    platform.mem.write_u16(MCHBAR_BASE + SSKPD, 0xCAFF);

    let exit = romstage::run(&mut platform, &mut NoHooks, &RomstageConfig::default()).unwrap();
    assert_eq!(exit, RomstageExit::Completed { s3_resume: false });
}

#[test]
fn full_run_orders_hooks_and_post_codes() {
    for s3 in [false, true] {
        let (mut platform, acpi) = platform(Board::new(), NoDelay);
        let mut hooks = Recorder {
            s3,
            ..Recorder::default()
        };

        let exit = romstage::run(&mut platform, &mut hooks, &RomstageConfig::default()).unwrap();
        assert_eq!(exit, RomstageExit::Completed { s3_resume: s3 });

        assert_eq!(
            hooks.events,
            vec![
                Event::Timestamp(Timestamp::RomstageStart),
                Event::ConsoleInit,
                Event::DetectS3,
                Event::PostCode(0x38),
                Event::EarlyInit(s3),
                Event::PostCode(0x39),
                Event::Raminit(s3),
                Event::Timestamp(Timestamp::AfterRaminit),
                Event::PostCode(0x3B),
                Event::PostCode(0x3C),
                Event::PostCode(0x3D),
                Event::Finalize(s3),
                Event::PostCode(0x3F),
            ]
        );
        assert_eq!(hooks.post_codes(), [0x38, 0x39, 0x3B, 0x3C, 0x3D, 0x3F]);

        // Both stages and the SMBus enable ran.
        assert_eq!(platform.pci.peek_u8(NB, 0x40), 0x36);
        assert_eq!(platform.pci.peek_u16(LPC, LPC_ACPI_BASE), ACPI_IO_BASE);
        assert_eq!(platform.pci.peek_u8(NB, NB_ACPI_CTRL), NB_ACPI_CTRL_VALUE);
        assert_eq!(acpi.peek(0x884), 0x0E);
    }
}

#[test]
fn raminit_failure_stops_before_stage2() {
    let (mut platform, _acpi) = platform(Board::new(), CountingDelay::default());
    let cfg = RomstageConfig {
        smbus_isa: IsaSmbusConfig {
            poll_budget: 4,
            spin_per_poll: 16,
            ..IsaSmbusConfig::default()
        },
        ..RomstageConfig::default()
    };
    let mut hooks = Recorder {
        spd_probe: Some((0x50, 0x02)),
        ..Recorder::default()
    };

    let err = romstage::run(&mut platform, &mut hooks, &cfg).unwrap_err();
    assert_eq!(err, ChipsetError::Smbus(SmbusError::Timeout));
    assert_eq!(hooks.spd_result, Some(Err(SmbusError::Timeout)));

    // Nothing on the board ever reports done, so the whole budget is spent.
    assert_eq!(platform.delay.spin_iterations, 4 * 16);
    // Five framing writes plus one settle per poll.
    assert_eq!(platform.delay.settles, 5 + 4);

    assert_eq!(hooks.post_codes(), [0x38, 0x39]);
    assert!(!hooks.events.contains(&Event::Finalize(false)));
    assert_eq!(
        platform
            .pci
            .writes_to(NB)
            .filter(|w| w.offset == u16::from(NB_ACPI_CTRL))
            .count(),
        0
    );
}

#[test]
fn missing_north_bridge_aborts_romstage_when_strict() {
    let (mut platform, _acpi) = platform(
        Board::without(&[bringup_chipset::ids::SIS761_NB]),
        NoDelay,
    );
    let mut cfg = RomstageConfig::default();
    cfg.chipset.missing_device = bringup_chipset::MissingDevicePolicy::Abort;

    let mut hooks = Recorder::default();
    let err = romstage::run(&mut platform, &mut hooks, &cfg).unwrap_err();
    assert!(matches!(err, ChipsetError::DeviceNotFound { .. }));
    assert_eq!(
        hooks.events,
        vec![Event::Timestamp(Timestamp::RomstageStart), Event::ConsoleInit]
    );
}
