use std::cell::RefCell;
use std::rc::Rc;

use bringup_bus::{CountingDelay, IoPortBus, NoDelay, PortIoDevice};
use bringup_smbus::regs::isa::*;
use bringup_smbus::{
    IsaSmbus, IsaSmbusConfig, Phase, SmbusController, SmbusError, TransactionStatus,
};

const BASE: u16 = 0x8D0;

#[derive(Default)]
struct State {
    regs: [u8; 16],
    /// `STS` reads that report busy after the start command. `None` = never completes.
    busy_for: Option<u32>,
    busy_left: u32,
    started: bool,
    sts_reads: u32,
    /// Status reported once the transaction has finished.
    final_status: u8,
    /// Status reported by every read after the first one that saw `final_status`.
    after_done: Option<u8>,
    seen_done: bool,
    /// Each write to the window, in order.
    log: Vec<(u8, u8)>,
}

#[derive(Clone, Default)]
struct MockIsa(Rc<RefCell<State>>);

impl MockIsa {
    fn new(busy_for: Option<u32>, data: u8) -> Self {
        let mock = Self::default();
        {
            let mut s = mock.0.borrow_mut();
            s.busy_for = busy_for;
            s.final_status = STS_DONE;
            s.regs[BYTE as usize] = data;
        }
        mock
    }

    fn attach(&self) -> IoPortBus {
        let mut bus = IoPortBus::new();
        bus.register_range(BASE, 16, Box::new(self.clone()));
        bus
    }
}

impl PortIoDevice for MockIsa {
    fn read(&mut self, port: u16, _size: u8) -> u32 {
        let mut s = self.0.borrow_mut();
        let off = (port - BASE) as u8;
        if off == STS && s.started {
            s.sts_reads += 1;
            let busy_for = s.busy_for;
            match busy_for {
                None => return 0x01,
                Some(_) if s.busy_left > 0 => {
                    s.busy_left -= 1;
                    return 0x01;
                }
                Some(_) => {
                    let status = match s.after_done {
                        Some(latched) if s.seen_done => latched,
                        _ => s.final_status,
                    };
                    s.seen_done = true;
                    return u32::from(status);
                }
            }
        }
        u32::from(s.regs[off as usize])
    }

    fn write(&mut self, port: u16, _size: u8, value: u32) {
        let mut s = self.0.borrow_mut();
        let off = (port - BASE) as u8;
        let value = value as u8;
        s.log.push((off, value));
        if off == HOST_CNT && value == HOST_CNT_START_BYTE_DATA {
            s.started = true;
            s.busy_left = s.busy_for.unwrap_or(0);
        }
        s.regs[off as usize] = value;
    }
}

fn config(poll_budget: u32) -> IsaSmbusConfig {
    IsaSmbusConfig {
        io_base: BASE,
        poll_budget,
        spin_per_poll: 0xFFFF,
    }
}

#[test]
fn read_byte_frames_the_transaction_and_returns_data() {
    let mock = MockIsa::new(Some(5), 0x80);
    let mut bus = mock.attach();
    let mut delay = CountingDelay::default();
    let mut smbus = IsaSmbus::new(&mut bus, &mut delay, config(0x1000));

    assert_eq!(smbus.read_byte(0x50, 0x03), Ok(0x80));
    assert_eq!(smbus.last_phase(), Phase::Done);
    drop(smbus);

    let s = mock.0.borrow();
    assert_eq!(
        s.log,
        vec![
            (STS, STS_CLEAR_ALL),
            (HOST_CNT, HOST_CNT_KILL),
            (ADDR, 0xA1),
            (CMD, 0x03),
            (HOST_CNT, HOST_CNT_START_BYTE_DATA),
        ]
    );
    // Five busy polls, the done poll, then the status re-read.
    assert_eq!(s.sts_reads, 7);
    assert_eq!(delay.settles, 5 + 5);
    assert_eq!(delay.spin_iterations, 5 * 0xFFFF);
}

#[test]
fn timeout_after_exactly_the_poll_budget() {
    let mock = MockIsa::new(None, 0x00);
    let mut bus = mock.attach();
    let mut delay = CountingDelay::default();
    let mut smbus = IsaSmbus::new(&mut bus, &mut delay, config(64));

    assert_eq!(smbus.read_byte(0x50, 0x00), Err(SmbusError::Timeout));
    assert_eq!(smbus.last_phase(), Phase::TimedOut);
    drop(smbus);

    assert_eq!(mock.0.borrow().sts_reads, 64);
    assert_eq!(delay.spin_iterations, 64 * 0xFFFF);
}

#[test]
fn status_changing_after_completion_is_a_protocol_error() {
    let mock = MockIsa::new(Some(0), 0x00);
    mock.0.borrow_mut().after_done = Some(STS_DONE | 0x04);
    let mut bus = mock.attach();
    let mut smbus = IsaSmbus::new(&mut bus, CountingDelay::default(), config(4));

    let err = smbus.read_byte(0x50, 0x00).unwrap_err();
    assert_eq!(err, SmbusError::Protocol { status: 0x0C });
    assert_eq!(err.legacy_code(), -1);
    assert_eq!(smbus.last_phase(), Phase::Failed);
}

#[test]
fn error_status_at_end_of_budget_is_a_protocol_error() {
    // Empty slot: the controller stops with busy clear and an error bit set.
    let mock = MockIsa::new(Some(0), 0x00);
    mock.0.borrow_mut().final_status = 0x04;
    let mut bus = mock.attach();
    let mut delay = CountingDelay::default();
    let mut smbus = IsaSmbus::new(&mut bus, &mut delay, config(8));

    let result = smbus.read_byte(0x50, 0x00);
    assert_eq!(result, Err(SmbusError::Protocol { status: 0x04 }));
    assert_eq!(TransactionStatus::of(&result), TransactionStatus::ProtocolError(0x04));
    assert_eq!(result.unwrap_err().legacy_code(), -1);
    assert_eq!(smbus.last_phase(), Phase::Failed);
    drop(smbus);

    // The whole budget is still spent waiting.
    assert_eq!(mock.0.borrow().sts_reads, 8);
    assert_eq!(delay.spin_iterations, 8 * 0xFFFF);
}

#[test]
fn floating_bus_is_a_timeout() {
    let mut bus = IoPortBus::new();
    let mut smbus = IsaSmbus::new(&mut bus, NoDelay, config(4));

    let result = smbus.read_byte(0x50, 0x00);
    assert_eq!(result, Err(SmbusError::Timeout));
    assert_eq!(TransactionStatus::of(&result), TransactionStatus::Timeout);
    assert_eq!(smbus.last_phase(), Phase::TimedOut);
}

#[test]
fn window_at_top_of_port_space_wraps() {
    let mut bus = IoPortBus::new();
    let cfg = IsaSmbusConfig {
        io_base: 0xFFFC,
        ..config(2)
    };
    let mut smbus = IsaSmbus::new(&mut bus, NoDelay, cfg);

    assert_eq!(smbus.read_byte(0x50, 0x00), Err(SmbusError::Timeout));
    assert_eq!(smbus.write_byte(0x50, 0x00, 0x12), Err(SmbusError::Timeout));
}

#[test]
fn write_byte_preloads_data_with_direction_clear() {
    let mock = MockIsa::new(Some(1), 0x00);
    let mut bus = mock.attach();
    let mut smbus = IsaSmbus::new(&mut bus, CountingDelay::default(), config(16));

    assert_eq!(smbus.write_byte(0x2F, 0x10, 0x55), Ok(()));
    assert_eq!(smbus.last_phase(), Phase::Done);
    drop(smbus);

    assert_eq!(
        mock.0.borrow().log,
        vec![
            (STS, STS_CLEAR_ALL),
            (HOST_CNT, HOST_CNT_KILL),
            (ADDR, 0x5E),
            (CMD, 0x10),
            (BYTE, 0x55),
            (HOST_CNT, HOST_CNT_START_BYTE_DATA),
        ]
    );
}
