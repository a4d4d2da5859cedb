use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Legacy x86 I/O port space.
///
/// Access sizes are 1, 2 or 4 bytes, matching the `in`/`out` instruction forms.
pub trait PortIo {
    fn read(&mut self, port: u16, size: u8) -> u32;
    fn write(&mut self, port: u16, size: u8, value: u32);

    fn read_u8(&mut self, port: u16) -> u8 {
        self.read(port, 1) as u8
    }

    fn read_u16(&mut self, port: u16) -> u16 {
        self.read(port, 2) as u16
    }

    fn read_u32(&mut self, port: u16) -> u32 {
        self.read(port, 4)
    }

    fn write_u8(&mut self, port: u16, value: u8) {
        self.write(port, 1, u32::from(value));
    }

    fn write_u16(&mut self, port: u16, value: u16) {
        self.write(port, 2, u32::from(value));
    }

    fn write_u32(&mut self, port: u16, value: u32) {
        self.write(port, 4, value);
    }
}

impl<T: PortIo + ?Sized> PortIo for &mut T {
    fn read(&mut self, port: u16, size: u8) -> u32 {
        (**self).read(port, size)
    }

    fn write(&mut self, port: u16, size: u8, value: u32) {
        (**self).write(port, size, value)
    }
}

/// A device model that can be attached to an [`IoPortBus`].
pub trait PortIoDevice {
    fn read(&mut self, port: u16, size: u8) -> u32;
    fn write(&mut self, port: u16, size: u8, value: u32);
}

struct RangeDevice {
    start: u16,
    len: u16,
    dev: Box<dyn PortIoDevice>,
}

impl RangeDevice {
    fn end_exclusive(&self) -> u32 {
        u32::from(self.start) + u32::from(self.len)
    }

    fn contains(&self, port: u16) -> bool {
        let p = u32::from(port);
        p >= u32::from(self.start) && p < self.end_exclusive()
    }
}

/// Host-side I/O port router used to stand in for real port I/O.
///
/// Exact-port handlers take precedence over range handlers. Unmapped reads float high and
/// unmapped writes are dropped, as on a PC bus with nothing decoding the port.
#[derive(Default)]
pub struct IoPortBus {
    devices: HashMap<u16, Box<dyn PortIoDevice>>,
    ranges: Vec<RangeDevice>,
}

impl IoPortBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, port: u16, device: Box<dyn PortIoDevice>) {
        self.devices.insert(port, device);
    }

    /// Registers a single device over a contiguous I/O port range.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero, the range wraps past `0xFFFF`, or it overlaps a range that is
    /// already registered.
    pub fn register_range(&mut self, start: u16, len: u16, dev: Box<dyn PortIoDevice>) {
        assert!(len != 0, "I/O port range length must be non-zero");

        let end_exclusive = u32::from(start) + u32::from(len);
        assert!(
            end_exclusive <= 0x1_0000,
            "I/O port range wraps past 0xFFFF: start={start:#x} len={len:#x}"
        );

        let idx = self.ranges.partition_point(|r| r.start < start);

        if let Some(prev) = self.ranges.get(idx.wrapping_sub(1)) {
            assert!(
                u32::from(start) >= prev.end_exclusive(),
                "overlapping I/O port ranges: new=[{start:#x}..{end_exclusive:#x}) prev=[{:#x}..{:#x})",
                prev.start,
                prev.end_exclusive()
            );
        }
        if let Some(next) = self.ranges.get(idx) {
            assert!(
                end_exclusive <= u32::from(next.start),
                "overlapping I/O port ranges: new=[{start:#x}..{end_exclusive:#x}) next=[{:#x}..{:#x})",
                next.start,
                next.end_exclusive()
            );
        }

        self.ranges.insert(idx, RangeDevice { start, len, dev });
    }

    fn find_range_index(&self, port: u16) -> Option<usize> {
        let idx = self.ranges.partition_point(|r| r.start <= port);
        if idx == 0 {
            return None;
        }
        let cand = idx - 1;
        self.ranges
            .get(cand)
            .is_some_and(|r| r.contains(port))
            .then_some(cand)
    }

    fn device_for(&mut self, port: u16) -> Option<&mut Box<dyn PortIoDevice>> {
        if self.devices.contains_key(&port) {
            return self.devices.get_mut(&port);
        }
        let idx = self.find_range_index(port)?;
        self.ranges.get_mut(idx).map(|r| &mut r.dev)
    }
}

impl PortIo for IoPortBus {
    fn read(&mut self, port: u16, size: u8) -> u32 {
        if !matches!(size, 1 | 2 | 4) {
            return 0xFFFF_FFFF;
        }
        match self.device_for(port) {
            Some(dev) => dev.read(port, size),
            None => match size {
                1 => 0xFF,
                2 => 0xFFFF,
                _ => 0xFFFF_FFFF,
            },
        }
    }

    fn write(&mut self, port: u16, size: u8, value: u32) {
        if !matches!(size, 1 | 2 | 4) {
            return;
        }
        if let Some(dev) = self.device_for(port) {
            dev.write(port, size, value);
        }
    }
}

/// Plain byte-addressable register file over a port range.
///
/// Clones share the same backing bytes, so a test can keep one handle while the other sits on
/// an [`IoPortBus`].
#[derive(Debug, Clone)]
pub struct PortRam {
    base: u16,
    bytes: Rc<RefCell<Vec<u8>>>,
}

impl PortRam {
    pub fn new(base: u16, len: u16) -> Self {
        Self {
            base,
            bytes: Rc::new(RefCell::new(vec![0; usize::from(len)])),
        }
    }

    pub fn base(&self) -> u16 {
        self.base
    }

    pub fn len(&self) -> u16 {
        self.bytes.borrow().len() as u16
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.borrow().is_empty()
    }

    /// Reads the byte behind absolute `port` without going through a bus.
    ///
    /// # Panics
    ///
    /// Panics if `port` is outside the range.
    pub fn peek(&self, port: u16) -> u8 {
        self.bytes.borrow()[self.index(port)]
    }

    /// Sets the byte behind absolute `port` without going through a bus.
    pub fn poke(&self, port: u16, value: u8) {
        let idx = self.index(port);
        self.bytes.borrow_mut()[idx] = value;
    }

    /// Registers a clone of this register file on `bus` over its whole range.
    pub fn attach(&self, bus: &mut IoPortBus) {
        bus.register_range(self.base, self.len(), Box::new(self.clone()));
    }

    fn index(&self, port: u16) -> usize {
        let idx = usize::from(port.wrapping_sub(self.base));
        assert!(
            idx < self.bytes.borrow().len(),
            "port {port:#06x} outside [{:#06x}..+{:#x})",
            self.base,
            self.bytes.borrow().len()
        );
        idx
    }
}

impl PortIoDevice for PortRam {
    fn read(&mut self, port: u16, size: u8) -> u32 {
        let bytes = self.bytes.borrow();
        let mut value = 0u32;
        for i in 0..usize::from(size) {
            let idx = usize::from(port.wrapping_sub(self.base)) + i;
            let byte = bytes.get(idx).copied().unwrap_or(0xFF);
            value |= u32::from(byte) << (i * 8);
        }
        value
    }

    fn write(&mut self, port: u16, size: u8, value: u32) {
        let mut bytes = self.bytes.borrow_mut();
        for i in 0..usize::from(size) {
            let idx = usize::from(port.wrapping_sub(self.base)) + i;
            if let Some(slot) = bytes.get_mut(idx) {
                *slot = (value >> (i * 8)) as u8;
            }
        }
    }
}
