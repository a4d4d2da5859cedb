use std::collections::BTreeMap;

/// Physical memory and memory-mapped register space.
///
/// Reads take `&mut self` because register reads may have side effects on real hardware.
pub trait MemoryBus {
    fn read_u8(&mut self, addr: u64) -> u8;
    fn write_u8(&mut self, addr: u64, value: u8);

    fn read_physical(&mut self, paddr: u64, buf: &mut [u8]) {
        for (i, out) in buf.iter_mut().enumerate() {
            *out = self.read_u8(paddr + i as u64);
        }
    }

    fn write_physical(&mut self, paddr: u64, buf: &[u8]) {
        for (i, &b) in buf.iter().enumerate() {
            self.write_u8(paddr + i as u64, b);
        }
    }

    fn read_u16(&mut self, addr: u64) -> u16 {
        let lo = self.read_u8(addr) as u16;
        let hi = self.read_u8(addr + 1) as u16;
        lo | (hi << 8)
    }

    fn write_u16(&mut self, addr: u64, value: u16) {
        self.write_u8(addr, (value & 0xFF) as u8);
        self.write_u8(addr + 1, (value >> 8) as u8);
    }

    fn read_u32(&mut self, addr: u64) -> u32 {
        let b0 = self.read_u8(addr) as u32;
        let b1 = self.read_u8(addr + 1) as u32;
        let b2 = self.read_u8(addr + 2) as u32;
        let b3 = self.read_u8(addr + 3) as u32;
        b0 | (b1 << 8) | (b2 << 16) | (b3 << 24)
    }

    fn write_u32(&mut self, addr: u64, value: u32) {
        self.write_u8(addr, (value & 0xFF) as u8);
        self.write_u8(addr + 1, ((value >> 8) & 0xFF) as u8);
        self.write_u8(addr + 2, ((value >> 16) & 0xFF) as u8);
        self.write_u8(addr + 3, ((value >> 24) & 0xFF) as u8);
    }
}

impl<T: MemoryBus + ?Sized> MemoryBus for &mut T {
    fn read_u8(&mut self, addr: u64) -> u8 {
        (**self).read_u8(addr)
    }

    fn write_u8(&mut self, addr: u64, value: u8) {
        (**self).write_u8(addr, value)
    }
}

/// Flat RAM starting at physical address 0.
#[derive(Debug, Clone)]
pub struct VecMemory {
    data: Vec<u8>,
}

impl VecMemory {
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size],
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

impl MemoryBus for VecMemory {
    fn read_u8(&mut self, addr: u64) -> u8 {
        self.data[addr as usize]
    }

    fn write_u8(&mut self, addr: u64, value: u8) {
        self.data[addr as usize] = value;
    }
}

/// Sparse byte store for register windows high in the physical address space (e.g. MCHBAR).
///
/// Unwritten bytes read as `0xFF`, like an undecoded MMIO access.
#[derive(Debug, Clone, Default)]
pub struct SparseMemory {
    bytes: BTreeMap<u64, u8>,
}

impl SparseMemory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MemoryBus for SparseMemory {
    fn read_u8(&mut self, addr: u64) -> u8 {
        self.bytes.get(&addr).copied().unwrap_or(0xFF)
    }

    fn write_u8(&mut self, addr: u64, value: u8) {
        self.bytes.insert(addr, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_memory_floats_high_until_written() {
        let mut mem = SparseMemory::new();
        assert_eq!(mem.read_u16(0xFED1_5D14), 0xFFFF);
        mem.write_u16(0xFED1_5D14, 0xCAFE);
        assert_eq!(mem.read_u16(0xFED1_5D14), 0xCAFE);
        assert_eq!(mem.read_u8(0xFED1_5D14), 0xFE);
    }
}
