use std::collections::HashMap;

/// Model-specific register reads.
pub trait Msr {
    fn read_msr(&mut self, index: u32) -> u64;
}

impl<T: Msr + ?Sized> Msr for &mut T {
    fn read_msr(&mut self, index: u32) -> u64 {
        (**self).read_msr(index)
    }
}

/// Fixed MSR values for host-side runs. Unknown indices read as zero.
#[derive(Debug, Clone, Default)]
pub struct TestMsr {
    values: HashMap<u32, u64>,
}

impl TestMsr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, index: u32, value: u64) -> Self {
        self.values.insert(index, value);
        self
    }

    pub fn set(&mut self, index: u32, value: u64) {
        self.values.insert(index, value);
    }
}

impl Msr for TestMsr {
    fn read_msr(&mut self, index: u32) -> u64 {
        self.values.get(&index).copied().unwrap_or(0)
    }
}
