use crate::error::ChipsetError;

/// Integrated graphics frame buffer carved out of the top of system memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum ShareMemorySize {
    None = 0x00,
    #[default]
    Mb32 = 0x02,
    Mb64 = 0x03,
    Mb128 = 0x04,
}

impl ShareMemorySize {
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn megabytes(self) -> u32 {
        match self {
            ShareMemorySize::None => 0,
            ShareMemorySize::Mb32 => 32,
            ShareMemorySize::Mb64 => 64,
            ShareMemorySize::Mb128 => 128,
        }
    }
}

impl TryFrom<u8> for ShareMemorySize {
    type Error = ChipsetError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0x00 => Ok(ShareMemorySize::None),
            0x02 => Ok(ShareMemorySize::Mb32),
            0x03 => Ok(ShareMemorySize::Mb64),
            0x04 => Ok(ShareMemorySize::Mb128),
            _ => Err(ChipsetError::InvalidShareMemorySize(code)),
        }
    }
}

/// AGP/GART aperture size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum ApertureSize {
    Mb32 = 0x00,
    #[default]
    Mb64 = 0x01,
    Mb128 = 0x02,
    Mb256 = 0x03,
    Mb512 = 0x04,
}

impl ApertureSize {
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn megabytes(self) -> u32 {
        32 << (self as u32)
    }
}

impl TryFrom<u8> for ApertureSize {
    type Error = ChipsetError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0x00 => Ok(ApertureSize::Mb32),
            0x01 => Ok(ApertureSize::Mb64),
            0x02 => Ok(ApertureSize::Mb128),
            0x03 => Ok(ApertureSize::Mb256),
            0x04 => Ok(ApertureSize::Mb512),
            _ => Err(ChipsetError::InvalidApertureSize(code)),
        }
    }
}

/// What a stage does when one of its devices does not answer on PCI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingDevicePolicy {
    /// Warn and skip the steps that need the device. An absent function on this board means a
    /// disabled option, not a fault.
    #[default]
    Skip,
    /// Fail the stage with [`ChipsetError::DeviceNotFound`] at the first step that needs it.
    Abort,
}

#[derive(Debug, Clone)]
pub struct ChipsetConfig {
    pub share_memory: ShareMemorySize,
    pub aperture: ApertureSize,
    pub missing_device: MissingDevicePolicy,
    /// Apply the SiS1183 defaults table before setting the SATA mode.
    pub program_sata_defaults: bool,
}

impl Default for ChipsetConfig {
    fn default() -> Self {
        Self {
            share_memory: ShareMemorySize::Mb32,
            aperture: ApertureSize::Mb64,
            missing_device: MissingDevicePolicy::Skip,
            program_sata_defaults: false,
        }
    }
}
