use bringup_bus::PciVendorDeviceId;
use bringup_smbus::SmbusError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChipsetError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChipsetError {
    #[error("{name} ({id}) not found on PCI")]
    DeviceNotFound {
        name: &'static str,
        id: PciVendorDeviceId,
    },

    #[error("invalid shared memory size code {0:#04x}")]
    InvalidShareMemorySize(u8),

    #[error("invalid aperture size code {0:#04x}")]
    InvalidApertureSize(u8),

    #[error(transparent)]
    Smbus(#[from] SmbusError),
}
