//! Register offsets written directly by the stage sequencing (outside the patch tables).

use bitflags::bitflags;

/// I/O base the LPC bridge decodes the ACPI register block at.
pub const ACPI_IO_BASE: u16 = 0x800;

/// AMD K8 `TOP_MEM` MSR.
pub const MSR_TOP_MEM: u32 = 0xC001_001A;

// SiS761 host bridge.
pub const NB_GUI_CTRL: u8 = 0x4C;
pub const NB_GUI_ENABLE: u8 = 0x10;
/// Bits 7:5 of `NB_GUI_CTRL` hold the shared memory size code.
pub const NB_SHARE_SIZE_SHIFT: u8 = 5;
pub const NB_SHARE_SIZE_KEEP_MASK: u8 = 0x1F;
pub const NB_ACPI_CTRL: u8 = 0x7F;
pub const NB_ACPI_CTRL_VALUE: u8 = 0x08;
/// Top of system memory seen by the north bridge, in 64 KiB units.
pub const NB_TOP_MEM: u8 = 0x8E;
pub const NB_APERTURE: u8 = 0xB4;

// AMD K8 miscellaneous control function.
pub const K8_APERTURE_CTRL: u8 = 0x90;

// SiS966 LPC bridge.
pub const LPC_ACPI_SPACE_CTRL: u8 = 0x40;
pub const LPC_ACPI_SPACE_ENABLE: u8 = 0x80;
pub const LPC_ACPI_BASE: u8 = 0x74;
pub const LPC_SMBUS_CTRL: u8 = 0x76;
pub const LPC_SMBUS_ENABLE: u8 = 0x03;
pub const LPC_DEVICE_ENABLE_1: u8 = 0x77;
pub const LPC_DEVICE_ENABLE_2: u8 = 0x7C;
pub const LPC_AZALIA_CTRL: u8 = 0x7E;

// ACPI I/O block, relative to `ACPI_IO_BASE`.
pub const ACPI_AUTO_RESET: u8 = 0x56;
pub const ACPI_AUTO_RESET_ENABLE: u8 = 0x40;
pub const ACPI_AUDIO_SELECT: u8 = 0x78;
/// Set: HD audio (Azalia). Clear: AC97.
pub const ACPI_AUDIO_SELECT_HDA: u8 = 0x04;

// SiS1183 SATA controller.
pub const SATA_MODE: u8 = 0x90;
pub const SATA_MODE_KEEP_MASK: u8 = 0x3F;
pub const SATA_MODE_VALUE: u8 = 0x40;

/// Aperture size code to `NB_APERTURE` value.
pub const APERTURE_TABLE: [u16; 5] = [0x0F38, 0x0F30, 0x0F20, 0x0F00, 0x0E00];

bitflags! {
    /// LPC `0x77`, internal PCI device enable 1. Power-on value 0.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct LpcDeviceEnable1: u8 {
        /// USB A20M# event masked; required on K8.
        const MASK_USB_A20M = 1 << 1;
        const RESERVED_2 = 1 << 2;
        const KBC_PORT_ACCESS = 1 << 3;
        const USB_EMULATION = 1 << 5;
    }
}

bitflags! {
    /// LPC `0x7C`, internal PCI device enable 2. Every bit is a disable.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct LpcDeviceDisable2: u8 {
        const AC97 = 1 << 0;
        const MODEM = 1 << 1;
        const MAC = 1 << 2;
        const IDE = 1 << 3;
        const SATA = 1 << 4;
    }
}

bitflags! {
    /// LPC `0x7E`. Power-on value `0x08`.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct LpcAzaliaCtrl: u8 {
        const DISABLE = 1 << 3;
    }
}

/// Value programmed into `LPC_DEVICE_ENABLE_1`.
pub const LPC_DEVICE_ENABLE_1_VALUE: LpcDeviceEnable1 = LpcDeviceEnable1::MASK_USB_A20M
    .union(LpcDeviceEnable1::RESERVED_2)
    .union(LpcDeviceEnable1::KBC_PORT_ACCESS)
    .union(LpcDeviceEnable1::USB_EMULATION);

/// Value programmed into `LPC_DEVICE_ENABLE_2`: modem and AC97 off, everything else on.
pub const LPC_DEVICE_DISABLE_2_VALUE: LpcDeviceDisable2 =
    LpcDeviceDisable2::AC97.union(LpcDeviceDisable2::MODEM);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peripheral_enable_values() {
        assert_eq!(LPC_DEVICE_ENABLE_1_VALUE.bits(), 0x2E);
        assert_eq!(LPC_DEVICE_DISABLE_2_VALUE.bits(), 0x03);
        assert_eq!(LpcAzaliaCtrl::empty().bits(), 0x00);
    }
}
