//! Chipset bring-up for SiS761/SiS966 boards with an AMD K8 CPU.
//!
//! The pieces, bottom up:
//!
//! - [`patch`]: read-modify-write patch tables and the engine that applies them to any
//!   [`bringup_bus::RegisterWindow`].
//! - [`tables`]: the chipset's patch tables.
//! - [`sis966`]: the two bring-up stages and SMBus enable.
//! - [`romstage`]: the romstage sequence that runs the stages around RAM init.

pub mod config;
pub mod error;
pub mod ids;
pub mod patch;
pub mod romstage;
pub mod sis966;
pub mod tables;

pub use config::{ApertureSize, ChipsetConfig, MissingDevicePolicy, ShareMemorySize};
pub use error::{ChipsetError, Result};
pub use ids::{DeviceHandle, KnownDevice};
pub use patch::{apply_patch_table, PatchEntry, PatchTable, SentinelCheck};
pub use romstage::{NoHooks, Platform, RomstageConfig, RomstageExit, RomstageHooks};
pub use sis966::{Sis966, StageReport};
