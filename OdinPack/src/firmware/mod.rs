//! Firmware bundle naming and file classification
//!
//! A vendor bundle `G960_XYZ_whatever.zip` carries a single inner tar payload
//! named `G960_XYZ_G960_HOME.tar.md5`. Only a handful of its members matter:
//! the bootloader components and the two modem images. This module knows
//! those names and how the derivative archives are named after the product
//! code.

mod bundle;
mod derivative;
mod members;

pub use bundle::FirmwareBundle;
pub use derivative::{DerivativeArchiveSpec, DerivativeKind};
pub use members::{
    BOOTLOADER_FILES, GSM_MODEM_FILE, LTE_MODEM_FILE, MODEM_FILES, MemberClass, known_member,
};
