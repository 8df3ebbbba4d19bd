//! Text rendering of a decoded BIOS Information record.
//!
//! Presentation only: everything here reads the typed record and trusts the
//! presence of optional fields as established by the decoder.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use super::{BiosInformation, GIB, KIB, MIB};

/// Display unit of a [`RomSize`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeUnit {
    /// Plain bytes
    Bytes,
    /// 1024 bytes
    Kilobytes,
    /// 1024 kB
    Megabytes,
    /// 1024 MB
    Gigabytes,
}

impl SizeUnit {
    /// Suffix printed after the value, empty for bytes
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Bytes => "",
            Self::Kilobytes => "kB",
            Self::Megabytes => "MB",
            Self::Gigabytes => "GB",
        }
    }
}

/// ROM size scaled to the largest binary unit that keeps it at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RomSize {
    /// Whole units, rounded down
    pub value: u64,
    /// Unit of `value`
    pub unit: SizeUnit,
}

impl RomSize {
    /// Scale a byte count
    pub fn from_bytes(bytes: u64) -> Self {
        let (value, unit) = if bytes < KIB {
            (bytes, SizeUnit::Bytes)
        } else if bytes < MIB {
            (bytes / KIB, SizeUnit::Kilobytes)
        } else if bytes < GIB {
            (bytes / MIB, SizeUnit::Megabytes)
        } else {
            (bytes / GIB, SizeUnit::Gigabytes)
        };

        Self { value, unit }
    }
}

impl fmt::Display for RomSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            SizeUnit::Bytes => write!(f, "{}", self.value),
            unit => write!(f, "{} {}", self.value, unit.suffix()),
        }
    }
}

/// Render a record as indented, human-readable text
pub fn summarize(info: &BiosInformation) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("{}", info.header()));
    lines.push(format!("\tVendor: {}", info.vendor()));
    lines.push(format!("\tVersion: {}", info.version()));
    lines.push(format!("\tRelease Date: {}", info.release_date()));

    if let Some(runtime_kb) = info.runtime_size_kb() {
        lines.push(format!("\tAddress: 0x{:04X}0", info.starting_address_segment()));
        lines.push(format!("\tRuntime Size: {} kB", runtime_kb));
    }

    lines.push(format!("\tROM Size: {}", info.rom_size()));

    lines.push(String::from("\tCharacteristics:"));
    let flags = info
        .characteristics()
        .descriptions()
        .into_iter()
        .chain(info.characteristics_ext1().descriptions())
        .chain(info.characteristics_ext2().descriptions());
    lines.extend(flags.map(|text| format!("\t\t{}", text)));

    if let Some(release) = info.system_bios_revision() {
        lines.push(format!("\tBIOS Revision: {}", release));
    }
    if let Some(release) = info.ec_firmware_revision() {
        lines.push(format!("\tFirmware Revision: {}", release));
    }

    lines.join("\n")
}
