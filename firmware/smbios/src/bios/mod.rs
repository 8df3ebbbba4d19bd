//! # BIOS Information (Type 0)
//!
//! Decoder for the BIOS Information structure defined in DSP0134 7.1.
//!
//! The formatted area grew across SMBIOS revisions. Only the first 0x12 bytes
//! are mandatory; every later field is read only when the declared length
//! covers it and is `None` otherwise:
//!
//! | Length  | Fields gained                          | Revision |
//! |---------|----------------------------------------|----------|
//! | `0x12`  | vendor .. characteristics              | 2.0      |
//! | `0x13`  | characteristics extension byte 1       | 2.1      |
//! | `0x14`  | characteristics extension byte 2       | 2.3      |
//! | `0x16`  | system BIOS release                    | 2.4      |
//! | `0x18`  | embedded controller firmware release   | 2.4      |
//! | `0x1A`  | extended BIOS ROM size                 | 3.1      |

pub mod characteristics;
pub mod summary;

use alloc::string::String;
use core::fmt;

use log::{debug, trace, warn};
use static_assertions::const_assert_eq;

use crate::header::{structure_type, RawRecord, StructureHeader};
use crate::strings::StringResolver;
use crate::{SmbiosError, SmbiosResult};

pub use characteristics::{BiosCharacteristics, BiosCharacteristicsExt1, BiosCharacteristicsExt2};
pub use summary::{summarize, RomSize, SizeUnit};

// =============================================================================
// LAYOUT
// =============================================================================

/// Field offsets within the formatted area
pub mod offset {
    pub const VENDOR: usize = 0x04;
    pub const VERSION: usize = 0x05;
    pub const STARTING_ADDRESS_SEGMENT: usize = 0x06;
    pub const RELEASE_DATE: usize = 0x08;
    pub const ROM_SIZE: usize = 0x09;
    pub const CHARACTERISTICS: usize = 0x0A;
    pub const CHARACTERISTICS_EXT1: usize = 0x12;
    pub const CHARACTERISTICS_EXT2: usize = 0x13;
    pub const SYSTEM_BIOS_MAJOR: usize = 0x14;
    pub const SYSTEM_BIOS_MINOR: usize = 0x15;
    pub const EC_FIRMWARE_MAJOR: usize = 0x16;
    pub const EC_FIRMWARE_MINOR: usize = 0x17;
    pub const EXTENDED_ROM_SIZE: usize = 0x18;
}

/// Declared length needed before a field may be read
pub mod min_length {
    pub const BASE: usize = 0x12;
    pub const CHARACTERISTICS_EXT1: usize = 0x13;
    pub const CHARACTERISTICS_EXT2: usize = 0x14;
    pub const SYSTEM_BIOS_RELEASE: usize = 0x16;
    pub const EC_FIRMWARE_RELEASE: usize = 0x18;
    pub const EXTENDED_ROM_SIZE: usize = 0x1A;
}

const_assert_eq!(offset::CHARACTERISTICS + 8, min_length::BASE);
const_assert_eq!(offset::CHARACTERISTICS_EXT1 + 1, min_length::CHARACTERISTICS_EXT1);
const_assert_eq!(offset::CHARACTERISTICS_EXT2 + 1, min_length::CHARACTERISTICS_EXT2);
const_assert_eq!(offset::SYSTEM_BIOS_MINOR + 1, min_length::SYSTEM_BIOS_RELEASE);
const_assert_eq!(offset::EC_FIRMWARE_MINOR + 1, min_length::EC_FIRMWARE_RELEASE);
const_assert_eq!(offset::EXTENDED_ROM_SIZE + 2, min_length::EXTENDED_ROM_SIZE);

/// ROM size byte meaning "see extended ROM size"
pub const ROM_SIZE_EXTENDED: u8 = 0xFF;

/// Release major byte meaning "not supported"
pub const RELEASE_NOT_SUPPORTED: u8 = 0xFF;

/// Extended ROM size assumed when a short record uses [`ROM_SIZE_EXTENDED`]
///
/// Unit bits 00 with magnitude 16, i.e. 16 MB.
pub const EXTENDED_ROM_SIZE_FALLBACK: u16 = 0x0010;

/// Placeholder for string index 0
pub const NOT_SPECIFIED: &str = "Not Specified";

/// Placeholder for a string index past the end of the pool
pub const BAD_INDEX: &str = "<BAD INDEX>";

const KIB: u64 = 1024;
const MIB: u64 = 1024 * KIB;
const GIB: u64 = 1024 * MIB;

/// Granularity of the legacy ROM size byte
const ROM_SIZE_GRANULARITY: u64 = 64 * KIB;

// =============================================================================
// RECORD
// =============================================================================

/// Major/minor release pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BiosRelease {
    /// Major release
    pub major: u8,
    /// Minor release
    pub minor: u8,
}

impl BiosRelease {
    /// Create a release pair
    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }

    /// Whether the major byte carries a real value
    pub const fn is_supported(&self) -> bool {
        self.major != RELEASE_NOT_SUPPORTED
    }
}

impl fmt::Display for BiosRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Decoded BIOS Information structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BiosInformation {
    header: StructureHeader,
    vendor: String,
    version: String,
    starting_address_segment: u16,
    release_date: String,
    rom_size: u8,
    characteristics: BiosCharacteristics,
    characteristics_ext1: BiosCharacteristicsExt1,
    characteristics_ext2: BiosCharacteristicsExt2,
    system_bios_release: Option<BiosRelease>,
    ec_firmware_release: Option<BiosRelease>,
    extended_rom_size: Option<u16>,
}

impl BiosInformation {
    /// Header of the structure this record was decoded from
    pub fn header(&self) -> StructureHeader {
        self.header
    }

    /// Declared length of the formatted area
    pub fn length(&self) -> u8 {
        self.header.length
    }

    /// BIOS vendor
    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    /// BIOS version
    pub fn version(&self) -> &str {
        &self.version
    }

    /// BIOS release date
    pub fn release_date(&self) -> &str {
        &self.release_date
    }

    /// Segment of the BIOS starting address, 0 if not applicable
    pub fn starting_address_segment(&self) -> u16 {
        self.starting_address_segment
    }

    /// Raw ROM size byte
    pub fn rom_size_field(&self) -> u8 {
        self.rom_size
    }

    /// BIOS characteristics
    pub fn characteristics(&self) -> BiosCharacteristics {
        self.characteristics
    }

    /// Characteristics extension byte 1, empty if the record is too short
    pub fn characteristics_ext1(&self) -> BiosCharacteristicsExt1 {
        self.characteristics_ext1
    }

    /// Characteristics extension byte 2, empty if the record is too short
    pub fn characteristics_ext2(&self) -> BiosCharacteristicsExt2 {
        self.characteristics_ext2
    }

    /// Raw system BIOS release bytes, if the record carries them
    pub fn system_bios_release(&self) -> Option<BiosRelease> {
        self.system_bios_release
    }

    /// Raw embedded controller firmware release bytes, if the record carries them
    pub fn ec_firmware_release(&self) -> Option<BiosRelease> {
        self.ec_firmware_release
    }

    /// Raw extended ROM size word, if the record carries it
    pub fn extended_rom_size(&self) -> Option<u16> {
        self.extended_rom_size
    }

    /// System BIOS revision, without the "not supported" sentinel
    pub fn system_bios_revision(&self) -> Option<BiosRelease> {
        self.system_bios_release.filter(BiosRelease::is_supported)
    }

    /// Embedded controller firmware revision, without the "not supported" sentinel
    pub fn ec_firmware_revision(&self) -> Option<BiosRelease> {
        self.ec_firmware_release.filter(BiosRelease::is_supported)
    }

    /// Runtime size in kB of the BIOS image below 1 MB
    ///
    /// `None` when the starting address segment is not applicable.
    pub fn runtime_size_kb(&self) -> Option<u32> {
        if self.starting_address_segment == 0 {
            return None;
        }

        Some(((0x10000 - u32::from(self.starting_address_segment)) << 4) / 1024)
    }

    /// ROM size in bytes
    pub fn rom_size_bytes(&self) -> u64 {
        if self.rom_size != ROM_SIZE_EXTENDED {
            return ROM_SIZE_GRANULARITY * (u64::from(self.rom_size) + 1);
        }

        let extended = self.extended_rom_size.unwrap_or(EXTENDED_ROM_SIZE_FALLBACK);
        let magnitude = u64::from(extended & 0x3FFF);
        magnitude * extended_unit_multiplier(extended)
    }

    /// ROM size scaled for display
    pub fn rom_size(&self) -> RomSize {
        RomSize::from_bytes(self.rom_size_bytes())
    }
}

impl fmt::Display for BiosInformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&summarize(self))
    }
}

/// Byte multiplier for the unit bits (14-15) of an extended ROM size
///
/// Reserved unit codes count the magnitude in bytes.
fn extended_unit_multiplier(extended: u16) -> u64 {
    match extended >> 14 {
        0 => MIB,
        1 => GIB,
        _ => 1,
    }
}

// =============================================================================
// DECODER
// =============================================================================

/// Decode a BIOS Information record, resolving strings from its own pool
pub fn decode(raw: &RawRecord<'_>) -> SmbiosResult<BiosInformation> {
    decode_with(raw, raw.strings())
}

/// Decode a BIOS Information record with an external string resolver
pub fn decode_with<S>(raw: &RawRecord<'_>, strings: &S) -> SmbiosResult<BiosInformation>
where
    S: StringResolver + ?Sized,
{
    let header = raw.header();
    if header.structure_type != structure_type::BIOS_INFORMATION {
        return Err(SmbiosError::WrongType {
            found: header.structure_type,
        });
    }

    let length = header.length as usize;
    if length < min_length::BASE {
        return Err(SmbiosError::TruncatedRecord {
            length: header.length,
        });
    }

    let truncated = SmbiosError::TruncatedRecord {
        length: header.length,
    };
    let vendor = raw.read_u8(offset::VENDOR).ok_or(truncated)?;
    let version = raw.read_u8(offset::VERSION).ok_or(truncated)?;
    let starting_address_segment = raw
        .read_u16(offset::STARTING_ADDRESS_SEGMENT)
        .ok_or(truncated)?;
    let release_date = raw.read_u8(offset::RELEASE_DATE).ok_or(truncated)?;
    let rom_size = raw.read_u8(offset::ROM_SIZE).ok_or(truncated)?;
    let characteristics = raw.read_u64(offset::CHARACTERISTICS).ok_or(truncated)?;

    let characteristics_ext1 = gated(raw, min_length::CHARACTERISTICS_EXT1, "characteristics extension 1")
        .and_then(|raw| raw.read_u8(offset::CHARACTERISTICS_EXT1))
        .unwrap_or(0);
    let characteristics_ext2 = gated(raw, min_length::CHARACTERISTICS_EXT2, "characteristics extension 2")
        .and_then(|raw| raw.read_u8(offset::CHARACTERISTICS_EXT2))
        .unwrap_or(0);
    let system_bios_release = gated(raw, min_length::SYSTEM_BIOS_RELEASE, "system BIOS release")
        .and_then(|raw| read_release(raw, offset::SYSTEM_BIOS_MAJOR, offset::SYSTEM_BIOS_MINOR));
    let ec_firmware_release = gated(raw, min_length::EC_FIRMWARE_RELEASE, "EC firmware release")
        .and_then(|raw| read_release(raw, offset::EC_FIRMWARE_MAJOR, offset::EC_FIRMWARE_MINOR));
    let extended_rom_size = gated(raw, min_length::EXTENDED_ROM_SIZE, "extended ROM size")
        .and_then(|raw| raw.read_u16(offset::EXTENDED_ROM_SIZE));

    if rom_size == ROM_SIZE_EXTENDED {
        match extended_rom_size {
            Some(extended) if extended >> 14 > 1 => {
                warn!(
                    "SMBIOS: reserved unit {} in extended ROM size 0x{:04X}",
                    extended >> 14,
                    extended
                );
            }
            None => {
                trace!("SMBIOS: extended ROM size absent, assuming 16 MB");
            }
            _ => {}
        }
    }

    let info = BiosInformation {
        header,
        vendor: resolve_text(strings, vendor),
        version: resolve_text(strings, version),
        starting_address_segment,
        release_date: resolve_text(strings, release_date),
        rom_size,
        characteristics: BiosCharacteristics::from_bits_retain(characteristics),
        characteristics_ext1: BiosCharacteristicsExt1::from_bits_retain(characteristics_ext1),
        characteristics_ext2: BiosCharacteristicsExt2::from_bits_retain(characteristics_ext2),
        system_bios_release,
        ec_firmware_release,
        extended_rom_size,
    };

    debug!(
        "SMBIOS: decoded BIOS Information (handle=0x{:04X}, {} bytes)",
        header.handle, header.length
    );

    Ok(info)
}

/// Pass the record through only if its declared length covers a field
fn gated<'r, 'a>(raw: &'r RawRecord<'a>, min: usize, field: &str) -> Option<&'r RawRecord<'a>> {
    if (raw.length() as usize) < min {
        trace!(
            "SMBIOS: {} absent ({} byte structure, needs {})",
            field,
            raw.length(),
            min
        );
        return None;
    }

    Some(raw)
}

fn read_release(raw: &RawRecord<'_>, major: usize, minor: usize) -> Option<BiosRelease> {
    Some(BiosRelease::new(raw.read_u8(major)?, raw.read_u8(minor)?))
}

fn resolve_text<S>(strings: &S, index: u8) -> String
where
    S: StringResolver + ?Sized,
{
    if index == 0 {
        return String::from(NOT_SPECIFIED);
    }

    match strings.resolve(index) {
        Some(text) => String::from(text.trim()),
        None => {
            warn!("SMBIOS: string index {} out of range", index);
            String::from(BAD_INDEX)
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
