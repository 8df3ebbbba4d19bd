//! SMBIOS structure header and raw record framing.

use core::fmt;

use crate::strings::StringTable;
use crate::{SmbiosError, SmbiosResult};

// =============================================================================
// STRUCTURE HEADER
// =============================================================================

/// SMBIOS structure header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructureHeader {
    /// Structure type
    pub structure_type: u8,
    /// Length of the formatted area, header included
    pub length: u8,
    /// Handle
    pub handle: u16,
}

impl StructureHeader {
    /// Size
    pub const SIZE: usize = 4;

    /// Parse from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }

        Some(Self {
            structure_type: bytes[0],
            length: bytes[1],
            handle: u16::from_le_bytes([bytes[2], bytes[3]]),
        })
    }
}

impl fmt::Display for StructureHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Handle 0x{:04X}, DMI type {}, {} bytes\n{}",
            self.handle,
            self.structure_type,
            self.length,
            structure_type::name(self.structure_type)
        )
    }
}

// =============================================================================
// STRUCTURE TYPES
// =============================================================================

/// SMBIOS structure types
pub mod structure_type {
    pub const BIOS_INFORMATION: u8 = 0;
    pub const SYSTEM_INFORMATION: u8 = 1;
    pub const BASEBOARD_INFORMATION: u8 = 2;
    pub const SYSTEM_ENCLOSURE: u8 = 3;
    pub const PROCESSOR_INFORMATION: u8 = 4;
    pub const CACHE_INFORMATION: u8 = 7;
    pub const SYSTEM_SLOTS: u8 = 9;
    pub const OEM_STRINGS: u8 = 11;
    pub const PHYSICAL_MEMORY_ARRAY: u8 = 16;
    pub const MEMORY_DEVICE: u8 = 17;
    pub const SYSTEM_BOOT_INFORMATION: u8 = 32;
    pub const INACTIVE: u8 = 126;
    pub const END_OF_TABLE: u8 = 127;

    /// Human-readable name of a structure type
    pub fn name(structure_type: u8) -> &'static str {
        match structure_type {
            BIOS_INFORMATION => "BIOS Information",
            SYSTEM_INFORMATION => "System Information",
            BASEBOARD_INFORMATION => "Base Board Information",
            SYSTEM_ENCLOSURE => "Chassis Information",
            PROCESSOR_INFORMATION => "Processor Information",
            CACHE_INFORMATION => "Cache Information",
            SYSTEM_SLOTS => "System Slots",
            OEM_STRINGS => "OEM Strings",
            PHYSICAL_MEMORY_ARRAY => "Physical Memory Array",
            MEMORY_DEVICE => "Memory Device",
            SYSTEM_BOOT_INFORMATION => "System Boot Information",
            INACTIVE => "Inactive",
            END_OF_TABLE => "End Of Table",
            0x80..=0xFF => "OEM-specific Type",
            _ => "Unknown Type",
        }
    }
}

// =============================================================================
// RAW RECORD
// =============================================================================

/// One SMBIOS structure as handed over by a table source
///
/// The formatted area always holds at least `header.length` bytes, so the
/// declared length can be trusted as the count of readable bytes.
#[derive(Debug, Clone)]
pub struct RawRecord<'a> {
    header: StructureHeader,
    data: &'a [u8],
    strings: StringTable<'a>,
}

impl<'a> RawRecord<'a> {
    /// Build a record from its formatted area and string pool
    ///
    /// Bytes of `formatted` beyond the declared length are dropped.
    pub fn new(formatted: &'a [u8], strings: &'a [u8]) -> SmbiosResult<Self> {
        let header = StructureHeader::from_bytes(formatted).ok_or(SmbiosError::InvalidStructure)?;
        let length = header.length as usize;
        if length < StructureHeader::SIZE || formatted.len() < length {
            return Err(SmbiosError::InvalidStructure);
        }

        Ok(Self {
            header,
            data: &formatted[..length],
            strings: StringTable::new(strings),
        })
    }

    /// Split the first structure off a structure table
    ///
    /// Returns the record and the bytes following its string pool.
    pub fn parse(bytes: &'a [u8]) -> SmbiosResult<(Self, &'a [u8])> {
        let header = StructureHeader::from_bytes(bytes).ok_or(SmbiosError::InvalidStructure)?;
        let structure_end = header.length as usize;
        if structure_end < StructureHeader::SIZE || structure_end > bytes.len() {
            return Err(SmbiosError::InvalidStructure);
        }

        // String pool ends with a double null
        let mut string_end = structure_end;
        loop {
            if string_end + 1 >= bytes.len() {
                return Err(SmbiosError::InvalidStructure);
            }
            if bytes[string_end] == 0 && bytes[string_end + 1] == 0 {
                string_end += 2;
                break;
            }
            string_end += 1;
        }

        let record = Self::new(&bytes[..structure_end], &bytes[structure_end..string_end])?;
        Ok((record, &bytes[string_end..]))
    }

    /// Structure header
    pub fn header(&self) -> StructureHeader {
        self.header
    }

    /// Structure type tag
    pub fn structure_type(&self) -> u8 {
        self.header.structure_type
    }

    /// Declared length of the formatted area
    pub fn length(&self) -> u8 {
        self.header.length
    }

    /// Formatted area, exactly `length()` bytes
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// String pool following the formatted area
    pub fn strings(&self) -> &StringTable<'a> {
        &self.strings
    }

    /// Byte at `offset`, if it lies inside the declared length
    pub fn read_u8(&self, offset: usize) -> Option<u8> {
        self.data.get(offset).copied()
    }

    /// Little-endian word at `offset`, if it lies inside the declared length
    pub fn read_u16(&self, offset: usize) -> Option<u16> {
        let bytes = self.data.get(offset..offset + 2)?;
        Some(u16::from_le_bytes(bytes.try_into().ok()?))
    }

    /// Little-endian quad word at `offset`, if it lies inside the declared length
    pub fn read_u64(&self, offset: usize) -> Option<u64> {
        let bytes = self.data.get(offset..offset + 8)?;
        Some(u64::from_le_bytes(bytes.try_into().ok()?))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_from_bytes() {
        let header = StructureHeader::from_bytes(&[0x00, 0x1A, 0x34, 0x12]).unwrap();
        assert_eq!(header.structure_type, structure_type::BIOS_INFORMATION);
        assert_eq!(header.length, 0x1A);
        assert_eq!(header.handle, 0x1234);

        assert!(StructureHeader::from_bytes(&[0x00, 0x1A, 0x34]).is_none());
    }

    #[test]
    fn test_header_display() {
        let header = StructureHeader {
            structure_type: 0,
            length: 24,
            handle: 0,
        };
        assert_eq!(
            header.to_string(),
            "Handle 0x0000, DMI type 0, 24 bytes\nBIOS Information"
        );
    }

    #[test]
    fn test_structure_type_names() {
        assert_eq!(structure_type::name(1), "System Information");
        assert_eq!(structure_type::name(0x85), "OEM-specific Type");
        assert_eq!(structure_type::name(100), "Unknown Type");
    }

    #[test]
    fn test_new_trims_to_declared_length() {
        let formatted = [0x00, 0x05, 0x00, 0x00, 0xAA, 0xBB, 0xCC];
        let record = RawRecord::new(&formatted, b"\0\0").unwrap();
        assert_eq!(record.data().len(), 5);
        assert_eq!(record.read_u8(4), Some(0xAA));
        assert_eq!(record.read_u8(5), None);
        assert_eq!(record.read_u16(4), None);
    }

    #[test]
    fn test_new_rejects_short_buffer() {
        let formatted = [0x00, 0x12, 0x00, 0x00];
        assert_eq!(
            RawRecord::new(&formatted, b"\0\0").unwrap_err(),
            SmbiosError::InvalidStructure
        );
        assert_eq!(
            RawRecord::new(&[0x00, 0x02], b"\0\0").unwrap_err(),
            SmbiosError::InvalidStructure
        );
    }

    #[test]
    fn test_parse_splits_string_pool() {
        let table = [
            0x01, 0x05, 0x02, 0x00, 0x01, b'A', b'B', 0x00, 0x00, // first
            0x7F, 0x04, 0x03, 0x00, 0x00, 0x00, // end of table
        ];

        let (record, rest) = RawRecord::parse(&table).unwrap();
        assert_eq!(record.structure_type(), structure_type::SYSTEM_INFORMATION);
        assert_eq!(record.header().handle, 2);
        assert_eq!(record.strings().get(1), Some("AB"));

        let (end, rest) = RawRecord::parse(rest).unwrap();
        assert_eq!(end.structure_type(), structure_type::END_OF_TABLE);
        assert!(rest.is_empty());
    }

    #[test]
    fn test_parse_missing_terminator() {
        let table = [0x01, 0x04, 0x00, 0x00, b'A', 0x00];
        assert!(RawRecord::parse(&table).is_err());
    }

    #[test]
    fn test_read_little_endian() {
        let formatted = [
            0x00, 0x0E, 0x00, 0x00, 0x34, 0x12, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08,
        ];
        let record = RawRecord::new(&formatted, b"\0\0").unwrap();
        assert_eq!(record.read_u16(4), Some(0x1234));
        assert_eq!(record.read_u64(6), Some(0x0807_0605_0403_0201));
        assert_eq!(record.read_u64(7), None);
    }
}
