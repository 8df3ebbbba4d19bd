//! BIOS characteristics flag vectors (DSP0134 7.1.1, 7.1.2.1, 7.1.2.2).
//!
//! Each vector carries a table of `(flag, description)` pairs ordered from
//! bit 0 upwards. [`describe`] walks such a table, so descriptions always come
//! out least-significant bit first. Bits without a table entry are kept in the
//! value but never described.

use alloc::vec::Vec;

use bitflags::{bitflags, Flags};

bitflags! {
    /// BIOS characteristics (offset 0x0A)
    ///
    /// Bits 32-47 are reserved for the BIOS vendor and bits 48-63 for the
    /// system vendor.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BiosCharacteristics: u64 {
        const RESERVED = 1 << 0;
        const RESERVED2 = 1 << 1;
        const UNKNOWN = 1 << 2;
        const NOT_SUPPORTED = 1 << 3;
        const ISA_SUPPORTED = 1 << 4;
        const MCA_SUPPORTED = 1 << 5;
        const EISA_SUPPORTED = 1 << 6;
        const PCI_SUPPORTED = 1 << 7;
        const PCMCIA_SUPPORTED = 1 << 8;
        const PNP_SUPPORTED = 1 << 9;
        const APM_SUPPORTED = 1 << 10;
        const UPGRADEABLE = 1 << 11;
        const SHADOWING_ALLOWED = 1 << 12;
        const VL_VESA_SUPPORTED = 1 << 13;
        const ESCD_SUPPORTED = 1 << 14;
        const CD_BOOT_SUPPORTED = 1 << 15;
        const SELECTABLE_BOOT = 1 << 16;
        const ROM_SOCKETED = 1 << 17;
        const PCMCIA_BOOT = 1 << 18;
        const EDD_SUPPORTED = 1 << 19;
        const JAPANESE_FLOPPY_NEC = 1 << 20;
        const JAPANESE_FLOPPY_TOSHIBA = 1 << 21;
        const FLOPPY_360K = 1 << 22;
        const FLOPPY_1_2M = 1 << 23;
        const FLOPPY_720K = 1 << 24;
        const FLOPPY_2_88M = 1 << 25;
        const PRINT_SCREEN = 1 << 26;
        const KEYBOARD_8042 = 1 << 27;
        const SERIAL_SERVICES = 1 << 28;
        const PRINTER_SERVICES = 1 << 29;
        const CGA_MONO_VIDEO = 1 << 30;
        const NEC_PC98 = 1 << 31;
    }
}

bitflags! {
    /// BIOS characteristics extension byte 1 (offset 0x12)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BiosCharacteristicsExt1: u8 {
        const ACPI = 1 << 0;
        const USB_LEGACY = 1 << 1;
        const AGP = 1 << 2;
        const I2O_BOOT = 1 << 3;
        const LS120_BOOT = 1 << 4;
        const ATAPI_ZIP_BOOT = 1 << 5;
        const IEEE_1394_BOOT = 1 << 6;
        const SMART_BATTERY = 1 << 7;
    }
}

bitflags! {
    /// BIOS characteristics extension byte 2 (offset 0x13)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BiosCharacteristicsExt2: u8 {
        const BIOS_BOOT_SPEC = 1 << 0;
        const FUNCTION_KEY_NETWORK_BOOT = 1 << 1;
        const TARGETED_CONTENT_DIST = 1 << 2;
        const UEFI_SUPPORTED = 1 << 3;
        const VIRTUAL_MACHINE = 1 << 4;
    }
}

/// Describe the flags set in `value`, in table order
pub fn describe<F>(value: F, table: &[(F, &'static str)]) -> Vec<&'static str>
where
    F: Flags + Copy,
{
    table
        .iter()
        .filter(|(flag, _)| value.contains(*flag))
        .map(|(_, text)| *text)
        .collect()
}

impl BiosCharacteristics {
    /// Descriptions of the defined bits, bit 0 first
    pub const DESCRIPTIONS: &'static [(Self, &'static str)] = &[
        (Self::RESERVED, "Reserved"),
        (Self::RESERVED2, "Reserved"),
        (Self::UNKNOWN, "Unknown"),
        (Self::NOT_SUPPORTED, "BIOS characteristics not supported"),
        (Self::ISA_SUPPORTED, "ISA is supported"),
        (Self::MCA_SUPPORTED, "MCA is supported"),
        (Self::EISA_SUPPORTED, "EISA is supported"),
        (Self::PCI_SUPPORTED, "PCI is supported"),
        (Self::PCMCIA_SUPPORTED, "PC Card (PCMCIA) is supported"),
        (Self::PNP_SUPPORTED, "PNP is supported"),
        (Self::APM_SUPPORTED, "APM is supported"),
        (Self::UPGRADEABLE, "BIOS is upgradeable"),
        (Self::SHADOWING_ALLOWED, "BIOS shadowing is allowed"),
        (Self::VL_VESA_SUPPORTED, "VLB is supported"),
        (Self::ESCD_SUPPORTED, "ESCD support is available"),
        (Self::CD_BOOT_SUPPORTED, "Boot from CD is supported"),
        (Self::SELECTABLE_BOOT, "Selectable boot is supported"),
        (Self::ROM_SOCKETED, "BIOS ROM is socketed"),
        (Self::PCMCIA_BOOT, "Boot from PC Card (PCMCIA) is supported"),
        (Self::EDD_SUPPORTED, "EDD is supported"),
        (Self::JAPANESE_FLOPPY_NEC, "Japanese floppy for NEC 9800 1.2 MB is supported (int 13h)"),
        (Self::JAPANESE_FLOPPY_TOSHIBA, "Japanese floppy for Toshiba 1.2 MB is supported (int 13h)"),
        (Self::FLOPPY_360K, "5.25\"/360 kB floppy services are supported (int 13h)"),
        (Self::FLOPPY_1_2M, "5.25\"/1.2 MB floppy services are supported (int 13h)"),
        (Self::FLOPPY_720K, "3.5\"/720 kB floppy services are supported (int 13h)"),
        (Self::FLOPPY_2_88M, "3.5\"/2.88 MB floppy services are supported (int 13h)"),
        (Self::PRINT_SCREEN, "Print screen service is supported (int 5h)"),
        (Self::KEYBOARD_8042, "8042 keyboard services are supported (int 9h)"),
        (Self::SERIAL_SERVICES, "Serial services are supported (int 14h)"),
        (Self::PRINTER_SERVICES, "Printer services are supported (int 17h)"),
        (Self::CGA_MONO_VIDEO, "CGA/mono video services are supported (int 10h)"),
        (Self::NEC_PC98, "NEC PC-98"),
    ];

    /// Describe the set characteristics
    pub fn descriptions(self) -> Vec<&'static str> {
        describe(self, Self::DESCRIPTIONS)
    }
}

impl BiosCharacteristicsExt1 {
    /// Descriptions of the defined bits, bit 0 first
    pub const DESCRIPTIONS: &'static [(Self, &'static str)] = &[
        (Self::ACPI, "ACPI is supported"),
        (Self::USB_LEGACY, "USB legacy is supported"),
        (Self::AGP, "AGP is supported"),
        (Self::I2O_BOOT, "I2O boot is supported"),
        (Self::LS120_BOOT, "LS-120 boot is supported"),
        (Self::ATAPI_ZIP_BOOT, "ATAPI Zip drive boot is supported"),
        (Self::IEEE_1394_BOOT, "IEEE 1394 boot is supported"),
        (Self::SMART_BATTERY, "Smart battery is supported"),
    ];

    /// Describe the set characteristics
    pub fn descriptions(self) -> Vec<&'static str> {
        describe(self, Self::DESCRIPTIONS)
    }
}

impl BiosCharacteristicsExt2 {
    /// Descriptions of the defined bits, bit 0 first
    pub const DESCRIPTIONS: &'static [(Self, &'static str)] = &[
        (Self::BIOS_BOOT_SPEC, "BIOS boot specification is supported"),
        (Self::FUNCTION_KEY_NETWORK_BOOT, "Function key-initiated network boot is supported"),
        (Self::TARGETED_CONTENT_DIST, "Targeted content distribution is supported"),
        (Self::UEFI_SUPPORTED, "UEFI is supported"),
        (Self::VIRTUAL_MACHINE, "System is a virtual machine"),
    ];

    /// Describe the set characteristics
    pub fn descriptions(self) -> Vec<&'static str> {
        describe(self, Self::DESCRIPTIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_ascending<F: Flags + Copy>(table: &[(F, &'static str)])
    where
        F::Bits: Into<u64>,
    {
        let bits: Vec<u64> = table.iter().map(|(flag, _)| flag.bits().into()).collect();
        assert!(bits.iter().all(|b| b.count_ones() == 1));
        assert!(bits.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_tables_ordered_by_bit() {
        assert_ascending(BiosCharacteristics::DESCRIPTIONS);
        assert_ascending(BiosCharacteristicsExt1::DESCRIPTIONS);
        assert_ascending(BiosCharacteristicsExt2::DESCRIPTIONS);
        assert_eq!(BiosCharacteristics::DESCRIPTIONS.len(), 32);
        assert_eq!(BiosCharacteristicsExt1::DESCRIPTIONS.len(), 8);
        assert_eq!(BiosCharacteristicsExt2::DESCRIPTIONS.len(), 5);
    }

    #[test]
    fn test_isa_and_pci() {
        let value = BiosCharacteristics::PCI_SUPPORTED | BiosCharacteristics::ISA_SUPPORTED;
        assert_eq!(value.descriptions(), ["ISA is supported", "PCI is supported"]);
    }

    #[test]
    fn test_empty_vector() {
        assert!(BiosCharacteristics::empty().descriptions().is_empty());
        assert!(BiosCharacteristicsExt1::empty().descriptions().is_empty());
        assert!(BiosCharacteristicsExt2::empty().descriptions().is_empty());
    }

    #[test]
    fn test_undefined_bits_ignored() {
        let value = BiosCharacteristics::from_bits_retain(0xFFFF_FFFF_0000_0000);
        assert!(value.descriptions().is_empty());

        let value = BiosCharacteristicsExt2::from_bits_retain(0xE8);
        assert_eq!(value.descriptions(), ["UEFI is supported"]);
    }

    #[test]
    fn test_reserved_bits_render_twice() {
        let value = BiosCharacteristics::from_bits_retain(0b11);
        assert_eq!(value.descriptions(), ["Reserved", "Reserved"]);
    }

    #[test]
    fn test_ext1_all_bits() {
        let descriptions = BiosCharacteristicsExt1::all().descriptions();
        assert_eq!(descriptions.len(), 8);
        assert_eq!(descriptions[0], "ACPI is supported");
        assert_eq!(descriptions[7], "Smart battery is supported");
    }

    #[test]
    fn test_typical_firmware() {
        let value = BiosCharacteristicsExt2::BIOS_BOOT_SPEC
            | BiosCharacteristicsExt2::UEFI_SUPPORTED
            | BiosCharacteristicsExt2::VIRTUAL_MACHINE;
        assert_eq!(
            value.descriptions(),
            [
                "BIOS boot specification is supported",
                "UEFI is supported",
                "System is a virtual machine",
            ]
        );
    }
}
