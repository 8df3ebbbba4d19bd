//! # Helix SMBIOS
//!
//! Decoding of the SMBIOS "BIOS Information" structure (type 0) into a typed
//! record, and rendering of that record back to descriptive text.
//!
//! ## Pipeline
//!
//! 1. A table source hands over a [`RawRecord`]: header, formatted area and
//!    string pool.
//! 2. [`bios::decode`] turns it into an immutable [`BiosInformation`].
//! 3. The flag renderers and [`bios::summarize`] project the record to text.
//!
//! Every stage is a pure function of its input. Fields added by later SMBIOS
//! revisions are gated on the declared structure length and come out as
//! `None` when the record is too short to carry them.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

pub mod bios;
pub mod header;
pub mod strings;


use core::fmt;

pub use bios::{decode, decode_with, summarize, BiosInformation, BiosRelease, RomSize};
pub use header::{structure_type, RawRecord, StructureHeader};
pub use strings::{StringResolver, StringTable};

/// Result type for SMBIOS operations
pub type SmbiosResult<T> = Result<T, SmbiosError>;

/// Errors that can occur while decoding SMBIOS structures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmbiosError {
    /// The structure type tag does not match the decoder
    WrongType {
        /// Type tag found in the header
        found: u8,
    },
    /// Declared length is below the minimum formatted area of the structure
    TruncatedRecord {
        /// Declared length found in the header
        length: u8,
    },
    /// The buffer does not hold a well-formed structure
    InvalidStructure,
}

impl fmt::Display for SmbiosError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongType { found } => {
                write!(f, "invalid table type {}", found)
            }
            Self::TruncatedRecord { length } => {
                write!(f, "required fields missing ({} byte structure)", length)
            }
            Self::InvalidStructure => write!(f, "invalid SMBIOS structure"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SmbiosError {}
