//! Error types for archive operations

use thiserror::Error;

/// Archive operation result type
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Error types for archive parsing, hashing, and serialization
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Magic tag mismatch; the buffer is not an archive
    #[error("Invalid archive magic: {0:02x?}")]
    InvalidMagic([u8; 10]),

    /// A payload block lies outside the source buffer
    #[error(
        "Payload for \"{name}\" out of bounds: offset {offset} + {size} bytes exceeds buffer of {buffer_len}"
    )]
    PayloadOutOfBounds {
        /// Name of the offending directory entry
        name: String,
        /// Stored offset of the entry's file block
        offset: u32,
        /// Payload size read from the file block
        size: u32,
        /// Length of the source buffer
        buffer_len: usize,
    },

    /// A filename with nothing before its first `.` cannot be hashed
    #[error("Cannot hash \"{0}\": empty filename stem")]
    EmptyStem(String),

    /// A filename containing a character outside the legal symbol set cannot
    /// be hashed
    #[error("Cannot hash \"{name}\": illegal symbol {symbol:?}")]
    IllegalHashSymbol {
        /// The offending filename
        name: String,
        /// The character the symbol table does not cover
        symbol: char,
    },

    /// Binary read/write error
    #[error("Binary format error: {0}")]
    BinRead(#[from] binrw::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Invalid format parameters
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

impl ArchiveError {
    /// Check if this error signals a name the format cannot represent
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Self::EmptyStem(_) | Self::IllegalHashSymbol { .. })
    }

    /// Check if this error is a structural parse failure; the buffer must be
    /// treated as unusable
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidMagic(_)
                | Self::PayloadOutOfBounds { .. }
                | Self::BinRead(_)
                | Self::InvalidFormat(_)
        )
    }
}
