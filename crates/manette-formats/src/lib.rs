//! Parser and builder for Square's PSX-era `SQUARESOFT` game archives
//!
#![allow(clippy::cast_possible_truncation)] // Intentional for binary format parsing
#![allow(clippy::cast_lossless)] // Sometimes clearer than From
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred
//! This crate provides symmetric (parser and builder) implementations for the
//! two leaf formats of the `SQUARESOFT` data pipeline:
//!
//! - **Archive**: the flat, hash-indexed container bundling a file directory,
//!   a 900-slot filename lookup table, a folder path table, and the payload
//!   blocks themselves
//! - **LZS**: the 4 KiB sliding-window codec used to shrink and restore
//!   payloads stored inside those archives
//!
//! Both are byte-for-byte compatible with the original closed format, so
//! archives written here still load in the original consumer and in other
//! compatible tooling.
//!
//! # Design Principles
//!
//! - **Symmetric Operations**: Both parsing and building supported
//! - **Whole-Buffer Model**: All operations are pure CPU transformations over
//!   caller-supplied in-memory buffers
//! - **Derived Data Stays Derived**: The filename lookup table is always
//!   rebuilt from the directory, never patched incrementally
//! - **Round-Trip Guarantee**: rebuilding an unmutated archive is idempotent

#![warn(missing_docs)]

pub mod archive;
pub mod lzs;

/// Common format trait implemented by container formats in this crate
pub trait PakFormat: Sized {
    /// Parse from bytes
    fn parse(data: &[u8]) -> Result<Self, Box<dyn std::error::Error>>;

    /// Build to bytes
    fn build(&self) -> Result<Vec<u8>, Box<dyn std::error::Error>>;

    /// Verify that building is stable: rebuilding the built output must
    /// reproduce it exactly
    fn verify_round_trip(data: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
        let first = Self::parse(data)?.build()?;
        let second = Self::parse(&first)?.build()?;
        if first != second {
            return Err("Round-trip verification failed".into());
        }
        Ok(())
    }
}
