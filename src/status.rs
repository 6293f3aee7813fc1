//! Top-level status/error taxonomy returned by file- and frame-level entry
//! points. Block-level entry points use the narrower [`crate::block::CompressError`]
//! / [`crate::block::decompress_core::DecompressError`] enums instead.
//!
//! Ground truth: lz4ultra's `lz4ultra_status_t`.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    SourceRead,
    DestinationWrite,
    DictionaryRead,
    OutOfMemory,
    InternalCompression,
    RawTooLarge,
    RawIncompressible,
    BadFormat,
    BadChecksum,
    InternalDecompression,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Ok => "ok",
            Status::SourceRead => "error reading source",
            Status::DestinationWrite => "error writing destination",
            Status::DictionaryRead => "error reading dictionary",
            Status::OutOfMemory => "out of memory",
            Status::InternalCompression => "internal compression error",
            Status::RawTooLarge => "input too large for a single raw block",
            Status::RawIncompressible => "input is incompressible in raw mode",
            Status::BadFormat => "malformed compressed stream",
            Status::BadChecksum => "checksum mismatch",
            Status::InternalDecompression => "internal decompression error",
        };
        f.write_str(s)
    }
}

impl std::error::Error for Status {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_has_a_display_string() {
        let variants = [
            Status::Ok,
            Status::SourceRead,
            Status::DestinationWrite,
            Status::DictionaryRead,
            Status::OutOfMemory,
            Status::InternalCompression,
            Status::RawTooLarge,
            Status::RawIncompressible,
            Status::BadFormat,
            Status::BadChecksum,
            Status::InternalDecompression,
        ];
        for v in variants {
            assert!(!v.to_string().is_empty());
        }
    }
}
