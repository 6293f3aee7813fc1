//! Raw block mode: a single LZ4 block with no frame container at all.
//!
//! Ground truth: lz4ultra's `-r` raw mode, which skips the frame/legacy
//! header entirely and writes (or reads) exactly one block's worth of the
//! LZ4 token grammar, sized by the caller.

use crate::block::decompress_core::decompress_safe_partial;
use crate::block::{CompressError, Compressor, FavorMode};
use crate::status::Status;

/// Maximum input size acceptable for a single raw block (no block-splitting
/// in raw mode; the whole input must fit in one window).
pub const RAW_MAX_SIZE: usize = 4 * 1024 * 1024;

/// Compress `src` as a single raw LZ4 block (no header, no footer), delimited
/// by a trailing two-byte `00 00` end-of-data sentinel so the decoder never
/// needs to be told the original size.
pub fn compress_raw(src: &[u8]) -> Result<Vec<u8>, Status> {
    if src.len() > RAW_MAX_SIZE {
        return Err(Status::RawTooLarge);
    }
    let mut compressor = Compressor::new(src.len(), FavorMode::Ratio);
    let mut out = Vec::new();
    let bound = src.len() + src.len() / 255 + 18;
    match compressor.shrink_block(src, 0, src.len(), &mut out, bound, true) {
        Ok(_) if out.len() < src.len() => Ok(out),
        Ok(_) | Err(CompressError::OutputTooSmall) => Err(Status::RawIncompressible),
        Err(CompressError::InvalidOffset) => Err(Status::InternalCompression),
    }
}

/// Decompress a single raw LZ4 block. The stream is self-delimiting: decoding
/// stops at the in-band `00 00` end-of-data sentinel rather than relying on a
/// caller-supplied output size, so no separate length needs to travel with
/// the compressed bytes.
pub fn decompress_raw(src: &[u8]) -> Result<Vec<u8>, Status> {
    let mut out = vec![0u8; RAW_MAX_SIZE];
    let n = decompress_safe_partial(src, &mut out, RAW_MAX_SIZE).map_err(|_| Status::BadFormat)?;
    out.truncate(n);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_compressible_input() {
        let data = b"raw raw raw raw raw raw raw raw raw raw".to_vec();
        let compressed = compress_raw(&data).unwrap();
        let restored = decompress_raw(&compressed).unwrap();
        assert_eq!(restored, data);
    }

    #[test]
    fn emits_trailing_eod_sentinel() {
        let data = b"raw raw raw raw raw raw raw raw raw raw".to_vec();
        let compressed = compress_raw(&data).unwrap();
        assert_eq!(&compressed[compressed.len() - 2..], &[0x00, 0x00]);
    }

    #[test]
    fn reports_incompressible_high_entropy_input() {
        let data: Vec<u8> = (0u32..64).map(|i| (i.wrapping_mul(2654435761) >> 24) as u8).collect();
        match compress_raw(&data) {
            Err(Status::RawIncompressible) => {}
            Ok(out) => assert!(out.len() < data.len(), "claims compression but did not shrink"),
            Err(e) => panic!("unexpected error: {e:?}"),
        }
    }
}
