//! Legacy LZ4 frame format: distinct magic number, always-independent
//! 8 MiB blocks, no header checksum, no footer (EOF terminates the stream).
//!
//! Ground truth: lz4frame.c's legacy encoder/decoder path (`LZ4IO_compressLegacy`
//! equivalent magic and block layout), selected via the CLI's `-l` flag.

use crate::block::decompress_core::decompress_safe;
use crate::block::{Compressor, FavorMode};
use crate::frame::header::{read_le32, write_le32};
use crate::status::Status;

/// Magic number of a legacy-format LZ4 frame, little-endian on wire.
pub const LEGACY_MAGICNUMBER: u32 = 0x184C_2102;

/// Fixed block size used by the legacy format.
pub const LEGACY_BLOCK_SIZE: usize = 8 * 1024 * 1024;

/// Compress `src` into a legacy-format frame: magic, then a sequence of
/// `(length: u32 LE, block bytes)` pairs, each an independent block.
pub fn compress_legacy(src: &[u8]) -> Result<Vec<u8>, Status> {
    let mut out = Vec::with_capacity(src.len() / 2 + 8);
    let mut buf = [0u8; 4];
    write_le32(&mut buf, 0, LEGACY_MAGICNUMBER);
    out.extend_from_slice(&buf);

    let mut offset = 0;
    while offset < src.len() {
        let chunk_len = LEGACY_BLOCK_SIZE.min(src.len() - offset);
        let chunk = &src[offset..offset + chunk_len];

        let mut compressor = Compressor::new(chunk_len, FavorMode::Ratio);
        let mut block_out = Vec::new();
        let bound = chunk_len + chunk_len / 255 + 16;
        let _ = compressor.shrink_block(chunk, 0, chunk_len, &mut block_out, bound, false);

        write_le32(&mut buf, 0, block_out.len() as u32);
        out.extend_from_slice(&buf);
        out.extend_from_slice(&block_out);

        offset += chunk_len;
    }

    Ok(out)
}

/// Decompress a legacy-format frame produced by [`compress_legacy`].
pub fn decompress_legacy(src: &[u8]) -> Result<Vec<u8>, Status> {
    if src.len() < 4 || read_le32(src, 0) != LEGACY_MAGICNUMBER {
        return Err(Status::BadFormat);
    }
    let mut pos = 4;
    let mut out = Vec::new();

    while pos < src.len() {
        if src.len() < pos + 4 {
            return Err(Status::BadFormat);
        }
        let block_len = read_le32(src, pos) as usize;
        pos += 4;
        if src.len() < pos + block_len {
            return Err(Status::BadFormat);
        }
        let block_data = &src[pos..pos + block_len];
        pos += block_len;

        let mut decoded = vec![0u8; LEGACY_BLOCK_SIZE];
        let n = decompress_safe(block_data, &mut decoded).map_err(|_| Status::InternalDecompression)?;
        decoded.truncate(n);
        out.extend_from_slice(&decoded);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_small_input() {
        let data = b"legacy legacy legacy legacy legacy".to_vec();
        let frame = compress_legacy(&data).unwrap();
        assert_eq!(read_le32(&frame, 0), LEGACY_MAGICNUMBER);
        let restored = decompress_legacy(&frame).unwrap();
        assert_eq!(restored, data);
    }

    #[test]
    fn rejects_bad_magic() {
        assert_eq!(decompress_legacy(&[1, 2, 3, 4]).unwrap_err(), Status::BadFormat);
    }
}
