//! LZ4 Frame container writer.
//!
//! Ground truth: lz4frame.c's frame header/block layout (`LZ4F_compressFrame`,
//! `LZ4F_compressBegin`), reworked around [`crate::block::Compressor`]'s
//! single-pass optimal parser instead of the reference's incremental
//! fast/HC streaming contexts — there is exactly one encoder here, and it
//! always sees the whole block before emitting it.

use crate::block::{CompressError, Compressor, FavorMode};
use crate::frame::header::{lz4f_header_checksum, write_le32};
use crate::frame::types::{BlockMode, BlockSizeId, Preferences};
use crate::status::Status;

/// Magic number of a standard (non-skippable) LZ4 frame, little-endian on wire.
pub const LZ4F_MAGICNUMBER: u32 = 0x184D_2204;

/// Frame-format version field (distinct from `LZ4F_VERSION`, the library API
/// version): always 1 for the current wire format.
const FLG_VERSION: u8 = 1 << 6;

fn block_max_code(id: BlockSizeId) -> u8 {
    match id {
        BlockSizeId::Default => 4,
        BlockSizeId::Max64Kb => 4,
        BlockSizeId::Max256Kb => 5,
        BlockSizeId::Max1Mb => 6,
        BlockSizeId::Max4Mb => 7,
    }
}

fn block_size_for(id: BlockSizeId) -> usize {
    crate::frame::header::lz4f_get_block_size(id).unwrap_or(4 * 1024 * 1024)
}

/// History window retained across dependent blocks (and the dictionary tail).
pub const HISTORY: usize = 65536;

/// Writes the 7-byte frame header: magic, FLG, block-descriptor, header
/// checksum. This encoder only ever emits FLG `0x40` or `0x60` — version 1,
/// no block checksum, no content size, no content checksum, independent-block
/// bit set only when requested — so there is no content-size field to write
/// and the header is always the minimum 7 bytes.
fn write_frame_header(out: &mut Vec<u8>, prefs: &Preferences) {
    let mut header = Vec::with_capacity(7);
    header.extend_from_slice(&LZ4F_MAGICNUMBER.to_le_bytes());

    let mut flg = FLG_VERSION;
    if prefs.frame_info.block_mode == BlockMode::Independent {
        flg |= 1 << 5;
    }
    header.push(flg);
    header.push(block_max_code(prefs.frame_info.block_size_id) << 4);

    let hc = lz4f_header_checksum(&header[4..]);
    header.push(hc);

    out.extend_from_slice(&header);
}

/// Compress `src` into a complete LZ4 frame (header, blocks, end marker).
/// `dict` is an optional external dictionary: its last [`HISTORY`] bytes are
/// prepended to the first block's window as context and never appear in the
/// output.
pub fn compress_frame(
    src: &[u8],
    prefs: &Preferences,
    dict: &[u8],
) -> Result<Vec<u8>, CompressError> {
    let block_size = block_size_for(prefs.frame_info.block_size_id);
    let dependent = prefs.frame_info.block_mode == BlockMode::Linked;

    let mut out = Vec::with_capacity(src.len() / 2 + 64);
    write_frame_header(&mut out, prefs);

    let dict_tail_len = dict.len().min(HISTORY);
    let mut window: Vec<u8> = dict[dict.len() - dict_tail_len..].to_vec();
    let mut compressor = Compressor::new(window.len() + block_size, FavorMode::Ratio);
    let mut compressor_capacity = window.len() + block_size;

    let mut offset = 0usize;

    while offset < src.len() {
        let chunk_len = block_size.min(src.len() - offset);
        let start = window.len();
        window.extend_from_slice(&src[offset..offset + chunk_len]);
        let end = window.len();

        if end > compressor_capacity {
            compressor_capacity = end + block_size;
            compressor = Compressor::new(compressor_capacity, FavorMode::Ratio);
        }

        let mut block_out = Vec::new();
        let bound = chunk_len + chunk_len / 255 + 16;
        let compressed = compressor.shrink_block(&window, start, end, &mut block_out, bound, false);

        let (flagged_len, payload): (u32, &[u8]) = match compressed {
            Ok(_) if block_out.len() < chunk_len => (block_out.len() as u32, &block_out),
            _ => (
                (chunk_len as u32) | 0x8000_0000,
                &window[start..end],
            ),
        };

        let mut header_word = [0u8; 4];
        write_le32(&mut header_word, 0, flagged_len);
        out.extend_from_slice(&header_word);
        out.extend_from_slice(payload);

        offset += chunk_len;

        if !dependent {
            window.clear();
            compressor_capacity = block_size;
            compressor = Compressor::new(compressor_capacity, FavorMode::Ratio);
        } else if window.len() > HISTORY {
            let drop = window.len() - HISTORY;
            window.drain(..drop);
            compressor_capacity = window.len() + block_size;
            compressor = Compressor::new(compressor_capacity, FavorMode::Ratio);
        }
    }

    out.extend_from_slice(&[0u8; 4]);

    Ok(out)
}

/// Convenience wrapper returning the frame-level [`Status`] taxonomy instead
/// of the block-level [`CompressError`].
pub fn compress_frame_status(
    src: &[u8],
    prefs: &Preferences,
    dict: &[u8],
) -> Result<Vec<u8>, Status> {
    compress_frame(src, prefs, dict).map_err(|_| Status::InternalCompression)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::decompress::decompress_frame;

    fn round_trip(data: &[u8], prefs: Preferences) {
        let frame = compress_frame(data, &prefs, &[]).unwrap();
        let restored = decompress_frame(&frame, &[]).unwrap();
        assert_eq!(restored, data);
    }

    #[test]
    fn round_trips_small_input_default_prefs() {
        round_trip(b"hello hello hello world", Preferences::default());
    }

    #[test]
    fn round_trips_multi_block_input() {
        let data = vec![b'x'; 200_000];
        let mut prefs = Preferences::default();
        prefs.frame_info.block_size_id = BlockSizeId::Max64Kb;
        round_trip(&data, prefs);
    }

    #[test]
    fn round_trips_independent_blocks() {
        let mut data = Vec::new();
        for i in 0..5000u32 {
            data.extend_from_slice(&i.to_le_bytes());
        }
        let mut prefs = Preferences::default();
        prefs.frame_info.block_size_id = BlockSizeId::Max64Kb;
        prefs.frame_info.block_mode = BlockMode::Independent;
        round_trip(&data, prefs);
    }

    #[test]
    fn empty_input_produces_exact_minimal_frame() {
        let frame = compress_frame(b"", &Preferences::default(), &[]).unwrap();
        // magic(4) + flg(1) + bd(1) + header-checksum(1) + footer(4), flg = 0x40.
        assert_eq!(frame, vec![0x04, 0x22, 0x4D, 0x18, 0x40, 0x40, 0xC0, 0x00, 0x00, 0x00, 0x00]);
    }
}
