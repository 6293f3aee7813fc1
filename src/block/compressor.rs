//! Block compressor: ties the suffix-array index, match enumerator, bit-cost
//! optimizer, command-count reducer, and token emitter into a single
//! `shrink_block` entry point.
//!
//! Ground truth: `shrink_context.c`'s `lz4ultra_compressor_init` /
//! `lz4ultra_compressor_shrink_block` / `lz4ultra_compressor_destroy`.

use super::emitter::{write_block, Lz4Error};
use super::enumerator::{find_all_matches, skip_matches, NMATCHES_PER_OFFSET};
use super::optimizer::optimize_matches;
use super::reducer::reduce_command_count;
use super::suffix_array::{Match, MatchIndex};

pub use super::emitter::Lz4Error as CompressError;

/// Compression acceleration/ratio trade-off; mirrors the reference's
/// favor-ratio vs. favor-decompression-speed switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavorMode {
    Ratio,
    DecompressionSpeed,
}

/// An optimal-parsing LZ4 block compressor.
///
/// Owns the candidate-match table sized at construction for the largest
/// window it will ever be asked to process; no further allocation happens
/// inside [`Compressor::shrink_block`].
pub struct Compressor {
    max_window_size: usize,
    matches: Vec<Match>,
    favor_mode: FavorMode,
}

impl Compressor {
    /// Allocate a compressor able to process windows up to `max_window_size`
    /// bytes (including any dictionary/previous-block prefix).
    pub fn new(max_window_size: usize, favor_mode: FavorMode) -> Self {
        Compressor {
            max_window_size,
            matches: vec![Match::default(); max_window_size * NMATCHES_PER_OFFSET],
            favor_mode,
        }
    }

    /// Compress `window[start..end)`, treating `window[..start)` as prior
    /// context (dictionary bytes or a previous dependent block) that may be
    /// referenced by matches but is never itself re-emitted.
    ///
    /// When `raw_eod` is set, a trailing two-byte `00 00` sentinel is
    /// appended after the final literals-only token, per the raw
    /// (frameless) block mode's in-band end-of-data marker.
    ///
    /// Appends the compressed bytes to `out` and returns the number of bytes
    /// appended, or an error if the parse cannot fit in `max_out_size`
    /// additional bytes or produces an out-of-range offset.
    pub fn shrink_block(
        &mut self,
        window: &[u8],
        start: usize,
        end: usize,
        out: &mut Vec<u8>,
        max_out_size: usize,
        raw_eod: bool,
    ) -> Result<usize, Lz4Error> {
        assert!(end <= window.len());
        assert!(end <= self.max_window_size);

        let mut index = MatchIndex::build(window).expect("suffix array construction cannot fail");
        if start > 0 {
            skip_matches(&mut index, 0, start);
        }
        find_all_matches(&mut index, &mut self.matches, start, end);
        optimize_matches(
            &mut self.matches,
            start,
            end,
            self.favor_mode == FavorMode::Ratio,
        );
        reduce_command_count(&mut self.matches, window, start, end);
        write_block(&self.matches, window, start, end, out, max_out_size, raw_eod)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::decompress_core::decompress_safe;

    fn round_trip(data: &[u8]) {
        let mut compressor = Compressor::new(data.len().max(1), FavorMode::Ratio);
        let mut out = Vec::new();
        compressor
            .shrink_block(data, 0, data.len(), &mut out, usize::MAX, false)
            .unwrap();

        let mut restored = vec![0u8; data.len()];
        let n = decompress_safe(&out, &mut restored).unwrap();
        assert_eq!(n, data.len());
        assert_eq!(restored, data);
    }

    #[test]
    fn round_trips_empty_input() {
        round_trip(b"");
    }

    #[test]
    fn round_trips_single_byte() {
        round_trip(b"Q");
    }

    #[test]
    fn round_trips_all_zeros() {
        round_trip(&vec![0u8; 1 << 16]);
    }

    #[test]
    fn round_trips_repeating_pattern() {
        let mut data = Vec::new();
        while data.len() < 65536 {
            data.extend_from_slice(b"the quick brown fox jumps over the lazy dog");
        }
        round_trip(&data);
    }

    #[test]
    fn round_trips_high_entropy() {
        let data: Vec<u8> = (0u32..8192)
            .map(|i| (i.wrapping_mul(2654435761) >> 24) as u8)
            .collect();
        round_trip(&data);
    }

    #[test]
    fn dictionary_prefix_is_referenced_but_not_reemitted() {
        let dict = b"common header bytes shared across many small records ".repeat(4);
        let tail = b"common header bytes shared across many small records tail";
        let mut window = dict.clone();
        window.extend_from_slice(tail);

        let mut compressor = Compressor::new(window.len(), FavorMode::Ratio);
        let mut out = Vec::new();
        compressor
            .shrink_block(&window, dict.len(), window.len(), &mut out, usize::MAX, false)
            .unwrap();

        let mut restored = vec![0u8; tail.len()];
        let n = crate::block::decompress_core::decompress_safe_using_dict(
            &out,
            &mut restored,
            &dict,
        )
        .unwrap();
        assert_eq!(n, tail.len());
        assert_eq!(&restored[..n], tail.as_slice());
    }
}
