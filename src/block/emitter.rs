//! Token emitter (C5).
//!
//! Ground truth: `shrink_block.c`'s `lz4ultra_write_block_lz4`.
//!
//! Serializes the reduced parse into the LZ4 byte grammar: token byte,
//! literal-length varint, literal bytes, little-endian offset,
//! match-length varint, repeated per command, with a final literals-only
//! token and an optional RAW-mode end-of-data marker.

use super::enumerator::NMATCHES_PER_OFFSET;
use super::suffix_array::MIN_MATCH_SIZE;
use super::suffix_array::Match;
use super::types::{LITERALS_RUN_LEN, MATCH_RUN_LEN};

/// Errors returned while emitting a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lz4Error {
    /// The parse does not fit in the caller's output buffer.
    OutputTooSmall,
    /// A chosen match offset falls outside the LZ4 grammar's `[1, 65535]` range.
    InvalidOffset,
}

const MIN_OFFSET: i32 = 1;
const MAX_OFFSET: i32 = 65_535;

fn write_literals_varlen(out: &mut Vec<u8>, length: i32) {
    if length >= LITERALS_RUN_LEN as i32 {
        let mut n = length - LITERALS_RUN_LEN as i32;
        while n >= 255 {
            out.push(255);
            n -= 255;
        }
        out.push(n as u8);
    }
}

fn write_match_varlen(out: &mut Vec<u8>, encoded_length: i32) {
    if encoded_length >= MATCH_RUN_LEN as i32 {
        let mut n = encoded_length - MATCH_RUN_LEN as i32;
        while n >= 255 {
            out.push(255);
            n -= 255;
        }
        out.push(n as u8);
    }
}

fn literals_varlen_bytes(length: i32) -> i32 {
    ((length - LITERALS_RUN_LEN as i32 + 255) / 255).max(0)
}

fn match_varlen_bytes(encoded_length: i32) -> i32 {
    ((encoded_length - MATCH_RUN_LEN as i32 + 255) / 255).max(0)
}

/// Serialize the chosen parse over `[start, end)` of `window` into `out`
/// (appended). Returns the number of bytes written, or an error if the
/// parse cannot fit within `max_out_size` additional bytes or a chosen
/// offset is out of grammar range.
///
/// When `raw_eod` is set, a trailing two-byte `00 00` sentinel is appended
/// after the final literals-only token (raw/frameless block mode).
pub fn write_block(
    matches: &[Match],
    window: &[u8],
    start: usize,
    end: usize,
    out: &mut Vec<u8>,
    max_out_size: usize,
    raw_eod: bool,
) -> Result<usize, Lz4Error> {
    let slot = |i: usize| i * NMATCHES_PER_OFFSET;
    let out_start = out.len();
    let mut num_literals: i32 = 0;
    let mut first_literal_offset = start;
    let mut i = start;

    while i < end {
        let m = matches[slot(i)];
        if m.length >= MIN_MATCH_SIZE as i32 {
            let match_offset = m.offset;
            let match_len = m.length;
            let encoded_len = match_len - MIN_MATCH_SIZE as i32;
            let token_literals = num_literals.min(LITERALS_RUN_LEN as i32);
            let token_match = encoded_len.min(MATCH_RUN_LEN as i32);
            let command_size = 1
                + literals_varlen_bytes(num_literals)
                + num_literals
                + 2
                + match_varlen_bytes(encoded_len);

            if (out.len() - out_start) + command_size as usize > max_out_size {
                out.truncate(out_start);
                return Err(Lz4Error::OutputTooSmall);
            }
            if !(MIN_OFFSET..=MAX_OFFSET).contains(&match_offset) {
                out.truncate(out_start);
                return Err(Lz4Error::InvalidOffset);
            }

            out.push(((token_literals << 4) | token_match) as u8);
            write_literals_varlen(out, num_literals);
            if num_literals != 0 {
                out.extend_from_slice(
                    &window[first_literal_offset..first_literal_offset + num_literals as usize],
                );
                num_literals = 0;
            }
            out.push((match_offset & 0xff) as u8);
            out.push((match_offset >> 8) as u8);
            write_match_varlen(out, encoded_len);

            i += match_len as usize;
        } else {
            if num_literals == 0 {
                first_literal_offset = i;
            }
            num_literals += 1;
            i += 1;
        }
    }

    let token_literals = num_literals.min(LITERALS_RUN_LEN as i32);
    let command_size = 1 + literals_varlen_bytes(num_literals) + num_literals;
    if (out.len() - out_start) + command_size as usize > max_out_size {
        out.truncate(out_start);
        return Err(Lz4Error::OutputTooSmall);
    }
    out.push((token_literals << 4) as u8);
    write_literals_varlen(out, num_literals);
    if num_literals != 0 {
        out.extend_from_slice(&window[first_literal_offset..first_literal_offset + num_literals as usize]);
    }

    if raw_eod {
        if (out.len() - out_start) + 2 > max_out_size {
            out.truncate(out_start);
            return Err(Lz4Error::OutputTooSmall);
        }
        out.push(0);
        out.push(0);
    }

    Ok(out.len() - out_start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::enumerator::find_all_matches;
    use crate::block::optimizer::optimize_matches;
    use crate::block::reducer::reduce_command_count;
    use crate::block::suffix_array::MatchIndex;

    fn compress(window: &[u8]) -> Vec<u8> {
        let mut index = MatchIndex::build(window).unwrap();
        let mut matches = vec![Match::default(); window.len() * NMATCHES_PER_OFFSET];
        find_all_matches(&mut index, &mut matches, 0, window.len());
        optimize_matches(&mut matches, 0, window.len(), true);
        reduce_command_count(&mut matches, window, 0, window.len());
        let mut out = Vec::new();
        write_block(&matches, window, 0, window.len(), &mut out, usize::MAX, false).unwrap();
        out
    }

    #[test]
    fn single_byte_emits_one_literal_token() {
        let out = compress(b"A");
        assert_eq!(out, vec![0x10, b'A']);
    }

    #[test]
    fn empty_window_emits_empty_token() {
        let out = compress(b"");
        assert_eq!(out, vec![0x00]);
    }

    #[test]
    fn output_too_small_reports_error() {
        let window = vec![7u8; 64];
        let mut index = MatchIndex::build(&window).unwrap();
        let mut matches = vec![Match::default(); window.len() * NMATCHES_PER_OFFSET];
        find_all_matches(&mut index, &mut matches, 0, window.len());
        optimize_matches(&mut matches, 0, window.len(), true);
        reduce_command_count(&mut matches, &window, 0, window.len());
        let mut out = Vec::new();
        let err = write_block(&matches, &window, 0, window.len(), &mut out, 1, false).unwrap_err();
        assert_eq!(err, Lz4Error::OutputTooSmall);
        assert!(out.is_empty());
    }
}
