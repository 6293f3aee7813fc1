//! Command-count reducer (C4).
//!
//! Ground truth: `shrink_block.c`'s `lz4ultra_optimize_command_count_lz4`.
//!
//! A single forward scan that rewrites the chosen parse to remove tokens
//! whose presence cannot be justified byte-for-byte ("absorb"), and fuses
//! adjacent same-direction matches into one longer command ("join").

use super::enumerator::NMATCHES_PER_OFFSET;
use super::optimizer::LEAVE_ALONE_MATCH_SIZE;
use super::suffix_array::{Match, MIN_MATCH_SIZE};
use super::types::{LITERALS_RUN_LEN, MATCH_RUN_LEN};

fn literals_varlen_bits(length: i32) -> i32 {
    (((length - LITERALS_RUN_LEN as i32 + 255) / 255) << 3).max(0)
}

fn match_varlen_bits(encoded_length: i32) -> i32 {
    (((encoded_length - MATCH_RUN_LEN as i32 + 255) / 255) << 3).max(0)
}

/// Reduce the command count of the chosen parse over `[start, end)` in
/// `window`. `matches[i * K]` holds the chosen match at position `i`
/// (length 0 means literal); this rewrites those slots in place.
pub fn reduce_command_count(matches: &mut [Match], window: &[u8], start: usize, end: usize) {
    let slot = |i: usize| i * NMATCHES_PER_OFFSET;
    let mut i = start;
    let mut num_literals: i32 = 0;

    while i < end {
        let m = matches[slot(i)];
        if m.length < MIN_MATCH_SIZE as i32 {
            num_literals += 1;
            i += 1;
            continue;
        }

        let match_len = m.length;
        let mut reduce = false;

        if match_len <= 19 && (i + match_len as usize) < end {
            let encoded_len = match_len - MIN_MATCH_SIZE as i32;
            let command_size =
                8 + literals_varlen_bits(num_literals) + 16 + match_varlen_bits(encoded_len);
            let next_pos = i + match_len as usize;

            if matches[slot(next_pos)].length >= MIN_MATCH_SIZE as i32 {
                if command_size
                    >= (match_len << 3) + literals_varlen_bits(num_literals + match_len)
                {
                    reduce = true;
                }
            } else {
                let mut cur = next_pos;
                let mut next_num_literals = 0i32;
                loop {
                    cur += 1;
                    next_num_literals += 1;
                    if !(cur < end && matches[slot(cur)].length < MIN_MATCH_SIZE as i32) {
                        break;
                    }
                }
                if command_size
                    >= (match_len << 3)
                        + literals_varlen_bits(num_literals + next_num_literals + match_len)
                        - literals_varlen_bits(next_num_literals)
                {
                    reduce = true;
                }
            }
        }

        if reduce {
            for j in 0..match_len as usize {
                matches[slot(i + j)].length = 0;
            }
            num_literals += match_len;
            i += match_len as usize;
            continue;
        }

        let next_pos = i + match_len as usize;
        if next_pos < end {
            let next = matches[slot(next_pos)];
            if m.offset > 0
                && match_len >= 2
                && next.offset > 0
                && next.length >= 2
                && (match_len + next.length) >= LEAVE_ALONE_MATCH_SIZE
                && (match_len + next.length) <= 65535
                && next_pos as i32 >= m.offset
                && next_pos as i32 >= next.offset
                && (next_pos + next.length as usize) <= end
                && window[next_pos - m.offset as usize
                    ..next_pos - m.offset as usize + next.length as usize]
                    == window[next_pos - next.offset as usize
                        ..next_pos - next.offset as usize + next.length as usize]
            {
                matches[slot(i)].length += next.length;
                matches[slot(next_pos)] = Match {
                    length: -1,
                    offset: 0,
                };
                continue;
            }
        }

        num_literals = 0;
        i += match_len as usize;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::enumerator::find_all_matches;
    use crate::block::optimizer::optimize_matches;
    use crate::block::suffix_array::MatchIndex;

    #[test]
    fn absorbs_short_isolated_match() {
        // Two bytes repeated once - short match that costs more than literals.
        let window = b"xyxyzzzzzzzzzzzzzzzzzzzzzzzzzzzzz".to_vec();
        let mut index = MatchIndex::build(&window).unwrap();
        let mut matches = vec![Match::default(); window.len() * NMATCHES_PER_OFFSET];
        find_all_matches(&mut index, &mut matches, 0, window.len());
        optimize_matches(&mut matches, 0, window.len(), true);
        reduce_command_count(&mut matches, &window, 0, window.len());
        // No panic and parse still covers the whole window: every position is
        // either inside a match span or literal.
        let mut i = 0;
        while i < window.len() {
            let m = matches[i * NMATCHES_PER_OFFSET];
            if m.length >= MIN_MATCH_SIZE as i32 {
                i += m.length as usize;
            } else {
                i += 1;
            }
        }
        assert_eq!(i, window.len());
    }

    #[test]
    fn joins_adjacent_rle_matches() {
        let window = vec![b'a'; 4096];
        let mut index = MatchIndex::build(&window).unwrap();
        let mut matches = vec![Match::default(); window.len() * NMATCHES_PER_OFFSET];
        find_all_matches(&mut index, &mut matches, 0, window.len());
        optimize_matches(&mut matches, 0, window.len(), true);
        reduce_command_count(&mut matches, &window, 0, window.len());

        let mut num_matches = 0;
        let mut i = 0;
        while i < window.len() {
            let m = matches[i * NMATCHES_PER_OFFSET];
            if m.length >= MIN_MATCH_SIZE as i32 {
                num_matches += 1;
                i += m.length as usize;
            } else {
                i += 1;
            }
        }
        // A run of identical bytes should collapse to very few commands.
        assert!(num_matches <= 3, "expected few commands, got {num_matches}");
    }
}
