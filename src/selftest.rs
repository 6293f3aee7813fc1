//! Property-based round-trip self-test driver (the `-test` CLI mode).
//!
//! Ground truth: lz4ultra's `-test` self-test, collapsed into a single
//! in-process driver — this crate's own decompressor is the conformance
//! oracle, since no external LZ4 binary is assumed present at test time.

use crate::frame::{compress_frame, compress_legacy, compress_raw, decompress_frame};
use crate::frame::{decompress_legacy, decompress_raw};
use crate::frame::{BlockMode, BlockSizeId, FrameInfo, Preferences};
use crate::status::Status;

/// One failing case, tagged with enough detail to locate it.
#[derive(Debug)]
pub struct SelfTestFailure {
    pub case: &'static str,
    pub block_size_id: Option<BlockSizeId>,
    pub block_mode: Option<BlockMode>,
    pub detail: String,
}

fn corpus() -> Vec<(&'static str, Vec<u8>)> {
    let mut cases = vec![
        ("empty", Vec::new()),
        ("single_byte", vec![0x41]),
        ("all_zeros_64k", vec![0u8; 64 * 1024]),
    ];

    let mut repeating = Vec::new();
    while repeating.len() < 64 * 1024 {
        repeating.extend_from_slice(b"the quick brown fox jumps over the lazy dog, ");
    }
    cases.push(("repeating_pattern", repeating));

    // A cheap deterministic stand-in for random bytes (same hash-mixing
    // approach used throughout the block-layer unit tests).
    let high_entropy: Vec<u8> = (0u32..32 * 1024)
        .map(|i| (i.wrapping_mul(2654435761) >> 24) as u8)
        .collect();
    cases.push(("high_entropy", high_entropy));

    let mut dict_like = b"common shared header ".repeat(200);
    dict_like.extend_from_slice(b"unique tail content that differs from the header");
    cases.push(("repeated_header_with_unique_tail", dict_like));

    cases
}

const BLOCK_SIZES: [BlockSizeId; 4] = [
    BlockSizeId::Max64Kb,
    BlockSizeId::Max256Kb,
    BlockSizeId::Max1Mb,
    BlockSizeId::Max4Mb,
];

const BLOCK_MODES: [BlockMode; 2] = [BlockMode::Linked, BlockMode::Independent];

fn frame_failure(
    case: &'static str,
    block_size_id: BlockSizeId,
    block_mode: BlockMode,
    detail: String,
) -> SelfTestFailure {
    SelfTestFailure {
        case,
        block_size_id: Some(block_size_id),
        block_mode: Some(block_mode),
        detail,
    }
}

fn untagged_failure(case: &'static str, detail: String) -> SelfTestFailure {
    SelfTestFailure { case, block_size_id: None, block_mode: None, detail }
}

/// Compress and decompress every case in [`corpus`] under every combination
/// of block size, block mode, and `favor_dec_speed`, collecting every
/// failing combination.
fn run_frame_corpus(failures: &mut Vec<SelfTestFailure>) {
    for (name, data) in corpus() {
        for &block_size_id in &BLOCK_SIZES {
            for &block_mode in &BLOCK_MODES {
                for favor_dec_speed in [false, true] {
                    let prefs = Preferences {
                        frame_info: FrameInfo { block_size_id, block_mode, ..FrameInfo::default() },
                        favor_dec_speed,
                        ..Preferences::default()
                    };

                    let outcome = compress_frame(&data, &prefs, &[])
                        .map_err(|e| format!("compress error: {e:?}"))
                        .and_then(|frame| {
                            decompress_frame(&frame, &[]).map_err(|e| format!("decompress error: {e}"))
                        });

                    match outcome {
                        Ok(restored) if restored == data => {}
                        Ok(_) => failures.push(frame_failure(
                            name,
                            block_size_id,
                            block_mode,
                            "round-trip produced different bytes".to_string(),
                        )),
                        Err(detail) => failures.push(frame_failure(name, block_size_id, block_mode, detail)),
                    }
                }
            }
        }
    }
}

/// Raw (frameless) block mode: every compressible corpus case must round-trip
/// through its self-delimiting `00 00` sentinel, and the high-entropy case
/// must be rejected as incompressible rather than silently expanded.
fn run_raw_corpus(failures: &mut Vec<SelfTestFailure>) {
    for (name, data) in corpus() {
        if name == "empty" {
            continue;
        }
        match compress_raw(&data) {
            Ok(compressed) => match decompress_raw(&compressed) {
                Ok(restored) if restored == data => {}
                Ok(_) => failures.push(untagged_failure(name, "raw round-trip mismatch".to_string())),
                Err(e) => failures.push(untagged_failure(name, format!("raw decompress error: {e}"))),
            },
            // Genuinely incompressible input (too short or high-entropy) is a
            // correct outcome for raw mode, not a failure.
            Err(Status::RawIncompressible) => {}
            Err(e) => failures.push(untagged_failure(name, format!("raw compress error: {e}"))),
        }
    }
}

/// Legacy frame format: fixed 8 MiB independent blocks, no footer.
fn run_legacy_corpus(failures: &mut Vec<SelfTestFailure>) {
    for (name, data) in corpus() {
        let outcome = compress_legacy(&data)
            .map_err(|e| format!("legacy compress error: {e}"))
            .and_then(|frame| decompress_legacy(&frame).map_err(|e| format!("legacy decompress error: {e}")));
        match outcome {
            Ok(restored) if restored == data => {}
            Ok(_) => failures.push(untagged_failure(name, "legacy round-trip mismatch".to_string())),
            Err(detail) => failures.push(untagged_failure(name, detail)),
        }
    }
}

/// A block compressed with an external dictionary must only decompress
/// correctly when the same dictionary is supplied back; this exercises the
/// cross-reference path (matches reaching into `window[..start)`) rather
/// than just literal round-tripping.
fn run_dictionary_case(failures: &mut Vec<SelfTestFailure>) {
    let dict = b"common shared header ".repeat(200);
    let data = b"common shared header appears again right here".to_vec();

    let prefs = Preferences::default();
    let frame = match compress_frame(&data, &prefs, &dict) {
        Ok(f) => f,
        Err(e) => {
            failures.push(untagged_failure("dictionary_cross_reference", format!("compress error: {e:?}")));
            return;
        }
    };

    match decompress_frame(&frame, &dict) {
        Ok(restored) if restored == data => {}
        Ok(_) => failures.push(untagged_failure(
            "dictionary_cross_reference",
            "round-trip with matching dictionary produced different bytes".to_string(),
        )),
        Err(e) => {
            failures.push(untagged_failure("dictionary_cross_reference", format!("decompress error: {e}")))
        }
    }

    // A wrong (or missing) dictionary must not silently produce the right
    // bytes back; either it errors, or it decodes to something different.
    if decompress_frame(&frame, &[]) == Ok(data) {
        failures.push(untagged_failure(
            "dictionary_cross_reference",
            "decompressed correctly without the dictionary that matches were taken from".to_string(),
        ));
    }
}

/// `compress_frame(&[])` must be byte-for-byte the minimum possible frame:
/// magic, FLG `0x40`, block-descriptor, header checksum, footer — no
/// content-size field and no checksums of any kind.
fn run_empty_frame_exact_bytes(failures: &mut Vec<SelfTestFailure>) {
    match compress_frame(b"", &Preferences::default(), &[]) {
        Ok(frame) => {
            let expected: [u8; 11] = [0x04, 0x22, 0x4D, 0x18, 0x40, 0x40, 0xC0, 0x00, 0x00, 0x00, 0x00];
            if frame != expected {
                failures.push(untagged_failure(
                    "empty_frame_exact_bytes",
                    format!("expected {expected:02x?}, got {frame:02x?}"),
                ));
            }
        }
        Err(e) => failures.push(untagged_failure("empty_frame_exact_bytes", format!("compress error: {e:?}"))),
    }
}

/// Runs every self-test scenario, collecting every failure found.
pub fn run() -> Vec<SelfTestFailure> {
    let mut failures = Vec::new();
    run_frame_corpus(&mut failures);
    run_raw_corpus(&mut failures);
    run_legacy_corpus(&mut failures);
    run_dictionary_case(&mut failures);
    run_empty_frame_exact_bytes(&mut failures);
    failures
}

fn total_cases() -> usize {
    let corpus_len = corpus().len();
    corpus_len * BLOCK_SIZES.len() * BLOCK_MODES.len() * 2 // frame corpus, incl. favor_dec_speed
        + (corpus_len - 1) // raw corpus (skips "empty")
        + corpus_len // legacy corpus
        + 1 // dictionary cross-reference
        + 1 // empty-frame exact bytes
}

/// Runs [`run`], reporting only pass/fail plus a count — what the CLI's
/// `-test` mode actually needs.
pub fn run_status() -> Result<usize, Status> {
    let total = total_cases();
    if run().is_empty() {
        Ok(total)
    } else {
        Err(Status::InternalDecompression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_corpus_case_round_trips_under_every_option_combination() {
        let failures = run();
        assert!(failures.is_empty(), "self-test failures: {failures:#?}");
    }
}
