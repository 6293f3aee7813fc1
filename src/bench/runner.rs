//! Timed compress/decompress loop over an in-memory buffer.
//!
//! Ground truth: the teacher crate's `bench::runner`, trimmed to the
//! single-buffer, best-of-N-iterations measurement this crate's `-cbench`/
//! `-dbench` CLI modes need (no multi-file corpus, no separate warm-up
//! phase).

use std::time::{Duration, Instant};

use crate::bench::config::BenchConfig;
use crate::frame::{compress_frame, decompress_frame, Preferences};
use crate::status::Status;

/// Result of a single [`bench_mem`] run.
#[derive(Debug, Clone, Copy)]
pub struct BenchResult {
    /// Number of timed iterations completed.
    pub iterations: u32,
    /// Shortest single-iteration wall-clock duration observed.
    pub best: Duration,
    /// Throughput implied by `best`, in MiB/s, relative to `reference_size`.
    pub mb_per_sec: f64,
}

impl BenchResult {
    fn from_best(best: Duration, iterations: u32, reference_size: usize) -> Self {
        let mb = reference_size as f64 / (1024.0 * 1024.0);
        let mb_per_sec = if best.as_secs_f64() > 0.0 {
            mb / best.as_secs_f64()
        } else {
            f64::INFINITY
        };
        BenchResult {
            iterations,
            best,
            mb_per_sec,
        }
    }
}

/// Benchmark compressing `data` with `prefs`, repeating until [`BenchConfig::nb_seconds`]
/// have elapsed (at least one iteration always runs), and report the fastest iteration.
pub fn bench_mem(data: &[u8], prefs: &Preferences, config: &BenchConfig) -> Result<BenchResult, Status> {
    if config.decode_only {
        let frame = compress_frame(data, prefs, &[]).map_err(|_| Status::InternalCompression)?;
        let budget = Duration::from_secs(config.nb_seconds as u64);
        let start = Instant::now();
        let mut best = Duration::MAX;
        let mut iterations = 0u32;
        loop {
            let t0 = Instant::now();
            let restored = decompress_frame(&frame, &[])?;
            let elapsed = t0.elapsed();
            debug_assert_eq!(restored.len(), data.len());
            best = best.min(elapsed);
            iterations += 1;
            if start.elapsed() >= budget && iterations > 0 {
                break;
            }
        }
        Ok(BenchResult::from_best(best, iterations, data.len()))
    } else {
        let budget = Duration::from_secs(config.nb_seconds as u64);
        let start = Instant::now();
        let mut best = Duration::MAX;
        let mut iterations = 0u32;
        loop {
            let t0 = Instant::now();
            compress_frame(data, prefs, &[]).map_err(|_| Status::InternalCompression)?;
            let elapsed = t0.elapsed();
            best = best.min(elapsed);
            iterations += 1;
            if start.elapsed() >= budget && iterations > 0 {
                break;
            }
        }
        Ok(BenchResult::from_best(best, iterations, data.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Preferences;

    #[test]
    fn compress_bench_runs_at_least_one_iteration() {
        let data = b"the quick brown fox jumps over the lazy dog".repeat(64);
        let mut config = BenchConfig::default();
        config.set_nb_seconds(0);
        let result = bench_mem(&data, &Preferences::default(), &config).unwrap();
        assert!(result.iterations >= 1);
        assert!(result.mb_per_sec.is_finite() || result.mb_per_sec.is_infinite());
    }

    #[test]
    fn decompress_bench_runs_at_least_one_iteration() {
        let data = b"the quick brown fox jumps over the lazy dog".repeat(64);
        let mut config = BenchConfig::default();
        config.set_nb_seconds(0).set_decode_only(true);
        let result = bench_mem(&data, &Preferences::default(), &config).unwrap();
        assert!(result.iterations >= 1);
    }
}
