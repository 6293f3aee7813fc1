//! Benchmark configuration.
//!
//! Ground truth: the teacher crate's `bench::config::BenchConfig`, trimmed
//! to the fields this crate's in-memory, single-file `-cbench`/`-dbench`
//! modes actually use.

/// Minimum benchmark duration in seconds, mirroring the teacher crate's
/// `NBSECONDS` default.
pub const NBSECONDS: u32 = 3;

/// Runtime benchmark parameters for [`super::bench_mem`].
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Verbosity level: 0 = silent, 1 = errors, 2 = results (default).
    pub display_level: u32,
    /// Minimum duration, in seconds, to keep re-running the timed loop.
    pub nb_seconds: u32,
    /// Benchmark decompression instead of compression.
    pub decode_only: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            display_level: 2,
            nb_seconds: NBSECONDS,
            decode_only: false,
        }
    }
}

impl BenchConfig {
    pub fn set_notification_level(&mut self, level: u32) -> &mut Self {
        self.display_level = level;
        self
    }

    pub fn set_nb_seconds(&mut self, nb_seconds: u32) -> &mut Self {
        self.nb_seconds = nb_seconds;
        self
    }

    pub fn set_decode_only(&mut self, set: bool) -> &mut Self {
        self.decode_only = set;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_nb_seconds() {
        assert_eq!(BenchConfig::default().nb_seconds, 3);
    }

    #[test]
    fn setter_chain() {
        let mut cfg = BenchConfig::default();
        cfg.set_nb_seconds(1).set_decode_only(true);
        assert_eq!(cfg.nb_seconds, 1);
        assert!(cfg.decode_only);
    }
}
