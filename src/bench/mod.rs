//! In-memory compression/decompression benchmarking (`-cbench`/`-dbench`).
//!
//! Ground truth: the teacher crate's `bench` module (`BenchConfig`,
//! `bench_mem`, `runner`), scoped down to a single in-memory buffer —
//! this crate's CLI surface has no multi-file corpus driver.

pub mod config;
pub mod runner;

pub use config::BenchConfig;
pub use runner::{bench_mem, BenchResult};
