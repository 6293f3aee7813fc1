//! Optimal-parsing LZ4-compatible compressor and verifying decompressor.
//!
//! `block` holds the core engine: a suffix-array match index feeding a
//! backward bit-cost optimizer, plus a verbatim port of the LZ4 reference
//! decompressor as the safety-critical verifier. `frame` wraps that engine
//! in the standard LZ4 frame container, the legacy frame format, and a
//! headerless raw block mode.

pub mod bench;
pub mod block;
pub mod cli;
pub mod config;
pub mod dictionary;
pub mod frame;
pub mod selftest;
pub mod status;
pub mod xxhash;

pub use block::{CompressError, Compressor, FavorMode};
pub use frame::{compress_frame, decompress_frame};
pub use status::Status;
