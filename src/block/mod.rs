//! LZ4 block compression and decompression.
//!
//! The compression side is an optimal parser over a suffix-array match
//! index (`suffix_array`, `enumerator`, `optimizer`, `reducer`, `emitter`,
//! tied together by `compressor`). The decompression side is ported from
//! lz4.c v1.10.0 and kept as the security-critical verifier
//! (`decompress_core`, `decompress_api`).

pub mod compressor;
pub mod decompress_api;
pub mod decompress_core;
pub mod emitter;
pub mod enumerator;
pub mod optimizer;
pub mod reducer;
pub mod suffix_array;
pub mod types;

pub use compressor::{CompressError, Compressor, FavorMode};
pub use decompress_api::{
    decoder_ring_buffer_size, decompress_safe, decompress_safe_partial, decompress_safe_using_dict,
    Lz4StreamDecode,
};
pub use emitter::Lz4Error;
pub use suffix_array::Match;
pub use types::LZ4_DISTANCE_MAX;
