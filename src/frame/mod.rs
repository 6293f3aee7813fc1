//! LZ4 Frame format: modern container, legacy container, and raw (headerless)
//! block mode.
//!
//! Corresponds to lz4frame.c / lz4frame.h from LZ4 v1.10.0, adapted around a
//! single optimal-parsing [`crate::block::Compressor`] rather than the
//! reference's incremental fast/HC streaming contexts.

pub mod compress;
pub mod decompress;
pub mod header;
pub mod legacy;
pub mod raw;
pub mod types;

pub use compress::{compress_frame, compress_frame_status, HISTORY, LZ4F_MAGICNUMBER};
pub use decompress::{decompress_frame, get_frame_info, FrameHeader};
pub use header::lz4f_compress_frame_bound;
pub use legacy::{compress_legacy, decompress_legacy};
pub use raw::{compress_raw, decompress_raw};
pub use types::{
    BlockChecksum, BlockMode, BlockSizeId, ContentChecksum, FrameInfo, FrameType, Lz4FError,
    Preferences,
};
