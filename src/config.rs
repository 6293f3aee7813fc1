// config.rs — Compile-time configuration constants.
// Migrated from lz4conf.h (lz4-1.10.0/programs).
//
// Platform-detection macros from platform.h are not needed in Rust: Rust
// handles 64-bit sizes natively and file I/O does not require binary-mode
// toggling. IS_CONSOLE(stream) is covered by std::io::IsTerminal at each
// call site instead of a constant here. The engine is single-threaded per
// §5, so no worker-count configuration exists.

// Default block size ID (7 = 4 MB blocks).
// Corresponds to LZ4_BLOCKSIZEID_DEFAULT in lz4conf.h.
// Overridden at runtime by the `-B#` command-line flag.
pub const BLOCKSIZEID_DEFAULT: u32 = 7;
