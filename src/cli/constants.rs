//! Display-level infrastructure shared by the CLI's compress/decompress/bench/
//! self-test modes.
//!
//! Ground truth: lz4cli.c's `displayLevel` global and `DISPLAY`/`DISPLAYLEVEL`
//! macros (lz4cli.c lines 82-102), as ported in the teacher crate's
//! `cli::constants` module.

use std::sync::atomic::{AtomicU32, Ordering};

/// 0 = silent, 1 = errors, 2 = normal, 3 = progress, 4 = verbose.
pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(2);

/// Returns the current display level.
#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

/// Sets the display level.
#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

/// Conditionally print to stderr at or above `level` — equivalent to C `DISPLAYLEVEL(l, ...)`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::cli::constants::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}
