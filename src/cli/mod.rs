//! Ambient CLI infrastructure (display level, verbosity macros) shared
//! between `main.rs`'s argument handling and the self-test/benchmark modes.

pub mod constants;
