//! Zero-cost logging helpers.
//!
//! With the `tracing` feature enabled these macros forward to the `tracing` crate;
//! otherwise they expand to nothing.
//!
//! ```bash
//! # Rebalancing events at trace level
//! RUST_LOG=wavl_tree=trace cargo test --features tracing
//! ```
//!
//! Insert and remove outcomes are logged at `debug`; promotions, demotions and
//! rotations at `trace`.

#![allow(unused_macros, unused_imports)]

/// Trace-level logging. Compiles to no-op without `tracing` feature.
#[cfg(feature = "tracing")]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

/// Debug-level logging. Compiles to no-op without `tracing` feature.
#[cfg(feature = "tracing")]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

pub(crate) use debug_log;
pub(crate) use trace_log;
