//! Logging macros for tree events.
//!
//! With the `tracing` feature these forward to the `tracing` crate, so any
//! installed subscriber observes node allocation, clearing, balancing and
//! copying. Without it they expand to nothing.
//!
//! ```bash
//! RUST_LOG=bintree=trace cargo test --features tracing
//! ```

#![allow(unused_macros)]

/// Trace-level event, emitted once per node allocation.
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

/// Debug-level event, emitted once per whole-tree operation.
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
