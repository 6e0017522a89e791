//! Structured logging for query conversion and evaluation.
//!
//! Every event goes through `tracing` with target `trait_query` and carries a
//! `component` and an `event` field. The library never installs a subscriber;
//! the `trait-query` binary sets one up from `RUST_LOG`.

/// Target for all log events emitted by this crate.
pub(crate) const TARGET: &str = "trait_query";

/// Debug-level event.
///
/// ```ignore
/// log_debug!(component = "postfix", event = "converted", postfix = %postfix);
/// ```
macro_rules! log_debug {
    ($($field:tt)*) => {
        ::tracing::debug!(target: $crate::observability::TARGET, $($field)*)
    };
}

macro_rules! log_info {
    ($($field:tt)*) => {
        ::tracing::info!(target: $crate::observability::TARGET, $($field)*)
    };
}

macro_rules! log_warn {
    ($($field:tt)*) => {
        ::tracing::warn!(target: $crate::observability::TARGET, $($field)*)
    };
}

pub(crate) use log_debug;
pub(crate) use log_info;
pub(crate) use log_warn;
