//! Logging macros forwarding to [`tracing`].
//!
//! Every event carries the `netdiag` target so the terminal formatter can tell
//! tool output apart from third-party crates.

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        tracing::info!(target: "netdiag", $($arg)*)
    };
}

/// Info-level event rendered with the success marker by the terminal formatter.
#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        tracing::info!(target: "netdiag::success", $($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "netdiag", $($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        tracing::error!(target: "netdiag", $($arg)*)
    };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "netdiag", $($arg)*)
    };
}
