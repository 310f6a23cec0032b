//! Logging facilities for Horizon Dashboard.
//!
//! Horizon Dashboard uses the `tracing` crate for instrumentation. The
//! libraries never install a subscriber; applications (and tests that want
//! output) do that themselves:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_dashboard=debug,horizon_dashboard_core=info")
//!     .init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_dashboard_core::signal";
    /// Store notification target.
    pub const STORE: &str = "horizon_dashboard_core::store";
    /// Form controls target.
    pub const FORMS: &str = "horizon_dashboard::forms";
    /// Stream (issue selection) components target.
    pub const STREAM: &str = "horizon_dashboard::stream";
    /// Discover (saved query) views target.
    pub const DISCOVER: &str = "horizon_dashboard::discover";
    /// Configuration loading target.
    pub const CONFIG: &str = "horizon_dashboard::config";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Wrap a render pass or a commit in one of these to time it.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: "horizon_dashboard::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span() {
        let _span = PerfSpan::new("render");
        tracing::debug!(target: targets::FORMS, "inside perf span");
    }
}
