//! Action trait for host-side state mutations

use std::fmt::Debug;

/// Marker trait for the actions a host dispatches to its store
///
/// Widgets never mutate selection or visibility themselves. They call the
/// constructor functions passed through props and hand the resulting actions
/// back to the host, which feeds them to its reducer.
///
/// Actions are:
/// - Clone: they may be logged before and after reduction
/// - Debug: for logging and test assertions
/// - Send + 'static: so they can travel over the host's action channel
pub trait Action: Clone + Debug + Send + 'static {
    /// Action name used in logs
    fn name(&self) -> &'static str;
}
