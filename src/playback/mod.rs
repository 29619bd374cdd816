//! Timed frame playback with run-token cancellation.

/// Tick pacing.
pub mod clock;
/// The playback state machine.
pub mod scheduler;
