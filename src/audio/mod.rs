//! Sonification: matrix coefficients mapped to the pitches of four tone generators.

/// Coefficient-to-pitch mapping and the audio command stream.
pub mod sonify;
/// Offline square-wave renderer for the audio command stream.
pub mod synth;
