//! Input images: decoding and composing the source canvas that gets sampled.

/// Image decoding and canvas composition.
pub mod decode;
