//! Barcode scan reconstruction
//!
//! A USB scanner acting as a keyboard types a whole tag within a few
//! milliseconds and finishes with Enter. Human typing on the same channel is
//! much slower. The segmenter separates the two purely by timing.

pub mod event;
pub mod normalize;
pub mod segmenter;
pub mod stream;

pub use event::{Key, KeyEvent};
pub use normalize::{CodeNormalizer, DEFAULT_STRIP_PREFIX};
pub use segmenter::{Observation, ScanSegmenter, ScanSession, GAP_THRESHOLD_MS};
pub use stream::{ScanEvents, ScanStream};

#[cfg(test)]
mod tests;
