//! Lazy scan sequence over a key event source

use super::event::KeyEvent;
use super::segmenter::{Observation, ScanSegmenter};

/// Iterator of completed scans, in arrival order
///
/// Each stream owns a fresh segmenter, so starting a new stream starts a new
/// session.
#[derive(Debug)]
pub struct ScanStream<I> {
    events: I,
    segmenter: ScanSegmenter,
}

impl<I> ScanStream<I>
where
    I: Iterator<Item = KeyEvent>,
{
    pub fn new(events: I) -> Self {
        Self {
            events,
            segmenter: ScanSegmenter::new(),
        }
    }

    /// Characters received since the last committed scan
    pub fn pending(&self) -> &str {
        self.segmenter.pending()
    }
}

impl<I> Iterator for ScanStream<I>
where
    I: Iterator<Item = KeyEvent>,
{
    type Item = String;

    fn next(&mut self) -> Option<String> {
        for event in self.events.by_ref() {
            if let Observation::Completed(scan) = self.segmenter.observe(&event) {
                return Some(scan);
            }
        }
        None
    }
}

/// Adapter turning any key event iterator into a [`ScanStream`]
pub trait ScanEvents: Iterator<Item = KeyEvent> + Sized {
    fn scans(self) -> ScanStream<Self> {
        ScanStream::new(self)
    }
}

impl<I: Iterator<Item = KeyEvent>> ScanEvents for I {}
