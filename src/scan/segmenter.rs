//! Timing-based scan segmenter
//!
//! Characters accumulate in a pending buffer while they keep arriving within
//! [`GAP_THRESHOLD_MS`] of each other. A terminator commits the buffer as one
//! scan; a longer silence discards it. The silence watchdog is a single
//! deadline derived from the last accepted character, so the host only ever
//! has one timeout to poll.

use super::event::{Key, KeyEvent};

/// Longest pause between two characters of the same scan, in milliseconds
pub const GAP_THRESHOLD_MS: u64 = 150;

/// Transient decoder state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSession {
    pub pending_buffer: String,
    pub last_event_time: Option<u64>,
}

impl ScanSession {
    fn reset(&mut self) {
        self.pending_buffer.clear();
        self.last_event_time = None;
    }

    fn is_stale_at(&self, at_ms: u64) -> bool {
        self.last_event_time
            .is_some_and(|last| at_ms.saturating_sub(last) > GAP_THRESHOLD_MS)
    }
}

/// What the segmenter did with one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    /// Event belonged to a text-entry field and was not looked at
    Ignored,
    /// Character appended to the pending buffer
    Buffered,
    /// Terminator committed a scan; the terminator must not reach anything else
    Completed(String),
    /// Nothing to do: terminator on an empty buffer, or a control key
    PassThrough,
}

impl Observation {
    /// Whether the host must suppress the key's default action
    pub fn suppresses_default(&self) -> bool {
        matches!(self, Observation::Completed(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScanSegmenter {
    session: ScanSession,
}

impl ScanSegmenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one key event
    pub fn observe(&mut self, event: &KeyEvent) -> Observation {
        if event.text_entry {
            return Observation::Ignored;
        }

        if self.session.is_stale_at(event.at_ms) {
            if !self.session.pending_buffer.is_empty() {
                log::trace!(
                    "Discarding {:?} after {} ms gap",
                    self.session.pending_buffer,
                    event.at_ms.saturating_sub(self.session.last_event_time.unwrap_or_default())
                );
            }
            self.session.reset();
        }

        match event.key {
            Key::Terminator => {
                if self.session.pending_buffer.is_empty() {
                    return Observation::PassThrough;
                }
                let scan = std::mem::take(&mut self.session.pending_buffer);
                self.session.reset();
                log::debug!("Raw scan: {:?}", scan);
                Observation::Completed(scan)
            }
            Key::Char(c) => {
                self.session.pending_buffer.push(c);
                self.session.last_event_time = Some(event.at_ms);
                Observation::Buffered
            }
            Key::Other => Observation::PassThrough,
        }
    }

    /// Time after which the pending buffer is discarded, if anything is pending
    pub fn deadline(&self) -> Option<u64> {
        if self.session.pending_buffer.is_empty() {
            return None;
        }
        self.session
            .last_event_time
            .map(|last| last.saturating_add(GAP_THRESHOLD_MS))
    }

    /// Run the silence watchdog; returns true when the buffer was discarded
    pub fn expire(&mut self, now_ms: u64) -> bool {
        match self.deadline() {
            Some(deadline) if now_ms > deadline => {
                log::trace!("Scan buffer {:?} timed out", self.session.pending_buffer);
                self.session.reset();
                true
            }
            _ => false,
        }
    }

    pub fn pending(&self) -> &str {
        &self.session.pending_buffer
    }

    pub fn session(&self) -> &ScanSession {
        &self.session
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }
}
