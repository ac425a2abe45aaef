//! Tests for the timing-based segmenter

use crate::scan::{KeyEvent, Observation, ScanSegmenter, GAP_THRESHOLD_MS};

fn feed(segmenter: &mut ScanSegmenter, events: &[KeyEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match segmenter.observe(event) {
            Observation::Completed(scan) => Some(scan),
            _ => None,
        })
        .collect()
}

#[test]
fn test_fast_burst_with_terminator_emits_scan() {
    let mut segmenter = ScanSegmenter::new();
    let t0 = 1_000;
    let scans = feed(
        &mut segmenter,
        &[
            KeyEvent::char('1', t0),
            KeyEvent::char('2', t0 + 5),
            KeyEvent::char('3', t0 + 10),
            KeyEvent::terminator(t0 + 15),
        ],
    );
    assert_eq!(scans, vec!["123"]);
    assert_eq!(segmenter.pending(), "");
    assert_eq!(segmenter.session().last_event_time, None);
}

#[test]
fn test_slow_typing_discards_previous_characters() {
    let mut segmenter = ScanSegmenter::new();
    let t0 = 1_000;
    let scans = feed(
        &mut segmenter,
        &[KeyEvent::char('a', t0), KeyEvent::char('b', t0 + 200)],
    );
    assert!(scans.is_empty());
    assert_eq!(segmenter.pending(), "b");
    assert_eq!(segmenter.session().last_event_time, Some(t0 + 200));
}

#[test]
fn test_gap_exactly_at_threshold_is_kept() {
    let mut segmenter = ScanSegmenter::new();
    feed(
        &mut segmenter,
        &[
            KeyEvent::char('a', 0),
            KeyEvent::char('b', GAP_THRESHOLD_MS),
        ],
    );
    assert_eq!(segmenter.pending(), "ab");
}

#[test]
fn test_terminator_after_gap_emits_nothing() {
    let mut segmenter = ScanSegmenter::new();
    segmenter.observe(&KeyEvent::char('a', 0));
    let observation = segmenter.observe(&KeyEvent::terminator(GAP_THRESHOLD_MS + 1));
    assert_eq!(observation, Observation::PassThrough);
    assert!(!observation.suppresses_default());
    assert_eq!(segmenter.pending(), "");
}

#[test]
fn test_terminator_on_empty_buffer_passes_through() {
    let mut segmenter = ScanSegmenter::new();
    let observation = segmenter.observe(&KeyEvent::terminator(10));
    assert_eq!(observation, Observation::PassThrough);
}

#[test]
fn test_completed_scan_suppresses_default() {
    let mut segmenter = ScanSegmenter::new();
    segmenter.observe(&KeyEvent::char('x', 0));
    let observation = segmenter.observe(&KeyEvent::terminator(3));
    assert_eq!(observation, Observation::Completed("x".to_string()));
    assert!(observation.suppresses_default());
}

#[test]
fn test_control_keys_are_not_appended() {
    let mut segmenter = ScanSegmenter::new();
    let scans = feed(
        &mut segmenter,
        &[
            KeyEvent::char('1', 0),
            KeyEvent::other(2),
            KeyEvent::char('\u{8}', 3),
            KeyEvent::char('2', 4),
            KeyEvent::terminator(6),
        ],
    );
    assert_eq!(scans, vec!["12"]);
}

#[test]
fn test_text_entry_events_are_ignored() {
    let mut segmenter = ScanSegmenter::new();
    segmenter.observe(&KeyEvent::char('1', 0));

    let observation = segmenter.observe(&KeyEvent::char('z', 500).in_text_entry());
    assert_eq!(observation, Observation::Ignored);
    let observation = segmenter.observe(&KeyEvent::terminator(501).in_text_entry());
    assert_eq!(observation, Observation::Ignored);

    // No buffer or timestamp change
    assert_eq!(segmenter.pending(), "1");
    assert_eq!(segmenter.session().last_event_time, Some(0));
}

#[test]
fn test_watchdog_deadline_follows_last_character() {
    let mut segmenter = ScanSegmenter::new();
    assert_eq!(segmenter.deadline(), None);

    segmenter.observe(&KeyEvent::char('1', 100));
    assert_eq!(segmenter.deadline(), Some(100 + GAP_THRESHOLD_MS));

    segmenter.observe(&KeyEvent::char('2', 140));
    assert_eq!(segmenter.deadline(), Some(140 + GAP_THRESHOLD_MS));

    assert!(!segmenter.expire(140 + GAP_THRESHOLD_MS));
    assert_eq!(segmenter.pending(), "12");

    assert!(segmenter.expire(141 + GAP_THRESHOLD_MS));
    assert_eq!(segmenter.pending(), "");
    assert_eq!(segmenter.deadline(), None);
    assert!(!segmenter.expire(10_000));
}

#[test]
fn test_reset_clears_session() {
    let mut segmenter = ScanSegmenter::new();
    segmenter.observe(&KeyEvent::char('1', 0));
    segmenter.reset();
    assert_eq!(segmenter.pending(), "");
    assert_eq!(segmenter.deadline(), None);
}
