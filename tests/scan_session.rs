//! End-to-end scanning session tests
//!
//! A manifest file is loaded through the public loader, then key events are
//! pushed through the desk exactly as the console would.

use bagcheck::app::desk::ScanDesk;
use bagcheck::manifest::{load_manifest, LoaderOptions, ManifestSource, ManifestStatus};
use bagcheck::reconcile::Outcome;
use bagcheck::scan::{CodeNormalizer, KeyEvent, ScanEvents};
use tempfile::TempDir;

const MANIFEST: &str = "\
Fecha;Vuelo;Cargador;Total;Obs;Valijas
2024-01-15;FO5024;Ana;3;;1001;1002;1003
2024-01-15;FO5030;Luis;1;;2001
16/01/2024;FO5024;Ana;1;;3001
";

async fn load_desk() -> (TempDir, ScanDesk) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("manifest.csv");
    std::fs::write(&path, MANIFEST).unwrap();

    let load = load_manifest(&ManifestSource::File(path), &LoaderOptions::default()).await;
    assert!(matches!(load.status, ManifestStatus::Loaded { flights: 3, .. }));
    (temp, ScanDesk::new(load, CodeNormalizer::default()))
}

/// Key events of a scanner typing `code` starting at `start` ms
fn scanner_burst(code: &str, start: u64) -> Vec<KeyEvent> {
    let mut events: Vec<KeyEvent> = code
        .chars()
        .enumerate()
        .map(|(i, c)| KeyEvent::char(c, start + 3 * i as u64))
        .collect();
    events.push(KeyEvent::terminator(start + 3 * code.len() as u64));
    events
}

fn feed(desk: &mut ScanDesk, events: &[KeyEvent]) -> Vec<Outcome> {
    events
        .iter()
        .filter_map(|event| desk.handle_key(event).outcome)
        .collect()
}

#[tokio::test]
async fn test_full_session() {
    let (_temp, mut desk) = load_desk().await;

    // Scanning before selecting a flight
    let outcomes = feed(&mut desk, &scanner_burst("1001", 0));
    assert!(matches!(outcomes[..], [Outcome::NoFlightSelected { .. }]));

    desk.select("15/01/2024", "fo5024").unwrap();

    let mut events = scanner_burst("0-1001", 1_000);
    events.extend(scanner_burst("1001", 2_000));
    events.extend(scanner_burst("2001", 3_000));
    events.extend(scanner_burst("3001", 4_000));
    events.extend(scanner_burst("9999", 5_000));
    events.extend(scanner_burst("1003", 6_000));
    let outcomes = feed(&mut desk, &events);

    let labels: Vec<_> = outcomes.iter().map(|o| o.label()).collect();
    assert_eq!(
        labels,
        vec!["OK", "OK", "WRONG FLIGHT", "WRONG FLIGHT", "UNKNOWN", "OK"]
    );
    assert!(matches!(
        outcomes[1],
        Outcome::MatchCurrent {
            newly_scanned: false,
            ..
        }
    ));
    match &outcomes[3] {
        Outcome::MatchOther { flight, .. } => {
            assert_eq!(flight.flight_number, "FO5024");
            assert_eq!(flight.date, "2024-01-16");
        }
        other => panic!("unexpected outcome {:?}", other),
    }

    let summary = desk.summary();
    assert_eq!(summary.scanned, 2);
    assert_eq!(summary.total_bags, 3);
}

#[tokio::test]
async fn test_typing_between_scans_does_not_leak() {
    let (_temp, mut desk) = load_desk().await;
    desk.select("2024-01-15", "FO5024").unwrap();

    // An operator types slowly, then a scan arrives
    let mut events = vec![
        KeyEvent::char('1', 0),
        KeyEvent::char('0', 300),
        KeyEvent::terminator(700),
    ];
    events.extend(scanner_burst("1002", 1_000));
    let outcomes = feed(&mut desk, &events);

    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].code(), "1002");
}

#[test]
fn test_stream_over_recorded_events() {
    let mut events = scanner_burst("ABC", 0);
    events.push(KeyEvent::char('x', 100).in_text_entry());
    events.extend(scanner_burst("DEF", 120));
    let scans: Vec<String> = events.into_iter().scans().collect();
    assert_eq!(scans, vec!["ABC", "DEF"]);
}
