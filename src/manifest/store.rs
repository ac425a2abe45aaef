//! In-memory manifest store
//!
//! The store is the ordered flight list for one session. It is never mutated
//! after construction; a reload builds a new store.

use super::flight::{Flight, FlightKey};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManifestStore {
    flights: Vec<Flight>,
}

impl ManifestStore {
    pub fn new(flights: Vec<Flight>) -> Self {
        Self { flights }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    pub fn len(&self) -> usize {
        self.flights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Flight> {
        self.flights.get(index)
    }

    /// First flight in manifest order matching `(date, flight_number)`
    pub fn find(&self, date: &str, flight_number: &str) -> Option<(usize, &Flight)> {
        self.flights
            .iter()
            .enumerate()
            .find(|(_, flight)| flight.matches(date, flight_number))
    }

    /// Flights scheduled on a date, in manifest order, with their manifest index
    pub fn flights_on(&self, date: &str) -> Vec<(usize, &Flight)> {
        let date = date.trim();
        self.flights
            .iter()
            .enumerate()
            .filter(|(_, flight)| flight.date.eq_ignore_ascii_case(date))
            .collect()
    }

    /// First flight in manifest order holding `code`, skipping every flight keyed `exclude`
    pub fn first_other_containing(&self, code: &str, exclude: &FlightKey) -> Option<&Flight> {
        self.flights
            .iter()
            .find(|flight| !exclude.identifies(flight) && flight.contains(code))
    }

    /// Total number of bag codes across all flights
    pub fn total_bags(&self) -> usize {
        self.flights.iter().map(|flight| flight.bag_codes.len()).sum()
    }
}

impl FromIterator<Flight> for ManifestStore {
    fn from_iter<I: IntoIterator<Item = Flight>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
