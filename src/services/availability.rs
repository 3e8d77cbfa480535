// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Date ranges that cannot be picked for a new accommodation booking.
//!
//! Existing bookings and overnight travel block the nights they cover.
//! Boundary days stay selectable so a new booking can start on another
//! booking's checkout day or end on its check-in day.

use crate::models::Trip;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// An inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/lib/generated/")
)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.from <= day && day <= self.to
    }
}

/// Merge overlapping or touching ranges. The result is sorted by start.
pub fn merge_ranges(mut ranges: Vec<DateRange>) -> Vec<DateRange> {
    ranges.sort_by_key(|r| r.from);

    let mut merged: Vec<DateRange> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(current) if range.from <= current.to => {
                current.to = current.to.max(range.to);
            }
            _ => merged.push(range),
        }
    }
    merged
}

/// Ranges to disable in the accommodation date picker.
///
/// `exclude_accommodation_id` is the booking being edited; it must not
/// block itself.
pub fn disabled_date_ranges(trip: &Trip, exclude_accommodation_id: Option<&str>) -> Vec<DateRange> {
    let accommodation = trip
        .accommodation
        .iter()
        .filter(|a| exclude_accommodation_id != Some(a.id.as_str()))
        .map(|a| DateRange::new(a.arrival_date, a.departure_date));

    // Same-day travel does not need a bed.
    let overnight_travel = trip
        .transportation
        .iter()
        .filter_map(|t| t.day_span())
        .filter(|(departure, arrival)| departure != arrival)
        .map(|(departure, arrival)| DateRange::new(departure, arrival));

    let merged = merge_ranges(accommodation.chain(overnight_travel).collect());

    merged
        .into_iter()
        .filter_map(|range| {
            let from = if range.from == trip.start_date {
                range.from
            } else {
                range.from.checked_add_days(Days::new(1))?
            };
            let to = if range.to == trip.end_date {
                range.to
            } else {
                range.to.checked_sub_days(Days::new(1))?
            };
            (from <= to).then_some(DateRange::new(from, to))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Accommodation, GenericTransportation, Location, Transportation};
    use crate::time_utils::parse_wall_clock;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn range(from: &str, to: &str) -> DateRange {
        DateRange::new(date(from), date(to))
    }

    fn trip(start: &str, end: &str) -> Trip {
        Trip {
            stid: String::new(),
            tid: String::new(),
            name: "Trip".to_string(),
            start_date: date(start),
            end_date: date(end),
            description: None,
            image_url: None,
            activities: vec![],
            accommodation: vec![],
            transportation: vec![],
            files: vec![],
        }
    }

    fn stay(id: &str, arrival: &str, departure: &str) -> Accommodation {
        Accommodation {
            id: id.to_string(),
            name: id.to_string(),
            description: None,
            arrival_date: date(arrival),
            departure_date: date(departure),
            price: None,
            address: None,
            location: None,
        }
    }

    fn ferry(departure: &str, arrival: &str) -> Transportation {
        Transportation::Generic(GenericTransportation {
            id: "ferry".to_string(),
            name: "Ferry".to_string(),
            generic_type: "FERRY".to_string(),
            departure_date_time: parse_wall_clock(departure).unwrap(),
            arrival_date_time: parse_wall_clock(arrival).unwrap(),
            origin: Location::new(54.3, 10.1),
            destination: Location::new(59.9, 10.7),
            origin_address: None,
            destination_address: None,
            price: None,
            geo_json: None,
        })
    }

    #[test]
    fn test_merge_overlapping() {
        let merged = merge_ranges(vec![
            range("2025-01-03", "2025-01-10"),
            range("2025-01-01", "2025-01-05"),
        ]);
        assert_eq!(merged, vec![range("2025-01-01", "2025-01-10")]);
    }

    #[test]
    fn test_merge_touching_and_disjoint() {
        let merged = merge_ranges(vec![
            range("2025-01-01", "2025-01-05"),
            range("2025-01-05", "2025-01-07"),
            range("2025-01-09", "2025-01-12"),
            range("2025-01-02", "2025-01-03"),
        ]);
        assert_eq!(
            merged,
            vec![
                range("2025-01-01", "2025-01-07"),
                range("2025-01-09", "2025-01-12")
            ]
        );
        assert!(merge_ranges(vec![]).is_empty());
    }

    #[test]
    fn test_booking_inside_trip_is_trimmed_on_both_ends() {
        let mut t = trip("2025-01-01", "2025-01-20");
        t.accommodation = vec![stay("h1", "2025-01-05", "2025-01-10")];

        let disabled = disabled_date_ranges(&t, None);
        assert_eq!(disabled, vec![range("2025-01-06", "2025-01-09")]);
        assert!(!disabled[0].contains(date("2025-01-05")));
        assert!(!disabled[0].contains(date("2025-01-10")));
    }

    #[test]
    fn test_booking_on_trip_boundaries_is_not_trimmed() {
        let mut t = trip("2025-01-01", "2025-01-20");
        t.accommodation = vec![
            stay("first", "2025-01-01", "2025-01-04"),
            stay("last", "2025-01-15", "2025-01-20"),
        ];

        assert_eq!(
            disabled_date_ranges(&t, None),
            vec![
                range("2025-01-01", "2025-01-03"),
                range("2025-01-16", "2025-01-20")
            ]
        );
    }

    #[test]
    fn test_one_night_booking_leaves_nothing_disabled() {
        let mut t = trip("2025-01-01", "2025-01-20");
        t.accommodation = vec![stay("short", "2025-01-05", "2025-01-06")];

        assert!(disabled_date_ranges(&t, None).is_empty());
    }

    #[test]
    fn test_edited_booking_is_excluded() {
        let mut t = trip("2025-01-01", "2025-01-20");
        t.accommodation = vec![
            stay("editing", "2025-01-05", "2025-01-10"),
            stay("other", "2025-01-12", "2025-01-15"),
        ];

        assert_eq!(
            disabled_date_ranges(&t, Some("editing")),
            vec![range("2025-01-13", "2025-01-14")]
        );
    }

    #[test]
    fn test_overnight_travel_blocks_and_merges() {
        let mut t = trip("2025-01-01", "2025-01-20");
        t.accommodation = vec![stay("h1", "2025-01-05", "2025-01-08")];
        t.transportation = vec![
            ferry("2025-01-08T18:00", "2025-01-10T08:00"),
            ferry("2025-01-15T08:00", "2025-01-15T12:00"),
        ];

        assert_eq!(
            disabled_date_ranges(&t, None),
            vec![range("2025-01-06", "2025-01-09")]
        );
    }
}
