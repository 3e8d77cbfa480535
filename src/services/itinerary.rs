// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Itinerary layout: groups a trip's plans into per-day buckets.
//!
//! Days on which nothing happens and the accommodation stays the same are
//! folded into the separator of the preceding bucket, so a two-week stay
//! in one hotel renders as a single row with "13 days collapsed".

use crate::models::{Accommodation, Activity, FileAttachment, Transportation, Trip};
use crate::time_utils::{
    days_between, days_strictly_between, format_duration, format_duration_minutes, title_case,
};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// What is rendered between a bucket and the next one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DaySeparator {
    /// Travel continues past midnight; no accommodation line.
    Overnight,
    /// A night at `accommodation_id` (or a missing accommodation warning),
    /// followed by `collapsed_days` days not shown.
    #[serde(rename_all = "camelCase")]
    Stay {
        accommodation_id: Option<String>,
        collapsed_days: u32,
    },
}

/// Transportation as listed on one day, with its display labels.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportationEntry<'a> {
    #[serde(flatten)]
    pub transportation: &'a Transportation,
    /// e.g. "Flight TP555 from Munich to Lisbon"
    pub title: String,
    /// e.g. "MUC → LIS"
    pub short_title: String,
    /// "Flight", "Train", or the generic type such as "Bus"
    pub type_label: String,
    /// First departure to last arrival, e.g. "2h 5min"
    pub travel_time: Option<String>,
    /// Connections between legs departing on this day
    pub layovers: Vec<String>,
    pub files: Vec<&'a FileAttachment>,
}

impl<'a> TransportationEntry<'a> {
    fn new(trip: &'a Trip, transportation: &'a Transportation, day: NaiveDate) -> Self {
        let type_label = match transportation {
            Transportation::Flight(_) => "Flight".to_string(),
            Transportation::Train(_) => "Train".to_string(),
            Transportation::Generic(generic) => title_case(&generic.generic_type),
        };
        let travel_time = transportation
            .departure_date_time()
            .zip(transportation.arrival_date_time())
            .map(|(departure, arrival)| format_duration(departure, arrival));

        Self {
            transportation,
            title: transportation.name(),
            short_title: transportation.short_name(),
            type_label,
            travel_time,
            layovers: transportation
                .layovers_on(day)
                .iter()
                .map(|gap| format_duration_minutes(gap.num_minutes()))
                .collect(),
            files: trip.files_for(transportation.id()).collect(),
        }
    }
}

/// One itinerary row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayBucket<'a> {
    pub day: NaiveDate,
    pub activities: Vec<&'a Activity>,
    pub transportation: Vec<TransportationEntry<'a>>,
    pub accommodation: Option<&'a Accommodation>,
    /// `None` for the last bucket of the trip.
    pub separator: Option<DaySeparator>,
}

impl DayBucket<'_> {
    /// Days folded into this bucket's separator.
    pub fn collapsed_days(&self) -> u32 {
        match &self.separator {
            Some(DaySeparator::Stay { collapsed_days, .. }) => *collapsed_days,
            Some(DaySeparator::Overnight) | None => 0,
        }
    }

    fn accommodation_id(&self) -> Option<&str> {
        self.accommodation.map(|a| a.id.as_str())
    }

    fn has_overnight_transportation(&self) -> bool {
        self.transportation
            .iter()
            .any(|entry| entry.transportation.is_overnight_on(self.day))
    }
}

/// Group a trip's activities, transportation and accommodation by day.
///
/// A day gets its own bucket if it is the first or last day of the trip,
/// has activities or transportation, changes accommodation, or is the
/// arrival day of transportation in the previous bucket.
pub fn group_by_days(trip: &Trip) -> Vec<DayBucket<'_>> {
    let mut activities_by_day: BTreeMap<NaiveDate, Vec<&Activity>> = BTreeMap::new();
    for activity in &trip.activities {
        activities_by_day
            .entry(activity.date)
            .or_default()
            .push(activity);
    }

    let mut buckets: Vec<DayBucket<'_>> = Vec::new();

    for day in days_between(trip.start_date, trip.end_date) {
        let activities = activities_by_day.remove(&day).unwrap_or_default();
        let transportation: Vec<TransportationEntry<'_>> = trip
            .transportation
            .iter()
            .filter(|t| t.spans_day(day))
            .map(|t| TransportationEntry::new(trip, t, day))
            .collect();
        let accommodation = trip.accommodation.iter().find(|a| a.covers_night(day));

        let starts_bucket = match buckets.last() {
            None => true,
            Some(previous) => {
                day == trip.end_date
                    || !activities.is_empty()
                    || !transportation.is_empty()
                    || accommodation.map(|a| a.id.as_str()) != previous.accommodation_id()
                    || previous
                        .transportation
                        .iter()
                        .any(|entry| entry.transportation.arrives_on(day))
            }
        };

        if starts_bucket {
            buckets.push(DayBucket {
                day,
                activities,
                transportation,
                accommodation,
                separator: None,
            });
        }
    }

    let next_days: Vec<NaiveDate> = buckets.iter().skip(1).map(|b| b.day).collect();
    for (bucket, next_day) in buckets.iter_mut().zip(next_days) {
        bucket.separator = Some(if bucket.has_overnight_transportation() {
            DaySeparator::Overnight
        } else {
            DaySeparator::Stay {
                accommodation_id: bucket.accommodation_id().map(str::to_string),
                collapsed_days: days_strictly_between(bucket.day, next_day),
            }
        });
    }

    tracing::debug!(
        trip = %trip.tid,
        days = trip.length_in_days(),
        buckets = buckets.len(),
        "Grouped itinerary"
    );

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Airport, Flight, FlightLeg, GenericTransportation, Location};
    use crate::time_utils::parse_wall_clock;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn trip(start: &str, end: &str) -> Trip {
        Trip {
            stid: "st-1".to_string(),
            tid: "t-1".to_string(),
            name: "Portugal".to_string(),
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

    fn activity(id: &str, day: &str) -> Activity {
        Activity {
            id: id.to_string(),
            name: format!("Activity {}", id),
            description: None,
            date: date(day),
            time: None,
            price: None,
            address: None,
            location: None,
        }
    }

    fn stay(id: &str, arrival: &str, departure: &str) -> Accommodation {
        Accommodation {
            id: id.to_string(),
            name: format!("Hotel {}", id),
            description: None,
            arrival_date: date(arrival),
            departure_date: date(departure),
            price: None,
            address: None,
            location: None,
        }
    }

    fn airport(iata: &str) -> Airport {
        Airport {
            iata: iata.to_string(),
            name: format!("{} Airport", iata),
            municipality: iata.to_string(),
            location: Location::new(0.0, 0.0),
        }
    }

    fn flight(legs: &[(&str, &str)]) -> Transportation {
        Transportation::Flight(Flight {
            id: "fl-1".to_string(),
            legs: legs
                .iter()
                .enumerate()
                .map(|(idx, (departure, arrival))| FlightLeg {
                    id: format!("leg-{}", idx),
                    origin: airport("MUC"),
                    destination: airport("LIS"),
                    airline: "LH".to_string(),
                    flight_number: format!("LH{}", 100 + idx),
                    departure_date_time: parse_wall_clock(departure).unwrap(),
                    arrival_date_time: parse_wall_clock(arrival).unwrap(),
                    amadeus_flight_date: None,
                    duration_in_minutes: 180,
                    aircraft: None,
                })
                .collect(),
            pnrs: vec![],
            price: None,
            geo_json: None,
        })
    }

    fn bus(departure: &str, arrival: &str) -> Transportation {
        Transportation::Generic(GenericTransportation {
            id: "bus-1".to_string(),
            name: "Night bus".to_string(),
            generic_type: "BUS".to_string(),
            departure_date_time: parse_wall_clock(departure).unwrap(),
            arrival_date_time: parse_wall_clock(arrival).unwrap(),
            origin: Location::new(38.7, -9.1),
            destination: Location::new(41.1, -8.6),
            origin_address: None,
            destination_address: None,
            price: None,
            geo_json: None,
        })
    }

    fn days(buckets: &[DayBucket<'_>]) -> Vec<NaiveDate> {
        buckets.iter().map(|b| b.day).collect()
    }

    #[test]
    fn test_inverted_trip_is_empty() {
        let t = trip("2025-01-10", "2025-01-01");
        assert!(group_by_days(&t).is_empty());
    }

    #[test]
    fn test_single_day_trip_has_one_bucket() {
        let t = trip("2025-01-10", "2025-01-10");
        let buckets = group_by_days(&t);
        assert_eq!(days(&buckets), vec![date("2025-01-10")]);
        assert_eq!(buckets[0].separator, None);
    }

    #[test]
    fn test_empty_trip_collapses_to_first_and_last_day() {
        let t = trip("2025-01-01", "2025-01-08");
        let buckets = group_by_days(&t);
        assert_eq!(days(&buckets), vec![date("2025-01-01"), date("2025-01-08")]);
        assert_eq!(
            buckets[0].separator,
            Some(DaySeparator::Stay {
                accommodation_id: None,
                collapsed_days: 6
            })
        );
    }

    #[test]
    fn test_activities_and_accommodation_change() {
        let mut t = trip("2025-01-02", "2025-01-10");
        t.activities = vec![
            activity("a3", "2025-01-06"),
            activity("a1", "2025-01-02"),
            activity("a2", "2025-01-04"),
        ];
        t.accommodation = vec![stay("h1", "2025-01-02", "2025-01-06")];

        let buckets = group_by_days(&t);
        assert_eq!(
            days(&buckets),
            vec![
                date("2025-01-02"),
                date("2025-01-04"),
                date("2025-01-06"),
                date("2025-01-10")
            ]
        );
        assert_eq!(buckets[1].activities[0].id, "a2");
        assert_eq!(buckets[1].accommodation.map(|a| a.id.as_str()), Some("h1"));
        assert!(buckets[2].accommodation.is_none());

        let collapsed: Vec<u32> = buckets.iter().map(DayBucket::collapsed_days).collect();
        assert_eq!(collapsed, vec![1, 1, 3, 0]);
        assert_eq!(
            buckets[0].separator,
            Some(DaySeparator::Stay {
                accommodation_id: Some("h1".to_string()),
                collapsed_days: 1
            })
        );
    }

    #[test]
    fn test_consecutive_accommodations_each_start_a_bucket() {
        let mut t = trip("2025-03-01", "2025-03-07");
        t.accommodation = vec![
            stay("lisbon", "2025-03-01", "2025-03-04"),
            stay("porto", "2025-03-04", "2025-03-07"),
        ];

        let buckets = group_by_days(&t);
        assert_eq!(
            days(&buckets),
            vec![date("2025-03-01"), date("2025-03-04"), date("2025-03-07")]
        );
        assert_eq!(buckets[0].collapsed_days(), 2);
        assert_eq!(buckets[1].accommodation.map(|a| a.id.as_str()), Some("porto"));
    }

    #[test]
    fn test_overnight_flight_is_on_both_days() {
        let mut t = trip("2025-01-01", "2025-01-06");
        t.transportation = vec![flight(&[("2025-01-03T22:00", "2025-01-04T06:00")])];

        let buckets = group_by_days(&t);
        assert_eq!(
            days(&buckets),
            vec![
                date("2025-01-01"),
                date("2025-01-03"),
                date("2025-01-04"),
                date("2025-01-06")
            ]
        );
        assert_eq!(buckets[1].transportation.len(), 1);
        assert_eq!(buckets[2].transportation.len(), 1);
        assert_eq!(buckets[1].separator, Some(DaySeparator::Overnight));
        assert_eq!(buckets[2].collapsed_days(), 1);
    }

    #[test]
    fn test_same_day_flight_is_not_overnight() {
        let mut t = trip("2025-01-01", "2025-01-03");
        t.transportation = vec![flight(&[
            ("2025-01-02T08:00", "2025-01-02T10:00"),
            ("2025-01-02T11:30", "2025-01-02T14:00"),
        ])];

        let buckets = group_by_days(&t);
        assert_eq!(
            days(&buckets),
            vec![date("2025-01-01"), date("2025-01-02"), date("2025-01-03")]
        );
        assert!(matches!(
            buckets[1].separator,
            Some(DaySeparator::Stay { .. })
        ));

        let entry = &buckets[1].transportation[0];
        assert_eq!(entry.title, "Flight LH100 from MUC to LIS (+1)");
        assert_eq!(entry.short_title, "MUC → LIS");
        assert_eq!(entry.travel_time.as_deref(), Some("6h 0min"));
        assert_eq!(entry.layovers, vec!["1h 30min"]);
    }

    #[test]
    fn test_multi_day_generic_transportation() {
        let mut t = trip("2025-01-01", "2025-01-07");
        t.transportation = vec![bus("2025-01-03T20:00", "2025-01-05T09:00")];

        let buckets = group_by_days(&t);
        assert_eq!(
            days(&buckets),
            vec![
                date("2025-01-01"),
                date("2025-01-03"),
                date("2025-01-04"),
                date("2025-01-05"),
                date("2025-01-07")
            ]
        );
        assert_eq!(buckets[1].separator, Some(DaySeparator::Overnight));
        assert_eq!(buckets[2].separator, Some(DaySeparator::Overnight));
        assert_eq!(buckets[3].collapsed_days(), 1);

        let entry = &buckets[1].transportation[0];
        assert_eq!(entry.type_label, "Bus");
        assert_eq!(entry.title, "Night bus");
        assert_eq!(entry.travel_time.as_deref(), Some("37h 0min"));
        assert!(entry.layovers.is_empty());
    }

    #[test]
    fn test_transportation_without_legs_is_ignored() {
        let mut t = trip("2025-01-01", "2025-01-04");
        t.transportation = vec![flight(&[])];

        let buckets = group_by_days(&t);
        assert_eq!(days(&buckets), vec![date("2025-01-01"), date("2025-01-04")]);
    }

    #[test]
    fn test_activities_outside_trip_are_dropped() {
        let mut t = trip("2025-01-01", "2025-01-02");
        t.activities = vec![activity("early", "2024-12-31"), activity("late", "2025-01-05")];

        let buckets = group_by_days(&t);
        assert!(buckets.iter().all(|b| b.activities.is_empty()));
    }

    #[test]
    fn test_transportation_entries_list_their_files() {
        let mut t = trip("2025-01-01", "2025-01-04");
        t.transportation = vec![flight(&[("2025-01-02T08:00", "2025-01-02T10:00")])];
        t.files = vec![
            FileAttachment {
                id: "f1".to_string(),
                name: "boarding-pass.pdf".to_string(),
                references: vec!["fl-1".to_string()],
            },
            FileAttachment {
                id: "f2".to_string(),
                name: "hotel.pdf".to_string(),
                references: vec!["h1".to_string()],
            },
        ];

        let buckets = group_by_days(&t);
        let files: Vec<&str> = buckets[1].transportation[0]
            .files
            .iter()
            .map(|f| f.id.as_str())
            .collect();
        assert_eq!(files, vec!["f1"]);

        let json = serde_json::to_value(&buckets).unwrap();
        let entry = &json[1]["transportation"][0];
        assert_eq!(entry["type"], "flight");
        assert_eq!(entry["id"], "fl-1");
        assert_eq!(entry["legs"][0]["flightNumber"], "LH100");
        assert_eq!(entry["typeLabel"], "Flight");
        assert_eq!(entry["shortTitle"], "MUC → LIS");
        assert_eq!(entry["travelTime"], "2h 0min");
        assert_eq!(entry["files"][0]["name"], "boarding-pass.pdf");
    }

    #[test]
    fn test_bucket_serialization() {
        let mut t = trip("2025-01-01", "2025-01-02");
        t.activities = vec![activity("a1", "2025-01-01")];

        let json = serde_json::to_value(group_by_days(&t)).unwrap();
        assert_eq!(json[0]["day"], "2025-01-01");
        assert_eq!(json[0]["activities"][0]["id"], "a1");
        assert_eq!(json[0]["separator"]["kind"], "stay");
        assert_eq!(json[0]["separator"]["collapsedDays"], 0);
        assert!(json[1]["separator"].is_null());
    }
}
