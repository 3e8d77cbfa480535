// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Flight lookup by flight number and date.
//!
//! Schedules come from Amadeus. Airports, aircraft and airline names
//! come from OpenTravelData.

use crate::config::Config;
use crate::error::AppError;
use crate::models::{Flight, FlightLeg};
use crate::services::amadeus::{AmadeusClient, DatedFlight, ScheduledLeg, Timing};
use crate::services::geocoding::{build_http_client, LookupError};
use crate::services::journey_map::JourneyMap;
use crate::services::opentraveldata::{AirportRecord, OpenTravelDataClient};
use crate::time_utils::{format_wall_clock, wall_clock};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::LazyLock;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

const MAX_FLIGHT_LEGS: u64 = 16;

static ISO_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^P(?:([0-9]+)D)?(?:T(?:([0-9]+)H)?(?:([0-9]+)M)?(?:[0-9]+S)?)?$")
        .expect("duration pattern is valid")
});

/// One flight of a booking, e.g. `LH 1790` on 2025-03-01.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/lib/generated/")
)]
pub struct FlightLegQuery {
    pub date: NaiveDate,
    #[validate(length(min = 3, max = 10))]
    pub flight_number: String,
    /// Needed when the flight number operates several legs that day
    #[serde(default)]
    #[validate(length(equal = 3))]
    pub origin_airport: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/lib/generated/")
)]
pub struct FlightQuery {
    #[validate(length(min = 1, max = MAX_FLIGHT_LEGS), nested)]
    pub legs: Vec<FlightLegQuery>,
}

/// A leg the caller can pick with `originAirport`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/lib/generated/")
)]
pub struct AmbiguousFlightChoice {
    pub origin_iata: String,
    pub destination_iata: String,
    #[serde(with = "wall_clock")]
    pub departure_date_time: NaiveDateTime,
}

#[derive(Clone, Copy)]
struct ScheduledOperation<'a> {
    flight: &'a DatedFlight,
    leg: &'a ScheduledLeg,
}

struct LegSchedule {
    departure: NaiveDateTime,
    arrival: NaiveDateTime,
    duration_in_minutes: u32,
}

#[derive(Clone)]
pub struct FlightService {
    amadeus: AmadeusClient,
    optd: OpenTravelDataClient,
}

impl FlightService {
    pub fn new(amadeus: AmadeusClient, optd: OpenTravelDataClient) -> Self {
        Self { amadeus, optd }
    }

    pub fn from_config(config: &Config) -> Result<Self, LookupError> {
        let http = build_http_client(config)?;
        let credentials = config
            .amadeus_api_key
            .clone()
            .zip(config.amadeus_api_secret.clone());
        Ok(Self::new(
            AmadeusClient::new(http.clone(), &config.amadeus_url, credentials),
            OpenTravelDataClient::new(http, &config.optd_url),
        ))
    }

    /// Look up every requested leg. Legs come back in departure order.
    pub async fn find_flight(&self, query: &FlightQuery) -> Result<Flight, AppError> {
        let mut legs = Vec::with_capacity(query.legs.len());
        for leg in &query.legs {
            legs.push(self.find_leg(leg).await?);
        }
        legs.sort_by_key(|leg| leg.departure_date_time);

        let geo_json = flight_map(&legs)?;
        tracing::info!(legs = legs.len(), "Flight found");
        Ok(Flight {
            id: String::new(),
            legs,
            pnrs: Vec::new(),
            price: None,
            geo_json,
        })
    }

    async fn find_leg(&self, query: &FlightLegQuery) -> Result<FlightLeg, AppError> {
        let (carrier_code, number) = split_flight_number(&query.flight_number).ok_or_else(|| {
            AppError::BadRequest(format!("invalid flight number '{}'", query.flight_number))
        })?;
        let flights = self.amadeus.schedule(query.date, &carrier_code, &number).await?;
        let operations: Vec<ScheduledOperation> = flights
            .iter()
            .flat_map(|flight| flight.legs.iter().map(move |leg| ScheduledOperation { flight, leg }))
            .collect();

        let Some(origin) = query.origin_airport.as_deref() else {
            return match operations.as_slice() {
                [] => Err(no_matching_flight(query)),
                [operation] => self.convert(*operation).await,
                _ => {
                    let mut choices = Vec::with_capacity(operations.len());
                    for operation in &operations {
                        choices.push(self.choice(*operation).await?);
                    }
                    Err(AppError::AmbiguousFlight {
                        flight_number: query.flight_number.clone(),
                        choices,
                    })
                }
            };
        };

        let operation = operations
            .into_iter()
            .find(|op| op.leg.board_point_iata_code.eq_ignore_ascii_case(origin))
            .ok_or_else(|| no_matching_flight(query))?;
        self.convert(operation).await
    }

    async fn airport(&self, iata: &str) -> Result<AirportRecord, AppError> {
        self.optd.airport(iata).await?.ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!("airport {} missing from OpenTravelData", iata))
        })
    }

    async fn choice(
        &self,
        operation: ScheduledOperation<'_>,
    ) -> Result<AmbiguousFlightChoice, AppError> {
        let origin = self.airport(&operation.leg.board_point_iata_code).await?;
        let destination = self.airport(&operation.leg.off_point_iata_code).await?;
        let schedule = leg_schedule(operation, &origin, &destination)?;
        Ok(AmbiguousFlightChoice {
            origin_iata: operation.leg.board_point_iata_code.clone(),
            destination_iata: operation.leg.off_point_iata_code.clone(),
            departure_date_time: schedule.departure,
        })
    }

    async fn convert(&self, operation: ScheduledOperation<'_>) -> Result<FlightLeg, AppError> {
        let origin = self.airport(&operation.leg.board_point_iata_code).await?;
        let destination = self.airport(&operation.leg.off_point_iata_code).await?;
        let schedule = leg_schedule(operation, &origin, &destination)?;

        let aircraft = match &operation.leg.aircraft_equipment {
            Some(equipment) => self.optd.aircraft_name(&equipment.aircraft_type).await?,
            None => None,
        };
        let designator = &operation.flight.flight_designator;
        let airline = self
            .optd
            .airline_name(&designator.carrier_code)
            .await?
            .unwrap_or_else(|| designator.carrier_code.clone());

        Ok(FlightLeg {
            id: String::new(),
            origin: origin.airport,
            destination: destination.airport,
            airline,
            flight_number: format!("{} {}", designator.carrier_code, designator.flight_number),
            departure_date_time: schedule.departure,
            arrival_date_time: schedule.arrival,
            amadeus_flight_date: Some(operation.flight.scheduled_departure_date),
            duration_in_minutes: schedule.duration_in_minutes,
            aircraft,
        })
    }
}

fn no_matching_flight(query: &FlightLegQuery) -> AppError {
    AppError::NotFound(format!(
        "no matching flight found for {} on {}",
        query.flight_number, query.date
    ))
}

/// `"LH 1790"` or `"lh1790"` to `("LH", "1790")`.
fn split_flight_number(raw: &str) -> Option<(String, String)> {
    let raw = raw.trim();
    let split = raw.char_indices().nth(2)?.0;
    let (carrier, number) = raw.split_at(split);
    let number = number.trim();
    let valid_carrier = carrier.chars().all(|c| c.is_ascii_alphanumeric());
    let valid_number = (1..=4).contains(&number.len()) && number.chars().all(|c| c.is_ascii_digit());
    (valid_carrier && valid_number).then(|| (carrier.to_ascii_uppercase(), number.to_string()))
}

/// Scheduled local time, preferring the timing with `qualifier`. The
/// value's offset is dropped.
fn scheduled_time(timings: &[Timing], qualifier: &str) -> Result<NaiveDateTime, LookupError> {
    let timing = timings
        .iter()
        .find(|t| t.qualifier == qualifier)
        .or_else(|| timings.first())
        .ok_or_else(|| LookupError::Decode("flight point without timings".into()))?;
    let invalid = || LookupError::Decode(format!("invalid schedule time '{}'", timing.value));
    let local = timing.value.get(..16).ok_or_else(invalid)?;
    NaiveDateTime::parse_from_str(local, "%Y-%m-%dT%H:%M").map_err(|_| invalid())
}

/// ISO 8601 durations as Amadeus writes them, e.g. `PT13H50M` or `P1DT2H`.
fn parse_iso_duration(raw: &str) -> Result<Duration, LookupError> {
    let invalid = || LookupError::Decode(format!("invalid leg duration '{}'", raw));
    let captures = ISO_DURATION.captures(raw).ok_or_else(invalid)?;

    let mut minutes: i64 = 0;
    for (group, factor) in [(1, 24 * 60), (2, 60), (3, 1)] {
        if let Some(value) = captures.get(group) {
            let value: i64 = value.as_str().parse().map_err(|_| invalid())?;
            minutes = value
                .checked_mul(factor)
                .and_then(|v| minutes.checked_add(v))
                .ok_or_else(invalid)?;
        }
    }
    Duration::try_minutes(minutes).ok_or_else(invalid)
}

fn offset_at(airport: &AirportRecord, date: NaiveDate) -> Result<Duration, LookupError> {
    airport.utc_offset_on(date).ok_or_else(|| {
        LookupError::Decode(format!("no UTC offset known for {}", airport.airport.iata))
    })
}

/// Local time at `to` when `by` has passed since `local` at `from`.
fn shift(
    local: NaiveDateTime,
    from: &AirportRecord,
    by: Duration,
    to: &AirportRecord,
) -> Result<NaiveDateTime, LookupError> {
    let utc = local - offset_at(from, local.date())? + by;
    Ok(utc + offset_at(to, utc.date())?)
}

/// Departure and arrival times of a leg. A time missing from the
/// schedule is derived from the other one and the leg duration.
fn leg_schedule(
    operation: ScheduledOperation<'_>,
    origin: &AirportRecord,
    destination: &AirportRecord,
) -> Result<LegSchedule, LookupError> {
    let leg = operation.leg;
    let duration = parse_iso_duration(&leg.scheduled_leg_duration)?;

    let departure = operation
        .flight
        .flight_point(&leg.board_point_iata_code)
        .and_then(|point| point.departure.as_ref())
        .map(|departure| scheduled_time(&departure.timings, "STD"))
        .transpose()?;
    let arrival = operation
        .flight
        .flight_point(&leg.off_point_iata_code)
        .and_then(|point| point.arrival.as_ref())
        .map(|arrival| scheduled_time(&arrival.timings, "STA"))
        .transpose()?;

    let (departure, arrival) = match (departure, arrival) {
        (Some(departure), Some(arrival)) => (departure, arrival),
        (Some(departure), None) => (departure, shift(departure, origin, duration, destination)?),
        (None, Some(arrival)) => (shift(arrival, destination, -duration, origin)?, arrival),
        (None, None) => {
            return Err(LookupError::Decode(format!(
                "no scheduled times for {}-{}",
                leg.board_point_iata_code, leg.off_point_iata_code
            )))
        }
    };

    let duration_in_minutes = u32::try_from(duration.num_minutes()).map_err(|_| {
        LookupError::Decode(format!("invalid leg duration '{}'", leg.scheduled_leg_duration))
    })?;
    Ok(LegSchedule {
        departure,
        arrival,
        duration_in_minutes,
    })
}

fn flight_map(legs: &[FlightLeg]) -> Result<Option<Value>, AppError> {
    let (Some(first), Some(last)) = (legs.first(), legs.last()) else {
        return Ok(None);
    };

    let mut map = JourneyMap::new(
        "FLIGHT",
        &first.origin.municipality,
        &last.destination.municipality,
    );
    for leg in legs {
        map.add_line(vec![
            leg.origin.location.to_point(),
            leg.destination.location.to_point(),
        ]);
        let properties = json!({
            "flightNumber": leg.flight_number,
            "departureDateTime": format_wall_clock(leg.departure_date_time),
            "arrivalDateTime": format_wall_clock(leg.arrival_date_time),
            "fromIata": leg.origin.iata,
            "toIata": leg.destination.iata,
        });
        map.add_stop_leg(&leg.origin.iata, &leg.origin.location, properties.clone());
        map.add_stop_leg(&leg.destination.iata, &leg.destination.location, properties);
    }

    map.into_json().map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::opentraveldata::tests::{airport_dataset, por_row};
    use httpmock::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn timings(qualifier: &str, value: &str) -> Value {
        json!({ "timings": [{ "qualifier": qualifier, "value": value }] })
    }

    fn dated_flight(carrier: &str, number: u32, points: Vec<Value>, legs: Vec<Value>) -> Value {
        json!({
            "scheduledDepartureDate": "2025-03-01",
            "flightDesignator": { "carrierCode": carrier, "flightNumber": number },
            "flightPoints": points,
            "legs": legs
        })
    }

    fn leg(from: &str, to: &str, aircraft: &str, duration: &str) -> Value {
        json!({
            "boardPointIataCode": from,
            "offPointIataCode": to,
            "aircraftEquipment": { "aircraftType": aircraft },
            "scheduledLegDuration": duration
        })
    }

    fn leg_query(flight_number: &str, origin: Option<&str>) -> FlightLegQuery {
        FlightLegQuery {
            date: date(2025, 3, 1),
            flight_number: flight_number.to_string(),
            origin_airport: origin.map(str::to_string),
        }
    }

    async fn mock_reference_data(server: &MockServer) {
        let airports = airport_dataset(&[
            por_row("MUC", "Munich Airport", (48.3538, 11.7861), "Europe/Berlin", ("1.0", "2.0"), "Munich"),
            por_row("FRA", "Frankfurt Airport", (50.0333, 8.5706), "Europe/Berlin", ("1.0", "2.0"), "Frankfurt am Main"),
            por_row("LIS", "Humberto Delgado Airport", (38.7813, -9.1359), "Europe/Lisbon", ("0.0", "1.0"), "Lisbon"),
            por_row("SYD", "Sydney Airport", (-33.9461, 151.1772), "Australia/Sydney", ("11.0", "10.0"), "Sydney"),
            por_row("SIN", "Changi Airport", (1.3502, 103.9944), "Asia/Singapore", ("8.0", "8.0"), "Singapore"),
            por_row("LHR", "Heathrow Airport", (51.4706, -0.4619), "Europe/London", ("0.0", "1.0"), "London"),
        ]);
        server
            .mock_async(|when, then| {
                when.method(GET).path("/optd_por_public.csv");
                then.status(200).body(airports);
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/optd_aircraft.csv");
                then.status(200).body(
                    "iata_code^manufacturer^model\n32N^Airbus^A320neo\n321^Airbus^A321\n388^Airbus^A380-800",
                );
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/optd_airline_best_known_so_far.csv");
                then.status(200).body(
                    "pk^a^b^c^d^2char_code^e^name^f^g^h^type\nair-lh^^^^DLH^LH^220^Lufthansa^^^^S",
                );
            })
            .await;
    }

    async fn mock_schedule(server: &MockServer, carrier: &str, number: &str, flights: Vec<Value>) {
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v2/schedule/flights")
                    .query_param("carrierCode", carrier)
                    .query_param("flightNumber", number)
                    .query_param("scheduledDepartureDate", "2025-03-01");
                then.status(200).json_body(json!({ "data": flights }));
            })
            .await;
    }

    async fn service(server: &MockServer) -> FlightService {
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/security/oauth2/token");
                then.status(200)
                    .json_body(json!({ "access_token": "tok", "expires_in": 1799 }));
            })
            .await;
        mock_reference_data(server).await;
        FlightService::new(
            AmadeusClient::new(
                reqwest::Client::new(),
                &server.base_url(),
                Some(("key".to_string(), "secret".to_string())),
            ),
            OpenTravelDataClient::new(reqwest::Client::new(), &server.base_url()),
        )
    }

    async fn mock_qantas_one(server: &MockServer) {
        mock_schedule(
            server,
            "QF",
            "1",
            vec![dated_flight(
                "QF",
                1,
                vec![
                    json!({ "iataCode": "SYD", "departure": timings("STD", "2025-03-01T16:10+11:00") }),
                    json!({
                        "iataCode": "SIN",
                        "arrival": timings("STA", "2025-03-01T22:15+08:00"),
                        "departure": timings("STD", "2025-03-01T23:55+08:00")
                    }),
                    json!({ "iataCode": "LHR", "arrival": timings("STA", "2025-03-02T06:20Z") }),
                ],
                vec![
                    leg("SYD", "SIN", "388", "PT8H5M"),
                    leg("SIN", "LHR", "388", "PT14H25M"),
                ],
            )],
        )
        .await;
    }

    #[test]
    fn test_split_flight_number() {
        assert_eq!(
            split_flight_number("LH 1790"),
            Some(("LH".to_string(), "1790".to_string()))
        );
        assert_eq!(
            split_flight_number(" u21234 "),
            Some(("U2".to_string(), "1234".to_string()))
        );
        assert_eq!(split_flight_number("LH"), None);
        assert_eq!(split_flight_number("LH 12345"), None);
        assert_eq!(split_flight_number("LHABC"), None);
        assert_eq!(split_flight_number("Ü1 12"), None);
    }

    #[test]
    fn test_parse_iso_duration() {
        assert_eq!(parse_iso_duration("PT13H50M").unwrap(), Duration::minutes(830));
        assert_eq!(parse_iso_duration("PT55M").unwrap(), Duration::minutes(55));
        assert_eq!(parse_iso_duration("P1DT2H").unwrap(), Duration::minutes(26 * 60));
        assert_eq!(parse_iso_duration("PT1H30M15S").unwrap(), Duration::minutes(90));
        assert!(parse_iso_duration("13:50").is_err());
        assert!(parse_iso_duration("PT99999999999999999999H").is_err());
    }

    #[test]
    fn test_scheduled_time_prefers_qualifier() {
        let timings = vec![
            Timing {
                qualifier: "ETD".to_string(),
                value: "2025-03-01T07:20+01:00".to_string(),
            },
            Timing {
                qualifier: "STD".to_string(),
                value: "2025-03-01T07:05+01:00".to_string(),
            },
        ];
        let expected = date(2025, 3, 1).and_hms_opt(7, 5, 0).unwrap();
        assert_eq!(scheduled_time(&timings, "STD").unwrap(), expected);

        let fallback = date(2025, 3, 1).and_hms_opt(7, 20, 0).unwrap();
        assert_eq!(scheduled_time(&timings, "STA").unwrap(), fallback);

        assert!(scheduled_time(&[], "STD").is_err());
    }

    #[tokio::test]
    async fn test_find_flight_sorts_legs_and_fills_missing_times() {
        let server = MockServer::start_async().await;
        let service = service(&server).await;
        mock_schedule(
            &server,
            "LH",
            "101",
            vec![dated_flight(
                "LH",
                101,
                vec![
                    json!({ "iataCode": "MUC", "departure": timings("STD", "2025-03-01T06:30+01:00") }),
                    json!({ "iataCode": "FRA", "arrival": timings("STA", "2025-03-01T07:25+01:00") }),
                ],
                vec![leg("MUC", "FRA", "32N", "PT55M")],
            )],
        )
        .await;
        // No flight point for LIS: arrival follows from FRA time plus duration.
        mock_schedule(
            &server,
            "LH",
            "1166",
            vec![dated_flight(
                "LH",
                1166,
                vec![json!({ "iataCode": "FRA", "departure": timings("STD", "2025-03-01T09:55+01:00") })],
                vec![leg("FRA", "LIS", "XXX", "PT2H55M")],
            )],
        )
        .await;

        let query = FlightQuery {
            legs: vec![leg_query("LH1166", None), leg_query("lh 101", Some("muc"))],
        };
        let flight = service.find_flight(&query).await.unwrap();

        let numbers: Vec<&str> = flight.legs.iter().map(|l| l.flight_number.as_str()).collect();
        assert_eq!(numbers, vec!["LH 101", "LH 1166"]);

        let first = &flight.legs[0];
        assert_eq!(first.airline, "Lufthansa");
        assert_eq!(first.aircraft.as_deref(), Some("Airbus A320neo"));
        assert_eq!(first.origin.municipality, "Munich");
        assert_eq!(first.duration_in_minutes, 55);
        assert_eq!(first.amadeus_flight_date, Some(date(2025, 3, 1)));

        let second = &flight.legs[1];
        assert_eq!(second.aircraft, None);
        assert_eq!(format_wall_clock(second.arrival_date_time), "2025-03-01T11:50:00");

        let map = flight.geo_json.unwrap();
        assert_eq!(map["transportationType"], "FLIGHT");
        let features = map["features"].as_array().unwrap();
        assert_eq!(features.len(), 5);
        let frankfurt = &features[3]["properties"];
        assert_eq!(frankfurt["fromMunicipality"], "Munich");
        assert_eq!(frankfurt["toMunicipality"], "Lisbon");
        assert_eq!(frankfurt["legs"][0]["toIata"], "FRA");
        assert_eq!(frankfurt["legs"][1]["flightNumber"], "LH 1166");
    }

    #[tokio::test]
    async fn test_multi_leg_flight_needs_origin() {
        let server = MockServer::start_async().await;
        let service = service(&server).await;
        mock_qantas_one(&server).await;

        let err = service
            .find_flight(&FlightQuery {
                legs: vec![leg_query("QF1", None)],
            })
            .await
            .unwrap_err();
        let (flight_number, choices) = match err {
            AppError::AmbiguousFlight {
                flight_number,
                choices,
            } => (flight_number, choices),
            other => panic!("expected an ambiguous flight, got {:?}", other),
        };
        assert_eq!(flight_number, "QF1");
        assert_eq!(
            choices,
            vec![
                AmbiguousFlightChoice {
                    origin_iata: "SYD".to_string(),
                    destination_iata: "SIN".to_string(),
                    departure_date_time: date(2025, 3, 1).and_hms_opt(16, 10, 0).unwrap(),
                },
                AmbiguousFlightChoice {
                    origin_iata: "SIN".to_string(),
                    destination_iata: "LHR".to_string(),
                    departure_date_time: date(2025, 3, 1).and_hms_opt(23, 55, 0).unwrap(),
                },
            ]
        );

        let flight = service
            .find_flight(&FlightQuery {
                legs: vec![leg_query("QF1", Some("sin"))],
            })
            .await
            .unwrap();
        let leg = &flight.legs[0];
        assert_eq!(leg.origin.iata, "SIN");
        assert_eq!(leg.destination.iata, "LHR");
        // No airline record for QF
        assert_eq!(leg.airline, "QF");
        assert_eq!(leg.aircraft.as_deref(), Some("Airbus A380-800"));
        assert_eq!(format_wall_clock(leg.arrival_date_time), "2025-03-02T06:20:00");
    }

    #[tokio::test]
    async fn test_unknown_origin_is_not_found() {
        let server = MockServer::start_async().await;
        let service = service(&server).await;
        mock_qantas_one(&server).await;

        let err = service
            .find_flight(&FlightQuery {
                legs: vec![leg_query("QF1", Some("MEL"))],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_invalid_flight_number_skips_lookup() {
        let service = FlightService::new(
            AmadeusClient::new(reqwest::Client::new(), "http://127.0.0.1:9", None),
            OpenTravelDataClient::new(reqwest::Client::new(), "http://127.0.0.1:9"),
        );
        let err = service
            .find_flight(&FlightQuery {
                legs: vec![leg_query("LHABC", None)],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_query_validation() {
        assert!(FlightQuery { legs: vec![leg_query("LH101", Some("MUC"))] }.validate().is_ok());
        assert!(FlightQuery { legs: vec![] }.validate().is_err());
        assert!(FlightQuery { legs: vec![leg_query("LH", None)] }.validate().is_err());
        assert!(FlightQuery { legs: vec![leg_query("LH101", Some("MUNICH"))] }.validate().is_err());
    }
}
