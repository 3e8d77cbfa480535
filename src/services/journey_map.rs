// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GeoJSON maps for looked-up flights and train journeys.
//!
//! A map holds one line feature per leg geometry and one point feature
//! per stop. Stop features carry the legs touching that stop so the
//! frontend can render popups without the transportation record.

use crate::error::AppError;
use crate::models::Location;
use geojson::{Feature, FeatureCollection, Geometry};
use serde_json::Value;

struct Stop {
    key: String,
    location: Location,
    legs: Vec<Value>,
}

pub struct JourneyMap {
    kind: &'static str,
    from: String,
    to: String,
    lines: Vec<Feature>,
    stops: Vec<Stop>,
}

impl JourneyMap {
    /// `kind` is the transportation type, e.g. `"FLIGHT"`; `from` and
    /// `to` name the first origin and the last destination.
    pub fn new(kind: &'static str, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            kind,
            from: from.into(),
            to: to.into(),
            lines: Vec::new(),
            stops: Vec::new(),
        }
    }

    /// Add a line through `points`. Fewer than two points are ignored.
    pub fn add_line(&mut self, points: Vec<geo::Point<f64>>) {
        if points.len() < 2 {
            return;
        }
        let line = geo::LineString::from(points);
        self.lines
            .push(Feature::from(Geometry::new(geojson::Value::from(&line))));
    }

    /// Record that `leg` touches the stop identified by `key`.
    pub fn add_stop_leg(&mut self, key: &str, location: &Location, leg: Value) {
        match self.stops.iter_mut().find(|stop| stop.key == key) {
            Some(stop) => stop.legs.push(leg),
            None => self.stops.push(Stop {
                key: key.to_string(),
                location: location.clone(),
                legs: vec![leg],
            }),
        }
    }

    pub fn into_json(self) -> Result<Value, AppError> {
        let mut features = self.lines;
        for stop in self.stops {
            let point = geojson::Value::from(&stop.location.to_point());
            let mut feature = Feature::from(Geometry::new(point));
            feature.set_property("type", self.kind);
            feature.set_property("fromMunicipality", self.from.as_str());
            feature.set_property("toMunicipality", self.to.as_str());
            feature.set_property("legs", Value::Array(stop.legs));
            features.push(feature);
        }

        let mut collection = FeatureCollection::from_iter(features);
        collection
            .foreign_members
            .get_or_insert_with(Default::default)
            .insert("transportationType".to_string(), Value::from(self.kind));

        serde_json::to_value(&collection)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("GeoJSON encoding failed: {}", e)))
    }
}
