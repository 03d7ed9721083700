/*
 *  feeds/aircraft.rs
 *
 *  inkdash - e-ink dashboard
 *  (c) 2020-26 Stuart Hunter
 *
 *  OpenSky state vectors and nearest-aircraft selection
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */
use geo::Distance;
use geo::Point;
use geo::algorithm::line_measures::metric_spaces::Geodesic;
use log::{debug, info};
use serde::Deserialize;
use serde_json::Value;

use crate::config::{AircraftConfig, Location};
use crate::feeds::{endpoint, FeedClient, FeedError};

// positions within an OpenSky state vector row
const ICAO24: usize = 0;
const CALLSIGN: usize = 1;
const LONGITUDE: usize = 5;
const LATITUDE: usize = 6;
const BARO_ALTITUDE: usize = 7;
const ON_GROUND: usize = 8;
const VELOCITY: usize = 9;
const TRUE_TRACK: usize = 10;
const VERTICAL_RATE: usize = 11;
const SQUAWK: usize = 14;

/// The fields of a state vector the dashboard uses. Units are as given
/// by the feed: metres, metres per second, degrees.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StateVector {
    pub icao24: String,
    pub callsign: String,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub baro_altitude: Option<f64>,
    pub on_ground: bool,
    pub velocity: Option<f64>,
    pub true_track: Option<f64>,
    pub vertical_rate: Option<f64>,
    pub squawk: Option<String>,
}

impl StateVector {
    pub fn from_row(row: &[Value]) -> Result<Self, FeedError> {
        let str_at = |i: usize| row.get(i).and_then(Value::as_str).map(|s| s.trim().to_string());
        let num_at = |i: usize| row.get(i).and_then(Value::as_f64);
        let icao24 = str_at(ICAO24).ok_or_else(|| FeedError::MissingData("state vector icao24".into()))?;
        Ok(StateVector {
            icao24,
            callsign: str_at(CALLSIGN).unwrap_or_default(),
            longitude: num_at(LONGITUDE),
            latitude: num_at(LATITUDE),
            baro_altitude: num_at(BARO_ALTITUDE),
            on_ground: row.get(ON_GROUND).and_then(Value::as_bool).unwrap_or(false),
            velocity: num_at(VELOCITY),
            true_track: num_at(TRUE_TRACK),
            vertical_rate: num_at(VERTICAL_RATE),
            squawk: str_at(SQUAWK),
        })
    }

    pub fn position(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }

    pub fn is_airborne_above(&self, min_altitude: f64) -> bool {
        !self.on_ground && self.baro_altitude.is_some_and(|a| a > min_altitude)
    }
}

/// A state vector with its geodesic distance from the display.
#[derive(Debug, Clone, PartialEq)]
pub struct Sighting {
    pub state: StateVector,
    pub distance_km: f64,
}

#[derive(Debug, Deserialize)]
struct StatesResponse {
    #[serde(default)]
    states: Option<Vec<Vec<Value>>>,
}

/// Rows that cannot be read are logged and dropped.
pub fn parse_states(body: &str) -> Result<Vec<StateVector>, FeedError> {
    let resp: StatesResponse = serde_json::from_str(body)?;
    let rows = resp.states.unwrap_or_default();
    Ok(rows
        .iter()
        .filter_map(|row| match StateVector::from_row(row) {
            Ok(sv) => Some(sv),
            Err(e) => {
                debug!("skipping state vector: {e}");
                None
            }
        })
        .collect())
}

/// Geodesic (WGS84) distance in kilometres between two (lat, lng) pairs
pub fn geodesic_km(here: (f64, f64), there: (f64, f64)) -> f64 {
    let a = Point::new(here.1, here.0);
    let b = Point::new(there.1, there.0);
    Geodesic.distance(a, b) / 1000.0
}

/// Attach distances, sort nearest first and keep the first `max` airborne
/// aircraft above `min_altitude`. Rows without a position are dropped.
pub fn select_nearby(states: Vec<StateVector>, here: &Location, min_altitude: f64, max: usize) -> Vec<Sighting> {
    let origin = (here.lat, here.lng);
    let mut sightings: Vec<Sighting> = states
        .into_iter()
        .filter_map(|state| {
            let distance_km = geodesic_km(origin, state.position()?);
            Some(Sighting { state, distance_km })
        })
        .collect();
    sightings.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    sightings
        .into_iter()
        .filter(|s| s.state.is_airborne_above(min_altitude))
        .take(max)
        .collect()
}

/// `GET /api/states/all?lamin&lomin&lamax&lomax`, a box of `radius_deg`
/// around the configured location.
pub async fn fetch_states(client: &FeedClient, cfg: &AircraftConfig, loc: &Location) -> Result<Vec<StateVector>, FeedError> {
    let url = endpoint(&cfg.base_url, "api/states/all");
    info!("Fetching aircraft within {}° of {:.4}, {:.4}", cfg.radius_deg, loc.lat, loc.lng);
    let params = [
        ("lamin", (loc.lat - cfg.radius_deg).to_string()),
        ("lomin", (loc.lng - cfg.radius_deg).to_string()),
        ("lamax", (loc.lat + cfg.radius_deg).to_string()),
        ("lomax", (loc.lng + cfg.radius_deg).to_string()),
    ];
    let body = client.get_text(&url, &params).await?;
    parse_states(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOME: Location = Location { lat: 40.6908507, lng: -73.9981995 };

    #[test]
    fn test_parse_row_positions() {
        let body = r#"{"time":1714600000,"states":[
            ["a1b2c3","DAL123  ","United States",1714599990,1714599995,-73.95,40.70,1524.0,false,120.5,45.2,-2.5,null,1600.0,"1200",false,0]
        ]}"#;
        let states = parse_states(body).unwrap();
        assert_eq!(states.len(), 1);
        let sv = &states[0];
        assert_eq!(sv.callsign, "DAL123");
        assert_eq!(sv.position(), Some((40.70, -73.95)));
        assert_eq!(sv.baro_altitude, Some(1524.0));
        assert_eq!(sv.true_track, Some(45.2));
        assert_eq!(sv.vertical_rate, Some(-2.5));
        assert_eq!(sv.squawk.as_deref(), Some("1200"));
        assert!(!sv.on_ground);
    }

    #[test]
    fn test_null_states_is_empty() {
        assert!(parse_states(r#"{"time":1714600000,"states":null}"#).unwrap().is_empty());
    }

    #[test]
    fn test_geodesic_distance() {
        // one degree of latitude is ~111 km
        let d = geodesic_km((40.0, -74.0), (41.0, -74.0));
        assert!((d - 111.0).abs() < 1.0, "{d}");
        assert_eq!(geodesic_km((40.0, -74.0), (40.0, -74.0)), 0.0);
    }

    fn sv(id: &str, lat: f64, alt: Option<f64>, on_ground: bool) -> StateVector {
        StateVector {
            icao24: id.to_string(),
            callsign: id.to_uppercase(),
            latitude: Some(lat),
            longitude: Some(HOME.lng),
            baro_altitude: alt,
            on_ground,
            ..Default::default()
        }
    }

    #[test]
    fn test_select_nearby_filters_and_sorts() {
        let mut states = vec![
            sv("ground", HOME.lat + 0.001, Some(0.0), true),
            sv("low", HOME.lat + 0.002, Some(100.0), false),
            sv("noalt", HOME.lat + 0.003, None, false),
            sv("taxi", HOME.lat + 0.004, Some(500.0), true),
        ];
        // nine airborne aircraft, listed furthest first
        for i in (1..=9).rev() {
            states.push(sv(&format!("air{i}"), HOME.lat + 0.01 * i as f64, Some(1000.0), false));
        }
        states.push(StateVector { icao24: "nopos".into(), baro_altitude: Some(900.0), ..Default::default() });

        let picked = select_nearby(states, &HOME, 100.0, 7);
        let ids: Vec<&str> = picked.iter().map(|s| s.state.icao24.as_str()).collect();
        assert_eq!(ids, vec!["air1", "air2", "air3", "air4", "air5", "air6", "air7"]);
        assert!(picked.windows(2).all(|w| w[0].distance_km <= w[1].distance_km));
        assert!(picked.iter().all(|s| !s.state.on_ground && s.state.baro_altitude.unwrap() > 100.0));
    }

    #[test]
    fn test_select_nearby_fewer_than_max() {
        let states = vec![sv("a", HOME.lat + 0.2, Some(3000.0), false), sv("b", HOME.lat - 0.1, Some(3000.0), false)];
        let picked = select_nearby(states, &HOME, 100.0, 7);
        assert_eq!(picked.len(), 2);
        assert_eq!(picked[0].state.icao24, "b");
    }
}
