/*
 *  feeds/sun.rs
 *
 *  inkdash - e-ink dashboard
 *  (c) 2020-26 Stuart Hunter
 *
 *  sunrise-sunset.org client
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
use chrono::{DateTime, Utc};
use log::info;
use serde::Deserialize;

use crate::config::{Location, SunConfig};
use crate::feeds::{endpoint, FeedClient, FeedError};

/// Sun events for the configured location, all in UTC.
#[derive(Debug, Clone, PartialEq)]
pub struct SunEvents {
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
    /// seconds of daylight
    pub day_length: u64,
}

#[derive(Debug, Deserialize)]
struct SunResponse {
    results: Option<SunResults>,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SunResults {
    sunrise: DateTime<Utc>,
    sunset: DateTime<Utc>,
    day_length: u64,
}

pub fn parse_sun(body: &str) -> Result<SunEvents, FeedError> {
    let resp: SunResponse = serde_json::from_str(body)?;
    if let Some(status) = resp.status.as_deref() {
        if status != "OK" {
            return Err(FeedError::MissingData(format!("sun feed status {status}")));
        }
    }
    let r = resp.results.ok_or_else(|| FeedError::MissingData("sun results".into()))?;
    Ok(SunEvents { sunrise: r.sunrise, sunset: r.sunset, day_length: r.day_length })
}

/// `GET /json?lat&lng&formatted=0`
pub async fn fetch_sun(client: &FeedClient, cfg: &SunConfig, loc: &Location) -> Result<SunEvents, FeedError> {
    let url = endpoint(&cfg.base_url, "json");
    info!("Fetching sunrise/sunset for {:.4}, {:.4}", loc.lat, loc.lng);
    let params = [
        ("lat", loc.lat.to_string()),
        ("lng", loc.lng.to_string()),
        ("formatted", "0".to_string()),
    ];
    let body = client.get_text(&url, &params).await?;
    parse_sun(&body)
}
