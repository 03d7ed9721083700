/*
 *  feeds/weather.rs
 *
 *  inkdash - e-ink dashboard
 *  (c) 2020-26 Stuart Hunter
 *
 *  weather.gov gridpoint forecasts
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
use chrono::{DateTime, FixedOffset, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::config::WeatherConfig;
use crate::feeds::{endpoint, FeedClient, FeedError};

/// A forecast period, either a half-day (forecast) or an hour (hourly).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub name: String,
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    pub is_daytime: bool,
    /// Fahrenheit
    pub temperature: i32,
    #[serde(default)]
    pub wind_speed: String,
    #[serde(default)]
    pub wind_direction: String,
    #[serde(default)]
    pub short_forecast: String,
    #[serde(default)]
    pub detailed_forecast: String,
}

impl Period {
    pub fn has_ended(&self, now: DateTime<Utc>) -> bool {
        self.end_time.with_timezone(&Utc) <= now
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Forecast {
    pub properties: ForecastProperties,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForecastProperties {
    #[serde(default)]
    pub periods: Vec<Period>,
}

impl Forecast {
    pub fn periods(&self) -> &[Period] {
        &self.properties.periods
    }
}

pub fn parse_forecast(body: &str) -> Result<Forecast, FeedError> {
    Ok(serde_json::from_str(body)?)
}

/// Half-day periods, `/gridpoints/{station}/forecast`
pub async fn fetch_forecast(client: &FeedClient, cfg: &WeatherConfig) -> Result<Forecast, FeedError> {
    let url = endpoint(&cfg.base_url, &format!("gridpoints/{}/forecast", cfg.station));
    info!("Fetching forecast for {}", cfg.station);
    let body = client.get_text(&url, &[] as &[(&str, &str)]).await?;
    parse_forecast(&body)
}

/// Hourly periods, `/gridpoints/{station}/forecast/hourly`
pub async fn fetch_hourly(client: &FeedClient, cfg: &WeatherConfig) -> Result<Forecast, FeedError> {
    let url = endpoint(&cfg.base_url, &format!("gridpoints/{}/forecast/hourly", cfg.station));
    info!("Fetching hourly forecast for {}", cfg.station);
    let body = client.get_text(&url, &[] as &[(&str, &str)]).await?;
    parse_forecast(&body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const BODY: &str = r#"{
        "@context": [],
        "type": "Feature",
        "properties": {
            "updated": "2024-05-01T19:52:21+00:00",
            "periods": [
                {
                    "number": 1,
                    "name": "Tonight",
                    "startTime": "2024-05-01T18:00:00-04:00",
                    "endTime": "2024-05-02T06:00:00-04:00",
                    "isDaytime": false,
                    "temperature": 55,
                    "temperatureUnit": "F",
                    "temperatureTrend": null,
                    "windSpeed": "5 mph",
                    "windDirection": "SW",
                    "icon": "https://api.weather.gov/icons/land/night/few?size=medium",
                    "shortForecast": "Mostly Clear",
                    "detailedForecast": "Mostly clear, with a low around 55. Southwest wind around 5 mph."
                }
            ]
        }
    }"#;

    #[test]
    fn test_parse_forecast_period() {
        let fc = parse_forecast(BODY).unwrap();
        let p = &fc.periods()[0];
        assert_eq!(p.name, "Tonight");
        assert_eq!(p.temperature, 55);
        assert!(!p.is_daytime);
        assert_eq!(p.wind_direction, "SW");
        assert_eq!(p.short_forecast, "Mostly Clear");
        assert_eq!(p.start_time.offset().local_minus_utc(), -4 * 3600);
    }

    #[test]
    fn test_has_ended_is_offset_aware() {
        let fc = parse_forecast(BODY).unwrap();
        let p = &fc.periods()[0];
        // 06:00 -04:00 is 10:00 UTC
        assert!(!p.has_ended(Utc.with_ymd_and_hms(2024, 5, 2, 9, 59, 0).unwrap()));
        assert!(p.has_ended(Utc.with_ymd_and_hms(2024, 5, 2, 10, 0, 0).unwrap()));
    }

    #[test]
    fn test_missing_properties_is_an_error() {
        assert!(matches!(parse_forecast(r#"{"status": 503}"#), Err(FeedError::Json(_))));
    }
}
