/*
 *  feeds/mod.rs
 *
 *  inkdash - e-ink dashboard
 *  (c) 2020-26 Stuart Hunter
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
//! The third-party JSON feeds: weather.gov forecasts, sunrise-sunset.org,
//! the PATH realtime API and OpenSky state vectors.

pub mod aircraft;
pub mod client;
pub mod path;
pub mod sun;
pub mod weather;

pub use client::FeedClient;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },
    #[error("JSON deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Missing data: {0}")]
    MissingData(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Join a configured base URL and a path without doubling slashes
pub(crate) fn endpoint(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_join() {
        assert_eq!(endpoint("https://api.weather.gov/", "/gridpoints/OKX/31,34/forecast"),
            "https://api.weather.gov/gridpoints/OKX/31,34/forecast");
        assert_eq!(endpoint("http://h", "json"), "http://h/json");
    }
}
