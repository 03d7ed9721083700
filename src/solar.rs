/*
 *  solar.rs
 *
 *  inkdash - e-ink dashboard
 *  (c) 2020-26 Stuart Hunter
 *
 *  Local sunrise/sunset estimate used when the sun feed is down
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
//! NOAA sunrise equation, zenith 90.833°. Good to a minute or two at
//! mid latitudes which is plenty for an HH:MM readout.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

use crate::config::Location;
use crate::feeds::sun::SunEvents;

const ZENITH: f64 = 90.833;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    Rise,
    Set,
}

fn sin_d(x: f64) -> f64 {
    x.to_radians().sin()
}

fn cos_d(x: f64) -> f64 {
    x.to_radians().cos()
}

fn wrap360(x: f64) -> f64 {
    x.rem_euclid(360.0)
}

/// UT hour of the event in [0, 24), None for polar day or night
fn event_ut_hours(lat: f64, lng: f64, day_of_year: u32, event: Event) -> Option<f64> {
    let lng_hour = lng / 15.0;
    let local_solar = match event {
        Event::Rise => 6.0,
        Event::Set => 18.0,
    };
    let t = day_of_year as f64 + (local_solar - lng_hour) / 24.0;

    let mean_anomaly = 0.9856 * t - 3.289;
    let true_lng = wrap360(mean_anomaly + 1.916 * sin_d(mean_anomaly) + 0.020 * sin_d(2.0 * mean_anomaly) + 282.634);

    let mut ra = wrap360((0.91764 * true_lng.to_radians().tan()).atan().to_degrees());
    ra += (true_lng / 90.0).floor() * 90.0 - (ra / 90.0).floor() * 90.0;
    let ra_hours = ra / 15.0;

    let sin_dec = 0.39782 * sin_d(true_lng);
    let cos_dec = (1.0 - sin_dec * sin_dec).sqrt();
    let cos_h = (cos_d(ZENITH) - sin_dec * sin_d(lat)) / (cos_dec * cos_d(lat));
    if !(-1.0..=1.0).contains(&cos_h) {
        return None;
    }

    let h_deg = match event {
        Event::Rise => 360.0 - cos_h.acos().to_degrees(),
        Event::Set => cos_h.acos().to_degrees(),
    };
    let local_mean = h_deg / 15.0 + ra_hours - 0.06571 * t - 6.622;
    Some((local_mean - lng_hour).rem_euclid(24.0))
}

fn at_ut_hours(date: NaiveDate, hours: f64) -> DateTime<Utc> {
    let midnight = date.and_time(chrono::NaiveTime::MIN).and_utc();
    midnight + Duration::seconds((hours * 3600.0).round() as i64)
}

/// Sunrise and sunset on `date` (UTC civil date). Sunset is moved to the
/// following UTC day when it wraps past midnight, as it does for the
/// Americas.
pub fn estimate(loc: &Location, date: NaiveDate) -> Option<SunEvents> {
    let doy = date.ordinal();
    let rise_h = event_ut_hours(loc.lat, loc.lng, doy, Event::Rise)?;
    let set_h = event_ut_hours(loc.lat, loc.lng, doy, Event::Set)?;

    let sunrise = at_ut_hours(date, rise_h);
    let mut sunset = at_ut_hours(date, set_h);
    if sunset <= sunrise {
        sunset += Duration::days(1);
    }
    let day_length = (sunset - sunrise).num_seconds().max(0) as u64;
    Some(SunEvents { sunrise, sunset, day_length })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    const BROOKLYN: Location = Location { lat: 40.6908507, lng: -73.9981995 };

    #[test]
    fn test_new_york_midsummer() {
        // published: sunrise 09:25 UTC, sunset 00:31 UTC next day
        let ev = estimate(&BROOKLYN, NaiveDate::from_ymd_opt(2024, 6, 21).unwrap()).unwrap();
        let rise = Utc.with_ymd_and_hms(2024, 6, 21, 9, 25, 0).unwrap();
        let set = Utc.with_ymd_and_hms(2024, 6, 22, 0, 31, 0).unwrap();
        assert!((ev.sunrise - rise).num_minutes().abs() <= 3, "{}", ev.sunrise);
        assert!((ev.sunset - set).num_minutes().abs() <= 3, "{}", ev.sunset);
        assert!(ev.sunset > ev.sunrise);
        // a little over fifteen hours
        assert!((54_000..55_000).contains(&ev.day_length), "{}", ev.day_length);
    }

    #[test]
    fn test_equinox_day_is_about_twelve_hours() {
        let ev = estimate(&BROOKLYN, NaiveDate::from_ymd_opt(2024, 3, 20).unwrap()).unwrap();
        let hours = ev.day_length as f64 / 3600.0;
        assert!((11.9..12.4).contains(&hours), "{hours}");
        assert_eq!(ev.sunrise.date_naive(), NaiveDate::from_ymd_opt(2024, 3, 20).unwrap());
        assert!(ev.sunrise.hour() >= 10 && ev.sunrise.hour() <= 11);
    }

    #[test]
    fn test_polar_night_has_no_events() {
        let longyearbyen = Location { lat: 78.22, lng: 15.65 };
        assert!(estimate(&longyearbyen, NaiveDate::from_ymd_opt(2024, 12, 21).unwrap()).is_none());
    }
}
