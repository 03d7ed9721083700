/*
 *  screen.rs
 *
 *  inkdash - e-ink dashboard
 *  (c) 2020-26 Stuart Hunter
 *
 *  Fetch every feed, then lay the dashboard out
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
//! A render pass is two steps. [`fetch_snapshot`] pulls each feed once,
//! in order, keeping `None` for any feed that failed. [`compose`] is a pure
//! function of that snapshot, the configuration and the wall clock, and
//! draws only the sections whose data arrived.

use chrono::{DateTime, Utc};
use core::convert::Infallible;
use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};
use log::{info, warn};

use crate::canvas::CanvasPair;
use crate::config::Config;
use crate::draw::{draw_hline, draw_vline};
use crate::feeds::aircraft::{self, StateVector};
use crate::feeds::path::{self, TrainArrival};
use crate::feeds::sun::{self, SunEvents};
use crate::feeds::weather::{self, Forecast, Period};
use crate::feeds::{FeedClient, FeedError};
use crate::sections::{AircraftRow, ClockPair, DetailedPeriod, FiveDayPeriod, HourlyPeriod, SunBlock, TrainRow};
use crate::sections::aircraft as aircraft_row;
use crate::solar;
use crate::text::FONT_SMALL;

pub const MAX_HOURLY: usize = 12;
pub const DETAILED_PERIODS: usize = 3;
/// Forecast indices considered for the five-day strip, daytime only
pub const FIVE_DAY_RANGE: std::ops::Range<usize> = 2..12;

const CLOCK_Y: i32 = 1;
const SUN_GAP: i32 = 50;
const HEADER_RULE_Y: i32 = 25;
const DETAILED_Y: i32 = 28;
const DETAILED_DX: i32 = 20;
const HOURLY_Y: i32 = 165;
const HOURLY_X: i32 = 15;
const HOURLY_GAP: i32 = 10;
const HOURLY_RULE: (i32, i32) = (165, 260);
const FIVE_DAY_Y: i32 = 260;
const FIVE_DAY_X: i32 = 60;
const FIVE_DAY_GAP: i32 = 40;
const FIVE_DAY_RULE: (i32, i32) = (270, 385);
const FIVE_DAY_RULE_DX: i32 = 15;
const ROWS_Y: i32 = 410;
const AIRCRAFT_X: i32 = 400;
/// Aircraft rows the list is laid out to show in full
const AIRCRAFT_ROWS: i32 = 7;
const BOTTOM_MARGIN: i32 = 2;

/// Everything fetched for one pass. A `None` section is not drawn.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub sun: Option<SunEvents>,
    pub forecast: Option<Forecast>,
    pub hourly: Option<Forecast>,
    pub five_day: Option<Forecast>,
    pub trains: Option<Vec<TrainArrival>>,
    pub aircraft: Option<Vec<StateVector>>,
}

fn settle<T>(feed: &str, result: Result<T, FeedError>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            warn!("{feed} API down: {e}");
            None
        }
    }
}

/// One request per feed, one after the other. Failures are logged and
/// leave that section empty.
pub async fn fetch_snapshot(client: &FeedClient, cfg: &Config, now: DateTime<Utc>) -> Snapshot {
    let mut sun = settle("Sunrise/Sunset", sun::fetch_sun(client, &cfg.sun, &cfg.location).await);
    if sun.is_none() && cfg.sun.fallback_local {
        sun = solar::estimate(&cfg.location, now.date_naive());
        if sun.is_some() {
            info!("Using locally computed sunrise/sunset");
        }
    }

    Snapshot {
        sun,
        forecast: settle("Upcoming Weather", weather::fetch_forecast(client, &cfg.weather).await),
        hourly: settle("Hourly Weather", weather::fetch_hourly(client, &cfg.weather).await),
        five_day: settle("5 Day Weather", weather::fetch_forecast(client, &cfg.weather).await),
        trains: settle("PATH", path::fetch_arrivals(client, &cfg.transit).await),
        aircraft: settle("Aircraft", aircraft::fetch_states(client, &cfg.aircraft, &cfg.location).await),
    }
}

/// Periods that have not yet ended, at most `max`, in feed order.
pub fn select_hourly(periods: &[Period], now: DateTime<Utc>, max: usize) -> Vec<&Period> {
    periods.iter().filter(|p| !p.has_ended(now)).take(max).collect()
}

/// Daytime periods among forecast indices 2 to 11.
pub fn select_five_day(periods: &[Period]) -> Vec<&Period> {
    periods
        .iter()
        .enumerate()
        .filter(|(i, p)| FIVE_DAY_RANGE.contains(i) && p.is_daytime)
        .map(|(_, p)| p)
        .collect()
}

/// Render a snapshot onto a fresh canvas pair sized from the config.
pub fn compose(snapshot: &Snapshot, cfg: &Config, now: DateTime<Utc>) -> CanvasPair {
    let mut canvas = CanvasPair::new(cfg.display.width, cfg.display.height);
    let CanvasPair { black, red } = &mut canvas;
    if let Err(e) = compose_into(black, red, snapshot, cfg, now) {
        let never: Infallible = e;
        match never {}
    }
    canvas
}

/// Render a snapshot onto any pair of binary draw targets of equal size.
pub fn compose_into<D>(
    black: &mut D,
    red: &mut D,
    snapshot: &Snapshot,
    cfg: &Config,
    now: DateTime<Utc>,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let area = black.bounding_box().size;
    let (width, height) = (area.width as i32, area.height as i32);
    let icons = &cfg.icon_map;

    // header: clocks, sun block and the rule beneath
    let clocks_end = ClockPair::new(&cfg.clocks, now).render(black, Point::new(0, CLOCK_Y))?;
    match snapshot.sun.as_ref() {
        Some(ev) => {
            SunBlock::new(ev, cfg.clocks.local.tz, icons, cfg.sun.day_length)
                .render(black, red, Point::new(clocks_end + SUN_GAP, 0))?;
        }
        None => info!("Skipping sunrise/sunset"),
    }
    draw_hline(black, 1, width - 1, HEADER_RULE_Y)?;

    match snapshot.forecast.as_ref() {
        Some(fc) => {
            for (i, p) in fc.periods().iter().take(DETAILED_PERIODS).enumerate() {
                let x = width * i as i32 / DETAILED_PERIODS as i32 + DETAILED_DX;
                DetailedPeriod::new(p, icons).render(black, red, Point::new(x, DETAILED_Y))?;
            }
        }
        None => info!("Skipping detailed forecast"),
    }

    match snapshot.hourly.as_ref() {
        Some(fc) => {
            let hours = select_hourly(fc.periods(), now, MAX_HOURLY);
            let mut x = HOURLY_X;
            for (n, p) in hours.iter().enumerate() {
                let w = HourlyPeriod::new(p, icons).render(black, red, Point::new(x, HOURLY_Y))?;
                x += HOURLY_GAP + w as i32;
                if n + 1 < hours.len() {
                    draw_vline(black, x - HOURLY_GAP / 2, HOURLY_RULE.0, HOURLY_RULE.1)?;
                }
            }
        }
        None => info!("Skipping hourly forecast"),
    }

    match snapshot.five_day.as_ref() {
        Some(fc) => {
            let days = select_five_day(fc.periods());
            let mut x = FIVE_DAY_X;
            for (n, p) in days.iter().enumerate() {
                let w = FiveDayPeriod::new(p, icons).render(black, red, Point::new(x, FIVE_DAY_Y))?;
                x += FIVE_DAY_GAP + w as i32;
                if n + 1 < days.len() {
                    draw_vline(black, x - FIVE_DAY_RULE_DX, FIVE_DAY_RULE.0, FIVE_DAY_RULE.1)?;
                }
            }
        }
        None => info!("Skipping five-day forecast"),
    }

    match snapshot.trains.as_ref() {
        Some(trains) => {
            let mut trains = trains.clone();
            path::sort_arrivals(&mut trains);
            let rows = trains
                .iter()
                .enumerate()
                .map(|(i, t)| (ROWS_Y + i as i32 * crate::sections::train::ROW_HEIGHT, t))
                .take_while(|(y, _)| *y < height);
            for (y, t) in rows {
                TrainRow::new(t, now, &cfg.transit.highlight_headsign).render(black, red, Point::new(0, y))?;
            }
        }
        None => info!("Skipping PATH trains"),
    }

    match snapshot.aircraft.as_ref() {
        Some(states) => {
            let nearby = aircraft::select_nearby(
                states.clone(),
                &cfg.location,
                cfg.aircraft.min_altitude,
                cfg.aircraft.max_rows,
            );
            let top = aircraft_top(height);
            let text_h = FONT_SMALL.character_size.height as i32;
            let rows = nearby
                .iter()
                .enumerate()
                .map(|(j, s)| (top + j as i32 * aircraft_row::ROW_HEIGHT, s))
                .take_while(|(y, _)| y + text_h <= height);
            let mut drawn = 0;
            for (y, s) in rows {
                AircraftRow::new(s).render(black, Point::new(AIRCRAFT_X, y))?;
                drawn += 1;
            }
            if drawn < nearby.len() {
                info!("{} of {} aircraft fit the panel", drawn, nearby.len());
            }
        }
        None => info!("Skipping aircraft"),
    }

    Ok(())
}

/// First aircraft row: low enough that seven rows end at the panel
/// bottom, never above the train rows.
fn aircraft_top(height: i32) -> i32 {
    let text_h = FONT_SMALL.character_size.height as i32;
    let block = (AIRCRAFT_ROWS - 1) * aircraft_row::ROW_HEIGHT + text_h + BOTTOM_MARGIN;
    (height - block).min(ROWS_Y)
}

/// Fetch and compose in one go
pub async fn render_screen(client: &FeedClient, cfg: &Config, now: DateTime<Utc>) -> CanvasPair {
    info!("Drawing the dashboard");
    let snapshot = fetch_snapshot(client, cfg, now).await;
    compose(&snapshot, cfg, now)
}
