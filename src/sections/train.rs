/*
 *  sections/train.rs
 *
 *  inkdash - e-ink dashboard
 *  (c) 2020-26 Stuart Hunter
 *
 *  PATH arrival row
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
use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

use crate::canvas::Ink;
use crate::draw::{draw_text, draw_vline};
use crate::feeds::path::TrainArrival;
use crate::sections::layer;
use crate::text::FONT_MEDIUM;

/// Vertical distance between rows
pub const ROW_HEIGHT: i32 = 30;
const STATUS_RULE_DX: i32 = 71;
const STATUS_DX: i32 = 75;
const HEADSIGN_RULE_DX: i32 = 147;
const HEADSIGN_DX: i32 = 152;

/// "< 1 min" below a minute, else whole minutes rounded up
pub fn countdown(arrival: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (arrival - now).num_milliseconds() as f64 / 60_000.0;
    if minutes < 1.0 {
        "< 1 min".to_string()
    } else {
        format!("{} mins", minutes.ceil() as i64)
    }
}

/// Countdown, status and headsign separated by short rules.
pub struct TrainRow<'a> {
    train: &'a TrainArrival,
    now: DateTime<Utc>,
    highlight: &'a str,
}

impl<'a> TrainRow<'a> {
    /// `highlight` is the headsign drawn in red
    pub fn new(train: &'a TrainArrival, now: DateTime<Utc>, highlight: &'a str) -> Self {
        Self { train, now, highlight }
    }

    pub fn status(&self) -> (&str, Ink) {
        if self.train.is_on_time() {
            ("On Time", Ink::Black)
        } else {
            (self.train.status.as_str(), Ink::Red)
        }
    }

    pub fn headsign_ink(&self) -> Ink {
        if self.train.headsign == self.highlight { Ink::Red } else { Ink::Black }
    }

    pub fn render<D>(&self, black: &mut D, red: &mut D, at: Point) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        draw_text(black, &countdown(self.train.projected_arrival, self.now), at.x, at.y, FONT_MEDIUM)?;
        draw_vline(black, at.x + STATUS_RULE_DX, at.y, at.y + ROW_HEIGHT)?;

        let (status, ink) = self.status();
        draw_text(layer(black, red, ink), status, at.x + STATUS_DX, at.y, FONT_MEDIUM)?;
        draw_vline(black, at.x + HEADSIGN_RULE_DX, at.y, at.y + ROW_HEIGHT)?;

        draw_text(layer(black, red, self.headsign_ink()), &self.train.headsign, at.x + HEADSIGN_DX, at.y, FONT_MEDIUM)
    }
}
