/*
 *  sections/aircraft.rs
 *
 *  inkdash - e-ink dashboard
 *  (c) 2020-26 Stuart Hunter
 *
 *  Nearby aircraft row
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
use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

use crate::draw::draw_text;
use crate::feeds::aircraft::Sighting;
use crate::text::FONT_SMALL;
use crate::units::{feet, feet_per_minute, knots};

pub const ROW_HEIGHT: i32 = 20;

/// "DAL123 | 4km | 45 | 5000ft | 233 knots | -492 ft/min | squawk 1200"
///
/// Missing track, speed or climb rate read as zero, a missing squawk as
/// "----".
pub fn summary(s: &Sighting) -> String {
    let st = &s.state;
    format!(
        "{} | {}km | {} | {}ft | {} knots | {} ft/min | squawk {}",
        st.callsign,
        s.distance_km.round() as i64,
        st.true_track.unwrap_or(0.0).round() as i64,
        feet(st.baro_altitude.unwrap_or(0.0)),
        knots(st.velocity.unwrap_or(0.0)),
        feet_per_minute(st.vertical_rate.unwrap_or(0.0)),
        st.squawk.as_deref().unwrap_or("----"),
    )
}

pub struct AircraftRow<'a> {
    sighting: &'a Sighting,
}

impl<'a> AircraftRow<'a> {
    pub fn new(sighting: &'a Sighting) -> Self {
        Self { sighting }
    }

    pub fn render<D>(&self, black: &mut D, at: Point) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        draw_text(black, &summary(self.sighting), at.x, at.y, FONT_SMALL)
    }
}
