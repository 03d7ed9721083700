/*
 *  sections/sun.rs
 *
 *  inkdash - e-ink dashboard
 *  (c) 2020-26 Stuart Hunter
 *
 *  Sunrise, sunset and day length
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
use chrono_tz::Tz;
use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

use crate::config::DayLengthMode;
use crate::draw::draw_text;
use crate::feeds::sun::SunEvents;
use crate::glyph::{Glyph, IconMap};
use crate::icons::{draw_icon, ICON_TINY};
use crate::text::{text_width, FONT_SMALL};

const TEXT_DY: i32 = 8;
const GAP: i32 = 10;

/// "Day Length: 12 hours 34 mins"
///
/// `Legacy` reproduces the seconds-as-minutes figure older dashboards
/// printed (`seconds % 60`).
pub fn format_day_length(seconds: u64, mode: DayLengthMode) -> String {
    let hours = seconds / 3600;
    let mins = match mode {
        DayLengthMode::Corrected => (seconds / 60) % 60,
        DayLengthMode::Legacy => seconds % 60,
    };
    format!("Day Length: {hours} hours {mins} mins")
}

pub struct SunBlock<'a> {
    events: &'a SunEvents,
    tz: Tz,
    icons: &'a IconMap,
    mode: DayLengthMode,
}

impl<'a> SunBlock<'a> {
    pub fn new(events: &'a SunEvents, tz: Tz, icons: &'a IconMap, mode: DayLengthMode) -> Self {
        Self { events, tz, icons, mode }
    }

    pub fn sunrise_text(&self) -> String {
        self.events.sunrise.with_timezone(&self.tz).format("%H:%M").to_string()
    }

    pub fn sunset_text(&self) -> String {
        self.events.sunset.with_timezone(&self.tz).format("%H:%M").to_string()
    }

    /// Icons on the red layer, times and day length on black. Returns the
    /// right-hand edge of the block.
    pub fn render<D>(&self, black: &mut D, red: &mut D, at: Point) -> Result<i32, D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let step = ICON_TINY as i32 + 6;
        let rise = self.sunrise_text();
        let set = self.sunset_text();
        let length = format_day_length(self.events.day_length, self.mode);

        let mut x = at.x;
        draw_icon(red, self.icons.code(Glyph::Sunrise), Point::new(x, at.y), ICON_TINY)?;
        x += step;
        draw_text(black, &rise, x, at.y + TEXT_DY, FONT_SMALL)?;
        x += text_width(&rise, FONT_SMALL) + GAP;

        draw_icon(red, self.icons.code(Glyph::Sunset), Point::new(x, at.y), ICON_TINY)?;
        x += step;
        draw_text(black, &set, x, at.y + TEXT_DY, FONT_SMALL)?;
        x += text_width(&set, FONT_SMALL) + GAP;

        draw_text(black, &length, x, at.y + TEXT_DY, FONT_SMALL)?;
        Ok(x + text_width(&length, FONT_SMALL))
    }
}
