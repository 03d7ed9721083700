/*
 *  sections/five_day.rs
 *
 *  inkdash - e-ink dashboard
 *  (c) 2020-26 Stuart Hunter
 *
 *  Daytime period of the five-day strip
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

use crate::draw::{draw_text, draw_text_centered};
use crate::feeds::weather::Period;
use crate::glyph::IconMap;
use crate::icons::{draw_icon, icon_size, ICON_SMALL};
use crate::text::{measure, wrap_by_word, FONT_MEDIUM, FONT_TINY};
use crate::units::dual_temperature;

const WORDS_PER_LINE: usize = 4;

/// Name, icon, temperature and short forecast stacked and centred on the
/// widest of them.
pub struct FiveDayPeriod<'a> {
    period: &'a Period,
    icons: &'a IconMap,
}

impl<'a> FiveDayPeriod<'a> {
    pub fn new(period: &'a Period, icons: &'a IconMap) -> Self {
        Self { period, icons }
    }

    fn code(&self) -> char {
        self.icons.code_for(&self.period.short_forecast, self.period.is_daytime)
    }

    fn summary(&self) -> String {
        wrap_by_word(&self.period.short_forecast, WORDS_PER_LINE)
    }

    pub fn width(&self) -> u32 {
        let p = self.period;
        [
            measure(&p.name, FONT_MEDIUM).width,
            icon_size(self.code(), ICON_SMALL).width,
            measure(&dual_temperature(p.temperature), FONT_MEDIUM).width,
            measure(&self.summary(), FONT_TINY).width,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }

    pub fn render<D>(&self, black: &mut D, red: &mut D, at: Point) -> Result<u32, D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let p = self.period;
        let w = self.width() as i32;
        let centre = |inner: u32| at.x + (w - inner as i32) / 2;

        draw_text(black, &p.name, centre(measure(&p.name, FONT_MEDIUM).width), at.y, FONT_MEDIUM)?;

        let code = self.code();
        draw_icon(red, code, Point::new(centre(icon_size(code, ICON_SMALL).width), at.y + 30), ICON_SMALL)?;

        let temp = dual_temperature(p.temperature);
        draw_text(black, &temp, centre(measure(&temp, FONT_MEDIUM).width), at.y + 80, FONT_MEDIUM)?;

        let summary = self.summary();
        let sw = measure(&summary, FONT_TINY).width;
        draw_text_centered(black, &summary, Point::new(centre(sw), at.y + 105), sw, FONT_TINY)?;
        Ok(w as u32)
    }
}
