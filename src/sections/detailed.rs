/*
 *  sections/detailed.rs
 *
 *  inkdash - e-ink dashboard
 *  (c) 2020-26 Stuart Hunter
 *
 *  Full-detail forecast period
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

use crate::canvas::Ink;
use crate::draw::{draw_text, draw_text_centered};
use crate::feeds::weather::Period;
use crate::glyph::IconMap;
use crate::icons::{draw_icon, ICON_LARGE};
use crate::sections::layer;
use crate::text::{first_sentences, measure, wrap_by_word, FONT_LARGE, FONT_SMALL};
use crate::units::fahrenheit_to_celsius;

/// Temperatures above this (Fahrenheit) are drawn in red
pub const WARM_ABOVE_F: i32 = 60;
const TEXT_DX: i32 = 80;
const WORDS_PER_LINE: usize = 6;

pub fn temperature_ink(f: i32) -> Ink {
    if f > WARM_ABOVE_F { Ink::Red } else { Ink::Black }
}

/// "72 °F (22 °C)"
pub fn temperature_text(f: i32) -> String {
    format!("{} °F ({} °C)", f, fahrenheit_to_celsius(f))
}

/// First three sentences of the detailed forecast, six words a line
pub fn forecast_text(period: &Period) -> String {
    wrap_by_word(&first_sentences(&period.detailed_forecast), WORDS_PER_LINE)
}

/// Icon, name and temperature across the top, forecast text beneath.
pub struct DetailedPeriod<'a> {
    period: &'a Period,
    icons: &'a IconMap,
}

impl<'a> DetailedPeriod<'a> {
    pub fn new(period: &'a Period, icons: &'a IconMap) -> Self {
        Self { period, icons }
    }

    pub fn render<D>(&self, black: &mut D, red: &mut D, at: Point) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let p = self.period;
        let code = self.icons.code_for(&p.short_forecast, p.is_daytime);
        draw_icon(red, code, at, ICON_LARGE)?;

        draw_text(black, &p.name, at.x + TEXT_DX, at.y, FONT_LARGE)?;
        let temp_target = layer(black, red, temperature_ink(p.temperature));
        draw_text(temp_target, &temperature_text(p.temperature), at.x + TEXT_DX, at.y + 30, FONT_LARGE)?;

        let body = forecast_text(p);
        if !body.is_empty() {
            let width = measure(&body, FONT_SMALL).width;
            draw_text_centered(black, &body, Point::new(at.x, at.y + 60), width, FONT_SMALL)?;
        }
        Ok(())
    }
}
