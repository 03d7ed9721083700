/*
 *  sections/hourly.rs
 *
 *  inkdash - e-ink dashboard
 *  (c) 2020-26 Stuart Hunter
 *
 *  One hour of the twelve-hour strip
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

use crate::draw::draw_text_centered;
use crate::feeds::weather::Period;
use crate::glyph::IconMap;
use crate::icons::{draw_icon, ICON_SMALL};
use crate::text::{measure, FONT_TINY};
use crate::units::dual_temperature;

const ICON_DX: i32 = 10;
const TEXT_DY: i32 = 40;

/// Hour, temperature and wind on three lines. The hour is the period's
/// own (feed offset) wall-clock hour.
pub fn hour_text(period: &Period) -> String {
    format!(
        "{}:00\n{}\n{} {}",
        period.start_time.format("%H"),
        dual_temperature(period.temperature),
        period.wind_speed,
        period.wind_direction
    )
}

pub struct HourlyPeriod<'a> {
    period: &'a Period,
    icons: &'a IconMap,
}

impl<'a> HourlyPeriod<'a> {
    pub fn new(period: &'a Period, icons: &'a IconMap) -> Self {
        Self { period, icons }
    }

    /// Width taken by the entry, the text block or the inset icon
    /// whichever is wider.
    pub fn width(&self) -> u32 {
        let text = measure(&hour_text(self.period), FONT_TINY).width;
        text.max(ICON_DX as u32 + ICON_SMALL)
    }

    pub fn render<D>(&self, black: &mut D, red: &mut D, at: Point) -> Result<u32, D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let p = self.period;
        let code = self.icons.code_for(&p.short_forecast, p.is_daytime);
        draw_icon(red, code, at + Point::new(ICON_DX, 0), ICON_SMALL)?;

        let text = hour_text(p);
        let width = measure(&text, FONT_TINY).width;
        draw_text_centered(black, &text, at + Point::new(0, TEXT_DY), width, FONT_TINY)?;
        Ok(self.width())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Layer;
    use crate::feeds::weather::parse_forecast;

    const BODY: &str = r#"{"properties":{"periods":[
        {"number":3,"name":"","startTime":"2024-05-01T21:00:00-04:00","endTime":"2024-05-01T22:00:00-04:00",
         "isDaytime":false,"temperature":61,"windSpeed":"5 mph","windDirection":"SW",
         "shortForecast":"Mostly Clear","detailedForecast":""}
    ]}}"#;

    #[test]
    fn test_hour_text() {
        let fc = parse_forecast(BODY).unwrap();
        assert_eq!(hour_text(&fc.periods()[0]), "21:00\n61 F (16 C)\n5 mph SW");
    }

    #[test]
    fn test_render_reports_width() {
        let fc = parse_forecast(BODY).unwrap();
        let icons = IconMap::default();
        let entry = HourlyPeriod::new(&fc.periods()[0], &icons);
        let mut black = Layer::new(200, 100);
        let mut red = Layer::new(200, 100);
        let w = entry.render(&mut black, &mut red, Point::new(15, 0)).unwrap();
        // "61 F (16 C)" is the widest line
        assert_eq!(w, 11 * FONT_TINY.character_size.width);
        assert!(red.ink_count() > 0);
        assert!(black.ink_count() > 0);
        for x in 15 + w as i32 + 1..200 {
            for y in 0..100 {
                assert!(!black.is_inked(x, y), "ink past the entry at {x},{y}");
            }
        }
    }
}
