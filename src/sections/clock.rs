/*
 *  sections/clock.rs
 *
 *  inkdash - e-ink dashboard
 *  (c) 2020-26 Stuart Hunter
 *
 *  Two-zone clock header
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

use crate::config::{Clocks, ZoneLabel};
use crate::draw::draw_text;
use crate::text::{text_width, FONT_MEDIUM};

const GAP: i32 = 20;

/// "LN: 01/05/2024, 23:01"
pub fn clock_label(zone: &ZoneLabel, now: DateTime<Utc>) -> String {
    format!("{}: {}", zone.label, now.with_timezone(&zone.tz).format("%d/%m/%Y, %H:%M"))
}

/// The secondary zone on the left, the local zone to its right.
pub struct ClockPair<'a> {
    clocks: &'a Clocks,
    now: DateTime<Utc>,
}

impl<'a> ClockPair<'a> {
    pub fn new(clocks: &'a Clocks, now: DateTime<Utc>) -> Self {
        Self { clocks, now }
    }

    /// Returns the x coordinate where the local clock ends.
    pub fn render<D>(&self, black: &mut D, at: Point) -> Result<i32, D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let other = clock_label(&self.clocks.other, self.now);
        let local = clock_label(&self.clocks.local, self.now);
        let w_other = text_width(&other, FONT_MEDIUM);
        let w_local = text_width(&local, FONT_MEDIUM);

        draw_text(black, &other, at.x, at.y, FONT_MEDIUM)?;
        draw_text(black, &local, at.x + w_other + GAP, at.y, FONT_MEDIUM)?;
        Ok(at.x + w_other + GAP + w_local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Layer;
    use chrono::TimeZone;
    use embedded_graphics::primitives::Rectangle;

    #[test]
    fn test_labels_follow_zones() {
        let clocks = Clocks::default();
        // 23:01 UTC on 1 May is 00:01 BST on the 2nd and 19:01 EDT
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 23, 1, 0).unwrap();
        assert_eq!(clock_label(&clocks.other, now), "LN: 02/05/2024, 00:01");
        assert_eq!(clock_label(&clocks.local, now), "NY: 01/05/2024, 19:01");
    }

    #[test]
    fn test_local_clock_sits_right_of_other() {
        let clocks = Clocks::default();
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let mut black = Layer::new(880, 40);
        let end = ClockPair::new(&clocks, now).render(&mut black, Point::new(0, 1)).unwrap();

        let w = text_width(&clock_label(&clocks.other, now), FONT_MEDIUM);
        assert_eq!(end, w + GAP + text_width(&clock_label(&clocks.local, now), FONT_MEDIUM));
        // nothing in the gap between the two clocks
        assert_eq!(black.ink_in(&Rectangle::new(Point::new(w + 2, 0), Size::new(GAP as u32 - 4, 20))), 0);
        assert!(black.ink_in(&Rectangle::new(Point::new(w + GAP, 0), Size::new(40, 20))) > 0);
        assert_eq!(black.ink_in(&Rectangle::new(Point::new(end + 1, 0), Size::new(100, 40))), 0);
    }
}
