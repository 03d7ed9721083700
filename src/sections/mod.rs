/*
 *  sections/mod.rs
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
//! Section renderers. Each one places a single record at a fixed anchor on
//! the black and red layers and, where the caller flows sections left to
//! right, reports the width it used.

pub mod aircraft;
pub mod clock;
pub mod detailed;
pub mod five_day;
pub mod hourly;
pub mod sun;
pub mod train;

pub use aircraft::AircraftRow;
pub use clock::ClockPair;
pub use detailed::DetailedPeriod;
pub use five_day::FiveDayPeriod;
pub use hourly::HourlyPeriod;
pub use sun::SunBlock;
pub use train::TrainRow;

use embedded_graphics::{pixelcolor::BinaryColor, prelude::DrawTarget};

use crate::canvas::Ink;

/// Pick the layer for a piece of content
pub(crate) fn layer<'a, D>(black: &'a mut D, red: &'a mut D, ink: Ink) -> &'a mut D
where
    D: DrawTarget<Color = BinaryColor>,
{
    match ink {
        Ink::Black => black,
        Ink::Red => red,
    }
}
