/*
 *  lib.rs
 *
 *  inkdash - e-ink dashboard
 *  (c) 2020-26 Stuart Hunter
 *
 *  Library root
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
//! Weather, transit and aircraft dashboard for a two-colour 7.5" e-ink
//! panel. Feeds are fetched into a [`screen::Snapshot`], composed onto a
//! [`canvas::CanvasPair`] and pushed through a [`display::EinkDriver`].

/// Build date and target triple stamped by `build.rs`
pub mod build_info {
    include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_build_stamp() {
            assert!(BUILD_DATE.ends_with(" UTC"));
            assert_eq!(BUILD_DATE.len(), "2026-01-01 00:00:00 UTC".len());
            assert!(!BUILD_TARGET.is_empty());
        }
    }
}

pub mod canvas;
pub mod config;
pub mod display;
pub mod draw;
pub mod feeds;
pub mod glyph;
pub mod icons;
pub mod screen;
pub mod sections;
pub mod solar;
pub mod text;
pub mod units;
