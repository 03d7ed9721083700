/*
 *  text.rs
 *
 *  inkdash - e-ink dashboard
 *  (c) 2020-26 Stuart Hunter
 *
 *  Text layout helpers - word wrap, sentence truncation, measurement
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
use embedded_graphics::{
    geometry::Size,
    mono_font::{iso_8859_1::{FONT_5X8, FONT_6X10, FONT_9X15, FONT_10X20}, MonoFont, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};

/// Headline font - period names, detailed temperatures
pub const FONT_LARGE: &MonoFont<'static> = &FONT_10X20;
/// Clocks, five-day temperatures, train rows
pub const FONT_MEDIUM: &MonoFont<'static> = &FONT_9X15;
/// Body copy - detailed forecasts, sun block, aircraft rows
pub const FONT_SMALL: &MonoFont<'static> = &FONT_6X10;
/// The twelve-hour and five-day strips, which have to fit the panel width
pub const FONT_TINY: &MonoFont<'static> = &FONT_5X8;

/// Returns a string where a newline is inserted after every `n` words.
/// Each group, including the last, is newline terminated.
pub fn wrap_by_word(s: &str, n: usize) -> String {
    let words: Vec<&str> = s.split_whitespace().collect();
    let mut ret = String::new();
    for group in words.chunks(n.max(1)) {
        ret.push_str(&group.join(" "));
        ret.push('\n');
    }
    ret
}

/// Keep at most the first three '.'-delimited sentences.
/// The text is split into at most four pieces and the trailing piece is
/// dropped, so the final full stop is not reproduced and text without any
/// full stop truncates to nothing.
pub fn first_sentences(s: &str) -> String {
    let pieces: Vec<&str> = s.splitn(4, '.').collect();
    pieces[..pieces.len() - 1].join(".")
}

/// Pixel bounding box of (possibly multi-line) text in the given font.
pub fn measure(text: &str, font: &MonoFont) -> Size {
    let style = MonoTextStyle::new(font, BinaryColor::On);
    Text::with_baseline(text, Point::zero(), style, Baseline::Top)
        .bounding_box()
        .size
}

#[inline]
pub fn text_width(text: &str, font: &MonoFont) -> i32 {
    measure(text, font).width as i32
}
