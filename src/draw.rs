/*
 *  draw.rs
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
use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle, MonoTextStyleBuilder},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Arc, Circle, Line, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};

pub fn draw_line<D>(
    target: &mut D,
    start: Point,
    end: Point,
    width: u32
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>
{
    Line::new(start, end)
        .into_styled(PrimitiveStyleBuilder::new().stroke_width(width).stroke_color(BinaryColor::On).build())
        .draw(target)
}

/// 1px vertical rule from `y0` to `y1` inclusive
pub fn draw_vline<D>(target: &mut D, x: i32, y0: i32, y1: i32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>
{
    draw_line(target, Point::new(x, y0), Point::new(x, y1), 1)
}

/// 1px horizontal rule from `x0` to `x1` inclusive
pub fn draw_hline<D>(target: &mut D, x0: i32, x1: i32, y: i32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>
{
    draw_line(target, Point::new(x0, y), Point::new(x1, y), 1)
}

/// Draw text with its top-left corner at (x,y). Embedded newlines start
/// new lines at the font's line height.
pub fn draw_text<D>(
    target: &mut D,
    text: &str,
    x: i32,
    y: i32,
    font: &MonoFont,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Text::with_baseline(
        text,
        Point::new(x, y),
        MonoTextStyleBuilder::new()
            .font(font)
            .text_color(BinaryColor::On)
            .build(),
        Baseline::Top,
    )
    .draw(target)?;
    Ok(())
}

/// Multi-line text with every line centred inside a block of `width`
/// pixels starting at `top_left`.
pub fn draw_text_centered<D>(
    target: &mut D,
    text: &str,
    top_left: Point,
    width: u32,
    font: &MonoFont,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let character_style = MonoTextStyle::new(font, BinaryColor::On);
    let text_style = TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Top)
        .build();
    let anchor = Point::new(top_left.x + width as i32 / 2, top_left.y);
    Text::with_text_style(text, anchor, character_style, text_style).draw(target)?;
    Ok(())
}

pub fn draw_circle_from_center<D>(
    target: &mut D,
    center: Point,
    diameter: u32,
    style: PrimitiveStyle<BinaryColor>,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Circle::with_center(center, diameter)
        .into_styled(style)
        .draw(target)
}

pub fn draw_arc_from_center<D>(
    target: &mut D,
    center: Point,
    diameter: u32,
    angle_start: f32,
    angle_sweep: f32,
    stroke_width: u32,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Arc::with_center(center, diameter, angle_start.deg(), angle_sweep.deg())
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, stroke_width))
        .draw(target)
}

pub fn draw_rectangle<D>(
    target: &mut D,
    top_left: Point,
    w: u32,
    h: u32,
    fill: BinaryColor,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Rectangle::new(top_left, Size::new(w, h))
        .into_styled(PrimitiveStyle::with_fill(fill))
        .draw(target)
}
