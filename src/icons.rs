/*
 *  icons.rs
 *
 *  inkdash - e-ink dashboard
 *  (c) 2020-26 Stuart Hunter
 *
 *  Vector rendition of the weather icon font, keyed by glyph code
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
//! Icons are drawn from primitives inside a `size` x `size` box so the
//! dashboard does not depend on a TrueType rasterizer. Codes follow the
//! stock meteocons letters; anything else is drawn as the literal character.

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::PrimitiveStyle,
};

use crate::draw::{draw_arc_from_center, draw_circle_from_center, draw_line, draw_rectangle, draw_text};
use crate::text::{measure, FONT_LARGE};

/// Full size icon used by the detailed forecast
pub const ICON_LARGE: u32 = 56;
/// Hourly and five-day strips
pub const ICON_SMALL: u32 = 42;
/// Sunrise/sunset header
pub const ICON_TINY: u32 = 24;

/// Box occupied by an icon at the given size
pub fn icon_size(code: char, size: u32) -> Size {
    match code {
        'A' | 'B' | 'C' | 'F' | 'H' | 'I' | 'J' | 'M' | 'N' | 'O' | 'Q' | 'R' | 'W' => Size::new(size, size),
        other => measure(&other.to_string(), FONT_LARGE),
    }
}

/// Scaled point inside an icon box
#[derive(Clone, Copy)]
struct Frame {
    origin: Point,
    s: f32,
}

impl Frame {
    fn p(&self, fx: f32, fy: f32) -> Point {
        self.origin + Point::new((self.s * fx) as i32, (self.s * fy) as i32)
    }
    fn len(&self, f: f32) -> u32 {
        ((self.s * f) as u32).max(1)
    }
    fn stroke(&self) -> u32 {
        ((self.s / 16.0) as u32).max(1)
    }
}

pub fn draw_icon<D>(target: &mut D, code: char, top_left: Point, size: u32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let f = Frame { origin: top_left, s: size as f32 };
    match code {
        'B' => sun(target, f, f.p(0.5, 0.5), 0.2),
        'C' => moon(target, f, 0.5, 0.5, 0.55),
        'H' => {
            sun(target, f, f.p(0.33, 0.33), 0.13)?;
            cloud(target, f, 0.2, 0.35, 0.75)
        }
        'I' => {
            moon(target, f, 0.35, 0.32, 0.4)?;
            cloud(target, f, 0.2, 0.35, 0.75)
        }
        'N' => cloud(target, f, 0.1, 0.2, 0.8),
        'R' => {
            cloud(target, f, 0.1, 0.05, 0.8)?;
            drops(target, f, &[0.3, 0.5, 0.7], 0.9)
        }
        'Q' => {
            cloud(target, f, 0.1, 0.05, 0.8)?;
            drops(target, f, &[0.4, 0.6], 0.78)
        }
        'O' => {
            cloud(target, f, 0.1, 0.05, 0.8)?;
            bolt(target, f)
        }
        'W' => {
            cloud(target, f, 0.1, 0.05, 0.8)?;
            flakes(target, f)
        }
        'A' => horizon_sun(target, f, true),
        'J' => horizon_sun(target, f, false),
        'F' => wind(target, f),
        'M' => mist(target, f),
        other => draw_text(target, &other.to_string(), top_left.x, top_left.y, FONT_LARGE),
    }
}

fn sun<D>(target: &mut D, f: Frame, center: Point, r: f32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let w = f.stroke();
    draw_circle_from_center(target, center, f.len(r * 2.0), PrimitiveStyle::with_stroke(BinaryColor::On, w))?;
    for i in 0..8 {
        let a = i as f32 * std::f32::consts::FRAC_PI_4;
        let (sin, cos) = a.sin_cos();
        let inner = Point::new((cos * f.s * r * 1.35) as i32, (sin * f.s * r * 1.35) as i32);
        let outer = Point::new((cos * f.s * r * 1.8) as i32, (sin * f.s * r * 1.8) as i32);
        draw_line(target, center + inner, center + outer, w)?;
    }
    Ok(())
}

fn moon<D>(target: &mut D, f: Frame, cx: f32, cy: f32, d: f32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    draw_circle_from_center(target, f.p(cx, cy), f.len(d), PrimitiveStyle::with_fill(BinaryColor::On))?;
    // bite out a crescent
    draw_circle_from_center(
        target,
        f.p(cx + d * 0.3, cy - d * 0.2),
        f.len(d * 0.8),
        PrimitiveStyle::with_fill(BinaryColor::Off),
    )
}

fn cloud<D>(target: &mut D, f: Frame, ox: f32, oy: f32, w: f32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let fill = PrimitiveStyle::with_fill(BinaryColor::On);
    draw_circle_from_center(target, f.p(ox + w * 0.35, oy + w * 0.35), f.len(w * 0.45), fill)?;
    draw_circle_from_center(target, f.p(ox + w * 0.62, oy + w * 0.42), f.len(w * 0.35), fill)?;
    draw_rectangle(target, f.p(ox + w * 0.12, oy + w * 0.42), f.len(w * 0.76), f.len(w * 0.2), BinaryColor::On)
}

fn drops<D>(target: &mut D, f: Frame, xs: &[f32], bottom: f32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    for &x in xs {
        draw_line(target, f.p(x + 0.06, 0.64), f.p(x - 0.02, bottom), f.stroke())?;
    }
    Ok(())
}

fn bolt<D>(target: &mut D, f: Frame) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let w = f.stroke();
    draw_line(target, f.p(0.55, 0.56), f.p(0.42, 0.74), w)?;
    draw_line(target, f.p(0.42, 0.74), f.p(0.57, 0.74), w)?;
    draw_line(target, f.p(0.57, 0.74), f.p(0.44, 0.94), w)
}

fn flakes<D>(target: &mut D, f: Frame) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let fill = PrimitiveStyle::with_fill(BinaryColor::On);
    for (x, y) in [(0.3, 0.7), (0.5, 0.76), (0.7, 0.7), (0.4, 0.88), (0.6, 0.88)] {
        draw_circle_from_center(target, f.p(x, y), f.len(0.08), fill)?;
    }
    Ok(())
}

fn horizon_sun<D>(target: &mut D, f: Frame, rising: bool) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let w = f.stroke();
    draw_line(target, f.p(0.08, 0.78), f.p(0.92, 0.78), w)?;
    draw_arc_from_center(target, f.p(0.5, 0.78), f.len(0.5), 180.0, 180.0, w)?;
    let (tail, head) = if rising { (0.42, 0.08) } else { (0.08, 0.42) };
    let tip = if rising { 0.16 } else { 0.34 };
    draw_line(target, f.p(0.5, tail), f.p(0.5, head), w)?;
    draw_line(target, f.p(0.5, head), f.p(0.4, tip), w)?;
    draw_line(target, f.p(0.5, head), f.p(0.6, tip), w)
}

fn wind<D>(target: &mut D, f: Frame) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let w = f.stroke();
    for (y, end) in [(0.3, 0.7), (0.5, 0.85), (0.7, 0.6)] {
        draw_line(target, f.p(0.1, y), f.p(end, y), w)?;
        draw_arc_from_center(target, f.p(end, y - 0.06), f.len(0.12), 90.0, -270.0, w)?;
    }
    Ok(())
}

fn mist<D>(target: &mut D, f: Frame) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let w = f.stroke();
    for (i, y) in [0.3, 0.45, 0.6, 0.75].into_iter().enumerate() {
        let inset = if i % 2 == 0 { 0.1 } else { 0.2 };
        draw_line(target, f.p(inset, y), f.p(1.0 - inset, y), w)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Layer;
    use embedded_graphics::primitives::Rectangle;

    const CODES: [char; 13] = ['A', 'B', 'C', 'F', 'H', 'I', 'J', 'M', 'N', 'O', 'Q', 'R', 'W'];

    #[test]
    fn test_every_code_inks_inside_its_box() {
        for size in [ICON_TINY, ICON_SMALL, ICON_LARGE] {
            for code in CODES {
                let mut layer = Layer::new(200, 200);
                let origin = Point::new(50, 50);
                draw_icon(&mut layer, code, origin, size).unwrap();
                let total = layer.ink_count();
                assert!(total > 0, "icon {code} at {size} drew nothing");
                let inside = layer.ink_in(&Rectangle::new(origin, icon_size(code, size)));
                assert_eq!(inside, total, "icon {code} at {size} spilled out of its box");
            }
        }
    }

    #[test]
    fn test_distinct_codes_draw_distinct_shapes() {
        let render = |code| {
            let mut layer = Layer::new(64, 64);
            draw_icon(&mut layer, code, Point::zero(), ICON_LARGE).unwrap();
            layer
        };
        assert_ne!(render('B'), render('C'));
        assert_ne!(render('R'), render('Q'));
        assert_ne!(render('A'), render('J'));
    }

    #[test]
    fn test_unknown_code_falls_back_to_text() {
        let mut layer = Layer::new(64, 64);
        draw_icon(&mut layer, 'Z', Point::zero(), ICON_LARGE).unwrap();
        assert!(layer.ink_count() > 0);
        assert_eq!(icon_size('Z', ICON_LARGE), measure("Z", FONT_LARGE));
    }
}
