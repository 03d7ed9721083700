/*
 *  canvas.rs
 *
 *  inkdash - e-ink dashboard
 *  (c) 2020-26 Stuart Hunter
 *
 *  Monochrome layers and the black/red canvas pair handed to the panel
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

use core::convert::Infallible;
use embedded_graphics::geometry::{OriginDimensions, Size};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PointsIter, Rectangle};

/// A runtime-sized 1-bit layer. `BinaryColor::On` is ink.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    buf: Vec<BinaryColor>,
    w: usize,
    h: usize,
}

impl Layer {
    pub fn new(width: u32, height: u32) -> Self {
        let (w, h) = (width as usize, height as usize);
        Self { buf: vec![BinaryColor::Off; w * h], w, h }
    }

    pub fn width(&self) -> usize { self.w }
    pub fn height(&self) -> usize { self.h }

    pub fn as_slice(&self) -> &[BinaryColor] { &self.buf }

    /// Ink state at (x,y); out of bounds reads as paper
    pub fn is_inked(&self, x: i32, y: i32) -> bool {
        self.idx(Point::new(x, y)).map(|i| self.buf[i].is_on()).unwrap_or(false)
    }

    pub fn ink_count(&self) -> usize {
        self.buf.iter().filter(|c| c.is_on()).count()
    }

    /// Number of inked pixels inside a rectangle
    pub fn ink_in(&self, area: &Rectangle) -> usize {
        area.points().filter(|p| self.is_inked(p.x, p.y)).count()
    }

    /// Bytes per packed row, rows are padded to a whole byte
    pub fn row_bytes(&self) -> usize { self.w.div_ceil(8) }

    /// Pack to 1 bit per pixel, MSB first, rows padded to a byte.
    /// `ink_bit` is the bit value written for inked pixels; paper and
    /// padding take the opposite value.
    pub fn to_packed_bytes(&self, ink_bit: bool) -> Vec<u8> {
        let stride = self.row_bytes();
        let paper = if ink_bit { 0x00 } else { 0xFF };
        let mut bytes = vec![paper; stride * self.h];
        for y in 0..self.h {
            for x in 0..self.w {
                if self.buf[y * self.w + x].is_on() {
                    let byte = &mut bytes[y * stride + x / 8];
                    let mask = 0x80 >> (x % 8);
                    if ink_bit { *byte |= mask } else { *byte &= !mask }
                }
            }
        }
        bytes
    }

    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if p.x >= 0 && p.y >= 0 {
            let (x, y) = (p.x as usize, p.y as usize);
            if x < self.w && y < self.h {
                return Some(y * self.w + x);
            }
        }
        None
    }
}

impl OriginDimensions for Layer {
    fn size(&self) -> Size {
        Size::new(self.w as u32, self.h as u32)
    }
}

impl DrawTarget for Layer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, c) in pixels {
            if let Some(i) = self.idx(p) {
                self.buf[i] = c;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.buf.fill(color);
        Ok(())
    }
}

/// Which layer a piece of content lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ink {
    Black,
    Red,
}

/// The two same-size layers composited by the panel at push time.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasPair {
    pub black: Layer,
    pub red: Layer,
}

impl CanvasPair {
    pub fn new(width: u32, height: u32) -> Self {
        Self { black: Layer::new(width, height), red: Layer::new(width, height) }
    }

    pub fn width(&self) -> i32 { self.black.width() as i32 }
    pub fn height(&self) -> i32 { self.black.height() as i32 }

    pub fn layer_mut(&mut self, ink: Ink) -> &mut Layer {
        match ink {
            Ink::Black => &mut self.black,
            Ink::Red => &mut self.red,
        }
    }

    /// Black layer packed for the panel: 1 = paper, 0 = ink
    pub fn black_bytes(&self) -> Vec<u8> { self.black.to_packed_bytes(false) }

    /// Red layer in the same 1 = paper convention. Drivers whose red RAM
    /// takes 1 = red invert it on the way out.
    pub fn red_bytes(&self) -> Vec<u8> { self.red.to_packed_bytes(false) }
}
