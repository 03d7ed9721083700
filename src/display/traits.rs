/*
 *  display/traits.rs
 *
 *  inkdash - e-ink dashboard
 *  (c) 2020-26 Stuart Hunter
 *
 *  Driver boundary for two-layer e-ink panels
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
use crate::display::error::DisplayError;

/// Display capabilities and metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayCapabilities {
    /// Display width in pixels
    pub width: u32,

    /// Display height in pixels
    pub height: u32,

    /// Whether the panel has a second (red) ink layer
    pub has_red: bool,

    /// Approximate duration of a full refresh, for logging
    pub full_refresh_ms: u32,
}

impl DisplayCapabilities {
    /// Bytes in one packed layer: rows padded to a byte, MSB first
    pub fn layer_len(&self) -> usize {
        (self.width as usize).div_ceil(8) * self.height as usize
    }
}

/// Every panel driver implements this.
///
/// Layers are packed 1 bit per pixel, MSB first, rows padded to a whole
/// byte, with 1 meaning paper and 0 meaning ink on both layers.
/// Lifecycle is `init`, `clear`, `display`, `sleep`; `shutdown` releases
/// the hardware and may be called at any point, including from a signal.
pub trait EinkDriver: Send {
    /// Returns the capabilities of this display
    fn capabilities(&self) -> &DisplayCapabilities;

    /// Returns the display dimensions as (width, height)
    fn dimensions(&self) -> (u32, u32) {
        let caps = self.capabilities();
        (caps.width, caps.height)
    }

    /// Reset the controller and load its power and waveform settings
    fn init(&mut self) -> Result<(), DisplayError>;

    /// Blank both layers
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Transfer both layers and run a full refresh
    fn display(&mut self, black: &[u8], red: &[u8]) -> Result<(), DisplayError>;

    /// Enter deep sleep; the image persists
    fn sleep(&mut self) -> Result<(), DisplayError>;

    /// Release the hardware
    fn shutdown(&mut self) -> Result<(), DisplayError> {
        self.sleep()
    }

    /// Reject a buffer that does not match the panel
    fn check_layer(&self, buf: &[u8]) -> Result<(), DisplayError> {
        let expected = self.capabilities().layer_len();
        if buf.len() != expected {
            return Err(DisplayError::BufferSizeMismatch { expected, actual: buf.len() });
        }
        Ok(())
    }
}
