/*
 *  display/mod.rs
 *
 *  inkdash - e-ink dashboard
 *  (c) 2020-26 Stuart Hunter
 *
 *  Display subsystem: driver trait, drivers and the show cycle
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
use log::info;

pub mod drivers;
pub mod error;
pub mod factory;
pub mod traits;

pub use error::DisplayError;
pub use factory::{create_driver, BoxedDriver};
pub use traits::{DisplayCapabilities, EinkDriver};

use crate::canvas::CanvasPair;

/// One full update: init, clear, write both layers, then sleep.
pub fn show(driver: &mut dyn EinkDriver, canvas: &CanvasPair) -> Result<(), DisplayError> {
    let (w, h) = driver.dimensions();
    if (w as i32, h as i32) != (canvas.width(), canvas.height()) {
        return Err(DisplayError::InvalidConfiguration(format!(
            "canvas {}x{} does not match panel {w}x{h}",
            canvas.width(),
            canvas.height()
        )));
    }
    driver.init()?;
    driver.clear()?;
    info!("Refreshing panel, about {} ms", driver.capabilities().full_refresh_ms);
    driver.display(&canvas.black_bytes(), &canvas.red_bytes())?;
    driver.sleep()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Ink;
    use crate::display::drivers::mock::{MockCall, MockDriver};
    use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

    #[test]
    fn test_show_lifecycle() {
        let mut canvas = CanvasPair::new(16, 4);
        Pixel(Point::new(3, 1), BinaryColor::On).draw(canvas.layer_mut(Ink::Red)).unwrap();
        let mut driver = MockDriver::new_with_size(16, 4);
        show(&mut driver, &canvas).unwrap();
        assert_eq!(driver.calls(), vec![MockCall::Init, MockCall::Clear, MockCall::Display, MockCall::Sleep]);
        assert_eq!(driver.inked(true, 3, 1), Some(true));
        assert_eq!(driver.inked(false, 3, 1), Some(false));
    }

    #[test]
    fn test_show_rejects_mismatched_canvas() {
        let canvas = CanvasPair::new(8, 8);
        let mut driver = MockDriver::new_with_size(16, 4);
        assert!(show(&mut driver, &canvas).is_err());
        assert!(driver.calls().is_empty());
    }
}
