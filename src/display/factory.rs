/*
 *  display/factory.rs
 *
 *  inkdash - e-ink dashboard
 *  (c) 2020-26 Stuart Hunter
 *
 *  Driver selection from configuration
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

use crate::config::{DisplayConfig, DriverKind};
use crate::display::drivers::file::FileDriver;
use crate::display::error::DisplayError;
use crate::display::traits::EinkDriver;

/// Type alias for boxed driver trait objects
pub type BoxedDriver = Box<dyn EinkDriver>;

/// Build the driver named in the configuration. Hardware drivers open
/// their SPI device and export their GPIO lines here.
pub fn create_driver(config: &DisplayConfig) -> Result<BoxedDriver, DisplayError> {
    match config.driver {
        DriverKind::File => {
            info!("Using file display in {}", config.output_dir.display());
            Ok(Box::new(FileDriver::new(&config.output_dir, config.width, config.height)))
        }
        DriverKind::Epd7in5bHd => epd::open(config),
    }
}

#[cfg(feature = "driver-epd7in5b-hd")]
mod epd {
    use linux_embedded_hal::spidev::{SpiModeFlags, SpidevOptions};
    use linux_embedded_hal::sysfs_gpio::Direction;
    use linux_embedded_hal::{Delay, SpidevDevice, SysfsPin};
    use log::{debug, info};

    use super::BoxedDriver;
    use crate::config::DisplayConfig;
    use crate::display::drivers::epd7in5b_hd::{self, Epd7in5bHd};
    use crate::display::error::DisplayError;

    fn gpio(num: u64, direction: Direction) -> Result<SysfsPin, DisplayError> {
        let pin = SysfsPin::new(num);
        pin.export().map_err(|e| DisplayError::GpioError(format!("export {num}: {e}")))?;
        pin.set_direction(direction)
            .map_err(|e| DisplayError::GpioError(format!("direction {num}: {e}")))?;
        debug!("GPIO {num} ready as {direction:?}");
        Ok(pin)
    }

    pub(super) fn open(config: &DisplayConfig) -> Result<BoxedDriver, DisplayError> {
        if (config.width, config.height) != (epd7in5b_hd::WIDTH, epd7in5b_hd::HEIGHT) {
            return Err(DisplayError::InvalidConfiguration(format!(
                "7.5\" B HD panel is {}x{}, configured {}x{}",
                epd7in5b_hd::WIDTH,
                epd7in5b_hd::HEIGHT,
                config.width,
                config.height
            )));
        }

        info!("Opening {} at {} Hz", config.spi.device, config.spi.speed_hz);
        let mut spi = SpidevDevice::open(&config.spi.device)
            .map_err(|e| DisplayError::SpiError(format!("{}: {e:?}", config.spi.device)))?;
        let options = SpidevOptions::new()
            .bits_per_word(8)
            .max_speed_hz(config.spi.speed_hz)
            .mode(SpiModeFlags::SPI_MODE_0)
            .build();
        spi.configure(&options)
            .map_err(|e| DisplayError::SpiError(format!("configure: {e}")))?;

        let busy = gpio(config.pins.busy, Direction::In)?;
        let dc = gpio(config.pins.dc, Direction::Out)?;
        let rst = gpio(config.pins.rst, Direction::Out)?;

        Ok(Box::new(Epd7in5bHd::new(spi, busy, dc, rst, Delay)))
    }
}

#[cfg(not(feature = "driver-epd7in5b-hd"))]
mod epd {
    use super::BoxedDriver;
    use crate::config::DisplayConfig;
    use crate::display::error::DisplayError;

    pub(super) fn open(_config: &DisplayConfig) -> Result<BoxedDriver, DisplayError> {
        Err(DisplayError::InvalidConfiguration(
            "7.5\" B HD driver not enabled. Enable with --features driver-epd7in5b-hd".to_string(),
        ))
    }
}
