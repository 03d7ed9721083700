/*
 *  display/drivers/epd7in5b_hd.rs
 *
 *  inkdash - e-ink dashboard
 *  (c) 2020-26 Stuart Hunter
 *
 *  Waveshare 7.5" B HD (880x528, black/red) over SPI
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
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiDevice;
use log::{debug, info};

use crate::display::error::DisplayError;
use crate::display::traits::{DisplayCapabilities, EinkDriver};

pub const WIDTH: u32 = 880;
pub const HEIGHT: u32 = 528;

const BUSY_POLL_MS: u32 = 10;
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 30_000;
/// spidev rejects single transfers above its default `bufsiz`
pub const MAX_TRANSFER: usize = 4096;

/// Controller command bytes
pub mod cmd {
    pub const DEEP_SLEEP: u8 = 0x10;
    pub const DATA_ENTRY_MODE: u8 = 0x11;
    pub const SW_RESET: u8 = 0x12;
    pub const BOOSTER_SOFT_START: u8 = 0x0C;
    pub const DRIVER_OUTPUT_CTRL: u8 = 0x01;
    pub const TEMP_SENSOR: u8 = 0x18;
    pub const MASTER_ACTIVATE: u8 = 0x20;
    pub const UPDATE_CTRL2: u8 = 0x22;
    pub const WRITE_BW_RAM: u8 = 0x24;
    pub const WRITE_RED_RAM: u8 = 0x26;
    pub const BORDER_WAVEFORM: u8 = 0x3C;
    pub const RAM_X_RANGE: u8 = 0x44;
    pub const RAM_Y_RANGE: u8 = 0x45;
    pub const AUTO_WRITE_RED: u8 = 0x46;
    pub const AUTO_WRITE_BW: u8 = 0x47;
    pub const RAM_X_COUNTER: u8 = 0x4E;
    pub const RAM_Y_COUNTER: u8 = 0x4F;
}

/// Steps of a controller init sequence
#[derive(Clone, Copy, Debug)]
pub enum InitStep {
    Cmd(u8),
    CmdData(u8, &'static [u8]),
    WaitUntilIdle,
}

/// Panel bring-up: reset, clear both RAMs, 880x528 window with y counting
/// down from 527, internal temperature sensor, load waveform.
pub const INIT_SEQUENCE: &[InitStep] = &[
    InitStep::Cmd(cmd::SW_RESET),
    InitStep::WaitUntilIdle,
    InitStep::CmdData(cmd::AUTO_WRITE_RED, &[0xF7]),
    InitStep::WaitUntilIdle,
    InitStep::CmdData(cmd::AUTO_WRITE_BW, &[0xF7]),
    InitStep::WaitUntilIdle,
    InitStep::CmdData(cmd::BOOSTER_SOFT_START, &[0xAE, 0xC7, 0xC3, 0xC0, 0x40]),
    InitStep::CmdData(cmd::DRIVER_OUTPUT_CTRL, &[0xAF, 0x02, 0x01]),
    InitStep::CmdData(cmd::DATA_ENTRY_MODE, &[0x01]),
    InitStep::CmdData(cmd::RAM_X_RANGE, &[0x00, 0x00, 0x6F, 0x03]),
    InitStep::CmdData(cmd::RAM_Y_RANGE, &[0xAF, 0x02, 0x00, 0x00]),
    InitStep::CmdData(cmd::BORDER_WAVEFORM, &[0x01]),
    InitStep::CmdData(cmd::TEMP_SENSOR, &[0x80]),
    InitStep::CmdData(cmd::UPDATE_CTRL2, &[0xB1]),
    InitStep::Cmd(cmd::MASTER_ACTIVATE),
    InitStep::WaitUntilIdle,
    InitStep::CmdData(cmd::RAM_X_COUNTER, &[0x00, 0x00]),
    InitStep::CmdData(cmd::RAM_Y_COUNTER, &[0xAF, 0x02]),
];

fn spi_err<E: embedded_hal::spi::Error>(e: E) -> DisplayError {
    DisplayError::SpiError(format!("{:?}", e.kind()))
}

fn pin_err<E: embedded_hal::digital::Error>(e: E) -> DisplayError {
    DisplayError::GpioError(format!("{:?}", e.kind()))
}

/// The panel on an SPI device with BUSY (active high), DC and RST lines.
pub struct Epd7in5bHd<SPI, BUSY, DC, RST, DELAY> {
    spi: SPI,
    busy: BUSY,
    dc: DC,
    rst: RST,
    delay: DELAY,
    capabilities: DisplayCapabilities,
    busy_timeout_ms: u64,
}

impl<SPI, BUSY, DC, RST, DELAY> Epd7in5bHd<SPI, BUSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    BUSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    pub fn new(spi: SPI, busy: BUSY, dc: DC, rst: RST, delay: DELAY) -> Self {
        debug!("creating new Epd7in5bHd instance");
        Self {
            spi,
            busy,
            dc,
            rst,
            delay,
            capabilities: DisplayCapabilities { width: WIDTH, height: HEIGHT, has_red: true, full_refresh_ms: 22_000 },
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }

    pub fn with_busy_timeout(mut self, ms: u64) -> Self {
        self.busy_timeout_ms = ms;
        self
    }

    /// Give back the bus and pins
    pub fn release(self) -> (SPI, BUSY, DC, RST, DELAY) {
        (self.spi, self.busy, self.dc, self.rst, self.delay)
    }

    fn hard_reset(&mut self) -> Result<(), DisplayError> {
        self.rst.set_high().map_err(pin_err)?;
        self.delay.delay_ms(200);
        self.rst.set_low().map_err(pin_err)?;
        self.delay.delay_ms(4);
        self.rst.set_high().map_err(pin_err)?;
        self.delay.delay_ms(200);
        Ok(())
    }

    fn command(&mut self, c: u8) -> Result<(), DisplayError> {
        self.dc.set_low().map_err(pin_err)?;
        self.spi.write(&[c]).map_err(spi_err)
    }

    fn data(&mut self, d: &[u8]) -> Result<(), DisplayError> {
        self.dc.set_high().map_err(pin_err)?;
        for chunk in d.chunks(MAX_TRANSFER) {
            self.spi.write(chunk).map_err(spi_err)?;
        }
        Ok(())
    }

    fn cmd_with_data(&mut self, c: u8, d: &[u8]) -> Result<(), DisplayError> {
        self.command(c)?;
        self.data(d)
    }

    fn wait_until_idle(&mut self) -> Result<(), DisplayError> {
        let mut waited: u64 = 0;
        while self.busy.is_high().map_err(pin_err)? {
            if waited >= self.busy_timeout_ms {
                return Err(DisplayError::BusyTimeout(self.busy_timeout_ms));
            }
            self.delay.delay_ms(BUSY_POLL_MS);
            waited += u64::from(BUSY_POLL_MS);
        }
        Ok(())
    }

    fn refresh(&mut self) -> Result<(), DisplayError> {
        self.cmd_with_data(cmd::UPDATE_CTRL2, &[0xC7])?;
        self.command(cmd::MASTER_ACTIVATE)?;
        self.delay.delay_ms(200);
        self.wait_until_idle()
    }
}

impl<SPI, BUSY, DC, RST, DELAY> EinkDriver for Epd7in5bHd<SPI, BUSY, DC, RST, DELAY>
where
    SPI: SpiDevice + Send,
    BUSY: InputPin + Send,
    DC: OutputPin + Send,
    RST: OutputPin + Send,
    DELAY: DelayNs + Send,
{
    fn capabilities(&self) -> &DisplayCapabilities {
        &self.capabilities
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        info!("Initializing 7.5\" B HD panel");
        self.hard_reset()?;
        for step in INIT_SEQUENCE {
            debug!("init step: {:?}", step);
            match *step {
                InitStep::Cmd(c) => self.command(c)?,
                InitStep::CmdData(c, d) => self.cmd_with_data(c, d)?,
                InitStep::WaitUntilIdle => self.wait_until_idle()?,
            }
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        debug!("clearing both RAMs");
        let len = self.capabilities.layer_len();
        self.cmd_with_data(cmd::RAM_Y_COUNTER, &[0xAF, 0x02])?;
        self.cmd_with_data(cmd::WRITE_BW_RAM, &vec![0xFF; len])?;
        self.cmd_with_data(cmd::WRITE_RED_RAM, &vec![0x00; len])?;
        self.refresh()
    }

    fn display(&mut self, black: &[u8], red: &[u8]) -> Result<(), DisplayError> {
        self.check_layer(black)?;
        self.check_layer(red)?;
        debug!("writing black and red RAM");
        // red RAM takes 1 = red
        let red_ram: Vec<u8> = red.iter().map(|b| !b).collect();
        self.cmd_with_data(cmd::RAM_Y_COUNTER, &[0xAF, 0x02])?;
        self.cmd_with_data(cmd::WRITE_BW_RAM, black)?;
        self.cmd_with_data(cmd::WRITE_RED_RAM, &red_ram)?;
        self.refresh()
    }

    fn sleep(&mut self) -> Result<(), DisplayError> {
        debug!("deep sleep");
        self.cmd_with_data(cmd::DEEP_SLEEP, &[0x01])?;
        self.delay.delay_ms(2);
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), DisplayError> {
        self.sleep()?;
        self.rst.set_low().map_err(pin_err)?;
        self.dc.set_low().map_err(pin_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::spi::Operation;
    use std::sync::{Arc, Mutex};

    /// What went over the wire: (dc level, bytes)
    #[derive(Default)]
    struct Bus {
        dc: bool,
        writes: Vec<(bool, Vec<u8>)>,
    }

    struct Spi(Arc<Mutex<Bus>>);
    struct Dc(Arc<Mutex<Bus>>);
    struct Rst;
    struct Busy(usize);
    struct NoDelay;

    impl embedded_hal::spi::ErrorType for Spi {
        type Error = Infallible;
    }

    impl SpiDevice for Spi {
        fn transaction(&mut self, ops: &mut [Operation<'_, u8>]) -> Result<(), Infallible> {
            let mut bus = self.0.lock().unwrap();
            for op in ops {
                if let Operation::Write(bytes) = op {
                    let dc = bus.dc;
                    bus.writes.push((dc, bytes.to_vec()));
                }
            }
            Ok(())
        }
    }

    impl embedded_hal::digital::ErrorType for Dc {
        type Error = Infallible;
    }

    impl OutputPin for Dc {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.0.lock().unwrap().dc = false;
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Infallible> {
            self.0.lock().unwrap().dc = true;
            Ok(())
        }
    }

    impl embedded_hal::digital::ErrorType for Rst {
        type Error = Infallible;
    }

    impl OutputPin for Rst {
        fn set_low(&mut self) -> Result<(), Infallible> { Ok(()) }
        fn set_high(&mut self) -> Result<(), Infallible> { Ok(()) }
    }

    impl embedded_hal::digital::ErrorType for Busy {
        type Error = Infallible;
    }

    /// Busy for the first `n` polls
    impl InputPin for Busy {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            if self.0 > 0 {
                self.0 -= 1;
                return Ok(true);
            }
            Ok(false)
        }
        fn is_low(&mut self) -> Result<bool, Infallible> {
            self.is_high().map(|b| !b)
        }
    }

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn panel(busy_polls: usize) -> (Epd7in5bHd<Spi, Busy, Dc, Rst, NoDelay>, Arc<Mutex<Bus>>) {
        let bus = Arc::new(Mutex::new(Bus::default()));
        let epd = Epd7in5bHd::new(Spi(bus.clone()), Busy(busy_polls), Dc(bus.clone()), Rst, NoDelay);
        (epd, bus)
    }

    /// Commands in order, each with its data bytes joined
    fn commands(bus: &Arc<Mutex<Bus>>) -> Vec<(u8, Vec<u8>)> {
        let mut out: Vec<(u8, Vec<u8>)> = Vec::new();
        for (dc, bytes) in &bus.lock().unwrap().writes {
            match (dc, out.last_mut()) {
                (false, _) => out.push((bytes[0], Vec::new())),
                (true, Some((_, data))) => data.extend_from_slice(bytes),
                (true, None) => panic!("data before any command"),
            }
        }
        out
    }

    #[test]
    fn test_init_sequence_order() {
        let (mut epd, bus) = panel(3);
        epd.init().unwrap();
        let cmds = commands(&bus);
        assert_eq!(cmds[0], (cmd::SW_RESET, vec![]));
        assert_eq!(cmds[1], (cmd::AUTO_WRITE_RED, vec![0xF7]));
        assert!(cmds.contains(&(cmd::RAM_X_RANGE, vec![0x00, 0x00, 0x6F, 0x03])));
        assert_eq!(cmds.last().unwrap(), &(cmd::RAM_Y_COUNTER, vec![0xAF, 0x02]));
    }

    #[test]
    fn test_display_inverts_red() {
        let (mut epd, bus) = panel(0);
        let len = epd.capabilities().layer_len();
        let black = vec![0xAA; len];
        let mut red = vec![0xFF; len];
        red[0] = 0x7F;
        epd.display(&black, &red).unwrap();

        let cmds = commands(&bus);
        let bw = cmds.iter().find(|(c, _)| *c == cmd::WRITE_BW_RAM).unwrap();
        let rd = cmds.iter().find(|(c, _)| *c == cmd::WRITE_RED_RAM).unwrap();
        assert_eq!(bw.1, black);
        assert_eq!(rd.1[0], 0x80);
        assert!(rd.1[1..].iter().all(|&b| b == 0x00));
        assert_eq!(cmds.last().unwrap().0, cmd::MASTER_ACTIVATE);
    }

    #[test]
    fn test_layer_writes_fit_spidev_buffer() {
        let (mut epd, bus) = panel(0);
        let len = epd.capabilities().layer_len();
        let black: Vec<u8> = (0..len).map(|i| i as u8).collect();
        epd.display(&black, &vec![0xFF; len]).unwrap();

        {
            let guard = bus.lock().unwrap();
            assert!(guard.writes.iter().all(|(_, bytes)| bytes.len() <= MAX_TRANSFER));
            // 58080 bytes a layer is 15 transfers, all with DC high
            let data_writes = guard.writes.iter().filter(|(dc, b)| *dc && b.len() > 8).count();
            assert_eq!(data_writes, 2 * len.div_ceil(MAX_TRANSFER));
        }

        let cmds = commands(&bus);
        let bw = cmds.iter().find(|(c, _)| *c == cmd::WRITE_BW_RAM).unwrap();
        assert_eq!(bw.1, black);
    }

    #[test]
    fn test_clear_writes_blank_rams() {
        let (mut epd, bus) = panel(0);
        epd.clear().unwrap();
        let cmds = commands(&bus);
        let bw = cmds.iter().find(|(c, _)| *c == cmd::WRITE_BW_RAM).unwrap();
        let rd = cmds.iter().find(|(c, _)| *c == cmd::WRITE_RED_RAM).unwrap();
        assert_eq!(bw.1.len(), 110 * 528);
        assert!(bw.1.iter().all(|&b| b == 0xFF));
        assert!(rd.1.iter().all(|&b| b == 0x00));
    }

    #[test]
    fn test_wrong_buffer_rejected_before_transfer() {
        let (mut epd, bus) = panel(0);
        assert!(matches!(epd.display(&[0xFF; 10], &[0xFF; 10]), Err(DisplayError::BufferSizeMismatch { .. })));
        assert!(bus.lock().unwrap().writes.is_empty());
    }

    #[test]
    fn test_busy_timeout() {
        let (epd, _bus) = panel(usize::MAX);
        let mut epd = epd.with_busy_timeout(100);
        assert!(matches!(epd.init(), Err(DisplayError::BusyTimeout(100))));
    }

    #[test]
    fn test_sleep_command() {
        let (mut epd, bus) = panel(0);
        epd.sleep().unwrap();
        assert_eq!(commands(&bus), vec![(cmd::DEEP_SLEEP, vec![0x01])]);
    }
}
