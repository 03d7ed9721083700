/*
 *  display/drivers/file.rs
 *
 *  inkdash - e-ink dashboard
 *  (c) 2020-26 Stuart Hunter
 *
 *  Writes the layers as PBM/PPM images instead of driving a panel
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
use log::{debug, info};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::display::error::DisplayError;
use crate::display::traits::{DisplayCapabilities, EinkDriver};

pub const BLACK_FILE: &str = "inkdash-black.pbm";
pub const RED_FILE: &str = "inkdash-red.pbm";
pub const PREVIEW_FILE: &str = "inkdash.ppm";

const PAPER: [u8; 3] = [0xFF, 0xFF, 0xFF];
const BLACK: [u8; 3] = [0x00, 0x00, 0x00];
const RED: [u8; 3] = [0xC8, 0x10, 0x10];

/// Desktop stand-in for the panel. Each `display` writes one PBM per layer
/// and a colour PPM preview with red drawn over black.
#[derive(Debug)]
pub struct FileDriver {
    capabilities: DisplayCapabilities,
    dir: PathBuf,
}

impl FileDriver {
    pub fn new(dir: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            capabilities: DisplayCapabilities { width, height, has_red: true, full_refresh_ms: 0 },
            dir: dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.dir
    }

    fn stride(&self) -> usize {
        (self.capabilities.width as usize).div_ceil(8)
    }

    fn inked(&self, buf: &[u8], x: usize, y: usize) -> bool {
        buf[y * self.stride() + x / 8] & (0x80 >> (x % 8)) == 0
    }

    /// Raw PBM (P4), where a set bit is black
    fn write_pbm(&self, name: &str, layer: &[u8]) -> Result<(), DisplayError> {
        let path = self.dir.join(name);
        let mut out = BufWriter::new(File::create(&path)?);
        write!(out, "P4\n{} {}\n", self.capabilities.width, self.capabilities.height)?;
        let inverted: Vec<u8> = layer.iter().map(|b| !b).collect();
        out.write_all(&inverted)?;
        out.flush()?;
        debug!("wrote {}", path.display());
        Ok(())
    }

    fn write_preview(&self, black: &[u8], red: &[u8]) -> Result<(), DisplayError> {
        let path = self.dir.join(PREVIEW_FILE);
        let (w, h) = (self.capabilities.width as usize, self.capabilities.height as usize);
        let mut out = BufWriter::new(File::create(&path)?);
        write!(out, "P6\n{w} {h}\n255\n")?;
        for y in 0..h {
            for x in 0..w {
                let px = if self.inked(red, x, y) {
                    RED
                } else if self.inked(black, x, y) {
                    BLACK
                } else {
                    PAPER
                };
                out.write_all(&px)?;
            }
        }
        out.flush()?;
        debug!("wrote {}", path.display());
        Ok(())
    }
}

impl EinkDriver for FileDriver {
    fn capabilities(&self) -> &DisplayCapabilities {
        &self.capabilities
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        fs::create_dir_all(&self.dir)?;
        info!("File display writing to {}", self.dir.display());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

    fn display(&mut self, black: &[u8], red: &[u8]) -> Result<(), DisplayError> {
        self.check_layer(black)?;
        self.check_layer(red)?;
        self.write_pbm(BLACK_FILE, black)?;
        self.write_pbm(RED_FILE, red)?;
        self.write_preview(black, red)
    }

    fn sleep(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }
}
