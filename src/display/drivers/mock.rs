/*
 *  display/drivers/mock.rs
 *
 *  inkdash - e-ink dashboard
 *  (c) 2020-26 Stuart Hunter
 *
 *  Recording driver for tests
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
use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::DisplayConfig;
use crate::display::error::DisplayError;
use crate::display::traits::{DisplayCapabilities, EinkDriver};

/// Lifecycle calls in the order the driver saw them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockCall {
    Init,
    Clear,
    Display,
    Sleep,
    Shutdown,
}

/// Mock display driver for testing
///
/// Simulates a two-layer panel without hardware, records every lifecycle
/// call and keeps the last pair of layers for inspection.
#[derive(Debug, Clone)]
pub struct MockDriver {
    capabilities: DisplayCapabilities,
    state: Arc<Mutex<MockDriverState>>,
}

/// Internal state for the mock driver (shared for inspection in tests)
#[derive(Debug, Default)]
pub struct MockDriverState {
    pub calls: Vec<MockCall>,

    /// Whether the driver is initialized
    pub is_initialized: bool,

    /// Last layers passed to display()
    pub last_black: Option<Vec<u8>>,
    pub last_red: Option<Vec<u8>>,

    /// Simulate failures (for error testing)
    pub simulate_init_failure: bool,
    pub simulate_display_failure: bool,
}

impl MockDriver {
    pub fn new(config: &DisplayConfig) -> Self {
        Self::new_with_size(config.width, config.height)
    }

    /// Create a mock driver with specific dimensions
    pub fn new_with_size(width: u32, height: u32) -> Self {
        Self {
            capabilities: DisplayCapabilities { width, height, has_red: true, full_refresh_ms: 0 },
            state: Arc::new(Mutex::new(MockDriverState::default())),
        }
    }

    /// Get reference to state for inspection in tests
    pub fn state(&self) -> Arc<Mutex<MockDriverState>> {
        Arc::clone(&self.state)
    }

    fn lock(&self) -> MutexGuard<'_, MockDriverState> {
        // a panicking test thread must not hide the recorded calls
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.lock().calls.clone()
    }

    /// Ink at (x, y) in the last displayed black or red layer
    pub fn inked(&self, red: bool, x: u32, y: u32) -> Option<bool> {
        let state = self.lock();
        let buf = if red { state.last_red.as_ref() } else { state.last_black.as_ref() }?;
        if x >= self.capabilities.width || y >= self.capabilities.height {
            return None;
        }
        let stride = (self.capabilities.width as usize).div_ceil(8);
        let byte = buf[y as usize * stride + x as usize / 8];
        Some(byte & (0x80 >> (x % 8)) == 0)
    }
}

impl EinkDriver for MockDriver {
    fn capabilities(&self) -> &DisplayCapabilities {
        &self.capabilities
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        let mut state = self.lock();
        if state.simulate_init_failure {
            return Err(DisplayError::InitializationFailed("simulated init failure".into()));
        }
        state.calls.push(MockCall::Init);
        state.is_initialized = true;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        let mut state = self.lock();
        if !state.is_initialized {
            return Err(DisplayError::NotInitialized);
        }
        state.calls.push(MockCall::Clear);
        Ok(())
    }

    fn display(&mut self, black: &[u8], red: &[u8]) -> Result<(), DisplayError> {
        self.check_layer(black)?;
        self.check_layer(red)?;
        let mut state = self.lock();
        if !state.is_initialized {
            return Err(DisplayError::NotInitialized);
        }
        if state.simulate_display_failure {
            return Err(DisplayError::SpiError("simulated transfer failure".into()));
        }
        state.calls.push(MockCall::Display);
        state.last_black = Some(black.to_vec());
        state.last_red = Some(red.to_vec());
        Ok(())
    }

    fn sleep(&mut self) -> Result<(), DisplayError> {
        let mut state = self.lock();
        state.calls.push(MockCall::Sleep);
        state.is_initialized = false;
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), DisplayError> {
        let mut state = self.lock();
        state.calls.push(MockCall::Shutdown);
        state.is_initialized = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_driver_creation() {
        let driver = MockDriver::new(&DisplayConfig::default());
        assert_eq!(driver.dimensions(), (880, 528));
        assert_eq!(driver.capabilities().layer_len(), 110 * 528);
        assert!(driver.calls().is_empty());
    }

    #[test]
    fn test_display_requires_init() {
        let mut driver = MockDriver::new_with_size(16, 2);
        let buf = vec![0xFF; 4];
        assert!(matches!(driver.display(&buf, &buf), Err(DisplayError::NotInitialized)));
        driver.init().unwrap();
        driver.display(&buf, &buf).unwrap();
        assert_eq!(driver.calls(), vec![MockCall::Init, MockCall::Display]);
    }

    #[test]
    fn test_buffer_size_checked() {
        let mut driver = MockDriver::new_with_size(10, 2);
        driver.init().unwrap();
        let good = vec![0xFF; 4];
        let bad = vec![0xFF; 3];
        assert!(matches!(
            driver.display(&good, &bad),
            Err(DisplayError::BufferSizeMismatch { expected: 4, actual: 3 })
        ));
    }

    #[test]
    fn test_pixel_readback() {
        let mut driver = MockDriver::new_with_size(10, 2);
        driver.init().unwrap();
        driver.display(&[0x7F, 0xFF, 0xFF, 0xBF], &[0xFF; 4]).unwrap();
        assert_eq!(driver.inked(false, 0, 0), Some(true));
        assert_eq!(driver.inked(false, 9, 1), Some(true));
        assert_eq!(driver.inked(false, 1, 0), Some(false));
        assert_eq!(driver.inked(true, 0, 0), Some(false));
        assert_eq!(driver.inked(false, 10, 0), None);
    }

    #[test]
    fn test_simulated_failure() {
        let mut driver = MockDriver::new_with_size(8, 1);
        driver.state().lock().unwrap().simulate_init_failure = true;
        assert!(driver.init().is_err());
        driver.state().lock().unwrap().simulate_init_failure = false;
        assert!(driver.init().is_ok());
    }
}
