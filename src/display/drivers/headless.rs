/*
 *  display/drivers/headless.rs
 *
 *  RigaClock - analog clock, weather and holidays
 *  (c) 2020-26 Stuart Hunter
 *
 *  Off-screen display driver for snapshots, servers and tests
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

use embedded_graphics::geometry::Size;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::info;

use crate::display::canvas::BACKGROUND;
use crate::display::error::DisplayError;
use crate::display::traits::{DisplayCapabilities, DisplayDriver};
use crate::vframebuf::VarFrameBuf;

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Headless display driver
///
/// Renders into memory only. The framebuffer can be inspected or written
/// out as a PPM image; the operation counters are shared so a test can
/// keep a handle after the driver moves into the display loop.
#[derive(Debug, Clone)]
pub struct HeadlessDriver {
    framebuffer: VarFrameBuf<Rgb888>,
    capabilities: DisplayCapabilities,
    state: Arc<Mutex<HeadlessState>>,
}

/// Internal state for the headless driver (shared for inspection)
#[derive(Debug, Default)]
pub struct HeadlessState {
    /// Number of times init() was called
    pub init_count: usize,

    /// Number of times flush() was called
    pub flush_count: usize,

    /// Number of times clear() was called
    pub clear_count: usize,

    /// Whether the driver is initialized
    pub is_initialized: bool,

    /// Last title requested by the application
    pub last_title: Option<String>,

    /// Set once close() is called
    pub closed: bool,

    /// Simulate failures (for error testing)
    pub simulate_flush_failure: bool,
    pub simulate_init_failure: bool,
}

impl HeadlessDriver {
    pub fn new(width: u32, height: u32) -> Result<Self, DisplayError> {
        if width == 0 || height == 0 {
            return Err(DisplayError::InvalidConfiguration(format!(
                "canvas {}x{} has no pixels",
                width, height
            )));
        }

        let capabilities = DisplayCapabilities {
            width,
            height,
            // titles are recorded in the state for inspection
            has_title: true,
        };

        Ok(Self {
            framebuffer: VarFrameBuf::new(width, height, BACKGROUND),
            capabilities,
            state: Arc::new(Mutex::new(HeadlessState::default())),
        })
    }

    /// Drop the title from the capabilities; the display loop then never sets one.
    pub fn without_title(mut self) -> Self {
        self.capabilities.has_title = false;
        self
    }

    /// Current framebuffer contents
    pub fn framebuffer(&self) -> &VarFrameBuf<Rgb888> {
        &self.framebuffer
    }

    /// Get reference to state for inspection
    pub fn state(&self) -> Arc<Mutex<HeadlessState>> {
        Arc::clone(&self.state)
    }

    fn lock(&self) -> MutexGuard<'_, HeadlessState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write the framebuffer as a binary PPM
    pub fn save_ppm(&self, path: &Path) -> Result<(), DisplayError> {
        self.framebuffer.write_ppm(path)?;
        info!("Snapshot written to {}", path.display());
        Ok(())
    }
}

impl DisplayDriver for HeadlessDriver {
    fn capabilities(&self) -> &DisplayCapabilities {
        &self.capabilities
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        let mut state = self.lock();

        if state.simulate_init_failure {
            return Err(DisplayError::InitializationFailed(
                "Simulated init failure".to_string(),
            ));
        }

        state.init_count += 1;
        state.is_initialized = true;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        let mut state = self.lock();

        if state.simulate_flush_failure {
            return Err(DisplayError::Other("Simulated flush failure".to_string()));
        }

        state.flush_count += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.lock().clear_count += 1;
        self.framebuffer.clear_color(BACKGROUND);
        self.flush()
    }

    fn set_title(&mut self, title: &str) {
        self.lock().last_title = Some(title.to_string());
    }

    fn close(&mut self) {
        self.lock().closed = true;
    }
}

impl DrawTarget for HeadlessDriver {
    type Color = Rgb888;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.framebuffer.draw_iter(pixels)
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.framebuffer.clear(color)
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        self.framebuffer.fill_contiguous(area, colors)
    }
}

impl OriginDimensions for HeadlessDriver {
    fn size(&self) -> Size {
        Size::new(self.capabilities.width, self.capabilities.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::canvas::INK;
    use embedded_graphics::primitives::{Line, PrimitiveStyle};

    #[test]
    fn test_headless_driver_creation() {
        let driver = HeadlessDriver::new(440, 640).unwrap();
        assert_eq!(driver.dimensions(), (440, 640));
        assert_eq!(driver.framebuffer().count(BACKGROUND), 440 * 640);
        assert!(HeadlessDriver::new(0, 10).is_err());
    }

    #[test]
    fn test_headless_driver_init() {
        let mut driver = HeadlessDriver::new(32, 32).unwrap();
        let state = driver.state();
        assert!(!state.lock().unwrap().is_initialized);

        driver.init().unwrap();

        assert_eq!(state.lock().unwrap().init_count, 1);
        assert!(state.lock().unwrap().is_initialized);
    }

    #[test]
    fn test_headless_driver_drawing_and_clear() {
        let mut driver = HeadlessDriver::new(32, 32).unwrap();

        Line::new(Point::new(0, 0), Point::new(10, 10))
            .into_styled(PrimitiveStyle::with_stroke(INK, 1))
            .draw(&mut driver)
            .unwrap();
        assert_eq!(driver.framebuffer().pixel(Point::new(0, 0)), Some(INK));

        DisplayDriver::clear(&mut driver).unwrap();
        assert_eq!(driver.framebuffer().count(INK), 0);
        assert_eq!(driver.state().lock().unwrap().clear_count, 1);
        assert_eq!(driver.state().lock().unwrap().flush_count, 1);
    }

    #[test]
    fn test_headless_driver_simulated_failure() {
        let mut driver = HeadlessDriver::new(8, 8).unwrap();
        driver.state().lock().unwrap().simulate_flush_failure = true;
        assert!(driver.flush().is_err());
        driver.state().lock().unwrap().simulate_flush_failure = false;
        assert!(driver.flush().is_ok());
    }

    #[test]
    fn test_headless_driver_records_title() {
        let mut driver = HeadlessDriver::new(8, 8).unwrap();
        driver.set_title("Riga Analog Clock");
        driver.close();
        let state = driver.state();
        let state = state.lock().unwrap();
        assert_eq!(state.last_title.as_deref(), Some("Riga Analog Clock"));
        assert!(state.closed);
    }

    #[test]
    fn test_headless_driver_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.ppm");
        let driver = HeadlessDriver::new(4, 3).unwrap();
        driver.save_ppm(&path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"P6\n4 3\n255\n"));
        assert_eq!(bytes.len(), "P6\n4 3\n255\n".len() + 4 * 3 * 3);
    }
}
