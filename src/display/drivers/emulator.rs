/*
 *  display/drivers/emulator.rs
 *
 *  RigaClock - analog clock, weather and holidays
 *  (c) 2020-26 Stuart Hunter
 *
 *  Desktop window driver: renders into shared state the window thread reads
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

use crate::display::canvas::BACKGROUND;
use crate::display::error::DisplayError;
use crate::display::traits::{DisplayCapabilities, DisplayDriver};
use crate::vframebuf::VarFrameBuf;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Shared emulator state (for window access)
#[derive(Debug)]
pub struct EmulatorState {
    /// Last published frame, RGBA8 row-major
    pub rgba: Vec<u8>,

    /// Display dimensions
    pub width: u32,
    pub height: u32,

    /// Frame counter
    pub frame_count: u64,

    /// Window title
    pub title: String,

    /// Cleared by either side to close the window
    pub running: bool,
}

impl EmulatorState {
    pub fn new(width: u32, height: u32, title: &str) -> Self {
        Self {
            rgba: VarFrameBuf::new(width, height, BACKGROUND).to_rgba(),
            width,
            height,
            frame_count: 0,
            title: title.to_string(),
            running: true,
        }
    }
}

/// Lock shared state, surviving a panicked peer.
pub fn lock_state(state: &Mutex<EmulatorState>) -> MutexGuard<'_, EmulatorState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Emulator display driver
///
/// Draws into a private framebuffer; `flush` copies the finished frame
/// into the shared state where the window picks it up on its next redraw.
pub struct EmulatorDriver {
    framebuffer: VarFrameBuf<Rgb888>,
    capabilities: DisplayCapabilities,
    state: Arc<Mutex<EmulatorState>>,
}

impl EmulatorDriver {
    pub fn new(width: u32, height: u32, title: &str) -> Result<Self, DisplayError> {
        if width == 0 || height == 0 {
            return Err(DisplayError::InvalidConfiguration(format!(
                "window {}x{} has no pixels",
                width, height
            )));
        }

        let capabilities = DisplayCapabilities {
            width,
            height,
            has_title: true,
        };

        Ok(Self {
            framebuffer: VarFrameBuf::new(width, height, BACKGROUND),
            capabilities,
            state: Arc::new(Mutex::new(EmulatorState::new(width, height, title))),
        })
    }

    /// Get shared state for window rendering
    pub fn state(&self) -> Arc<Mutex<EmulatorState>> {
        Arc::clone(&self.state)
    }

    fn sync_to_state(&self) -> Result<(), DisplayError> {
        let mut state = lock_state(&self.state);
        let expected = self.framebuffer.as_slice().len() * 4;
        if state.rgba.len() != expected {
            return Err(DisplayError::BufferSizeMismatch {
                expected,
                actual: state.rgba.len(),
            });
        }
        self.framebuffer.copy_to_rgba(&mut state.rgba);
        state.frame_count += 1;
        Ok(())
    }
}

impl DisplayDriver for EmulatorDriver {
    fn capabilities(&self) -> &DisplayCapabilities {
        &self.capabilities
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        // Nothing to initialize for emulator
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.sync_to_state()
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.framebuffer.clear_color(BACKGROUND);
        self.flush()
    }

    fn set_title(&mut self, title: &str) {
        lock_state(&self.state).title = title.to_string();
    }

    fn close(&mut self) {
        lock_state(&self.state).running = false;
    }
}

impl DrawTarget for EmulatorDriver {
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

impl OriginDimensions for EmulatorDriver {
    fn size(&self) -> Size {
        Size::new(self.capabilities.width, self.capabilities.height)
    }
}
