/*
 *  display/traits.rs
 *
 *  RigaClock - analog clock, weather and holidays
 *  (c) 2020-26 Stuart Hunter
 *
 *  Core trait definitions for display driver abstraction
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
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayCapabilities {
    /// Canvas width in pixels
    pub width: u32,

    /// Canvas height in pixels
    pub height: u32,

    /// Whether the surface shows a title (desktop window)
    pub has_title: bool,
}

/// Output surface for the composed canvas.
///
/// Drivers also implement `DrawTarget<Color = Rgb888>`; the display loop
/// rasterizes into them and then calls `flush` to publish the frame.
pub trait DisplayDriver: Send {
    /// Returns the capabilities of this display
    fn capabilities(&self) -> &DisplayCapabilities;

    /// Returns the display dimensions as (width, height)
    fn dimensions(&self) -> (u32, u32) {
        let caps = self.capabilities();
        (caps.width, caps.height)
    }

    /// Prepare the surface for rendering
    fn init(&mut self) -> Result<(), DisplayError>;

    /// Publish the current framebuffer
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Clear the surface to background and publish
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Window title; ignored by surfaces without one.
    fn set_title(&mut self, _title: &str) {}

    /// Surface is going away; windows close themselves on this.
    fn close(&mut self) {}
}
