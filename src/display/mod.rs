/*
 *  display/mod.rs
 *
 *  RigaClock - analog clock, weather and holidays
 *  (c) 2020-26 Stuart Hunter
 *
 *  Display subsystem - retained canvas, components and drivers
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

// Core trait definitions
pub mod traits;
pub mod error;

// Retained drawing surface
pub mod canvas;

// Layout system for adaptive UI
pub mod layout;

// UI components
pub mod components;

// Display drivers
pub mod drivers;

// Emulator window (only with emulator feature)
#[cfg(feature = "emulator")]
pub mod emulator_window;

// Re-exports for convenience
pub use traits::{DisplayDriver, DisplayCapabilities};
pub use error::DisplayError;
pub use canvas::{Canvas, Layer, Shape};
pub use layout::{LayoutConfig, LayoutCategory, FontSize};
