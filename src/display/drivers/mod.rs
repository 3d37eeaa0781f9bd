/*
 *  display/drivers/mod.rs
 *
 *  RigaClock - analog clock, weather and holidays
 *  (c) 2020-26 Stuart Hunter
 *
 *  Display driver implementations
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

// Off-screen driver, always available
pub mod headless;

// Emulator driver for desktop use
#[cfg(feature = "emulator")]
pub mod emulator;

pub use headless::{HeadlessDriver, HeadlessState};

#[cfg(feature = "emulator")]
pub use emulator::{EmulatorDriver, EmulatorState};
