/*
 *  display/error.rs
 *
 *  RigaClock - analog clock, weather and holidays
 *  (c) 2020-26 Stuart Hunter
 *
 *  Error types for the display subsystem
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

use std::error::Error;
use std::fmt;

/// Error type for all display operations
#[derive(Debug)]
pub enum DisplayError {
    /// Driver or window could not be brought up
    InitializationFailed(String),

    /// Invalid configuration
    InvalidConfiguration(String),

    /// Frame size does not match the driver
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Drawing operation failed
    DrawingError(String),

    /// Desktop window error
    Window(String),

    /// Snapshot or screenshot could not be written
    Io(std::io::Error),

    /// Generic error with message
    Other(String),
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::InitializationFailed(msg) =>
                write!(f, "Display initialization failed: {}", msg),
            DisplayError::InvalidConfiguration(msg) =>
                write!(f, "Invalid configuration: {}", msg),
            DisplayError::BufferSizeMismatch { expected, actual } =>
                write!(f, "Buffer size mismatch: expected {} bytes, got {}", expected, actual),
            DisplayError::DrawingError(msg) =>
                write!(f, "Drawing error: {}", msg),
            DisplayError::Window(msg) =>
                write!(f, "Window error: {}", msg),
            DisplayError::Io(err) =>
                write!(f, "I/O error: {}", err),
            DisplayError::Other(msg) =>
                write!(f, "{}", msg),
        }
    }
}

impl Error for DisplayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DisplayError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DisplayError {
    fn from(err: std::io::Error) -> Self {
        DisplayError::Io(err)
    }
}
