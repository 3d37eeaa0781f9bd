/*
 *  display/components/weather.rs
 *
 *  RigaClock - analog clock, weather and holidays
 *  (c) 2020-26 Stuart Hunter
 *
 *  Weather display component
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

use embedded_graphics::prelude::*;

use crate::display::canvas::{Shape, INK, MUTED};
use crate::display::layout::FontSize;
use crate::weather::WeatherSample;

/// Weather display component
#[derive(Debug, Clone)]
pub struct WeatherDisplay {
    anchor: Point,
    font: FontSize,
    last_sample: Option<WeatherSample>,
}

impl WeatherDisplay {
    pub fn new(anchor: Point, font: FontSize) -> Self {
        Self {
            anchor,
            font,
            last_sample: None,
        }
    }

    /// Replace the held sample; true when it differs from the previous one.
    pub fn update(&mut self, sample: WeatherSample) -> bool {
        let changed = self.last_sample.as_ref() != Some(&sample);
        self.last_sample = Some(sample);
        changed
    }

    pub fn sample(&self) -> Option<&WeatherSample> {
        self.last_sample.as_ref()
    }

    /// One centered line; failures are drawn muted. Nothing before the first sample.
    pub fn render(&self) -> Vec<Shape> {
        match &self.last_sample {
            None => Vec::new(),
            Some(sample) => {
                let color = if sample.is_reading() { INK } else { MUTED };
                vec![Shape::centered_text(sample.to_string(), self.anchor, self.font, color)]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_before_first_sample() {
        let display = WeatherDisplay::new(Point::new(220, 464), FontSize::Medium);
        assert!(display.render().is_empty());
        assert!(display.sample().is_none());
    }

    #[test]
    fn test_update_replaces_previous() {
        let mut display = WeatherDisplay::new(Point::new(220, 464), FontSize::Medium);
        assert!(display.update(WeatherSample::Unavailable));
        assert!(!display.update(WeatherSample::Unavailable));
        assert!(display.update(WeatherSample::Reading {
            temperature: 5.2,
            description: "overcast clouds".into(),
        }));
        let shapes = display.render();
        assert_eq!(shapes.len(), 1);
        match &shapes[0] {
            Shape::Text { text, color, .. } => {
                assert_eq!(text, "5°C, Overcast clouds");
                assert_eq!(*color, INK);
            }
            other => panic!("unexpected shape {:?}", other),
        }
    }

    #[test]
    fn test_failure_is_muted() {
        let mut display = WeatherDisplay::new(Point::new(0, 0), FontSize::Small);
        display.update(WeatherSample::InvalidFormat);
        match &display.render()[0] {
            Shape::Text { text, color, .. } => {
                assert_eq!(text, "Invalid weather data format");
                assert_eq!(*color, MUTED);
            }
            other => panic!("unexpected shape {:?}", other),
        }
    }
}
