/*
 *  display/components/clock.rs
 *
 *  RigaClock - analog clock, weather and holidays
 *  (c) 2020-26 Stuart Hunter
 *
 *  Analog clock face and hands
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

use chrono::{Local, Timelike};
use embedded_graphics::prelude::*;

use crate::display::canvas::{Shape, ACCENT, INK};
use crate::display::layout::{ClockLayout, FontSize};
use crate::trig::{polar, DEG_PER_TICK};

/// Wall-clock time as the dial sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl ClockTime {
    /// None unless hour < 24, minute < 60, second < 60.
    pub fn new(hour: u32, minute: u32, second: u32) -> Option<Self> {
        (hour < 24 && minute < 60 && second < 60).then_some(Self { hour, minute, second })
    }

    pub fn from_time<T: Timelike>(t: &T) -> Self {
        Self {
            hour: t.hour(),
            minute: t.minute(),
            second: t.second().min(59),
        }
    }

    /// Local wall-clock time
    pub fn now() -> Self {
        Self::from_time(&Local::now())
    }
}

/// Hand angles in degrees, 0 pointing right and growing clockwise,
/// so 12 o'clock sits at -90.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandAngles {
    pub hour: f32,
    pub minute: f32,
    pub second: f32,
}

impl HandAngles {
    pub fn at(t: ClockTime) -> Self {
        let s = t.second as f32;
        let m = t.minute as f32;
        let h = (t.hour % 12) as f32;
        Self {
            second: s * DEG_PER_TICK - 90.0,
            minute: m * DEG_PER_TICK - 90.0 + s * 0.1,
            hour: h * 30.0 - 90.0 + m * 0.5,
        }
    }
}

/// Numeral printed at a minute tick: multiples of 5 only, 0 shows as 12.
pub fn hour_numeral(tick: u32) -> Option<u32> {
    if tick >= 60 || tick % 5 != 0 {
        return None;
    }
    Some(if tick == 0 { 12 } else { tick / 5 })
}

/// Clock display component
#[derive(Debug, Clone)]
pub struct ClockDisplay {
    center: Point,
    radius: u32,
    numeral_font: FontSize,
}

impl ClockDisplay {
    pub fn new(layout: &ClockLayout, numeral_font: FontSize) -> Self {
        Self {
            center: layout.center,
            radius: layout.radius,
            numeral_font,
        }
    }

    /// Static dial: outline, 60 ticks (long every fifth), numerals 1 to 12.
    pub fn face(&self) -> Vec<Shape> {
        let r = self.radius as f32;
        let mut shapes = Vec::with_capacity(73);

        shapes.push(Shape::Circle {
            center: self.center,
            radius: self.radius,
            width: 5,
            color: INK,
        });

        // ticks measured from the +x axis, numerals a quarter turn back
        for tick in 0..60u32 {
            let angle = tick as f32 * DEG_PER_TICK;
            let inner = if tick % 5 == 0 { r - 20.0 } else { r - 15.0 };
            shapes.push(Shape::Line {
                start: polar(self.center, angle, r - 10.0),
                end: polar(self.center, angle, inner),
                width: 2,
                color: INK,
            });
        }

        for tick in (0..60u32).step_by(5) {
            if let Some(n) = hour_numeral(tick) {
                let angle = tick as f32 * DEG_PER_TICK - 90.0;
                shapes.push(Shape::centered_text(
                    n.to_string(),
                    polar(self.center, angle, r - 40.0),
                    self.numeral_font,
                    INK,
                ));
            }
        }
        shapes
    }

    /// Hour, minute and second hand, in that order.
    pub fn hands(&self, time: ClockTime) -> Vec<Shape> {
        let r = self.radius as f32;
        let angles = HandAngles::at(time);
        [
            (angles.hour, 0.5, 8, INK),
            (angles.minute, 0.7, 6, INK),
            (angles.second, 0.9, 2, ACCENT),
        ]
        .into_iter()
        .map(|(angle, length, width, color)| Shape::Line {
            start: self.center,
            end: polar(self.center, angle, r * length),
            width,
            color,
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32, s: u32) -> HandAngles {
        HandAngles::at(ClockTime::new(h, m, s).unwrap())
    }

    fn dial() -> ClockDisplay {
        ClockDisplay::new(
            &ClockLayout { center: Point::new(220, 250), radius: 190 },
            FontSize::Large,
        )
    }

    #[test]
    fn test_second_hand_quarters() {
        assert_eq!(at(0, 0, 0).second, -90.0);
        assert_eq!(at(0, 0, 15).second, 0.0);
        assert_eq!(at(0, 0, 30).second, 90.0);
        assert_eq!(at(0, 0, 45).second, 180.0);
    }

    #[test]
    fn test_minute_hand_creeps_with_seconds() {
        let a = at(10, 20, 0).minute;
        let b = at(10, 20, 1).minute;
        assert!((b - a - 0.1).abs() < 1e-4);
        assert!((at(10, 20, 59).minute - (at(10, 21, 0).minute - 0.1)).abs() < 1e-3);
    }

    #[test]
    fn test_hour_hand_twelve_hour_dial() {
        assert_eq!(at(15, 0, 0).hour, at(3, 0, 0).hour);
        assert_eq!(at(3, 0, 0).hour, 0.0);
        assert_eq!(at(6, 30, 0).hour, 105.0);
    }

    #[test]
    fn test_numeral_mapping() {
        assert_eq!(hour_numeral(0), Some(12));
        assert_eq!(hour_numeral(5), Some(1));
        assert_eq!(hour_numeral(55), Some(11));
        assert_eq!(hour_numeral(7), None);
        assert_eq!(hour_numeral(60), None);
    }

    #[test]
    fn test_invalid_time_rejected() {
        assert!(ClockTime::new(24, 0, 0).is_none());
        assert!(ClockTime::new(0, 60, 0).is_none());
        assert!(ClockTime::new(23, 59, 59).is_some());
    }

    #[test]
    fn test_face_contents() {
        let face = dial().face();
        assert_eq!(face.len(), 1 + 60 + 12);
        let numerals: Vec<&str> = face
            .iter()
            .filter_map(|s| match s {
                Shape::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(numerals.first(), Some(&"12"));
        assert_eq!(numerals.last(), Some(&"11"));
    }

    #[test]
    fn test_hands_geometry() {
        let hands = dial().hands(ClockTime::new(0, 0, 15).unwrap());
        assert_eq!(hands.len(), 3);
        match &hands[2] {
            Shape::Line { start, end, width, color } => {
                assert_eq!(*start, Point::new(220, 250));
                assert_eq!(*end, Point::new(220 + 171, 250));
                assert_eq!(*width, 2);
                assert_eq!(*color, ACCENT);
            }
            other => panic!("unexpected shape {:?}", other),
        }
        match &hands[0] {
            Shape::Line { end, width, .. } => {
                assert_eq!(*end, Point::new(220, 250 - 95));
                assert_eq!(*width, 8);
            }
            other => panic!("unexpected shape {:?}", other),
        }
    }

    #[test]
    fn test_ticks_start_on_x_axis() {
        let face = dial().face();
        match &face[1] {
            Shape::Line { start, end, width, .. } => {
                assert_eq!(*start, Point::new(220 + 180, 250));
                assert_eq!(*end, Point::new(220 + 170, 250));
                assert_eq!(*width, 2);
            }
            other => panic!("unexpected shape {:?}", other),
        }
        // tick 15 points down in screen space
        match &face[1 + 15] {
            Shape::Line { start, end, .. } => {
                assert_eq!(*start, Point::new(220, 250 + 180));
                assert_eq!(*end, Point::new(220, 250 + 170));
            }
            other => panic!("unexpected shape {:?}", other),
        }
    }
}
