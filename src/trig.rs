/*
 *  trig.rs
 *
 *  RigaClock - analog clock, weather and holidays
 *	(c) 2020-26 Stuart Hunter
 *
 *	This program is free software: you can redistribute it and/or modify
 *	it under the terms of the GNU General Public License as published by
 *	the Free Software Foundation, either version 3 of the License, or
 *	(at your option) any later version.
 *
 *	This program is distributed in the hope that it will be useful,
 *	but WITHOUT ANY WARRANTY; without even the implied warranty of
 *	MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *	GNU General Public License for more details.
 *
 *	See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *	Public License.
 *
 */
//! Angle helpers for the dial. Screen space is y-down, so angles grow
//! clockwise and -90° points at 12 o'clock.

use embedded_graphics::prelude::Point;

pub const DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0;

/// Degrees swept per minute/second tick on the dial.
pub const DEG_PER_TICK: f32 = 6.0;

/// Point at `radius` from `center` along `angle_deg`.
pub fn polar(center: Point, angle_deg: f32, radius: f32) -> Point {
    let a = angle_deg * DEG_TO_RAD;
    Point::new(
        center.x + (a.cos() * radius).round() as i32,
        center.y + (a.sin() * radius).round() as i32,
    )
}

// ---------- tests ----------
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polar_cardinals() {
        let c = Point::new(100, 100);
        assert_eq!(polar(c, -90.0, 50.0), Point::new(100, 50)); // up
        assert_eq!(polar(c, 0.0, 50.0), Point::new(150, 100)); // right
        assert_eq!(polar(c, 90.0, 50.0), Point::new(100, 150)); // down
        assert_eq!(polar(c, 180.0, 50.0), Point::new(50, 100)); // left
    }
}
