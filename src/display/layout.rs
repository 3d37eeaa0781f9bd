/*
 *  display/layout.rs
 *
 *  RigaClock - analog clock, weather and holidays
 *  (c) 2020-26 Stuart Hunter
 *
 *  Adaptive layout for the widget window
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
use embedded_graphics::primitives::Rectangle;

use crate::translate::Language;

/// Height reserved under the dial for weather and holidays
const BOTTOM_PANEL: u32 = 200;

/// Dial is never drawn smaller than this
const MIN_RADIUS: u32 = 40;

/// Layout configuration for the clock widget
///
/// Positions are computed once from the canvas size; components read
/// their anchors from here and never measure the canvas themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Canvas width in pixels
    pub width: u32,

    /// Canvas height in pixels
    pub height: u32,

    /// Layout category (determines font choices)
    pub category: LayoutCategory,

    /// Language menu bar
    pub menu: MenuLayout,

    /// Analog dial
    pub clock: ClockLayout,

    /// City caption, centered
    pub city: Point,

    /// Weather line, centered
    pub weather: Point,

    /// Holiday board title, top-left corner
    pub holidays: Point,

    /// Holiday entries, wrapped inside this box
    pub holiday_list: Rectangle,

    /// Font sizes
    pub fonts: FontSizes,
}

/// Layout category based on canvas width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutCategory {
    /// Narrow windows (under 360 wide)
    Compact,

    /// The stock 440x640 window and anything wider
    Regular,
}

/// Menu bar across the top of the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct MenuLayout {
    /// Whole bar
    pub bar: Rectangle,

    /// "Language" caption position
    pub caption: Point,

    /// Clickable entries, in `Language::ALL` order
    pub entries: [Rectangle; 2],
}

/// Dial geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockLayout {
    pub center: Point,
    pub radius: u32,
}

/// Font size categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontSize {
    /// 7x13
    Small,

    /// 9x15
    Medium,

    /// 9x18 bold, dial numerals
    Large,
}

/// Font sizes for different UI elements
#[derive(Debug, Clone, PartialEq)]
pub struct FontSizes {
    pub menu: FontSize,
    pub city: FontSize,
    pub numerals: FontSize,
    pub weather: FontSize,
    pub holidays_title: FontSize,
    pub holidays: FontSize,
}

impl LayoutConfig {
    /// Layout for a `width` x `height` canvas.
    ///
    /// The dial takes what is left after the menu bar, the city caption and
    /// the bottom panel; for 440x640 that is radius 190 centered at (220, 250).
    pub fn for_canvas(width: u32, height: u32) -> Self {
        let category = Self::categorize_display(width);

        let menu_height = 24;
        let dial_top = 60;
        let by_width = (width / 2).saturating_sub(20);
        let by_height = height.saturating_sub(dial_top + BOTTOM_PANEL) / 2;
        let radius = by_width.min(by_height).max(MIN_RADIUS);
        let center = Point::new((width / 2) as i32, (dial_top + radius) as i32);

        let weather_y = center.y + radius as i32 + 24;
        let holidays = Point::new(16, weather_y + 20);
        let list_top = holidays.y + 20;
        let holiday_list = Rectangle::new(
            Point::new(holidays.x, list_top),
            Size::new(
                width.saturating_sub(2 * holidays.x as u32),
                height.saturating_sub(list_top.max(0) as u32),
            ),
        );

        let entry_width = (width.saturating_sub(104 + 12) / 2).clamp(40, 100);
        let entries = [
            Rectangle::new(Point::new(104, 2), Size::new(entry_width, menu_height - 4)),
            Rectangle::new(
                Point::new(104 + entry_width as i32 + 4, 2),
                Size::new(entry_width, menu_height - 4),
            ),
        ];

        let fonts = match category {
            LayoutCategory::Compact => FontSizes {
                menu: FontSize::Small,
                city: FontSize::Small,
                numerals: FontSize::Medium,
                weather: FontSize::Small,
                holidays_title: FontSize::Small,
                holidays: FontSize::Small,
            },
            LayoutCategory::Regular => FontSizes {
                menu: FontSize::Small,
                city: FontSize::Medium,
                numerals: FontSize::Large,
                weather: FontSize::Medium,
                holidays_title: FontSize::Medium,
                holidays: FontSize::Small,
            },
        };

        Self {
            width,
            height,
            category,
            menu: MenuLayout {
                bar: Rectangle::new(Point::zero(), Size::new(width, menu_height)),
                caption: Point::new(8, 6),
                entries,
            },
            clock: ClockLayout { center, radius },
            city: Point::new(center.x, 42),
            weather: Point::new(center.x, weather_y),
            holidays,
            holiday_list,
            fonts,
        }
    }

    fn categorize_display(width: u32) -> LayoutCategory {
        if width < 360 {
            LayoutCategory::Compact
        } else {
            LayoutCategory::Regular
        }
    }

    /// Menu entry under a canvas point, if any.
    pub fn menu_entry_at(&self, point: Point) -> Option<Language> {
        self.menu
            .entries
            .iter()
            .zip(Language::ALL)
            .find(|(area, _)| area.contains(point))
            .map(|(_, lang)| lang)
    }
}
