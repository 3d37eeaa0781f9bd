/*
 *  display/components/menu_bar.rs
 *
 *  RigaClock - analog clock, weather and holidays
 *  (c) 2020-26 Stuart Hunter
 *
 *  Language menu across the top of the canvas
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

use embedded_graphics::text::Alignment;
use embedded_graphics::text::Baseline;

use crate::display::canvas::{Shape, INK, MENU_ACTIVE, MENU_BAR};
use crate::display::layout::{FontSize, MenuLayout};
use crate::translate::{Language, Translation};

pub const DEFAULT_MENU_CAPTION: &str = "Language";

/// Fallback entry label when the translation has none.
pub fn default_label(lang: Language) -> &'static str {
    match lang {
        Language::En => "English",
        Language::Ru => "Russian",
    }
}

/// Menu bar component
#[derive(Debug, Clone)]
pub struct MenuBar {
    layout: MenuLayout,
    font: FontSize,
}

impl MenuBar {
    pub fn new(layout: MenuLayout, font: FontSize) -> Self {
        Self { layout, font }
    }

    /// Bar, caption, then one entry per language with `active` highlighted.
    pub fn render(&self, translation: &Translation, active: Language) -> Vec<Shape> {
        let mut shapes = vec![
            Shape::Rect {
                area: self.layout.bar,
                fill: MENU_BAR,
            },
            Shape::left_text(
                translation
                    .language_menu
                    .as_deref()
                    .unwrap_or(DEFAULT_MENU_CAPTION),
                self.layout.caption,
                self.font,
                INK,
            ),
        ];

        for (area, lang) in self.layout.entries.iter().zip(Language::ALL) {
            if lang == active {
                shapes.push(Shape::Rect {
                    area: *area,
                    fill: MENU_ACTIVE,
                });
            }
            let label = translation
                .language_label(lang)
                .unwrap_or_else(|| default_label(lang));
            shapes.push(Shape::Text {
                text: label.to_string(),
                position: area.center(),
                alignment: Alignment::Center,
                baseline: Baseline::Middle,
                size: self.font,
                color: INK,
            });
        }
        shapes
    }
}
