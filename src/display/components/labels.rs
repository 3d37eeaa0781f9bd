/*
 *  display/components/labels.rs
 *
 *  RigaClock - analog clock, weather and holidays
 *  (c) 2020-26 Stuart Hunter
 *
 *  City caption and monthly holiday board
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

use crate::display::canvas::{Shape, INK};
use crate::display::layout::{FontSize, LayoutConfig};
use crate::holidays::{holidays_for, holidays_header};
use crate::translate::Translation;

/// City caption above the dial
#[derive(Debug, Clone)]
pub struct CityLabel {
    anchor: Point,
    font: FontSize,
}

impl CityLabel {
    pub fn new(layout: &LayoutConfig) -> Self {
        Self {
            anchor: layout.city,
            font: layout.fonts.city,
        }
    }

    /// Localized city name, else `fallback`.
    pub fn render(&self, translation: &Translation, fallback: &str) -> Vec<Shape> {
        let name = translation.city_name.as_deref().unwrap_or(fallback);
        vec![Shape::centered_text(name, self.anchor, self.font, INK)]
    }
}

/// Holidays of one month under a localized title
#[derive(Debug, Clone)]
pub struct HolidayBoard {
    origin: Point,
    list: Rectangle,
    title_font: FontSize,
    entry_font: FontSize,
}

impl HolidayBoard {
    pub fn new(layout: &LayoutConfig) -> Self {
        Self {
            origin: layout.holidays,
            list: layout.holiday_list,
            title_font: layout.fonts.holidays_title,
            entry_font: layout.fonts.holidays,
        }
    }

    /// Title, then one wrapped block of "day: description" lines when the month has any.
    pub fn render(&self, translation: &Translation, month: u32) -> Vec<Shape> {
        let mut shapes = vec![Shape::left_text(
            holidays_header(translation, month),
            self.origin,
            self.title_font,
            INK,
        )];

        let entries = holidays_for(translation, month);
        if !entries.is_empty() {
            let body = entries
                .iter()
                .map(|e| format!("{}: {}", e.day, e.description))
                .collect::<Vec<_>>()
                .join("\n");
            shapes.push(Shape::Paragraph {
                text: body,
                area: self.list,
                size: self.entry_font,
                color: INK,
            });
        }
        shapes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn layout() -> LayoutConfig {
        LayoutConfig::for_canvas(440, 640)
    }

    fn texts(shapes: &[Shape]) -> Vec<&str> {
        shapes
            .iter()
            .filter_map(|s| match s {
                Shape::Text { text, .. } | Shape::Paragraph { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_city_prefers_translation() {
        let label = CityLabel::new(&layout());
        let t = Translation {
            city_name: Some("Рига".into()),
            ..Default::default()
        };
        assert_eq!(texts(&label.render(&t, "Riga")), vec!["Рига"]);
        assert_eq!(texts(&label.render(&Translation::default(), "Riga")), vec!["Riga"]);
    }

    #[test]
    fn test_board_lists_month() {
        let mut t = Translation::default();
        t.month_names.insert("6".into(), "June".into());
        t.holidays.insert(
            "6".into(),
            vec![
                BTreeMap::from([("23".to_string(), "Ligo Day".to_string())]),
                BTreeMap::from([("24".to_string(), "Midsummer Day".to_string())]),
            ],
        );
        let shapes = HolidayBoard::new(&layout()).render(&t, 6);
        assert_eq!(
            texts(&shapes),
            vec!["Holidays in June", "23: Ligo Day\n24: Midsummer Day"]
        );
    }

    #[test]
    fn test_board_empty_month_is_title_only() {
        let shapes = HolidayBoard::new(&layout()).render(&Translation::default(), 7);
        assert_eq!(texts(&shapes), vec!["Holidays in 7"]);
    }
}
