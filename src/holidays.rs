/*
 *  holidays.rs
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

use crate::translate::Translation;

pub const DEFAULT_HOLIDAYS_TITLE: &str = "Holidays in";

/// A single day in the holiday board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayEntry {
    /// Day of month, kept as written in the data file.
    pub day: String,
    pub description: String,
}

/// Entries for `month` (1-12) in file order. Empty when the month is absent.
pub fn holidays_for(translation: &Translation, month: u32) -> Vec<HolidayEntry> {
    translation
        .holidays
        .get(&month.to_string())
        .map(|days| {
            days.iter()
                .flat_map(|entry| entry.iter())
                .map(|(day, description)| HolidayEntry {
                    day: day.clone(),
                    description: description.clone(),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Header line, e.g. "Holidays in March" or "Праздники в марте".
pub fn holidays_header(translation: &Translation, month: u32) -> String {
    let title = translation
        .holidays_title
        .as_deref()
        .unwrap_or(DEFAULT_HOLIDAYS_TITLE);
    match translation.month_name(month) {
        Some(name) => format!("{} {}", title, name),
        None => format!("{} {}", title, month),
    }
}

/// Header followed by one "day: description" line per entry.
pub fn holidays_text(translation: &Translation, month: u32) -> String {
    let mut text = holidays_header(translation, month);
    for entry in holidays_for(translation, month) {
        text.push('\n');
        text.push_str(&entry.day);
        text.push_str(": ");
        text.push_str(&entry.description);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn sample() -> Translation {
        let mut t = Translation {
            holidays_title: Some("Holidays in".into()),
            ..Default::default()
        };
        t.month_names.insert("11".into(), "November".into());
        t.holidays.insert(
            "11".into(),
            vec![
                BTreeMap::from([("18".to_string(), "Proclamation Day".to_string())]),
                BTreeMap::from([("11".to_string(), "Lacplesis Day".to_string())]),
            ],
        );
        t
    }

    #[test]
    fn keeps_file_order() {
        let entries = holidays_for(&sample(), 11);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].day, "18");
        assert_eq!(entries[1].description, "Lacplesis Day");
    }

    #[test]
    fn text_lists_entries_under_header() {
        assert_eq!(
            holidays_text(&sample(), 11),
            "Holidays in November\n18: Proclamation Day\n11: Lacplesis Day"
        );
    }

    #[test]
    fn empty_month_is_header_only() {
        assert_eq!(holidays_text(&sample(), 7), "Holidays in 7");
        assert!(holidays_for(&sample(), 7).is_empty());
    }

    #[test]
    fn empty_translation_uses_defaults() {
        assert_eq!(holidays_text(&Translation::default(), 1), "Holidays in 1");
    }
}
