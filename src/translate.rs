/*
 *  translate.rs
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
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed translation file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unsupported language code '{0}' (expected en or ru)")]
    UnsupportedLanguage(String),
}

/// Languages offered by the menu. The set is closed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ru,
}

impl Language {
    /// Menu order.
    pub const ALL: [Language; 2] = [Language::En, Language::Ru];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ru => "ru",
        }
    }

    pub fn from_code(code: &str) -> Result<Self, TranslateError> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "ru" => Ok(Language::Ru),
            _ => Err(TranslateError::UnsupportedLanguage(code.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = TranslateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_code(s)
    }
}

/// One language's strings and holiday table, as stored in `<code>.json`.
///
/// Every key is optional; `Translation::default()` is the empty set used when
/// a file is missing or cannot be parsed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Translation {
    pub app_title: Option<String>,
    pub language_menu: Option<String>,
    pub english: Option<String>,
    pub russian: Option<String>,
    pub city_name: Option<String>,
    pub holidays_title: Option<String>,
    /// month number ("1".."12") -> localized month name
    pub month_names: BTreeMap<String, String>,
    /// month number -> ordered list of single-key `{day: description}` maps
    pub holidays: BTreeMap<String, Vec<BTreeMap<String, String>>>,
}

impl Translation {
    /// Path of the data file for `lang` under `dir`.
    pub fn path_for(dir: &Path, lang: Language) -> PathBuf {
        dir.join(format!("{}.json", lang.code()))
    }

    /// Strict load; the caller decides what a failure means.
    pub fn load(dir: &Path, lang: Language) -> Result<Self, TranslateError> {
        let path = Self::path_for(dir, lang);
        let raw = fs::read_to_string(&path).map_err(|source| TranslateError::Io {
            path: path.clone(),
            source,
        })?;
        let translation: Translation =
            serde_json::from_str(&raw).map_err(|source| TranslateError::Json { path, source })?;
        debug!(
            "Loaded {} translation: {} month names, {} holiday months",
            lang,
            translation.month_names.len(),
            translation.holidays.len()
        );
        Ok(translation)
    }

    /// Load, substituting the empty set on any failure.
    pub fn load_or_empty(dir: &Path, lang: Language) -> Self {
        match Self::load(dir, lang) {
            Ok(t) => {
                info!("Translations for '{}' loaded", lang);
                t
            }
            Err(e) => {
                warn!("Translations for '{}' unavailable, using defaults: {}", lang, e);
                Self::default()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn month_name(&self, month: u32) -> Option<&str> {
        self.month_names.get(&month.to_string()).map(String::as_str)
    }

    /// Menu label for `lang` in this translation.
    pub fn language_label(&self, lang: Language) -> Option<&str> {
        match lang {
            Language::En => self.english.as_deref(),
            Language::Ru => self.russian.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, body: &str) {
        let mut f = fs::File::create(dir.join(name)).unwrap();
        f.write_all(body.as_bytes()).unwrap();
    }

    #[test]
    fn language_codes() {
        assert_eq!(Language::from_code("ru").unwrap(), Language::Ru);
        assert_eq!(" EN ".parse::<Language>().unwrap(), Language::En);
        assert!(matches!(
            Language::from_code("de"),
            Err(TranslateError::UnsupportedLanguage(code)) if code == "de"
        ));
        assert_eq!(Language::Ru.to_string(), "ru");
    }

    #[test]
    fn loads_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            dir.path(),
            "en.json",
            r#"{"app_title": "Clock", "month_names": {"3": "March"},
                "holidays": {"3": [{"8": "Women's Day"}]}}"#,
        );
        let t = Translation::load(dir.path(), Language::En).unwrap();
        assert_eq!(t.app_title.as_deref(), Some("Clock"));
        assert_eq!(t.month_name(3), Some("March"));
        assert_eq!(t.month_name(4), None);
        assert!(t.city_name.is_none());
        assert!(!t.is_empty());
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Translation::load(dir.path(), Language::Ru),
            Err(TranslateError::Io { .. })
        ));
        assert!(Translation::load_or_empty(dir.path(), Language::Ru).is_empty());
    }

    #[test]
    fn malformed_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "ru.json", r#"{"holidays": {"1": "not a list"}}"#);
        assert!(matches!(
            Translation::load(dir.path(), Language::Ru),
            Err(TranslateError::Json { .. })
        ));
        assert!(Translation::load_or_empty(dir.path(), Language::Ru).is_empty());
    }

    #[test]
    fn bundled_files_parse() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/lang");
        for lang in Language::ALL {
            let t = Translation::load(&dir, lang).unwrap();
            assert!(t.app_title.is_some());
            assert_eq!(t.month_names.len(), 12);
            assert!(t.language_label(Language::En).is_some());
            assert!(t.language_label(Language::Ru).is_some());
        }
    }
}
