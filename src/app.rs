/*
 *  app.rs
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

use chrono::{Datelike, Local};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::DrawTarget;
use log::{debug, error, info};
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::display::canvas::{Canvas, Layer};
use crate::display::components::{
    CityLabel, ClockDisplay, ClockTime, HolidayBoard, MenuBar, WeatherDisplay,
};
use crate::display::error::DisplayError;
use crate::display::layout::LayoutConfig;
use crate::display::traits::DisplayDriver;
use crate::translate::{Language, Translation};
use crate::weather::WeatherSample;

pub const DEFAULT_TITLE: &str = "Riga Analog Clock";

/// Everything that can change what the widget shows.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    /// One second passed; move the hands.
    Tick,
    /// A weather fetch finished.
    Weather(WeatherSample),
    /// Menu or keyboard language choice.
    Language(Language),
    /// Write the current canvas to this path.
    Screenshot(PathBuf),
    /// Window closed or signal received.
    Shutdown,
}

/// Widget state: language, translations, last weather sample and the canvas.
///
/// Only the display loop holds one, so every mutation of the drawing
/// happens on that task.
pub struct ClockApp {
    layout: LayoutConfig,
    translations_dir: PathBuf,
    fallback_city: String,
    language: Language,
    translations: Translation,
    month: u32,
    canvas: Canvas,
    dial: ClockDisplay,
    weather: WeatherDisplay,
    city: CityLabel,
    holidays: HolidayBoard,
    menu: MenuBar,
}

impl ClockApp {
    /// Load `language`, then draw face, hands, city, holidays and menu for now.
    pub fn new(
        layout: LayoutConfig,
        translations_dir: impl Into<PathBuf>,
        fallback_city: &str,
        language: Language,
    ) -> Self {
        let translations_dir = translations_dir.into();
        let translations = Translation::load_or_empty(&translations_dir, language);

        let mut app = Self {
            canvas: Canvas::new(layout.width, layout.height),
            dial: ClockDisplay::new(&layout.clock, layout.fonts.numerals),
            weather: WeatherDisplay::new(layout.weather, layout.fonts.weather),
            city: CityLabel::new(&layout),
            holidays: HolidayBoard::new(&layout),
            menu: MenuBar::new(layout.menu.clone(), layout.fonts.menu),
            layout,
            translations_dir,
            fallback_city: fallback_city.to_string(),
            language,
            translations,
            month: Local::now().month(),
        };

        let face = app.dial.face();
        app.canvas.replace(Layer::Face, face);
        app.redraw_hands_at(ClockTime::now());
        app.redraw_city();
        app.redraw_holidays(app.month);
        app.redraw_menu();
        info!("Clock ready: {} ({})", app.title(), app.language);
        app
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn translations(&self) -> &Translation {
        &self.translations
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Window title for the active language
    pub fn title(&self) -> &str {
        self.translations.app_title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Last weather sample, None before the first fetch completes
    pub fn weather(&self) -> Option<&WeatherSample> {
        self.weather.sample()
    }

    /// Month the holiday board currently shows
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Hands for the current wall-clock time; rolls the holiday board
    /// over when the month changed since the last tick.
    pub fn redraw_hands(&mut self) {
        let now = Local::now();
        self.redraw_hands_at(ClockTime::from_time(&now));
        if now.month() != self.month {
            info!("Month changed to {}", now.month());
            self.redraw_holidays(now.month());
        }
    }

    pub fn redraw_hands_at(&mut self, time: ClockTime) {
        self.canvas.replace(Layer::Hands, self.dial.hands(time));
    }

    pub fn redraw_weather(&mut self, sample: WeatherSample) {
        if self.weather.update(sample) {
            debug!("Weather label now: {}", self.weather.sample().map(ToString::to_string).unwrap_or_default());
        }
        self.canvas.replace(Layer::Weather, self.weather.render());
    }

    pub fn redraw_holidays(&mut self, month: u32) {
        self.month = month;
        self.canvas
            .replace(Layer::Holidays, self.holidays.render(&self.translations, month));
    }

    pub fn redraw_city(&mut self) {
        self.canvas.replace(
            Layer::City,
            self.city.render(&self.translations, &self.fallback_city),
        );
    }

    pub fn redraw_menu(&mut self) {
        self.canvas
            .replace(Layer::Menu, self.menu.render(&self.translations, self.language));
    }

    /// Load `lang` in full, swap it in and redraw the language-dependent
    /// layers. Weather is left alone.
    pub fn change_language(&mut self, lang: Language) {
        let translations = Translation::load_or_empty(&self.translations_dir, lang);
        self.translations = translations;
        self.language = lang;
        self.redraw_holidays(Local::now().month());
        self.redraw_city();
        self.redraw_menu();
        info!("Language switched to {}", lang);
    }

    /// Rasterize the canvas into a PPM file.
    pub fn save_screenshot(&self, path: &Path) -> Result<(), DisplayError> {
        self.canvas.rasterize().write_ppm(path)?;
        info!("Screenshot saved to {}", path.display());
        Ok(())
    }

    /// Apply one event. Returns false once the widget should shut down.
    pub fn handle(&mut self, event: WidgetEvent) -> bool {
        match event {
            WidgetEvent::Tick => self.redraw_hands(),
            WidgetEvent::Weather(sample) => self.redraw_weather(sample),
            WidgetEvent::Language(lang) => self.change_language(lang),
            WidgetEvent::Screenshot(path) => {
                if let Err(e) = self.save_screenshot(&path) {
                    error!("Screenshot to {} failed: {}", path.display(), e);
                }
            }
            WidgetEvent::Shutdown => {
                info!("Shutdown requested");
                return false;
            }
        }
        true
    }
}

/// Draw the whole canvas into `driver` and publish it.
pub fn present<D>(app: &ClockApp, driver: &mut D) -> Result<(), DisplayError>
where
    D: DisplayDriver + DrawTarget<Color = Rgb888>,
    D::Error: Debug,
{
    app.canvas()
        .render(driver)
        .map_err(|e| DisplayError::DrawingError(format!("{:?}", e)))?;
    driver.flush()
}

/// Own `app` and apply events until `Shutdown` or until every sender is gone.
/// Frames are only pushed when the canvas actually changed.
pub async fn run_display_loop<D>(
    mut app: ClockApp,
    driver: &mut D,
    mut events: UnboundedReceiver<WidgetEvent>,
) -> Result<(), DisplayError>
where
    D: DisplayDriver + DrawTarget<Color = Rgb888>,
    D::Error: Debug,
{
    let canvas = app.canvas().size();
    if driver.dimensions() != (canvas.width, canvas.height) {
        return Err(DisplayError::InvalidConfiguration(format!(
            "driver is {:?}, canvas is {}x{}",
            driver.dimensions(),
            canvas.width,
            canvas.height
        )));
    }
    let has_title = driver.capabilities().has_title;

    driver.init()?;
    if has_title {
        driver.set_title(app.title());
    }
    present(&app, driver)?;

    let mut revision = app.canvas().revision();
    let mut title = app.title().to_string();

    info!("Display loop running");
    while let Some(event) = events.recv().await {
        if !app.handle(event) {
            break;
        }
        if has_title && app.title() != title {
            title = app.title().to_string();
            driver.set_title(&title);
        }
        if app.canvas().revision() != revision {
            revision = app.canvas().revision();
            present(&app, driver)
                .unwrap_or_else(|e| error!("Failed to present frame: {}", e));
        }
    }

    driver.close();
    info!("Closed display loop.");
    Ok(())
}
