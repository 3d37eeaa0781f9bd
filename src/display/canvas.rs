/*
 *  display/canvas.rs
 *
 *  RigaClock - analog clock, weather and holidays
 *  (c) 2020-26 Stuart Hunter
 *
 *  Tagged display list. Each layer is replaced wholesale on redraw and the
 *  whole list is rasterized into the driver on every frame.
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

use embedded_graphics::mono_font::{iso_8859_1, iso_8859_5, MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use embedded_text::alignment::{HorizontalAlignment, VerticalAlignment};
use embedded_text::{style::TextBoxStyleBuilder, TextBox};
use log::trace;
use std::collections::BTreeMap;

use crate::display::layout::FontSize;
use crate::vframebuf::VarFrameBuf;

/// Palette
pub const BACKGROUND: Rgb888 = Rgb888::new(0xff, 0xff, 0xff);
pub const INK: Rgb888 = Rgb888::new(0x00, 0x00, 0x00);
pub const ACCENT: Rgb888 = Rgb888::new(0xe0, 0x10, 0x10);
pub const MUTED: Rgb888 = Rgb888::new(0x70, 0x70, 0x70);
pub const MENU_BAR: Rgb888 = Rgb888::new(0xe6, 0xe6, 0xe6);
pub const MENU_ACTIVE: Rgb888 = Rgb888::new(0xb8, 0xc8, 0xe8);

/// Drawing categories. Declaration order is paint order, hands last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layer {
    Face,
    Menu,
    City,
    Weather,
    Holidays,
    Hands,
}

impl Layer {
    pub const ALL: [Layer; 6] = [
        Layer::Face,
        Layer::Menu,
        Layer::City,
        Layer::Weather,
        Layer::Holidays,
        Layer::Hands,
    ];
}

/// One retained drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line {
        start: Point,
        end: Point,
        width: u32,
        color: Rgb888,
    },
    Circle {
        center: Point,
        radius: u32,
        width: u32,
        color: Rgb888,
    },
    Rect {
        area: Rectangle,
        fill: Rgb888,
    },
    Text {
        text: String,
        position: Point,
        alignment: Alignment,
        baseline: Baseline,
        size: FontSize,
        color: Rgb888,
    },
    /// Left-aligned text wrapped inside `area`; overflow is cut off.
    Paragraph {
        text: String,
        area: Rectangle,
        size: FontSize,
        color: Rgb888,
    },
}

impl Shape {
    /// Centered single- or multi-line text.
    pub fn centered_text(text: impl Into<String>, position: Point, size: FontSize, color: Rgb888) -> Self {
        Shape::Text {
            text: text.into(),
            position,
            alignment: Alignment::Center,
            baseline: Baseline::Middle,
            size,
            color,
        }
    }

    /// Left-aligned text hanging from `position`.
    pub fn left_text(text: impl Into<String>, position: Point, size: FontSize, color: Rgb888) -> Self {
        Shape::Text {
            text: text.into(),
            position,
            alignment: Alignment::Left,
            baseline: Baseline::Top,
            size,
            color,
        }
    }

    pub fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        match self {
            Shape::Line { start, end, width, color } => Line::new(*start, *end)
                .into_styled(PrimitiveStyle::with_stroke(*color, *width))
                .draw(target),
            Shape::Circle { center, radius, width, color } => Circle::with_center(*center, radius * 2 + 1)
                .into_styled(PrimitiveStyle::with_stroke(*color, *width))
                .draw(target),
            Shape::Rect { area, fill } => (*area)
                .into_styled(PrimitiveStyle::with_fill(*fill))
                .draw(target),
            Shape::Text { text, position, alignment, baseline, size, color } => {
                let character_style = MonoTextStyle::new(font_for(text, *size), *color);
                let text_style = TextStyleBuilder::new()
                    .alignment(*alignment)
                    .baseline(*baseline)
                    .build();
                Text::with_text_style(text, *position, character_style, text_style)
                    .draw(target)
                    .map(|_| ())
            }
            Shape::Paragraph { text, area, size, color } => {
                let character_style = MonoTextStyle::new(font_for(text, *size), *color);
                let textbox_style = TextBoxStyleBuilder::new()
                    .alignment(HorizontalAlignment::Left)
                    .vertical_alignment(VerticalAlignment::Top)
                    .build();
                TextBox::with_textbox_style(text, *area, character_style, textbox_style)
                    .draw(target)
                    .map(|_| ())
            }
        }
    }
}

/// Latin-1 glyphs when they cover the text (keeps "°"), Cyrillic otherwise.
pub fn font_for(text: &str, size: FontSize) -> &'static MonoFont<'static> {
    let latin = text.chars().all(|c| (c as u32) < 0x100);
    match (size, latin) {
        (FontSize::Small, true) => &iso_8859_1::FONT_7X13,
        (FontSize::Small, false) => &iso_8859_5::FONT_7X13,
        (FontSize::Medium, true) => &iso_8859_1::FONT_9X15,
        (FontSize::Medium, false) => &iso_8859_5::FONT_9X15,
        (FontSize::Large, true) => &iso_8859_1::FONT_9X18_BOLD,
        (FontSize::Large, false) => &iso_8859_5::FONT_9X18_BOLD,
    }
}

/// Retained scene made of tagged layers.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    layers: BTreeMap<Layer, Vec<Shape>>,
    revision: u64,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            layers: BTreeMap::new(),
            revision: 0,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Swap in the new contents of `layer`; nothing of the old contents survives.
    pub fn replace(&mut self, layer: Layer, shapes: Vec<Shape>) {
        trace!("replace {:?}: {} shapes", layer, shapes.len());
        self.layers.insert(layer, shapes);
        self.revision += 1;
    }

    pub fn layer(&self, layer: Layer) -> &[Shape] {
        self.layers.get(&layer).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Text strings drawn in `layer`, in paint order.
    pub fn texts(&self, layer: Layer) -> Vec<&str> {
        self.layer(layer)
            .iter()
            .filter_map(|s| match s {
                Shape::Text { text, .. } | Shape::Paragraph { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Bumped on every layer replacement.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Paint background then every layer in `Layer::ALL` order.
    pub fn render<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        target.clear(BACKGROUND)?;
        for layer in Layer::ALL {
            for shape in self.layer(layer) {
                shape.draw(target)?;
            }
        }
        Ok(())
    }

    /// Render into a fresh framebuffer of the canvas size.
    pub fn rasterize(&self) -> VarFrameBuf<Rgb888> {
        let mut fb = VarFrameBuf::new(self.width, self.height, BACKGROUND);
        // VarFrameBuf cannot fail
        let _ = self.render(&mut fb);
        fb
    }
}
