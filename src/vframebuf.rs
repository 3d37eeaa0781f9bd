/*
 *  vframebuf.rs
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

use core::convert::Infallible;
use embedded_graphics::geometry::{OriginDimensions, Size};
use embedded_graphics::pixelcolor::{PixelColor, Rgb888};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PointsIter, Rectangle};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// A runtime-sized framebuffer for embedded-graphics.
#[derive(Debug, Clone, PartialEq)]
pub struct VarFrameBuf<C: PixelColor> {
    buf: Vec<C>,
    w: usize,
    h: usize,
}

impl<C: PixelColor> VarFrameBuf<C> {
    pub fn new(width: u32, height: u32, fill: C) -> Self {
        let (w, h) = (width as usize, height as usize);
        Self { buf: vec![fill; w * h], w, h }
    }

    pub fn width(&self) -> usize { self.w }
    pub fn height(&self) -> usize { self.h }

    pub fn as_slice(&self) -> &[C] { &self.buf }

    pub fn clear_color(&mut self, color: C) {
        self.buf.fill(color);
    }

    /// Color at `p`, or None outside the buffer.
    pub fn pixel(&self, p: Point) -> Option<C> {
        self.idx(p).map(|i| self.buf[i])
    }

    /// Number of pixels currently holding `color`.
    pub fn count(&self, color: C) -> usize {
        self.buf.iter().filter(|&&c| c == color).count()
    }

    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if p.x >= 0 && p.y >= 0 {
            let (x, y) = (p.x as usize, p.y as usize);
            if x < self.w && y < self.h {
                return Some(y * self.w + x);
            }
        }
        None
    }
}

impl VarFrameBuf<Rgb888> {
    /// RGBA8 bytes, row-major, as `pixels` expects for its frame.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.buf.len() * 4);
        for c in &self.buf {
            out.extend_from_slice(&[c.r(), c.g(), c.b(), 0xff]);
        }
        out
    }

    /// Copy into an existing RGBA8 frame; extra bytes are left untouched.
    pub fn copy_to_rgba(&self, frame: &mut [u8]) {
        for (px, c) in frame.chunks_exact_mut(4).zip(self.buf.iter()) {
            px.copy_from_slice(&[c.r(), c.g(), c.b(), 0xff]);
        }
    }

    /// Binary PPM (P6) dump, handy for snapshots and visual debugging.
    pub fn write_ppm(&self, path: &Path) -> std::io::Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        write!(out, "P6\n{} {}\n255\n", self.w, self.h)?;
        for c in &self.buf {
            out.write_all(&[c.r(), c.g(), c.b()])?;
        }
        out.flush()
    }
}

impl<C: PixelColor> OriginDimensions for VarFrameBuf<C> {
    fn size(&self) -> Size {
        Size::new(self.w as u32, self.h as u32)
    }
}

impl<C: PixelColor> DrawTarget for VarFrameBuf<C> {
    type Color = C;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, c) in pixels {
            if let Some(i) = self.idx(p) {
                self.buf[i] = c;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.clear_color(color);
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        // the iterator covers the whole area, so walk it and drop what falls outside
        let points = area.points();
        for (p, c) in points.zip(colors) {
            if let Some(i) = self.idx(p) {
                self.buf[i] = c;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

    #[test]
    fn fill_is_clipped_at_edges() {
        let mut fb = VarFrameBuf::new(10, 10, Rgb888::WHITE);
        Rectangle::new(Point::new(-5, -5), Size::new(8, 8))
            .into_styled(PrimitiveStyle::with_fill(Rgb888::BLACK))
            .draw(&mut fb)
            .unwrap();
        assert_eq!(fb.count(Rgb888::BLACK), 9);
        assert_eq!(fb.pixel(Point::new(2, 2)), Some(Rgb888::BLACK));
        assert_eq!(fb.pixel(Point::new(3, 3)), Some(Rgb888::WHITE));
        assert_eq!(fb.pixel(Point::new(10, 0)), None);
    }

    #[test]
    fn rgba_layout() {
        let mut fb = VarFrameBuf::new(2, 1, Rgb888::BLACK);
        Pixel(Point::new(1, 0), Rgb888::RED).draw(&mut fb).unwrap();
        assert_eq!(fb.to_rgba(), vec![0, 0, 0, 255, 255, 0, 0, 255]);
    }

    #[test]
    fn ppm_header_and_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shot.ppm");
        let fb = VarFrameBuf::new(4, 3, Rgb888::WHITE);
        fb.write_ppm(&path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"P6\n4 3\n255\n"));
        assert_eq!(bytes.len(), b"P6\n4 3\n255\n".len() + 4 * 3 * 3);
    }
}
