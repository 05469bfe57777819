// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The pixel grid
//!
//! A grid owns two views of the same picture: the RGBA buffer exactly
//! as the caller handed it over, and a row-major field of pixel
//! records carrying the color, energy and seam bookkeeping for each
//! cell.  Everything that mutates a grid keeps the two in step; after
//! any public operation returns, `raw[4 * i..4 * i + 4]` is the color
//! of record `i`, and record `i` knows it sits at
//! `(i % width, i / width)`.

use crate::color::Color;
use crate::energy::{calculate_energy, energy_of, energy_to_picture};
use crate::errors::{CarveError, Result};
use crate::pixel::Pixel;
use crate::seam::Orientation;
use crate::twodmap::{compact_rows, transpose_cells, TwoDimensionalMap};
use image::{GenericImageView, Pixel as ImagePixel};
use itertools::iproduct;
use std::fmt::Write;
use std::ops::RangeInclusive;

#[derive(Debug, Clone, PartialEq)]
pub struct PixelGrid {
    pixels: TwoDimensionalMap<Pixel>,
    raw: Vec<u8>,
}

// The cells whose energy can change when the cell at `c` is removed
// from a line of what is now `limit` cells.  A coordinate past the
// end of the shrunk line is pulled back onto it: the right-hand
// neighbor of a removed last cell is the new last cell.
fn band(c: u32, limit: u32) -> RangeInclusive<u32> {
    let c = c.min(limit - 1);
    c.saturating_sub(1)..=(c + 1).min(limit - 1)
}

impl PixelGrid {
    /// Build a grid from a raw RGBA buffer, computing the full energy
    /// map on the way.
    pub fn from_buffer(buffer: &[u8], width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(CarveError::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if buffer.len() != expected {
            return Err(CarveError::InvalidBufferSize {
                width,
                height,
                expected,
                actual: buffer.len(),
            });
        }

        let cells = iproduct!(0..height, 0..width)
            .zip(buffer.chunks(4))
            .map(|((y, x), quad)| Pixel::new(x, y, Color::from_slice(quad)))
            .collect::<Vec<_>>();
        let records = cells.len();
        let mut pixels = TwoDimensionalMap::from_vec(width, height, cells).ok_or(
            CarveError::PixelCountDrift {
                expected: expected / 4,
                records,
                bytes: buffer.len(),
            },
        )?;
        calculate_energy(&mut pixels);

        Ok(PixelGrid {
            pixels,
            raw: buffer.to_vec(),
        })
    }

    /// Build a grid from anything the `image` crate can view with
    /// 8-bit channels.  Every pixel is converted to RGBA first.
    pub fn from_image<I, P>(image: &I) -> Result<Self>
    where
        I: GenericImageView<Pixel = P>,
        P: ImagePixel<Subpixel = u8> + 'static,
    {
        let (width, height) = image.dimensions();
        let buffer: Vec<u8> = iproduct!(0..height, 0..width)
            .flat_map(|(y, x)| image.get_pixel(x, y).to_rgba().channels().to_owned())
            .collect();
        PixelGrid::from_buffer(&buffer, width, height)
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn pixel(&self, col: u32, row: u32) -> &Pixel {
        &self.pixels[(col, row)]
    }

    pub(crate) fn pixel_mut(&mut self, col: u32, row: u32) -> &mut Pixel {
        &mut self.pixels[(col, row)]
    }

    /// The records, row-major.
    pub fn pixels(&self) -> &[Pixel] {
        self.pixels.as_slice()
    }

    /// The backing RGBA buffer.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// The stored energy of the pixel at `(col, row)`.
    pub fn energy_at(&self, col: u32, row: u32) -> f64 {
        self.pixels[(col, row)].energy
    }

    /// Recompute every energy in the grid.
    pub fn recalculate_energy(&mut self) {
        calculate_energy(&mut self.pixels);
    }

    fn refresh_energy(&mut self, col: u32, row: u32) {
        let energy = energy_of(&self.pixels, col, row);
        self.pixels[(col, row)].energy = energy;
    }

    /// Recompute energy along a removed line and nowhere else.
    ///
    /// `path` is the seam that was just taken out, in the coordinates
    /// it had before removal.  For a vertical seam, each row gets the
    /// cell at `path[row]` and its left and right neighbors recomputed;
    /// for a horizontal one, each column gets the cell at `path[col]`
    /// and the ones above and below.  Coordinates that fall off the
    /// shrunk grid are clamped back onto it.
    pub fn recalculate_energy_band(&mut self, orientation: Orientation, path: &[u32]) {
        let (width, height) = self.dimensions();
        match orientation {
            Orientation::Vertical => {
                for (row, &col) in path.iter().enumerate().take(height as usize) {
                    for x in band(col, width) {
                        self.refresh_energy(x, row as u32);
                    }
                }
            }
            Orientation::Horizontal => {
                for (col, &row) in path.iter().enumerate().take(width as usize) {
                    for y in band(row, height) {
                        self.refresh_energy(col as u32, y);
                    }
                }
            }
        }
    }

    /// The picture, exactly as the buffer now stands.
    pub fn to_picture(&self) -> Vec<u8> {
        self.raw.clone()
    }

    /// The energy map drawn as an opaque greyscale picture.
    pub fn to_energy_picture(&self) -> Vec<u8> {
        energy_to_picture(&self.pixels)
    }

    /// Forget every seam marker.
    pub fn reset_seam_markers(&mut self) {
        self.pixels
            .iter_mut()
            .for_each(|p| p.deleted_by_seam = None);
    }

    /// Record that `seam_number` removed the pixel at `(col, row)`.  A
    /// pixel can only be removed once; a second claim on it means the
    /// working grid's back references have gone wrong.
    pub(crate) fn mark_removed(&mut self, col: u32, row: u32, seam_number: u32) -> Result<()> {
        let pixel = &mut self.pixels[(col, row)];
        if let Some(previous) = pixel.deleted_by_seam {
            return Err(CarveError::SeamCollision { col, row, previous });
        }
        pixel.deleted_by_seam = Some(seam_number);
        Ok(())
    }

    /// Record that `seam_number` removed every pixel in `cells`.  All of
    /// them are checked before any is written, so a collision leaves
    /// the markers exactly as they were.
    pub(crate) fn mark_seam(&mut self, cells: &[(u32, u32)], seam_number: u32) -> Result<()> {
        if let Some((col, row, previous)) = cells.iter().find_map(|&(col, row)| {
            self.pixels[(col, row)]
                .deleted_by_seam
                .map(|previous| (col, row, previous))
        }) {
            return Err(CarveError::SeamCollision { col, row, previous });
        }
        for &(col, row) in cells {
            self.mark_removed(col, row, seam_number)?;
        }
        Ok(())
    }

    /// A copy of this grid with rows and columns exchanged.  Back
    /// references into the original grid come along untouched.
    pub(crate) fn transpose(&self) -> Self {
        let (width, height) = self.dimensions();
        let mut pixels = self.pixels.transpose();
        pixels.iter_mut().for_each(|p| {
            std::mem::swap(&mut p.col, &mut p.row);
        });
        PixelGrid {
            pixels,
            raw: transpose_cells(&self.raw, width as usize, height as usize, 4),
        }
    }

    /// Squeeze the cell at `path[row]` out of every row of both the
    /// records and the buffer, then renumber what's left.  Energies
    /// are not touched.
    pub(crate) fn squeeze_columns(&mut self, path: &[u32]) {
        let width = self.width() as usize;
        compact_rows(&mut self.raw, width, 4, path);
        self.pixels.remove_one_per_row(path);
        let width = self.width();
        self.pixels.iter_mut().enumerate().for_each(|(i, p)| {
            p.col = i as u32 % width;
            p.row = i as u32 / width;
        });
    }

    /// Check that the grid still holds exactly as many records and
    /// bytes as its dimensions promise, and that every record knows
    /// where it is.
    pub fn check_integrity(&self) -> Result<()> {
        let (width, height) = self.dimensions();
        let expected = width as usize * height as usize;
        let drift = CarveError::PixelCountDrift {
            expected,
            records: self.pixels.len(),
            bytes: self.raw.len(),
        };
        if self.pixels.len() != expected || self.raw.len() != expected * 4 {
            return Err(drift);
        }
        let misplaced = iproduct!(0..height, 0..width)
            .zip(self.pixels.iter())
            .any(|((y, x), p)| p.col != x || p.row != y);
        if misplaced {
            return Err(drift);
        }
        Ok(())
    }

    /// Dump the energy grid as text, two decimals a cell, with the
    /// cells of an optional vertical seam marked by a `*`.
    pub fn energy_table(&self, seam: Option<&[u32]>) -> String {
        let (width, height) = self.dimensions();
        let mut table = String::new();
        for y in 0..height {
            let marked = seam.and_then(|s| s.get(y as usize)).cloned();
            for x in 0..width {
                let mark = if marked == Some(x) { "*" } else { " " };
                let _ = write!(table, "{:8.2}{} ", self.energy_at(x, y), mark);
            }
            table.push('\n');
        }
        table
    }
}
