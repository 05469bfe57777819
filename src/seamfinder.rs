// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Find the cheapest seam
//!
//! The grid is treated as a layered graph: every cell in a row has an
//! edge to the (up to) three cells touching it in the row below, and
//! the cost of a path is the sum of the energies it passes through.
//! Because each row only depends on the row above it, one forward pass
//! in row order settles every cell exactly once; there is no queue and
//! nothing is ever relaxed twice.
//!
//! The pass writes its scratch work (cost, visited, predecessor) into
//! the pixel records themselves and resets them first, so a search
//! leaves nothing behind that the next one depends on.

use crate::errors::{CarveError, Result};
use crate::flipper::Flipper;
use crate::grid::PixelGrid;
use crate::pixel::Pixel;
use std::cmp::Ordering;

/// Anything a seam can be searched over: a two-dimensional field of
/// pixel records, addressed `(x, y)`, where seams run from `y == 0` to
/// `y == height - 1`.
pub trait Lattice {
    fn dimensions(&self) -> (u32, u32);
    fn cell(&self, x: u32, y: u32) -> &Pixel;
    fn cell_mut(&mut self, x: u32, y: u32) -> &mut Pixel;
}

impl Lattice for PixelGrid {
    fn dimensions(&self) -> (u32, u32) {
        PixelGrid::dimensions(self)
    }

    fn cell(&self, x: u32, y: u32) -> &Pixel {
        self.pixel(x, y)
    }

    fn cell_mut(&mut self, x: u32, y: u32) -> &mut Pixel {
        self.pixel_mut(x, y)
    }
}

// Energies are never NaN, but if one ever were it would compare equal
// to everything rather than poison the ordering.
fn by_cost(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Given a lattice, return the list of x-coordinates that, when
/// mapped with the range (0..height), give the XY coordinates for each
/// cell in the cheapest top-to-bottom seam, along with that seam's
/// total cost.
///
/// Ties go to the smallest x, both when picking a cell's parent and
/// when picking where the seam ends, so the same lattice always gives
/// the same seam.
pub fn find_seam<L: Lattice>(lattice: &mut L) -> Result<(Vec<u32>, f64)> {
    let (width, height) = lattice.dimensions();
    if width == 0 || height == 0 {
        return Err(CarveError::InvalidDimensions { width, height });
    }

    for y in 0..height {
        for x in 0..width {
            lattice.cell_mut(x, y).reset_search();
        }
    }

    // Populate the first row with their native energies.
    for x in 0..width {
        let cell = lattice.cell_mut(x, 0);
        cell.cost = cell.energy;
        cell.visited = true;
    }

    let maxwidth = width - 1;
    // For every subsequent row, populate each cell with the sum of its
    // own energy and the *lowest adjacent upper cost*, remembering the
    // x coordinate that cost came from.  `min_by` keeps the first of
    // several equal minimums, and the range runs left to right.
    for y in 1..height {
        for x in 0..width {
            let range = cq!(x == 0, 0, x - 1)..=cq!(x == maxwidth, maxwidth, x + 1);
            let (parent_x, parent_cost) = range
                .map(|px| (px, lattice.cell(px, y - 1).cost))
                .min_by(|a, b| by_cost(a.1, b.1))
                .ok_or(CarveError::CorruptSeam {
                    expected: height as usize,
                    actual: y as usize,
                })?;
            let cell = lattice.cell_mut(x, y);
            cell.cost = cell.energy + parent_cost;
            cell.predecessor = Some(parent_x);
            cell.visited = true;
        }
    }

    // Find the x coordinate of the bottommost cell with the least cost.
    let (mut seam_x, cost) = (0..width)
        .map(|x| (x, lattice.cell(x, height - 1).cost))
        .min_by(|a, b| by_cost(a.1, b.1))
        .ok_or(CarveError::CorruptSeam {
            expected: height as usize,
            actual: 0,
        })?;

    // Working backwards, follow the predecessors up to the first row,
    // then reverse.
    let mut path = Vec::with_capacity(height as usize);
    let mut y = height - 1;
    loop {
        path.push(seam_x);
        match lattice.cell(seam_x, y).predecessor {
            Some(parent) if y > 0 => {
                seam_x = parent;
                y -= 1;
            }
            _ => break,
        }
    }
    path.reverse();

    if path.len() != height as usize {
        return Err(CarveError::CorruptSeam {
            expected: height as usize,
            actual: path.len(),
        });
    }
    Ok((path, cost))
}

/// This trait defines how we will return seams from a grid.  It's a
/// primitive interface, just enough to make room for more than one
/// search strategy.
pub trait SeamFinder {
    /// Request a left-to-right seam: one row per column.
    fn find_horizontal_seam(&mut self) -> Result<(Vec<u32>, f64)>;

    /// Request a top-to-bottom seam: one column per row.
    fn find_vertical_seam(&mut self) -> Result<(Vec<u32>, f64)>;
}

impl SeamFinder for PixelGrid {
    fn find_horizontal_seam(&mut self) -> Result<(Vec<u32>, f64)> {
        find_seam(&mut Flipper::new(self))
    }

    fn find_vertical_seam(&mut self) -> Result<(Vec<u32>, f64)> {
        find_seam(self)
    }
}
