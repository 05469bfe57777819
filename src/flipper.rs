// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Grid dimensional flipper
//!
//! A proxy for a `PixelGrid` that maps the width to the original
//! height, and vice versa, as well as every x to y and vice versa.
//!
//! This has the effect of making a left-to-right seam look exactly
//! like a top-to-bottom one, so the search only has to be written
//! once.  Unlike `PixelGrid::transpose`, nothing is copied: reads and
//! writes go straight through to the grid underneath.

use crate::grid::PixelGrid;
use crate::pixel::Pixel;
use crate::seamfinder::Lattice;

pub struct Flipper<'a> {
    pub grid: &'a mut PixelGrid,
}

impl<'a> Flipper<'a> {
    pub fn new(grid: &'a mut PixelGrid) -> Self {
        Flipper { grid }
    }
}

impl<'a> Lattice for Flipper<'a> {
    fn dimensions(&self) -> (u32, u32) {
        let (x, y) = self.grid.dimensions();
        (y, x)
    }

    fn cell(&self, x: u32, y: u32) -> &Pixel {
        self.grid.pixel(y, x)
    }

    fn cell_mut(&mut self, x: u32, y: u32) -> &mut Pixel {
        self.grid.pixel_mut(y, x)
    }
}
