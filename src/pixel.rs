// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The per-pixel record
//!
//! Every cell of a grid carries more than its color: its energy, the
//! three scratch fields the seam search writes into, and a pair of
//! coordinates pointing back into the untouched original grid.  The
//! back reference is only ever used as a lookup key; the working
//! grid never holds on to anything in the original.

use crate::color::Color;
use std::fmt;

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Pixel {
    pub col: u32,
    pub row: u32,
    pub color: Color,
    pub energy: f64,

    /// Accumulated seam cost from the first layer down to this cell.
    pub cost: f64,
    pub visited: bool,
    /// The coordinate, in the previous layer, of the cell this one's
    /// cheapest path came from.  `None` in the first layer.
    pub predecessor: Option<u32>,

    pub original_col: u32,
    pub original_row: u32,
    /// Which seam removed this pixel.  Only ever written in the
    /// original grid, and only once per session.
    pub deleted_by_seam: Option<u32>,
}

impl Pixel {
    /// A fresh pixel sitting at its own original coordinates.
    pub fn new(col: u32, row: u32, color: Color) -> Self {
        Pixel {
            col,
            row,
            color,
            original_col: col,
            original_row: row,
            ..Pixel::default()
        }
    }

    /// Clear the search scratch fields.  Done before every seam search.
    pub fn reset_search(&mut self) {
        self.cost = 0.0;
        self.visited = false;
        self.predecessor = None;
    }
}

impl fmt::Display for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(col, row) = ({}, {}), {}", self.col, self.row, self.color)
    }
}
