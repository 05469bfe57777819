// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A row-major two-dimensional field
//!
//! The pixel records of a grid live in one of these.  Besides the
//! addressing it knows the two structural operations the carver
//! needs: squeezing one cell out of every row, and swapping rows for
//! columns.

use std::ops::{Index, IndexMut};

/// An addressable two-dimensional field of any small copyable value.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoDimensionalMap<P: Default + Copy> {
    width: u32,
    height: u32,
    cells: Vec<P>,
}

impl<P: Default + Copy> TwoDimensionalMap<P> {
    /// Wrap an existing row-major vector.  Returns `None` if the
    /// vector is the wrong length for the dimensions.
    pub fn from_vec(width: u32, height: u32, cells: Vec<P>) -> Option<Self> {
        if cells.len() != width as usize * height as usize {
            return None;
        }
        Some(TwoDimensionalMap {
            width,
            height,
            cells,
        })
    }

    // Absolutely, the number one name of this game is keep the index
    // math in a singular location and never, ever mess with it.  This
    // particular variant is the same one used in image.rs.
    fn get_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The number of cells actually held, which had better be
    /// `width * height`.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn as_slice(&self) -> &[P] {
        &self.cells
    }

    pub fn iter(&self) -> std::slice::Iter<'_, P> {
        self.cells.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, P> {
        self.cells.iter_mut()
    }

    /// Remove the cell at `path[y]` from every row `y`, sliding the
    /// rest of the row one to the left.  The caller has checked the
    /// path; this only moves memory.
    pub fn remove_one_per_row(&mut self, path: &[u32]) {
        compact_rows(&mut self.cells, self.width as usize, 1, path);
        self.width -= 1;
    }

    /// Rows become columns.  Cell `(x, y)` of the result is cell
    /// `(y, x)` of this map.
    pub fn transpose(&self) -> Self {
        let mut cells = Vec::with_capacity(self.cells.len());
        for x in 0..self.width {
            for y in 0..self.height {
                cells.push(self[(x, y)]);
            }
        }
        TwoDimensionalMap {
            width: self.height,
            height: self.width,
            cells,
        }
    }
}

impl<P: Default + Copy> Index<(u32, u32)> for TwoDimensionalMap<P> {
    type Output = P;

    /// A convenience addressing mode for getting values.
    fn index(&self, (x, y): (u32, u32)) -> &P {
        let index = self.get_index(x, y);
        &self.cells[index]
    }
}

impl<P: Default + Copy> IndexMut<(u32, u32)> for TwoDimensionalMap<P> {
    /// A convenience addressing mode for setting values.
    fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut P {
        let index = self.get_index(x, y);
        &mut self.cells[index]
    }
}

// The raw RGBA buffer and the pixel records have to be squeezed in
// exactly the same way, so both go through here.  A "cell" is
// `stride` consecutive elements: one for a record, four for an RGBA
// quad.  Every cell is copied at most once and always leftward, so the
// whole thing happens in place.
pub(crate) fn compact_rows<T: Copy>(data: &mut Vec<T>, row_len: usize, stride: usize, path: &[u32]) {
    let mut write = 0;
    for (y, &skip) in path.iter().enumerate() {
        let row_start = y * row_len * stride;
        for x in 0..row_len {
            if x == skip as usize {
                continue;
            }
            let read = row_start + x * stride;
            if read != write {
                data.copy_within(read..read + stride, write);
            }
            write += stride;
        }
    }
    data.truncate(write);
}

/// Transpose a buffer of `stride`-sized cells laid out row-major over
/// `width` x `height`.
pub(crate) fn transpose_cells<T: Copy>(data: &[T], width: usize, height: usize, stride: usize) -> Vec<T> {
    let mut out = Vec::with_capacity(data.len());
    for x in 0..width {
        for y in 0..height {
            let start = (y * width + x) * stride;
            out.extend_from_slice(&data[start..start + stride]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting(width: u32, height: u32) -> TwoDimensionalMap<u32> {
        TwoDimensionalMap::from_vec(width, height, (0..width * height).collect()).unwrap()
    }

    #[test]
    fn addressing_is_row_major() {
        let map = counting(3, 2);
        assert_eq!(map[(0, 0)], 0);
        assert_eq!(map[(2, 0)], 2);
        assert_eq!(map[(0, 1)], 3);
        assert_eq!(map[(2, 1)], 5);
    }

    #[test]
    fn from_vec_rejects_the_wrong_length() {
        assert!(TwoDimensionalMap::from_vec(3, 3, vec![0u8; 8]).is_none());
    }

    #[test]
    fn removing_one_per_row_slides_the_tail_left() {
        let mut map = counting(4, 3);
        map.remove_one_per_row(&[0, 2, 3]);
        assert_eq!(map.dimensions(), (3, 3));
        assert_eq!(map.as_slice(), &[1, 2, 3, 4, 5, 7, 8, 9, 10][..]);
    }

    #[test]
    fn transpose_swaps_the_axes() {
        let map = counting(3, 2);
        let t = map.transpose();
        assert_eq!(t.dimensions(), (2, 3));
        assert_eq!(t.as_slice(), &[0, 3, 1, 4, 2, 5][..]);
        assert_eq!(t.transpose(), map);
    }

    #[test]
    fn compacting_quads_keeps_them_whole() {
        let mut buf: Vec<u8> = (0..24).collect();
        // 3x2 image of four-byte cells; drop column 1, then column 0.
        compact_rows(&mut buf, 3, 4, &[1, 0]);
        assert_eq!(
            buf,
            vec![0, 1, 2, 3, 8, 9, 10, 11, 16, 17, 18, 19, 20, 21, 22, 23]
        );
    }

    #[test]
    fn transposing_quads_moves_whole_cells() {
        let buf: Vec<u8> = (0..8).collect();
        // 2x2 of two-byte cells.
        assert_eq!(transpose_cells(&buf, 2, 2, 2), vec![0, 1, 4, 5, 2, 3, 6, 7]);
    }
}
