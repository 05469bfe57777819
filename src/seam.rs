// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seams, and which way they run.

use std::fmt;

// This is silly and basically a reimplementation of `bool` and `not`,
// but it makes it much clearer in the code what I'm doing.  And I
// like that.

/// A vertical seam runs top to bottom and narrows the image; a
/// horizontal one runs left to right and shortens it.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

impl Orientation {
    pub fn turn(self) -> Self {
        if self == Orientation::Vertical {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Orientation::Vertical => write!(f, "vertical"),
            Orientation::Horizontal => write!(f, "horizontal"),
        }
    }
}

/// One removed seam.  For a vertical seam `path[row]` is the column
/// removed from that row; for a horizontal one `path[col]` is the row
/// removed from that column.  Coordinates are in the grid as it was
/// just before this seam came out.
#[derive(Debug, Clone, PartialEq)]
pub struct Seam {
    pub orientation: Orientation,
    pub path: Vec<u32>,
    pub seam_number: u32,
    /// Total energy along the path.
    pub cost: f64,
}

impl Seam {
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// The `(col, row)` of every cell on the seam, in path order.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let orientation = self.orientation;
        self.path.iter().enumerate().map(move |(i, &c)| match orientation {
            Orientation::Vertical => (c, i as u32),
            Orientation::Horizontal => (i as u32, c),
        })
    }
}

impl fmt::Display for Seam {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} seam #{} {{ ", self.orientation, self.seam_number)?;
        for c in &self.path {
            write!(f, "{} ", c)?;
        }
        write!(f, "}} cost {:.2}", self.cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turning_twice_is_a_no_op() {
        assert_eq!(Orientation::Vertical.turn(), Orientation::Horizontal);
        assert_eq!(Orientation::Vertical.turn().turn(), Orientation::Vertical);
    }

    #[test]
    fn cells_follow_the_orientation() {
        let mut seam = Seam {
            orientation: Orientation::Vertical,
            path: vec![2, 1, 1],
            seam_number: 0,
            cost: 0.0,
        };
        assert_eq!(seam.cells().collect::<Vec<_>>(), vec![(2, 0), (1, 1), (1, 2)]);
        seam.orientation = Orientation::Horizontal;
        assert_eq!(seam.cells().collect::<Vec<_>>(), vec![(0, 2), (1, 1), (2, 1)]);
    }

    #[test]
    fn displays_the_path() {
        let seam = Seam {
            orientation: Orientation::Horizontal,
            path: vec![0, 1],
            seam_number: 3,
            cost: 2000.5,
        };
        assert_eq!(seam.to_string(), "horizontal seam #3 { 0 1 } cost 2000.50");
    }
}
