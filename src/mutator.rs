// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seam removal
//!
//! Taking a seam out of a grid shrinks it by exactly one column (or
//! row) and slides everything past the seam over to close the gap, in
//! the records and in the RGBA buffer alike.  Only the cells next to
//! the removed line can have a new gradient, so only those get their
//! energy recomputed.

use crate::errors::{CarveError, Result};
use crate::grid::PixelGrid;
use crate::seam::Orientation;
use log::trace;

// A path has to name one cell per line, every cell has to be on the
// grid, and consecutive cells have to touch.  `limit` is the length
// of each line the path crosses.
fn check_path(path: &[u32], lines: u32, limit: u32) -> Result<()> {
    if path.len() != lines as usize {
        return Err(CarveError::CorruptSeam {
            expected: lines as usize,
            actual: path.len(),
        });
    }
    if let Some((position, &coordinate)) = path.iter().enumerate().find(|&(_, &c)| c >= limit) {
        return Err(CarveError::SeamOutOfBounds {
            position,
            coordinate,
            limit,
        });
    }
    if let Some((position, w)) = path
        .windows(2)
        .enumerate()
        .find(|(_, w)| (i64::from(w[0]) - i64::from(w[1])).abs() > 1)
    {
        return Err(CarveError::DisconnectedSeam {
            position: position + 1,
            from: w[0],
            to: w[1],
        });
    }
    Ok(())
}

/// Remove a top-to-bottom seam: `path[row]` is the column to delete
/// from each row.  The grid loses one column.
pub fn remove_vertical(grid: &mut PixelGrid, path: &[u32]) -> Result<()> {
    let (width, height) = grid.dimensions();
    if width < 2 {
        return Err(CarveError::InvalidDimensions {
            width: width - 1,
            height,
        });
    }
    check_path(path, height, width)?;

    grid.squeeze_columns(path);
    grid.check_integrity()?;
    grid.recalculate_energy_band(Orientation::Vertical, path);
    trace!("removed vertical seam, grid now {}x{}", grid.width(), grid.height());
    Ok(())
}

/// Remove a left-to-right seam: `path[col]` is the row to delete from
/// each column.  The grid loses one row.
///
/// This is done by turning the grid on its side, removing the seam as
/// a vertical one, and turning it back.  It costs two copies, but the
/// compaction logic only exists once.
pub fn remove_horizontal(grid: &mut PixelGrid, path: &[u32]) -> Result<()> {
    let (width, height) = grid.dimensions();
    if height < 2 {
        return Err(CarveError::InvalidDimensions {
            width,
            height: height - 1,
        });
    }
    check_path(path, width, height)?;

    let mut flipped = grid.transpose();
    flipped.squeeze_columns(path);
    *grid = flipped.transpose();
    grid.check_integrity()?;
    grid.recalculate_energy_band(Orientation::Horizontal, path);
    trace!("removed horizontal seam, grid now {}x{}", grid.width(), grid.height());
    Ok(())
}

/// Remove a seam in whichever direction it runs.
pub fn remove(grid: &mut PixelGrid, orientation: Orientation, path: &[u32]) -> Result<()> {
    match orientation {
        Orientation::Vertical => remove_vertical(grid, path),
        Orientation::Horizontal => remove_horizontal(grid, path),
    }
}
