// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - The orchestrator
//!
//! The carver keeps two grids.  The original is built once and never
//! changes shape; the only thing ever written into it is which seam
//! took out which pixel, so the seams can be drawn over the picture
//! afterwards.  The working grid is a copy that gets cut down one seam
//! at a time.
//!
//! Every seam removal is a complete unit of work.  A caller that wants
//! to stay responsive on a big picture can use `start_resize` and then
//! call `step` as often as it likes, doing other things in between;
//! stopping early just leaves a smaller (and perfectly valid) working
//! grid behind.

use crate::color::Color;
use crate::errors::{CarveError, Result};
use crate::grid::PixelGrid;
use crate::mutator;
use crate::seam::{Orientation, Seam};
use crate::seamfinder::SeamFinder;
use image::{GenericImageView, Pixel as ImagePixel};
use log::{debug, error, info, log_enabled, trace, warn, Level};
use std::collections::VecDeque;
use std::iter::repeat;

/// The order in which `vertical` and `horizontal` seams come out.
///
/// While both directions still have seams owed, alternate one
/// horizontal and one vertical; then finish off whichever direction has
/// some left.  Walking the diagonal like this is a cheap stand-in for
/// the best joint ordering, which is far too expensive to compute for
/// interactive use.  It is a heuristic, not an optimum.
pub fn plan(vertical: u32, horizontal: u32) -> Vec<Orientation> {
    let diagonal = vertical.min(horizontal);
    let mut steps = Vec::with_capacity((vertical + horizontal) as usize);
    let mut direction = Orientation::Horizontal;
    for _ in 0..diagonal * 2 {
        steps.push(direction);
        direction = direction.turn();
    }
    steps.extend(repeat(Orientation::Vertical).take((vertical - diagonal) as usize));
    steps.extend(repeat(Orientation::Horizontal).take((horizontal - diagonal) as usize));
    steps
}

/// A struct for holding the image to be carved.
#[derive(Debug, Clone)]
pub struct SeamCarver {
    original: PixelGrid,
    // `None` once a fatal error has thrown the session away.
    working: Option<PixelGrid>,
    seams: Vec<Seam>,
    pending: VecDeque<Orientation>,
}

impl SeamCarver {
    /// Creates a new SeamCarver from a raw RGBA buffer.  A session is
    /// begun straight away, so the resized picture starts out as the
    /// original.
    pub fn new(buffer: &[u8], width: u32, height: u32) -> Result<Self> {
        Ok(SeamCarver::from_grid(PixelGrid::from_buffer(
            buffer, width, height,
        )?))
    }

    /// Creates a new SeamCarver from an `image` crate picture with
    /// 8-bit channels.
    pub fn from_image<I, P>(image: &I) -> Result<Self>
    where
        I: GenericImageView<Pixel = P>,
        P: ImagePixel<Subpixel = u8> + 'static,
    {
        Ok(SeamCarver::from_grid(PixelGrid::from_image(image)?))
    }

    pub fn from_grid(original: PixelGrid) -> Self {
        let mut carver = SeamCarver {
            working: None,
            original,
            seams: Vec::new(),
            pending: VecDeque::new(),
        };
        carver.begin_session();
        carver
    }

    /// Start over: clear the seam markers in the original, and make a
    /// fresh working copy of it.
    pub fn begin_session(&mut self) {
        self.original.reset_seam_markers();
        self.working = Some(self.original.clone());
        self.seams.clear();
        self.pending.clear();
    }

    pub fn original(&self) -> &PixelGrid {
        &self.original
    }

    pub fn working(&self) -> Result<&PixelGrid> {
        self.working.as_ref().ok_or(CarveError::SessionAborted)
    }

    pub fn original_dimensions(&self) -> (u32, u32) {
        self.original.dimensions()
    }

    pub fn resized_dimensions(&self) -> Result<(u32, u32)> {
        Ok(self.working()?.dimensions())
    }

    /// The seams removed so far this session, in removal order.
    pub fn seams(&self) -> &[Seam] {
        &self.seams
    }

    /// Find and remove the cheapest top-to-bottom seam of the working
    /// grid, recording it in the original as seam `seam_number`.
    pub fn remove_next_vertical_seam(&mut self, seam_number: u32) -> Result<Seam> {
        self.remove_next_seam(Orientation::Vertical, seam_number)
    }

    /// Find and remove the cheapest left-to-right seam of the working
    /// grid, recording it in the original as seam `seam_number`.
    pub fn remove_next_horizontal_seam(&mut self, seam_number: u32) -> Result<Seam> {
        self.remove_next_seam(Orientation::Horizontal, seam_number)
    }

    fn remove_next_seam(&mut self, orientation: Orientation, seam_number: u32) -> Result<Seam> {
        let result = self.carve_once(orientation, seam_number);
        if let Err(ref e) = result {
            if e.is_fatal() {
                self.abort(e);
            }
        }
        result
    }

    fn abort(&mut self, cause: &CarveError) {
        error!("aborting carving session: {}", cause);
        self.working = None;
        self.pending.clear();
    }

    fn carve_once(&mut self, orientation: Orientation, seam_number: u32) -> Result<Seam> {
        let working = self.working.as_mut().ok_or(CarveError::SessionAborted)?;
        let (width, height) = working.dimensions();

        // Refuse before anything is written into the original.
        let exhausted = match orientation {
            Orientation::Vertical if width < 2 => Some((width - 1, height)),
            Orientation::Horizontal if height < 2 => Some((width, height - 1)),
            _ => None,
        };
        if let Some((width, height)) = exhausted {
            return Err(CarveError::InvalidDimensions { width, height });
        }

        let (path, cost) = match orientation {
            Orientation::Vertical => working.find_vertical_seam()?,
            Orientation::Horizontal => working.find_horizontal_seam()?,
        };
        if log_enabled!(Level::Trace) && orientation == Orientation::Vertical {
            trace!("energy before seam #{}:\n{}", seam_number, working.energy_table(Some(&path[..])));
        }

        let seam = Seam {
            orientation,
            path,
            seam_number,
            cost,
        };

        // The working grid's back references say where each cell on the
        // path lives in the original.
        let originals: Vec<(u32, u32)> = seam
            .cells()
            .map(|(col, row)| {
                let pixel = working.pixel(col, row);
                (pixel.original_col, pixel.original_row)
            })
            .collect();
        self.original.mark_seam(&originals, seam_number)?;

        mutator::remove(working, orientation, &seam.path)?;
        debug!(
            "removed {}, now {}x{}",
            seam,
            working.width(),
            working.height()
        );
        self.seams.push(seam.clone());
        Ok(seam)
    }

    /// Begin a new session and queue up the seams needed to take
    /// `vertical` columns and `horizontal` rows off the picture.  Each
    /// count is clamped so at least one column and one row survive.
    /// Returns the clamped counts.
    pub fn start_resize(&mut self, vertical: u32, horizontal: u32) -> (u32, u32) {
        self.begin_session();
        let (width, height) = self.original.dimensions();
        let clamped = (vertical.min(width - 1), horizontal.min(height - 1));
        if clamped != (vertical, horizontal) {
            warn!(
                "cannot remove {} vertical and {} horizontal seams from a {}x{} image; \
                 removing {} and {}",
                vertical, horizontal, width, height, clamped.0, clamped.1
            );
        }
        self.pending = plan(clamped.0, clamped.1).into_iter().collect();
        clamped
    }

    /// Remove the next queued seam.  Returns `Ok(None)` once the queue
    /// is empty.
    pub fn step(&mut self) -> Result<Option<Seam>> {
        let orientation = match self.pending.pop_front() {
            Some(orientation) => orientation,
            None => return Ok(None),
        };
        let seam_number = self.seams.len() as u32;
        self.remove_next_seam(orientation, seam_number).map(Some)
    }

    pub fn is_finished(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn remaining_steps(&self) -> usize {
        self.pending.len()
    }

    /// Given a number of vertical and horizontal seams to remove,
    /// repeatedly carve seams out of the image.  Returns the size the
    /// working grid ends up at.
    pub fn resize(&mut self, vertical: u32, horizontal: u32) -> Result<(u32, u32)> {
        let (vertical, horizontal) = self.start_resize(vertical, horizontal);
        while self.step()?.is_some() {}
        let (width, height) = self.resized_dimensions()?;
        info!(
            "removed {} vertical and {} horizontal seams: {}x{} -> {}x{}",
            vertical,
            horizontal,
            self.original.width(),
            self.original.height(),
            width,
            height
        );
        Ok((width, height))
    }

    // Paint every pixel some seam has claimed.  The picture must
    // already be known to match the original's size.
    fn paint_seams(&self, mut picture: Vec<u8>) -> Vec<u8> {
        for (i, pixel) in self.original.pixels().iter().enumerate() {
            if pixel.deleted_by_seam.is_some() {
                picture[i * 4..i * 4 + 4].copy_from_slice(&Color::SEAM.to_rgba());
            }
        }
        picture
    }

    /// Draw this session's seams, in red, over a picture the size of
    /// the original.
    pub fn add_seams_to_picture(&self, picture: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
        let (expected_width, expected_height) = self.original.dimensions();
        if (width, height) != (expected_width, expected_height) {
            return Err(CarveError::DimensionMismatch {
                expected_width,
                expected_height,
                width,
                height,
            });
        }
        let expected = width as usize * height as usize * 4;
        if picture.len() != expected {
            return Err(CarveError::InvalidBufferSize {
                width,
                height,
                expected,
                actual: picture.len(),
            });
        }
        Ok(self.paint_seams(picture.to_vec()))
    }

    pub fn original_picture(&self) -> Vec<u8> {
        self.original.to_picture()
    }

    pub fn original_energy_picture(&self) -> Vec<u8> {
        self.original.to_energy_picture()
    }

    /// The original picture with every removed seam drawn in red.
    pub fn original_with_seams(&self) -> Vec<u8> {
        self.paint_seams(self.original.to_picture())
    }

    /// The original energy picture with every removed seam drawn in red.
    pub fn energy_with_seams(&self) -> Vec<u8> {
        self.paint_seams(self.original.to_energy_picture())
    }

    pub fn resized_picture(&self) -> Result<Vec<u8>> {
        Ok(self.working()?.to_picture())
    }

    pub fn resized_energy_picture(&self) -> Result<Vec<u8>> {
        Ok(self.working()?.to_energy_picture())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> Vec<u8> {
        (0..height)
            .flat_map(|y| {
                (0..width).flat_map(move |x| {
                    let v = ((x * 31 + y * 17) % 256) as u8;
                    vec![v, 255 - v, (x * y % 256) as u8, 255]
                })
            })
            .collect()
    }

    fn carver(width: u32, height: u32) -> SeamCarver {
        SeamCarver::new(&gradient(width, height), width, height).unwrap()
    }

    fn marked(carver: &SeamCarver) -> usize {
        carver
            .original()
            .pixels()
            .iter()
            .filter(|p| p.deleted_by_seam.is_some())
            .count()
    }

    #[test]
    fn the_plan_walks_the_diagonal_first() {
        use Orientation::*;
        assert_eq!(plan(2, 3), vec![Horizontal, Vertical, Horizontal, Vertical, Horizontal]);
        assert_eq!(plan(3, 1), vec![Horizontal, Vertical, Vertical, Vertical]);
        assert_eq!(plan(0, 2), vec![Horizontal, Horizontal]);
        assert!(plan(0, 0).is_empty());
    }

    #[test]
    fn a_fresh_carver_has_nothing_removed() {
        let c = carver(5, 4);
        assert_eq!(c.resized_dimensions().unwrap(), (5, 4));
        assert_eq!(c.resized_picture().unwrap(), c.original_picture());
        assert_eq!(c.original_with_seams(), c.original_picture());
        assert!(c.seams().is_empty());
    }

    #[test]
    fn resizing_shrinks_both_ways() {
        let mut c = carver(10, 8);
        assert_eq!(c.resize(3, 2).unwrap(), (7, 6));
        assert_eq!(c.resized_picture().unwrap().len(), 7 * 6 * 4);
        assert_eq!(c.resized_energy_picture().unwrap().len(), 7 * 6 * 4);
        assert_eq!(c.seams().len(), 5);
        assert_eq!(marked(&c), 10 * 8 - 7 * 6);
        let numbers: Vec<_> = c.seams().iter().map(|s| s.seam_number).collect();
        assert_eq!(numbers, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn requests_are_clamped_to_leave_one_column() {
        let mut c = carver(6, 4);
        assert_eq!(c.resize(6, 0).unwrap(), (1, 4));
        assert_eq!(c.seams().len(), 5);
        assert_eq!(marked(&c), 20);

        assert_eq!(c.start_resize(100, 100), (5, 3));
    }

    #[test]
    fn seams_are_recorded_against_the_original() {
        let mut c = carver(6, 5);
        let seam = c.remove_next_vertical_seam(0).unwrap();
        for (col, row) in seam.cells() {
            assert_eq!(c.original().pixel(col, row).deleted_by_seam, Some(0));
        }
        let seam = c.remove_next_horizontal_seam(1).unwrap();
        assert_eq!(seam.len(), 5);
        assert_eq!(marked(&c), 5 + 5);
        assert_eq!(c.resized_dimensions().unwrap(), (5, 4));
    }

    #[test]
    fn overlays_paint_removed_pixels_red() {
        let mut c = carver(6, 5);
        let seam = c.remove_next_vertical_seam(0).unwrap();
        let overlay = c.original_with_seams();
        let energy_overlay = c.energy_with_seams();
        let original = c.original_picture();
        for (i, p) in c.original().pixels().iter().enumerate() {
            let quad = &overlay[i * 4..i * 4 + 4];
            let energy_quad = &energy_overlay[i * 4..i * 4 + 4];
            if seam.path[p.row as usize] == p.col {
                assert_eq!(quad, &[255, 0, 0, 255]);
                assert_eq!(energy_quad, &[255, 0, 0, 255]);
            } else {
                assert_eq!(quad, &original[i * 4..i * 4 + 4]);
            }
        }
    }

    #[test]
    fn overlays_must_match_the_original() {
        let c = carver(4, 3);
        assert_eq!(
            c.add_seams_to_picture(&[0; 36], 3, 3).unwrap_err(),
            CarveError::DimensionMismatch {
                expected_width: 4,
                expected_height: 3,
                width: 3,
                height: 3
            }
        );
        assert!(c.add_seams_to_picture(&[0; 48], 4, 3).is_ok());
    }

    #[test]
    fn a_new_session_starts_from_the_original() {
        let mut c = carver(8, 6);
        c.resize(4, 3).unwrap();
        c.begin_session();
        assert_eq!(marked(&c), 0);
        assert_eq!(c.resized_dimensions().unwrap(), (8, 6));
        assert!(c.seams().is_empty());
        assert_eq!(c.resize(1, 1).unwrap(), (7, 5));
        assert_eq!(marked(&c), 8 * 6 - 7 * 5);
    }

    #[test]
    fn stepping_can_stop_anywhere() {
        let mut c = carver(9, 9);
        c.start_resize(3, 3);
        assert_eq!(c.remaining_steps(), 6);
        let first = c.step().unwrap().unwrap();
        assert_eq!(first.orientation, Orientation::Horizontal);
        let second = c.step().unwrap().unwrap();
        assert_eq!(second.orientation, Orientation::Vertical);
        assert_eq!(c.remaining_steps(), 4);
        assert!(!c.is_finished());
        assert!(c.working().unwrap().check_integrity().is_ok());
        assert_eq!(c.resized_dimensions().unwrap(), (8, 8));

        while c.step().unwrap().is_some() {}
        assert!(c.is_finished());
        assert_eq!(c.resized_dimensions().unwrap(), (6, 6));
        assert!(c.step().unwrap().is_none());
    }

    #[test]
    fn running_out_of_columns_is_refused_cleanly() {
        let mut c = carver(2, 3);
        c.remove_next_vertical_seam(0).unwrap();
        assert_eq!(
            c.remove_next_vertical_seam(1).unwrap_err(),
            CarveError::InvalidDimensions {
                width: 0,
                height: 3
            }
        );
        // Not fatal, and nothing extra was marked.
        assert_eq!(marked(&c), 3);
        assert_eq!(c.resized_dimensions().unwrap(), (1, 3));
    }

    #[test]
    fn a_fatal_error_throws_the_session_away() {
        let mut c = carver(5, 5);
        // Pretend every original pixel was already removed, so the next
        // seam collides with an earlier one.
        for row in 0..5 {
            for col in 0..5 {
                c.original.mark_removed(col, row, 7).unwrap();
            }
        }
        let err = c.remove_next_vertical_seam(0).unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(c.resized_picture().unwrap_err(), CarveError::SessionAborted);
        assert_eq!(
            c.remove_next_vertical_seam(1).unwrap_err(),
            CarveError::SessionAborted
        );

        c.begin_session();
        assert!(c.remove_next_vertical_seam(0).is_ok());
    }

    #[test]
    fn a_collision_leaves_no_partial_seam_behind() {
        let mut c = carver(6, 5);
        // Find out where the first seam will go, then claim only its
        // last cell in advance.
        let (path, _) = c.original().clone().find_vertical_seam().unwrap();
        c.original.mark_removed(path[4], 4, 9).unwrap();

        assert_eq!(
            c.remove_next_vertical_seam(0).unwrap_err(),
            CarveError::SeamCollision {
                col: path[4],
                row: 4,
                previous: 9
            }
        );
        let seam_zero = c
            .original()
            .pixels()
            .iter()
            .filter(|p| p.deleted_by_seam == Some(0))
            .count();
        assert_eq!(seam_zero, 0);
        assert_eq!(marked(&c), 1);
    }
}
