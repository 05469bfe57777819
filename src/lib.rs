// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Content-aware image resizing by seam carving.
//!
//! Hand a `SeamCarver` an RGBA buffer and ask it for fewer columns and
//! rows; it takes out the connected one-pixel-wide paths that cross
//! the least detail, and remembers where each one was so it can be
//! drawn back over the original.

// #![deny(missing_docs)]

#[macro_use]
pub mod ternary;

pub mod color;
pub mod energy;
pub mod errors;
pub mod flipper;
pub mod grid;
pub mod mutator;
pub mod pixel;
pub mod pixelpairs;
pub mod seam;
pub mod seamcarver;
pub mod seamfinder;
pub mod twodmap;

pub use color::Color;
pub use errors::{CarveError, Result};
pub use grid::PixelGrid;
pub use pixel::Pixel;
pub use seam::{Orientation, Seam};
pub use seamcarver::SeamCarver;
pub use seamfinder::SeamFinder;
