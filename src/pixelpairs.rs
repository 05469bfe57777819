// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of a pixel pair
//!
//! Given two pixels, the energy between them is the squared distance
//! between their colors in RGB space.  Alpha takes no part in it.

use crate::color::Color;
use std::iter::zip;

/// (Color, Color) -> squared gradient
///
/// Takes the channels (R,G,B) from two colors and maps the difference
/// between each channel, squares it, and then sums them all up:
///
/// ```text
/// |Δ|² = (Δr)²+(Δg)²+(Δb)²
/// ```
///
/// The largest possible answer is 3 * 255², which fits comfortably.
#[inline]
pub fn gradient_of_pair(c1: &Color, c2: &Color) -> u32 {
    zip(c1.rgb().iter(), c2.rgb().iter())
        .map(|(a, b)| {
            let d = i32::from(*a) - i32::from(*b);
            (d * d) as u32
        })
        .sum()
}
