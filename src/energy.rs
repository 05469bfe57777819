// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of an image
//!
//! The energy of a pixel is the magnitude of the color gradient across
//! it, measured between its left and right neighbors and between the
//! ones above and below it:
//!
//! ```text
//!   |Δx|² = (Δrx)²+(Δgx)²+(Δbx)²
//!   |Δy|² = (Δry)²+(Δgy)²+(Δby)²
//!  e(x,y) = √(|Δx|²+|Δy|²)
//! ```
//!
//! Pixels on the outer border don't have all four neighbors.  Rather
//! than invent some, they get a fixed, deliberately large energy, which
//! keeps seams from hugging the edge of the picture unless there's
//! nowhere else for them to go.

use crate::pixel::Pixel;
use crate::pixelpairs::gradient_of_pair;
use crate::twodmap::TwoDimensionalMap;

/// The energy of every pixel on the outer border.
pub const BORDER_ENERGY: f64 = 1000.0;

#[inline]
pub fn is_border(x: u32, y: u32, width: u32, height: u32) -> bool {
    x == 0 || y == 0 || x + 1 >= width || y + 1 >= height
}

/// Compute the energy of the pixel at `(x, y)` from the colors of its
/// four neighbors.  The neighbors' energies don't matter, only that
/// their colors are where they belong.
pub fn energy_of(map: &TwoDimensionalMap<Pixel>, x: u32, y: u32) -> f64 {
    let (width, height) = map.dimensions();
    if is_border(x, y, width, height) {
        return BORDER_ENERGY;
    }
    let dx = gradient_of_pair(&map[(x - 1, y)].color, &map[(x + 1, y)].color);
    let dy = gradient_of_pair(&map[(x, y - 1)].color, &map[(x, y + 1)].color);
    f64::from(dx + dy).sqrt()
}

/// Fill in the energy of every pixel in the map.
pub fn calculate_energy(map: &mut TwoDimensionalMap<Pixel>) {
    let (width, height) = map.dimensions();
    for y in 0..height {
        for x in 0..width {
            let energy = energy_of(map, x, y);
            map[(x, y)].energy = energy;
        }
    }
}

// Energies are floats, channels are bytes.  Anything that doesn't
// survive the cast (it can't, short of a NaN) is drawn white.
fn to_channel(energy: f64, scale: f64) -> u8 {
    num_traits::cast::<f64, u8>((energy / scale * 255.0).floor()).unwrap_or(std::u8::MAX)
}

/// Render the energy map as an opaque greyscale RGBA buffer.
///
/// Interior pixels are normalized against the brightest interior pixel;
/// the border sentinel is left out of that maximum, or it would wash
/// out all the real contrast.  Border pixels are drawn on the fixed
/// scale of the sentinel itself.  A map with no interior energy at all
/// is drawn black.
pub fn energy_to_picture(map: &TwoDimensionalMap<Pixel>) -> Vec<u8> {
    let (width, height) = map.dimensions();
    let max_energy = map
        .iter()
        .filter(|p| !is_border(p.col, p.row, width, height))
        .map(|p| p.energy)
        .fold(0.0, f64::max);

    let mut picture = Vec::with_capacity(map.len() * 4);
    for p in map.iter() {
        let grey = if max_energy == 0.0 {
            0
        } else {
            cq!(
                is_border(p.col, p.row, width, height),
                to_channel(p.energy, BORDER_ENERGY),
                to_channel(p.energy, max_energy)
            )
        };
        picture.extend_from_slice(&[grey, grey, grey, 255]);
    }
    picture
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn map_of(width: u32, height: u32, colors: &[Color]) -> TwoDimensionalMap<Pixel> {
        let cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| Pixel::new(x, y, colors[(y * width + x) as usize]))
            .collect();
        let mut map = TwoDimensionalMap::from_vec(width, height, cells).unwrap();
        calculate_energy(&mut map);
        map
    }

    fn grey(v: u8) -> Color {
        Color::new(v, v, v, 255)
    }

    #[test]
    fn border_is_the_sentinel() {
        let map = map_of(3, 3, &[grey(7); 9]);
        for y in 0..3 {
            for x in 0..3 {
                let expected = cq!(x == 1 && y == 1, 0.0, BORDER_ENERGY);
                assert_eq!(map[(x, y)].energy, expected);
            }
        }
    }

    #[test]
    fn interior_is_the_gradient_magnitude() {
        // Only the left/right pair differ, by 3 in each channel:
        // sqrt(3 * 9) = sqrt(27).
        let mut colors = [grey(10); 9];
        colors[3] = grey(7);
        colors[5] = grey(10);
        let map = map_of(3, 3, &colors);
        assert!((map[(1, 1)].energy - 27f64.sqrt()).abs() < 1e-9);

        // And one vertical pair on top of it, by 4 in red only.
        colors[1] = Color::new(14, 10, 10, 255);
        let map = map_of(3, 3, &colors);
        assert!((map[(1, 1)].energy - 43f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn alpha_does_not_add_energy() {
        let mut colors = [grey(50); 9];
        colors[3] = Color::new(50, 50, 50, 0);
        let map = map_of(3, 3, &colors);
        assert_eq!(map[(1, 1)].energy, 0.0);
    }

    #[test]
    fn flat_images_draw_black() {
        let map = map_of(4, 4, &[grey(90); 16]);
        let picture = energy_to_picture(&map);
        assert_eq!(picture.len(), 64);
        assert!(picture.chunks(4).all(|q| q == [0, 0, 0, 255]));
    }

    #[test]
    fn interior_is_normalized_and_border_is_not() {
        let mut colors = [grey(0); 16];
        colors[5] = grey(255);
        let map = map_of(4, 4, &colors);
        let picture = energy_to_picture(&map);
        let channel = |x: usize, y: usize| picture[(y * 4 + x) * 4];

        // Border: 1000 / 1000 * 255.
        assert_eq!(channel(0, 0), 255);
        // (1, 1) is white, but its neighbors are all black; (2, 1) and
        // (1, 2) each see one white neighbor, so they share the
        // brightest interior energy.
        assert_eq!(channel(1, 1), 0);
        assert_eq!(channel(2, 1), 255);
        assert_eq!(channel(1, 2), 255);
        assert_eq!(channel(2, 2), 0);
    }
}
