// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A single RGBA color, as read out of the caller's buffer.

use std::fmt;

/// Four 8-bit channels.  Once read from the source buffer a color is
/// never changed; removing a seam moves colors around, it doesn't
/// edit them.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    /// The color seams are painted with in the overlay pictures.
    pub const SEAM: Color = Color::new(255, 0, 0, 255);

    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Color {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Read a color from an RGBA quad.  Anything past the fourth byte
    /// is ignored; the caller is responsible for the stride.
    pub fn from_slice(quad: &[u8]) -> Self {
        Color::new(quad[0], quad[1], quad[2], quad[3])
    }

    /// The three channels that contribute to energy.  Alpha never does.
    pub fn rgb(&self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }

    pub fn to_rgba(self) -> [u8; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }
}

impl From<[u8; 4]> for Color {
    fn from(q: [u8; 4]) -> Self {
        Color::new(q[0], q[1], q[2], q[3])
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "rgba = ({}, {}, {}, {})",
            self.red, self.green, self.blue, self.alpha
        )
    }
}
