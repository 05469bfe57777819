// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that can go wrong while carving.
//!
//! There are three families here.  Bad input (a buffer of the wrong
//! size, a seam that doesn't fit the grid) is the caller's problem and
//! is reported straight back.  A mismatched overlay is a programming
//! error at the call site.  And then there are the ones that mean the
//! engine itself is broken: a seam of the wrong length, a grid whose
//! pixel count no longer matches its dimensions.  Those are fatal; the
//! carver throws its working grid away when it sees one.

use failure::Fail;

#[derive(Debug, Clone, PartialEq, Eq, Fail)]
pub enum CarveError {
    #[fail(
        display = "buffer holds {} bytes, but a {}x{} RGBA image needs {}",
        actual, width, height, expected
    )]
    InvalidBufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[fail(display = "image dimensions must be positive, got {}x{}", width, height)]
    InvalidDimensions { width: u32, height: u32 },

    #[fail(
        display = "seam coordinate {} at position {} is outside 0..{}",
        coordinate, position, limit
    )]
    SeamOutOfBounds {
        position: usize,
        coordinate: u32,
        limit: u32,
    },

    #[fail(
        display = "seam jumps from {} to {} at position {}",
        from, to, position
    )]
    DisconnectedSeam { position: usize, from: u32, to: u32 },

    #[fail(display = "seam path has {} entries, expected {}", actual, expected)]
    CorruptSeam { expected: usize, actual: usize },

    #[fail(
        display = "grid claims {} pixels but holds {} records and {} bytes",
        expected, records, bytes
    )]
    PixelCountDrift {
        expected: usize,
        records: usize,
        bytes: usize,
    },

    #[fail(
        display = "original pixel ({}, {}) was already removed by seam {}",
        col, row, previous
    )]
    SeamCollision { col: u32, row: u32, previous: u32 },

    #[fail(
        display = "overlay must be {}x{} to match the original, got {}x{}",
        expected_width, expected_height, width, height
    )]
    DimensionMismatch {
        expected_width: u32,
        expected_height: u32,
        width: u32,
        height: u32,
    },

    #[fail(display = "the carving session was aborted; begin a new session")]
    SessionAborted,
}

impl CarveError {
    /// True for the errors that mean the engine has corrupted its own
    /// state.  A session that sees one of these must not continue.
    pub fn is_fatal(&self) -> bool {
        match self {
            CarveError::CorruptSeam { .. }
            | CarveError::PixelCountDrift { .. }
            | CarveError::SeamCollision { .. } => true,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, CarveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_invariant_violations_are_fatal() {
        assert!(CarveError::CorruptSeam {
            expected: 4,
            actual: 3
        }
        .is_fatal());
        assert!(CarveError::PixelCountDrift {
            expected: 4,
            records: 3,
            bytes: 16
        }
        .is_fatal());
        assert!(!CarveError::InvalidDimensions {
            width: 0,
            height: 2
        }
        .is_fatal());
        assert!(!CarveError::SessionAborted.is_fatal());
    }

    #[test]
    fn messages_name_the_numbers() {
        let e = CarveError::InvalidBufferSize {
            width: 2,
            height: 2,
            expected: 16,
            actual: 15,
        };
        assert_eq!(
            e.to_string(),
            "buffer holds 15 bytes, but a 2x2 RGBA image needs 16"
        );
    }
}
