// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// My ternary expression handler.  Rust's ifs are already expressions,
/// but `cargo fmt` breaks them up line-by-line, and the edge cases of
/// seam carving (first column, last row, a grid one pixel wide) read
/// much better as a table of one-liners.
#[macro_export]
macro_rules! cq {
    ($condition: expr, $_true: expr, $_false: expr) => {
        if $condition {
            $_true
        } else {
            $_false
        }
    };
}
