// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-order (Morton) coding for bulk loading.
//!
//! Bulk loading sorts items by a 32-bit Z-order code: each item's
//! representative point is quantised to 16 bits per axis against the
//! batch's own bounding box, and the axis bits are interleaved. Sorting
//! by the code clusters spatially nearby items into contiguous runs,
//! which the partitioner then slices into quadrant-sized quarters.

use alloc::vec::Vec;

use kurbo::Point;

use crate::types::{ItemKey, MORTON_MAX};

/// Spread the 16 bits of `v` into the even bit positions of a `u32`.
fn spread(v: u16) -> u32 {
    let mut v = u32::from(v);
    v = (v | (v << 8)) & 0x00FF_00FF;
    v = (v | (v << 4)) & 0x0F0F_0F0F;
    v = (v | (v << 2)) & 0x3333_3333;
    v = (v | (v << 1)) & 0x5555_5555;
    v
}

/// Interleave two 16-bit axis values into a Z-order code. `y` takes the
/// odd bits, so ascending codes sweep the min-y half before the max-y
/// half, and the min-x quadrant before the max-x quadrant within each.
pub(crate) fn morton(x: u16, y: u16) -> u32 {
    spread(x) | (spread(y) << 1)
}

/// Quantise `v` into `0..=0xFFFF` within `[min, max]`. Degenerate extents
/// and non-finite inputs quantise to 0.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "The value is clamped into the u16 range before the cast."
)]
pub(crate) fn quantise(v: f64, min: f64, max: f64) -> u16 {
    let extent = max - min;
    if extent <= 0.0 || !extent.is_finite() {
        return 0;
    }
    let t = (v - min) / extent * MORTON_MAX;
    if t.is_finite() {
        t.clamp(0.0, MORTON_MAX) as u16
    } else {
        0
    }
}

/// Stable-sort entries by the Z-order code of their representative
/// points, quantised against the points' own bounding box.
pub(crate) fn zorder_sort(entries: &mut [(ItemKey, Point)]) {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for &(_, p) in entries.iter() {
        // f64::min and f64::max drop NaN operands, so non-finite points
        // leave the box untouched and later quantise to 0.
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    entries.sort_by_key(|&(_, p)| {
        morton(
            quantise(p.x, min_x, max_x),
            quantise(p.y, min_y, max_y),
        )
    });
}
