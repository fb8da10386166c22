// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry policies: how items occupy node rectangles and how queries
//! prune the tree.
//!
//! The tree is generic over a [`Geometry`] so the same structural code
//! serves rectangle items, point items, and inverse point items without
//! dynamic dispatch. The predicates here sit in the innermost loops of
//! insertion and querying, so each policy is a unit struct and every
//! method monomorphises away.
//!
//! All predicates use closed comparisons: a point on a rectangle's edge is
//! inside it, and rectangles sharing an edge intersect. This differs from
//! [`kurbo::Rect::contains`], which is half-open, so the comparisons are
//! spelled out locally.

use core::fmt::Debug;

use kurbo::{Point, Rect};

/// Spatial behavior of an item kind stored in a
/// [`QuadTree`](crate::QuadTree).
pub trait Geometry {
    /// Per-item geometry stored alongside the payload.
    type Item: Copy + Debug;

    /// Query shape consumed by range queries.
    type Query: ?Sized;

    /// Whether `rect` wholly contains the item. Non-strict: an item
    /// touching the rectangle's edges still fits.
    fn fits_in(rect: &Rect, item: &Self::Item) -> bool;

    /// Whether the query wholly contains a node rectangle. When true, the
    /// traversal emits the node's entire subtree without per-item tests.
    fn query_contains(query: &Self::Query, rect: &Rect) -> bool;

    /// Whether the query overlaps a node rectangle at all. When false, the
    /// traversal prunes the subtree.
    fn query_intersects(query: &Self::Query, rect: &Rect) -> bool;

    /// Whether an individual item satisfies the query.
    fn query_matches(query: &Self::Query, item: &Self::Item) -> bool;

    /// Representative point used to order items along the Z-order curve
    /// during bulk loading.
    fn sort_point(item: &Self::Item) -> Point;
}

/// Rectangle items queried by rectangle overlap.
#[derive(Copy, Clone, Debug, Default)]
pub struct Rects;

/// Point items queried by containing rectangle.
#[derive(Copy, Clone, Debug, Default)]
pub struct Points;

/// Point items queried by a caller-supplied predicate.
///
/// The predicate is opaque to the tree, so no node-level pruning is
/// possible: range queries visit every node and test every item. This
/// variant exists for neighborhood queries ("items whose influence region
/// contains this point") where only the caller knows each item's extent.
#[derive(Copy, Clone, Debug, Default)]
pub struct InversePoints;

pub(crate) fn contains_rect(outer: &Rect, inner: &Rect) -> bool {
    outer.x0 <= inner.x0 && inner.x1 <= outer.x1 && outer.y0 <= inner.y0 && inner.y1 <= outer.y1
}

pub(crate) fn contains_point(rect: &Rect, p: Point) -> bool {
    rect.x0 <= p.x && p.x <= rect.x1 && rect.y0 <= p.y && p.y <= rect.y1
}

pub(crate) fn intersects(a: &Rect, b: &Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

impl Geometry for Rects {
    type Item = Rect;
    type Query = Rect;

    #[inline]
    fn fits_in(rect: &Rect, item: &Rect) -> bool {
        contains_rect(rect, item)
    }

    #[inline]
    fn query_contains(query: &Rect, rect: &Rect) -> bool {
        contains_rect(query, rect)
    }

    #[inline]
    fn query_intersects(query: &Rect, rect: &Rect) -> bool {
        intersects(query, rect)
    }

    #[inline]
    fn query_matches(query: &Rect, item: &Rect) -> bool {
        intersects(query, item)
    }

    #[inline]
    fn sort_point(item: &Rect) -> Point {
        item.center()
    }
}

impl Geometry for Points {
    type Item = Point;
    type Query = Rect;

    #[inline]
    fn fits_in(rect: &Rect, item: &Point) -> bool {
        contains_point(rect, *item)
    }

    #[inline]
    fn query_contains(query: &Rect, rect: &Rect) -> bool {
        contains_rect(query, rect)
    }

    #[inline]
    fn query_intersects(query: &Rect, rect: &Rect) -> bool {
        intersects(query, rect)
    }

    #[inline]
    fn query_matches(query: &Rect, item: &Point) -> bool {
        contains_point(query, *item)
    }

    #[inline]
    fn sort_point(item: &Point) -> Point {
        *item
    }
}

impl Geometry for InversePoints {
    type Item = Point;
    type Query = dyn Fn(Point) -> bool;

    #[inline]
    fn fits_in(rect: &Rect, item: &Point) -> bool {
        contains_point(rect, *item)
    }

    /// The predicate is opaque, so a node rectangle is never known to be
    /// fully matched; hoisting would over-report.
    #[inline]
    fn query_contains(_query: &Self::Query, _rect: &Rect) -> bool {
        false
    }

    /// Conversely, no node can be pruned: every item must be tested for
    /// the query to be sound.
    #[inline]
    fn query_intersects(_query: &Self::Query, _rect: &Rect) -> bool {
        true
    }

    #[inline]
    fn query_matches(query: &Self::Query, item: &Point) -> bool {
        query(*item)
    }

    #[inline]
    fn sort_point(item: &Point) -> Point {
        *item
    }
}
