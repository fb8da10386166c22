// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_quad_tree --heading-base-level=0

//! Understory Quad Tree: a Kurbo-native, mutable region quadtree.
//!
//! Understory Quad Tree is a reusable building block for spatial queries
//! over items that move: canvas editors, hit-testing layers, simulations.
//!
//! - Insert, relocate, and remove rectangle or point items with user
//!   payloads, addressed by stable generational keys.
//! - Query by rectangle (or by an arbitrary predicate for the inverse
//!   point flavour), eagerly into a reused buffer or lazily through an
//!   iterator that is cheap to abandon.
//! - Bulk-load large batches along a Z-order (Morton) curve for a
//!   balanced tree in one pass.
//!
//! Queries run in time proportional to what they return, not to what the
//! tree holds: subtrees wholly inside the query are emitted without
//! per-item tests, and subtrees outside it are pruned. Mutations keep the
//! tree compact on their own. Leaves split lazily when they overflow, and
//! removal coalesces emptied regions back upwards, so no separate
//! rebalancing step exists or is needed.
//!
//! # Example
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_quad_tree::RectQuadTree;
//!
//! let mut tree: RectQuadTree<u32> = RectQuadTree::new(Rect::new(0.0, 0.0, 100.0, 100.0));
//! let a = tree.insert(Rect::new(10.0, 10.0, 12.0, 12.0), 1);
//! let b = tree.insert(Rect::new(80.0, 80.0, 82.0, 82.0), 2);
//!
//! // Eager query into a caller-owned buffer.
//! let mut hits = Vec::new();
//! tree.query_into(&Rect::new(0.0, 0.0, 20.0, 20.0), &mut hits);
//! assert_eq!(hits, vec![(a, 1)]);
//!
//! // The item moved: update relocates it inside the tree.
//! tree.update(a, Rect::new(60.0, 60.0, 62.0, 62.0));
//! let moved: Vec<_> = tree.query(&Rect::new(50.0, 50.0, 100.0, 100.0)).collect();
//! assert_eq!(moved.len(), 2);
//!
//! assert!(tree.remove(b));
//! assert_eq!(tree.len(), 1);
//! ```
//!
//! ## Choosing a geometry
//!
//! The tree is generic over a [`Geometry`], which decides how items sit
//! in node rectangles and how queries prune:
//!
//! - [`RectQuadTree`] (items are [`kurbo::Rect`]): queries are rectangles
//!   and match by closed overlap. An item spanning a split line resides at
//!   the node above it, so membership stays exact without duplication.
//! - [`PointQuadTree`] (items are [`kurbo::Point`]): queries are
//!   rectangles and match by closed containment.
//! - [`InversePointQuadTree`] (items are points, queries are predicates):
//!   for "whose neighbourhood contains this?" questions where only the
//!   caller knows each item's reach. No pruning is possible, so every item
//!   is tested; prefer the other flavours whenever the query has a known
//!   extent. The predicate must be a `move` closure (or otherwise own its
//!   captures).
//!
//! Containment is closed on all edges: boundary items belong to the
//! region, and rectangles sharing only an edge still intersect.
//!
//! ## Points and predicates
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_quad_tree::{InversePointQuadTree, PointQuadTree};
//!
//! let mut tree: PointQuadTree<&str> = PointQuadTree::new(Rect::new(0.0, 0.0, 10.0, 10.0));
//! tree.extend([
//!     (Point::new(1.0, 1.0), "a"),
//!     (Point::new(5.0, 5.0), "b"),
//!     (Point::new(9.0, 9.0), "c"),
//! ]);
//! let mut found = Vec::new();
//! tree.query_with(&Rect::new(4.0, 4.0, 6.0, 6.0), |_, name| found.push(*name));
//! assert_eq!(found, vec!["b"]);
//!
//! let mut beacons: InversePointQuadTree<u8> =
//!     InversePointQuadTree::new(Rect::new(0.0, 0.0, 10.0, 10.0));
//! beacons.insert(Point::new(2.0, 2.0), 1);
//! beacons.insert(Point::new(8.0, 8.0), 2);
//! let origin = Point::ZERO;
//! let in_range = move |p: Point| p.distance(origin) < 5.0;
//! let heard: Vec<u8> = beacons.query(&in_range).map(|(_, id)| id).collect();
//! assert_eq!(heard, vec![1]);
//! ```
//!
//! ## Bulk loading
//!
//! Filling an empty tree item by item works, but a large batch builds a
//! better tree faster through [`QuadTree::bulk_insert`], which sorts the
//! batch along a Z-order curve and partitions it in one pass:
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_quad_tree::PointQuadTree;
//!
//! let mut tree: PointQuadTree<usize> = PointQuadTree::new(Rect::new(0.0, 0.0, 64.0, 64.0));
//! let batch: Vec<(Point, usize)> = (0..256)
//!     .map(|i| (Point::new((i % 16) as f64 * 4.0, (i / 16) as f64 * 4.0), i))
//!     .collect();
//! let keys = tree.bulk_insert(batch);
//! assert_eq!(tree.len(), 256);
//! assert!(tree.contains(keys[0]));
//! // The covering query emits whole subtrees without per-item tests.
//! assert_eq!(tree.query(&Rect::new(0.0, 0.0, 64.0, 64.0)).count(), 256);
//! ```
//!
//! ## API overview
//!
//! - [`QuadTree`]: the tree itself, generic over geometry and payload.
//! - [`RectQuadTree`] / [`PointQuadTree`] / [`InversePointQuadTree`]:
//!   aliases for the three shipped geometries.
//! - [`ItemKey`]: generational handle of an item; stale keys are soft
//!   no-ops, never errors.
//! - [`Config`]: behavioral toggles, currently the sparse-rebuild
//!   heuristic.
//!
//! Key operations:
//! - [`QuadTree::insert`] / [`QuadTree::extend`] / [`QuadTree::bulk_insert`]
//! - [`QuadTree::update`] (geometry changed) and [`QuadTree::remove`]
//! - [`QuadTree::query_into`] / [`QuadTree::query_with`] /
//!   [`QuadTree::query`] / [`QuadTree::for_each`]
//!
//! ## Behavior at the edges
//!
//! Inserts are total. Items whose geometry lies outside the tree's bounds
//! (or is degenerate, including NaN coordinates) are accepted, reside at
//! the root, and are tested on every query; nothing is silently dropped.
//! Nodes below a minimum area stop subdividing and simply grow their
//! buckets, so needle-thin or tiny bounds degrade to a scan instead of
//! recursing without progress.
//!
//! The tree is single-threaded: no operation blocks, suspends, or touches
//! anything but the tree itself. Shared read-only access is safe in the
//! usual Rust way (`&QuadTree` is `Sync` for `Sync` payloads); mutation
//! requires exclusive access, which the borrow checker enforces.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod bulk;
mod geometry;
mod iter;
mod tree;
mod types;

pub use geometry::{Geometry, InversePoints, Points, Rects};
pub use iter::Query;
pub use tree::QuadTree;
pub use types::{
    BUCKET_CAP, BULK_LEAF_CUTOFF, Config, ItemKey, MIN_SUBDIVIDE_AREA, REBUILD_THRESHOLD,
};

/// Region quadtree over rectangle items, queried by rectangle overlap.
pub type RectQuadTree<T> = QuadTree<Rects, T>;

/// Region quadtree over point items, queried by containing rectangle.
pub type PointQuadTree<T> = QuadTree<Points, T>;

/// Region quadtree over point items, queried by caller-supplied
/// predicates.
pub type InversePointQuadTree<T> = QuadTree<InversePoints, T>;
