// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handles, node ids, and tuning parameters.

/// Generational handle for an item stored in a
/// [`QuadTree`](crate::QuadTree).
///
/// Returned by [`QuadTree::insert`](crate::QuadTree::insert) and
/// [`QuadTree::bulk_insert`](crate::QuadTree::bulk_insert), and used to
/// remove, relocate, and look up the item later in O(1). A key becomes
/// stale once its item is removed (or the tree is cleared); operations on
/// stale keys are no-ops and report failure rather than panicking.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ItemKey(pub(crate) u32, pub(crate) u32);

impl ItemKey {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Item keys are intentionally 32-bit; higher bits are truncated by design."
    )]
    pub(crate) const fn new(idx: usize, generation: u32) -> Self {
        Self(idx as u32, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Index of a node in the tree's arena. Internal; never handed to callers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct NodeId(pub(crate) u32);

impl NodeId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Node ids are intentionally 32-bit; higher bits are truncated by design."
    )]
    pub(crate) const fn new(idx: usize) -> Self {
        Self(idx as u32)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Behavioral toggles for a [`QuadTree`](crate::QuadTree).
///
/// Modeled as a plain struct of flags; the default configuration matches
/// the behavior described in the crate docs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Rebuild sparse subtrees during cleaning.
    ///
    /// When set, cleaning additionally flattens and bulk-reloads any node
    /// that still has children, at least one of them empty, and fewer than
    /// [`REBUILD_THRESHOLD`] items in its subtree. This trades extra work
    /// on the mutation path for tighter trees after heavy removal. Off by
    /// default.
    pub sparse_rebuild: bool,
}

/// Bucket size past which an insert subdivides a leaf.
///
/// Advisory: buckets can exceed this after relocations (only inserts
/// trigger subdivision) and on leaves too small to subdivide.
pub const BUCKET_CAP: usize = 10;

/// Upper bound on subtree size for the optional sparse rebuild
/// (see [`Config::sparse_rebuild`]).
pub const REBUILD_THRESHOLD: usize = 22;

/// Nodes with a smaller (or non-finite) area refuse to subdivide and grow
/// their bucket instead.
pub const MIN_SUBDIVIDE_AREA: f64 = 0.01;

/// Bulk loading stops partitioning below this many items and inserts the
/// remainder one by one.
pub const BULK_LEAF_CUTOFF: usize = 8;

/// Per-axis resolution of the Z-order quantisation used by bulk loading.
pub(crate) const MORTON_MAX: f64 = 0xFFFF as f64;
