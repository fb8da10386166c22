// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: arenas, structural operations, queries.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::mem;

use kurbo::{Point, Rect};

use crate::bulk;
use crate::geometry::Geometry;
use crate::types::{
    BUCKET_CAP, BULK_LEAF_CUTOFF, Config, ItemKey, MIN_SUBDIVIDE_AREA, NodeId, REBUILD_THRESHOLD,
};

/// A node of the region tree.
///
/// The rectangle is fixed at construction. Children are either absent or
/// exactly four, stored TL, TR, BL, BR (y-down naming; the structure is
/// orientation-agnostic). The bucket holds the keys of items residing at
/// this node: items that fit no single child, plus everything on a leaf.
#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) rect: Rect,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Option<[NodeId; 4]>,
    pub(crate) bucket: Vec<ItemKey>,
}

impl Node {
    fn leaf(rect: Rect, parent: Option<NodeId>) -> Self {
        Self {
            rect,
            parent,
            children: None,
            bucket: Vec::new(),
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Slot<I, T> {
    pub(crate) generation: u32,
    pub(crate) item: I,
    pub(crate) payload: T,
    pub(crate) owner: NodeId,
}

/// A mutable region quadtree over items of geometry `G`, carrying `Copy`
/// payloads of type `T`.
///
/// See the crate docs for an overview and examples.
pub struct QuadTree<G: Geometry, T: Copy + Debug> {
    pub(crate) root: NodeId,
    nodes: Vec<Option<Node>>,
    node_free: Vec<usize>,
    items: Vec<Option<Slot<G::Item, T>>>,
    item_generations: Vec<u32>, // last generation per slot (persists across frees)
    item_free: Vec<usize>,
    len: usize,
    config: Config,
}

impl<G: Geometry, T: Copy + Debug> core::fmt::Debug for QuadTree<G, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("QuadTree")
            .field("bounds", &self.bounds())
            .field("len", &self.len)
            .field("nodes_alive", &alive)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<G: Geometry, T: Copy + Debug> QuadTree<G, T> {
    /// Create an empty tree covering `bounds`.
    ///
    /// The bounds never change afterwards. Items outside the bounds are
    /// still accepted; they reside at the root and are tested on every
    /// query.
    pub fn new(bounds: Rect) -> Self {
        Self::with_config(bounds, Config::default())
    }

    /// Create an empty tree covering `bounds` with explicit [`Config`].
    pub fn with_config(bounds: Rect, config: Config) -> Self {
        Self {
            root: NodeId::new(0),
            nodes: vec![Some(Node::leaf(bounds, None))],
            node_free: Vec::new(),
            items: Vec::new(),
            item_generations: Vec::new(),
            item_free: Vec::new(),
            len: 0,
            config,
        }
    }

    /// The rectangle covered by the root node.
    pub fn bounds(&self) -> Rect {
        self.node(self.root).rect
    }

    /// The configuration this tree was built with.
    pub fn config(&self) -> Config {
        self.config
    }

    /// Number of live items.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no items.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether `key` refers to a live item.
    pub fn contains(&self, key: ItemKey) -> bool {
        self.slot_opt(key).is_some()
    }

    /// The payload of a live item.
    pub fn get(&self, key: ItemKey) -> Option<&T> {
        self.slot_opt(key).map(|s| &s.payload)
    }

    /// Mutable access to the payload of a live item.
    ///
    /// Payload mutation never moves the item; use [`Self::update`] when
    /// its geometry changes.
    pub fn get_mut(&mut self, key: ItemKey) -> Option<&mut T> {
        self.slot_opt_mut(key).map(|s| &mut s.payload)
    }

    /// The current geometry of a live item.
    pub fn geometry(&self, key: ItemKey) -> Option<G::Item> {
        self.slot_opt(key).map(|s| s.item)
    }

    /// Insert an item, returning its key.
    ///
    /// Insertion is total: degenerate or out-of-bounds geometry is
    /// accepted and kept at the root.
    pub fn insert(&mut self, item: G::Item, payload: T) -> ItemKey {
        let key = self.alloc_item(item, payload);
        self.len += 1;
        self.node_insert(self.root, key);
        key
    }

    /// Insert every `(item, payload)` pair in order.
    ///
    /// Equivalent to repeated [`Self::insert`]. For filling an empty tree
    /// with a large batch, prefer [`Self::bulk_insert`].
    pub fn extend<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = (G::Item, T)>,
    {
        for (item, payload) in items {
            self.insert(item, payload);
        }
    }

    /// Bulk-load a batch, returning the keys in input order.
    ///
    /// Items are sorted along a Z-order (Morton) curve of their
    /// representative points and partitioned into a balanced tree in one
    /// pass, which is substantially cheaper than repeated [`Self::insert`]
    /// for large batches and clusters nearby items in nearby leaves.
    /// Queries answer identically either way; only the internal shape
    /// differs.
    ///
    /// # Panics
    ///
    /// Panics if the tree has already subdivided. Call it on a fresh (or
    /// just-cleared) tree.
    pub fn bulk_insert(&mut self, items: Vec<(G::Item, T)>) -> Vec<ItemKey> {
        assert!(
            self.node(self.root).children.is_none(),
            "bulk_insert requires an unsubdivided tree"
        );
        let mut keys = Vec::with_capacity(items.len());
        for (item, payload) in items {
            let key = self.alloc_item(item, payload);
            self.len += 1;
            keys.push(key);
        }
        self.bulk_load_keys(self.root, &keys);
        keys
    }

    /// Remove an item. Returns false if `key` is stale.
    pub fn remove(&mut self, key: ItemKey) -> bool {
        let Some(slot) = self.slot_opt(key) else {
            return false;
        };
        let owner = slot.owner;
        self.node_delete(owner, key, true);
        self.items[key.idx()] = None;
        self.item_free.push(key.idx());
        self.len -= 1;
        true
    }

    /// Replace an item's geometry and migrate it to its new owning node.
    /// Returns false if `key` is stale.
    pub fn update(&mut self, key: ItemKey, item: G::Item) -> bool {
        let Some(slot) = self.slot_opt_mut(key) else {
            return false;
        };
        slot.item = item;
        let owner = slot.owner;
        self.relocate(owner, key);
        true
    }

    /// Drop every item and every node below the root. The bounds and any
    /// configuration survive; keys from before the clear stay stale.
    pub fn clear(&mut self) {
        let bounds = self.bounds();
        self.nodes.clear();
        self.node_free.clear();
        self.nodes.push(Some(Node::leaf(bounds, None)));
        self.root = NodeId::new(0);
        self.items.clear();
        self.item_free.clear();
        self.len = 0;
    }

    /// Call `put` for every item matching the query.
    pub fn query_with<F>(&self, query: &G::Query, mut put: F)
    where
        F: FnMut(ItemKey, &T),
    {
        let root = self.node(self.root);
        // The root bucket can hold items lying outside the root rectangle
        // (inserts are total), so it is always tested item by item.
        for &key in &root.bucket {
            let slot = self.slot(key);
            if G::query_matches(query, &slot.item) {
                put(key, &slot.payload);
            }
        }
        if let Some(children) = root.children {
            if G::query_contains(query, &root.rect) {
                for c in children {
                    self.emit_subtree(c, &mut put);
                }
            } else if G::query_intersects(query, &root.rect) {
                for c in children {
                    self.query_node(c, query, &mut put);
                }
            }
        }
    }

    /// Append every matching `(key, payload)` pair to `out`.
    ///
    /// The buffer is the caller's to reuse; nothing else is allocated per
    /// hit.
    pub fn query_into(&self, query: &G::Query, out: &mut Vec<(ItemKey, T)>) {
        self.query_with(query, |key, payload| out.push((key, *payload)));
    }

    /// Call `put` for every item exactly once, in a deterministic order.
    pub fn for_each<F>(&self, mut put: F)
    where
        F: FnMut(ItemKey, &T),
    {
        self.emit_subtree(self.root, &mut put);
    }

    // --- arena internals ---

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn alloc_node(&mut self, node: Node) -> NodeId {
        if let Some(idx) = self.node_free.pop() {
            self.nodes[idx] = Some(node);
            NodeId::new(idx)
        } else {
            self.nodes.push(Some(node));
            NodeId::new(self.nodes.len() - 1)
        }
    }

    fn free_node(&mut self, id: NodeId) {
        self.nodes[id.idx()] = None;
        self.node_free.push(id.idx());
    }

    pub(crate) fn slot(&self, key: ItemKey) -> &Slot<G::Item, T> {
        self.items[key.idx()].as_ref().expect("dangling ItemKey")
    }

    fn slot_mut(&mut self, key: ItemKey) -> &mut Slot<G::Item, T> {
        self.items[key.idx()].as_mut().expect("dangling ItemKey")
    }

    fn slot_opt(&self, key: ItemKey) -> Option<&Slot<G::Item, T>> {
        let s = self.items.get(key.idx())?.as_ref()?;
        if s.generation != key.1 {
            return None;
        }
        Some(s)
    }

    fn slot_opt_mut(&mut self, key: ItemKey) -> Option<&mut Slot<G::Item, T>> {
        let s = self.items.get_mut(key.idx())?.as_mut()?;
        if s.generation != key.1 {
            return None;
        }
        Some(s)
    }

    fn alloc_item(&mut self, item: G::Item, payload: T) -> ItemKey {
        let idx = if let Some(idx) = self.item_free.pop() {
            idx
        } else {
            self.items.push(None);
            self.items.len() - 1
        };
        if self.item_generations.len() <= idx {
            self.item_generations.resize(idx + 1, 0);
        }
        let generation = self.item_generations[idx].saturating_add(1);
        self.item_generations[idx] = generation;
        self.items[idx] = Some(Slot {
            generation,
            item,
            payload,
            owner: self.root,
        });
        ItemKey::new(idx, generation)
    }

    // --- structural operations ---

    fn place(&mut self, id: NodeId, key: ItemKey) {
        self.node_mut(id).bucket.push(key);
        self.slot_mut(key).owner = id;
    }

    /// Insert `key` starting at `start`, settling it in the deepest node
    /// whose rectangle wholly contains its geometry.
    fn node_insert(&mut self, start: NodeId, key: ItemKey) {
        let item = self.slot(key).item;
        let mut id = start;
        // Climb while the item does not fit; the root accepts anything.
        loop {
            if G::fits_in(&self.node(id).rect, &item) {
                break;
            }
            match self.node(id).parent {
                Some(p) => id = p,
                None => {
                    self.place(id, key);
                    return;
                }
            }
        }
        loop {
            if self.node(id).children.is_none() {
                if self.node(id).bucket.len() < BUCKET_CAP || !self.try_subdivide(id) {
                    // Under capacity, or too small to split: the bucket
                    // simply grows.
                    self.place(id, key);
                    return;
                }
            }
            let dest = self.destination_for(id, &item);
            if dest == id {
                // Straddles the split point; resides here.
                self.place(id, key);
                return;
            }
            id = dest;
        }
    }

    /// The unique child wholly containing `item`, or `id` itself.
    fn destination_for(&self, id: NodeId, item: &G::Item) -> NodeId {
        if let Some(children) = self.node(id).children {
            for c in children {
                if G::fits_in(&self.node(c).rect, item) {
                    return c;
                }
            }
        }
        id
    }

    /// Subdivide at the midpoint unless the node is too small (or its
    /// extent is non-finite), in which case it stays an oversize leaf.
    fn try_subdivide(&mut self, id: NodeId) -> bool {
        let rect = self.node(id).rect;
        let area = rect.width() * rect.height();
        if !area.is_finite() || area < MIN_SUBDIVIDE_AREA {
            return false;
        }
        self.subdivide_at(id, rect.center());
        true
    }

    /// Create four children sharing `split` and push each resident into
    /// the child that accepts it. Straddlers stay behind.
    fn subdivide_at(&mut self, id: NodeId, split: Point) -> [NodeId; 4] {
        let rect = self.node(id).rect;
        let rects = [
            Rect::new(rect.x0, rect.y0, split.x, split.y),
            Rect::new(split.x, rect.y0, rect.x1, split.y),
            Rect::new(rect.x0, split.y, split.x, rect.y1),
            Rect::new(split.x, split.y, rect.x1, rect.y1),
        ];
        let children = rects.map(|r| self.alloc_node(Node::leaf(r, Some(id))));
        self.node_mut(id).children = Some(children);
        let residents = mem::take(&mut self.node_mut(id).bucket);
        for key in residents {
            let item = self.slot(key).item;
            let dest = self.destination_for(id, &item);
            if dest == id {
                self.node_mut(id).bucket.push(key);
            } else {
                self.place(dest, key);
            }
        }
        children
    }

    /// Detach `key` from its owner's bucket. Items live only at their
    /// owner, so calls at any other node forward there.
    fn node_delete(&mut self, id: NodeId, key: ItemKey, clean: bool) {
        let owner = self.slot(key).owner;
        if owner != id {
            return self.node_delete(owner, key, clean);
        }
        let bucket = &mut self.node_mut(id).bucket;
        if let Some(pos) = bucket.iter().position(|k| *k == key) {
            bucket.swap_remove(pos);
        }
        if clean {
            self.clean_upwards(id);
        }
    }

    /// Migrate `key` after its geometry changed, starting from `id` (its
    /// owner, or an ancestor when forwarding upwards).
    fn relocate(&mut self, id: NodeId, key: ItemKey) {
        let item = self.slot(key).item;
        if !G::fits_in(&self.node(id).rect, &item) {
            if let Some(p) = self.node(id).parent {
                return self.relocate(p, key);
            }
            // Geometry left the bounds entirely: the root owns it now, so
            // every query still tests it.
            let owner = self.slot(key).owner;
            if owner != id {
                self.node_delete(owner, key, false);
                self.place(id, key);
                self.clean_upwards(owner);
            }
            return;
        }
        if self.node(id).children.is_some() {
            let dest = self.destination_for(id, &item);
            let owner = self.slot(key).owner;
            if dest != owner {
                // The former owner is captured before the detach, and
                // cleaned only after the re-insert: cleaning first could
                // collapse the very subtree chosen as the destination.
                self.node_delete(owner, key, false);
                self.node_insert(dest, key);
                self.clean_upwards(owner);
            }
        }
        // A leaf whose item still fits has nothing to do.
    }

    fn node_is_empty(&self, id: NodeId) -> bool {
        let n = self.node(id);
        n.bucket.is_empty() && n.children.is_none()
    }

    /// Coalesce this node: drop four empty children, or hoist a single
    /// surviving child's contents up one level.
    fn clean_this(&mut self, id: NodeId) {
        if let Some(children) = self.node(id).children {
            let empty = children.map(|c| self.node_is_empty(c));
            let empty_count = empty.iter().filter(|e| **e).count();
            if empty_count == 4 {
                for c in children {
                    self.free_node(c);
                }
                self.node_mut(id).children = None;
            } else if empty_count == 3 {
                let keep_at = empty.iter().position(|e| !*e).expect("one non-empty child");
                self.hoist_child(id, children[keep_at]);
                for c in children {
                    self.free_node(c);
                }
            }
        }
        if self.config.sparse_rebuild {
            self.maybe_rebuild_sparse(id);
        }
    }

    /// Lift `keep`'s contents into `id`: adopt its children, and either
    /// adopt its bucket wholesale (when `id` holds nothing) or re-insert
    /// its items one by one.
    fn hoist_child(&mut self, id: NodeId, keep: NodeId) {
        let grand = self.node_mut(keep).children.take();
        self.node_mut(id).children = grand;
        if let Some(gs) = grand {
            for g in gs {
                self.node_mut(g).parent = Some(id);
            }
        }
        let moved = mem::take(&mut self.node_mut(keep).bucket);
        if self.node(id).bucket.is_empty() {
            for &key in &moved {
                self.slot_mut(key).owner = id;
            }
            self.node_mut(id).bucket = moved;
        } else {
            for key in moved {
                self.node_insert(id, key);
            }
        }
    }

    /// Clean `start`, then keep cleaning upwards while nodes come out
    /// empty. Bounded by tree depth.
    fn clean_upwards(&mut self, start: NodeId) {
        let mut id = start;
        loop {
            self.clean_this(id);
            let n = self.node(id);
            if !(n.bucket.is_empty() && n.children.is_none()) {
                break;
            }
            match n.parent {
                Some(p) => id = p,
                None => break,
            }
        }
    }

    fn subtree_len(&self, id: NodeId) -> usize {
        let n = self.node(id);
        let mut count = n.bucket.len();
        if let Some(children) = n.children {
            for c in children {
                count += self.subtree_len(c);
            }
        }
        count
    }

    /// Optional cleaning step: flatten and bulk-reload a subtree that
    /// kept its children but went sparse. See [`Config::sparse_rebuild`].
    fn maybe_rebuild_sparse(&mut self, id: NodeId) {
        let Some(children) = self.node(id).children else {
            return;
        };
        if !children.iter().any(|&c| self.node_is_empty(c)) {
            return;
        }
        if self.subtree_len(id) >= REBUILD_THRESHOLD {
            return;
        }
        let mut keys = Vec::new();
        self.flatten_subtree(id, &mut keys);
        self.bulk_load_keys(id, &keys);
    }

    /// Detach every item below `id` into `keys` and free every descendant
    /// node, leaving `id` an empty leaf.
    fn flatten_subtree(&mut self, id: NodeId, keys: &mut Vec<ItemKey>) {
        let node = self.node_mut(id);
        keys.append(&mut node.bucket);
        let children = node.children.take();
        if let Some(cs) = children {
            for c in cs {
                self.flatten_subtree(c, keys);
                self.free_node(c);
            }
        }
    }

    fn bulk_load_keys(&mut self, id: NodeId, keys: &[ItemKey]) {
        let mut entries: Vec<(ItemKey, Point)> = keys
            .iter()
            .map(|&key| (key, G::sort_point(&self.slot(key).item)))
            .collect();
        bulk::zorder_sort(&mut entries);
        self.bulk_partition(id, &mut entries);
    }

    /// Recursive bulk partition: split the Z-ordered run into four
    /// contiguous quarters and push each into the matching quadrant,
    /// subdividing at the median item's representative point when it is
    /// strictly interior (the geometric midpoint otherwise). Small runs
    /// and tiny nodes fall back to per-item insertion, which also mops up
    /// any item the chosen quadrant cannot actually contain.
    fn bulk_partition(&mut self, id: NodeId, entries: &mut [(ItemKey, Point)]) {
        let rect = self.node(id).rect;
        let area = rect.width() * rect.height();
        if entries.len() <= BULK_LEAF_CUTOFF || !area.is_finite() || area < MIN_SUBDIVIDE_AREA {
            for &(key, _) in entries.iter() {
                self.node_insert(id, key);
            }
            return;
        }
        let candidate = entries[entries.len() / 2].1;
        let interior = rect.x0 < candidate.x
            && candidate.x < rect.x1
            && rect.y0 < candidate.y
            && candidate.y < rect.y1;
        let split = if interior { candidate } else { rect.center() };
        let children = self.subdivide_at(id, split);
        let n = entries.len();
        let (a, rest) = entries.split_at_mut(n / 4);
        let (b, rest) = rest.split_at_mut(n / 2 - n / 4);
        let (c, d) = rest.split_at_mut(n * 3 / 4 - n / 2);
        for (child, quarter) in children.into_iter().zip([a, b, c, d]) {
            self.bulk_partition(child, quarter);
        }
    }

    // --- query internals ---

    fn emit_subtree<F>(&self, id: NodeId, put: &mut F)
    where
        F: FnMut(ItemKey, &T),
    {
        let n = self.node(id);
        for &key in &n.bucket {
            let slot = self.slot(key);
            put(key, &slot.payload);
        }
        if let Some(children) = n.children {
            for c in children {
                self.emit_subtree(c, put);
            }
        }
    }

    fn query_node<F>(&self, id: NodeId, query: &G::Query, put: &mut F)
    where
        F: FnMut(ItemKey, &T),
    {
        let n = self.node(id);
        if G::query_contains(query, &n.rect) {
            // The whole subtree lies inside the query; no per-item tests.
            self.emit_subtree(id, put);
        } else if G::query_intersects(query, &n.rect) {
            for &key in &n.bucket {
                let slot = self.slot(key);
                if G::query_matches(query, &slot.item) {
                    put(key, &slot.payload);
                }
            }
            if let Some(children) = n.children {
                for c in children {
                    self.query_node(c, query, put);
                }
            }
        }
    }
}

#[cfg(test)]
impl<G: Geometry, T: Copy + Debug> QuadTree<G, T> {
    pub(crate) fn alive_node_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub(crate) fn root_is_leaf(&self) -> bool {
        self.node(self.root).children.is_none()
    }

    pub(crate) fn owner_rect(&self, key: ItemKey) -> Rect {
        self.node(self.slot(key).owner).rect
    }

    pub(crate) fn owner_is_root(&self, key: ItemKey) -> bool {
        self.slot(key).owner == self.root
    }

    /// Structural walk asserting every documented invariant. Test-only.
    pub(crate) fn check_invariants(&self) {
        use alloc::collections::BTreeSet;
        let mut seen: BTreeSet<(u32, u32)> = BTreeSet::new();
        let mut total = 0usize;
        self.check_node(self.root, None, &mut seen, &mut total);
        assert_eq!(total, self.len, "bucket totals must match len");
        let live = self.items.iter().filter(|s| s.is_some()).count();
        assert_eq!(live, self.len, "live slots must match len");
        for (idx, slot) in self.items.iter().enumerate() {
            if let Some(s) = slot {
                let key = ItemKey::new(idx, s.generation);
                assert!(
                    seen.contains(&(key.0, key.1)),
                    "live item {idx} unreachable from the root"
                );
            }
        }
    }

    fn check_node(
        &self,
        id: NodeId,
        parent: Option<NodeId>,
        seen: &mut alloc::collections::BTreeSet<(u32, u32)>,
        total: &mut usize,
    ) {
        let n = self.node(id);
        assert_eq!(n.parent, parent, "parent link mismatch");
        if let Some(p) = parent {
            assert!(
                crate::geometry::contains_rect(&self.node(p).rect, &n.rect),
                "child rect escapes its parent"
            );
        }
        for &key in &n.bucket {
            let slot = self.slot(key);
            assert_eq!(slot.owner, id, "owner back-pointer mismatch");
            assert!(seen.insert((key.0, key.1)), "item appears in two buckets");
            *total += 1;
            if parent.is_some() {
                assert!(
                    G::fits_in(&n.rect, &slot.item),
                    "non-root resident must fit its node"
                );
            }
            if let Some(children) = n.children {
                for c in children {
                    assert!(
                        !G::fits_in(&self.node(c).rect, &slot.item),
                        "resident fits a child and should live deeper"
                    );
                }
            }
        }
        if let Some(children) = n.children {
            // The four children tile their common bounding rectangle,
            // sharing one split point. That rectangle is the parent's own
            // rect for ordinary subdivisions, or a sub-rectangle of it
            // after a hoist adopted grandchildren.
            let [tl, tr, bl, br] = children.map(|c| self.node(c).rect);
            assert_eq!(tl.x0, bl.x0, "left edge must be shared");
            assert_eq!(tr.x1, br.x1, "right edge must be shared");
            assert_eq!(tl.y0, tr.y0, "top edge must be shared");
            assert_eq!(bl.y1, br.y1, "bottom edge must be shared");
            assert_eq!(tl.x1, tr.x0, "split x must be shared");
            assert_eq!(bl.x1, br.x0, "split x must be shared");
            assert_eq!(tl.x1, bl.x1, "split x must be shared");
            assert_eq!(tl.y1, bl.y0, "split y must be shared");
            assert_eq!(tr.y1, br.y0, "split y must be shared");
            assert_eq!(tl.y1, tr.y1, "split y must be shared");
            let union = Rect::new(tl.x0, tl.y0, br.x1, br.y1);
            assert!(
                crate::geometry::contains_rect(&n.rect, &union),
                "children escape the parent"
            );
            for c in children {
                self.check_node(c, Some(id), seen, total);
            }
        }
    }
}
