// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lazy query iteration.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::geometry::Geometry;
use crate::tree::QuadTree;
use crate::types::{ItemKey, NodeId};

/// Lazy query over a [`QuadTree`], created by [`QuadTree::query`].
///
/// Yields the same items as the eager forms, each exactly once, in an
/// unspecified (but deterministic) order. Abandoning the iterator early
/// costs nothing beyond the work already done, and draining it fully does
/// no more work than [`QuadTree::query_with`].
///
/// Two explicit stacks replace the eager recursion: nodes whose
/// rectangles still need testing against the query, and nodes already
/// known to lie wholly inside it, whose items are emitted without
/// per-item tests.
pub struct Query<'a, G: Geometry, T: Copy + Debug> {
    tree: &'a QuadTree<G, T>,
    query: &'a G::Query,
    test: Vec<NodeId>,
    emit: Vec<NodeId>,
    bucket: &'a [ItemKey],
    cursor: usize,
    filtered: bool,
}

impl<G: Geometry, T: Copy + Debug> QuadTree<G, T> {
    /// Iterate lazily over every item matching the query.
    ///
    /// Use this when the consumer may stop early; otherwise
    /// [`Self::query_with`] and [`Self::query_into`] do the same work
    /// without the iterator state.
    pub fn query<'a>(&'a self, query: &'a G::Query) -> Query<'a, G, T> {
        let root = self.node(self.root);
        let mut out = Query {
            tree: self,
            query,
            test: Vec::new(),
            emit: Vec::new(),
            // The root bucket can hold items lying outside the root
            // rectangle, so it is always tested item by item.
            bucket: &root.bucket,
            cursor: 0,
            filtered: true,
        };
        if let Some(children) = root.children {
            if G::query_contains(query, &root.rect) {
                out.emit.extend(children);
            } else if G::query_intersects(query, &root.rect) {
                out.test.extend(children);
            }
        }
        out
    }
}

impl<G: Geometry, T: Copy + Debug> Iterator for Query<'_, G, T> {
    type Item = (ItemKey, T);

    fn next(&mut self) -> Option<(ItemKey, T)> {
        loop {
            while self.cursor < self.bucket.len() {
                let key = self.bucket[self.cursor];
                self.cursor += 1;
                let slot = self.tree.slot(key);
                if !self.filtered || G::query_matches(self.query, &slot.item) {
                    return Some((key, slot.payload));
                }
            }
            if let Some(id) = self.emit.pop() {
                let node = self.tree.node(id);
                if let Some(children) = node.children {
                    self.emit.extend(children);
                }
                self.bucket = &node.bucket;
                self.cursor = 0;
                self.filtered = false;
                continue;
            }
            let id = self.test.pop()?;
            let node = self.tree.node(id);
            if G::query_contains(self.query, &node.rect) {
                if let Some(children) = node.children {
                    self.emit.extend(children);
                }
                self.bucket = &node.bucket;
                self.cursor = 0;
                self.filtered = false;
            } else if G::query_intersects(self.query, &node.rect) {
                if let Some(children) = node.children {
                    self.test.extend(children);
                }
                self.bucket = &node.bucket;
                self.cursor = 0;
                self.filtered = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::{Point, Rect};

    use crate::{InversePointQuadTree, ItemKey, QuadTree, RectQuadTree};

    fn build_tree() -> RectQuadTree<u32> {
        let mut tree: RectQuadTree<u32> = QuadTree::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        let mut state = 0x1234_5678_9ABC_DEF0_u64;
        let mut next = move || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 11) as f64 / (1u64 << 53) as f64
        };
        for i in 0..80 {
            let x = next() * 95.0;
            let y = next() * 95.0;
            tree.insert(Rect::new(x, y, x + 3.0, y + 3.0), i);
        }
        tree
    }

    fn sorted(mut keys: Vec<ItemKey>) -> Vec<ItemKey> {
        keys.sort_by_key(|k| (k.0, k.1));
        keys
    }

    #[test]
    fn lazy_and_eager_agree() {
        let tree = build_tree();
        for q in [
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Rect::new(10.0, 10.0, 30.0, 30.0),
            Rect::new(80.0, 80.0, 99.0, 99.0),
            Rect::new(-5.0, -5.0, 0.5, 0.5),
            Rect::new(200.0, 200.0, 300.0, 300.0),
        ] {
            let lazy: Vec<ItemKey> = tree.query(&q).map(|(k, _)| k).collect();
            let mut eager = Vec::new();
            tree.query_into(&q, &mut eager);
            let eager: Vec<ItemKey> = eager.into_iter().map(|(k, _)| k).collect();
            assert_eq!(sorted(lazy), sorted(eager));
        }
    }

    #[test]
    fn early_termination_is_cheap_and_correct() {
        let tree = build_tree();
        let q = Rect::new(0.0, 0.0, 100.0, 100.0);
        let total = tree.query(&q).count();
        assert_eq!(total, 80);
        let first_three: Vec<_> = tree.query(&q).take(3).collect();
        assert_eq!(first_three.len(), 3);
        for (key, _) in first_three {
            assert!(tree.contains(key));
        }
    }

    #[test]
    fn empty_tree_yields_nothing() {
        let tree: RectQuadTree<u32> = QuadTree::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(tree.query(&Rect::new(0.0, 0.0, 10.0, 10.0)).next(), None);
    }

    #[test]
    fn predicate_queries_scan_every_item() {
        let mut tree: InversePointQuadTree<u32> =
            QuadTree::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        for i in 0..50u32 {
            let x = f64::from(i % 10) * 10.0;
            let y = f64::from(i / 10) * 10.0;
            tree.insert(Point::new(x, y), i);
        }
        let centre = Point::new(50.0, 20.0);
        let near = move |p: Point| p.distance(centre) <= 25.0;
        let mut hits: Vec<u32> = tree.query(&near).map(|(_, v)| v).collect();
        hits.sort_unstable();

        let mut want = Vec::new();
        for i in 0..50u32 {
            let x = f64::from(i % 10) * 10.0;
            let y = f64::from(i / 10) * 10.0;
            if Point::new(x, y).distance(centre) <= 25.0 {
                want.push(i);
            }
        }
        assert_eq!(hits, want);
        assert!(!hits.is_empty());
    }

    #[test]
    fn iteration_order_is_deterministic() {
        let a = build_tree();
        let b = build_tree();
        let q = Rect::new(5.0, 5.0, 70.0, 70.0);
        let ka: Vec<ItemKey> = a.query(&q).map(|(k, _)| k).collect();
        let kb: Vec<ItemKey> = b.query(&q).map(|(k, _)| k).collect();
        assert_eq!(ka, kb);
    }
}
