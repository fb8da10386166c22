// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quad tree basics.
//!
//! Insert a few rectangles, query a window, relocate an item, remove one.
//!
//! Run:
//! - `cargo run -p understory_demos --example quad_tree_basics`

use kurbo::Rect;
use understory_quad_tree::RectQuadTree;

fn main() {
    let mut tree: RectQuadTree<&str> = RectQuadTree::new(Rect::new(0.0, 0.0, 200.0, 200.0));

    let card = tree.insert(Rect::new(10.0, 10.0, 60.0, 40.0), "card");
    let toolbar = tree.insert(Rect::new(0.0, 0.0, 200.0, 8.0), "toolbar");
    let cursor = tree.insert(Rect::new(30.0, 30.0, 32.0, 32.0), "cursor");

    // Everything overlapping the top-left window.
    let mut hits = Vec::new();
    tree.query_into(&Rect::new(0.0, 0.0, 50.0, 50.0), &mut hits);
    println!("top-left window:");
    for (_, name) in &hits {
        println!("  {name}");
    }

    // The cursor moved; relocate it inside the tree.
    tree.update(cursor, Rect::new(150.0, 150.0, 152.0, 152.0));
    let moved: Vec<_> = tree
        .query(&Rect::new(100.0, 100.0, 200.0, 200.0))
        .map(|(_, name)| name)
        .collect();
    println!("bottom-right window after the move: {moved:?}");
    assert_eq!(moved, vec!["cursor"]);

    assert!(tree.remove(toolbar));
    assert!(tree.contains(card));
    println!("{} items left", tree.len());
}
