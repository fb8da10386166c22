// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bulk loading.
//!
//! Build a tree from a large batch in one pass and run a covering query,
//! which emits whole subtrees without testing individual items.
//!
//! Run:
//! - `cargo run -p understory_demos --example bulk_build`

use kurbo::{Point, Rect};
use understory_quad_tree::PointQuadTree;

fn main() {
    // A spiral of ten thousand points.
    let batch: Vec<(Point, u32)> = (0..10_000u32)
        .map(|i| {
            let t = f64::from(i) * 0.01;
            let r = t * 3.0;
            let p = Point::new(1000.0 + r * t.cos(), 1000.0 + r * t.sin());
            (p, i)
        })
        .collect();

    let mut tree: PointQuadTree<u32> = PointQuadTree::new(Rect::new(0.0, 0.0, 2000.0, 2000.0));
    let keys = tree.bulk_insert(batch);
    println!("loaded {} points", tree.len());

    let window = Rect::new(900.0, 900.0, 1100.0, 1100.0);
    let near_centre = tree.query(&window).count();
    println!("{near_centre} points in the centre window");

    let everything = tree.query(&Rect::new(0.0, 0.0, 2000.0, 2000.0)).count();
    assert_eq!(everything, keys.len());
    println!("covering query returned all {everything}");
}
