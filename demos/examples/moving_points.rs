// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Moving items.
//!
//! Drift a swarm of points across the bounds, relocating each one every
//! step, and watch a fixed viewport's population change.
//!
//! Run:
//! - `cargo run -p understory_demos --example moving_points`

use kurbo::{Point, Rect};
use understory_quad_tree::{ItemKey, PointQuadTree};

const STEPS: usize = 10;

fn main() {
    let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
    let mut tree: PointQuadTree<usize> = PointQuadTree::new(bounds);

    let mut positions: Vec<Point> = (0..500)
        .map(|i| Point::new((i % 50) as f64 * 2.0, (i / 50) as f64 * 10.0))
        .collect();
    let keys: Vec<ItemKey> = positions
        .iter()
        .enumerate()
        .map(|(i, p)| tree.insert(*p, i))
        .collect();

    let viewport = Rect::new(40.0, 40.0, 60.0, 60.0);
    for step in 0..STEPS {
        for (key, pos) in keys.iter().zip(positions.iter_mut()) {
            // Diagonal drift; points may leave the bounds and come back.
            pos.x += 1.5;
            pos.y += 0.5;
            tree.update(*key, *pos);
        }
        let visible = tree.query(&viewport).count();
        println!("step {step}: {visible} points in the viewport");
    }

    assert_eq!(tree.len(), keys.len(), "relocation never loses items");
}
