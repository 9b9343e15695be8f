// Copyright 2025 the Scribe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport culling: how many segments the camera actually visits.
//!
//! Fills a large drawing with short strokes, then walks the camera through a
//! few zoom levels and rotations and prints how many segments each frame
//! would draw compared with the total.
//!
//! Run:
//! - `cargo run -p scribe_demos --example viewport_culling`

use kurbo::{Point, Size, Vec2};
use scribe_canvas::{Camera, SegmentStore, Stroke};

fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let mut store = SegmentStore::new();
    // A 200×200 lattice of little diagonal strokes, 10 world units apart.
    for y in 0..200 {
        for x in 0..200 {
            let a = Point::new(f64::from(x) * 10.0, f64::from(y) * 10.0);
            if let Err(e) = store.create(Stroke::new(a, a + Vec2::new(4.0, 4.0), 1.0)) {
                log::error!("could not add stroke at {a:?}: {e}");
                return;
            }
        }
    }
    log::info!(
        "{} segments, index height {}",
        store.len(),
        store.index_height()
    );

    let mut camera = Camera::new(Size::new(1280.0, 720.0));
    camera.position = Point::new(1000.0, 1000.0);
    for (exponent, rotation) in [(0.0, 0.0), (-1.0, 0.0), (1.0, 0.0), (1.0, 0.6), (2.5, 0.0)] {
        camera.zoom_exponent = exponent;
        camera.rotation = rotation;
        let view = camera.view_rect();
        let visible = store.query_view(view).len();
        println!(
            "exponent {exponent:>4.1} rotation {rotation:.1}: view {:>7.1}×{:<7.1} draws {visible:>5} of {} ({:.1}%)",
            view.width(),
            view.height(),
            store.len(),
            100.0 * visible as f64 / store.len() as f64
        );
    }

    // Undo the last row and look at where it was.
    for _ in 0..200 {
        if let Err(e) = store.undo() {
            log::error!("undo failed: {e}");
            return;
        }
    }
    camera.zoom_exponent = 0.0;
    camera.rotation = 0.0;
    camera.position = Point::new(1000.0, 1990.0);
    println!(
        "after undoing the last row, {} segments sit around y = 1990",
        store.query_view(camera.view_rect()).len()
    );
}
