// Copyright 2025 the Scribe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A headless drawing session driven by a scripted input sequence.
//!
//! Run:
//! - `cargo run -p scribe_demos --example scripted_session`
//! - `cargo run -p scribe_demos --example scripted_session -- my_canvas.toml`
//!
//! The optional argument is a TOML file with any subset of the `CanvasConfig`
//! fields, for example `stroke_radius = 4.0`. Set `RUST_LOG=debug` to watch
//! segments being created and undone.

use std::path::Path;
use std::time::Instant;

use kurbo::{Point, Size, Vec2};
use scribe_canvas::{
    Buttons, Canvas, CanvasConfig, CanvasError, DisplayList, Gestures, InputFrame, InputSnapshot,
    draw_frame,
};

fn load_config(path: Option<&Path>) -> CanvasConfig {
    let Some(path) = path else {
        return CanvasConfig::default();
    };
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(cfg) => {
                log::info!("config loaded from {}", path.display());
                cfg
            }
            Err(e) => {
                log::warn!("config file is malformed, using defaults: {e}");
                CanvasConfig::default()
            }
        },
        Err(e) => {
            log::warn!("cannot read {}: {e}; using defaults", path.display());
            CanvasConfig::default()
        }
    }
}

/// The scripted input, one snapshot per tick.
fn script(centre: Point) -> Vec<InputSnapshot> {
    let mut out = Vec::new();
    let idle = |p| InputSnapshot::new(Buttons::empty(), p);

    // A freehand spiral.
    for i in 0..120 {
        let t = f64::from(i) * 0.1;
        let p = centre + Vec2::from_angle(t) * (4.0 * t);
        out.push(InputSnapshot::new(Buttons::LEFT, p));
    }
    out.push(idle(centre));

    // A straight line with Shift held.
    for i in 0..30 {
        let p = centre + Vec2::new(f64::from(i) * 5.0, 150.0);
        out.push(InputSnapshot::new(Buttons::LEFT | Buttons::SHIFT_LEFT, p));
    }
    out.push(InputSnapshot::new(Buttons::SHIFT_LEFT, centre + Vec2::new(150.0, 150.0)));
    out.push(idle(centre));

    // Zoom out, rotate once, let the camera settle.
    out.push(idle(centre).with_scroll(-400.0));
    out.push(InputSnapshot::new(Buttons::COMMA, centre));
    out.extend(std::iter::repeat_n(idle(centre), 90));

    // Grab the world with the middle button and drag it.
    for i in 0..20 {
        let p = centre + Vec2::new(f64::from(i) * 6.0, f64::from(i) * -2.0);
        out.push(InputSnapshot::new(Buttons::MIDDLE, p));
    }
    out.push(idle(centre));

    // Undo twice, try redo, then quit.
    let ctrl_z = Buttons::CTRL_LEFT | Buttons::Z;
    for held in [ctrl_z, Buttons::empty(), ctrl_z, Buttons::empty()] {
        out.push(InputSnapshot::new(held, centre));
    }
    out.push(InputSnapshot::new(ctrl_z | Buttons::SHIFT_LEFT, centre));
    out.push(idle(centre));
    out.push(InputSnapshot::new(Buttons::ESCAPE, centre));
    out
}

fn main() -> Result<(), CanvasError> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let arg = std::env::args().nth(1);
    let config = load_config(arg.as_deref().map(Path::new));
    let viewport = Size::new(1280.0, 720.0);
    let mut canvas = Canvas::new(config, viewport)?;
    let mut input = InputFrame::default();
    let mut list = DisplayList::default();
    let mut last = Instant::now();

    for (n, snap) in script(viewport.to_rect().center()).into_iter().enumerate() {
        input.advance(snap);

        let started = Instant::now();
        let tick = canvas.update(&input)?;
        canvas.frame_stats_mut().record_update(started.elapsed());

        let started = Instant::now();
        list.clear();
        let summary = draw_frame(&canvas, &mut list);
        canvas.frame_stats_mut().record_draw(started.elapsed());

        let now = Instant::now();
        canvas.frame_stats_mut().frame(now - last);
        last = now;

        if !tick.created.is_empty() || tick.removed.is_some() {
            log::debug!("tick {n}: created {:?}, removed {:?}", tick.created, tick.removed);
        }
        if tick.gestures.contains(Gestures::DRAW_RELEASED) {
            log::info!("stroke finished; {summary}");
        }
        if tick.gestures.contains(Gestures::REDO_REQUESTED) {
            log::info!("redo pressed; {} segments remain", canvas.store().len());
        }
        if canvas.quit_requested() {
            let stats = canvas.frame_stats();
            println!(
                "fps: {} - Dropped Frames: {} - Draw: {:?} - Update: {:?}",
                stats.fps(),
                stats.dropped_frames(),
                stats.draw_time(),
                stats.update_time()
            );
            println!("{summary}");
            println!(
                "camera at {:?}, rotation {:.3}, {} draw calls last frame",
                canvas.camera().position,
                canvas.camera().rotation,
                list.lines().count()
            );
            break;
        }
    }
    Ok(())
}
