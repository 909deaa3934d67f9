// Copyright 2026 the Barrage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated bullet stream that exercises the tracing pipeline.
//!
//! Drives a [`Stage`] through 240 synthetic 60 Hz ticks against a headless
//! surface, mirrors every trace event to a
//! [`PrettyPrintSink`](barrage_debug::pretty::PrettyPrintSink) and a
//! [`ChromeTraceSink`](barrage_debug::chrome::ChromeTraceSink), and writes a
//! Chrome trace JSON file at the end.

use std::fs::File;
use std::io::BufWriter;

use kurbo::{Point, Rect, RoundedRect};

use barrage_core::bullet::BulletParams;
use barrage_core::stage::{Stage, StageConfig};
use barrage_core::style::{Color, Font};
use barrage_core::surface::{AvatarId, Surface};
use barrage_core::trace::{
    AdmitEvent, ClickEvent, PruneEvent, TickBeginEvent, TickEndEvent, TraceSink, Tracer,
};

use barrage_debug::chrome::ChromeTraceSink;
use barrage_debug::pretty::PrettyPrintSink;

const FRAME_COUNT: u64 = 240;
/// ≈60 Hz frame interval in milliseconds.
const FRAME_INTERVAL_MS: f64 = 16.666;

const STAGE_WIDTH: f64 = 640.0;
const STAGE_HEIGHT: f64 = 360.0;
const POOL_SIZE: usize = 8;
const BULLET_COUNT: usize = 40;

/// Headless surface: fixed-advance text metrics, draws go nowhere.
#[derive(Debug, Default)]
struct HeadlessSurface {
    draw_calls: u64,
}

impl Surface for HeadlessSurface {
    fn clear(&mut self, _region: Rect) {}

    fn avatar_ready(&self, _avatar: AvatarId) -> bool {
        false
    }

    fn draw_avatar(&mut self, _avatar: AvatarId, _region: Rect) {
        self.draw_calls += 1;
    }

    fn fill_panel(&mut self, _panel: RoundedRect, _color: Color) {
        self.draw_calls += 1;
    }

    fn fill_text(&mut self, _text: &str, _origin: Point, _font: &Font, _color: Color) {
        self.draw_calls += 1;
    }

    fn measure_text(&mut self, text: &str, _font: &Font) -> f64 {
        // A flat 8 px per glyph stands in for real font metrics.
        text.chars().count() as f64 * 8.0
    }
}

/// Forwards every event to both sinks.
struct TeeSink<'a> {
    pretty: &'a mut PrettyPrintSink,
    chrome: &'a mut ChromeTraceSink,
}

impl TraceSink for TeeSink<'_> {
    fn on_tick_begin(&mut self, e: &TickBeginEvent) {
        self.pretty.on_tick_begin(e);
        self.chrome.on_tick_begin(e);
    }

    fn on_tick_end(&mut self, e: &TickEndEvent) {
        self.pretty.on_tick_end(e);
        self.chrome.on_tick_end(e);
    }

    fn on_admit(&mut self, e: &AdmitEvent) {
        self.pretty.on_admit(e);
        self.chrome.on_admit(e);
    }

    fn on_prune(&mut self, e: &PruneEvent) {
        self.pretty.on_prune(e);
        self.chrome.on_prune(e);
    }

    fn on_click(&mut self, e: &ClickEvent) {
        self.pretty.on_click(e);
        self.chrome.on_click(e);
    }
}

fn main() {
    // -- sinks -------------------------------------------------------------
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout()));
    let mut chrome = ChromeTraceSink::new();

    // -- stage -------------------------------------------------------------
    let config = StageConfig {
        pool_size: POOL_SIZE,
        rng_seed: 42,
        ..StageConfig::new(STAGE_WIDTH, STAGE_HEIGHT)
    };
    let mut stage = Stage::new(config);
    let mut surface = HeadlessSurface::default();

    // Queue the stream up front, speeds cycling 1..=4.
    let mut speed = 1.0;
    for i in 0..BULLET_COUNT {
        stage.add(
            &mut surface,
            BulletParams {
                text: format!("--- {i}"),
                speed,
                ..BulletParams::default()
            },
        );
        speed += 1.0;
        if speed > 4.0 {
            speed = 1.0;
        }
    }

    // -- simulated loop ----------------------------------------------------
    let mut now_ms = 0.0;
    for frame in 0..FRAME_COUNT {
        let mut tee = TeeSink {
            pretty: &mut pretty,
            chrome: &mut chrome,
        };
        let mut tracer = Tracer::new(&mut tee);
        stage.tick_traced(&mut surface, now_ms, &mut tracer);

        // Poke the selection path once the stream is flowing: two clicks on
        // the same bullet, so the toggle policy emits its deferred event.
        if frame == 30
            && let Some(center) = stage.active_bullets().next().map(|b| b.bounds().center())
        {
            let mut tee = TeeSink {
                pretty: &mut pretty,
                chrome: &mut chrome,
            };
            let mut tracer = Tracer::new(&mut tee);
            assert!(stage.click_traced(center, &mut tracer).is_none());
            let event = stage
                .click_traced(center, &mut tracer)
                .expect("second click releases the selection");
            println!("[demo] selection released: {:?}", event.text);
        }

        now_ms += FRAME_INTERVAL_MS;
    }

    println!(
        "[demo] done: {} frames, {} draw calls, {} bullets still active, {} queued",
        FRAME_COUNT,
        surface.draw_calls,
        stage.active_len(),
        stage.backlog_len(),
    );

    // -- export Chrome trace -----------------------------------------------
    let path = "trace.json";
    let file = File::create(path).expect("failed to create trace.json");
    let mut writer = BufWriter::new(file);
    chrome
        .export(&mut writer)
        .expect("failed to write Chrome trace");
    println!("Wrote {path} ({} events)", chrome.len());
}
