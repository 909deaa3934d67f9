// Copyright 2026 the Barrage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web demo: a canvas bullet stream driven by `barrage_backend_web`.
//!
//! Creates a canvas, queues 1000 bullets with speeds cycling 1–4, starts the
//! frame loop, and logs selection events to the browser console. Click a
//! bullet to select it; click again to release it and fire the handler.
//!
//! Build with: `wasm-pack build --target web demos/web_stream`
//!
//! Then serve the `pkg/` output from a host page that loads the module
//! (`import init from "./pkg/web_stream.js"; await init();`) — the demo
//! creates and attaches its own canvas, so the page needs no other markup.

// This crate only runs in the browser; suppress dead-code warnings when
// cargo-checking on a native host target.
#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use alloc::format;
use alloc::string::ToString;

use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use barrage_backend_web::WebBarrage;

const CANVAS_ID: &str = "barrage-stage";
const CANVAS_W: u32 = 800;
const CANVAS_H: u32 = 450;
const BULLET_COUNT: usize = 1000;

/// Entry point — called automatically by `wasm_bindgen(start)`.
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    let window = web_sys::window().expect("no global window");
    let document = window.document().expect("no document");

    let canvas: HtmlCanvasElement = document.create_element("canvas")?.unchecked_into();
    canvas.set_id(CANVAS_ID);
    canvas.set_width(CANVAS_W);
    canvas.set_height(CANVAS_H);
    let s = canvas.style();
    s.set_property("display", "block")?;
    s.set_property("margin", "24px auto")?;
    s.set_property("background", "#1e1e2e")?;
    s.set_property("border-radius", "8px")?;
    document.body().expect("no body").append_child(&canvas)?;

    let barrage =
        WebBarrage::attach(CANVAS_ID).map_err(|e| JsValue::from_str(&e.to_string()))?;

    // Queue the stream, speeds cycling 1..=4.
    let mut speed = 1.0;
    for i in 0..BULLET_COUNT {
        barrage.add(&format!("--- {i}"), None, speed, None);
        speed += 1.0;
        if speed > 4.0 {
            speed = 1.0;
        }
    }

    barrage.register_select_handler(|event| {
        web_sys::console::log_1(&JsValue::from_str(&format!(
            "released {:?} at {:?}",
            event.text, event.bounds
        )));
    });

    barrage.start();

    // Keep the loop and the click listener alive — there is no graceful
    // shutdown on the web.
    core::mem::forget(barrage);

    Ok(())
}
