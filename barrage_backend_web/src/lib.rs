// Copyright 2026 the Barrage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for barrage.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`RafLoop`]: `requestAnimationFrame` tick source
//! - [`CanvasSurface`]: 2D-canvas [`Surface`] implementation
//! - [`WebBarrage`]: turnkey host object binding a
//!   [`Stage`](barrage_core::stage::Stage) to a canvas element, its frame
//!   loop, and its click events

#![no_std]

extern crate alloc;

mod canvas;
mod raf;

pub use canvas::CanvasSurface;
pub use raf::{FrameStamp, RafLoop};
pub use barrage_core::surface::Surface;

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use core::cell::RefCell;
use core::fmt;

use kurbo::Point;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use barrage_core::bullet::BulletParams;
use barrage_core::stage::{Dispatch, SelectionEvent, SelectionPolicy, Stage, StageConfig};
use barrage_core::style::Color;

/// Delay before a deferred selection handler fires, in milliseconds.
const SELECT_DISPATCH_DELAY_MS: i32 = 10;

/// Why [`WebBarrage::attach`] could not bind to the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SetupError {
    /// No global `window`/`document` (not running in a browser page).
    NoWindow,
    /// No element with the given id exists in the document.
    MissingCanvas(String),
    /// The element with the given id is not a `<canvas>`.
    NotACanvas(String),
    /// The canvas refused to hand out a 2D rendering context.
    NoContext,
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWindow => write!(f, "no global window or document"),
            Self::MissingCanvas(id) => write!(f, "no element with id {id:?}"),
            Self::NotACanvas(id) => write!(f, "element {id:?} is not a canvas"),
            Self::NoContext => write!(f, "canvas has no 2d context"),
        }
    }
}

impl core::error::Error for SetupError {}

struct Host {
    stage: Stage,
    surface: CanvasSurface,
}

/// Binds a [`Stage`] to a `<canvas>` element: frame loop, drawing, clicks.
///
/// Mirrors the stage API for browser hosts: [`add`](Self::add) queues
/// bullets, [`start`](Self::start)/[`stop`](Self::stop) control the
/// `requestAnimationFrame` loop, and
/// [`register_select_handler`](Self::register_select_handler) wires click
/// selection. Dropping the `WebBarrage` stops the loop and detaches the
/// click listener.
pub struct WebBarrage {
    host: Rc<RefCell<Host>>,
    raf: RafLoop,
    canvas: HtmlCanvasElement,
    click_closure: RefCell<Option<Closure<dyn FnMut(MouseEvent)>>>,
}

impl fmt::Debug for WebBarrage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebBarrage")
            .field("raf", &self.raf)
            .finish_non_exhaustive()
    }
}

impl WebBarrage {
    /// Binds to the canvas with the given element id, using the stock
    /// configuration (pool of 30, toggle selection).
    ///
    /// The stage takes its dimensions from the canvas backing store.
    pub fn attach(canvas_id: &str) -> Result<Self, SetupError> {
        Self::attach_with(canvas_id, 30, SelectionPolicy::default())
    }

    /// [`attach`](Self::attach) with an explicit pool size and selection
    /// policy.
    pub fn attach_with(
        canvas_id: &str,
        pool_size: usize,
        selection: SelectionPolicy,
    ) -> Result<Self, SetupError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(SetupError::NoWindow)?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| SetupError::MissingCanvas(canvas_id.into()))?
            .dyn_into()
            .map_err(|_| SetupError::NotACanvas(canvas_id.into()))?;
        let context: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|o| o.dyn_into().ok())
            .ok_or(SetupError::NoContext)?;

        let config = StageConfig {
            pool_size,
            selection,
            ..StageConfig::new(f64::from(canvas.width()), f64::from(canvas.height()))
        };
        let host = Rc::new(RefCell::new(Host {
            stage: Stage::new(config),
            surface: CanvasSurface::new(context),
        }));

        let host_cb = Rc::clone(&host);
        let raf = RafLoop::new(move |stamp: FrameStamp| {
            let mut host = host_cb.borrow_mut();
            let Host {
                ref mut stage,
                ref mut surface,
            } = *host;
            stage.tick(surface, stamp.time_ms);
        });

        Ok(Self {
            host,
            raf,
            canvas,
            click_closure: RefCell::new(None),
        })
    }

    /// Queues a bullet: `text` scrolling at `speed` px/frame, optionally
    /// with an avatar image and a text color override.
    ///
    /// An avatar URL whose image element cannot be created is silently
    /// dropped; the bullet then renders without one.
    pub fn add(&self, text: &str, avatar_url: Option<&str>, speed: f64, color: Option<Color>) {
        let mut host = self.host.borrow_mut();
        let avatar = avatar_url.and_then(|url| host.surface.register_avatar(url));
        let mut params = BulletParams {
            text: text.into(),
            speed,
            avatar,
            ..BulletParams::default()
        };
        if let Some(color) = color {
            params.text_color = color;
        }
        let Host {
            ref mut stage,
            ref mut surface,
        } = *host;
        stage.add(surface, params);
    }

    /// Starts the frame loop. No-op if already running.
    pub fn start(&self) {
        self.raf.start();
    }

    /// Cancels the next frame. A tick in flight completes normally.
    pub fn stop(&self) {
        self.raf.stop();
    }

    /// Returns `true` while the frame loop is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.raf.is_running()
    }

    /// Adjusts the active-pool bound; takes effect on the next tick.
    pub fn set_pool_size(&self, pool_size: usize) {
        self.host.borrow_mut().stage.set_pool_size(pool_size);
    }

    /// Drains all queued and on-stage bullets.
    pub fn reset(&self) {
        self.host.borrow_mut().stage.reset();
    }

    /// Installs `handler` as the canvas click listener, replacing any
    /// previous one.
    ///
    /// Clicks are translated from client coordinates into surface-local ones
    /// against the canvas's current bounding rect, then hit-tested by the
    /// stage. Events flagged [`Dispatch::Deferred`] invoke the handler after
    /// a 10 ms timeout; [`Dispatch::Immediate`] events invoke it within the
    /// click.
    pub fn register_select_handler(&self, handler: impl FnMut(SelectionEvent) + 'static) {
        let host = Rc::clone(&self.host);
        let canvas = self.canvas.clone();
        let handler = Rc::new(RefCell::new(handler));

        let closure = Closure::wrap(Box::new(move |e: MouseEvent| {
            // Query the rect per click; the canvas may have moved since the
            // handler was registered.
            let rect = canvas.get_bounding_client_rect();
            let point = Point::new(
                f64::from(e.client_x()) - rect.left(),
                f64::from(e.client_y()) - rect.top(),
            );
            let Some(event) = host.borrow_mut().stage.click(point) else {
                return;
            };
            match event.dispatch {
                Dispatch::Immediate => (handler.borrow_mut())(event),
                Dispatch::Deferred => {
                    let handler = Rc::clone(&handler);
                    let callback = Closure::once_into_js(move || (handler.borrow_mut())(event));
                    raf::set_timeout(&callback, SELECT_DISPATCH_DELAY_MS);
                }
            }
        }) as Box<dyn FnMut(MouseEvent)>);

        self.canvas.set_onclick(Some(closure.as_ref().unchecked_ref()));
        *self.click_closure.borrow_mut() = Some(closure);
    }
}

impl Drop for WebBarrage {
    fn drop(&mut self) {
        self.raf.stop();
        if self.click_closure.borrow_mut().take().is_some() {
            self.canvas.set_onclick(None);
        }
    }
}
