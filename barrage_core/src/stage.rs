// Copyright 2026 the Barrage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The stage: bounded active pool, per-frame tick protocol, click selection.
//!
//! [`Stage`] owns two [`LinkedQueue`]s of bullets. Newly added bullets wait in
//! the *backlog*; each tick admits backlog bullets into the *active* pool up
//! to [`StageConfig::pool_size`], then clears, draws, advances, and prunes.
//! The host's frame scheduler re-enters [`Stage::tick`] once per frame;
//! stopping the loop cancels the *next* tick, never one in flight.

use alloc::string::String;
use kurbo::{Point, Rect};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::bullet::{Bullet, BulletParams, HEIGHT};
use crate::queue::{Iter, LinkedQueue};
use crate::surface::Surface;
use crate::trace::{AdmitEvent, ClickEvent, PruneEvent, TickBeginEvent, TickEndEvent, Tracer};

/// How [`Stage::click`] reacts to a hit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SelectionPolicy {
    /// Flip the bullet's selection toggle; report only the transition back
    /// into *deselected*, with [`Dispatch::Deferred`].
    #[default]
    Toggle,
    /// Report every hit, with [`Dispatch::Immediate`]; selection state is
    /// left untouched.
    Immediate,
}

/// When the host should invoke its selection handler for an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dispatch {
    /// Invoke synchronously, within the click.
    Immediate,
    /// Invoke after a short delay (the web backend uses a 10 ms timeout).
    Deferred,
}

/// A click outcome handed to the host for handler dispatch.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionEvent {
    /// Text of the hit bullet.
    pub text: String,
    /// Hit bullet's bounds at click time.
    pub bounds: Rect,
    /// Selection state after the click was applied.
    pub selected: bool,
    /// How the host should invoke its handler.
    pub dispatch: Dispatch,
}

/// Configuration for a [`Stage`].
#[derive(Clone, Copy, Debug)]
pub struct StageConfig {
    /// Stage width in pixels; also the spawn x of every bullet.
    pub width: f64,
    /// Stage height in pixels; bullets spawn uniformly over
    /// `0..height - HEIGHT`.
    pub height: f64,
    /// Upper bound on concurrently active bullets.
    pub pool_size: usize,
    /// Click behavior.
    pub selection: SelectionPolicy,
    /// Seed for the vertical-placement RNG; fix it for reproducible layouts.
    pub rng_seed: u64,
}

impl StageConfig {
    /// A config for a `width × height` stage with the stock pool size (30),
    /// toggle selection, and a fixed seed.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            pool_size: 30,
            selection: SelectionPolicy::Toggle,
            rng_seed: 0,
        }
    }
}

impl Default for StageConfig {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Drives a stream of bullets across the stage, one tick per host frame.
///
/// # Tick protocol
///
/// [`tick`](Self::tick) runs four strictly ordered passes:
///
/// 1. **Refill** — move bullets backlog→active while capacity allows,
///    strict FIFO.
/// 2. **Clear** — erase the full stage region.
/// 3. **Render** — scan the active queue head→tail; per bullet draw avatar
///    (if loaded), panel, text at the current position, then
///    [`advance`](Bullet::advance) it. Death is evaluated inside `advance`.
/// 4. **Prune** — scan again and remove dead bullets, freeing capacity for
///    the next tick's refill.
///
/// Each pass runs to completion before the next begins, and no two passes
/// share iteration state.
pub struct Stage {
    config: StageConfig,
    backlog: LinkedQueue<Bullet>,
    active: LinkedQueue<Bullet>,
    rng: SmallRng,
    frame_index: u64,
}

impl core::fmt::Debug for Stage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Stage")
            .field("config", &self.config)
            .field("backlog", &self.backlog)
            .field("active", &self.active)
            .field("frame_index", &self.frame_index)
            .finish_non_exhaustive()
    }
}

impl Stage {
    /// Creates an empty stage.
    #[must_use]
    pub fn new(config: StageConfig) -> Self {
        Self {
            config,
            backlog: LinkedQueue::new(),
            active: LinkedQueue::new(),
            rng: SmallRng::seed_from_u64(config.rng_seed),
            frame_index: 0,
        }
    }

    /// The configuration this stage was built with.
    #[must_use]
    pub const fn config(&self) -> &StageConfig {
        &self.config
    }

    /// Ticks completed so far.
    #[must_use]
    pub const fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Number of bullets currently on stage.
    #[must_use]
    pub const fn active_len(&self) -> usize {
        self.active.len()
    }

    /// Number of bullets waiting for admission.
    #[must_use]
    pub const fn backlog_len(&self) -> usize {
        self.backlog.len()
    }

    /// Adjusts the active-pool bound; takes effect on the next tick's
    /// refill. Shrinking never evicts bullets already on stage.
    pub const fn set_pool_size(&mut self, pool_size: usize) {
        self.config.pool_size = pool_size;
    }

    /// Iterates the on-stage bullets in admission order.
    #[must_use]
    pub fn active_bullets(&self) -> Iter<'_, Bullet> {
        self.active.iter()
    }

    /// Queues a bullet for admission.
    ///
    /// The text is measured once, here, via the surface; the bullet spawns at
    /// the right stage edge on a uniformly random row. Admission happens on a
    /// later [`tick`](Self::tick), in strict FIFO order.
    pub fn add(&mut self, surface: &mut dyn Surface, params: BulletParams) {
        let measured = surface.measure_text(&params.text, &params.font);
        let span = self.config.height - HEIGHT;
        let y = if span > 0.0 {
            self.rng.gen_range(0.0..span).floor()
        } else {
            0.0
        };
        let bullet = Bullet::new(params, measured, self.config.width, y);
        self.backlog.enqueue(bullet);
    }

    /// Runs one untraced tick. See the type docs for the pass order.
    pub fn tick(&mut self, surface: &mut dyn Surface, now_ms: f64) {
        self.tick_traced(surface, now_ms, &mut Tracer::none());
    }

    /// Runs one tick, reporting each phase to `tracer`.
    pub fn tick_traced(&mut self, surface: &mut dyn Surface, now_ms: f64, tracer: &mut Tracer<'_>) {
        let frame_index = self.frame_index;
        tracer.tick_begin(&TickBeginEvent {
            frame_index,
            now_ms,
            active: self.active.len(),
            backlog: self.backlog.len(),
        });

        // Refill: admit until the pool is full or the backlog runs dry.
        let mut admitted = 0;
        while self.active.len() < self.config.pool_size {
            let Some(bullet) = self.backlog.dequeue() else {
                break;
            };
            tracer.admit(&AdmitEvent {
                frame_index,
                y: bullet.y,
                total_width: bullet.total_width(),
                speed: bullet.speed,
            });
            self.active.enqueue(bullet);
            admitted += 1;
        }

        surface.clear(Rect::new(0.0, 0.0, self.config.width, self.config.height));

        // Render: draw at the current position, then advance. The pass runs
        // the queue-owned cursor to completion, leaving it rewound.
        while let Some(id) = self.active.step() {
            let Some(bullet) = self.active.get_mut(id) else {
                continue;
            };
            if let Some(avatar) = bullet.avatar
                && surface.avatar_ready(avatar)
            {
                surface.draw_avatar(avatar, bullet.avatar_rect());
            }
            surface.fill_panel(bullet.panel(), bullet.panel_color);
            surface.fill_text(&bullet.text, bullet.text_origin(), &bullet.font, bullet.text_color);
            bullet.advance();
        }

        // Prune: removal of the cursor node is safe (the queue repairs the
        // cursor), so dead bullets are unlinked mid-scan.
        let mut pruned = 0;
        while let Some(id) = self.active.step() {
            let dead_x = match self.active.get(id) {
                Some(bullet) if bullet.is_dead() => bullet.x,
                _ => continue,
            };
            tracer.prune(&PruneEvent {
                frame_index,
                x: dead_x,
            });
            self.active.remove(id);
            pruned += 1;
        }

        self.frame_index += 1;
        tracer.tick_end(&TickEndEvent {
            frame_index,
            now_ms,
            active: self.active.len(),
            admitted,
            pruned,
        });
    }

    /// Hit-tests a surface-local click against the active bullets.
    ///
    /// The scan runs in admission order and stops at the first bullet whose
    /// bounds contain `point`. A miss returns `None` and changes nothing.
    /// Whether a hit produces an event depends on
    /// [`StageConfig::selection`]; the caller dispatches its handler per the
    /// event's [`Dispatch`].
    pub fn click(&mut self, point: Point) -> Option<SelectionEvent> {
        self.click_traced(point, &mut Tracer::none())
    }

    /// [`click`](Self::click), reporting hits to `tracer`.
    pub fn click_traced(
        &mut self,
        point: Point,
        tracer: &mut Tracer<'_>,
    ) -> Option<SelectionEvent> {
        let policy = self.config.selection;
        let mut hit = None;
        let mut event = None;
        self.active.for_each_while_mut(|bullet| {
            if !bullet.contains(point) {
                return true;
            }
            let (selected, dispatch) = match policy {
                SelectionPolicy::Toggle => {
                    let selected = bullet.toggle_selected();
                    // Only the release of a selection notifies the host.
                    (selected, (!selected).then_some(Dispatch::Deferred))
                }
                SelectionPolicy::Immediate => (bullet.selected, Some(Dispatch::Immediate)),
            };
            hit = Some(selected);
            event = dispatch.map(|dispatch| SelectionEvent {
                text: bullet.text.clone(),
                bounds: bullet.bounds(),
                selected,
                dispatch,
            });
            false
        });

        if let Some(selected) = hit {
            tracer.click(&ClickEvent {
                frame_index: self.frame_index,
                x: point.x,
                y: point.y,
                selected,
            });
        }
        event
    }

    /// Drains both queues, leaving the stage empty but reusable.
    pub fn reset(&mut self) {
        self.backlog.clear();
        self.active.clear();
    }
}
