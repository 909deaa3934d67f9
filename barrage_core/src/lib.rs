// Copyright 2026 the Barrage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core queue, bullet lifecycle, and frame scheduling for the barrage
//! overlay engine.
//!
//! `barrage_core` owns the data model and the per-frame protocol for a
//! stream of horizontally scrolling bullet comments: bullets are accepted
//! into a backlog, admitted into a bounded active pool, advanced and drawn
//! each frame, and pruned once they scroll past the left edge. It is
//! `no_std` compatible (with `alloc`); all pixel work goes through the
//! [`Surface`](surface::Surface) contract implemented by backend crates.
//!
//! # Architecture
//!
//! Each host frame callback drives one tick of the stage:
//!
//! ```text
//!   Backend (tick source, e.g. requestAnimationFrame)
//!       │
//!       ▼
//!   Stage::tick ──► refill (backlog → active, bounded by pool_size)
//!                   clear  (full stage region)
//!                   render (draw each active bullet, then advance it)
//!                   prune  (remove dead bullets from the active queue)
//!
//!   Pointer click ──► Stage::click ──► SelectionEvent ──► host dispatch
//! ```
//!
//! **[`queue`]** — Generic FIFO [`LinkedQueue`](queue::LinkedQueue): slots in
//! a contiguous arena linked by index, addressed by generational
//! [`NodeId`](queue::NodeId) handles, with a restartable step cursor that
//! survives mid-scan removal.
//!
//! **[`bullet`]** — One scrolling entity: position, speed, style, derived
//! text metrics (fixed at creation), death and selection state.
//!
//! **[`stage`]** — The scheduler: backlog/active queues, bounded refill,
//! the strict refill→clear→render→prune tick, and click hit-testing with
//! configurable selection policies.
//!
//! **[`surface`]** — The [`Surface`](surface::Surface) trait that backends
//! implement to draw avatars, rounded panels, and text.
//!
//! **[`style`]** — Color and font descriptors shared between the core and
//! the drawing backends.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! frame-loop instrumentation, with zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one
//!   branch per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod bullet;
pub mod queue;
pub mod stage;
pub mod style;
pub mod surface;
pub mod trace;
