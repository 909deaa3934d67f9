// Copyright 2026 the Barrage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the frame loop.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! stage calls at each point of a tick. All method bodies default to no-ops,
//! so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a tick begins, before the refill pass.
#[derive(Clone, Copy, Debug)]
pub struct TickBeginEvent {
    /// Monotonic frame counter.
    pub frame_index: u64,
    /// Host timestamp of the tick, in milliseconds.
    pub now_ms: f64,
    /// Active bullets before refill.
    pub active: usize,
    /// Backlogged bullets before refill.
    pub backlog: usize,
}

/// Emitted when a tick completes, after the prune pass.
#[derive(Clone, Copy, Debug)]
pub struct TickEndEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Host timestamp of the tick, in milliseconds.
    pub now_ms: f64,
    /// Active bullets after pruning.
    pub active: usize,
    /// Bullets moved backlog→active this tick.
    pub admitted: usize,
    /// Dead bullets removed this tick.
    pub pruned: usize,
}

/// Emitted when a bullet is admitted from the backlog into the active pool.
#[derive(Clone, Copy, Debug)]
pub struct AdmitEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Spawn row (top edge).
    pub y: f64,
    /// Full footprint width of the bullet.
    pub total_width: f64,
    /// Pixels per tick.
    pub speed: f64,
}

/// Emitted when a dead bullet is removed from the active pool.
#[derive(Clone, Copy, Debug)]
pub struct PruneEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Left edge at removal time (beyond the left stage edge).
    pub x: f64,
}

/// Emitted when a click hits a bullet.
#[derive(Clone, Copy, Debug)]
pub struct ClickEvent {
    /// Frame counter at the time of the click.
    pub frame_index: u64,
    /// Click position, surface-local.
    pub x: f64,
    /// Click position, surface-local.
    pub y: f64,
    /// Selection state of the hit bullet after the click was applied.
    pub selected: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the frame loop.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a tick begins.
    fn on_tick_begin(&mut self, e: &TickBeginEvent) {
        _ = e;
    }

    /// Called when a tick completes.
    fn on_tick_end(&mut self, e: &TickEndEvent) {
        _ = e;
    }

    /// Called when a bullet enters the active pool.
    fn on_admit(&mut self, e: &AdmitEvent) {
        _ = e;
    }

    /// Called when a dead bullet is removed.
    fn on_prune(&mut self, e: &PruneEvent) {
        _ = e;
    }

    /// Called when a click hits a bullet.
    fn on_click(&mut self, e: &ClickEvent) {
        _ = e;
    }
}

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`TickBeginEvent`].
    #[inline]
    pub fn tick_begin(&mut self, e: &TickBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_tick_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TickEndEvent`].
    #[inline]
    pub fn tick_end(&mut self, e: &TickEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_tick_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`AdmitEvent`].
    #[inline]
    pub fn admit(&mut self, e: &AdmitEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_admit(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PruneEvent`].
    #[inline]
    pub fn prune(&mut self, e: &PruneEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_prune(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ClickEvent`].
    #[inline]
    pub fn click(&mut self, e: &ClickEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_click(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_begin() -> TickBeginEvent {
        TickBeginEvent {
            frame_index: 42,
            now_ms: 1000.0,
            active: 3,
            backlog: 7,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_tick_begin(&sample_begin());
        sink.on_tick_end(&TickEndEvent {
            frame_index: 42,
            now_ms: 1001.0,
            active: 4,
            admitted: 1,
            pruned: 0,
        });
        sink.on_click(&ClickEvent {
            frame_index: 42,
            x: 10.0,
            y: 20.0,
            selected: true,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.tick_begin(&sample_begin());
        tracer.prune(&PruneEvent {
            frame_index: 0,
            x: -120.0,
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            frames: Vec<u64>,
        }
        impl TraceSink for RecordingSink {
            fn on_tick_begin(&mut self, e: &TickBeginEvent) {
                self.frames.push(e.frame_index);
            }
        }

        let mut sink = RecordingSink { frames: Vec::new() };
        let mut tracer = Tracer::new(&mut sink);
        tracer.tick_begin(&sample_begin());
        drop(tracer);
        assert_eq!(sink.frames, &[42]);
    }
}
