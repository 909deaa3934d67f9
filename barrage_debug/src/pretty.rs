// Copyright 2026 the Barrage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use barrage_core::trace::{
    AdmitEvent, ClickEvent, PruneEvent, TickBeginEvent, TickEndEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the destination.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_tick_begin(&mut self, e: &TickBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[tick:begin] frame={} now={:.1}ms active={} backlog={}",
            e.frame_index, e.now_ms, e.active, e.backlog,
        );
    }

    fn on_tick_end(&mut self, e: &TickEndEvent) {
        let _ = writeln!(
            self.writer,
            "[tick:end] frame={} active={} admitted={} pruned={}",
            e.frame_index, e.active, e.admitted, e.pruned,
        );
    }

    fn on_admit(&mut self, e: &AdmitEvent) {
        let _ = writeln!(
            self.writer,
            "[admit] frame={} y={} width={} speed={}",
            e.frame_index, e.y, e.total_width, e.speed,
        );
    }

    fn on_prune(&mut self, e: &PruneEvent) {
        let _ = writeln!(
            self.writer,
            "[prune] frame={} x={:.1}",
            e.frame_index, e.x,
        );
    }

    fn on_click(&mut self, e: &ClickEvent) {
        let _ = writeln!(
            self.writer,
            "[click] frame={} at=({:.1},{:.1}) selected={}",
            e.frame_index, e.x, e.y, e.selected,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_print_tick() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_tick_begin(&TickBeginEvent {
            frame_index: 1,
            now_ms: 16.7,
            active: 2,
            backlog: 5,
        });
        sink.on_prune(&PruneEvent {
            frame_index: 1,
            x: -128.0,
        });
        let output = String::from_utf8(sink.into_writer()).unwrap();
        assert!(output.contains("[tick:begin]"), "got: {output}");
        assert!(output.contains("frame=1"), "got: {output}");
        assert!(output.contains("[prune]"), "got: {output}");
        assert!(output.contains("x=-128.0"), "got: {output}");
    }
}
