// Copyright 2026 the Barrage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`ChromeTraceSink`] buffers trace events as JSON objects and writes a
//! [Chrome Trace Event Format][spec] array on [`export`](ChromeTraceSink::export),
//! suitable for loading into `chrome://tracing` or
//! [Perfetto](https://ui.perfetto.dev/).
//!
//! Ticks become `B`/`E` duration pairs; admissions, prunes, and clicks become
//! instant events at the surrounding tick's timestamp. Timestamps are the
//! host's millisecond clock converted to microseconds.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use barrage_core::trace::{
    AdmitEvent, ClickEvent, PruneEvent, TickBeginEvent, TickEndEvent, TraceSink,
};

/// Buffers trace events and exports Chrome Trace Event Format JSON.
#[derive(Debug, Default)]
pub struct ChromeTraceSink {
    events: Vec<Value>,
    /// Timestamp of the current tick, for events that carry none themselves.
    tick_now_ms: f64,
}

impl ChromeTraceSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of buffered events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Writes the buffered events as a JSON array.
    pub fn export(&self, writer: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(writer, &self.events)?;
        Ok(())
    }

    fn ts_us(&self) -> f64 {
        self.tick_now_ms * 1000.0
    }
}

impl TraceSink for ChromeTraceSink {
    fn on_tick_begin(&mut self, e: &TickBeginEvent) {
        self.tick_now_ms = e.now_ms;
        self.events.push(json!({
            "ph": "B",
            "name": "Tick",
            "cat": "Stage",
            "ts": e.now_ms * 1000.0,
            "pid": 0,
            "tid": 0,
            "args": {
                "frame_index": e.frame_index,
                "active": e.active,
                "backlog": e.backlog,
            }
        }));
    }

    fn on_tick_end(&mut self, e: &TickEndEvent) {
        self.events.push(json!({
            "ph": "E",
            "name": "Tick",
            "cat": "Stage",
            "ts": e.now_ms * 1000.0,
            "pid": 0,
            "tid": 0,
            "args": {
                "frame_index": e.frame_index,
                "active": e.active,
                "admitted": e.admitted,
                "pruned": e.pruned,
            }
        }));
    }

    fn on_admit(&mut self, e: &AdmitEvent) {
        self.events.push(json!({
            "ph": "i",
            "name": "Admit",
            "cat": "Stage",
            "ts": self.ts_us(),
            "pid": 0,
            "tid": 0,
            "s": "t",
            "args": {
                "frame_index": e.frame_index,
                "y": e.y,
                "total_width": e.total_width,
                "speed": e.speed,
            }
        }));
    }

    fn on_prune(&mut self, e: &PruneEvent) {
        self.events.push(json!({
            "ph": "i",
            "name": "Prune",
            "cat": "Stage",
            "ts": self.ts_us(),
            "pid": 0,
            "tid": 0,
            "s": "t",
            "args": {
                "frame_index": e.frame_index,
                "x": e.x,
            }
        }));
    }

    fn on_click(&mut self, e: &ClickEvent) {
        self.events.push(json!({
            "ph": "i",
            "name": "Click",
            "cat": "Input",
            "ts": self.ts_us(),
            "pid": 0,
            "tid": 0,
            "s": "g",
            "args": {
                "frame_index": e.frame_index,
                "x": e.x,
                "y": e.y,
                "selected": e.selected,
            }
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_produces_valid_json() {
        let mut sink = ChromeTraceSink::new();
        sink.on_tick_begin(&TickBeginEvent {
            frame_index: 0,
            now_ms: 16.0,
            active: 0,
            backlog: 2,
        });
        sink.on_admit(&AdmitEvent {
            frame_index: 0,
            y: 40.0,
            total_width: 128.0,
            speed: 2.0,
        });
        sink.on_tick_end(&TickEndEvent {
            frame_index: 0,
            now_ms: 16.0,
            active: 1,
            admitted: 1,
            pruned: 0,
        });

        let mut out = Vec::new();
        sink.export(&mut out).unwrap();
        let parsed: Vec<Value> = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed.len(), 3);

        // Tick begin/end bracket the admission.
        assert_eq!(parsed[0]["ph"], "B");
        assert_eq!(parsed[0]["name"], "Tick");
        assert_eq!(parsed[1]["ph"], "i");
        assert_eq!(parsed[1]["name"], "Admit");
        assert_eq!(parsed[1]["ts"], 16_000.0);
        assert_eq!(parsed[2]["ph"], "E");
    }

    #[test]
    fn export_empty_recording() {
        let sink = ChromeTraceSink::new();
        let mut out = Vec::new();
        sink.export(&mut out).unwrap();
        let parsed: Vec<Value> = serde_json::from_slice(&out).unwrap();
        assert!(parsed.is_empty());
    }
}
