// Copyright 2026 the Barrage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Development-time [`TraceSink`] implementations for barrage.
//!
//! - [`PrettyPrintSink`]: one human-readable line per trace event.
//! - [`ChromeTraceSink`]: buffers events and exports [Chrome Trace Event
//!   Format][spec] JSON for `chrome://tracing` / Perfetto.
//!
//! Both require `barrage_core` with the `trace` feature, which this crate
//! enables.
//!
//! [`TraceSink`]: barrage_core::trace::TraceSink
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

pub mod chrome;
pub mod pretty;

pub use chrome::ChromeTraceSink;
pub use pretty::PrettyPrintSink;
