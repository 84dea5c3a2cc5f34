//! Remote preview transport.
//!
//! A layout is announced to a live viewer by sending a single JSON line,
//! `{"gds":"<path>"}`, over a fresh TCP connection. The client half-closes
//! its write side so the viewer sees end-of-input, then lingers briefly to
//! drain whatever the viewer sends back.

#![deny(missing_docs)]

mod client;
mod translate;

pub use client::{preview_line, push_layout, LiveClient, PushReport};
pub use translate::{translator_for, Identity, PathTranslator, WslPath};
