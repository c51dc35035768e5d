#![forbid(unsafe_code)]

//! Core: vectors, positioned leaves, and change events narrowed to input elements.
//!
//! # Role in Leafkit
//! `leafkit-core` is the platform-independent data model. Layout and drag
//! systems produce [`geometry::Vector`] and [`geometry::Leaf`] values; form
//! handlers consume [`event::ChangeEvent`] values whose target is guaranteed
//! to be an input element.
//!
//! # How it fits in the system
//! `leafkit-web` adapts host events (JSON from a JS host, or live DOM events
//! on `wasm32`) into the types defined here. The `leafkit` facade re-exports
//! both.

pub mod event;
pub mod geometry;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
