//! Adapter utilities for the `cardstack` crate.
//!
//! The `cardstack` crate is UI-agnostic and focuses on the core state
//! machine and math. This crate provides the framework-neutral plumbing a
//! host UI needs on top of it:
//!
//! - A gesture recognizer translating raw pointer events into semantic
//!   gestures (tap, double tap, scroll, fling) including the custom
//!   press-and-hold detector that opens drag-to-reorder
//! - A per-frame [`Controller`] wiring pointer events and a millisecond
//!   clock into the stack
//!
//! This crate is intentionally framework-agnostic (no winit/egui bindings).
#![forbid(unsafe_code)]

mod controller;
mod event;
mod recognizer;


pub use controller::Controller;
pub use event::{Gesture, PointerEvent, PointerPhase};
pub use recognizer::{GestureRecognizer, RecognizerOptions};
