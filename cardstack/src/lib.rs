//! A headless wallet-style card-stack layout and animation engine.
//!
//! For pointer-event plumbing (gesture recognition, per-frame controller),
//! see the `cardstack-adapter` crate.
//!
//! This crate focuses on the animated state machine at the core of a
//! touch-driven card wallet: browsing a stacked list, expanding a card into
//! a focused single view, rubber-band over-scroll, and drag-to-reorder.
//! Everything is driven by restartable time-based animators over a
//! caller-supplied millisecond clock.
//!
//! It is UI-agnostic. A render layer is expected to provide:
//! - item and container heights
//! - a pointer/gesture event stream
//! - a per-frame `tick(now_ms)` call
//!
//! and to consume immutable [`RenderCommand`] values.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod animator;
mod easing;
mod model;
mod options;
mod stack;
mod types;

#[cfg(test)]
mod tests;

pub use animator::{Animator, Tick};
pub use easing::{Easing, inverse_lerp, lerp};
pub use model::{Card, PositionModel};
pub use options::{
    CardLifecycleCallback, OnBindCallback, OnEnterDetailConfirmedCallback, RenderCallback,
    StackOptions,
};
pub use stack::CardStack;
pub use types::{CardId, RenderCommand, State};
