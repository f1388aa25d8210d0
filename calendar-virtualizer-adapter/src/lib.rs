//! Adapter utilities for the `calendar-virtualizer` crate.
//!
//! The `calendar-virtualizer` crate is UI-agnostic and only computes what is visible for one
//! viewport at a time. This crate provides small, framework-neutral helpers commonly needed by
//! adapters:
//!
//! - A controller that chains anchors from one build to the next and tracks the scroll offset
//! - Scroll anchoring (keep an item in place across viewport resizes or dataset changes)
//!
//! Nothing here depends on a UI toolkit; adapters for a specific framework build on top.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod anchor;
mod controller;

#[cfg(test)]
mod tests;

pub use anchor::{ScrollAnchor, apply_anchor, capture_centermost_anchor};
pub use controller::Controller;
