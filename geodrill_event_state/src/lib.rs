// Copyright 2025 the Geodrill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geodrill Event State: input state managers for drill-down maps.
//!
//! This crate provides small, focused state machines that sit between raw
//! input events and map navigation:
//!
//! - [`cooldown`]: coalesce bursts of input into one action per window
//! - [`wheel`]: classify wheel ticks and decide which layers react to them
//! - [`drag`]: capture the pointer origin and view state at drag start
//! - [`modifiers`]: modifier-key flags carried by pointer input
//!
//! None of them know about layers, geometry or rendering. They accept
//! pre-computed inputs (a signed delta, a pointer position, a timestamp) and
//! answer "should this happen now?" or "by how much?".
//!
//! ## Wheel navigation
//!
//! ```rust
//! use geodrill_event_state::cooldown::GestureDebouncer;
//! use geodrill_event_state::wheel::WheelDirection;
//!
//! let mut debouncer = GestureDebouncer::new();
//! let mut actions = Vec::new();
//!
//! // One physical flick: four ticks within a few frames.
//! for (now, delta) in [(0, -3.0), (8, -3.0), (16, -2.0), (24, -1.0)] {
//!     if let Some(direction) = WheelDirection::from_delta(delta) {
//!         if debouncer.try_acquire(direction, 700, now) {
//!             actions.push(direction);
//!         }
//!     }
//! }
//! assert_eq!(actions, vec![WheelDirection::DrillDown]);
//! ```
//!
//! ## Features
//!
//! - `drag`: Enable drag capture (requires `kurbo` dependency)
//!
//! This crate is `no_std` compatible (with `alloc`) for all modules.

#![no_std]

extern crate alloc;

pub mod cooldown;
#[cfg(feature = "drag")]
pub mod drag;
pub mod modifiers;
pub mod wheel;
