// Copyright 2025 the Geodrill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geodrill View 2D: the view transform of a drill-down map.
//!
//! This crate provides small, headless models of how a map canvas frames its
//! content. It focuses on:
//! - A structured [`ViewTransform`] (per-axis scale + translate) that is the
//!   single source of truth for the viewport.
//! - Fitting a bounding box into the canvas under a margin ([`fit_to_bounds`]).
//! - Time-sliced, interruptible transitions between transforms
//!   ([`TransformAnimation`], [`ViewportController`]).
//!
//! It does **not** project geometry or rasterize paths. Callers are expected
//! to:
//! - Compute bounding boxes of projected geometry themselves.
//! - Drive [`ViewportController::tick`] from their frame loop with a
//!   monotonic millisecond clock.
//! - Write [`ViewTransform`] out to their rendering layer, for example as a
//!   `transform` attribute via its [`Display`](core::fmt::Display) form.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use geodrill_view2d::ViewportController;
//!
//! let mut view = ViewportController::new(Size::new(800.0, 600.0));
//!
//! // Frame a region over 750ms, starting at t = 0.
//! let target = view
//!     .adapt_to_bounds(Rect::new(100.0, 50.0, 300.0, 150.0), 750, 0)
//!     .unwrap();
//!
//! // Halfway through the animation.
//! assert!(view.tick(375));
//!
//! // Done.
//! assert!(!view.tick(750));
//! assert_eq!(view.current(), target);
//!
//! // Written out at the render boundary.
//! let attr = view.current().to_string();
//! assert!(attr.starts_with("translate("));
//! ```
//!
//! ## Design notes
//!
//! - Fitted transforms use a **uniform** scale; parsed transforms may carry
//!   distinct `sx`/`sy`, but both are always strictly positive.
//! - Animation is plain linear interpolation of scale and translate.
//! - Line weight compensation is exposed as
//!   [`ViewportController::stroke_width`] rather than stored as state.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod animation;
mod fit;
mod transform;
mod viewport;

pub use animation::TransformAnimation;
pub use fit::{DEFAULT_FIT_MARGIN, FitError, fit_to_bounds};
pub use transform::{ParseTransformError, ParseTransformErrorKind, ViewTransform};
pub use viewport::{DEFAULT_BASE_STROKE_WIDTH, ViewportController, ViewportDebugInfo};
