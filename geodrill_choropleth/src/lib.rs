// Copyright 2025 the Geodrill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geodrill Choropleth: a headless hierarchical choropleth map engine.
//!
//! A [`GeoChoropleth`] displays nested geographic layers (country, state,
//! county, ...) as filled regions. It keeps three things consistent under
//! rapid and conflicting input:
//!
//! - **Navigation**: which layer is current and what is framed. Wheel ticks
//!   drill down into a region or roll up a level; clicks select and frame
//!   regions; drags pan.
//! - **Viewport**: the scale/translate transform that frames the focus,
//!   animated between states and interruptible at any time.
//! - **Selection**: the shared cross-filter set, read and toggled through
//!   [`FilterSet`](geodrill_selection::FilterSet), and reflected as
//!   selected / deselected / neutral region classification.
//!
//! The engine does not draw and does not project. The host supplies:
//! - a [`GeometryProjector`] reporting projected bounds of a feature,
//! - a [`ColorMapping`] from aggregate value to fill color,
//! - the shared filter set and this pass's aggregate rows,
//! - input events and a monotonic millisecond clock, plus a
//!   [`tick`](GeoChoropleth::tick) per animation frame.
//!
//! In return every pass produces a [`RenderPass`](render::RenderPass)
//! describing the transform, stroke width and per-region style.
//!
//! ## Example
//!
//! ```rust
//! use std::rc::Rc;
//!
//! use geodrill_choropleth::{ClickEvent, GeoChoropleth, NavOutcome, RegionRef, WheelEvent};
//! use geodrill_selection::{FilterSet, Selection};
//! use kurbo::{Rect, Size};
//! use peniko::Color;
//!
//! // Features carry their name and projected bounds.
//! type Feature = (&'static str, Rect);
//!
//! let mut map: GeoChoropleth<Feature, &str> =
//!     GeoChoropleth::new(Size::new(800.0, 400.0), |f: &Feature| f.1);
//! map.overlay_layer("country", vec![("USA", Rect::new(0.0, 0.0, 800.0, 400.0))], None)
//!     .unwrap();
//! map.overlay_layer(
//!     "state",
//!     vec![
//!         ("TX", Rect::new(300.0, 200.0, 500.0, 400.0)),
//!         ("CA", Rect::new(0.0, 0.0, 200.0, 300.0)),
//!     ],
//!     Some(Rc::new(|f: &Feature| Some(f.0))),
//! )
//! .unwrap();
//!
//! let mut filters = Selection::new();
//! let colors = |v: Option<f64>, _: usize| {
//!     if v.unwrap_or(0.0) > 20.0 { Color::BLACK } else { Color::WHITE }
//! };
//!
//! let pass = map.render([("TX", 29.0), ("CA", 39.0)], &filters, &colors, 0).unwrap();
//! assert_eq!(pass.current_level, 1);
//! assert_eq!(pass.layers[1].regions[0].classes, "state tx");
//!
//! // Clicking Texas filters it and frames it.
//! let outcome = map.click(ClickEvent::new(RegionRef::new(1, 0)), &mut filters, 10).unwrap();
//! assert_eq!(outcome, NavOutcome::Focused);
//! assert!(filters.has_filter(&"TX"));
//!
//! let pass = map.redraw([("TX", 29.0), ("CA", 39.0)], &filters, &colors, 10);
//! assert_eq!(pass.layers[1].regions[1].classes, "state ca deselected");
//!
//! // Scrolling out over the bare canvas rolls up to the country layer.
//! let outcome = map.wheel(WheelEvent::new(None, 3.0), &filters, 20).unwrap();
//! assert_eq!(outcome, NavOutcome::RolledUp { level: 0 });
//! ```
//!
//! ## Logging
//!
//! Navigation decisions are reported through [`tracing`]: transitions at
//! `debug`, ignored input at `trace`, recovered malformed transforms at
//! `warn`. No subscriber is installed.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod chart;
pub mod collaborators;
mod config;
mod error;
pub mod navigation;
pub mod render;

pub use chart::{DrillDownCallback, GeoChoropleth, RollUpCallback};
pub use collaborators::{ColorMapping, GeometryProjector};
pub use config::ChoroplethConfig;
pub use error::NavigationError;
pub use navigation::{
    ClickEvent, DrillTarget, Focus, FocusState, NavOutcome, NavState, Navigator, RegionRef, Scene,
    WheelEvent,
};
