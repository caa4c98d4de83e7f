// Copyright 2025 the Geodrill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geodrill Layers: the ordered stack of geographic layers behind a drill-down map.
//!
//! A map is a stack of [`Layer`]s ordered from coarsest (index 0, say
//! countries) to finest (the last index, say counties). Each layer holds its
//! features and, optionally, a [`KeyAccessor`] that extracts the data key of
//! a feature. Layers without one are passive backdrops.
//!
//! - [`LayerStack`]: insert-or-replace by id, lookup by index or id.
//! - [`AggregateMap`]: key to value lookup rebuilt from aggregate rows on
//!   every render pass.
//!
//! Features are opaque: the crate never looks inside them, it only hands them
//! to the key accessor.
//!
//! ## Example
//!
//! ```rust
//! use std::rc::Rc;
//! use geodrill_layers::{AggregateMap, LayerError, LayerStack};
//!
//! let mut stack: LayerStack<&str, String> = LayerStack::new();
//! stack.overlay("country", vec!["USA"], None).unwrap();
//! stack
//!     .overlay("state", vec!["TX", "CA"], Some(Rc::new(|f: &&str| Some(f.to_string()))))
//!     .unwrap();
//!
//! assert_eq!(stack.finest_index(), Some(1));
//! assert_eq!(stack.is_data_layer(0), Ok(false));
//! assert_eq!(stack.is_data_layer(1), Ok(true));
//! assert!(matches!(stack.layer_at(2), Err(LayerError::IndexOutOfRange { .. })));
//!
//! let values = AggregateMap::from_rows([("TX".to_string(), 29.0), ("CA".to_string(), 39.0)]);
//! let state = stack.layer_at(1).unwrap();
//! let tx = state.key_of(&"TX").unwrap();
//! assert_eq!(values.get(&tx), Some(29.0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod aggregate;
mod layer;
mod stack;

pub use aggregate::AggregateMap;
pub use layer::{KeyAccessor, Layer};
pub use stack::{LayerError, LayerStack};
