// Copyright 2025 the Geodrill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ordered layer stack.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::layer::{KeyAccessor, Layer};

/// Errors from layer stack operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayerError {
    /// A layer index outside `[0, len)`.
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The stack length at the time of the request.
        len: usize,
    },
    /// A layer was overlaid with no features at all.
    EmptyGeometry {
        /// The id of the rejected layer.
        id: String,
    },
}

impl fmt::Display for LayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "layer index {index} out of range for {len} layers")
            }
            Self::EmptyGeometry { id } => write!(f, "layer {id:?} has no features"),
        }
    }
}

impl core::error::Error for LayerError {}

/// Layers ordered from coarsest (index 0) to finest (last index).
///
/// Ids are unique: overlaying an id that already exists replaces that layer's
/// features and key accessor without moving it.
///
/// The underlying vector is reachable through [`layers_mut`](Self::layers_mut)
/// so hosts can edit layers in place between render passes. Code that does so
/// is responsible for keeping ids unique.
pub struct LayerStack<F, K> {
    layers: Vec<Layer<F, K>>,
}

impl<F, K> Default for LayerStack<F, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F, K> LayerStack<F, K> {
    /// Creates an empty stack.
    #[must_use]
    pub const fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Inserts a layer, or replaces the one with the same id in place.
    ///
    /// Returns the index of the layer. An empty feature list is rejected and
    /// leaves the stack untouched.
    pub fn overlay(
        &mut self,
        id: impl Into<String>,
        features: Vec<F>,
        key_accessor: Option<KeyAccessor<F, K>>,
    ) -> Result<usize, LayerError> {
        let id = id.into();
        if features.is_empty() {
            return Err(LayerError::EmptyGeometry { id });
        }
        if let Some(index) = self.index_of(&id) {
            self.layers[index].replace(features, key_accessor);
            Ok(index)
        } else {
            self.layers.push(Layer::new(id, features, key_accessor));
            Ok(self.layers.len() - 1)
        }
    }

    /// Removes the layer with `id`, returning it. No-op if absent.
    pub fn remove(&mut self, id: &str) -> Option<Layer<F, K>> {
        let index = self.index_of(id)?;
        Some(self.layers.remove(index))
    }

    /// The layer at `index`.
    pub fn layer_at(&self, index: usize) -> Result<&Layer<F, K>, LayerError> {
        let len = self.layers.len();
        self.layers
            .get(index)
            .ok_or(LayerError::IndexOutOfRange { index, len })
    }

    /// Mutable access to the layer at `index`.
    pub fn layer_at_mut(&mut self, index: usize) -> Result<&mut Layer<F, K>, LayerError> {
        let len = self.layers.len();
        self.layers
            .get_mut(index)
            .ok_or(LayerError::IndexOutOfRange { index, len })
    }

    /// Returns `true` if the layer at `index` has a key accessor.
    pub fn is_data_layer(&self, index: usize) -> Result<bool, LayerError> {
        self.layer_at(index).map(Layer::is_data_layer)
    }

    /// Position of the layer with `id`.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.layers.iter().position(|layer| layer.id() == id)
    }

    /// The layer with `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Layer<F, K>> {
        self.layers.iter().find(|layer| layer.id() == id)
    }

    /// Number of layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns `true` if there are no layers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Index of the finest layer, `None` when empty.
    #[must_use]
    pub fn finest_index(&self) -> Option<usize> {
        self.layers.len().checked_sub(1)
    }

    /// The finest layer, `None` when empty.
    #[must_use]
    pub fn finest(&self) -> Option<&Layer<F, K>> {
        self.layers.last()
    }

    /// Iterates layers from coarsest to finest.
    pub fn iter(&self) -> core::slice::Iter<'_, Layer<F, K>> {
        self.layers.iter()
    }

    /// The layers as a slice.
    #[must_use]
    pub fn layers(&self) -> &[Layer<F, K>] {
        &self.layers
    }

    /// The backing vector, for in-place edits by the host.
    pub fn layers_mut(&mut self) -> &mut Vec<Layer<F, K>> {
        &mut self.layers
    }
}

impl<F: Clone, K> Clone for LayerStack<F, K> {
    fn clone(&self) -> Self {
        Self {
            layers: self.layers.clone(),
        }
    }
}

impl<F, K> fmt::Debug for LayerStack<F, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.layers.iter()).finish()
    }
}

impl<'a, F, K> IntoIterator for &'a LayerStack<F, K> {
    type Item = &'a Layer<F, K>;
    type IntoIter = core::slice::Iter<'a, Layer<F, K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers.iter()
    }
}
