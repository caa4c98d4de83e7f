// Copyright 2025 the Geodrill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Extracts the data key of a feature, or `None` for features without one.
///
/// Shared so that layers can be cloned without cloning the closure.
pub type KeyAccessor<F, K> = Rc<dyn Fn(&F) -> Option<K>>;

/// One level of a geographic hierarchy: its features and how to key them.
///
/// A layer without a key accessor is a background layer: it is drawn but
/// carries no data and takes no part in selection.
pub struct Layer<F, K> {
    id: String,
    features: Vec<F>,
    key_accessor: Option<KeyAccessor<F, K>>,
}

impl<F, K> Layer<F, K> {
    /// Creates a layer.
    pub fn new(
        id: impl Into<String>,
        features: Vec<F>,
        key_accessor: Option<KeyAccessor<F, K>>,
    ) -> Self {
        Self {
            id: id.into(),
            features,
            key_accessor,
        }
    }

    /// The layer id, unique within a stack.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The layer's features, in draw order.
    #[must_use]
    pub fn features(&self) -> &[F] {
        &self.features
    }

    /// Mutable access to the features.
    pub fn features_mut(&mut self) -> &mut Vec<F> {
        &mut self.features
    }

    /// The key accessor, if this is a data layer.
    #[must_use]
    pub fn key_accessor(&self) -> Option<&KeyAccessor<F, K>> {
        self.key_accessor.as_ref()
    }

    /// Replaces the key accessor. `None` turns the layer into a background.
    pub fn set_key_accessor(&mut self, key_accessor: Option<KeyAccessor<F, K>>) {
        self.key_accessor = key_accessor;
    }

    /// Returns `true` if the layer carries a key accessor.
    #[must_use]
    pub fn is_data_layer(&self) -> bool {
        self.key_accessor.is_some()
    }

    /// Extracts the key of `feature`.
    ///
    /// Always `None` on background layers.
    #[must_use]
    pub fn key_of(&self, feature: &F) -> Option<K> {
        self.key_accessor.as_ref().and_then(|accessor| accessor(feature))
    }

    /// Keys of all features, index-aligned with [`features`](Self::features).
    pub fn keys(&self) -> impl Iterator<Item = Option<K>> + '_ {
        self.features.iter().map(|feature| self.key_of(feature))
    }

    pub(crate) fn replace(&mut self, features: Vec<F>, key_accessor: Option<KeyAccessor<F, K>>) {
        self.features = features;
        self.key_accessor = key_accessor;
    }
}

impl<F, K> Layer<F, K>
where
    K: PartialEq,
{
    /// Finds the first feature whose key equals `key`.
    #[must_use]
    pub fn find(&self, key: &K) -> Option<(usize, &F)> {
        self.features
            .iter()
            .enumerate()
            .find(|(_, feature)| self.key_of(feature).as_ref() == Some(key))
    }

    /// All features whose key is accepted by `keep`.
    pub fn filter_by_key<'a>(
        &'a self,
        mut keep: impl FnMut(&K) -> bool + 'a,
    ) -> impl Iterator<Item = &'a F> + 'a {
        self.features
            .iter()
            .filter(move |feature| self.key_of(feature).is_some_and(|key| keep(&key)))
    }
}

impl<F: Clone, K> Clone for Layer<F, K> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            features: self.features.clone(),
            key_accessor: self.key_accessor.clone(),
        }
    }
}

impl<F, K> fmt::Debug for Layer<F, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layer")
            .field("id", &self.id)
            .field("features", &self.features.len())
            .field("key_accessor", &self.key_accessor.as_ref().map(|_| "Fn"))
            .finish()
    }
}
