// Copyright 2025 the Geodrill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geodrill Selection: reconciling a shared filter set with map regions.
//!
//! A cross-filtered map does not own its selection. Other views (bar charts,
//! tables, other maps) read and write the same set of filtered keys, so the
//! map only ever talks to it through the [`FilterSet`] trait: it asks whether
//! a key is filtered, and it requests toggles. It never keeps a private copy.
//!
//! On top of that seam, [`classify`] turns membership into one of three
//! display states:
//! - [`Classification::Neutral`]: no filter is active anywhere, so every
//!   region renders normally. "Nothing filtered" looks like "everything".
//! - [`Classification::Selected`]: a filter is active and includes the key.
//! - [`Classification::Deselected`]: a filter is active and excludes the key,
//!   so the region renders dimmed.
//!
//! [`Selection`] is a small in-memory [`FilterSet`] for hosts that do not
//! already have one, and for tests.
//!
//! ## Minimal example
//!
//! ```rust
//! use geodrill_selection::{Classification, FilterSet, Selection, classify};
//!
//! let mut filters = Selection::new();
//! assert_eq!(classify(&filters, &"TX"), Classification::Neutral);
//! assert_eq!(classify(&filters, &"CA"), Classification::Neutral);
//!
//! filters.toggle_filter("TX");
//! assert_eq!(classify(&filters, &"TX"), Classification::Selected);
//! assert_eq!(classify(&filters, &"CA"), Classification::Deselected);
//! assert_eq!(Classification::Deselected.class_name(), Some("deselected"));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

/// The shared, externally owned filter set a map participates in.
///
/// Implementations usually forward to a cross-filter dimension shared by
/// several views. Reads are expected to reflect the latest state every time;
/// callers never cache answers between render passes.
pub trait FilterSet<K> {
    /// Returns `true` if any filter is active.
    fn has_any_filter(&self) -> bool;

    /// Returns `true` if `key` is one of the active filters.
    fn has_filter(&self, key: &K) -> bool;

    /// Adds `key` to the filters if absent, removes it if present.
    fn toggle_filter(&mut self, key: K);

    /// Tells other participants that the filters changed.
    ///
    /// The default does nothing, for sets without observers.
    fn notify_filters_changed(&mut self) {}
}

impl<K, F> FilterSet<K> for &mut F
where
    F: FilterSet<K> + ?Sized,
{
    fn has_any_filter(&self) -> bool {
        (**self).has_any_filter()
    }

    fn has_filter(&self, key: &K) -> bool {
        (**self).has_filter(key)
    }

    fn toggle_filter(&mut self, key: K) {
        (**self).toggle_filter(key);
    }

    fn notify_filters_changed(&mut self) {
        (**self).notify_filters_changed();
    }
}

/// How a region relates to the active filters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Classification {
    /// The filter is active and includes this key.
    Selected,
    /// The filter is active and excludes this key.
    Deselected,
    /// No filter is active.
    Neutral,
}

impl Classification {
    /// The style tag the rendering layer attaches to the region, if any.
    #[must_use]
    pub fn class_name(self) -> Option<&'static str> {
        match self {
            Self::Selected => Some("selected"),
            Self::Deselected => Some("deselected"),
            Self::Neutral => None,
        }
    }

    /// Returns `true` for [`Classification::Selected`].
    #[must_use]
    pub fn is_selected(self) -> bool {
        self == Self::Selected
    }

    /// Returns `true` for [`Classification::Deselected`].
    #[must_use]
    pub fn is_deselected(self) -> bool {
        self == Self::Deselected
    }
}

/// Classifies `key` against the current state of `filters`.
pub fn classify<K, F>(filters: &F, key: &K) -> Classification
where
    F: FilterSet<K> + ?Sized,
{
    if !filters.has_any_filter() {
        Classification::Neutral
    } else if filters.has_filter(key) {
        Classification::Selected
    } else {
        Classification::Deselected
    }
}

/// A small in-memory filter set: selected keys in insertion order and a
/// revision counter.
///
/// Keys only need `PartialEq`; uniqueness is enforced by scanning, which is
/// fine for the handful of regions a user filters by hand.
///
/// The revision bumps on every change to the contents. Separately, the set
/// remembers the revision it last announced through
/// [`FilterSet::notify_filters_changed`], so hosts can ask
/// [`Selection::has_unannounced_changes`] before scheduling a redraw.
#[derive(Clone, Debug, Default)]
pub struct Selection<K> {
    items: Vec<K>,
    revision: u64,
    announced: u64,
}

impl<K> Selection<K> {
    /// Creates an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            revision: 0,
            announced: 0,
        }
    }

    /// Returns `true` if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of selected keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns the selected keys in insertion order.
    #[must_use]
    pub fn items(&self) -> &[K] {
        &self.items
    }

    /// Monotonically increasing change counter.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns `true` if the contents changed since the last notification.
    #[must_use]
    pub fn has_unannounced_changes(&self) -> bool {
        self.announced != self.revision
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.items.clear();
        self.bump_revision();
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl<K> Selection<K>
where
    K: PartialEq,
{
    /// Returns `true` if `key` is selected.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.position_of(key).is_some()
    }

    /// Adds `key` if absent, removes it if present.
    pub fn toggle(&mut self, key: K) {
        if let Some(idx) = self.position_of(&key) {
            self.items.remove(idx);
        } else {
            self.items.push(key);
        }
        self.bump_revision();
    }

    /// Removes `key` if present.
    pub fn remove(&mut self, key: &K) {
        if let Some(idx) = self.position_of(key) {
            self.items.remove(idx);
            self.bump_revision();
        }
    }

    fn position_of(&self, key: &K) -> Option<usize> {
        self.items.iter().position(|k| k == key)
    }
}

impl<K> FilterSet<K> for Selection<K>
where
    K: PartialEq,
{
    fn has_any_filter(&self) -> bool {
        !self.is_empty()
    }

    fn has_filter(&self, key: &K) -> bool {
        self.contains(key)
    }

    fn toggle_filter(&mut self, key: K) {
        self.toggle(key);
    }

    fn notify_filters_changed(&mut self) {
        self.announced = self.revision;
    }
}
