// Copyright 2025 the Geodrill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag capture: remember where a drag began and what the view looked like then.
//!
//! ## Usage
//!
//! 1) Call [`DragState::start`] with the pointer position and a snapshot of
//!    whatever the drag manipulates (typically the view transform).
//! 2) On each move, call [`DragState::offset`] for the total pointer offset
//!    since the start, and apply it to the snapshot. Working from the start
//!    snapshot rather than accumulating per-move deltas keeps the content
//!    locked to the pointer.
//! 3) End the drag with [`DragState::end`], which hands back the snapshot.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! ```

use kurbo::{Point, Vec2};

/// Tracks an in-progress drag and the state captured when it began.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState<S> {
    origin: Option<(Point, S)>,
}

impl<S> Default for DragState<S> {
    fn default() -> Self {
        Self { origin: None }
    }
}

impl<S> DragState<S> {
    /// Starts a drag at `pos`, capturing `snapshot`.
    ///
    /// Starting again while a drag is active replaces the previous capture.
    pub fn start(&mut self, pos: Point, snapshot: S) {
        self.origin = Some((pos, snapshot));
    }

    /// Returns the total offset of `pos` from the start, together with the
    /// captured snapshot.
    ///
    /// Returns `None` when no drag is active.
    pub fn offset(&self, pos: Point) -> Option<(Vec2, &S)> {
        let (start, snapshot) = self.origin.as_ref()?;
        Some((pos - *start, snapshot))
    }

    /// Ends the drag, returning the captured snapshot.
    pub fn end(&mut self) -> Option<S> {
        self.origin.take().map(|(_, snapshot)| snapshot)
    }

    /// Returns `true` while a drag is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.origin.is_some()
    }
}
