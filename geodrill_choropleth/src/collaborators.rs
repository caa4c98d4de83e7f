// Copyright 2025 the Geodrill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seams to the pieces the engine consumes but does not implement.
//!
//! Both traits have blanket implementations for closures, so most hosts
//! never name them.

use kurbo::Rect;
use peniko::Color;

/// Projects features into view-independent 2D space and reports their bounds.
///
/// The projection itself (and path generation) stays on the host side. The
/// engine only ever asks for the bounding box of a projected feature.
pub trait GeometryProjector<F> {
    /// Bounding box of `feature` after projection.
    fn bounds(&self, feature: &F) -> Rect;
}

impl<F, P> GeometryProjector<F> for P
where
    P: Fn(&F) -> Rect,
{
    fn bounds(&self, feature: &F) -> Rect {
        self(feature)
    }
}

/// Maps an aggregate value to a fill color.
///
/// `value` is `None` for regions without an aggregate row; `index` is the
/// feature's position within its layer.
pub trait ColorMapping {
    /// Fill color for a region.
    fn color_of(&self, value: Option<f64>, index: usize) -> Color;
}

impl<M> ColorMapping for M
where
    M: Fn(Option<f64>, usize) -> Color,
{
    fn color_of(&self, value: Option<f64>, index: usize) -> Color {
        self(value, index)
    }
}

/// Union of the projected bounds of `features`, `None` when there are none.
pub fn union_bounds<'a, F, P>(projector: &P, features: impl IntoIterator<Item = &'a F>) -> Option<Rect>
where
    F: 'a,
    P: GeometryProjector<F> + ?Sized,
{
    features
        .into_iter()
        .map(|feature| projector.bounds(feature))
        .reduce(|acc, bounds| acc.union(bounds))
}
