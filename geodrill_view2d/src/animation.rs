// Copyright 2025 the Geodrill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::transform::ViewTransform;

/// A linear, time-sliced interpolation between two transforms.
///
/// Time is supplied by the caller as monotonic milliseconds, so an animation
/// never blocks: it is sampled on each frame tick until it finishes or is
/// replaced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformAnimation {
    from: ViewTransform,
    to: ViewTransform,
    start_ms: u64,
    duration_ms: u64,
}

impl TransformAnimation {
    /// Creates an animation from `from` to `to` starting at `start_ms`.
    #[must_use]
    pub fn new(from: ViewTransform, to: ViewTransform, start_ms: u64, duration_ms: u64) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms,
        }
    }

    /// The transform at the start of the animation.
    #[must_use]
    pub fn from(&self) -> ViewTransform {
        self.from
    }

    /// The transform the animation settles on.
    #[must_use]
    pub fn to(&self) -> ViewTransform {
        self.to
    }

    /// Timestamp the animation started at.
    #[must_use]
    pub fn start_ms(&self) -> u64 {
        self.start_ms
    }

    /// Total duration in milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Fraction of the animation elapsed at `now_ms`, in `[0, 1]`.
    ///
    /// Timestamps before the start count as `0`; a zero duration is always `1`.
    #[must_use]
    pub fn progress(&self, now_ms: u64) -> f64 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        let elapsed = now_ms.saturating_sub(self.start_ms).min(self.duration_ms);
        elapsed as f64 / self.duration_ms as f64
    }

    /// Interpolated transform at `now_ms`.
    #[must_use]
    pub fn sample(&self, now_ms: u64) -> ViewTransform {
        let t = self.progress(now_ms);
        if t >= 1.0 {
            return self.to;
        }
        self.from.lerp(self.to, t)
    }

    /// Returns `true` once `now_ms` is at or past the end.
    #[must_use]
    pub fn is_finished(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms
    }
}
