// Copyright 2025 the Geodrill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size, Vec2};

use crate::animation::TransformAnimation;
use crate::fit::{DEFAULT_FIT_MARGIN, FitError, fit_to_bounds};
use crate::transform::ViewTransform;

/// Stroke width, in view pixels, that outlines keep regardless of zoom.
pub const DEFAULT_BASE_STROKE_WIDTH: f64 = 1.5;

/// Owns the current view transform of a canvas and animates changes to it.
///
/// `ViewportController` tracks:
/// - The canvas size used for fitting.
/// - The resting transform, updated on every [`tick`](Self::tick).
/// - At most one in-flight [`TransformAnimation`].
///
/// Starting a new animation while one is running supersedes it. The new
/// animation starts from the value the old one had reached at that moment,
/// so the view never snaps back to an earlier start point.
#[derive(Clone, Debug)]
pub struct ViewportController {
    canvas: Size,
    margin: f64,
    base_stroke_width: f64,
    current: ViewTransform,
    animation: Option<TransformAnimation>,
}

impl ViewportController {
    /// Creates a controller for a canvas of the given size, at identity.
    #[must_use]
    pub fn new(canvas: Size) -> Self {
        Self {
            canvas,
            margin: DEFAULT_FIT_MARGIN,
            base_stroke_width: DEFAULT_BASE_STROKE_WIDTH,
            current: ViewTransform::IDENTITY,
            animation: None,
        }
    }

    /// Returns the canvas size.
    #[must_use]
    pub fn canvas(&self) -> Size {
        self.canvas
    }

    /// Sets the canvas size used by subsequent fits.
    ///
    /// The current transform is left alone; callers re-fit if they want the
    /// content to follow the new size.
    pub fn set_canvas(&mut self, canvas: Size) {
        self.canvas = canvas;
    }

    /// Returns the fit margin.
    #[must_use]
    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// Sets the fraction of the canvas that fitted bounds fill.
    pub fn set_margin(&mut self, margin: f64) {
        self.margin = margin;
    }

    /// Returns the base stroke width in view pixels.
    #[must_use]
    pub fn base_stroke_width(&self) -> f64 {
        self.base_stroke_width
    }

    /// Sets the base stroke width in view pixels.
    pub fn set_base_stroke_width(&mut self, width: f64) {
        self.base_stroke_width = width;
    }

    /// The transform as of the last tick or immediate update.
    #[must_use]
    pub fn current(&self) -> ViewTransform {
        self.current
    }

    /// The transform at `now_ms`, including any in-flight animation.
    ///
    /// This does not advance state; see [`tick`](Self::tick).
    #[must_use]
    pub fn transform_at(&self, now_ms: u64) -> ViewTransform {
        match &self.animation {
            Some(anim) => anim.sample(now_ms),
            None => self.current,
        }
    }

    /// Where the view will settle once any animation finishes.
    #[must_use]
    pub fn target(&self) -> ViewTransform {
        self.animation.as_ref().map_or(self.current, TransformAnimation::to)
    }

    /// Returns the in-flight animation, if any.
    #[must_use]
    pub fn animation(&self) -> Option<&TransformAnimation> {
        self.animation.as_ref()
    }

    /// Returns `true` while an animation is running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Computes the transform that fits `bounds` into the canvas, without applying it.
    ///
    /// # Errors
    ///
    /// See [`fit_to_bounds`].
    pub fn fit(&self, bounds: Rect) -> Result<ViewTransform, FitError> {
        fit_to_bounds(bounds, self.canvas, self.margin)
    }

    /// Fits `bounds` into the canvas and animates there over `duration_ms`.
    ///
    /// A zero duration applies the fitted transform immediately. Returns the
    /// target transform.
    ///
    /// # Errors
    ///
    /// See [`fit_to_bounds`]. On error the viewport is unchanged and any
    /// running animation keeps running.
    pub fn adapt_to_bounds(
        &mut self,
        bounds: Rect,
        duration_ms: u64,
        now_ms: u64,
    ) -> Result<ViewTransform, FitError> {
        let target = self.fit(bounds)?;
        self.animate_to(target, duration_ms, now_ms);
        Ok(target)
    }

    /// Animates from the current interpolated transform to `target`.
    pub fn animate_to(&mut self, target: ViewTransform, duration_ms: u64, now_ms: u64) {
        let from = self.transform_at(now_ms);
        if duration_ms == 0 {
            self.current = target;
            self.animation = None;
        } else {
            self.current = from;
            self.animation = Some(TransformAnimation::new(from, target, now_ms, duration_ms));
        }
    }

    /// Replaces the transform immediately, cancelling any animation.
    pub fn set_transform(&mut self, transform: ViewTransform) {
        self.current = transform;
        self.animation = None;
    }

    /// Offsets the translation of the transform at `now_ms` by `delta`.
    pub fn add_translate(&mut self, delta: Vec2, duration_ms: u64, now_ms: u64) {
        let target = self.transform_at(now_ms).compose(delta);
        self.animate_to(target, duration_ms, now_ms);
    }

    /// Zooms by `factor` around the canvas center.
    pub fn add_scale(&mut self, factor: f64, duration_ms: u64, now_ms: u64) {
        let center = Point::new(self.canvas.width / 2.0, self.canvas.height / 2.0);
        let target = self.transform_at(now_ms).scale_around(factor, center);
        self.animate_to(target, duration_ms, now_ms);
    }

    /// Freezes any animation at its value at `now_ms`.
    pub fn cancel_animation(&mut self, now_ms: u64) {
        self.current = self.transform_at(now_ms);
        self.animation = None;
    }

    /// Advances the animation to `now_ms`. Returns `true` if it is still running.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if let Some(anim) = self.animation {
            self.current = anim.sample(now_ms);
            if anim.is_finished(now_ms) {
                self.animation = None;
            }
        }
        self.animation.is_some()
    }

    /// Stroke width that keeps outlines at the base width on screen.
    #[must_use]
    pub fn stroke_width(&self) -> f64 {
        self.base_stroke_width / self.current.scale_x()
    }

    /// Snapshot of the controller for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ViewportDebugInfo {
        ViewportDebugInfo {
            canvas: self.canvas,
            margin: self.margin,
            current: self.current,
            target: self.target(),
            animating: self.is_animating(),
            stroke_width: self.stroke_width(),
        }
    }
}

/// Debug snapshot of a [`ViewportController`] state.
#[derive(Clone, Copy, Debug)]
pub struct ViewportDebugInfo {
    /// Canvas size in view pixels.
    pub canvas: Size,
    /// Fit margin.
    pub margin: f64,
    /// Transform as of the last tick.
    pub current: ViewTransform,
    /// Transform the view settles on.
    pub target: ViewTransform,
    /// Whether an animation is in flight.
    pub animating: bool,
    /// Zoom-compensated stroke width.
    pub stroke_width: f64,
}
