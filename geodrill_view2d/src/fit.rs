// Copyright 2025 the Geodrill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kurbo::{Rect, Size, Vec2};

use crate::transform::ViewTransform;

/// Fraction of the canvas a fitted bounding box fills along its tighter axis.
pub const DEFAULT_FIT_MARGIN: f64 = 0.95;

/// Error returned when a transform cannot be fitted to a bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FitError {
    /// The bounding box has zero or negative width or height, or is not finite.
    InvalidGeometry {
        /// The offending bounds.
        bounds: Rect,
    },
    /// The canvas has zero or negative width or height, or is not finite.
    InvalidCanvas {
        /// The offending canvas size.
        canvas: Size,
    },
}

impl fmt::Display for FitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGeometry { bounds } => {
                write!(f, "cannot fit degenerate bounds {bounds:?}")
            }
            Self::InvalidCanvas { canvas } => write!(f, "cannot fit into canvas {canvas:?}"),
        }
    }
}

impl core::error::Error for FitError {}

/// Computes the uniform transform that centers `bounds` in `canvas`.
///
/// The scale is `margin / max(bw / W, bh / H)`, so the larger relative
/// dimension of the box fills exactly `margin` of the canvas. The translate
/// is `(canvas - s * (min + max)) / 2` per axis, which centers the box.
///
/// ```rust
/// use kurbo::{Rect, Size};
/// use geodrill_view2d::{DEFAULT_FIT_MARGIN, fit_to_bounds};
///
/// let t = fit_to_bounds(
///     Rect::new(0.0, 0.0, 100.0, 50.0),
///     Size::new(400.0, 400.0),
///     DEFAULT_FIT_MARGIN,
/// )
/// .unwrap();
/// assert!((t.scale_x() - 3.8).abs() < 1e-12);
/// ```
///
/// # Errors
///
/// [`FitError::InvalidGeometry`] if the box has no area (a single point or a
/// horizontal/vertical line cannot produce a finite scale), and
/// [`FitError::InvalidCanvas`] if the canvas has no area.
pub fn fit_to_bounds(bounds: Rect, canvas: Size, margin: f64) -> Result<ViewTransform, FitError> {
    let bw = bounds.x1 - bounds.x0;
    let bh = bounds.y1 - bounds.y0;
    if !bounds.is_finite() || bw <= 0.0 || bh <= 0.0 {
        return Err(FitError::InvalidGeometry { bounds });
    }
    if !canvas.is_finite() || canvas.width <= 0.0 || canvas.height <= 0.0 {
        return Err(FitError::InvalidCanvas { canvas });
    }

    let s = margin / (bw / canvas.width).max(bh / canvas.height);
    let translate = Vec2::new(
        (canvas.width - s * (bounds.x0 + bounds.x1)) / 2.0,
        (canvas.height - s * (bounds.y0 + bounds.y1)) / 2.0,
    );
    ViewTransform::uniform(s, translate).ok_or(FitError::InvalidGeometry { bounds })
}

#[cfg(test)]
mod tests {
    use kurbo::{Rect, Size};

    use super::{DEFAULT_FIT_MARGIN, FitError, fit_to_bounds};

    const EPS: f64 = 1e-9;

    fn assert_fits(bounds: Rect, canvas: Size) {
        let t = fit_to_bounds(bounds, canvas, DEFAULT_FIT_MARGIN).unwrap();
        let placed = t.apply_rect(bounds);

        assert!(placed.x0 >= -EPS && placed.x1 <= canvas.width + EPS, "{placed:?}");
        assert!(placed.y0 >= -EPS && placed.y1 <= canvas.height + EPS, "{placed:?}");

        // One axis is filled to the margin exactly.
        let fill_x = placed.width() / canvas.width;
        let fill_y = placed.height() / canvas.height;
        let tight = fill_x.max(fill_y);
        assert!((tight - DEFAULT_FIT_MARGIN).abs() < EPS, "fill {fill_x} {fill_y}");

        // And the box is centered.
        assert!((placed.center().x - canvas.width / 2.0).abs() < 1e-6);
        assert!((placed.center().y - canvas.height / 2.0).abs() < 1e-6);
    }

    #[test]
    fn fits_wide_tall_and_offset_boxes() {
        assert_fits(Rect::new(0.0, 0.0, 100.0, 50.0), Size::new(400.0, 400.0));
        assert_fits(Rect::new(-10.0, 300.0, 5.0, 900.0), Size::new(960.0, 500.0));
        assert_fits(Rect::new(123.4, -56.7, 890.1, 23.4), Size::new(640.0, 480.0));
        assert_fits(Rect::new(0.0, 0.0, 1e-6, 1e-6), Size::new(800.0, 600.0));
    }

    #[test]
    fn formula_matches_reference_values() {
        let t = fit_to_bounds(
            Rect::new(100.0, 100.0, 300.0, 200.0),
            Size::new(800.0, 600.0),
            DEFAULT_FIT_MARGIN,
        )
        .unwrap();
        // max(200/800, 100/600) = 0.25 -> s = 3.8
        assert!((t.scale_x() - 3.8).abs() < EPS);
        assert!(t.is_uniform());
        assert!((t.translate().x - (800.0 - 3.8 * 400.0) / 2.0).abs() < EPS);
        assert!((t.translate().y - (600.0 - 3.8 * 300.0) / 2.0).abs() < EPS);
    }

    #[test]
    fn degenerate_bounds_are_invalid_geometry() {
        let canvas = Size::new(800.0, 600.0);
        for bounds in [
            Rect::new(5.0, 5.0, 5.0, 5.0),
            Rect::new(0.0, 0.0, 10.0, 0.0),
            Rect::new(0.0, 0.0, 0.0, 10.0),
            Rect::new(10.0, 0.0, 0.0, 10.0),
            Rect::new(0.0, 0.0, f64::NAN, 10.0),
            Rect::new(f64::NEG_INFINITY, 0.0, f64::INFINITY, 10.0),
        ] {
            assert!(matches!(
                fit_to_bounds(bounds, canvas, DEFAULT_FIT_MARGIN),
                Err(FitError::InvalidGeometry { .. })
            ));
        }
    }

    #[test]
    fn empty_canvas_is_rejected() {
        let err = fit_to_bounds(
            Rect::new(0.0, 0.0, 1.0, 1.0),
            Size::new(0.0, 600.0),
            DEFAULT_FIT_MARGIN,
        );
        assert!(matches!(err, Err(FitError::InvalidCanvas { .. })));
    }
}
