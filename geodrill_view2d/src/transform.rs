// Copyright 2025 the Geodrill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structured scale + translate transform and its textual attribute form.

use core::fmt;
use core::str::FromStr;

use kurbo::{Affine, Point, Rect, Vec2};

/// A 2D view transform: per-axis scale followed by a translation.
///
/// Mapping a content point `p` into view space is `translate + scale * p`
/// (component-wise). Both scale components are always finite and strictly
/// positive, so the transform never reflects or collapses an axis.
///
/// This is the single source of truth for what the viewport shows. The
/// textual form (see [`fmt::Display`] and [`FromStr`]) only exists for the
/// render boundary, where it is written as a `transform` attribute.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    scale: Vec2,
    translate: Vec2,
}

impl ViewTransform {
    /// The identity transform: unit scale, zero translation.
    pub const IDENTITY: Self = Self {
        scale: Vec2::new(1.0, 1.0),
        translate: Vec2::ZERO,
    };

    /// Creates a transform from explicit scale and translate components.
    ///
    /// Returns `None` if either scale component is not finite and strictly
    /// positive, or if the translation is not finite.
    #[must_use]
    pub fn new(scale: Vec2, translate: Vec2) -> Option<Self> {
        if !valid_scale(scale.x) || !valid_scale(scale.y) || !translate.is_finite() {
            return None;
        }
        Some(Self { scale, translate })
    }

    /// Creates a transform with the same scale on both axes.
    #[must_use]
    pub fn uniform(scale: f64, translate: Vec2) -> Option<Self> {
        Self::new(Vec2::new(scale, scale), translate)
    }

    /// Returns the `(sx, sy)` scale.
    #[must_use]
    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    /// Returns the `(tx, ty)` translation.
    #[must_use]
    pub fn translate(&self) -> Vec2 {
        self.translate
    }

    /// Returns the horizontal scale factor.
    ///
    /// Transforms produced by fitting are uniform, so this is the factor used
    /// for stroke compensation.
    #[must_use]
    pub fn scale_x(&self) -> f64 {
        self.scale.x
    }

    /// Returns `true` if both scale components are equal.
    #[must_use]
    pub fn is_uniform(&self) -> bool {
        self.scale.x == self.scale.y
    }

    /// Returns a copy with the translation offset by `delta`; scale is unchanged.
    ///
    /// Used for live panning, where `delta` is in view pixels.
    #[must_use]
    pub fn compose(self, delta: Vec2) -> Self {
        let translate = self.translate + delta;
        if !translate.is_finite() {
            return self;
        }
        Self {
            scale: self.scale,
            translate,
        }
    }

    /// Scales by `factor` around `center` (in view coordinates).
    ///
    /// `translate' = center + (translate - center) * factor` and
    /// `scale' = scale * factor`, so the content under `center` stays put.
    /// Non-positive or non-finite factors leave the transform unchanged.
    #[must_use]
    pub fn scale_around(self, factor: f64, center: Point) -> Self {
        if !valid_scale(factor) {
            return self;
        }
        let c = center.to_vec2();
        Self::new(self.scale * factor, c + (self.translate - c) * factor).unwrap_or(self)
    }

    /// Linearly interpolates every component towards `other`.
    ///
    /// `t` is clamped to `[0, 1]`. Interpolating between two positive scales
    /// stays positive, so the result is always a valid transform.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = if t.is_nan() { 1.0 } else { t.clamp(0.0, 1.0) };
        Self {
            scale: self.scale + (other.scale - self.scale) * t,
            translate: self.translate + (other.translate - self.translate) * t,
        }
    }

    /// Maps a content-space point into view space.
    #[must_use]
    pub fn apply(&self, pt: Point) -> Point {
        Point::new(
            self.translate.x + self.scale.x * pt.x,
            self.translate.y + self.scale.y * pt.y,
        )
    }

    /// Maps a content-space rectangle into view space.
    #[must_use]
    pub fn apply_rect(&self, rect: Rect) -> Rect {
        Rect::from_points(self.apply(rect.origin()), self.apply(Point::new(rect.x1, rect.y1)))
    }

    /// Returns the equivalent affine matrix.
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.translate) * Affine::scale_non_uniform(self.scale.x, self.scale.y)
    }

    /// Parses an attribute value, falling back to identity when the value is
    /// absent, empty or malformed.
    ///
    /// ```rust
    /// use kurbo::Vec2;
    /// use geodrill_view2d::ViewTransform;
    ///
    /// assert_eq!(ViewTransform::parse_lossy(None), ViewTransform::IDENTITY);
    /// assert_eq!(ViewTransform::parse_lossy(Some("scale(oops")), ViewTransform::IDENTITY);
    ///
    /// let t = ViewTransform::parse_lossy(Some("translate(5,5) scale(2)"));
    /// assert_eq!(t.scale(), Vec2::new(2.0, 2.0));
    /// assert_eq!(t.translate(), Vec2::new(5.0, 5.0));
    /// ```
    #[must_use]
    pub fn parse_lossy(src: Option<&str>) -> Self {
        src.and_then(|s| s.parse().ok()).unwrap_or_default()
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for ViewTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "translate({},{}) scale({},{})",
            self.translate.x, self.translate.y, self.scale.x, self.scale.y
        )
    }
}

fn valid_scale(s: f64) -> bool {
    s.is_finite() && s > 0.0
}

/// What went wrong while parsing a textual transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseTransformErrorKind {
    /// A function name was not followed by `(`.
    ExpectedOpenParen,
    /// The argument list was not closed with `)`.
    UnclosedArguments,
    /// Something other than a function name appeared between functions.
    UnexpectedCharacter,
    /// An argument was not a finite number.
    InvalidNumber,
    /// `translate` or `scale` had no arguments or more than two.
    WrongArity,
    /// A scale component was zero, negative or not finite.
    NonPositiveScale,
}

/// Error returned when a textual transform cannot be parsed.
///
/// Callers at the render boundary normally recover with
/// [`ViewTransform::parse_lossy`] instead of surfacing this.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseTransformError {
    /// The failure category.
    pub kind: ParseTransformErrorKind,
    /// Byte offset into the input where the failure was detected.
    pub offset: usize,
}

impl fmt::Display for ParseTransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            ParseTransformErrorKind::ExpectedOpenParen => "expected `(` after function name",
            ParseTransformErrorKind::UnclosedArguments => "missing `)`",
            ParseTransformErrorKind::UnexpectedCharacter => "unexpected character",
            ParseTransformErrorKind::InvalidNumber => "invalid number",
            ParseTransformErrorKind::WrongArity => "expected one or two arguments",
            ParseTransformErrorKind::NonPositiveScale => "scale must be positive",
        };
        write!(f, "unparseable transform at byte {}: {what}", self.offset)
    }
}

impl core::error::Error for ParseTransformError {}

impl FromStr for ViewTransform {
    type Err = ParseTransformError;

    /// Parses `translate(tx[,ty])` and `scale(sx[,sy])` functions in any order.
    ///
    /// - Missing `translate` means `(0, 0)`; a lone `tx` means `ty = 0`.
    /// - Missing `scale` means `(1, 1)`; a lone `sx` means `sy = sx`.
    /// - Arguments may be separated by commas and/or whitespace.
    /// - Other functions (`rotate`, `matrix`, ...) are skipped.
    /// - An empty or all-whitespace string is the identity.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut translate = Vec2::ZERO;
        let mut scale = Vec2::new(1.0, 1.0);
        let bytes = s.as_bytes();
        let mut pos = 0;

        loop {
            while pos < bytes.len() && (bytes[pos].is_ascii_whitespace() || bytes[pos] == b',') {
                pos += 1;
            }
            if pos == bytes.len() {
                break;
            }

            let name_start = pos;
            while pos < bytes.len() && (bytes[pos].is_ascii_alphabetic()) {
                pos += 1;
            }
            if pos == name_start {
                return Err(error(ParseTransformErrorKind::UnexpectedCharacter, pos));
            }
            let name = &s[name_start..pos];

            while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
                pos += 1;
            }
            if bytes.get(pos) != Some(&b'(') {
                return Err(error(ParseTransformErrorKind::ExpectedOpenParen, pos));
            }
            pos += 1;
            let args_start = pos;
            let Some(close) = s[args_start..].find(')') else {
                return Err(error(ParseTransformErrorKind::UnclosedArguments, s.len()));
            };
            let args_end = args_start + close;
            pos = args_end + 1;

            match name {
                "translate" => {
                    let (x, y) = parse_pair(&s[args_start..args_end], args_start)?;
                    translate = Vec2::new(x, y.unwrap_or(0.0));
                }
                "scale" => {
                    let (x, y) = parse_pair(&s[args_start..args_end], args_start)?;
                    let y = y.unwrap_or(x);
                    if !valid_scale(x) || !valid_scale(y) {
                        return Err(error(ParseTransformErrorKind::NonPositiveScale, args_start));
                    }
                    scale = Vec2::new(x, y);
                }
                _ => {}
            }
        }

        Ok(Self { scale, translate })
    }
}

fn error(kind: ParseTransformErrorKind, offset: usize) -> ParseTransformError {
    ParseTransformError { kind, offset }
}

/// Parses one or two numbers; `base` is the byte offset of `args` in the input.
fn parse_pair(args: &str, base: usize) -> Result<(f64, Option<f64>), ParseTransformError> {
    let mut values = [0.0_f64; 2];
    let mut count = 0;
    for token in args.split(|c: char| c == ',' || c.is_ascii_whitespace()) {
        if token.is_empty() {
            continue;
        }
        if count == values.len() {
            return Err(error(ParseTransformErrorKind::WrongArity, base));
        }
        let offset = base + (token.as_ptr() as usize - args.as_ptr() as usize);
        let value: f64 = token
            .parse()
            .map_err(|_| error(ParseTransformErrorKind::InvalidNumber, offset))?;
        if !value.is_finite() {
            return Err(error(ParseTransformErrorKind::InvalidNumber, offset));
        }
        values[count] = value;
        count += 1;
    }
    match count {
        1 => Ok((values[0], None)),
        2 => Ok((values[0], Some(values[1]))),
        _ => Err(error(ParseTransformErrorKind::WrongArity, base)),
    }
}
