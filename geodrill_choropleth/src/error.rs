// Copyright 2025 the Geodrill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use geodrill_layers::LayerError;
use geodrill_view2d::FitError;

/// Why a navigation operation was rejected.
///
/// A rejected operation leaves the transform, focus, selection and gesture
/// cooldowns exactly as they were.
#[derive(Clone, Debug, PartialEq)]
pub enum NavigationError {
    /// The target bounds cannot be fitted into the canvas.
    InvalidGeometry(FitError),
    /// The target selected no features at all.
    EmptyGeometry,
    /// A layer index outside the stack.
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The stack length at the time of the request.
        len: usize,
    },
    /// A feature index outside its layer.
    UnknownRegion {
        /// The layer index.
        layer: usize,
        /// The requested feature index.
        feature: usize,
    },
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGeometry(err) => write!(f, "invalid geometry: {err}"),
            Self::EmptyGeometry => f.write_str("no features to frame"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "layer index {index} out of range for {len} layers")
            }
            Self::UnknownRegion { layer, feature } => {
                write!(f, "layer {layer} has no feature {feature}")
            }
        }
    }
}

impl core::error::Error for NavigationError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::InvalidGeometry(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FitError> for NavigationError {
    fn from(err: FitError) -> Self {
        Self::InvalidGeometry(err)
    }
}

impl From<LayerError> for NavigationError {
    fn from(err: LayerError) -> Self {
        match err {
            LayerError::IndexOutOfRange { index, len } => Self::IndexOutOfRange { index, len },
            LayerError::EmptyGeometry { .. } => Self::EmptyGeometry,
        }
    }
}
