// Copyright 2025 the Geodrill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wheel ticks as drill-down / roll-up candidates.

use core::fmt;

/// What a wheel tick asks the map to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WheelDirection {
    /// Zoom in: focus on something narrower.
    DrillDown,
    /// Zoom out: go back to something broader.
    RollUp,
}

impl WheelDirection {
    /// Classifies a standard `deltaY`. Negative is zoom-in; zero is ignored.
    #[must_use]
    pub fn from_delta(delta_y: f64) -> Option<Self> {
        if delta_y < 0.0 {
            Some(Self::DrillDown)
        } else if delta_y > 0.0 {
            Some(Self::RollUp)
        } else {
            None
        }
    }

    /// Classifies a legacy `wheelDeltaY`, whose sign is the opposite of `deltaY`.
    #[must_use]
    pub fn from_legacy_delta(wheel_delta_y: f64) -> Option<Self> {
        Self::from_delta(-wheel_delta_y)
    }

    /// Cooldown key for this direction.
    #[must_use]
    pub fn action_name(self) -> &'static str {
        match self {
            Self::DrillDown => "drillDown",
            Self::RollUp => "rollUp",
        }
    }
}

impl fmt::Display for WheelDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.action_name())
    }
}

/// Whether wheel input over a region of `layer_index` should be honored.
///
/// Only the first `zoom_level_count` layers (counting from the coarsest)
/// take part in wheel navigation, and of those only the layer currently in
/// focus reacts; the rest are static backdrops. `None` means every layer
/// participates.
///
/// ```
/// use geodrill_event_state::wheel::is_wheel_enabled;
///
/// assert!(is_wheel_enabled(2, 2, None));
/// assert!(!is_wheel_enabled(1, 2, None));
/// assert!(!is_wheel_enabled(2, 2, Some(2)));
/// ```
#[must_use]
pub fn is_wheel_enabled(
    layer_index: usize,
    current_level: usize,
    zoom_level_count: Option<usize>,
) -> bool {
    let participates = zoom_level_count.is_none_or(|count| layer_index < count);
    participates && layer_index == current_level
}

#[cfg(test)]
mod tests {
    use super::{WheelDirection, is_wheel_enabled};

    #[test]
    fn delta_sign_maps_to_direction() {
        assert_eq!(WheelDirection::from_delta(-3.0), Some(WheelDirection::DrillDown));
        assert_eq!(WheelDirection::from_delta(120.0), Some(WheelDirection::RollUp));
        assert_eq!(WheelDirection::from_delta(0.0), None);
        assert_eq!(WheelDirection::from_delta(-0.0), None);
        assert_eq!(WheelDirection::from_delta(f64::NAN), None);
    }

    #[test]
    fn legacy_delta_is_inverted() {
        assert_eq!(
            WheelDirection::from_legacy_delta(120.0),
            Some(WheelDirection::DrillDown)
        );
        assert_eq!(
            WheelDirection::from_legacy_delta(-120.0),
            Some(WheelDirection::RollUp)
        );
        assert_eq!(WheelDirection::from_legacy_delta(0.0), None);
    }

    #[test]
    fn action_names_are_distinct() {
        assert_eq!(WheelDirection::DrillDown.action_name(), "drillDown");
        assert_eq!(WheelDirection::RollUp.action_name(), "rollUp");
    }

    #[test]
    fn wheel_enabled_only_on_current_participating_level() {
        for layer in 0..4 {
            assert_eq!(is_wheel_enabled(layer, 1, None), layer == 1);
        }
        assert!(is_wheel_enabled(0, 0, Some(1)));
        assert!(!is_wheel_enabled(1, 1, Some(1)));
        assert!(!is_wheel_enabled(0, 0, Some(0)));
    }
}
