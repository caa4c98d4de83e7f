// Copyright 2025 the Geodrill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use geodrill_event_state::modifiers::Modifiers;
use geodrill_view2d::{DEFAULT_BASE_STROKE_WIDTH, DEFAULT_FIT_MARGIN};

/// Tunables of a [`GeoChoropleth`](crate::GeoChoropleth).
///
/// Durations are in milliseconds. A zero duration applies the change without
/// animating.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChoroplethConfig {
    /// Fraction of the canvas that fitted bounds fill.
    pub fit_margin: f64,
    /// Animation length when drilling down.
    pub drill_down_duration_ms: u64,
    /// Animation length when rolling up.
    pub roll_up_duration_ms: u64,
    /// How long one wheel gesture suppresses further actions in the same direction.
    pub wheel_cooldown_ms: u64,
    /// Default animation length for focus clicks and programmatic zoom.
    pub transition_duration_ms: u64,
    /// Outline width in view pixels, kept constant across zoom levels.
    pub base_stroke_width: f64,
    /// Modifiers that turn a click into a multi-select click.
    pub multi_select: Modifiers,
    /// How many layers, from the coarsest, take part in wheel navigation.
    ///
    /// `None` means all of them.
    pub zoom_level_count: Option<usize>,
    /// Whether render passes compute region titles.
    pub render_title: bool,
}

impl Default for ChoroplethConfig {
    fn default() -> Self {
        Self {
            fit_margin: DEFAULT_FIT_MARGIN,
            drill_down_duration_ms: 750,
            roll_up_duration_ms: 700,
            wheel_cooldown_ms: 700,
            transition_duration_ms: 750,
            base_stroke_width: DEFAULT_BASE_STROKE_WIDTH,
            multi_select: Modifiers::MULTI_SELECT,
            zoom_level_count: None,
            render_title: true,
        }
    }
}
