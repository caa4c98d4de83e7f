// Copyright 2025 the Geodrill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drill-down / roll-up / pan state machine.
//!
//! [`Navigator`] owns the focus state, the wheel cooldowns and the drag
//! capture. It does not own layers, the projector or the viewport: every
//! operation borrows them through a [`Scene`] and a
//! [`ViewportController`], computes the complete new transform first, and
//! only then commits. A rejected operation changes nothing.
//!
//! The machine is either [`NavState::Idle`] or [`NavState::Animating`],
//! which is read straight off the viewport. Any input may interrupt an
//! animation; the new one starts where the old one had got to.

use alloc::vec::Vec;
use core::fmt;

use geodrill_event_state::cooldown::GestureDebouncer;
use geodrill_event_state::drag::DragState;
use geodrill_event_state::modifiers::Modifiers;
use geodrill_event_state::wheel::{WheelDirection, is_wheel_enabled};
use geodrill_layers::{Layer, LayerStack};
use geodrill_selection::FilterSet;
use geodrill_view2d::{ViewTransform, ViewportController};
use kurbo::Point;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::collaborators::{GeometryProjector, union_bounds};
use crate::config::ChoroplethConfig;
use crate::error::NavigationError;

/// A feature addressed by layer index and position within that layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RegionRef {
    /// Layer index, 0 being the coarsest.
    pub layer: usize,
    /// Feature index within the layer.
    pub feature: usize,
}

impl RegionRef {
    /// Creates a region reference.
    #[must_use]
    pub const fn new(layer: usize, feature: usize) -> Self {
        Self { layer, feature }
    }
}

/// A click on a region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClickEvent {
    /// The region under the pointer.
    pub region: RegionRef,
    /// Modifiers held during the click.
    pub modifiers: Modifiers,
    /// Set when another handler already acted on the underlying input event.
    pub default_prevented: bool,
}

impl ClickEvent {
    /// A plain click on `region`.
    #[must_use]
    pub const fn new(region: RegionRef) -> Self {
        Self {
            region,
            modifiers: Modifiers::empty(),
            default_prevented: false,
        }
    }

    /// Sets the held modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Marks the event as already handled elsewhere.
    #[must_use]
    pub const fn prevented(mut self) -> Self {
        self.default_prevented = true;
        self
    }
}

/// One wheel tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WheelEvent {
    /// The region under the pointer, `None` over the bare canvas.
    pub region: Option<RegionRef>,
    /// What the tick asks for, `None` for a zero delta.
    pub direction: Option<WheelDirection>,
}

impl WheelEvent {
    /// A tick with a standard `deltaY`.
    #[must_use]
    pub fn new(region: Option<RegionRef>, delta_y: f64) -> Self {
        Self {
            region,
            direction: WheelDirection::from_delta(delta_y),
        }
    }

    /// A tick with a legacy `wheelDeltaY`, whose sign is inverted.
    #[must_use]
    pub fn legacy(region: Option<RegionRef>, wheel_delta_y: f64) -> Self {
        Self {
            region,
            direction: WheelDirection::from_legacy_delta(wheel_delta_y),
        }
    }
}

/// What the viewport is framing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Focus<K> {
    /// A whole layer.
    All,
    /// The regions with these keys. Empty when the framed region has no key.
    Regions(SmallVec<[K; 4]>),
}

/// Which layer navigation is at, and what is framed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FocusState<K> {
    /// Index of the layer wheel navigation currently acts on.
    pub current_level: usize,
    /// The framed regions.
    pub focus: Focus<K>,
}

/// Whether a transform interpolation is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavState {
    /// No animation in progress.
    Idle,
    /// The viewport is interpolating towards a new transform.
    Animating,
}

impl NavState {
    /// The state implied by `viewport`.
    #[must_use]
    pub fn of(viewport: &ViewportController) -> Self {
        if viewport.is_animating() {
            Self::Animating
        } else {
            Self::Idle
        }
    }
}

/// What a drill-down framed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrillTarget<K> {
    /// The region under the pointer.
    Region {
        /// Where the region lives.
        region: RegionRef,
        /// Its key, if its layer has a key accessor.
        key: Option<K>,
    },
    /// The regions of the current selection.
    Selection(Vec<K>),
}

/// The visible result of a navigation input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavOutcome<K> {
    /// The input did not apply; nothing changed.
    Ignored,
    /// The filter toggled and the viewport moves to frame the result.
    Focused,
    /// The filter toggled on the active drill target; the viewport stays.
    Toggled,
    /// Navigation moved into a narrower context.
    DrilledDown(DrillTarget<K>),
    /// Navigation moved up to the layer at `level`.
    RolledUp {
        /// The new current level.
        level: usize,
    },
    /// Already at the coarsest layer; it was framed again.
    Refitted,
    /// The view followed the pointer.
    Panned,
}

impl<K> NavOutcome<K> {
    /// Returns `true` unless the input was ignored.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Borrowed inputs every navigation step reads.
pub struct Scene<'a, F, K> {
    /// The layer stack.
    pub layers: &'a LayerStack<F, K>,
    /// Projects features for bounds computation.
    pub projector: &'a dyn GeometryProjector<F>,
    /// Durations, margins and modifier masks.
    pub config: &'a ChoroplethConfig,
}

impl<F, K> fmt::Debug for Scene<'_, F, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("layers", &self.layers.len())
            .field("projector", &"dyn GeometryProjector")
            .field("config", self.config)
            .finish()
    }
}

impl<F, K> Scene<'_, F, K> {
    /// Index of the deepest layer wheel navigation can reach.
    #[must_use]
    pub fn last_level(&self) -> usize {
        let len = self.layers.len();
        let participating = self
            .config
            .zoom_level_count
            .map_or(len, |count| count.min(len));
        participating.saturating_sub(1)
    }

    /// The transform that frames every feature of the layer at `index`.
    pub fn fit_layer(
        &self,
        viewport: &ViewportController,
        index: usize,
    ) -> Result<ViewTransform, NavigationError> {
        let layer = self.layers.layer_at(index)?;
        self.fit_features(viewport, layer.features())
    }

    /// The transform that frames a single region.
    pub fn fit_region(
        &self,
        viewport: &ViewportController,
        region: RegionRef,
    ) -> Result<ViewTransform, NavigationError> {
        let (_, feature) = self.region(region)?;
        Ok(viewport.fit(self.projector.bounds(feature))?)
    }

    fn region(&self, region: RegionRef) -> Result<(&Layer<F, K>, &F), NavigationError> {
        let layer = self.layers.layer_at(region.layer)?;
        let feature = layer
            .features()
            .get(region.feature)
            .ok_or(NavigationError::UnknownRegion {
                layer: region.layer,
                feature: region.feature,
            })?;
        Ok((layer, feature))
    }

    fn fit_features<'f>(
        &self,
        viewport: &ViewportController,
        features: impl IntoIterator<Item = &'f F>,
    ) -> Result<ViewTransform, NavigationError>
    where
        F: 'f,
    {
        let bounds = union_bounds(self.projector, features).ok_or(NavigationError::EmptyGeometry)?;
        Ok(viewport.fit(bounds)?)
    }
}

/// The navigation state machine of one map.
#[derive(Clone, Debug)]
pub struct Navigator<K> {
    focus: Option<FocusState<K>>,
    active_drill: Option<RegionRef>,
    debouncer: GestureDebouncer<WheelDirection>,
    drag: DragState<ViewTransform>,
}

impl<K> Default for Navigator<K> {
    fn default() -> Self {
        Self {
            focus: None,
            active_drill: None,
            debouncer: GestureDebouncer::new(),
            drag: DragState::default(),
        }
    }
}

impl<K> Navigator<K> {
    /// Creates a navigator. Focus is initialized on first use.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The focus state, `None` before the first render or input.
    #[must_use]
    pub fn focus(&self) -> Option<&FocusState<K>> {
        self.focus.as_ref()
    }

    /// The region the last drill-down framed, while it is still framed.
    #[must_use]
    pub fn active_drill_target(&self) -> Option<RegionRef> {
        self.active_drill
    }

    /// The wheel cooldowns.
    #[must_use]
    pub fn debouncer(&self) -> &GestureDebouncer<WheelDirection> {
        &self.debouncer
    }

    /// Returns `true` while a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Current level, clamped to the levels `scene` allows.
    #[must_use]
    pub fn current_level<F>(&self, scene: &Scene<'_, F, K>) -> usize {
        let last = scene.last_level();
        self.focus
            .as_ref()
            .map_or(last, |state| state.current_level.min(last))
    }

    /// Returns to the initial state: deepest level, whole layer in focus.
    pub fn reset<F>(&mut self, scene: &Scene<'_, F, K>) {
        self.focus = Some(FocusState {
            current_level: scene.last_level(),
            focus: Focus::All,
        });
        self.active_drill = None;
    }

    /// Resets cooldowns whose window has elapsed.
    pub fn expire(&mut self, now_ms: u64) {
        self.debouncer.expire(now_ms);
    }

    /// Cancels every cooldown and any drag in progress.
    pub fn teardown(&mut self) {
        self.debouncer.cancel_all();
        self.drag.end();
    }

    /// Captures the pointer and the view as a drag begins.
    ///
    /// Any running animation freezes where it is, so the drag starts from
    /// what is on screen.
    pub fn drag_start(&mut self, viewport: &mut ViewportController, pos: Point, now_ms: u64) {
        viewport.cancel_animation(now_ms);
        self.drag.start(pos, viewport.current());
        self.active_drill = None;
        trace!(x = pos.x, y = pos.y, "drag started");
    }

    /// Moves the view 1:1 with the pointer, without animating.
    pub fn drag_move(&mut self, viewport: &mut ViewportController, pos: Point) -> NavOutcome<K> {
        match self.drag.offset(pos) {
            Some((offset, start)) => {
                viewport.set_transform(start.compose(offset));
                NavOutcome::Panned
            }
            None => NavOutcome::Ignored,
        }
    }

    /// Ends a drag. The last panned transform stays.
    ///
    /// Returns `false` if no drag was in progress.
    pub fn drag_end(&mut self) -> bool {
        self.drag.end().is_some()
    }

    /// Forgets the drill target after the view moved away from it.
    ///
    /// Call this whenever the viewport is changed outside the navigator.
    pub fn release_drill_target(&mut self) {
        self.active_drill = None;
    }

    fn focus_mut<F>(&mut self, scene: &Scene<'_, F, K>) -> &mut FocusState<K> {
        let last = scene.last_level();
        let state = self.focus.get_or_insert_with(|| FocusState {
            current_level: last,
            focus: Focus::All,
        });
        state.current_level = state.current_level.min(last);
        state
    }
}

impl<K> Navigator<K>
where
    K: Clone + PartialEq + fmt::Display,
{
    /// Handles a click on a region.
    ///
    /// - Default-prevented clicks and clicks on regions without a key do nothing.
    /// - On the active drill target, a plain click only toggles its filter.
    /// - A plain click toggles the filter and frames the clicked region.
    /// - A multi-select click toggles the filter and frames every region of
    ///   the clicked layer that ends up selected, or the finest layer when
    ///   none is.
    ///
    /// The current level never changes.
    pub fn click<F, S>(
        &mut self,
        scene: &Scene<'_, F, K>,
        viewport: &mut ViewportController,
        filters: &mut S,
        event: ClickEvent,
        now_ms: u64,
    ) -> Result<NavOutcome<K>, NavigationError>
    where
        S: FilterSet<K> + ?Sized,
    {
        if event.default_prevented {
            trace!("click ignored: default action already handled");
            return Ok(NavOutcome::Ignored);
        }
        let (layer, feature) = scene.region(event.region)?;
        let Some(key) = layer.key_of(feature) else {
            trace!(layer = event.region.layer, "click ignored: region has no key");
            return Ok(NavOutcome::Ignored);
        };
        let multi = event.modifiers.any_of(scene.config.multi_select);

        if !multi && self.active_drill == Some(event.region) {
            filters.toggle_filter(key.clone());
            filters.notify_filters_changed();
            debug!(key = %key, "toggled filter on drill target");
            return Ok(NavOutcome::Toggled);
        }

        let (target, focus) = if multi {
            let mut keys = SmallVec::<[K; 4]>::new();
            let mut framed = Vec::new();
            for candidate in layer.features() {
                let Some(k) = layer.key_of(candidate) else {
                    continue;
                };
                // Membership as it will be once `key` has toggled.
                if filters.has_filter(&k) != (k == key) {
                    framed.push(candidate);
                    if !keys.contains(&k) {
                        keys.push(k);
                    }
                }
            }
            if framed.is_empty() {
                let finest = scene.layers.finest().map_or(&[][..], Layer::features);
                (scene.fit_features(viewport, finest)?, Focus::All)
            } else {
                (scene.fit_features(viewport, framed)?, Focus::Regions(keys))
            }
        } else {
            let bounds = scene.projector.bounds(feature);
            let mut keys = SmallVec::new();
            keys.push(key.clone());
            (viewport.fit(bounds)?, Focus::Regions(keys))
        };

        filters.toggle_filter(key.clone());
        filters.notify_filters_changed();
        viewport.animate_to(target, scene.config.transition_duration_ms, now_ms);
        self.focus_mut(scene).focus = focus;
        self.active_drill = None;
        debug!(key = %key, multi, "focused on click");
        Ok(NavOutcome::Focused)
    }

    /// Drills into `target`, or into the current selection when there is no target.
    ///
    /// Frames the target over the drill-down duration and advances the
    /// current level by one, stopping at the deepest participating level.
    /// With neither a target nor an active filter this does nothing.
    ///
    /// This is not debounced; [`wheel`](Self::wheel) is.
    pub fn drill_down<F, S>(
        &mut self,
        scene: &Scene<'_, F, K>,
        viewport: &mut ViewportController,
        filters: &S,
        target: Option<RegionRef>,
        now_ms: u64,
    ) -> Result<NavOutcome<K>, NavigationError>
    where
        S: FilterSet<K> + ?Sized,
    {
        match target {
            Some(region) => self.drill_into_region(scene, viewport, region, now_ms),
            None if filters.has_any_filter() => {
                self.drill_into_selection(scene, viewport, filters, now_ms)
            }
            None => {
                trace!("drill-down ignored: no target and no active filter");
                Ok(NavOutcome::Ignored)
            }
        }
    }

    /// Rolls up one level.
    ///
    /// Frames the next coarser layer over the roll-up duration and moves the
    /// current level there. At the coarsest layer it frames that layer again
    /// and leaves the level alone.
    pub fn roll_up<F>(
        &mut self,
        scene: &Scene<'_, F, K>,
        viewport: &mut ViewportController,
        now_ms: u64,
    ) -> Result<NavOutcome<K>, NavigationError> {
        if scene.layers.is_empty() {
            trace!("roll-up ignored: no layers");
            return Ok(NavOutcome::Ignored);
        }
        let level = self.current_level(scene);
        let target_level = level.saturating_sub(1);
        let target = scene.fit_layer(viewport, target_level)?;

        viewport.animate_to(target, scene.config.roll_up_duration_ms, now_ms);
        let state = self.focus_mut(scene);
        state.current_level = target_level;
        state.focus = Focus::All;
        self.active_drill = None;

        if target_level == level {
            debug!(level, "re-fitted coarsest layer");
            Ok(NavOutcome::Refitted)
        } else {
            debug!(from = level, to = target_level, "rolled up");
            Ok(NavOutcome::RolledUp {
                level: target_level,
            })
        }
    }

    /// Handles a wheel tick, at most one action per direction per cooldown window.
    ///
    /// Ticks over a region only count when its layer is the current level
    /// and takes part in wheel navigation. A zoom-in tick drills into the
    /// region under the pointer, or into the active selection when the
    /// pointer is over the bare canvas.
    pub fn wheel<F, S>(
        &mut self,
        scene: &Scene<'_, F, K>,
        viewport: &mut ViewportController,
        filters: &S,
        event: WheelEvent,
        now_ms: u64,
    ) -> Result<NavOutcome<K>, NavigationError>
    where
        S: FilterSet<K> + ?Sized,
    {
        let Some(direction) = event.direction else {
            trace!("wheel ignored: zero delta");
            return Ok(NavOutcome::Ignored);
        };
        if let Some(region) = event.region {
            let level = self.current_level(scene);
            if !is_wheel_enabled(region.layer, level, scene.config.zoom_level_count) {
                trace!(layer = region.layer, level, "wheel ignored: layer not active");
                return Ok(NavOutcome::Ignored);
            }
        }
        if self.debouncer.is_suppressed(&direction, now_ms) {
            trace!(%direction, "wheel ignored: cooling down");
            return Ok(NavOutcome::Ignored);
        }

        let outcome = match direction {
            WheelDirection::RollUp => self.roll_up(scene, viewport, now_ms)?,
            WheelDirection::DrillDown => match event.region {
                Some(region) => self.drill_into_region(scene, viewport, region, now_ms)?,
                None if filters.has_any_filter() => {
                    self.drill_into_selection(scene, viewport, filters, now_ms)?
                }
                None => {
                    trace!("wheel ignored: nothing to drill into over the canvas");
                    return Ok(NavOutcome::Ignored);
                }
            },
        };
        if outcome.is_applied() {
            self.debouncer
                .try_acquire(direction, scene.config.wheel_cooldown_ms, now_ms);
        }
        Ok(outcome)
    }

    fn drill_into_region<F>(
        &mut self,
        scene: &Scene<'_, F, K>,
        viewport: &mut ViewportController,
        region: RegionRef,
        now_ms: u64,
    ) -> Result<NavOutcome<K>, NavigationError> {
        let target = scene.fit_region(viewport, region)?;
        let (layer, feature) = scene.region(region)?;
        let key = layer.key_of(feature);
        let keys = key.iter().cloned().collect();

        self.commit_drill(scene, viewport, target, keys, now_ms);
        self.active_drill = Some(region);
        Ok(NavOutcome::DrilledDown(DrillTarget::Region { region, key }))
    }

    fn drill_into_selection<F, S>(
        &mut self,
        scene: &Scene<'_, F, K>,
        viewport: &mut ViewportController,
        filters: &S,
        now_ms: u64,
    ) -> Result<NavOutcome<K>, NavigationError>
    where
        S: FilterSet<K> + ?Sized,
    {
        // Selection keys come from the current level when it carries data,
        // otherwise from the finest layer.
        let level = self.current_level(scene);
        let layer = match scene.layers.layer_at(level)? {
            layer if layer.is_data_layer() => layer,
            _ => scene.layers.layer_at(scene.layers.len() - 1)?,
        };

        let mut keys = SmallVec::<[K; 4]>::new();
        let mut framed = Vec::new();
        for feature in layer.features() {
            if let Some(k) = layer.key_of(feature).filter(|k| filters.has_filter(k)) {
                framed.push(feature);
                if !keys.contains(&k) {
                    keys.push(k);
                }
            }
        }
        if framed.is_empty() {
            trace!(layer = layer.id(), "drill-down ignored: selection frames no region");
            return Ok(NavOutcome::Ignored);
        }
        let target = scene.fit_features(viewport, framed)?;

        let selected = keys.to_vec();
        self.commit_drill(scene, viewport, target, keys, now_ms);
        self.active_drill = None;
        Ok(NavOutcome::DrilledDown(DrillTarget::Selection(selected)))
    }

    fn commit_drill<F>(
        &mut self,
        scene: &Scene<'_, F, K>,
        viewport: &mut ViewportController,
        target: ViewTransform,
        keys: SmallVec<[K; 4]>,
        now_ms: u64,
    ) {
        viewport.animate_to(target, scene.config.drill_down_duration_ms, now_ms);
        let last = scene.last_level();
        let state = self.focus_mut(scene);
        let from = state.current_level;
        state.current_level = (from + 1).min(last);
        state.focus = Focus::Regions(keys);
        debug!(from, to = state.current_level, "drilled down");
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;

    use geodrill_event_state::modifiers::Modifiers;
    use geodrill_layers::LayerStack;
    use geodrill_selection::{FilterSet, Selection};
    use geodrill_view2d::{ViewTransform, ViewportController};
    use kurbo::{Point, Rect, Size, Vec2};

    use super::{
        ClickEvent, DrillTarget, Focus, NavOutcome, NavState, Navigator, RegionRef, Scene,
        WheelEvent,
    };
    use crate::config::ChoroplethConfig;
    use crate::error::NavigationError;

    type Feature = (&'static str, Rect);

    fn keyed() -> Option<geodrill_layers::KeyAccessor<Feature, &'static str>> {
        Some(Rc::new(|f: &Feature| Some(f.0)))
    }

    fn bounds(f: &Feature) -> Rect {
        f.1
    }

    /// country > state > county, all fitting in 400x200.
    fn stack() -> LayerStack<Feature, &'static str> {
        let mut layers = LayerStack::new();
        layers
            .overlay("country", vec![("USA", Rect::new(0.0, 0.0, 400.0, 200.0))], None)
            .unwrap();
        layers
            .overlay(
                "state",
                vec![
                    ("TX", Rect::new(100.0, 100.0, 200.0, 200.0)),
                    ("CA", Rect::new(0.0, 0.0, 100.0, 100.0)),
                ],
                keyed(),
            )
            .unwrap();
        layers
            .overlay(
                "county",
                vec![
                    ("Travis", Rect::new(150.0, 150.0, 160.0, 160.0)),
                    ("Marin", Rect::new(10.0, 10.0, 20.0, 20.0)),
                ],
                keyed(),
            )
            .unwrap();
        layers
    }

    fn viewport() -> ViewportController {
        ViewportController::new(Size::new(400.0, 200.0))
    }

    #[test]
    fn initial_state_is_deepest_level() {
        let layers = stack();
        let config = ChoroplethConfig::default();
        let scene = Scene {
            layers: &layers,
            projector: &bounds,
            config: &config,
        };
        let mut nav = Navigator::<&str>::new();
        assert_eq!(nav.current_level(&scene), 2);
        nav.reset(&scene);
        assert_eq!(nav.focus().unwrap().focus, Focus::All);

        let config = ChoroplethConfig {
            zoom_level_count: Some(2),
            ..ChoroplethConfig::default()
        };
        let scene = Scene {
            config: &config,
            ..scene
        };
        assert_eq!(nav.current_level(&scene), 1);
    }

    #[test]
    fn plain_click_toggles_and_frames_region() {
        let layers = stack();
        let config = ChoroplethConfig::default();
        let scene = Scene {
            layers: &layers,
            projector: &bounds,
            config: &config,
        };
        let mut nav = Navigator::new();
        let mut view = viewport();
        let mut filters = Selection::new();

        let outcome = nav
            .click(&scene, &mut view, &mut filters, ClickEvent::new(RegionRef::new(1, 0)), 0)
            .unwrap();
        assert_eq!(outcome, NavOutcome::Focused);
        assert!(filters.has_filter(&"TX"));
        assert!(!filters.has_unannounced_changes());
        assert_eq!(view.target(), view.fit(Rect::new(100.0, 100.0, 200.0, 200.0)).unwrap());
        assert_eq!(NavState::of(&view), NavState::Animating);
        assert_eq!(nav.current_level(&scene), 2);
    }

    #[test]
    fn ignored_clicks_change_nothing() {
        let layers = stack();
        let config = ChoroplethConfig::default();
        let scene = Scene {
            layers: &layers,
            projector: &bounds,
            config: &config,
        };
        let mut nav = Navigator::new();
        let mut view = viewport();
        let mut filters = Selection::new();

        let prevented = ClickEvent::new(RegionRef::new(1, 0)).prevented();
        assert_eq!(
            nav.click(&scene, &mut view, &mut filters, prevented, 0),
            Ok(NavOutcome::Ignored)
        );
        let backdrop = ClickEvent::new(RegionRef::new(0, 0));
        assert_eq!(
            nav.click(&scene, &mut view, &mut filters, backdrop, 0),
            Ok(NavOutcome::Ignored)
        );
        let missing = ClickEvent::new(RegionRef::new(1, 9));
        assert_eq!(
            nav.click(&scene, &mut view, &mut filters, missing, 0),
            Err(NavigationError::UnknownRegion {
                layer: 1,
                feature: 9
            })
        );
        assert!(filters.is_empty());
        assert_eq!(view.target(), ViewTransform::IDENTITY);
    }

    #[test]
    fn multi_select_frames_union_then_falls_back() {
        let layers = stack();
        let config = ChoroplethConfig::default();
        let scene = Scene {
            layers: &layers,
            projector: &bounds,
            config: &config,
        };
        let mut nav = Navigator::new();
        let mut view = viewport();
        let mut filters = Selection::new();
        let shift = |region| ClickEvent::new(region).with_modifiers(Modifiers::SHIFT);

        nav.click(&scene, &mut view, &mut filters, shift(RegionRef::new(1, 0)), 0)
            .unwrap();
        nav.click(&scene, &mut view, &mut filters, shift(RegionRef::new(1, 1)), 10)
            .unwrap();
        assert_eq!(filters.items(), &["TX", "CA"]);
        assert_eq!(view.target(), view.fit(Rect::new(0.0, 0.0, 200.0, 200.0)).unwrap());
        let Focus::Regions(keys) = &nav.focus().unwrap().focus else {
            panic!("expected region focus");
        };
        assert_eq!(keys.as_slice(), &["TX", "CA"]);

        nav.click(&scene, &mut view, &mut filters, shift(RegionRef::new(1, 0)), 20)
            .unwrap();
        nav.click(&scene, &mut view, &mut filters, shift(RegionRef::new(1, 1)), 30)
            .unwrap();
        assert!(filters.is_empty());
        // Union of the county layer.
        assert_eq!(view.target(), view.fit(Rect::new(10.0, 10.0, 160.0, 160.0)).unwrap());
        assert_eq!(nav.focus().unwrap().focus, Focus::All);
    }

    #[test]
    fn roll_up_walks_to_coarsest_then_refits() {
        let layers = stack();
        let config = ChoroplethConfig::default();
        let scene = Scene {
            layers: &layers,
            projector: &bounds,
            config: &config,
        };
        let mut nav = Navigator::new();
        let mut view = viewport();

        assert_eq!(
            nav.roll_up(&scene, &mut view, 0),
            Ok(NavOutcome::RolledUp { level: 1 })
        );
        assert_eq!(view.animation().unwrap().duration_ms(), 700);
        assert_eq!(
            nav.roll_up(&scene, &mut view, 10),
            Ok(NavOutcome::RolledUp { level: 0 })
        );
        let coarsest = view.target();
        assert_eq!(nav.roll_up(&scene, &mut view, 20), Ok(NavOutcome::Refitted));
        assert_eq!(nav.current_level(&scene), 0);
        assert_eq!(view.target(), coarsest);
    }

    #[test]
    fn drill_down_into_selection() {
        let layers = stack();
        let config = ChoroplethConfig::default();
        let scene = Scene {
            layers: &layers,
            projector: &bounds,
            config: &config,
        };
        let mut nav = Navigator::new();
        let mut view = viewport();
        let mut filters = Selection::new();

        assert_eq!(
            nav.drill_down(&scene, &mut view, &filters, None, 0),
            Ok(NavOutcome::Ignored)
        );

        nav.roll_up(&scene, &mut view, 0).unwrap();
        filters.toggle_filter("CA");
        let outcome = nav.drill_down(&scene, &mut view, &filters, None, 100).unwrap();
        assert_eq!(outcome, NavOutcome::DrilledDown(DrillTarget::Selection(vec!["CA"])));
        assert_eq!(nav.current_level(&scene), 2);
        assert_eq!(view.target(), view.fit(Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap());
        assert_eq!(view.animation().unwrap().duration_ms(), 750);
        assert_eq!(nav.active_drill_target(), None);
    }

    #[test]
    fn wheel_bursts_drill_once() {
        let layers = stack();
        let config = ChoroplethConfig::default();
        let scene = Scene {
            layers: &layers,
            projector: &bounds,
            config: &config,
        };
        let mut nav = Navigator::new();
        let mut view = viewport();
        let filters = Selection::<&str>::new();
        nav.roll_up(&scene, &mut view, 0).unwrap();
        assert_eq!(nav.current_level(&scene), 1);

        let over_tx = WheelEvent::new(Some(RegionRef::new(1, 0)), -3.0);
        let mut applied = Vec::new();
        for now in [1000, 1010, 1020, 1030] {
            let outcome = nav.wheel(&scene, &mut view, &filters, over_tx, now).unwrap();
            if outcome.is_applied() {
                applied.push(outcome);
            }
        }
        assert_eq!(applied.len(), 1);
        assert_eq!(nav.current_level(&scene), 2);
        assert_eq!(nav.active_drill_target(), Some(RegionRef::new(1, 0)));
        assert!(nav.debouncer().is_suppressed(
            &geodrill_event_state::wheel::WheelDirection::DrillDown,
            1500
        ));
    }

    #[test]
    fn wheel_over_canvas_drills_into_selection() {
        let layers = stack();
        let config = ChoroplethConfig::default();
        let scene = Scene {
            layers: &layers,
            projector: &bounds,
            config: &config,
        };
        let mut nav = Navigator::new();
        let mut view = viewport();
        let mut filters = Selection::new();
        nav.roll_up(&scene, &mut view, 0).unwrap();
        filters.toggle_filter("TX");

        let over_canvas = WheelEvent::new(None, -3.0);
        assert_eq!(
            nav.wheel(&scene, &mut view, &filters, over_canvas, 1000),
            Ok(NavOutcome::DrilledDown(DrillTarget::Selection(vec!["TX"])))
        );
        assert_eq!(nav.current_level(&scene), 2);
        assert_eq!(view.target(), view.fit(Rect::new(100.0, 100.0, 200.0, 200.0)).unwrap());
        assert_eq!(
            nav.wheel(&scene, &mut view, &filters, over_canvas, 1010),
            Ok(NavOutcome::Ignored)
        );

        // A selection with no region on the selection layer claims no cooldown.
        let mut nav = Navigator::new();
        let mut view = viewport();
        let mut stray = Selection::new();
        stray.toggle_filter("Atlantis");
        assert_eq!(
            nav.wheel(&scene, &mut view, &stray, over_canvas, 0),
            Ok(NavOutcome::Ignored)
        );
        assert_eq!(nav.debouncer().active_count(0), 0);
    }

    #[test]
    fn focusing_elsewhere_releases_drill_target() {
        let layers = stack();
        let config = ChoroplethConfig::default();
        let scene = Scene {
            layers: &layers,
            projector: &bounds,
            config: &config,
        };
        let mut nav = Navigator::new();
        let mut view = viewport();
        let mut filters = Selection::new();
        nav.roll_up(&scene, &mut view, 0).unwrap();

        let tx = RegionRef::new(1, 0);
        nav.drill_down(&scene, &mut view, &filters, Some(tx), 10).unwrap();
        assert_eq!(nav.active_drill_target(), Some(tx));
        let ca = ClickEvent::new(RegionRef::new(1, 1));
        assert_eq!(
            nav.click(&scene, &mut view, &mut filters, ca, 20),
            Ok(NavOutcome::Focused)
        );
        assert_eq!(nav.active_drill_target(), None);

        assert_eq!(
            nav.click(&scene, &mut view, &mut filters, ClickEvent::new(tx), 30),
            Ok(NavOutcome::Focused)
        );
        assert_eq!(view.target(), view.fit(Rect::new(100.0, 100.0, 200.0, 200.0)).unwrap());

        // Dragging away also releases it.
        nav.drill_down(&scene, &mut view, &filters, Some(tx), 40).unwrap();
        nav.drag_start(&mut view, Point::new(1.0, 1.0), 50);
        assert_eq!(nav.active_drill_target(), None);
    }

    #[test]
    fn wheel_gating() {
        let layers = stack();
        let config = ChoroplethConfig::default();
        let scene = Scene {
            layers: &layers,
            projector: &bounds,
            config: &config,
        };
        let mut nav = Navigator::<&str>::new();
        let mut view = viewport();
        let filters = Selection::<&str>::new();

        // Zero delta, inactive layer, drill over canvas with nothing selected.
        for event in [
            WheelEvent::new(Some(RegionRef::new(2, 0)), 0.0),
            WheelEvent::new(Some(RegionRef::new(1, 0)), -1.0),
            WheelEvent::new(None, -1.0),
        ] {
            assert_eq!(
                nav.wheel(&scene, &mut view, &filters, event, 0),
                Ok(NavOutcome::Ignored)
            );
        }
        assert_eq!(nav.debouncer().active_count(0), 0);

        // Legacy delta: positive is zoom-in.
        let legacy = WheelEvent::legacy(None, -120.0);
        assert_eq!(
            nav.wheel(&scene, &mut view, &filters, legacy, 0),
            Ok(NavOutcome::RolledUp { level: 1 })
        );
    }

    #[test]
    fn failed_drill_leaves_state_and_cooldown() {
        let mut layers = stack();
        layers
            .overlay("county", vec![("Dot", Rect::new(5.0, 5.0, 5.0, 5.0))], keyed())
            .unwrap();
        let config = ChoroplethConfig::default();
        let scene = Scene {
            layers: &layers,
            projector: &bounds,
            config: &config,
        };
        let mut nav = Navigator::new();
        let mut view = viewport();
        nav.reset(&scene);
        let before = nav.focus().cloned();
        let filters = Selection::<&str>::new();

        let event = WheelEvent::new(Some(RegionRef::new(2, 0)), -1.0);
        assert!(matches!(
            nav.wheel(&scene, &mut view, &filters, event, 0),
            Err(NavigationError::InvalidGeometry(_))
        ));
        assert_eq!(nav.focus().cloned(), before);
        assert_eq!(view.target(), ViewTransform::IDENTITY);
        assert_eq!(nav.debouncer().active_count(0), 0);
    }

    #[test]
    fn drag_pans_one_to_one_and_interrupts_animation() {
        let layers = stack();
        let config = ChoroplethConfig::default();
        let scene = Scene {
            layers: &layers,
            projector: &bounds,
            config: &config,
        };
        let mut nav = Navigator::<&str>::new();
        let mut view = viewport();
        nav.roll_up(&scene, &mut view, 0).unwrap();
        let mid = view.transform_at(350);

        nav.drag_start(&mut view, Point::new(50.0, 50.0), 350);
        assert!(!view.is_animating());
        assert_eq!(view.current(), mid);

        assert_eq!(nav.drag_move(&mut view, Point::new(60.0, 45.0)), NavOutcome::Panned);
        assert_eq!(view.current(), mid.compose(Vec2::new(10.0, -5.0)));
        nav.drag_move(&mut view, Point::new(70.0, 50.0));
        assert_eq!(view.current(), mid.compose(Vec2::new(20.0, 0.0)));

        assert!(nav.drag_end());
        assert!(!nav.drag_end());
        assert_eq!(nav.drag_move(&mut view, Point::new(0.0, 0.0)), NavOutcome::Ignored);
        assert_eq!(view.current(), mid.compose(Vec2::new(20.0, 0.0)));
    }
}
