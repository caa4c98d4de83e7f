// Copyright 2025 the Geodrill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;

use geodrill_event_state::wheel::is_wheel_enabled;
use geodrill_layers::{AggregateMap, KeyAccessor, Layer, LayerError, LayerStack};
use geodrill_selection::FilterSet;
use geodrill_view2d::{ViewTransform, ViewportController};
use kurbo::{Point, Size, Vec2};
use tracing::{debug, warn};

use crate::collaborators::{ColorMapping, GeometryProjector};
use crate::config::ChoroplethConfig;
use crate::error::NavigationError;
use crate::navigation::{
    ClickEvent, DrillTarget, FocusState, NavOutcome, NavState, Navigator, RegionRef, Scene,
    WheelEvent,
};
use crate::render::{self, LayerPass, RenderPass, TitleFn};

/// Called with what was drilled into.
pub type DrillDownCallback<K> = Box<dyn FnMut(&DrillTarget<K>)>;

/// Called when navigation moves up a level.
pub type RollUpCallback = Box<dyn FnMut()>;

/// A hierarchical choropleth map.
///
/// Owns the layer stack, the viewport and the navigation state. Borrows the
/// shared filter set and the color mapping per call, since both belong to the
/// host and may change between calls.
///
/// Every input method returns the [`NavOutcome`] it produced. Drill-down and
/// roll-up outcomes also invoke the registered callbacks.
pub struct GeoChoropleth<F, K> {
    config: ChoroplethConfig,
    layers: LayerStack<F, K>,
    projector: Box<dyn GeometryProjector<F>>,
    projection_dirty: bool,
    viewport: ViewportController,
    navigator: Navigator<K>,
    aggregate: AggregateMap<K>,
    title: Option<Box<TitleFn<K>>>,
    on_drill_down: Option<DrillDownCallback<K>>,
    on_roll_up: Option<RollUpCallback>,
}

impl<F, K> fmt::Debug for GeoChoropleth<F, K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeoChoropleth")
            .field("config", &self.config)
            .field("layers", &self.layers)
            .field("projector", &"dyn GeometryProjector")
            .field("projection_dirty", &self.projection_dirty)
            .field("viewport", &self.viewport)
            .field("navigator", &self.navigator)
            .field("aggregate", &self.aggregate)
            .field("title", &self.title.as_ref().map(|_| "Fn"))
            .field("on_drill_down", &self.on_drill_down.as_ref().map(|_| "FnMut"))
            .field("on_roll_up", &self.on_roll_up.as_ref().map(|_| "FnMut"))
            .finish()
    }
}

impl<F, K> GeoChoropleth<F, K> {
    /// Creates a map over a canvas of `canvas` size with the default configuration.
    pub fn new(canvas: Size, projector: impl GeometryProjector<F> + 'static) -> Self {
        Self::with_config(canvas, projector, ChoroplethConfig::default())
    }

    /// Creates a map with an explicit configuration.
    pub fn with_config(
        canvas: Size,
        projector: impl GeometryProjector<F> + 'static,
        config: ChoroplethConfig,
    ) -> Self {
        let mut viewport = ViewportController::new(canvas);
        viewport.set_margin(config.fit_margin);
        viewport.set_base_stroke_width(config.base_stroke_width);
        Self {
            config,
            layers: LayerStack::new(),
            projector: Box::new(projector),
            projection_dirty: true,
            viewport,
            navigator: Navigator::new(),
            aggregate: AggregateMap::default(),
            title: None,
            on_drill_down: None,
            on_roll_up: None,
        }
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &ChoroplethConfig {
        &self.config
    }

    /// Replaces the configuration.
    ///
    /// Margin and stroke width take effect on the next fit and render pass.
    pub fn set_config(&mut self, config: ChoroplethConfig) {
        self.viewport.set_margin(config.fit_margin);
        self.viewport.set_base_stroke_width(config.base_stroke_width);
        self.config = config;
    }

    /// Sets how many layers, from the coarsest, take part in wheel navigation.
    pub fn set_zoom_level_count(&mut self, count: Option<usize>) {
        self.config.zoom_level_count = count;
    }

    /// Inserts a layer, or replaces the one with the same id in place.
    ///
    /// # Errors
    ///
    /// [`LayerError::EmptyGeometry`] if `features` is empty.
    pub fn overlay_layer(
        &mut self,
        id: impl Into<String>,
        features: Vec<F>,
        key_accessor: Option<KeyAccessor<F, K>>,
    ) -> Result<usize, LayerError> {
        let index = self.layers.overlay(id, features, key_accessor)?;
        self.projection_dirty = true;
        Ok(index)
    }

    /// Removes the layer with `id`. No-op if absent.
    pub fn remove_layer(&mut self, id: &str) -> Option<Layer<F, K>> {
        self.layers.remove(id)
    }

    /// The layer stack.
    #[must_use]
    pub fn layers(&self) -> &LayerStack<F, K> {
        &self.layers
    }

    /// The layer stack, for in-place edits. Changes show on the next pass.
    pub fn layers_mut(&mut self) -> &mut LayerStack<F, K> {
        &mut self.layers
    }

    /// Replaces the projector. Paths are regenerated on the next pass.
    pub fn set_projection(&mut self, projector: impl GeometryProjector<F> + 'static) {
        self.projector = Box::new(projector);
        self.projection_dirty = true;
    }

    /// Returns `true` if the next pass will ask for paths to be regenerated.
    #[must_use]
    pub fn is_projection_dirty(&self) -> bool {
        self.projection_dirty
    }

    /// Sets the region title function. `None` restores the default title.
    pub fn set_title(&mut self, title: Option<Box<TitleFn<K>>>) {
        self.title = title;
    }

    /// Registers the drill-down callback. `None` clears it.
    pub fn on_drill_down(&mut self, callback: Option<DrillDownCallback<K>>) {
        self.on_drill_down = callback;
    }

    /// Registers the roll-up callback. `None` clears it.
    pub fn on_roll_up(&mut self, callback: Option<RollUpCallback>) {
        self.on_roll_up = callback;
    }

    /// Resizes the canvas. Later fits use the new size.
    pub fn set_canvas_size(&mut self, canvas: Size) {
        self.viewport.set_canvas(canvas);
    }

    /// The viewport.
    #[must_use]
    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    /// The transform at `now_ms`, including any in-flight animation.
    #[must_use]
    pub fn transform_at(&self, now_ms: u64) -> ViewTransform {
        self.viewport.transform_at(now_ms)
    }

    /// Whether an animation is in flight.
    #[must_use]
    pub fn nav_state(&self) -> NavState {
        NavState::of(&self.viewport)
    }

    /// The focus state, `None` before the first render or input.
    #[must_use]
    pub fn focus(&self) -> Option<&FocusState<K>> {
        self.navigator.focus()
    }

    /// The navigation state machine.
    #[must_use]
    pub fn navigator(&self) -> &Navigator<K> {
        &self.navigator
    }

    /// The level wheel navigation currently acts on.
    #[must_use]
    pub fn current_level(&self) -> usize {
        let scene = Scene {
            layers: &self.layers,
            projector: self.projector.as_ref(),
            config: &self.config,
        };
        self.navigator.current_level(&scene)
    }

    /// Animates the view to frame every feature of the layer at `index`.
    ///
    /// # Errors
    ///
    /// [`NavigationError::IndexOutOfRange`] or
    /// [`NavigationError::InvalidGeometry`]; the view is unchanged.
    pub fn adapt_to_layer(
        &mut self,
        index: usize,
        duration_ms: u64,
        now_ms: u64,
    ) -> Result<ViewTransform, NavigationError> {
        let (scene, navigator, viewport) = self.parts();
        let target = scene.fit_layer(viewport, index)?;
        viewport.animate_to(target, duration_ms, now_ms);
        navigator.release_drill_target();
        Ok(target)
    }

    /// Animates the view to frame a single region.
    ///
    /// # Errors
    ///
    /// See [`adapt_to_layer`](Self::adapt_to_layer), plus
    /// [`NavigationError::UnknownRegion`].
    pub fn adapt_to_region(
        &mut self,
        region: RegionRef,
        duration_ms: u64,
        now_ms: u64,
    ) -> Result<ViewTransform, NavigationError> {
        let (scene, navigator, viewport) = self.parts();
        let target = scene.fit_region(viewport, region)?;
        viewport.animate_to(target, duration_ms, now_ms);
        navigator.release_drill_target();
        Ok(target)
    }

    /// Zooms by `factor` around the canvas center.
    pub fn add_scale(&mut self, factor: f64, duration_ms: u64, now_ms: u64) {
        self.viewport.add_scale(factor, duration_ms, now_ms);
        self.navigator.release_drill_target();
    }

    /// Pans by `delta` view pixels.
    pub fn add_translate(&mut self, delta: Vec2, duration_ms: u64, now_ms: u64) {
        self.viewport.add_translate(delta, duration_ms, now_ms);
        self.navigator.release_drill_target();
    }

    /// Restores the view from a previously rendered `transform` attribute.
    ///
    /// Missing or malformed attributes fall back to the identity.
    pub fn restore_transform(&mut self, attr: Option<&str>) {
        let transform = match attr.map(str::parse::<ViewTransform>) {
            Some(Ok(transform)) => transform,
            Some(Err(err)) => {
                warn!(%err, "discarding unparseable transform attribute");
                ViewTransform::IDENTITY
            }
            None => ViewTransform::IDENTITY,
        };
        self.viewport.set_transform(transform);
        self.navigator.release_drill_target();
    }

    /// Begins a drag at `pos`.
    pub fn drag_start(&mut self, pos: Point, now_ms: u64) {
        self.navigator.drag_start(&mut self.viewport, pos, now_ms);
    }

    /// Pans the view to follow the pointer.
    pub fn drag_move(&mut self, pos: Point) -> NavOutcome<K> {
        self.navigator.drag_move(&mut self.viewport, pos)
    }

    /// Ends a drag.
    pub fn drag_end(&mut self) -> bool {
        self.navigator.drag_end()
    }

    /// Advances animations and cooldowns to `now_ms`.
    ///
    /// Returns `true` while an animation is still running.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.navigator.expire(now_ms);
        self.viewport.tick(now_ms)
    }

    /// Cancels every cooldown, any drag and any animation.
    ///
    /// The view stays where the last tick left it.
    pub fn teardown(&mut self) {
        self.navigator.teardown();
        let current = self.viewport.current();
        self.viewport.set_transform(current);
        debug!("choropleth torn down");
    }

    fn parts(&mut self) -> (Scene<'_, F, K>, &mut Navigator<K>, &mut ViewportController) {
        (
            Scene {
                layers: &self.layers,
                projector: self.projector.as_ref(),
                config: &self.config,
            },
            &mut self.navigator,
            &mut self.viewport,
        )
    }

    fn dispatch(&mut self, outcome: &NavOutcome<K>) {
        match outcome {
            NavOutcome::DrilledDown(target) => {
                if let Some(callback) = self.on_drill_down.as_mut() {
                    callback(target);
                }
            }
            NavOutcome::RolledUp { .. } => {
                if let Some(callback) = self.on_roll_up.as_mut() {
                    callback();
                }
            }
            _ => {}
        }
    }
}

impl<F, K> GeoChoropleth<F, K>
where
    K: Clone + Eq + Hash + fmt::Display,
{
    /// Full render: frames the finest layer instantly, resets navigation to
    /// its initial state, and styles every region.
    ///
    /// `rows` are this pass's aggregate rows; later duplicates win.
    ///
    /// # Errors
    ///
    /// [`NavigationError::InvalidGeometry`] if the finest layer cannot be
    /// framed. Nothing is changed in that case.
    pub fn render<S, C>(
        &mut self,
        rows: impl IntoIterator<Item = (K, f64)>,
        filters: &S,
        colors: &C,
        now_ms: u64,
    ) -> Result<RenderPass<K>, NavigationError>
    where
        S: FilterSet<K> + ?Sized,
        C: ColorMapping + ?Sized,
    {
        if let Some(finest) = self.layers.finest_index() {
            let (scene, navigator, viewport) = self.parts();
            let target = scene.fit_layer(viewport, finest)?;
            viewport.set_transform(target);
            navigator.reset(&scene);
            debug!(level = navigator.current_level(&scene), "rendered");
        }
        self.projection_dirty = true;
        Ok(self.redraw(rows, filters, colors, now_ms))
    }

    /// Restyles every region from fresh aggregate rows and filter state,
    /// leaving the view and navigation alone.
    pub fn redraw<S, C>(
        &mut self,
        rows: impl IntoIterator<Item = (K, f64)>,
        filters: &S,
        colors: &C,
        now_ms: u64,
    ) -> RenderPass<K>
    where
        S: FilterSet<K> + ?Sized,
        C: ColorMapping + ?Sized,
    {
        self.aggregate.rebuild(rows);
        let reproject = core::mem::take(&mut self.projection_dirty);
        let current_level = self.current_level();
        let transform = self.viewport.transform_at(now_ms);

        let default_title = render::default_title::<K>;
        let title: Option<&dyn Fn(&K, Option<f64>) -> String> =
            match (self.config.render_title, self.title.as_deref()) {
                (false, _) => None,
                (true, Some(title)) => Some(title),
                (true, None) => Some(&default_title),
            };

        let layers = self
            .layers
            .iter()
            .enumerate()
            .map(|(index, layer)| -> LayerPass<K> {
                let wheel_enabled =
                    is_wheel_enabled(index, current_level, self.config.zoom_level_count);
                render::layer_pass(
                    layer,
                    index,
                    wheel_enabled,
                    reproject,
                    &self.aggregate,
                    filters,
                    colors,
                    title,
                )
            })
            .collect();

        RenderPass {
            transform,
            transform_attr: transform.to_string(),
            stroke_width: self.viewport.base_stroke_width() / transform.scale_x(),
            state: self.nav_state(),
            current_level,
            layers,
        }
    }

    /// Handles a click on a region. See [`Navigator::click`].
    ///
    /// # Errors
    ///
    /// A [`NavigationError`] if the region does not exist or cannot be
    /// framed. Filters and view are unchanged in that case.
    pub fn click<S>(
        &mut self,
        event: ClickEvent,
        filters: &mut S,
        now_ms: u64,
    ) -> Result<NavOutcome<K>, NavigationError>
    where
        S: FilterSet<K> + ?Sized,
    {
        let (scene, navigator, viewport) = self.parts();
        navigator.click(&scene, viewport, filters, event, now_ms)
    }

    /// Handles a wheel tick. See [`Navigator::wheel`].
    ///
    /// `filters` supplies the selection a zoom-in over the bare canvas drills into.
    ///
    /// # Errors
    ///
    /// A [`NavigationError`] if the target cannot be framed. The cooldown is
    /// not consumed in that case.
    pub fn wheel<S>(
        &mut self,
        event: WheelEvent,
        filters: &S,
        now_ms: u64,
    ) -> Result<NavOutcome<K>, NavigationError>
    where
        S: FilterSet<K> + ?Sized,
    {
        let (scene, navigator, viewport) = self.parts();
        let outcome = navigator.wheel(&scene, viewport, filters, event, now_ms)?;
        self.dispatch(&outcome);
        Ok(outcome)
    }

    /// Drills into `target`, or the current selection. Not debounced.
    ///
    /// # Errors
    ///
    /// A [`NavigationError`] if the target cannot be framed.
    pub fn drill_down<S>(
        &mut self,
        target: Option<RegionRef>,
        filters: &S,
        now_ms: u64,
    ) -> Result<NavOutcome<K>, NavigationError>
    where
        S: FilterSet<K> + ?Sized,
    {
        let (scene, navigator, viewport) = self.parts();
        let outcome = navigator.drill_down(&scene, viewport, filters, target, now_ms)?;
        self.dispatch(&outcome);
        Ok(outcome)
    }

    /// Rolls up one level. Not debounced.
    ///
    /// # Errors
    ///
    /// A [`NavigationError`] if the coarser layer cannot be framed.
    pub fn roll_up(&mut self, now_ms: u64) -> Result<NavOutcome<K>, NavigationError> {
        let (scene, navigator, viewport) = self.parts();
        let outcome = navigator.roll_up(&scene, viewport, now_ms)?;
        self.dispatch(&outcome);
        Ok(outcome)
    }
}
