// Copyright 2025 the Geodrill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! What a render pass hands to the drawing layer.
//!
//! The engine does not draw. Each pass produces a [`RenderPass`]: the view
//! transform in both structured and attribute form, the zoom-compensated
//! stroke width, and per-region fill, classification, class tags and title.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::Display;
use core::hash::Hash;

use geodrill_layers::{AggregateMap, Layer};
use geodrill_selection::{Classification, FilterSet, classify};
use geodrill_view2d::ViewTransform;
use peniko::Color;

use crate::collaborators::ColorMapping;
use crate::navigation::NavState;

/// Computes a region's tooltip text from its key and aggregate value.
pub type TitleFn<K> = dyn Fn(&K, Option<f64>) -> String;

/// One complete render pass.
#[derive(Clone, Debug)]
pub struct RenderPass<K> {
    /// The view transform at the time of the pass.
    pub transform: ViewTransform,
    /// `transform` in attribute form, e.g. `translate(10,20) scale(2,2)`.
    pub transform_attr: String,
    /// Outline width that keeps lines at the base width on screen.
    pub stroke_width: f64,
    /// Whether an animation is in flight.
    pub state: NavState,
    /// The level wheel navigation acts on.
    pub current_level: usize,
    /// Layers from coarsest to finest.
    pub layers: Vec<LayerPass<K>>,
}

/// The render output for one layer.
#[derive(Clone, Debug)]
pub struct LayerPass<K> {
    /// Layer index.
    pub index: usize,
    /// Layer id.
    pub id: String,
    /// Whether the layer carries a key accessor.
    pub is_data_layer: bool,
    /// Whether wheel input over this layer's regions is honored.
    pub wheel_enabled: bool,
    /// Whether paths must be regenerated because the projection changed.
    pub reproject: bool,
    /// One entry per feature, in feature order.
    pub regions: Vec<RegionStyle<K>>,
}

/// How to draw one region.
#[derive(Clone, Debug)]
pub struct RegionStyle<K> {
    /// Feature index within the layer.
    pub feature: usize,
    /// The region's key, `None` on backdrop layers.
    pub key: Option<K>,
    /// The aggregate value for the key, if any row carried it.
    pub value: Option<f64>,
    /// Fill color. `None` on backdrop layers, which keep their own style.
    pub fill: Option<Color>,
    /// Relation to the active filters.
    pub classification: Classification,
    /// Space-separated style tags: layer id, region id, selection state.
    pub classes: String,
    /// Tooltip text, when titles are enabled.
    pub title: Option<String>,
}

/// Turns a display name into a class-safe identifier.
///
/// Lower-cases, replaces whitespace with `_`, and drops `.` and `'`.
///
/// ```rust
/// use geodrill_choropleth::render::region_id;
///
/// assert_eq!(region_id("New York"), "new_york");
/// assert_eq!(region_id("St. John's"), "st_johns");
/// ```
#[must_use]
pub fn region_id(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '.' | '\''))
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

/// Builds the class tags of a region.
#[must_use]
pub fn region_classes<K: Display>(
    layer_id: &str,
    key: Option<&K>,
    classification: Classification,
) -> String {
    let mut classes = String::from(layer_id);
    if let Some(key) = key {
        classes.push(' ');
        classes.push_str(&region_id(&key.to_string()));
    }
    if let Some(name) = classification.class_name() {
        classes.push(' ');
        classes.push_str(name);
    }
    classes
}

/// The title used when none is configured: `"key: value"`, or just the key
/// when there is no value.
#[must_use]
pub fn default_title<K: Display>(key: &K, value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{key}: {value}"),
        None => key.to_string(),
    }
}

pub(crate) fn layer_pass<F, K, S, C>(
    layer: &Layer<F, K>,
    index: usize,
    wheel_enabled: bool,
    reproject: bool,
    aggregate: &AggregateMap<K>,
    filters: &S,
    colors: &C,
    title: Option<&dyn Fn(&K, Option<f64>) -> String>,
) -> LayerPass<K>
where
    K: Eq + Hash + Display,
    S: FilterSet<K> + ?Sized,
    C: ColorMapping + ?Sized,
{
    let is_data_layer = layer.is_data_layer();
    let regions = layer
        .features()
        .iter()
        .enumerate()
        .map(|(feature, f)| {
            if !is_data_layer {
                return RegionStyle {
                    feature,
                    key: None,
                    value: None,
                    fill: None,
                    classification: Classification::Neutral,
                    classes: layer.id().to_string(),
                    title: None,
                };
            }
            let key = layer.key_of(f);
            let value = key.as_ref().and_then(|k| aggregate.get(k));
            let classification = key
                .as_ref()
                .map_or(Classification::Neutral, |k| classify(filters, k));
            let title = title.zip(key.as_ref()).map(|(title, k)| title(k, value));
            RegionStyle {
                feature,
                classes: region_classes(layer.id(), key.as_ref(), classification),
                fill: Some(colors.color_of(value, feature)),
                key,
                value,
                classification,
                title,
            }
        })
        .collect();

    LayerPass {
        index,
        id: layer.id().to_string(),
        is_data_layer,
        wheel_enabled,
        reproject,
        regions,
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::vec;

    use geodrill_layers::{AggregateMap, Layer};
    use geodrill_selection::{Classification, FilterSet, Selection};
    use peniko::Color;

    use super::{default_title, layer_pass, region_classes, region_id};

    #[test]
    fn class_tags() {
        assert_eq!(region_id("  A.B  c'd"), "__ab__cd");
        assert_eq!(
            region_classes("state", Some(&"New Mexico"), Classification::Selected),
            "state new_mexico selected"
        );
        assert_eq!(
            region_classes::<&str>("state", None, Classification::Neutral),
            "state"
        );
    }

    #[test]
    fn titles() {
        assert_eq!(default_title(&"TX", Some(29.5)), "TX: 29.5");
        assert_eq!(default_title(&"TX", None), "TX");
    }

    #[test]
    fn data_and_backdrop_layers() {
        let colors = |v: Option<f64>, _: usize| {
            if v.is_some() { Color::BLACK } else { Color::WHITE }
        };
        let aggregate = AggregateMap::from_rows([("TX", 1.0)]);
        let mut filters = Selection::new();
        filters.toggle_filter("CA");

        let states = Layer::<&str, &str>::new(
            "state",
            vec!["TX", "CA"],
            Some(Rc::new(|f: &&'static str| Some(*f))),
        );
        let title: &dyn Fn(&&str, Option<f64>) -> String = &|k: &&str, v: Option<f64>| {
            String::from(*k) + if v.is_some() { "!" } else { "?" }
        };
        let pass = layer_pass(&states, 1, true, false, &aggregate, &filters, &colors, Some(title));
        assert!(pass.is_data_layer && pass.wheel_enabled && !pass.reproject);
        let tx = &pass.regions[0];
        assert_eq!(tx.value, Some(1.0));
        assert_eq!(tx.classification, Classification::Deselected);
        assert_eq!(tx.classes, "state tx deselected");
        assert_eq!(tx.title.as_deref(), Some("TX!"));
        assert_eq!(tx.fill.map(|c| c.to_rgba8()), Some(Color::BLACK.to_rgba8()));
        let ca = &pass.regions[1];
        assert_eq!(ca.value, None);
        assert_eq!(ca.classes, "state ca selected");
        assert_eq!(ca.fill.map(|c| c.to_rgba8()), Some(Color::WHITE.to_rgba8()));

        let country = Layer::<&str, &str>::new("country", vec!["USA"], None);
        let pass = layer_pass(&country, 0, false, true, &aggregate, &filters, &colors, None);
        let usa = &pass.regions[0];
        assert!(usa.key.is_none() && usa.fill.is_none() && usa.title.is_none());
        assert_eq!(usa.classes, "country");
    }
}
