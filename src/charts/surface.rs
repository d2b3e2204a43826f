//! Drawing surfaces.
//!
//! The renderer only talks to the [`Surface`] trait. [`SceneSurface`] is the retained
//! implementation used by the egui host: it keeps every primitive with its in-flight
//! transition and is painted once per frame.

use crate::charts::primitive::{Bar, Family, Interpolate, Primitive, PrimitiveKey, TextMark};
use crate::charts::style::Paint;
use crate::charts::transition::Transition;
use egui::{Pos2, Vec2};
use indexmap::IndexMap;
use std::time::Duration;

/// A canvas the column chart can reconcile its primitives against.
pub trait Surface {
    /// Current pixel size. Queried on every render.
    fn size(&self) -> Vec2;

    /// Keys of the primitives of one family, in drawing order.
    fn keys(&self, family: Family) -> Vec<PrimitiveKey>;

    /// Add a primitive. Replaces any primitive of the same family and key.
    fn create(&mut self, key: PrimitiveKey, primitive: Primitive);

    /// Animate an existing primitive towards `target`.
    /// Creates it instead when the key is unknown.
    fn transition(&mut self, key: PrimitiveKey, target: Primitive, duration: Duration);

    fn remove(&mut self, family: Family, key: &PrimitiveKey) -> bool;

    /// Immediately change a bar's paint. Returns `false` for unknown keys.
    fn restyle_bar(&mut self, key: &PrimitiveKey, paint: Paint) -> bool;

    /// Value bound to a bar for click notifications.
    fn bar_datum(&self, key: &PrimitiveKey) -> Option<f64>;
}

/// A primitive and its in-flight transition, if any.
#[derive(Debug, Clone)]
struct Node<T> {
    current: T,
    transition: Option<Transition<T>>,
}

impl<T: Interpolate> Node<T> {
    fn new(value: T) -> Self {
        Self {
            current: value,
            transition: None,
        }
    }

    fn target(&self) -> &T {
        self.transition
            .as_ref()
            .map_or(&self.current, |transition| transition.target())
    }

    fn animate_to(&mut self, target: T, duration: Duration) {
        match &mut self.transition {
            Some(transition) => transition.retarget(target, duration),
            None => {
                self.transition = Some(Transition::new(self.current.clone(), target, duration));
            }
        }
        self.settle(Duration::ZERO);
    }

    /// Step the transition and refresh `current`. Returns `true` while still moving.
    fn settle(&mut self, dt: Duration) -> bool {
        let Some(transition) = &mut self.transition else {
            return false;
        };
        transition.advance(dt);
        self.current = transition.current();
        if transition.is_finished() {
            self.transition = None;
            return false;
        }
        true
    }

    fn finish(&mut self) {
        if let Some(transition) = self.transition.take() {
            self.current = transition.target().clone();
        }
    }
}

type Layer<T> = IndexMap<PrimitiveKey, Node<T>>;

fn step_layer<T: Interpolate>(layer: &mut Layer<T>, dt: Duration) -> bool {
    let mut moving = false;
    for node in layer.values_mut() {
        moving |= node.settle(dt);
    }
    moving
}

/// Retained in-memory surface.
#[derive(Debug, Clone, Default)]
pub struct SceneSurface {
    size: Vec2,
    bars: Layer<Bar>,
    category_labels: Layer<TextMark>,
    value_labels: Layer<TextMark>,
}

impl SceneSurface {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    /// Set the pixel size. Returns `true` if it changed.
    pub fn resize(&mut self, size: Vec2) -> bool {
        if self.size == size {
            return false;
        }
        self.size = size;
        true
    }

    pub fn len(&self, family: Family) -> usize {
        match family {
            Family::Bar => self.bars.len(),
            Family::CategoryLabel => self.category_labels.len(),
            Family::ValueLabel => self.value_labels.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        Family::ALL.iter().all(|family| self.len(*family) == 0)
    }

    /// Advance every transition by `dt`. Returns `true` while anything is still moving.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let bars = step_layer(&mut self.bars, dt);
        let categories = step_layer(&mut self.category_labels, dt);
        let values = step_layer(&mut self.value_labels, dt);
        bars || categories || values
    }

    /// Jump every transition to its end state.
    pub fn finish(&mut self) {
        self.bars.values_mut().for_each(Node::finish);
        self.category_labels.values_mut().for_each(Node::finish);
        self.value_labels.values_mut().for_each(Node::finish);
    }

    pub fn is_animating(&self) -> bool {
        self.bars.values().any(|node| node.transition.is_some())
            || self.category_labels.values().any(|node| node.transition.is_some())
            || self.value_labels.values().any(|node| node.transition.is_some())
    }

    /// Primitive as currently drawn.
    pub fn current(&self, family: Family, key: &PrimitiveKey) -> Option<Primitive> {
        match family {
            Family::Bar => self.bars.get(key).map(|n| Primitive::Bar(n.current.clone())),
            Family::CategoryLabel => self
                .category_labels
                .get(key)
                .map(|n| Primitive::CategoryLabel(n.current.clone())),
            Family::ValueLabel => self
                .value_labels
                .get(key)
                .map(|n| Primitive::ValueLabel(n.current.clone())),
        }
    }

    /// Primitive as it will look once its transition ends.
    pub fn target(&self, family: Family, key: &PrimitiveKey) -> Option<Primitive> {
        match family {
            Family::Bar => self.bars.get(key).map(|n| Primitive::Bar(n.target().clone())),
            Family::CategoryLabel => self
                .category_labels
                .get(key)
                .map(|n| Primitive::CategoryLabel(n.target().clone())),
            Family::ValueLabel => self
                .value_labels
                .get(key)
                .map(|n| Primitive::ValueLabel(n.target().clone())),
        }
    }

    /// Final state of every primitive of a family, in drawing order.
    pub fn targets(&self, family: Family) -> Vec<Primitive> {
        self.keys(family)
            .iter()
            .filter_map(|key| self.target(family, key))
            .collect()
    }

    pub fn bars(&self) -> impl Iterator<Item = (&PrimitiveKey, &Bar)> {
        self.bars.iter().map(|(key, node)| (key, &node.current))
    }

    /// Category then value labels, as currently drawn.
    pub fn texts(&self) -> impl Iterator<Item = &TextMark> {
        self.category_labels
            .values()
            .chain(self.value_labels.values())
            .map(|node| &node.current)
    }

    /// Top-most bar under `pos` (surface coordinates).
    pub fn hit_test(&self, pos: Pos2) -> Option<PrimitiveKey> {
        self.bars
            .iter()
            .rev()
            .find(|(_, node)| node.current.rect.contains(pos))
            .map(|(key, _)| key.clone())
    }
}

impl Surface for SceneSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn keys(&self, family: Family) -> Vec<PrimitiveKey> {
        match family {
            Family::Bar => self.bars.keys().cloned().collect(),
            Family::CategoryLabel => self.category_labels.keys().cloned().collect(),
            Family::ValueLabel => self.value_labels.keys().cloned().collect(),
        }
    }

    fn create(&mut self, key: PrimitiveKey, primitive: Primitive) {
        match primitive {
            Primitive::Bar(bar) => {
                self.bars.insert(key, Node::new(bar));
            }
            Primitive::CategoryLabel(text) => {
                self.category_labels.insert(key, Node::new(text));
            }
            Primitive::ValueLabel(text) => {
                self.value_labels.insert(key, Node::new(text));
            }
        }
    }

    fn transition(&mut self, key: PrimitiveKey, target: Primitive, duration: Duration) {
        match target {
            Primitive::Bar(bar) => match self.bars.get_mut(&key) {
                Some(node) => node.animate_to(bar, duration),
                None => {
                    self.bars.insert(key, Node::new(bar));
                }
            },
            Primitive::CategoryLabel(text) => match self.category_labels.get_mut(&key) {
                Some(node) => node.animate_to(text, duration),
                None => {
                    self.category_labels.insert(key, Node::new(text));
                }
            },
            Primitive::ValueLabel(text) => match self.value_labels.get_mut(&key) {
                Some(node) => node.animate_to(text, duration),
                None => {
                    self.value_labels.insert(key, Node::new(text));
                }
            },
        }
    }

    fn remove(&mut self, family: Family, key: &PrimitiveKey) -> bool {
        match family {
            Family::Bar => self.bars.shift_remove(key).is_some(),
            Family::CategoryLabel => self.category_labels.shift_remove(key).is_some(),
            Family::ValueLabel => self.value_labels.shift_remove(key).is_some(),
        }
    }

    fn restyle_bar(&mut self, key: &PrimitiveKey, paint: Paint) -> bool {
        let Some(node) = self.bars.get_mut(key) else {
            return false;
        };
        node.current.paint = paint;
        if let Some(transition) = &mut node.transition {
            transition.pin(|bar| bar.paint = paint);
        }
        true
    }

    fn bar_datum(&self, key: &PrimitiveKey) -> Option<f64> {
        self.bars.get(key).map(|node| node.current.datum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::style::ChartStyle;
    use egui::{pos2, vec2, Rect};

    fn bar(x: f32, height: f32, datum: f64) -> Primitive {
        Primitive::Bar(Bar {
            rect: Rect::from_min_size(pos2(x, 100.0 - height), vec2(10.0, height)),
            paint: ChartStyle::default().resting_paint(),
            datum,
        })
    }

    #[test]
    fn transition_moves_then_settles() {
        let mut surface = SceneSurface::new(vec2(100.0, 100.0));
        let key = PrimitiveKey::Index(0);
        surface.create(key.clone(), bar(0.0, 10.0, 1.0));
        surface.transition(key.clone(), bar(50.0, 10.0, 2.0), Duration::from_millis(500));

        assert!(surface.is_animating());
        // Payload switches at the start of the transition
        assert_eq!(surface.bar_datum(&key), Some(2.0));

        assert!(surface.advance(Duration::from_millis(250)));
        let halfway = surface.current(Family::Bar, &key).and_then(|p| p.as_bar().cloned());
        assert_eq!(halfway.map(|b| b.rect.min.x), Some(25.0));

        assert!(!surface.advance(Duration::from_millis(250)));
        assert!(!surface.is_animating());
        assert_eq!(
            surface.current(Family::Bar, &key),
            surface.target(Family::Bar, &key)
        );
    }

    #[test]
    fn hit_test_prefers_topmost_bar() {
        let mut surface = SceneSurface::new(vec2(100.0, 100.0));
        surface.create(PrimitiveKey::Index(0), bar(0.0, 50.0, 1.0));
        surface.create(PrimitiveKey::Index(1), bar(5.0, 50.0, 2.0));

        assert_eq!(surface.hit_test(pos2(7.0, 80.0)), Some(PrimitiveKey::Index(1)));
        assert_eq!(surface.hit_test(pos2(2.0, 80.0)), Some(PrimitiveKey::Index(0)));
        assert_eq!(surface.hit_test(pos2(2.0, 10.0)), None);
    }

    #[test]
    fn restyle_survives_running_transition() {
        let style = ChartStyle::default();
        let mut surface = SceneSurface::new(vec2(100.0, 100.0));
        let key = PrimitiveKey::Index(0);
        surface.create(key.clone(), bar(0.0, 10.0, 1.0));
        surface.transition(key.clone(), bar(0.0, 40.0, 1.0), Duration::from_millis(500));

        assert!(surface.restyle_bar(&key, style.hover_paint()));
        surface.advance(Duration::from_millis(100));
        let current = surface.current(Family::Bar, &key).and_then(|p| p.as_bar().cloned());
        assert_eq!(current.map(|b| b.paint), Some(style.hover_paint()));
        assert!(!surface.restyle_bar(&PrimitiveKey::Index(9), style.hover_paint()));
    }

    #[test]
    fn remove_keeps_drawing_order() {
        let mut surface = SceneSurface::new(vec2(100.0, 100.0));
        for i in 0..3 {
            surface.create(PrimitiveKey::Index(i), bar(i as f32 * 10.0, 10.0, i as f64));
        }
        assert!(surface.remove(Family::Bar, &PrimitiveKey::Index(1)));
        assert!(!surface.remove(Family::Bar, &PrimitiveKey::Index(1)));
        assert_eq!(
            surface.keys(Family::Bar),
            vec![PrimitiveKey::Index(0), PrimitiveKey::Index(2)]
        );
    }

    #[test]
    fn resize_reports_changes() {
        let mut surface = SceneSurface::new(vec2(100.0, 100.0));
        assert!(!surface.resize(vec2(100.0, 100.0)));
        assert!(surface.resize(vec2(200.0, 100.0)));
        assert_eq!(surface.size(), vec2(200.0, 100.0));
    }
}
