//! Retained drawing surface.
//!
//! Elements live in world coordinates and are kept in paint order; the view
//! offset is applied when painting and when hit testing.

use indexmap::IndexMap;

/// Extra slack, in pixels, when deciding whether a pointer hits an element
const HIT_TOLERANCE: f64 = 2.0;

/// Average glyph width relative to the font size, for label hit boxes
const GLYPH_WIDTH_RATIO: f64 = 0.6;

type Point = (f64, f64);

/// Handle to a drawn element, valid until the element is deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle { center: Point, radius: f64 },
    Line { from: Point, to: Point },
    Polyline { points: Vec<Point> },
    /// Text anchored at its north-west corner
    Text { anchor: Point, text: String, font_size: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub line_width: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self { fill: None, stroke: None, line_width: 1.0 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub shape: Shape,
    pub style: Style,
}

impl Element {
    #[must_use]
    pub fn circle(center: Point, radius: f64) -> Self {
        Self::from_shape(Shape::Circle { center, radius })
    }

    #[must_use]
    pub fn line(from: Point, to: Point) -> Self {
        Self::from_shape(Shape::Line { from, to })
    }

    #[must_use]
    pub fn polyline(points: Vec<Point>) -> Self {
        Self::from_shape(Shape::Polyline { points })
    }

    #[must_use]
    pub fn text(anchor: Point, text: impl Into<String>, font_size: f64) -> Self {
        Self::from_shape(Shape::Text { anchor, text: text.into(), font_size })
    }

    fn from_shape(shape: Shape) -> Self {
        Self { shape, style: Style::default() }
    }

    #[must_use]
    pub fn fill(mut self, color: impl Into<String>) -> Self {
        self.style.fill = Some(color.into());
        self
    }

    #[must_use]
    pub fn stroke(mut self, color: impl Into<String>, width: f64) -> Self {
        self.style.stroke = Some(color.into());
        self.style.line_width = width;
        self
    }

    /// Scale about the world origin. Stroke widths and font sizes are kept.
    fn scale(&mut self, factor: f64) {
        let s = |p: &mut Point| {
            p.0 *= factor;
            p.1 *= factor;
        };
        match &mut self.shape {
            Shape::Circle { center, radius } => {
                s(center);
                *radius *= factor;
            }
            Shape::Line { from, to } => {
                s(from);
                s(to);
            }
            Shape::Polyline { points } => points.iter_mut().for_each(s),
            Shape::Text { anchor, .. } => s(anchor),
        }
    }

    fn contains(&self, p: Point) -> bool {
        let reach = self.style.line_width / 2.0 + HIT_TOLERANCE;
        match &self.shape {
            Shape::Circle { center, radius } => distance(p, *center) <= radius + reach,
            Shape::Line { from, to } => distance_to_segment(p, *from, *to) <= reach,
            Shape::Polyline { points } => points
                .windows(2)
                .any(|pair| distance_to_segment(p, pair[0], pair[1]) <= reach),
            Shape::Text { anchor, text, font_size } => {
                #[allow(clippy::cast_precision_loss)]
                let width = text.chars().count() as f64 * font_size * GLYPH_WIDTH_RATIO;
                p.0 >= anchor.0 - HIT_TOLERANCE
                    && p.0 <= anchor.0 + width + HIT_TOLERANCE
                    && p.1 >= anchor.1 - HIT_TOLERANCE
                    && p.1 <= anchor.1 + font_size + HIT_TOLERANCE
            }
        }
    }
}

fn distance(a: Point, b: Point) -> f64 {
    (a.0 - b.0).hypot(a.1 - b.1)
}

fn distance_to_segment(point: Point, seg_start: Point, seg_end: Point) -> f64 {
    let dx = seg_end.0 - seg_start.0;
    let dy = seg_end.1 - seg_start.1;
    let len_sq = dx * dx + dy * dy;

    if len_sq == 0.0 {
        return distance(point, seg_start);
    }

    let t = (((point.0 - seg_start.0) * dx + (point.1 - seg_start.1) * dy) / len_sq).clamp(0.0, 1.0);
    distance(point, (seg_start.0 + t * dx, seg_start.1 + t * dy))
}

/// What the map needs from a drawing surface
pub trait Canvas {
    /// Add an element on top of everything drawn so far
    fn create(&mut self, element: Element) -> ElementId;

    /// Remove an element; unknown handles are ignored
    fn delete(&mut self, id: ElementId);

    /// Move `id` directly below `anchor` in paint order
    fn lower_below(&mut self, id: ElementId, anchor: ElementId);

    /// Scale every element about the world origin
    fn scale(&mut self, factor: f64);

    /// Set the translation applied to all elements on screen
    fn pan_to(&mut self, offset: Point);

    fn offset(&self) -> Point;

    /// Visible width and height
    fn size(&self) -> (f64, f64);

    /// Elements under a screen position, topmost first
    fn elements_at(&self, screen: Point) -> Vec<ElementId>;
}

/// In-memory display list
#[derive(Debug, Clone, Default)]
pub struct Scene {
    elements: IndexMap<ElementId, Element>,
    next_id: u64,
    offset: Point,
    width: f64,
    height: f64,
}

impl Scene {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, ..Self::default() }
    }

    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Handles in paint order, bottom first
    #[must_use]
    pub fn ids(&self) -> Vec<ElementId> {
        self.elements.keys().copied().collect()
    }

    /// Elements in paint order, bottom first
    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &Element)> {
        self.elements.iter().map(|(id, element)| (*id, element))
    }

    #[must_use]
    pub fn paint_position(&self, id: ElementId) -> Option<usize> {
        self.elements.get_index_of(&id)
    }
}

impl Canvas for Scene {
    fn create(&mut self, element: Element) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.elements.insert(id, element);
        id
    }

    fn delete(&mut self, id: ElementId) {
        self.elements.shift_remove(&id);
    }

    fn lower_below(&mut self, id: ElementId, anchor: ElementId) {
        let (Some(from), Some(to)) = (self.elements.get_index_of(&id), self.elements.get_index_of(&anchor)) else {
            return;
        };
        if from > to {
            self.elements.move_index(from, to);
        } else if from + 1 < to {
            self.elements.move_index(from, to - 1);
        }
    }

    fn scale(&mut self, factor: f64) {
        for element in self.elements.values_mut() {
            element.scale(factor);
        }
    }

    fn pan_to(&mut self, offset: Point) {
        self.offset = offset;
    }

    fn offset(&self) -> Point {
        self.offset
    }

    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn elements_at(&self, screen: Point) -> Vec<ElementId> {
        let world = (screen.0 - self.offset.0, screen.1 - self.offset.1);
        self.elements
            .iter()
            .rev()
            .filter(|(_, element)| element.contains(world))
            .map(|(id, _)| *id)
            .collect()
    }
}
