//! Resolution-independent drawing primitives emitted by tracks.

/// Horizontal text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    /// Text starts at the anchor.
    #[default]
    Start,
    /// Text is centered on the anchor.
    Middle,
    /// Text ends at the anchor.
    End,
}

impl TextAnchor {
    /// SVG `text-anchor` keyword.
    #[must_use]
    pub fn as_svg(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// How a shape's interior or outline is painted.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Paint {
    /// Not painted.
    #[default]
    None,
    /// Solid CSS color.
    Solid(String),
    /// Top-to-bottom linear gradient fading out.
    VerticalFade {
        /// CSS color at both stops.
        color: String,
        /// Opacity at the top edge.
        top_opacity: f64,
        /// Opacity at the bottom edge.
        bottom_opacity: f64,
    },
}

impl Paint {
    /// Solid paint from any CSS color.
    #[must_use]
    pub fn solid(color: &str) -> Self {
        Self::Solid(color.to_owned())
    }
}

/// Fill, stroke, and opacity of a primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    /// Interior paint.
    pub fill: Paint,
    /// Outline paint.
    pub stroke: Paint,
    /// Outline width in pixels.
    pub stroke_width: f64,
    /// Opacity multiplier in `[0, 1]`.
    pub opacity: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: Paint::None,
            stroke: Paint::None,
            stroke_width: 1.0,
            opacity: 1.0,
        }
    }
}

impl Style {
    /// Filled with a solid color, no outline.
    #[must_use]
    pub fn filled(color: &str) -> Self {
        Self {
            fill: Paint::solid(color),
            ..Self::default()
        }
    }

    /// Outlined with a solid color, no fill.
    #[must_use]
    pub fn stroked(color: &str, width: f64) -> Self {
        Self {
            stroke: Paint::solid(color),
            stroke_width: width,
            ..Self::default()
        }
    }

    /// Same style at a different opacity.
    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }
}

/// Geometry of a primitive in its track's local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Straight segment.
    Line {
        /// Start x.
        x1: f64,
        /// Start y.
        y1: f64,
        /// End x.
        x2: f64,
        /// End y.
        y2: f64,
    },
    /// Axis-aligned rectangle.
    Rect {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Width; never negative.
        width: f64,
        /// Height; never negative.
        height: f64,
    },
    /// Circle.
    Circle {
        /// Center x.
        cx: f64,
        /// Center y.
        cy: f64,
        /// Radius.
        r: f64,
    },
    /// Closed polygon.
    Polygon {
        /// Vertices in drawing order.
        points: Vec<(f64, f64)>,
    },
    /// Single line of text.
    Text {
        /// Anchor x.
        x: f64,
        /// Baseline y.
        y: f64,
        /// Text content.
        content: String,
        /// Font size in points.
        font_size: f64,
        /// Horizontal alignment.
        anchor: TextAnchor,
    },
}

/// What a primitive depicts, for pointer hit-testing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemRef {
    /// PTM bar for a 1-indexed residue.
    PtmSite(usize),
    /// Mutation marker for a 1-indexed residue.
    Mutation(usize),
    /// Scansite marker for a 1-indexed residue.
    Scansite(usize),
    /// Domain rectangle, by label and start residue.
    Domain {
        /// Domain label.
        label: String,
        /// First residue.
        start: i64,
    },
    /// Region rectangle, by label and start residue.
    Region {
        /// Region label.
        label: String,
        /// First residue.
        start: i64,
    },
}

/// One drawable element.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    /// Geometry.
    pub shape: Shape,
    /// Paint.
    pub style: Style,
    /// Hit-test target, if the element is interactive.
    pub item: Option<ItemRef>,
}

impl Primitive {
    /// Non-interactive primitive.
    #[must_use]
    pub fn new(shape: Shape, style: Style) -> Self {
        Self {
            shape,
            style,
            item: None,
        }
    }

    /// Attach a hit-test target.
    #[must_use]
    pub fn with_item(mut self, item: ItemRef) -> Self {
        self.item = Some(item);
        self
    }

    /// Whether local point `(x, y)` falls inside the primitive.
    ///
    /// Only rectangles and circles have an interior; lines, polygons and
    /// text never report a hit.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        match self.shape {
            Shape::Rect {
                x: rx,
                y: ry,
                width,
                height,
            } => x >= rx && x <= rx + width && y >= ry && y <= ry + height,
            Shape::Circle { cx, cy, r } => {
                let (dx, dy) = (x - cx, y - cy);
                dx * dx + dy * dy <= r * r
            }
            Shape::Line { .. } | Shape::Polygon { .. } | Shape::Text { .. } => {
                false
            }
        }
    }
}

/// Axis-aligned rectangle with its extent normalized to non-negative
/// width and height.
#[must_use]
pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Shape {
    let (x, width) = if width < 0.0 { (x + width, -width) } else { (x, width) };
    let (y, height) =
        if height < 0.0 { (y + height, -height) } else { (y, height) };
    Shape::Rect {
        x,
        y,
        width,
        height,
    }
}

/// Text shape.
#[must_use]
pub fn text(
    x: f64,
    y: f64,
    content: impl Into<String>,
    font_size: f64,
    anchor: TextAnchor,
) -> Shape {
    Shape::Text {
        x,
        y,
        content: content.into(),
        font_size,
        anchor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_rect_is_normalized() {
        assert_eq!(
            rect(10.0, 5.0, -4.0, -2.0),
            Shape::Rect {
                x: 6.0,
                y: 3.0,
                width: 4.0,
                height: 2.0
            }
        );
    }

    #[test]
    fn rect_and_circle_hit_test() {
        let bar = Primitive::new(rect(0.0, 0.0, 10.0, 10.0), Style::default());
        assert!(bar.contains(10.0, 0.0));
        assert!(!bar.contains(10.5, 5.0));
        let dot = Primitive::new(
            Shape::Circle {
                cx: 0.0,
                cy: 0.0,
                r: 2.0,
            },
            Style::default(),
        );
        assert!(dot.contains(1.0, 1.0));
        assert!(!dot.contains(2.0, 2.0));
        let label = Primitive::new(
            text(0.0, 0.0, "x", 8.0, TextAnchor::Middle),
            Style::default(),
        );
        assert!(!label.contains(0.0, 0.0));
    }
}
