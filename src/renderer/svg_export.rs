//! SVG serialization of a [`Frame`].

use std::path::Path;

use svg::node::element::{
    Circle, Definitions, Group, Line, LinearGradient, Polygon, Rectangle,
    Stop, Text,
};
use svg::{Document, Node};

use super::frame::{Frame, Layer};
use super::primitive::{Paint, Primitive, Shape, Style};
use crate::error::TrackError;

const FONT_FAMILY: &str = "Helvetica, Arial, sans-serif";

/// Gradients referenced by the frame, collected while emitting shapes.
#[derive(Default)]
struct Gradients {
    paints: Vec<Paint>,
}

impl Gradients {
    fn attribute(&mut self, paint: &Paint) -> String {
        match paint {
            Paint::None => "none".to_owned(),
            Paint::Solid(color) => color.clone(),
            Paint::VerticalFade { .. } => {
                let idx = self
                    .paints
                    .iter()
                    .position(|p| p == paint)
                    .unwrap_or_else(|| {
                        self.paints.push(paint.clone());
                        self.paints.len() - 1
                    });
                format!("url(#fade-{idx})")
            }
        }
    }

    fn definitions(&self) -> Definitions {
        let mut defs = Definitions::new();
        for (idx, paint) in self.paints.iter().enumerate() {
            let Paint::VerticalFade {
                color,
                top_opacity,
                bottom_opacity,
            } = paint
            else {
                continue;
            };
            defs = defs.add(
                LinearGradient::new()
                    .set("id", format!("fade-{idx}"))
                    .set("x1", "0%")
                    .set("y1", "0%")
                    .set("x2", "0%")
                    .set("y2", "100%")
                    .add(
                        Stop::new()
                            .set("offset", "0%")
                            .set("stop-color", color.as_str())
                            .set("stop-opacity", *top_opacity),
                    )
                    .add(
                        Stop::new()
                            .set("offset", "100%")
                            .set("stop-color", color.as_str())
                            .set("stop-opacity", *bottom_opacity),
                    ),
            );
        }
        defs
    }
}

fn styled<N: Node>(mut node: N, style: &Style, gradients: &mut Gradients) -> N {
    node.assign("fill", gradients.attribute(&style.fill));
    if style.stroke != Paint::None {
        node.assign("stroke", gradients.attribute(&style.stroke));
        node.assign("stroke-width", style.stroke_width);
    }
    if style.opacity < 1.0 {
        node.assign("opacity", style.opacity);
    }
    node
}

fn add_primitive(
    group: Group,
    primitive: &Primitive,
    gradients: &mut Gradients,
) -> Group {
    let style = &primitive.style;
    match &primitive.shape {
        Shape::Line { x1, y1, x2, y2 } => group.add(styled(
            Line::new()
                .set("x1", *x1)
                .set("y1", *y1)
                .set("x2", *x2)
                .set("y2", *y2),
            style,
            gradients,
        )),
        Shape::Rect {
            x,
            y,
            width,
            height,
        } => group.add(styled(
            Rectangle::new()
                .set("x", *x)
                .set("y", *y)
                .set("width", *width)
                .set("height", *height),
            style,
            gradients,
        )),
        Shape::Circle { cx, cy, r } => group.add(styled(
            Circle::new().set("cx", *cx).set("cy", *cy).set("r", *r),
            style,
            gradients,
        )),
        Shape::Polygon { points } => {
            let points = points
                .iter()
                .map(|(x, y)| format!("{x},{y}"))
                .collect::<Vec<_>>()
                .join(" ");
            group.add(styled(
                Polygon::new().set("points", points),
                style,
                gradients,
            ))
        }
        Shape::Text {
            x,
            y,
            content,
            font_size,
            anchor,
        } => group.add(styled(
            Text::new(content.as_str())
                .set("x", *x)
                .set("y", *y)
                .set("font-size", *font_size)
                .set("font-family", FONT_FAMILY)
                .set("text-anchor", anchor.as_svg()),
            style,
            gradients,
        )),
    }
}

fn layer_group(layer: &Layer, gradients: &mut Gradients) -> Group {
    let mut group = Group::new()
        .set("id", layer.name.as_str())
        .set("transform", format!("translate({},{})", layer.dx, layer.dy));
    if layer.opacity < 1.0 {
        group = group.set("opacity", layer.opacity);
    }
    layer
        .primitives
        .iter()
        .fold(group, |g, p| add_primitive(g, p, gradients))
}

/// Build an SVG document for `frame`.
#[must_use]
pub fn document(frame: &Frame) -> Document {
    let mut gradients = Gradients::default();
    let groups: Vec<Group> = frame
        .layers
        .iter()
        .map(|layer| layer_group(layer, &mut gradients))
        .collect();
    let mut doc = Document::new()
        .set("viewBox", (0.0, 0.0, frame.width, frame.height))
        .set("width", frame.width)
        .set("height", frame.height);
    if !gradients.paints.is_empty() {
        doc = doc.add(gradients.definitions());
    }
    groups.into_iter().fold(doc, Document::add)
}

/// Serialize `frame` to SVG text.
#[must_use]
pub fn to_svg_string(frame: &Frame) -> String {
    document(frame).to_string()
}

/// Write `frame` as an SVG file.
///
/// A frame with non-finite dimensions is rejected.
pub fn save_svg(frame: &Frame, path: &Path) -> Result<(), TrackError> {
    if !frame.width.is_finite() || !frame.height.is_finite() {
        return Err(TrackError::Render(format!(
            "frame size {}x{} is not finite",
            frame.width, frame.height
        )));
    }
    log::info!(
        "writing {} primitives to {}",
        frame.primitive_count(),
        path.display()
    );
    svg::save(path, &document(frame)).map_err(TrackError::Io)
}
