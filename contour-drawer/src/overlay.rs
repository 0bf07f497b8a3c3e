use egui::{Color32, Pos2, Shape, Stroke, epaint::PathShape};
use serde::{Deserialize, Serialize};

use crate::{PixelPoint, Result, Transformer};

/// Radius of the endpoint markers of the circle tool
pub const MARKER_RADIUS: f32 = 3.0;
/// Guide line between the two circle points
pub const GUIDE_LINE_COLOR: Color32 = Color32::from_rgba_premultiplied(153, 153, 153, 153);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(default)]
pub struct OverlayStyle {
    pub stroke_width: f32,
    pub stroke_color: Color32,
    pub fill_color: Color32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            stroke_width: 3.0,
            stroke_color: Color32::from_rgb(255, 224, 0),
            fill_color: Color32::from_rgba_unmultiplied(255, 224, 0, 51),
        }
    }
}

impl OverlayStyle {
    pub fn with_stroke_width(mut self, stroke_width: f32) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    pub fn with_stroke_color(mut self, stroke_color: Color32) -> Self {
        self.stroke_color = stroke_color;
        self
    }

    pub fn with_fill_color(mut self, fill_color: Color32) -> Self {
        self.fill_color = fill_color;
        self
    }

    pub fn stroke(&self) -> Stroke {
        Stroke::new(self.stroke_width, self.stroke_color)
    }
}

/// Hint circle around `p1` through `p2`, the guide line and one marker per point.
///
/// The radius is measured after conversion, so it follows the current zoom.
pub fn circle_overlay(
    p1: PixelPoint,
    p2: PixelPoint,
    transformer: &Transformer,
    style: &OverlayStyle,
) -> Result<Vec<Shape>> {
    let d1 = transformer.to_display(p1)?;
    let d2 = transformer.to_display(p2)?;
    let radius = d1.distance(d2);
    let (c1, c2) = (Pos2::from(d1), Pos2::from(d2));

    let circle = |center: Pos2, radius: f32| Shape::Circle(egui::epaint::CircleShape {
        center,
        radius,
        fill: style.fill_color,
        stroke: style.stroke(),
    });

    Ok(vec![
        circle(c1, radius),
        Shape::line_segment([c1, c2], Stroke::new(3.0, GUIDE_LINE_COLOR)),
        circle(c1, MARKER_RADIUS),
        circle(c2, MARKER_RADIUS),
    ])
}

/// The accumulated outline as one closed, filled path
pub fn polygon_overlay(
    points: &[PixelPoint],
    transformer: &Transformer,
    style: &OverlayStyle,
) -> Result<Vec<Shape>> {
    if points.len() < 2 {
        return Ok(Vec::new());
    }
    let display = points
        .iter()
        .map(|p| transformer.to_display(*p).map(Pos2::from))
        .collect::<Result<Vec<_>>>()?;

    Ok(vec![Shape::Path(PathShape::convex_polygon(
        display,
        style.fill_color,
        style.stroke(),
    ))])
}

/// Retained drawing surface, repainted from scratch on every change
#[derive(Debug, Default, Clone)]
pub struct Surface {
    shapes: Vec<Shape>,
}

impl Surface {
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    pub fn repaint(&mut self, shapes: Vec<Shape>) {
        self.shapes = shapes;
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
