use egui::Shape;

use crate::{
    Contour, ContourKind, OverlayStyle, PixelPoint, Result, ToolCapabilities, Transformer,
    circle_overlay, locate_circle,
};

/// Circle markers: press at the center, release at the rim
#[derive(Debug, Default, Clone, Copy)]
pub struct CircleTool;

impl ToolCapabilities for CircleTool {
    fn kind(&self) -> ContourKind {
        ContourKind::Circle
    }

    fn locate<'c, C: AsRef<Contour>>(&self, contours: &'c [C], query: PixelPoint) -> Option<&'c C> {
        locate_circle(contours, query)
    }

    fn buffer_limit(&self) -> Option<usize> {
        Some(2)
    }

    fn min_points(&self) -> usize {
        2
    }

    fn render_overlay(
        &self,
        buffer: &[PixelPoint],
        transformer: &Transformer,
        style: &OverlayStyle,
    ) -> Result<Vec<Shape>> {
        match buffer {
            [p1, p2] => circle_overlay(*p1, *p2, transformer, style),
            _ => Ok(Vec::new()),
        }
    }
}
