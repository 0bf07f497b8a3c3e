use egui::Shape;

use crate::{
    Contour, ContourKind, MIN_POLYGON_POINTS, OverlayStyle, PixelPoint, Result, ToolCapabilities,
    Transformer, locate_polygon, polygon_overlay,
};

/// Free-form contours traced by dragging
#[derive(Debug, Default, Clone, Copy)]
pub struct PolygonTool;

impl ToolCapabilities for PolygonTool {
    fn kind(&self) -> ContourKind {
        ContourKind::Polygon
    }

    fn locate<'c, C: AsRef<Contour>>(&self, contours: &'c [C], query: PixelPoint) -> Option<&'c C> {
        locate_polygon(contours, query)
    }

    fn buffer_limit(&self) -> Option<usize> {
        None
    }

    fn min_points(&self) -> usize {
        MIN_POLYGON_POINTS
    }

    fn render_overlay(
        &self,
        buffer: &[PixelPoint],
        transformer: &Transformer,
        style: &OverlayStyle,
    ) -> Result<Vec<Shape>> {
        polygon_overlay(buffer, transformer, style)
    }
}
