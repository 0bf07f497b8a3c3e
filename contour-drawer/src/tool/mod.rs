mod circle;
mod polygon;

pub use circle::*;
pub use polygon::*;

use egui::Shape;

use crate::{Contour, ContourKind, OverlayStyle, PixelPoint, Result, Transformer};

/// What distinguishes one annotation tool from another.
///
/// The interaction state machine is shared, tools only decide how contours are hit,
/// how many points a gesture keeps and how the gesture in progress looks.
pub trait ToolCapabilities {
    fn kind(&self) -> ContourKind;

    fn locate<'c, C: AsRef<Contour>>(&self, contours: &'c [C], query: PixelPoint) -> Option<&'c C>;

    /// Maximum number of points in the draw buffer. When full, a new point replaces the last.
    fn buffer_limit(&self) -> Option<usize>;

    /// Fewer points than this at the end of a gesture do not produce an annotation
    fn min_points(&self) -> usize;

    fn render_overlay(
        &self,
        buffer: &[PixelPoint],
        transformer: &Transformer,
        style: &OverlayStyle,
    ) -> Result<Vec<Shape>>;
}
