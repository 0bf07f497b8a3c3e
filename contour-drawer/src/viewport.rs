use egui::{Pos2, Rect, Vec2};

use crate::{DisplayPoint, ElementId, PagePoint, PixelPoint};

/// Render context published by the host image viewer after it has rendered a frame.
///
/// Display coordinates are relative to the top-left corner of [`RenderContext::element`],
/// like canvas coordinates of the element the image is painted on.
pub trait RenderContext {
    fn element(&self) -> ElementId;
    fn page_to_pixel(&self, page: PagePoint) -> PixelPoint;
    fn pixel_to_display(&self, pixel: PixelPoint) -> DisplayPoint;
}

/// Affine viewport: `display = pixel * scale + offset`, `page = display + origin`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    element: ElementId,
    // Top-left of the element on the page
    origin: Pos2,
    scale: f32,
    // Top-left of the image relative to the element
    offset: Vec2,
}

impl Viewport {
    pub fn new(element: ElementId, origin: Pos2, scale: f32, offset: Vec2) -> Self {
        Self {
            element,
            origin,
            scale,
            offset,
        }
    }

    /// Viewport of an image shown in `element_rect`.
    ///
    /// At `zoom == 1.0` the whole image fits the element and the other dimension is
    /// letterboxed. Smaller zoom values magnify. `pan_offset` is the top-left corner of the
    /// visible region as a fraction of the rendered image size.
    pub fn fit(
        element: ElementId,
        element_rect: Rect,
        image_size: Vec2,
        zoom: f32,
        pan_offset: Vec2,
    ) -> Self {
        let viewport_size = element_rect.size();
        let fit_scale = (viewport_size.x / image_size.x).min(viewport_size.y / image_size.y);
        let render_scale = fit_scale / zoom;
        let image_size_px = image_size * render_scale;
        let pixel_offset = image_size_px * -pan_offset;
        Self::new(element, element_rect.min, render_scale, pixel_offset)
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn origin(&self) -> Pos2 {
        self.origin
    }

    /// Rect covered by the image in display coordinates
    pub fn image_rect(&self, image_size: Vec2) -> Rect {
        Rect::from_min_size(self.offset.to_pos2(), image_size * self.scale)
    }
}

impl RenderContext for Viewport {
    fn element(&self) -> ElementId {
        self.element
    }

    fn page_to_pixel(&self, page: PagePoint) -> PixelPoint {
        let display = Pos2::new(page.x, page.y) - self.origin;
        let p = (display - self.offset) / self.scale;
        PixelPoint::new(p.x, p.y)
    }

    fn pixel_to_display(&self, pixel: PixelPoint) -> DisplayPoint {
        let p = Vec2::new(pixel.x, pixel.y) * self.scale + self.offset;
        DisplayPoint::new(p.x, p.y)
    }
}
