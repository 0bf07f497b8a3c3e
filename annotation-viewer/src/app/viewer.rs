use contour_drawer::{ElementId, RenderContext, Viewport};
use egui::{Pos2, Rect, Response, Sense, Vec2, load::SizedTexture};

pub(super) struct ImageViewer {
    // Zoom level (0.05..1.0)
    // 1.0 means, that image width or height fits the viewport and the other dimension is smaller than the viewport
    zoom: f32,
    // Offset of the top left-corner (in fractions of the rendered image size)
    pan_offset: Vec2,
}

impl Default for ImageViewer {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan_offset: Vec2::ZERO,
        }
    }
}

impl ImageViewer {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn modify_zoom(&mut self, zoom: impl Fn(f32) -> f32) {
        self.zoom = zoom(self.zoom).clamp(0.05, 1.0);
    }

    /// Paints the image and returns the viewport it was painted with.
    ///
    /// CTRL + drag pans, CTRL + scroll zooms around the cursor.
    pub fn ui(
        &mut self,
        ui: &mut egui::Ui,
        element: ElementId,
        texture: SizedTexture,
    ) -> (Response, Viewport) {
        let viewport_rect = ui.available_rect_before_wrap();
        let response = ui.allocate_rect(viewport_rect, Sense::click_and_drag());
        let image_size = texture.size;
        let viewport_size = viewport_rect.size();
        let fit_scale =
            (viewport_size.x / image_size.x).min(viewport_size.y / image_size.y);

        let drag_delta = response.drag_delta();
        if drag_delta != Vec2::ZERO && ui.input(|i| i.modifiers.command || i.modifiers.ctrl) {
            let image_size_px = image_size * (fit_scale / self.zoom);
            self.pan_offset -= drag_delta / image_size_px;
        }

        if let Some(hover) = response.hover_pos() {
            let delta = ui.input(|i| i.zoom_delta());
            if delta != 1.0 {
                let before =
                    Viewport::fit(element, viewport_rect, image_size, self.zoom, self.pan_offset);
                let anchor = before.page_to_pixel(hover.into());
                self.modify_zoom(|x| x / delta);

                // Keep the pixel under the cursor where it is
                let render_scale = fit_scale / self.zoom;
                let screen_rel = hover - viewport_rect.min;
                self.pan_offset = (Vec2::new(anchor.x, anchor.y) * render_scale - screen_rel)
                    / (image_size * render_scale);
            }
        }

        let is_zoomed_out = (self.zoom - 1.0).abs() <= f32::EPSILON;
        if is_zoomed_out {
            let image_size_px = image_size * fit_scale;
            let center = ((viewport_size - image_size_px) * 0.5).max(Vec2::ZERO);
            self.pan_offset = -(center / image_size_px);
        }

        let viewport = Viewport::fit(element, viewport_rect, image_size, self.zoom, self.pan_offset);
        let image_rect = viewport
            .image_rect(image_size)
            .translate(viewport_rect.min.to_vec2());
        let uv = Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(1.0, 1.0));
        ui.painter().with_clip_rect(viewport_rect).image(
            texture.id,
            image_rect,
            uv,
            egui::Color32::WHITE,
        );

        (response, viewport)
    }
}
