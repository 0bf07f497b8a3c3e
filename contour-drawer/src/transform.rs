use log::error;

use crate::{DisplayPoint, Error, PagePoint, PixelPoint, RenderContext, Result};

/// Converts pointer coordinates with whatever render context the host currently has.
///
/// The context is handed in per event and never cached, it may disappear between frames.
#[derive(Clone, Copy)]
pub struct Transformer<'a> {
    ctx: Option<&'a dyn RenderContext>,
}

impl<'a> Transformer<'a> {
    pub fn new(ctx: Option<&'a dyn RenderContext>) -> Self {
        Self { ctx }
    }

    pub fn is_available(&self) -> bool {
        self.ctx.is_some()
    }

    pub fn context(&self) -> Result<&'a dyn RenderContext> {
        self.ctx.ok_or_else(|| {
            error!("Coordinate conversion requested before the viewport rendered");
            Error::RenderContextUnavailable
        })
    }

    pub fn to_pixel(&self, page_x: f32, page_y: f32) -> Result<PixelPoint> {
        Ok(self.context()?.page_to_pixel(PagePoint::new(page_x, page_y)))
    }

    pub fn to_display(&self, pixel: PixelPoint) -> Result<DisplayPoint> {
        Ok(self.context()?.pixel_to_display(pixel))
    }
}
