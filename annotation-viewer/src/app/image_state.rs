use std::path::Path;

use egui::{ColorImage, TextureHandle, TextureOptions, Vec2, load::SizedTexture};

pub(super) enum ImageState {
    Loaded(TextureHandle),
    Error(String),
}

impl ImageState {
    pub fn load(ctx: &egui::Context, path: Option<&Path>) -> Self {
        let image = match path {
            Some(path) => match image::open(path) {
                Ok(image) => {
                    let rgba = image.to_rgba8();
                    ColorImage::from_rgba_unmultiplied(
                        [rgba.width() as usize, rgba.height() as usize],
                        rgba.as_raw(),
                    )
                }
                Err(e) => return ImageState::Error(format!("{}: {e}", path.display())),
            },
            None => placeholder([512, 512]),
        };
        let handle = ctx.load_texture(
            "Image",
            image,
            TextureOptions {
                magnification: egui::TextureFilter::Nearest,
                ..Default::default()
            },
        );
        ImageState::Loaded(handle)
    }

    pub fn texture(&self) -> Option<SizedTexture> {
        match self {
            ImageState::Loaded(handle) => Some(SizedTexture::from_handle(handle)),
            ImageState::Error(_) => None,
        }
    }
}

/// Radial gradient standing in for a scan when no image is configured
fn placeholder([width, height]: [usize; 2]) -> ColorImage {
    let center = Vec2::new(width as f32, height as f32) * 0.5;
    let max = center.length();
    let pixels = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .map(|(x, y)| {
            let d = (Vec2::new(x as f32, y as f32) - center).length() / max;
            let v = (255.0 * (1.0 - d).clamp(0.0, 1.0)) as u8;
            egui::Color32::from_gray(v)
        })
        .collect();
    ColorImage {
        size: [width, height],
        pixels,
    }
}
