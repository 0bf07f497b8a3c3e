use std::path::PathBuf;

use contour_drawer::OverlayStyle;
use egui::Vec2;

#[derive(serde::Deserialize, Debug)]
#[serde(default)]
pub struct Config {
    /// Image to annotate. A generated placeholder is shown when unset.
    pub image_path: Option<PathBuf>,
    pub viewport: Vec2,
    pub contour_style: OverlayStyle,
    pub circle_style: OverlayStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_path: None,
            viewport: [1024.0, 800.0].into(),
            contour_style: OverlayStyle::default(),
            circle_style: OverlayStyle::default(),
        }
    }
}
