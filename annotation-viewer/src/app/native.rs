use std::io;

use eframe::egui;
use log::info;

use super::AnnotationViewerApp;

pub fn run_native() -> eframe::Result {
    env_logger::init();

    let mut config = match std::fs::File::open("config.json") {
        Ok(f) => serde_json::from_reader(f).map_err(|e| eframe::Error::AppCreation(Box::new(e)))?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => crate::Config::default(),
        Err(e) => Err(eframe::Error::AppCreation(Box::new(e)))?,
    };

    if let Some(path) = std::env::args_os().nth(1) {
        config.image_path = Some(path.into());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(config.viewport),
        ..Default::default()
    };

    info!("Run with config: {config:?}");
    eframe::run_native(
        "Annotation Viewer",
        options,
        Box::new(|cc| Ok(Box::new(AnnotationViewerApp::new(cc, config)))),
    )
}
