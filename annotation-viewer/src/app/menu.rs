use contour_drawer::ContourKind;

const ICON_CIRCLE: &str = "\u{25EF}";
const ICON_CONTOUR: &str = "\u{270F}";

impl super::AnnotationViewerApp {
    pub(super) fn menu_ui(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let mut active = self.active;
            ui.selectable_value(&mut active, ContourKind::Circle, ICON_CIRCLE)
                .on_hover_text("Circle markers");
            ui.selectable_value(&mut active, ContourKind::Polygon, ICON_CONTOUR)
                .on_hover_text("Free-form contours");
            let mut armed = self.armed;
            ui.checkbox(&mut armed, "Draw");

            if active != self.active || armed != self.armed {
                self.active = active;
                self.armed = armed;
                self.rearm();
            }

            ui.separator();
            if ui.button("Clear").clicked() {
                self.circles.clear();
                self.contours.clear();
                self.focused = None;
            }
            if ui.button("Reset view").clicked() {
                self.viewer.reset();
            }

            ui.separator();
            ui.label(format!(
                "{} circles, {} contours",
                self.circles.len(),
                self.contours.len()
            ));
            if let Some(status) = &self.status {
                ui.colored_label(egui::Color32::LIGHT_RED, status);
            }
        });
    }
}
