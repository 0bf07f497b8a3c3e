use std::{cell::RefCell, rc::Rc};

use contour_drawer::{
    Callbacks, CircleTool, Contour, ContourKind, Controller, DrawTarget, ElementId, Error,
    Listeners, PixelPoint, PointerEvent, PolygonTool, RenderContext, Viewport,
};
use egui::{Color32, Shape, Stroke};
use log::{error, info, warn};

use crate::Config;
use image_state::ImageState;
use input::PointerTracker;
use viewer::ImageViewer;

mod image_state;
mod input;
mod menu;
mod native;
mod viewer;

pub use native::run_native;

/// The element the image is painted on. Both tools use it as their own surface.
const IMAGE_SURFACE: ElementId = ElementId::new(1);
const FOCUS_COLOR: Color32 = Color32::from_rgb(255, 96, 64);
const CONTOUR_COLOR: Color32 = Color32::from_rgb(64, 200, 255);

/// Requests from the tools, applied to the annotation sets after dispatch
#[derive(Debug)]
enum Request {
    Focus(Option<Contour>),
    Add(ContourKind, Vec<PixelPoint>),
    Remove(Contour),
}

type Requests = Rc<RefCell<Vec<Request>>>;

fn callbacks(kind: ContourKind, requests: &Requests) -> Callbacks<Contour> {
    let (focus, add, remove) = (requests.clone(), requests.clone(), requests.clone());
    Callbacks::default()
        .on_focus(move |c| focus.borrow_mut().push(Request::Focus(c.cloned())))
        .on_add(move |points, _event: &PointerEvent| {
            add.borrow_mut().push(Request::Add(kind, points))
        })
        .on_remove(move |c| remove.borrow_mut().push(Request::Remove(c.clone())))
}

/// Keeps the last error until a batch of events goes through without one
fn next_status(
    current: Option<String>,
    dispatched: usize,
    error: Option<&Error>,
) -> Option<String> {
    match error {
        Some(e) => Some(e.to_string()),
        None if dispatched > 0 => None,
        None => current,
    }
}

pub(crate) struct AnnotationViewerApp {
    image: ImageState,
    viewer: ImageViewer,
    tracker: PointerTracker,
    listeners: Rc<Listeners>,
    requests: Requests,
    circle_tool: Controller<CircleTool, Contour>,
    contour_tool: Controller<PolygonTool, Contour>,
    active: ContourKind,
    armed: bool,
    circles: Vec<Contour>,
    contours: Vec<Contour>,
    focused: Option<Contour>,
    status: Option<String>,
}

impl AnnotationViewerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config) -> Self {
        let requests = Requests::default();
        let image = ImageState::load(&cc.egui_ctx, config.image_path.as_deref());
        let status = match &image {
            ImageState::Error(e) => Some(format!("Could not load image: {e}")),
            ImageState::Loaded(_) => None,
        };
        let mut app = Self {
            image,
            viewer: ImageViewer::default(),
            tracker: PointerTracker::default(),
            listeners: Listeners::new(),
            circle_tool: Controller::new(
                CircleTool,
                IMAGE_SURFACE,
                callbacks(ContourKind::Circle, &requests),
            )
            .with_style(config.circle_style),
            contour_tool: Controller::new(
                PolygonTool,
                IMAGE_SURFACE,
                callbacks(ContourKind::Polygon, &requests),
            )
            .with_style(config.contour_style),
            requests,
            active: ContourKind::Polygon,
            armed: true,
            circles: Vec::new(),
            contours: Vec::new(),
            focused: None,
            status,
        };
        app.rearm();
        app
    }

    /// Arms the active tool on the image and disarms the other one
    fn rearm(&mut self) {
        let target = |kind| DrawTarget::from(self.armed && self.active == kind);
        let (circle, contour) = (target(ContourKind::Circle), target(ContourKind::Polygon));
        self.circle_tool.set_draw_target(circle, &self.listeners);
        self.contour_tool.set_draw_target(contour, &self.listeners);
        self.focused = None;
    }

    fn dispatch(&mut self, events: &[PointerEvent], viewport: &Viewport) {
        let mut last_error = None;
        for event in events {
            let results = [
                self.circle_tool
                    .handle(IMAGE_SURFACE, event, Some(viewport), &self.circles),
                self.contour_tool
                    .handle(IMAGE_SURFACE, event, Some(viewport), &self.contours),
            ];
            for result in results {
                if let Err(e) = result {
                    error!("Pointer event {:?} failed: {e}", event.kind);
                    last_error = Some(e);
                }
            }
            self.apply_requests();
        }
        self.status = next_status(self.status.take(), events.len(), last_error.as_ref());
    }

    fn apply_requests(&mut self) {
        let requests = std::mem::take(&mut *self.requests.borrow_mut());
        for request in requests {
            match request {
                Request::Focus(contour) => self.focused = contour,
                Request::Add(kind, points) => match Contour::from_points(kind, points) {
                    Ok(contour) => {
                        info!("Stored {kind} annotation");
                        self.set_mut(kind).push(contour);
                    }
                    Err(e) => warn!("Dropped annotation: {e}"),
                },
                Request::Remove(contour) => {
                    self.set_mut(contour.kind()).retain(|c| *c != contour);
                    if self.focused.as_ref() == Some(&contour) {
                        self.focused = None;
                    }
                }
            }
        }
    }

    fn set_mut(&mut self, kind: ContourKind) -> &mut Vec<Contour> {
        match kind {
            ContourKind::Circle => &mut self.circles,
            ContourKind::Polygon => &mut self.contours,
        }
    }

    fn paint_annotations(&self, painter: &egui::Painter, viewport: &Viewport) {
        let origin = viewport.origin().to_vec2();
        let to_screen = |p: PixelPoint| egui::Pos2::from(viewport.pixel_to_display(p)) + origin;

        for contour in self.circles.iter().chain(&self.contours) {
            let color = if self.focused.as_ref() == Some(contour) {
                FOCUS_COLOR
            } else {
                CONTOUR_COLOR
            };
            let stroke = Stroke::new(2.0, color);
            let shape = match contour {
                Contour::Circle { center, edge } => {
                    let c = to_screen(*center);
                    Shape::circle_stroke(c, c.distance(to_screen(*edge)), stroke)
                }
                Contour::Polygon { points } => {
                    Shape::closed_line(points.iter().copied().map(to_screen).collect(), stroke)
                }
            };
            painter.add(shape);
        }

        for shape in self
            .circle_tool
            .overlay()
            .iter()
            .chain(self.contour_tool.overlay())
        {
            let mut shape = shape.clone();
            shape.translate(origin);
            painter.add(shape);
        }
    }
}

impl eframe::App for AnnotationViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("menu").show(ctx, |ui| self.menu_ui(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(texture) = self.image.texture() else {
                ui.label("No image loaded");
                return;
            };
            let (response, viewport) = self.viewer.ui(ui, IMAGE_SURFACE, texture);

            let panning = ui.input(|i| i.modifiers.command || i.modifiers.ctrl);
            let events = self.tracker.events(ui.ctx(), response.rect);
            if panning {
                // Up and Leave are not forwarded while panning
                self.circle_tool.cancel();
                self.contour_tool.cancel();
            } else {
                self.dispatch(&events, &viewport);
            }
            for result in [
                self.circle_tool.refresh_overlay(Some(&viewport)),
                self.contour_tool.refresh_overlay(Some(&viewport)),
            ] {
                if let Err(e) = result {
                    error!("Overlay repaint failed: {e}");
                }
            }

            self.paint_annotations(&ui.painter().with_clip_rect(response.rect), &viewport);
        });
    }
}
