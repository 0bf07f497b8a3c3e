use contour_drawer::{PointerEvent, PointerEventKind};
use egui::{Event, PointerButton, Pos2, Rect};

/// Turns egui's raw pointer input into element-scoped pointer events:
/// moves and presses only while over the element, a leave when the pointer exits,
/// and a click after a release when the press started on the element.
#[derive(Default)]
pub(super) struct PointerTracker {
    inside: bool,
    pressed_inside: bool,
}

impl PointerTracker {
    pub fn events(&mut self, ctx: &egui::Context, element: Rect) -> Vec<PointerEvent> {
        ctx.input(|i| {
            let mut out = Vec::new();
            for event in &i.events {
                match event {
                    Event::PointerMoved(pos) => self.moved(*pos, element, &mut out),
                    Event::PointerButton {
                        pos,
                        button: PointerButton::Primary,
                        pressed,
                        ..
                    } => self.button(*pos, *pressed, element, &mut out),
                    Event::PointerGone => {
                        if std::mem::take(&mut self.inside) {
                            out.push(event_at(PointerEventKind::Leave, Pos2::ZERO));
                        }
                        self.pressed_inside = false;
                    }
                    _ => {}
                }
            }
            out.iter().map(|e| e.at_time(i.time)).collect()
        })
    }

    fn moved(&mut self, pos: Pos2, element: Rect, out: &mut Vec<PointerEvent>) {
        let inside = element.contains(pos);
        if inside {
            out.push(event_at(PointerEventKind::Move, pos));
        } else if self.inside {
            out.push(event_at(PointerEventKind::Leave, pos));
            self.pressed_inside = false;
        }
        self.inside = inside;
    }

    fn button(&mut self, pos: Pos2, pressed: bool, element: Rect, out: &mut Vec<PointerEvent>) {
        if !element.contains(pos) {
            return;
        }
        if pressed {
            self.pressed_inside = true;
            out.push(event_at(PointerEventKind::Down, pos));
        } else {
            out.push(event_at(PointerEventKind::Up, pos));
            if std::mem::take(&mut self.pressed_inside) {
                out.push(event_at(PointerEventKind::Click, pos));
            }
        }
    }
}

fn event_at(kind: PointerEventKind, pos: Pos2) -> PointerEvent {
    PointerEvent::new(kind, pos.x, pos.y)
}
