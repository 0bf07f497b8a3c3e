use std::{cell::RefCell, rc::Rc};

use contour_drawer::{
    Callbacks, CircleTool, Contour, Controller, DrawTarget, ElementId, Error, Listeners,
    PixelPoint, PointerEvent, PointerEventKind, PolygonTool, RenderContext, ToolCapabilities,
    Viewport,
};
use egui::{Pos2, Vec2};

const SURFACE: ElementId = ElementId::new(1);
const OTHER: ElementId = ElementId::new(2);

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Focus(Option<Contour>),
    Add(Vec<PixelPoint>),
    Remove(Contour),
}

#[derive(Default, Clone)]
struct Recorder(Rc<RefCell<Vec<Call>>>);

impl Recorder {
    fn callbacks(&self) -> Callbacks<Contour> {
        let (focus, add, remove) = (self.0.clone(), self.0.clone(), self.0.clone());
        Callbacks::default()
            .on_focus(move |c| focus.borrow_mut().push(Call::Focus(c.cloned())))
            .on_add(move |points, _| add.borrow_mut().push(Call::Add(points)))
            .on_remove(move |c| remove.borrow_mut().push(Call::Remove(c.clone())))
    }

    fn take(&self) -> Vec<Call> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    fn count(&self, f: impl Fn(&Call) -> bool) -> usize {
        self.0.borrow().iter().filter(|c| f(c)).count()
    }
}

fn identity() -> Viewport {
    Viewport::new(SURFACE, Pos2::ZERO, 1.0, Vec2::ZERO)
}

fn p(x: f32, y: f32) -> PixelPoint {
    PixelPoint::new(x, y)
}

fn armed<T: ToolCapabilities>(
    tool: T,
    recorder: &Recorder,
) -> (Controller<T, Contour>, Rc<Listeners>) {
    let listeners = Listeners::new();
    let mut controller = Controller::new(tool, SURFACE, recorder.callbacks());
    controller.set_draw_target(DrawTarget::OwnSurface, &listeners);
    (controller, listeners)
}

fn send<T: ToolCapabilities>(
    controller: &mut Controller<T, Contour>,
    ctx: &dyn RenderContext,
    contours: &[Contour],
    kind: PointerEventKind,
    x: f32,
    y: f32,
) {
    controller
        .handle(SURFACE, &PointerEvent::new(kind, x, y), Some(ctx), contours)
        .unwrap();
}

#[test]
fn hover_click_removes_then_drag_draws_without_removing() {
    use PointerEventKind::*;
    let recorder = Recorder::default();
    let (mut tool, _listeners) = armed(CircleTool, &recorder);
    let viewport = identity();
    let circle = Contour::circle(p(50.0, 50.0), p(60.0, 50.0));
    let contours = vec![circle.clone()];

    send(&mut tool, &viewport, &contours, Move, 55.0, 50.0);
    send(&mut tool, &viewport, &contours, Down, 55.0, 50.0);
    send(&mut tool, &viewport, &contours, Up, 55.0, 50.0);
    send(&mut tool, &viewport, &contours, Click, 55.0, 50.0);
    assert_eq!(
        recorder.take(),
        vec![Call::Focus(Some(circle.clone())), Call::Remove(circle.clone())]
    );

    send(&mut tool, &viewport, &contours, Move, 55.0, 50.0);
    send(&mut tool, &viewport, &contours, Down, 200.0, 200.0);
    send(&mut tool, &viewport, &contours, Move, 225.0, 225.0);
    send(&mut tool, &viewport, &contours, Up, 225.0, 225.0);
    send(&mut tool, &viewport, &contours, Click, 225.0, 225.0);
    assert_eq!(
        recorder.take(),
        vec![
            Call::Focus(Some(circle)),
            Call::Add(vec![p(200.0, 200.0), p(225.0, 225.0)])
        ]
    );
}

#[test]
fn circle_draw_round_trip() {
    use PointerEventKind::*;
    let recorder = Recorder::default();
    let (mut tool, _listeners) = armed(CircleTool, &recorder);
    let viewport = identity();

    send(&mut tool, &viewport, &[], Down, 100.0, 100.0);
    send(&mut tool, &viewport, &[], Move, 130.0, 100.0);
    assert_eq!(tool.overlay().len(), 4);
    send(&mut tool, &viewport, &[], Up, 130.0, 100.0);

    assert_eq!(
        recorder.take(),
        vec![Call::Add(vec![p(100.0, 100.0), p(130.0, 100.0)])]
    );
    assert!(tool.buffer().is_empty());
    assert!(tool.overlay().is_empty());
    assert!(!tool.is_drawing());
}

#[test]
fn polygon_leave_cancels_draw() {
    use PointerEventKind::*;
    let recorder = Recorder::default();
    let (mut tool, _listeners) = armed(PolygonTool, &recorder);
    let viewport = identity();

    send(&mut tool, &viewport, &[], Down, 0.0, 0.0);
    for (x, y) in [(40.0, 0.0), (40.0, 40.0), (0.0, 40.0)] {
        send(&mut tool, &viewport, &[], Move, x, y);
    }
    assert_eq!(tool.buffer().len(), 4);
    assert_eq!(tool.overlay().len(), 1);

    send(&mut tool, &viewport, &[], Leave, 0.0, 40.0);
    send(&mut tool, &viewport, &[], Up, 0.0, 40.0);
    assert_eq!(recorder.count(|c| matches!(c, Call::Add(_))), 0);
    assert!(tool.buffer().is_empty());
    assert!(tool.overlay().is_empty());
}

#[test]
fn polygon_draw_adds_all_points_in_order() {
    use PointerEventKind::*;
    let recorder = Recorder::default();
    let (mut tool, _listeners) = armed(PolygonTool, &recorder);
    let viewport = Viewport::new(SURFACE, Pos2::new(10.0, 10.0), 2.0, Vec2::ZERO);

    send(&mut tool, &viewport, &[], Down, 10.0, 10.0);
    send(&mut tool, &viewport, &[], Move, 30.0, 10.0);
    send(&mut tool, &viewport, &[], Move, 30.0, 30.0);
    send(&mut tool, &viewport, &[], Up, 30.0, 30.0);

    assert_eq!(
        recorder.take(),
        vec![Call::Add(vec![p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0)])]
    );
}

#[test]
fn drag_threshold_is_measured_on_screen() {
    use PointerEventKind::*;
    let recorder = Recorder::default();
    let (mut tool, _listeners) = armed(CircleTool, &recorder);
    // 4 display pixels per image pixel
    let viewport = Viewport::new(SURFACE, Pos2::ZERO, 4.0, Vec2::ZERO);
    let circle = Contour::circle(p(10.0, 10.0), p(20.0, 10.0));
    let contours = vec![circle];

    send(&mut tool, &viewport, &contours, Move, 40.0, 40.0);
    send(&mut tool, &viewport, &contours, Down, 40.0, 40.0);
    // 6 image pixels, 24 on screen
    send(&mut tool, &viewport, &contours, Move, 64.0, 40.0);
    send(&mut tool, &viewport, &contours, Up, 64.0, 40.0);
    send(&mut tool, &viewport, &contours, Click, 64.0, 40.0);

    assert_eq!(recorder.count(|c| matches!(c, Call::Add(_))), 1);
    assert_eq!(recorder.count(|c| matches!(c, Call::Remove(_))), 0);
}

#[test]
fn toggling_draw_target_keeps_single_binding() {
    let recorder = Recorder::default();
    let listeners = Listeners::new();
    let mut tool = Controller::new(CircleTool, SURFACE, recorder.callbacks());
    let viewport = identity();
    let contours = vec![Contour::circle(p(50.0, 50.0), p(60.0, 50.0))];

    for _ in 0..5 {
        tool.set_draw_target(DrawTarget::Disabled, &listeners);
        assert_eq!(listeners.len(), 0);
        tool.set_draw_target(DrawTarget::OwnSurface, &listeners);
        assert_eq!(listeners.bound_on(SURFACE), 1);
    }
    // re-attaching with an unchanged target replaces the binding
    tool.attach(&listeners);
    assert_eq!(listeners.len(), 1);

    send(&mut tool, &viewport, &contours, PointerEventKind::Move, 55.0, 50.0);
    assert_eq!(recorder.count(|c| matches!(c, Call::Focus(_))), 1);
}

#[test]
fn disabled_tool_ignores_events() {
    let recorder = Recorder::default();
    let mut tool = Controller::new(PolygonTool, SURFACE, recorder.callbacks());
    let viewport = identity();

    send(&mut tool, &viewport, &[], PointerEventKind::Down, 0.0, 0.0);
    assert!(!tool.is_drawing());
    assert!(!tool.is_attached());
}

#[test]
fn armed_on_other_element_only_listens_there() {
    let recorder = Recorder::default();
    let listeners = Listeners::new();
    let mut tool = Controller::new(CircleTool, SURFACE, recorder.callbacks());
    tool.set_draw_target(DrawTarget::Element(OTHER), &listeners);
    let viewport = identity();
    let contours = vec![Contour::circle(p(50.0, 50.0), p(60.0, 50.0))];
    let hover = PointerEvent::new(PointerEventKind::Move, 55.0, 50.0);

    tool.handle(SURFACE, &hover, Some(&viewport), &contours).unwrap();
    assert!(recorder.take().is_empty());

    tool.handle(OTHER, &hover, Some(&viewport), &contours).unwrap();
    assert_eq!(recorder.take().len(), 1);
    assert_eq!(listeners.bound_on(OTHER), 1);
    assert_eq!(listeners.bound_on(SURFACE), 0);
}

#[test]
fn drawing_without_render_context_fails() {
    let recorder = Recorder::default();
    let (mut tool, _listeners) = armed(CircleTool, &recorder);
    let down = PointerEvent::new(PointerEventKind::Down, 1.0, 1.0);

    assert_eq!(
        tool.handle(SURFACE, &down, None, &[]),
        Err(Error::RenderContextUnavailable)
    );
    assert!(!tool.is_drawing());

    let viewport = identity();
    tool.handle(SURFACE, &down, Some(&viewport), &[]).unwrap();
    let drag = PointerEvent::new(PointerEventKind::Move, 50.0, 1.0);
    assert_eq!(
        tool.handle(SURFACE, &drag, None, &[]),
        Err(Error::RenderContextUnavailable)
    );
}

#[test]
fn hover_without_render_context_is_silent() {
    let recorder = Recorder::default();
    let (mut tool, _listeners) = armed(PolygonTool, &recorder);
    let contours = vec![Contour::polygon(vec![p(0.0, 0.0), p(9.0, 0.0), p(0.0, 9.0)]).unwrap()];
    let hover = PointerEvent::new(PointerEventKind::Move, 1.0, 1.0);

    assert_eq!(tool.handle(SURFACE, &hover, None, &contours), Ok(()));
    assert!(recorder.take().is_empty());
}

#[test]
fn hover_over_empty_set_clears_focus_silently() {
    use PointerEventKind::*;
    let recorder = Recorder::default();
    let (mut tool, _listeners) = armed(CircleTool, &recorder);
    let viewport = identity();
    let contours = vec![Contour::circle(p(50.0, 50.0), p(60.0, 50.0))];

    send(&mut tool, &viewport, &contours, Move, 50.0, 50.0);
    assert!(tool.focused().is_some());
    recorder.take();

    send(&mut tool, &viewport, &[], Move, 50.0, 50.0);
    send(&mut tool, &viewport, &[], Click, 50.0, 50.0);
    assert!(tool.focused().is_none());
    assert!(recorder.take().is_empty());
}

#[test]
fn detach_cancels_draw_and_drop_unbinds() {
    use PointerEventKind::*;
    let recorder = Recorder::default();
    let (mut tool, listeners) = armed(PolygonTool, &recorder);
    let viewport = identity();

    send(&mut tool, &viewport, &[], Down, 0.0, 0.0);
    send(&mut tool, &viewport, &[], Move, 30.0, 0.0);
    send(&mut tool, &viewport, &[], Move, 30.0, 30.0);
    tool.set_draw_target(DrawTarget::Disabled, &listeners);
    assert!(!tool.is_drawing());
    assert!(tool.overlay().is_empty());
    assert!(recorder.take().is_empty());

    tool.set_draw_target(DrawTarget::OwnSurface, &listeners);
    assert_eq!(listeners.len(), 1);
    drop(tool);
    assert!(listeners.is_empty());
}

#[test]
fn overlay_follows_viewport_changes() {
    use PointerEventKind::*;
    let recorder = Recorder::default();
    let (mut tool, _listeners) = armed(CircleTool, &recorder);
    let viewport = identity();

    send(&mut tool, &viewport, &[], Down, 0.0, 0.0);
    send(&mut tool, &viewport, &[], Move, 30.0, 40.0);
    let zoomed = Viewport::new(SURFACE, Pos2::ZERO, 2.0, Vec2::ZERO);
    tool.refresh_overlay(Some(&zoomed)).unwrap();

    let egui::Shape::Circle(hint) = &tool.overlay()[0] else {
        panic!("Expected hint circle first");
    };
    assert_eq!(hint.radius, 100.0);
}

#[test]
fn cancelled_gesture_does_not_leak_into_next_draw() {
    use PointerEventKind::*;
    let recorder = Recorder::default();
    let (mut tool, _listeners) = armed(PolygonTool, &recorder);
    let viewport = identity();

    send(&mut tool, &viewport, &[], Down, 0.0, 0.0);
    send(&mut tool, &viewport, &[], Move, 50.0, 0.0);
    // Up never arrives, the host stopped forwarding events
    tool.cancel();
    assert!(!tool.is_drawing());
    assert!(tool.overlay().is_empty());

    send(&mut tool, &viewport, &[], Down, 500.0, 500.0);
    send(&mut tool, &viewport, &[], Move, 550.0, 500.0);
    send(&mut tool, &viewport, &[], Move, 550.0, 550.0);
    send(&mut tool, &viewport, &[], Up, 550.0, 550.0);
    assert_eq!(
        recorder.take(),
        vec![Call::Add(vec![
            p(500.0, 500.0),
            p(550.0, 500.0),
            p(550.0, 550.0)
        ])]
    );
}

#[test]
fn replacing_own_surface_moves_binding() {
    use PointerEventKind::*;
    let recorder = Recorder::default();
    let (mut tool, listeners) = armed(CircleTool, &recorder);
    let moved = Viewport::new(OTHER, Pos2::ZERO, 1.0, Vec2::ZERO);

    tool.set_own_surface(OTHER, &listeners);
    assert_eq!(tool.bound_element(), Some(OTHER));
    assert_eq!(listeners.len(), 1);
    assert_eq!(listeners.bound_on(SURFACE), 0);

    let down = PointerEvent::new(Down, 0.0, 0.0);
    tool.handle(SURFACE, &down, Some(&moved), &[]).unwrap();
    assert!(!tool.is_drawing());
    tool.handle(OTHER, &down, Some(&moved), &[]).unwrap();
    assert!(tool.is_drawing());
}

#[test]
fn replacing_own_surface_keeps_explicit_target() {
    let recorder = Recorder::default();
    let listeners = Listeners::new();
    let mut tool = Controller::new(CircleTool, SURFACE, recorder.callbacks());
    tool.set_draw_target(DrawTarget::Element(OTHER), &listeners);

    tool.set_own_surface(ElementId::new(3), &listeners);
    assert_eq!(tool.bound_element(), Some(OTHER));
    assert_eq!(listeners.len(), 1);
}
