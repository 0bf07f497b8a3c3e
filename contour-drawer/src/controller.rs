use std::rc::Rc;

use egui::Shape;
use log::{debug, info};

use crate::{
    Binding, Contour, DrawTarget, ElementId, Listeners, OverlayStyle, PagePoint, PixelPoint,
    RenderContext, Result, Surface, ToolCapabilities, Transformer,
};

/// Pointer travel, in display pixels along either axis, after which a gesture is a drag.
/// The click that follows a drag does not remove anything.
pub const DRAG_THRESHOLD: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Move,
    Down,
    Up,
    /// Emitted by the host after `Up` when press and release happened on the same element
    Click,
    /// Pointer left the element
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub page: PagePoint,
    /// Host time in seconds
    pub timestamp: f64,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, page_x: f32, page_y: f32) -> Self {
        Self {
            kind,
            page: PagePoint::new(page_x, page_y),
            timestamp: 0.0,
        }
    }

    pub fn at_time(mut self, timestamp: f64) -> Self {
        self.timestamp = timestamp;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Idle,
    Drawing,
}

/// Transition input. Coordinates are converted and hit testing is done by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Input<C> {
    /// Pointer moved while idle, with the contour under it
    Hover(Option<C>),
    /// Pointer moved while idle over an empty annotation set
    Unfocus,
    Press { page: PagePoint, pixel: PixelPoint },
    Drag { page: PagePoint, pixel: PixelPoint },
    Release,
    Click,
    Leave,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect<C> {
    Focus(Option<C>),
    Add(Vec<PixelPoint>),
    Remove(C),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawRules {
    pub buffer_limit: Option<usize>,
    pub min_points: usize,
}

impl DrawRules {
    pub fn of(tool: &impl ToolCapabilities) -> Self {
        Self {
            buffer_limit: tool.buffer_limit(),
            min_points: tool.min_points(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawState<C> {
    pub mode: Mode,
    pub focus: Option<C>,
    pub buffer: Vec<PixelPoint>,
    pub drag: bool,
    pub start: Option<PagePoint>,
}

impl<C> Default for DrawState<C> {
    fn default() -> Self {
        Self {
            mode: Mode::Idle,
            focus: None,
            buffer: Vec::new(),
            drag: false,
            start: None,
        }
    }
}

impl<C: Clone> DrawState<C> {
    pub fn step(mut self, input: Input<C>, rules: DrawRules) -> (Self, Option<Effect<C>>) {
        let effect = match (self.mode, input) {
            (Mode::Idle, Input::Hover(hit)) => {
                self.focus = hit.clone();
                Some(Effect::Focus(hit))
            }
            (Mode::Idle, Input::Unfocus) => {
                self.focus = None;
                None
            }
            (Mode::Idle, Input::Press { page, pixel }) => {
                self.mode = Mode::Drawing;
                self.drag = false;
                self.start = Some(page);
                self.buffer = vec![pixel];
                None
            }
            (Mode::Idle, Input::Click) => {
                if self.drag {
                    self.drag = false;
                    None
                } else {
                    // Focus is refreshed by the next hover
                    self.focus.take().map(Effect::Remove)
                }
            }
            (Mode::Drawing, Input::Drag { page, pixel }) => {
                if let Some(start) = self.start
                    && exceeds_threshold(start, page)
                {
                    self.drag = true;
                }
                match rules.buffer_limit {
                    Some(limit) if self.buffer.len() >= limit => {
                        if let Some(last) = self.buffer.last_mut() {
                            *last = pixel;
                        }
                    }
                    _ => self.buffer.push(pixel),
                }
                None
            }
            (Mode::Drawing, Input::Release) => {
                let points = std::mem::take(&mut self.buffer);
                self.mode = Mode::Idle;
                self.start = None;
                (points.len() >= rules.min_points).then_some(Effect::Add(points))
            }
            (Mode::Drawing, Input::Leave) => {
                self.buffer.clear();
                self.mode = Mode::Idle;
                self.start = None;
                None
            }
            (_, _) => None,
        };
        (self, effect)
    }
}

fn exceeds_threshold(start: PagePoint, current: PagePoint) -> bool {
    (current.x - start.x).abs().max((current.y - start.y).abs()) > DRAG_THRESHOLD
}

type FocusFn<C> = Box<dyn FnMut(Option<&C>)>;
type AddFn = Box<dyn FnMut(Vec<PixelPoint>, &PointerEvent)>;
type RemoveFn<C> = Box<dyn FnMut(&C)>;

/// Requests to the owner of the annotation set
pub struct Callbacks<C> {
    on_focus: FocusFn<C>,
    on_add: AddFn,
    on_remove: RemoveFn<C>,
}

impl<C> Default for Callbacks<C> {
    fn default() -> Self {
        Self {
            on_focus: Box::new(|_| {}),
            on_add: Box::new(|_, _| {}),
            on_remove: Box::new(|_| {}),
        }
    }
}

impl<C> Callbacks<C> {
    pub fn on_focus(mut self, f: impl FnMut(Option<&C>) + 'static) -> Self {
        self.on_focus = Box::new(f);
        self
    }

    pub fn on_add(mut self, f: impl FnMut(Vec<PixelPoint>, &PointerEvent) + 'static) -> Self {
        self.on_add = Box::new(f);
        self
    }

    pub fn on_remove(mut self, f: impl FnMut(&C) + 'static) -> Self {
        self.on_remove = Box::new(f);
        self
    }
}

pub struct Controller<T, C> {
    tool: T,
    rules: DrawRules,
    style: OverlayStyle,
    state: DrawState<C>,
    surface: Surface,
    callbacks: Callbacks<C>,
    own_surface: ElementId,
    target: DrawTarget,
    binding: Option<Binding>,
}

impl<T: ToolCapabilities, C: AsRef<Contour> + Clone> Controller<T, C> {
    pub fn new(tool: T, own_surface: ElementId, callbacks: Callbacks<C>) -> Self {
        Self {
            rules: DrawRules::of(&tool),
            tool,
            style: OverlayStyle::default(),
            state: DrawState::default(),
            surface: Surface::default(),
            callbacks,
            own_surface,
            target: DrawTarget::Disabled,
            binding: None,
        }
    }

    pub fn with_style(mut self, style: OverlayStyle) -> Self {
        self.style = style;
        self
    }

    /// Binds to the element the current draw target resolves to. Any previous binding is
    /// released first, so at most one listener set is ever bound.
    pub fn attach(&mut self, listeners: &Rc<Listeners>) {
        self.detach();
        if let Some(element) = self.target.resolve(self.own_surface) {
            debug!("Attaching {} tool to {element:?}", self.tool.kind());
            self.binding = Some(listeners.bind(element));
        }
    }

    /// Releases the binding. A gesture in progress is cancelled without adding anything.
    pub fn detach(&mut self) {
        if let Some(binding) = self.binding.take() {
            debug!("Detaching {} tool from {:?}", self.tool.kind(), binding.element());
        }
        self.cancel();
    }

    /// Drops a gesture in progress as if the pointer had left the element.
    /// Used when the host stops forwarding events mid-gesture, e.g. while panning.
    pub fn cancel(&mut self) {
        if self.state.mode == Mode::Drawing {
            self.apply(Input::Leave);
            self.surface.clear();
        }
    }

    /// Re-arms on a new target. Nothing happens if the target did not change.
    pub fn set_draw_target(&mut self, target: DrawTarget, listeners: &Rc<Listeners>) {
        if target == self.target {
            return;
        }
        self.target = target;
        self.attach(listeners);
    }

    /// Replaces the element the tool draws on by default. An `OwnSurface` binding moves along.
    pub fn set_own_surface(&mut self, element: ElementId, listeners: &Rc<Listeners>) {
        if element == self.own_surface {
            return;
        }
        self.own_surface = element;
        if self.target == DrawTarget::OwnSurface {
            self.attach(listeners);
        }
    }

    pub fn is_attached(&self) -> bool {
        self.binding.is_some()
    }

    pub fn bound_element(&self) -> Option<ElementId> {
        self.binding.as_ref().map(Binding::element)
    }

    pub fn is_drawing(&self) -> bool {
        self.state.mode == Mode::Drawing
    }

    pub fn focused(&self) -> Option<&C> {
        self.state.focus.as_ref()
    }

    pub fn buffer(&self) -> &[PixelPoint] {
        &self.state.buffer
    }

    /// Overlay of the gesture in progress, relative to the tool's surface
    pub fn overlay(&self) -> &[Shape] {
        self.surface.shapes()
    }

    /// Repaints the overlay for a changed viewport while a gesture is in progress
    pub fn refresh_overlay(&mut self, ctx: Option<&dyn RenderContext>) -> Result<()> {
        if self.is_drawing() {
            self.repaint(&Transformer::new(ctx))?;
        }
        Ok(())
    }

    /// Handles a pointer event the host observed on `element`.
    ///
    /// Events for elements this tool is not bound to are ignored. Pressing or drawing
    /// without a render context fails with [`crate::Error::RenderContextUnavailable`].
    pub fn handle(
        &mut self,
        element: ElementId,
        event: &PointerEvent,
        ctx: Option<&dyn RenderContext>,
        contours: &[C],
    ) -> Result<()> {
        if self.bound_element() != Some(element) {
            return Ok(());
        }
        let transformer = Transformer::new(ctx);
        let page = event.page;

        let input = match (self.state.mode, event.kind) {
            (Mode::Idle, PointerEventKind::Move) => {
                if contours.is_empty() {
                    Input::Unfocus
                } else if !transformer.is_available() {
                    return Ok(());
                } else {
                    let pixel = transformer.to_pixel(page.x, page.y)?;
                    Input::Hover(self.tool.locate(contours, pixel).cloned())
                }
            }
            (Mode::Idle, PointerEventKind::Down) => Input::Press {
                page,
                pixel: transformer.to_pixel(page.x, page.y)?,
            },
            (Mode::Idle, PointerEventKind::Click) => Input::Click,
            (Mode::Drawing, PointerEventKind::Move) => Input::Drag {
                page,
                pixel: transformer.to_pixel(page.x, page.y)?,
            },
            (Mode::Drawing, PointerEventKind::Up) => Input::Release,
            (Mode::Drawing, PointerEventKind::Leave) => Input::Leave,
            _ => return Ok(()),
        };

        let was_drawing = self.is_drawing();
        let effect = self.apply(input);

        if self.is_drawing() {
            if event.kind == PointerEventKind::Move {
                self.repaint(&transformer)?;
            }
        } else if was_drawing {
            self.surface.clear();
        }

        match effect {
            Some(Effect::Focus(hit)) => (self.callbacks.on_focus)(hit.as_ref()),
            Some(Effect::Add(points)) => {
                info!("Adding {} with {} points", self.tool.kind(), points.len());
                (self.callbacks.on_add)(points, event);
            }
            Some(Effect::Remove(contour)) => {
                info!("Removing {}", contour.as_ref().kind());
                (self.callbacks.on_remove)(&contour);
            }
            None => {}
        }
        Ok(())
    }

    fn apply(&mut self, input: Input<C>) -> Option<Effect<C>> {
        let from = self.state.mode;
        let (state, effect) = std::mem::take(&mut self.state).step(input, self.rules);
        if from != state.mode {
            debug!("{} tool: {from:?} -> {:?}", self.tool.kind(), state.mode);
        }
        self.state = state;
        effect
    }

    fn repaint(&mut self, transformer: &Transformer) -> Result<()> {
        let shapes = self
            .tool
            .render_overlay(&self.state.buffer, transformer, &self.style)?;
        self.surface.repaint(shapes);
        Ok(())
    }
}
