use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Where a tool takes its pointer events from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawTarget {
    #[default]
    Disabled,
    /// Armed on the surface the tool paints its overlay on
    OwnSurface,
    /// Armed on a different element, gestures there are drawn on the tool's surface
    Element(ElementId),
}

impl DrawTarget {
    pub fn is_armed(&self) -> bool {
        !matches!(self, DrawTarget::Disabled)
    }

    pub fn resolve(&self, own_surface: ElementId) -> Option<ElementId> {
        match self {
            DrawTarget::Disabled => None,
            DrawTarget::OwnSurface => Some(own_surface),
            DrawTarget::Element(element) => Some(*element),
        }
    }
}

impl From<bool> for DrawTarget {
    fn from(armed: bool) -> Self {
        if armed {
            DrawTarget::OwnSurface
        } else {
            DrawTarget::Disabled
        }
    }
}

impl From<Option<ElementId>> for DrawTarget {
    fn from(element: Option<ElementId>) -> Self {
        element.map_or(DrawTarget::Disabled, DrawTarget::Element)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerKey(u64);

/// Host-side table of bound listener sets
#[derive(Default)]
pub struct Listeners {
    next_key: Cell<u64>,
    bound: RefCell<Vec<(ListenerKey, ElementId)>>,
}

impl Listeners {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn bind(self: &Rc<Self>, element: ElementId) -> Binding {
        let key = ListenerKey(self.next_key.get());
        self.next_key.set(key.0 + 1);
        self.bound.borrow_mut().push((key, element));
        debug!("Bound listener set {key:?} on {element:?}");
        Binding {
            table: Rc::clone(self),
            key,
            element,
        }
    }

    fn unbind(&self, key: ListenerKey) {
        self.bound.borrow_mut().retain(|(k, _)| *k != key);
        debug!("Unbound listener set {key:?}");
    }

    /// Number of listener sets currently bound to `element`
    pub fn bound_on(&self, element: ElementId) -> usize {
        self.bound
            .borrow()
            .iter()
            .filter(|(_, e)| *e == element)
            .count()
    }

    pub fn is_bound(&self, key: ListenerKey) -> bool {
        self.bound.borrow().iter().any(|(k, _)| *k == key)
    }

    pub fn len(&self) -> usize {
        self.bound.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bound.borrow().is_empty()
    }
}

/// A bound listener set. Unbinds when dropped.
pub struct Binding {
    table: Rc<Listeners>,
    key: ListenerKey,
    element: ElementId,
}

impl Binding {
    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn key(&self) -> ListenerKey {
        self.key
    }
}

impl Drop for Binding {
    fn drop(&mut self) {
        self.table.unbind(self.key);
    }
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("key", &self.key)
            .field("element", &self.element)
            .finish()
    }
}
