// SPDX-License-Identifier: MPL-2.0
//! Single-threaded event targets used by toasts and dialogs.
//!
//! These types stand in for DOM nodes: a [`Button`] carries click
//! listeners and a class list, a [`DialogNode`] carries the two dialog
//! completion events. Both are cheap `Rc` handles, so the engine that
//! renders a control and the code that listens on it share one node.
//!
//! Listeners are invoked from a snapshot of the registry, which lets a
//! listener remove itself (or its siblings) while an event is being
//! delivered.

use crate::application::port::{DialogElement, DialogEvent, ToastControl};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Identifies a registered listener so it can be removed later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Creates a new unique listener ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ListenerId {
    fn default() -> Self {
        Self::new()
    }
}

/// A shared event callback receiving the event argument by reference.
pub type Listener<A> = Rc<dyn Fn(&A)>;

/// Ordered registry of listeners for one event type.
pub struct Listeners<A> {
    entries: RefCell<Vec<(ListenerId, Listener<A>)>>,
}

impl<A> Listeners<A> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(Vec::new()),
        }
    }

    /// Registers a listener and returns its ID.
    pub fn add(&self, listener: Listener<A>) -> ListenerId {
        let id = ListenerId::new();
        self.entries.borrow_mut().push((id, listener));
        id
    }

    /// Removes a listener. Returns `true` if it was registered.
    pub fn remove(&self, id: ListenerId) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() < before
    }

    /// Invokes every listener registered at the time of the call.
    ///
    /// Returns the number of listeners invoked.
    pub fn emit(&self, arg: &A) -> usize {
        let snapshot: Vec<Listener<A>> = self
            .entries
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in &snapshot {
            listener(arg);
        }
        snapshot.len()
    }

    /// Drops every listener.
    pub fn clear(&self) {
        let drained: Vec<_> = self.entries.borrow_mut().drain(..).collect();
        drop(drained);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl<A> Default for Listeners<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for Listeners<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.len())
            .finish()
    }
}

// =============================================================================
// Button
// =============================================================================

#[derive(Debug)]
struct ButtonInner {
    label: String,
    classes: Vec<String>,
    clicks: Listeners<()>,
}

/// A clickable control embedded in a toast body.
#[derive(Debug, Clone)]
pub struct Button {
    inner: Rc<ButtonInner>,
}

impl Button {
    /// Creates a button from its label and a whitespace-separated class list.
    pub fn new(label: impl Into<String>, class: &str) -> Self {
        Self {
            inner: Rc::new(ButtonInner {
                label: label.into(),
                classes: class.split_whitespace().map(str::to_string).collect(),
                clicks: Listeners::new(),
            }),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.inner.label
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.inner.classes.iter().any(|c| c == class)
    }

    /// Returns whether this button matches a class selector like `.btn.confirm-yes`.
    ///
    /// Every class in the selector must be present. An empty selector
    /// matches nothing.
    #[must_use]
    pub fn matches(&self, selector: &str) -> bool {
        let mut classes = selector.split('.').filter(|c| !c.is_empty()).peekable();
        if classes.peek().is_none() {
            return false;
        }
        classes.all(|class| self.has_class(class))
    }

    /// Fires the click listeners. Returns how many were invoked.
    pub fn click(&self) -> usize {
        self.inner.clicks.emit(&())
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.clicks.len()
    }

    /// Drops all click listeners once the owning toast is gone.
    pub fn release(&self) {
        self.inner.clicks.clear();
    }

    /// Returns whether both handles point at the same button.
    #[must_use]
    pub fn same_node(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl ToastControl for Button {
    fn on_click(&self, listener: Listener<()>) -> ListenerId {
        self.inner.clicks.add(listener)
    }

    fn remove_click_listener(&self, id: ListenerId) -> bool {
        self.inner.clicks.remove(id)
    }
}

// =============================================================================
// DialogNode
// =============================================================================

#[derive(Debug)]
struct DialogInner<D> {
    name: String,
    accept: Listeners<Option<D>>,
    reject: Listeners<Option<D>>,
}

/// A dialog element emitting `dialog-accept` / `dialog-reject` events.
#[derive(Debug)]
pub struct DialogNode<D> {
    inner: Rc<DialogInner<D>>,
}

impl<D> DialogNode<D> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(DialogInner {
                name: name.into(),
                accept: Listeners::new(),
                reject: Listeners::new(),
            }),
        }
    }

    /// The descriptor this node was created from.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Emits a dialog event carrying an optional detail payload.
    ///
    /// Returns the number of listeners invoked.
    pub fn dispatch(&self, event: DialogEvent, detail: Option<D>) -> usize {
        self.listeners(event).emit(&detail)
    }

    #[must_use]
    pub fn listener_count(&self, event: DialogEvent) -> usize {
        self.listeners(event).len()
    }

    #[must_use]
    pub fn same_node(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn listeners(&self, event: DialogEvent) -> &Listeners<Option<D>> {
        match event {
            DialogEvent::Accept => &self.inner.accept,
            DialogEvent::Reject => &self.inner.reject,
        }
    }
}

impl<D> Clone for DialogNode<D> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<D: 'static> DialogElement for DialogNode<D> {
    type Detail = D;

    fn add_listener(&self, event: DialogEvent, listener: Listener<Option<D>>) -> ListenerId {
        self.listeners(event).add(listener)
    }

    fn remove_listener(&self, event: DialogEvent, id: ListenerId) -> bool {
        self.listeners(event).remove(id)
    }
}
