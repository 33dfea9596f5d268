// SPDX-License-Identifier: MPL-2.0
//! Modal dialog lifecycle on top of the shared backdrop.
//!
//! ```text
//! Closed --show_modal_dialog--> Opening --factory ok--> Open
//!    ^                             |                      |
//!    +------ factory error --------+                      |
//!    +------ hide_modal_dialog / accept / reject ---------+
//! ```
//!
//! Only one dialog exists at a time. Opening while another dialog is
//! opening or open closes the current one first. Every close bumps a
//! generation counter, so a factory that resolves after its dialog was
//! closed or replaced never reaches the backdrop.

use crate::application::port::{AppContainer, DialogElement, DialogEvent, ElementFactory};
use crate::dom::ListenerId;
use crate::error::FactoryError;
use std::cell::RefCell;
use std::fmt;
use std::future::Future;
use std::rc::{Rc, Weak};

// =============================================================================
// Options
// =============================================================================

/// What a dialog handler wants done with the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CloseDirective {
    Close,
    KeepOpen,
    /// No opinion; the dialog closes.
    #[default]
    UseDefault,
}

impl CloseDirective {
    #[must_use]
    pub fn should_close(self) -> bool {
        !matches!(self, CloseDirective::KeepOpen)
    }
}

impl From<bool> for CloseDirective {
    fn from(close: bool) -> Self {
        if close {
            CloseDirective::Close
        } else {
            CloseDirective::KeepOpen
        }
    }
}

impl From<()> for CloseDirective {
    fn from((): ()) -> Self {
        CloseDirective::UseDefault
    }
}

impl From<Option<bool>> for CloseDirective {
    fn from(close: Option<bool>) -> Self {
        close.map_or(CloseDirective::UseDefault, CloseDirective::from)
    }
}

type InitFn<E> = Box<dyn FnOnce(&E)>;
type DialogHandler<E> = Rc<dyn Fn(&E, Option<&<E as DialogElement>::Detail>) -> CloseDirective>;

/// Configuration of one `show_modal_dialog` call.
pub struct ModalOptions<E: DialogElement> {
    element_name: String,
    init: Option<InitFn<E>>,
    on_accept: Option<DialogHandler<E>>,
    on_reject: Option<DialogHandler<E>>,
    prevent_close_on_accept: bool,
    prevent_close_on_reject: bool,
}

impl<E: DialogElement> ModalOptions<E> {
    /// Options for the element the factory knows as `element_name`.
    pub fn new(element_name: impl Into<String>) -> Self {
        Self {
            element_name: element_name.into(),
            init: None,
            on_accept: None,
            on_reject: None,
            prevent_close_on_accept: false,
            prevent_close_on_reject: false,
        }
    }

    /// Setup hook run on the new element before it is shown.
    #[must_use]
    pub fn init(mut self, init: impl FnOnce(&E) + 'static) -> Self {
        self.init = Some(Box::new(init));
        self
    }

    /// Handler for `dialog-accept`. Its return value decides whether the
    /// dialog closes; return `()` for the default (close).
    #[must_use]
    pub fn on_accept<R>(mut self, handler: impl Fn(&E, Option<&E::Detail>) -> R + 'static) -> Self
    where
        R: Into<CloseDirective>,
    {
        self.on_accept = Some(Rc::new(
            move |element: &E, detail: Option<&E::Detail>| -> CloseDirective {
                handler(element, detail).into()
            },
        ));
        self
    }

    /// Handler for `dialog-reject`, same contract as [`Self::on_accept`].
    #[must_use]
    pub fn on_reject<R>(mut self, handler: impl Fn(&E, Option<&E::Detail>) -> R + 'static) -> Self
    where
        R: Into<CloseDirective>,
    {
        self.on_reject = Some(Rc::new(
            move |element: &E, detail: Option<&E::Detail>| -> CloseDirective {
                handler(element, detail).into()
            },
        ));
        self
    }

    /// Keeps the dialog open on accept whatever the handler returns.
    #[must_use]
    pub fn prevent_close_on_accept(mut self, prevent: bool) -> Self {
        self.prevent_close_on_accept = prevent;
        self
    }

    /// Keeps the dialog open on reject whatever the handler returns.
    #[must_use]
    pub fn prevent_close_on_reject(mut self, prevent: bool) -> Self {
        self.prevent_close_on_reject = prevent;
        self
    }

    #[must_use]
    pub fn element_name(&self) -> &str {
        &self.element_name
    }

    fn reaction(&self, event: DialogEvent) -> Reaction<E> {
        match event {
            DialogEvent::Accept => Reaction {
                handler: self.on_accept.clone(),
                prevent_close: self.prevent_close_on_accept,
            },
            DialogEvent::Reject => Reaction {
                handler: self.on_reject.clone(),
                prevent_close: self.prevent_close_on_reject,
            },
        }
    }
}

impl<E: DialogElement> fmt::Debug for ModalOptions<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalOptions")
            .field("element_name", &self.element_name)
            .field("init", &self.init.is_some())
            .field("on_accept", &self.on_accept.is_some())
            .field("on_reject", &self.on_reject.is_some())
            .field("prevent_close_on_accept", &self.prevent_close_on_accept)
            .field("prevent_close_on_reject", &self.prevent_close_on_reject)
            .finish()
    }
}

/// How the controller answers one dialog event.
struct Reaction<E: DialogElement> {
    handler: Option<DialogHandler<E>>,
    prevent_close: bool,
}

// =============================================================================
// State
// =============================================================================

/// Lifecycle state of the modal dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    /// Waiting for the element factory.
    Opening,
    Open,
}

/// Result of driving a `show_modal_dialog` future to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// The element is on the backdrop and listening for events.
    Mounted,
    /// The dialog was closed or replaced before the factory resolved.
    Superseded,
    /// The factory failed; the error was logged.
    Failed,
}

struct Mounted<E> {
    element: E,
    accept: ListenerId,
    reject: ListenerId,
}

impl<E: DialogElement> Mounted<E> {
    fn detach(&self) {
        self.element.remove_listener(DialogEvent::Accept, self.accept);
        self.element.remove_listener(DialogEvent::Reject, self.reject);
    }
}

struct Session<E> {
    state: ModalState,
    generation: u64,
    mounted: Option<Mounted<E>>,
}

impl<E> Default for Session<E> {
    fn default() -> Self {
        Self {
            state: ModalState::Closed,
            generation: 0,
            mounted: None,
        }
    }
}

// =============================================================================
// Controller
// =============================================================================

struct Inner<C, F: ElementFactory> {
    container: C,
    factory: F,
    session: RefCell<Session<F::Element>>,
}

/// Opens and closes the single modal dialog.
///
/// Cloning yields another handle to the same controller.
pub struct ModalController<C, F: ElementFactory> {
    inner: Rc<Inner<C, F>>,
}

impl<C, F: ElementFactory> Clone for ModalController<C, F> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<C, F: ElementFactory> fmt::Debug for ModalController<C, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = self.inner.session.borrow();
        f.debug_struct("ModalController")
            .field("state", &session.state)
            .field("generation", &session.generation)
            .finish_non_exhaustive()
    }
}

impl<C, F> ModalController<C, F>
where
    C: AppContainer<Element = F::Element> + 'static,
    F: ElementFactory + 'static,
{
    pub fn new(container: C, factory: F) -> Self {
        Self {
            inner: Rc::new(Inner {
                container,
                factory,
                session: RefCell::new(Session::default()),
            }),
        }
    }

    #[must_use]
    pub fn state(&self) -> ModalState {
        self.inner.session.borrow().state
    }

    #[must_use]
    pub fn container(&self) -> &C {
        &self.inner.container
    }

    /// The element currently on the backdrop, if any.
    #[must_use]
    pub fn current_element(&self) -> Option<F::Element> {
        self.inner
            .session
            .borrow()
            .mounted
            .as_ref()
            .map(|mounted| mounted.element.clone())
    }

    /// Starts opening a dialog.
    ///
    /// The factory is called right away and the controller is `Opening`
    /// when this returns. The returned future finishes the open once the
    /// element exists; the caller drives it (await it or spawn it on a
    /// local executor). Dropping it before it completes abandons the open.
    pub fn show_modal_dialog(
        &self,
        options: ModalOptions<F::Element>,
    ) -> impl Future<Output = OpenOutcome> + 'static {
        let generation = self.inner.begin_opening();
        tracing::debug!(element = %options.element_name, generation, "opening modal dialog");
        let pending = self.inner.factory.create_element(&options.element_name);
        let guard = OpeningGuard {
            inner: Rc::downgrade(&self.inner),
            generation,
            armed: true,
        };
        let inner = Rc::clone(&self.inner);

        async move {
            // Bind the whole guard so the block owns it, not just a field.
            let guard = guard;
            let created = pending.await;
            guard.disarm();
            inner.finish_opening(generation, options, created)
        }
    }

    /// Hides the backdrop and releases its contents. Idempotent.
    pub fn hide_modal_dialog(&self) {
        self.inner.close();
    }
}

impl<C, F> Inner<C, F>
where
    C: AppContainer<Element = F::Element> + 'static,
    F: ElementFactory + 'static,
{
    fn begin_opening(&self) -> u64 {
        if self.session.borrow().state != ModalState::Closed {
            tracing::warn!("modal dialog replaced before it was closed");
            self.close();
        }
        let mut session = self.session.borrow_mut();
        session.generation += 1;
        session.state = ModalState::Opening;
        session.generation
    }

    fn is_current(&self, generation: u64) -> bool {
        let session = self.session.borrow();
        session.generation == generation && session.state == ModalState::Opening
    }

    fn finish_opening(
        self: &Rc<Self>,
        generation: u64,
        options: ModalOptions<F::Element>,
        created: Result<F::Element, FactoryError>,
    ) -> OpenOutcome {
        let element = match created {
            Ok(element) => element,
            Err(error) => {
                tracing::error!(element = %options.element_name, %error, "failed to create modal dialog");
                if self.is_current(generation) {
                    self.session.borrow_mut().state = ModalState::Closed;
                }
                return OpenOutcome::Failed;
            }
        };

        if !self.is_current(generation) {
            tracing::debug!(element = %options.element_name, "discarding superseded modal dialog");
            return OpenOutcome::Superseded;
        }

        let accept_reaction = options.reaction(DialogEvent::Accept);
        let reject_reaction = options.reaction(DialogEvent::Reject);

        if let Some(init) = options.init {
            init(&element);
            // The hook may have closed or replaced the dialog.
            if !self.is_current(generation) {
                return OpenOutcome::Superseded;
            }
        }

        self.container
            .set_modal_backdrop_contents(Some(element.clone()));
        self.container.show_modal_backdrop();

        let accept = self.listen(&element, generation, DialogEvent::Accept, accept_reaction);
        let reject = self.listen(&element, generation, DialogEvent::Reject, reject_reaction);

        let mut session = self.session.borrow_mut();
        session.state = ModalState::Open;
        session.mounted = Some(Mounted {
            element,
            accept,
            reject,
        });
        OpenOutcome::Mounted
    }

    fn listen(
        self: &Rc<Self>,
        element: &F::Element,
        generation: u64,
        event: DialogEvent,
        reaction: Reaction<F::Element>,
    ) -> ListenerId {
        let controller: Weak<Self> = Rc::downgrade(self);
        element.add_listener(
            event,
            Rc::new(move |detail: &Option<<F::Element as DialogElement>::Detail>| {
                if let Some(controller) = controller.upgrade() {
                    controller.react(generation, event, &reaction, detail.as_ref());
                }
            }),
        )
    }

    fn react(
        &self,
        generation: u64,
        event: DialogEvent,
        reaction: &Reaction<F::Element>,
        detail: Option<&<F::Element as DialogElement>::Detail>,
    ) {
        let element = {
            let session = self.session.borrow();
            match &session.mounted {
                Some(mounted) if session.generation == generation => mounted.element.clone(),
                _ => return,
            }
        };

        // No borrow is held here: handlers may call back into the controller.
        let directive = reaction
            .handler
            .as_ref()
            .map_or(CloseDirective::UseDefault, |handler| handler(&element, detail));

        tracing::debug!(%event, ?directive, "modal dialog event");
        // A handler that already closed or replaced the dialog wins.
        let still_mounted = self.session.borrow().generation == generation;
        if still_mounted && directive.should_close() && !reaction.prevent_close {
            self.close();
        }
    }

    fn close(&self) {
        let mounted = {
            let mut session = self.session.borrow_mut();
            session.generation += 1;
            session.state = ModalState::Closed;
            session.mounted.take()
        };

        self.container.hide_modal_backdrop();
        self.container.set_modal_backdrop_contents(None);

        if let Some(mounted) = mounted {
            mounted.detach();
        }
    }
}

/// Returns an abandoned open to `Closed` when its future is dropped early.
struct OpeningGuard<C, F: ElementFactory> {
    inner: Weak<Inner<C, F>>,
    generation: u64,
    armed: bool,
}

impl<C, F: ElementFactory> OpeningGuard<C, F> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<C, F: ElementFactory> Drop for OpeningGuard<C, F> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let Some(inner) = self.inner.upgrade() else {
            return;
        };
        let mut session = inner.session.borrow_mut();
        if session.generation == self.generation && session.state == ModalState::Opening {
            session.state = ModalState::Closed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::DialogNode;
    use crate::ui::backdrop::Backdrop;
    use futures_util::future::{self, LocalBoxFuture};
    use futures_util::FutureExt;

    #[derive(Debug, Clone, Copy)]
    struct ReadyFactory;

    impl ElementFactory for ReadyFactory {
        type Element = DialogNode<()>;

        fn create_element(
            &self,
            descriptor: &str,
        ) -> LocalBoxFuture<'static, Result<DialogNode<()>, FactoryError>> {
            future::ready(Ok(DialogNode::new(descriptor))).boxed_local()
        }
    }

    #[test]
    fn open_future_keeps_the_controller_opening_until_polled() {
        let modals = ModalController::new(Backdrop::new(), ReadyFactory);
        let opening = modals.show_modal_dialog(ModalOptions::new("settings"));

        assert_eq!(modals.state(), ModalState::Opening);
        assert_eq!(opening.now_or_never(), Some(OpenOutcome::Mounted));
        assert_eq!(modals.state(), ModalState::Open);
        assert!(modals.container().is_visible());
    }

    #[test]
    fn use_default_closes() {
        assert!(CloseDirective::UseDefault.should_close());
        assert!(CloseDirective::Close.should_close());
        assert!(!CloseDirective::KeepOpen.should_close());
    }

    #[test]
    fn handler_return_values_map_to_directives() {
        assert_eq!(CloseDirective::from(()), CloseDirective::UseDefault);
        assert_eq!(CloseDirective::from(false), CloseDirective::KeepOpen);
        assert_eq!(CloseDirective::from(true), CloseDirective::Close);
        assert_eq!(CloseDirective::from(None), CloseDirective::UseDefault);
        assert_eq!(CloseDirective::from(Some(false)), CloseDirective::KeepOpen);
    }
}
