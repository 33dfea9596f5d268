// SPDX-License-Identifier: MPL-2.0
use futures_util::future::LocalBoxFuture;
use futures_util::FutureExt;
use iced_notify::application::port::{AppContainer, DialogEvent, ElementFactory};
use iced_notify::dom::DialogNode;
use iced_notify::error::FactoryError;
use iced_notify::notify::{CloseDirective, ModalController, ModalOptions, ModalState, OpenOutcome};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use tokio::sync::oneshot;

type Form = DialogNode<String>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    SetContents(Option<String>),
    Show,
    Hide,
}

#[derive(Debug, Clone, Default)]
struct RecordingContainer {
    calls: Rc<RefCell<Vec<Call>>>,
}

impl RecordingContainer {
    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn ever_shown(&self) -> bool {
        self.calls.borrow().iter().any(|call| {
            matches!(call, Call::Show) || matches!(call, Call::SetContents(Some(_)))
        })
    }
}

impl AppContainer for RecordingContainer {
    type Element = Form;

    fn set_modal_backdrop_contents(&self, element: Option<Form>) {
        self.calls
            .borrow_mut()
            .push(Call::SetContents(element.map(|e| e.name().to_string())));
    }

    fn show_modal_backdrop(&self) {
        self.calls.borrow_mut().push(Call::Show);
    }

    fn hide_modal_backdrop(&self) {
        self.calls.borrow_mut().push(Call::Hide);
    }
}

type Reply = Result<Form, FactoryError>;

/// Factory whose elements arrive when the test says so.
#[derive(Debug, Clone, Default)]
struct ControlledFactory {
    waiting: Rc<RefCell<VecDeque<(String, oneshot::Sender<Reply>)>>>,
}

impl ControlledFactory {
    /// Completes the oldest outstanding request with a fresh element.
    fn resolve(&self) -> Form {
        let (name, sender) = self
            .waiting
            .borrow_mut()
            .pop_front()
            .expect("a pending create_element call");
        let form = Form::new(name);
        sender.send(Ok(form.clone())).expect("open future alive");
        form
    }

    fn fail(&self, message: &str) {
        let (_, sender) = self
            .waiting
            .borrow_mut()
            .pop_front()
            .expect("a pending create_element call");
        sender
            .send(Err(FactoryError::new(message)))
            .expect("open future alive");
    }

    fn pending(&self) -> usize {
        self.waiting.borrow().len()
    }
}

impl ElementFactory for ControlledFactory {
    type Element = Form;

    fn create_element(&self, element_name: &str) -> LocalBoxFuture<'static, Reply> {
        let (sender, receiver) = oneshot::channel();
        self.waiting
            .borrow_mut()
            .push_back((element_name.to_string(), sender));
        async move {
            receiver
                .await
                .unwrap_or_else(|_| Err(FactoryError::new("factory went away")))
        }
        .boxed_local()
    }
}

struct Harness {
    container: RecordingContainer,
    factory: ControlledFactory,
    modals: ModalController<RecordingContainer, ControlledFactory>,
}

fn harness() -> Harness {
    let container = RecordingContainer::default();
    let factory = ControlledFactory::default();
    let modals = ModalController::new(container.clone(), factory.clone());
    Harness {
        container,
        factory,
        modals,
    }
}

impl Harness {
    /// Opens a dialog and lets the factory answer right away.
    fn open(&self, options: ModalOptions<Form>) -> Form {
        let opening = self.modals.show_modal_dialog(options);
        let form = self.factory.resolve();
        assert_eq!(opening.now_or_never(), Some(OpenOutcome::Mounted));
        form
    }
}

#[test]
fn open_mounts_and_shows_the_element() {
    let h = harness();
    let form = h.open(ModalOptions::new("edit-form"));

    assert_eq!(h.modals.state(), ModalState::Open);
    assert_eq!(
        h.container.calls(),
        vec![Call::SetContents(Some("edit-form".into())), Call::Show]
    );
    assert!(h.modals.current_element().is_some_and(|e| e.same_node(&form)));
    assert_eq!(form.listener_count(DialogEvent::Accept), 1);
    assert_eq!(form.listener_count(DialogEvent::Reject), 1);
}

#[test]
fn controller_is_opening_until_the_factory_answers() {
    let h = harness();
    let opening = h.modals.show_modal_dialog(ModalOptions::new("edit-form"));

    assert_eq!(h.modals.state(), ModalState::Opening);
    assert_eq!(h.factory.pending(), 1);
    assert!(h.container.calls().is_empty());

    h.factory.resolve();
    assert_eq!(opening.now_or_never(), Some(OpenOutcome::Mounted));
    assert_eq!(h.modals.state(), ModalState::Open);
}

#[test]
fn accept_without_handler_closes() {
    let h = harness();
    let form = h.open(ModalOptions::new("edit-form"));

    form.dispatch(DialogEvent::Accept, None);

    assert_eq!(h.modals.state(), ModalState::Closed);
    assert!(h.modals.current_element().is_none());
    assert_eq!(
        h.container.calls()[2..],
        [Call::Hide, Call::SetContents(None)]
    );
    assert_eq!(form.listener_count(DialogEvent::Accept), 0);
    assert_eq!(form.listener_count(DialogEvent::Reject), 0);
}

#[test]
fn reject_without_handler_closes() {
    let h = harness();
    let form = h.open(ModalOptions::new("edit-form"));

    form.dispatch(DialogEvent::Reject, None);

    assert_eq!(h.modals.state(), ModalState::Closed);
}

#[test]
fn accept_returning_false_keeps_the_dialog_open() {
    let h = harness();
    let calls = Rc::new(Cell::new(0));
    let form = h.open(ModalOptions::new("edit-form").on_accept({
        let calls = Rc::clone(&calls);
        move |_, _| {
            calls.set(calls.get() + 1);
            false
        }
    }));

    form.dispatch(DialogEvent::Accept, None);
    form.dispatch(DialogEvent::Accept, None);

    assert_eq!(calls.get(), 2);
    assert_eq!(h.modals.state(), ModalState::Open);
    assert!(!h.container.calls().contains(&Call::Hide));
}

#[test]
fn accept_returning_unit_or_true_closes() {
    let h = harness();
    let form = h.open(ModalOptions::new("edit-form").on_accept(|_, _| ()));
    form.dispatch(DialogEvent::Accept, None);
    assert_eq!(h.modals.state(), ModalState::Closed);

    let form = h.open(ModalOptions::new("edit-form").on_accept(|_, _| true));
    form.dispatch(DialogEvent::Accept, None);
    assert_eq!(h.modals.state(), ModalState::Closed);
}

#[test]
fn reject_handler_receives_element_and_detail() {
    let h = harness();
    let seen = Rc::new(RefCell::new(None));
    let form = h.open(ModalOptions::new("edit-form").on_reject({
        let seen = Rc::clone(&seen);
        move |element: &Form, detail: Option<&String>| {
            *seen.borrow_mut() = Some((element.name().to_string(), detail.cloned()));
            CloseDirective::UseDefault
        }
    }));

    form.dispatch(DialogEvent::Reject, Some("escape".into()));

    assert_eq!(
        *seen.borrow(),
        Some(("edit-form".to_string(), Some("escape".to_string())))
    );
    assert_eq!(h.modals.state(), ModalState::Closed);
}

#[test]
fn prevent_close_flags_override_handlers() {
    let h = harness();
    let accepted = Rc::new(Cell::new(false));
    let form = h.open(
        ModalOptions::new("edit-form")
            .on_accept({
                let accepted = Rc::clone(&accepted);
                move |_, _| {
                    accepted.set(true);
                    true
                }
            })
            .prevent_close_on_accept(true)
            .prevent_close_on_reject(true),
    );

    form.dispatch(DialogEvent::Accept, None);
    form.dispatch(DialogEvent::Reject, None);

    assert!(accepted.get());
    assert_eq!(h.modals.state(), ModalState::Open);

    h.modals.hide_modal_dialog();
    assert_eq!(h.modals.state(), ModalState::Closed);
}

#[test]
fn hide_before_the_factory_answers_never_shows_the_element() {
    let h = harness();
    let opening = h.modals.show_modal_dialog(ModalOptions::new("edit-form"));

    h.modals.hide_modal_dialog();
    assert_eq!(h.modals.state(), ModalState::Closed);

    let form = h.factory.resolve();
    assert_eq!(opening.now_or_never(), Some(OpenOutcome::Superseded));
    assert_eq!(h.modals.state(), ModalState::Closed);
    assert!(!h.container.ever_shown());
    assert_eq!(form.listener_count(DialogEvent::Accept), 0);
}

#[test]
fn factory_failure_leaves_the_backdrop_untouched() {
    let h = harness();
    let opening = h.modals.show_modal_dialog(ModalOptions::new("edit-form"));

    h.factory.fail("template missing");

    assert_eq!(opening.now_or_never(), Some(OpenOutcome::Failed));
    assert_eq!(h.modals.state(), ModalState::Closed);
    assert!(h.container.calls().is_empty());
}

#[test]
fn init_runs_before_the_backdrop_is_shown() {
    let h = harness();
    let seen_calls = Rc::new(RefCell::new(None));
    let form = h.open(ModalOptions::new("edit-form").init({
        let seen_calls = Rc::clone(&seen_calls);
        let container = h.container.clone();
        move |element: &Form| {
            *seen_calls.borrow_mut() = Some((element.name().to_string(), container.calls()));
        }
    }));

    assert_eq!(
        *seen_calls.borrow(),
        Some(("edit-form".to_string(), Vec::new()))
    );
    assert_eq!(h.modals.state(), ModalState::Open);
    drop(form);
}

#[test]
fn opening_again_replaces_the_current_dialog() {
    let h = harness();
    let first = h.open(ModalOptions::new("first"));

    let opening = h.modals.show_modal_dialog(ModalOptions::new("second"));
    assert_eq!(h.modals.state(), ModalState::Opening);
    assert!(h.modals.current_element().is_none());
    assert_eq!(first.listener_count(DialogEvent::Accept), 0);

    let second = h.factory.resolve();
    assert_eq!(opening.now_or_never(), Some(OpenOutcome::Mounted));
    assert!(h.modals.current_element().is_some_and(|e| e.same_node(&second)));

    // Events on the replaced element no longer reach the controller.
    assert_eq!(first.dispatch(DialogEvent::Accept, None), 0);
    assert_eq!(h.modals.state(), ModalState::Open);
}

#[test]
fn stale_open_resolving_late_is_discarded() {
    let h = harness();
    let stale = h.modals.show_modal_dialog(ModalOptions::new("first"));
    let fresh = h.modals.show_modal_dialog(ModalOptions::new("second"));

    h.factory.resolve();
    let second = h.factory.resolve();

    assert_eq!(stale.now_or_never(), Some(OpenOutcome::Superseded));
    assert_eq!(fresh.now_or_never(), Some(OpenOutcome::Mounted));
    assert!(h.modals.current_element().is_some_and(|e| e.same_node(&second)));
}

#[test]
fn dropping_the_open_future_returns_to_closed() {
    let h = harness();
    let opening = h.modals.show_modal_dialog(ModalOptions::new("edit-form"));
    assert_eq!(h.modals.state(), ModalState::Opening);

    drop(opening);

    assert_eq!(h.modals.state(), ModalState::Closed);
    assert!(!h.container.ever_shown());
}

#[test]
fn hide_is_idempotent() {
    let h = harness();
    h.modals.hide_modal_dialog();
    h.modals.hide_modal_dialog();
    assert_eq!(h.modals.state(), ModalState::Closed);

    let form = h.open(ModalOptions::new("edit-form"));
    h.modals.hide_modal_dialog();
    h.modals.hide_modal_dialog();
    assert_eq!(h.modals.state(), ModalState::Closed);
    assert_eq!(form.listener_count(DialogEvent::Reject), 0);
}

#[test]
fn handler_may_open_the_next_dialog() {
    let h = harness();
    let modals = h.modals.clone();
    let follow_up = Rc::new(RefCell::new(None));
    let form = h.open(ModalOptions::new("first").on_accept({
        let follow_up = Rc::clone(&follow_up);
        move |_, _| {
            *follow_up.borrow_mut() = Some(modals.show_modal_dialog(ModalOptions::new("second")));
        }
    }));

    form.dispatch(DialogEvent::Accept, None);

    // The handler's own open wins over the default close.
    assert_eq!(h.modals.state(), ModalState::Opening);
    let second = h.factory.resolve();
    let opening = follow_up.borrow_mut().take().expect("handler ran");
    assert_eq!(opening.now_or_never(), Some(OpenOutcome::Mounted));
    assert!(h.modals.current_element().is_some_and(|e| e.same_node(&second)));
}

#[tokio::test]
async fn edit_form_scenario() {
    let h = harness();
    let saved = Rc::new(RefCell::new(Vec::new()));

    let options = ModalOptions::new("edit-form")
        .init(|form: &Form| assert_eq!(form.name(), "edit-form"))
        .on_accept({
            let saved = Rc::clone(&saved);
            move |_, title: Option<&String>| match title {
                Some(title) if !title.is_empty() => {
                    saved.borrow_mut().push(title.clone());
                    CloseDirective::Close
                }
                _ => CloseDirective::KeepOpen,
            }
        })
        .on_reject(|_, _| ());

    let opening = h.modals.show_modal_dialog(options);
    let form = h.factory.resolve();
    assert_eq!(opening.await, OpenOutcome::Mounted);

    form.dispatch(DialogEvent::Accept, Some(String::new()));
    assert_eq!(h.modals.state(), ModalState::Open);

    form.dispatch(DialogEvent::Accept, Some("Quarterly report".into()));
    assert_eq!(h.modals.state(), ModalState::Closed);
    assert_eq!(*saved.borrow(), vec!["Quarterly report".to_string()]);
    assert_eq!(
        h.container.calls(),
        vec![
            Call::SetContents(Some("edit-form".into())),
            Call::Show,
            Call::Hide,
            Call::SetContents(None),
        ]
    );
}
