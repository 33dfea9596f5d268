// SPDX-License-Identifier: MPL-2.0
//! Yes/No confirm toasts as a settle-once future.
//!
//! A confirm toast is a regular toast whose body ends with
//! [`CONFIRM_MARKUP`]. [`bind`] attaches a one-shot subscription to the
//! two embedded controls: the first click wins, both listeners are
//! detached, the toast is force-cleared and the [`Confirmation`] settles.
//!
//! # Preconditions
//!
//! The toast must contain at least one of the two controls. Without them
//! nothing can ever settle the future; [`Confirmation::is_bound`] reports
//! this and a warning is logged, but the future simply stays pending.
//! The same holds when the engine discards the toast without a click.

use crate::application::port::{ClearOptions, ToastControl, ToastHandle, Toaster};
use crate::dom::ListenerId;
use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::{Rc, Weak};
use std::task::{Context, Poll};
use tokio::sync::oneshot;

/// Fragment appended to every confirm message body.
pub const CONFIRM_MARKUP: &str = concat!(
    r#"<br /><br /><button type="button" class="btn confirm-yes">Yes</button>"#,
    " ",
    r#"<button type="button" class="btn confirm-no">No</button>"#
);

/// Selector of the control that accepts.
pub const CONFIRM_YES_SELECTOR: &str = ".btn.confirm-yes";

/// Selector of the control that declines.
pub const CONFIRM_NO_SELECTOR: &str = ".btn.confirm-no";

/// Appends the Yes/No controls to a message body.
///
/// The message is plain text and is escaped, so `&`, `<` and quotes in it
/// cannot break the markup around the controls.
#[must_use]
pub fn with_confirm_markup(message: &str) -> String {
    let message = quick_xml::escape::escape(message);
    let mut body = String::with_capacity(message.len() + CONFIRM_MARKUP.len());
    body.push_str(&message);
    body.push_str(CONFIRM_MARKUP);
    body
}

/// The user answered "No".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Declined;

impl fmt::Display for Declined {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "confirmation declined")
    }
}

impl std::error::Error for Declined {}

type Verdict = Result<(), Declined>;

/// Listener registrations to undo once the confirmation settles.
type Subscriptions<C> = RefCell<Vec<(C, ListenerId)>>;

/// Pending answer of a confirm toast.
///
/// Resolves to `Ok(())` when "Yes" is clicked and `Err(Declined)` when
/// "No" is clicked. Settles at most once.
#[must_use = "a confirmation does nothing unless awaited"]
pub struct Confirmation {
    receiver: oneshot::Receiver<Verdict>,
    bound: bool,
    orphaned: bool,
    // Listeners only hold a weak reference; once this is dropped an answer
    // still clears the toast but leaves the other listener attached.
    _subscriptions: Rc<dyn Any>,
}

impl Confirmation {
    /// Whether at least one Yes/No control was found on the toast.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Whether the toast went away unanswered, as observed by the last poll.
    /// An abandoned confirmation never settles.
    #[must_use]
    pub fn is_abandoned(&self) -> bool {
        self.orphaned
    }
}

impl fmt::Debug for Confirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Confirmation")
            .field("bound", &self.bound)
            .finish_non_exhaustive()
    }
}

impl Future for Confirmation {
    type Output = Verdict;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if self.orphaned {
            return Poll::Pending;
        }
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(verdict)) => Poll::Ready(verdict),
            // Toast dropped without an answer; nothing can settle us anymore.
            Poll::Ready(Err(_)) => {
                tracing::debug!("confirm toast discarded before it was answered");
                self.orphaned = true;
                Poll::Pending
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Turns a rendered confirm toast into a [`Confirmation`].
///
/// Listeners are attached before this returns, so a toast that is inert
/// until `render()` returns cannot be answered unobserved.
pub fn bind<T>(toaster: Rc<T>, handle: T::Handle) -> Confirmation
where
    T: Toaster + 'static,
{
    let (sender, receiver) = oneshot::channel();
    let slot = Rc::new(RefCell::new(Some(sender)));
    let subscriptions: Rc<Subscriptions<<T::Handle as ToastHandle>::Control>> =
        Rc::new(RefCell::new(Vec::new()));

    let answers = [
        (CONFIRM_YES_SELECTOR, Ok(())),
        (CONFIRM_NO_SELECTOR, Err(Declined)),
    ];

    for (selector, verdict) in answers {
        let Some(control) = handle.find(selector) else {
            continue;
        };

        let slot = Rc::clone(&slot);
        let toaster = Rc::clone(&toaster);
        let handle = handle.clone();
        let registrations = Rc::downgrade(&subscriptions);

        let id = control.on_click(Rc::new(move |_: &()| {
            let Some(sender) = slot.borrow_mut().take() else {
                return;
            };
            unsubscribe(&registrations);
            toaster.clear(&handle, ClearOptions::forced());
            tracing::debug!(accepted = verdict.is_ok(), "confirm toast answered");
            // The caller may have dropped the confirmation; the toast is gone either way.
            let _ = sender.send(verdict);
        }));
        subscriptions.borrow_mut().push((control, id));
    }

    let bound = !subscriptions.borrow().is_empty();
    if !bound {
        tracing::warn!("confirm toast has no Yes/No controls, its answer will never arrive");
    }

    Confirmation {
        receiver,
        bound,
        orphaned: false,
        _subscriptions: subscriptions,
    }
}

fn unsubscribe<C: ToastControl>(registrations: &Weak<Subscriptions<C>>) {
    let Some(registrations) = registrations.upgrade() else {
        return;
    };
    let drained: Vec<(C, ListenerId)> = registrations.borrow_mut().drain(..).collect();
    for (control, id) in drained {
        control.remove_click_listener(id);
    }
}
