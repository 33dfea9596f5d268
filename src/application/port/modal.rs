// SPDX-License-Identifier: MPL-2.0
//! Modal dialog port definitions.
//!
//! - [`ElementFactory`] asynchronously produces dialog elements
//! - [`DialogElement`] emits `dialog-accept` / `dialog-reject`
//! - [`AppContainer`] owns the shared modal backdrop

use crate::dom::{Listener, ListenerId};
use crate::error::FactoryError;
use futures_util::future::LocalBoxFuture;
use std::fmt;

/// The two completion events a dialog element can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogEvent {
    Accept,
    Reject,
}

impl DialogEvent {
    /// Event name as emitted by dialog elements.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DialogEvent::Accept => "dialog-accept",
            DialogEvent::Reject => "dialog-reject",
        }
    }
}

impl fmt::Display for DialogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An element that can be hosted by the modal backdrop.
pub trait DialogElement: Clone + 'static {
    /// Caller-defined payload carried by completion events.
    type Detail: 'static;

    fn add_listener(&self, event: DialogEvent, listener: Listener<Option<Self::Detail>>)
        -> ListenerId;

    fn remove_listener(&self, event: DialogEvent, id: ListenerId) -> bool;
}

/// Host of the single shared modal backdrop.
pub trait AppContainer {
    type Element;

    /// Installs (or with `None`, releases) the backdrop contents.
    fn set_modal_backdrop_contents(&self, element: Option<Self::Element>);

    fn show_modal_backdrop(&self);

    fn hide_modal_backdrop(&self);
}

/// Asynchronous producer of dialog elements.
pub trait ElementFactory {
    type Element: DialogElement;

    /// Creates the element described by `descriptor`.
    ///
    /// # Errors
    ///
    /// The returned future resolves to a [`FactoryError`] when the
    /// descriptor is unknown or the element cannot be built.
    fn create_element(
        &self,
        descriptor: &str,
    ) -> LocalBoxFuture<'static, Result<Self::Element, FactoryError>>;
}
