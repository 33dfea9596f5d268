// SPDX-License-Identifier: MPL-2.0
//! Demo application wiring the notification context into an Iced program.
//!
//! The app renders one button per severity for plain and confirm toasts,
//! and opens an editor dialog through the modal controller. Dialog
//! elements come from [`DemoFactory`], which resolves synchronously.

mod message;

pub use message::{Flags, Message};

use crate::application::port::{DialogEvent, ElementFactory, Severity};
use crate::config;
use crate::dom::DialogNode;
use crate::error::FactoryError;
use crate::notify::{CloseDirective, Confirmation, ModalOptions, NotifyContext, OpenOutcome};
use crate::ui::backdrop::Backdrop;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::notifications::ToastEngine;
use futures_util::future::{self, LocalBoxFuture};
use futures_util::FutureExt;
use iced::widget::{button, column, row, text, text_input, Column, Row, Stack};
use iced::{window, Element, Length, Subscription, Task};
use std::fmt;
use std::path::PathBuf;
use std::rc::Rc;

/// Descriptor of the editor dialog.
pub const EDITOR_DIALOG: &str = "edit-form";

pub const WINDOW_DEFAULT_HEIGHT: u32 = 520;
pub const WINDOW_DEFAULT_WIDTH: u32 = 760;

/// Dialog element used by the demo.
pub type DemoDialog = DialogNode<String>;

type Context = NotifyContext<ToastEngine, Backdrop<DemoDialog>, DemoFactory>;

/// Creates dialog elements by descriptor.
#[derive(Debug, Default, Clone, Copy)]
pub struct DemoFactory;

impl ElementFactory for DemoFactory {
    type Element = DemoDialog;

    fn create_element(
        &self,
        element_name: &str,
    ) -> LocalBoxFuture<'static, Result<DemoDialog, FactoryError>> {
        let result = match element_name {
            EDITOR_DIALOG => Ok(DialogNode::new(element_name)),
            other => Err(FactoryError::new(format!("no dialog named `{other}`"))),
        };
        future::ready(result).boxed_local()
    }
}

struct PendingConfirm {
    severity: Severity,
    confirmation: Confirmation,
}

/// Root Iced application state.
pub struct App {
    ctx: Context,
    engine: Rc<ToastEngine>,
    pending: Vec<PendingConfirm>,
    editor_name: String,
    status: String,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("pending_confirms", &self.pending.len())
            .field("modal", &self.ctx.modals().state())
            .finish_non_exhaustive()
    }
}

/// Builds the window settings
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy Fn trait requirement
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Initializes application state from the config directory in `flags`.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) =
            config::load_with_override(flags.config_dir.map(PathBuf::from));
        let engine = Rc::new(ToastEngine::from_config(&config.stack));
        let ctx = NotifyContext::new(&config, Rc::clone(&engine), Backdrop::new(), DemoFactory);

        if let Some(warning) = config_warning {
            ctx.notifications()
                .show_warning(&warning, Some("Configuration"), None);
        }

        let app = Self {
            ctx,
            engine,
            pending: Vec::new(),
            editor_name: String::new(),
            status: String::from("Ready"),
        };
        (app, Task::none())
    }

    fn title(&self) -> String {
        String::from("Iced Notify")
    }

    fn subscription(&self) -> Subscription<Message> {
        self.engine.subscription().map(Message::Toast)
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Toast(toast_message) => {
                self.engine.update(toast_message);
                self.settle_confirmations();
            }
            Message::Show(severity) => {
                self.ctx.notifications().show(
                    severity,
                    &format!("This is a {severity} toast."),
                    Some(title_for(severity)),
                    None,
                );
            }
            Message::Confirm(severity) => {
                let confirmation = self.ctx.notifications().confirm(
                    severity,
                    "Apply this change?",
                    Some(title_for(severity)),
                    None,
                );
                if confirmation.is_bound() {
                    self.pending.push(PendingConfirm {
                        severity,
                        confirmation,
                    });
                }
            }
            Message::OpenEditor => {
                self.editor_name.clear();
                self.open_dialog(self.editor_options());
            }
            Message::OpenMissing => {
                self.open_dialog(ModalOptions::new("missing-form"));
            }
            Message::EditorNameChanged(name) => {
                self.editor_name = name;
            }
            Message::EditorSave => {
                self.dispatch(DialogEvent::Accept, Some(self.editor_name.clone()));
            }
            Message::EditorCancel => {
                self.dispatch(DialogEvent::Reject, None);
            }
        }
        Task::none()
    }

    fn view(&self) -> Element<'_, Message> {
        let show_row = Row::with_children(Severity::ALL.iter().map(|severity| {
            button(text(format!("Show {severity}")))
                .on_press(Message::Show(*severity))
                .into()
        }))
        .spacing(spacing::XS);

        let confirm_row = Row::with_children(Severity::ALL.iter().map(|severity| {
            button(text(format!("Confirm {severity}")))
                .on_press(Message::Confirm(*severity))
                .into()
        }))
        .spacing(spacing::XS);

        let dialog_row = row![
            button("Open editor").on_press(Message::OpenEditor),
            button("Open missing dialog").on_press(Message::OpenMissing),
        ]
        .spacing(spacing::XS);

        let content = column![
            text("Notifications").size(typography::TITLE_SM),
            show_row,
            confirm_row,
            dialog_row,
            text(self.status.as_str()).size(typography::BODY),
        ]
        .spacing(spacing::MD)
        .padding(spacing::LG)
        .width(Length::Fill);

        let with_dialog = self
            .ctx
            .modals()
            .container()
            .view(content, |dialog| self.dialog_view(dialog));

        Stack::new()
            .push(with_dialog)
            .push(self.engine.view().map(Message::Toast))
            .into()
    }

    fn dialog_view(&self, dialog: &DemoDialog) -> Element<'_, Message> {
        Column::new()
            .spacing(spacing::SM)
            .push(text(format!("Edit {}", dialog.name())).size(typography::TITLE_SM))
            .push(
                text_input("Name", &self.editor_name)
                    .on_input(Message::EditorNameChanged)
                    .on_submit(Message::EditorSave),
            )
            .push(
                row![
                    button("Save").on_press(Message::EditorSave),
                    button("Cancel").on_press(Message::EditorCancel),
                ]
                .spacing(spacing::XS),
            )
            .into()
    }

    fn editor_options(&self) -> ModalOptions<DemoDialog> {
        let notifications = self.ctx.notifications().clone();
        ModalOptions::new(EDITOR_DIALOG)
            .init(|dialog: &DemoDialog| {
                tracing::debug!(name = dialog.name(), "editor dialog ready");
            })
            .on_accept(move |_, name: Option<&String>| match name {
                Some(name) if !name.trim().is_empty() => {
                    notifications.show_success(&format!("Saved \"{}\"", name.trim()), None, None);
                    CloseDirective::Close
                }
                _ => {
                    notifications.show_warning("A name is required.", Some("Editor"), None);
                    CloseDirective::KeepOpen
                }
            })
            .on_reject(|_, _| ())
    }

    fn open_dialog(&mut self, options: ModalOptions<DemoDialog>) {
        let element_name = options.element_name().to_string();
        match self.ctx.modals().show_modal_dialog(options).now_or_never() {
            Some(OpenOutcome::Mounted) => self.status = format!("Opened {element_name}"),
            Some(OpenOutcome::Failed) => {
                self.ctx.notifications().show_error(
                    &format!("Could not open {element_name}."),
                    Some("Dialog"),
                    None,
                );
            }
            Some(OpenOutcome::Superseded) | None => {}
        }
    }

    fn dispatch(&mut self, event: DialogEvent, detail: Option<String>) {
        let Some(dialog) = self.ctx.modals().current_element() else {
            return;
        };
        dialog.dispatch(event, detail);
        if self.ctx.modals().current_element().is_none() {
            self.status = format!("Closed {} ({})", dialog.name(), event.name());
        }
    }

    fn settle_confirmations(&mut self) {
        let mut answers = Vec::new();
        self.pending.retain_mut(|pending| {
            match (&mut pending.confirmation).now_or_never() {
                Some(answer) => {
                    answers.push((pending.severity, answer));
                    false
                }
                None if pending.confirmation.is_abandoned() => {
                    tracing::debug!(severity = %pending.severity, "confirm toast closed unanswered");
                    false
                }
                None => true,
            }
        });

        for (severity, answer) in answers {
            let verdict = if answer.is_ok() { "accepted" } else { "declined" };
            self.status = format!("{severity} confirmation {verdict}");
            tracing::info!(%severity, verdict, "confirmation settled");
        }
    }
}

fn title_for(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "Info",
        Severity::Warning => "Warning",
        Severity::Success => "Success",
        Severity::Error => "Error",
    }
}
