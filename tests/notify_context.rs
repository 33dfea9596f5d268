// SPDX-License-Identifier: MPL-2.0
use futures_util::future::{self, LocalBoxFuture};
use futures_util::FutureExt;
use iced_notify::application::port::{DialogEvent, ElementFactory, Severity};
use iced_notify::config::{self, Config};
use iced_notify::dom::DialogNode;
use iced_notify::error::FactoryError;
use iced_notify::notify::{ModalOptions, ModalState, NotifyContext, OpenOutcome, PositionClass};
use iced_notify::ui::backdrop::Backdrop;
use iced_notify::ui::notifications::ToastEngine;
use std::fs;
use std::rc::Rc;
use tempfile::tempdir;

#[derive(Debug, Clone, Copy)]
struct ReadyFactory;

impl ElementFactory for ReadyFactory {
    type Element = DialogNode<()>;

    fn create_element(
        &self,
        element_name: &str,
    ) -> LocalBoxFuture<'static, Result<DialogNode<()>, FactoryError>> {
        future::ready(Ok(DialogNode::new(element_name))).boxed_local()
    }
}

type Ctx = NotifyContext<ToastEngine, Backdrop<DialogNode<()>>, ReadyFactory>;

fn context(config: &Config) -> (Ctx, Rc<ToastEngine>) {
    let engine = Rc::new(ToastEngine::from_config(&config.stack));
    let ctx = NotifyContext::new(config, Rc::clone(&engine), Backdrop::new(), ReadyFactory);
    (ctx, engine)
}

#[test]
fn config_file_drives_presets_and_stack() {
    let dir = tempdir().expect("Failed to create temporary directory");
    fs::write(
        dir.path().join("notify.toml"),
        r#"
        [show]
        time_out_ms = 2000
        position_class = "toast-bottom-left"

        [confirm]
        time_out_ms = 9000

        [stack]
        max_visible = 2
        "#,
    )
    .expect("Failed to write config");

    let (config, warning) = config::load_with_override(Some(dir.path().to_path_buf()));
    assert!(warning.is_none());

    let (ctx, engine) = context(&config);
    let presets = ctx.notifications().presets();
    assert_eq!(presets.show.time_out_ms, 2000);
    assert_eq!(presets.show.position_class, PositionClass::BottomLeft);
    assert_eq!(presets.confirm.time_out_ms, 0);

    for severity in Severity::ALL {
        ctx.notifications().show(severity, "hello", None, None);
    }
    assert_eq!(engine.visible_count(), 2);
    assert_eq!(engine.queued_count(), 2);
}

#[test]
fn confirm_through_the_engine_settles_and_removes_the_toast() {
    let (ctx, engine) = context(&Config::default());
    let confirmation = ctx
        .notifications()
        .confirm_warning("Discard draft?", Some("Confirm"), None);

    let handle = engine.visible_handles().remove(0);
    assert!(engine.press(&handle, ".btn.confirm-no"));

    assert!(matches!(confirmation.now_or_never(), Some(Err(_))));
    assert!(!engine.contains(&handle));
}

#[test]
fn clones_share_modal_state() {
    let (ctx, _engine) = context(&Config::default());
    let other = ctx.clone();

    let outcome = ctx
        .modals()
        .show_modal_dialog(ModalOptions::new("settings"))
        .now_or_never();
    assert_eq!(outcome, Some(OpenOutcome::Mounted));
    assert_eq!(other.modals().state(), ModalState::Open);
    assert!(other.modals().container().is_visible());

    let dialog = other.modals().current_element().expect("dialog mounted");
    dialog.dispatch(DialogEvent::Reject, None);
    assert_eq!(ctx.modals().state(), ModalState::Closed);
    assert!(ctx.modals().container().contents().is_none());
}
