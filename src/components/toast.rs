use leptos::{component, view, IntoView, ReadSignal, SignalGet, SignalUpdate, WriteSignal};
use std::time::Duration;

const TOAST_DURATION: Duration = Duration::from_secs(4);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ToastLevel {
    #[default]
    Info,
    Error,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Toast {
    /// Bumped for every toast shown, so a stale timer can tell it is stale
    pub serial: u64,
    pub message: String,
    pub level: ToastLevel,
    pub visible: bool,
}

impl Toast {
    /// The toast that replaces `self`
    #[must_use]
    pub fn next(&self, message: String, level: ToastLevel) -> Self {
        Self {
            serial: self.serial.wrapping_add(1),
            message,
            level,
            visible: true,
        }
    }

    /// Hide the toast if it is still the one with this serial
    pub fn expire(&mut self, serial: u64) {
        if self.serial == serial {
            self.visible = false;
        }
    }
}

/// Show a notice and hide it again after a few seconds
pub fn show_toast(set_toast: WriteSignal<Toast>, message: String, level: ToastLevel) {
    let Some(serial) = set_toast.try_update(|toast| {
        *toast = toast.next(message, level);
        toast.serial
    }) else {
        return;
    };

    let _ = leptos::leptos_dom::helpers::set_timeout_with_handle(
        move || set_toast.update(|toast| toast.expire(serial)),
        TOAST_DURATION,
    );
}

#[component]
#[must_use]
pub fn ToastNotification(toast: ReadSignal<Toast>) -> impl IntoView {
    view! {
        {move || {
            let t = toast.get();
            let class = match (t.visible, t.level) {
                (false, _) => "toast",
                (true, ToastLevel::Info) => "toast toast-visible",
                (true, ToastLevel::Error) => "toast toast-visible toast-error",
            };
            view! { <div class=class>{t.message}</div> }
        }}
    }
}
