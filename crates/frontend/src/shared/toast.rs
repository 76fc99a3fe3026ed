//! Всплывающие уведомления: очередь с автоудалением через 4 секунды.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::icons::icon;

pub const TOAST_TTL_MS: u32 = 4_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastStatus {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastStatus {
    pub fn css_modifier(&self) -> &'static str {
        match self {
            ToastStatus::Success => "success",
            ToastStatus::Error => "error",
            ToastStatus::Warning => "warning",
            ToastStatus::Info => "info",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub status: ToastStatus,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Clone, Copy)]
pub struct Toasts {
    items: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
}

impl Toasts {
    pub fn new() -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(1),
        }
    }

    pub fn push(&self, status: ToastStatus, title: impl Into<String>, description: Option<String>) -> u64 {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.items.update(|items| {
            items.push(Toast {
                id,
                status,
                title: title.into(),
                description,
            })
        });

        let items = self.items;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_TTL_MS).await;
            let _ = items.try_update(|items| items.retain(|t| t.id != id));
        });
        id
    }

    pub fn success(&self, title: impl Into<String>) {
        self.push(ToastStatus::Success, title, None);
    }

    pub fn error(&self, title: impl Into<String>, description: Option<String>) {
        self.push(ToastStatus::Error, title, description);
    }

    pub fn warning(&self, title: impl Into<String>) {
        self.push(ToastStatus::Warning, title, None);
    }

    pub fn dismiss(&self, id: u64) {
        self.items.update(|items| items.retain(|t| t.id != id));
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn ToastProvider(children: Children) -> impl IntoView {
    provide_context(Toasts::new());

    view! {
        {children()}
        <ToastViewport />
    }
}

pub fn use_toasts() -> Toasts {
    use_context::<Toasts>().expect("Toasts not found. Wrap your app with ToastProvider.")
}

#[component]
fn ToastViewport() -> impl IntoView {
    let toasts = use_toasts();

    view! {
        <div class="toast-viewport" role="status" aria-live="polite">
            <For
                each=move || toasts.items.get()
                key=|t| t.id
                children=move |t| {
                    let id = t.id;
                    view! {
                        <div class=format!("toast toast--{}", t.status.css_modifier())>
                            <div class="toast__text">
                                <div class="toast__title">{t.title}</div>
                                {t.description.map(|d| view! { <div class="toast__description">{d}</div> })}
                            </div>
                            <button class="toast__close" title="Cerrar" on:click=move |_| toasts.dismiss(id)>
                                {icon("x")}
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
