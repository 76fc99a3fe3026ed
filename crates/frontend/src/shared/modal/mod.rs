use crate::shared::icons::icon;
use leptos::ev;
use leptos::prelude::*;
use std::sync::Arc;
use thaw::*;

#[component]
pub fn Modal(
    /// Заголовок окна
    #[prop(into)]
    title: String,
    /// Callback when modal should close
    on_close: Callback<()>,
    /// Кнопки в нижней панели (Cancelar, Crear и т.п.)
    #[prop(optional)]
    footer: Option<ChildrenFn>,
    /// Дополнительный CSS класс (например `modal--wide`)
    #[prop(optional)]
    class: &'static str,
    children: Children,
) -> impl IntoView {
    // Escape закрывает окно; слушатель снимается вместе с компонентом
    let handle = window_event_listener(ev::keydown, move |event| {
        if event.key() == "Escape" {
            on_close.run(());
        }
    });
    on_cleanup(move || handle.remove());

    let stop_propagation = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
    };

    let modal_class = if class.is_empty() {
        "modal".to_string()
    } else {
        format!("modal {class}")
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class=modal_class role="dialog" aria-modal="true" on:click=stop_propagation>
                <div class="modal-header">
                    <h2 class="modal-title">{title}</h2>
                    <button
                        class="button button--icon modal__close"
                        title="Cerrar"
                        on:click=move |_| on_close.run(())
                    >
                        {icon("x")}
                    </button>
                </div>
                <div class="modal-body">
                    {children()}
                </div>
                {footer.map(|footer| view! { <div class="modal-footer">{footer()}</div> })}
            </div>
        </div>
    }
}

/// Диалог подтверждения необратимого действия
#[component]
pub fn ConfirmDialog(
    #[prop(into)]
    title: String,
    #[prop(into)]
    message: String,
    /// Текст кнопки подтверждения
    #[prop(into, default = "Eliminar".to_string())]
    confirm_label: String,
    /// Пока выполняется запрос, кнопки заблокированы
    #[prop(into, optional)]
    busy: Signal<bool>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let footer: ChildrenFn = Arc::new(move || {
        let confirm_label = confirm_label.clone();
        view! {
            <Flex gap=FlexGap::Small justify=FlexJustify::End>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| on_cancel.run(())
                    disabled=busy
                >
                    "Cancelar"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    class="button--danger"
                    on_click=move |_| on_confirm.run(())
                    disabled=busy
                >
                    {confirm_label}
                </Button>
            </Flex>
        }
        .into_any()
    });

    view! {
        <Modal title=title on_close=on_cancel footer=footer class="modal--narrow">
            <p class="confirm-dialog__message">{message}</p>
        </Modal>
    }
}
