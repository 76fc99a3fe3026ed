use leptos::prelude::*;

use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_SYSTEM;
use crate::system::auth::context::use_auth;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();
    let name = move || {
        auth.user()
            .map(|u| u.display_name().to_string())
            .unwrap_or_else(|| "Usuario".to_string())
    };

    view! {
        <PageFrame page_id="sys_home--system" category=PAGE_CAT_SYSTEM>
            <div class="page__header">
                <h1 class="page__title">{move || format!("Bienvenido al Gestor Textil, {}.", name())}</h1>
            </div>
            <div class="page__content">
                <p>
                    "Esta es una página protegida. Usa el botón “Tema” en la barra superior para personalizar la interfaz."
                </p>
            </div>
        </PageFrame>
    }
}
