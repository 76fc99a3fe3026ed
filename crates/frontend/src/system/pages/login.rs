use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_navigate;
use thaw::*;

use crate::layout::top_header::api_status::ApiStatusBadge;
use crate::shared::toast::use_toasts;
use crate::system::auth::context::use_auth;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();
    let navigate = StoredValue::new_local(use_navigate());

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let remember = RwSignal::new(true);
    let (is_loading, set_is_loading) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if is_loading.get_untracked() {
            return;
        }
        let email_val = email.get_untracked().trim().to_string();
        let password_val = password.get_untracked();
        if email_val.is_empty() || password_val.is_empty() {
            toasts.error("Email y contraseña son requeridos", None);
            return;
        }

        set_is_loading.set(true);
        spawn_local(async move {
            match auth.login(email_val, password_val, remember.get_untracked()).await {
                Ok(_) => {
                    toasts.success("Bienvenido");
                    navigate.with_value(|nav| nav("/", Default::default()));
                }
                Err(err) => {
                    // 401 здесь означает неверные данные, а не истёкшую сессию
                    log::warn!("login failed: {}", err);
                    let message = match err.message() {
                        m if m.is_empty() => "Error al iniciar sesión".to_string(),
                        m => m,
                    };
                    toasts.error(message, None);
                }
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <Show
            when=move || !auth.state.get().is_authenticated()
            fallback=|| view! { <Redirect path="/" /> }
        >
            <div class="login-container">
                <div class="login-box">
                    <h1 class="login-box__brand">"Gestor Textil"</h1>
                    <h2 class="login-box__title">"Ingresar"</h2>

                    <form on:submit=on_submit>
                        <div class="form__group">
                            <Label>"Email"</Label>
                            <Input
                                value=email
                                input_type=InputType::Email
                                placeholder="tu@correo.com"
                                disabled=Signal::derive(move || is_loading.get())
                            />
                        </div>

                        <div class="form__group">
                            <Label>"Contraseña"</Label>
                            <Input
                                value=password
                                input_type=InputType::Password
                                placeholder="••••••••"
                                disabled=Signal::derive(move || is_loading.get())
                            />
                        </div>

                        <div class="form__group">
                            <Checkbox checked=remember label="Recordarme" />
                        </div>

                        <Button
                            appearance=ButtonAppearance::Primary
                            button_type=ButtonType::Submit
                            block=true
                            disabled=Signal::derive(move || is_loading.get())
                        >
                            {move || if is_loading.get() { "Ingresando…" } else { "Ingresar" }}
                        </Button>
                    </form>

                    <ApiStatusBadge />
                </div>
            </div>
        </Show>
    }
}
