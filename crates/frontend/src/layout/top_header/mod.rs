//! TopHeader component - application top navigation bar.
//!
//! Contains:
//! - Mobile menu toggle and application title
//! - Theme drawer button
//! - Current user avatar and logout

pub mod api_status;

use crate::layout::global_context::use_global_context;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_global_context();
    let auth = use_auth();
    let navigate = use_navigate();

    let logout = move |_| {
        auth.logout();
        navigate("/login", Default::default());
    };

    let user_name = move || {
        auth.user()
            .map(|u| u.display_name().to_string())
            .unwrap_or_else(|| "Usuario".to_string())
    };
    let initials = move || auth.user().map(|u| u.initials()).unwrap_or_default();
    let profile_name = move || auth.profile().display_name();

    view! {
        <header class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn top-header__menu"
                    aria-label="Abrir menú"
                    title="Abrir menú"
                    on:click=move |_| ctx.toggle_sidebar()
                >
                    {icon("menu")}
                </button>
                <span class="top-header__title">"Gestor Textil"</span>
            </div>

            <div class="top-header__actions">
                <button
                    class="top-header__icon-btn"
                    title="Tema"
                    on:click=move |_| ctx.open_theme_drawer()
                >
                    {icon("palette")}
                    <span class="top-header__label">"Tema"</span>
                </button>

                <div class="top-header__user" title=profile_name>
                    <span class="avatar">{initials}</span>
                    <span class="top-header__user-name">{user_name}</span>
                </div>

                <button class="top-header__icon-btn" on:click=logout title="Cerrar sesión">
                    {icon("log-out")}
                </button>
            </div>
        </header>
    }
}
