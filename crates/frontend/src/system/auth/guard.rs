use contracts::enums::user_profile::UserProfile;
use leptos::prelude::*;
use leptos_router::components::Redirect;

use super::context::use_auth;

/// Component that requires authentication
/// Redirects to `/login` if there is no session
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();

    view! {
        <Show
            when=move || auth.state.get().is_authenticated()
            fallback=|| view! { <Redirect path="/login" /> }
        >
            {children()}
        </Show>
    }
}

/// Component that requires a permission of the current profile
#[component]
pub fn RequirePermission(allow: fn(&UserProfile) -> bool, children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();

    view! {
        <Show
            when=move || allow(&auth.profile())
            fallback=|| view! {
                <div class="alert alert--error">"No tienes permisos para ver esta sección."</div>
            }
        >
            {children()}
        </Show>
    }
}
