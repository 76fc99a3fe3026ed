pub mod global_context;
pub mod left;
pub mod top_header;

use global_context::AppGlobalContext;
use leptos::prelude::*;
use leptos_router::components::Outlet;
use top_header::TopHeader;

use crate::shared::theme::ThemeDrawer;

/// Main application shell for authenticated pages.
///
/// ```text
/// +------------------------------------------+
/// |              TopHeader                    |
/// +------------------------------------------+
/// |  Sidebar  |          Outlet              |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell() -> impl IntoView {
    let ctx = AppGlobalContext::new();
    provide_context(ctx);

    view! {
        <div class="app-layout">
            <TopHeader />
            <div class="app-body">
                <left::Sidebar />
                <Show when=move || ctx.sidebar_open.get()>
                    <div class="app-sidebar__backdrop" on:click=move |_| ctx.close_sidebar()></div>
                </Show>
                <main class="app-main">
                    <Outlet />
                </main>
            </div>
            <ThemeDrawer open=ctx.theme_drawer_open />
        </div>
    }
}
