//! Боковое меню: разделы приложения, активный маршрут выделен

use crate::layout::global_context::use_global_context;
use crate::shared::icons::icon;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

#[derive(Clone, Copy, Debug, PartialEq)]
struct MenuItem {
    href: &'static str,
    label: &'static str,
    icon: &'static str,
}

const MENU_ITEMS: &[MenuItem] = &[
    MenuItem { href: "/", label: "Inicio", icon: "home" },
    MenuItem { href: "/inventario", label: "Inventario", icon: "inventory" },
    MenuItem { href: "/pedidos", label: "Pedidos", icon: "orders" },
    MenuItem { href: "/configuracion", label: "Configuración", icon: "settings" },
];

/// Пункт активен на своём пути и на вложенных (`/pedidos/...`)
fn is_active(href: &str, pathname: &str) -> bool {
    if href == "/" {
        pathname == "/"
    } else {
        pathname == href
            || pathname
                .strip_prefix(href)
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_global_context();
    let location = use_location();

    view! {
        <nav class="app-sidebar" class:app-sidebar--open=move || ctx.sidebar_open.get()>
            <div class="app-sidebar__brand">"Gestor Textil"</div>
            <div class="app-sidebar__content">
                {MENU_ITEMS.iter().map(|item| {
                    let item = *item;
                    view! {
                        <A href=item.href on:click=move |_| ctx.close_sidebar()>
                            <div
                                class="app-sidebar__item"
                                class:app-sidebar__item--active=move || {
                                    location.pathname.with(|p| is_active(item.href, p))
                                }
                            >
                                <div class="app-sidebar__item-content">
                                    {icon(item.icon)}
                                    <span>{item.label}</span>
                                </div>
                            </div>
                        </A>
                    }
                }).collect_view()}
            </div>
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::is_active;

    #[test]
    fn active_route_matching() {
        assert!(is_active("/", "/"));
        assert!(!is_active("/", "/pedidos"));
        assert!(is_active("/pedidos", "/pedidos/abc"));
        assert!(is_active("/pedidos", "/pedidos"));
        assert!(!is_active("/pedidos", "/pedidosx"));
    }
}
