use leptos::prelude::*;
use leptos_router::components::{ParentRoute, Route, Router, Routes};
use leptos_router::path;

use crate::domain::a002_product::ui::list::InventoryList;
use crate::domain::a003_order::ui::details::OrderDetail;
use crate::domain::a003_order::ui::list::OrderList;
use crate::layout::Shell;
use crate::shared::query_cache::QueryCacheProvider;
use crate::shared::theme::ThemeProvider;
use crate::shared::toast::ToastProvider;
use crate::system::auth::context::AuthProvider;
use crate::system::auth::guard::RequireAuth;
use crate::system::pages::home::HomePage;
use crate::system::pages::login::LoginPage;
use crate::system::pages::settings::SettingsPage;
use crate::system::users::ui::details::UserDetailsPage;
use crate::usecases::u501_create_order::CreateOrderWizard;

/// Оболочка приложения только для вошедших пользователей
#[component]
fn ProtectedShell() -> impl IntoView {
    view! {
        <RequireAuth>
            <Shell />
        </RequireAuth>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="page">
            <div class="empty-state">"Página no encontrada."</div>
        </div>
    }
}

#[component]
pub fn App() -> impl IntoView {
    view! {
        <ThemeProvider>
            <ToastProvider>
                <QueryCacheProvider>
                    <AuthProvider>
                        <Router>
                            <Routes fallback=|| view! { <NotFound /> }>
                                <Route path=path!("/login") view=LoginPage />
                                <ParentRoute path=path!("") view=ProtectedShell>
                                    <Route path=path!("") view=HomePage />
                                    <Route path=path!("inventario") view=InventoryList />
                                    <Route path=path!("pedidos") view=OrderList />
                                    <Route path=path!("pedidos/nuevo") view=CreateOrderWizard />
                                    <Route path=path!("pedidos/:id") view=OrderDetail />
                                    <Route path=path!("configuracion") view=SettingsPage />
                                    <Route path=path!("configuracion/usuarios/:id") view=UserDetailsPage />
                                </ParentRoute>
                            </Routes>
                        </Router>
                    </AuthProvider>
                </QueryCacheProvider>
            </ToastProvider>
        </ThemeProvider>
    }
}
