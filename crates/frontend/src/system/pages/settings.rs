use contracts::enums::user_profile::UserProfile;
use leptos::prelude::*;
use thaw::*;

use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_SYSTEM;
use crate::shared::theme::ThemePanel;
use crate::system::auth::context::use_auth;
use crate::system::auth::guard::RequirePermission;
use crate::system::users::ui::list::UsersPanel;

const TAB_GENERAL: &str = "general";
const TAB_USERS: &str = "usuarios";

/// «Configuración»: тема и (для менеджеров) пользователи
#[component]
pub fn SettingsPage() -> impl IntoView {
    let auth = use_auth();
    let selected_tab = RwSignal::new(TAB_GENERAL.to_string());
    let can_manage = move || auth.profile().can_manage_users();

    view! {
        <PageFrame page_id="sys_settings--system" category=PAGE_CAT_SYSTEM>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Configuración"</h1>
                    <span class="page__subtitle">"Ajustes de la aplicación"</span>
                </div>
            </div>

            <div class="page__content">
                <TabList selected_value=selected_tab>
                    <Tab value=TAB_GENERAL>"General"</Tab>
                    <Show when=can_manage>
                        <Tab value=TAB_USERS>"Usuarios"</Tab>
                    </Show>
                </TabList>

                <div class="tab-content">
                    // Пользователи грузятся только при входе на вкладку
                    {move || match selected_tab.get().as_str() {
                        TAB_USERS => view! {
                            <RequirePermission allow=UserProfile::can_manage_users>
                                <UsersPanel />
                            </RequirePermission>
                        }.into_any(),
                        _ => view! { <ThemePanel /> }.into_any(),
                    }}
                </div>
            </div>
        </PageFrame>
    }
}
