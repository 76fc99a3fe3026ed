use contracts::enums::user_profile::UserProfile;
use contracts::system::auth::UserInfo;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};
use crate::shared::api_utils::ApiClientError;
use crate::shared::query_cache::{use_query_cache, QueryCache};
use crate::shared::theme::{use_theme, ThemeContext};
use crate::shared::toast::{use_toasts, Toasts};

pub const SESSION_EXPIRED: &str = "Sesión expirada. Inicia sesión nuevamente.";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub token: Option<String>,
    pub user: Option<UserInfo>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Профиль текущего пользователя; без сессии — только просмотр
    pub fn profile(&self) -> UserProfile {
        self.user.as_ref().map(|u| u.profile).unwrap_or_default()
    }
}

#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: ReadSignal<AuthState>,
    set_state: WriteSignal<AuthState>,
    cache: QueryCache,
    toasts: Toasts,
    theme: ThemeContext,
}

impl AuthContext {
    pub fn user(&self) -> Option<UserInfo> {
        self.state.with(|s| s.user.clone())
    }

    pub fn profile(&self) -> UserProfile {
        self.state.with(AuthState::profile)
    }

    /// Helper: Perform login
    pub async fn login(
        &self,
        email: String,
        password: String,
        remember: bool,
    ) -> Result<UserInfo, ApiClientError> {
        let response = api::login(email, password).await?;

        storage::save_session(&response.token, &response.user, remember);
        self.theme.set_from_server(response.prefs);
        self.set_state.set(AuthState {
            token: Some(response.token),
            user: Some(response.user.clone()),
        });
        log::info!("auth: signed in as {}", response.user.email);

        Ok(response.user)
    }

    /// Helper: Perform logout. Клиентский кэш очищается целиком.
    pub fn logout(&self) {
        storage::clear_session();
        self.cache.clear();
        self.set_state.set(AuthState::default());
    }

    /// Показывает ошибку запроса; 401 завершает сессию
    pub fn report(&self, title: &str, err: ApiClientError) {
        log::warn!("{}: {}", title, err);
        if err.is_unauthorized() {
            self.logout();
            self.toasts.warning(SESSION_EXPIRED);
        } else {
            self.toasts.error(title, Some(err.message()));
        }
    }

    /// Подтягивает актуальный профиль и настройки после перезагрузки страницы
    fn refresh(&self) {
        let ctx = *self;
        spawn_local(async move {
            match api::me().await {
                Ok(me) => {
                    storage::save_user(&me.user);
                    ctx.theme.set_from_server(me.prefs);
                    ctx.set_state.update(|s| s.user = Some(me.user));
                }
                Err(err) if err.is_unauthorized() => {
                    ctx.logout();
                    ctx.toasts.warning(SESSION_EXPIRED);
                }
                Err(err) => log::warn!("auth: cannot refresh session: {}", err),
            }
        });
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    // Сессия восстанавливается синхронно, чтобы guard не отправил на /login
    let restored = match storage::get_token() {
        Some(token) => AuthState {
            token: Some(token),
            user: storage::get_user(),
        },
        None => AuthState::default(),
    };
    let has_session = restored.is_authenticated();
    let (state, set_state) = signal(restored);

    let ctx = AuthContext {
        state,
        set_state,
        cache: use_query_cache(),
        toasts: use_toasts(),
        theme: use_theme(),
    };
    provide_context(ctx);

    if has_session {
        ctx.refresh();
    }

    children()
}

/// Hook to access auth state
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthProvider not found in component tree")
}
