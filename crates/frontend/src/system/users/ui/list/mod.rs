mod create;

use contracts::shared::dates::format_date;
use contracts::system::users::User;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use thaw::*;

use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, SearchInput};
use crate::shared::modal::ConfirmDialog;
use crate::shared::query_cache::{use_query_cache, user_key, KEY_USERS};
use crate::shared::toast::use_toasts;
use crate::system::auth::context::use_auth;
use crate::system::users::api;
use crate::system::users::ui::profile_badge_color;
use create::CreateUserModal;

/// Вкладка «Usuarios»: поиск, создание и удаление
#[component]
pub fn UsersPanel() -> impl IntoView {
    let auth = use_auth();
    let cache = use_query_cache();
    let toasts = use_toasts();

    let all_users: RwSignal<Vec<User>> = RwSignal::new(Vec::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let search = RwSignal::new(String::new());
    let show_create = RwSignal::new(false);
    let deleting: RwSignal<Option<User>> = RwSignal::new(None);
    let delete_busy = RwSignal::new(false);

    let load_data = move || {
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::fetch_users().await {
                Ok(users) => {
                    cache.set(KEY_USERS, &users);
                    all_users.set(users);
                }
                Err(err) => {
                    set_error.set(Some(err.message()));
                    auth.report("No se pudieron cargar los usuarios", err);
                }
            }
            set_loading.set(false);
        });
    };

    // Кэш отдаётся сразу; после инвалидации список перечитывается
    Effect::new(move |_| {
        cache.generation();
        match cache.get::<Vec<User>>(KEY_USERS) {
            Some(users) => all_users.set(users),
            None => load_data(),
        }
    });

    let filtered = Memo::new(move |_| {
        let q = search.get();
        all_users.with(|users| {
            users
                .iter()
                .filter(|u| u.matches(&q))
                .cloned()
                .collect::<Vec<_>>()
        })
    });

    let on_created = Callback::new(move |_id: String| {
        show_create.set(false);
        cache.invalidate(KEY_USERS);
    });

    let confirm_delete = Callback::new(move |_| {
        let Some(user) = deleting.get_untracked() else {
            return;
        };
        delete_busy.set(true);
        spawn_local(async move {
            match api::delete_user(&user.id).await {
                Ok(()) => {
                    // Оптимистично убираем из списка, затем перечитываем
                    all_users.update(|list| list.retain(|u| u.id != user.id));
                    cache.invalidate(KEY_USERS);
                    cache.invalidate(&user_key(&user.id));
                    toasts.success("Usuario eliminado");
                }
                Err(err) => auth.report("No se pudo eliminar", err),
            }
            delete_busy.set(false);
            deleting.set(None);
        });
    });

    let is_admin = move || auth.profile().can_edit_users();

    view! {
        <div class="users-panel">
            <div class="users-panel__toolbar">
                <SearchInput
                    placeholder="Buscar por nombre, email o perfil"
                    on_change=Callback::new(move |q: String| search.set(q))
                />
                <Button appearance=ButtonAppearance::Primary on_click=move |_| show_create.set(true)>
                    {icon("plus")}
                    " Agregar usuario"
                </Button>
            </div>

            {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            <Show when=move || !loading.get() || !all_users.with(Vec::is_empty) fallback=|| view! { <Spinner /> }>
                {move || {
                    let users = filtered.get();
                    if users.is_empty() {
                        let text = if all_users.with(Vec::is_empty) {
                            "No hay usuarios."
                        } else {
                            "Sin resultados para tu búsqueda."
                        };
                        return view! { <div class="empty-state">{text}</div> }.into_any();
                    }
                    let q = search.get_untracked();
                    view! {
                        <div class="card-grid">
                            {users.into_iter().map(|user| {
                                let card = user_card(&user, &q);
                                let for_delete = user.clone();
                                if is_admin() {
                                    view! {
                                        <div class="card-row">
                                            <A href=format!("/configuracion/usuarios/{}", user.id)>{card}</A>
                                            <button
                                                class="button button--icon button--danger"
                                                title="Eliminar"
                                                on:click=move |_| deleting.set(Some(for_delete.clone()))
                                            >
                                                {icon("trash")}
                                            </button>
                                        </div>
                                    }.into_any()
                                } else {
                                    view! { <div class="card-row">{card}</div> }.into_any()
                                }
                            }).collect_view()}
                        </div>
                    }.into_any()
                }}
            </Show>

            <Show when=move || show_create.get()>
                <CreateUserModal on_close=Callback::new(move |_| show_create.set(false)) on_created=on_created />
            </Show>

            {move || deleting.get().map(|user| view! {
                <ConfirmDialog
                    title="Eliminar usuario"
                    message=format!(
                        "¿Seguro que deseas eliminar a {}? Esta acción no se puede deshacer.",
                        user.nombre_completo
                    )
                    busy=Signal::derive(move || delete_busy.get())
                    on_confirm=confirm_delete
                    on_cancel=Callback::new(move |_| deleting.set(None))
                />
            })}
        </div>
    }
}

fn user_card(user: &User, query: &str) -> AnyView {
    let color = profile_badge_color(user.profile);
    let user = user.clone();
    let query = query.to_string();
    view! {
        <Card class="user-card">
            <div class="user-card__main">
                <div class="user-card__name">{highlight_matches(&user.nombre_completo, &query)}</div>
                <div class="user-card__email">{highlight_matches(&user.email, &query)}</div>
            </div>
            <div class="user-card__meta">
                <Badge appearance=BadgeAppearance::Tint color=color>{user.profile.display_name()}</Badge>
                <span class="user-card__created">{format!("Creado: {}", format_date(&user.created_at))}</span>
                {(!user.is_active).then(|| view! { <span class="user-card__inactive">"Inactivo"</span> })}
            </div>
        </Card>
    }
    .into_any()
}
