use contracts::enums::user_profile::UserProfile;
use contracts::shared::dates::format_date;
use contracts::system::users::{normalize_email, UpdateUserDto, User};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_params_map};
use thaw::*;

use crate::shared::api_utils::ApiClientError;
use crate::shared::icons::icon;
use crate::shared::modal::ConfirmDialog;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::shared::query_cache::{use_query_cache, user_key, KEY_USERS};
use crate::shared::toast::use_toasts;
use crate::system::auth::context::use_auth;
use crate::system::users::api;

/// Карточка пользователя: редактирование и удаление (только администратор)
#[component]
pub fn UserDetailsPage() -> impl IntoView {
    let params = use_params_map();
    let id = params.with_untracked(|p| p.get("id").unwrap_or_default());
    let auth = use_auth();
    let cache = use_query_cache();
    let toasts = use_toasts();
    let navigate = StoredValue::new_local(use_navigate());

    let user: RwSignal<Option<User>> = RwSignal::new(None);
    let nombre = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let profile = RwSignal::new(UserProfile::default().code().to_string());
    let errors = RwSignal::new(Vec::<String>::new());
    let saving = RwSignal::new(false);
    let confirm_open = RwSignal::new(false);
    let id = StoredValue::new(id);

    let fill_form = move |u: User| {
        nombre.set(u.nombre_completo.clone());
        email.set(u.email.clone());
        profile.set(u.profile.code().to_string());
        user.set(Some(u));
    };

    let go_back = move || navigate.with_value(|nav| nav("/configuracion", Default::default()));

    // Сначала кэш (из списка или прошлого открытия), иначе запрос
    let cached = cache
        .get::<User>(&user_key(&id.get_value()))
        .or_else(|| {
            cache
                .get::<Vec<User>>(KEY_USERS)
                .and_then(|list| list.into_iter().find(|u| u.id == id.get_value()))
        });
    match cached {
        Some(u) => fill_form(u),
        None => spawn_local(async move {
            match api::fetch_user(&id.get_value()).await {
                Ok(u) => {
                    cache.set(&user_key(&u.id), &u);
                    fill_form(u);
                }
                Err(ApiClientError::Http { status: 404, .. }) => {
                    toasts.warning("Usuario no encontrado");
                    go_back();
                }
                Err(err) => auth.report("No se pudo cargar el usuario", err),
            }
        }),
    }

    let can_edit = move || auth.profile().can_edit_users();
    let can_delete = move || auth.profile().can_delete_users();

    let save = move |_| {
        let dto = UpdateUserDto {
            nombre_completo: nombre.get_untracked().trim().to_string(),
            email: normalize_email(&email.get_untracked()),
            profile: UserProfile::from_code(&profile.get_untracked()).unwrap_or_default(),
        };
        let problems = dto.validate();
        if !problems.is_empty() {
            errors.set(problems);
            return;
        }
        errors.set(Vec::new());
        saving.set(true);
        let user_id = id.get_value();
        spawn_local(async move {
            match api::update_user(&user_id, &dto).await {
                Ok(()) => {
                    let updated = user.get_untracked().map(|u| User {
                        nombre_completo: dto.nombre_completo.clone(),
                        email: dto.email.clone(),
                        profile: dto.profile,
                        ..u
                    });
                    // Список перечитается; карточка кладётся после инвалидации префикса
                    cache.invalidate(KEY_USERS);
                    if let Some(u) = updated {
                        cache.set(&user_key(&user_id), &u);
                        user.set(Some(u));
                    }
                    toasts.success("Cambios guardados");
                }
                Err(err) => auth.report("No se pudo guardar", err),
            }
            saving.set(false);
        });
    };

    let confirm_delete = Callback::new(move |_| {
        saving.set(true);
        let user_id = id.get_value();
        spawn_local(async move {
            match api::delete_user(&user_id).await {
                Ok(()) => {
                    cache.invalidate(KEY_USERS);
                    toasts.success("Usuario eliminado");
                    confirm_open.set(false);
                    go_back();
                }
                Err(err) => {
                    confirm_open.set(false);
                    auth.report("No se pudo eliminar", err);
                }
            }
            saving.set(false);
        });
    });

    view! {
        <PageFrame page_id="sys_users--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Usuario"</h1>
                    <span class="page__subtitle">"Editar información del usuario"</span>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| go_back()>
                        {icon("arrow-left")}
                        " Volver"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=save
                        disabled=Signal::derive(move || saving.get() || user.with(Option::is_none) || !can_edit())
                    >
                        {icon("save")}
                        " Guardar"
                    </Button>
                    <span title=move || if can_delete() { "" } else { "Solo administradores" }>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            class="button--danger"
                            on_click=move |_| confirm_open.set(true)
                            disabled=Signal::derive(move || saving.get() || !can_delete())
                        >
                            {icon("trash")}
                            " Eliminar"
                        </Button>
                    </span>
                </div>
            </div>

            <div class="page__content">
                <Show when=move || user.with(Option::is_some) fallback=|| view! { <Spinner /> }>
                    {move || {
                        let list = errors.get();
                        (!list.is_empty()).then(|| view! {
                            <div class="alert alert--error">
                                <ul>{list.into_iter().map(|e| view! { <li>{e}</li> }).collect_view()}</ul>
                            </div>
                        })
                    }}
                    <Card>
                        <div class="form__group">
                            <Label>"Nombre completo"</Label>
                            <Input value=nombre disabled=Signal::derive(move || !can_edit()) />
                        </div>
                        <div class="form__group">
                            <Label>"Email"</Label>
                            <Input value=email input_type=InputType::Email disabled=Signal::derive(move || !can_edit()) />
                        </div>
                        <div class="form__group">
                            <Label>"Perfil"</Label>
                            <Select value=profile disabled=Signal::derive(move || !can_edit())>
                                {auth.profile().assignable().into_iter().map(|p| view! {
                                    <option value=p.code()>{p.display_name()}</option>
                                }).collect_view()}
                            </Select>
                        </div>
                        <div class="detail-meta">
                            {move || user.get().map(|u| view! {
                                <span>{format!("Creado: {}", format_date(&u.created_at))}</span>
                                <span>{format!(
                                    "Último ingreso: {}",
                                    u.last_login_at.as_deref().map(format_date).unwrap_or_else(|| "—".to_string())
                                )}</span>
                            })}
                        </div>
                    </Card>
                </Show>
            </div>

            <Show when=move || confirm_open.get()>
                <ConfirmDialog
                    title="Eliminar usuario"
                    message="¿Seguro que deseas eliminar este usuario? Esta acción no se puede deshacer."
                    busy=Signal::derive(move || saving.get())
                    on_confirm=confirm_delete
                    on_cancel=Callback::new(move |_| confirm_open.set(false))
                />
            </Show>
        </PageFrame>
    }
}
