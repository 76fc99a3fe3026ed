use contracts::enums::user_profile::UserProfile;
use contracts::system::users::{normalize_email, CreateUserDto, MIN_PASSWORD_LEN};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::Arc;
use thaw::*;

use crate::shared::modal::Modal;
use crate::shared::toast::use_toasts;
use crate::system::auth::context::use_auth;
use crate::system::users::api;

/// Модальное окно «Agregar usuario». Профили ограничены правами текущего пользователя.
#[component]
pub fn CreateUserModal(on_close: Callback<()>, on_created: Callback<String>) -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();
    let assignable = auth.profile().assignable();
    let default_profile = assignable
        .first()
        .copied()
        .unwrap_or_default()
        .code()
        .to_string();

    let nombre = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let profile = RwSignal::new(default_profile);
    let errors = RwSignal::new(Vec::<String>::new());
    let saving = RwSignal::new(false);

    let submit = move || {
        let dto = CreateUserDto {
            nombre_completo: nombre.get_untracked().trim().to_string(),
            email: normalize_email(&email.get_untracked()),
            password: password.get_untracked(),
            profile: UserProfile::from_code(&profile.get_untracked()).unwrap_or_default(),
        };
        let problems = dto.validate();
        if !problems.is_empty() {
            errors.set(problems);
            return;
        }
        errors.set(Vec::new());
        saving.set(true);
        spawn_local(async move {
            match api::create_user(&dto).await {
                Ok(id) => {
                    log::info!("users: created {} ({})", dto.email, id);
                    toasts.success("Usuario creado");
                    on_created.run(id);
                }
                Err(err) => auth.report("No se pudo crear el usuario", err),
            }
            saving.set(false);
        });
    };

    let footer: ChildrenFn = Arc::new(move || {
        view! {
            <Flex gap=FlexGap::Small justify=FlexJustify::End>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| on_close.run(())
                    disabled=Signal::derive(move || saving.get())
                >
                    "Cancelar"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| submit()
                    disabled=Signal::derive(move || saving.get())
                >
                    {move || if saving.get() { "Creando…" } else { "Crear" }}
                </Button>
            </Flex>
        }
        .into_any()
    });

    view! {
        <Modal title="Agregar usuario" on_close=on_close footer=footer>
            {move || {
                let list = errors.get();
                (!list.is_empty()).then(|| view! {
                    <div class="alert alert--error">
                        <ul>{list.into_iter().map(|e| view! { <li>{e}</li> }).collect_view()}</ul>
                    </div>
                })
            }}
            <div class="form__group">
                <Label>"Nombre completo"</Label>
                <Input value=nombre placeholder="Nombre y apellido" />
            </div>
            <div class="form__group">
                <Label>"Email"</Label>
                <Input value=email input_type=InputType::Email placeholder="tu@correo.com" />
            </div>
            <div class="form__group">
                <Label>"Contraseña"</Label>
                <Input value=password input_type=InputType::Password />
                <span class="form__hint">
                    {format!("Mínimo {} caracteres. Evita usar datos sensibles.", MIN_PASSWORD_LEN)}
                </span>
            </div>
            <div class="form__group">
                <Label>"Perfil"</Label>
                <Select value=profile>
                    {assignable.iter().map(|p| view! {
                        <option value=p.code()>{p.display_name()}</option>
                    }).collect_view()}
                </Select>
            </div>
        </Modal>
    }
}
