use contracts::domain::a003_order::aggregate::OrderItem;
use contracts::domain::a003_order::lines::summary_preview;
use contracts::shared::dates::format_date;
use contracts::shared::money::{format_cop, format_quantity};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use thaw::*;

use super::state::{order_ref, WizardStep};
use super::view_model::CreateOrderVm;
use crate::domain::a001_client::ui::select::ClientSelect;
use crate::domain::a002_product::ui::picker::{parse_quantity, InventoryPicker};
use crate::domain::a003_order::ui::details::view_model::ItemField;
use crate::shared::icons::icon;
use crate::shared::modal::ConfirmDialog;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_USECASE;

/// Мастер создания заказа: клиент -> артикулы -> итог
#[component]
pub fn CreateOrderWizard() -> impl IntoView {
    let vm = CreateOrderVm::new();
    let navigate = StoredValue::new_local(use_navigate());

    // Выбор клиента заполняет поля шага 1
    Effect::new(move |_| {
        if let Some(client) = vm.client.get() {
            vm.apply_client(&client);
        }
    });

    let step = vm.step;

    view! {
        <PageFrame page_id="u501_create_order--usecase" category=PAGE_CAT_USECASE>
            <div class="page__header">
                <div class="page__header-left">
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| navigate.with_value(|nav| nav("/pedidos", Default::default()))
                    >
                        {icon("arrow-left")}
                        " Pedidos"
                    </Button>
                    <h1 class="page__title">"Nuevo pedido"</h1>
                </div>
            </div>

            <div class="page__content">
                <ol class="wizard-stepper">
                    {WizardStep::all()
                        .into_iter()
                        .map(|s| {
                            view! {
                                <li
                                    class="wizard-stepper__step"
                                    class:wizard-stepper__step--active=move || step.get() == s
                                    class:wizard-stepper__step--done={move || step.get().number() > s.number()}
                                >
                                    <span class="wizard-stepper__number">{format!("Paso {}", s.number())}</span>
                                    <span class="wizard-stepper__label">{s.label()}</span>
                                </li>
                            }
                        })
                        .collect_view()}
                </ol>

                {move || match step.get() {
                    WizardStep::Client => view! { <ClientStep vm=vm /> }.into_any(),
                    WizardStep::Items => view! { <ItemsStep vm=vm /> }.into_any(),
                    WizardStep::Done => view! { <DoneStep vm=vm /> }.into_any(),
                }}
            </div>
        </PageFrame>
    }
}

#[component]
fn ClientStep(vm: CreateOrderVm) -> impl IntoView {
    let draft_created = vm.draft_created();
    let can_continue = vm.can_continue();
    let busy = Signal::derive(move || vm.busy.get());

    view! {
        <Card class="wizard-card">
            <h2 class="wizard-card__title">"Datos del cliente"</h2>
            <Show when=move || draft_created.get()>
                <div class="alert alert--info">
                    "El pedido ya fue creado; los datos del cliente no se modifican."
                </div>
            </Show>
            <div class="form">
                <label class="form__group">
                    <span>"Cliente"</span>
                    <ClientSelect selected=vm.client disabled=draft_created />
                </label>
                <label class="form__group">
                    <span>"Nombre"</span>
                    <Input value=vm.cliente_nombre placeholder="Nombre del cliente" disabled=draft_created />
                </label>
                <label class="form__group">
                    <span>"Teléfono"</span>
                    <Input value=vm.cliente_telefono placeholder="Teléfono" disabled=draft_created />
                </label>
                <label class="form__group">
                    <span>"Dirección de entrega"</span>
                    <Input value=vm.direccion_entrega placeholder="Dirección" disabled=draft_created />
                </label>
                <label class="form__group">
                    <span>"Fecha de entrega"</span>
                    <input
                        type="date"
                        class="form__input"
                        prop:value=move || vm.fecha_entrega.get()
                        prop:disabled=move || draft_created.get()
                        on:input=move |ev| vm.fecha_entrega.set(event_target_value(&ev))
                    />
                </label>
            </div>
            <div class="wizard-card__actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| vm.continue_to_items()
                    disabled=Signal::derive(move || busy.get() || !can_continue.get())
                >
                    {move || if busy.get() { "Creando…" } else { "Continuar" }}
                </Button>
            </div>
        </Card>
    }
}

#[component]
fn ItemsStep(vm: CreateOrderVm) -> impl IntoView {
    let busy = Signal::derive(move || vm.busy.get());
    let can_submit = vm.can_submit();
    let total_units = vm.total_units();
    let total_amount = vm.total_amount();
    let no_items = Memo::new(move |_| vm.items.with(Vec::is_empty));
    let pedido_id = vm.pedido_id.get_untracked().unwrap_or_default();

    view! {
        <Card class="wizard-card">
            <div class="wizard-card__header">
                <h2 class="wizard-card__title">"Artículos"</h2>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| vm.picker_open.set(true)
                    disabled=busy
                >
                    {icon("plus")}
                    " Añadir artículo"
                </Button>
            </div>

            <Show
                when=move || !no_items.get()
                fallback=|| view! { <div class="empty-state">"Carrito vacío. Usa “Añadir artículo”."</div> }
            >
                <div class="cart">
                    <For
                        each=move || vm.items.get()
                        key=|item| item.id.clone()
                        children=move |item| view! { <CartRow vm=vm item=item /> }
                    />
                </div>
            </Show>

            <div class="order-totals">
                <span>{move || format!("Unidades: {}", format_quantity(total_units.get()))}</span>
                <strong>{move || format!("Total: {}", format_cop(total_amount.get()))}</strong>
            </div>

            <div class="wizard-card__actions">
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| vm.back() disabled=busy>
                    {icon("chevron-left")}
                    " Atrás"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| vm.submit()
                    disabled=Signal::derive(move || !can_submit.get())
                >
                    "Siguiente "
                    {icon("chevron-right")}
                </Button>
            </div>
        </Card>

        <Show when=move || vm.picker_open.get()>
            <InventoryPicker
                pedido_id=pedido_id.clone()
                items=Signal::derive(move || vm.items.get())
                busy=busy
                on_add=Callback::new(move |request| vm.add_from_picker(request))
                on_close=Callback::new(move |_| vm.picker_open.set(false))
            />
        </Show>

        {move || vm.deleting_item.get().map(|item| view! {
            <ConfirmDialog
                title="Eliminar ítem"
                message=format!("¿Seguro que deseas eliminar “{}” del pedido?", item.descripcion)
                busy=busy
                on_confirm=Callback::new(move |_| vm.delete_item())
                on_cancel=Callback::new(move |_| vm.deleting_item.set(None))
            />
        })}
    }
}

/// Строка корзины: количество и цена сохраняются при уходе с поля
#[component]
fn CartRow(vm: CreateOrderVm, item: OrderItem) -> impl IntoView {
    let item_id = StoredValue::new(item.id.clone());
    let current = Memo::new(move |_| {
        vm.items
            .with(|items| items.iter().find(|i| i.id == item_id.get_value()).cloned())
    });

    let on_commit = move |field: ItemField| {
        move |ev: leptos::ev::Event| {
            let value = parse_quantity(&event_target_value(&ev));
            vm.update_item(item_id.get_value(), field, value);
        }
    };

    let for_delete = item.clone();

    view! {
        <div class="cart-row">
            <div class="cart-row__info">
                <div class="cart-row__title">{item.descripcion.clone()}</div>
                <div class="cart-row__ref">{format!("Ref: {}", item.referencia)}</div>
            </div>
            <label class="form__group form__group--inline">
                <span>"Cantidad"</span>
                <input
                    type="number"
                    min="0"
                    step="any"
                    prop:value=move || current.with(|c| c.as_ref().map(|i| i.cantidad.to_string()).unwrap_or_default())
                    on:change=on_commit(ItemField::Cantidad)
                />
            </label>
            <label class="form__group form__group--inline">
                <span>"Precio"</span>
                <input
                    type="number"
                    min="0"
                    step="any"
                    prop:value=move || current.with(|c| c.as_ref().map(|i| i.precio.to_string()).unwrap_or_default())
                    on:change=on_commit(ItemField::Precio)
                />
            </label>
            <strong class="cart-row__subtotal">
                {move || current.with(|c| format_cop(c.as_ref().map(OrderItem::subtotal).unwrap_or(0.0)))}
            </strong>
            <Button
                appearance=ButtonAppearance::Subtle
                size=ButtonSize::Small
                disabled=Signal::derive(move || vm.busy.get())
                on_click=move |_| vm.deleting_item.set(Some(for_delete.clone()))
            >
                {icon("trash")}
            </Button>
        </div>
    }
}

#[component]
fn DoneStep(vm: CreateOrderVm) -> impl IntoView {
    let summary = vm.summary();
    let items = vm.items.get_untracked();
    let total_units = vm.total_units();
    let total_amount = vm.total_amount();
    let mailto = summary.mailto_link(&items);

    let (shown, more) = summary_preview(&items);
    let preview = shown
        .iter()
        .map(|item| {
            view! {
                <li>
                    {format!(
                        "{} × {} = {}",
                        item.descripcion,
                        format_quantity(item.cantidad),
                        format_cop(item.subtotal())
                    )}
                </li>
            }
        })
        .collect_view();

    view! {
        <Card class="wizard-card wizard-card--done">
            <div class="wizard-done__icon">{icon("check")}</div>
            <h2 class="wizard-card__title">"Pedido enviado"</h2>
            <p class="wizard-done__text">
                "Tu pedido ha sido activado y enviado para revisión. Te avisaremos cuando sea aprobado."
            </p>

            <div class="order-summary">
                <h3 class="order-summary__title">"Resumen del pedido"</h3>
                <dl class="order-summary__grid">
                    <dt>"Ref"</dt>
                    <dd>{order_ref(&summary.pedido_id)}</dd>
                    <dt>"Cliente"</dt>
                    <dd>{summary.cliente_nombre.clone()}</dd>
                    <dt>"Entrega"</dt>
                    <dd>{format!("{} • {}", format_date(&summary.fecha_entrega), summary.direccion_entrega)}</dd>
                    <dt>"Ítems"</dt>
                    <dd>{move || format_quantity(total_units.get())}</dd>
                    <dt>"Total"</dt>
                    <dd><strong>{move || format_cop(total_amount.get())}</strong></dd>
                </dl>
                <div class="order-summary__detail">
                    <span>"Detalle"</span>
                    <ul>{preview}</ul>
                    {more.map(|m| view! { <span class="order-summary__more">{m}</span> })}
                </div>
            </div>

            <div class="wizard-card__actions">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.reset()>
                    {icon("plus")}
                    " Crear otro"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.download()>
                    {icon("download")}
                    " Descargar"
                </Button>
                <a class="button-link" href=mailto>
                    {icon("mail")}
                    " Notificar por correo"
                </a>
            </div>
        </Card>
    }
}
