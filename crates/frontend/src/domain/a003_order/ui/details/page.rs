//! Order details page (MVVM: состояние и запросы во `view_model`)

use contracts::enums::order_status::OrderStatus;
use contracts::shared::dates::format_date;
use contracts::shared::money::{format_cop, format_quantity};
use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params_map};
use thaw::*;

use super::items::ItemCard;
use super::view_model::OrderDetailsVm;
use crate::domain::a002_product::ui::picker::InventoryPicker;
use crate::domain::a003_order::ui::StatusBadge;
use crate::shared::icons::icon;
use crate::shared::modal::ConfirmDialog;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;

#[component]
pub fn OrderDetail() -> impl IntoView {
    let params = use_params_map();
    let id = params.with_untracked(|p| p.get("id").unwrap_or_default());
    let navigate = StoredValue::new_local(use_navigate());
    let back = Callback::new(move |_| navigate.with_value(|nav| nav("/pedidos", Default::default())));

    let vm = OrderDetailsVm::new(id.clone());
    vm.load();

    let can_edit = vm.can_edit();
    let can_save = vm.can_save();
    let can_submit = vm.can_submit();
    let can_approve = vm.can_approve();
    let can_cancel = vm.can_cancel();
    let dirty_count = vm.dirty_count();
    let busy = Signal::derive(move || vm.busy.get());
    let status = vm.status();
    let total_units = vm.total_units();
    let total_amount = vm.total_amount();
    let no_items = Memo::new(move |_| vm.items.with(Vec::is_empty));

    let subline = move || {
        vm.order.with(|o| {
            o.as_ref()
                .map(|o| {
                    format!(
                        "{} • {} • Entrega: {}",
                        o.cliente_nombre,
                        o.direccion_entrega,
                        format_date(&o.fecha_entrega)
                    )
                })
                .unwrap_or_default()
        })
    };

    let selected_tab = RwSignal::new("items".to_string());

    view! {
        <PageFrame page_id="a003_order--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| back.run(())>
                        {icon("arrow-left")}
                        " Volver a pedidos"
                    </Button>
                    <div>
                        <h1 class="page__title">"Pedido"</h1>
                        <span class="page__subtitle">{subline}</span>
                    </div>
                    <Show when=move || vm.order.with(Option::is_some)>
                        <StatusBadge status=status />
                    </Show>
                </div>
                <div class="page__header-right">
                    <Show when=move || can_edit.get()>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| vm.save_dirty()
                            disabled=Signal::derive(move || busy.get() || !can_save.get())
                        >
                            {icon("save")}
                            {move || format!(" Guardar ({})", dirty_count.get())}
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| vm.picker_open.set(true)
                            disabled=busy
                        >
                            {icon("plus")}
                            " Agregar ítem"
                        </Button>
                    </Show>
                    <Show when=move || can_submit.get()>
                        <Button appearance=ButtonAppearance::Primary on_click=move |_| vm.submit() disabled=busy>
                            "Enviar"
                        </Button>
                    </Show>
                    <Show when=move || can_approve.get() || status.get() == OrderStatus::Approved>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| vm.approve()
                            disabled=Signal::derive(move || busy.get() || !can_approve.get())
                        >
                            {icon("check")}
                            {move || if can_approve.get() { " Aprobar" } else { " Aprobado" }}
                        </Button>
                    </Show>
                    <Show when=move || can_cancel.get()>
                        <Button appearance=ButtonAppearance::Subtle on_click=move |_| vm.cancel() disabled=busy>
                            "Cancelar pedido"
                        </Button>
                    </Show>
                    <Show when=move || can_edit.get()>
                        <Button
                            appearance=ButtonAppearance::Subtle
                            class="button--danger"
                            on_click=move |_| vm.confirm_delete_order.set(true)
                            disabled=busy
                        >
                            {icon("trash")}
                        </Button>
                    </Show>
                </div>
            </div>

            <div class="page__content">
                {move || vm.error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                <TabList selected_value=selected_tab>
                    <Tab value="items">{move || format!("Ítems ({})", vm.items.with(Vec::len))}</Tab>
                </TabList>

                <Show when=move || !vm.loading.get() fallback=|| view! { <Spinner /> }>
                    <Show
                        when=move || !no_items.get()
                        fallback=|| view! { <div class="empty-state">"Este pedido no tiene ítems."</div> }
                    >
                        <div class="card-grid">
                            <For
                                each=move || vm.items.get()
                                key=|item| item.id.clone()
                                children=move |item| view! { <ItemCard vm=vm item=item /> }
                            />
                        </div>
                    </Show>
                    <div class="order-totals">
                        <span>{move || format!("Unidades: {}", format_quantity(total_units.get()))}</span>
                        <strong>{move || format!("Total: {}", format_cop(total_amount.get()))}</strong>
                    </div>
                </Show>
            </div>

            <Show when=move || vm.picker_open.get()>
                <InventoryPicker
                    pedido_id=id.clone()
                    items=Signal::derive(move || vm.server_items.get())
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
                    on_confirm=Callback::new({
                        let item = item.clone();
                        move |_| vm.delete_item(item.clone())
                    })
                    on_cancel=Callback::new(move |_| vm.deleting_item.set(None))
                />
            })}

            <Show when=move || vm.confirm_delete_order.get()>
                <ConfirmDialog
                    title="Eliminar pedido"
                    message="¿Seguro que deseas eliminar este pedido? Esta acción no se puede deshacer."
                    busy=busy
                    on_confirm=Callback::new(move |_| vm.delete_order(back))
                    on_cancel=Callback::new(move |_| vm.confirm_delete_order.set(false))
                />
            </Show>
        </PageFrame>
    }
}
