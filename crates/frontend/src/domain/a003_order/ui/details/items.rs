use contracts::domain::a003_order::aggregate::OrderItem;
use contracts::shared::money::format_cop;
use leptos::prelude::*;
use thaw::*;

use super::view_model::{ItemField, OrderDetailsVm};
use crate::domain::a002_product::ui::picker::parse_quantity;
use crate::shared::icons::icon;

/// Карточка позиции: количество и цена правятся на месте
#[component]
pub fn ItemCard(vm: OrderDetailsVm, item: OrderItem) -> impl IntoView {
    let item_id = StoredValue::new(item.id.clone());
    let editable = vm.can_edit();
    let current = Memo::new(move |_| {
        vm.items
            .with(|items| items.iter().find(|i| i.id == item_id.get_value()).cloned())
    });
    let is_dirty = move || vm.dirty.with(|d| d.contains(&item_id.get_value()));

    let on_edit = move |field: ItemField| {
        move |ev: leptos::ev::Event| {
            let value = parse_quantity(&event_target_value(&ev));
            if field == ItemField::Cantidad && value <= 0.0 {
                return;
            }
            vm.edit_item(&item_id.get_value(), field, value);
        }
    };

    let for_delete = item.clone();

    view! {
        <Card class="item-card">
            <div class="item-card__header" class:item-card__header--dirty=is_dirty>
                <div>
                    <div class="item-card__title">{item.descripcion.clone()}</div>
                    <div class="item-card__ref">{format!("Ref: {}", item.referencia)}</div>
                </div>
                <Show when=move || editable.get()>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        size=ButtonSize::Small
                        disabled=Signal::derive(move || vm.busy.get())
                        on_click={
                            let for_delete = for_delete.clone();
                            move |_| vm.deleting_item.set(Some(for_delete.clone()))
                        }
                    >
                        {icon("trash")}
                        " Eliminar"
                    </Button>
                </Show>
            </div>
            <div class="item-card__fields">
                <label class="form__group">
                    <span>"Cantidad"</span>
                    <input
                        type="number"
                        min="0"
                        step="any"
                        prop:value=move || current.with(|c| c.as_ref().map(|i| i.cantidad.to_string()).unwrap_or_default())
                        prop:disabled=move || !editable.get()
                        on:change=on_edit(ItemField::Cantidad)
                    />
                </label>
                <label class="form__group">
                    <span>"Precio"</span>
                    <input
                        type="number"
                        min="0"
                        step="any"
                        prop:value=move || current.with(|c| c.as_ref().map(|i| i.precio.to_string()).unwrap_or_default())
                        prop:disabled=move || !editable.get()
                        on:change=on_edit(ItemField::Precio)
                    />
                </label>
                <div class="item-card__subtotal">
                    <span>"Subtotal"</span>
                    <strong>{move || current.with(|c| format_cop(c.as_ref().map(OrderItem::subtotal).unwrap_or(0.0)))}</strong>
                </div>
            </div>
        </Card>
    }
}
