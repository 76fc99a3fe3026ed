//! Выбор товаров для заказа. Доступное = disponible минус то, что уже в заказе.

use contracts::domain::a002_product::aggregate::InventorySummaryRow;
use contracts::domain::a002_product::availability::{available_for_picker, clamp_quantity, pick_quantity};
use contracts::domain::a003_order::aggregate::OrderItem;
use contracts::domain::a003_order::lines::quantity_in_order;
use contracts::shared::money::{format_cop, format_quantity};
use contracts::shared::pagination::Pagination;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashMap;
use std::sync::Arc;
use thaw::*;

use super::CharacteristicChips;
use crate::domain::a002_product::api;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::list_utils::{highlight_matches, SearchInput};
use crate::shared::modal::Modal;
use crate::system::auth::context::use_auth;

const PICKER_PAGE_SIZE: usize = 5;

/// Запрос из пикера на добавление позиции
#[derive(Debug, Clone, PartialEq)]
pub struct PickRequest {
    pub row: InventorySummaryRow,
    pub cantidad: f64,
    /// Сколько этого товара было в заказе до добавления
    pub previous: f64,
}

/// Разбирает ввод количества ("2", "1,5"); мусор -> 0
pub fn parse_quantity(raw: &str) -> f64 {
    raw.trim().replace(',', ".").parse::<f64>().unwrap_or(0.0)
}

#[component]
pub fn InventoryPicker(
    pedido_id: String,
    /// Текущие позиции заказа
    #[prop(into)]
    items: Signal<Vec<OrderItem>>,
    /// Пока родитель добавляет позицию, кнопки заблокированы
    #[prop(into)]
    busy: Signal<bool>,
    on_add: Callback<PickRequest>,
    on_close: Callback<()>,
) -> impl IntoView {
    let auth = use_auth();
    let rows: RwSignal<Vec<InventorySummaryRow>> = RwSignal::new(Vec::new());
    let loading = RwSignal::new(true);
    let search = RwSignal::new(String::new());
    let quantities: RwSignal<HashMap<String, String>> = RwSignal::new(HashMap::new());
    let pagination = RwSignal::new(Pagination::new(PICKER_PAGE_SIZE));

    spawn_local(async move {
        match api::fetch_inventory_summary(Some(&pedido_id)).await {
            Ok(data) => rows.set(data),
            Err(err) => auth.report("No se pudo cargar el inventario", err),
        }
        loading.set(false);
    });

    let available_of = move |row: &InventorySummaryRow| {
        let in_order = items.with(|list| quantity_in_order(list, &row.id));
        available_for_picker(row.cantidad_disponible, in_order)
    };

    let filtered = Memo::new(move |_| {
        let q = search.get();
        rows.with(|all| all.iter().filter(|r| r.matches(&q)).cloned().collect::<Vec<_>>())
    });

    Effect::new(move |_| {
        let total = filtered.with(Vec::len);
        pagination.update(|p| *p = p.with_total(total));
    });

    let add = move |row: InventorySummaryRow| {
        let available = available_of(&row);
        let requested = quantities.with_untracked(|m| m.get(&row.id).map(|s| parse_quantity(s)).unwrap_or(1.0));
        let Some(cantidad) = pick_quantity(requested, available) else {
            return;
        };
        let previous = items.with_untracked(|list| quantity_in_order(list, &row.id));
        quantities.update(|m| {
            m.remove(&row.id);
        });
        on_add.run(PickRequest { row, cantidad, previous });
    };

    let footer: ChildrenFn = Arc::new(move || {
        view! {
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <PaginationControls pagination=pagination />
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                    "Cerrar"
                </Button>
            </Flex>
        }
        .into_any()
    });

    view! {
        <Modal title="Agregar ítems" on_close=on_close footer=footer class="modal--wide">
            <SearchInput
                placeholder="Buscar por descripción, referencia o color"
                on_change=Callback::new(move |q: String| {
                    search.set(q);
                    pagination.update(|p| *p = p.with_page(0));
                })
            />
            <Show when=move || !loading.get() fallback=|| view! { <Spinner /> }>
                {move || {
                    let page = pagination.get();
                    let q = search.get();
                    let visible = filtered.with(|all| page.slice(all).to_vec());
                    if visible.is_empty() {
                        return view! { <div class="empty-state">"No hay resultados."</div> }.into_any();
                    }
                    visible.into_iter().map(|row| {
                        let id = StoredValue::new(row.id.clone());
                        let row_for_add = row.clone();
                        let available = Memo::new({
                            let row = row.clone();
                            move |_| available_of(&row)
                        });
                        let qty_text = move || {
                            quantities.with(|m| m.get(&id.get_value()).cloned()).unwrap_or_else(|| "1".to_string())
                        };
                        view! {
                            <div class="picker-row">
                                <div class="picker-row__info">
                                    <div class="picker-row__title">{highlight_matches(&row.descripcion, &q)}</div>
                                    <div class="picker-row__ref">"Ref: " {highlight_matches(&row.referencia, &q)}</div>
                                    <CharacteristicChips row=row.clone() />
                                </div>
                                <div class="picker-row__stock">
                                    <span class="picker-row__label">"Disponible"</span>
                                    <span class="picker-row__value">{move || format_quantity(available.get())}</span>
                                    <span class="picker-row__price">{format_cop(row.precio_lista)}</span>
                                </div>
                                <div class="picker-row__actions">
                                    <input
                                        type="number"
                                        class="picker-row__qty"
                                        min="0"
                                        step="any"
                                        prop:value=qty_text
                                        prop:max=move || available.get().to_string()
                                        prop:disabled=move || available.get() <= 0.0
                                        on:change=move |ev| {
                                            // Ввод сразу поджимается к доступному
                                            let clamped = clamp_quantity(parse_quantity(&event_target_value(&ev)), available.get_untracked());
                                            quantities.update(|m| {
                                                m.insert(id.get_value(), clamped.to_string());
                                            });
                                        }
                                    />
                                    <Button
                                        appearance=ButtonAppearance::Primary
                                        size=ButtonSize::Small
                                        disabled=Signal::derive(move || busy.get() || available.get() <= 0.0)
                                        on_click=move |_| add(row_for_add.clone())
                                    >
                                        "Agregar"
                                    </Button>
                                </div>
                            </div>
                        }
                    }).collect_view().into_any()
                }}
            </Show>
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::parse_quantity;

    #[test]
    fn quantity_input_parsing() {
        assert_eq!(parse_quantity("2"), 2.0);
        assert_eq!(parse_quantity(" 1,5 "), 1.5);
        assert_eq!(parse_quantity("abc"), 0.0);
        assert_eq!(parse_quantity(""), 0.0);
    }
}
