use contracts::domain::a002_product::aggregate::InventorySummaryRow;
use contracts::shared::money::{format_cop, format_quantity};
use contracts::shared::pagination::Pagination;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::CharacteristicChips;
use crate::domain::a002_product::api;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::list_utils::{highlight_matches, SearchInput};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::query_cache::{use_query_cache, KEY_INVENTORY};
use crate::system::auth::context::use_auth;

const DEFAULT_PAGE_SIZE: usize = 10;

/// «Inventario»: остатки с поиском и постраничным выводом
#[component]
pub fn InventoryList() -> impl IntoView {
    let auth = use_auth();
    let cache = use_query_cache();

    let rows: RwSignal<Vec<InventorySummaryRow>> = RwSignal::new(Vec::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let search = RwSignal::new(String::new());
    let pagination = RwSignal::new(Pagination::new(DEFAULT_PAGE_SIZE));

    let load_data = move || {
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::fetch_inventory_summary(None).await {
                Ok(data) => {
                    log::debug!("inventory: {} rows", data.len());
                    cache.set(KEY_INVENTORY, &data);
                    rows.set(data);
                }
                Err(err) => {
                    set_error.set(Some(err.message()));
                    if err.is_unauthorized() {
                        auth.report("No se pudo cargar el inventario", err);
                    }
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        cache.generation();
        match cache.get::<Vec<InventorySummaryRow>>(KEY_INVENTORY) {
            Some(data) => rows.set(data),
            None => load_data(),
        }
    });

    let filtered = Memo::new(move |_| {
        let q = search.get();
        rows.with(|all| all.iter().filter(|r| r.matches(&q)).cloned().collect::<Vec<_>>())
    });

    // Итог и поджатие страницы при смене фильтра
    Effect::new(move |_| {
        let total = filtered.with(Vec::len);
        pagination.update(|p| *p = p.with_total(total));
    });

    let on_search = Callback::new(move |q: String| {
        search.set(q);
        pagination.update(|p| *p = p.with_page(0));
    });

    view! {
        <PageFrame page_id="a002_product--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Inventario"</h1>
                </div>
                <div class="page__header-right">
                    <SearchInput
                        placeholder="Buscar por descripción, referencia o color"
                        on_change=on_search
                    />
                </div>
            </div>

            <div class="page__content">
                {move || error.get().map(|e| view! { <div class="alert alert--error">{format!("Error: {}", e)}</div> })}

                <Show when=move || !loading.get() fallback=|| view! { <Spinner /> }>
                    {move || {
                        let page = pagination.get();
                        let q = search.get();
                        let items = filtered.with(|all| page.slice(all).to_vec());
                        if items.is_empty() {
                            return view! { <div class="empty-state">"No hay resultados."</div> }.into_any();
                        }
                        view! {
                            <div class="card-grid">
                                {items.into_iter().map(|row| inventory_card(row, &q)).collect_view()}
                            </div>
                        }.into_any()
                    }}
                </Show>

                <PaginationControls pagination=pagination prefix="Mostrando" />
            </div>
        </PageFrame>
    }
}

fn inventory_card(row: InventorySummaryRow, query: &str) -> impl IntoView {
    let available = row.cantidad_disponible;
    let query = query.to_string();
    view! {
        <Card class="inventory-card">
            <div class="inventory-card__header">
                <div>
                    <div class="inventory-card__title">{highlight_matches(&row.descripcion, &query)}</div>
                    <div class="inventory-card__ref">"Ref: " {highlight_matches(&row.referencia, &query)}</div>
                </div>
                <div class="inventory-card__stock" class:inventory-card__stock--empty=available <= 0.0>
                    <span class="inventory-card__stock-value">{format_quantity(available)}</span>
                    <span class="inventory-card__stock-label">"disponible"</span>
                </div>
            </div>
            <div class="inventory-card__section">
                <span class="inventory-card__label">"Características"</span>
                <CharacteristicChips row=row.clone() />
            </div>
            <div class="inventory-card__footer">
                <span class="inventory-card__label">"Precio de lista"</span>
                <span class="inventory-card__price">{format_cop(row.precio_lista)}</span>
            </div>
        </Card>
    }
}
