use contracts::domain::a003_order::aggregate::OrderListRow;
use contracts::shared::dates::format_date;
use contracts::shared::money::{format_cop, format_quantity};
use contracts::shared::pagination::Pagination;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;
use thaw::*;

use crate::domain::a003_order::api;
use crate::domain::a003_order::ui::StatusBadge;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, SearchInput};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::query_cache::{use_query_cache, KEY_ORDERS};
use crate::system::auth::context::use_auth;

const DEFAULT_PAGE_SIZE: usize = 10;

#[component]
pub fn OrderList() -> impl IntoView {
    let auth = use_auth();
    let cache = use_query_cache();
    let navigate = StoredValue::new_local(use_navigate());

    let rows: RwSignal<Vec<OrderListRow>> = RwSignal::new(Vec::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let search = RwSignal::new(String::new());
    let pagination = RwSignal::new(Pagination::new(DEFAULT_PAGE_SIZE));

    let load_data = move || {
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::fetch_orders().await {
                Ok(data) => {
                    cache.set(KEY_ORDERS, &data);
                    rows.set(data);
                }
                Err(err) => {
                    set_error.set(Some(err.message()));
                    auth.report("No se pudieron cargar los pedidos", err);
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        cache.generation();
        match cache.get::<Vec<OrderListRow>>(KEY_ORDERS) {
            Some(data) => rows.set(data),
            None => load_data(),
        }
    });

    let filtered = Memo::new(move |_| {
        let q = search.get();
        rows.with(|all| all.iter().filter(|r| r.matches(&q)).cloned().collect::<Vec<_>>())
    });

    Effect::new(move |_| {
        let total = filtered.with(Vec::len);
        pagination.update(|p| *p = p.with_total(total));
    });

    let can_create = move || auth.profile().can_edit_orders();

    view! {
        <PageFrame page_id="a003_order--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Pedidos"</h1>
                </div>
                <div class="page__header-right">
                    <SearchInput
                        placeholder="Buscar por cliente, dirección o estado"
                        on_change=Callback::new(move |q: String| {
                            search.set(q);
                            pagination.update(|p| *p = p.with_page(0));
                        })
                    />
                    <Show when=can_create>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| {
                                navigate.with_value(|nav| nav("/pedidos/nuevo", Default::default()))
                            }
                        >
                            {icon("plus")}
                            " Nuevo pedido"
                        </Button>
                    </Show>
                </div>
            </div>

            <div class="page__content">
                {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                <Show when=move || !loading.get() fallback=|| view! { <Spinner /> }>
                    {move || {
                        let page = pagination.get();
                        let q = search.get();
                        let items = filtered.with(|all| page.slice(all).to_vec());
                        if items.is_empty() {
                            let text = if rows.with(Vec::is_empty) {
                                "No hay pedidos registrados."
                            } else {
                                "Sin resultados para tu búsqueda."
                            };
                            return view! { <div class="empty-state">{text}</div> }.into_any();
                        }
                        view! {
                            <div class="card-grid">
                                {items.into_iter().map(|row| order_card(row, &q)).collect_view()}
                            </div>
                        }.into_any()
                    }}
                </Show>

                <PaginationControls pagination=pagination />
            </div>
        </PageFrame>
    }
}

fn order_card(row: OrderListRow, query: &str) -> impl IntoView {
    let status = row.status;
    let query = query.to_string();
    view! {
        <A href=format!("/pedidos/{}", row.id)>
            <Card class="order-card">
                <div class="order-card__header">
                    <div>
                        <div class="order-card__client">{highlight_matches(&row.cliente_nombre, &query)}</div>
                        <div class="order-card__address">{highlight_matches(&row.direccion_entrega, &query)}</div>
                    </div>
                    <StatusBadge status=status />
                </div>
                <div class="order-card__meta">
                    <span>{format!("Entrega: {}", format_date(&row.fecha_entrega))}</span>
                    <span>{format!("Ítems: {}", format_quantity(row.items_count))}</span>
                    <span class="order-card__total">{format!("Total: {}", format_cop(row.total))}</span>
                </div>
            </Card>
        </A>
    }
}
