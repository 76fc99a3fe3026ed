//! Поиск клиента с выпадающим списком (debounce, подсветка совпадений)

use contracts::domain::a001_client::aggregate::Client;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_client::api;
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, SEARCH_DEBOUNCE_MS};
use crate::system::auth::context::use_auth;

#[component]
pub fn ClientSelect(
    /// Выбранный клиент
    selected: RwSignal<Option<Client>>,
    #[prop(into, optional)] disabled: Signal<bool>,
) -> impl IntoView {
    let auth = use_auth();
    let query = RwSignal::new(String::new());
    let results: RwSignal<Vec<Client>> = RwSignal::new(Vec::new());
    let open = RwSignal::new(false);
    let loading = RwSignal::new(false);
    let revision = StoredValue::new(0u64);

    let run_search = move |text: String| {
        let current = revision.get_value() + 1;
        revision.set_value(current);
        spawn_local(async move {
            TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
            if revision.try_get_value() != Some(current) {
                return;
            }
            loading.set(true);
            let result = api::search_clients(&text).await;
            // Ответ на устаревший запрос не перетирает свежий
            if revision.try_get_value() != Some(current) {
                return;
            }
            match result {
                Ok(list) => results.set(list),
                Err(err) => {
                    results.set(Vec::new());
                    auth.report("No se pudo buscar clientes", err);
                }
            }
            loading.set(false);
        });
    };

    let on_input = move |ev| {
        let text = event_target_value(&ev);
        query.set(text.clone());
        open.set(true);
        run_search(text);
    };

    let choose = move |client: Client| {
        query.set(client.nombre.clone());
        selected.set(Some(client));
        open.set(false);
    };

    let clear = move |_| {
        revision.update_value(|r| *r += 1);
        loading.set(false);
        query.set(String::new());
        results.set(Vec::new());
        selected.set(None);
        open.set(false);
    };

    view! {
        <div class="client-select">
            <div class="search-input">
                <span class="search-input__icon">{icon("search")}</span>
                <input
                    type="text"
                    class="search-input__field"
                    placeholder="Buscar cliente…"
                    prop:value=move || query.get()
                    prop:disabled=move || disabled.get()
                    on:input=on_input
                    on:focus=move |_| {
                        open.set(true);
                        if results.with_untracked(Vec::is_empty) {
                            run_search(query.get_untracked());
                        }
                    }
                />
                <Show when=move || !query.get().is_empty() || selected.with(Option::is_some)>
                    <button class="search-input__clear" title="Limpiar" on:click=clear>
                        {icon("x")}
                        <span>"Limpiar"</span>
                    </button>
                </Show>
            </div>

            <Show when=move || open.get() && !disabled.get()>
                <div class="client-select__dropdown">
                    {move || {
                        if loading.get() {
                            return view! { <div class="client-select__status"><Spinner size=SpinnerSize::Tiny /></div> }.into_any();
                        }
                        let list = results.get();
                        let q = query.get();
                        if list.is_empty() {
                            let text = if q.trim().is_empty() {
                                "Escribe para buscar.".to_string()
                            } else {
                                format!("Sin resultados para “{}”.", q.trim())
                            };
                            return view! { <div class="client-select__status">{text}</div> }.into_any();
                        }
                        list.into_iter().map(|client| {
                            let subtitle = client.subtitle();
                            let title = highlight_matches(&client.nombre, &q);
                            let sub = highlight_matches(&subtitle, &q);
                            view! {
                                <button
                                    type="button"
                                    class="client-select__option"
                                    on:click=move |_| choose(client.clone())
                                >
                                    <div class="client-select__name">{title}</div>
                                    <div class="client-select__subtitle">{sub}</div>
                                </button>
                            }
                        }).collect_view().into_any()
                    }}
                </div>
            </Show>
        </div>
    }
}
