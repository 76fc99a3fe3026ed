/// Утилиты для списков: подсветка совпадений и поле поиска с debounce
use contracts::shared::text::match_ranges;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::icons::icon;

pub const SEARCH_DEBOUNCE_MS: u32 = 180;

/// Делит текст на куски `(фрагмент, совпал)` по найденным диапазонам
pub fn split_highlight(text: &str, query: &str) -> Vec<(String, bool)> {
    let mut parts = Vec::new();
    let mut last = 0;
    for (start, end) in match_ranges(text, query) {
        if start > last {
            parts.push((text[last..start].to_string(), false));
        }
        parts.push((text[start..end].to_string(), true));
        last = end;
    }
    if last < text.len() || parts.is_empty() {
        parts.push((text[last..].to_string(), false));
    }
    parts
}

/// Подсветка совпадений в тексте (без учёта регистра и диакритики)
pub fn highlight_matches(text: &str, query: &str) -> AnyView {
    let parts = split_highlight(text, query)
        .into_iter()
        .map(|(chunk, hit)| {
            if hit {
                view! { <mark class="search-hit">{chunk}</mark> }.into_any()
            } else {
                view! { <span>{chunk}</span> }.into_any()
            }
        })
        .collect::<Vec<_>>();
    view! { <>{parts}</> }.into_any()
}

/// Компонент поиска с debounce и кнопкой очистки
#[component]
pub fn SearchInput(
    /// Callback для обновления значения фильтра
    #[prop(into)]
    on_change: Callback<String>,
    /// Placeholder текст
    #[prop(optional, into)]
    placeholder: String,
    /// Задержка перед вызовом `on_change`, мс
    #[prop(default = SEARCH_DEBOUNCE_MS)]
    debounce_ms: u32,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Buscar…".to_string()
    } else {
        placeholder
    };

    // Локальное состояние для input (до debounce)
    let (input_value, set_input_value) = signal(String::new());
    // Номер последнего ввода: устаревшие таймеры ничего не делают
    let revision = StoredValue::new(0u64);

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());
        let current = revision.get_value() + 1;
        revision.set_value(current);

        spawn_local(async move {
            TimeoutFuture::new(debounce_ms).await;
            if revision.try_get_value() == Some(current) {
                on_change.run(new_value);
            }
        });
    };

    let clear_filter = move |_| {
        revision.update_value(|r| *r += 1);
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <span class="search-input__icon">{icon("search")}</span>
            <input
                type="text"
                class="search-input__field"
                placeholder=placeholder
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" on:click=clear_filter title="Limpiar">
                    {icon("x")}
                </button>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_around_folded_matches() {
        assert_eq!(
            split_highlight("Almacén Éxito", "exito"),
            vec![("Almacén ".to_string(), false), ("Éxito".to_string(), true)]
        );
        assert_eq!(
            split_highlight("Lino", ""),
            vec![("Lino".to_string(), false)]
        );
        assert_eq!(split_highlight("", "x"), vec![(String::new(), false)]);
    }
}
