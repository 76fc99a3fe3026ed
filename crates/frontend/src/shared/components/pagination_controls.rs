use crate::shared::icons::icon;
use contracts::shared::pagination::Pagination;
use leptos::prelude::*;

pub const DEFAULT_PAGE_SIZES: &[usize] = &[5, 10, 15];

/// "a–b de N" для текущей страницы (позиции с единицы)
pub fn range_label(p: &Pagination) -> String {
    let (start, end) = p.bounds();
    if p.total_count == 0 {
        "0 de 0".to_string()
    } else {
        format!("{}–{} de {}", start + 1, end, p.total_count)
    }
}

pub fn page_label(p: &Pagination) -> String {
    format!("Página {} de {}", p.page + 1, p.total_pages())
}

/// PaginationControls component - reusable pagination controls
///
/// Состояние целиком в `Pagination`; итог (`total_count`) обновляет сам список.
#[component]
pub fn PaginationControls(
    pagination: RwSignal<Pagination>,

    /// Текст перед диапазоном, например "Mostrando"
    #[prop(optional)]
    prefix: &'static str,

    /// Available page size options (defaults to 5/10/15)
    #[prop(optional)]
    page_size_options: Option<Vec<usize>>,
) -> impl IntoView {
    let page_size_opts = page_size_options.unwrap_or_else(|| DEFAULT_PAGE_SIZES.to_vec());

    let at_first = move || pagination.with(|p| p.page == 0);
    let at_last = move || pagination.with(|p| p.page + 1 >= p.total_pages());

    view! {
        <div class="pagination-controls">
            <span class="pagination-range">
                {move || {
                    let label = pagination.with(range_label);
                    if prefix.is_empty() { label } else { format!("{prefix} {label}") }
                }}
            </span>
            <label class="pagination-size">
                "Mostrar"
                <select
                    class="page-size-select"
                    on:change=move |ev| {
                        if let Ok(size) = event_target_value(&ev).parse::<usize>() {
                            pagination.update(|p| *p = p.with_page_size(size));
                        }
                    }
                    prop:value=move || pagination.with(|p| p.page_size.to_string())
                >
                    {page_size_opts.iter().map(|&size| {
                        view! {
                            <option
                                value=size.to_string()
                                selected=move || pagination.with(|p| p.page_size == size)
                            >
                                {size.to_string()}
                            </option>
                        }
                    }).collect_view()}
                </select>
            </label>
            <div class="pagination-nav">
                <button
                    class="pagination-btn"
                    on:click=move |_| pagination.update(|p| *p = p.with_page(p.page.saturating_sub(1)))
                    disabled=at_first
                >
                    {icon("chevron-left")}
                    "Anterior"
                </button>
                <span class="pagination-info">{move || pagination.with(page_label)}</span>
                <button
                    class="pagination-btn"
                    on:click=move |_| pagination.update(|p| *p = p.with_page(p.page + 1))
                    disabled=at_last
                >
                    "Siguiente"
                    {icon("chevron-right")}
                </button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        let p = Pagination::new(5).with_total(12).with_page(2);
        assert_eq!(range_label(&p), "11–12 de 12");
        assert_eq!(page_label(&p), "Página 3 de 3");
        assert_eq!(range_label(&Pagination::new(10)), "0 de 0");
        assert_eq!(page_label(&Pagination::new(10)), "Página 1 de 1");
    }
}
