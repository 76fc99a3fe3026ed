pub mod list;
pub mod picker;

use contracts::domain::a002_product::aggregate::InventorySummaryRow;
use contracts::shared::color_map::{color_to_css, contrast_text_for};
use leptos::prelude::*;

/// `ancho` -> `Ancho`
pub fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Чипы характеристик; цвет показывается образцом
#[component]
pub fn CharacteristicChips(row: InventorySummaryRow) -> impl IntoView {
    let pairs = row.characteristic_pairs();
    if pairs.is_empty() {
        return ().into_any();
    }
    view! {
        <div class="chips">
            {pairs.into_iter().map(|(key, value)| {
                if key == "color" {
                    let bg = color_to_css(&value);
                    let fg = contrast_text_for(&bg);
                    view! {
                        <span class="chip chip--color" style=format!("background:{};color:{}", bg, fg)>
                            <span class="chip__swatch" style=format!("background:{}", bg)></span>
                            {value}
                        </span>
                    }.into_any()
                } else {
                    view! {
                        <span class="chip">{format!("{}: {}", capitalize(&key), value)}</span>
                    }.into_any()
                }
            }).collect_view()}
        </div>
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::capitalize;

    #[test]
    fn capitalizes_first_letter() {
        assert_eq!(capitalize("ancho"), "Ancho");
        assert_eq!(capitalize("éxito"), "Éxito");
        assert_eq!(capitalize(""), "");
    }
}
