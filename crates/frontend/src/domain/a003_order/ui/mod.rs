pub mod details;
pub mod list;

use contracts::enums::order_status::OrderStatus;
use leptos::prelude::*;

/// Бейдж статуса заказа
#[component]
pub fn StatusBadge(#[prop(into)] status: Signal<OrderStatus>) -> impl IntoView {
    view! {
        <span class=move || format!("status-badge status-badge--{}", status.get().badge_color())>
            {move || status.get().display_name()}
        </span>
    }
}
