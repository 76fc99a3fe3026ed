//! Индикатор доступности API: базовый адрес и ручной ping `/health`

use crate::shared::api_utils::{api_base, ping_health, ApiClientError};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Текст статуса после ping
pub fn health_label(result: &Result<u16, ApiClientError>) -> String {
    match result {
        Ok(status) if (200..300).contains(status) => "ok ✅".to_string(),
        Ok(status) => format!("HTTP {}", status),
        Err(_) => "ERR".to_string(),
    }
}

#[component]
pub fn ApiStatusBadge() -> impl IntoView {
    let base = api_base();
    let status = RwSignal::new(None::<String>);
    let checking = RwSignal::new(false);

    let ping = move |_| {
        checking.set(true);
        spawn_local(async move {
            let result = ping_health().await;
            if let Err(err) = &result {
                log::warn!("api status: {}", err);
            }
            status.set(Some(health_label(&result)));
            checking.set(false);
        });
    };

    view! {
        <div class="api-status">
            <span class="api-status__base" title=base.clone()>{format!("API: {}", base)}</span>
            <Button
                appearance=ButtonAppearance::Subtle
                size=ButtonSize::Small
                on_click=ping
                disabled=Signal::derive(move || checking.get())
            >
                "Ping /health"
            </Button>
            {move || status.get().map(|s| view! { <span class="api-status__result">{s}</span> })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(health_label(&Ok(200)), "ok ✅");
        assert_eq!(health_label(&Ok(503)), "HTTP 503");
        assert_eq!(
            health_label(&Err(ApiClientError::Network("down".into()))),
            "ERR"
        );
    }
}
