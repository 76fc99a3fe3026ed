use contracts::system::prefs::{radius_value, ColorMode, ThemePrefsPatch, ACCENTS, FONTS, RADII};
use leptos::prelude::*;
use thaw::*;

use super::use_theme;
use crate::shared::icons::icon;

/// Настройки оформления: режим, палитра, шрифт, скругления, масштаб.
/// Используется в выдвижной панели и на вкладке «General» настроек.
#[component]
pub fn ThemePanel() -> impl IntoView {
    let theme = use_theme();

    let dark = RwSignal::new(theme.prefs.get_untracked().color_mode == ColorMode::Dark);
    Effect::new(move |_| {
        let wanted = if dark.get() { ColorMode::Dark } else { ColorMode::Light };
        if theme.prefs.get_untracked().color_mode != wanted {
            theme.update(ThemePrefsPatch {
                color_mode: Some(wanted),
                ..Default::default()
            });
        }
    });
    // режим может смениться снаружи (вход, кнопка в шапке)
    Effect::new(move |_| {
        let is_dark = theme.prefs.with(|p| p.color_mode == ColorMode::Dark);
        if dark.get_untracked() != is_dark {
            dark.set(is_dark);
        }
    });

    view! {
        <div class="theme-panel">
            <section class="theme-panel__section">
                <Switch checked=dark label="Modo oscuro" />
            </section>

            <section class="theme-panel__section">
                <div class="theme-panel__label">"Paleta de color"</div>
                <div class="theme-panel__grid">
                    {ACCENTS.iter().map(|&accent| {
                        let selected = move || theme.prefs.with(|p| p.accent == accent);
                        view! {
                            <button
                                class=move || if selected() { "swatch swatch--selected" } else { "swatch" }
                                data-accent=accent
                                title=accent
                                aria-label=accent
                                on:click=move |_| theme.update(ThemePrefsPatch {
                                    accent: Some(accent.to_string()),
                                    ..Default::default()
                                })
                            ></button>
                        }
                    }).collect_view()}
                </div>
            </section>

            <section class="theme-panel__section">
                <div class="theme-panel__label">"Tipografía"</div>
                <div class="theme-panel__grid">
                    {FONTS.iter().map(|&font| {
                        let selected = move || theme.prefs.with(|p| p.font == font);
                        let family = if font == "System" { "system-ui".to_string() } else { format!("'{}'", font) };
                        view! {
                            <button
                                class=move || if selected() { "theme-option theme-option--selected" } else { "theme-option" }
                                on:click=move |_| theme.update(ThemePrefsPatch {
                                    font: Some(font.to_string()),
                                    ..Default::default()
                                })
                            >
                                <span class="theme-option__sample" style=format!("font-family: {};", family)>"Ag"</span>
                                <span class="theme-option__caption">{font}</span>
                            </button>
                        }
                    }).collect_view()}
                </div>
            </section>

            <section class="theme-panel__section">
                <div class="theme-panel__label">"Bordes"</div>
                <div class="theme-panel__grid">
                    {RADII.iter().map(|&radius| {
                        let selected = move || theme.prefs.with(|p| p.radius == radius);
                        view! {
                            <button
                                class=move || if selected() { "theme-option theme-option--selected" } else { "theme-option" }
                                on:click=move |_| theme.update(ThemePrefsPatch {
                                    radius: Some(radius.to_string()),
                                    ..Default::default()
                                })
                            >
                                <span
                                    class="theme-option__corner"
                                    style=format!("border-top-right-radius: {};", radius_value(radius))
                                ></span>
                                <span class="theme-option__caption">{radius}</span>
                            </button>
                        }
                    }).collect_view()}
                </div>
            </section>

            <section class="theme-panel__section">
                <div class="theme-panel__label">"Tamaño de la interfaz"</div>
                <Flex gap=FlexGap::Small align=FlexAlign::Center>
                    <Button size=ButtonSize::Small on_click=move |_| theme.step_scale(-1)>"−"</Button>
                    <span class="theme-panel__scale">
                        {move || format!("{}%", theme.prefs.with(|p| p.scale_percent()))}
                    </span>
                    <Button size=ButtonSize::Small on_click=move |_| theme.step_scale(1)>"+"</Button>
                </Flex>
                <div class="theme-panel__hint">"Ajusta el tamaño general de la interfaz."</div>
            </section>
        </div>
    }
}

/// Выдвижная панель темы справа
#[component]
pub fn ThemeDrawer(open: RwSignal<bool>) -> impl IntoView {
    view! {
        <Show when=move || open.get()>
            <div class="drawer-overlay" on:click=move |_| open.set(false)>
                <aside class="drawer" on:click=move |ev| ev.stop_propagation()>
                    <div class="drawer__header">
                        <h2 class="drawer__title">"Tema"</h2>
                        <button class="button button--icon" title="Cerrar" on:click=move |_| open.set(false)>
                            {icon("x")}
                        </button>
                    </div>
                    <div class="drawer__body">
                        <ThemePanel />
                    </div>
                </aside>
            </div>
        </Show>
    }
}
