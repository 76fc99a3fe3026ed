//! Theme management module for the application.
//!
//! Настройки оформления (режим, акцент, шрифт, скругления, масштаб) хранятся
//! в localStorage и, если пользователь вошёл в систему, дублируются на сервер
//! (`PUT /users/me/prefs`). Применяются как CSS-переменные на `<html>`
//! и атрибуты `data-theme` / `data-accent` на `<body>`.

pub mod theme_panel;

pub use theme_panel::{ThemeDrawer, ThemePanel};

use contracts::system::prefs::{clamp_ui_scale, ThemePrefs, ThemePrefsPatch, UI_SCALE_STEP};
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::window;

use crate::system::auth::{api, storage};

const PREFS_STORAGE_KEY: &str = "theme_prefs";

/// Load prefs from localStorage.
fn load_prefs_from_storage() -> ThemePrefs {
    window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(PREFS_STORAGE_KEY).ok().flatten())
        .and_then(|raw| serde_json::from_str::<serde_json::Value>(&raw).ok())
        .map(|value| ThemePrefs::from_json(&value))
        .unwrap_or_default()
}

/// Save prefs to localStorage.
fn save_prefs_to_storage(prefs: &ThemePrefs) {
    let Ok(raw) = serde_json::to_string(prefs) else {
        return;
    };
    if let Some(storage) = window().and_then(|w| w.local_storage().ok().flatten()) {
        let _ = storage.set_item(PREFS_STORAGE_KEY, &raw);
    }
}

/// CSS-переменные для корневого элемента
pub fn css_variables(prefs: &ThemePrefs) -> String {
    let mut css = format!(
        "--app-font: {}; --app-radius: {};",
        prefs.font_family(),
        prefs.radius_value()
    );
    for (name, size) in prefs.font_sizes() {
        css.push_str(&format!(" --fs-{}: {};", name, size));
        if name == "md" {
            css.push_str(&format!(" font-size: {};", size));
        }
    }
    css
}

fn apply_prefs(prefs: &ThemePrefs) {
    let document = match window().and_then(|w| w.document()) {
        Some(doc) => doc,
        None => return,
    };

    if let Some(root) = document.document_element() {
        let _ = root.set_attribute("style", &css_variables(prefs));
    }

    if let Some(body) = document.body() {
        let _ = body.set_attribute("data-theme", prefs.color_mode.as_str());
        let _ = body.set_attribute("data-accent", &prefs.accent);
    }
}

/// Theme context type.
#[derive(Clone, Copy)]
pub struct ThemeContext {
    pub prefs: RwSignal<ThemePrefs>,
}

impl ThemeContext {
    /// Применяет частичное изменение, сохраняет локально и на сервере
    pub fn update(&self, patch: ThemePrefsPatch) {
        let next = self.prefs.get_untracked().merged(&patch);
        if next == self.prefs.get_untracked() {
            return;
        }
        self.commit(next.clone());

        if storage::get_token().is_some() {
            spawn_local(async move {
                if let Err(e) = api::update_prefs(&next).await {
                    log::warn!("theme: prefs not synced: {}", e);
                }
            });
        }
    }

    /// Настройки, пришедшие с сервера при входе
    pub fn set_from_server(&self, prefs: ThemePrefs) {
        self.commit(prefs.normalized());
    }

    pub fn toggle_color_mode(&self) {
        let mode = self.prefs.get_untracked().color_mode.toggled();
        self.update(ThemePrefsPatch {
            color_mode: Some(mode),
            ..Default::default()
        });
    }

    /// Шаг масштаба интерфейса: +1 / -1
    pub fn step_scale(&self, steps: i32) {
        let current = self.prefs.get_untracked().ui_scale;
        self.update(ThemePrefsPatch {
            ui_scale: Some(clamp_ui_scale(current + steps as f64 * UI_SCALE_STEP)),
            ..Default::default()
        });
    }

    fn commit(&self, prefs: ThemePrefs) {
        save_prefs_to_storage(&prefs);
        apply_prefs(&prefs);
        self.prefs.set(prefs);
    }
}

/// Provides theme context to children components.
#[component]
pub fn ThemeProvider(children: Children) -> impl IntoView {
    let initial = load_prefs_from_storage();
    apply_prefs(&initial);

    provide_context(ThemeContext {
        prefs: RwSignal::new(initial),
    });

    children()
}

/// Hook to use the theme context.
pub fn use_theme() -> ThemeContext {
    use_context::<ThemeContext>().expect("ThemeContext not found. Wrap your app with ThemeProvider.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variables_follow_scale_and_radius() {
        let prefs = ThemePrefs {
            ui_scale: 1.25,
            radius: "xl".into(),
            ..ThemePrefs::default()
        };
        let css = css_variables(&prefs);
        assert!(css.contains("--app-radius: 0.75rem;"));
        assert!(css.contains("--fs-md: 20px;"));
        assert!(css.contains("font-size: 20px;"));
        assert!(css.contains("--fs-3xl: 35px;"));
        assert!(css.contains("--app-font: 'Inter'"));
    }
}
