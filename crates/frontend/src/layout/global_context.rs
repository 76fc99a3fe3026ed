use leptos::prelude::*;

/// Состояние оболочки приложения: боковое меню и панель темы
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub sidebar_open: RwSignal<bool>,
    pub theme_drawer_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            sidebar_open: RwSignal::new(false),
            theme_drawer_open: RwSignal::new(false),
        }
    }

    pub fn toggle_sidebar(&self) {
        self.sidebar_open.update(|val| *val = !*val);
    }

    /// На мобильных меню закрывается после перехода
    pub fn close_sidebar(&self) {
        self.sidebar_open.set(false);
    }

    pub fn open_theme_drawer(&self) {
        self.theme_drawer_open.set(true);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_global_context() -> AppGlobalContext {
    use_context::<AppGlobalContext>().expect("AppGlobalContext not found")
}
