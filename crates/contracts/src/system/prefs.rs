//! Пользовательские настройки оформления (accent, font, radius, scale).
//!
//! Хранятся локально в браузере и на сервере (`PUT /users/me/prefs`).
//! Любой JSON-объект нормализуется: неизвестные значения заменяются
//! значениями по умолчанию, масштаб ограничивается диапазоном.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const ACCENTS: [&str; 8] = [
    "teal", "blue", "green", "purple", "red", "orange", "cyan", "pink",
];
pub const FONTS: [&str; 5] = ["Inter", "System", "Montserrat", "Arial", "Roboto"];
pub const RADII: [&str; 5] = ["sm", "md", "lg", "xl", "2xl"];

pub const UI_SCALE_MIN: f64 = 0.85;
pub const UI_SCALE_MAX: f64 = 1.3;
pub const UI_SCALE_STEP: f64 = 0.05;

const BASE_FONT_SIZES: [(&str, f64); 7] = [
    ("xs", 12.0),
    ("sm", 14.0),
    ("md", 16.0),
    ("lg", 18.0),
    ("xl", 20.0),
    ("2xl", 24.0),
    ("3xl", 28.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Light,
    Dark,
}

impl ColorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorMode::Light => "light",
            ColorMode::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            ColorMode::Light => ColorMode::Dark,
            ColorMode::Dark => ColorMode::Light,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemePrefs {
    pub color_mode: ColorMode,
    pub accent: String,
    pub font: String,
    pub ui_scale: f64,
    pub radius: String,
}

impl Default for ThemePrefs {
    fn default() -> Self {
        Self {
            color_mode: ColorMode::Light,
            accent: "teal".to_string(),
            font: "Inter".to_string(),
            ui_scale: 1.0,
            radius: "md".to_string(),
        }
    }
}

/// Частичное обновление; `None` оставляет текущее значение
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemePrefsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_mode: Option<ColorMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ui_scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<String>,
}

impl ThemePrefs {
    /// Накладывает patch и нормализует результат
    pub fn merged(&self, patch: &ThemePrefsPatch) -> ThemePrefs {
        let mut next = self.clone();
        if let Some(mode) = patch.color_mode {
            next.color_mode = mode;
        }
        if let Some(accent) = &patch.accent {
            next.accent = accent.clone();
        }
        if let Some(font) = &patch.font {
            next.font = font.clone();
        }
        if let Some(scale) = patch.ui_scale {
            next.ui_scale = scale;
        }
        if let Some(radius) = &patch.radius {
            next.radius = radius.clone();
        }
        next.normalized()
    }

    pub fn normalized(mut self) -> ThemePrefs {
        let defaults = ThemePrefs::default();
        if !ACCENTS.contains(&self.accent.as_str()) {
            self.accent = defaults.accent;
        }
        if !FONTS.contains(&self.font.as_str()) {
            self.font = defaults.font;
        }
        if !RADII.contains(&self.radius.as_str()) {
            self.radius = defaults.radius;
        }
        self.ui_scale = clamp_ui_scale(self.ui_scale);
        self
    }

    /// Разбор произвольного JSON (с сервера или из localStorage).
    /// Неизвестные ключи игнорируются, отсутствующие берутся по умолчанию.
    pub fn from_json(value: &Value) -> ThemePrefs {
        let patch: ThemePrefsPatch = match value {
            Value::Object(map) => ThemePrefsPatch {
                color_mode: map
                    .get("colorMode")
                    .and_then(Value::as_str)
                    .and_then(|s| match s {
                        "dark" => Some(ColorMode::Dark),
                        "light" => Some(ColorMode::Light),
                        _ => None,
                    }),
                accent: map.get("accent").and_then(Value::as_str).map(str::to_string),
                font: map.get("font").and_then(Value::as_str).map(str::to_string),
                ui_scale: map.get("uiScale").and_then(Value::as_f64),
                radius: map.get("radius").and_then(Value::as_str).map(str::to_string),
            },
            _ => ThemePrefsPatch::default(),
        };
        ThemePrefs::default().merged(&patch)
    }

    pub fn scale_percent(&self) -> u32 {
        (self.ui_scale * 100.0).round() as u32
    }

    /// Размеры шрифтов в px с учётом масштаба
    pub fn font_sizes(&self) -> Vec<(&'static str, String)> {
        BASE_FONT_SIZES
            .iter()
            .map(|(name, px)| (*name, format!("{}px", (px * self.ui_scale).round() as i64)))
            .collect()
    }

    pub fn radius_value(&self) -> &'static str {
        radius_value(&self.radius)
    }

    /// CSS font-family для выбранного шрифта
    pub fn font_family(&self) -> String {
        match self.font.as_str() {
            "System" => "system-ui, -apple-system, 'Segoe UI', Roboto, sans-serif".to_string(),
            other => format!("'{}', system-ui, sans-serif", other),
        }
    }
}

pub fn clamp_ui_scale(value: f64) -> f64 {
    if value.is_nan() {
        return 1.0;
    }
    let clamped = value.clamp(UI_SCALE_MIN, UI_SCALE_MAX);
    (clamped * 100.0).round() / 100.0
}

pub fn radius_value(name: &str) -> &'static str {
    match name {
        "none" => "0",
        "sm" => "0.125rem",
        "md" => "0.375rem",
        "lg" => "0.5rem",
        "xl" => "0.75rem",
        "2xl" => "1rem",
        _ => "0.375rem",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_match_first_login_prefs() {
        let value = serde_json::to_value(ThemePrefs::default()).unwrap();
        assert_eq!(
            value,
            json!({"colorMode":"light","accent":"teal","font":"Inter","uiScale":1.0,"radius":"md"})
        );
    }

    #[test]
    fn merge_keeps_untouched_fields() {
        let base = ThemePrefs::default();
        let next = base.merged(&ThemePrefsPatch {
            accent: Some("purple".into()),
            ui_scale: Some(2.0),
            ..Default::default()
        });
        assert_eq!(next.accent, "purple");
        assert_eq!(next.font, "Inter");
        assert_eq!(next.ui_scale, UI_SCALE_MAX);
    }

    #[test]
    fn unknown_values_fall_back() {
        let prefs = ThemePrefs::from_json(&json!({
            "accent": "magenta", "font": "Roboto", "radius": "huge", "uiScale": 0.1, "extra": 1
        }));
        assert_eq!(prefs.accent, "teal");
        assert_eq!(prefs.font, "Roboto");
        assert_eq!(prefs.radius, "md");
        assert_eq!(prefs.ui_scale, UI_SCALE_MIN);
        assert_eq!(ThemePrefs::from_json(&json!("nope")), ThemePrefs::default());
    }

    #[test]
    fn font_sizes_follow_scale() {
        let prefs = ThemePrefs {
            ui_scale: 1.1,
            ..Default::default()
        };
        let sizes = prefs.font_sizes();
        assert_eq!(sizes[0], ("xs", "13px".to_string()));
        assert_eq!(sizes[2], ("md", "18px".to_string()));
        assert_eq!(sizes[6], ("3xl", "31px".to_string()));
        assert_eq!(prefs.scale_percent(), 110);
    }

    #[test]
    fn radius_table() {
        assert_eq!(radius_value("none"), "0");
        assert_eq!(radius_value("2xl"), "1rem");
        assert_eq!(ThemePrefs::default().radius_value(), "0.375rem");
    }
}
