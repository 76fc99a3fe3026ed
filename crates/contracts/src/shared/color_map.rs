//! Название цвета ткани (по-испански) -> CSS-цвет для бейджей.

use super::text::fold;

pub const FALLBACK_COLOR: &str = "#e5e7eb";

const NAME_TO_HEX: &[(&str, &str)] = &[
    ("negro", "#111827"),
    ("blanco", "#f9fafb"),
    ("gris", "#9ca3af"),
    ("gris jaspe", "#a3a3a3"),
    ("marfil", "#f2ead3"),
    ("beige", "#e7dcc5"),
    ("azul", "#2563eb"),
    ("azul oscuro", "#1e40af"),
    ("azul claro", "#93c5fd"),
    ("azul indigo", "#4f46e5"),
    ("indigo", "#4f46e5"),
    ("rojo", "#ef4444"),
    ("verde", "#22c55e"),
    ("amarillo", "#eab308"),
    ("morado", "#8b5cf6"),
    ("violeta", "#8b5cf6"),
    ("naranja", "#f97316"),
    ("rosa", "#f472b6"),
    ("cafe", "#92400e"),
    ("marron", "#92400e"),
];

const CSS_NAMED: &[(&str, &str)] = &[
    ("black", "#000000"),
    ("white", "#ffffff"),
    ("indigo", "#4f46e5"),
    ("blue", "#2563eb"),
    ("red", "#ef4444"),
    ("green", "#22c55e"),
    ("yellow", "#eab308"),
    ("purple", "#8b5cf6"),
    ("orange", "#f97316"),
    ("pink", "#f472b6"),
    ("gray", "#9ca3af"),
];

/// Известное имя -> hex, одно латинское слово -> как есть (CSS named color),
/// иначе нейтральный серый.
pub fn color_to_css(name: &str) -> String {
    let key = fold(name.trim());
    if let Some((_, hex)) = NAME_TO_HEX.iter().find(|(k, _)| *k == key) {
        return hex.to_string();
    }
    if !key.is_empty() && key.chars().all(|c| c.is_ascii_lowercase()) {
        return key;
    }
    FALLBACK_COLOR.to_string()
}

fn to_hex(color: &str) -> Option<&str> {
    let is_hex = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());
    if is_hex {
        return Some(color);
    }
    CSS_NAMED
        .iter()
        .find(|(k, _)| *k == color)
        .map(|(_, hex)| *hex)
}

/// Цвет текста поверх фона: "black" для светлых, "white" для тёмных
pub fn contrast_text_for(background: &str) -> &'static str {
    let Some(hex) = to_hex(background) else {
        return "black";
    };
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).unwrap_or(0) as f64
    };
    let (r, g, b) = (channel(1..3), channel(3..5), channel(5..7));
    let luminance = (0.299 * r + 0.587 * g + 0.114 * b) / 255.0;
    if luminance > 0.6 {
        "black"
    } else {
        "white"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spanish_names_with_accents() {
        assert_eq!(color_to_css("Azul Índigo"), "#4f46e5");
        assert_eq!(color_to_css("  Marrón "), "#92400e");
        assert_eq!(color_to_css("Café"), "#92400e");
        assert_eq!(color_to_css("gris jaspe"), "#a3a3a3");
    }

    #[test]
    fn passthrough_and_fallback() {
        assert_eq!(color_to_css("teal"), "teal");
        assert_eq!(color_to_css("verde menta"), FALLBACK_COLOR);
        assert_eq!(color_to_css(""), FALLBACK_COLOR);
        assert_eq!(color_to_css("#123456"), FALLBACK_COLOR);
    }

    #[test]
    fn contrast() {
        assert_eq!(contrast_text_for("#111827"), "white");
        assert_eq!(contrast_text_for("#f9fafb"), "black");
        assert_eq!(contrast_text_for("blue"), "white");
        assert_eq!(contrast_text_for("teal"), "black");
    }
}
