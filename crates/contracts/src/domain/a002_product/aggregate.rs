use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::shared::dates::{is_valid_date, is_valid_time};
use crate::shared::text::any_field_matches;

/// Причины движения склада
pub const MOVEMENT_MOTIVES: [&str; 5] = [
    "Ingreso de mercancía",
    "venta",
    "deterioro",
    "devolución",
    "ajuste",
];

pub const DEFAULT_MOVEMENT_TYPE: &str = "manual";
pub const DEFAULT_LOCATION: &str = "principal";

/// Товар (producto)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub referencia: String,
    pub descripcion: String,
    pub precio_lista: f64,
    #[serde(default)]
    pub caracteristicas: Map<String, Value>,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProductDto {
    pub referencia: String,
    pub descripcion: String,
    #[serde(default)]
    pub precio_lista: f64,
    #[serde(default)]
    pub caracteristicas: Map<String, Value>,
}

impl CreateProductDto {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.referencia.trim().is_empty() {
            errors.push("referencia requerida".to_string());
        }
        if self.descripcion.trim().is_empty() {
            errors.push("descripcion requerida".to_string());
        }
        if !self.precio_lista.is_finite() || self.precio_lista < 0.0 {
            errors.push("precio_lista inválido".to_string());
        }
        errors
    }
}

/// Строка `GET /inventario/resumen`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventorySummaryRow {
    pub id: String,
    pub referencia: String,
    pub descripcion: String,
    pub precio_lista: f64,
    #[serde(default)]
    pub caracteristicas: Map<String, Value>,
    pub cantidad_actual: f64,
    pub cantidad_disponible: f64,
}

impl InventorySummaryRow {
    /// `caracteristicas.color`, если есть
    pub fn color(&self) -> Option<String> {
        characteristic_text(&self.caracteristicas, "color")
    }

    /// Поиск по описанию, референсу и цвету без учёта диакритики
    pub fn matches(&self, query: &str) -> bool {
        let color = self.color().unwrap_or_default();
        any_field_matches(query, [self.descripcion.as_str(), self.referencia.as_str(), color.as_str()])
    }

    /// Все характеристики в виде пар `ключ: значение` для отображения
    pub fn characteristic_pairs(&self) -> Vec<(String, String)> {
        self.caracteristicas
            .keys()
            .filter_map(|k| characteristic_text(&self.caracteristicas, k).map(|v| (k.clone(), v)))
            .collect()
    }
}

fn characteristic_text(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key)? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
                .collect::<Vec<_>>()
                .join(", "),
        ),
        other => Some(other.to_string()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementClass {
    Entrada,
    Salida,
}

impl MovementClass {
    pub fn code(&self) -> &'static str {
        match self {
            MovementClass::Entrada => "entrada",
            MovementClass::Salida => "salida",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "entrada" => Some(MovementClass::Entrada),
            "salida" => Some(MovementClass::Salida),
            _ => None,
        }
    }
}

/// Тело `POST /inventario/movimientos`.
/// Поля свободные (строки), чтобы собрать все ошибки разом.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateMovementDto {
    #[serde(default)]
    pub producto_id: Option<String>,
    #[serde(default)]
    pub referencia: Option<String>,
    #[serde(default)]
    pub cantidad: Option<f64>,
    #[serde(default)]
    pub clase: Option<String>,
    #[serde(default)]
    pub tipo: Option<String>,
    #[serde(default)]
    pub motivo: Option<String>,
    #[serde(default)]
    pub fecha_local: Option<String>,
    #[serde(default)]
    pub hora_local: Option<String>,
    #[serde(default)]
    pub ubicacion: Option<String>,
}

/// Проверенное движение
#[derive(Debug, Clone, PartialEq)]
pub struct ValidMovement {
    pub producto_id: Option<String>,
    pub referencia: Option<String>,
    pub cantidad: f64,
    pub clase: MovementClass,
    pub tipo: String,
    pub motivo: String,
    pub fecha_local: String,
    pub hora_local: String,
    pub ubicacion: String,
}

fn non_blank(v: &Option<String>) -> Option<String> {
    v.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl CreateMovementDto {
    pub fn validate(&self) -> Result<ValidMovement, Vec<String>> {
        let mut errors = Vec::new();

        let cantidad = self.cantidad.filter(|c| c.is_finite() && *c > 0.0);
        if cantidad.is_none() {
            errors.push("cantidad debe ser un número > 0".to_string());
        }
        let clase = self.clase.as_deref().and_then(MovementClass::from_code);
        if clase.is_none() {
            errors.push("clase debe ser 'entrada' o 'salida'".to_string());
        }
        let motivo = non_blank(&self.motivo).filter(|m| MOVEMENT_MOTIVES.contains(&m.as_str()));
        if motivo.is_none() {
            errors.push("motivo inválido".to_string());
        }
        let fecha = non_blank(&self.fecha_local).filter(|f| is_valid_date(f));
        if fecha.is_none() {
            errors.push("fecha_local inválida (YYYY-MM-DD)".to_string());
        }
        let hora = non_blank(&self.hora_local).filter(|h| is_valid_time(h));
        if hora.is_none() {
            errors.push("hora_local inválida (HH:MM)".to_string());
        }
        let producto_id = non_blank(&self.producto_id);
        let referencia = non_blank(&self.referencia);
        if producto_id.is_none() && referencia.is_none() {
            errors.push("Debe enviar producto_id o referencia".to_string());
        }

        match (cantidad, clase, motivo, fecha, hora) {
            (Some(cantidad), Some(clase), Some(motivo), Some(fecha_local), Some(hora_local))
                if errors.is_empty() =>
            {
                Ok(ValidMovement {
                    producto_id,
                    referencia,
                    cantidad,
                    clase,
                    tipo: non_blank(&self.tipo).unwrap_or_else(|| DEFAULT_MOVEMENT_TYPE.to_string()),
                    motivo,
                    fecha_local,
                    hora_local,
                    ubicacion: non_blank(&self.ubicacion)
                        .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
                })
            }
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(caract: Value) -> InventorySummaryRow {
        InventorySummaryRow {
            id: "p1".into(),
            referencia: "LIN-200".into(),
            descripcion: "Lino lavado".into(),
            precio_lista: 18500.0,
            caracteristicas: caract.as_object().cloned().unwrap_or_default(),
            cantidad_actual: 40.0,
            cantidad_disponible: 30.0,
        }
    }

    #[test]
    fn search_covers_color() {
        let r = row(json!({"color": "Azul Índigo", "ancho": 1.5}));
        assert!(r.matches("indigo"));
        assert!(r.matches("lin-2"));
        assert!(r.matches("LAVADO"));
        assert!(!r.matches("rojo"));
        assert_eq!(r.color().as_deref(), Some("Azul Índigo"));
        assert_eq!(r.characteristic_pairs().len(), 2);
    }

    #[test]
    fn movement_collects_every_error() {
        let errors = CreateMovementDto::default().validate().unwrap_err();
        assert_eq!(errors.len(), 6);
    }

    #[test]
    fn movement_defaults() {
        let dto = CreateMovementDto {
            referencia: Some("LIN-200".into()),
            cantidad: Some(12.5),
            clase: Some("entrada".into()),
            motivo: Some("Ingreso de mercancía".into()),
            fecha_local: Some("2024-05-02".into()),
            hora_local: Some("08:15".into()),
            ..Default::default()
        };
        let ok = dto.validate().unwrap();
        assert_eq!(ok.tipo, "manual");
        assert_eq!(ok.ubicacion, "principal");
        assert_eq!(ok.clase, MovementClass::Entrada);
    }

    #[test]
    fn product_requires_reference_and_description() {
        let errors = CreateProductDto::default().validate();
        assert_eq!(errors.len(), 2);
    }
}
