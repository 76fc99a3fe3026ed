use serde::{Deserialize, Serialize};

use crate::enums::order_status::OrderStatus;
use crate::shared::dates::{is_valid_date, is_valid_time};
use crate::shared::text::any_field_matches;

pub const ORDER_LIST_LIMIT: u64 = 200;

/// Шапка заказа (pedido)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub status: OrderStatus,
    pub cliente_id: Option<String>,
    pub cliente_nombre: String,
    pub cliente_telefono: String,
    pub direccion_entrega: String,
    pub fecha_entrega: String,
    pub fecha_local: String,
    pub hora_local: String,
    pub usuario_id: String,
    pub approved_at: Option<String>,
    pub approved_by: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Строка списка `GET /pedidos`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderListRow {
    pub id: String,
    pub status: OrderStatus,
    pub cliente_nombre: String,
    pub cliente_telefono: String,
    pub direccion_entrega: String,
    pub fecha_entrega: String,
    pub created_at: String,
    pub approved_at: Option<String>,
    pub items_count: f64,
    pub total: f64,
}

impl OrderListRow {
    /// Поиск по клиенту, телефону, адресу и статусу
    pub fn matches(&self, query: &str) -> bool {
        any_field_matches(
            query,
            [
                self.cliente_nombre.as_str(),
                self.cliente_telefono.as_str(),
                self.direccion_entrega.as_str(),
                self.status.code(),
                self.status.display_name(),
            ],
        )
    }
}

/// Позиция заказа
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: String,
    pub pedido_id: String,
    pub producto_id: String,
    pub referencia: String,
    pub descripcion: String,
    pub cantidad: f64,
    pub precio: f64,
    pub created_at: String,
}

impl OrderItem {
    pub fn subtotal(&self) -> f64 {
        self.cantidad * self.precio
    }
}

/// Ответ `GET /pedidos/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetail {
    pub pedido: Order,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartOrderDto {
    #[serde(default)]
    pub cliente_id: Option<String>,
    #[serde(default)]
    pub cliente_nombre: String,
    #[serde(default)]
    pub cliente_telefono: String,
    #[serde(default)]
    pub direccion_entrega: String,
    #[serde(default)]
    pub fecha_entrega: String,
    #[serde(default)]
    pub fecha_local: Option<String>,
    #[serde(default)]
    pub hora_local: Option<String>,
}

impl StartOrderDto {
    /// Ошибки по каждому полю
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.cliente_nombre.trim().is_empty() {
            errors.push("cliente_nombre requerido".to_string());
        }
        if self.cliente_telefono.trim().is_empty() {
            errors.push("cliente_telefono requerido".to_string());
        }
        if self.direccion_entrega.trim().is_empty() {
            errors.push("direccion_entrega requerida".to_string());
        }
        if !is_valid_date(&self.fecha_entrega) {
            errors.push("fecha_entrega inválida (YYYY-MM-DD)".to_string());
        }
        if let Some(f) = self.fecha_local.as_deref().filter(|s| !s.is_empty()) {
            if !is_valid_date(f) {
                errors.push("fecha_local inválida (YYYY-MM-DD)".to_string());
            }
        }
        if let Some(h) = self.hora_local.as_deref().filter(|s| !s.is_empty()) {
            if !is_valid_time(h) {
                errors.push("hora_local inválida (HH:MM)".to_string());
            }
        }
        errors
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartOrderResponse {
    pub pedido_id: String,
}

/// Тело `POST /pedidos/{id}/items`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddItemDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub producto_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referencia: Option<String>,
    pub cantidad: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precio: Option<f64>,
}

impl AddItemDto {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !(self.cantidad.is_finite() && self.cantidad > 0.0) {
            errors.push("cantidad debe ser > 0".to_string());
        }
        let has_product = self.producto_id.as_deref().is_some_and(|s| !s.trim().is_empty())
            || self.referencia.as_deref().is_some_and(|s| !s.trim().is_empty());
        if !has_product {
            errors.push("producto_id o referencia requerido".to_string());
        }
        if let Some(p) = self.precio {
            if !p.is_finite() || p < 0.0 {
                errors.push("precio inválido".to_string());
            }
        }
        errors
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddItemResponse {
    pub ok: bool,
    pub item_id: String,
}

/// Тело `PUT /pedidos/{id}/items/{item_id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateItemDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cantidad: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precio: Option<f64>,
}

impl UpdateItemDto {
    pub fn validate(&self) -> Vec<String> {
        if self.cantidad.is_none() && self.precio.is_none() {
            return vec!["nada que actualizar".to_string()];
        }
        let mut errors = Vec::new();
        if let Some(c) = self.cantidad {
            if !(c.is_finite() && c > 0.0) {
                errors.push("cantidad debe ser > 0".to_string());
            }
        }
        if let Some(p) = self.precio {
            if !p.is_finite() || p < 0.0 {
                errors.push("precio inválido".to_string());
            }
        }
        errors
    }
}

/// Ответ на смену статуса
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub ok: bool,
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<String>,
}

impl StatusResponse {
    pub fn apply_to_order(&self, order: &mut Order) {
        order.status = self.status;
        if self.approved_at.is_some() {
            order.approved_at = self.approved_at.clone();
        }
    }

    /// Патч закэшированного списка заказов; `false`, если строки нет
    pub fn apply_to_rows(&self, rows: &mut [OrderListRow], id: &str) -> bool {
        let Some(row) = rows.iter_mut().find(|r| r.id == id) else {
            return false;
        };
        row.status = self.status;
        if self.approved_at.is_some() {
            row.approved_at = self.approved_at.clone();
        }
        true
    }
}

/// Убирает удалённый заказ из закэшированного списка
pub fn remove_order_row(rows: &mut Vec<OrderListRow>, id: &str) -> bool {
    let before = rows.len();
    rows.retain(|r| r.id != id);
    rows.len() != before
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_collects_field_errors() {
        let errors = StartOrderDto::default().validate();
        assert_eq!(
            errors,
            vec![
                "cliente_nombre requerido",
                "cliente_telefono requerido",
                "direccion_entrega requerida",
                "fecha_entrega inválida (YYYY-MM-DD)",
            ]
        );
        let ok = StartOrderDto {
            cliente_nombre: "Confecciones Sol".into(),
            cliente_telefono: "3001112233".into(),
            direccion_entrega: "Cra 50 # 10-12".into(),
            fecha_entrega: "2024-06-01".into(),
            hora_local: Some("25:00".into()),
            ..Default::default()
        };
        assert_eq!(ok.validate(), vec!["hora_local inválida (HH:MM)"]);
    }

    #[test]
    fn update_needs_something() {
        assert_eq!(UpdateItemDto::default().validate(), vec!["nada que actualizar"]);
        let dto = UpdateItemDto {
            cantidad: Some(0.0),
            precio: None,
        };
        assert_eq!(dto.validate(), vec!["cantidad debe ser > 0"]);
        let body = serde_json::to_value(UpdateItemDto {
            cantidad: Some(3.0),
            precio: None,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"cantidad": 3.0}));
    }

    #[test]
    fn add_item_validation() {
        let dto = AddItemDto {
            referencia: Some("LIN-200".into()),
            cantidad: 2.0,
            ..Default::default()
        };
        assert!(dto.validate().is_empty());
        let bad = AddItemDto {
            cantidad: -1.0,
            ..Default::default()
        };
        assert_eq!(bad.validate().len(), 2);
    }

    fn list_row(id: &str, status: OrderStatus) -> OrderListRow {
        OrderListRow {
            id: id.into(),
            status,
            cliente_nombre: "Almacén Éxito".into(),
            cliente_telefono: "604 555".into(),
            direccion_entrega: "Centro".into(),
            fecha_entrega: "2024-06-01".into(),
            created_at: String::new(),
            approved_at: None,
            items_count: 3.0,
            total: 10.0,
        }
    }

    #[test]
    fn status_change_patches_list_rows() {
        let mut rows = vec![list_row("o1", OrderStatus::Submitted), list_row("o2", OrderStatus::Draft)];
        let approved = StatusResponse {
            ok: true,
            status: OrderStatus::Approved,
            approved_at: Some("2024-06-01T10:00:00Z".into()),
        };
        assert!(approved.apply_to_rows(&mut rows, "o1"));
        assert_eq!(rows[0].status, OrderStatus::Approved);
        assert_eq!(rows[0].approved_at.as_deref(), Some("2024-06-01T10:00:00Z"));
        assert_eq!(rows[1].status, OrderStatus::Draft);
        assert!(!approved.apply_to_rows(&mut rows, "o9"));

        assert!(remove_order_row(&mut rows, "o2"));
        assert!(!remove_order_row(&mut rows, "o2"));
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn list_search_includes_status() {
        let row = list_row("o1", OrderStatus::Approved);
        assert!(row.matches("exito"));
        assert!(row.matches("aprobado"));
        assert!(row.matches("approved"));
        assert!(!row.matches("borrador"));
    }
}
