//! Шаги мастера и чистые помощники итогового экрана

use contracts::domain::a003_order::aggregate::OrderItem;
use contracts::domain::a003_order::lines::{total_amount, total_units};
use contracts::shared::dates::format_date;
use contracts::shared::money::{format_cop, format_quantity};

use crate::shared::export::CsvExportable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Client,
    Items,
    Done,
}

impl WizardStep {
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::Client => 1,
            WizardStep::Items => 2,
            WizardStep::Done => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WizardStep::Client => "Cliente",
            WizardStep::Items => "Artículos",
            WizardStep::Done => "Listo",
        }
    }

    pub fn all() -> [WizardStep; 3] {
        [WizardStep::Client, WizardStep::Items, WizardStep::Done]
    }
}

/// Короткий номер заказа для людей: первые 8 символов id
pub fn order_ref(id: &str) -> String {
    id.chars().take(8).collect::<String>().to_uppercase()
}

/// Данные клиента подставляются только в пустые поля
pub fn fill_if_empty(current: &str, candidate: &str) -> Option<String> {
    if current.trim().is_empty() && !candidate.trim().is_empty() {
        Some(candidate.trim().to_string())
    } else {
        None
    }
}

/// Шапка итогового экрана
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderSummary {
    pub pedido_id: String,
    pub cliente_nombre: String,
    pub cliente_email: Option<String>,
    pub direccion_entrega: String,
    pub fecha_entrega: String,
}

impl OrderSummary {
    /// Текст письма: шапка и строки заказа
    pub fn mail_body(&self, items: &[OrderItem]) -> String {
        let mut lines = vec![
            format!("Pedido {}", order_ref(&self.pedido_id)),
            format!("Cliente: {}", self.cliente_nombre),
            format!("Dirección: {}", self.direccion_entrega),
            format!("Entrega: {}", format_date(&self.fecha_entrega)),
            String::new(),
        ];
        for item in items {
            lines.push(format!(
                "- {} ({}) x {} = {}",
                item.descripcion,
                item.referencia,
                format_quantity(item.cantidad),
                format_cop(item.subtotal())
            ));
        }
        lines.push(String::new());
        lines.push(format!("Ítems: {}", format_quantity(total_units(items))));
        lines.push(format!("Total: {}", format_cop(total_amount(items))));
        lines.join("\n")
    }

    pub fn mailto_link(&self, items: &[OrderItem]) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            self.cliente_email.as_deref().unwrap_or_default(),
            urlencoding::encode(&format!("Pedido {}", order_ref(&self.pedido_id))),
            urlencoding::encode(&self.mail_body(items))
        )
    }

    pub fn csv_filename(&self) -> String {
        format!("pedido_{}.csv", order_ref(&self.pedido_id).to_lowercase())
    }
}

/// Строки заказа для «Descargar»
impl CsvExportable for OrderItem {
    fn headers() -> Vec<&'static str> {
        vec!["Referencia", "Descripción", "Cantidad", "Precio", "Subtotal"]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.referencia.clone(),
            self.descripcion.clone(),
            self.cantidad.to_string(),
            self.precio.to_string(),
            self.subtotal().to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(cantidad: f64, precio: f64) -> OrderItem {
        OrderItem {
            id: "i1".into(),
            pedido_id: "3f2a9c1e-0000".into(),
            producto_id: "p1".into(),
            referencia: "LIN-01".into(),
            descripcion: "Lino crudo".into(),
            cantidad,
            precio,
            created_at: String::new(),
        }
    }

    fn summary() -> OrderSummary {
        OrderSummary {
            pedido_id: "3f2a9c1e-0000".into(),
            cliente_nombre: "Textiles Andinos".into(),
            cliente_email: Some("compras@andinos.co".into()),
            direccion_entrega: "Calle 10".into(),
            fecha_entrega: "2024-03-05".into(),
        }
    }

    #[test]
    fn steps_are_numbered() {
        let numbers: Vec<u8> = WizardStep::all().iter().map(WizardStep::number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn order_reference() {
        assert_eq!(order_ref("3f2a9c1e-0000"), "3F2A9C1E");
        assert_eq!(order_ref("ab"), "AB");
    }

    #[test]
    fn client_data_fills_only_empty_fields() {
        assert_eq!(fill_if_empty("", " 300 "), Some("300".to_string()));
        assert_eq!(fill_if_empty("301", "300"), None);
        assert_eq!(fill_if_empty(" ", ""), None);
    }

    #[test]
    fn mail_body_lists_lines_and_totals() {
        let body = summary().mail_body(&[item(2.0, 15000.0)]);
        assert!(body.starts_with("Pedido 3F2A9C1E\nCliente: Textiles Andinos"));
        assert!(body.contains("Entrega: 05.03.2024"));
        assert!(body.contains("- Lino crudo (LIN-01) x 2 = $ 30.000"));
        assert!(body.ends_with("Total: $ 30.000"));
    }

    #[test]
    fn csv_rows_carry_subtotal() {
        let csv = crate::shared::export::build_csv(&[item(2.5, 1000.0)]);
        assert!(csv.contains("Referencia;Descripción;Cantidad;Precio;Subtotal\n"));
        assert!(csv.ends_with("LIN-01;Lino crudo;2.5;1000;2500\n"));
    }

    #[test]
    fn mailto_is_encoded() {
        let link = summary().mailto_link(&[]);
        assert!(link.starts_with("mailto:compras@andinos.co?subject=Pedido%203F2A9C1E&body="));
        assert!(!link.contains('\n'));
        assert_eq!(summary().csv_filename(), "pedido_3f2a9c1e.csv");
    }
}
