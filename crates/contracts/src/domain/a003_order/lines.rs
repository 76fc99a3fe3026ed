//! Итоги по позициям и сверка количества после добавления из пикера.

use super::aggregate::OrderItem;

pub const SUMMARY_PREVIEW_LEN: usize = 3;

/// Количество этого товара, уже лежащее в заказе
pub fn quantity_in_order(items: &[OrderItem], producto_id: &str) -> f64 {
    items
        .iter()
        .filter(|i| i.producto_id == producto_id)
        .map(|i| i.cantidad)
        .sum()
}

pub fn total_units(items: &[OrderItem]) -> f64 {
    items.iter().map(|i| i.cantidad).sum()
}

pub fn total_amount(items: &[OrderItem]) -> f64 {
    items.iter().map(OrderItem::subtotal).sum()
}

/// Результат сверки после `POST .../items`.
///
/// Если сервер вернул строку с количеством, отличным от `prev + added`,
/// мастер отправляет PUT с ожидаемым значением.
#[derive(Debug, Clone, PartialEq)]
pub enum Reconcile {
    InSync,
    Correct { item_id: String, expected: f64 },
    Missing,
}

pub fn reconcile_after_add(
    items_after: &[OrderItem],
    producto_id: &str,
    previous: f64,
    added: f64,
) -> Reconcile {
    let expected = previous + added;
    match items_after.iter().find(|i| i.producto_id == producto_id) {
        None => Reconcile::Missing,
        Some(line) if (line.cantidad - expected).abs() < 1e-9 => Reconcile::InSync,
        Some(line) => Reconcile::Correct {
            item_id: line.id.clone(),
            expected,
        },
    }
}

/// Первые позиции для итогового экрана и хвост «+N más»
pub fn summary_preview(items: &[OrderItem]) -> (&[OrderItem], Option<String>) {
    let shown = &items[..items.len().min(SUMMARY_PREVIEW_LEN)];
    let rest = items.len().saturating_sub(SUMMARY_PREVIEW_LEN);
    let more = if rest > 0 {
        Some(format!("+{} más", rest))
    } else {
        None
    };
    (shown, more)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, producto: &str, cantidad: f64, precio: f64) -> OrderItem {
        OrderItem {
            id: id.into(),
            pedido_id: "o1".into(),
            producto_id: producto.into(),
            referencia: String::new(),
            descripcion: String::new(),
            cantidad,
            precio,
            created_at: String::new(),
        }
    }

    #[test]
    fn totals() {
        let items = vec![item("1", "a", 2.0, 1000.0), item("2", "b", 0.5, 3000.0)];
        assert_eq!(total_units(&items), 2.5);
        assert_eq!(total_amount(&items), 3500.0);
        assert_eq!(quantity_in_order(&items, "b"), 0.5);
        assert_eq!(quantity_in_order(&items, "zzz"), 0.0);
    }

    #[test]
    fn reconcile_detects_server_drift() {
        let after = vec![item("1", "a", 5.0, 1.0)];
        assert_eq!(reconcile_after_add(&after, "a", 2.0, 3.0), Reconcile::InSync);
        assert_eq!(
            reconcile_after_add(&after, "a", 4.0, 3.0),
            Reconcile::Correct {
                item_id: "1".into(),
                expected: 7.0
            }
        );
        assert_eq!(reconcile_after_add(&after, "b", 0.0, 1.0), Reconcile::Missing);
    }

    #[test]
    fn unsaved_edit_does_not_leak_into_reconcile() {
        // на сервере 5, локально не сохранено 8, добавили 2; сервер вернул 7
        let server = vec![item("1", "a", 5.0, 1.0)];
        let local = vec![item("1", "a", 8.0, 1.0)];
        let after = vec![item("1", "a", 7.0, 1.0)];
        let previous = quantity_in_order(&server, "a");
        assert_eq!(reconcile_after_add(&after, "a", previous, 2.0), Reconcile::InSync);
        // с локальным количеством мастер отправил бы PUT на 10
        assert!(matches!(
            reconcile_after_add(&after, "a", quantity_in_order(&local, "a"), 2.0),
            Reconcile::Correct { .. }
        ));
    }

    #[test]
    fn preview_shows_three_and_counts_rest() {
        let items: Vec<_> = (0..5).map(|i| item(&i.to_string(), "p", 1.0, 1.0)).collect();
        let (shown, more) = summary_preview(&items);
        assert_eq!(shown.len(), 3);
        assert_eq!(more.as_deref(), Some("+2 más"));
        let (shown, more) = summary_preview(&items[..2]);
        assert_eq!(shown.len(), 2);
        assert!(more.is_none());
    }
}
