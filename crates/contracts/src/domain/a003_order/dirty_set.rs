use std::collections::BTreeSet;

use super::aggregate::{OrderItem, UpdateItemDto};

/// Набор id позиций с несохранёнными локальными правками.
///
/// Правка количества или цены помечает позицию; кнопка «Guardar (N)»
/// отправляет по одному PUT на каждую помеченную позицию.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirtySet {
    ids: BTreeSet<String>,
}

impl DirtySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&mut self, id: impl Into<String>) {
        self.ids.insert(id.into());
    }

    pub fn unmark(&mut self, id: &str) {
        self.ids.remove(id);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Запросы на сохранение в порядке позиций заказа
    pub fn pending_updates(&self, items: &[OrderItem]) -> Vec<(String, UpdateItemDto)> {
        items
            .iter()
            .filter(|i| self.contains(&i.id))
            .map(|i| {
                (
                    i.id.clone(),
                    UpdateItemDto {
                        cantidad: Some(i.cantidad),
                        precio: Some(i.precio),
                    },
                )
            })
            .collect()
    }

    /// Свежие позиции с сервера поверх локальных правок.
    ///
    /// Строки товара `refreshed_producto` сервер только что пересчитал:
    /// их правка сбрасывается. Остальные помеченные строки сохраняют
    /// локальные количество и цену.
    pub fn merge_fresh(
        &mut self,
        fresh: Vec<OrderItem>,
        local: &[OrderItem],
        refreshed_producto: &str,
    ) -> Vec<OrderItem> {
        let merged: Vec<OrderItem> = fresh
            .into_iter()
            .map(|item| {
                if item.producto_id == refreshed_producto || !self.contains(&item.id) {
                    return item;
                }
                match local.iter().find(|l| l.id == item.id) {
                    Some(edited) => OrderItem {
                        cantidad: edited.cantidad,
                        precio: edited.precio,
                        ..item
                    },
                    None => item,
                }
            })
            .collect();
        self.ids.retain(|id| {
            merged
                .iter()
                .any(|i| &i.id == id && i.producto_id != refreshed_producto)
        });
        merged
    }
}

/// Итог пакетного сохранения
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSaveOutcome {
    pub saved: usize,
    pub failed: Vec<String>,
}

impl BatchSaveOutcome {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Текст уведомления
    pub fn summary(&self) -> String {
        if self.failed.is_empty() {
            format!("Cambios guardados ({})", self.saved)
        } else {
            format!("No se guardaron {} ítem(s)", self.failed.len())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, cantidad: f64, precio: f64) -> OrderItem {
        OrderItem {
            id: id.into(),
            pedido_id: "o1".into(),
            producto_id: format!("p-{}", id),
            referencia: format!("REF-{}", id),
            descripcion: "Tela".into(),
            cantidad,
            precio,
            created_at: String::new(),
        }
    }

    #[test]
    fn edits_are_tracked_until_cleared() {
        let mut dirty = DirtySet::new();
        assert!(dirty.is_empty());
        dirty.mark("b");
        dirty.mark("b");
        dirty.mark("a");
        assert_eq!(dirty.len(), 2);
        assert!(dirty.contains("a"));
        dirty.unmark("a");
        assert!(!dirty.contains("a"));
        dirty.clear();
        assert!(dirty.is_empty());
    }

    #[test]
    fn only_dirty_items_are_sent_in_item_order() {
        let items = vec![item("x", 1.0, 10.0), item("y", 2.0, 20.0), item("z", 3.0, 30.0)];
        let mut dirty = DirtySet::new();
        dirty.mark("z");
        dirty.mark("x");
        let updates = dirty.pending_updates(&items);
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].0, "x");
        assert_eq!(updates[1].1.cantidad, Some(3.0));
        assert_eq!(updates[1].1.precio, Some(30.0));
    }

    #[test]
    fn fresh_lines_drop_edits_of_the_added_product() {
        // локально: x правится 1 -> 4, y правится 2 -> 9; из пикера добавили y
        let local = vec![item("x", 4.0, 10.0), item("y", 9.0, 20.0)];
        let fresh = vec![item("x", 1.0, 10.0), item("y", 5.0, 20.0), item("w", 1.0, 5.0)];
        let mut dirty = DirtySet::new();
        dirty.mark("x");
        dirty.mark("y");

        let merged = dirty.merge_fresh(fresh, &local, "p-y");
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].cantidad, 4.0);
        assert_eq!(merged[1].cantidad, 5.0);
        assert!(dirty.contains("x"));
        assert!(!dirty.contains("y"));
        assert_eq!(dirty.len(), 1);
    }

    #[test]
    fn lines_removed_on_server_leave_the_dirty_set() {
        let local = vec![item("x", 4.0, 10.0)];
        let mut dirty = DirtySet::new();
        dirty.mark("x");
        let merged = dirty.merge_fresh(vec![item("z", 2.0, 1.0)], &local, "p-z");
        assert_eq!(merged, vec![item("z", 2.0, 1.0)]);
        assert!(dirty.is_empty());
    }

    #[test]
    fn outcome_summary() {
        let ok = BatchSaveOutcome {
            saved: 3,
            failed: vec![],
        };
        assert_eq!(ok.summary(), "Cambios guardados (3)");
        let bad = BatchSaveOutcome {
            saved: 1,
            failed: vec!["a".into(), "b".into()],
        };
        assert!(!bad.is_success());
        assert_eq!(bad.summary(), "No se guardaron 2 ítem(s)");
    }
}
