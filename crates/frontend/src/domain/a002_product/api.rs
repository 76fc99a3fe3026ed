use contracts::domain::a002_product::aggregate::InventorySummaryRow;

use crate::shared::api_utils::{get_json, ApiClientError};

/// Сводка остатков. С `pedido_id` резерв этого заказа не вычитается.
pub async fn fetch_inventory_summary(
    pedido_id: Option<&str>,
) -> Result<Vec<InventorySummaryRow>, ApiClientError> {
    let path = match pedido_id {
        Some(id) => format!("/inventario/resumen?pedido_id={}", urlencoding::encode(id)),
        None => "/inventario/resumen".to_string(),
    };
    get_json(&path).await
}
