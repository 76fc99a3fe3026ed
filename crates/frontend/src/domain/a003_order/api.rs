use contracts::domain::a003_order::aggregate::{
    AddItemDto, AddItemResponse, OkResponse, OrderDetail, OrderItem, OrderListRow, StartOrderDto,
    StartOrderResponse, StatusResponse, UpdateItemDto,
};
use contracts::domain::a003_order::lines::{reconcile_after_add, Reconcile};
use serde_json::json;

use crate::shared::api_utils::{delete_json, get_json, post_json, put_json, ApiClientError};

pub async fn fetch_orders() -> Result<Vec<OrderListRow>, ApiClientError> {
    get_json("/pedidos").await
}

pub async fn fetch_order(id: &str) -> Result<OrderDetail, ApiClientError> {
    get_json(&format!("/pedidos/{}", id)).await
}

/// Создаёт черновик; возвращает id заказа
pub async fn start_order(dto: &StartOrderDto) -> Result<String, ApiClientError> {
    let response: StartOrderResponse = post_json("/pedidos/start", dto).await?;
    Ok(response.pedido_id)
}

pub async fn delete_order(id: &str) -> Result<(), ApiClientError> {
    let _: OkResponse = delete_json(&format!("/pedidos/{}", id)).await?;
    Ok(())
}

pub async fn add_item(pedido_id: &str, dto: &AddItemDto) -> Result<String, ApiClientError> {
    let response: AddItemResponse = post_json(&format!("/pedidos/{}/items", pedido_id), dto).await?;
    Ok(response.item_id)
}

pub async fn update_item(
    pedido_id: &str,
    item_id: &str,
    dto: &UpdateItemDto,
) -> Result<(), ApiClientError> {
    let _: OkResponse = put_json(&format!("/pedidos/{}/items/{}", pedido_id, item_id), dto).await?;
    Ok(())
}

pub async fn delete_item(pedido_id: &str, item_id: &str) -> Result<(), ApiClientError> {
    let _: OkResponse = delete_json(&format!("/pedidos/{}/items/{}", pedido_id, item_id)).await?;
    Ok(())
}

async fn change_status(pedido_id: &str, action: &str) -> Result<StatusResponse, ApiClientError> {
    post_json(&format!("/pedidos/{}/{}", pedido_id, action), &json!({})).await
}

pub async fn submit_order(pedido_id: &str) -> Result<StatusResponse, ApiClientError> {
    change_status(pedido_id, "submit").await
}

pub async fn approve_order(pedido_id: &str) -> Result<StatusResponse, ApiClientError> {
    change_status(pedido_id, "approve").await
}

pub async fn cancel_order(pedido_id: &str) -> Result<StatusResponse, ApiClientError> {
    change_status(pedido_id, "cancel").await
}

/// Добавляет товар и сверяет итоговое количество строки.
/// Если сервер не сложил количества, отправляется PUT с ожидаемым значением.
/// Возвращает актуальные позиции заказа.
pub async fn add_item_reconciled(
    pedido_id: &str,
    producto_id: &str,
    cantidad: f64,
    previous: f64,
) -> Result<Vec<OrderItem>, ApiClientError> {
    let dto = AddItemDto {
        producto_id: Some(producto_id.to_string()),
        cantidad,
        ..Default::default()
    };
    add_item(pedido_id, &dto).await?;

    let detail = fetch_order(pedido_id).await?;
    match reconcile_after_add(&detail.items, producto_id, previous, cantidad) {
        Reconcile::InSync => Ok(detail.items),
        Reconcile::Correct { item_id, expected } => {
            log::info!("order {}: correcting line {} to {}", pedido_id, item_id, expected);
            let fix = UpdateItemDto {
                cantidad: Some(expected),
                precio: None,
            };
            update_item(pedido_id, &item_id, &fix).await?;
            Ok(fetch_order(pedido_id).await?.items)
        }
        Reconcile::Missing => {
            log::warn!("order {}: product {} missing after add", pedido_id, producto_id);
            Ok(detail.items)
        }
    }
}
