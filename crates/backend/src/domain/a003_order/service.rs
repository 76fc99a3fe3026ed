use chrono::{Local, Utc};
use contracts::domain::a002_product::aggregate::{MovementClass, DEFAULT_LOCATION};
use contracts::domain::a002_product::availability::{check_line_quantity, exceeds_available_message};
use contracts::domain::a003_order::aggregate::{
    AddItemDto, Order, OrderDetail, OrderItem, OrderListRow, StartOrderDto, StatusResponse,
    UpdateItemDto, ORDER_LIST_LIMIT,
};
use contracts::enums::order_status::OrderStatus;
use sea_orm::{ConnectionTrait, TransactionTrait};

use super::{items_repository, repository};
use crate::domain::a002_product::movements::{self, NewMovement};
use crate::domain::a002_product::repository as product_repository;
use crate::shared::error::{ApiError, ApiResult};

fn order_not_found() -> ApiError {
    ApiError::NotFound("Pedido no encontrado".to_string())
}

fn not_editable(status: OrderStatus) -> ApiError {
    ApiError::Conflict(format!(
        "El pedido no es editable (estado: {})",
        status.code()
    ))
}

async fn load<C: ConnectionTrait>(conn: &C, id: &str) -> ApiResult<Order> {
    repository::get_by_id(conn, id).await?.ok_or_else(order_not_found)
}

/// Заказ, который ещё можно менять (draft/submitted)
async fn load_editable<C: ConnectionTrait>(conn: &C, id: &str) -> ApiResult<Order> {
    let order = load(conn, id).await?;
    if !order.status.is_editable() {
        return Err(not_editable(order.status));
    }
    Ok(order)
}

/// Итоговое количество строки не должно превышать остаток минус резерв других заказов
async fn ensure_available<C: ConnectionTrait>(
    conn: &C,
    pedido_id: &str,
    producto_id: &str,
    line_quantity: f64,
) -> ApiResult<()> {
    let (stock, held) = product_repository::stock_and_held(conn, producto_id, pedido_id).await?;
    check_line_quantity(line_quantity, stock, held)
        .map_err(|available| ApiError::bad_request(exceeds_available_message(available)))
}

/// Создаёт черновик заказа
pub async fn start<C: ConnectionTrait>(conn: &C, usuario_id: &str, dto: StartOrderDto) -> ApiResult<String> {
    ApiError::check(dto.validate())?;

    let now = Utc::now().to_rfc3339();
    let local = Local::now();
    let order = Order {
        id: uuid::Uuid::new_v4().to_string(),
        status: OrderStatus::Draft,
        cliente_id: dto.cliente_id.filter(|s| !s.trim().is_empty()),
        cliente_nombre: dto.cliente_nombre.trim().to_string(),
        cliente_telefono: dto.cliente_telefono.trim().to_string(),
        direccion_entrega: dto.direccion_entrega.trim().to_string(),
        fecha_entrega: dto.fecha_entrega,
        fecha_local: dto
            .fecha_local
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| local.format("%Y-%m-%d").to_string()),
        hora_local: dto
            .hora_local
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| local.format("%H:%M").to_string()),
        usuario_id: usuario_id.to_string(),
        approved_at: None,
        approved_by: None,
        created_at: now.clone(),
        updated_at: now,
    };
    repository::insert(conn, &order).await?;
    tracing::info!("Pedido {} iniciado para {}", order.id, order.cliente_nombre);
    Ok(order.id)
}

pub async fn list<C: ConnectionTrait>(conn: &C) -> ApiResult<Vec<OrderListRow>> {
    Ok(repository::list_recent(conn, ORDER_LIST_LIMIT).await?)
}

pub async fn detail<C: ConnectionTrait>(conn: &C, id: &str) -> ApiResult<OrderDetail> {
    let pedido = load(conn, id).await?;
    let items = items_repository::list_for_order(conn, id).await?;
    Ok(OrderDetail { pedido, items })
}

pub async fn delete<C: ConnectionTrait>(conn: &C, id: &str) -> ApiResult<()> {
    load_editable(conn, id).await?;
    repository::delete(conn, id).await?;
    tracing::info!("Pedido {} eliminado", id);
    Ok(())
}

/// Добавляет товар; повторное добавление увеличивает существующую строку
pub async fn add_item<C>(conn: &C, pedido_id: &str, dto: AddItemDto) -> ApiResult<String>
where
    C: ConnectionTrait + TransactionTrait,
{
    ApiError::check(dto.validate())?;

    let txn = conn.begin().await?;
    load_editable(&txn, pedido_id).await?;
    let product = product_repository::resolve(
        &txn,
        dto.producto_id.as_deref().map(str::trim).filter(|s| !s.is_empty()),
        dto.referencia.as_deref().map(str::trim).filter(|s| !s.is_empty()),
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Producto no encontrado".to_string()))?;

    let existing = items_repository::find_by_product(&txn, pedido_id, &product.id).await?;
    let previous = existing.as_ref().map(|i| i.cantidad).unwrap_or(0.0);
    ensure_available(&txn, pedido_id, &product.id, previous + dto.cantidad).await?;

    let item_id = match existing {
        Some(line) => {
            let precio = dto.precio.unwrap_or(line.precio);
            items_repository::update_line(&txn, &line.id, previous + dto.cantidad, precio).await?;
            line.id
        }
        None => {
            let item = OrderItem {
                id: uuid::Uuid::new_v4().to_string(),
                pedido_id: pedido_id.to_string(),
                producto_id: product.id.clone(),
                referencia: product.referencia.clone(),
                descripcion: product.descripcion.clone(),
                cantidad: dto.cantidad,
                precio: dto.precio.unwrap_or(product.precio_lista),
                created_at: Utc::now().to_rfc3339(),
            };
            items_repository::insert(&txn, &item).await?;
            item.id
        }
    };
    repository::touch(&txn, pedido_id).await?;
    txn.commit().await?;
    Ok(item_id)
}

pub async fn update_item<C>(conn: &C, pedido_id: &str, item_id: &str, dto: UpdateItemDto) -> ApiResult<()>
where
    C: ConnectionTrait + TransactionTrait,
{
    ApiError::check(dto.validate())?;

    let txn = conn.begin().await?;
    load_editable(&txn, pedido_id).await?;
    let line = items_repository::get(&txn, pedido_id, item_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Ítem no encontrado".to_string()))?;

    let cantidad = dto.cantidad.unwrap_or(line.cantidad);
    if dto.cantidad.is_some() {
        ensure_available(&txn, pedido_id, &line.producto_id, cantidad).await?;
    }
    items_repository::update_line(&txn, item_id, cantidad, dto.precio.unwrap_or(line.precio)).await?;
    repository::touch(&txn, pedido_id).await?;
    txn.commit().await?;
    Ok(())
}

pub async fn delete_item<C: ConnectionTrait>(conn: &C, pedido_id: &str, item_id: &str) -> ApiResult<()> {
    load_editable(conn, pedido_id).await?;
    // Повторное удаление не ошибка: позиции уже нет
    if items_repository::delete(conn, pedido_id, item_id).await? {
        repository::touch(conn, pedido_id).await?;
    } else {
        tracing::debug!("order {}: item {} already absent", pedido_id, item_id);
    }
    Ok(())
}

fn transition_error(from: OrderStatus, to: OrderStatus) -> ApiError {
    ApiError::Conflict(format!(
        "No se puede pasar el pedido de {} a {}",
        from.code(),
        to.code()
    ))
}

/// draft -> submitted, только с позициями
pub async fn submit<C: ConnectionTrait>(conn: &C, id: &str) -> ApiResult<StatusResponse> {
    let order = load(conn, id).await?;
    if !order.status.can_transition_to(OrderStatus::Submitted) {
        return Err(transition_error(order.status, OrderStatus::Submitted));
    }
    if items_repository::list_for_order(conn, id).await?.is_empty() {
        return Err(ApiError::bad_request("El pedido no tiene ítems"));
    }
    repository::set_status(conn, id, OrderStatus::Submitted, None).await?;
    tracing::info!("Pedido {} enviado", id);
    Ok(StatusResponse {
        ok: true,
        status: OrderStatus::Submitted,
        approved_at: None,
    })
}

/// submitted -> approved. Списание со склада и смена статуса в одной транзакции.
pub async fn approve<C>(conn: &C, approver_id: &str, id: &str) -> ApiResult<StatusResponse>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = conn.begin().await?;
    let order = load(&txn, id).await?;
    if !order.status.can_transition_to(OrderStatus::Approved) {
        return Err(transition_error(order.status, OrderStatus::Approved));
    }

    let items = items_repository::list_for_order(&txn, id).await?;
    let local = Local::now();
    let fecha_local = local.format("%Y-%m-%d").to_string();
    let hora_local = local.format("%H:%M").to_string();
    for item in &items {
        movements::insert(
            &txn,
            NewMovement {
                producto_id: item.producto_id.clone(),
                cantidad: item.cantidad,
                clase: MovementClass::Salida,
                tipo: "pedido".to_string(),
                motivo: "venta".to_string(),
                usuario_id: approver_id.to_string(),
                fecha_local: fecha_local.clone(),
                hora_local: hora_local.clone(),
                ubicacion: DEFAULT_LOCATION.to_string(),
                pedido_id: Some(id.to_string()),
            },
        )
        .await?;
    }

    let approved_at = Utc::now().to_rfc3339();
    repository::set_status(&txn, id, OrderStatus::Approved, Some((approved_at.as_str(), approver_id))).await?;
    txn.commit().await?;
    tracing::info!("Pedido {} aprobado por {} ({} líneas)", id, approver_id, items.len());

    Ok(StatusResponse {
        ok: true,
        status: OrderStatus::Approved,
        approved_at: Some(approved_at),
    })
}

/// draft|submitted -> cancelled; резерв освобождается автоматически
pub async fn cancel<C: ConnectionTrait>(conn: &C, id: &str) -> ApiResult<StatusResponse> {
    let order = load(conn, id).await?;
    if !order.status.can_transition_to(OrderStatus::Cancelled) {
        return Err(transition_error(order.status, OrderStatus::Cancelled));
    }
    repository::set_status(conn, id, OrderStatus::Cancelled, None).await?;
    tracing::info!("Pedido {} cancelado", id);
    Ok(StatusResponse {
        ok: true,
        status: OrderStatus::Cancelled,
        approved_at: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_product::service::inventory_summary;
    use crate::domain::a002_product::service::test_fixtures::product_with_stock;
    use crate::shared::data::db::test_support::memory_db;
    use sea_orm::DatabaseConnection;

    fn start_dto() -> StartOrderDto {
        StartOrderDto {
            cliente_nombre: "Confecciones Sol".into(),
            cliente_telefono: "3001112233".into(),
            direccion_entrega: "Cra 50 # 10-12".into(),
            fecha_entrega: "2024-06-01".into(),
            ..Default::default()
        }
    }

    fn add(producto_id: &str, cantidad: f64) -> AddItemDto {
        AddItemDto {
            producto_id: Some(producto_id.into()),
            cantidad,
            ..Default::default()
        }
    }

    async fn setup() -> (DatabaseConnection, String, String) {
        let conn = memory_db().await;
        let producto = product_with_stock(&conn, "LIN-200", 40.0).await;
        let pedido = start(&conn, "vendedor", start_dto()).await.unwrap();
        (conn, producto, pedido)
    }

    #[tokio::test]
    async fn start_validates_and_creates_draft() {
        let conn = memory_db().await;
        assert!(matches!(
            start(&conn, "u", StartOrderDto::default()).await,
            Err(ApiError::Validation(errors)) if errors.len() == 4
        ));
        let id = start(&conn, "u", start_dto()).await.unwrap();
        let detail = detail(&conn, &id).await.unwrap();
        assert_eq!(detail.pedido.status, OrderStatus::Draft);
        assert!(detail.items.is_empty());
        assert_eq!(detail.pedido.fecha_local.len(), 10);
    }

    #[tokio::test]
    async fn adding_same_product_increases_line_and_respects_stock() {
        let (conn, producto, pedido) = setup().await;
        let first = add_item(&conn, &pedido, add(&producto, 10.0)).await.unwrap();
        let second = add_item(&conn, &pedido, add(&producto, 5.0)).await.unwrap();
        assert_eq!(first, second);

        let items = detail(&conn, &pedido).await.unwrap().items;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].cantidad, 15.0);
        assert_eq!(items[0].precio, 10000.0);

        let err = add_item(&conn, &pedido, add(&producto, 30.0)).await.unwrap_err();
        assert_eq!(err.to_string(), "Cantidad solicitada supera el disponible (40)");
    }

    #[tokio::test]
    async fn other_open_orders_hold_stock() {
        let (conn, producto, pedido) = setup().await;
        add_item(&conn, &pedido, add(&producto, 30.0)).await.unwrap();
        let other = start(&conn, "vendedor", start_dto()).await.unwrap();

        let err = add_item(&conn, &other, add(&producto, 11.0)).await.unwrap_err();
        assert_eq!(err.to_string(), "Cantidad solicitada supera el disponible (10)");

        let rows = inventory_summary(&conn, Some(&other)).await.unwrap();
        assert_eq!(rows[0].cantidad_actual, 40.0);
        assert_eq!(rows[0].cantidad_disponible, 10.0);
        // свой заказ резервом не считается
        let rows = inventory_summary(&conn, Some(&pedido)).await.unwrap();
        assert_eq!(rows[0].cantidad_disponible, 40.0);

        cancel(&conn, &pedido).await.unwrap();
        add_item(&conn, &other, add(&producto, 11.0)).await.unwrap();
    }

    #[tokio::test]
    async fn update_and_delete_items() {
        let (conn, producto, pedido) = setup().await;
        let item = add_item(&conn, &pedido, add(&producto, 2.0)).await.unwrap();

        assert!(matches!(
            update_item(&conn, &pedido, &item, UpdateItemDto::default()).await,
            Err(ApiError::Validation(_))
        ));
        update_item(
            &conn,
            &pedido,
            &item,
            UpdateItemDto {
                cantidad: Some(4.0),
                precio: Some(9000.0),
            },
        )
        .await
        .unwrap();
        let items = detail(&conn, &pedido).await.unwrap().items;
        assert_eq!((items[0].cantidad, items[0].precio), (4.0, 9000.0));

        let over = update_item(
            &conn,
            &pedido,
            &item,
            UpdateItemDto {
                cantidad: Some(41.0),
                precio: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(over, ApiError::Validation(_)));

        assert!(matches!(
            update_item(&conn, &pedido, "missing", UpdateItemDto { cantidad: Some(1.0), precio: None }).await,
            Err(ApiError::NotFound(_))
        ));
        delete_item(&conn, &pedido, &item).await.unwrap();
        assert!(detail(&conn, &pedido).await.unwrap().items.is_empty());
        delete_item(&conn, &pedido, &item).await.unwrap();
        delete_item(&conn, &pedido, "missing").await.unwrap();
        assert!(matches!(
            delete_item(&conn, "no-such-order", &item).await,
            Err(ApiError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn lifecycle_submit_approve_books_stock_exit() {
        let (conn, producto, pedido) = setup().await;
        assert!(matches!(submit(&conn, &pedido).await, Err(ApiError::Validation(_))));

        add_item(&conn, &pedido, add(&producto, 12.0)).await.unwrap();
        assert!(matches!(
            approve(&conn, "gerente", &pedido).await,
            Err(ApiError::Conflict(_))
        ));
        submit(&conn, &pedido).await.unwrap();
        let approved = approve(&conn, "gerente", &pedido).await.unwrap();
        assert_eq!(approved.status, OrderStatus::Approved);
        assert!(approved.approved_at.is_some());

        let order = detail(&conn, &pedido).await.unwrap().pedido;
        assert_eq!(order.approved_by.as_deref(), Some("gerente"));

        let booked = movements::list_for_order(&conn, &pedido).await.unwrap();
        assert_eq!(booked.len(), 1);
        assert_eq!(booked[0].clase, "salida");
        assert_eq!(booked[0].motivo, "venta");

        let rows = inventory_summary(&conn, None).await.unwrap();
        assert_eq!(rows[0].cantidad_actual, 28.0);
        assert_eq!(rows[0].cantidad_disponible, 28.0);

        let locked = add_item(&conn, &pedido, add(&producto, 1.0)).await.unwrap_err();
        assert_eq!(locked.to_string(), "El pedido no es editable (estado: approved)");
        assert!(matches!(delete(&conn, &pedido).await, Err(ApiError::Conflict(_))));
        assert!(matches!(cancel(&conn, &pedido).await, Err(ApiError::Conflict(_))));
    }

    #[tokio::test]
    async fn list_reports_counts_and_totals() {
        let (conn, producto, pedido) = setup().await;
        add_item(
            &conn,
            &pedido,
            AddItemDto {
                producto_id: Some(producto.clone()),
                cantidad: 2.5,
                precio: Some(2000.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        start(&conn, "vendedor", start_dto()).await.unwrap();

        let rows = list(&conn).await.unwrap();
        assert_eq!(rows.len(), 2);
        let row = rows.iter().find(|r| r.id == pedido).unwrap();
        assert_eq!(row.items_count, 2.5);
        assert_eq!(row.total, 5000.0);

        delete(&conn, &pedido).await.unwrap();
        assert!(matches!(detail(&conn, &pedido).await, Err(ApiError::NotFound(_))));
    }
}
