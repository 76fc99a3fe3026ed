use contracts::domain::a003_order::aggregate::{Order, OrderListRow};
use contracts::enums::order_status::OrderStatus;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{DatabaseBackend, QueryResult, Set, Statement};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a003_pedidos")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub status: String,
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

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn parse_status(code: &str) -> OrderStatus {
    OrderStatus::from_code(code).unwrap_or_else(|| {
        tracing::warn!("Unknown order status '{}', treating as draft", code);
        OrderStatus::Draft
    })
}

impl From<Model> for Order {
    fn from(m: Model) -> Self {
        Order {
            status: parse_status(&m.status),
            id: m.id,
            cliente_id: m.cliente_id,
            cliente_nombre: m.cliente_nombre,
            cliente_telefono: m.cliente_telefono,
            direccion_entrega: m.direccion_entrega,
            fecha_entrega: m.fecha_entrega,
            fecha_local: m.fecha_local,
            hora_local: m.hora_local,
            usuario_id: m.usuario_id,
            approved_at: m.approved_at,
            approved_by: m.approved_by,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

pub async fn insert<C: ConnectionTrait>(conn: &C, order: &Order) -> anyhow::Result<()> {
    let active = ActiveModel {
        id: Set(order.id.clone()),
        status: Set(order.status.code().to_string()),
        cliente_id: Set(order.cliente_id.clone()),
        cliente_nombre: Set(order.cliente_nombre.clone()),
        cliente_telefono: Set(order.cliente_telefono.clone()),
        direccion_entrega: Set(order.direccion_entrega.clone()),
        fecha_entrega: Set(order.fecha_entrega.clone()),
        fecha_local: Set(order.fecha_local.clone()),
        hora_local: Set(order.hora_local.clone()),
        usuario_id: Set(order.usuario_id.clone()),
        approved_at: Set(order.approved_at.clone()),
        approved_by: Set(order.approved_by.clone()),
        created_at: Set(order.created_at.clone()),
        updated_at: Set(order.updated_at.clone()),
    };
    active.insert(conn).await?;
    Ok(())
}

pub async fn get_by_id<C: ConnectionTrait>(conn: &C, id: &str) -> anyhow::Result<Option<Order>> {
    Ok(Entity::find_by_id(id.to_string()).one(conn).await?.map(Into::into))
}

fn list_row(row: &QueryResult) -> anyhow::Result<OrderListRow> {
    let status: String = row.try_get("", "status")?;
    Ok(OrderListRow {
        id: row.try_get("", "id")?,
        status: parse_status(&status),
        cliente_nombre: row.try_get("", "cliente_nombre")?,
        cliente_telefono: row.try_get("", "cliente_telefono")?,
        direccion_entrega: row.try_get("", "direccion_entrega")?,
        fecha_entrega: row.try_get("", "fecha_entrega")?,
        created_at: row.try_get("", "created_at")?,
        approved_at: row.try_get("", "approved_at")?,
        items_count: row.try_get("", "items_count")?,
        total: row.try_get("", "total")?,
    })
}

/// Последние заказы с количеством единиц и суммой
pub async fn list_recent<C: ConnectionTrait>(conn: &C, limit: u64) -> anyhow::Result<Vec<OrderListRow>> {
    let rows = conn
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            r#"SELECT o.id, o.status, o.cliente_nombre, o.cliente_telefono, o.direccion_entrega,
                      o.fecha_entrega, o.created_at, o.approved_at,
                      COALESCE(SUM(i.cantidad), 0.0) AS items_count,
                      COALESCE(SUM(i.cantidad * i.precio), 0.0) AS total
               FROM a003_pedidos o
               LEFT JOIN a003_pedido_items i ON i.pedido_id = o.id
               GROUP BY o.id
               ORDER BY o.created_at DESC
               LIMIT ?"#,
            [(limit as i64).into()],
        ))
        .await?;
    rows.iter().map(list_row).collect()
}

/// Смена статуса; `approved_*` записываются только если переданы
pub async fn set_status<C: ConnectionTrait>(
    conn: &C,
    id: &str,
    status: OrderStatus,
    approval: Option<(&str, &str)>,
) -> anyhow::Result<()> {
    let now = chrono::Utc::now().to_rfc3339();
    let mut update = Entity::update_many()
        .col_expr(Column::Status, Expr::value(status.code()))
        .col_expr(Column::UpdatedAt, Expr::value(now));
    if let Some((approved_at, approved_by)) = approval {
        update = update
            .col_expr(Column::ApprovedAt, Expr::value(approved_at))
            .col_expr(Column::ApprovedBy, Expr::value(approved_by));
    }
    update.filter(Column::Id.eq(id)).exec(conn).await?;
    Ok(())
}

pub async fn touch<C: ConnectionTrait>(conn: &C, id: &str) -> anyhow::Result<()> {
    Entity::update_many()
        .col_expr(Column::UpdatedAt, Expr::value(chrono::Utc::now().to_rfc3339()))
        .filter(Column::Id.eq(id))
        .exec(conn)
        .await?;
    Ok(())
}

/// Удаляет заказ вместе с позициями
pub async fn delete<C: ConnectionTrait>(conn: &C, id: &str) -> anyhow::Result<bool> {
    super::items_repository::delete_for_order(conn, id).await?;
    let result = Entity::delete_by_id(id.to_string()).exec(conn).await?;
    Ok(result.rows_affected > 0)
}
