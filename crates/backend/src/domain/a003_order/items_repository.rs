use contracts::domain::a003_order::aggregate::OrderItem;
use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a003_pedido_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub pedido_id: String,
    pub producto_id: String,
    pub referencia: String,
    pub descripcion: String,
    pub cantidad: f64,
    pub precio: f64,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for OrderItem {
    fn from(m: Model) -> Self {
        OrderItem {
            id: m.id,
            pedido_id: m.pedido_id,
            producto_id: m.producto_id,
            referencia: m.referencia,
            descripcion: m.descripcion,
            cantidad: m.cantidad,
            precio: m.precio,
            created_at: m.created_at,
        }
    }
}

/// Позиции в порядке добавления
pub async fn list_for_order<C: ConnectionTrait>(conn: &C, pedido_id: &str) -> anyhow::Result<Vec<OrderItem>> {
    Ok(Entity::find()
        .filter(Column::PedidoId.eq(pedido_id))
        .order_by_asc(Column::CreatedAt)
        .order_by_asc(Column::Id)
        .all(conn)
        .await?
        .into_iter()
        .map(Into::into)
        .collect())
}

pub async fn get<C: ConnectionTrait>(
    conn: &C,
    pedido_id: &str,
    item_id: &str,
) -> anyhow::Result<Option<OrderItem>> {
    Ok(Entity::find()
        .filter(Column::PedidoId.eq(pedido_id))
        .filter(Column::Id.eq(item_id))
        .one(conn)
        .await?
        .map(Into::into))
}

/// Строка этого товара в заказе (одна на товар)
pub async fn find_by_product<C: ConnectionTrait>(
    conn: &C,
    pedido_id: &str,
    producto_id: &str,
) -> anyhow::Result<Option<OrderItem>> {
    Ok(Entity::find()
        .filter(Column::PedidoId.eq(pedido_id))
        .filter(Column::ProductoId.eq(producto_id))
        .one(conn)
        .await?
        .map(Into::into))
}

pub async fn insert<C: ConnectionTrait>(conn: &C, item: &OrderItem) -> anyhow::Result<()> {
    let active = ActiveModel {
        id: Set(item.id.clone()),
        pedido_id: Set(item.pedido_id.clone()),
        producto_id: Set(item.producto_id.clone()),
        referencia: Set(item.referencia.clone()),
        descripcion: Set(item.descripcion.clone()),
        cantidad: Set(item.cantidad),
        precio: Set(item.precio),
        created_at: Set(item.created_at.clone()),
    };
    active.insert(conn).await?;
    Ok(())
}

pub async fn update_line<C: ConnectionTrait>(
    conn: &C,
    item_id: &str,
    cantidad: f64,
    precio: f64,
) -> anyhow::Result<()> {
    let active = ActiveModel {
        id: Set(item_id.to_string()),
        cantidad: Set(cantidad),
        precio: Set(precio),
        ..Default::default()
    };
    active.update(conn).await?;
    Ok(())
}

pub async fn delete<C: ConnectionTrait>(conn: &C, pedido_id: &str, item_id: &str) -> anyhow::Result<bool> {
    let result = Entity::delete_many()
        .filter(Column::PedidoId.eq(pedido_id))
        .filter(Column::Id.eq(item_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected > 0)
}

pub async fn delete_for_order<C: ConnectionTrait>(conn: &C, pedido_id: &str) -> anyhow::Result<u64> {
    let result = Entity::delete_many()
        .filter(Column::PedidoId.eq(pedido_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
