use contracts::domain::a002_product::aggregate::MovementClass;
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_inventario_movimientos")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub producto_id: String,
    pub cantidad: f64,
    pub clase: String,
    pub tipo: String,
    pub motivo: String,
    pub usuario_id: String,
    pub fecha_local: String,
    pub hora_local: String,
    pub ubicacion: String,
    pub pedido_id: Option<String>,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Движение склада перед записью
#[derive(Debug, Clone)]
pub struct NewMovement {
    pub producto_id: String,
    pub cantidad: f64,
    pub clase: MovementClass,
    pub tipo: String,
    pub motivo: String,
    pub usuario_id: String,
    pub fecha_local: String,
    pub hora_local: String,
    pub ubicacion: String,
    pub pedido_id: Option<String>,
}

pub async fn insert<C: ConnectionTrait>(conn: &C, movement: NewMovement) -> anyhow::Result<String> {
    let id = uuid::Uuid::new_v4().to_string();
    let active = ActiveModel {
        id: Set(id.clone()),
        producto_id: Set(movement.producto_id),
        cantidad: Set(movement.cantidad),
        clase: Set(movement.clase.code().to_string()),
        tipo: Set(movement.tipo),
        motivo: Set(movement.motivo),
        usuario_id: Set(movement.usuario_id),
        fecha_local: Set(movement.fecha_local),
        hora_local: Set(movement.hora_local),
        ubicacion: Set(movement.ubicacion),
        pedido_id: Set(movement.pedido_id),
        created_at: Set(chrono::Utc::now().to_rfc3339()),
    };
    active.insert(conn).await?;
    Ok(id)
}

pub async fn list_for_order<C: ConnectionTrait>(conn: &C, pedido_id: &str) -> anyhow::Result<Vec<Model>> {
    Ok(Entity::find()
        .filter(Column::PedidoId.eq(pedido_id))
        .all(conn)
        .await?)
}
