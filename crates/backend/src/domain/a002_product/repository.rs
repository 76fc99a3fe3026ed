use contracts::domain::a002_product::aggregate::{InventorySummaryRow, Product};
use contracts::enums::order_status::OrderStatus;
use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseBackend, QueryResult, Set, Statement};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_productos")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub referencia: String,
    pub descripcion: String,
    pub precio_lista: f64,
    /// JSON-объект в текстовом поле
    pub caracteristicas: String,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn parse_characteristics(raw: &str) -> Map<String, Value> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

impl From<Model> for Product {
    fn from(m: Model) -> Self {
        Product {
            caracteristicas: parse_characteristics(&m.caracteristicas),
            id: m.id,
            referencia: m.referencia,
            descripcion: m.descripcion,
            precio_lista: m.precio_lista,
            created_at: m.created_at,
        }
    }
}

pub async fn get_by_id<C: ConnectionTrait>(conn: &C, id: &str) -> anyhow::Result<Option<Product>> {
    Ok(Entity::find_by_id(id.to_string()).one(conn).await?.map(Into::into))
}

pub async fn get_by_referencia<C: ConnectionTrait>(
    conn: &C,
    referencia: &str,
) -> anyhow::Result<Option<Product>> {
    Ok(Entity::find()
        .filter(Column::Referencia.eq(referencia))
        .one(conn)
        .await?
        .map(Into::into))
}

/// Товар по id, иначе по референсу
pub async fn resolve<C: ConnectionTrait>(
    conn: &C,
    producto_id: Option<&str>,
    referencia: Option<&str>,
) -> anyhow::Result<Option<Product>> {
    if let Some(id) = producto_id {
        return get_by_id(conn, id).await;
    }
    match referencia {
        Some(r) => get_by_referencia(conn, r).await,
        None => Ok(None),
    }
}

pub async fn insert<C: ConnectionTrait>(conn: &C, product: &Product) -> anyhow::Result<()> {
    let active = ActiveModel {
        id: Set(product.id.clone()),
        referencia: Set(product.referencia.clone()),
        descripcion: Set(product.descripcion.clone()),
        precio_lista: Set(product.precio_lista),
        caracteristicas: Set(serde_json::to_string(&product.caracteristicas)?),
        created_at: Set(product.created_at.clone()),
    };
    active.insert(conn).await?;
    Ok(())
}

// ============================================================================
// Остатки
// ============================================================================

/// Остаток: приход минус расход
const STOCK_SQL: &str = "COALESCE((SELECT SUM(CASE WHEN m.clase = 'entrada' THEN m.cantidad ELSE -m.cantidad END)
        FROM a002_inventario_movimientos m WHERE m.producto_id = p.id), 0.0)";

/// Количество в заказах, которые держат резерв, кроме заказа `?`
fn held_sql() -> String {
    let statuses = OrderStatus::all()
        .iter()
        .filter(|s| s.holds_stock())
        .map(|s| format!("'{}'", s.code()))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "COALESCE((SELECT SUM(i.cantidad)
        FROM a003_pedido_items i JOIN a003_pedidos o ON o.id = i.pedido_id
        WHERE i.producto_id = p.id AND o.status IN ({}) AND o.id <> ?), 0.0)",
        statuses
    )
}

fn summary_row(row: &QueryResult) -> anyhow::Result<InventorySummaryRow> {
    let raw: String = row.try_get("", "caracteristicas")?;
    let actual: f64 = row.try_get("", "cantidad_actual")?;
    let held: f64 = row.try_get("", "reservado")?;
    Ok(InventorySummaryRow {
        id: row.try_get("", "id")?,
        referencia: row.try_get("", "referencia")?,
        descripcion: row.try_get("", "descripcion")?,
        precio_lista: row.try_get("", "precio_lista")?,
        caracteristicas: parse_characteristics(&raw),
        cantidad_actual: actual,
        cantidad_disponible: actual - held,
    })
}

/// Сводка по складу. `exclude_pedido_id` не считается резервом
/// (заказ, который сейчас редактируется).
pub async fn inventory_summary<C: ConnectionTrait>(
    conn: &C,
    exclude_pedido_id: Option<&str>,
) -> anyhow::Result<Vec<InventorySummaryRow>> {
    let sql = format!(
        "SELECT p.id, p.referencia, p.descripcion, p.precio_lista, p.caracteristicas,
                {} AS cantidad_actual, {} AS reservado
         FROM a002_productos p
         ORDER BY p.referencia",
        STOCK_SQL,
        held_sql()
    );
    let rows = conn
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            &sql,
            [exclude_pedido_id.unwrap_or_default().into()],
        ))
        .await?;
    rows.iter().map(summary_row).collect()
}

/// `(остаток, резерв других заказов)` для одного товара
pub async fn stock_and_held<C: ConnectionTrait>(
    conn: &C,
    producto_id: &str,
    exclude_pedido_id: &str,
) -> anyhow::Result<(f64, f64)> {
    let sql = format!(
        "SELECT {} AS cantidad_actual, {} AS reservado FROM a002_productos p WHERE p.id = ?",
        STOCK_SQL,
        held_sql()
    );
    let row = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            &sql,
            [exclude_pedido_id.into(), producto_id.into()],
        ))
        .await?;
    match row {
        Some(row) => Ok((
            row.try_get("", "cantidad_actual")?,
            row.try_get("", "reservado")?,
        )),
        None => Ok((0.0, 0.0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reservation_counts_open_orders_only() {
        let sql = held_sql();
        assert!(sql.contains("o.status IN ('draft', 'submitted')"));
        assert!(!sql.contains("'approved'"));
    }
}
