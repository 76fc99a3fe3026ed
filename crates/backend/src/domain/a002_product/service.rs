use chrono::Utc;
use contracts::domain::a002_product::aggregate::{
    CreateMovementDto, CreateProductDto, InventorySummaryRow, Product,
};
use sea_orm::ConnectionTrait;

use super::movements::{self, NewMovement};
use super::repository;
use crate::shared::error::{ApiError, ApiResult};

pub async fn inventory_summary<C: ConnectionTrait>(
    conn: &C,
    pedido_id: Option<&str>,
) -> ApiResult<Vec<InventorySummaryRow>> {
    let pedido_id = pedido_id.map(str::trim).filter(|s| !s.is_empty());
    Ok(repository::inventory_summary(conn, pedido_id).await?)
}

pub async fn create_product<C: ConnectionTrait>(conn: &C, dto: CreateProductDto) -> ApiResult<String> {
    ApiError::check(dto.validate())?;
    let referencia = dto.referencia.trim().to_string();
    if repository::get_by_referencia(conn, &referencia).await?.is_some() {
        return Err(ApiError::Conflict(format!(
            "La referencia {} ya existe",
            referencia
        )));
    }

    let product = Product {
        id: uuid::Uuid::new_v4().to_string(),
        referencia,
        descripcion: dto.descripcion.trim().to_string(),
        precio_lista: dto.precio_lista,
        caracteristicas: dto.caracteristicas,
        created_at: Utc::now().to_rfc3339(),
    };
    repository::insert(conn, &product).await?;
    tracing::info!("Producto {} creado", product.referencia);
    Ok(product.id)
}

/// Ручное движение склада; все ошибки формы возвращаются списком
pub async fn create_movement<C: ConnectionTrait>(
    conn: &C,
    usuario_id: &str,
    dto: CreateMovementDto,
) -> ApiResult<String> {
    let valid = dto.validate().map_err(ApiError::Validation)?;
    let product = repository::resolve(
        conn,
        valid.producto_id.as_deref(),
        valid.referencia.as_deref(),
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Producto no encontrado".to_string()))?;

    let id = movements::insert(
        conn,
        NewMovement {
            producto_id: product.id,
            cantidad: valid.cantidad,
            clase: valid.clase,
            tipo: valid.tipo,
            motivo: valid.motivo.clone(),
            usuario_id: usuario_id.to_string(),
            fecha_local: valid.fecha_local,
            hora_local: valid.hora_local,
            ubicacion: valid.ubicacion,
            pedido_id: None,
        },
    )
    .await?;
    tracing::info!(
        "Movimiento {} de {} x {} ({})",
        valid.clase.code(),
        product.referencia,
        valid.cantidad,
        valid.motivo
    );
    Ok(id)
}

#[cfg(test)]
pub mod test_fixtures {
    use super::*;

    /// Товар с начальным приходом
    pub async fn product_with_stock<C: ConnectionTrait>(conn: &C, referencia: &str, stock: f64) -> String {
        let id = create_product(
            conn,
            CreateProductDto {
                referencia: referencia.into(),
                descripcion: format!("Tela {}", referencia),
                precio_lista: 10000.0,
                ..Default::default()
            },
        )
        .await
        .unwrap();
        if stock > 0.0 {
            create_movement(
                conn,
                "tester",
                CreateMovementDto {
                    producto_id: Some(id.clone()),
                    cantidad: Some(stock),
                    clase: Some("entrada".into()),
                    motivo: Some("Ingreso de mercancía".into()),
                    fecha_local: Some("2024-05-02".into()),
                    hora_local: Some("08:15".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::test_fixtures::product_with_stock;
    use super::*;
    use crate::shared::data::db::test_support::memory_db;

    #[tokio::test]
    async fn stock_is_entries_minus_exits() {
        let conn = memory_db().await;
        let id = product_with_stock(&conn, "LIN-200", 40.0).await;
        create_movement(
            &conn,
            "tester",
            CreateMovementDto {
                referencia: Some("LIN-200".into()),
                cantidad: Some(12.5),
                clase: Some("salida".into()),
                motivo: Some("deterioro".into()),
                fecha_local: Some("2024-05-03".into()),
                hora_local: Some("10:00:00".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let rows = inventory_summary(&conn, None).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, id);
        assert_eq!(rows[0].cantidad_actual, 27.5);
        assert_eq!(rows[0].cantidad_disponible, 27.5);
    }

    #[tokio::test]
    async fn movement_errors_and_unknown_product() {
        let conn = memory_db().await;
        match create_movement(&conn, "u", CreateMovementDto::default()).await {
            Err(ApiError::Validation(errors)) => assert_eq!(errors.len(), 6),
            other => panic!("unexpected: {:?}", other),
        }
        let missing = create_movement(
            &conn,
            "u",
            CreateMovementDto {
                referencia: Some("NO-EXISTE".into()),
                cantidad: Some(1.0),
                clase: Some("entrada".into()),
                motivo: Some("ajuste".into()),
                fecha_local: Some("2024-05-02".into()),
                hora_local: Some("08:15".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(missing, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn duplicate_reference_conflicts() {
        let conn = memory_db().await;
        product_with_stock(&conn, "ALG-01", 0.0).await;
        let err = create_product(
            &conn,
            CreateProductDto {
                referencia: " ALG-01 ".into(),
                descripcion: "Algodón".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));
    }
}
