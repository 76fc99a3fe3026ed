use chrono::Utc;
use contracts::domain::a001_client::aggregate::{Client, ClientQuery, CreateClientDto};
use sea_orm::ConnectionTrait;

use super::repository;
use crate::shared::error::{ApiError, ApiResult};

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub async fn search<C: ConnectionTrait>(conn: &C, query: &ClientQuery) -> ApiResult<Vec<Client>> {
    let needle = query.needle();
    Ok(repository::search(conn, needle.as_deref(), query.effective_limit()).await?)
}

pub async fn get<C: ConnectionTrait>(conn: &C, id: &str) -> ApiResult<Client> {
    repository::get_by_id(conn, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("No encontrado".to_string()))
}

pub async fn create<C: ConnectionTrait>(conn: &C, dto: CreateClientDto) -> ApiResult<String> {
    ApiError::check(dto.validate())?;
    let client = Client {
        id: uuid::Uuid::new_v4().to_string(),
        nombre: dto.nombre.trim().to_string(),
        direccion: clean(dto.direccion),
        direccion_entrega: clean(dto.direccion_entrega),
        email: clean(dto.email),
        telefono: clean(dto.telefono),
        persona_contacto: clean(dto.persona_contacto),
        ciudad: clean(dto.ciudad),
        pais: clean(dto.pais),
        created_at: Utc::now().to_rfc3339(),
    };
    repository::insert(conn, &client).await?;
    tracing::info!("Cliente {} creado", client.nombre);
    Ok(client.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::test_support::memory_db;

    fn dto(nombre: &str, ciudad: &str) -> CreateClientDto {
        CreateClientDto {
            nombre: nombre.into(),
            ciudad: Some(ciudad.into()),
            telefono: Some("  ".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn search_matches_any_field_ordered_by_name() {
        let conn = memory_db().await;
        create(&conn, dto("zapatería Norte", "Medellín")).await.unwrap();
        create(&conn, dto("Almacén Sur", "Cali")).await.unwrap();
        create(&conn, dto("Boutique Centro", "Medellín")).await.unwrap();

        let all = search(&conn, &ClientQuery::default()).await.unwrap();
        let names: Vec<_> = all.iter().map(|c| c.nombre.as_str()).collect();
        assert_eq!(names, vec!["Almacén Sur", "Boutique Centro", "zapatería Norte"]);
        assert!(all[0].telefono.is_none());

        let q = ClientQuery {
            q: Some(" MEDELL ".into()),
            limit: Some(1),
        };
        let found = search(&conn, &q).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].nombre, "Boutique Centro");
    }

    #[tokio::test]
    async fn create_requires_name_and_get_reports_missing() {
        let conn = memory_db().await;
        let err = create(&conn, CreateClientDto::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "nombre requerido");

        let id = create(&conn, dto("Textiles Uno", "Bogotá")).await.unwrap();
        assert_eq!(get(&conn, &id).await.unwrap().nombre, "Textiles Uno");
        assert!(matches!(get(&conn, "nope").await, Err(ApiError::NotFound(_))));
    }
}
