use contracts::domain::a001_client::aggregate::Client;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{DatabaseBackend, QueryOrder, QuerySelect, Set, Statement};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_clientes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub nombre: String,
    pub direccion: Option<String>,
    pub direccion_entrega: Option<String>,
    pub email: Option<String>,
    pub telefono: Option<String>,
    pub persona_contacto: Option<String>,
    pub ciudad: Option<String>,
    pub pais: Option<String>,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Client {
    fn from(m: Model) -> Self {
        Client {
            id: m.id,
            nombre: m.nombre,
            direccion: m.direccion,
            direccion_entrega: m.direccion_entrega,
            email: m.email,
            telefono: m.telefono,
            persona_contacto: m.persona_contacto,
            ciudad: m.ciudad,
            pais: m.pais,
            created_at: m.created_at,
        }
    }
}

/// Поиск подстроки без учёта регистра по всем контактным полям
pub async fn search<C: ConnectionTrait>(
    conn: &C,
    needle: Option<&str>,
    limit: u64,
) -> anyhow::Result<Vec<Client>> {
    let models = match needle {
        None => {
            Entity::find()
                .order_by_asc(Expr::cust("lower(nombre)"))
                .limit(limit)
                .all(conn)
                .await?
        }
        Some(needle) => {
            let pattern = format!("%{}%", needle.to_lowercase());
            Entity::find()
                .from_raw_sql(Statement::from_sql_and_values(
                    DatabaseBackend::Sqlite,
                    r#"SELECT * FROM a001_clientes
                       WHERE lower(nombre) LIKE ?1
                          OR lower(coalesce(email, '')) LIKE ?1
                          OR lower(coalesce(telefono, '')) LIKE ?1
                          OR lower(coalesce(persona_contacto, '')) LIKE ?1
                          OR lower(coalesce(ciudad, '')) LIKE ?1
                          OR lower(coalesce(pais, '')) LIKE ?1
                       ORDER BY lower(nombre)
                       LIMIT ?2"#,
                    [pattern.into(), (limit as i64).into()],
                ))
                .all(conn)
                .await?
        }
    };
    Ok(models.into_iter().map(Into::into).collect())
}

pub async fn get_by_id<C: ConnectionTrait>(conn: &C, id: &str) -> anyhow::Result<Option<Client>> {
    Ok(Entity::find_by_id(id.to_string()).one(conn).await?.map(Into::into))
}

pub async fn insert<C: ConnectionTrait>(conn: &C, client: &Client) -> anyhow::Result<()> {
    let active = ActiveModel {
        id: Set(client.id.clone()),
        nombre: Set(client.nombre.clone()),
        direccion: Set(client.direccion.clone()),
        direccion_entrega: Set(client.direccion_entrega.clone()),
        email: Set(client.email.clone()),
        telefono: Set(client.telefono.clone()),
        persona_contacto: Set(client.persona_contacto.clone()),
        ciudad: Set(client.ciudad.clone()),
        pais: Set(client.pais.clone()),
        created_at: Set(client.created_at.clone()),
    };
    active.insert(conn).await?;
    Ok(())
}
