use serde::{Deserialize, Serialize};

pub const SEARCH_DEFAULT_LIMIT: u64 = 20;
pub const SEARCH_MAX_LIMIT: u64 = 50;

/// Клиент (cliente)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
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

impl Client {
    /// Адрес доставки для мастера заказа: `direccion_entrega`, иначе `direccion`
    pub fn delivery_address(&self) -> String {
        self.direccion_entrega
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or(self.direccion.as_deref())
            .unwrap_or_default()
            .to_string()
    }

    /// Вторая строка в выпадающем списке поиска: «telefono • ciudad, pais»
    pub fn subtitle(&self) -> String {
        let place = [self.ciudad.as_deref(), self.pais.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.trim().is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        [self.telefono.as_deref().unwrap_or_default(), place.as_str()]
            .into_iter()
            .filter(|s| !s.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" • ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateClientDto {
    pub nombre: String,
    #[serde(default)]
    pub direccion: Option<String>,
    #[serde(default)]
    pub direccion_entrega: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub persona_contacto: Option<String>,
    #[serde(default)]
    pub ciudad: Option<String>,
    #[serde(default)]
    pub pais: Option<String>,
}

impl CreateClientDto {
    pub fn validate(&self) -> Vec<String> {
        if self.nombre.trim().is_empty() {
            vec!["nombre requerido".to_string()]
        } else {
            Vec::new()
        }
    }
}

/// Параметры `GET /clientes`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub limit: Option<i64>,
}

impl ClientQuery {
    pub fn effective_limit(&self) -> u64 {
        match self.limit {
            Some(l) => (l.max(1) as u64).min(SEARCH_MAX_LIMIT),
            None => SEARCH_DEFAULT_LIMIT,
        }
    }

    pub fn needle(&self) -> Option<String> {
        self.q
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_is_clamped() {
        let q = |limit| ClientQuery { q: None, limit };
        assert_eq!(q(None).effective_limit(), 20);
        assert_eq!(q(Some(0)).effective_limit(), 1);
        assert_eq!(q(Some(-5)).effective_limit(), 1);
        assert_eq!(q(Some(500)).effective_limit(), 50);
        assert_eq!(q(Some(7)).effective_limit(), 7);
    }

    #[test]
    fn needle_trims_and_lowercases() {
        let q = ClientQuery {
            q: Some("  Confecciones ".into()),
            limit: None,
        };
        assert_eq!(q.needle().as_deref(), Some("confecciones"));
        assert_eq!(ClientQuery::default().needle(), None);
    }

    #[test]
    fn delivery_address_prefers_delivery_field() {
        let mut c = Client {
            id: "1".into(),
            nombre: "Textiles Andinos".into(),
            direccion: Some("Calle 10 # 5-20".into()),
            direccion_entrega: Some(" ".into()),
            email: None,
            telefono: Some("3001234567".into()),
            persona_contacto: None,
            ciudad: Some("Medellín".into()),
            pais: None,
            created_at: String::new(),
        };
        assert_eq!(c.delivery_address(), "Calle 10 # 5-20");
        c.direccion_entrega = Some("Bodega 4".into());
        assert_eq!(c.delivery_address(), "Bodega 4");
        assert_eq!(c.subtitle(), "3001234567 • Medellín");
        c.pais = Some("Colombia".into());
        c.telefono = None;
        assert_eq!(c.subtitle(), "Medellín, Colombia");
    }

    #[test]
    fn name_required() {
        assert_eq!(CreateClientDto::default().validate(), vec!["nombre requerido"]);
    }
}
