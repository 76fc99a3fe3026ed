use contracts::domain::a001_client::aggregate::{Client, SEARCH_DEFAULT_LIMIT};

use crate::shared::api_utils::{get_json, ApiClientError};

/// Путь поиска клиентов с экранированным запросом
pub fn search_path(query: &str, limit: u64) -> String {
    format!(
        "/clientes?q={}&limit={}",
        urlencoding::encode(query.trim()),
        limit
    )
}

/// Поиск по имени, телефону, email или городу
pub async fn search_clients(query: &str) -> Result<Vec<Client>, ApiClientError> {
    get_json(&search_path(query, SEARCH_DEFAULT_LIMIT)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_is_encoded() {
        assert_eq!(search_path(" Éxito & Co ", 20), "/clientes?q=%C3%89xito%20%26%20Co&limit=20");
        assert_eq!(search_path("", 5), "/clientes?q=&limit=5");
    }
}
