//! Клиентский кэш ответов API.
//!
//! Ключи — строки вида `pedidos/lista` или `admin/users/{id}`, значения
//! хранятся как JSON. Страницы сначала читают кэш, потом при необходимости
//! запрашивают сервер. После мутаций кэш патчится (оптимистично) или
//! инвалидируется по префиксу; при выходе из системы очищается целиком.

use std::collections::HashMap;

use leptos::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

pub const KEY_INVENTORY: &str = "inventario/resumen";
pub const KEY_ORDERS: &str = "pedidos/lista";
pub const KEY_USERS: &str = "admin/users";

pub fn user_key(id: &str) -> String {
    format!("{}/{}", KEY_USERS, id)
}

/// Хранилище без реактивности
#[derive(Debug, Default, Clone)]
pub struct CacheMap {
    entries: HashMap<String, Value>,
}

impl CacheMap {
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.entries
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) {
        match serde_json::to_value(value) {
            Ok(v) => {
                self.entries.insert(key.to_string(), v);
            }
            Err(e) => log::warn!("query cache: cannot store {}: {}", key, e),
        }
    }

    /// Изменяет закэшированное значение на месте; отсутствующий ключ не создаётся
    pub fn patch<T, F>(&mut self, key: &str, f: F) -> bool
    where
        T: DeserializeOwned + Serialize,
        F: FnOnce(&mut T),
    {
        let Some(mut current) = self.get::<T>(key) else {
            return false;
        };
        f(&mut current);
        self.set(key, &current);
        true
    }

    /// Удаляет ключ `prefix` и все ключи под ним (`prefix/...`)
    pub fn invalidate(&mut self, prefix: &str) -> usize {
        let before = self.entries.len();
        let nested = format!("{}/", prefix);
        self.entries
            .retain(|k, _| k != prefix && !k.starts_with(&nested));
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

/// Реактивная обёртка: `generation` меняется при инвалидации,
/// чтобы открытые страницы могли перезапросить данные.
#[derive(Clone, Copy)]
pub struct QueryCache {
    map: StoredValue<CacheMap>,
    generation: RwSignal<u64>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self {
            map: StoredValue::new(CacheMap::default()),
            generation: RwSignal::new(0),
        }
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.map.with_value(|m| m.get(key))
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        self.map.update_value(|m| m.set(key, value));
    }

    pub fn patch<T, F>(&self, key: &str, f: F) -> bool
    where
        T: DeserializeOwned + Serialize,
        F: FnOnce(&mut T),
    {
        let mut changed = false;
        self.map.update_value(|m| changed = m.patch(key, f));
        changed
    }

    pub fn invalidate(&self, prefix: &str) {
        let mut removed = 0;
        self.map.update_value(|m| removed = m.invalidate(prefix));
        log::debug!("query cache: invalidated {} ({} entries)", prefix, removed);
        self.generation.update(|g| *g += 1);
    }

    pub fn clear(&self) {
        self.map.update_value(CacheMap::clear);
        self.generation.update(|g| *g += 1);
    }

    /// Подписка на инвалидации (читать внутри Effect)
    pub fn generation(&self) -> u64 {
        self.generation.get()
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn QueryCacheProvider(children: Children) -> impl IntoView {
    provide_context(QueryCache::new());
    children()
}

pub fn use_query_cache() -> QueryCache {
    use_context::<QueryCache>().expect("QueryCache not found. Wrap your app with QueryCacheProvider.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Row {
        id: String,
        nombre: String,
    }

    fn row(id: &str, nombre: &str) -> Row {
        Row {
            id: id.into(),
            nombre: nombre.into(),
        }
    }

    #[test]
    fn prefix_invalidation_keeps_siblings() {
        let mut cache = CacheMap::default();
        cache.set(KEY_USERS, &vec![row("1", "Ana")]);
        cache.set(&user_key("1"), &row("1", "Ana"));
        cache.set("admin/users-archive", &Vec::<Row>::new());
        cache.set(KEY_ORDERS, &Vec::<Row>::new());

        assert_eq!(cache.invalidate(KEY_USERS), 2);
        assert!(!cache.contains(&user_key("1")));
        assert!(cache.contains("admin/users-archive"));
        assert!(cache.contains(KEY_ORDERS));
    }

    #[test]
    fn patch_updates_existing_entry_only() {
        let mut cache = CacheMap::default();
        assert!(!cache.patch::<Row, _>(&user_key("9"), |r| r.nombre.clear()));

        cache.set(&user_key("1"), &row("1", "Ana"));
        assert!(cache.patch::<Row, _>(&user_key("1"), |r| r.nombre = "Ana María".into()));
        assert_eq!(cache.get::<Row>(&user_key("1")), Some(row("1", "Ana María")));
    }

    #[test]
    fn typed_get_rejects_wrong_shape() {
        let mut cache = CacheMap::default();
        cache.set(KEY_INVENTORY, &vec![row("1", "Lino")]);
        assert!(cache.get::<Row>(KEY_INVENTORY).is_none());
        cache.clear();
        assert!(cache.get::<Vec<Row>>(KEY_INVENTORY).is_none());
    }
}
