use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Таблицы, создаваемые при старте, в порядке создания
const SCHEMA: &[(&str, &str)] = &[
    (
        "sys_settings",
        r#"
        CREATE TABLE sys_settings (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL,
            description TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    ),
    (
        "sys_users",
        r#"
        CREATE TABLE sys_users (
            id TEXT PRIMARY KEY NOT NULL,
            nombre_completo TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            profile TEXT NOT NULL DEFAULT 'viewer',
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            last_login_at TEXT
        );
        "#,
    ),
    (
        "sys_user_prefs",
        r#"
        CREATE TABLE sys_user_prefs (
            user_id TEXT PRIMARY KEY NOT NULL,
            prefs TEXT NOT NULL DEFAULT '{}',
            updated_at TEXT NOT NULL
        );
        "#,
    ),
    (
        "a001_clientes",
        r#"
        CREATE TABLE a001_clientes (
            id TEXT PRIMARY KEY NOT NULL,
            nombre TEXT NOT NULL,
            direccion TEXT,
            direccion_entrega TEXT,
            email TEXT,
            telefono TEXT,
            persona_contacto TEXT,
            ciudad TEXT,
            pais TEXT,
            created_at TEXT NOT NULL
        );
        "#,
    ),
    (
        "a002_productos",
        r#"
        CREATE TABLE a002_productos (
            id TEXT PRIMARY KEY NOT NULL,
            referencia TEXT NOT NULL UNIQUE,
            descripcion TEXT NOT NULL,
            precio_lista REAL NOT NULL DEFAULT 0,
            caracteristicas TEXT NOT NULL DEFAULT '{}',
            created_at TEXT NOT NULL
        );
        "#,
    ),
    (
        "a002_inventario_movimientos",
        r#"
        CREATE TABLE a002_inventario_movimientos (
            id TEXT PRIMARY KEY NOT NULL,
            producto_id TEXT NOT NULL,
            cantidad REAL NOT NULL,
            clase TEXT NOT NULL,
            tipo TEXT NOT NULL,
            motivo TEXT NOT NULL,
            usuario_id TEXT NOT NULL,
            fecha_local TEXT NOT NULL,
            hora_local TEXT NOT NULL,
            ubicacion TEXT NOT NULL,
            pedido_id TEXT,
            created_at TEXT NOT NULL
        );
        "#,
    ),
    (
        "a003_pedidos",
        r#"
        CREATE TABLE a003_pedidos (
            id TEXT PRIMARY KEY NOT NULL,
            status TEXT NOT NULL DEFAULT 'draft',
            cliente_id TEXT,
            cliente_nombre TEXT NOT NULL,
            cliente_telefono TEXT NOT NULL,
            direccion_entrega TEXT NOT NULL,
            fecha_entrega TEXT NOT NULL,
            fecha_local TEXT NOT NULL,
            hora_local TEXT NOT NULL,
            usuario_id TEXT NOT NULL,
            approved_at TEXT,
            approved_by TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    ),
    (
        "a003_pedido_items",
        r#"
        CREATE TABLE a003_pedido_items (
            id TEXT PRIMARY KEY NOT NULL,
            pedido_id TEXT NOT NULL,
            producto_id TEXT NOT NULL,
            referencia TEXT NOT NULL,
            descripcion TEXT NOT NULL,
            cantidad REAL NOT NULL,
            precio REAL NOT NULL,
            created_at TEXT NOT NULL
        );
        "#,
    ),
];

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_a002_mov_producto ON a002_inventario_movimientos (producto_id);",
    "CREATE INDEX IF NOT EXISTS idx_a003_items_pedido ON a003_pedido_items (pedido_id);",
    "CREATE INDEX IF NOT EXISTS idx_a003_items_producto ON a003_pedido_items (producto_id);",
];

pub async fn initialize_database(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_path.is_absolute() {
        db_path.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_path)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
    tracing::info!("Connecting to database: {}", db_url);
    let conn = Database::connect(&db_url).await?;

    bootstrap_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

/// Создаёт недостающие таблицы (минимальный bootstrap схемы)
pub async fn bootstrap_schema<C: ConnectionTrait>(conn: &C) -> anyhow::Result<()> {
    for (table, ddl) in SCHEMA {
        if table_exists(conn, table).await? {
            tracing::debug!("Table {} already exists", table);
            continue;
        }
        tracing::info!("Creating new {} table", table);
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            ddl.to_string(),
        ))
        .await?;
    }
    for sql in INDEXES {
        conn.execute(Statement::from_string(DatabaseBackend::Sqlite, sql.to_string()))
            .await?;
    }
    Ok(())
}

async fn table_exists<C: ConnectionTrait>(conn: &C, table: &str) -> anyhow::Result<bool> {
    let row = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT name FROM sqlite_master WHERE type='table' AND name = ?",
            [table.into()],
        ))
        .await?;
    Ok(row.is_some())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

#[cfg(test)]
pub mod test_support {
    use sea_orm::{ConnectOptions, Database, DatabaseConnection};

    /// Отдельная in-memory база на каждый тест.
    /// Одно соединение в пуле, иначе каждое увидит свою пустую базу.
    pub async fn memory_db() -> DatabaseConnection {
        let mut opts = ConnectOptions::new("sqlite::memory:".to_string());
        opts.max_connections(1).min_connections(1).sqlx_logging(false);
        let conn = Database::connect(opts).await.unwrap();
        super::bootstrap_schema(&conn).await.unwrap();
        conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bootstrap_is_idempotent() {
        let conn = test_support::memory_db().await;
        bootstrap_schema(&conn).await.unwrap();
        for (table, _) in SCHEMA {
            assert!(table_exists(&conn, table).await.unwrap(), "{}", table);
        }
    }
}
