use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::path::{Path, PathBuf};

static CONFIG: OnceCell<Config> = OnceCell::new();

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub admin: AdminConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Пустой список = любой origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// Пустая строка = сгенерировать и сохранить в sys_settings
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_token_lifetime_days")]
    pub token_lifetime_days: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_lifetime_days: default_token_lifetime_days(),
        }
    }
}

/// Учётная запись, создаваемая при пустой таблице пользователей
#[derive(Debug, Deserialize, Clone)]
pub struct AdminConfig {
    pub email: String,
    pub password: String,
    pub nombre_completo: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            email: "admin@gestor.local".to_string(),
            password: "admin12345".to_string(),
            nombre_completo: "Administrador".to_string(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_token_lifetime_days() -> i64 {
    7
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[database]
path = "target/db/gestor_textil.db"

[server]
host = "0.0.0.0"
port = 3000
cors_origins = []

[auth]
jwt_secret = ""
token_lifetime_days = 7
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
///
/// Environment variables DATABASE_PATH, JWT_SECRET, CORS_ORIGINS, PORT
/// override the file.
pub fn load_config() -> anyhow::Result<Config> {
    let mut config = read_config_file()?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

fn read_config_file() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

fn apply_env_overrides(config: &mut Config, env: impl Fn(&str) -> Option<String>) {
    if let Some(path) = env("DATABASE_PATH").filter(|v| !v.trim().is_empty()) {
        config.database.path = path;
    }
    if let Some(secret) = env("JWT_SECRET").filter(|v| !v.trim().is_empty()) {
        config.auth.jwt_secret = secret;
    }
    if let Some(raw) = env("CORS_ORIGINS") {
        config.server.cors_origins = parse_origins(&raw);
    }
    if let Some(port) = env("PORT").and_then(|v| v.trim().parse().ok()) {
        config.server.port = port;
    }
}

/// "https://a.com, https://b.com" -> ["https://a.com", "https://b.com"]
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

/// Сохраняет конфигурацию для остальных модулей (JWT, администратор)
pub fn set_config(config: Config) -> anyhow::Result<()> {
    CONFIG
        .set(config)
        .map_err(|_| anyhow::anyhow!("Config already initialized"))
}

pub fn get_config() -> anyhow::Result<&'static Config> {
    CONFIG
        .get()
        .ok_or_else(|| anyhow::anyhow!("Config has not been initialized"))
}

/// Get the database file path from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_database_path(config: &Config) -> anyhow::Result<PathBuf> {
    let db_path_str = &config.database.path;
    let db_path = Path::new(db_path_str);

    if db_path.is_absolute() {
        return Ok(db_path.to_path_buf());
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return Ok(exe_dir.join(db_path));
        }
    }

    Ok(PathBuf::from(db_path_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.database.path, "target/db/gestor_textil.db");
        assert_eq!(config.server.port, 3000);
        assert!(config.server.cors_origins.is_empty());
        assert_eq!(config.auth.token_lifetime_days, 7);
        assert_eq!(config.admin.email, "admin@gestor.local");
    }

    #[test]
    fn minimal_file_gets_defaults() {
        let config: Config = toml::from_str("[database]\npath = \"x.db\"\n").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(config.auth.jwt_secret.is_empty());
    }

    #[test]
    fn env_overrides() {
        let mut config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        apply_env_overrides(&mut config, |key| match key {
            "CORS_ORIGINS" => Some("http://localhost:8080, ,https://gestor.co".to_string()),
            "PORT" => Some("8081".to_string()),
            "JWT_SECRET" => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(
            config.server.cors_origins,
            vec!["http://localhost:8080", "https://gestor.co"]
        );
        assert_eq!(config.server.port, 8081);
        assert!(config.auth.jwt_secret.is_empty());
    }
}
