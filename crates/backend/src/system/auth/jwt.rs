use anyhow::{Context, Result};
use chrono::Utc;
use contracts::enums::user_profile::UserProfile;
use contracts::system::auth::TokenClaims;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::OnceCell;
use rand::Rng;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

use crate::shared::config::AuthConfig;

static JWT_KEYS: OnceCell<JwtKeys> = OnceCell::new();

const SECRET_SETTING_KEY: &str = "jwt_secret";

/// Секрет HS256 и срок жизни токена
#[derive(Clone)]
pub struct JwtKeys {
    secret: String,
    lifetime_days: i64,
}

impl JwtKeys {
    pub fn new(secret: impl Into<String>, lifetime_days: i64) -> Self {
        Self {
            secret: secret.into(),
            lifetime_days,
        }
    }

    /// Generate JWT access token
    pub fn issue(&self, user_id: &str, email: &str, profile: UserProfile) -> Result<String> {
        let now = Utc::now();
        let exp = (now + chrono::Duration::days(self.lifetime_days)).timestamp().max(0) as usize;
        let claims = TokenClaims {
            sub: user_id.to_string(),
            email: email.to_string(),
            profile,
            exp,
            iat: now.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .context("Failed to encode JWT token")
    }

    /// Validate JWT token and extract claims
    pub fn validate(&self, token: &str) -> Result<TokenClaims> {
        let token_data = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .context("Failed to decode JWT token")?;
        Ok(token_data.claims)
    }
}

/// Секрет из конфигурации, иначе из sys_settings (создаётся при первом запуске)
pub async fn initialize<C: ConnectionTrait>(conn: &C, config: &AuthConfig) -> Result<()> {
    let secret = if config.jwt_secret.trim().is_empty() {
        get_or_create_secret(conn).await?
    } else {
        tracing::info!("Using JWT secret from configuration");
        config.jwt_secret.clone()
    };
    JWT_KEYS
        .set(JwtKeys::new(secret, config.token_lifetime_days))
        .map_err(|_| anyhow::anyhow!("JWT keys already initialized"))
}

pub fn keys() -> Result<&'static JwtKeys> {
    JWT_KEYS
        .get()
        .ok_or_else(|| anyhow::anyhow!("JWT keys have not been initialized"))
}

/// Ключи для тестов роутера: middleware читает глобальные ключи
#[cfg(test)]
pub fn test_keys() -> &'static JwtKeys {
    JWT_KEYS.get_or_init(|| JwtKeys::new("clave-de-pruebas", 1))
}

async fn get_or_create_secret<C: ConnectionTrait>(conn: &C) -> Result<String> {
    if let Some(secret) = get_secret_from_db(conn).await? {
        return Ok(secret);
    }
    tracing::info!("Generating new JWT secret");
    let secret = generate_jwt_secret();
    save_secret_to_db(conn, &secret).await?;
    Ok(secret)
}

/// Generate a cryptographically secure JWT secret (256 bits)
fn generate_jwt_secret() -> String {
    use base64::{engine::general_purpose, Engine as _};
    let mut rng = rand::thread_rng();
    let random_bytes: Vec<u8> = (0..32).map(|_| rng.gen::<u8>()).collect();
    general_purpose::STANDARD.encode(&random_bytes)
}

async fn get_secret_from_db<C: ConnectionTrait>(conn: &C) -> Result<Option<String>> {
    let row = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT value FROM sys_settings WHERE key = ?",
            [SECRET_SETTING_KEY.into()],
        ))
        .await?;

    match row {
        Some(row) => Ok(Some(row.try_get("", "value")?)),
        None => Ok(None),
    }
}

async fn save_secret_to_db<C: ConnectionTrait>(conn: &C, secret: &str) -> Result<()> {
    let now = Utc::now().to_rfc3339();
    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT OR REPLACE INTO sys_settings (key, value, description, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?)",
        [
            SECRET_SETTING_KEY.into(),
            secret.to_string().into(),
            "Auto-generated JWT secret for authentication".into(),
            now.clone().into(),
            now.into(),
        ],
    ))
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::test_support::memory_db;

    #[test]
    fn token_round_trip() {
        let keys = JwtKeys::new("secreto-de-prueba", 7);
        let token = keys.issue("u1", "ana@textiles.co", UserProfile::Seller).unwrap();
        let claims = keys.validate(&token).unwrap();
        assert_eq!(claims.sub, "u1");
        assert_eq!(claims.profile, UserProfile::Seller);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn wrong_secret_or_expired_token_is_rejected() {
        let keys = JwtKeys::new("uno", 7);
        let token = keys.issue("u1", "a@b.co", UserProfile::Admin).unwrap();
        assert!(JwtKeys::new("otro", 7).validate(&token).is_err());

        let expired = JwtKeys::new("uno", -2);
        let old = expired.issue("u1", "a@b.co", UserProfile::Admin).unwrap();
        assert!(keys.validate(&old).is_err());
    }

    #[tokio::test]
    async fn generated_secret_is_persisted() {
        let conn = memory_db().await;
        let first = get_or_create_secret(&conn).await.unwrap();
        let second = get_or_create_secret(&conn).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 44);
    }
}
