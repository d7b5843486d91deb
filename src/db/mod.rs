pub mod models;

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use anyhow::{Context, Result};
use base64::Engine;
use rand::RngCore;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

use crate::config;
use crate::db::models::{CreateOrgConnection, OrgConnection, UpdateOrgConnection};

pub struct Database {
    pool: SqlitePool,
    encryption_key: [u8; 32],
}

impl Database {
    /// Vytvoří novou instanci databáze a provede migrace
    pub async fn new() -> Result<Self> {
        let db_path = config::get_db_path()?;
        let db_url = format!("sqlite://{}", db_path.display());

        tracing::info!("Connecting to database: {}", db_url);

        let options = SqliteConnectOptions::from_str(&db_url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .context("Failed to connect to database")?;

        Self::run_migrations(&pool).await?;

        let encryption_key = config::load_or_create_key()?
            .try_into()
            .map_err(|_| anyhow::anyhow!("Invalid encryption key length"))?;

        Ok(Self {
            pool,
            encryption_key,
        })
    }

    /// Spustí SQL migrace
    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        tracing::info!("Running database migrations...");

        let migration_001 = include_str!("../../migrations/001_init.sql");
        sqlx::raw_sql(migration_001)
            .execute(pool)
            .await
            .context("Failed to run migration 001")?;

        tracing::info!("Migrations completed successfully");
        Ok(())
    }

    /// Získá všechna org připojení
    pub async fn get_orgs(&self) -> Result<Vec<OrgConnection>> {
        let orgs = sqlx::query_as::<_, OrgConnection>("SELECT * FROM orgs ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .context("Failed to fetch org connections")?;

        Ok(orgs)
    }

    /// Získá org připojení podle ID
    pub async fn get_org(&self, id: i64) -> Result<Option<OrgConnection>> {
        let org = sqlx::query_as::<_, OrgConnection>("SELECT * FROM orgs WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch org connection")?;

        Ok(org)
    }

    /// Vytvoří nové org připojení
    pub async fn create_org(&self, org: CreateOrgConnection) -> Result<i64> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "INSERT INTO orgs (name, url, insecure, token_encrypted)
             VALUES (?, ?, ?, ?)",
        )
        .bind(&org.name)
        .bind(&org.url)
        .bind(org.insecure)
        .bind::<Option<String>>(None)
        .execute(&mut *tx)
        .await
        .context("Failed to insert org connection")?;

        let org_id = result.last_insert_rowid();

        // Pokud je API token, ulož ho šifrovaně do DB
        if let Some(token) = org.api_token {
            let encrypted = self.encrypt_token(&token)?;
            sqlx::query("UPDATE orgs SET token_encrypted = ? WHERE id = ?")
                .bind(&encrypted)
                .bind(org_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        tracing::info!("Created org connection: {} (id: {})", org.name, org_id);
        Ok(org_id)
    }

    /// Aktualizuje org připojení
    pub async fn update_org(&self, id: i64, org: UpdateOrgConnection) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        let name = org.name.context("Missing org name")?;
        let url = org.url.context("Missing org url")?;
        let insecure = org.insecure.context("Missing org insecure flag")?;

        sqlx::query(
            "UPDATE orgs
             SET name = ?, url = ?, insecure = ?, updated_at = CURRENT_TIMESTAMP
             WHERE id = ?",
        )
        .bind(name)
        .bind(url)
        .bind(insecure)
        .bind(id)
        .execute(&mut *tx)
        .await
        .context("Failed to update org connection")?;

        if let Some(token) = org.api_token {
            let encrypted = self.encrypt_token(&token)?;
            sqlx::query("UPDATE orgs SET token_encrypted = ? WHERE id = ?")
                .bind(&encrypted)
                .bind(id)
                .execute(&mut *tx)
                .await
                .context("Failed to update org token")?;
        }

        tx.commit().await?;
        tracing::info!("Updated org connection: {}", id);
        Ok(())
    }

    /// Smaže org připojení
    pub async fn delete_org(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM orgs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete org connection")?;

        tracing::info!("Deleted org connection: {}", id);
        Ok(())
    }

    /// Získá API token pro org (dešifruje z DB)
    pub async fn get_org_token(&self, org: &OrgConnection) -> Option<String> {
        let encrypted = org.token_encrypted.as_ref()?;

        match self.decrypt_token(encrypted) {
            Ok(token) => Some(token),
            Err(e) => {
                tracing::warn!("Failed to decrypt API token for org {}: {}", org.id, e);
                None
            }
        }
    }

    fn encrypt_token(&self, token: &str) -> Result<String> {
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.encryption_key));
        let mut nonce_bytes = [0u8; 12];
        rand::rngs::OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);
        let ciphertext = cipher
            .encrypt(nonce, token.as_bytes())
            .map_err(|_| anyhow::anyhow!("Failed to encrypt API token"))?;

        let mut payload = Vec::with_capacity(nonce_bytes.len() + ciphertext.len());
        payload.extend_from_slice(&nonce_bytes);
        payload.extend_from_slice(&ciphertext);
        Ok(base64::prelude::BASE64_STANDARD.encode(payload))
    }

    fn decrypt_token(&self, encrypted: &str) -> Result<String> {
        let payload = base64::prelude::BASE64_STANDARD
            .decode(encrypted)
            .context("Failed to decode encrypted token")?;
        if payload.len() < 12 {
            return Err(anyhow::anyhow!("Encrypted token payload is too short"));
        }
        let (nonce_bytes, ciphertext) = payload.split_at(12);
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.encryption_key));
        let nonce = Nonce::from_slice(nonce_bytes);
        let plaintext = cipher
            .decrypt(nonce, ciphertext)
            .map_err(|_| anyhow::anyhow!("Failed to decrypt API token"))?;
        let token =
            String::from_utf8(plaintext).context("Decrypted token is not valid UTF-8")?;
        Ok(token)
    }

    #[allow(dead_code)]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
