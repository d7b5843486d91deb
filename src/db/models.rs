use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Nakonfigurované připojení k jednomu org backendu
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrgConnection {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub insecure: bool,
    pub token_encrypted: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrgConnection {
    pub name: String,
    pub url: String,
    pub insecure: bool,
    pub api_token: Option<String>, // Toto se uloží šifrovaně do DB
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateOrgConnection {
    pub name: Option<String>,
    pub url: Option<String>,
    pub insecure: Option<bool>,
    pub api_token: Option<String>, // Pokud je Some, aktualizuj šifrovaný token
}
