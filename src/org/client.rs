use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Chyby při komunikaci s org-health backendem.
/// Transport = síť/DNS/TLS, Status = HTTP chyba, Decode = nevalidní JSON.
#[derive(Debug, Error)]
pub enum OrgApiError {
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("backend returned {status} for {path}: {body}")]
    Status {
        path: String,
        status: u16,
        body: String,
    },

    #[error("failed to decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Debug, Clone)]
pub struct OrgClient {
    base_url: String,
    client: Client,
    api_token: Option<String>,
}

/// Odpověď na /api/info (používá se pro test připojení)
#[derive(Debug, Deserialize)]
pub struct OrgInfo {
    pub name: String,
    #[serde(rename = "apiVersion")]
    pub api_version: String,
}

impl OrgClient {
    pub fn new(base_url: String, insecure: bool, api_token: Option<String>) -> anyhow::Result<Self> {
        // Ořízni trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .danger_accept_invalid_certs(insecure)
            .build()?;

        Ok(Self {
            base_url,
            client,
            api_token,
        })
    }

    /// Ověří dostupnost backendu a vrátí jméno org + verzi API
    pub async fn info(&self) -> Result<OrgInfo, OrgApiError> {
        let info: OrgInfo = self.get("/api/info").await?;

        tracing::info!("Connected to org '{}' (API {})", info.name, info.api_version);
        Ok(info)
    }

    /// Univerzální GET request s bearer tokenem
    pub async fn get<T>(&self, path: &str) -> Result<T, OrgApiError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));

        let mut request = self.client.get(&url);

        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|source| OrgApiError::Transport {
            path: path.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            return Err(OrgApiError::Status {
                path: path.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        response.json::<T>().await.map_err(|source| OrgApiError::Decode {
            path: path.to_string(),
            source,
        })
    }

    #[allow(dead_code)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
