use askama::Template;
use axum::{extract::State, http::StatusCode, response::Html};
use axum_extra::extract::CookieJar;
use std::sync::Arc;

use crate::handlers::orgs::{get_active_org, AppState};
use crate::models::{
    project_jobs, project_licenses, project_limits, project_trust, JobView, LicenseView,
    LimitView, TrustView,
};
use crate::org::OrgClient;
use crate::templates::{
    DashboardTemplate, JobsPanelTemplate, LicensesPanelTemplate, LimitsPanelTemplate,
    PageContext, TrustPanelTemplate,
};

const FETCH_TIMEOUT: tokio::time::Duration = tokio::time::Duration::from_secs(30);

/// GET /dashboard - Celá stránka, všechny čtyři zdroje najednou
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<Html<String>, (StatusCode, String)> {
    let active_org = get_active_org(&state, &jar).await;
    let org_name = active_org.as_ref().map(|org| org.name.clone());

    let (limits, licenses, jobs, trust) = match &active_org {
        Some(org) => match build_client(&state, org).await {
            Some(client) => {
                // zdroje jsou nezávislé, selhání jednoho neblokuje ostatní
                let (limits, licenses, jobs, trust) = tokio::join!(
                    load_limits(&client),
                    load_licenses(&client),
                    load_jobs(&client),
                    load_trust(&client),
                );
                (limits, licenses, jobs, Some(trust))
            }
            None => (None, None, None, Some(TrustView::error_placeholder())),
        },
        None => (None, None, None, None),
    };

    let ctx = PageContext::new(active_org);
    let template = DashboardTemplate {
        org_name,
        ctx,
        limits,
        licenses,
        jobs,
        trust,
    };

    template
        .render()
        .map(Html)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

/// GET /dashboard/limits - Fragment pro refresh sekce limitů
pub async fn limits_panel(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<Html<String>, (StatusCode, String)> {
    let limits = match active_client(&state, &jar).await {
        Some(client) => load_limits(&client).await,
        None => None,
    };

    LimitsPanelTemplate { limits }
        .render()
        .map(Html)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

/// GET /dashboard/licenses - Fragment pro refresh sekce licencí
pub async fn licenses_panel(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<Html<String>, (StatusCode, String)> {
    let licenses = match active_client(&state, &jar).await {
        Some(client) => load_licenses(&client).await,
        None => None,
    };

    LicensesPanelTemplate { licenses }
        .render()
        .map(Html)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

/// GET /dashboard/jobs - Fragment pro refresh sekce selhaných jobů
pub async fn jobs_panel(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<Html<String>, (StatusCode, String)> {
    let jobs = match active_client(&state, &jar).await {
        Some(client) => load_jobs(&client).await,
        None => None,
    };

    JobsPanelTemplate { jobs }
        .render()
        .map(Html)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

/// GET /dashboard/trust - Fragment pro refresh trust sekce
pub async fn trust_panel(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<Html<String>, (StatusCode, String)> {
    let trust = match active_client(&state, &jar).await {
        Some(client) => Some(load_trust(&client).await),
        None => None,
    };

    TrustPanelTemplate { trust }
        .render()
        .map(Html)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

/// Klient pro aktivní org z cookie, None pokud žádný není vybraný
async fn active_client(state: &AppState, jar: &CookieJar) -> Option<OrgClient> {
    let org = get_active_org(state, jar).await?;
    build_client(state, &org).await
}

async fn build_client(
    state: &AppState,
    org: &crate::db::models::OrgConnection,
) -> Option<OrgClient> {
    let token = state.db.get_org_token(org).await;

    match OrgClient::new(org.url.clone(), org.insecure, token) {
        Ok(client) => Some(client),
        Err(e) => {
            tracing::error!("Failed to build client for org {}: {}", org.name, e);
            None
        }
    }
}

async fn load_limits(client: &OrgClient) -> Option<Vec<LimitView>> {
    match tokio::time::timeout(FETCH_TIMEOUT, client.get_limits()).await {
        Ok(Ok(raw)) => Some(project_limits(raw)),
        Ok(Err(e)) => {
            tracing::error!("Failed to load limits: {}", e);
            None
        }
        Err(_) => {
            tracing::error!("Timeout loading limits");
            None
        }
    }
}

async fn load_licenses(client: &OrgClient) -> Option<Vec<LicenseView>> {
    match tokio::time::timeout(FETCH_TIMEOUT, client.get_license_usage()).await {
        Ok(Ok(raw)) => Some(project_licenses(raw)),
        Ok(Err(e)) => {
            tracing::error!("Failed to load license usage: {}", e);
            None
        }
        Err(_) => {
            tracing::error!("Timeout loading license usage");
            None
        }
    }
}

async fn load_jobs(client: &OrgClient) -> Option<Vec<JobView>> {
    match tokio::time::timeout(FETCH_TIMEOUT, client.get_failed_jobs()).await {
        Ok(Ok(raw)) => Some(project_jobs(raw)),
        Ok(Err(e)) => {
            tracing::error!("Failed to load failed jobs: {}", e);
            None
        }
        Err(_) => {
            tracing::error!("Timeout loading failed jobs");
            None
        }
    }
}

/// Trust sekce nikdy neselže do prázdna - místo chyby se vykreslí
/// degradovaný placeholder (instance "Error", status "Unknown")
async fn load_trust(client: &OrgClient) -> TrustView {
    match tokio::time::timeout(FETCH_TIMEOUT, client.get_trust_status()).await {
        Ok(Ok(payload)) => project_trust(payload),
        Ok(Err(e)) => {
            tracing::error!("Trust load error: {}", e);
            TrustView::error_placeholder()
        }
        Err(_) => {
            tracing::error!("Timeout loading trust status");
            TrustView::error_placeholder()
        }
    }
}
