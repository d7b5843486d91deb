use askama::Template;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
    Form,
};
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use std::sync::Arc;

use crate::db::{
    models::{CreateOrgConnection, OrgConnection, UpdateOrgConnection},
    Database,
};
use crate::org::OrgClient;
use crate::templates::{OrgsTemplate, PageContext};

pub struct AppState {
    pub db: Database,
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Fragment se seznamem orgů pro HTMX swap po create/update/delete
fn render_orgs_list(orgs: &[OrgConnection], active_id: Option<i64>) -> String {
    if orgs.is_empty() {
        return r#"<div class="empty">
            <div class="empty-icon"><i class="ti ti-building-off"></i></div>
            <p class="empty-title">No orgs configured</p>
        </div>"#
            .to_string();
    }

    let items: Vec<String> = orgs
        .iter()
        .map(|org| {
            let is_active = active_id == Some(org.id);
            let active_badge = if is_active {
                r#"<span class="badge bg-green-lt ms-2">Active</span>"#
            } else {
                ""
            };
            let avatar_class = if is_active { "bg-green" } else { "" };
            let insecure_badge = if org.insecure {
                r#"<span class="badge bg-yellow-lt ms-2"><i class="ti ti-shield-off"></i> Insecure</span>"#
            } else {
                ""
            };
            let token_badge = if org.token_encrypted.is_some() {
                r#"<span class="badge bg-blue-lt ms-2"><i class="ti ti-key"></i> Token</span>"#
            } else {
                ""
            };

            format!(
                r##"<div class="list-group-item">
                <div class="row align-items-center">
                    <div class="col-auto">
                        <span class="avatar {avatar_class}"><i class="ti ti-building"></i></span>
                    </div>
                    <div class="col" style="cursor: pointer;" onclick="document.getElementById('select-form-{id}').submit();">
                        <div class="text-truncate"><strong>{name}</strong>{active_badge}</div>
                        <div class="text-muted"><code>{url}</code>{insecure_badge}{token_badge}</div>
                    </div>
                    <div class="col-auto">
                        <form id="select-form-{id}" action="/orgs/{id}/select" method="post" style="display: none;"></form>
                        <div class="btn-list">
                            <button class="btn btn-sm btn-icon btn-success"
                                onclick="event.stopPropagation(); testConnection(event, {id}, '{name_attr}')"
                                title="Test connection">
                                <i class="ti ti-plug-connected"></i>
                            </button>
                            <button class="btn btn-sm btn-icon btn-ghost-primary"
                                onclick="event.stopPropagation(); openEditOrg(this);"
                                data-org-id="{id}"
                                data-org-name="{name_attr}"
                                data-org-url="{url_attr}"
                                data-org-insecure="{insecure}"
                                title="Edit org">
                                <i class="ti ti-pencil"></i>
                            </button>
                            <button class="btn btn-sm btn-icon btn-ghost-danger"
                                onclick="event.stopPropagation(); confirmDelete({id}, '{name_attr}');"
                                title="Delete">
                                <i class="ti ti-trash"></i>
                            </button>
                        </div>
                    </div>
                </div>
            </div>"##,
                avatar_class = avatar_class,
                id = org.id,
                name = org.name,
                active_badge = active_badge,
                url = org.url,
                insecure_badge = insecure_badge,
                token_badge = token_badge,
                name_attr = escape_attr(&org.name),
                url_attr = escape_attr(&org.url),
                insecure = org.insecure,
            )
        })
        .collect();

    format!(
        r##"<div class="list-group list-group-flush">{}</div>"##,
        items.join("")
    )
}

#[derive(Deserialize)]
pub struct OrgForm {
    name: String,
    url: String,
    insecure: Option<String>,
    api_token: Option<String>,
}

fn normalize_token(token: Option<String>) -> Option<String> {
    token.filter(|t| !t.is_empty())
}

/// GET /orgs - Zobrazí seznam org připojení
pub async fn list_orgs(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<Html<String>, (StatusCode, String)> {
    let orgs = state
        .db
        .get_orgs()
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let active_org = get_active_org(&state, &jar).await;
    let ctx = PageContext::new(active_org);

    let template = OrgsTemplate { orgs, ctx };

    template
        .render()
        .map(Html)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

/// POST /orgs - Vytvoří nové org připojení
pub async fn create_org(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<OrgForm>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let create = CreateOrgConnection {
        name: form.name,
        url: form.url,
        insecure: form.insecure.is_some(),
        api_token: normalize_token(form.api_token),
    };

    if let Err(e) = state.db.create_org(create).await {
        tracing::error!("Failed to create org connection: {}", e);
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to save org connection: {}", e),
        ));
    }

    refreshed_list(&state, &jar).await
}

/// PUT /orgs/:id - Aktualizuje org připojení
pub async fn update_org(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    jar: CookieJar,
    Form(form): Form<OrgForm>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let update = UpdateOrgConnection {
        name: Some(form.name),
        url: Some(form.url),
        insecure: Some(form.insecure.is_some()),
        api_token: normalize_token(form.api_token),
    };

    state
        .db
        .update_org(id, update)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    refreshed_list(&state, &jar).await
}

/// DELETE /orgs/:id - Smaže org připojení
pub async fn delete_org(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    jar: CookieJar,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    state
        .db
        .delete_org(id)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    refreshed_list(&state, &jar).await
}

async fn refreshed_list(
    state: &AppState,
    jar: &CookieJar,
) -> Result<Html<String>, (StatusCode, String)> {
    let orgs = state
        .db
        .get_orgs()
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let active_id = get_active_org(state, jar).await.map(|org| org.id);
    Ok(Html(render_orgs_list(&orgs, active_id)))
}

/// POST /orgs/:id/select - Vybere org jako aktivní
pub async fn select_org(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), (StatusCode, String)> {
    // Ověř že org existuje
    let org = state
        .db
        .get_org(id)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    if org.is_none() {
        return Err((StatusCode::NOT_FOUND, "Org connection not found".to_string()));
    }

    // Nastav cookie s ID orgu (platnost 30 dní)
    let cookie = Cookie::build(("active_org_id", id.to_string()))
        .path("/")
        .max_age(time::Duration::days(30))
        .build();

    let jar = jar.add(cookie);

    Ok((jar, Redirect::to("/dashboard")))
}

/// Helper funkce - získá aktivní org z cookie
pub async fn get_active_org(state: &AppState, jar: &CookieJar) -> Option<OrgConnection> {
    let org_id = jar.get("active_org_id")?.value().parse::<i64>().ok()?;

    state.db.get_org(org_id).await.ok()?
}

/// POST /orgs/:id/test - Otestuje připojení k org backendu
pub async fn test_org(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<axum::Json<serde_json::Value>, (StatusCode, String)> {
    let org = state
        .db
        .get_org(id)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let org = match org {
        Some(o) => o,
        None => return Err((StatusCode::NOT_FOUND, "Org connection not found".to_string())),
    };

    let token = state.db.get_org_token(&org).await;

    let client = OrgClient::new(org.url.clone(), org.insecure, token)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    match client.info().await {
        Ok(info) => Ok(axum::Json(serde_json::json!({
            "success": true,
            "message": format!("Connected to {}", info.name),
            "apiVersion": info.api_version,
        }))),
        Err(e) => Ok(axum::Json(serde_json::json!({
            "success": false,
            "message": format!("Connection failed: {}", e),
        }))),
    }
}
