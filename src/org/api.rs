use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use super::client::{OrgApiError, OrgClient};

/// Jeden resource limit (kvóta) tak jak ho vrací backend.
/// Chybějící číselná pole se berou jako 0, ne jako NaN.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitRecord {
    #[serde(default)]
    pub used: f64,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub percent: f64,
}

/// Využití jednoho typu licence
#[derive(Debug, Clone, Deserialize)]
pub struct LicenseRecord {
    #[serde(rename = "MasterLabel", default)]
    pub master_label: String,
    #[serde(rename = "Status", default)]
    pub status: String,
    #[serde(rename = "UsedLicenses", default)]
    pub used_licenses: i64,
    #[serde(rename = "TotalLicenses", default)]
    pub total_licenses: i64,
}

/// Odkaz na třídu, ve které job běžel (nemusí existovat - anonymní joby)
#[derive(Debug, Clone, Deserialize)]
pub struct ApexClassRef {
    #[serde(rename = "Name", default)]
    pub name: String,
}

/// Selhaný background job
#[derive(Debug, Clone, Deserialize)]
pub struct JobRecord {
    #[serde(rename = "Id", default)]
    pub id: String,
    #[serde(rename = "JobType", default)]
    pub job_type: String,
    #[serde(rename = "Status", default)]
    pub status: String,
    #[serde(rename = "ExtendedStatus")]
    pub extended_status: Option<String>,
    #[serde(rename = "CreatedDate")]
    pub created_date: Option<String>,
    #[serde(rename = "NumberOfErrors", default)]
    pub number_of_errors: i64,
    #[serde(rename = "ApexClass")]
    pub apex_class: Option<ApexClassRef>,
}

/// Zpráva incidentu. Backend posílá buď prostý text, nebo lokalizovaný
/// objekt ({"en_US": "..."}). Rozliší se jednou při deserializaci,
/// dál už se s tím nikde nehádá.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IncidentMessage {
    Text(String),
    Localized(Value),
}

impl IncidentMessage {
    /// Vrátí text zprávy, lokalizované objekty se zahazují
    pub fn as_text(&self) -> Option<&str> {
        match self {
            IncidentMessage::Text(s) => Some(s),
            IncidentMessage::Localized(_) => None,
        }
    }
}

/// Událost v historii incidentu. Starší API posílá createdAt,
/// novější createdDate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventRecord {
    #[serde(rename = "createdDate")]
    pub created_date: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(default)]
    pub message: String,
}

/// Nahlášený výpadek služby s historií událostí
#[derive(Debug, Clone, Deserialize)]
pub struct IncidentRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub status: String,
    pub message: Option<IncidentMessage>,
    #[serde(rename = "IncidentEvents", default)]
    pub incident_events: Vec<EventRecord>,
}

/// Stav jedné služby platformy
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceRecord {
    pub key: Option<String>,
    #[serde(default)]
    pub name: String,
    pub status: Option<String>,
}

/// Plánovaná odstávka
#[derive(Debug, Clone, Deserialize)]
pub struct MaintenanceRecord {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "isUrgent")]
    pub is_urgent: Option<bool>,
    #[serde(rename = "plannedStartTime")]
    pub planned_start_time: Option<String>,
}

/// Agregovaný trust status platformy: incidenty, stav služeb, odstávky
#[derive(Debug, Clone, Deserialize)]
pub struct TrustPayload {
    #[serde(default)]
    pub instance: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "releaseVersion", default)]
    pub release_version: String,
    #[serde(rename = "apiVersion", default)]
    pub api_version: String,
    #[serde(default)]
    pub incidents: Vec<IncidentRecord>,
    #[serde(default)]
    pub services: Vec<ServiceRecord>,
    #[serde(rename = "nextMaintenance")]
    pub next_maintenance: Option<MaintenanceRecord>,
    #[serde(rename = "nextReleaseDate")]
    pub next_release_date: Option<String>,
}

impl OrgClient {
    /// Získá resource limity org (mapa název -> záznam)
    pub async fn get_limits(&self) -> Result<HashMap<String, LimitRecord>, OrgApiError> {
        self.get("/api/limits").await
    }

    /// Získá využití licencí
    pub async fn get_license_usage(&self) -> Result<Vec<LicenseRecord>, OrgApiError> {
        self.get("/api/licenses").await
    }

    /// Získá selhané background joby
    pub async fn get_failed_jobs(&self) -> Result<Vec<JobRecord>, OrgApiError> {
        self.get("/api/jobs/failed").await
    }

    /// Získá trust status platformy (incidenty, služby, odstávky)
    pub async fn get_trust_status(&self) -> Result<TrustPayload, OrgApiError> {
        self.get("/api/trust").await
    }
}
