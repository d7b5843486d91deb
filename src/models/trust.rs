use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::org::api::{
    EventRecord, IncidentRecord, MaintenanceRecord, ServiceRecord, TrustPayload,
};
use crate::utils::{trust_icon_name, trust_status_class};

const DATE_FORMAT: &str = "%b %-d, %Y %H:%M";
const RELEASE_DATE_FORMAT: &str = "%b %-d, %Y";

/// Incident se statusem v těchto hodnotách (po uppercase) patří mezi vyřešené
const RESOLVED_STATUSES: [&str; 2] = ["RESOLVED", "COMPLETED"];

/// Služba s tímto statusem je zdravá
const HEALTHY_STATUSES: [&str; 2] = ["OK", "Available"];

/// Událost incidentu: zobrazovaný čas + parsovaný čas pro řazení.
/// Obojí se může rozejít, když parsování selže (zobrazí se surový string,
/// řadí se podle best-effort času).
#[derive(Debug, Clone, Serialize)]
pub struct EventView {
    pub display_date: String,
    pub message: String,
    pub raw_date: DateTime<Utc>,
}

/// Incident s vyčištěnou zprávou a událostmi od nejnovější
#[derive(Debug, Clone, Serialize)]
pub struct IncidentView {
    pub id: String,
    pub status: String,
    pub message: String,
    pub formatted_events: Vec<EventView>,
}

impl IncidentView {
    /// Čas poslední události; incident bez událostí řadíme jako nejstarší
    fn latest_event(&self) -> DateTime<Utc> {
        self.formatted_events
            .first()
            .map(|event| event.raw_date)
            .unwrap_or(DateTime::UNIX_EPOCH)
    }
}

/// Stav jedné služby platformy pro řádek tabulky
#[derive(Debug, Clone, Serialize)]
pub struct ServiceView {
    pub key: String,
    pub name: String,
    pub status: String,
    pub icon_name: String,
    pub icon_variant: String,
    pub row_class: String,
}

/// Kompletní trust sekce dashboardu. Staví se celá najednou,
/// po sestavení se už žádné pole nepatchuje.
#[derive(Debug, Clone, Serialize)]
pub struct TrustView {
    pub instance: String,
    pub status: String,
    pub location: String,
    pub release_version: String,
    pub api_version: String,
    pub status_class: String,
    pub icon_name: String,
    pub active_incidents: Vec<IncidentView>,
    pub resolved_incidents: Vec<IncidentView>,
    pub has_active: bool,
    pub has_resolved: bool,
    pub services: Vec<ServiceView>,
    pub show_maintenance_alert: bool,
    pub maintenance_name: String,
    pub maintenance_start_display: String,
    pub next_release_display: String,
}

impl TrustView {
    /// Degradovaný stav při selhání fetch/parse - nikdy nepropagujeme chybu
    /// do vykreslování
    pub fn error_placeholder() -> Self {
        Self {
            instance: "Error".to_string(),
            status: "Unknown".to_string(),
            location: String::new(),
            release_version: String::new(),
            api_version: String::new(),
            status_class: trust_status_class("Unknown").to_string(),
            icon_name: trust_icon_name("Unknown").to_string(),
            active_incidents: Vec::new(),
            resolved_incidents: Vec::new(),
            has_active: false,
            has_resolved: false,
            services: Vec::new(),
            show_maintenance_alert: false,
            maintenance_name: String::new(),
            maintenance_start_display: String::new(),
            next_release_display: String::new(),
        }
    }
}

/// Převede trust payload na view model: formátuje služby, rozdělí incidenty
/// na aktivní/vyřešené, seřadí události i incidenty od nejnovějších
pub fn project_trust(payload: TrustPayload) -> TrustView {
    let services: Vec<ServiceView> = payload.services.into_iter().map(project_service).collect();

    // alert jen při isUrgent == true, cokoliv jiného ho shodí;
    // přepočítává se při každém načtení
    let show_maintenance_alert = payload
        .next_maintenance
        .as_ref()
        .and_then(|m| m.is_urgent)
        .unwrap_or(false);

    let (maintenance_name, maintenance_start_display) = payload
        .next_maintenance
        .map(maintenance_display)
        .unwrap_or_default();

    let next_release_display = payload
        .next_release_date
        .map(|raw| format_date(&raw, RELEASE_DATE_FORMAT))
        .unwrap_or_default();

    let now = Utc::now();
    let mut active_incidents = Vec::new();
    let mut resolved_incidents = Vec::new();

    for incident in payload.incidents {
        let view = project_incident(incident, now);
        // chybějící status je prázdný string, ten je aktivní
        if RESOLVED_STATUSES.contains(&view.status.to_uppercase().as_str()) {
            resolved_incidents.push(view);
        } else {
            active_incidents.push(view);
        }
    }

    active_incidents.sort_by(|a, b| b.latest_event().cmp(&a.latest_event()));
    resolved_incidents.sort_by(|a, b| b.latest_event().cmp(&a.latest_event()));

    TrustView {
        status_class: trust_status_class(&payload.status).to_string(),
        icon_name: trust_icon_name(&payload.status).to_string(),
        has_active: !active_incidents.is_empty(),
        has_resolved: !resolved_incidents.is_empty(),
        instance: payload.instance,
        status: payload.status,
        location: payload.location,
        release_version: payload.release_version,
        api_version: payload.api_version,
        active_incidents,
        resolved_incidents,
        services,
        show_maintenance_alert,
        maintenance_name,
        maintenance_start_display,
        next_release_display,
    }
}

fn project_service(record: ServiceRecord) -> ServiceView {
    // neúplná data z upstreamu: chybějící status bereme jako zdravý
    let status = record.status.unwrap_or_else(|| "OK".to_string());
    let healthy = HEALTHY_STATUSES.contains(&status.as_str());

    let key = match record.key {
        Some(key) if !key.is_empty() => key,
        _ => record.name.clone(),
    };

    let (icon_name, icon_variant, row_class) = if healthy {
        ("ti-circle-check", "success", "service-row service-ok")
    } else {
        ("ti-alert-triangle", "danger", "service-row service-issue")
    };

    ServiceView {
        key,
        name: record.name,
        status,
        icon_name: icon_name.to_string(),
        icon_variant: icon_variant.to_string(),
        row_class: row_class.to_string(),
    }
}

fn project_incident(record: IncidentRecord, now: DateTime<Utc>) -> IncidentView {
    // lokalizované objekty nejsou vykreslitelné jako prostý text
    let message = record
        .message
        .as_ref()
        .and_then(|m| m.as_text())
        .unwrap_or_default()
        .to_string();

    let mut formatted_events: Vec<EventView> = record
        .incident_events
        .into_iter()
        .map(|event| project_event(event, now))
        .collect();

    formatted_events.sort_by(|a, b| b.raw_date.cmp(&a.raw_date));

    IncidentView {
        id: record.id,
        status: record.status,
        message,
        formatted_events,
    }
}

fn project_event(event: EventRecord, now: DateTime<Utc>) -> EventView {
    // novější API posílá createdDate, starší createdAt
    let source = event.created_date.or(event.created_at);

    let (display_date, raw_date) = match source {
        None => (String::new(), DateTime::UNIX_EPOCH),
        Some(raw) => match DateTime::parse_from_rfc3339(&raw) {
            Ok(parsed) => {
                let parsed = parsed.with_timezone(&Utc);
                (parsed.format(DATE_FORMAT).to_string(), parsed)
            }
            // nefatální: zobrazí se surový string, řadí se jako "teď"
            Err(_) => (raw, now),
        },
    };

    EventView {
        display_date,
        message: event.message,
        raw_date,
    }
}

fn maintenance_display(maintenance: MaintenanceRecord) -> (String, String) {
    let start = maintenance
        .planned_start_time
        .map(|raw| format_date(&raw, DATE_FORMAT))
        .unwrap_or_default();

    (maintenance.name, start)
}

fn format_date(raw: &str, format: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => parsed.with_timezone(&Utc).format(format).to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::org::api::IncidentMessage;

    fn event(timestamp: &str) -> EventRecord {
        EventRecord {
            created_date: Some(timestamp.to_string()),
            created_at: None,
            message: String::new(),
        }
    }

    fn incident(status: &str, events: Vec<EventRecord>) -> IncidentRecord {
        IncidentRecord {
            id: "inc-1".to_string(),
            status: status.to_string(),
            message: None,
            incident_events: events,
        }
    }

    fn payload(incidents: Vec<IncidentRecord>) -> TrustPayload {
        TrustPayload {
            instance: "EU45".to_string(),
            status: "OK".to_string(),
            location: "Frankfurt".to_string(),
            release_version: "Winter '27".to_string(),
            api_version: "62.0".to_string(),
            incidents,
            services: Vec::new(),
            next_maintenance: None,
            next_release_date: None,
        }
    }

    #[test]
    fn test_partition_is_case_insensitive() {
        let view = project_trust(payload(vec![
            incident("Resolved", vec![]),
            incident("COMPLETED", vec![]),
            incident("resolved", vec![]),
            incident("Active", vec![]),
        ]));

        assert_eq!(view.resolved_incidents.len(), 3);
        assert_eq!(view.active_incidents.len(), 1);
        assert!(view.has_active);
        assert!(view.has_resolved);
    }

    #[test]
    fn test_missing_status_is_active() {
        let view = project_trust(payload(vec![incident("", vec![])]));
        assert_eq!(view.active_incidents.len(), 1);
        assert!(view.resolved_incidents.is_empty());
        assert!(!view.has_resolved);
    }

    #[test]
    fn test_events_sorted_newest_first() {
        let view = project_trust(payload(vec![incident(
            "Active",
            vec![
                event("2026-08-02T10:00:00+00:00"), // T2
                event("2026-08-01T10:00:00+00:00"), // T1
                event("2026-08-03T10:00:00+00:00"), // T3
            ],
        )]));

        let displays: Vec<&str> = view.active_incidents[0]
            .formatted_events
            .iter()
            .map(|e| e.display_date.as_str())
            .collect();
        assert_eq!(
            displays,
            vec!["Aug 3, 2026 10:00", "Aug 2, 2026 10:00", "Aug 1, 2026 10:00"]
        );
    }

    #[test]
    fn test_incidents_sorted_by_latest_event() {
        let mut older = incident("Active", vec![event("2026-08-01T00:00:00+00:00")]);
        older.id = "older".to_string();
        let mut newer = incident("Active", vec![event("2026-08-05T00:00:00+00:00")]);
        newer.id = "newer".to_string();

        let view = project_trust(payload(vec![older, newer]));
        let ids: Vec<&str> = view.active_incidents.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["newer", "older"]);
    }

    #[test]
    fn test_incident_without_events_sorts_last() {
        let mut empty = incident("Active", vec![]);
        empty.id = "empty".to_string();
        let mut dated = incident("Active", vec![event("2026-08-05T00:00:00+00:00")]);
        dated.id = "dated".to_string();

        let view = project_trust(payload(vec![empty, dated]));
        let ids: Vec<&str> = view.active_incidents.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["dated", "empty"]);
    }

    #[test]
    fn test_localized_message_is_dropped() {
        let mut inc = incident("Active", vec![]);
        inc.message = Some(IncidentMessage::Localized(
            serde_json::json!({"en_US": "translated"}),
        ));
        let view = project_trust(payload(vec![inc]));
        assert_eq!(view.active_incidents[0].message, "");
    }

    #[test]
    fn test_plain_text_message_is_preserved() {
        let mut inc = incident("Active", vec![]);
        inc.message = Some(IncidentMessage::Text("API degradation in EU45".to_string()));
        let view = project_trust(payload(vec![inc]));
        assert_eq!(view.active_incidents[0].message, "API degradation in EU45");
    }

    #[test]
    fn test_unparseable_event_keeps_raw_display_and_sorts_first() {
        let view = project_trust(payload(vec![incident(
            "Active",
            vec![event("2020-01-01T00:00:00+00:00"), event("not-a-date")],
        )]));

        let events = &view.active_incidents[0].formatted_events;
        // best-effort "teď" řadí rozbitý záznam před starou událost
        assert_eq!(events[0].display_date, "not-a-date");
        assert_eq!(events[1].display_date, "Jan 1, 2020 00:00");
    }

    #[test]
    fn test_event_without_timestamp_has_empty_display() {
        let bare = EventRecord {
            created_date: None,
            created_at: None,
            message: "investigating".to_string(),
        };
        let view = project_trust(payload(vec![incident("Active", vec![bare])]));
        let events = &view.active_incidents[0].formatted_events;
        assert_eq!(events[0].display_date, "");
        assert_eq!(events[0].raw_date, DateTime::UNIX_EPOCH);
    }

    #[test]
    fn test_created_at_fallback() {
        let legacy = EventRecord {
            created_date: None,
            created_at: Some("2026-08-03T10:00:00+00:00".to_string()),
            message: String::new(),
        };
        let view = project_trust(payload(vec![incident("Active", vec![legacy])]));
        assert_eq!(
            view.active_incidents[0].formatted_events[0].display_date,
            "Aug 3, 2026 10:00"
        );
    }

    #[test]
    fn test_maintenance_alert_requires_strict_true() {
        let mut with_urgent = payload(vec![]);
        with_urgent.next_maintenance = Some(MaintenanceRecord {
            name: "EU45 maintenance".to_string(),
            is_urgent: Some(true),
            planned_start_time: Some("2026-09-01T02:00:00+00:00".to_string()),
        });
        assert!(project_trust(with_urgent).show_maintenance_alert);

        let mut not_urgent = payload(vec![]);
        not_urgent.next_maintenance = Some(MaintenanceRecord {
            name: "EU45 maintenance".to_string(),
            is_urgent: Some(false),
            planned_start_time: None,
        });
        assert!(!project_trust(not_urgent).show_maintenance_alert);

        let mut missing_flag = payload(vec![]);
        missing_flag.next_maintenance = Some(MaintenanceRecord {
            name: "EU45 maintenance".to_string(),
            is_urgent: None,
            planned_start_time: None,
        });
        assert!(!project_trust(missing_flag).show_maintenance_alert);

        assert!(!project_trust(payload(vec![])).show_maintenance_alert);
    }

    #[test]
    fn test_service_health_and_defaults() {
        let services = vec![
            ServiceRecord {
                key: Some("core".to_string()),
                name: "Core services".to_string(),
                status: Some("OK".to_string()),
            },
            ServiceRecord {
                key: None,
                name: "Search".to_string(),
                status: Some("Available".to_string()),
            },
            ServiceRecord {
                key: None,
                name: "Streaming".to_string(),
                status: None,
            },
            ServiceRecord {
                key: Some("api".to_string()),
                name: "API".to_string(),
                status: Some("Degraded".to_string()),
            },
        ];

        let mut p = payload(vec![]);
        p.services = services;
        let view = project_trust(p);

        assert_eq!(view.services[0].key, "core");
        assert_eq!(view.services[0].row_class, "service-row service-ok");

        // fallback klíče na jméno
        assert_eq!(view.services[1].key, "Search");
        assert_eq!(view.services[1].icon_variant, "success");

        // chybějící status je zdravý default
        assert_eq!(view.services[2].status, "OK");
        assert_eq!(view.services[2].icon_name, "ti-circle-check");

        assert_eq!(view.services[3].row_class, "service-row service-issue");
        assert_eq!(view.services[3].icon_variant, "danger");
    }

    #[test]
    fn test_status_badge_classification() {
        let view = project_trust(payload(vec![]));
        assert_eq!(view.status_class, "status-badge status-ok");
        assert_eq!(view.icon_name, "ti-circle-check");

        let mut degraded = payload(vec![]);
        degraded.status = "MAJOR_INCIDENT_CORE".to_string();
        let view = project_trust(degraded);
        assert_eq!(view.status_class, "status-badge status-issue");
        assert_eq!(view.icon_name, "ti-alert-triangle");
    }

    #[test]
    fn test_error_placeholder() {
        let view = TrustView::error_placeholder();
        assert_eq!(view.instance, "Error");
        assert_eq!(view.status, "Unknown");
        assert!(view.active_incidents.is_empty());
        assert!(!view.show_maintenance_alert);
        assert_eq!(view.status_class, "status-badge status-issue");
    }

    #[test]
    fn test_next_release_date_formatted() {
        let mut p = payload(vec![]);
        p.next_release_date = Some("2026-10-10T00:00:00+00:00".to_string());
        assert_eq!(project_trust(p).next_release_display, "Oct 10, 2026");
    }
}
