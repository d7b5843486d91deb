use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::org::api::JobRecord;

const DATE_FORMAT: &str = "%b %-d, %Y %H:%M";

/// Selhaný job se zploštělým názvem třídy pro tabulku
#[derive(Debug, Clone, Serialize)]
pub struct JobView {
    pub id: String,
    pub job_type: String,
    pub status: String,
    pub extended_status: String,
    pub apex_class_name: String,
    pub number_of_errors: i64,
    pub created_display: String,
}

/// Průchozí augmentace: žádné filtrování ani řazení
pub fn project_jobs(raw: Vec<JobRecord>) -> Vec<JobView> {
    raw.into_iter().map(project_job).collect()
}

fn project_job(record: JobRecord) -> JobView {
    let apex_class_name = match record.apex_class {
        Some(class) if !class.name.is_empty() => class.name,
        _ => "Anonymous".to_string(),
    };

    let created_display = record
        .created_date
        .map(|raw| format_timestamp(&raw))
        .unwrap_or_default();

    JobView {
        id: record.id,
        job_type: record.job_type,
        status: record.status,
        extended_status: record.extended_status.unwrap_or_default(),
        apex_class_name,
        number_of_errors: record.number_of_errors,
        created_display,
    }
}

/// Nevalidní timestamp se zobrazí tak jak přišel
fn format_timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => parsed.with_timezone(&Utc).format(DATE_FORMAT).to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::org::api::ApexClassRef;

    fn record(apex_class: Option<ApexClassRef>) -> JobRecord {
        JobRecord {
            id: "707000000000001".to_string(),
            job_type: "BatchApex".to_string(),
            status: "Failed".to_string(),
            extended_status: Some("First error: NullPointerException".to_string()),
            created_date: Some("2026-08-20T14:30:00+00:00".to_string()),
            number_of_errors: 1,
            apex_class,
        }
    }

    #[test]
    fn test_class_name_flattened() {
        let views = project_jobs(vec![record(Some(ApexClassRef {
            name: "NightlySyncBatch".to_string(),
        }))]);
        assert_eq!(views[0].apex_class_name, "NightlySyncBatch");
    }

    #[test]
    fn test_missing_class_defaults_to_anonymous() {
        let views = project_jobs(vec![record(None)]);
        assert_eq!(views[0].apex_class_name, "Anonymous");
    }

    #[test]
    fn test_empty_class_name_defaults_to_anonymous() {
        let views = project_jobs(vec![record(Some(ApexClassRef { name: String::new() }))]);
        assert_eq!(views[0].apex_class_name, "Anonymous");
    }

    #[test]
    fn test_created_date_formatted() {
        let views = project_jobs(vec![record(None)]);
        assert_eq!(views[0].created_display, "Aug 20, 2026 14:30");
    }

    #[test]
    fn test_unparseable_date_kept_verbatim() {
        let mut rec = record(None);
        rec.created_date = Some("yesterday-ish".to_string());
        let views = project_jobs(vec![rec]);
        assert_eq!(views[0].created_display, "yesterday-ish");
    }
}
