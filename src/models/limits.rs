use serde::Serialize;
use std::collections::HashMap;
use std::f64::consts::PI;

use crate::org::api::LimitRecord;
use crate::utils::{abbreviate_count, limit_gauge_color};

/// Poloměr kruhového ukazatele v SVG jednotkách
const GAUGE_RADIUS: f64 = 32.0;

/// Resource limit připravený k vykreslení: barva, geometrie kruhového
/// ukazatele (stroke-dashoffset) a zkrácené hodnoty
#[derive(Debug, Clone, Serialize)]
pub struct LimitView {
    pub key: String,
    pub used: f64,
    pub total: f64,
    pub percent: i64,
    pub color: String,
    pub circumference: f64,
    pub offset: f64,
    pub display_used: String,
    pub display_total: String,
}

/// Převede mapu limitů na seřazený seznam view modelů.
/// Pořadí z backendu není stabilní, řadí se podle klíče.
pub fn project_limits(raw: HashMap<String, LimitRecord>) -> Vec<LimitView> {
    let mut entries: Vec<(String, LimitRecord)> = raw.into_iter().collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    entries
        .into_iter()
        .map(|(key, record)| project_limit(key, record))
        .collect()
}

fn project_limit(key: String, record: LimitRecord) -> LimitView {
    let percent = record.percent.round() as i64;

    // offset = obvod při 0 % (nic nenakresleno), 0 při 100 %
    let circumference = 2.0 * PI * GAUGE_RADIUS;
    let offset = circumference - (percent as f64 / 100.0) * circumference;

    LimitView {
        color: limit_gauge_color(percent).to_string(),
        display_used: abbreviate_count(record.used),
        display_total: abbreviate_count(record.total),
        used: record.used,
        total: record.total,
        key,
        percent,
        circumference,
        offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(used: f64, total: f64, percent: f64) -> LimitRecord {
        LimitRecord { used, total, percent }
    }

    fn project_one(percent: f64) -> LimitView {
        project_limit("ApiRequests".to_string(), record(0.0, 100.0, percent))
    }

    #[test]
    fn test_gauge_geometry_endpoints() {
        let full = project_one(100.0);
        assert!(full.offset.abs() < 1e-9);

        let empty = project_one(0.0);
        assert!((empty.offset - empty.circumference).abs() < 1e-9);

        assert!((full.circumference - 2.0 * PI * 32.0).abs() < 1e-9);
    }

    #[test]
    fn test_gauge_offset_is_linear_in_percent() {
        let half = project_one(50.0);
        assert!((half.offset - half.circumference * 0.5).abs() < 1e-9);

        let quarter = project_one(25.0);
        assert!((quarter.offset - quarter.circumference * 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_color_tier_boundaries() {
        assert_eq!(project_one(75.0).color, "#3b82f6");
        assert_eq!(project_one(76.0).color, "#f59e0b");
        assert_eq!(project_one(90.0).color, "#f59e0b");
        assert_eq!(project_one(91.0).color, "#ef4444");
    }

    #[test]
    fn test_percent_is_rounded() {
        assert_eq!(project_one(90.4).percent, 90);
        assert_eq!(project_one(90.5).percent, 91);
        // zaokrouhlení rozhoduje i o barvě
        assert_eq!(project_one(90.5).color, "#ef4444");
    }

    #[test]
    fn test_display_abbreviation() {
        let view = project_limit("DataStorageMB".to_string(), record(1500.0, 999.0, 10.0));
        assert_eq!(view.display_used, "1.5k");
        assert_eq!(view.display_total, "999");
    }

    #[test]
    fn test_missing_percent_falls_back_to_blue() {
        // chybějící percent se deserializuje na 0, žádné NaN v barvách
        let rec: LimitRecord = serde_json::from_str(r#"{"used": 5, "total": 10}"#).unwrap();
        let view = project_limit("Sandboxes".to_string(), rec);
        assert_eq!(view.percent, 0);
        assert_eq!(view.color, "#3b82f6");
    }

    #[test]
    fn test_projection_sorted_by_key() {
        let mut raw = HashMap::new();
        raw.insert("DailyApiRequests".to_string(), record(1.0, 10.0, 10.0));
        raw.insert("ApexExecutions".to_string(), record(2.0, 10.0, 20.0));
        raw.insert("FileStorageMB".to_string(), record(3.0, 10.0, 30.0));

        let views = project_limits(raw);
        let keys: Vec<&str> = views.iter().map(|v| v.key.as_str()).collect();
        assert_eq!(keys, vec!["ApexExecutions", "DailyApiRequests", "FileStorageMB"]);
    }
}
