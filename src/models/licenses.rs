use serde::Serialize;

use crate::org::api::LicenseRecord;
use crate::utils::{format_number, license_bar_class};

/// Licence připravená k vykreslení jako progress bar
#[derive(Debug, Clone, Serialize)]
pub struct LicenseView {
    pub master_label: String,
    pub status: String,
    pub used_licenses: i64,
    pub total_licenses: i64,
    pub display_used: String,
    pub display_total: String,
    pub percent: f64,
    pub bar_class: String,
    pub style_width: String,
}

/// Stejné pořadí i počet jako vstup, jen dopočítané procento a CSS
pub fn project_licenses(raw: Vec<LicenseRecord>) -> Vec<LicenseView> {
    raw.into_iter().map(project_license).collect()
}

fn project_license(record: LicenseRecord) -> LicenseView {
    // total = 0 znamená nakonfigurovaný ale nepoužitý typ licence,
    // zobrazí se jako 0 % místo dělení nulou
    let percent = if record.total_licenses == 0 {
        0.0
    } else {
        (record.used_licenses as f64 / record.total_licenses as f64) * 100.0
    };

    LicenseView {
        master_label: record.master_label,
        status: record.status,
        display_used: format_number(record.used_licenses.max(0) as u64),
        display_total: format_number(record.total_licenses.max(0) as u64),
        used_licenses: record.used_licenses,
        total_licenses: record.total_licenses,
        percent,
        bar_class: license_bar_class(percent),
        style_width: format!("width: {}%", percent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(used: i64, total: i64) -> LicenseRecord {
        LicenseRecord {
            master_label: "Salesforce".to_string(),
            status: "Active".to_string(),
            used_licenses: used,
            total_licenses: total,
        }
    }

    #[test]
    fn test_percent_is_unrounded() {
        let view = project_license(record(1, 3));
        assert!((view.percent - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(project_license(record(80, 100)).bar_class, "progress-bar-fill bg-healthy");
        assert_eq!(project_license(record(81, 100)).bar_class, "progress-bar-fill bg-warning");
        assert_eq!(project_license(record(95, 100)).bar_class, "progress-bar-fill bg-warning");
        assert_eq!(project_license(record(96, 100)).bar_class, "progress-bar-fill bg-critical");
    }

    #[test]
    fn test_zero_total_renders_zero_percent() {
        let view = project_license(record(5, 0));
        assert_eq!(view.percent, 0.0);
        assert_eq!(view.bar_class, "progress-bar-fill bg-healthy");
        assert_eq!(view.style_width, "width: 0%");
    }

    #[test]
    fn test_order_and_cardinality_preserved() {
        let raw = vec![record(1, 10), record(2, 10), record(3, 10)];
        let views = project_licenses(raw);
        assert_eq!(views.len(), 3);
        assert_eq!(views[0].used_licenses, 1);
        assert_eq!(views[2].used_licenses, 3);
    }

    #[test]
    fn test_display_counts_formatted() {
        let view = project_license(record(1200, 15000));
        assert_eq!(view.display_used, "1 200");
        assert_eq!(view.display_total, "15 000");
    }

    #[test]
    fn test_style_width() {
        let view = project_license(record(50, 100));
        assert_eq!(view.style_width, "width: 50%");
    }
}
