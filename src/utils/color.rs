/// Vrací barvu kruhového ukazatele podle zaokrouhleného procenta limitu
/// Hranice: 90 je ještě oranžová, 75 je ještě modrá
pub fn limit_gauge_color(percent: i64) -> &'static str {
    if percent > 90 {
        "#ef4444" // červená
    } else if percent > 75 {
        "#f59e0b" // oranžová
    } else {
        "#3b82f6" // modrá
    }
}

/// Vrací CSS třídu progress baru podle nezaokrouhleného procenta licencí
pub fn license_bar_class(percent: f64) -> String {
    let tier = if percent > 95.0 {
        "bg-critical"
    } else if percent > 80.0 {
        "bg-warning"
    } else {
        "bg-healthy"
    };

    format!("progress-bar-fill {}", tier)
}

/// CSS třída status badge podle celkového stavu instance
pub fn trust_status_class(status: &str) -> &'static str {
    if status == "OK" {
        "status-badge status-ok"
    } else {
        "status-badge status-issue"
    }
}

/// Ikona podle celkového stavu instance
pub fn trust_icon_name(status: &str) -> &'static str {
    if status == "OK" {
        "ti-circle-check"
    } else {
        "ti-alert-triangle"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_gauge_color_boundaries() {
        assert_eq!(limit_gauge_color(75), "#3b82f6");
        assert_eq!(limit_gauge_color(76), "#f59e0b");
        assert_eq!(limit_gauge_color(90), "#f59e0b");
        assert_eq!(limit_gauge_color(91), "#ef4444");
        assert_eq!(limit_gauge_color(0), "#3b82f6");
        assert_eq!(limit_gauge_color(100), "#ef4444");
    }

    #[test]
    fn test_license_bar_class_boundaries() {
        assert_eq!(license_bar_class(80.0), "progress-bar-fill bg-healthy");
        assert_eq!(license_bar_class(81.0), "progress-bar-fill bg-warning");
        assert_eq!(license_bar_class(95.0), "progress-bar-fill bg-warning");
        assert_eq!(license_bar_class(96.0), "progress-bar-fill bg-critical");
    }

    #[test]
    fn test_trust_status_class() {
        assert_eq!(trust_status_class("OK"), "status-badge status-ok");
        assert_eq!(trust_status_class("MAJOR_INCIDENT_CORE"), "status-badge status-issue");
        assert_eq!(trust_icon_name("OK"), "ti-circle-check");
        assert_eq!(trust_icon_name("Unknown"), "ti-alert-triangle");
    }
}
