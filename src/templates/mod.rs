use askama::Template;

use crate::db::models::OrgConnection;
use crate::models::{JobView, LicenseView, LimitView, TrustView};

// Shared context pro všechny stránky
#[derive(Clone)]
pub struct PageContext {
    pub active_org: Option<OrgConnection>,
}

impl PageContext {
    pub fn new(active_org: Option<OrgConnection>) -> Self {
        Self { active_org }
    }
}

#[derive(Template)]
#[template(path = "orgs.html")]
pub struct OrgsTemplate {
    pub orgs: Vec<OrgConnection>,
    pub ctx: PageContext,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub org_name: Option<String>,
    pub ctx: PageContext,
    pub limits: Option<Vec<LimitView>>,
    pub licenses: Option<Vec<LicenseView>>,
    pub jobs: Option<Vec<JobView>>,
    pub trust: Option<TrustView>,
}

// Fragmenty pro nezávislý refresh jednotlivých sekcí.
// Pole se jmenují stejně jako v DashboardTemplate, aby šly stejné
// šablony použít přes include i samostatně.

#[derive(Template)]
#[template(path = "limits_panel.html")]
pub struct LimitsPanelTemplate {
    pub limits: Option<Vec<LimitView>>,
}

#[derive(Template)]
#[template(path = "licenses_panel.html")]
pub struct LicensesPanelTemplate {
    pub licenses: Option<Vec<LicenseView>>,
}

#[derive(Template)]
#[template(path = "jobs_panel.html")]
pub struct JobsPanelTemplate {
    pub jobs: Option<Vec<JobView>>,
}

#[derive(Template)]
#[template(path = "trust_panel.html")]
pub struct TrustPanelTemplate {
    pub trust: Option<TrustView>,
}
