//! Singleton settings documents under the `settings` collection.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Document id of the company profile.
pub const COMPANY_ID: &str = "company";

/// Document id of the global site configuration.
pub const GLOBAL_ID: &str = "global";

/// Company branding and contact details.
///
/// The known fields are typed; anything else the admin stored (contacts,
/// social links) is kept verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySettings {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub logo_url: String,
    #[serde(default)]
    pub copyright: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Site-wide configuration edited on the admin settings page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalSettings {
    pub site_name: String,
    pub site_description: String,
    pub maintenance_mode: bool,
    pub allow_new_registrations: bool,
    pub email_notifications: bool,
    pub auto_approve_reviews: bool,
    pub security_level: String,
    pub contact_email: String,
    pub analytics_id: String,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            site_name: "Deal4Bank".to_string(),
            site_description: "Premium Banking & Financial Services Portal".to_string(),
            maintenance_mode: false,
            allow_new_registrations: true,
            email_notifications: true,
            auto_approve_reviews: false,
            security_level: "standard".to_string(),
            contact_email: "support@deal4bank.com".to_string(),
            analytics_id: String::new(),
        }
    }
}
