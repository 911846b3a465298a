//! Site-wide constants and the static fallback served when the store is
//! unreachable.

use serde_json::{json, Value};

/// Well-known cache key for the merged site-data payload.
pub const SITE_DATA_CACHE_KEY: &str = "deal4bank_site_data_v1";

/// Heading shown above the catalog tabs.
pub const DEFAULT_CATALOG_HEADING: &str = "Explore Our Financial Products";

/// Company branding and contact details used when no settings can be read.
pub fn fallback_company_settings() -> Value {
    json!({
        "name": "Deal4Bank",
        "tagline": "Your trusted financial partner",
        "logoUrl": "https://picsum.photos/seed/deal-logo/100/100",
        "copyright": "© 2024 deal4bank.com. All rights reserved.",
        "contacts": {
            "phone": "+91-9243956990",
            "whatsapp": {
                "number": "9243956990",
                "text": "from deal4bank.com \n I am Interested in your service."
            },
            "email": {
                "address": "info@deal4bank.online",
                "subject": "Enquiry for your service",
                "body": "Hello, I am interested in your service. Please contact me!"
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_has_branding() {
        let settings = fallback_company_settings();
        assert_eq!(settings["name"], "Deal4Bank");
        assert!(settings["contacts"]["phone"].is_string());
    }
}
