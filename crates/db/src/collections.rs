//! Collection paths used by the repositories.

/// Service categories (catalog tabs).
pub const CATEGORIES: &str = "services_tabs";

pub const INQUIRIES: &str = "inquiries";

pub const EMAILS: &str = "emails";

pub const NOTIFICATIONS: &str = "notifications";

/// Singleton settings documents (`company`, `global`).
pub const SETTINGS: &str = "settings";

/// Items of one category live in a sub-collection under the category.
pub fn items(tab_id: &str) -> String {
    format!("{CATEGORIES}/{tab_id}/items")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_collection_is_nested_under_category() {
        assert_eq!(items("abc"), "services_tabs/abc/items");
    }
}
