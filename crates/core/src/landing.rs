//! Landing page renderer.
//!
//! Turns the aggregated catalog into the view the public site draws: one
//! tab per visible category and one card per visible item of the active
//! category. Attribute rows are driven by the category's key list, so the
//! renderer has no knowledge of specific labels.
//!
//! Selection is explicit input. Switching tabs is a pure recomputation over
//! the already fetched catalog.

use serde::Serialize;
use ts_rs::TS;

use crate::catalog::{find_attribute, Attribute, CatalogTab, ServicesPayload};
use crate::validation::is_blank;

/// Rendered landing page catalog section.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LandingView {
    pub heading: String,
    pub active_tab: Option<String>,
    pub tabs: Vec<TabView>,
    pub cards: Vec<CardView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TabView {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CardView {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub rows: Vec<Attribute>,
}

/// Render the catalog with `requested_tab` selected.
///
/// Falls back to the first visible category when the requested one is
/// unknown, hidden or absent. Hidden items are skipped.
pub fn render_landing(payload: &ServicesPayload, requested_tab: Option<&str>) -> LandingView {
    let visible: Vec<&CatalogTab> = payload.tabs.iter().filter(|t| t.visible).collect();

    let active = requested_tab
        .and_then(|id| visible.iter().copied().find(|t| t.id == id))
        .or_else(|| visible.first().copied());

    let tabs = visible
        .iter()
        .map(|t| TabView {
            id: t.id.clone(),
            title: t.title.clone(),
            icon: t.icon.clone(),
            active: active.is_some_and(|a| a.id == t.id),
        })
        .collect();

    let cards = active
        .map(|tab| {
            tab.data
                .iter()
                .filter(|item| item.visible)
                .map(|item| CardView {
                    id: item.id.clone(),
                    title: item.kind.clone(),
                    icon: item.icon.clone(),
                    rows: attribute_rows(&tab.attribute_keys, &item.attributes),
                })
                .collect()
        })
        .unwrap_or_default();

    LandingView {
        heading: payload.heading.clone(),
        active_tab: active.map(|t| t.id.clone()),
        tabs,
        cards,
    }
}

/// Rows for one card: each key the item has a non-empty value for, in key order.
pub fn attribute_rows(keys: &[String], attributes: &[Attribute]) -> Vec<Attribute> {
    keys.iter()
        .filter_map(|key| find_attribute(attributes, key))
        .filter(|attr| !is_blank(&attr.value))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogEntry;

    fn entry(id: &str, title: &str, visible: bool, attrs: Vec<Attribute>) -> CatalogEntry {
        CatalogEntry {
            id: id.into(),
            kind: title.into(),
            icon: "Shield".into(),
            visible,
            attributes: attrs,
        }
    }

    fn tab(id: &str, visible: bool, keys: &[&str], data: Vec<CatalogEntry>) -> CatalogTab {
        CatalogTab {
            id: id.into(),
            title: id.to_uppercase(),
            icon: "Landmark".into(),
            attribute_keys: keys.iter().map(|k| k.to_string()).collect(),
            visible,
            data,
        }
    }

    fn payload(tabs: Vec<CatalogTab>) -> ServicesPayload {
        ServicesPayload {
            heading: "Explore Our Financial Products".into(),
            tabs,
        }
    }

    #[test]
    fn empty_catalog_renders_nothing() {
        let view = render_landing(&payload(vec![]), None);
        assert!(view.tabs.is_empty());
        assert!(view.cards.is_empty());
        assert_eq!(view.active_tab, None);
    }

    #[test]
    fn empty_key_list_renders_cards_without_rows() {
        let p = payload(vec![tab(
            "loans",
            true,
            &[],
            vec![entry(
                "i1",
                "Home Loan",
                true,
                vec![Attribute::new("Interest", "8%")],
            )],
        )]);
        let view = render_landing(&p, None);
        assert_eq!(view.cards.len(), 1);
        assert!(view.cards[0].rows.is_empty());
    }

    #[test]
    fn rows_follow_key_order_for_any_labels() {
        let p = payload(vec![tab(
            "loans",
            true,
            &["Processing Window", "Interest"],
            vec![entry(
                "i1",
                "Home Loan",
                true,
                vec![
                    Attribute::new("Interest", "8%"),
                    Attribute::new("Processing Window", "3 days"),
                    Attribute::new("Legacy", "kept"),
                ],
            )],
        )]);
        let rows = &render_landing(&p, None).cards[0].rows;
        assert_eq!(
            rows,
            &vec![
                Attribute::new("Processing Window", "3 days"),
                Attribute::new("Interest", "8%"),
            ]
        );
    }

    #[test]
    fn blank_values_are_skipped() {
        let rows = attribute_rows(
            &["Interest".to_string(), "Tenure".to_string()],
            &[Attribute::new("Interest", " "), Attribute::new("Tenure", "5y")],
        );
        assert_eq!(rows, vec![Attribute::new("Tenure", "5y")]);
    }

    #[test]
    fn selection_switches_cards_and_hidden_content_is_skipped() {
        let p = payload(vec![
            tab("hidden", false, &[], vec![entry("h1", "Secret", true, vec![])]),
            tab(
                "loans",
                true,
                &[],
                vec![
                    entry("l1", "Home Loan", true, vec![]),
                    entry("l2", "Draft Loan", false, vec![]),
                ],
            ),
            tab("insurance", true, &[], vec![entry("n1", "Term Life", true, vec![])]),
        ]);

        let first = render_landing(&p, None);
        assert_eq!(first.active_tab.as_deref(), Some("loans"));
        assert_eq!(first.tabs.len(), 2);
        assert_eq!(first.cards.len(), 1);
        assert_eq!(first.cards[0].title, "Home Loan");

        let switched = render_landing(&p, Some("insurance"));
        assert_eq!(switched.active_tab.as_deref(), Some("insurance"));
        assert!(switched.tabs[1].active && !switched.tabs[0].active);
        assert_eq!(switched.cards[0].title, "Term Life");

        let hidden = render_landing(&p, Some("hidden"));
        assert_eq!(hidden.active_tab.as_deref(), Some("loans"));
    }
}
