use serde::Serialize;

use crate::model::{CatalogItem, SelectedItem};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct CatalogListJson<'a> {
    pub count: usize,
    pub items: Vec<CatalogItemJson<'a>>,
}

#[derive(Serialize)]
pub struct CatalogItemJson<'a> {
    #[serde(flatten)]
    pub item: &'a CatalogItem,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retail_price_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_price_text: Option<String>,
    pub selected: bool,
}

#[derive(Serialize)]
pub struct SelectionJson<'a> {
    pub count: usize,
    pub items: &'a [SelectedItem],
}

#[derive(Serialize)]
pub struct EnquiryJson<'a> {
    pub recipient: &'a str,
    pub subject: &'a str,
    pub body: &'a str,
    pub mailto: String,
}

pub fn catalog_to_json<'a>(
    items: &[&'a CatalogItem],
    selected: &[SelectedItem],
) -> CatalogListJson<'a> {
    CatalogListJson {
        count: items.len(),
        items: items
            .iter()
            .map(|item| CatalogItemJson {
                item,
                retail_price_text: item.retail_price_text(),
                member_price_text: item.member_price_text(),
                selected: selected.iter().any(|s| s.partnumber == item.partnumber),
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Format a catalog item as a one-line summary.
pub fn format_catalog_line(item: &CatalogItem, selected: bool) -> String {
    let marker = if selected { '+' } else { ' ' };
    let mut line = format!("[{}] {}  {}  ({})", marker, item.partnumber, item.title, item.category);
    match (item.retail_price_text(), item.member_price_text()) {
        (Some(retail), Some(member)) => {
            line.push_str(&format!("  {} / {} trade", retail, member));
        }
        (Some(retail), None) => line.push_str(&format!("  {}", retail)),
        (None, Some(member)) => line.push_str(&format!("  {} trade", member)),
        (None, None) => {}
    }
    for tag in &item.tags {
        line.push_str(&format!(" #{}", tag));
    }
    line
}

/// Format a selected item as a one-line summary.
pub fn format_selection_line(item: &SelectedItem) -> String {
    format!("{}  {}  x{}", item.partnumber, item.title, item.qty)
}
