use serde::{Deserialize, Serialize};

/// A supplementary link attached to a catalog item ("Label::URL" in the CSV).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraLink {
    pub label: String,
    pub url: String,
}

/// One normalized row of the product catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub partnumber: String,
    /// URL-safe identifier derived from the part number (or title).
    pub slug: String,
    pub title: String,
    pub category: String,
    pub description: String,
    pub image: String,
    pub retail_price: Option<f64>,
    pub member_price: Option<f64>,
    pub instruction_sheet: String,
    pub extra_links: Vec<ExtraLink>,
    pub tags: Vec<String>,
}

impl CatalogItem {
    /// Retail price formatted for display, e.g. "$1,234.50".
    pub fn retail_price_text(&self) -> Option<String> {
        self.retail_price.map(format_nzd)
    }

    /// Member / trade price formatted for display.
    pub fn member_price_text(&self) -> Option<String> {
        self.member_price.map(format_nzd)
    }
}

/// Format a price as NZD currency: dollar sign, thousands separators,
/// two decimal places.
pub fn format_nzd(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let whole = cents / 100;
    let frac = (cents % 100).abs();

    let digits = whole.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if whole < 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, frac)
}
