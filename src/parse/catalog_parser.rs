use std::collections::HashMap;

use csv::{ReaderBuilder, StringRecord};

use crate::model::{CatalogItem, ExtraLink};

/// Parse catalog CSV text into normalized items.
///
/// The header row names the fields, matched case-insensitively:
/// partnumber, title, category, description, image, retailprice,
/// memberprice, instructionsheet, extralinks, tags. The part number
/// falls back to a `uid` or `slug` column. Rows missing a title or part
/// number, and rows the CSV reader rejects, are dropped silently.
pub fn parse_catalog(text: &str) -> Vec<CatalogItem> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers: HashMap<String, usize> = match reader.headers() {
        Ok(h) => h
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim().to_lowercase(), i))
            .collect(),
        Err(_) => return Vec::new(),
    };
    let field = |record: &StringRecord, name: &str| -> String {
        headers
            .get(name)
            .and_then(|&i| record.get(i))
            .unwrap_or("")
            .trim()
            .to_string()
    };

    let mut items = Vec::new();
    for record in reader.records() {
        let Ok(record) = record else { continue };
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }

        let partnumber = [
            field(&record, "partnumber"),
            field(&record, "uid"),
            field(&record, "slug"),
        ]
        .into_iter()
        .find(|v| !v.is_empty())
        .unwrap_or_default();
        let title = field(&record, "title");
        if partnumber.is_empty() || title.is_empty() {
            continue;
        }

        let category = field(&record, "category");
        let image = field(&record, "image");
        items.push(CatalogItem {
            slug: slugify(&title, &partnumber),
            category: if category.is_empty() { "General".to_string() } else { category },
            description: field(&record, "description"),
            image: if image.is_empty() {
                "/products/placeholder.webp".to_string()
            } else {
                image
            },
            retail_price: parse_price(&field(&record, "retailprice")),
            member_price: parse_price(&field(&record, "memberprice")),
            instruction_sheet: field(&record, "instructionsheet"),
            extra_links: parse_extra_links(&field(&record, "extralinks")),
            tags: split_pipes(&field(&record, "tags")),
            partnumber,
            title,
        });
    }
    items
}

/// URL-safe slug from the part number, falling back to the title:
/// lowercase, quotes stripped, every other non-alphanumeric run
/// collapsed to a dash.
pub fn slugify(title: &str, id: &str) -> String {
    let base = if id.is_empty() { title } else { id };
    let mut slug = String::with_capacity(base.len());
    let mut pending_dash = false;
    for c in base.to_lowercase().chars() {
        if c == '\'' || c == '"' {
            continue;
        }
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() { "item".to_string() } else { slug }
}

/// Parse a price cell, tolerating currency symbols and separators:
/// "$1,234.50" -> 1234.5. Empty or unparseable cells are unpriced.
pub fn parse_price(value: &str) -> Option<f64> {
    if value.is_empty() {
        return None;
    }
    let digits: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse pipe-separated link entries, each "Label::URL" or a bare URL.
pub fn parse_extra_links(value: &str) -> Vec<ExtraLink> {
    split_pipes(value)
        .into_iter()
        .map(|entry| match entry.split_once("::") {
            Some((label, url)) => {
                let label = label.trim();
                let url = url.trim().to_string();
                ExtraLink {
                    label: if label.is_empty() { url.clone() } else { label.to_string() },
                    url,
                }
            }
            None => ExtraLink { label: entry.clone(), url: entry },
        })
        .collect()
}

fn split_pipes(value: &str) -> Vec<String> {
    value
        .split('|')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
