use regex::Regex;

use crate::model::CatalogItem;

/// Case-insensitive catalog filter over title, category, description,
/// part number, and tags.
pub fn filter_catalog<'a>(items: &'a [CatalogItem], query: &str) -> Vec<&'a CatalogItem> {
    let query = query.trim();
    if query.is_empty() {
        return items.iter().collect();
    }
    let Some(re) = compile_query(query) else {
        return Vec::new();
    };
    items
        .iter()
        .filter(|item| re.is_match(&haystack(item)))
        .collect()
}

/// Compile a query as a regex, falling back to an escaped literal when
/// the pattern itself does not parse.
pub fn compile_query(pattern: &str) -> Option<Regex> {
    Regex::new(&format!("(?i){}", pattern))
        .or_else(|_| Regex::new(&format!("(?i){}", regex::escape(pattern))))
        .ok()
}

fn haystack(item: &CatalogItem) -> String {
    let mut hay = format!(
        "{} {} {} {}",
        item.title, item.category, item.description, item.partnumber
    );
    for tag in &item.tags {
        hay.push(' ');
        hay.push_str(tag);
    }
    hay
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<CatalogItem> {
        crate::parse::parse_catalog(
            "partnumber,title,category,description,tags\n\
             AE-100,Dash Cluster,Automotive,LCD repair service,repair|lcd\n\
             AE-200,Bench Supply,Lab Gear,30V adjustable,power\n",
        )
    }

    #[test]
    fn matches_are_case_insensitive_across_fields() {
        let items = catalog();
        assert_eq!(filter_catalog(&items, "dash").len(), 1);
        assert_eq!(filter_catalog(&items, "LAB")[0].partnumber, "AE-200");
        assert_eq!(filter_catalog(&items, "ae-100").len(), 1);
        assert_eq!(filter_catalog(&items, "lcd").len(), 1);
    }

    #[test]
    fn empty_query_returns_everything() {
        let items = catalog();
        assert_eq!(filter_catalog(&items, "  ").len(), 2);
    }

    #[test]
    fn regex_queries_work() {
        let items = catalog();
        assert_eq!(filter_catalog(&items, "^bench").len(), 1);
        assert_eq!(filter_catalog(&items, "cluster|supply").len(), 2);
    }

    #[test]
    fn broken_regex_falls_back_to_literal() {
        let items = crate::parse::parse_catalog(
            "partnumber,title\nX1,Widget (spare\n",
        );
        assert_eq!(filter_catalog(&items, "(spare").len(), 1);
    }

    #[test]
    fn no_match_is_empty() {
        let items = catalog();
        assert!(filter_catalog(&items, "oscilloscope").is_empty());
    }
}
