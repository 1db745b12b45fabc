use serde::{Deserialize, Serialize};

/// One catalog item the customer has picked out for an enquiry.
///
/// The persisted form is a JSON array of these; `qty` may be missing or
/// mangled in legacy blobs, so deserialization back-fills anything
/// unusable to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedItem {
    pub partnumber: String,
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(default = "default_qty", deserialize_with = "deserialize_qty")]
    pub qty: u32,
}

impl SelectedItem {
    pub fn new(partnumber: impl Into<String>, title: impl Into<String>, image: impl Into<String>) -> Self {
        SelectedItem {
            partnumber: partnumber.into(),
            title: title.into(),
            image: image.into(),
            qty: 1,
        }
    }
}

fn default_qty() -> u32 {
    1
}

/// Accept whatever a legacy writer left in `qty` (missing, null,
/// fractional, negative) and normalize to an integer >= 1.
fn deserialize_qty<'de, D>(de: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(de)?;
    Ok(match raw.as_ref().and_then(|v| v.as_f64()) {
        Some(n) if n.is_finite() && n >= 1.0 => n.floor() as u32,
        _ => 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_qty_backfills_to_one() {
        let item: SelectedItem =
            serde_json::from_str(r#"{"partnumber":"X1","title":"Widget"}"#).unwrap();
        assert_eq!(item.qty, 1);
        assert_eq!(item.image, "");
    }

    #[test]
    fn null_and_negative_qty_backfill_to_one() {
        let item: SelectedItem =
            serde_json::from_str(r#"{"partnumber":"X1","title":"W","qty":null}"#).unwrap();
        assert_eq!(item.qty, 1);
        let item: SelectedItem =
            serde_json::from_str(r#"{"partnumber":"X1","title":"W","qty":-3}"#).unwrap();
        assert_eq!(item.qty, 1);
    }

    #[test]
    fn fractional_qty_floors() {
        let item: SelectedItem =
            serde_json::from_str(r#"{"partnumber":"X1","title":"W","qty":2.7}"#).unwrap();
        assert_eq!(item.qty, 2);
    }

    #[test]
    fn round_trips_through_json() {
        let item = SelectedItem {
            partnumber: "X1".into(),
            title: "Widget".into(),
            image: "w.webp".into(),
            qty: 4,
        };
        let raw = serde_json::to_string(&item).unwrap();
        let back: SelectedItem = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, item);
    }
}
