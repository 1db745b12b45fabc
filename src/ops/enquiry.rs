use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::info;

use crate::model::{SelectedItem, ShopConfig};

/// Everything but RFC 3986 unreserved characters gets percent-encoded
/// in mailto components, so spaces are %20 and newlines %0D%0A.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// A composed enquiry email. There is no checkout: the selection
/// degrades to a pre-filled message handed to the platform mail client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enquiry {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl Enquiry {
    /// Product enquiry listing every selected item with its quantity.
    pub fn for_selection(shop: &ShopConfig, items: &[SelectedItem]) -> Self {
        let lines: Vec<String> = items
            .iter()
            .map(|i| format!("- {} — {} (Qty: {})", i.partnumber, i.title, i.qty))
            .collect();
        let body = format!(
            "Hello {},\r\n\r\nI'm interested in:\r\n{}\r\n\r\nThanks,",
            shop.name,
            lines.join("\r\n")
        );
        Enquiry {
            recipient: shop.email.clone(),
            subject: "Product enquiry".to_string(),
            body,
        }
    }

    /// Free-form enquiry with a signature line. The caller enforces
    /// that name, email, and message are present before sending.
    pub fn general(shop: &ShopConfig, name: &str, email: &str, message: &str) -> Self {
        let mut body = message.replace("\r\n", "\n").replace('\n', "\r\n");
        body.push_str("\r\n\r\n— ");
        body.push_str(name.trim());
        let email = email.trim();
        if !email.is_empty() {
            body.push_str(&format!(" <{}>", email));
        }
        Enquiry {
            recipient: shop.email.clone(),
            subject: "General enquiry".to_string(),
            body,
        }
    }

    /// Render as a mailto URL with percent-encoded components.
    pub fn to_mailto(&self) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            self.recipient,
            utf8_percent_encode(&self.subject, COMPONENT),
            utf8_percent_encode(&self.body, COMPONENT)
        )
    }

    /// Hand the URL to the platform mail handler. No network call.
    pub fn send(&self) -> std::io::Result<()> {
        let url = self.to_mailto();
        info!(recipient = %self.recipient, subject = %self.subject, "opening mail client");
        open::that(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn shop() -> ShopConfig {
        ShopConfig::default()
    }

    fn item(pn: &str, title: &str, qty: u32) -> SelectedItem {
        let mut item = SelectedItem::new(pn, title, "");
        item.qty = qty;
        item
    }

    #[test]
    fn selection_body_lists_items_with_quantities() {
        let enquiry = Enquiry::for_selection(
            &shop(),
            &[item("X1", "Widget", 2), item("X2", "Gadget", 1)],
        );
        assert_eq!(enquiry.subject, "Product enquiry");
        assert_eq!(enquiry.recipient, "sales@anythingelectronic.co.nz");
        assert_eq!(
            enquiry.body,
            "Hello Anything Electronic,\r\n\r\nI'm interested in:\r\n- X1 — Widget (Qty: 2)\r\n- X2 — Gadget (Qty: 1)\r\n\r\nThanks,"
        );
    }

    #[test]
    fn general_body_normalizes_newlines_and_signs() {
        let enquiry = Enquiry::general(&shop(), "Ana", "ana@example.com", "line one\nline two");
        assert_eq!(enquiry.subject, "General enquiry");
        assert_eq!(
            enquiry.body,
            "line one\r\nline two\r\n\r\n— Ana <ana@example.com>"
        );
    }

    #[test]
    fn general_signature_omits_blank_email() {
        let enquiry = Enquiry::general(&shop(), "Ana", "   ", "hello");
        assert!(enquiry.body.ends_with("— Ana"));
    }

    #[test]
    fn mailto_percent_encodes_spaces_and_crlf() {
        let enquiry = Enquiry {
            recipient: "sales@example.com".to_string(),
            subject: "Product enquiry".to_string(),
            body: "a b\r\nc".to_string(),
        };
        assert_eq!(
            enquiry.to_mailto(),
            "mailto:sales@example.com?subject=Product%20enquiry&body=a%20b%0D%0Ac"
        );
    }

    #[test]
    fn mailto_leaves_unreserved_characters_bare() {
        let enquiry = Enquiry {
            recipient: "s@example.com".to_string(),
            subject: "a-b_c.d~e".to_string(),
            body: String::new(),
        };
        assert!(enquiry.to_mailto().contains("subject=a-b_c.d~e"));
    }
}
