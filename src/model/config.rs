use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from kiosk.toml. Every section is optional; a missing
/// file yields all defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KioskConfig {
    #[serde(default)]
    pub shop: ShopConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub anim: AnimConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopConfig {
    #[serde(default = "default_shop_name")]
    pub name: String,
    #[serde(default = "default_shop_email")]
    pub email: String,
    #[serde(default = "default_tagline")]
    pub tagline: String,
    #[serde(default = "default_phone")]
    pub phone: String,
    /// Street address, newline separated.
    #[serde(default = "default_address")]
    pub address: String,
}

impl Default for ShopConfig {
    fn default() -> Self {
        ShopConfig {
            name: default_shop_name(),
            email: default_shop_email(),
            tagline: default_tagline(),
            phone: default_phone(),
            address: default_address(),
        }
    }
}

fn default_phone() -> String {
    "+64 3 548 5336".to_string()
}

fn default_address() -> String {
    "7 Bullen Street\nTahunanui\nNelson 7011".to_string()
}

fn default_shop_name() -> String {
    "Anything Electronic".to_string()
}

fn default_shop_email() -> String {
    "sales@anythingelectronic.co.nz".to_string()
}

fn default_tagline() -> String {
    "Electronic repair & manufacturing for trade customers.".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog CSV path, relative to the root. If unset, well-known
    /// locations are searched.
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory for persisted state. If unset, the platform data dir.
    #[serde(default)]
    pub dir: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Color overrides by role name, as "#RRGGBB" strings.
    #[serde(default)]
    pub colors: HashMap<String, String>,
    /// Brightness multiplier for the hero banner lines (0.0–1.0).
    #[serde(default = "default_alpha")]
    pub hero_line_alpha: f64,
    /// Brightness multiplier for the section divider lines (0.0–1.0).
    #[serde(default = "default_alpha")]
    pub break_line_alpha: f64,
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            colors: HashMap::new(),
            hero_line_alpha: default_alpha(),
            break_line_alpha: default_alpha(),
            show_key_hints: true,
        }
    }
}

fn default_alpha() -> f64 {
    1.0
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimConfig {
    /// Grid cell size in canvas sub-pixels.
    #[serde(default = "default_cell_size")]
    pub cell_size: u32,
    #[serde(default = "default_max_walkers")]
    pub max_walkers: usize,
    /// Segment lifespan range in seconds.
    #[serde(default = "default_life_min")]
    pub life_min: f64,
    #[serde(default = "default_life_max")]
    pub life_max: f64,
    /// Opacity a segment is born with.
    #[serde(default = "default_base_alpha")]
    pub base_alpha: f64,
}

impl Default for AnimConfig {
    fn default() -> Self {
        AnimConfig {
            cell_size: default_cell_size(),
            max_walkers: default_max_walkers(),
            life_min: default_life_min(),
            life_max: default_life_max(),
            base_alpha: default_base_alpha(),
        }
    }
}

fn default_cell_size() -> u32 {
    6
}

fn default_max_walkers() -> usize {
    10
}

fn default_life_min() -> f64 {
    6.0
}

fn default_life_max() -> f64 {
    10.0
}

fn default_base_alpha() -> f64 {
    0.7
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config: KioskConfig = toml::from_str("").unwrap();
        assert_eq!(config.shop.name, "Anything Electronic");
        assert_eq!(config.shop.email, "sales@anythingelectronic.co.nz");
        assert_eq!(config.anim.cell_size, 6);
        assert_eq!(config.anim.max_walkers, 10);
        assert_eq!(config.ui.hero_line_alpha, 1.0);
        assert!(config.ui.show_key_hints);
        assert!(config.catalog.path.is_none());
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: KioskConfig = toml::from_str(
            r#"
[shop]
name = "Test Shop"

[anim]
cell_size = 4
"#,
        )
        .unwrap();
        assert_eq!(config.shop.name, "Test Shop");
        // unset fields in a present section still default
        assert_eq!(config.shop.email, "sales@anythingelectronic.co.nz");
        assert_eq!(config.anim.cell_size, 4);
        assert_eq!(config.anim.base_alpha, 0.7);
    }

    #[test]
    fn ui_overrides_parse() {
        let config: KioskConfig = toml::from_str(
            r##"
[ui]
hero_line_alpha = 0.5

[ui.colors]
hero_line = "#3060FF"
"##,
        )
        .unwrap();
        assert_eq!(config.ui.hero_line_alpha, 0.5);
        assert_eq!(config.ui.colors.get("hero_line").unwrap(), "#3060FF");
    }
}
