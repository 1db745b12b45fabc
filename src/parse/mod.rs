pub mod catalog_parser;

pub use catalog_parser::{parse_catalog, parse_extra_links, parse_price, slugify};
