pub mod engine;
pub mod grid;
pub mod segment;
pub mod walker;

pub use engine::{FieldConfig, LineField};
pub use segment::{MIN_VISIBLE_ALPHA, Segment, Shape};
