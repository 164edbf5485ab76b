//! CSS Values and Units Module Level 3: Value nodes and unit algebra.
//! Spec: <https://www.w3.org/TR/css-values-3/>
//!
//! The [`Node`] type carries tokens and reduced values through the
//! expression evaluator. The chapter modules hold the number, percent,
//! dimension and angle helpers the evaluator relies on.

#![forbid(unsafe_code)]

// One module per chapter of CSS Values and Units.
pub mod chapter_4_numbers;
pub mod chapter_5_percentages;
pub mod chapter_6_dimensions;
pub mod chapter_7_angles;
pub mod node;
mod serialize;
pub mod unicode_range;

// Re-exports for ergonomic access from other crates.
pub use chapter_4_numbers::{decimal_to_integer, format_decimal};
pub use chapter_5_percentages::format_percent;
pub use chapter_6_dimensions::{
    DimensionError, MAX_DIMENSION_EXPONENT, cancel_units, dimensions_to_vectors,
    divide_dimensions, multiply_dimensions, power_dimension, rebuild_dimension, sqrt_dimension,
};
pub use chapter_7_angles::{AngleUnit, angle_to_radians};
pub use node::{Node, NodeType, Position, Value};
pub use unicode_range::UnicodeRange;
