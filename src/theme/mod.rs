//! Thematic classification
//!
//! Categorical color schemes for land use, land cover and hazard layers,
//! and the classification of layer features into those categories.

mod color;
mod registry;
mod scheme;

pub use color::RgbColor;
pub use registry::{builtin_scheme, builtin_scheme_names, load_schemes_from_file, parse_schemes};
pub use scheme::{Category, Classification, ThematicScheme, FILL_PROPERTY};
