//! # Variation Model
//!
//! Multi-master variation interpolation over an n-dimensional normalized
//! design space.
//!
//! Given a set of master locations, this crate builds an interpolation
//! basis that reproduces each master's value exactly at its own location
//! and blends smoothly everywhere else, following the piecewise-linear
//! "tent" scheme used by OpenType variable fonts. The model is built once
//! per master set and reused for any number of per-master value arrays
//! (glyph coordinates, metrics, or anything supporting scale-and-add).
//!
//! ## Example
//!
//! ```
//! use varmodel::{Location, VariationModel};
//!
//! let model = VariationModel::new(
//!     vec![
//!         Location::new(),
//!         Location::from_pairs([("wght", 1.0)]),
//!         Location::from_pairs([("wght", 0.5)]),
//!     ],
//!     vec!["wght".to_string()],
//! )
//! .unwrap();
//!
//! let values = [400.0, 900.0, 650.0];
//! let query = Location::from_pairs([("wght", 0.75)]);
//! let wrapped: Vec<_> = values.iter().copied().map(Some).collect();
//! let blended = model.interpolate(&query, &wrapped).unwrap();
//! assert_eq!(blended, 775.0);
//! ```

mod axis;
mod error;
mod location;
mod model;
mod support;
mod value;

pub use axis::{Axis, normalize_location};
pub use error::{Error, Result};
pub use location::Location;
pub use model::VariationModel;
pub use support::Support;
pub use value::MasterValue;
