//! Design axes and user-space to normalized coordinate conversion.

use crate::location::Location;

/// A variation axis in the design space.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    /// Short axis tag (e.g., "wght", "wdth")
    pub tag: String,
    /// Human-readable axis name
    pub name: String,
    /// Minimum value on this axis, in user space
    pub minimum: f64,
    /// Default value on this axis, in user space
    pub default: f64,
    /// Maximum value on this axis, in user space
    pub maximum: f64,
}

impl Axis {
    /// Create a new axis.
    pub fn new(tag: &str, name: &str, minimum: f64, default: f64, maximum: f64) -> Self {
        Self {
            tag: tag.to_string(),
            name: name.to_string(),
            minimum,
            default,
            maximum,
        }
    }

    /// Normalize a user-space value to the range [-1, 1].
    ///
    /// Values are clamped to [minimum, maximum] first. Values below the
    /// default normalize to [-1, 0]; values above it to [0, 1].
    pub fn normalize(&self, value: f64) -> f64 {
        let v = value.min(self.maximum).max(self.minimum);
        if v < self.default {
            if self.default == self.minimum {
                0.0
            } else {
                -((self.default - v) / (self.default - self.minimum))
            }
        } else if v > self.default {
            if self.default == self.maximum {
                0.0
            } else {
                (v - self.default) / (self.maximum - self.default)
            }
        } else {
            0.0
        }
    }
}

/// Normalize a user-space location against a set of axes.
///
/// Only axes listed in `axes` appear in the result; an axis the location
/// does not mention normalizes from its default (to 0.0).
pub fn normalize_location(location: &Location, axes: &[Axis]) -> Location {
    axes.iter()
        .map(|axis| {
            let value = location.coordinate(&axis.tag).unwrap_or(axis.default);
            (axis.tag.clone(), axis.normalize(value))
        })
        .collect()
}
