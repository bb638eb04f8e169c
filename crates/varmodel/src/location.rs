//! Locations in the normalized design space.

use std::{collections::BTreeMap, fmt};

/// A point in design space, as a mapping from axis tag to coordinate.
///
/// Axes absent from the mapping have the implicit coordinate 0.0 (the
/// default/neutral value). The empty location is the base master location.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Location {
    axes: BTreeMap<String, f64>,
}

impl Location {
    /// Create an empty location (the default location on every axis).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a location from (axis tag, coordinate) pairs.
    pub fn from_pairs<S, I>(pairs: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, f64)>,
    {
        pairs.into_iter().collect()
    }

    /// Set the coordinate for an axis, returning the updated location.
    pub fn with(mut self, tag: &str, value: f64) -> Self {
        self.axes.insert(tag.to_string(), value);
        self
    }

    /// Set the coordinate for an axis.
    pub fn set(&mut self, tag: &str, value: f64) {
        self.axes.insert(tag.to_string(), value);
    }

    /// The coordinate on an axis, or 0.0 if the axis is not listed.
    pub fn get(&self, tag: &str) -> f64 {
        self.axes.get(tag).copied().unwrap_or(0.0)
    }

    /// The coordinate on an axis, or `None` if the axis is not listed.
    pub fn coordinate(&self, tag: &str) -> Option<f64> {
        self.axes.get(tag).copied()
    }

    /// Whether the axis is explicitly listed.
    pub fn contains(&self, tag: &str) -> bool {
        self.axes.contains_key(tag)
    }

    /// Number of explicitly listed axes.
    pub fn len(&self) -> usize {
        self.axes.len()
    }

    /// Whether no axis is explicitly listed.
    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    /// Iterate over (axis tag, coordinate) pairs in axis-tag order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.axes.iter().map(|(tag, &value)| (tag.as_str(), value))
    }

    /// Iterate over the listed axis tags in order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.axes.keys().map(String::as_str)
    }

    /// A copy with all zero-valued entries dropped.
    ///
    /// Two locations are the same point in design space exactly when their
    /// trimmed forms are equal.
    pub fn trimmed(&self) -> Location {
        Location {
            axes: self
                .axes
                .iter()
                .filter(|&(_, &value)| value != 0.0)
                .map(|(tag, &value)| (tag.clone(), value))
                .collect(),
        }
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Location {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Location {
            axes: iter.into_iter().map(|(tag, value)| (tag.into(), value)).collect(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (tag, value)) in self.axes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{tag}: {value}")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_axis_defaults_to_zero() {
        let loc = Location::from_pairs([("wght", 0.5)]);
        assert_eq!(loc.get("wght"), 0.5);
        assert_eq!(loc.get("wdth"), 0.0);
        assert!(!loc.contains("wdth"));
    }

    #[test]
    fn trimmed_drops_zero_entries() {
        let loc = Location::from_pairs([("wght", 0.5), ("wdth", 0.0)]);
        let trimmed = loc.trimmed();
        assert_eq!(trimmed.len(), 1);
        assert_eq!(trimmed, Location::from_pairs([("wght", 0.5)]));
    }

    #[test]
    fn trimmed_equality_identifies_same_point() {
        let a = Location::from_pairs([("wght", 1.0), ("ital", 0.0)]);
        let b = Location::from_pairs([("wght", 1.0)]);
        assert_ne!(a, b);
        assert_eq!(a.trimmed(), b.trimmed());
    }

    #[test]
    fn display_is_sorted_by_tag() {
        let loc = Location::from_pairs([("wdth", 0.5), ("wght", 1.0)]);
        assert_eq!(loc.to_string(), "{wdth: 0.5, wght: 1}");
    }
}
