//! Support boxes and the per-master scalar evaluator.

use std::{collections::BTreeMap, fmt};

use crate::{
    error::{Error, Result},
    location::Location,
};

/// The region over which one master's basis function is nonzero.
///
/// Each constrained axis maps to a (lower, peak, upper) triple: the
/// contribution is 1 at the peak and decays linearly to 0 at the lower and
/// upper bounds. An axis absent from the support does not constrain it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Support {
    axes: BTreeMap<String, (f64, f64, f64)>,
}

impl Support {
    /// Create an empty support (nonzero everywhere, scalar 1).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a support from (axis tag, (lower, peak, upper)) entries.
    pub fn from_pairs<S, I>(pairs: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, (f64, f64, f64))>,
    {
        Support {
            axes: pairs.into_iter().map(|(tag, triple)| (tag.into(), triple)).collect(),
        }
    }

    /// Set the triple for an axis.
    pub fn set(&mut self, tag: &str, triple: (f64, f64, f64)) {
        self.axes.insert(tag.to_string(), triple);
    }

    /// The (lower, peak, upper) triple for an axis, if constrained.
    pub fn get(&self, tag: &str) -> Option<(f64, f64, f64)> {
        self.axes.get(tag).copied()
    }

    /// Number of constrained axes.
    pub fn len(&self) -> usize {
        self.axes.len()
    }

    /// Whether no axis is constrained.
    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    /// Iterate over (axis tag, triple) entries in axis-tag order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, (f64, f64, f64))> {
        self.axes.iter().map(|(tag, &triple)| (tag.as_str(), triple))
    }

    /// Compute the scalar contribution of this support at a location.
    ///
    /// Returns a value in [0, 1]. Follows the OpenType convention: an axis
    /// with peak 0 does not participate, a malformed triple (peak outside
    /// [lower, upper], or a box spanning 0 with a nonzero peak) is treated
    /// as non-constraining, and an axis the query does not mention is read
    /// as 0. Arithmetic is exact; there is no epsilon anywhere.
    pub fn scalar_at(&self, location: &Location) -> f64 {
        let mut scalar = 1.0;
        for (tag, &(lower, peak, upper)) in &self.axes {
            if peak == 0.0 {
                continue;
            }
            if lower > peak || peak > upper {
                continue;
            }
            if lower < 0.0 && upper > 0.0 {
                continue;
            }
            let v = location.get(tag);
            if v == peak {
                continue;
            }
            if v <= lower || v >= upper {
                return 0.0;
            }
            if v < peak {
                scalar *= (v - lower) / (peak - lower);
            } else {
                scalar *= (v - upper) / (peak - upper);
            }
        }
        scalar
    }

    /// Compute the scalar with every constrained axis required in the query.
    ///
    /// Unlike [`scalar_at`](Self::scalar_at), a zero peak is an ordinary
    /// tent and a missing query coordinate is an error rather than an
    /// implicit 0.
    pub fn scalar_at_strict(&self, location: &Location) -> Result<f64> {
        let mut scalar = 1.0;
        for (tag, &(lower, peak, upper)) in &self.axes {
            let v = location
                .coordinate(tag)
                .ok_or_else(|| Error::MissingAxisValue(tag.clone()))?;
            if v == peak {
                continue;
            }
            if v <= lower || v >= upper {
                return Ok(0.0);
            }
            if v < peak {
                scalar *= (v - lower) / (peak - lower);
            } else {
                scalar *= (v - upper) / (peak - upper);
            }
        }
        Ok(scalar)
    }
}

impl<S: Into<String>> FromIterator<(S, (f64, f64, f64))> for Support {
    fn from_iter<I: IntoIterator<Item = (S, (f64, f64, f64))>>(iter: I) -> Self {
        Support {
            axes: iter.into_iter().map(|(tag, triple)| (tag.into(), triple)).collect(),
        }
    }
}

impl fmt::Display for Support {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (tag, (lower, peak, upper))) in self.axes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{tag}: ({lower}, {peak}, {upper})")?;
        }
        write!(f, "}}")
    }
}
