//! The variation model: master ordering, support computation, and
//! delta extraction.
//!
//! Masters are reordered internally so that the base master comes first
//! and masters varying in fewer axes precede those varying in more. Each
//! master then gets a support box carved out of the design space by the
//! earlier masters, and a row of delta weights recording how much of its
//! value the earlier basis functions already explain.

use std::{
    cmp::Reverse,
    collections::{BTreeMap, HashMap},
    sync::{Arc, Mutex, PoisonError},
};

use log::debug;
use rayon::prelude::*;

use crate::{
    error::{Error, Result},
    location::Location,
    support::Support,
    value::MasterValue,
};

/// An interpolation model over a set of master locations.
///
/// Built once from the master set; immutable afterward and safe to share
/// across threads for any number of per-quantity delta computations.
#[derive(Debug)]
pub struct VariationModel {
    /// Master locations as supplied by the caller, in caller order.
    pub orig_locations: Vec<Location>,
    /// Zero-trimmed master locations in canonical order.
    pub locations: Vec<Location>,
    /// Preferred axis ordering, used for sort keys and box splitting.
    pub axis_order: Vec<String>,
    /// Caller index to canonical index.
    pub mapping: Vec<usize>,
    /// Canonical index to caller index.
    pub reverse_mapping: Vec<usize>,
    /// One support per master, in canonical order.
    pub supports: Vec<Support>,
    /// Sparse lower-triangular delta weights: row i holds (j, weight)
    /// pairs with j < i, in canonical order.
    pub delta_weights: Vec<Vec<(usize, f64)>>,
    /// Reduced models keyed by which masters supplied a value.
    sub_models: Mutex<HashMap<Vec<bool>, Arc<VariationModel>>>,
}

impl VariationModel {
    /// Build a model from master locations and a preferred axis order.
    ///
    /// Fails if no master sits at the default location, or if two masters
    /// normalize to the same location.
    pub fn new(locations: Vec<Location>, axis_order: Vec<String>) -> Result<Self> {
        let trimmed: Vec<Location> = locations.iter().map(Location::trimmed).collect();

        for i in 0..trimmed.len() {
            for j in 0..i {
                if trimmed[i] == trimmed[j] {
                    return Err(Error::DuplicateLocation(trimmed[i].to_string()));
                }
            }
        }
        if !trimmed.iter().any(Location::is_empty) {
            return Err(Error::MissingBaseMaster);
        }

        let points = axis_points(&trimmed);
        let keys: Vec<SortKey> = trimmed
            .iter()
            .map(|loc| SortKey::for_location(loc, &points, &axis_order))
            .collect();
        let mut order: Vec<usize> = (0..trimmed.len()).collect();
        order.sort_by(|&a, &b| keys[a].cmp(&keys[b]));

        let sorted: Vec<Location> = order.iter().map(|&i| trimmed[i].clone()).collect();
        let mut mapping = vec![0; trimmed.len()];
        for (canonical, &caller) in order.iter().enumerate() {
            mapping[caller] = canonical;
        }
        let reverse_mapping = order;

        let (supports, delta_weights) = compute_supports(&sorted, &axis_order);

        debug!(
            "variation model: {} masters, {} supports",
            sorted.len(),
            supports.len()
        );

        Ok(Self {
            orig_locations: locations,
            locations: sorted,
            axis_order,
            mapping,
            reverse_mapping,
            supports,
            delta_weights,
            sub_models: Mutex::new(HashMap::new()),
        })
    }

    /// Number of masters in the model.
    pub fn master_count(&self) -> usize {
        self.locations.len()
    }

    /// Compute delta coefficients from per-master values.
    ///
    /// `master_values` is in caller order; the returned deltas are in
    /// canonical order, aligned with [`supports`](Self::supports). Each
    /// delta is the master's value minus what the earlier basis functions
    /// already produce at its location, so re-evaluating the model at any
    /// master location reproduces that master's value.
    pub fn deltas<T: MasterValue>(&self, master_values: &[T]) -> Result<Vec<T>> {
        if master_values.len() != self.delta_weights.len() {
            return Err(Error::AxisValueMismatch {
                expected: self.delta_weights.len(),
                actual: master_values.len(),
            });
        }
        let mut out: Vec<T> = Vec::with_capacity(master_values.len());
        for (i, weights) in self.delta_weights.iter().enumerate() {
            let mut delta = master_values[self.reverse_mapping[i]].clone();
            for &(j, weight) in weights {
                delta = if weight == 1.0 {
                    delta - out[j].clone()
                } else {
                    delta - out[j].clone() * weight
                };
            }
            out.push(delta);
        }
        Ok(out)
    }

    /// Compute deltas for many independent value sets in parallel.
    ///
    /// The model is read-only here, so the sets are processed with rayon;
    /// results match [`deltas`](Self::deltas) call-for-call.
    pub fn deltas_batch<T>(&self, value_sets: &[Vec<T>]) -> Result<Vec<Vec<T>>>
    where
        T: MasterValue + Send + Sync,
    {
        value_sets.par_iter().map(|values| self.deltas(values)).collect()
    }

    /// Per-master scalars at a query location, in canonical order.
    pub fn scalars(&self, loc: &Location) -> Vec<f64> {
        self.supports.iter().map(|support| support.scalar_at(loc)).collect()
    }

    /// Combine precomputed deltas and scalars, skipping zero terms.
    ///
    /// Returns `None` when no basis function contributes; in a valid model
    /// the base master's empty support always contributes.
    pub fn interpolate_from_deltas_and_scalars<T: MasterValue>(
        deltas: &[T],
        scalars: &[f64],
    ) -> Option<T> {
        let mut value: Option<T> = None;
        for (delta, &scalar) in deltas.iter().zip(scalars) {
            if scalar == 0.0 {
                continue;
            }
            let contribution = if scalar == 1.0 { delta.clone() } else { delta.clone() * scalar };
            value = Some(match value {
                Some(v) => v + contribution,
                None => contribution,
            });
        }
        value
    }

    /// Evaluate precomputed deltas at a query location.
    pub fn interpolate_from_deltas<T: MasterValue>(&self, loc: &Location, deltas: &[T]) -> Option<T> {
        Self::interpolate_from_deltas_and_scalars(deltas, &self.scalars(loc))
    }

    /// Interpolate per-master values at a query location.
    ///
    /// Values are in caller order; `None` entries reduce the computation to
    /// the sub-model of masters that do have a value.
    pub fn interpolate<T: MasterValue>(&self, loc: &Location, master_values: &[Option<T>]) -> Result<T> {
        let (sub, items) = self.sub_model(master_values)?;
        let model = sub.as_deref().unwrap_or(self);
        let deltas = model.deltas(&items)?;
        // The base master's empty support contributes at every location,
        // so a constructed model always produces a value.
        model
            .interpolate_from_deltas(loc, &deltas)
            .ok_or(Error::MissingBaseMaster)
    }

    /// Compute deltas and the supports they belong to, resolving `None`
    /// entries through the sub-model cache.
    pub fn deltas_and_supports<T: MasterValue>(
        &self,
        master_values: &[Option<T>],
    ) -> Result<(Vec<T>, Vec<Support>)> {
        let (sub, items) = self.sub_model(master_values)?;
        let model = sub.as_deref().unwrap_or(self);
        Ok((model.deltas(&items)?, model.supports.clone()))
    }

    /// Resolve a value pattern to a model and the compacted values.
    ///
    /// Returns `(None, values)` when every master has a value (the full
    /// model applies unchanged). Otherwise returns the memoized reduced
    /// model for the has-value pattern, building it on first sight. A
    /// repeated pattern yields the same `Arc` instance.
    pub fn sub_model<T: Clone>(
        &self,
        master_values: &[Option<T>],
    ) -> Result<(Option<Arc<VariationModel>>, Vec<T>)> {
        if master_values.len() != self.orig_locations.len() {
            return Err(Error::AxisValueMismatch {
                expected: self.orig_locations.len(),
                actual: master_values.len(),
            });
        }
        let items: Vec<T> = master_values.iter().flatten().cloned().collect();
        if items.len() == master_values.len() {
            return Ok((None, items));
        }
        let key: Vec<bool> = master_values.iter().map(Option::is_some).collect();
        let mut cache = self.sub_models.lock().unwrap_or_else(PoisonError::into_inner);
        let model = match cache.get(&key) {
            Some(model) => Arc::clone(model),
            None => {
                let locations = self
                    .orig_locations
                    .iter()
                    .zip(&key)
                    .filter(|&(_, &has_value)| has_value)
                    .map(|(loc, _)| loc.clone())
                    .collect();
                let model = Arc::new(VariationModel::new(locations, self.axis_order.clone())?);
                cache.insert(key, Arc::clone(&model));
                model
            }
        };
        Ok((Some(model), items))
    }

    /// Permute externally-held master data without recomputing supports.
    ///
    /// `mapping` gives, for each new position, the old caller index. The
    /// model's caller-order bookkeeping follows the permutation and the
    /// sub-model cache is invalidated; supports, canonical order, and
    /// delta weights are untouched. Returns the permuted list.
    pub fn reorder_masters<T: Clone>(&mut self, master_list: &[T], mapping: &[usize]) -> Result<Vec<T>> {
        let n = self.orig_locations.len();
        if master_list.len() != n {
            return Err(Error::AxisValueMismatch { expected: n, actual: master_list.len() });
        }
        if mapping.len() != n {
            return Err(Error::AxisValueMismatch { expected: n, actual: mapping.len() });
        }
        let mut seen = vec![false; n];
        for &index in mapping {
            if index >= n || seen[index] {
                return Err(Error::InvalidMapping { index, len: n });
            }
            seen[index] = true;
        }

        let new_list: Vec<T> = mapping.iter().map(|&i| master_list[i].clone()).collect();
        self.orig_locations = mapping.iter().map(|&i| self.orig_locations[i].clone()).collect();
        for (caller, loc) in self.orig_locations.iter().enumerate() {
            let trimmed = loc.trimmed();
            let canonical = self
                .locations
                .iter()
                .position(|l| *l == trimmed)
                .ok_or(Error::InvalidMapping { index: caller, len: n })?;
            self.mapping[caller] = canonical;
            self.reverse_mapping[canonical] = caller;
        }
        self.sub_models
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        Ok(new_list)
    }
}

/// Distinct coordinate values seen on each axis among single-axis masters.
///
/// A master whose coordinate lands exactly on one of these "axis points"
/// sorts ahead of equally-ranked masters that sit off the known points.
fn axis_points(locations: &[Location]) -> HashMap<String, Vec<f64>> {
    let mut points: HashMap<String, Vec<f64>> = HashMap::new();
    for loc in locations {
        if loc.len() != 1 {
            continue;
        }
        if let Some((tag, value)) = loc.iter().next() {
            let entry = points.entry(tag.to_string()).or_insert_with(|| vec![0.0]);
            if !entry.contains(&value) {
                entry.push(value);
            }
        }
    }
    points
}

/// Axes of a location in priority order: the caller's preferred axes
/// first, then the rest alphabetically.
fn ordered_axes(loc: &Location, axis_order: &[String]) -> Vec<String> {
    let mut ordered: Vec<String> = axis_order
        .iter()
        .filter(|axis| loc.contains(axis))
        .cloned()
        .collect();
    ordered.extend(
        loc.tags()
            .filter(|tag| !axis_order.iter().any(|axis| axis == tag))
            .map(str::to_string),
    );
    ordered
}

/// f64 ordered by `total_cmp`; sort-key magnitudes are never NaN.
#[derive(Debug, PartialEq)]
struct OrdF64(f64);

impl Eq for OrdF64 {}

impl PartialOrd for OrdF64 {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrdF64 {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Canonical master sort key. Field order is the comparison order.
#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct SortKey {
    rank: usize,
    on_point_count: Reverse<usize>,
    axis_priorities: Vec<usize>,
    axis_names: Vec<String>,
    signs: Vec<i8>,
    magnitudes: Vec<OrdF64>,
}

impl SortKey {
    fn for_location(
        loc: &Location,
        axis_points: &HashMap<String, Vec<f64>>,
        axis_order: &[String],
    ) -> Self {
        let ordered = ordered_axes(loc, axis_order);
        let on_point_count = loc
            .iter()
            .filter(|(tag, value)| {
                axis_points.get(*tag).is_some_and(|points| points.contains(value))
            })
            .count();
        SortKey {
            rank: loc.len(),
            on_point_count: Reverse(on_point_count),
            axis_priorities: ordered
                .iter()
                .map(|axis| {
                    axis_order.iter().position(|a| a == axis).unwrap_or(usize::MAX)
                })
                .collect(),
            signs: ordered
                .iter()
                .map(|axis| {
                    let v = loc.get(axis);
                    if v < 0.0 {
                        -1
                    } else if v > 0.0 {
                        1
                    } else {
                        0
                    }
                })
                .collect(),
            magnitudes: ordered.iter().map(|axis| OrdF64(loc.get(axis).abs())).collect(),
            axis_names: ordered,
        }
    }
}

/// Build one support per master and the delta-weight rows, in canonical
/// order.
///
/// Each master starts with a box running from the default to the global
/// axis extent on each of its non-zero axes, then shrinks it against every
/// earlier master whose axes are a subset of its own and whose location
/// falls inside the box. The shrink happens on the axis with the largest
/// range ratio; exact ratio ties shrink all tied axes together.
fn compute_supports(
    locations: &[Location],
    axis_order: &[String],
) -> (Vec<Support>, Vec<Vec<(usize, f64)>>) {
    let mut axis_min: BTreeMap<String, f64> = BTreeMap::new();
    let mut axis_max: BTreeMap<String, f64> = BTreeMap::new();
    for loc in locations {
        for (tag, value) in loc.iter() {
            axis_min
                .entry(tag.to_string())
                .and_modify(|m| *m = m.min(value))
                .or_insert(value);
            axis_max
                .entry(tag.to_string())
                .and_modify(|m| *m = m.max(value))
                .or_insert(value);
        }
    }

    let mut supports: Vec<Support> = Vec::with_capacity(locations.len());
    let mut delta_weights: Vec<Vec<(usize, f64)>> = Vec::with_capacity(locations.len());

    for (i, loc) in locations.iter().enumerate() {
        let mut support: Support = loc
            .iter()
            .map(|(tag, value)| {
                let triple = if value > 0.0 {
                    (0.0, value, axis_max.get(tag).copied().unwrap_or(value))
                } else {
                    (axis_min.get(tag).copied().unwrap_or(value), value, 0.0)
                };
                (tag, triple)
            })
            .collect();
        let ordered = ordered_axes(loc, axis_order);

        for prev in &locations[..i] {
            if !prev.tags().all(|tag| loc.contains(tag)) {
                continue;
            }
            // Relevant only if prev sits at the peak or strictly inside
            // the box on every constrained axis. Anything on or beyond a
            // bound is already excluded by the box itself.
            let relevant = support.iter().all(|(tag, (lower, peak, upper))| {
                let v = prev.get(tag);
                v == peak || (lower < v && v < upper)
            });
            if !relevant {
                continue;
            }

            let mut best_ratio = -1.0;
            let mut best: Vec<(&str, (f64, f64, f64))> = Vec::new();
            for axis in &ordered {
                let Some((lower, peak, upper)) = support.get(axis) else {
                    continue;
                };
                let val = prev.get(axis);
                let (new_lower, new_upper, ratio) = if val < peak {
                    (val, upper, (val - peak) / (lower - peak))
                } else if val > peak {
                    (lower, val, (val - peak) / (upper - peak))
                } else {
                    // No split possible toward the shared peak value.
                    continue;
                };
                if ratio > best_ratio {
                    best.clear();
                    best_ratio = ratio;
                }
                if ratio == best_ratio {
                    best.push((axis.as_str(), (new_lower, peak, new_upper)));
                }
            }
            for (axis, triple) in best {
                support.set(axis, triple);
            }
        }

        let row: Vec<(usize, f64)> = supports
            .iter()
            .enumerate()
            .filter_map(|(j, earlier)| {
                let scalar = earlier.scalar_at(loc);
                (scalar != 0.0).then_some((j, scalar))
            })
            .collect();
        delta_weights.push(row);
        supports.push(support);
    }

    (supports, delta_weights)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(pairs: &[(&str, f64)]) -> Location {
        Location::from_pairs(pairs.iter().copied())
    }

    fn model(locations: &[Location]) -> VariationModel {
        VariationModel::new(locations.to_vec(), vec![]).unwrap()
    }

    #[test]
    fn missing_base_master_is_an_error() {
        let err = VariationModel::new(vec![loc(&[("wght", 1.0)])], vec![]).unwrap_err();
        assert_eq!(err, Error::MissingBaseMaster);
    }

    #[test]
    fn duplicate_locations_are_an_error() {
        let locations = vec![
            Location::new(),
            loc(&[("wght", 1.0)]),
            loc(&[("wght", 1.0), ("wdth", 0.0)]),
        ];
        let err = VariationModel::new(locations, vec![]).unwrap_err();
        assert_eq!(err, Error::DuplicateLocation("{wght: 1}".to_string()));
    }

    #[test]
    fn base_master_sorts_first_by_sign_then_magnitude() {
        let locations = vec![
            loc(&[("wght", 180.0)]),
            loc(&[("wght", 100.0)]),
            Location::new(),
            loc(&[("wght", -100.0)]),
            loc(&[("wght", -180.0)]),
        ];
        let m = model(&locations);
        assert_eq!(
            m.locations,
            vec![
                Location::new(),
                loc(&[("wght", -100.0)]),
                loc(&[("wght", -180.0)]),
                loc(&[("wght", 100.0)]),
                loc(&[("wght", 180.0)]),
            ]
        );
        assert!(m.delta_weights[0].is_empty());
    }

    #[test]
    fn mapping_and_reverse_mapping_are_inverse() {
        let locations = vec![
            loc(&[("wght", 1.0)]),
            Location::new(),
            loc(&[("wght", 0.5)]),
        ];
        let m = model(&locations);
        for caller in 0..locations.len() {
            assert_eq!(m.reverse_mapping[m.mapping[caller]], caller);
            assert_eq!(m.locations[m.mapping[caller]], locations[caller].trimmed());
        }
    }

    #[test]
    fn axis_priority_orders_known_axes_first() {
        let locations = vec![
            Location::new(),
            loc(&[("wdth", 0.3)]),
            loc(&[("wght", 100.0)]),
        ];
        let m = VariationModel::new(locations, vec!["wght".to_string()]).unwrap();
        assert_eq!(m.locations[1], loc(&[("wght", 100.0)]));
        assert_eq!(m.locations[2], loc(&[("wdth", 0.3)]));
    }

    #[test]
    fn on_point_masters_sort_before_off_point_masters() {
        let locations = vec![
            Location::new(),
            loc(&[("wdth", 0.3)]),
            loc(&[("wght", 120.0), ("wdth", 0.2)]),
            loc(&[("wght", 120.0), ("wdth", 0.3)]),
        ];
        let m = model(&locations);
        // {wdth: 0.3} is a known axis point, so the master sitting on it
        // outranks the one at wdth 0.2.
        assert_eq!(m.locations[2], loc(&[("wght", 120.0), ("wdth", 0.3)]));
        assert_eq!(m.locations[3], loc(&[("wght", 120.0), ("wdth", 0.2)]));
    }

    #[test]
    fn single_axis_supports_split_between_neighbors() {
        let locations = vec![
            Location::new(),
            loc(&[("wght", -100.0)]),
            loc(&[("wght", -180.0)]),
            loc(&[("wght", 100.0)]),
            loc(&[("wght", 180.0)]),
        ];
        let m = model(&locations);
        assert_eq!(m.supports[0], Support::new());
        assert_eq!(m.supports[1], Support::from_pairs([("wght", (-180.0, -100.0, 0.0))]));
        assert_eq!(m.supports[2], Support::from_pairs([("wght", (-180.0, -180.0, -100.0))]));
        assert_eq!(m.supports[3], Support::from_pairs([("wght", (0.0, 100.0, 180.0))]));
        assert_eq!(m.supports[4], Support::from_pairs([("wght", (100.0, 180.0, 180.0))]));
    }

    #[test]
    fn two_axis_weight_table_includes_all_overlapping_masters() {
        let locations = vec![
            Location::new(),
            loc(&[("wdth", 0.3)]),
            loc(&[("wght", 120.0), ("wdth", 0.3)]),
            loc(&[("wght", 120.0), ("wdth", 0.2)]),
        ];
        let m = VariationModel::new(locations, vec!["wght".to_string()]).unwrap();
        assert_eq!(m.locations[2], loc(&[("wght", 120.0), ("wdth", 0.3)]));
        assert_eq!(m.locations[3], loc(&[("wght", 120.0), ("wdth", 0.2)]));

        // The off-point master overlaps the base, the width-only master,
        // and the on-point two-axis master.
        let row = &m.delta_weights[3];
        assert_eq!(row.len(), 3);
        assert_eq!(row[0], (0, 1.0));
        let (j1, w1) = row[1];
        let (j2, w2) = row[2];
        assert_eq!((j1, j2), (1, 2));
        assert!((w1 - 0.2 / 0.3).abs() < 1e-12);
        assert!((w2 - 0.2 / 0.3).abs() < 1e-12);
    }

    #[test]
    fn tied_split_ratios_shrink_all_tied_axes() {
        let locations = vec![
            Location::new(),
            loc(&[("AAAA", 0.5), ("BBBB", 0.5)]),
            loc(&[("AAAA", 1.0), ("BBBB", 1.0)]),
        ];
        let m = model(&locations);
        assert_eq!(m.locations[1], loc(&[("AAAA", 0.5), ("BBBB", 0.5)]));
        // The midpoint master cuts the corner master's box on both axes at
        // the same ratio, so both lower bounds move.
        assert_eq!(
            m.supports[2],
            Support::from_pairs([("AAAA", (0.5, 1.0, 1.0)), ("BBBB", (0.5, 1.0, 1.0))])
        );
    }

    #[test]
    fn unequal_split_ratios_shrink_only_the_best_axis() {
        let locations = vec![
            Location::new(),
            loc(&[("AAAA", 0.5), ("BBBB", 0.75)]),
            loc(&[("AAAA", 1.0), ("BBBB", 1.0)]),
        ];
        let m = model(&locations);
        // AAAA has ratio 0.5, BBBB only 0.25; only AAAA shrinks.
        assert_eq!(
            m.supports[2],
            Support::from_pairs([("AAAA", (0.5, 1.0, 1.0)), ("BBBB", (0.0, 1.0, 1.0))])
        );
    }

    #[test]
    fn masters_with_extra_axes_do_not_shrink_subset_masters() {
        let locations = vec![
            Location::new(),
            loc(&[("wght", 100.0)]),
            loc(&[("wght", 100.0), ("wdth", 0.3)]),
            loc(&[("wght", 180.0)]),
        ];
        let m = VariationModel::new(locations, vec!["wght".to_string()]).unwrap();
        // {wght: 180} is only split by {wght: 100}, never by the two-axis
        // master in between.
        assert_eq!(m.locations[2], loc(&[("wght", 180.0)]));
        assert_eq!(m.supports[2], Support::from_pairs([("wght", (100.0, 180.0, 180.0))]));
    }

    #[test]
    fn deltas_reject_wrong_arity() {
        let m = model(&[Location::new(), loc(&[("wght", 1.0)])]);
        let err = m.deltas(&[1.0]).unwrap_err();
        assert_eq!(err, Error::AxisValueMismatch { expected: 2, actual: 1 });
    }

    #[test]
    fn deltas_are_forward_substituted() {
        let locations = vec![
            Location::new(),
            loc(&[("wght", 1.0)]),
            loc(&[("wght", 0.5)]),
        ];
        let m = model(&locations);
        // Canonical order: {}, {wght: 0.5}, {wght: 1}
        let deltas = m.deltas(&[10.0, 30.0, 20.0]).unwrap();
        // base 10; wght 0.5 master: 20 - 10 = 10;
        // wght 1 master: 30 - 10 - 0 (its box starts at 0.5) = 20
        assert_eq!(deltas, vec![10.0, 10.0, 20.0]);
    }

    #[test]
    fn sub_model_is_memoized_per_pattern() {
        let locations = vec![
            Location::new(),
            loc(&[("wght", 1.0)]),
            loc(&[("wght", 0.5)]),
        ];
        let m = model(&locations);
        let values = [Some(10.0), Some(20.0), None];

        let (first, items) = m.sub_model(&values).unwrap();
        assert_eq!(items, vec![10.0, 20.0]);
        let (second, _) = m.sub_model(&values).unwrap();
        let (first, second) = (first.unwrap(), second.unwrap());
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.master_count(), 2);
    }

    #[test]
    fn sub_model_with_all_values_is_the_model_itself() {
        let m = model(&[Location::new(), loc(&[("wght", 1.0)])]);
        let (sub, items) = m.sub_model(&[Some(1.0), Some(2.0)]).unwrap();
        assert!(sub.is_none());
        assert_eq!(items, vec![1.0, 2.0]);
    }

    #[test]
    fn sub_model_without_base_value_fails() {
        let m = model(&[Location::new(), loc(&[("wght", 1.0)])]);
        let err = m.sub_model(&[None::<f64>, Some(2.0)]).unwrap_err();
        assert_eq!(err, Error::MissingBaseMaster);
    }

    #[test]
    fn reorder_masters_remaps_caller_order() {
        let locations = vec![
            Location::new(),
            loc(&[("wght", 1.0)]),
            loc(&[("wght", 0.5)]),
        ];
        let mut m = model(&locations);
        let before = m.deltas(&[10.0, 30.0, 20.0]).unwrap();

        // Move the wght masters in front of the base.
        let reordered = m.reorder_masters(&[10.0, 30.0, 20.0], &[1, 2, 0]).unwrap();
        assert_eq!(reordered, vec![30.0, 20.0, 10.0]);
        assert_eq!(m.deltas(&reordered).unwrap(), before);
    }

    #[test]
    fn reorder_masters_rejects_bad_mappings() {
        let mut m = model(&[Location::new(), loc(&[("wght", 1.0)])]);
        let err = m.reorder_masters(&[1.0, 2.0], &[0, 2]).unwrap_err();
        assert_eq!(err, Error::InvalidMapping { index: 2, len: 2 });
        let err = m.reorder_masters(&[1.0, 2.0], &[1, 1]).unwrap_err();
        assert_eq!(err, Error::InvalidMapping { index: 1, len: 2 });
    }
}
