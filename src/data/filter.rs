use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};

use super::model::{CategoricalAttr, Dataset, NumericAttr, Record};

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// Closed numeric interval `[lo, hi]`. `lo > hi` admits nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub lo: f64,
    pub hi: f64,
}

impl Range {
    pub fn new(lo: f64, hi: f64) -> Self {
        Range { lo, hi }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lo <= value && value <= self.hi
    }

    fn intersect(self, other: Range) -> Range {
        Range {
            lo: self.lo.max(other.lo),
            hi: self.hi.min(other.hi),
        }
    }
}

/// Per-attribute predicates combined by conjunction.
///
/// * A numeric attribute absent from `ranges` is unconstrained.
/// * A categorical attribute maps to the set of accepted values; an empty
///   set accepts nothing.
/// * A record whose value is missing fails every predicate on that attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    ranges: BTreeMap<NumericAttr, Range>,
    categories: BTreeMap<CategoricalAttr, BTreeSet<String>>,
}

impl FilterSpec {
    /// The identity filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Constrain `attr` to `[lo, hi]`, narrowing any existing range.
    pub fn with_range(mut self, attr: NumericAttr, lo: f64, hi: f64) -> Self {
        let range = Range::new(lo, hi);
        self.ranges
            .entry(attr)
            .and_modify(|r| *r = r.intersect(range))
            .or_insert(range);
        self
    }

    /// Constrain `attr` to exactly `value` (case-sensitive).
    pub fn with_equals(self, attr: CategoricalAttr, value: impl Into<String>) -> Self {
        let value: String = value.into();
        self.with_one_of(attr, [value])
    }

    /// Constrain `attr` to any of `values`, narrowing any existing set.
    pub fn with_one_of<I, S>(mut self, attr: CategoricalAttr, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let accepted: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        match self.categories.get_mut(&attr) {
            Some(existing) => existing.retain(|v| accepted.contains(v)),
            None => {
                self.categories.insert(attr, accepted);
            }
        }
        self
    }

    /// Conjunction of two specs.
    pub fn and(&self, other: &FilterSpec) -> FilterSpec {
        let mut merged = self.clone();
        for (&attr, range) in &other.ranges {
            merged = merged.with_range(attr, range.lo, range.hi);
        }
        for (&attr, values) in &other.categories {
            merged = merged.with_one_of(attr, values.iter().cloned());
        }
        merged
    }

    /// Whether no attribute is constrained.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty() && self.categories.is_empty()
    }

    pub fn matches(&self, record: &Record) -> bool {
        let ranges_ok = self.ranges.iter().all(|(&attr, range)| {
            record
                .numeric(attr)
                .is_some_and(|value| range.contains(value))
        });
        ranges_ok
            && self.categories.iter().all(|(&attr, accepted)| {
                record
                    .category(attr)
                    .is_some_and(|value| accepted.contains(value))
            })
    }
}

// ---------------------------------------------------------------------------
// View – the records that passed a filter
// ---------------------------------------------------------------------------

/// An ordered subsequence of a [`Dataset`], held as strictly ascending row
/// indices.
#[derive(Debug, Clone)]
pub struct View<'a> {
    dataset: &'a Dataset,
    indices: Cow<'a, [usize]>,
}

impl<'a> View<'a> {
    /// The unfiltered view.
    pub fn full(dataset: &'a Dataset) -> Self {
        View {
            dataset,
            indices: Cow::Owned((0..dataset.len()).collect()),
        }
    }

    /// Re-wrap indices produced by an earlier [`apply`].
    pub fn from_indices(dataset: &'a Dataset, indices: &'a [usize]) -> Self {
        View {
            dataset,
            indices: Cow::Borrowed(indices),
        }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn into_indices(self) -> Vec<usize> {
        self.indices.into_owned()
    }

    /// Records in dataset order.
    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        let dataset = self.dataset;
        self.indices.iter().filter_map(move |&i| dataset.get(i))
    }

    /// Present values of a numeric attribute, in view order.
    pub fn values(&self, attr: NumericAttr) -> Vec<f64> {
        self.iter().filter_map(|r| r.numeric(attr)).collect()
    }
}

/// Return the view of records that pass all predicates of `spec`.
///
/// Always scans the full dataset, so the result keeps source order.
pub fn apply<'a>(dataset: &'a Dataset, spec: &FilterSpec) -> View<'a> {
    if spec.is_empty() {
        return View::full(dataset);
    }
    let indices: Vec<usize> = dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, record)| spec.matches(record))
        .map(|(i, _)| i)
        .collect();
    log::debug!("filter kept {} of {} phones", indices.len(), dataset.len());
    View {
        dataset,
        indices: Cow::Owned(indices),
    }
}
