//! Summary statistics over a [`View`].
//!
//! Every statistic returns `None` when it has no meaningful value (no present
//! values, too few pairs, zero variance). Callers render that as `N/A`; it is
//! never folded into `0.0` or `NaN`.

use super::filter::View;
use super::model::{BoolAttr, NumericAttr};

/// Number of records in the view.
pub fn count(view: &View<'_>) -> usize {
    view.len()
}

/// Arithmetic mean over present values.
pub fn mean(view: &View<'_>, attr: NumericAttr) -> Option<f64> {
    mean_of(&view.values(attr))
}

/// Median over present values; the average of the two middle values for an
/// even count.
pub fn median(view: &View<'_>, attr: NumericAttr) -> Option<f64> {
    let mut values = view.values(attr);
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

/// Fraction of records with the flag set, among records where it is present.
pub fn adoption_rate(view: &View<'_>, attr: BoolAttr) -> Option<f64> {
    let (present, enabled) = view
        .iter()
        .filter_map(|r| r.flag(attr))
        .fold((0usize, 0usize), |(n, yes), flag| (n + 1, yes + usize::from(flag)));
    (present > 0).then(|| enabled as f64 / present as f64)
}

/// Pearson correlation over records where both attributes are present.
pub fn correlation(view: &View<'_>, x: NumericAttr, y: NumericAttr) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = view
        .iter()
        .filter_map(|r| Some((r.numeric(x)?, r.numeric(y)?)))
        .collect();
    if pairs.len() < 2 {
        return None;
    }
    if is_constant(pairs.iter().map(|p| p.0)) || is_constant(pairs.iter().map(|p| p.1)) {
        return None;
    }
    if x == y {
        return Some(1.0);
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for &(px, py) in &pairs {
        let dx = px - mean_x;
        let dy = py - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    let denom = (sxx * syy).sqrt();
    if denom == 0.0 {
        return None;
    }
    Some((sxy / denom).clamp(-1.0, 1.0))
}

/// Smallest and largest present value.
pub fn bounds(view: &View<'_>, attr: NumericAttr) -> Option<(f64, f64)> {
    view.iter().filter_map(|r| r.numeric(attr)).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

fn mean_of(values: &[f64]) -> Option<f64> {
    (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
}

fn is_constant(mut values: impl Iterator<Item = f64>) -> bool {
    match values.next() {
        Some(first) => values.all(|v| v == first),
        None => true,
    }
}

// ---------------------------------------------------------------------------
// Histogram binning
// ---------------------------------------------------------------------------

/// One histogram bucket covering `[start, end)`; the last bucket is closed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl Bin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Equal-width histogram over `values`.
///
/// No values → no bins. A single distinct value → one unit-wide bin.
pub fn histogram(values: &[f64], bins: usize) -> Vec<Bin> {
    let Some((lo, hi)) = values.iter().fold(None, |acc: Option<(f64, f64)>, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    }) else {
        return Vec::new();
    };
    if bins == 0 {
        return Vec::new();
    }
    if lo == hi {
        return vec![Bin {
            start: lo - 0.5,
            end: hi + 0.5,
            count: values.len(),
        }];
    }

    let width = (hi - lo) / bins as f64;
    let mut out: Vec<Bin> = (0..bins)
        .map(|i| Bin {
            start: lo + width * i as f64,
            end: if i + 1 == bins { hi } else { lo + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();
    for &v in values {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

pub const MISSING: &str = "N/A";

/// Render an optional statistic with fixed decimals, `N/A` when undefined.
pub fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| format!("{v:.decimals$}"))
}

/// `₹12,345`-style currency, `N/A` when undefined.
pub fn fmt_currency(value: Option<f64>) -> String {
    value.map_or_else(
        || MISSING.to_string(),
        |v| format!("₹{}", group_thousands(v.round() as i64)),
    )
}

/// `42.5%` from a fraction, `N/A` when undefined.
pub fn fmt_percent(fraction: Option<f64>) -> String {
    fraction.map_or_else(|| MISSING.to_string(), |f| format!("{:.1}%", f * 100.0))
}

pub fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if n < 0 {
        out.insert(0, '-');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{apply, FilterSpec};
    use crate::data::model::{Dataset, Record};

    fn phone(price: Option<i64>, rating: Option<f64>, has_5g: Option<bool>) -> Record {
        let mut r = Record::new("Acme", format!("P{price:?}"));
        r.price = price;
        r.rating = rating;
        r.has_5g = has_5g;
        r
    }

    fn dataset() -> Dataset {
        Dataset::new(vec![
            phone(Some(12000), Some(80.0), Some(true)),
            phone(Some(90000), Some(90.0), Some(false)),
            phone(Some(30000), None, None),
            phone(None, Some(70.0), Some(true)),
        ])
    }

    fn empty_view(ds: &Dataset) -> View<'_> {
        apply(ds, &FilterSpec::new().with_range(NumericAttr::Price, -2.0, -1.0))
    }

    #[test]
    fn filtered_mean_matches_single_phone() {
        let mut zen = Record::new("Zen", "Z1");
        zen.price = Some(90000);
        zen.ram_capacity = Some(12);
        let mut acme = Record::new("Acme", "A1");
        acme.price = Some(12000);
        acme.ram_capacity = Some(4);
        let ds = Dataset::new(vec![acme, zen]);

        let view = apply(&ds, &FilterSpec::new().with_range(NumericAttr::Price, 0.0, 50000.0));
        assert_eq!(count(&view), 1);
        assert_eq!(mean(&view, NumericAttr::Price), Some(12000.0));
        assert_eq!(adoption_rate(&empty_view(&ds), BoolAttr::Has5g), None);
    }

    #[test]
    fn mean_and_median_skip_missing() {
        let ds = dataset();
        let view = View::full(&ds);
        assert_eq!(mean(&view, NumericAttr::Price), Some(44000.0));
        assert_eq!(median(&view, NumericAttr::Price), Some(30000.0));
        assert_eq!(median(&view, NumericAttr::Rating), Some(80.0));
        assert_eq!(mean(&view, NumericAttr::RamCapacity), None);
    }

    #[test]
    fn median_of_even_count_averages_middle() {
        let ds = Dataset::new(vec![
            phone(Some(4), None, None),
            phone(Some(1), None, None),
            phone(Some(3), None, None),
            phone(Some(2), None, None),
        ]);
        assert_eq!(median(&View::full(&ds), NumericAttr::Price), Some(2.5));
    }

    #[test]
    fn zero_mean_is_not_undefined() {
        let ds = Dataset::new(vec![phone(Some(0), None, None)]);
        assert_eq!(mean(&View::full(&ds), NumericAttr::Price), Some(0.0));
    }

    #[test]
    fn adoption_rate_counts_present_flags_only() {
        let ds = dataset();
        let rate = adoption_rate(&View::full(&ds), BoolAttr::Has5g).unwrap();
        assert!((rate - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(adoption_rate(&View::full(&ds), BoolAttr::HasNfc), None);
    }

    #[test]
    fn empty_view_yields_undefined_everywhere() {
        let ds = dataset();
        let view = empty_view(&ds);
        assert_eq!(count(&view), 0);
        assert_eq!(mean(&view, NumericAttr::Price), None);
        assert_eq!(median(&view, NumericAttr::Price), None);
        assert_eq!(adoption_rate(&view, BoolAttr::Has5g), None);
        assert_eq!(correlation(&view, NumericAttr::Price, NumericAttr::Rating), None);
        assert_eq!(bounds(&view, NumericAttr::Price), None);
    }

    #[test]
    fn correlation_uses_complete_pairs() {
        let ds = Dataset::new(vec![
            phone(Some(1), Some(2.0), None),
            phone(Some(2), Some(4.0), None),
            phone(Some(3), Some(6.0), None),
            phone(Some(4), None, None),
            phone(None, Some(100.0), None),
        ]);
        let r = correlation(&View::full(&ds), NumericAttr::Price, NumericAttr::Rating).unwrap();
        assert!((r - 1.0).abs() < 1e-12);

        let ds = Dataset::new(vec![
            phone(Some(1), Some(3.0), None),
            phone(Some(2), Some(2.0), None),
            phone(Some(3), Some(1.0), None),
        ]);
        let r = correlation(&View::full(&ds), NumericAttr::Price, NumericAttr::Rating).unwrap();
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn correlation_needs_two_pairs() {
        let ds = Dataset::new(vec![phone(Some(1), Some(2.0), None), phone(Some(2), None, None)]);
        assert_eq!(correlation(&View::full(&ds), NumericAttr::Price, NumericAttr::Rating), None);
    }

    #[test]
    fn correlation_with_constant_column_is_undefined() {
        let ds = Dataset::new(vec![
            phone(Some(1), Some(0.1), None),
            phone(Some(2), Some(0.1), None),
            phone(Some(3), Some(0.1), None),
        ]);
        assert_eq!(correlation(&View::full(&ds), NumericAttr::Price, NumericAttr::Rating), None);
    }

    #[test]
    fn self_correlation_is_one_or_undefined() {
        let ds = dataset();
        let view = View::full(&ds);
        assert_eq!(correlation(&view, NumericAttr::Price, NumericAttr::Price), Some(1.0));

        let flat = Dataset::new(vec![phone(Some(5), None, None), phone(Some(5), None, None)]);
        assert_eq!(correlation(&View::full(&flat), NumericAttr::Price, NumericAttr::Price), None);
    }

    #[test]
    fn bounds_cover_present_values() {
        let ds = dataset();
        assert_eq!(bounds(&View::full(&ds), NumericAttr::Price), Some((12000.0, 90000.0)));
    }

    #[test]
    fn histogram_places_every_value() {
        let values = [0.0, 1.0, 2.0, 3.0, 4.0, 10.0];
        let bins = histogram(&values, 5);
        assert_eq!(bins.len(), 5);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
        assert_eq!(bins[0].count, 2);
        assert_eq!(bins[4].count, 1);
        assert_eq!(bins[4].end, 10.0);
    }

    #[test]
    fn histogram_edge_cases() {
        assert!(histogram(&[], 10).is_empty());
        let single = histogram(&[7.0, 7.0], 10);
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].count, 2);
        assert_eq!(single[0].center(), 7.0);
    }

    #[test]
    fn undefined_renders_as_missing() {
        assert_eq!(fmt_opt(None, 1), "N/A");
        assert_eq!(fmt_opt(Some(81.26), 1), "81.3");
        assert_eq!(fmt_currency(Some(1234567.4)), "₹1,234,567");
        assert_eq!(fmt_currency(None), "N/A");
        assert_eq!(fmt_percent(Some(0.5)), "50.0%");
        assert_eq!(fmt_percent(None), "N/A");
        assert_eq!(group_thousands(-1000), "-1,000");
        assert_eq!(group_thousands(999), "999");
    }
}
