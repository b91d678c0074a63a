use std::fmt;

use super::filter::View;
use super::model::{BoolAttr, CategoricalAttr, Field, NumericAttr, Record};
use super::stats::MISSING;
use crate::error::CompareError;

// ---------------------------------------------------------------------------
// Field lists
// ---------------------------------------------------------------------------

/// One row of a comparison table: which column, and how to label it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparisonField {
    pub field: Field,
    pub label: &'static str,
}

const fn numeric(attr: NumericAttr, label: &'static str) -> ComparisonField {
    ComparisonField {
        field: Field::Numeric(attr),
        label,
    }
}

const fn flag(attr: BoolAttr, label: &'static str) -> ComparisonField {
    ComparisonField {
        field: Field::Flag(attr),
        label,
    }
}

const fn category(attr: CategoricalAttr, label: &'static str) -> ComparisonField {
    ComparisonField {
        field: Field::Category(attr),
        label,
    }
}

/// The main side-by-side spec sheet.
pub const SPEC_TABLE: [ComparisonField; 16] = [
    category(CategoricalAttr::BrandName, "Brand"),
    numeric(NumericAttr::Price, "Price (₹)"),
    numeric(NumericAttr::Rating, "Rating"),
    numeric(NumericAttr::RamCapacity, "RAM (GB)"),
    numeric(NumericAttr::StorageCapacity, "Storage (GB)"),
    numeric(NumericAttr::ProcessorSpeed, "Processor Speed (GHz)"),
    numeric(NumericAttr::BatteryCapacity, "Battery (mAh)"),
    numeric(NumericAttr::RefreshRate, "Refresh Rate (Hz)"),
    numeric(NumericAttr::MaxRearCameraMp, "Max Rear Camera (MP)"),
    numeric(NumericAttr::MaxFrontCameraMp, "Max Front Camera (MP)"),
    flag(BoolAttr::Has5g, "5G Support"),
    flag(BoolAttr::HasNfc, "NFC"),
    flag(BoolAttr::HasIrBlaster, "IR Blaster"),
    flag(BoolAttr::CardSupported, "SD Card Support"),
    category(CategoricalAttr::Os, "Operating System"),
    category(CategoricalAttr::SimType, "SIM Type"),
];

/// Connectivity and platform features.
pub const OTHER_FEATURES: [ComparisonField; 6] = [
    flag(BoolAttr::Has5g, "5G Support"),
    flag(BoolAttr::HasNfc, "NFC"),
    flag(BoolAttr::HasIrBlaster, "IR Blaster"),
    flag(BoolAttr::CardSupported, "SD Card"),
    category(CategoricalAttr::Os, "Operating System"),
    category(CategoricalAttr::SimType, "SIM Type"),
];

/// Numeric specs drawn as grouped bars.
pub const SPEC_BARS: [ComparisonField; 4] = [
    numeric(NumericAttr::RamCapacity, "RAM (GB)"),
    numeric(NumericAttr::StorageCapacity, "Storage (GB)"),
    numeric(NumericAttr::ProcessorSpeed, "Processor (GHz)"),
    numeric(NumericAttr::RefreshRate, "Refresh Rate (Hz)"),
];

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// A typed cell of a comparison table.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number { value: f64, integer: bool },
    Flag(bool),
    Text(String),
    Missing,
}

impl Value {
    pub fn of(record: &Record, field: Field) -> Value {
        let value = match field {
            Field::Numeric(attr) => record.numeric(attr).map(|value| Value::Number {
                value,
                integer: attr.is_integer(),
            }),
            Field::Flag(attr) => record.flag(attr).map(Value::Flag),
            Field::Category(attr) => record.category(attr).map(|s| Value::Text(s.to_string())),
        };
        value.unwrap_or(Value::Missing)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number { value, .. } => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number {
                value,
                integer: true,
            } => write!(f, "{value:.0}"),
            Value::Number { value, .. } => write!(f, "{value}"),
            Value::Flag(true) => f.write_str("Yes"),
            Value::Flag(false) => f.write_str("No"),
            Value::Text(s) => f.write_str(s),
            Value::Missing => f.write_str(MISSING),
        }
    }
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

/// How a model name maps to a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolvePolicy {
    /// Take the first match in dataset order.
    #[default]
    FirstMatch,
    /// Reject model names shared by several records.
    Unique,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub label: &'static str,
    pub a: Value,
    pub b: Value,
}

/// Side-by-side values of two phones, in field order.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonResult {
    /// Dataset index of the first phone.
    pub index_a: usize,
    /// Dataset index of the second phone.
    pub index_b: usize,
    pub rows: Vec<ComparisonRow>,
}

/// Compare the phones named `id_a` and `id_b` within `view`.
pub fn compare(
    view: &View<'_>,
    id_a: &str,
    id_b: &str,
    fields: &[ComparisonField],
    policy: ResolvePolicy,
) -> Result<ComparisonResult, CompareError> {
    if id_a == id_b {
        return Err(CompareError::SameRecord(id_a.to_string()));
    }
    let index_a = resolve(view, id_a, policy)?;
    let index_b = resolve(view, id_b, policy)?;
    if index_a == index_b {
        return Err(CompareError::SameRecord(id_a.to_string()));
    }

    let dataset = view.dataset();
    let (Some(a), Some(b)) = (dataset.get(index_a), dataset.get(index_b)) else {
        return Err(CompareError::NotFound(id_a.to_string()));
    };
    let rows = fields
        .iter()
        .map(|f| ComparisonRow {
            label: f.label,
            a: Value::of(a, f.field),
            b: Value::of(b, f.field),
        })
        .collect();

    Ok(ComparisonResult {
        index_a,
        index_b,
        rows,
    })
}

/// Dataset index of the record named `id` under `policy`.
pub fn resolve(view: &View<'_>, id: &str, policy: ResolvePolicy) -> Result<usize, CompareError> {
    let visible = view.indices();
    let mut matches = view
        .dataset()
        .find_by_model(id)
        .into_iter()
        .filter(|i| visible.binary_search(i).is_ok());

    let first = matches
        .next()
        .ok_or_else(|| CompareError::NotFound(id.to_string()))?;
    if policy == ResolvePolicy::Unique {
        let extra = matches.count();
        if extra > 0 {
            return Err(CompareError::Ambiguous {
                id: id.to_string(),
                matches: extra + 1,
            });
        }
    }
    Ok(first)
}
