use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Serialize;

// ---------------------------------------------------------------------------
// Attribute enumerations – one variant per typed column
// ---------------------------------------------------------------------------

/// Numeric columns usable in range filters, aggregates and scatterplots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NumericAttr {
    Price,
    Rating,
    RamCapacity,
    StorageCapacity,
    ProcessorSpeed,
    BatteryCapacity,
    FastCharging,
    DisplaySize,
    RefreshRate,
    MaxRearCameraMp,
    MaxFrontCameraMp,
}

impl NumericAttr {
    pub const ALL: [NumericAttr; 11] = [
        NumericAttr::Price,
        NumericAttr::Rating,
        NumericAttr::RamCapacity,
        NumericAttr::StorageCapacity,
        NumericAttr::ProcessorSpeed,
        NumericAttr::BatteryCapacity,
        NumericAttr::FastCharging,
        NumericAttr::DisplaySize,
        NumericAttr::RefreshRate,
        NumericAttr::MaxRearCameraMp,
        NumericAttr::MaxFrontCameraMp,
    ];

    /// Column name in the source file.
    pub fn column(self) -> &'static str {
        match self {
            NumericAttr::Price => "price",
            NumericAttr::Rating => "rating",
            NumericAttr::RamCapacity => "ram_capacity",
            NumericAttr::StorageCapacity => "storage_capacity",
            NumericAttr::ProcessorSpeed => "processor_speed",
            NumericAttr::BatteryCapacity => "battery_capacity",
            NumericAttr::FastCharging => "fast_charging",
            NumericAttr::DisplaySize => "display_size",
            NumericAttr::RefreshRate => "refresh_rate",
            NumericAttr::MaxRearCameraMp => "max_rear_camera_MP",
            NumericAttr::MaxFrontCameraMp => "max_front_camera_MP",
        }
    }

    /// Human-readable axis label.
    pub fn label(self) -> &'static str {
        match self {
            NumericAttr::Price => "Price",
            NumericAttr::Rating => "Rating",
            NumericAttr::RamCapacity => "Ram Capacity",
            NumericAttr::StorageCapacity => "Storage Capacity",
            NumericAttr::ProcessorSpeed => "Processor Speed",
            NumericAttr::BatteryCapacity => "Battery Capacity",
            NumericAttr::FastCharging => "Fast Charging",
            NumericAttr::DisplaySize => "Display Size",
            NumericAttr::RefreshRate => "Refresh Rate",
            NumericAttr::MaxRearCameraMp => "Max Rear Camera MP",
            NumericAttr::MaxFrontCameraMp => "Max Front Camera MP",
        }
    }

    /// Whether the column stores whole numbers.
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            NumericAttr::Price
                | NumericAttr::RamCapacity
                | NumericAttr::StorageCapacity
                | NumericAttr::BatteryCapacity
                | NumericAttr::RefreshRate
        )
    }
}

/// Yes/no feature flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BoolAttr {
    Has5g,
    HasNfc,
    HasIrBlaster,
    CardSupported,
}

impl BoolAttr {
    pub const ALL: [BoolAttr; 4] = [
        BoolAttr::Has5g,
        BoolAttr::HasNfc,
        BoolAttr::HasIrBlaster,
        BoolAttr::CardSupported,
    ];

    pub fn column(self) -> &'static str {
        match self {
            BoolAttr::Has5g => "has_5g",
            BoolAttr::HasNfc => "has_nfc",
            BoolAttr::HasIrBlaster => "has_ir_blaster",
            BoolAttr::CardSupported => "card_supported",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BoolAttr::Has5g => "5G",
            BoolAttr::HasNfc => "NFC",
            BoolAttr::HasIrBlaster => "IR Blaster",
            BoolAttr::CardSupported => "SD Card",
        }
    }
}

/// Text columns, including the two identifying ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CategoricalAttr {
    BrandName,
    Model,
    Os,
    SimType,
}

impl CategoricalAttr {
    pub fn column(self) -> &'static str {
        match self {
            CategoricalAttr::BrandName => "brand_name",
            CategoricalAttr::Model => "model",
            CategoricalAttr::Os => "os",
            CategoricalAttr::SimType => "sim_type",
        }
    }
}

/// Any typed column, tagged with its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Numeric(NumericAttr),
    Flag(BoolAttr),
    Category(CategoricalAttr),
}

impl Field {
    pub fn column(self) -> &'static str {
        match self {
            Field::Numeric(a) => a.column(),
            Field::Flag(a) => a.column(),
            Field::Category(a) => a.column(),
        }
    }
}

/// Every column a source must provide, in export order.
pub const REQUIRED_COLUMNS: [&str; 19] = [
    "brand_name",
    "model",
    "price",
    "rating",
    "has_5g",
    "has_nfc",
    "has_ir_blaster",
    "processor_speed",
    "battery_capacity",
    "fast_charging",
    "ram_capacity",
    "storage_capacity",
    "display_size",
    "refresh_rate",
    "max_rear_camera_MP",
    "max_front_camera_MP",
    "card_supported",
    "os",
    "sim_type",
];

// ---------------------------------------------------------------------------
// Record – one row of the phone table
// ---------------------------------------------------------------------------

/// A single smartphone. `None` marks a missing value.
///
/// Field order matches [`REQUIRED_COLUMNS`] so the serde-derived CSV writer
/// emits the same header the loader expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub brand_name: String,
    pub model: String,
    pub price: Option<i64>,
    pub rating: Option<f64>,
    pub has_5g: Option<bool>,
    pub has_nfc: Option<bool>,
    pub has_ir_blaster: Option<bool>,
    pub processor_speed: Option<f64>,
    pub battery_capacity: Option<i64>,
    pub fast_charging: Option<f64>,
    pub ram_capacity: Option<i64>,
    pub storage_capacity: Option<i64>,
    pub display_size: Option<f64>,
    pub refresh_rate: Option<i64>,
    #[serde(rename = "max_rear_camera_MP")]
    pub max_rear_camera_mp: Option<f64>,
    #[serde(rename = "max_front_camera_MP")]
    pub max_front_camera_mp: Option<f64>,
    pub card_supported: Option<bool>,
    pub os: Option<String>,
    pub sim_type: Option<String>,
}

impl Record {
    /// A record with only the identifying fields set.
    pub fn new(brand_name: impl Into<String>, model: impl Into<String>) -> Self {
        Record {
            brand_name: brand_name.into(),
            model: model.into(),
            price: None,
            rating: None,
            has_5g: None,
            has_nfc: None,
            has_ir_blaster: None,
            processor_speed: None,
            battery_capacity: None,
            fast_charging: None,
            ram_capacity: None,
            storage_capacity: None,
            display_size: None,
            refresh_rate: None,
            max_rear_camera_mp: None,
            max_front_camera_mp: None,
            card_supported: None,
            os: None,
            sim_type: None,
        }
    }

    pub fn numeric(&self, attr: NumericAttr) -> Option<f64> {
        match attr {
            NumericAttr::Price => self.price.map(|v| v as f64),
            NumericAttr::Rating => self.rating,
            NumericAttr::RamCapacity => self.ram_capacity.map(|v| v as f64),
            NumericAttr::StorageCapacity => self.storage_capacity.map(|v| v as f64),
            NumericAttr::ProcessorSpeed => self.processor_speed,
            NumericAttr::BatteryCapacity => self.battery_capacity.map(|v| v as f64),
            NumericAttr::FastCharging => self.fast_charging,
            NumericAttr::DisplaySize => self.display_size,
            NumericAttr::RefreshRate => self.refresh_rate.map(|v| v as f64),
            NumericAttr::MaxRearCameraMp => self.max_rear_camera_mp,
            NumericAttr::MaxFrontCameraMp => self.max_front_camera_mp,
        }
    }

    pub fn flag(&self, attr: BoolAttr) -> Option<bool> {
        match attr {
            BoolAttr::Has5g => self.has_5g,
            BoolAttr::HasNfc => self.has_nfc,
            BoolAttr::HasIrBlaster => self.has_ir_blaster,
            BoolAttr::CardSupported => self.card_supported,
        }
    }

    pub fn category(&self, attr: CategoricalAttr) -> Option<&str> {
        match attr {
            CategoricalAttr::BrandName => Some(&self.brand_name),
            CategoricalAttr::Model => Some(&self.model),
            CategoricalAttr::Os => self.os.as_deref(),
            CategoricalAttr::SimType => self.sim_type.as_deref(),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// All phones in source order. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
    source: Option<PathBuf>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Dataset {
            records,
            source: None,
        }
    }

    /// Remember which file the records came from.
    pub fn with_source(mut self, path: &Path) -> Self {
        self.source = Some(path.to_path_buf());
        self
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Number of phones.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// Sorted unique brand names.
    pub fn brands(&self) -> Vec<String> {
        self.unique(|r| &r.brand_name)
    }

    /// Sorted unique model names.
    pub fn models(&self) -> Vec<String> {
        self.unique(|r| &r.model)
    }

    /// Indices of every record with this exact model name, in source order.
    pub fn find_by_model(&self, model: &str) -> Vec<usize> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.model == model)
            .map(|(i, _)| i)
            .collect()
    }

    fn unique<'a>(&'a self, key: impl Fn(&'a Record) -> &'a String) -> Vec<String> {
        self.records
            .iter()
            .map(key)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .cloned()
            .collect()
    }
}
