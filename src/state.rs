use std::path::Path;

use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::compare::{compare, ComparisonField, ComparisonResult, ResolvePolicy};
use crate::data::filter::{apply, FilterSpec, View};
use crate::data::loader;
use crate::data::model::{CategoricalAttr, Dataset, NumericAttr};
use crate::data::stats;
use crate::error::CompareError;

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Overview,
    BrandExplorer,
    FeatureExplorer,
    ComparePhones,
    RawData,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Overview,
        Page::BrandExplorer,
        Page::FeatureExplorer,
        Page::ComparePhones,
        Page::RawData,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Page::Overview => "Overview",
            Page::BrandExplorer => "Brand Explorer",
            Page::FeatureExplorer => "Feature Explorer",
            Page::ComparePhones => "Compare Phones",
            Page::RawData => "EDA / Raw Data",
        }
    }
}

// ---------------------------------------------------------------------------
// Brand Explorer selections
// ---------------------------------------------------------------------------

/// Sidebar inputs of the Brand Explorer page.
#[derive(Debug, Clone, PartialEq)]
pub struct BrandFilters {
    pub brand: Option<String>,
    /// Inclusive price range, slider domain is `price_bounds`.
    pub price: (i64, i64),
    pub price_bounds: (i64, i64),
    pub ram: (i64, i64),
    pub ram_bounds: (i64, i64),
    /// Indices into `DashboardConfig::storage_steps`.
    pub storage: (usize, usize),
}

impl BrandFilters {
    fn for_dataset(dataset: &Dataset, config: &DashboardConfig) -> Self {
        let full = View::full(dataset);
        let int_bounds = |attr| {
            stats::bounds(&full, attr)
                .map(|(lo, hi)| (lo.floor() as i64, hi.ceil() as i64))
                .unwrap_or((0, 0))
        };
        let price_bounds = int_bounds(NumericAttr::Price);
        let ram_bounds = int_bounds(NumericAttr::RamCapacity);
        BrandFilters {
            brand: dataset.brands().into_iter().next(),
            price: (0, price_bounds.1),
            price_bounds,
            ram: ram_bounds,
            ram_bounds,
            storage: (0, config.storage_steps.len().saturating_sub(1)),
        }
    }

    fn spec(&self, config: &DashboardConfig) -> FilterSpec {
        let step = |i: usize| config.storage_steps.get(i).copied().unwrap_or(0) as f64;
        let specs = FilterSpec::new()
            .with_range(NumericAttr::Price, self.price.0 as f64, self.price.1 as f64)
            .with_range(NumericAttr::RamCapacity, self.ram.0 as f64, self.ram.1 as f64)
            .with_range(
                NumericAttr::StorageCapacity,
                step(self.storage.0),
                step(self.storage.1),
            );
        match &self.brand {
            Some(brand) => FilterSpec::new()
                .with_equals(CategoricalAttr::BrandName, brand.clone())
                .and(&specs),
            None => specs,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded dataset; replaced wholesale by File → Open.
    pub dataset: Dataset,

    /// Page chosen in the sidebar.
    pub page: Page,

    pub brand: BrandFilters,

    /// Indices of phones passing the Brand Explorer filters (cached).
    pub visible_indices: Vec<usize>,

    /// Feature Explorer axes; always distinct.
    pub feature_x: NumericAttr,
    pub feature_y: NumericAttr,

    /// Compare Phones selections.
    pub phone_a: Option<String>,
    pub phone_b: Option<String>,
    pub resolve_policy: ResolvePolicy,

    /// Scatterplot colouring by operating system.
    pub os_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    brands: Vec<String>,
    models: Vec<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig, dataset: Dataset) -> Self {
        let mut state = Self {
            brand: BrandFilters::for_dataset(&dataset, &config),
            os_colors: ColorMap::new(CategoricalAttr::Os, &View::full(&dataset)),
            config,
            dataset: Dataset::default(),
            page: Page::default(),
            visible_indices: Vec::new(),
            feature_x: NumericAttr::Price,
            feature_y: NumericAttr::Rating,
            phone_a: None,
            phone_b: None,
            resolve_policy: ResolvePolicy::default(),
            status_message: None,
            brands: Vec::new(),
            models: Vec::new(),
        };
        state.set_dataset(dataset);
        state
    }

    /// Ingest a newly loaded dataset, reset selections and refilter.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.brand = BrandFilters::for_dataset(&dataset, &self.config);
        self.os_colors = ColorMap::new(CategoricalAttr::Os, &View::full(&dataset));
        self.brands = dataset.brands();
        self.models = dataset.models();
        self.dataset = dataset;

        let first = self.models.first().cloned();
        self.phone_a = None;
        self.phone_b = None;
        if let Some(model) = first {
            self.set_phone_a(model);
        }
        self.status_message = None;
        self.refilter();
    }

    /// Load a file picked by the user. On failure the current dataset stays.
    pub fn open_file(&mut self, path: &Path) {
        match loader::load_file(path) {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load file: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Write the loaded dataset to `path` as CSV.
    pub fn export_csv(&mut self, path: &Path) {
        match loader::export_csv(&self.dataset, path) {
            Ok(()) => self.status_message = None,
            Err(e) => {
                log::error!("Failed to export: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    pub fn brands(&self) -> &[String] {
        &self.brands
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    // -- Brand Explorer -----------------------------------------------------

    /// The filter the Brand Explorer sidebar currently describes.
    pub fn brand_filter(&self) -> FilterSpec {
        self.brand.spec(&self.config)
    }

    /// Recompute `visible_indices` from the full dataset.
    pub fn refilter(&mut self) {
        self.visible_indices = apply(&self.dataset, &self.brand_filter()).into_indices();
    }

    pub fn brand_view(&self) -> View<'_> {
        View::from_indices(&self.dataset, &self.visible_indices)
    }

    pub fn set_brand(&mut self, brand: String) {
        self.brand.brand = Some(brand);
        self.refilter();
    }

    pub fn set_price_range(&mut self, lo: i64, hi: i64) {
        self.brand.price = ordered(lo, hi);
        self.refilter();
    }

    pub fn set_ram_range(&mut self, lo: i64, hi: i64) {
        self.brand.ram = ordered(lo, hi);
        self.refilter();
    }

    pub fn set_storage_range(&mut self, lo: usize, hi: usize) {
        let last = self.config.storage_steps.len().saturating_sub(1);
        let (lo, hi) = ordered(lo.min(last), hi.min(last));
        self.brand.storage = (lo, hi);
        self.refilter();
    }

    // -- Feature Explorer ---------------------------------------------------

    /// Choose the first axis; the second moves off it if they would clash.
    pub fn set_feature_x(&mut self, attr: NumericAttr) {
        self.feature_x = attr;
        if self.feature_y == attr {
            self.feature_y = NumericAttr::ALL
                .into_iter()
                .find(|&a| a != attr)
                .unwrap_or(NumericAttr::Rating);
        }
    }

    /// Choose the second axis; ignored when equal to the first.
    pub fn set_feature_y(&mut self, attr: NumericAttr) {
        if attr != self.feature_x {
            self.feature_y = attr;
        }
    }

    pub fn feature_correlation(&self) -> Option<f64> {
        stats::correlation(&View::full(&self.dataset), self.feature_x, self.feature_y)
    }

    // -- Compare Phones -----------------------------------------------------

    /// Choose the first phone; the second moves off it if they would clash.
    pub fn set_phone_a(&mut self, model: String) {
        if self.phone_b.as_deref() == Some(model.as_str()) || self.phone_b.is_none() {
            self.phone_b = self.models.iter().find(|m| **m != model).cloned();
        }
        self.phone_a = Some(model);
    }

    pub fn set_phone_b(&mut self, model: String) {
        self.phone_b = Some(model);
    }

    /// Compare the selected phones over `fields`.
    pub fn comparison(
        &self,
        fields: &[ComparisonField],
    ) -> Option<Result<ComparisonResult, CompareError>> {
        let a = self.phone_a.as_deref()?;
        let b = self.phone_b.as_deref()?;
        Some(compare(&View::full(&self.dataset), a, b, fields, self.resolve_policy))
    }
}

fn ordered<T: Ord>(a: T, b: T) -> (T, T) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::compare::SPEC_TABLE;
    use crate::data::model::Record;

    fn phone(brand: &str, model: &str, price: i64, ram: i64, storage: i64) -> Record {
        let mut r = Record::new(brand, model);
        r.price = Some(price);
        r.ram_capacity = Some(ram);
        r.storage_capacity = Some(storage);
        r
    }

    fn state() -> AppState {
        AppState::new(
            DashboardConfig::default(),
            Dataset::new(vec![
                phone("acme", "A1", 12000, 4, 64),
                phone("acme", "A2", 45000, 8, 256),
                phone("zen", "Z1", 90000, 12, 512),
                phone("acme", "A3", 8000, 2, 32),
            ]),
        )
    }

    #[test]
    fn starts_on_first_brand_with_open_ranges() {
        let s = state();
        assert_eq!(s.brand.brand.as_deref(), Some("acme"));
        assert_eq!(s.brand.price, (0, 90000));
        assert_eq!(s.brand.ram, (2, 12));
        assert_eq!(s.visible_indices, vec![0, 1, 3]);
        assert_eq!(s.brands(), &["acme".to_string(), "zen".to_string()]);
    }

    #[test]
    fn slider_changes_refilter() {
        let mut s = state();
        s.set_price_range(40000, 10000);
        assert_eq!(s.brand.price, (10000, 40000));
        assert_eq!(s.visible_indices, vec![0]);

        s.set_price_range(0, 90000);
        s.set_storage_range(0, 4); // 4..=64 GB
        assert_eq!(s.visible_indices, vec![0, 3]);

        s.set_ram_range(3, 12);
        assert_eq!(s.brand_view().len(), 1);

        s.set_brand("zen".to_string());
        assert!(s.brand_view().is_empty());
    }

    #[test]
    fn feature_axes_stay_distinct() {
        let mut s = state();
        s.set_feature_x(NumericAttr::Rating);
        assert_eq!(s.feature_x, NumericAttr::Rating);
        assert_ne!(s.feature_y, NumericAttr::Rating);

        let y = s.feature_y;
        s.set_feature_y(NumericAttr::Rating);
        assert_eq!(s.feature_y, y);

        s.set_feature_x(NumericAttr::Price);
        s.set_feature_y(NumericAttr::RamCapacity);
        let r = s.feature_correlation().unwrap();
        assert!(r > 0.9 && r <= 1.0);
    }

    #[test]
    fn phone_selection_never_pairs_a_model_with_itself() {
        let mut s = state();
        assert_eq!(s.phone_a.as_deref(), Some("A1"));
        assert_eq!(s.phone_b.as_deref(), Some("A2"));

        s.set_phone_a("A2".to_string());
        assert_eq!(s.phone_b.as_deref(), Some("A1"));

        let result = s.comparison(&SPEC_TABLE).unwrap().unwrap();
        assert_eq!((result.index_a, result.index_b), (1, 0));
    }

    #[test]
    fn failed_open_keeps_dataset() {
        let mut s = state();
        s.open_file(Path::new("/no/such/phones.csv"));
        assert_eq!(s.dataset.len(), 4);
        assert!(s.status_message.as_deref().is_some_and(|m| m.starts_with("Error")));
    }

    #[test]
    fn empty_dataset_is_usable() {
        let s = AppState::new(DashboardConfig::default(), Dataset::default());
        assert!(s.visible_indices.is_empty());
        assert!(s.comparison(&SPEC_TABLE).is_none());
        assert_eq!(s.feature_correlation(), None);
    }
}
