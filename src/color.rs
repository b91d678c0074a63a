use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::filter::View;
use crate::data::model::CategoricalAttr;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: category value → Color32
// ---------------------------------------------------------------------------

/// Maps the distinct values of a categorical column to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    pub attr: CategoricalAttr,
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map from the values `attr` takes in `view`.
    pub fn new(attr: CategoricalAttr, view: &View<'_>) -> Self {
        let values: BTreeSet<&str> = view.iter().filter_map(|r| r.category(attr)).collect();
        let palette = generate_palette(values.len());
        let mapping = values
            .into_iter()
            .zip(palette)
            .map(|(v, c)| (v.to_string(), c))
            .collect();

        ColorMap {
            attr,
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a value; missing or unknown values are grey.
    pub fn color_for(&self, value: Option<&str>) -> Color32 {
        value
            .and_then(|v| self.mapping.get(v))
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Distinct values in sorted order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.mapping.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Dataset, Record};

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        let colors = generate_palette(3);
        assert_eq!(colors.len(), 3);
        assert_ne!(colors[0], colors[1]);
    }

    #[test]
    fn missing_category_is_grey() {
        let mut a = Record::new("Acme", "A1");
        a.os = Some("android".to_string());
        let mut b = Record::new("Acme", "A2");
        b.os = Some("ios".to_string());
        let ds = Dataset::new(vec![a, b, Record::new("Acme", "A3")]);

        let map = ColorMap::new(CategoricalAttr::Os, &View::full(&ds));
        assert_eq!(map.values().collect::<Vec<_>>(), vec!["android", "ios"]);
        assert_ne!(map.color_for(Some("android")), Color32::GRAY);
        assert_eq!(map.color_for(None), Color32::GRAY);
        assert_eq!(map.color_for(Some("symbian")), Color32::GRAY);
    }
}
