use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

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
            let hsl = Hsl::new(hue, 0.65, 0.55);
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
// Color mapping: category label → Color32
// ---------------------------------------------------------------------------

/// Maps category labels to distinct colours so a bar keeps its colour while
/// the ranking changes under different filters.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl Default for ColorMap {
    fn default() -> Self {
        Self {
            mapping: BTreeMap::new(),
            default_color: Color32::GRAY,
        }
    }
}

impl ColorMap {
    /// Build a colour map over the given labels.
    pub fn new<S: AsRef<str>>(labels: &[S]) -> Self {
        let palette = generate_palette(labels.len());
        let mapping = labels
            .iter()
            .zip(palette)
            .map(|(label, c)| (label.as_ref().to_string(), c))
            .collect();

        ColorMap {
            mapping,
            ..Default::default()
        }
    }

    /// Look up the colour for a label; unmapped labels (such as "Unknown") are grey.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}
