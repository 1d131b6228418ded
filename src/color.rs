use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Eta;

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
// Color mapping: η value → Color32
// ---------------------------------------------------------------------------

/// Maps each eligible η value to a distinct colour; the baseline gets a
/// fixed neutral tone.
#[derive(Debug, Clone)]
pub struct EtaColorMap {
    mapping: BTreeMap<Eta, Color32>,
    baseline_color: Color32,
    default_color: Color32,
}

impl EtaColorMap {
    /// Build a colour map over the eligible η values (ascending order, so the
    /// hue wheel follows the parameter sweep).
    pub fn new(eligible: &[Eta]) -> Self {
        let palette = generate_palette(eligible.len());
        let mapping: BTreeMap<Eta, Color32> = eligible
            .iter()
            .copied()
            .zip(palette.into_iter())
            .collect();

        EtaColorMap {
            mapping,
            baseline_color: Color32::from_rgb(0x44, 0x03, 0x56),
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for an η value.
    pub fn color_for(&self, eta: Eta) -> Color32 {
        if eta.is_baseline() {
            return self.baseline_color;
        }
        self.mapping.get(&eta).copied().unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_colors() {
        let palette = generate_palette(6);
        assert_eq!(palette.len(), 6);
        for (i, a) in palette.iter().enumerate() {
            for b in &palette[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn baseline_gets_its_fixed_color() {
        let map = EtaColorMap::new(&[Eta::Value(0.1), Eta::Value(0.2)]);
        assert_eq!(map.color_for(Eta::Baseline), map.baseline_color);
        assert_ne!(map.color_for(Eta::Value(0.1)), map.color_for(Eta::Value(0.2)));
    }
}
