use std::sync::OnceLock;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use water_quality_predictor::Pollutant;

// ---------------------------------------------------------------------------
// Pollutant palette
// ---------------------------------------------------------------------------

/// Hue span of the palette, from indigo towards violet.
const HUE_START: f32 = 200.0;
const HUE_END: f32 = 290.0;

fn hsl_to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Generates `n` colours with hues evenly spaced across the palette span.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    let step = if n > 1 {
        (HUE_END - HUE_START) / (n - 1) as f32
    } else {
        0.0
    };
    (0..n)
        .map(|i| hsl_to_color32(Hsl::new(HUE_START + step * i as f32, 0.65, 0.55)))
        .collect()
}

/// Bar / card colour of a pollutant, stable across frames.
pub fn pollutant_color(pollutant: Pollutant) -> Color32 {
    static PALETTE: OnceLock<Vec<Color32>> = OnceLock::new();
    PALETTE.get_or_init(|| generate_palette(Pollutant::ALL.len()))[pollutant as usize]
}

/// Darker shade used for headings.
pub fn accent() -> Color32 {
    hsl_to_color32(Hsl::new(220.0, 0.58, 0.32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_distinct_colour_per_pollutant() {
        let palette = generate_palette(Pollutant::ALL.len());
        assert_eq!(palette.len(), 6);
        for (i, a) in palette.iter().enumerate() {
            for b in &palette[i + 1..] {
                assert_ne!(a, b);
            }
        }
        for pollutant in Pollutant::ALL {
            assert_eq!(pollutant_color(pollutant), palette[pollutant as usize]);
        }
    }

    #[test]
    fn empty_and_single() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(1).len(), 1);
    }
}
