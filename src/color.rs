use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues, for
/// multi-series charts.
pub fn series_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Continuous ramps
// ---------------------------------------------------------------------------

/// Diverging blue–white–red ramp for correlation values in `[-1, 1]`.
pub fn diverging(r: f64) -> Color32 {
    let t = (r.clamp(-1.0, 1.0) as f32 + 1.0) / 2.0;
    let cold = LinSrgb::new(0.23_f32, 0.30, 0.75);
    let white = LinSrgb::new(0.95_f32, 0.95, 0.95);
    let warm = LinSrgb::new(0.71_f32, 0.02, 0.15);

    let mixed = if t < 0.5 {
        cold.mix(white, t * 2.0)
    } else {
        white.mix(warm, (t - 0.5) * 2.0)
    };
    to_color32(Srgb::from_linear(mixed))
}

/// Sequential dark-purple–teal–yellow ramp for magnitudes in `[0, 1]`
/// (bubble colour, wind-rose speed bins).
pub fn sequential(t: f64) -> Color32 {
    let t = t.clamp(0.0, 1.0) as f32;
    let low = LinSrgb::new(0.06_f32, 0.00, 0.11);
    let mid = LinSrgb::new(0.01_f32, 0.27, 0.26);
    let high = LinSrgb::new(0.97_f32, 0.80, 0.02);

    let mixed = if t < 0.5 {
        low.mix(mid, t * 2.0)
    } else {
        mid.mix(high, (t - 0.5) * 2.0)
    };
    to_color32(Srgb::from_linear(mixed))
}

fn to_color32(rgb: Srgb) -> Color32 {
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_size() {
        assert!(series_palette(0).is_empty());
        let palette = series_palette(5);
        assert_eq!(palette.len(), 5);
        // Evenly spaced hues never collide for small n.
        for (i, a) in palette.iter().enumerate() {
            for b in palette.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_ramp_endpoints() {
        let negative = diverging(-1.0);
        let positive = diverging(1.0);
        assert!(negative.b() > negative.r());
        assert!(positive.r() > positive.b());

        // Out-of-range inputs clamp instead of wrapping.
        assert_eq!(diverging(-5.0), negative);
        assert_eq!(sequential(2.0), sequential(1.0));
    }
}
