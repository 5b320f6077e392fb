use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            // Start at a blue hue so a single industry does not render red.
            let hue = 210.0 + (i as f32 / n as f32) * 360.0;
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
// Color mapping: industry → Color32
// ---------------------------------------------------------------------------

/// Maps the industries of a view to distinct colours, shared by the pie and
/// bar charts so an industry keeps its colour across the dashboard.
/// Records without an industry are drawn in the default colour.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMap {
    mapping: Vec<(String, Color32)>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map for industries, in the given order. Nulls are skipped.
    pub fn new<'a>(industries: impl IntoIterator<Item = Option<&'a str>>) -> Self {
        let named: Vec<&str> = industries.into_iter().flatten().collect();
        let palette = generate_palette(named.len());
        let mapping = named
            .into_iter()
            .zip(palette)
            .map(|(name, c)| (name.to_string(), c))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for an industry.
    pub fn color_for(&self, industry: Option<&str>) -> Color32 {
        industry
            .and_then(|name| self.mapping.iter().find(|(n, _)| n == name))
            .map(|(_, c)| *c)
            .unwrap_or(self.default_color)
    }

    /// Return the legend entries (industry → colour) for the UI.
    pub fn legend_entries(&self) -> &[(String, Color32)] {
        &self.mapping
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let colors = generate_palette(6);
        assert_eq!(colors.len(), 6);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn null_industry_uses_default_colour() {
        let map = ColorMap::new([Some("Retail"), None, Some("Office")]);
        assert_eq!(map.legend_entries().len(), 2);
        assert_eq!(map.color_for(None), Color32::GRAY);
        assert_eq!(map.color_for(Some("Unknown")), Color32::GRAY);
        assert_ne!(map.color_for(Some("Retail")), map.color_for(Some("Office")));
    }
}
