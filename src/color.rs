use std::collections::{BTreeMap, BTreeSet};

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

/// Colour of a bar whose game carries the split flag.
pub const FLAGGED: Color32 = Color32::from_rgb(240, 200, 60);
/// Colour of a bar whose game does not.
pub const UNFLAGGED: Color32 = Color32::from_rgb(40, 50, 140);
/// Highlight marker on the league-wide scatters.
pub const HIGHLIGHT: Color32 = Color32::BLACK;

// ---------------------------------------------------------------------------
// Color mapping: team code → Color32
// ---------------------------------------------------------------------------

/// Maps every team to a distinct colour, stable for a given team set.
#[derive(Debug, Clone, Default)]
pub struct TeamColors {
    mapping: BTreeMap<String, Color32>,
}

impl TeamColors {
    pub fn new(teams: &BTreeSet<String>) -> Self {
        let palette = generate_palette(teams.len());
        TeamColors {
            mapping: teams.iter().cloned().zip(palette).collect(),
        }
    }

    pub fn color_for(&self, team: &str) -> Color32 {
        self.mapping.get(team).copied().unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colors_are_distinct() {
        let p = generate_palette(32);
        assert_eq!(p.len(), 32);
        let unique: BTreeSet<[u8; 4]> = p.iter().map(|c| c.to_array()).collect();
        assert_eq!(unique.len(), 32);
    }

    #[test]
    fn unknown_team_falls_back_to_gray() {
        let teams: BTreeSet<String> = ["KC", "DEN"].iter().map(|s| s.to_string()).collect();
        let colors = TeamColors::new(&teams);
        assert_ne!(colors.color_for("KC"), colors.color_for("DEN"));
        assert_eq!(colors.color_for("HOU"), Color32::GRAY);
    }
}
