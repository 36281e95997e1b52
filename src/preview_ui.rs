//! Sample text column previewing the selected heading and body fonts.

use crate::font_registry::FontRegistry;
use egui::{Color32, RichText};

pub const SAMPLE_HEADING: &str = "The Quick Brown Fox Jumps Over The Lazy Dog";

pub const SAMPLE_PARAGRAPH: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. \
Sed do eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, \
quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat. Duis aute \
irure dolor in reprehenderit in voluptate velit esse cillum dolore eu fugiat nulla pariatur.";

const HEADING_SIZE: f32 = 24.0;
const BODY_SIZE: f32 = 15.0;
const SELECTED: Color32 = Color32::from_rgb(22, 163, 74);

/// "Heading Font: X" style status text.
pub fn selection_label(label: &str, family: &str) -> String {
    if family.is_empty() {
        format!("{label}: Not selected")
    } else {
        format!("{label}: {family}")
    }
}

pub fn show(ui: &mut egui::Ui, heading_font: &str, body_font: &str, registry: &FontRegistry) {
    ui.label(RichText::new("Sample Text").strong().size(20.0));
    ui.add_space(8.0);

    for (label, family) in [("Heading Font", heading_font), ("Body Font", body_font)] {
        let text = RichText::new(selection_label(label, family)).small();
        ui.label(if family.is_empty() {
            text.weak()
        } else {
            text.color(SELECTED)
        });
    }
    ui.add_space(12.0);

    ui.label(
        RichText::new(SAMPLE_HEADING)
            .strong()
            .font(registry.font_id(heading_font, HEADING_SIZE)),
    );
    ui.add_space(12.0);
    ui.label(RichText::new(SAMPLE_PARAGRAPH).font(registry.font_id(body_font, BODY_SIZE)));

    ui.add_space(16.0);
    ui.separator();
    ui.label(RichText::new("How to Use").strong());
    ui.label("1. Click a font in the \"Heading Fonts\" list to select it");
    ui.label("2. Click a font in the \"Body Fonts\" list to select it");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_label() {
        assert_eq!(selection_label("Heading Font", ""), "Heading Font: Not selected");
        assert_eq!(selection_label("Body Font", "Lora"), "Body Font: Lora");
    }
}
