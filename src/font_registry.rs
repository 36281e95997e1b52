//! Registration of downloaded catalog fonts with egui.
//!
//! `Context::set_fonts` only takes effect at the start of the next pass, and
//! drawing with an unregistered `FontFamily::Name` panics. Newly added fonts
//! are therefore staged for one frame before [`FontRegistry::family`] hands
//! out their family.

use crate::asset_loader::LoadedFont;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

const FONT_KEY_PREFIX: &str = "catalog:";

#[derive(Default)]
pub struct FontRegistry {
    data: BTreeMap<String, Arc<Vec<u8>>>,
    /// Submitted to egui during the previous frame
    staged: HashSet<String>,
    /// Safe to draw with this frame
    active: HashSet<String>,
}

impl FontRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call once at the start of every frame, before drawing.
    ///
    /// Promotes the fonts submitted last frame and submits `loaded`.
    pub fn update(&mut self, ctx: &egui::Context, loaded: Vec<LoadedFont>) {
        self.active.extend(self.staged.drain());

        let mut added = false;
        for font in loaded {
            if self.data.contains_key(&font.family) {
                continue;
            }
            self.staged.insert(font.family.clone());
            self.data.insert(font.family, font.data);
            added = true;
        }

        if added {
            log::debug!("Registering {} fonts with egui", self.data.len());
            ctx.set_fonts(self.font_definitions());
        }
    }

    fn font_definitions(&self) -> egui::FontDefinitions {
        let mut fonts = egui::FontDefinitions::default();
        let fallbacks = fonts
            .families
            .get(&egui::FontFamily::Proportional)
            .cloned()
            .unwrap_or_default();

        for (family, bytes) in &self.data {
            let key = font_key(family);
            fonts.font_data.insert(
                key.clone(),
                egui::FontData::from_owned(bytes.to_vec()).into(),
            );
            let mut chain = vec![key.clone()];
            chain.extend(fallbacks.iter().cloned());
            fonts
                .families
                .insert(egui::FontFamily::Name(key.into()), chain);
        }
        fonts
    }

    pub fn is_active(&self, family: &str) -> bool {
        self.active.contains(family)
    }

    /// Family to draw `family` with: the catalog font once active, the
    /// default proportional font until then.
    pub fn family(&self, family: &str) -> egui::FontFamily {
        if self.is_active(family) {
            egui::FontFamily::Name(font_key(family).into())
        } else {
            egui::FontFamily::Proportional
        }
    }

    pub fn font_id(&self, family: &str, size: f32) -> egui::FontId {
        egui::FontId::new(size, self.family(family))
    }
}

fn font_key(family: &str) -> String {
    format!("{FONT_KEY_PREFIX}{family}")
}
