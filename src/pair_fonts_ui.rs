//! The font pairing page: sample text on the left, heading and body lists
//! side by side.
//!
//! Any egui host can draw it by calling [`PairFontsUI::show`] once per frame.

use crate::explorer::{CatalogState, FontPairExplorer};
use crate::font_list_ui::{FontListAction, FontListUI};
use crate::font_registry::FontRegistry;
use crate::preview_ui;
use crate::selection::ListKind;
use std::time::{Duration, Instant};

/// Repaint cadence while timers or background loads are outstanding.
const PENDING_REPAINT: Duration = Duration::from_millis(50);

const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(220, 38, 38);

pub struct PairFontsUI {
    explorer: FontPairExplorer,
    registry: FontRegistry,
    heading: FontListUI,
    body: FontListUI,
}

impl PairFontsUI {
    pub fn new(explorer: FontPairExplorer) -> Self {
        Self {
            explorer,
            registry: FontRegistry::new(),
            heading: FontListUI::new(ListKind::Heading),
            body: FontListUI::new(ListKind::Body),
        }
    }

    pub fn explorer(&self) -> &FontPairExplorer {
        &self.explorer
    }

    pub fn explorer_mut(&mut self) -> &mut FontPairExplorer {
        &mut self.explorer
    }

    pub fn registry(&self) -> &FontRegistry {
        &self.registry
    }

    fn list_ui_mut(&mut self, kind: ListKind) -> &mut FontListUI {
        match kind {
            ListKind::Heading => &mut self.heading,
            ListKind::Body => &mut self.body,
        }
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        self.show_at(ctx, Instant::now());
    }

    /// Draw one frame as of `now`.
    pub fn show_at(&mut self, ctx: &egui::Context, now: Instant) {
        let tick = self.explorer.tick(now);
        self.registry.update(ctx, tick.loaded);
        for (kind, index) in tick.scroll_to {
            self.list_ui_mut(kind).scroll_to(index);
        }

        match self.explorer.catalog_state() {
            CatalogState::Loading => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.label(egui::RichText::new("Loading fonts...").size(20.0));
                    });
                });
                ctx.request_repaint_after(PENDING_REPAINT);
                return;
            }
            CatalogState::Failed(message) => {
                let message = message.clone();
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.label(egui::RichText::new(message).size(20.0).color(ERROR_COLOR));
                    });
                });
                return;
            }
            CatalogState::Ready => {}
        }

        egui::SidePanel::left("fontpair_preview")
            .resizable(true)
            .default_width(360.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("fontpair_preview_scroll")
                    .show(ui, |ui| {
                        preview_ui::show(
                            ui,
                            self.explorer.selected_font(ListKind::Heading),
                            self.explorer.selected_font(ListKind::Body),
                            &self.registry,
                        );
                    });
            });

        let mut actions: Vec<(ListKind, FontListAction)> = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(2, |columns| {
                for (column, list_ui) in columns.iter_mut().zip([&mut self.heading, &mut self.body]) {
                    let kind = list_ui.kind();
                    let list_actions = list_ui.show(column, &self.explorer, &self.registry);
                    actions.extend(list_actions.into_iter().map(|action| (kind, action)));
                }
            });
        });

        for (kind, action) in actions {
            self.apply(kind, action, now);
        }

        if self.explorer.has_pending_work() {
            ctx.request_repaint_after(PENDING_REPAINT);
        }
    }

    fn apply(&mut self, kind: ListKind, action: FontListAction, now: Instant) {
        match action {
            FontListAction::SelectCategory(name) => self.explorer.set_category(kind, &name),
            FontListAction::SelectFont { family, index } => {
                self.explorer.select_font(kind, &family, index)
            }
            FontListAction::Search(query) => self.explorer.set_search(kind, &query, now),
            FontListAction::Scrolled(metrics) => self.explorer.on_scroll(kind, metrics, now),
            FontListAction::ItemsVisible(families) => {
                self.explorer
                    .on_items_visible(families.iter().map(String::as_str));
            }
        }
    }
}
