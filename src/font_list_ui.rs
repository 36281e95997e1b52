//! One font list column: search box, category selector, status line and the
//! scrollable list of fonts rendered in their own typeface.

use crate::explorer::FontPairExplorer;
use crate::font_registry::FontRegistry;
use crate::pagination::ScrollMetrics;
use crate::selection::ListKind;
use egui::text::LayoutJob;
use egui::{Color32, FontId, TextFormat};
use fontpair_catalog::{FontDescriptor, display_category_name, match_indices};

const FAMILY_SIZE: f32 = 16.0;
const META_SIZE: f32 = 11.0;
const ACCENT: Color32 = Color32::from_rgb(37, 99, 235);
const LOADING: Color32 = Color32::from_rgb(202, 138, 4);
const MATCH: Color32 = Color32::from_rgb(255, 200, 0);

/// Events produced by a frame of the list.
#[derive(Debug, Clone, PartialEq)]
pub enum FontListAction {
    SelectCategory(String),
    SelectFont { family: String, index: usize },
    Search(String),
    Scrolled(ScrollMetrics),
    /// Families whose rows were on screen but whose assets are not loaded.
    ItemsVisible(Vec<String>),
}

pub struct FontListUI {
    kind: ListKind,
    search_query: String,
    /// Row to bring into view on the next frame
    scroll_to: Option<usize>,
    last_offset: Option<f32>,
}

impl FontListUI {
    pub fn new(kind: ListKind) -> Self {
        Self {
            kind,
            search_query: String::new(),
            scroll_to: None,
            last_offset: None,
        }
    }

    pub fn kind(&self) -> ListKind {
        self.kind
    }

    /// Center row `index` on the next frame.
    pub fn scroll_to(&mut self, index: usize) {
        self.scroll_to = Some(index);
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        explorer: &FontPairExplorer,
        registry: &FontRegistry,
    ) -> Vec<FontListAction> {
        let kind = self.kind;
        let mut actions = Vec::new();
        let selected_category = explorer.selected_category(kind);
        let selected_font = explorer.selected_font(kind);
        let searching = explorer.is_searching(kind);
        let list = explorer.list(kind);

        ui.label(egui::RichText::new(kind.title()).strong().size(18.0).color(ACCENT));

        let search = ui.add(
            egui::TextEdit::singleline(&mut self.search_query)
                .id_salt((kind.name(), "search"))
                .hint_text("Search fonts... (min 3 chars)")
                .desired_width(f32::INFINITY),
        );
        if search.changed() {
            actions.push(FontListAction::Search(self.search_query.clone()));
        }

        ui.horizontal_wrapped(|ui| {
            for category in explorer.categories() {
                let is_current = category.name == selected_category;
                if ui
                    .selectable_label(is_current, display_category_name(&category.name))
                    .clicked()
                {
                    actions.push(FontListAction::SelectCategory(category.name.clone()));
                }
            }
        });

        ui.label(egui::RichText::new(explorer.status_line(kind)).small().weak());
        ui.separator();

        let fonts = explorer.visible_fonts(kind);
        let mut not_loaded_on_screen = Vec::new();
        let scroll_to = self.scroll_to.take();

        let output = egui::ScrollArea::vertical()
            .id_salt((kind.name(), "fonts"))
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for (index, font) in fonts.iter().enumerate() {
                    let is_selected = font.family == selected_font;
                    let is_focused = list.focus_index() == Some(index);
                    let is_loaded = explorer.loader().is_loaded(&font.family);
                    let show_category = searching && font.category != selected_category;

                    let matched = if searching {
                        match_indices(&font.family, list.search_query())
                    } else {
                        Vec::new()
                    };
                    let job = font_row(
                        font,
                        &matched,
                        registry,
                        ui.visuals(),
                        RowTags {
                            show_category,
                            is_loaded,
                            is_selected,
                        },
                    );
                    let mut response = ui.selectable_label(is_selected, job);
                    if is_focused && !is_selected {
                        response = response.highlight();
                    }
                    if response.clicked() {
                        actions.push(FontListAction::SelectFont {
                            family: font.family.clone(),
                            index,
                        });
                    }
                    if scroll_to == Some(index) {
                        response.scroll_to_me(Some(egui::Align::Center));
                    }
                    if !is_loaded
                        && !explorer.loader().has_failed(&font.family)
                        && ui.is_rect_visible(response.rect)
                    {
                        not_loaded_on_screen.push(font.family.clone());
                    }
                }

                if searching && fonts.is_empty() {
                    ui.add_space(24.0);
                    ui.vertical_centered(|ui| {
                        ui.weak(format!("No fonts found matching \"{}\"", list.search_query()));
                    });
                }
                if !searching && list.pager().is_loading_more() {
                    ui.vertical_centered(|ui| {
                        ui.weak("Loading more fonts...");
                    });
                }
                if !searching && !list.pager().has_more() && !fonts.is_empty() {
                    ui.vertical_centered(|ui| {
                        ui.weak(format!(
                            "You've reached the end of the {} fonts",
                            display_category_name(selected_category)
                        ));
                    });
                }
            });

        let offset = output.state.offset.y;
        if self.last_offset.is_some_and(|last| last != offset) {
            actions.push(FontListAction::Scrolled(ScrollMetrics {
                scroll_top: offset,
                scroll_height: output.content_size.y,
                client_height: output.inner_rect.height(),
            }));
        }
        self.last_offset = Some(offset);

        if !not_loaded_on_screen.is_empty() {
            actions.push(FontListAction::ItemsVisible(not_loaded_on_screen));
        }
        actions
    }
}

#[derive(Debug, Clone, Copy)]
struct RowTags {
    show_category: bool,
    is_loaded: bool,
    is_selected: bool,
}

/// Two-line row: the family in its own face (search matches highlighted),
/// then variant and subset details.
fn font_row(
    font: &FontDescriptor,
    matched: &[usize],
    registry: &FontRegistry,
    visuals: &egui::Visuals,
    tags: RowTags,
) -> LayoutJob {
    let mut job = LayoutJob::default();
    let meta = |color: Color32| TextFormat {
        font_id: FontId::proportional(META_SIZE),
        color,
        ..Default::default()
    };

    let family_font = registry.font_id(&font.family, FAMILY_SIZE);
    let chars: Vec<char> = font.family.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        // Batch consecutive chars with the same highlight state
        let is_match = matched.contains(&i);
        let start = i;
        while i < chars.len() && matched.contains(&i) == is_match {
            i += 1;
        }
        let text: String = chars[start..i].iter().collect();
        let format = if is_match {
            TextFormat {
                font_id: family_font.clone(),
                color: MATCH,
                underline: egui::Stroke::new(1.0, MATCH),
                ..Default::default()
            }
        } else {
            TextFormat {
                font_id: family_font.clone(),
                color: visuals.text_color(),
                ..Default::default()
            }
        };
        job.append(&text, 0.0, format);
    }
    if !tags.is_loaded {
        job.append("Loading...", 8.0, meta(LOADING));
    }
    if tags.is_selected {
        job.append("Selected", 8.0, meta(ACCENT));
    }

    job.append(
        &format!(
            "\n{} variants • {}",
            font.variants.len(),
            font.subset_summary()
        ),
        0.0,
        meta(visuals.weak_text_color()),
    );
    if tags.show_category {
        job.append(&format!("• {}", font.category), 4.0, meta(ACCENT));
    }
    job
}
