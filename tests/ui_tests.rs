//! Headless egui tests for the font pairing page and list columns.

mod common;

use common::{ms, recording_loader, sample_catalog};
use fontpair::asset_loader::FontAssetLoader;
use fontpair::explorer::{FontPairExplorer, LOAD_FAILED_MESSAGE};
use fontpair::font_list_ui::{FontListAction, FontListUI};
use fontpair::font_registry::FontRegistry;
use fontpair::pair_fonts_ui::PairFontsUI;
use fontpair::selection::{HEADING_FONT_KEY, ListKind, SelectionStore};
use fontpair::storage::MemoryStorage;
use fontpair_catalog::CatalogError;
use fontpair_config::Config;
use std::time::Instant;

/// Explorer that never fetches assets, so no catalog family is ever registered.
fn offline_explorer(saved: &[(&str, &str)]) -> FontPairExplorer {
    FontPairExplorer::new(
        Config::default(),
        SelectionStore::new(Box::new(MemoryStorage::with_values(saved.iter().copied()))),
        FontAssetLoader::disabled(),
    )
}

fn run_frame(ctx: &egui::Context, page: &mut PairFontsUI, now: Instant) {
    let _ = ctx.run(egui::RawInput::default(), |ctx| page.show_at(ctx, now));
}

#[test]
fn test_page_renders_loading_state() {
    let ctx = egui::Context::default();
    let mut page = PairFontsUI::new(offline_explorer(&[]));
    let t0 = Instant::now();
    run_frame(&ctx, &mut page, t0);
    run_frame(&ctx, &mut page, t0 + ms(16));
    assert!(page.explorer().categories().is_empty());
}

#[test]
fn test_page_renders_failed_state() {
    let ctx = egui::Context::default();
    let mut page = PairFontsUI::new(offline_explorer(&[]));
    let t0 = Instant::now();
    let error: CatalogError = serde_json::from_str::<serde_json::Value>("[")
        .unwrap_err()
        .into();
    page.explorer_mut().on_catalog_loaded(Err(error), t0);
    run_frame(&ctx, &mut page, t0);
    assert_eq!(
        page.explorer().catalog_state(),
        &fontpair::CatalogState::Failed(LOAD_FAILED_MESSAGE.to_string())
    );
}

#[test]
fn test_page_renders_catalog_and_runs_restore() {
    let ctx = egui::Context::default();
    let mut page = PairFontsUI::new(offline_explorer(&[(HEADING_FONT_KEY, "Serif Font 30")]));
    let t0 = Instant::now();
    page.explorer_mut().on_catalog_loaded(Ok(sample_catalog()), t0);

    for frame in 0..40 {
        run_frame(&ctx, &mut page, t0 + ms(frame * 20));
    }

    let explorer = page.explorer();
    assert_eq!(explorer.selected_category(ListKind::Heading), "serif");
    assert_eq!(explorer.list(ListKind::Heading).focus_index(), Some(30));
    assert!(!explorer.is_initial_load());
    assert!(!page.registry().is_active("Serif Font 30"));
}

#[test]
fn test_list_reports_unloaded_visible_rows() {
    let ctx = egui::Context::default();
    let mut explorer = offline_explorer(&[]);
    explorer.on_catalog_loaded(Ok(sample_catalog()), Instant::now());
    let registry = FontRegistry::new();
    let mut list_ui = FontListUI::new(ListKind::Body);

    let mut actions = Vec::new();
    let _ = ctx.run(egui::RawInput::default(), |ctx| {
        egui::CentralPanel::default().show(ctx, |ui| {
            actions = list_ui.show(ui, &explorer, &registry);
        });
    });

    let visible = actions.iter().find_map(|action| match action {
        FontListAction::ItemsVisible(families) => Some(families.clone()),
        _ => None,
    });
    let visible = visible.expect("rows on screen should be reported");
    assert_eq!(visible.first().map(String::as_str), Some("Display Font 00"));
    assert!(
        !actions
            .iter()
            .any(|a| matches!(a, FontListAction::Scrolled(_))),
        "the first frame has nothing to compare the offset with"
    );
}

#[test]
fn test_rows_without_assets_are_reported_once() {
    let ctx = egui::Context::default();
    let mut fonts = sample_catalog();
    for font in fonts.iter_mut().filter(|f| f.category == "display") {
        font.files.clear();
    }
    let (loader, fetcher) = recording_loader();
    let mut explorer = FontPairExplorer::new(
        Config::default(),
        SelectionStore::new(Box::new(MemoryStorage::new())),
        loader,
    );
    explorer.on_catalog_loaded(Ok(fonts), Instant::now());
    let registry = FontRegistry::new();
    let mut list_ui = FontListUI::new(ListKind::Body);

    let mut reported = Vec::new();
    for _ in 0..2 {
        let mut actions = Vec::new();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                actions = list_ui.show(ui, &explorer, &registry);
            });
        });
        for action in actions {
            if let FontListAction::ItemsVisible(families) = action {
                explorer.on_items_visible(families.iter().map(String::as_str));
                reported.push(families);
            }
        }
    }

    assert_eq!(reported.len(), 1, "asset-less rows are only reported on the first frame");
    assert!(explorer.loader().has_failed("Display Font 00"));
    assert!(fetcher.calls.lock().is_empty());
}
