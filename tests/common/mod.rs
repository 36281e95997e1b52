//! Shared integration test helpers for fontpair.
//!
//! Include with `mod common;` at the top of a test file. The
//! `#[allow(dead_code)]` attribute suppresses warnings when a file only uses
//! a subset of the helpers.

#![allow(dead_code)]

use fontpair::asset_loader::{AssetFetcher, FontAssetLoader};
use fontpair::explorer::FontPairExplorer;
use fontpair::selection::SelectionStore;
use fontpair::storage::{MemoryStorage, StateStorage};
use fontpair_catalog::{CatalogError, CatalogResponse, FontDescriptor};
use fontpair_config::Config;
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tempfile::TempDir;

/// A descriptor with one regular asset under `fonts/`.
pub fn font(family: &str, category: &str) -> FontDescriptor {
    let mut font = FontDescriptor::new(family, category);
    font.variants = vec!["regular".into(), "700".into()];
    font.subsets = vec!["latin".into(), "latin-ext".into()];
    font.files
        .insert("regular".into(), format!("fonts/{}.ttf", family.replace(' ', "")));
    font
}

/// Catalog used across the suite, in catalog (not category) order:
///
/// - `display`: 25 fonts, `Display Font 00`..`Display Font 24`
/// - `handwriting`: 24 generic fonts followed by `Lobster` (index 24)
/// - `serif`: 45 fonts, `Serif Font 00`..`Serif Font 44`
pub fn sample_catalog() -> Vec<FontDescriptor> {
    let mut fonts = Vec::new();
    for i in 0..45 {
        fonts.push(font(&format!("Serif Font {i:02}"), "serif"));
        if i < 25 {
            fonts.push(font(&format!("Display Font {i:02}"), "display"));
        }
        if i < 24 {
            fonts.push(font(&format!("Handwriting Font {i:02}"), "handwriting"));
        }
    }
    fonts.push(font("Lobster", "handwriting"));
    fonts
}

/// Write `fonts` as a catalog JSON file in a fresh temp dir.
///
/// Keep the `TempDir` alive for as long as the file is used.
pub fn write_catalog(fonts: Vec<FontDescriptor>) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("webfonts.json");
    let response = CatalogResponse {
        kind: Some("webfonts#webfontList".into()),
        items: fonts,
    };
    let json = serde_json::to_vec_pretty(&response).expect("Failed to serialize catalog");
    std::fs::write(&path, json).expect("Failed to write catalog");
    (dir, path)
}

/// Fetcher returning the location bytes, recording every call.
#[derive(Default)]
pub struct RecordingFetcher {
    pub calls: Mutex<Vec<String>>,
}

impl AssetFetcher for RecordingFetcher {
    fn fetch(&self, location: &str) -> Result<Vec<u8>, CatalogError> {
        self.calls.lock().push(location.to_string());
        Ok(location.as_bytes().to_vec())
    }
}

/// Loader over a [`RecordingFetcher`] that accepts any bytes as a font.
pub fn recording_loader() -> (FontAssetLoader, Arc<RecordingFetcher>) {
    let fetcher = Arc::new(RecordingFetcher::default());
    let loader = FontAssetLoader::new(fetcher.clone()).with_validator(|_| true);
    (loader, fetcher)
}

/// Explorer over `storage` with the recording loader. The catalog is not loaded yet.
pub fn explorer_with(storage: impl StateStorage + 'static) -> (FontPairExplorer, Arc<RecordingFetcher>) {
    let (loader, fetcher) = recording_loader();
    let explorer = FontPairExplorer::new(
        Config::default(),
        SelectionStore::new(Box::new(storage)),
        loader,
    );
    (explorer, fetcher)
}

/// Explorer with the sample catalog applied at `t0`.
pub fn loaded_explorer(
    saved: &[(&str, &str)],
    t0: Instant,
) -> (FontPairExplorer, Arc<RecordingFetcher>) {
    let (mut explorer, fetcher) = explorer_with(MemoryStorage::with_values(saved.iter().copied()));
    explorer.on_catalog_loaded(Ok(sample_catalog()), t0);
    (explorer, fetcher)
}

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}
