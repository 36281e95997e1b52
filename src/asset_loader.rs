//! Background loading of font assets.
//!
//! Each request batch runs on its own worker thread and reports back over a
//! channel; [`FontAssetLoader::poll`] drains the results on the caller's
//! thread. A family is only reported as loaded once its bytes parse as a font.

use fontpair_catalog::{CatalogClient, CatalogError, FontDescriptor};
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

/// Source of font asset bytes.
pub trait AssetFetcher: Send + Sync + 'static {
    fn fetch(&self, location: &str) -> Result<Vec<u8>, CatalogError>;
}

impl AssetFetcher for CatalogClient {
    fn fetch(&self, location: &str) -> Result<Vec<u8>, CatalogError> {
        self.download_asset(location)
    }
}

/// Decides whether downloaded bytes are a usable font.
pub type AssetValidator = fn(&[u8]) -> bool;

/// True when `data` contains at least one font face.
pub fn has_font_face(data: &[u8]) -> bool {
    let mut db = fontdb::Database::new();
    db.load_font_data(data.to_vec());
    db.len() > 0
}

/// A font whose asset has been fetched and validated.
#[derive(Clone)]
pub struct LoadedFont {
    pub family: String,
    pub data: Arc<Vec<u8>>,
}

impl std::fmt::Debug for LoadedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedFont")
            .field("family", &self.family)
            .field("data_len", &self.data.len())
            .finish()
    }
}

enum LoadOutcome {
    Loaded(LoadedFont),
    Failed { family: String, reason: String },
}

/// Tracks which families are loaded, in flight or failed.
pub struct FontAssetLoader {
    /// `None` when asset loading is switched off
    fetcher: Option<Arc<dyn AssetFetcher>>,
    validator: AssetValidator,
    loaded: HashSet<String>,
    in_flight: HashSet<String>,
    failed: HashSet<String>,
    tx: Sender<LoadOutcome>,
    rx: Receiver<LoadOutcome>,
}

impl FontAssetLoader {
    pub fn new(fetcher: Arc<dyn AssetFetcher>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            fetcher: Some(fetcher),
            validator: has_font_face,
            loaded: HashSet::new(),
            in_flight: HashSet::new(),
            failed: HashSet::new(),
            tx,
            rx,
        }
    }

    /// A loader that never fetches, for front ends that do not draw fonts.
    pub fn disabled() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            fetcher: None,
            validator: has_font_face,
            loaded: HashSet::new(),
            in_flight: HashSet::new(),
            failed: HashSet::new(),
            tx,
            rx,
        }
    }

    /// Replace the font validity check.
    pub fn with_validator(mut self, validator: AssetValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn is_loaded(&self, family: &str) -> bool {
        self.loaded.contains(family)
    }

    /// True while a fetch for `family` is outstanding.
    pub fn is_pending(&self, family: &str) -> bool {
        self.in_flight.contains(family)
    }

    /// True when `family` failed to load or has no asset to load.
    pub fn has_failed(&self, family: &str) -> bool {
        self.failed.contains(family)
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    /// True when no fetch is outstanding.
    pub fn is_idle(&self) -> bool {
        self.in_flight.is_empty()
    }

    /// Start loading every font that is not loaded, in flight, or known to fail.
    ///
    /// Returns how many fetches were started.
    pub fn request<'a>(&mut self, fonts: impl IntoIterator<Item = &'a FontDescriptor>) -> usize {
        let Some(fetcher) = self.fetcher.as_ref().map(Arc::clone) else {
            return 0;
        };
        let mut batch = Vec::new();
        for font in fonts {
            if self.loaded.contains(&font.family)
                || self.in_flight.contains(&font.family)
                || self.failed.contains(&font.family)
            {
                continue;
            }
            let Some(url) = font.preferred_asset_url() else {
                log::debug!("No asset for font {}", font.family);
                self.failed.insert(font.family.clone());
                continue;
            };
            self.in_flight.insert(font.family.clone());
            batch.push((font.family.clone(), url.to_string()));
        }

        let started = batch.len();
        if started == 0 {
            return 0;
        }

        let families: Vec<String> = batch.iter().map(|(family, _)| family.clone()).collect();
        let validator = self.validator;
        let tx = self.tx.clone();
        let spawned = std::thread::Builder::new()
            .name("font-asset-load".into())
            .spawn(move || {
                for (family, url) in batch {
                    let outcome = match fetcher.fetch(&url) {
                        Ok(bytes) if validator(&bytes) => LoadOutcome::Loaded(LoadedFont {
                            family,
                            data: Arc::new(bytes),
                        }),
                        Ok(bytes) => LoadOutcome::Failed {
                            family,
                            reason: format!("{} bytes from {url} are not a font", bytes.len()),
                        },
                        Err(e) => LoadOutcome::Failed {
                            family,
                            reason: e.to_string(),
                        },
                    };
                    if tx.send(outcome).is_err() {
                        return;
                    }
                }
            });

        if let Err(e) = spawned {
            log::error!("Failed to spawn font loader thread: {}", e);
            for family in &families {
                self.in_flight.remove(family);
            }
            return 0;
        }

        log::debug!("Loading {} font assets", started);
        started
    }

    /// Collect finished loads. Returns the fonts that became available.
    pub fn poll(&mut self) -> Vec<LoadedFont> {
        let mut loaded = Vec::new();
        while let Ok(outcome) = self.rx.try_recv() {
            match outcome {
                LoadOutcome::Loaded(font) => {
                    self.in_flight.remove(&font.family);
                    self.loaded.insert(font.family.clone());
                    loaded.push(font);
                }
                LoadOutcome::Failed { family, reason } => {
                    log::warn!("Failed to load font {}: {}", family, reason);
                    self.in_flight.remove(&family);
                    self.failed.insert(family);
                }
            }
        }
        loaded
    }
}
