//! Explorer state shared by every front end.
//!
//! [`FontPairExplorer`] owns the catalog, the heading and body lists, the
//! asset loader and the selection store. Front ends feed it user events and
//! call [`FontPairExplorer::tick`] once per frame with the current time; all
//! delayed behavior (paging, search debounce, restore scrolling) is driven
//! from there.

use crate::asset_loader::{FontAssetLoader, LoadedFont};
use crate::pagination::{FontPager, ScrollActivity, ScrollMetrics};
use crate::restore::{ListRestore, RestoreStep};
use crate::selection::{ListKind, SelectionStore};
use fontpair_catalog::{
    CatalogClient, CatalogError, FontCategory, FontDescriptor, filter_fonts, group_by_category,
};
use fontpair_config::Config;
use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::Instant;

/// Message shown when the catalog cannot be read.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load fonts";

type CatalogResult = Result<Vec<FontDescriptor>, CatalogError>;

/// Progress of the catalog fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogState {
    Loading,
    Ready,
    Failed(String),
}

/// Per-list browsing state.
#[derive(Debug, Clone)]
pub struct FontListState {
    kind: ListKind,
    pager: FontPager,
    search_query: String,
    /// Set when the query changed and its results still need their assets requested
    search_pending_since: Option<Instant>,
    focus_index: Option<usize>,
    scroll: ScrollActivity,
    restore: ListRestore,
}

impl FontListState {
    fn new(kind: ListKind, config: &Config) -> Self {
        Self {
            kind,
            pager: FontPager::new(config.page_size, config.load_more_delay()),
            search_query: String::new(),
            search_pending_since: None,
            focus_index: None,
            scroll: ScrollActivity::new(config.scroll_idle()),
            restore: ListRestore::default(),
        }
    }

    pub fn kind(&self) -> ListKind {
        self.kind
    }

    pub fn pager(&self) -> &FontPager {
        &self.pager
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Keyboard-focus / highlight index within the visible fonts.
    pub fn focus_index(&self) -> Option<usize> {
        self.focus_index
    }

    pub fn is_user_scrolling(&self, now: Instant) -> bool {
        self.scroll.is_scrolling(now)
    }

    pub fn has_restored(&self) -> bool {
        self.restore.has_restored()
    }
}

/// Work produced by a [`FontPairExplorer::tick`].
#[derive(Debug, Default)]
pub struct TickOutput {
    /// Items each list should scroll into view (centered).
    pub scroll_to: Vec<(ListKind, usize)>,
    /// Font assets that finished loading and can now be registered for drawing.
    pub loaded: Vec<LoadedFont>,
}

pub struct FontPairExplorer {
    config: Config,
    state: CatalogState,
    fonts: Vec<FontDescriptor>,
    family_index: HashMap<String, usize>,
    categories: Vec<FontCategory>,
    heading: FontListState,
    body: FontListState,
    selection: SelectionStore,
    loader: FontAssetLoader,
    initial_load: bool,
    catalog_rx: Option<Receiver<CatalogResult>>,
}

impl FontPairExplorer {
    pub fn new(config: Config, selection: SelectionStore, loader: FontAssetLoader) -> Self {
        Self {
            heading: FontListState::new(ListKind::Heading, &config),
            body: FontListState::new(ListKind::Body, &config),
            config,
            state: CatalogState::Loading,
            fonts: Vec::new(),
            family_index: HashMap::new(),
            categories: Vec::new(),
            selection,
            loader,
            initial_load: true,
            catalog_rx: None,
        }
    }

    /// Fetch the catalog on a background thread; the result is applied by [`Self::tick`].
    pub fn begin_catalog_load(&mut self, client: CatalogClient) {
        let (tx, rx) = mpsc::channel();
        self.state = CatalogState::Loading;
        let spawned = std::thread::Builder::new()
            .name("catalog-fetch".into())
            .spawn(move || {
                let _ = tx.send(client.fetch());
            });
        match spawned {
            Ok(_) => self.catalog_rx = Some(rx),
            Err(e) => {
                log::error!("Failed to spawn catalog fetch thread: {}", e);
                self.state = CatalogState::Failed(LOAD_FAILED_MESSAGE.to_string());
            }
        }
    }

    /// Apply a fetched catalog (or the fetch error).
    pub fn on_catalog_loaded(&mut self, result: CatalogResult, now: Instant) {
        let fonts = match result {
            Ok(fonts) => fonts,
            Err(e) => {
                log::error!("Error fetching webfonts: {}", e);
                self.state = CatalogState::Failed(LOAD_FAILED_MESSAGE.to_string());
                return;
            }
        };

        self.categories = group_by_category(&fonts);
        self.family_index = fonts
            .iter()
            .enumerate()
            .map(|(i, font)| (font.family.clone(), i))
            .collect();
        self.fonts = fonts;
        self.state = CatalogState::Ready;
        log::info!(
            "Catalog ready: {} fonts in {} categories",
            self.fonts.len(),
            self.categories.len()
        );

        if let Some(first) = self.categories.first().map(|c| c.name.clone()) {
            for kind in ListKind::ALL {
                let current = self.selection.category(kind);
                let known = self.categories.iter().any(|c| c.name == current);
                if !self.selection.has_saved_category(kind) || !known {
                    self.selection.set_category(kind, &first);
                }
            }
        }

        for kind in ListKind::ALL {
            let category = self.selection.category(kind).to_string();
            self.apply_category(kind, &category);
        }

        self.advance_restore(now);
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn catalog_state(&self) -> &CatalogState {
        &self.state
    }

    pub fn categories(&self) -> &[FontCategory] {
        &self.categories
    }

    pub fn all_fonts(&self) -> &[FontDescriptor] {
        &self.fonts
    }

    pub fn font(&self, family: &str) -> Option<&FontDescriptor> {
        self.family_index.get(family).map(|&i| &self.fonts[i])
    }

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    pub fn loader(&self) -> &FontAssetLoader {
        &self.loader
    }

    pub fn list(&self, kind: ListKind) -> &FontListState {
        match kind {
            ListKind::Heading => &self.heading,
            ListKind::Body => &self.body,
        }
    }

    fn list_mut(&mut self, kind: ListKind) -> &mut FontListState {
        match kind {
            ListKind::Heading => &mut self.heading,
            ListKind::Body => &mut self.body,
        }
    }

    /// True until the saved selections have been restored (or there were none).
    pub fn is_initial_load(&self) -> bool {
        self.initial_load
    }

    pub fn selected_category(&self, kind: ListKind) -> &str {
        self.selection.category(kind)
    }

    pub fn selected_font(&self, kind: ListKind) -> &str {
        self.selection.font(kind)
    }

    /// Switch a list to another category. Selecting the current category is a no-op.
    pub fn set_category(&mut self, kind: ListKind, name: &str) {
        if self.selection.category(kind) == name {
            return;
        }
        log::debug!("{} category -> {}", kind.name(), name);
        self.selection.set_category(kind, name);
        self.apply_category(kind, name);
    }

    /// Reset the list's pager to `name`'s fonts and request their assets.
    fn apply_category(&mut self, kind: ListKind, name: &str) {
        let fonts = self
            .categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.fonts.clone())
            .unwrap_or_default();

        let list = match kind {
            ListKind::Heading => &mut self.heading,
            ListKind::Body => &mut self.body,
        };
        list.restore.rearm();
        let shown = list.pager.reset(fonts);
        self.loader.request(shown);
    }

    pub fn select_font(&mut self, kind: ListKind, family: &str, index: usize) {
        self.selection.set_font(kind, family);
        self.list_mut(kind).focus_index = Some(index);
    }

    /// Whether the list's query is long enough to search across all categories.
    pub fn is_searching(&self, kind: ListKind) -> bool {
        self.list(kind).search_query.chars().count() >= self.config.search_min_chars
    }

    pub fn set_search(&mut self, kind: ListKind, query: &str, now: Instant) {
        let min_chars = self.config.search_min_chars;
        let list = self.list_mut(kind);
        if list.search_query == query {
            return;
        }
        list.search_query = query.to_string();
        list.search_pending_since = (query.chars().count() >= min_chars).then_some(now);
    }

    /// What the list currently shows: search results across all categories
    /// while searching, otherwise the displayed prefix of its category.
    pub fn visible_fonts(&self, kind: ListKind) -> Vec<&FontDescriptor> {
        let list = self.list(kind);
        if self.is_searching(kind) {
            filter_fonts(&self.fonts, &list.search_query)
        } else {
            list.pager.displayed().iter().collect()
        }
    }

    /// Summary shown under the list header.
    pub fn status_line(&self, kind: ListKind) -> String {
        if self.is_searching(kind) {
            format!(
                "Found {} fonts matching \"{}\" across all categories",
                self.visible_fonts(kind).len(),
                self.list(kind).search_query
            )
        } else {
            let pager = &self.list(kind).pager;
            format!(
                "Showing {} of {} fonts",
                pager.displayed().len(),
                pager.total()
            )
        }
    }

    /// Record a scroll event and request the next page when near the bottom.
    pub fn on_scroll(&mut self, kind: ListKind, metrics: ScrollMetrics, now: Instant) {
        let searching = self.is_searching(kind);
        let distance = self.config.load_more_distance;
        let list = self.list_mut(kind);
        list.scroll.mark(now);

        if searching || list.pager.is_loading_more() || !list.pager.has_more() {
            return;
        }
        if metrics.should_load_more(distance) {
            list.pager.begin_load_more(now);
        }
    }

    /// Schedule the next page of a list's category directly.
    pub fn load_more(&mut self, kind: ListKind, now: Instant) -> bool {
        self.list_mut(kind).pager.begin_load_more(now)
    }

    /// Request assets for fonts that scrolled into view.
    pub fn on_items_visible<'a>(&mut self, families: impl IntoIterator<Item = &'a str>) {
        let fonts: Vec<&FontDescriptor> = families
            .into_iter()
            .filter(|family| !self.loader.is_loaded(family) && !self.loader.has_failed(family))
            .filter_map(|family| self.family_index.get(family).map(|&i| &self.fonts[i]))
            .collect();
        if !fonts.is_empty() {
            self.loader.request(fonts);
        }
    }

    /// Advance every timer-driven behavior to `now`.
    pub fn tick(&mut self, now: Instant) -> TickOutput {
        self.poll_catalog(now);

        let min_chars = self.config.search_min_chars;
        let debounce = self.config.search_debounce();
        for kind in ListKind::ALL {
            let list = match kind {
                ListKind::Heading => &mut self.heading,
                ListKind::Body => &mut self.body,
            };

            let appended = list.pager.poll(now);
            if !appended.is_empty() {
                self.loader.request(appended);
            }

            if let Some(since) = list.search_pending_since
                && now >= since + debounce
            {
                list.search_pending_since = None;
                if list.search_query.chars().count() >= min_chars {
                    let results = filter_fonts(&self.fonts, &list.search_query);
                    self.loader.request(results);
                }
            }
        }

        self.advance_restore(now);

        let mut scroll_to = Vec::new();
        for kind in ListKind::ALL {
            let list = self.list_mut(kind);
            let scrolling = list.scroll.is_scrolling(now);
            if let Some(index) = list.restore.take_due_scroll(now, scrolling) {
                scroll_to.push((kind, index));
            }
        }

        TickOutput {
            scroll_to,
            loaded: self.loader.poll(),
        }
    }

    /// True while anything is waiting on time or a background thread.
    pub fn has_pending_work(&self) -> bool {
        self.catalog_rx.is_some()
            || !self.loader.is_idle()
            || ListKind::ALL.iter().any(|&kind| {
                let list = self.list(kind);
                list.pager.is_loading_more()
                    || list.search_pending_since.is_some()
                    || list.restore.has_pending_scroll()
            })
    }

    fn poll_catalog(&mut self, now: Instant) {
        let Some(received) = self.catalog_rx.as_ref().map(Receiver::try_recv) else {
            return;
        };
        match received {
            Ok(result) => {
                self.catalog_rx = None;
                self.on_catalog_loaded(result, now);
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                log::error!("Catalog fetch thread exited without a result");
                self.catalog_rx = None;
                self.state = CatalogState::Failed(LOAD_FAILED_MESSAGE.to_string());
            }
        }
    }

    /// Run the restore sequence: categories first, then font lookup, then
    /// completion of the initial load.
    fn advance_restore(&mut self, now: Instant) {
        if !self.initial_load || self.categories.is_empty() {
            return;
        }

        for kind in ListKind::ALL {
            let saved = self.selection.saved_font(kind);
            let target = self
                .list(kind)
                .restore
                .category_to_restore(saved.as_deref(), &self.categories, self.selection.category(kind))
                .map(str::to_string);
            if let Some(target) = target {
                log::info!(
                    "Restoring {} category {} for saved font {:?}",
                    kind.name(),
                    target,
                    saved
                );
                self.selection.set_category(kind, &target);
                self.apply_category(kind, &target);
            }
        }

        let scroll_delay = self.config.restore_scroll_delay();
        for kind in ListKind::ALL {
            let saved = self.selection.saved_font(kind);
            let list = match kind {
                ListKind::Heading => &mut self.heading,
                ListKind::Body => &mut self.body,
            };
            let step = list.restore.step(
                saved.as_deref(),
                list.pager.displayed(),
                list.pager.has_more(),
                list.pager.is_loading_more(),
                now,
                scroll_delay,
            );
            match step {
                RestoreStep::Found { index } => {
                    log::info!("Restored {} font at index {}", kind.name(), index);
                    list.focus_index = Some(index);
                }
                RestoreStep::LoadMore => {
                    list.pager.begin_load_more(now);
                }
                RestoreStep::GaveUp => {
                    log::info!("Saved {} font {:?} not found", kind.name(), saved);
                }
                RestoreStep::Idle | RestoreStep::NothingSaved => {}
            }
        }

        let all_restored = self.heading.restore.has_restored() && self.body.restore.has_restored();
        let nothing_saved = ListKind::ALL
            .iter()
            .all(|&kind| self.selection.saved_font(kind).is_none());
        if all_restored || nothing_saved {
            log::debug!("Initial load complete");
            self.initial_load = false;
        }
    }
}
