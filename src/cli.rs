//! Command-line interface for fontpair.
//!
//! `ui` (the default) opens the explorer window. The report subcommands drive
//! the same [`FontPairExplorer`] with asset loading switched off and the clock
//! advanced synchronously.

use crate::asset_loader::FontAssetLoader;
use crate::explorer::FontPairExplorer;
use crate::selection::{ListKind, SelectionStore};
use crate::storage::{FileStorage, MemoryStorage, StateStorage};
use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use fontpair_catalog::{CatalogClient, CatalogSource, display_category_name};
use fontpair_config::{Config, LogLevel};
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

/// Upper bound on simulated timer steps while settling the explorer
const MAX_SETTLE_STEPS: usize = 10_000;

/// fontpair - Browse a web font catalog and pair heading and body fonts
#[derive(Parser, Debug)]
#[command(name = "fontpair")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file to use instead of ~/.config/fontpair/config.yaml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Catalog URL or JSON file, overriding the config
    #[arg(long, global = true, value_name = "SOURCE")]
    pub catalog: Option<String>,

    /// Selection state file to use instead of ~/.config/fontpair/state.yaml
    #[arg(long, global = true, value_name = "PATH")]
    pub state: Option<PathBuf>,

    /// Log level for the debug log (off, error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", value_parser = parse_log_level)]
    pub log_level: Option<LogLevel>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Open the font pairing window (the default)
    Ui,

    /// List the catalog's categories
    Categories,

    /// Show fonts of one list, page by page
    List {
        /// Which list: heading or body
        #[arg(default_value = "heading", value_parser = parse_list_kind)]
        list: ListKind,

        /// Category to show (defaults to the list's saved category)
        #[arg(long)]
        category: Option<String>,

        /// Number of pages to show
        #[arg(long, default_value_t = 1)]
        pages: usize,
    },

    /// Search all categories
    Search {
        query: String,

        /// List whose selection is used for category tags
        #[arg(long, default_value = "heading", value_parser = parse_list_kind)]
        list: ListKind,
    },

    /// Select and save a font for a list
    Select {
        #[arg(value_parser = parse_list_kind)]
        list: ListKind,

        family: String,
    },

    /// Forget the saved category and font of a list
    Clear {
        #[arg(value_parser = parse_list_kind)]
        list: ListKind,
    },

    /// Show the saved selections
    Status,
}

fn parse_list_kind(s: &str) -> Result<ListKind, String> {
    s.parse()
}

fn parse_log_level(s: &str) -> Result<LogLevel, String> {
    LogLevel::parse(s).ok_or_else(|| format!("unknown log level '{s}'"))
}

impl Cli {
    /// Load the config file and apply command-line overrides.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        if let Some(catalog) = &self.catalog {
            config.catalog_source = catalog.clone();
        }
        Ok(config)
    }

    /// Open the selection state file.
    pub fn open_storage(&self) -> FileStorage {
        let path = self
            .state
            .clone()
            .unwrap_or_else(Config::state_file_path);
        FileStorage::open(path)
    }
}

/// Run the parsed command, writing its report to `out`.
///
/// `ui` blocks until the window is closed. Only `ui`, `select` and `clear`
/// write to `storage`; other commands work on a copy.
pub fn execute(
    command: &Commands,
    config: &Config,
    storage: Box<dyn StateStorage>,
    out: &mut impl Write,
) -> Result<()> {
    let storage: Box<dyn StateStorage> = match command {
        Commands::Ui => return crate::app::run(config.clone(), storage),
        Commands::Clear { list } => {
            SelectionStore::new(storage).clear(*list);
            log::info!("Cleared {} selection", list.name());
            writeln!(out, "{} selection cleared", capitalized(list.name()))?;
            return Ok(());
        }
        Commands::Select { .. } => storage,
        _ => Box::new(snapshot(storage.as_ref())),
    };
    let (mut explorer, now) = load_explorer(config, storage)?;

    match command {
        // Handled before the catalog is read
        Commands::Ui | Commands::Clear { .. } => {}
        Commands::Categories => {
            for category in explorer.categories() {
                writeln!(
                    out,
                    "{:<14} {:>5} fonts",
                    display_category_name(&category.name),
                    category.fonts.len()
                )?;
            }
        }
        Commands::List {
            list,
            category,
            pages,
        } => {
            let kind = *list;
            if let Some(category) = category {
                if !explorer.categories().iter().any(|c| &c.name == category) {
                    bail!("Unknown category '{}'", category);
                }
                explorer.set_category(kind, category);
            }
            let mut now = now;
            for _ in 1..*pages {
                if !explorer.load_more(kind, now) {
                    break;
                }
                now = settle(&mut explorer, now);
            }
            writeln!(out, "{}", explorer.status_line(kind))?;
            for font in explorer.visible_fonts(kind) {
                writeln!(out, "  {:<32} {} variants", font.family, font.variants.len())?;
            }
            if !explorer.list(kind).pager().has_more() {
                writeln!(
                    out,
                    "You've reached the end of the {} fonts",
                    display_category_name(explorer.selected_category(kind))
                )?;
            }
        }
        Commands::Search { query, list } => {
            let kind = *list;
            explorer.set_search(kind, query, now);
            if !explorer.is_searching(kind) {
                bail!(
                    "Search needs at least {} characters",
                    config.search_min_chars
                );
            }
            let fonts = explorer.visible_fonts(kind);
            if fonts.is_empty() {
                writeln!(out, "No fonts found matching \"{}\"", query)?;
                return Ok(());
            }
            writeln!(out, "{}", explorer.status_line(kind))?;
            let current = explorer.selected_category(kind);
            for font in fonts {
                if font.category == current {
                    writeln!(out, "  {}", font.family)?;
                } else {
                    writeln!(out, "  {:<32} • {}", font.family, font.category)?;
                }
            }
        }
        Commands::Select { list, family } => {
            let kind = *list;
            let Some(font) = explorer.font(family) else {
                bail!("Font '{}' is not in the catalog", family);
            };
            let category = font.category.clone();
            let family = font.family.clone();
            explorer.set_category(kind, &category);
            let index = explorer
                .categories()
                .iter()
                .find(|c| c.name == category)
                .and_then(|c| c.fonts.iter().position(|f| f.family == family))
                .unwrap_or(0);
            explorer.select_font(kind, &family, index);
            log::info!("Selected {} font {}", kind.name(), family);
            writeln!(
                out,
                "{} font set to {} ({})",
                capitalized(kind.name()),
                family,
                display_category_name(&category)
            )?;
        }
        Commands::Status => {
            writeln!(
                out,
                "Catalog: {} ({} fonts, {} categories)",
                config.catalog_source,
                explorer.all_fonts().len(),
                explorer.categories().len()
            )?;
            for kind in ListKind::ALL {
                let font = explorer.selected_font(kind);
                let category = display_category_name(explorer.selected_category(kind));
                let shown = if font.is_empty() { "Not selected" } else { font };
                match explorer.list(kind).focus_index() {
                    Some(index) => writeln!(
                        out,
                        "{}: {} [{}, #{}]",
                        capitalized(kind.name()),
                        shown,
                        category,
                        index + 1
                    )?,
                    None => writeln!(out, "{}: {} [{}]", capitalized(kind.name()), shown, category)?,
                }
            }
        }
    }
    Ok(())
}

/// Read the catalog and bring the explorer to a settled state.
fn load_explorer(
    config: &Config,
    storage: Box<dyn StateStorage>,
) -> Result<(FontPairExplorer, Instant)> {
    let client = CatalogClient::new(CatalogSource::parse(&config.catalog_source))
        .with_limits(config.max_catalog_bytes, config.max_asset_bytes);
    let fonts = client
        .fetch()
        .with_context(|| format!("Failed to load catalog from {}", client.source()))?;

    let mut explorer = FontPairExplorer::new(
        config.clone(),
        SelectionStore::new(storage),
        FontAssetLoader::disabled(),
    );
    let now = Instant::now();
    explorer.on_catalog_loaded(Ok(fonts), now);
    let now = settle(&mut explorer, now);
    Ok((explorer, now))
}

/// Advance simulated time until no timer is pending. Returns the final time.
fn settle(explorer: &mut FontPairExplorer, mut now: Instant) -> Instant {
    let config = explorer.config();
    let step = [
        config.load_more_delay(),
        config.search_debounce(),
        config.restore_scroll_delay(),
    ]
    .into_iter()
    .max()
    .unwrap_or_default();

    for _ in 0..MAX_SETTLE_STEPS {
        if !explorer.has_pending_work() {
            break;
        }
        now += step;
        explorer.tick(now);
    }
    now
}

fn snapshot(storage: &dyn StateStorage) -> MemoryStorage {
    let mut copy = MemoryStorage::new();
    for kind in ListKind::ALL {
        for key in [kind.category_key(), kind.font_key()] {
            if let Some(value) = storage.get(key) {
                copy.set(key, &value);
            }
        }
    }
    copy
}

fn capitalized(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
