// Library exports for the explorer, its egui front end, and testing
//
// Threading: catalog and font asset fetches run on plain std threads and
// report back over mpsc channels. All explorer state is owned by the window's
// event loop thread (or the CLI thread) and advanced by `FontPairExplorer::tick`.

/// Application version (root crate version, for use by sub-crates).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod debug;

pub mod app;
pub mod asset_loader;
pub mod cli;
pub mod explorer;
pub mod font_list_ui;
pub mod font_registry;
pub mod pagination;
pub mod pair_fonts_ui;
pub mod preview_ui;
pub mod restore;
pub mod selection;
pub mod storage;

pub use explorer::{CatalogState, FontPairExplorer, TickOutput};
pub use selection::ListKind;
