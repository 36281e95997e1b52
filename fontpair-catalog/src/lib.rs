//! Web font catalog support for the fontpair explorer.
//!
//! Provides:
//! - `descriptor`: the catalog JSON shape and grouping into categories
//! - `client`: fetching the catalog and font assets from a URL or local file
//! - `http`: the configured HTTP agent and URL validation
//! - `search`: case-insensitive subsequence (fuzzy) filtering

pub mod client;
pub mod descriptor;
pub mod error;
pub mod http;
pub mod search;

pub use client::{AssetLocation, CatalogClient, CatalogSource};
pub use descriptor::{
    CatalogResponse, FontCategory, FontDescriptor, display_category_name, find_font_category,
    group_by_category,
};
pub use error::CatalogError;
pub use search::{filter_fonts, fuzzy_match, match_indices};
