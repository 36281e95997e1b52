//! Default values for [`Config`](crate::Config) fields.
//!
//! Kept as free functions so they double as `#[serde(default = "...")]` targets.

/// Catalog served next to the application, mirroring a same-origin `/webfonts.json`.
pub fn catalog_source() -> String {
    "webfonts.json".to_string()
}

/// Fonts appended to a list per page.
pub fn page_size() -> usize {
    20
}

/// Distance in pixels from the bottom of a list that triggers loading the next page.
pub fn load_more_distance() -> f32 {
    100.0
}

pub fn load_more_delay_ms() -> u64 {
    300
}

/// Queries shorter than this leave the list in category mode.
pub fn search_min_chars() -> usize {
    3
}

pub fn search_debounce_ms() -> u64 {
    300
}

/// A list counts as "being scrolled" until this long after the last scroll event.
pub fn scroll_idle_ms() -> u64 {
    150
}

pub fn restore_scroll_delay_ms() -> u64 {
    300
}

/// Cap on a single font asset download (10 MB).
pub fn max_asset_bytes() -> u64 {
    10 * 1024 * 1024
}

/// Cap on the catalog response body (50 MB).
pub fn max_catalog_bytes() -> u64 {
    50 * 1024 * 1024
}
