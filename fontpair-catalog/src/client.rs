//! Catalog client: reads the font list and individual font assets.

use crate::descriptor::{CatalogResponse, FontDescriptor};
use crate::error::CatalogError;
use crate::http;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use ureq::Agent;

/// Default cap on the catalog body (50 MB).
pub const MAX_CATALOG_SIZE: u64 = 50 * 1024 * 1024;

/// Default cap on a single font asset (10 MB).
pub const MAX_ASSET_SIZE: u64 = 10 * 1024 * 1024;

/// Where the catalog lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// `http://` or `https://` endpoint
    Url(String),
    /// JSON file on disk
    File(PathBuf),
}

impl CatalogSource {
    /// Classify a configured source string. Anything that is not an
    /// `http(s)://` URL is treated as a path.
    pub fn parse(source: &str) -> Self {
        let trimmed = source.trim();
        if is_remote(trimmed) {
            CatalogSource::Url(trimmed.to_string())
        } else {
            CatalogSource::File(PathBuf::from(trimmed))
        }
    }
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::Url(url) => write!(f, "{url}"),
            CatalogSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

fn is_remote(location: &str) -> bool {
    let lower = location.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Fetches the catalog and font assets.
///
/// For a catalog file, asset locations that are not URLs are resolved
/// relative to the file's directory, so a catalog and its fonts can be shipped
/// side by side. For a remote catalog they are resolved against its URL.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    source: CatalogSource,
    agent: Agent,
    max_catalog_bytes: u64,
    max_asset_bytes: u64,
}

impl CatalogClient {
    pub fn new(source: CatalogSource) -> Self {
        Self {
            source,
            agent: http::agent(),
            max_catalog_bytes: MAX_CATALOG_SIZE,
            max_asset_bytes: MAX_ASSET_SIZE,
        }
    }

    pub fn with_limits(mut self, max_catalog_bytes: u64, max_asset_bytes: u64) -> Self {
        self.max_catalog_bytes = max_catalog_bytes;
        self.max_asset_bytes = max_asset_bytes;
        self
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// Read the catalog and return its items in catalog order.
    pub fn fetch(&self) -> Result<Vec<FontDescriptor>, CatalogError> {
        let bytes = match &self.source {
            CatalogSource::Url(url) => http::get_bytes(&self.agent, url, self.max_catalog_bytes)?,
            CatalogSource::File(path) => read_limited(path, self.max_catalog_bytes)?,
        };
        let response: CatalogResponse = serde_json::from_slice(&bytes)?;
        log::info!(
            "Fetched {} fonts from catalog {}",
            response.items.len(),
            self.source
        );
        Ok(response.items)
    }

    /// Download the font file at `location`.
    pub fn download_asset(&self, location: &str) -> Result<Vec<u8>, CatalogError> {
        match self.resolve_asset(location)? {
            AssetLocation::Remote(url) => http::get_bytes(&self.agent, &url, self.max_asset_bytes),
            AssetLocation::Local(path) => read_limited(&path, self.max_asset_bytes),
        }
    }

    /// Where the asset at `location` is read from.
    ///
    /// Locations in a remote catalog are joined onto the catalog URL and
    /// never touch the filesystem.
    pub fn resolve_asset(&self, location: &str) -> Result<AssetLocation, CatalogError> {
        match &self.source {
            CatalogSource::Url(base) => {
                let invalid = |e: url::ParseError| CatalogError::InvalidUrl {
                    url: location.to_string(),
                    reason: e.to_string(),
                };
                let url = url::Url::parse(base)
                    .map_err(invalid)?
                    .join(location)
                    .map_err(invalid)?;
                http::validate_remote_url(url.as_str())?;
                Ok(AssetLocation::Remote(url.into()))
            }
            CatalogSource::File(_) if is_remote(location) => {
                Ok(AssetLocation::Remote(location.to_string()))
            }
            CatalogSource::File(catalog) => {
                let path = Path::new(location);
                if path.is_absolute() {
                    return Ok(AssetLocation::Local(path.to_path_buf()));
                }
                let resolved = catalog
                    .parent()
                    .map(|dir| dir.join(path))
                    .unwrap_or_else(|| path.to_path_buf());
                Ok(AssetLocation::Local(resolved))
            }
        }
    }
}

/// A resolved font asset location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetLocation {
    Remote(String),
    Local(PathBuf),
}

/// Read a regular file, failing once more than `limit` bytes arrive.
///
/// The reported length is not trusted: `/proc` entries claim zero bytes.
fn read_limited(path: &Path, limit: u64) -> Result<Vec<u8>, CatalogError> {
    let io_err = |source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    };
    let file = File::open(path).map_err(io_err)?;
    if !file.metadata().map_err(io_err)?.is_file() {
        return Err(io_err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a regular file",
        )));
    }

    let mut bytes = Vec::new();
    file.take(limit.saturating_add(1))
        .read_to_end(&mut bytes)
        .map_err(io_err)?;
    if bytes.len() as u64 > limit {
        return Err(CatalogError::TooLarge {
            source_name: path.display().to_string(),
            limit,
        });
    }
    Ok(bytes)
}
