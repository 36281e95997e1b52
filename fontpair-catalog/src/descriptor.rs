//! Catalog JSON shape and grouping of descriptors into categories.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One font family from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontDescriptor {
    pub family: String,
    #[serde(default)]
    pub variants: Vec<String>,
    /// Character subsets the family supports (e.g. "latin", "cyrillic")
    #[serde(default)]
    pub subsets: Vec<String>,
    #[serde(default)]
    pub category: String,
    /// Variant name -> asset URL
    #[serde(default)]
    pub files: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu: Option<String>,
}

impl FontDescriptor {
    /// Minimal descriptor, mostly useful for fixtures.
    pub fn new(family: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            variants: Vec::new(),
            subsets: Vec::new(),
            category: category.into(),
            files: BTreeMap::new(),
            version: None,
            last_modified: None,
            kind: None,
            menu: None,
        }
    }

    /// The asset used to render this family: the `regular` file, then `400`,
    /// then whichever file sorts first.
    pub fn preferred_asset_url(&self) -> Option<&str> {
        self.files
            .get("regular")
            .or_else(|| self.files.get("400"))
            .or_else(|| self.files.values().next())
            .map(String::as_str)
    }

    /// First two subsets joined for display, with `...` when more exist.
    pub fn subset_summary(&self) -> String {
        let mut summary = self
            .subsets
            .iter()
            .take(2)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        if self.subsets.len() > 2 {
            summary.push_str("...");
        }
        summary
    }
}

/// Top-level catalog document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogResponse {
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub items: Vec<FontDescriptor>,
}

/// A named group of descriptors sharing the same `category`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontCategory {
    pub name: String,
    pub fonts: Vec<FontDescriptor>,
}

/// Group descriptors by category.
///
/// Catalog order is preserved inside each group; groups are sorted by name.
pub fn group_by_category(fonts: &[FontDescriptor]) -> Vec<FontCategory> {
    let mut groups: BTreeMap<&str, Vec<FontDescriptor>> = BTreeMap::new();
    for font in fonts {
        groups
            .entry(font.category.as_str())
            .or_default()
            .push(font.clone());
    }

    groups
        .into_iter()
        .map(|(name, fonts)| FontCategory {
            name: name.to_string(),
            fonts,
        })
        .collect()
}

/// Name of the first category containing `family`.
pub fn find_font_category<'a>(categories: &'a [FontCategory], family: &str) -> Option<&'a str> {
    categories
        .iter()
        .find(|category| category.fonts.iter().any(|font| font.family == family))
        .map(|category| category.name.as_str())
}

/// Human-readable category label: the first `-` becomes a space.
pub fn display_category_name(name: &str) -> String {
    name.replacen('-', " ", 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn font(family: &str, category: &str) -> FontDescriptor {
        FontDescriptor::new(family, category)
    }

    #[test]
    fn test_deserialize_catalog_item() {
        let json = r#"{
            "kind": "webfonts#webfontList",
            "items": [{
                "family": "ABeeZee",
                "variants": ["regular", "italic"],
                "subsets": ["latin", "latin-ext"],
                "version": "v22",
                "lastModified": "2022-09-22",
                "files": {
                    "regular": "https://fonts.example/abeezee.ttf",
                    "italic": "https://fonts.example/abeezee-italic.ttf"
                },
                "category": "sans-serif",
                "kind": "webfonts#webfont",
                "menu": "https://fonts.example/abeezee-menu.ttf"
            }]
        }"#;

        let response: CatalogResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.items.len(), 1);
        let item = &response.items[0];
        assert_eq!(item.family, "ABeeZee");
        assert_eq!(item.category, "sans-serif");
        assert_eq!(item.last_modified.as_deref(), Some("2022-09-22"));
        assert_eq!(item.files.len(), 2);
    }

    #[test]
    fn test_group_sorts_categories_and_keeps_font_order() {
        let fonts = vec![
            font("Zilla Slab", "serif"),
            font("Abel", "sans-serif"),
            font("Lobster", "display"),
            font("Alegreya", "serif"),
        ];

        let groups = group_by_category(&fonts);
        let names: Vec<_> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["display", "sans-serif", "serif"]);

        let serif: Vec<_> = groups[2].fonts.iter().map(|f| f.family.as_str()).collect();
        assert_eq!(serif, ["Zilla Slab", "Alegreya"]);
    }

    #[test]
    fn test_group_empty() {
        assert!(group_by_category(&[]).is_empty());
    }

    #[test]
    fn test_find_font_category() {
        let groups = group_by_category(&[font("Abel", "sans-serif"), font("Lora", "serif")]);
        assert_eq!(find_font_category(&groups, "Lora"), Some("serif"));
        assert_eq!(find_font_category(&groups, "lora"), None);
    }

    #[test]
    fn test_preferred_asset_url() {
        let mut f = font("Roboto", "sans-serif");
        assert_eq!(f.preferred_asset_url(), None);

        f.files.insert("700".into(), "bold.ttf".into());
        f.files.insert("100".into(), "thin.ttf".into());
        assert_eq!(f.preferred_asset_url(), Some("thin.ttf"));

        f.files.insert("400".into(), "normal.ttf".into());
        assert_eq!(f.preferred_asset_url(), Some("normal.ttf"));

        f.files.insert("regular".into(), "regular.ttf".into());
        assert_eq!(f.preferred_asset_url(), Some("regular.ttf"));
    }

    #[test]
    fn test_subset_summary() {
        let mut f = font("Roboto", "sans-serif");
        f.subsets = vec!["latin".into(), "greek".into()];
        assert_eq!(f.subset_summary(), "latin, greek");
        f.subsets.push("cyrillic".into());
        assert_eq!(f.subset_summary(), "latin, greek...");
    }

    #[test]
    fn test_display_category_name() {
        assert_eq!(display_category_name("sans-serif"), "sans serif");
        assert_eq!(display_category_name("a-b-c"), "a b-c");
        assert_eq!(display_category_name("serif"), "serif");
    }
}
