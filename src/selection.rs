//! Selected heading/body fonts and categories, persisted through [`StateStorage`].

use crate::storage::StateStorage;

/// Storage keys. These names are shared with earlier releases and must not change.
pub const HEADING_CATEGORY_KEY: &str = "fontpairs-heading-category";
pub const BODY_CATEGORY_KEY: &str = "fontpairs-body-category";
pub const HEADING_FONT_KEY: &str = "fontpairs-heading-font";
pub const BODY_FONT_KEY: &str = "fontpairs-body-font";

/// Which of the two parallel lists an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Heading,
    Body,
}

impl ListKind {
    pub const ALL: [ListKind; 2] = [ListKind::Heading, ListKind::Body];

    /// Panel title
    pub fn title(self) -> &'static str {
        match self {
            ListKind::Heading => "Heading Fonts",
            ListKind::Body => "Body Fonts",
        }
    }

    /// Short machine name, also used as the CLI argument and widget id salt.
    pub fn name(self) -> &'static str {
        match self {
            ListKind::Heading => "heading",
            ListKind::Body => "body",
        }
    }

    pub fn category_key(self) -> &'static str {
        match self {
            ListKind::Heading => HEADING_CATEGORY_KEY,
            ListKind::Body => BODY_CATEGORY_KEY,
        }
    }

    pub fn font_key(self) -> &'static str {
        match self {
            ListKind::Heading => HEADING_FONT_KEY,
            ListKind::Body => BODY_FONT_KEY,
        }
    }
}

impl std::str::FromStr for ListKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "heading" => Ok(ListKind::Heading),
            "body" => Ok(ListKind::Body),
            other => Err(format!("unknown list '{other}' (expected 'heading' or 'body')")),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct ListSelection {
    category: String,
    font: String,
}

/// Current selections for both lists.
///
/// Values start from storage. Non-empty values are written back as soon as
/// they change; an empty value is never written.
pub struct SelectionStore {
    storage: Box<dyn StateStorage>,
    heading: ListSelection,
    body: ListSelection,
}

impl std::fmt::Debug for SelectionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionStore")
            .field("heading", &self.heading)
            .field("body", &self.body)
            .finish()
    }
}

impl SelectionStore {
    pub fn new(storage: Box<dyn StateStorage>) -> Self {
        let load = |list: ListKind| ListSelection {
            category: storage.get(list.category_key()).unwrap_or_default(),
            font: storage.get(list.font_key()).unwrap_or_default(),
        };
        let heading = load(ListKind::Heading);
        let body = load(ListKind::Body);
        Self {
            storage,
            heading,
            body,
        }
    }

    fn list(&self, list: ListKind) -> &ListSelection {
        match list {
            ListKind::Heading => &self.heading,
            ListKind::Body => &self.body,
        }
    }

    fn list_mut(&mut self, list: ListKind) -> &mut ListSelection {
        match list {
            ListKind::Heading => &mut self.heading,
            ListKind::Body => &mut self.body,
        }
    }

    /// Selected category, empty when none.
    pub fn category(&self, list: ListKind) -> &str {
        &self.list(list).category
    }

    /// Selected font family, empty when none.
    pub fn font(&self, list: ListKind) -> &str {
        &self.list(list).font
    }

    pub fn set_category(&mut self, list: ListKind, category: &str) {
        self.list_mut(list).category = category.to_string();
        if !category.is_empty() {
            self.storage.set(list.category_key(), category);
        }
    }

    pub fn set_font(&mut self, list: ListKind, family: &str) {
        self.list_mut(list).font = family.to_string();
        if !family.is_empty() {
            self.storage.set(list.font_key(), family);
        }
    }

    /// Forget the saved category and font of `list`.
    pub fn clear(&mut self, list: ListKind) {
        *self.list_mut(list) = ListSelection::default();
        self.storage.remove(list.category_key());
        self.storage.remove(list.font_key());
    }

    /// Whether storage holds a non-empty category for `list`.
    pub fn has_saved_category(&self, list: ListKind) -> bool {
        self.storage
            .get(list.category_key())
            .is_some_and(|c| !c.is_empty())
    }

    /// The persisted font for `list`, read straight from storage.
    pub fn saved_font(&self, list: ListKind) -> Option<String> {
        self.storage
            .get(list.font_key())
            .filter(|font| !font.is_empty())
    }
}
