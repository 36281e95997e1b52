//! One-time restoration of a saved selection after the catalog arrives.
//!
//! Per list the sequence is: switch to the saved font's category, find the
//! font in the displayed prefix (paging further if it is not there yet), then
//! scroll it into view once the list has had time to lay out.

use fontpair_catalog::{FontCategory, FontDescriptor, find_font_category};
use std::time::{Duration, Instant};

/// Outcome of one restore attempt on a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreStep {
    /// Nothing to do right now (already restored, or waiting on data).
    Idle,
    /// The saved font is at `index` in the displayed list.
    Found { index: usize },
    /// The saved font is not displayed yet; another page should be requested.
    LoadMore,
    /// The category is exhausted without finding the saved font.
    GaveUp,
    /// No font was saved for this list.
    NothingSaved,
}

/// Restore progress for one list.
#[derive(Debug, Clone, Default)]
pub struct ListRestore {
    has_restored: bool,
    pending_scroll: Option<(usize, Instant)>,
}

impl ListRestore {
    pub fn has_restored(&self) -> bool {
        self.has_restored
    }

    /// Make the list eligible for restoration again (after a category change).
    pub fn rearm(&mut self) {
        self.has_restored = false;
    }

    /// Category the list must switch to before its saved font can be found,
    /// or `None` when no switch is needed.
    pub fn category_to_restore<'a>(
        &self,
        saved_font: Option<&str>,
        categories: &'a [FontCategory],
        current_category: &str,
    ) -> Option<&'a str> {
        if self.has_restored {
            return None;
        }
        let target = find_font_category(categories, saved_font?)?;
        (target != current_category).then_some(target)
    }

    /// Look for the saved font in the displayed prefix.
    ///
    /// When found, the list is marked restored and a scroll to the font is
    /// scheduled `scroll_delay` after `now`.
    pub fn step(
        &mut self,
        saved_font: Option<&str>,
        displayed: &[FontDescriptor],
        has_more: bool,
        is_loading_more: bool,
        now: Instant,
        scroll_delay: Duration,
    ) -> RestoreStep {
        if self.has_restored || displayed.is_empty() {
            return RestoreStep::Idle;
        }

        let Some(saved_font) = saved_font else {
            self.has_restored = true;
            return RestoreStep::NothingSaved;
        };

        if let Some(index) = displayed.iter().position(|f| f.family == saved_font) {
            self.has_restored = true;
            self.pending_scroll = Some((index, now + scroll_delay));
            RestoreStep::Found { index }
        } else if has_more && !is_loading_more {
            RestoreStep::LoadMore
        } else if !has_more {
            self.has_restored = true;
            RestoreStep::GaveUp
        } else {
            RestoreStep::Idle
        }
    }

    /// The index to scroll into view, once its delay has elapsed.
    ///
    /// A due scroll is dropped rather than deferred when the user is scrolling.
    pub fn take_due_scroll(&mut self, now: Instant, user_scrolling: bool) -> Option<usize> {
        match self.pending_scroll {
            Some((index, due)) if now >= due => {
                self.pending_scroll = None;
                (!user_scrolling).then_some(index)
            }
            _ => None,
        }
    }

    pub fn has_pending_scroll(&self) -> bool {
        self.pending_scroll.is_some()
    }
}
