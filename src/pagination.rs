//! Infinite-scroll pagination for a font list.
//!
//! A [`FontPager`] exposes a growing prefix of one category's fonts. Growth is
//! requested when the viewport nears the bottom of the list and completes after
//! a short delay, driven by [`FontPager::poll`] with the caller's clock.

use fontpair_catalog::FontDescriptor;
use std::time::{Duration, Instant};

/// Scroll geometry of a list viewport, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// Offset of the viewport from the top of the content
    pub scroll_top: f32,
    /// Total content height
    pub scroll_height: f32,
    /// Viewport height
    pub client_height: f32,
}

impl ScrollMetrics {
    /// Content left below the viewport.
    pub fn remaining(&self) -> f32 {
        self.scroll_height - self.scroll_top - self.client_height
    }

    /// True when the viewport is within `distance` of the bottom.
    pub fn should_load_more(&self, distance: f32) -> bool {
        self.remaining() < distance
    }
}

/// Displayed prefix of a category plus the in-flight "load more" request.
#[derive(Debug, Clone)]
pub struct FontPager {
    fonts: Vec<FontDescriptor>,
    displayed: usize,
    has_more: bool,
    /// When the pending page should be appended
    pending_until: Option<Instant>,
    page_size: usize,
    load_more_delay: Duration,
}

impl FontPager {
    pub fn new(page_size: usize, load_more_delay: Duration) -> Self {
        Self {
            fonts: Vec::new(),
            displayed: 0,
            has_more: false,
            pending_until: None,
            page_size: page_size.max(1),
            load_more_delay,
        }
    }

    /// Replace the category being paged and show its first page.
    ///
    /// Returns the newly displayed fonts so their assets can be requested.
    /// Any pending page request is dropped.
    pub fn reset(&mut self, fonts: Vec<FontDescriptor>) -> &[FontDescriptor] {
        self.displayed = fonts.len().min(self.page_size);
        self.has_more = fonts.len() > self.page_size;
        self.fonts = fonts;
        self.pending_until = None;
        &self.fonts[..self.displayed]
    }

    /// Forget the current category.
    pub fn clear(&mut self) {
        self.reset(Vec::new());
    }

    pub fn displayed(&self) -> &[FontDescriptor] {
        &self.fonts[..self.displayed]
    }

    /// Size of the whole category, not just the displayed prefix.
    pub fn total(&self) -> usize {
        self.fonts.len()
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading_more(&self) -> bool {
        self.pending_until.is_some()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Schedule the next page. Ignored while a page is pending or when the
    /// category is exhausted; returns whether a request was scheduled.
    pub fn begin_load_more(&mut self, now: Instant) -> bool {
        if self.is_loading_more() || !self.has_more {
            return false;
        }
        self.pending_until = Some(now + self.load_more_delay);
        log::debug!(
            "Scheduled page after {} of {} fonts",
            self.displayed,
            self.fonts.len()
        );
        true
    }

    /// Append the pending page once its delay has elapsed.
    ///
    /// Returns the appended fonts (empty when nothing was due).
    pub fn poll(&mut self, now: Instant) -> &[FontDescriptor] {
        match self.pending_until {
            Some(due) if now >= due => {}
            _ => return &[],
        }
        self.pending_until = None;

        let start = self.displayed;
        let end = (start + self.page_size).min(self.fonts.len());
        self.has_more = start + self.page_size < self.fonts.len();
        self.displayed = end;
        &self.fonts[start..end]
    }
}

/// Tracks whether the user is actively scrolling a list.
///
/// Every scroll event extends the "scrolling" window by `idle`.
#[derive(Debug, Clone, Copy)]
pub struct ScrollActivity {
    last_scroll: Option<Instant>,
    idle: Duration,
}

impl ScrollActivity {
    pub fn new(idle: Duration) -> Self {
        Self {
            last_scroll: None,
            idle,
        }
    }

    pub fn mark(&mut self, now: Instant) {
        self.last_scroll = Some(now);
    }

    pub fn is_scrolling(&self, now: Instant) -> bool {
        self.last_scroll
            .is_some_and(|last| now.saturating_duration_since(last) < self.idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(300);

    fn fonts(n: usize) -> Vec<FontDescriptor> {
        (0..n)
            .map(|i| FontDescriptor::new(format!("Font {i}"), "serif"))
            .collect()
    }

    #[test]
    fn test_reset_shows_first_page() {
        let mut pager = FontPager::new(20, DELAY);
        assert_eq!(pager.reset(fonts(45)).len(), 20);
        assert!(pager.has_more());
        assert_eq!(pager.total(), 45);

        assert_eq!(pager.reset(fonts(20)).len(), 20);
        assert!(!pager.has_more());

        assert_eq!(pager.reset(fonts(3)).len(), 3);
        assert!(!pager.has_more());
    }

    #[test]
    fn test_load_more_waits_for_delay() {
        let mut pager = FontPager::new(20, DELAY);
        pager.reset(fonts(45));
        let t0 = Instant::now();

        assert!(pager.begin_load_more(t0));
        assert!(pager.is_loading_more());
        assert!(!pager.begin_load_more(t0), "second request while pending is ignored");

        assert!(pager.poll(t0 + Duration::from_millis(100)).is_empty());
        assert_eq!(pager.displayed().len(), 20);

        let appended = pager.poll(t0 + DELAY);
        assert_eq!(appended.len(), 20);
        assert_eq!(appended[0].family, "Font 20");
        assert_eq!(pager.displayed().len(), 40);
        assert!(pager.has_more());
        assert!(!pager.is_loading_more());
    }

    #[test]
    fn test_last_page_exhausts() {
        let mut pager = FontPager::new(20, DELAY);
        pager.reset(fonts(45));
        let t0 = Instant::now();
        pager.begin_load_more(t0);
        pager.poll(t0 + DELAY);
        pager.begin_load_more(t0 + DELAY);
        let appended = pager.poll(t0 + DELAY * 2);
        assert_eq!(appended.len(), 5);
        assert_eq!(pager.displayed().len(), 45);
        assert!(!pager.has_more());
        assert!(!pager.begin_load_more(t0 + DELAY * 2));
    }

    #[test]
    fn test_reset_drops_pending_request() {
        let mut pager = FontPager::new(2, DELAY);
        pager.reset(fonts(10));
        let t0 = Instant::now();
        pager.begin_load_more(t0);
        pager.reset(fonts(4));
        assert!(!pager.is_loading_more());
        assert!(pager.poll(t0 + DELAY).is_empty());
        assert_eq!(pager.displayed().len(), 2);
    }

    #[test]
    fn test_should_load_more_distance() {
        let near = ScrollMetrics {
            scroll_top: 820.0,
            scroll_height: 1200.0,
            client_height: 300.0,
        };
        assert_eq!(near.remaining(), 80.0);
        assert!(near.should_load_more(100.0));

        let far = ScrollMetrics {
            scroll_top: 0.0,
            ..near
        };
        assert!(!far.should_load_more(100.0));

        let exact = ScrollMetrics {
            scroll_top: 800.0,
            ..near
        };
        assert!(!exact.should_load_more(100.0), "threshold is strict");
    }

    #[test]
    fn test_scroll_activity_window() {
        let mut activity = ScrollActivity::new(Duration::from_millis(150));
        let t0 = Instant::now();
        assert!(!activity.is_scrolling(t0));
        activity.mark(t0);
        assert!(activity.is_scrolling(t0 + Duration::from_millis(149)));
        assert!(!activity.is_scrolling(t0 + Duration::from_millis(150)));
    }
}
