//! Page-level state shared by the interaction handlers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::genre::GenreFilter;

/// Selected genre, mobile menu flag and the in-flight random search.
#[derive(Debug, Default)]
pub struct PageState {
    genre: GenreFilter,
    menu_open: bool,
    searching: Arc<AtomicBool>,
}

impl PageState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a genre chip. Blank input clears the filter.
    pub fn select_genre(&mut self, genre: &str) {
        self.genre = GenreFilter::new(genre);
        tracing::debug!(genre = %self.genre, "genre selected");
    }

    pub fn genre(&self) -> &GenreFilter {
        &self.genre
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    /// Burger button click.
    pub fn toggle_menu(&mut self) -> bool {
        self.menu_open = !self.menu_open;
        self.menu_open
    }

    /// Any in-menu link click.
    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// Mark a random search as running. `None` if one is already in flight.
    pub fn begin_search(&self) -> Option<SearchGuard> {
        self.searching
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SearchGuard {
                flag: Arc::clone(&self.searching),
            })
    }

    pub fn is_searching(&self) -> bool {
        self.searching.load(Ordering::Acquire)
    }
}

/// Ends the in-flight search when dropped.
#[derive(Debug)]
pub struct SearchGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for SearchGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_toggle_and_close() {
        let mut page = PageState::new();
        assert!(!page.menu_open());
        assert!(page.toggle_menu());
        assert!(!page.toggle_menu());

        page.toggle_menu();
        page.close_menu();
        page.close_menu();
        assert!(!page.menu_open());
    }

    #[test]
    fn test_select_genre() {
        let mut page = PageState::new();
        assert!(page.genre().is_empty());
        page.select_genre("Horror");
        assert_eq!(page.genre().as_str(), Some("Horror"));
        page.select_genre("");
        assert!(page.genre().is_empty());
    }

    #[test]
    fn test_search_is_not_reentrant() {
        let page = PageState::new();
        let guard = page.begin_search().unwrap();
        assert!(page.is_searching());
        assert!(page.begin_search().is_none());

        drop(guard);
        assert!(!page.is_searching());
        assert!(page.begin_search().is_some());
    }
}
