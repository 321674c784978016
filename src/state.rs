use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Highest star a user can award.
pub const MAX_STARS: u8 = 5;

/// User preference state: everything persisted besides the catalog itself.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Prefs {
    /// Saved-for-later content ids.
    pub watchlist: HashSet<u32>,
    /// Star ratings keyed by content id. Absence means unrated.
    pub ratings: HashMap<u32, u8>,
    /// Percent watched keyed by content id, 0-100.
    pub progress: HashMap<u32, f32>,
}

impl Prefs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build prefs from already-deserialized maps, re-clamping progress into
    /// 0-100. Files on disk and imported snapshots pass shape validation
    /// only; their values cannot be trusted to respect the contract.
    pub fn from_parts(
        watchlist: HashSet<u32>,
        ratings: HashMap<u32, u8>,
        mut progress: HashMap<u32, f32>,
    ) -> Self {
        for pct in progress.values_mut() {
            *pct = pct.clamp(0.0, 100.0);
        }
        Self {
            watchlist,
            ratings,
            progress,
        }
    }

    /// Add the id if absent, remove it if present.
    pub fn toggle_watchlist(&mut self, id: u32) {
        if !self.watchlist.insert(id) {
            self.watchlist.remove(&id);
        }
    }

    pub fn is_in_watchlist(&self, id: u32) -> bool {
        self.watchlist.contains(&id)
    }

    /// Set a star rating. Re-setting the stored value clears the entry
    /// (acts as unset); 0 and out-of-range values are ignored.
    pub fn set_rating(&mut self, id: u32, stars: u8) {
        if stars == 0 || stars > MAX_STARS {
            return;
        }
        if self.ratings.get(&id) == Some(&stars) {
            self.ratings.remove(&id);
        } else {
            self.ratings.insert(id, stars);
        }
    }

    pub fn rating(&self, id: u32) -> Option<u8> {
        self.ratings.get(&id).copied()
    }

    /// Record watch progress, clamped into 0-100. Regressions are accepted;
    /// monotonicity is the player's convention, not enforced here.
    pub fn set_progress(&mut self, id: u32, pct: f32) {
        self.progress.insert(id, pct.clamp(0.0, 100.0));
    }

    pub fn progress(&self, id: u32) -> f32 {
        self.progress.get(&id).copied().unwrap_or(0.0)
    }
}

/// Category tabs across the top of the catalog view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Movie,
    TvSeries,
    TvProgram,
    Watchlist,
}

impl CategoryFilter {
    pub fn display_name(&self) -> &'static str {
        match self {
            CategoryFilter::All => "Home",
            CategoryFilter::Movie => "Movies",
            CategoryFilter::TvSeries => "TV Series",
            CategoryFilter::TvProgram => "TV Programs",
            CategoryFilter::Watchlist => "My Watchlist",
        }
    }

    pub fn all() -> &'static [CategoryFilter] {
        &[
            CategoryFilter::All,
            CategoryFilter::Movie,
            CategoryFilter::TvSeries,
            CategoryFilter::TvProgram,
            CategoryFilter::Watchlist,
        ]
    }
}

/// Transient view selection: filters, search and the current page.
/// Never persisted; reset to defaults on startup and after an import.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub filter: CategoryFilter,
    pub genre: String,
    pub query: String,
    /// 1-based page into the filtered list.
    pub page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            filter: CategoryFilter::All,
            genre: "All".to_string(),
            query: String::new(),
            page: 1,
        }
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Filter changes invalidate the current page window.
    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
        self.page = 1;
    }

    pub fn set_genre(&mut self, genre: String) {
        self.genre = genre;
        self.page = 1;
    }

    pub fn set_query(&mut self, query: String) {
        self.query = query;
        self.page = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watchlist_toggle_is_its_own_inverse() {
        let mut prefs = Prefs::new();
        prefs.toggle_watchlist(7);
        assert!(prefs.is_in_watchlist(7));
        prefs.toggle_watchlist(7);
        assert!(!prefs.is_in_watchlist(7));
        assert_eq!(prefs.watchlist.len(), 0);
    }

    #[test]
    fn rating_same_value_twice_unsets() {
        let mut prefs = Prefs::new();
        prefs.set_rating(3, 3);
        assert_eq!(prefs.rating(3), Some(3));
        prefs.set_rating(3, 3);
        assert_eq!(prefs.rating(3), None);
        assert!(!prefs.ratings.contains_key(&3));
    }

    #[test]
    fn rating_different_value_overwrites() {
        let mut prefs = Prefs::new();
        prefs.set_rating(3, 3);
        prefs.set_rating(3, 4);
        assert_eq!(prefs.rating(3), Some(4));
    }

    #[test]
    fn rating_zero_and_overflow_are_ignored() {
        let mut prefs = Prefs::new();
        prefs.set_rating(1, 0);
        prefs.set_rating(1, MAX_STARS + 1);
        assert!(prefs.ratings.is_empty());
    }

    #[test]
    fn progress_is_clamped_but_regressions_stick() {
        let mut prefs = Prefs::new();
        prefs.set_progress(9, 250.0);
        assert_eq!(prefs.progress(9), 100.0);
        prefs.set_progress(9, 40.0);
        assert_eq!(prefs.progress(9), 40.0);
        prefs.set_progress(9, -5.0);
        assert_eq!(prefs.progress(9), 0.0);
    }

    #[test]
    fn from_parts_clamps_untrusted_progress() {
        let mut progress = HashMap::new();
        progress.insert(1, 150.0);
        progress.insert(2, -3.0);
        progress.insert(3, 55.0);
        let prefs = Prefs::from_parts(HashSet::new(), HashMap::new(), progress);
        assert_eq!(prefs.progress(1), 100.0);
        assert_eq!(prefs.progress(2), 0.0);
        assert_eq!(prefs.progress(3), 55.0);
    }

    #[test]
    fn filter_genre_and_query_changes_reset_page() {
        let mut view = ViewState::new();
        view.page = 3;
        view.set_filter(CategoryFilter::Movie);
        assert_eq!(view.page, 1);

        view.page = 3;
        view.set_genre("Drama".to_string());
        assert_eq!(view.page, 1);

        view.page = 3;
        view.set_query("ferry".to_string());
        assert_eq!(view.page, 1);
    }
}
