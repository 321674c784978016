//! Pure derivations over the catalog: the filtered view and the
//! continue-watching rail. No side effects; callers re-run these only when
//! one of the inputs actually changed.

use std::collections::{HashMap, HashSet};

use crate::catalog::{ContentKind, ContentRecord};
use crate::state::CategoryFilter;

/// Derive the visible subset of the catalog, preserving catalog order.
///
/// All three predicates are conjunctive: case-insensitive title substring
/// match (empty query matches everything), exact genre-list membership
/// ("All" matches everything), and the category constraint. The Watchlist
/// category restricts to watchlist membership; search and genre still apply.
pub fn filter_content(
    items: &[ContentRecord],
    filter: CategoryFilter,
    genre: &str,
    query: &str,
    watchlist: &HashSet<u32>,
) -> Vec<ContentRecord> {
    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| {
            let matches_search =
                needle.is_empty() || item.title.to_lowercase().contains(&needle);
            let matches_genre = genre == "All" || item.has_genre(genre);
            let matches_category = match filter {
                CategoryFilter::All => true,
                CategoryFilter::Watchlist => watchlist.contains(&item.id),
                CategoryFilter::Movie => item.kind == ContentKind::Movie,
                CategoryFilter::TvSeries => item.kind == ContentKind::TvSeries,
                CategoryFilter::TvProgram => item.kind == ContentKind::TvProgram,
            };
            matches_search && matches_genre && matches_category
        })
        .cloned()
        .collect()
}

/// Records with progress strictly between 0 and 100, most-watched first.
/// The sort is stable, so ties keep catalog order. Absent entries count as 0.
pub fn continue_watching(
    items: &[ContentRecord],
    progress: &HashMap<u32, f32>,
) -> Vec<ContentRecord> {
    let pct = |item: &ContentRecord| progress.get(&item.id).copied().unwrap_or(0.0);
    let mut in_progress: Vec<ContentRecord> = items
        .iter()
        .filter(|item| {
            let p = pct(item);
            p > 0.0 && p < 100.0
        })
        .cloned()
        .collect();
    in_progress.sort_by(|a, b| pct(b).partial_cmp(&pct(a)).unwrap_or(std::cmp::Ordering::Equal));
    in_progress
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_catalog;

    fn ids(items: &[ContentRecord]) -> Vec<u32> {
        items.iter().map(|i| i.id).collect()
    }

    #[test]
    fn empty_query_all_filter_returns_everything_in_order() {
        let items = default_catalog();
        let out = filter_content(&items, CategoryFilter::All, "All", "", &HashSet::new());
        assert_eq!(ids(&out), ids(&items));
    }

    #[test]
    fn search_is_case_insensitive_substring_on_title() {
        let items = default_catalog();
        let out = filter_content(&items, CategoryFilter::All, "All", "FERRY", &HashSet::new());
        assert!(!out.is_empty());
        assert!(out.iter().all(|i| i.title.to_lowercase().contains("ferry")));
    }

    #[test]
    fn category_filter_matches_kind_exactly() {
        let items = default_catalog();
        let out = filter_content(&items, CategoryFilter::TvSeries, "All", "", &HashSet::new());
        assert!(!out.is_empty());
        assert!(out.iter().all(|i| i.kind == ContentKind::TvSeries));
    }

    #[test]
    fn genre_filter_requires_exact_list_membership() {
        let items = default_catalog();
        let out = filter_content(&items, CategoryFilter::All, "Drama", "", &HashSet::new());
        assert!(!out.is_empty());
        assert!(out.iter().all(|i| i.has_genre("Drama")));
        // A prefix of a real genre must not match.
        let none = filter_content(&items, CategoryFilter::All, "Dra", "", &HashSet::new());
        assert!(none.is_empty());
    }

    #[test]
    fn watchlist_category_still_applies_search_and_genre() {
        let items = default_catalog();
        let watchlist: HashSet<u32> = items.iter().map(|i| i.id).collect();
        let out = filter_content(
            &items,
            CategoryFilter::Watchlist,
            "Thriller",
            "crimson",
            &watchlist,
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "Crimson Horizon");

        let none = filter_content(
            &items,
            CategoryFilter::Watchlist,
            "Thriller",
            "crimson",
            &HashSet::new(),
        );
        assert!(none.is_empty());
    }

    #[test]
    fn all_predicates_are_conjunctive_and_output_preserves_order() {
        let items = default_catalog();
        let out = filter_content(&items, CategoryFilter::Movie, "Thriller", "", &HashSet::new());
        // Subset, order preserved.
        let all_ids = ids(&items);
        let positions: Vec<usize> = out
            .iter()
            .map(|i| all_ids.iter().position(|id| *id == i.id).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
        assert!(out
            .iter()
            .all(|i| i.kind == ContentKind::Movie && i.has_genre("Thriller")));
    }

    #[test]
    fn no_match_is_an_empty_list_not_an_error() {
        let items = default_catalog();
        let out = filter_content(
            &items,
            CategoryFilter::All,
            "All",
            "zzz no such title",
            &HashSet::new(),
        );
        assert!(out.is_empty());
    }

    #[test]
    fn continue_watching_excludes_ends_and_sorts_descending() {
        let items = default_catalog();
        // A=0, B=45, C=100, D=10 from the first four records.
        let mut progress = HashMap::new();
        progress.insert(items[0].id, 0.0);
        progress.insert(items[1].id, 45.0);
        progress.insert(items[2].id, 100.0);
        progress.insert(items[3].id, 10.0);

        let out = continue_watching(&items, &progress);
        assert_eq!(ids(&out), vec![items[1].id, items[3].id]);
    }

    #[test]
    fn continue_watching_ties_keep_catalog_order() {
        let items = default_catalog();
        let mut progress = HashMap::new();
        progress.insert(items[4].id, 50.0);
        progress.insert(items[1].id, 50.0);
        progress.insert(items[2].id, 50.0);

        let out = continue_watching(&items, &progress);
        assert_eq!(ids(&out), vec![items[1].id, items[2].id, items[4].id]);
    }
}
