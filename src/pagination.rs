//! Page-window arithmetic over a filtered list. Out-of-range page requests
//! are rejected, not clamped; the caller decides what a rejection means
//! (in the TUI: nothing happens).

/// Items shown per page of the catalog grid.
pub const PAGE_SIZE: usize = 10;

/// `ceil(len / per_page)`; 0 when the list is empty (no pages at all).
pub fn total_pages(len: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    len.div_ceil(per_page)
}

/// The `[(page-1)*P, page*P)` window of `items`, or `None` when `page` is
/// outside `1..=total_pages`.
pub fn page_slice<T>(items: &[T], page: usize, per_page: usize) -> Option<&[T]> {
    let pages = total_pages(items.len(), per_page);
    if page < 1 || page > pages {
        return None;
    }
    let start = (page - 1) * per_page;
    let end = (start + per_page).min(items.len());
    Some(&items[start..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_is_ceiling_division() {
        assert_eq!(total_pages(23, 10), 3);
        assert_eq!(total_pages(20, 10), 2);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(0, 10), 0);
    }

    #[test]
    fn twenty_three_items_split_ten_ten_three() {
        let items: Vec<u32> = (0..23).collect();
        assert_eq!(page_slice(&items, 1, 10).unwrap().len(), 10);
        assert_eq!(page_slice(&items, 2, 10).unwrap().len(), 10);
        assert_eq!(page_slice(&items, 3, 10).unwrap().len(), 3);
        assert_eq!(page_slice(&items, 3, 10).unwrap(), &[20, 21, 22]);
    }

    #[test]
    fn out_of_range_pages_are_rejected_not_clamped() {
        let items: Vec<u32> = (0..23).collect();
        assert!(page_slice(&items, 0, 10).is_none());
        assert!(page_slice(&items, 4, 10).is_none());
    }

    #[test]
    fn empty_list_has_no_valid_page() {
        let items: Vec<u32> = Vec::new();
        assert!(page_slice(&items, 1, 10).is_none());
    }
}
