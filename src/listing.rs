//! List view pipeline: filtering, sorting and pagination over fetched lists.
//!
//! Pure computation over in-memory data. The source list is never mutated;
//! a derived copy is recomputed in full from the source plus the current
//! filter/sort/page state whenever any of those change.

use std::cmp::Ordering;
use std::collections::HashMap;

/// Case-insensitive substring match across one or more fields.
/// An empty (or whitespace-only) query matches everything.
pub fn text_matches(query: &str, fields: &[&str]) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    fields
        .iter()
        .any(|f| f.to_lowercase().contains(&needle))
}

/// Identifier equality with the "inactive filter matches everything"
/// convention: an empty selection is a match.
pub fn id_matches(selected: &str, id: &str) -> bool {
    selected.is_empty() || selected == id
}

/// Sort direction for a list view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Active sort key plus direction.
/// Toggling the same key flips direction; a new key resets to ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState<K: PartialEq> {
    pub key: K,
    pub direction: SortDirection,
}

impl<K: PartialEq> SortState<K> {
    pub fn ascending(key: K) -> Self {
        Self {
            key,
            direction: SortDirection::Ascending,
        }
    }

    /// Apply a click on a sort header to the current state
    pub fn toggle(current: Option<Self>, key: K) -> Self {
        match current {
            Some(state) if state.key == key => Self {
                key,
                direction: state.direction.flip(),
            },
            _ => Self::ascending(key),
        }
    }
}

/// Display-name lookup for relation sort keys (author, category, publisher).
/// Built from a separately fetched reference list; unresolved ids sort as
/// the empty string.
#[derive(Debug, Clone, Default)]
pub struct NameLookup {
    names: HashMap<String, String>,
}

impl NameLookup {
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        Self {
            names: pairs
                .into_iter()
                .map(|(id, name)| (id.into(), name.into()))
                .collect(),
        }
    }

    pub fn resolve(&self, id: &str) -> &str {
        self.names.get(id).map(String::as_str).unwrap_or("")
    }
}

/// One page of a derived list, with the metadata the navigation controls
/// need
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<T> {
    pub items: Vec<T>,
    /// Total records matching the active filters (before slicing)
    pub total: usize,
    pub total_pages: usize,
    pub page: usize,
    pub per_page: usize,
}

impl<T> PageView<T> {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Total page count for a result set. An empty set still renders one
/// (empty) page.
pub fn total_pages(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 1;
    }
    std::cmp::max(1, total.div_ceil(per_page))
}

/// Slice one 1-based page out of a filtered list
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> PageView<T> {
    let total = items.len();
    let pages = total_pages(total, per_page);
    let page = page.clamp(1, pages);
    let start = (page - 1) * per_page;
    let slice = if start >= total {
        Vec::new()
    } else {
        items[start..std::cmp::min(start + per_page, total)].to_vec()
    };
    PageView {
        items: slice,
        total,
        total_pages: pages,
        page,
        per_page,
    }
}

type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;
type Comparator<T> = Box<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// State of one list view: the fetched source list plus the active filters,
/// sort and page. Every accessor derives the visible page from scratch.
pub struct ListState<T: Clone> {
    source: Vec<T>,
    filters: Vec<(String, Predicate<T>)>,
    sort: Option<(SortState<String>, Comparator<T>)>,
    page: usize,
    per_page: usize,
}

impl<T: Clone> ListState<T> {
    pub fn new(source: Vec<T>, per_page: usize) -> Self {
        Self {
            source,
            filters: Vec::new(),
            sort: None,
            page: 1,
            per_page,
        }
    }

    /// Replace the source list (after a re-fetch); keeps filters but resets
    /// the page
    pub fn set_source(&mut self, source: Vec<T>) {
        self.source = source;
        self.page = 1;
    }

    pub fn source(&self) -> &[T] {
        &self.source
    }

    /// Install or replace a named filter predicate. Resets the page to 1.
    pub fn set_filter<F>(&mut self, name: &str, predicate: F)
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.clear_filter(name);
        self.filters.push((name.to_string(), Box::new(predicate)));
        self.page = 1;
    }

    /// Remove a named filter (the filter became inactive). Resets the page.
    pub fn clear_filter(&mut self, name: &str) {
        self.filters.retain(|(n, _)| n != name);
        self.page = 1;
    }

    /// Apply a sort-header click: same key flips direction, new key sorts
    /// ascending. Resets the page to 1.
    pub fn toggle_sort<F>(&mut self, key: &str, comparator: F)
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        let next = SortState::toggle(self.sort.take().map(|(s, _)| s), key.to_string());
        self.sort = Some((next, Box::new(comparator)));
        self.page = 1;
    }

    pub fn sort_state(&self) -> Option<&SortState<String>> {
        self.sort.as_ref().map(|(s, _)| s)
    }

    /// Move to the next page; no-op when already on the last page
    pub fn next_page(&mut self) {
        if self.current().has_next() {
            self.page += 1;
        }
    }

    /// Move to the previous page; no-op on the first page
    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    /// Jump to a page, clamped to the valid range for the current filters
    pub fn set_page(&mut self, page: usize) {
        let pages = total_pages(self.filtered().len(), self.per_page);
        self.page = page.clamp(1, pages);
    }

    fn filtered(&self) -> Vec<T> {
        // All active predicates combine with logical AND
        let mut matching: Vec<T> = self
            .source
            .iter()
            .filter(|record| self.filters.iter().all(|(_, p)| p(record)))
            .cloned()
            .collect();
        if let Some((state, cmp)) = &self.sort {
            // Stable sort so equal keys keep their fetched order
            matching.sort_by(|a, b| match state.direction {
                SortDirection::Ascending => cmp(a, b),
                SortDirection::Descending => cmp(b, a),
            });
        }
        matching
    }

    /// Derive the visible page from the source plus the current state
    pub fn current(&self) -> PageView<T> {
        paginate(&self.filtered(), self.page, self.per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("book-{:02}", i)).collect()
    }

    #[test]
    fn text_matches_is_case_insensitive_substring() {
        assert!(text_matches("har", &["Harry Potter"]));
        assert!(text_matches("978-0-13", &["978-0-13-468599-1"]));
        assert!(!text_matches("dune", &["Harry Potter", "HP-1"]));
    }

    #[test]
    fn empty_query_matches_everything() {
        assert!(text_matches("", &["anything"]));
        assert!(text_matches("   ", &[]));
        assert!(id_matches("", "c42"));
    }

    #[test]
    fn filters_combine_with_and() {
        let mut list = ListState::new(numbered(20), 50);
        list.set_filter("text", |s: &String| s.contains('1'));
        list.set_filter("parity", |s: &String| s.ends_with('2'));
        let page = list.current();
        // conjunction: every result satisfies every predicate
        assert_eq!(page.items, vec!["book-12".to_string()]);
        for item in &page.items {
            assert!(item.contains('1') && item.ends_with('2'));
        }
    }

    #[test]
    fn replacing_a_named_filter_drops_the_old_predicate() {
        let mut list = ListState::new(numbered(20), 50);
        list.set_filter("text", |s: &String| s.ends_with('3'));
        list.set_filter("text", |s: &String| s.ends_with('7'));
        let page = list.current();
        assert_eq!(page.items, vec!["book-07".to_string(), "book-17".to_string()]);
    }

    #[test]
    fn descending_reverses_ascending_for_unique_keys() {
        let mut list = ListState::new(numbered(9), 100);
        list.toggle_sort("title", |a, b| a.cmp(b));
        let ascending = list.current().items;
        list.toggle_sort("title", |a, b| a.cmp(b));
        let descending = list.current().items;
        let mut reversed = ascending.clone();
        reversed.reverse();
        assert_eq!(descending, reversed);
    }

    #[test]
    fn new_sort_key_resets_to_ascending() {
        let mut list = ListState::new(numbered(5), 100);
        list.toggle_sort("title", |a, b| a.cmp(b));
        list.toggle_sort("title", |a, b| a.cmp(b));
        assert_eq!(
            list.sort_state().unwrap().direction,
            SortDirection::Descending
        );
        list.toggle_sort("isbn", |a, b| a.cmp(b));
        let state = list.sort_state().unwrap();
        assert_eq!(state.key, "isbn");
        assert_eq!(state.direction, SortDirection::Ascending);
    }

    #[test]
    fn same_configuration_is_idempotent() {
        let mut list = ListState::new(numbered(25), 10);
        list.set_filter("text", |s: &String| s.contains('1'));
        list.toggle_sort("title", |a, b| a.cmp(b));
        list.set_page(2);
        let first = list.current();
        let second = list.current();
        assert_eq!(first, second);
    }

    #[test]
    fn page_count_boundaries() {
        assert_eq!(paginate(&numbered(10), 1, 10).total_pages, 1);
        assert_eq!(paginate(&numbered(11), 1, 10).total_pages, 2);
        // 0-length source renders one empty page, not an error
        let empty = paginate(&Vec::<String>::new(), 1, 10);
        assert_eq!(empty.total_pages, 1);
        assert!(empty.items.is_empty());
        assert!(!empty.has_next());
        assert!(!empty.has_prev());
    }

    #[test]
    fn last_partial_page_of_25_books() {
        let mut list = ListState::new(numbered(25), 10);
        list.set_page(3);
        let page = list.current();
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.items[0], "book-20");
        assert_eq!(page.items[4], "book-24");
        assert!(!page.has_next());
        assert!(page.has_prev());
    }

    #[test]
    fn navigation_clamps_instead_of_wrapping() {
        let mut list = ListState::new(numbered(25), 10);
        list.set_page(3);
        list.next_page();
        assert_eq!(list.current().page, 3);
        list.set_page(99);
        assert_eq!(list.current().page, 3);
        list.prev_page();
        list.prev_page();
        list.prev_page();
        assert_eq!(list.current().page, 1);
    }

    #[test]
    fn filter_and_sort_changes_reset_the_page() {
        let mut list = ListState::new(numbered(25), 10);
        list.set_page(3);
        list.set_filter("text", |_: &String| true);
        assert_eq!(list.current().page, 1);
        list.set_page(3);
        list.toggle_sort("title", |a, b| a.cmp(b));
        assert_eq!(list.current().page, 1);
        list.set_page(2);
        list.clear_filter("text");
        assert_eq!(list.current().page, 1);
    }

    #[test]
    fn source_list_is_not_mutated_by_derivation() {
        let source = numbered(10);
        let mut list = ListState::new(source.clone(), 3);
        list.toggle_sort("title", |a, b| b.cmp(a));
        list.set_filter("text", |s: &String| s.contains('5'));
        let _ = list.current();
        assert_eq!(list.source(), source.as_slice());
    }

    #[test]
    fn name_lookup_defaults_to_empty_string() {
        let lookup = NameLookup::from_pairs([("a1", "Asimov"), ("a2", "Herbert")]);
        assert_eq!(lookup.resolve("a2"), "Herbert");
        assert_eq!(lookup.resolve("missing"), "");
    }

    #[test]
    fn relation_sort_via_lookup() {
        let lookup = NameLookup::from_pairs([("a1", "Zweig"), ("a2", "Adams")]);
        let mut list = ListState::new(vec!["a1".to_string(), "a3".to_string(), "a2".to_string()], 10);
        let sort_lookup = lookup.clone();
        list.toggle_sort("author", move |a, b| {
            sort_lookup.resolve(a).cmp(sort_lookup.resolve(b))
        });
        // unresolved id sorts as "" and therefore first
        assert_eq!(list.current().items, vec!["a3", "a2", "a1"]);
    }
}
