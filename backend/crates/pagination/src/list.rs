//! Materialized page of an ordered source.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::PageRequest;

/// One page of items plus the metadata required to navigate the others.
///
/// ## Invariants
/// - `items.len() <= page_size`.
/// - `total_pages == ceil(total_count / page_size)`.
/// - A page beyond `total_pages` holds no items.
///
/// Serializes in camelCase with the derived navigation flags included:
/// `items`, `pageIndex`, `pageSize`, `totalCount`, `totalPages`,
/// `hasPreviousPage` and `hasNextPage`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginatedList<T> {
    items: Vec<T>,
    page_index: u64,
    page_size: u64,
    total_count: u64,
    total_pages: u64,
}

impl<T> PaginatedList<T> {
    /// Slice one page out of an already ordered source.
    ///
    /// The whole source is counted so the metadata reflects every item; only
    /// the requested window is kept. No ordering is applied here: callers
    /// must supply a deterministically ordered source.
    pub fn from_ordered<I>(source: I, request: PageRequest) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let start = request.offset();
        let end = start.saturating_add(request.page_size());
        let mut position: u64 = 0;
        let mut items = Vec::new();

        for item in source {
            if (start..end).contains(&position) {
                items.push(item);
            }
            position = position.saturating_add(1);
        }

        Self::from_page(items, request, position)
    }

    /// Wrap a page that the storage layer has already windowed.
    ///
    /// `total_count` is the size of the whole filtered source, not of
    /// `items`.
    #[must_use]
    pub const fn from_page(items: Vec<T>, request: PageRequest, total_count: u64) -> Self {
        Self {
            items,
            page_index: request.page_number(),
            page_size: request.page_size(),
            total_count,
            total_pages: total_count.div_ceil(request.page_size()),
        }
    }

    /// Items on this page, in source order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page, returning its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// The 1-based index of this page.
    #[must_use]
    pub const fn page_index(&self) -> u64 {
        self.page_index
    }

    /// The requested page size.
    #[must_use]
    pub const fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Number of items in the whole source.
    #[must_use]
    pub const fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Number of pages needed to cover the whole source.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total_pages
    }

    /// Whether a page precedes this one.
    #[must_use]
    pub const fn has_previous_page(&self) -> bool {
        self.page_index > 1
    }

    /// Whether a page follows this one.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.page_index < self.total_pages
    }

    /// Convert every item while keeping the page metadata.
    #[must_use]
    pub fn map<U, F>(self, convert: F) -> PaginatedList<U>
    where
        F: FnMut(T) -> U,
    {
        PaginatedList {
            items: self.items.into_iter().map(convert).collect(),
            page_index: self.page_index,
            page_size: self.page_size,
            total_count: self.total_count,
            total_pages: self.total_pages,
        }
    }

    /// Fallibly convert every item, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `convert`.
    pub fn try_map<U, E, F>(self, convert: F) -> Result<PaginatedList<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        let items = self
            .items
            .into_iter()
            .map(convert)
            .collect::<Result<Vec<U>, E>>()?;
        Ok(PaginatedList {
            items,
            page_index: self.page_index,
            page_size: self.page_size,
            total_count: self.total_count,
            total_pages: self.total_pages,
        })
    }
}

impl<T: Serialize> Serialize for PaginatedList<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("PaginatedList", 7)?;
        state.serialize_field("items", &self.items)?;
        state.serialize_field("pageIndex", &self.page_index)?;
        state.serialize_field("pageSize", &self.page_size)?;
        state.serialize_field("totalCount", &self.total_count)?;
        state.serialize_field("totalPages", &self.total_pages)?;
        state.serialize_field("hasPreviousPage", &self.has_previous_page())?;
        state.serialize_field("hasNextPage", &self.has_next_page())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    //! Slicing and metadata behaviour for page construction.

    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn source() -> Vec<u32> {
        (1..=25).collect()
    }

    fn request(number: i64, size: i64) -> PageRequest {
        PageRequest::try_new(number, size).expect("valid request")
    }

    #[rstest]
    #[case(1, 10, false, true)]
    #[case(2, 10, true, true)]
    #[case(3, 5, true, false)]
    #[case(4, 0, true, false)]
    fn pages_of_ten_over_twenty_five_items(
        source: Vec<u32>,
        #[case] number: i64,
        #[case] expected_len: usize,
        #[case] has_previous: bool,
        #[case] has_next: bool,
    ) {
        let page = PaginatedList::from_ordered(source, request(number, 10));

        assert_eq!(page.items().len(), expected_len);
        assert_eq!(page.total_count(), 25);
        assert_eq!(page.total_pages(), 3);
        assert_eq!(page.has_previous_page(), has_previous);
        assert_eq!(page.has_next_page(), has_next);
    }

    #[rstest]
    fn keeps_source_order_within_the_window(source: Vec<u32>) {
        let page = PaginatedList::from_ordered(source, request(2, 10));
        assert_eq!(page.items(), &[11, 12, 13, 14, 15, 16, 17, 18, 19, 20]);
    }

    #[rstest]
    #[case(0, 10, 0)]
    #[case(1, 10, 1)]
    #[case(10, 10, 1)]
    #[case(11, 10, 2)]
    #[case(25, 10, 3)]
    #[case(7, 1, 7)]
    fn total_pages_rounds_up(#[case] count: u64, #[case] size: i64, #[case] expected: u64) {
        let page = PaginatedList::<u32>::from_page(Vec::new(), request(1, size), count);
        assert_eq!(page.total_pages(), expected);
    }

    #[rstest]
    fn empty_source_yields_empty_first_page() {
        let page = PaginatedList::from_ordered(Vec::<u32>::new(), request(1, 10));
        assert!(page.items().is_empty());
        assert_eq!(page.total_pages(), 0);
        assert!(!page.has_previous_page());
        assert!(!page.has_next_page());
    }

    #[rstest]
    fn far_page_is_empty_rather_than_an_error(source: Vec<u32>) {
        let page = PaginatedList::from_ordered(source, request(i64::MAX, 10));
        assert!(page.items().is_empty());
        assert_eq!(page.total_count(), 25);
        assert!(!page.has_next_page());
    }

    #[rstest]
    fn storage_windowed_page_matches_in_memory_slicing(source: Vec<u32>) {
        let in_memory = PaginatedList::from_ordered(source, request(3, 10));
        let windowed = PaginatedList::from_page(vec![21, 22, 23, 24, 25], request(3, 10), 25);
        assert_eq!(in_memory, windowed);
    }

    #[rstest]
    fn map_preserves_metadata(source: Vec<u32>) {
        let page = PaginatedList::from_ordered(source, request(2, 10)).map(|item| item * 2);
        assert_eq!(page.items().first(), Some(&22));
        assert_eq!(page.page_index(), 2);
        assert_eq!(page.total_count(), 25);
    }

    #[rstest]
    fn try_map_stops_at_first_failure(source: Vec<u32>) {
        let page = PaginatedList::from_ordered(source, request(1, 10));
        let result = page.try_map(|item| if item == 4 { Err(item) } else { Ok(item) });
        assert_eq!(result, Err(4));
    }

    #[rstest]
    fn serializes_camel_case_with_navigation_flags(source: Vec<u32>) {
        let page = PaginatedList::from_ordered(source, request(3, 10));
        let value = serde_json::to_value(&page).expect("serialize page");
        assert_eq!(
            value,
            json!({
                "items": [21, 22, 23, 24, 25],
                "pageIndex": 3,
                "pageSize": 10,
                "totalCount": 25,
                "totalPages": 3,
                "hasPreviousPage": true,
                "hasNextPage": false,
            })
        );
    }
}
