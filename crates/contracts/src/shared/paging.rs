use serde::{Deserialize, Serialize};

/// Page size used when a request does not carry one.
pub const DEFAULT_PAGE_LIMIT: usize = 10;

/// A 1-based page request.
///
/// Serialized as `?page=2&limit=10`; both fields are optional on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default = "first_page")]
    pub page: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn first_page() -> usize {
    1
}

fn default_limit() -> usize {
    DEFAULT_PAGE_LIMIT
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl PageRequest {
    pub fn new(page: usize, limit: usize) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// Same request with `page` and `limit` forced into their valid ranges.
    pub fn normalized(self) -> Self {
        Self::new(self.page, self.limit)
    }

    /// Caps the page size at `max_limit`.
    pub fn capped(self, max_limit: usize) -> Self {
        let normalized = self.normalized();
        Self {
            limit: normalized.limit.min(max_limit.max(1)),
            ..normalized
        }
    }

    pub fn offset(&self) -> usize {
        (self.page.max(1) - 1) * self.limit.max(1)
    }
}

/// One page of a server-side collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_count: usize,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current_page: 1,
            total_pages: 1,
            total_count: 0,
        }
    }
}

/// Number of pages needed for `total_count` rows. An empty collection still has one page.
pub fn total_pages(total_count: usize, limit: usize) -> usize {
    let limit = limit.max(1);
    if total_count == 0 {
        1
    } else {
        (total_count + limit - 1) / limit
    }
}

/// Cuts one page out of `items`. Pages past the end are clamped to the last page.
pub fn paginate<T: Clone>(items: &[T], request: &PageRequest) -> Page<T> {
    let request = request.normalized();
    let total_count = items.len();
    let total_pages = total_pages(total_count, request.limit);
    let current_page = request.page.min(total_pages);

    let start = (current_page - 1) * request.limit;
    let end = (start + request.limit).min(total_count);

    Page {
        items: items.get(start..end).unwrap_or(&[]).to_vec(),
        current_page,
        total_pages,
        total_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(12, 10), 2);
        assert_eq!(total_pages(5, 0), 5);
    }

    #[test]
    fn test_second_page_of_twelve() {
        let items: Vec<u32> = (1..=12).collect();
        let page = paginate(&items, &PageRequest::new(2, 10));

        assert_eq!(page.total_pages, 2);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.total_count, 12);
        assert_eq!(page.items, vec![11, 12]);
    }

    #[test]
    fn test_page_past_end_is_clamped() {
        let items: Vec<u32> = (1..=12).collect();
        let page = paginate(&items, &PageRequest::new(9, 5));

        assert_eq!(page.current_page, 3);
        assert_eq!(page.items, vec![11, 12]);
    }

    #[test]
    fn test_empty_collection() {
        let items: Vec<u32> = Vec::new();
        let page = paginate(&items, &PageRequest::default());

        assert!(page.items.is_empty());
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_request_normalization() {
        let request = PageRequest { page: 0, limit: 0 }.normalized();
        assert_eq!(request, PageRequest::new(1, 1));
        assert_eq!(PageRequest::new(3, 10).offset(), 20);
        assert_eq!(PageRequest::new(2, 1000).capped(500).limit, 500);
    }

    #[test]
    fn test_request_defaults_when_fields_missing() {
        let request: PageRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request, PageRequest::default());

        let request: PageRequest = serde_json::from_str(r#"{"page":4}"#).unwrap();
        assert_eq!(request.page, 4);
        assert_eq!(request.limit, DEFAULT_PAGE_LIMIT);
    }
}
