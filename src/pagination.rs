//! Offset pagination shared by the list endpoints.

use serde::{Deserialize, Serialize};

pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;
pub const MAX_ITEMS_PER_PAGE: usize = 100;

/// Optional `page`/`limit` query parameters.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

/// Reference to a neighbouring page in a list response.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct PageRef {
    pub page: usize,
    pub limit: usize,
}

impl PageParams {
    /// Returns the requested page when the caller asked for pagination.
    ///
    /// Page numbers start at 1 and the limit is clamped to
    /// [`MAX_ITEMS_PER_PAGE`].
    pub fn resolve(&self) -> Option<PageRef> {
        if self.page.is_none() && self.limit.is_none() {
            return None;
        }
        Some(PageRef {
            page: self.page.unwrap_or(1).max(1),
            limit: self
                .limit
                .unwrap_or(DEFAULT_ITEMS_PER_PAGE)
                .clamp(1, MAX_ITEMS_PER_PAGE),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub next_page: Option<PageRef>,
    pub previous_page: Option<PageRef>,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total: usize, page: Option<PageRef>) -> Self {
        let (next_page, previous_page) = match page {
            Some(PageRef { page, limit }) => (
                (page.saturating_mul(limit) < total).then_some(PageRef {
                    page: page.saturating_add(1),
                    limit,
                }),
                (page > 1).then_some(PageRef {
                    page: page - 1,
                    limit,
                }),
            ),
            None => (None, None),
        };

        Self {
            items,
            total,
            next_page,
            previous_page,
        }
    }

    pub fn map<U, F>(self, f: F) -> Paginated<U>
    where
        F: FnMut(T) -> U,
    {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            next_page: self.next_page,
            previous_page: self.previous_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_params_means_no_pagination() {
        assert_eq!(PageParams::default().resolve(), None);
        let page = Paginated::new(vec![1, 2, 3], 3, None);
        assert!(page.next_page.is_none());
        assert!(page.previous_page.is_none());
    }

    #[test]
    fn resolve_clamps_values() {
        let params = PageParams {
            page: Some(0),
            limit: Some(10_000),
        };
        assert_eq!(
            params.resolve(),
            Some(PageRef {
                page: 1,
                limit: MAX_ITEMS_PER_PAGE
            })
        );
        let params = PageParams {
            page: Some(3),
            limit: None,
        };
        assert_eq!(
            params.resolve(),
            Some(PageRef {
                page: 3,
                limit: DEFAULT_ITEMS_PER_PAGE
            })
        );
    }

    #[test]
    fn neighbours_are_computed() {
        let first = Paginated::new(vec![(); 10], 25, Some(PageRef { page: 1, limit: 10 }));
        assert_eq!(first.next_page, Some(PageRef { page: 2, limit: 10 }));
        assert_eq!(first.previous_page, None);

        let last = Paginated::new(vec![(); 5], 25, Some(PageRef { page: 3, limit: 10 }));
        assert_eq!(last.next_page, None);
        assert_eq!(last.previous_page, Some(PageRef { page: 2, limit: 10 }));
    }

    #[test]
    fn huge_page_has_no_next_page() {
        let page = Paginated::<()>::new(
            vec![],
            25,
            Some(PageRef {
                page: usize::MAX,
                limit: MAX_ITEMS_PER_PAGE,
            }),
        );
        assert_eq!(page.next_page, None);
        assert_eq!(
            page.previous_page.map(|p| p.page),
            Some(usize::MAX - 1)
        );
    }
}
