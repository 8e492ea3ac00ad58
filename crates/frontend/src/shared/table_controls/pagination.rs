/// Page number is 1-indexed; both fields are always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub page_number: usize,
    pub items_per_page: usize,
}

impl PageState {
    pub fn new(items_per_page: usize) -> Self {
        Self {
            page_number: 1,
            items_per_page: items_per_page.max(1),
        }
    }

    /// Zero-based index of the first item on the current page, saturating
    pub fn offset(&self) -> usize {
        checked_offset(self.page_number, self.items_per_page).unwrap_or(usize::MAX)
    }

    pub fn last_page_number(&self, total_item_count: usize) -> usize {
        total_pages(total_item_count, self.items_per_page).max(1)
    }
}

/// `None` when the page starts beyond what `usize` can address
pub fn checked_offset(page_number: usize, items_per_page: usize) -> Option<usize> {
    page_number.max(1).checked_sub(1)?.checked_mul(items_per_page)
}

pub fn total_pages(total_item_count: usize, items_per_page: usize) -> usize {
    if items_per_page == 0 {
        return 0;
    }
    total_item_count.div_ceil(items_per_page)
}

/// Literal values a pagination control renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationProps {
    pub page: usize,
    pub per_page: usize,
    pub item_count: usize,
    pub total_pages: usize,
    /// 1-based index of the first item shown, 0 when nothing is shown
    pub first_index: usize,
    pub last_index: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub per_page_options: Vec<usize>,
}

pub const DEFAULT_PER_PAGE_OPTIONS: [usize; 4] = [10, 20, 50, 100];

impl PaginationProps {
    pub fn new(page: &PageState, item_count: usize) -> Self {
        let total = total_pages(item_count, page.items_per_page);
        let (first_index, last_index) = if item_count == 0 || page.offset() >= item_count {
            (0, 0)
        } else {
            let first = page.offset() + 1;
            (first, page.offset().saturating_add(page.items_per_page).min(item_count))
        };
        let mut per_page_options = DEFAULT_PER_PAGE_OPTIONS.to_vec();
        if !per_page_options.contains(&page.items_per_page) {
            per_page_options.push(page.items_per_page);
            per_page_options.sort_unstable();
        }
        Self {
            page: page.page_number,
            per_page: page.items_per_page,
            item_count,
            total_pages: total,
            first_index,
            last_index,
            has_previous: page.page_number > 1,
            has_next: page.page_number < total,
            per_page_options,
        }
    }

    /// `1 - 10 of 42`
    pub fn range_text(&self) -> String {
        format!(
            "{} - {} of {}",
            self.first_index, self.last_index, self.item_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
    }

    #[test]
    fn test_props_middle_page() {
        let page = PageState {
            page_number: 2,
            items_per_page: 10,
        };
        let props = PaginationProps::new(&page, 42);
        assert_eq!(props.total_pages, 5);
        assert_eq!(props.range_text(), "11 - 20 of 42");
        assert!(props.has_previous);
        assert!(props.has_next);
    }

    #[test]
    fn test_props_last_partial_page() {
        let page = PageState {
            page_number: 5,
            items_per_page: 10,
        };
        let props = PaginationProps::new(&page, 42);
        assert_eq!(props.range_text(), "41 - 42 of 42");
        assert!(!props.has_next);
    }

    #[test]
    fn test_props_empty() {
        let props = PaginationProps::new(&PageState::new(10), 0);
        assert_eq!(props.range_text(), "0 - 0 of 0");
        assert!(!props.has_previous);
        assert!(!props.has_next);
    }

    #[test]
    fn test_checked_offset() {
        assert_eq!(checked_offset(1, 10), Some(0));
        assert_eq!(checked_offset(0, 10), Some(0));
        assert_eq!(checked_offset(3, 20), Some(40));
        assert_eq!(checked_offset(usize::MAX, 2), None);
        let page = PageState {
            page_number: usize::MAX,
            items_per_page: 10,
        };
        assert_eq!(page.offset(), usize::MAX);
        assert_eq!(PaginationProps::new(&page, 42).range_text(), "0 - 0 of 42");
    }

    #[test]
    fn test_custom_per_page_listed() {
        let props = PaginationProps::new(&PageState::new(25), 100);
        assert_eq!(props.per_page_options, vec![10, 20, 25, 50, 100]);
    }
}
