use std::ops::Range;

use thiserror::Error;

/// Page sizes offered by the length menu. Nothing else is accepted.
pub const PAGE_LENGTHS: [usize; 5] = [5, 10, 25, 50, 100];
pub const DEFAULT_PAGE_LENGTH: usize = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("page length {0} is not one of the offered lengths")]
    UnsupportedLength(usize),
}

/// Client-side paging state for the results table.
///
/// The page index is stored as requested and clamped against the row count
/// only when it is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page_length: usize,
    page: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self {
            page_length: DEFAULT_PAGE_LENGTH,
            page: 0,
        }
    }
}

impl Pager {
    pub fn with_length(page_length: usize) -> Result<Self, PaginationError> {
        let mut pager = Self::default();
        pager.set_page_length(page_length)?;
        Ok(pager)
    }

    pub fn page_length(&self) -> usize {
        self.page_length
    }

    /// Changing the length jumps back to the first page.
    pub fn set_page_length(&mut self, page_length: usize) -> Result<(), PaginationError> {
        if !PAGE_LENGTHS.contains(&page_length) {
            return Err(PaginationError::UnsupportedLength(page_length));
        }
        self.page_length = page_length;
        self.page = 0;
        Ok(())
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Always at least one page, even for an empty table.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_length).max(1)
    }

    pub fn current_page(&self, total: usize) -> usize {
        self.page.min(self.page_count(total) - 1)
    }

    pub fn visible_range(&self, total: usize) -> Range<usize> {
        let start = self.current_page(total) * self.page_length;
        let end = (start + self.page_length).min(total);
        start.min(total)..end
    }

    pub fn is_visible(&self, index: usize, total: usize) -> bool {
        self.visible_range(total).contains(&index)
    }
}

pub fn length_menu_html(pager: &Pager) -> String {
    let options: String = PAGE_LENGTHS
        .iter()
        .map(|length| {
            let selected = if *length == pager.page_length() {
                " selected"
            } else {
                ""
            };
            format!(r#"<option value="{length}"{selected}>{length}</option>"#)
        })
        .collect();
    format!(
        r#"<form class="dataTables_length" method="get"><label>Show <select name="length" onchange="this.form.submit()">{options}</select> entries</label></form>"#
    )
}

pub fn info_html(pager: &Pager, total: usize) -> String {
    let range = pager.visible_range(total);
    let (first, last) = if range.is_empty() {
        (0, 0)
    } else {
        (range.start + 1, range.end)
    };
    format!(
        r#"<div class="dataTables_info">Showing {first} to {last} of {total} entries (page {} of {})</div>"#,
        pager.current_page(total) + 1,
        pager.page_count(total)
    )
}

/// Previous/next links; the host resolves them against the page URL.
pub fn nav_html(pager: &Pager, total: usize) -> String {
    let current = pager.current_page(total);
    let link = |label: &str, target: Option<usize>| match target {
        Some(page) => format!(
            r#"<li><a href="?length={}&amp;page={page}">{label}</a></li>"#,
            pager.page_length()
        ),
        None => format!(r#"<li class="disabled"><span>{label}</span></li>"#),
    };
    let previous = current.checked_sub(1);
    let next = (current + 1 < pager.page_count(total)).then_some(current + 1);
    format!(
        r#"<ul class="pagination">{}{}</ul>"#,
        link("Previous", previous),
        link("Next", next)
    )
}

#[cfg(test)]
#[path = "tests/pagination_tests.rs"]
mod tests;
