//! Splitting the form list into pages.
//!
//! ```
//! use formforge_store::pagination::Paginator;
//!
//! let items: Vec<i32> = (1..=23).collect();
//! let paginator = Paginator::new(&items, 10);
//! assert_eq!(paginator.num_pages(), 3);
//!
//! let page = paginator.page(3).unwrap();
//! assert_eq!(page.items(), &[21, 22, 23]);
//! assert_eq!(page.start_index(), 21);
//! assert!(!page.has_next());
//! ```

use std::ops::RangeInclusive;

use thiserror::Error;

/// Errors that can occur during pagination.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaginationError {
    /// The requested page is past the last page.
    #[error("That page contains no results")]
    EmptyPage,
    /// The page number is invalid (zero).
    #[error("Invalid page: {0}")]
    InvalidPage(String),
}

impl From<PaginationError> for formforge_core::FormForgeError {
    fn from(err: PaginationError) -> Self {
        Self::InvalidArgument(err.to_string())
    }
}

/// Splits a slice into fixed-size, 1-based pages.
///
/// An empty list still has one (empty) first page.
#[derive(Debug, Clone, Copy)]
pub struct Paginator<'a, T> {
    items: &'a [T],
    per_page: usize,
}

impl<'a, T> Paginator<'a, T> {
    /// A page size of zero is treated as one.
    pub fn new(items: &'a [T], per_page: usize) -> Self {
        Self {
            items,
            per_page: per_page.max(1),
        }
    }

    pub const fn count(&self) -> usize {
        self.items.len()
    }

    pub const fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn num_pages(&self) -> usize {
        self.count().div_ceil(self.per_page).max(1)
    }

    /// The valid page numbers (1-based, inclusive).
    pub fn page_range(&self) -> RangeInclusive<usize> {
        1..=self.num_pages()
    }

    /// Returns page `number` (1-based).
    ///
    /// # Errors
    ///
    /// `InvalidPage` for page 0, `EmptyPage` past the last page.
    pub fn page(&self, number: usize) -> Result<Page<'a, T>, PaginationError> {
        if number == 0 {
            return Err(PaginationError::InvalidPage(
                "Page number must be >= 1".to_string(),
            ));
        }
        let num_pages = self.num_pages();
        if number > num_pages {
            return Err(PaginationError::EmptyPage);
        }

        let start = (number - 1) * self.per_page;
        let end = (start + self.per_page).min(self.count());
        Ok(Page {
            items: &self.items[start..end],
            number,
            num_pages,
            per_page: self.per_page,
        })
    }

    /// Returns page `number`, falling back to the first page for 0 and to the
    /// last page past the end (e.g. after deleting the last form on a page).
    pub fn page_or_last(&self, number: usize) -> Page<'a, T> {
        let number = number.clamp(1, self.num_pages());
        let start = ((number - 1) * self.per_page).min(self.count());
        let end = (start + self.per_page).min(self.count());
        Page {
            items: &self.items[start..end],
            number,
            num_pages: self.num_pages(),
            per_page: self.per_page,
        }
    }
}

/// One page of a [`Paginator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    items: &'a [T],
    number: usize,
    num_pages: usize,
    per_page: usize,
}

impl<'a, T> Page<'a, T> {
    pub const fn items(&self) -> &'a [T] {
        self.items
    }

    /// The 1-based page number.
    pub const fn number(&self) -> usize {
        self.number
    }

    pub const fn num_pages(&self) -> usize {
        self.num_pages
    }

    pub const fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub const fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub const fn has_other_pages(&self) -> bool {
        self.has_next() || self.has_previous()
    }

    pub const fn next_page_number(&self) -> Option<usize> {
        if self.has_next() {
            Some(self.number + 1)
        } else {
            None
        }
    }

    pub const fn previous_page_number(&self) -> Option<usize> {
        if self.has_previous() {
            Some(self.number - 1)
        } else {
            None
        }
    }

    /// The 1-based position of the first item on this page, or 0 if empty.
    pub const fn start_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.number - 1) * self.per_page + 1
        }
    }

    /// The 1-based position of the last item on this page, or 0 if empty.
    pub const fn end_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.start_index() + self.items.len() - 1
        }
    }
}
